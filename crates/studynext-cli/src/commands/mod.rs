pub mod assignment;
pub mod calendar;
mod common;
pub mod config;
pub mod dashboard;
pub mod stats;
pub mod swipe;
