//! Explore Olympic athlete-event data: load once, filter by Year, Sport and
//! Sex, then summarize medals and body measurements.

pub mod config;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
