pub mod activity;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod error;
pub mod model;
pub mod tui;
pub mod util;
