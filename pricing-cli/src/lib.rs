pub mod app;
pub mod cli;
pub mod config;
pub mod interactive;
pub mod logging;
pub mod render;
pub mod scenario_loader;
pub mod utils;
