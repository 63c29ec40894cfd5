//! Command line application: argument parsing, user settings, and the
//! runner that turns text into an SVG document

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
