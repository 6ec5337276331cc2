pub mod commands;
pub mod display;
pub mod everest;

pub use commands::CliArgs;
