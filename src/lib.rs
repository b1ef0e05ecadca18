pub mod annotate;
pub mod cli;
pub mod commands;
pub mod detect;
pub mod simulate;
pub mod utils;
