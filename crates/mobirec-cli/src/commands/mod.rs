pub mod completions;
pub mod config;
pub mod questions;
pub mod run;
