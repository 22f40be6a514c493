//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod named_pipe;
pub mod toml_config;
