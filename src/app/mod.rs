//! Application module: command lines, configuration file and process startup

pub mod cli;
pub mod config;
pub mod startup;
