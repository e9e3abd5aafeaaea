//! Command-line interface for training, evaluating and playing against agents

pub mod commands;
pub mod config;
pub mod output;
