//! Slider CLI support: configuration and the stdin-driven control host

pub mod config;
pub mod host;
