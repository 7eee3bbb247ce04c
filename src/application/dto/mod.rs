//! # Data Transfer Objects

pub mod import_config;
