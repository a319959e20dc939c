pub mod commands;
pub mod config;
pub mod content;
pub mod documents;
pub mod error;
pub mod executor;
pub mod render;
pub mod service;
