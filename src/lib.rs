// lib.rs - Library root for leafwind

pub mod animation;
pub mod cli;
pub mod color;
pub mod config;
pub mod content;
pub mod discovery;
pub mod error;
pub mod export;
pub mod font;
pub mod generator;
pub mod keyframes;
pub mod length;
pub mod safelist;
pub mod source;
pub mod theme;

pub use config::Configuration;
pub use error::ConfigError;
