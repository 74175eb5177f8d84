// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod audio;
pub mod config;
pub mod core;
pub mod data;
pub mod download;
pub mod error;
pub mod file;
pub mod manifest;
pub mod progress;
pub mod runner;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
