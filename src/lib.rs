pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod telemetry;

pub use error::{AppError, Result};
