//!
//! src/errors.rs
//!
//! Defines enums and methods of error conversion
//! for errors the badge generator uses
//!
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("markers not found: {0}")]
    MarkerNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error)
}

impl From<reqwest::Error> for BadgeError {
    fn from(e: reqwest::Error) -> Self { BadgeError::Fetch(e.to_string()) }
}
