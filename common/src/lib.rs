//! The `common` crate provides the components shared by connector services:
//! HTTP client helpers, time formatting and the tracing setup.

pub mod clients;
mod error;
pub mod time;
pub mod tracing;

pub use error::Error;
