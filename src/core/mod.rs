//! Core data types: requests, environment, errors.

pub mod environment;
pub mod error;
pub mod request;

pub use environment::{Environment, Platform};
pub use error::DialogError;
pub use request::{DialogKind, DialogRequest, Operation};
