//! HTTP handlers for the Compliance Tracker API

mod expiration;
mod health;

pub use expiration::*;
pub use health::*;
