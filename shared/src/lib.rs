//! Shared types and the expiration engine for the Compliance Tracker
//!
//! This crate contains the certificate models and date rules shared between
//! the backend, the browser panel (via WASM), and other components.

pub mod date_text;
pub mod error;
pub mod expiration;
pub mod models;
pub mod panel;
pub mod table;
pub mod types;
pub mod validation;

pub use date_text::*;
pub use error::*;
pub use expiration::*;
pub use models::*;
pub use panel::*;
pub use table::*;
pub use types::*;
pub use validation::*;
