//! Business logic services for the Compliance Tracker

pub mod expiration;

pub use expiration::ExpirationService;
