//! Domain models for the compliance tracker

mod category;
mod certificate;
mod status;

pub use category::*;
pub use certificate::*;
pub use status::*;
