//! Types library for the URL shortener API
//!
//! Request and response shapes exchanged with the shortener service, plus
//! the identifier newtypes used to build unique payloads.
//!
//! # Modules
//! - `ids`: Random identifiers (UrlToken, CorrelationId)
//! - `api`: Endpoint paths and JSON bodies

pub mod ids;
pub mod api;

pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api::*;
    pub use crate::ids::*;
}
