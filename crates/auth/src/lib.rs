//! `packstore-auth`: admin capability check.
//!
//! Decoupled from HTTP: callers hand in the raw `Authorization` header value.

pub mod capability;

pub use capability::{AdminCapability, AuthError, extract_bearer};
