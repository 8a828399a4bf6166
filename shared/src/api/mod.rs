//! Resource accessors, one module per backend resource.
//!
//! Each accessor performs exactly one call through [`ApiClient::call`](crate::ApiClient::call)
//! and returns the decoded body as-is.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod students;
