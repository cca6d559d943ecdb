//! REST API layer: error taxonomy, payloads, trait seam, and HTTP client

mod client;
mod error;
mod payload;
mod traits;

pub use client::{resolve_base_url, HttpPortalApi, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use payload::*;
pub use traits::PortalApi;

#[cfg(test)]
pub use traits::MockPortalApi;
