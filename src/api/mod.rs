//! Remote catalog access.
//!
//! [`HttpClient`] is the transport seam; the functions in [`usecases`] map
//! one domain intent to one HTTP call each.

mod error;
mod http;
pub mod usecases;

pub use error::ApiError;
pub use http::{HttpClient, Method, ReqwestHttpClient};
