//! HTTP client for the inspection backend.
//!
//! `GET {api_url}/vehicles` lists selectable vehicles; `POST {api_url}/checks`
//! accepts a [`Check`](crate::model::Check). Error bodies of the form
//! `{"error":{"details":[{"field":..,"reason":..}]}}` surface as
//! [`ApiError::Rejected`] with their details.

mod client;
mod error;
mod response;

pub use client::{ApiClient, InspectionApi};
pub use error::ApiError;
pub use response::{decode_error, decode_success};
