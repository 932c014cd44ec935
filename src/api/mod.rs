//! REST API access for the users and todos collections.

pub mod client;

pub use client::{TodoApiClient, DEFAULT_BASE_URL};
