//! Porter HTTP client
//!
//! A thin reqwest wrapper that owns a base URL, a set of default headers that
//! can change at runtime, and two interceptor chains: one that may rewrite
//! every outgoing request and one that observes every failed response.

pub mod client;
pub mod config;

pub use client::error::ClientError;
pub use client::interceptor::{InterceptorId, RequestInterceptor, ResponseInterceptor};
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ApiConfig;
pub use reqwest;
