//! # API crate: typed access to the BDMS backend
//!
//! Every page of the dashboard talks to the backend through [`ApiClient`].
//! The client is generic over a [`Transport`], so the same request-building
//! and error-mapping code runs against the real HTTP backend and against an
//! in-memory transport in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: one method per backend capability (files CRUD + search, transactions, schema columns) |
//! | [`config`] | [`ApiConfig`]: base URL from `BDMS_API_URL` (runtime on native, compile time on wasm) |
//! | [`error`] | [`ApiError`]: status errors with the server's message, transport, decode, config |
//! | [`transport`] | The [`Transport`] trait and the [`ApiRequest`]/[`ApiResponse`] it exchanges |
//!
//! [`HttpTransport`] sends requests with `reqwest`; [`MemoryTransport`]
//! records them and replays queued responses.

pub mod client;
pub mod config;
pub mod error;
mod http;
mod memory;
pub mod transport;

pub use client::{ApiClient, HttpClient};
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::HttpTransport;
pub use memory::MemoryTransport;
pub use transport::{ApiRequest, ApiResponse, Method, Transport};

pub use records;
