/// HTTP plumbing for the hosted backend.
///
/// The backend is consumed purely over request/response: a token endpoint for
/// password logins, PostgREST-style reads/writes against the relational
/// collections, and object storage for uploaded images. This crate owns the
/// `reqwest` client, the configuration, and the error mapping; it knows
/// nothing about sessions or polling.

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod storage;
pub mod table;

pub use backend::Backend;
pub use config::BackendConfig;
pub use error::ClientError;
pub use table::TableQuery;
