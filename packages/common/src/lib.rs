//! Shared ingestion primitives: filename normalization, candidate
//! ranking, occupation keyword tables, and webhook signature
//! verification. Everything here is pure — no network or clock access —
//! so the server crate can wire these into handlers and the tests can
//! exercise them directly.

pub mod keywords;
pub mod ranking;
pub mod signature;
pub mod text;
