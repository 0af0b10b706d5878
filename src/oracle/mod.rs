//! Oracle client: directional compatibility judgments from a text-generation service.
//!
//! [`OracleClient`] owns prompt construction ([`build_prompt`]) and response parsing
//! ([`parse_judgment`]); the network hop sits behind [`CompletionBackend`] so tests can
//! substitute [`MockCompletionBackend`]. Callers depend only on [`CompatibilityOracle`].
//!
//! A viewer without content or interests is rejected with [`OracleError::NoSignal`]
//! before any request is built.

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod genai_backend;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;


pub use client::{CompatibilityOracle, CompletionBackend, OracleClient};
pub use config::{
    DEFAULT_MAX_CONTENT_ITEMS, DEFAULT_ORACLE_BASE_URL, DEFAULT_ORACLE_MODEL,
    DEFAULT_ORACLE_TIMEOUT_SECS, OracleConfig, OracleProvider,
};
pub use error::{FailureKind, OracleError, OracleResult};
pub use factory::build_oracle;
pub use genai_backend::GenaiBackend;
pub use http::HttpChatBackend;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCompletionBackend;
pub use parse::{Judgment, extract_json_object, parse_judgment};
pub use prompt::{CONTENT_SEPARATOR, build_prompt};
