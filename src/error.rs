//! Error types for the Zammad MCP server.
//!
//! This module defines `ZammadError`, the unified error type used throughout
//! the application for consistent error handling and propagation.
//!
//! # Security
//!
//! Error messages can carry upstream response bodies. Use
//! `sanitized_display()` before handing an error to the MCP host or a log
//! line so the API token and password never leak.

use std::io;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Unified error type for all Zammad operations.
#[derive(Error, Debug)]
pub enum ZammadError {
    /// Configuration error - missing credentials or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input validation failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transport-level failure (timeout, refused or reset connection).
    #[error("network error after {attempts} attempt(s): {source}")]
    Network {
        /// How many attempts were made before giving up.
        attempts: u32,
        /// The last transport error observed.
        #[source]
        source: reqwest::Error,
    },

    /// Zammad answered with a non-2xx status.
    #[error("Zammad API error {} for {method} {path}: {}", status_code(.status), render_body(.body))]
    Upstream {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The HTTP method of the failed request.
        method: Method,
        /// The API path of the failed request, relative to `/api/v1`.
        path: String,
        /// The response body, parsed as JSON when possible, else raw text.
        body: serde_json::Value,
        /// Delay requested by the server through `Retry-After`, if any.
        retry_after: Option<Duration>,
    },

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A 2xx response body could not be decoded as JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

fn status_code(status: &StatusCode) -> u16 {
    status.as_u16()
}

/// Renders an upstream body: raw text as-is, JSON compactly.
fn render_body(body: &serde_json::Value) -> String {
    match body {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl ZammadError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        ZammadError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ZammadError::Config(message.into())
    }

    /// Creates the configuration error raised when no credentials are set.
    pub fn missing_credentials() -> Self {
        ZammadError::Config(
            "Zammad authentication is not set. Configure ZAMMAD_TOKEN, or ZAMMAD_USERNAME \
             and ZAMMAD_PASSWORD"
                .to_string(),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ZammadError::Validation(message.into())
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        ZammadError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Wraps a transport error from a single attempt.
    pub fn network(source: reqwest::Error) -> Self {
        ZammadError::Network {
            attempts: 1,
            source,
        }
    }

    /// Returns the HTTP status for upstream errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZammadError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error is transient and the request should be retried.
    ///
    /// Retryable errors are:
    /// - HTTP 429, 502, 503 and 504
    /// - connect and read timeouts, including waiting for a pooled connection
    /// - refused, reset or aborted connections
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ZammadError::Upstream { status, .. } => matches!(
                *status,
                StatusCode::TOO_MANY_REQUESTS
                    | StatusCode::BAD_GATEWAY
                    | StatusCode::SERVICE_UNAVAILABLE
                    | StatusCode::GATEWAY_TIMEOUT
            ),
            ZammadError::Network { source, .. } => is_transient_transport(source),
            _ => false,
        }
    }

    /// Returns the server-supplied retry delay, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ZammadError::Upstream { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Records the total number of attempts on a network error.
    #[must_use]
    pub fn with_attempts(self, total: u32) -> Self {
        match self {
            ZammadError::Network { source, .. } => ZammadError::Network {
                attempts: total,
                source,
            },
            other => other,
        }
    }

    /// Replaces every non-empty secret in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secrets: &[&str]) -> String {
        secrets
            .iter()
            .filter(|secret| !secret.is_empty())
            .fold(message.to_string(), |acc, secret| {
                acc.replace(secret, "[REDACTED]")
            })
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secrets: &[&str]) -> String {
        Self::sanitize_message(&self.to_string(), secrets)
    }
}

/// Classifies a reqwest error as a transient transport failure.
fn is_transient_transport(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_connect() {
        return true;
    }

    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::TimedOut
            ) {
                return true;
            }
        }
        source = inner.source();
    }

    false
}
