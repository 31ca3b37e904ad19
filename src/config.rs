//! Configuration management for the Zammad MCP server.
//!
//! Settings are loaded once from environment variables (or assembled with
//! [`ConfigBuilder`]), validated, and then only read. Missing credentials are
//! deliberately not a load error: every operation reports them before it
//! sends anything.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::ZammadError;
use crate::retry::RetryPolicy;

const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
const DEFAULT_PER_PAGE: u32 = 20;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_INITIAL_SECS: f64 = 0.8;
const DEFAULT_BACKOFF_MAX_SECS: f64 = 10.0;
const DEFAULT_RETRY_JITTER: f64 = 0.2;

/// Credentials used to authenticate against Zammad.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Token token=<token>`.
    Token(String),
    /// HTTP Basic authentication.
    Basic {
        /// Login name.
        username: String,
        /// Password. Never logged.
        password: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token([REDACTED])"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Validated, read-only configuration for talking to Zammad.
#[derive(Clone, Debug)]
pub struct Config {
    base_url: String,
    credentials: Option<Credentials>,
    verify_ssl: bool,
    timeout: Duration,
    per_page: u32,
    compact_default: bool,
    retry: RetryPolicy,
    allow_public_articles: bool,
}

impl Config {
    /// Starts a builder for the given instance URL with default settings.
    pub fn builder(base_url: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(base_url)
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ZAMMAD_BASE_URL` (required)
    /// - `ZAMMAD_TOKEN`, or `ZAMMAD_USERNAME` and `ZAMMAD_PASSWORD`
    /// - `ZAMMAD_VERIFY_SSL`, `ZAMMAD_TIMEOUT_SECONDS`, `ZAMMAD_PER_PAGE`,
    ///   `ZAMMAD_COMPACT_DEFAULT`, `ZAMMAD_MAX_RETRIES`,
    ///   `ZAMMAD_BACKOFF_INITIAL_SECONDS`, `ZAMMAD_BACKOFF_MAX_SECONDS`,
    ///   `ZAMMAD_RETRY_JITTER`, `ZAMMAD_ALLOW_PUBLIC_ARTICLES`
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Config` if the base URL is missing or any value
    /// fails to parse or validate.
    pub fn from_env() -> Result<Self, ZammadError> {
        let base_url = get_required_env("ZAMMAD_BASE_URL")?;
        let mut builder = ConfigBuilder::new(base_url);

        if let Some(token) = get_optional_env("ZAMMAD_TOKEN") {
            builder = builder.token(token);
        }
        if let Some(username) = get_optional_env("ZAMMAD_USERNAME") {
            builder = builder.username(username);
        }
        if let Some(password) = get_optional_env("ZAMMAD_PASSWORD") {
            builder = builder.password(password);
        }
        if let Some(verify) = parse_bool_env("ZAMMAD_VERIFY_SSL")? {
            builder = builder.verify_ssl(verify);
        }
        if let Some(secs) = parse_env::<f64>("ZAMMAD_TIMEOUT_SECONDS")? {
            builder = builder.timeout_secs(secs);
        }
        if let Some(per_page) = parse_env::<u32>("ZAMMAD_PER_PAGE")? {
            builder = builder.per_page(per_page);
        }
        if let Some(compact) = parse_bool_env("ZAMMAD_COMPACT_DEFAULT")? {
            builder = builder.compact_default(compact);
        }
        if let Some(retries) = parse_env::<u32>("ZAMMAD_MAX_RETRIES")? {
            builder = builder.max_retries(retries);
        }
        if let Some(secs) = parse_env::<f64>("ZAMMAD_BACKOFF_INITIAL_SECONDS")? {
            builder = builder.backoff_initial_secs(secs);
        }
        if let Some(secs) = parse_env::<f64>("ZAMMAD_BACKOFF_MAX_SECONDS")? {
            builder = builder.backoff_max_secs(secs);
        }
        if let Some(jitter) = parse_env::<f64>("ZAMMAD_RETRY_JITTER")? {
            builder = builder.retry_jitter(jitter);
        }
        if let Some(allow) = parse_bool_env("ZAMMAD_ALLOW_PUBLIC_ARTICLES")? {
            builder = builder.allow_public_articles(allow);
        }

        builder.build()
    }

    /// Instance base URL without trailing slash (e.g. `https://zammad.example.com`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether TLS certificates are verified.
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Per-attempt request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Default page size for list endpoints.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Compact mode applied when a call does not choose one.
    pub fn compact_default(&self) -> bool {
        self.compact_default
    }

    /// Retry and backoff parameters.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Whether articles may be created visible to customers.
    pub fn allow_public_articles(&self) -> bool {
        self.allow_public_articles
    }
}

/// Builder for [`Config`]. All validation happens in [`ConfigBuilder::build`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    base_url: String,
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    verify_ssl: bool,
    timeout_secs: f64,
    per_page: u32,
    compact_default: bool,
    max_retries: u32,
    backoff_initial_secs: f64,
    backoff_max_secs: f64,
    retry_jitter: f64,
    allow_public_articles: bool,
}

impl ConfigBuilder {
    /// Creates a builder with default settings and no credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            username: None,
            password: None,
            verify_ssl: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
            compact_default: true,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_initial_secs: DEFAULT_BACKOFF_INITIAL_SECS,
            backoff_max_secs: DEFAULT_BACKOFF_MAX_SECS,
            retry_jitter: DEFAULT_RETRY_JITTER,
            allow_public_articles: true,
        }
    }

    /// Sets the API token. A token takes precedence over Basic credentials.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the Basic auth username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the Basic auth password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enables or disables TLS certificate verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Sets the per-attempt timeout in seconds.
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the default page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the process-wide compact default.
    pub fn compact_default(mut self, compact: bool) -> Self {
        self.compact_default = compact;
        self
    }

    /// Sets how many retries follow the first attempt.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the first backoff delay in seconds.
    pub fn backoff_initial_secs(mut self, secs: f64) -> Self {
        self.backoff_initial_secs = secs;
        self
    }

    /// Sets the backoff cap in seconds.
    pub fn backoff_max_secs(mut self, secs: f64) -> Self {
        self.backoff_max_secs = secs;
        self
    }

    /// Sets the jitter fraction (0.2 = +/-20%).
    pub fn retry_jitter(mut self, jitter: f64) -> Self {
        self.retry_jitter = jitter;
        self
    }

    /// Allows or forbids articles visible to customers.
    pub fn allow_public_articles(mut self, allow: bool) -> Self {
        self.allow_public_articles = allow;
        self
    }

    /// Validates the settings and produces an immutable [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Config` describing the first invalid setting.
    pub fn build(self) -> Result<Config, ZammadError> {
        let base_url = validate_base_url(&self.base_url)?;

        let timeout = non_negative_secs("ZAMMAD_TIMEOUT_SECONDS", self.timeout_secs)?;
        if timeout.is_zero() {
            return Err(ZammadError::invalid_config(
                "ZAMMAD_TIMEOUT_SECONDS must be greater than 0",
            ));
        }
        if self.per_page == 0 {
            return Err(ZammadError::invalid_config(
                "ZAMMAD_PER_PAGE must be greater than 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.retry_jitter) {
            return Err(ZammadError::invalid_config(
                "ZAMMAD_RETRY_JITTER must be between 0 and 1",
            ));
        }
        let backoff_initial = non_negative_secs(
            "ZAMMAD_BACKOFF_INITIAL_SECONDS",
            self.backoff_initial_secs,
        )?;
        let backoff_max = non_negative_secs("ZAMMAD_BACKOFF_MAX_SECONDS", self.backoff_max_secs)?;
        if backoff_initial > backoff_max {
            return Err(ZammadError::invalid_config(
                "ZAMMAD_BACKOFF_INITIAL_SECONDS must not exceed ZAMMAD_BACKOFF_MAX_SECONDS",
            ));
        }

        let credentials = resolve_credentials(self.token, self.username, self.password)?;

        Ok(Config {
            base_url,
            credentials,
            verify_ssl: self.verify_ssl,
            timeout,
            per_page: self.per_page,
            compact_default: self.compact_default,
            retry: RetryPolicy {
                max_retries: self.max_retries,
                backoff_initial,
                backoff_max,
                jitter: self.retry_jitter,
            },
            allow_public_articles: self.allow_public_articles,
        })
    }
}

/// Gets a required environment variable, returning an error if missing or empty.
fn get_required_env(name: &str) -> Result<String, ZammadError> {
    get_optional_env(name).ok_or_else(|| ZammadError::missing_env(name))
}

fn get_optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>, ZammadError> {
    get_optional_env(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                ZammadError::invalid_config(format!("{} has an invalid value: {:?}", name, raw))
            })
        })
        .transpose()
}

fn parse_bool_env(name: &str) -> Result<Option<bool>, ZammadError> {
    get_optional_env(name)
        .map(|raw| {
            parse_bool(&raw).ok_or_else(|| {
                ZammadError::invalid_config(format!(
                    "{} must be a boolean (true/false), got: {:?}",
                    name, raw
                ))
            })
        })
        .transpose()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_negative_secs(name: &str, secs: f64) -> Result<Duration, ZammadError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(ZammadError::invalid_config(format!(
            "{} must be a non-negative number of seconds",
            name
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| {
        ZammadError::invalid_config(format!("{} is too large: {}", name, secs))
    })
}

/// Validates and normalizes the base URL.
fn validate_base_url(raw: &str) -> Result<String, ZammadError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .map_err(|e| ZammadError::invalid_config(format!("ZAMMAD_BASE_URL is invalid: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ZammadError::invalid_config(
            "ZAMMAD_BASE_URL must start with http:// or https://",
        ));
    }

    Ok(trimmed.to_string())
}

/// Picks the authentication scheme: a token wins over username/password.
fn resolve_credentials(
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<Credentials>, ZammadError> {
    let token = token.filter(|t| !t.trim().is_empty());
    if let Some(token) = token {
        validate_token(&token)?;
        return Ok(Some(Credentials::Token(token)));
    }

    match (
        username.filter(|u| !u.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) {
        (Some(username), Some(password)) => Ok(Some(Credentials::Basic { username, password })),
        _ => Ok(None),
    }
}

/// Rejects tokens copied verbatim from documentation.
fn validate_token(token: &str) -> Result<(), ZammadError> {
    let token_lower = token.to_lowercase();
    let placeholder_patterns = ["your_token", "your-token", "placeholder", "changeme", "xxx"];

    if placeholder_patterns
        .iter()
        .any(|pattern| token_lower.contains(pattern))
    {
        return Err(ZammadError::invalid_config(
            "ZAMMAD_TOKEN appears to be a placeholder value",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests go through the builder; from_env reads process-wide state.

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = validate_base_url("https://zammad.example.com/").unwrap();
        assert_eq!(result, "https://zammad.example.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        assert!(validate_base_url("zammad.example.com").is_err());
        assert!(validate_base_url("ftp://zammad.example.com").is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder("https://zammad.example.com")
            .token("abc123")
            .build()
            .unwrap();
        assert_eq!(config.per_page(), 20);
        assert!(config.compact_default());
        assert!(config.verify_ssl());
        assert!(config.allow_public_articles());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_policy().max_retries, 3);
        assert_eq!(config.retry_policy().backoff_initial, Duration::from_millis(800));
        assert_eq!(config.retry_policy().backoff_max, Duration::from_secs(10));
    }

    #[test]
    fn test_token_wins_over_basic() {
        let config = Config::builder("https://zammad.example.com")
            .token("abc123")
            .username("agent")
            .password("secret")
            .build()
            .unwrap();
        assert_eq!(
            config.credentials(),
            Some(&Credentials::Token("abc123".to_string()))
        );
    }

    #[test]
    fn test_basic_requires_both_parts() {
        let config = Config::builder("https://zammad.example.com")
            .username("agent")
            .build()
            .unwrap();
        assert!(config.credentials().is_none());

        let config = Config::builder("https://zammad.example.com")
            .username("agent")
            .password("secret")
            .build()
            .unwrap();
        assert!(matches!(
            config.credentials(),
            Some(Credentials::Basic { .. })
        ));
    }

    #[test]
    fn test_missing_credentials_is_not_a_build_error() {
        let config = Config::builder("https://zammad.example.com").build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_rejects_placeholder_token() {
        let result = Config::builder("https://zammad.example.com")
            .token("your_token_here")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        let base = || Config::builder("https://zammad.example.com");
        assert!(base().per_page(0).build().is_err());
        assert!(base().timeout_secs(0.0).build().is_err());
        assert!(base().timeout_secs(1e-12).build().is_err());
        assert!(base().timeout_secs(1e20).build().is_err());
        assert!(base().backoff_max_secs(1e300).build().is_err());
        assert!(base().retry_jitter(1.5).build().is_err());
        assert!(base().backoff_initial_secs(-1.0).build().is_err());
        assert!(base()
            .backoff_initial_secs(20.0)
            .backoff_max_secs(10.0)
            .build()
            .is_err());
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let basic = Credentials::Basic {
            username: "agent".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", basic);
        assert!(rendered.contains("agent"));
        assert!(!rendered.contains("hunter2"));

        let token = format!("{:?}", Credentials::Token("abc123".to_string()));
        assert!(!token.contains("abc123"));
    }
}
