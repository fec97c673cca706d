//! This module contains the [`Config`] struct - a set of configuration options
//! that will be read from the environment on startup.

use std::num::NonZero;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

use thiserror::Error;
use url::Url;

/// The service's runtime configuration.
#[derive(Debug, Clone)]
pub struct Config
{
	/// Configuration for the system of record.
	pub database: DatabaseConfig,

	/// Configuration for the cache backend.
	pub cache: CacheConfig,
}

/// Configuration for the system of record.
#[derive(Clone)]
pub struct DatabaseConfig
{
	/// Database connection URL.
	pub url: Url,

	/// Upper bound on pool connections.
	///
	/// Defaults to twice the available parallelism when unset.
	pub max_connections: Option<NonZero<u32>>,

	/// How long to wait for a pool connection before giving up.
	pub acquire_timeout: Duration,
}

impl fmt::Debug for DatabaseConfig
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("DatabaseConfig")
			.field("url", &"*****")
			.field("max_connections", &self.max_connections)
			.field("acquire_timeout", &self.acquire_timeout)
			.finish()
	}
}

/// Configuration for the cache backend.
#[derive(Debug, Clone)]
pub struct CacheConfig
{
	/// Cache backend connection URL (e.g. `redis://localhost:6379`).
	///
	/// When unset, an in-process cache is used instead.
	pub url: Option<Url>,

	/// How long cached entries stay valid.
	pub ttl: Duration,

	/// Upper bound on the duration of a single cache backend call.
	///
	/// Calls exceeding this are treated as cache misses; see
	/// [`CacheLayer`](crate::cache::CacheLayer).
	pub op_timeout: Duration,
}

/// The default TTL for cache entries.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// The default upper bound for a single cache backend call.
const DEFAULT_CACHE_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// The default upper bound for acquiring a database connection.
const DEFAULT_DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

impl Config
{
	/// Initializes a [`Config`] by reading and parsing environment variables.
	#[tracing::instrument(err(Debug))]
	pub fn new() -> Result<Self, InitializeConfigError>
	{
		let database_url = parse_from_env::<Url>("DATABASE_URL")?;
		let max_connections = parse_from_env_opt::<NonZero<u32>>("COURSE_API_DB_MAX_CONNECTIONS")?;
		let acquire_timeout = parse_from_env_opt::<u64>("COURSE_API_DB_ACQUIRE_TIMEOUT")?
			.map_or(DEFAULT_DB_ACQUIRE_TIMEOUT, Duration::from_secs);

		let cache_url = parse_from_env_opt::<Url>("COURSE_API_CACHE_URL")?;
		let cache_ttl = parse_from_env_opt::<u64>("COURSE_API_CACHE_TTL")?
			.map_or(DEFAULT_CACHE_TTL, Duration::from_secs);
		let cache_op_timeout = parse_from_env_opt::<u64>("COURSE_API_CACHE_TIMEOUT_MS")?
			.map_or(DEFAULT_CACHE_OP_TIMEOUT, Duration::from_millis);

		Ok(Self {
			database: DatabaseConfig {
				url: database_url,
				max_connections,
				acquire_timeout,
			},
			cache: CacheConfig {
				url: cache_url,
				ttl: cache_ttl,
				op_timeout: cache_op_timeout,
			},
		})
	}
}

/// Error that can occur while initializing the service's [`Config`].
#[derive(Debug, Error)]
pub enum InitializeConfigError
{
	/// A required environment variable was not found or invalid UTF-8.
	#[error("failed to read environment variable `{var}`: {source}")]
	Env
	{
		/// The environment variable we tried to read.
		var: &'static str,

		/// The original error we got from [`std::env::var()`] when we tried
		/// to read a value.
		source: env::VarError,
	},

	/// A required configuration option was empty.
	#[error("`{var}` cannot be empty")]
	EmptyValue
	{
		/// The environment variable we read.
		var: &'static str,
	},

	/// A configuration option could not be parsed into the required type.
	#[error("failed to parse configuration value `{var}`: {source}")]
	Parse
	{
		/// The environment variable containing the value.
		var: &'static str,

		/// The parsing error.
		source: Box<dyn std::error::Error + Send + Sync + 'static>,
	},
}

/// Reads and parses an environment variable.
fn parse_from_env<T>(var: &'static str) -> Result<T, InitializeConfigError>
where
	T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
{
	let value = env::var(var).map_err(|source| InitializeConfigError::Env { var, source })?;

	if value.is_empty() {
		return Err(InitializeConfigError::EmptyValue { var });
	}

	value
		.parse::<T>()
		.map_err(|error| InitializeConfigError::Parse { var, source: Box::new(error) })
}

/// Reads and parses an environment variable.
///
/// Returns [`None`] if the variable does not exist or is empty.
fn parse_from_env_opt<T>(var: &'static str) -> Result<Option<T>, InitializeConfigError>
where
	T: FromStr<Err: std::error::Error + Send + Sync + 'static>,
{
	let Some(value) = env::var(var).ok() else {
		return Ok(None);
	};

	if value.is_empty() {
		return Ok(None);
	}

	value
		.parse::<T>()
		.map(Some)
		.map_err(|error| InitializeConfigError::Parse { var, source: Box::new(error) })
}
