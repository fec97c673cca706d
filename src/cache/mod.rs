//! A key-value cache in front of the system of record.
//!
//! Values are grouped into [`Namespace`]s with two key families: per-entity
//! keys (a single course or unit) and per-query-signature keys (one list
//! result page). Mutations evict whole namespaces at once rather than
//! individual keys; the backend does this without enumerating keys.
//!
//! ## Fail-open
//!
//! The cache is an optimization, never a dependency. Every backend failure -
//! connection errors, timeouts, undecodable payloads - is absorbed here:
//! reads degrade to misses, writes and evictions to no-ops. Callers cannot
//! observe cache unavailability through anything but latency, and that
//! latency is bounded by the configured per-operation timeout.
//!
//! Consistency is eventual: a value may be stale for up to its TTL plus the
//! gap between a mutation's commit and its eviction.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::runtime::config::CacheConfig;

mod backend;
use backend::CacheBackend;

/// The default TTL for cache entries.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// The default upper bound for a single backend call.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// A logical group of cache entries that is always evicted as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace
{
	/// Single-course entries, keyed by course ID.
	Course,

	/// List-query result pages, keyed by predicate signature + page + size.
	CourseList,

	/// Single-unit entries, keyed by unit ID.
	Unit,
}

impl Namespace
{
	/// The key prefix for this namespace.
	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::Course => "course",
			Self::CourseList => "course-list",
			Self::Unit => "unit",
		}
	}
}

impl fmt::Display for Namespace
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

/// The cache in front of the system of record.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct CacheLayer
{
	/// The backend holding the cached bytes.
	backend: Arc<CacheBackend>,

	/// How long entries stay valid.
	ttl: Duration,

	/// Upper bound for a single backend call.
	op_timeout: Duration,
}

impl fmt::Debug for CacheLayer
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("CacheLayer")
			.field("ttl", &self.ttl)
			.field("op_timeout", &self.op_timeout)
			.finish_non_exhaustive()
	}
}

impl CacheLayer
{
	/// Creates a new [`CacheLayer`] from `config`.
	///
	/// With a backend URL this connects lazily to redis; pool construction
	/// only fails on invalid configuration, not on an unreachable backend.
	/// Without one the cache lives in process memory.
	pub fn new(config: &CacheConfig) -> Result<Self, SetupError>
	{
		let backend = match config.url.as_ref() {
			Some(url) => {
				let pool = deadpool_redis::Config::from_url(url.as_str())
					.create_pool(Some(deadpool_redis::Runtime::Tokio1))?;

				CacheBackend::redis(pool)
			}
			None => CacheBackend::memory(),
		};

		Ok(Self {
			backend: Arc::new(backend),
			ttl: config.ttl,
			op_timeout: config.op_timeout,
		})
	}

	/// Creates an in-process [`CacheLayer`] with default TTL and timeout.
	pub fn in_memory() -> Self
	{
		Self {
			backend: Arc::new(CacheBackend::memory()),
			ttl: DEFAULT_TTL,
			op_timeout: DEFAULT_OP_TIMEOUT,
		}
	}

	/// Fetches the value stored under `key` in `namespace`.
	///
	/// Backend failures and undecodable payloads are logged and reported as
	/// misses.
	pub async fn get<T>(&self, namespace: Namespace, key: &str) -> Option<T>
	where
		T: DeserializeOwned,
	{
		let data = match self.run(self.backend.get(namespace.as_str(), key)).await {
			Ok(data) => data?,
			Err(error) => {
				tracing::warn!(%namespace, key, %error, "cache read failed; treating as miss");
				return None;
			}
		};

		match serde_json::from_slice(&data) {
			Ok(value) => Some(value),
			Err(error) => {
				tracing::warn!(%namespace, key, %error, "cached payload is invalid; ignoring");
				None
			}
		}
	}

	/// Stores `value` under `key` in `namespace` with the default TTL.
	///
	/// Backend failures are logged and ignored.
	pub async fn put<T>(&self, namespace: Namespace, key: &str, value: &T)
	where
		T: Serialize,
	{
		let data = match serde_json::to_vec(value) {
			Ok(data) => data,
			Err(error) => {
				tracing::warn!(%namespace, key, %error, "failed to serialize cache value");
				return;
			}
		};

		if let Err(error) = self
			.run(self.backend.set(namespace.as_str(), key, data, self.ttl))
			.await
		{
			tracing::warn!(%namespace, key, %error, "cache write failed; skipping");
		}
	}

	/// Drops every entry in `namespace`.
	///
	/// Backend failures are logged and ignored; stale entries then age out
	/// via their TTL.
	pub async fn evict(&self, namespace: Namespace)
	{
		if let Err(error) = self.run(self.backend.evict(namespace.as_str())).await {
			tracing::warn!(%namespace, %error, "cache eviction failed; relying on TTL");
		} else {
			tracing::debug!(%namespace, "evicted cache namespace");
		}
	}

	/// Runs `operation` against the backend, bounded by the configured
	/// timeout.
	async fn run<T>(
		&self,
		operation: impl std::future::Future<Output = Result<T, backend::BackendError>>,
	) -> Result<T, OpError>
	{
		tokio::time::timeout(self.op_timeout, operation)
			.await
			.map_err(|_| OpError::TimedOut)?
			.map_err(OpError::Backend)
	}
}

/// Error that can occur while initializing a [`CacheLayer`].
#[derive(Debug, Error)]
#[error("failed to initialize cache backend: {0}")]
pub struct SetupError(#[from] deadpool_redis::CreatePoolError);

/// The (internal) ways a single cache operation can fail.
///
/// Never escapes this module; both variants resolve to a miss or a no-op.
#[derive(Debug, Error)]
enum OpError
{
	/// The backend call exceeded the configured timeout.
	#[error("operation timed out")]
	TimedOut,

	/// The backend call itself failed.
	#[error(transparent)]
	Backend(#[from] backend::BackendError),
}

#[cfg(test)]
mod tests
{
	use url::Url;

	use super::*;

	fn memory_with(ttl: Duration) -> CacheLayer
	{
		CacheLayer::new(&CacheConfig {
			url: None,
			ttl,
			op_timeout: DEFAULT_OP_TIMEOUT,
		})
		.expect("memory cache setup cannot fail")
	}

	fn unreachable_redis() -> CacheLayer
	{
		let url = Url::parse("redis://127.0.0.1:9/").unwrap();

		CacheLayer::new(&CacheConfig {
			url: Some(url),
			ttl: DEFAULT_TTL,
			op_timeout: Duration::from_millis(50),
		})
		.expect("pool construction does not connect")
	}

	#[tokio::test]
	async fn roundtrip()
	{
		let cache = CacheLayer::in_memory();

		cache.put(Namespace::Course, "some-id", &String::from("algebra")).await;

		assert_eq!(
			cache.get::<String>(Namespace::Course, "some-id").await.as_deref(),
			Some("algebra"),
		);
		assert_eq!(cache.get::<String>(Namespace::Course, "other-id").await, None);
	}

	#[tokio::test]
	async fn eviction_only_hits_its_namespace()
	{
		let cache = CacheLayer::in_memory();

		cache.put(Namespace::Course, "id", &1_u64).await;
		cache.put(Namespace::CourseList, "sig", &2_u64).await;

		cache.evict(Namespace::CourseList).await;

		assert_eq!(cache.get::<u64>(Namespace::Course, "id").await, Some(1));
		assert_eq!(cache.get::<u64>(Namespace::CourseList, "sig").await, None);
	}

	#[tokio::test]
	async fn entries_expire()
	{
		let cache = memory_with(Duration::from_millis(5));

		cache.put(Namespace::Course, "id", &1_u64).await;
		tokio::time::sleep(Duration::from_millis(10)).await;

		assert_eq!(cache.get::<u64>(Namespace::Course, "id").await, None);
	}

	#[tokio::test]
	async fn unreachable_backend_fails_open()
	{
		let cache = unreachable_redis();

		// none of these may error or panic; reads degrade to misses
		cache.put(Namespace::Course, "id", &1_u64).await;
		cache.evict(Namespace::Course).await;

		assert_eq!(cache.get::<u64>(Namespace::Course, "id").await, None);
	}
}
