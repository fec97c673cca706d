//! Cache backends.
//!
//! [`CacheBackend`] speaks to whatever actually holds the cached bytes: a
//! shared redis instance in deployments, or an in-process map for single-node
//! setups and tests. Errors are reported to the caller; the fail-open policy
//! lives one level up in [`CacheLayer`].
//!
//! Namespace eviction never enumerates keys. The redis backend prefixes every
//! key with a per-namespace generation counter and eviction bumps the
//! counter, orphaning the previous generation until its TTLs expire. The
//! memory backend simply drops all entries sharing the namespace prefix.
//!
//! [`CacheLayer`]: super::CacheLayer

use std::time::{Duration, Instant};

use dashmap::DashMap;
use redis::AsyncCommands;
use thiserror::Error;

/// A cached entry in the in-process backend.
#[derive(Debug, Clone)]
pub(crate) struct CachedEntry
{
	/// The serialized value.
	data: Vec<u8>,

	/// When this entry was stored.
	stored_at: Instant,

	/// How long this entry stays valid.
	ttl: Duration,
}

impl CachedEntry
{
	/// Creates a new [`CachedEntry`].
	fn new(data: Vec<u8>, ttl: Duration) -> Self
	{
		Self { data, stored_at: Instant::now(), ttl }
	}

	/// Whether this entry has outlived its TTL.
	fn is_expired(&self) -> bool
	{
		self.stored_at.elapsed() >= self.ttl
	}
}

/// Transport for cached bytes.
pub(crate) enum CacheBackend
{
	/// In-process map; used when no cache backend URL is configured, and in
	/// tests.
	Memory(DashMap<String, CachedEntry>),

	/// A shared redis instance.
	Redis(deadpool_redis::Pool),
}

impl CacheBackend
{
	/// Creates an in-process backend.
	pub(crate) fn memory() -> Self
	{
		Self::Memory(DashMap::new())
	}

	/// Creates a redis backend on top of `pool`.
	///
	/// Connections are established lazily; an unreachable backend surfaces as
	/// errors on individual operations, not here.
	pub(crate) fn redis(pool: deadpool_redis::Pool) -> Self
	{
		Self::Redis(pool)
	}

	/// Fetches the value stored under `key` in `namespace`.
	pub(crate) async fn get(
		&self,
		namespace: &str,
		key: &str,
	) -> Result<Option<Vec<u8>>, BackendError>
	{
		match self {
			Self::Memory(map) => {
				let full_key = format!("{namespace}:{key}");

				if let Some(entry) = map.get(&full_key) {
					if !entry.is_expired() {
						return Ok(Some(entry.data.clone()));
					}

					drop(entry);
					map.remove(&full_key);
				}

				Ok(None)
			}
			Self::Redis(pool) => {
				let mut conn = pool.get().await?;
				let full_key = namespaced_key(&mut conn, namespace, key).await?;
				let data = conn.get::<_, Option<Vec<u8>>>(full_key).await?;

				Ok(data)
			}
		}
	}

	/// Stores `data` under `key` in `namespace` for `ttl`.
	pub(crate) async fn set(
		&self,
		namespace: &str,
		key: &str,
		data: Vec<u8>,
		ttl: Duration,
	) -> Result<(), BackendError>
	{
		match self {
			Self::Memory(map) => {
				map.insert(format!("{namespace}:{key}"), CachedEntry::new(data, ttl));

				Ok(())
			}
			Self::Redis(pool) => {
				let mut conn = pool.get().await?;
				let full_key = namespaced_key(&mut conn, namespace, key).await?;

				conn.set_ex::<_, _, ()>(full_key, data, ttl.as_secs().max(1))
					.await?;

				Ok(())
			}
		}
	}

	/// Drops every entry in `namespace`.
	pub(crate) async fn evict(&self, namespace: &str) -> Result<(), BackendError>
	{
		match self {
			Self::Memory(map) => {
				let prefix = format!("{namespace}:");

				map.retain(|key, _| !key.starts_with(&prefix));

				Ok(())
			}
			Self::Redis(pool) => {
				let mut conn = pool.get().await?;

				conn.incr::<_, _, i64>(generation_key(namespace), 1).await?;

				Ok(())
			}
		}
	}
}

/// The key holding `namespace`'s current generation counter.
fn generation_key(namespace: &str) -> String
{
	format!("{namespace}:gen")
}

/// Resolves the full redis key for `key` within `namespace`'s current
/// generation.
async fn namespaced_key(
	conn: &mut deadpool_redis::Connection,
	namespace: &str,
	key: &str,
) -> Result<String, BackendError>
{
	let generation = conn
		.get::<_, Option<u64>>(generation_key(namespace))
		.await?
		.unwrap_or_default();

	Ok(format!("{namespace}:{generation}:{key}"))
}

/// The errors that can occur when talking to a cache backend.
///
/// These never leave the cache layer; see
/// [`CacheLayer`](super::CacheLayer).
#[derive(Debug, Error)]
pub(crate) enum BackendError
{
	/// We could not get a connection out of the pool.
	#[error("failed to acquire cache connection: {0}")]
	Pool(#[from] deadpool_redis::PoolError),

	/// A redis command failed.
	#[error(transparent)]
	Redis(#[from] redis::RedisError),
}
