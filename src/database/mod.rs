//! This module contains general database utilities.
//!
//! Most notably, it exports extension traits like [`SqlErrorExt`] and
//! [`TransactionExt`] which add extra methods to [`sqlx`] types.

use std::num::NonZero;
use std::thread;

use sqlx::pool::PoolOptions;
use sqlx::{MySql, Pool};

use crate::runtime::config::DatabaseConfig;

mod error;
pub use error::SqlErrorExt;

mod transaction;
pub use transaction::TransactionExt;

/// Creates a database connection pool and runs migrations.
///
/// Acquiring a connection is bounded by the configured timeout so a saturated
/// or unreachable store cannot stall requests indefinitely.
pub async fn create_pool(config: &DatabaseConfig) -> sqlx::Result<Pool<MySql>>
{
	let max_connections = config
		.max_connections
		.map_or_else(default_max_connections, NonZero::get);

	let pool = PoolOptions::new()
		.max_connections(max_connections)
		.acquire_timeout(config.acquire_timeout)
		.connect(config.url.as_str())
		.await?;

	sqlx::migrate!("./database/migrations").run(&pool).await?;

	Ok(pool)
}

/// The default upper bound on pool connections, derived from the amount of
/// cores available to us.
fn default_max_connections() -> u32
{
	thread::available_parallelism()
		.map_or(4, NonZero::get)
		.saturating_mul(2)
		.try_into()
		.unwrap_or(u32::MAX)
}
