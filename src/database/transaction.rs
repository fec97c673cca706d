//! This module contains extensions for [`sqlx::Transaction`].

use std::future::Future;

use sealed::sealed;
use sqlx::{MySql, Transaction};

/// Extension trait for [`sqlx::Transaction`].
#[sealed]
pub trait TransactionExt
{
	/// Returns the **total** amount of rows that _could have been_ fetched by
	/// the previous `SELECT` query, ignoring `LIMIT`.
	///
	/// NOTE: **this only works if the query contained `SQL_CALC_FOUND_ROWS`**
	fn total_rows(&mut self) -> impl Future<Output = sqlx::Result<u64>> + Send;
}

#[sealed]
impl TransactionExt for Transaction<'_, MySql>
{
	#[tracing::instrument(
		level = "trace",
		target = "course_catalog_api::database",
		skip(self),
		err(Debug, level = "debug")
	)]
	async fn total_rows(&mut self) -> sqlx::Result<u64>
	{
		sqlx::query_scalar::<_, i64>("SELECT FOUND_ROWS()")
			.fetch_one(self.as_mut())
			.await
			.map(|total| u64::try_from(total).unwrap_or_default())
	}
}
