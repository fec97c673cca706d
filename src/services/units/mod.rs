//! A service for managing units of course content.
//!
//! Units live their own lifecycle next to the catalog: they can be created
//! ahead of a course, re-attached to a different course, or left dangling
//! when their course is deleted. Only the `course_id` back-reference ties
//! them to the catalog; there is no ownership in either direction.

use std::fmt;

use sqlx::{MySql, Pool, Transaction};

use crate::cache::{CacheLayer, Namespace};
use crate::services::catalog::CourseId;

mod queries;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{CreateUnitRequest, Unit, UnitId, UpdateUnitRequest};

/// A service for managing units of course content.
#[derive(Clone)]
pub struct UnitService
{
	/// The system of record.
	database: Pool<MySql>,

	/// The cache to invalidate after each mutation.
	cache: CacheLayer,
}

impl fmt::Debug for UnitService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("UnitService").finish_non_exhaustive()
	}
}

impl UnitService
{
	/// Create a new [`UnitService`].
	pub fn new(database: Pool<MySql>, cache: CacheLayer) -> Self
	{
		Self { database, cache }
	}

	/// Fetches a single unit.
	///
	/// This will return `Ok(None)` if the unit was not found, but everything
	/// else went fine.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_unit(&self, unit_id: UnitId) -> Result<Option<Unit>>
	{
		let cache_key = unit_id.to_string();

		if let Some(unit) = self.cache.get(Namespace::Unit, &cache_key).await {
			return Ok(Some(unit));
		}

		let unit = sqlx::query_as::<_, Unit>(&format!("{} WHERE u.id = ?", queries::SELECT))
			.bind(unit_id)
			.fetch_optional(&self.database)
			.await?;

		if let Some(ref unit) = unit {
			self.cache.put(Namespace::Unit, &cache_key, unit).await;
		}

		Ok(unit)
	}

	/// Fetches potentially many units.
	///
	/// With a `course` this returns that course's units in their intended
	/// order; without one it returns every unit, including detached ones.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_units(&self, course: Option<CourseId>) -> Result<Vec<Unit>>
	{
		let units = match course {
			Some(course_id) => {
				sqlx::query_as::<_, Unit>(&format!(
					"{} WHERE u.course_id = ? ORDER BY u.position ASC, u.id ASC",
					queries::SELECT,
				))
				.bind(course_id)
				.fetch_all(&self.database)
				.await?
			}
			None => {
				sqlx::query_as::<_, Unit>(&format!("{} ORDER BY u.id ASC", queries::SELECT))
					.fetch_all(&self.database)
					.await?
			}
		};

		Ok(units)
	}

	/// Creates a new unit.
	///
	/// Attaching the unit to a course appends it to the end of that course;
	/// attaching it to an unknown course is an error.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn create_unit(&self, req: CreateUnitRequest) -> Result<Unit>
	{
		let title = required(&req.title, "title")?;
		let unit_id = UnitId::new();

		let mut txn = self.database.begin().await?;

		let position = match req.course_id {
			Some(course_id) => {
				ensure_course_exists(course_id, &mut txn).await?;
				next_position(course_id, &mut txn).await?
			}
			None => 0,
		};

		sqlx::query(queries::INSERT)
			.bind(unit_id)
			.bind(title)
			.bind(&req.content)
			.bind(req.course_id)
			.bind(position)
			.execute(txn.as_mut())
			.await?;

		txn.commit().await?;

		tracing::info!(target: "course_catalog_api::audit_log", %unit_id, "created unit");

		self.evict_unit_caches().await;

		Ok(Unit {
			id: unit_id,
			title: title.to_owned(),
			content: req.content,
			course_id: req.course_id,
		})
	}

	/// Overwrites an existing unit's fields.
	///
	/// Passing a `course_id` different from the unit's current one moves the
	/// unit to the end of the new course; passing [`None`] keeps the current
	/// attachment.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn update_unit(&self, unit_id: UnitId, req: UpdateUnitRequest) -> Result<Unit>
	{
		let title = required(&req.title, "title")?;

		let mut txn = self.database.begin().await?;

		let Some((current_course, current_position)) =
			sqlx::query_as::<_, (Option<CourseId>, u32)>(
				"SELECT u.course_id, u.position FROM Units u WHERE u.id = ?",
			)
			.bind(unit_id)
			.fetch_optional(txn.as_mut())
			.await?
		else {
			return Err(Error::UnitNotFound);
		};

		let (course_id, position) = match req.course_id {
			Some(course_id) if req.course_id != current_course => {
				ensure_course_exists(course_id, &mut txn).await?;
				(Some(course_id), next_position(course_id, &mut txn).await?)
			}
			_ => (current_course, current_position),
		};

		sqlx::query(queries::UPDATE)
			.bind(title)
			.bind(&req.content)
			.bind(course_id)
			.bind(position)
			.bind(unit_id)
			.execute(txn.as_mut())
			.await?;

		txn.commit().await?;

		tracing::info!(target: "course_catalog_api::audit_log", %unit_id, "updated unit");

		self.evict_unit_caches().await;

		Ok(Unit {
			id: unit_id,
			title: title.to_owned(),
			content: req.content,
			course_id,
		})
	}

	/// Deletes a unit.
	///
	/// Units are hard-deleted; unlike courses they have no soft-delete flag.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn delete_unit(&self, unit_id: UnitId) -> Result<()>
	{
		let deleted = sqlx::query(queries::DELETE)
			.bind(unit_id)
			.execute(&self.database)
			.await?;

		if deleted.rows_affected() == 0 {
			return Err(Error::UnitNotFound);
		}

		tracing::info!(target: "course_catalog_api::audit_log", %unit_id, "deleted unit");

		self.evict_unit_caches().await;

		Ok(())
	}

	/// Evicts every namespace a unit mutation can affect.
	///
	/// Course details embed their units, so the course namespace goes too.
	/// List pages don't, which keeps them out of this.
	async fn evict_unit_caches(&self)
	{
		self.cache.evict(Namespace::Unit).await;
		self.cache.evict(Namespace::Course).await;
	}
}

/// Fails with [`Error::CourseNotFound`] unless `course_id` exists.
async fn ensure_course_exists(
	course_id: CourseId,
	txn: &mut Transaction<'_, MySql>,
) -> Result<()>
{
	let exists = sqlx::query_scalar::<_, i64>(queries::COURSE_EXISTS)
		.bind(course_id)
		.fetch_one(txn.as_mut())
		.await?;

	if exists == 0 {
		return Err(Error::CourseNotFound);
	}

	Ok(())
}

/// The position a unit appended to `course_id` should take.
async fn next_position(course_id: CourseId, txn: &mut Transaction<'_, MySql>) -> Result<u32>
{
	let max = sqlx::query_scalar::<_, Option<u32>>(queries::MAX_POSITION)
		.bind(course_id)
		.fetch_one(txn.as_mut())
		.await?;

	Ok(max.map_or(0, |position| position.saturating_add(1)))
}

/// Trims `value` and rejects blank input.
fn required<'v>(value: &'v str, field: &'static str) -> Result<&'v str>
{
	let value = value.trim();

	if value.is_empty() {
		return Err(Error::EmptyField { field });
	}

	Ok(value)
}
