//! Request / Response types for this service.

use serde::{Deserialize, Serialize};

use crate::services::catalog::CourseId;

crate::macros::make_id! {
	/// A unique identifier for a unit.
	UnitId
}

/// A unit of course content.
///
/// A unit belongs to at most one course; detached units (e.g. after their
/// course was deleted) stick around with no course at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Unit
{
	/// The unit's ID.
	pub id: UnitId,

	/// The unit's title.
	pub title: String,

	/// The unit's content.
	pub content: String,

	/// The course this unit belongs to, if any.
	pub course_id: Option<CourseId>,
}

/// Request payload for creating a new unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnitRequest
{
	/// The unit's title.
	pub title: String,

	/// The unit's content.
	#[serde(default)]
	pub content: String,

	/// The course to attach the unit to.
	#[serde(default)]
	pub course_id: Option<CourseId>,
}

/// Request payload for updating an existing unit.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUnitRequest
{
	/// The unit's new title.
	pub title: String,

	/// The unit's new content.
	#[serde(default)]
	pub content: String,

	/// The course to attach the unit to.
	///
	/// [`None`] leaves the current attachment untouched; re-attaching to a
	/// different course moves the unit to the end of that course.
	#[serde(default)]
	pub course_id: Option<CourseId>,
}
