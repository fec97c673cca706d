//! Request / Response types for this service.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::params::{PageNumber, PageSize};
use crate::services::units::UnitId;
use crate::tags::TagSet;
use crate::vocab::{Board, Status};

crate::macros::make_id! {
	/// A unique identifier for a course.
	CourseId
}

/// A course as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseSummary
{
	/// The course's ID.
	pub id: CourseId,

	/// The course's name.
	pub name: String,

	/// Description of the course.
	pub description: String,

	/// The board this course belongs to.
	pub board: Board,

	/// The mediums this course is taught in.
	pub medium: TagSet,

	/// The grade levels this course targets.
	pub grade: TagSet,

	/// The subjects this course covers.
	pub subject: TagSet,

	/// The course's publication status.
	pub status: Status,

	/// When this course was created.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,

	/// When this course was last modified.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// A unit as it appears inside a course's detail view.
///
/// Units are owned records with their own lifecycle; see
/// [`UnitService`](crate::services::UnitService). This is only the slice of
/// them a course embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseUnit
{
	/// The unit's ID.
	pub id: UnitId,

	/// The unit's title.
	pub title: String,

	/// The unit's content.
	pub content: String,
}

/// A single course with its units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDetail
{
	/// The course itself.
	#[serde(flatten)]
	pub course: CourseSummary,

	/// The course's units, in order.
	pub units: Vec<CourseUnit>,
}

/// Request payload for fetching a page of courses.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FetchCoursesRequest
{
	/// Free-text search over course names and descriptions.
	///
	/// This is a case-insensitive substring match; unlike the tag filters
	/// below it deliberately targets unstructured prose.
	#[serde(default)]
	pub search_text: Option<String>,

	/// Only return courses belonging to one of these boards.
	#[serde(default)]
	pub boards: Vec<Board>,

	/// Only return courses sharing at least one of these mediums.
	#[serde(default)]
	pub mediums: Vec<String>,

	/// Only return courses targeting at least one of these grades.
	#[serde(default)]
	pub grades: Vec<String>,

	/// Only return courses covering at least one of these subjects.
	#[serde(default)]
	pub subjects: Vec<String>,

	/// Which page to return.
	#[serde(default)]
	pub page: PageNumber,

	/// How many courses to return per page.
	#[serde(default)]
	pub size: PageSize,
}

/// A unit to create alongside a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUnit
{
	/// The unit's title.
	pub title: String,

	/// The unit's content.
	#[serde(default)]
	pub content: String,
}

/// Request payload for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest
{
	/// The course's name.
	pub name: String,

	/// Description of the course.
	pub description: String,

	/// The board this course belongs to.
	pub board: Board,

	/// The mediums this course is taught in.
	#[serde(default)]
	pub medium: Vec<String>,

	/// The grade levels this course targets.
	#[serde(default)]
	pub grade: Vec<String>,

	/// The subjects this course covers.
	#[serde(default)]
	pub subject: Vec<String>,

	/// The course's publication status.
	#[serde(default)]
	pub status: Status,

	/// Units to create with the course, in order.
	#[serde(default)]
	pub units: Vec<NewUnit>,
}

/// Request payload for updating an existing course.
///
/// Every scalar field is overwritten, mirroring the course form in the
/// management UI. Units are managed separately.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseRequest
{
	/// The course's new name.
	pub name: String,

	/// The course's new description.
	pub description: String,

	/// The board this course belongs to.
	pub board: Board,

	/// The mediums this course is taught in.
	#[serde(default)]
	pub medium: Vec<String>,

	/// The grade levels this course targets.
	#[serde(default)]
	pub grade: Vec<String>,

	/// The subjects this course covers.
	#[serde(default)]
	pub subject: Vec<String>,

	/// The course's publication status.
	#[serde(default)]
	pub status: Status,
}
