//! The errors that can occur when interacting with this service.

use thiserror::Error;

use crate::tags::UnknownTag;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the catalog services.
#[derive(Debug, Error)]
pub enum Error
{
	/// A request targeted at a specific course was made, but the course could
	/// not be found.
	///
	/// Soft-deleted courses and courses hidden from the caller by the
	/// visibility policy produce this same error, so callers cannot probe for
	/// the existence of drafts.
	#[error("course does not exist")]
	CourseNotFound,

	/// A required field was missing or blank.
	#[error("`{field}` cannot be empty")]
	EmptyField
	{
		/// The offending field.
		field: &'static str,
	},

	/// A tag was outside its attribute's vocabulary.
	#[error(transparent)]
	InvalidTag(#[from] UnknownTag),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}
