//! The errors that can occur when interacting with this service.

use thiserror::Error;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the unit service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A request targeted at a specific unit was made, but the unit could not
	/// be found.
	#[error("unit does not exist")]
	UnitNotFound,

	/// A unit was to be attached to a course that does not exist.
	#[error("course does not exist")]
	CourseNotFound,

	/// A required field was missing or blank.
	#[error("`{field}` cannot be empty")]
	EmptyField
	{
		/// The offending field.
		field: &'static str,
	},

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}
