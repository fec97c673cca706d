//! Role-based course visibility.
//!
//! The identity provider hands the boundary layer a caller role per request;
//! the services take it as an explicit parameter. This module maps that role
//! to the set of course statuses the caller may see. There is deliberately no
//! ambient "current user" state anywhere in this crate.

use crate::vocab::Status;

/// The role of the caller making a request.
///
/// Token formats and their validation live in the boundary layer; by the time
/// a request reaches this crate, the role is just data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerRole
{
	/// The caller holds the admin role.
	Admin,

	/// Any other caller, including anonymous ones.
	#[default]
	Other,
}

impl CallerRole
{
	/// Whether this is the admin role.
	pub const fn is_admin(&self) -> bool
	{
		matches!(self, Self::Admin)
	}
}

/// The course statuses visible to `role`.
///
/// Admins see everything; everyone else only sees live courses. Pure and
/// total, so callers can rely on the returned slice being non-empty.
pub const fn allowed_statuses(role: CallerRole) -> &'static [Status]
{
	match role {
		CallerRole::Admin => &[Status::Live, Status::Draft],
		CallerRole::Other => &[Status::Live],
	}
}
