//! Dynamic predicate construction for course listings.
//!
//! A [`Predicate`] is the conjunction of everything a listing query filters
//! on: the non-negotiable `deleted = FALSE`, the caller's allowed statuses,
//! and whichever filter dimensions the request supplied. Dimensions are ANDed
//! together; within one dimension, matching any one requested tag suffices.
//!
//! Tag dimensions compare parsed sets via `JSON_OVERLAPS`, never the
//! serialized column text. Matching `LIKE '%1%'` against a stored `["11"]`
//! would be a correctness bug, not a looser match.

use std::fmt::Write;
use std::mem;

use sqlx::{MySql, QueryBuilder};

use super::models::FetchCoursesRequest;
use super::Result;
use crate::tags::TagSet;
use crate::vocab::{Board, Status, GRADES, MEDIUMS, SUBJECTS};

/// The filter applied to a course listing query.
#[derive(Debug)]
pub(super) struct Predicate
{
	/// The statuses the caller is allowed to see.
	statuses: &'static [Status],

	/// Free-text search over names and descriptions.
	search: Option<String>,

	/// Boards to match exactly, sorted and deduplicated.
	boards: Vec<Board>,

	/// Mediums to intersect with.
	mediums: TagSet,

	/// Grades to intersect with.
	grades: TagSet,

	/// Subjects to intersect with.
	subjects: TagSet,
}

impl Predicate
{
	/// Builds the predicate for `request` as seen by a caller limited to
	/// `statuses`.
	///
	/// Filter tags are validated against their vocabularies; an unknown tag
	/// is a validation error, not an empty result.
	pub(super) fn build(request: &FetchCoursesRequest, statuses: &'static [Status])
	-> Result<Self>
	{
		let search = request
			.search_text
			.as_deref()
			.map(str::trim)
			.filter(|text| !text.is_empty())
			.map(str::to_lowercase);

		let mut boards = request.boards.clone();
		boards.sort_unstable();
		boards.dedup();

		Ok(Self {
			statuses,
			search,
			boards,
			mediums: TagSet::normalize(&request.mediums, &MEDIUMS)?,
			grades: TagSet::normalize(&request.grades, &GRADES)?,
			subjects: TagSet::normalize(&request.subjects, &SUBJECTS)?,
		})
	}

	/// Appends this predicate's `WHERE` clause to `query`.
	pub(super) fn push_where(&self, query: &mut QueryBuilder<'_, MySql>)
	{
		let mut clause = Clause::default();

		query.push(clause.next()).push("c.deleted = FALSE");

		query.push(clause.next()).push("c.status IN");
		push_tuple(self.statuses.iter().copied(), query);

		if let Some(search) = self.search.as_deref() {
			let pattern = format!("%{search}%");

			query
				.push(clause.next())
				.push("(LOWER(c.name) LIKE ")
				.push_bind(pattern.clone())
				.push(" OR LOWER(c.description) LIKE ")
				.push_bind(pattern)
				.push(")");
		}

		if !self.boards.is_empty() {
			query.push(clause.next()).push("c.board IN");
			push_tuple(self.boards.iter().copied(), query);
		}

		for (column, tags) in self.tag_dimensions() {
			if tags.is_empty() {
				continue;
			}

			query
				.push(clause.next())
				.push("JSON_OVERLAPS(c.")
				.push(column)
				.push(", CAST(")
				.push_bind(tags.clone())
				.push(" AS JSON))");
		}
	}

	/// A canonical fingerprint of this predicate, for cache keys.
	///
	/// Requests that differ only in tag order or casing produce the same
	/// fingerprint and therefore share a cache entry.
	pub(super) fn signature(&self) -> String
	{
		let mut signature = String::from("v=");

		for status in self.statuses {
			write!(signature, "{status},").expect("writing to a String cannot fail");
		}

		if let Some(search) = self.search.as_deref() {
			write!(signature, "|q={search}").expect("writing to a String cannot fail");
		}

		if !self.boards.is_empty() {
			signature.push_str("|b=");

			for board in &self.boards {
				write!(signature, "{board},").expect("writing to a String cannot fail");
			}
		}

		for (column, tags) in self.tag_dimensions() {
			if !tags.is_empty() {
				write!(signature, "|{column}={}", tags.key())
					.expect("writing to a String cannot fail");
			}
		}

		signature
	}

	/// The tag-valued filter dimensions, paired with their column names.
	fn tag_dimensions(&self) -> [(&'static str, &TagSet); 3]
	{
		[
			("medium", &self.mediums),
			("grade", &self.grades),
			("subject", &self.subjects),
		]
	}
}

/// Tracks whether the next condition needs `WHERE` or `AND`.
#[derive(Debug, Default, Clone, Copy)]
enum Clause
{
	/// No condition has been pushed yet.
	#[default]
	Where,

	/// At least one condition has been pushed.
	And,
}

impl Clause
{
	/// Returns the keyword for the next condition and switches to [`And`].
	///
	/// [`And`]: Clause::And
	fn next(&mut self) -> &'static str
	{
		match mem::replace(self, Self::And) {
			Self::Where => " WHERE ",
			Self::And => " AND ",
		}
	}
}

/// Pushes a parenthesized, bound tuple of `items` into `query`.
fn push_tuple<'args, I>(items: I, query: &mut QueryBuilder<'args, MySql>)
where
	I: IntoIterator,
	I::Item: sqlx::Encode<'args, MySql> + sqlx::Type<MySql> + Send + 'args,
{
	query.push(" (");

	let mut separated = query.separated(", ");

	for item in items {
		separated.push_bind(item);
	}

	separated.push_unseparated(")");
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::policy::{allowed_statuses, CallerRole};

	fn request() -> FetchCoursesRequest
	{
		FetchCoursesRequest {
			search_text: Some(String::from("Algebra")),
			boards: vec![Board::Cbse],
			mediums: vec![String::from("English")],
			grades: vec![String::from("10"), String::from("9")],
			..Default::default()
		}
	}

	#[test]
	fn sql_only_contains_supplied_dimensions()
	{
		let predicate =
			Predicate::build(&request(), allowed_statuses(CallerRole::Other)).unwrap();

		let mut query = QueryBuilder::new("SELECT 1 FROM Courses c");
		predicate.push_where(&mut query);
		let sql = query.sql();

		assert!(sql.contains("c.deleted = FALSE"));
		assert!(sql.contains("c.status IN"));
		assert!(sql.contains("LOWER(c.name) LIKE"));
		assert!(sql.contains("c.board IN"));
		assert!(sql.contains("JSON_OVERLAPS(c.medium"));
		assert!(sql.contains("JSON_OVERLAPS(c.grade"));
		assert!(!sql.contains("JSON_OVERLAPS(c.subject"));
	}

	#[test]
	fn empty_request_still_filters_visibility()
	{
		let predicate = Predicate::build(
			&FetchCoursesRequest::default(),
			allowed_statuses(CallerRole::Other),
		)
		.unwrap();

		let mut query = QueryBuilder::new("SELECT 1 FROM Courses c");
		predicate.push_where(&mut query);
		let sql = query.sql();

		assert!(sql.contains("c.deleted = FALSE"));
		assert!(sql.contains("c.status IN"));
		assert!(!sql.contains("JSON_OVERLAPS"));
		assert!(!sql.contains("LIKE"));
	}

	#[test]
	fn signature_normalizes_tag_order_and_case()
	{
		let statuses = allowed_statuses(CallerRole::Other);

		let shuffled = FetchCoursesRequest {
			grades: vec![String::from("9"), String::from("10")],
			mediums: vec![String::from("ENGLISH")],
			..request()
		};

		let a = Predicate::build(&request(), statuses).unwrap().signature();
		let b = Predicate::build(&shuffled, statuses).unwrap().signature();

		assert_eq!(a, b);
	}

	#[test]
	fn signature_differs_between_roles()
	{
		let req = FetchCoursesRequest::default();

		let admin = Predicate::build(&req, allowed_statuses(CallerRole::Admin))
			.unwrap()
			.signature();
		let other = Predicate::build(&req, allowed_statuses(CallerRole::Other))
			.unwrap()
			.signature();

		assert_ne!(admin, other);
	}

	#[test]
	fn unknown_filter_tags_are_rejected()
	{
		let req = FetchCoursesRequest {
			grades: vec![String::from("13")],
			..Default::default()
		};

		assert!(Predicate::build(&req, allowed_statuses(CallerRole::Other)).is_err());
	}
}
