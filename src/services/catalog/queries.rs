//! Shared SQL queries.

/// SQL query for fetching course listings from the database.
///
/// `SQL_CALC_FOUND_ROWS` lets [`TransactionExt::total_rows()`] report the
/// full match count independently of `LIMIT`.
///
/// [`TransactionExt::total_rows()`]: crate::database::TransactionExt::total_rows
pub const SELECT: &str = r"
	SELECT SQL_CALC_FOUND_ROWS
	  c.id,
	  c.name,
	  c.description,
	  c.board,
	  c.medium,
	  c.grade,
	  c.subject,
	  c.status,
	  c.created_at,
	  c.updated_at
	FROM
	  Courses c
";

/// The ordering applied to every course listing.
///
/// `created_at` has second precision, so the ID tie-break keeps page
/// boundaries deterministic across repeated queries.
pub const ORDER_BY: &str = r"
	ORDER BY
	  c.created_at DESC,
	  c.id ASC
";

/// SQL query for fetching a single course that has not been soft-deleted.
pub const SELECT_COURSE: &str = r"
	SELECT
	  c.id,
	  c.name,
	  c.description,
	  c.board,
	  c.medium,
	  c.grade,
	  c.subject,
	  c.status,
	  c.created_at,
	  c.updated_at
	FROM
	  Courses c
	WHERE
	  c.id = ?
	  AND c.deleted = FALSE
";

/// SQL query for fetching a course's units in their intended order.
pub const SELECT_COURSE_UNITS: &str = r"
	SELECT
	  u.id,
	  u.title,
	  u.content
	FROM
	  Units u
	WHERE
	  u.course_id = ?
	ORDER BY
	  u.position ASC,
	  u.id ASC
";

/// SQL query for inserting a new course.
pub const INSERT_COURSE: &str = r"
	INSERT INTO
	  Courses (id, name, description, board, medium, grade, subject, status)
	VALUES
	  (?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL query for inserting a course's units.
///
/// The `VALUES` are appended via [`QueryBuilder::push_values()`].
///
/// [`QueryBuilder::push_values()`]: sqlx::QueryBuilder::push_values
pub const INSERT_UNITS: &str = r"
	INSERT INTO
	  Units (id, title, content, course_id, position)
";

/// SQL query for overwriting a course's mutable fields.
///
/// Guarded by `deleted = FALSE` so soft-deleted courses are
/// indistinguishable from absent ones.
pub const UPDATE_COURSE: &str = r"
	UPDATE
	  Courses
	SET
	  name = ?,
	  description = ?,
	  board = ?,
	  medium = ?,
	  grade = ?,
	  subject = ?,
	  status = ?
	WHERE
	  id = ?
	  AND deleted = FALSE
";

/// SQL query for detaching every unit from a course without deleting the
/// unit rows.
pub const DETACH_UNITS: &str = r"
	UPDATE
	  Units
	SET
	  course_id = NULL
	WHERE
	  course_id = ?
";

/// SQL query for soft-deleting a course.
pub const SOFT_DELETE_COURSE: &str = r"
	UPDATE
	  Courses
	SET
	  deleted = TRUE
	WHERE
	  id = ?
	  AND deleted = FALSE
";
