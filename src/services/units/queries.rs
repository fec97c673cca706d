//! Shared SQL queries.

/// SQL query for fetching units from the database.
pub const SELECT: &str = r"
	SELECT
	  u.id,
	  u.title,
	  u.content,
	  u.course_id
	FROM
	  Units u
";

/// SQL query for inserting a new unit.
pub const INSERT: &str = r"
	INSERT INTO
	  Units (id, title, content, course_id, position)
	VALUES
	  (?, ?, ?, ?, ?)
";

/// SQL query for overwriting a unit's fields.
pub const UPDATE: &str = r"
	UPDATE
	  Units
	SET
	  title = ?,
	  content = ?,
	  course_id = ?,
	  position = ?
	WHERE
	  id = ?
";

/// SQL query for the highest position currently taken within a course.
pub const MAX_POSITION: &str = r"
	SELECT
	  MAX(u.position)
	FROM
	  Units u
	WHERE
	  u.course_id = ?
";

/// SQL query for checking that a course row exists.
pub const COURSE_EXISTS: &str = r"
	SELECT
	  COUNT(*)
	FROM
	  Courses c
	WHERE
	  c.id = ?
";

/// SQL query for deleting a unit.
pub const DELETE: &str = r"
	DELETE FROM
	  Units
	WHERE
	  id = ?
";
