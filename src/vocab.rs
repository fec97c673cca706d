//! Closed vocabularies for course attributes.
//!
//! Every tag that can appear in a course's `board`, `medium`, `grade` or
//! `subject` attribute is drawn from one of the vocabularies in this module.
//! Values are canonicalized at the boundary (see [`TagSet::normalize()`]) so
//! that the database only ever stores the spellings listed here.
//!
//! [`TagSet::normalize()`]: crate::tags::TagSet::normalize

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The educational board a course belongs to.
///
/// Unlike the other attributes, `board` is single-valued.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
	sqlx::Type,
)]
pub enum Board
{
	/// A state board.
	State,

	/// The Central Board of Secondary Education.
	#[sqlx(rename = "CBSE")]
	#[serde(rename = "CBSE")]
	Cbse,

	/// The Indian Certificate of Secondary Education.
	#[sqlx(rename = "ICSE")]
	#[serde(rename = "ICSE")]
	Icse,
}

impl Board
{
	/// All known boards.
	pub const ALL: [Self; 3] = [Self::State, Self::Cbse, Self::Icse];

	/// The canonical spelling of this board.
	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::State => "State",
			Self::Cbse => "CBSE",
			Self::Icse => "ICSE",
		}
	}
}

impl Display for Board
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

impl FromStr for Board
{
	type Err = UnknownBoard;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		Self::ALL
			.into_iter()
			.find(|board| board.as_str().eq_ignore_ascii_case(value))
			.ok_or_else(|| UnknownBoard { board: value.to_owned() })
	}
}

/// A board value outside the [`Board`] vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown board `{board}`")]
pub struct UnknownBoard
{
	/// The rejected value.
	pub board: String,
}

/// The publication status of a course.
///
/// Draft courses are only visible to admin callers; see
/// [`allowed_statuses()`].
///
/// [`allowed_statuses()`]: crate::policy::allowed_statuses
#[derive(
	Debug,
	Default,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Serialize,
	Deserialize,
	sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Status
{
	/// The course is being worked on and is not publicly visible.
	Draft,

	/// The course is published.
	#[default]
	Live,
}

impl Status
{
	/// A string format compatible with the database and the API.
	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::Draft => "draft",
			Self::Live => "live",
		}
	}
}

impl Display for Status
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

/// A closed vocabulary for one multi-valued course attribute.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary
{
	/// The attribute this vocabulary belongs to (e.g. `"medium"`).
	name: &'static str,

	/// The canonical spellings of every allowed tag.
	entries: &'static [&'static str],
}

impl Vocabulary
{
	/// The attribute this vocabulary belongs to.
	pub const fn name(&self) -> &'static str
	{
		self.name
	}

	/// The canonical spellings of every allowed tag.
	pub const fn entries(&self) -> &'static [&'static str]
	{
		self.entries
	}

	/// Looks up the canonical spelling for `raw`.
	///
	/// Returns [`None`] if `raw` is not part of this vocabulary. Comparison is
	/// case-insensitive, so `"english"` resolves to `"English"`.
	pub fn canonicalize(&self, raw: &str) -> Option<&'static str>
	{
		self.entries
			.iter()
			.find(|entry| entry.eq_ignore_ascii_case(raw))
			.copied()
	}
}

/// The mediums of instruction a course can be taught in.
pub static MEDIUMS: Vocabulary = Vocabulary {
	name: "medium",
	entries: &["English", "Hindi", "Kannada", "Telugu", "Tamil"],
};

/// The grade levels a course can target.
pub static GRADES: Vocabulary = Vocabulary {
	name: "grade",
	entries: &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"],
};

/// The subjects a course can cover.
pub static SUBJECTS: Vocabulary = Vocabulary {
	name: "subject",
	entries: &[
		"English",
		"Hindi",
		"Kannada",
		"Maths",
		"Science",
		"Social",
		"Physics",
		"Chemistry",
		"Biology",
		"History",
		"Geography",
		"Civics",
		"Computer",
		"Business Studies",
		"Economics",
		"Psychology",
		"Physical Education",
		"Home Science",
		"Agriculture",
		"Tourism",
		"Arts",
		"Music",
		"Artificial Intelligence",
		"Cloud Computing",
		"Data Science",
		"Cyber Security",
		"Digital Marketing",
		"Entrepreneurship",
		"Ethical Hacking",
		"Graphic Design",
		"Human Resource Management",
		"International Business",
		"Java",
		"JavaScript",
		"Machine Learning",
		"Marketing",
		"Microsoft Office",
		"Network Security",
		"Python",
		"Robotics",
		"Software Development",
		"Web Development",
		"AI and Machine Learning",
		"Blockchain",
		"Data Analytics",
	],
};

/// Every filterable vocabulary, for clients that build filter UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions
{
	/// All known boards.
	pub boards: Vec<String>,

	/// All known mediums of instruction.
	pub mediums: Vec<String>,

	/// All known grade levels.
	pub grades: Vec<String>,

	/// All known subjects.
	pub subjects: Vec<String>,
}

impl FilterOptions
{
	/// Collects the current vocabularies.
	pub fn collect() -> Self
	{
		Self {
			boards: Board::ALL.iter().map(|b| b.as_str().to_owned()).collect(),
			mediums: MEDIUMS.entries.iter().map(|&e| e.to_owned()).collect(),
			grades: GRADES.entries.iter().map(|&e| e.to_owned()).collect(),
			subjects: SUBJECTS.entries.iter().map(|&e| e.to_owned()).collect(),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn board_round_trips()
	{
		for board in Board::ALL {
			assert_eq!(board.as_str().parse::<Board>(), Ok(board));
		}

		assert_eq!("cbse".parse::<Board>(), Ok(Board::Cbse));
		assert!("IB".parse::<Board>().is_err());
	}

	#[test]
	fn canonicalize_is_case_insensitive()
	{
		assert_eq!(MEDIUMS.canonicalize("english"), Some("English"));
		assert_eq!(GRADES.canonicalize("10"), Some("10"));
		assert_eq!(SUBJECTS.canonicalize("MATHS"), Some("Maths"));
		assert_eq!(MEDIUMS.canonicalize("Latin"), None);
	}
}
