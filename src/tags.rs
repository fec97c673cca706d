//! Multi-valued course attributes as sets of discrete tags.
//!
//! `medium`, `grade` and `subject` are list-valued attributes persisted as
//! JSON arrays in text-compatible columns. This module owns the parsing and
//! comparison rules for those lists: tags are compared as whole values,
//! case-insensitively, never by substring. A course tagged `grade = ["11"]`
//! does not match a filter for `"1"`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::Vocabulary;

/// A set of discrete tags for one multi-valued course attribute.
///
/// Tags are deduplicated and compared case-insensitively, while the canonical
/// vocabulary spelling is preserved for display and storage. Iteration order
/// is deterministic (sorted by the case-folded tag).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSet
{
	/// Case-folded tag -> canonical spelling.
	tags: BTreeMap<String, String>,
}

impl TagSet
{
	/// Normalizes a raw tag list against `vocabulary`.
	///
	/// Blank entries are dropped, duplicates collapse into one tag, and every
	/// remaining entry must resolve to a vocabulary spelling (case-insensitive
	/// lookup). The first tag outside the vocabulary fails the whole list.
	pub fn normalize<I>(raw: I, vocabulary: &Vocabulary) -> Result<Self, UnknownTag>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut tags = BTreeMap::new();

		for tag in raw {
			let tag = tag.as_ref().trim();

			if tag.is_empty() {
				continue;
			}

			let canonical =
				vocabulary
					.canonicalize(tag)
					.ok_or_else(|| UnknownTag {
						vocabulary: vocabulary.name(),
						tag: tag.to_owned(),
					})?;

			tags.insert(canonical.to_lowercase(), canonical.to_owned());
		}

		Ok(Self { tags })
	}

	/// Reconstructs a set from canonical tags, e.g. values read back from a
	/// column this crate wrote.
	pub fn from_canonical<I>(tags: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		Self {
			tags: tags
				.into_iter()
				.map(Into::into)
				.map(|tag| (tag.to_lowercase(), tag))
				.collect(),
		}
	}

	/// Whether `self` and `other` share at least one tag.
	///
	/// This is exact set intersection over whole tags. Substring containment
	/// is deliberately not considered a match.
	pub fn intersects(&self, other: &Self) -> bool
	{
		let (probe, base) = if self.len() <= other.len() {
			(self, other)
		} else {
			(other, self)
		};

		probe.tags.keys().any(|key| base.tags.contains_key(key))
	}

	/// The amount of tags in this set.
	pub fn len(&self) -> usize
	{
		self.tags.len()
	}

	/// Whether this set contains no tags.
	pub fn is_empty(&self) -> bool
	{
		self.tags.is_empty()
	}

	/// Iterates over the canonical tag spellings.
	pub fn iter(&self) -> impl Iterator<Item = &str>
	{
		self.tags.values().map(String::as_str)
	}

	/// The canonical tags as an owned list, in deterministic order.
	pub fn to_vec(&self) -> Vec<String>
	{
		self.tags.values().cloned().collect()
	}

	/// The case-folded tags joined with `,`, in deterministic order.
	///
	/// Used for cache-key fingerprints; two sets with the same tags in any
	/// order and casing produce the same string.
	pub fn key(&self) -> String
	{
		self.tags.keys().map(String::as_str).collect::<Vec<_>>().join(",")
	}
}

impl fmt::Display for TagSet
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let mut tags = self.iter();

		if let Some(tag) = tags.next() {
			f.write_str(tag)?;
		}

		for tag in tags {
			write!(f, ", {tag}")?;
		}

		Ok(())
	}
}

impl Serialize for TagSet
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_seq(self.iter())
	}
}

impl<'de> Deserialize<'de> for TagSet
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Vec::<String>::deserialize(deserializer).map(Self::from_canonical)
	}
}

// The database stores tag sets as JSON arrays of canonical spellings in
// text-compatible columns. These impls delegate to `sqlx::types::Json` so the
// column format stays in one place.

impl sqlx::Type<sqlx::MySql> for TagSet
{
	fn type_info() -> sqlx::mysql::MySqlTypeInfo
	{
		<sqlx::types::Json<Vec<String>> as sqlx::Type<sqlx::MySql>>::type_info()
	}

	fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool
	{
		<sqlx::types::Json<Vec<String>> as sqlx::Type<sqlx::MySql>>::compatible(ty)
	}
}

impl<'q> sqlx::Encode<'q, sqlx::MySql> for TagSet
{
	fn encode_by_ref(
		&self,
		buf: &mut <sqlx::MySql as sqlx::database::HasArguments<'q>>::ArgumentBuffer,
	) -> sqlx::encode::IsNull
	{
		sqlx::Encode::encode_by_ref(&sqlx::types::Json(self.to_vec()), buf)
	}
}

impl<'r> sqlx::Decode<'r, sqlx::MySql> for TagSet
{
	fn decode(value: sqlx::mysql::MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError>
	{
		<sqlx::types::Json<Vec<String>> as sqlx::Decode<'r, sqlx::MySql>>::decode(value)
			.map(|json| Self::from_canonical(json.0))
	}
}

/// A tag outside its attribute's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} tag `{tag}`")]
pub struct UnknownTag
{
	/// The attribute whose vocabulary rejected the tag.
	pub vocabulary: &'static str,

	/// The rejected value.
	pub tag: String,
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::vocab::{GRADES, MEDIUMS};

	#[test]
	fn normalize_dedupes_and_canonicalizes()
	{
		let tags = TagSet::normalize(["english", " ENGLISH ", "Hindi", ""], &MEDIUMS).unwrap();

		assert_eq!(tags.len(), 2);
		assert_eq!(tags.to_vec(), ["English", "Hindi"]);
	}

	#[test]
	fn normalize_rejects_unknown_tags()
	{
		let err = TagSet::normalize(["English", "Latin"], &MEDIUMS).unwrap_err();

		assert_eq!(err.vocabulary, "medium");
		assert_eq!(err.tag, "Latin");
	}

	#[test]
	fn intersection_is_exact_not_substring()
	{
		let eleven = TagSet::normalize(["11"], &GRADES).unwrap();
		let one = TagSet::normalize(["1"], &GRADES).unwrap();
		let mixed = TagSet::normalize(["1", "11"], &GRADES).unwrap();

		// "1" is a substring of "11" but not a member of {"11"}.
		assert!(!eleven.intersects(&one));
		assert!(eleven.intersects(&mixed));
		assert!(one.intersects(&mixed));
	}

	#[test]
	fn intersection_ignores_case()
	{
		let a = TagSet::from_canonical(["English"]);
		let b = TagSet::from_canonical(["english"]);

		assert!(a.intersects(&b));
	}

	#[test]
	fn empty_sets_never_intersect()
	{
		let tags = TagSet::from_canonical(["English"]);

		assert!(!tags.intersects(&TagSet::default()));
		assert!(!TagSet::default().intersects(&TagSet::default()));
	}

	#[test]
	fn key_is_order_and_case_insensitive()
	{
		let a = TagSet::from_canonical(["Hindi", "English"]);
		let b = TagSet::from_canonical(["english", "hindi"]);

		assert_eq!(a.key(), b.key());
	}
}
