//! Pagination parameters and the page envelope.

use serde::{Deserialize, Deserializer, Serialize};

/// A 0-based page number.
#[derive(
	Debug,
	Default,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
)]
#[serde(default, transparent)]
pub struct PageNumber(pub u64);

impl PageNumber
{
	/// The amount of rows to skip for this page.
	pub const fn offset(&self, size: PageSize) -> u64
	{
		self.0.saturating_mul(size.get())
	}
}

/// The amount of items per page.
///
/// Values are clamped to `[1, MAX]` rather than rejected, so a `size=0` or
/// `size=5000` request degrades gracefully instead of erroring. This bounds
/// the cost of a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize<const DEFAULT: u64 = 10, const MAX: u64 = 100>(u64);

impl<const DEFAULT: u64, const MAX: u64> PageSize<DEFAULT, MAX>
{
	/// Creates a new [`PageSize`], clamping `value` into `[1, MAX]`.
	pub const fn new(value: u64) -> Self
	{
		const {
			assert!(1 <= DEFAULT && DEFAULT <= MAX, "`DEFAULT` must be within `[1, MAX]`");
		}

		Self(if value < 1 {
			1
		} else if value > MAX {
			MAX
		} else {
			value
		})
	}

	/// The underlying value.
	pub const fn get(&self) -> u64
	{
		self.0
	}
}

impl<const DEFAULT: u64, const MAX: u64> Default for PageSize<DEFAULT, MAX>
{
	fn default() -> Self
	{
		Self(DEFAULT)
	}
}

impl<'de, const DEFAULT: u64, const MAX: u64> Deserialize<'de> for PageSize<DEFAULT, MAX>
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<u64>::deserialize(deserializer)
			.map(|value| value.map_or_else(Self::default, Self::new))
	}
}

/// One page of query results.
///
/// `total` is always the amount of rows matching the query's predicate,
/// independent of the window this page covers. A request for a page past the
/// end of the result set yields an empty `items` with the correct `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T>
{
	/// The items within this page's window.
	pub items: Vec<T>,

	/// How many items matched in total, ignoring pagination.
	pub total: u64,

	/// The 0-based page number that was requested.
	pub page: u64,

	/// The page size that was applied (after clamping).
	pub size: u64,
}

impl<T> Page<T>
{
	/// Creates a new [`Page`].
	pub fn new<const DEFAULT: u64, const MAX: u64>(
		items: Vec<T>,
		total: u64,
		page: PageNumber,
		size: PageSize<DEFAULT, MAX>,
	) -> Self
	{
		Self { items, total, page: page.0, size: size.get() }
	}

	/// Whether this page's window contains any items.
	pub fn has_content(&self) -> bool
	{
		!self.items.is_empty()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn page_size_clamps()
	{
		assert_eq!(PageSize::<10, 100>::new(0).get(), 1);
		assert_eq!(PageSize::<10, 100>::new(7).get(), 7);
		assert_eq!(PageSize::<10, 100>::new(5000).get(), 100);
		assert_eq!(PageSize::<10, 100>::default().get(), 10);
	}

	#[test]
	fn offset_is_page_times_size()
	{
		let size = PageSize::<10, 100>::new(25);

		assert_eq!(PageNumber(0).offset(size), 0);
		assert_eq!(PageNumber(3).offset(size), 75);
	}

	#[test]
	fn past_the_end_pages_are_empty_not_errors()
	{
		let page =
			Page::<u64>::new(Vec::new(), 42, PageNumber(100), PageSize::<10, 100>::default());

		assert!(!page.has_content());
		assert_eq!(page.total, 42);
	}
}
