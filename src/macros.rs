//! Helper macros used throughout the crate.

/// A helper macro for defining an "ID" type.
///
/// Every table with an `id` column gets its own wrapper type defined by this
/// macro in its service's `models` module, so different kinds of IDs cannot
/// be mixed up.
macro_rules! make_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(
			Debug,
			Clone,
			Copy,
			PartialEq,
			Eq,
			PartialOrd,
			Ord,
			Hash,
			::serde::Serialize,
			::serde::Deserialize,
			::sqlx::Type,
		)]
		#[serde(transparent)]
		#[sqlx(transparent)]
		pub struct $name(pub ::uuid::Uuid);

		impl $name
		{
			/// Generates a new random ID.
			pub fn new() -> Self
			{
				Self(::uuid::Uuid::new_v4())
			}
		}

		impl ::std::default::Default for $name
		{
			fn default() -> Self
			{
				Self::new()
			}
		}

		impl ::std::fmt::Display for $name
		{
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result
			{
				::std::fmt::Display::fmt(&self.0, f)
			}
		}

		impl ::std::str::FromStr for $name
		{
			type Err = ::uuid::Error;

			fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err>
			{
				value.parse().map(Self)
			}
		}

		impl ::std::convert::From<::uuid::Uuid> for $name
		{
			fn from(id: ::uuid::Uuid) -> Self
			{
				Self(id)
			}
		}
	};
}

pub(crate) use make_id;
