//! This module contains helpers for unit/integration tests.

use std::time::Duration;

use sqlx::{MySql, Pool};

use crate::cache::CacheLayer;
use crate::runtime::config::CacheConfig;
use crate::services::{CatalogMutationService, CatalogQueryService, UnitService};

/// Creates the catalog services on top of a shared in-process cache.
///
/// Sharing the cache matters: the mutation tests assert that evictions are
/// visible to the query side.
pub fn catalog_svcs(database: Pool<MySql>) -> (CatalogQueryService, CatalogMutationService)
{
	let cache = CacheLayer::in_memory();

	(
		CatalogQueryService::new(database.clone(), cache.clone()),
		CatalogMutationService::new(database, cache),
	)
}

/// Creates a [`UnitService`] with an in-process cache.
pub fn unit_svc(database: Pool<MySql>) -> UnitService
{
	UnitService::new(database, CacheLayer::in_memory())
}

/// Creates a [`CacheLayer`] pointing at a redis that isn't there, for
/// exercising the fail-open path.
pub fn unreachable_cache() -> CacheLayer
{
	let config = CacheConfig {
		url: Some("redis://127.0.0.1:9/".parse().expect("hardcoded URL is valid")),
		ttl: Duration::from_secs(600),
		op_timeout: Duration::from_millis(50),
	};

	CacheLayer::new(&config).expect("pool construction does not connect")
}

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr) => {
		if &$lhs != &$rhs {
			::color_eyre::eyre::bail!(
				"assertion `{} == {}` failed\n  lhs: {:?}\n  rhs: {:?}",
				stringify!($lhs),
				stringify!($rhs),
				&$lhs,
				&$rhs,
			);
		}
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)?) => {
		::color_eyre::eyre::ensure!(
			matches!($expr, $pat $(if $cond)?),
			"expression did not match `{}`",
			stringify!($pat),
		)
	};
}

pub(crate) use {assert, assert_eq, assert_matches};
