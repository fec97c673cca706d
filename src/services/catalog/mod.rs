//! Services for querying and mutating the course catalog.
//!
//! [`CatalogQueryService`] answers listing and single-course lookups through
//! the cache; [`CatalogMutationService`] owns create/update/soft-delete and
//! evicts the affected cache namespaces after each commit. Eviction runs
//! after the transaction, not atomically with it, so a reader racing a
//! mutation may briefly repopulate the cache with pre-mutation data; that
//! window is bounded by the entry TTL and closed by the next eviction.

use std::fmt;

use sqlx::{MySql, Pool, QueryBuilder, Transaction};
use tap::Tap;

use crate::cache::{CacheLayer, Namespace};
use crate::database::TransactionExt;
use crate::params::Page;
use crate::policy::{allowed_statuses, CallerRole};
use crate::services::units::UnitId;
use crate::tags::TagSet;
use crate::vocab::{FilterOptions, GRADES, MEDIUMS, SUBJECTS};

mod queries;

mod predicate;
use predicate::Predicate;

mod error;
pub use error::{Error, Result};

pub(crate) mod models;
pub use models::{
	CourseDetail,
	CourseId,
	CourseSummary,
	CourseUnit,
	CreateCourseRequest,
	FetchCoursesRequest,
	NewUnit,
	UpdateCourseRequest,
};

/// A service for querying the course catalog.
#[derive(Clone)]
pub struct CatalogQueryService
{
	/// The system of record.
	database: Pool<MySql>,

	/// The cache in front of it.
	cache: CacheLayer,
}

impl fmt::Debug for CatalogQueryService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("CatalogQueryService").finish_non_exhaustive()
	}
}

impl CatalogQueryService
{
	/// Create a new [`CatalogQueryService`].
	pub fn new(database: Pool<MySql>, cache: CacheLayer) -> Self
	{
		Self { database, cache }
	}

	/// Fetches a page of courses visible to `caller`.
	///
	/// Results are ordered by creation time, newest first, with IDs breaking
	/// ties, so repeated queries over unchanged data paginate
	/// deterministically.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_courses(
		&self,
		req: FetchCoursesRequest,
		caller: CallerRole,
	) -> Result<Page<CourseSummary>>
	{
		let predicate = Predicate::build(&req, allowed_statuses(caller))?;
		let cache_key = format!(
			"{}|p={}|s={}",
			predicate.signature(),
			req.page.0,
			req.size.get(),
		);

		if let Some(page) = self.cache.get(Namespace::CourseList, &cache_key).await {
			return Ok(page);
		}

		let mut txn = self.database.begin().await?;

		let mut query = QueryBuilder::new(queries::SELECT);
		predicate.push_where(&mut query);
		query.push(queries::ORDER_BY);
		query
			.push(" LIMIT ")
			.push_bind(req.size.get())
			.push(" OFFSET ")
			.push_bind(req.page.offset(req.size));

		let courses = query
			.build_query_as::<CourseSummary>()
			.fetch_all(txn.as_mut())
			.await?;

		let total = txn.total_rows().await?;

		txn.commit().await?;

		let page = Page::new(courses, total, req.page, req.size);

		self.cache.put(Namespace::CourseList, &cache_key, &page).await;

		Ok(page)
	}

	/// Fetches a single course with its units.
	///
	/// This will return `Ok(None)` if the course does not exist, was
	/// soft-deleted, or is hidden from `caller` by the visibility policy; the
	/// three cases are indistinguishable on purpose.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_course(
		&self,
		course_id: CourseId,
		caller: CallerRole,
	) -> Result<Option<CourseDetail>>
	{
		let cache_key = course_id.to_string();

		let detail = match self.cache.get(Namespace::Course, &cache_key).await {
			Some(detail) => Some(detail),
			None => {
				let mut txn = self.database.begin().await?;
				let detail = fetch_detail(course_id, &mut txn).await?;
				txn.commit().await?;

				if let Some(ref detail) = detail {
					self.cache.put(Namespace::Course, &cache_key, detail).await;
				}

				detail
			}
		};

		// The cache is shared across callers, so the visibility check has to
		// run on the value itself, not just on the fetch path. An entry
		// populated by an admin request must not leak a draft to anyone else.
		Ok(detail.filter(|detail| allowed_statuses(caller).contains(&detail.course.status)))
	}

	/// The vocabularies clients can filter on.
	pub fn filter_options(&self) -> FilterOptions
	{
		FilterOptions::collect()
	}
}

/// A service for mutating the course catalog.
#[derive(Clone)]
pub struct CatalogMutationService
{
	/// The system of record.
	database: Pool<MySql>,

	/// The cache to invalidate after each mutation.
	cache: CacheLayer,
}

impl fmt::Debug for CatalogMutationService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("CatalogMutationService").finish_non_exhaustive()
	}
}

impl CatalogMutationService
{
	/// Create a new [`CatalogMutationService`].
	pub fn new(database: Pool<MySql>, cache: CacheLayer) -> Self
	{
		Self { database, cache }
	}

	/// Creates a new course, along with its units.
	///
	/// The course and all of its units are persisted in a single transaction.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn create_course(&self, req: CreateCourseRequest) -> Result<CourseDetail>
	{
		let name = required(&req.name, "name")?;
		let description = required(&req.description, "description")?;
		let medium = TagSet::normalize(&req.medium, &MEDIUMS)?;
		let grade = TagSet::normalize(&req.grade, &GRADES)?;
		let subject = TagSet::normalize(&req.subject, &SUBJECTS)?;

		for unit in &req.units {
			required(&unit.title, "title")?;
		}

		let course_id = CourseId::new();
		let mut txn = self.database.begin().await?;

		sqlx::query(queries::INSERT_COURSE)
			.bind(course_id)
			.bind(name)
			.bind(description)
			.bind(req.board)
			.bind(medium)
			.bind(grade)
			.bind(subject)
			.bind(req.status)
			.execute(txn.as_mut())
			.await?;

		if !req.units.is_empty() {
			QueryBuilder::new(queries::INSERT_UNITS)
				.tap_mut(|query| {
					query.push_values(req.units.iter().enumerate(), |mut query, (position, unit)| {
						query
							.push_bind(UnitId::new())
							.push_bind(unit.title.trim())
							.push_bind(&unit.content)
							.push_bind(course_id)
							.push_bind(u32::try_from(position).unwrap_or(u32::MAX));
					});
				})
				.build()
				.execute(txn.as_mut())
				.await?;
		}

		let detail = fetch_detail(course_id, &mut txn)
			.await?
			.ok_or(Error::CourseNotFound)?;

		txn.commit().await?;

		tracing::info!(target: "course_catalog_api::audit_log", %course_id, "created course");

		self.evict_course_caches().await;

		Ok(detail)
	}

	/// Overwrites an existing course's fields.
	///
	/// Soft-deleted courses cannot be updated; they surface as
	/// [`Error::CourseNotFound`], same as absent ones. Concurrent updates to
	/// the same course are last-writer-wins; there is no version check.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn update_course(
		&self,
		course_id: CourseId,
		req: UpdateCourseRequest,
	) -> Result<CourseDetail>
	{
		let name = required(&req.name, "name")?;
		let description = required(&req.description, "description")?;
		let medium = TagSet::normalize(&req.medium, &MEDIUMS)?;
		let grade = TagSet::normalize(&req.grade, &GRADES)?;
		let subject = TagSet::normalize(&req.subject, &SUBJECTS)?;

		let mut txn = self.database.begin().await?;

		sqlx::query(queries::UPDATE_COURSE)
			.bind(name)
			.bind(description)
			.bind(req.board)
			.bind(medium)
			.bind(grade)
			.bind(subject)
			.bind(req.status)
			.bind(course_id)
			.execute(txn.as_mut())
			.await?;

		// `updated_at` is maintained by the database, so the row is re-read
		// rather than reconstructed. This also covers the case where the
		// UPDATE matched nothing.
		let detail = fetch_detail(course_id, &mut txn)
			.await?
			.ok_or(Error::CourseNotFound)?;

		txn.commit().await?;

		tracing::info!(target: "course_catalog_api::audit_log", %course_id, "updated course");

		self.evict_course_caches().await;

		Ok(detail)
	}

	/// Soft-deletes a course.
	///
	/// The course's units are detached (their rows survive without a course)
	/// and the course row is flagged, never removed. Deleting an unknown or
	/// already-deleted course is a no-op, so repeated deletes cannot fail.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn delete_course(&self, course_id: CourseId) -> Result<()>
	{
		let mut txn = self.database.begin().await?;

		sqlx::query(queries::DETACH_UNITS)
			.bind(course_id)
			.execute(txn.as_mut())
			.await?;

		let deleted = sqlx::query(queries::SOFT_DELETE_COURSE)
			.bind(course_id)
			.execute(txn.as_mut())
			.await?;

		txn.commit().await?;

		if deleted.rows_affected() == 0 {
			tracing::debug!(%course_id, "course already gone; delete is a no-op");
			return Ok(());
		}

		tracing::info!(target: "course_catalog_api::audit_log", %course_id, "deleted course");

		self.evict_course_caches().await;
		self.cache.evict(Namespace::Unit).await;

		Ok(())
	}

	/// Evicts both course namespaces.
	///
	/// Coarse-grained on purpose: enumerating which list pages a mutation
	/// touched is not worth the complexity, and repopulation is cheap.
	async fn evict_course_caches(&self)
	{
		self.cache.evict(Namespace::Course).await;
		self.cache.evict(Namespace::CourseList).await;
	}
}

/// Fetches a course and its units within `txn`.
///
/// Soft-deleted courses are reported as absent.
async fn fetch_detail(
	course_id: CourseId,
	txn: &mut Transaction<'_, MySql>,
) -> Result<Option<CourseDetail>>
{
	let Some(course) = sqlx::query_as::<_, CourseSummary>(queries::SELECT_COURSE)
		.bind(course_id)
		.fetch_optional(txn.as_mut())
		.await?
	else {
		return Ok(None);
	};

	let units = sqlx::query_as::<_, CourseUnit>(queries::SELECT_COURSE_UNITS)
		.bind(course_id)
		.fetch_all(txn.as_mut())
		.await?;

	Ok(Some(CourseDetail { course, units }))
}

/// Trims `value` and rejects blank input.
fn required<'v>(value: &'v str, field: &'static str) -> Result<&'v str>
{
	let value = value.trim();

	if value.is_empty() {
		return Err(Error::EmptyField { field });
	}

	Ok(value)
}

#[cfg(test)]
mod tests
{
	use sqlx::{MySql, Pool};
	use uuid::Uuid;

	use super::*;
	use crate::params::{PageNumber, PageSize};
	use crate::testing;
	use crate::vocab::{Board, Status};

	fn course_id(raw: u128) -> CourseId
	{
		CourseId(Uuid::from_u128(raw))
	}

	fn unit_id(raw: u128) -> UnitId
	{
		UnitId(Uuid::from_u128(raw))
	}

	fn filter(f: impl FnOnce(&mut FetchCoursesRequest)) -> FetchCoursesRequest
	{
		let mut req = FetchCoursesRequest::default();
		f(&mut req);
		req
	}

	fn create_req() -> CreateCourseRequest
	{
		CreateCourseRequest {
			name: String::from("Algebra I"),
			description: String::from("A first pass over symbolic math"),
			board: Board::Cbse,
			medium: vec![String::from("English")],
			grade: vec![String::from("9"), String::from("10")],
			subject: vec![String::from("Maths")],
			status: Status::Live,
			units: vec![
				NewUnit {
					title: String::from("Variables"),
					content: String::from("Letters standing in for numbers"),
				},
				NewUnit {
					title: String::from("Equations"),
					content: String::from("Balancing both sides"),
				},
			],
		}
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn fetch_courses_hides_drafts_and_deleted(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Other)
			.await?;

		testing::assert_eq!(page.total, 4);
		testing::assert!(page.items.iter().all(|c| c.status == Status::Live));

		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Admin)
			.await?;

		testing::assert_eq!(page.total, 5);
		testing::assert!(page.items.iter().any(|c| c.status == Status::Draft));
		testing::assert!(!page.items.iter().any(|c| c.id == course_id(5)));

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn tag_filters_use_exact_intersection(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		// "1" is a substring of the stored "11" but not one of its tags
		let page = query_svc
			.fetch_courses(
				filter(|req| req.grades = vec![String::from("1")]),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 0);

		let page = query_svc
			.fetch_courses(
				filter(|req| req.grades = vec![String::from("11")]),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 1);
		testing::assert_eq!(page.items[0].id, course_id(3));

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn filter_dimensions_are_anded(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		let page = query_svc
			.fetch_courses(
				filter(|req| {
					req.mediums = vec![String::from("English")];
					req.subjects = vec![String::from("Science")];
				}),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 1);
		testing::assert_eq!(page.items[0].id, course_id(3));

		let page = query_svc
			.fetch_courses(
				filter(|req| {
					req.mediums = vec![String::from("English")];
					req.subjects = vec![String::from("Maths")];
				}),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 2);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn search_text_matches_prose(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		let page = query_svc
			.fetch_courses(
				filter(|req| req.search_text = Some(String::from("FOUNDATIONS"))),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 1);
		testing::assert_eq!(page.items[0].id, course_id(3));

		// matches the description, not the name
		let page = query_svc
			.fetch_courses(
				filter(|req| req.search_text = Some(String::from("proofs"))),
				CallerRole::Other,
			)
			.await?;

		testing::assert_eq!(page.total, 1);
		testing::assert_eq!(page.items[0].id, course_id(2));

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn board_filter_matches_exactly(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		let page = query_svc
			.fetch_courses(filter(|req| req.boards = vec![Board::State]), CallerRole::Other)
			.await?;

		testing::assert_eq!(page.total, 2);
		testing::assert!(page.items.iter().all(|c| c.board == Board::State));

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn pagination_is_complete_and_deterministic(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);
		let size = PageSize::new(3);
		let mut seen = Vec::new();

		for page_number in 0.. {
			let page = query_svc
				.fetch_courses(
					filter(|req| {
						req.page = PageNumber(page_number);
						req.size = size;
					}),
					CallerRole::Other,
				)
				.await?;

			testing::assert_eq!(page.total, 4);

			if !page.has_content() {
				break;
			}

			seen.extend(page.items.into_iter().map(|c| c.id));
		}

		// newest first, IDs breaking ties, no duplicates or omissions
		testing::assert_eq!(seen, [course_id(6), course_id(3), course_id(2), course_id(1)]);

		// a page far past the end is empty, not an error
		let page = query_svc
			.fetch_courses(
				filter(|req| {
					req.page = PageNumber(42);
					req.size = size;
				}),
				CallerRole::Other,
			)
			.await?;

		testing::assert!(!page.has_content());
		testing::assert_eq!(page.total, 4);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures(
			"../../../database/fixtures/courses.sql",
			"../../../database/fixtures/units.sql"
		)
	)]
	async fn fetch_course_returns_units_in_order(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		let detail = query_svc
			.fetch_course(course_id(1), CallerRole::Other)
			.await?
			.expect("course 1 is live");

		testing::assert_eq!(detail.course.name, "Algebra Basics");
		testing::assert_eq!(detail.units.len(), 2);
		testing::assert_eq!(detail.units[0].id, unit_id(0x101));
		testing::assert_eq!(detail.units[1].id, unit_id(0x102));

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn fetch_course_hides_invisible_courses(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (query_svc, _) = testing::catalog_svcs(database);

		// a draft: invisible to others, visible to admins
		testing::assert!(query_svc.fetch_course(course_id(4), CallerRole::Other).await?.is_none());
		testing::assert!(query_svc.fetch_course(course_id(4), CallerRole::Admin).await?.is_some());

		// the admin request above cached the draft; it must stay hidden
		testing::assert!(query_svc.fetch_course(course_id(4), CallerRole::Other).await?.is_none());

		// soft-deleted and unknown courses are indistinguishable
		testing::assert!(query_svc.fetch_course(course_id(5), CallerRole::Admin).await?.is_none());
		testing::assert!(query_svc.fetch_course(CourseId::new(), CallerRole::Admin).await?.is_none());

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn create_course_works(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, mutation_svc) = testing::catalog_svcs(database);

		// populate the list cache so the mutation has something to invalidate
		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Other)
			.await?;

		testing::assert_eq!(page.total, 0);

		let detail = mutation_svc.create_course(create_req()).await?;

		testing::assert_eq!(detail.course.name, "Algebra I");
		testing::assert_eq!(detail.units.len(), 2);
		testing::assert_eq!(detail.units[0].title, "Variables");

		let fetched = query_svc
			.fetch_course(detail.course.id, CallerRole::Other)
			.await?
			.expect("the created course is live");

		testing::assert_eq!(fetched, detail);

		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Other)
			.await?;

		testing::assert_eq!(page.total, 1);
		testing::assert_eq!(page.items[0].id, detail.course.id);

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn create_course_validates_input(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (_, mutation_svc) = testing::catalog_svcs(database);

		let blank_name = CreateCourseRequest { name: String::from("  "), ..create_req() };

		testing::assert_matches!(
			mutation_svc.create_course(blank_name).await,
			Err(Error::EmptyField { field: "name" })
		);

		let unknown_grade =
			CreateCourseRequest { grade: vec![String::from("13")], ..create_req() };

		testing::assert_matches!(
			mutation_svc.create_course(unknown_grade).await,
			Err(Error::InvalidTag(_))
		);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn update_course_is_never_stale(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let (query_svc, mutation_svc) = testing::catalog_svcs(database);

		// warm the cache with the pre-update name
		let before = query_svc
			.fetch_course(course_id(1), CallerRole::Other)
			.await?
			.expect("course 1 is live");

		testing::assert_eq!(before.course.name, "Algebra Basics");

		let updated = mutation_svc
			.update_course(course_id(1), UpdateCourseRequest {
				name: String::from("Algebra II"),
				description: String::from("Beyond the basics"),
				board: Board::Cbse,
				medium: vec![String::from("English")],
				grade: vec![String::from("10")],
				subject: vec![String::from("Maths")],
				status: Status::Live,
			})
			.await?;

		testing::assert_eq!(updated.course.name, "Algebra II");

		let after = query_svc
			.fetch_course(course_id(1), CallerRole::Other)
			.await?
			.expect("course 1 is still live");

		testing::assert_eq!(after.course.name, "Algebra II");
		testing::assert_eq!(after.course.created_at, before.course.created_at);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn update_rejects_missing_and_deleted_courses(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (_, mutation_svc) = testing::catalog_svcs(database);

		let req = UpdateCourseRequest {
			name: String::from("whatever"),
			description: String::from("whatever"),
			board: Board::State,
			medium: Vec::new(),
			grade: Vec::new(),
			subject: Vec::new(),
			status: Status::Live,
		};

		// soft-deleted course
		testing::assert_matches!(
			mutation_svc.update_course(course_id(5), req.clone()).await,
			Err(Error::CourseNotFound)
		);

		// unknown course
		testing::assert_matches!(
			mutation_svc.update_course(CourseId::new(), req).await,
			Err(Error::CourseNotFound)
		);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures(
			"../../../database/fixtures/courses.sql",
			"../../../database/fixtures/units.sql"
		)
	)]
	async fn delete_course_is_idempotent_and_detaches_units(database: Pool<MySql>)
	-> color_eyre::Result<()>
	{
		let (query_svc, mutation_svc) = testing::catalog_svcs(database.clone());
		let unit_svc = testing::unit_svc(database);

		mutation_svc.delete_course(course_id(1)).await?;

		// repeated deletes succeed silently
		mutation_svc.delete_course(course_id(1)).await?;
		mutation_svc.delete_course(CourseId::new()).await?;

		testing::assert!(query_svc.fetch_course(course_id(1), CallerRole::Admin).await?.is_none());

		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Admin)
			.await?;

		testing::assert!(!page.items.iter().any(|c| c.id == course_id(1)));

		// the units survived, they just lost their course
		let unit = unit_svc
			.fetch_unit(unit_id(0x101))
			.await?
			.expect("unit rows are retained");

		testing::assert_eq!(unit.course_id, None::<CourseId>);

		Ok(())
	}

	#[sqlx::test(
		migrations = "database/migrations",
		fixtures("../../../database/fixtures/courses.sql")
	)]
	async fn cache_outage_does_not_surface(database: Pool<MySql>) -> color_eyre::Result<()>
	{
		let cache = testing::unreachable_cache();
		let query_svc = CatalogQueryService::new(database.clone(), cache.clone());
		let mutation_svc = CatalogMutationService::new(database, cache);

		let page = query_svc
			.fetch_courses(FetchCoursesRequest::default(), CallerRole::Other)
			.await?;

		testing::assert_eq!(page.total, 4);

		let detail = query_svc
			.fetch_course(course_id(1), CallerRole::Other)
			.await?
			.expect("course 1 is live");

		testing::assert_eq!(detail.course.name, "Algebra Basics");

		let created = mutation_svc.create_course(create_req()).await?;

		mutation_svc.delete_course(created.course.id).await?;

		Ok(())
	}
}
