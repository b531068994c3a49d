use time::macros::datetime;

use scanback_domain::{TagRecord, TagStatus};
use scanback_storage::{db::Db, queries};
use scanback_testkit::TestDatabase;

async fn test_db() -> Option<(TestDatabase, Db)> {
	let Some(test_db) = TestDatabase::from_env().await.expect("Failed to create test database.")
	else {
		eprintln!("Skipping db smoke tests; set SCANBACK_PG_DSN to run them.");

		return None;
	};
	let db = Db::connect(&test_db.postgres_config()).await.expect("Failed to connect.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	Some((test_db, db))
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCANBACK_PG_DSN to run."]
async fn ensure_schema_is_idempotent() {
	let Some((test_db, db)) = test_db().await else { return };

	db.ensure_schema().await.expect("Second ensure_schema must succeed.");
	db.pool.close().await;

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCANBACK_PG_DSN to run."]
async fn upsert_then_fetch_round_trips_and_overwrites() {
	let Some((test_db, db)) = test_db().await else { return };

	assert!(queries::fetch_tag(&db.pool, "DEMO_TEST").await.expect("fetch").is_none());

	let first = TagRecord::activated(
		"DEMO_TEST",
		"Blue Backpack",
		"15550123456",
		datetime!(2026-10-19 10:00 UTC),
	);
	let second =
		TagRecord::activated("DEMO_TEST", "Red Umbrella", "4915112345678", datetime!(2026-10-19 11:00 UTC));

	queries::upsert_tag(&db.pool, &first).await.expect("first upsert");
	queries::upsert_tag(&db.pool, &second).await.expect("second upsert");

	let stored = queries::fetch_tag(&db.pool, "DEMO_TEST").await.expect("fetch").expect("row");

	assert_eq!(stored, second);
	assert_eq!(stored.status, TagStatus::Active);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCANBACK_PG_DSN to run."]
async fn unknown_status_reads_as_new() {
	let Some((test_db, db)) = test_db().await else { return };

	test_db.seed_tag("LEGACY", "Reserved").await.expect("Failed to seed tag.");

	let stored = queries::fetch_tag(&db.pool, "LEGACY").await.expect("fetch").expect("row");

	assert_eq!(stored.status, TagStatus::New);
	assert!(stored.claim().is_none());

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
