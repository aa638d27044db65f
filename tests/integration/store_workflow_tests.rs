/*!
 * End-to-end workflow tests against file-backed and in-memory stores
 */

use anyhow::Result;

use lexistore::api::{Pipeline, UpsertRequest};
use lexistore::auth::TokenAuthenticator;
use lexistore::query::{QueryEngine, SearchFilters};
use lexistore::store::factory::{SeedRecord, SEED_LOCALES};
use lexistore::store::{ListFilter, RecordOrder, StoreConnection, TranslationRepository};

use crate::common;

/// Test the full record lifecycle against a store on disk
#[tokio::test]
async fn test_fullWorkflow_withFileBackedStore_shouldBehaveEndToEnd() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let db_path = temp_dir.path().join("workflow.db");

    let db = StoreConnection::new(&db_path)?;
    let admin = TokenAuthenticator::new(db.clone());
    let issued = admin.issue("workflow").await?;

    let engine = QueryEngine::with_default_cache(TranslationRepository::new(db.clone()));
    let pipeline = Pipeline::new(TokenAuthenticator::new(db), engine);
    let token = Some(issued.plain_token.as_str());

    // Create records in two locales
    let created = pipeline
        .upsert(token, UpsertRequest::new("welcome.title", "en", "Welcome", "web"))
        .await;
    assert_eq!(created.status, 200);
    let welcome_id = created.body["data"]["id"].as_i64().expect("welcome id");

    pipeline
        .upsert(token, UpsertRequest::new("welcome.title", "fr", "Bienvenue", "web"))
        .await;
    let farewell = pipeline
        .upsert(token, UpsertRequest::new("farewell.bye", "en", "Goodbye", "web"))
        .await;
    let farewell_id = farewell.body["data"]["id"].as_i64().expect("farewell id");

    // Refreshing an existing (key, locale) pair keeps its id
    let updated = pipeline
        .upsert(
            token,
            UpsertRequest::new("welcome.title", "en", "Hello there", "web"),
        )
        .await;
    assert_eq!(updated.body["data"]["id"], welcome_id);
    assert_eq!(updated.body["data"]["value"], "Hello there");

    // The locale listing sees both live en records, oldest first
    let listing = pipeline.list(token, "en", None).await;
    assert_eq!(listing.body["pagination"]["total"], 2);
    assert_eq!(listing.body["data"][0]["key"], "welcome.title");
    assert_eq!(listing.body["data"][1]["key"], "farewell.bye");

    // Search crosses locales
    let filters = SearchFilters {
        key: Some("welcome".to_string()),
        ..SearchFilters::default()
    };
    let found = pipeline.search(token, filters, None).await;
    assert_eq!(found.body["pagination"]["total"], 2);

    // Export nests locale -> key -> value with the refreshed text
    let exported = pipeline.export(token, None, None).await;
    assert_eq!(exported.body["data"]["en"]["welcome.title"], "Hello there");
    assert_eq!(exported.body["data"]["en"]["farewell.bye"], "Goodbye");
    assert_eq!(exported.body["data"]["fr"]["welcome.title"], "Bienvenue");

    // Soft-delete one record
    let deleted = pipeline.delete(token, farewell_id).await;
    assert_eq!(deleted.status, 200);

    // The deleted record disappears from listing and export
    let after = pipeline.list(token, "en", None).await;
    assert_eq!(after.body["pagination"]["total"], 1);
    let after_export = pipeline.export(token, Some("en"), None).await;
    assert!(after_export.body["data"]["en"]
        .get("farewell.bye")
        .is_none());

    // Deleting the same id again finds nothing
    let again = pipeline.delete(token, farewell_id).await;
    assert_eq!(again.status, 404);

    // Re-upserting the deleted pair starts a fresh record
    let revived = pipeline
        .upsert(token, UpsertRequest::new("farewell.bye", "en", "Bye again", "web"))
        .await;
    assert_eq!(revived.status, 200);
    let revived_id = revived.body["data"]["id"].as_i64().expect("revived id");
    assert_ne!(revived_id, farewell_id);
    Ok(())
}

/// Test that records survive closing and reopening the store file
#[test]
fn test_persistence_withReopenedStore_shouldRetainRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let db_path = temp_dir.path().join("persist.db");

    // First session writes one record and closes the store
    tokio_test::block_on(async {
        let db = StoreConnection::new(&db_path)?;
        let repository = TranslationRepository::new(db);
        repository
            .upsert("welcome.title", "en", "Welcome", "web")
            .await?;
        Ok::<(), anyhow::Error>(())
    })?;

    // Reopening runs schema initialization against the existing version
    let (records, total) = tokio_test::block_on(async {
        let db = StoreConnection::new(&db_path)?;
        let repository = TranslationRepository::new(db);

        let filter = ListFilter {
            locale_eq: Some("en".to_string()),
            ..ListFilter::default()
        };
        let page = repository
            .list_active(filter, RecordOrder::IdAsc, 1, 50)
            .await?;
        Ok::<_, anyhow::Error>(page)
    })?;

    assert_eq!(total, 1);
    assert_eq!(records[0].key, "welcome.title");
    assert_eq!(records[0].value, "Welcome");
    Ok(())
}

/// Test walking a large locale page by page
#[tokio::test]
async fn test_pagination_withManyRecords_shouldWalkPagesConsistently() -> Result<()> {
    let engine = common::memory_engine()?;
    common::seed_locale(&engine, "en", 120).await?;

    let page1 = engine.list_locale("en", Some(1)).await?;
    let page2 = engine.list_locale("en", Some(2)).await?;
    let page3 = engine.list_locale("en", Some(3)).await?;

    assert_eq!(page1.items.len(), 50);
    assert_eq!(page2.items.len(), 50);
    assert_eq!(page3.items.len(), 20);
    for page in [&page1, &page2, &page3] {
        assert_eq!(page.total, 120);
        assert_eq!(page.per_page, 50);
        assert_eq!(page.last_page, 3);
    }

    assert_eq!(page1.next_page, Some(2));
    assert_eq!(page1.prev_page, None);
    assert_eq!(page2.next_page, Some(3));
    assert_eq!(page2.prev_page, Some(1));
    assert_eq!(page3.next_page, None);
    assert_eq!(page3.prev_page, Some(2));

    // Ids ascend across page boundaries with no overlap
    let ids: Vec<i64> = page1
        .items
        .iter()
        .chain(&page2.items)
        .chain(&page3.items)
        .map(|r| r.id)
        .collect();
    assert_eq!(ids.len(), 120);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    // A page past the end is empty but keeps the totals
    let beyond = engine.list_locale("en", Some(9)).await?;
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 120);
    assert_eq!(beyond.current_page, 9);
    Ok(())
}

/// Test that factory-generated records flow through the engine cleanly
#[tokio::test]
async fn test_seeding_withFactoryRecords_shouldProduceSearchableData() -> Result<()> {
    let engine = common::memory_engine()?;
    let mut rng = rand::rng();

    for _ in 0..20 {
        let record = SeedRecord::random(&mut rng);
        engine
            .upsert(&record.key, &record.locale, &record.value, &record.context)
            .await?;
    }

    let page = engine.search(SearchFilters::default(), None).await?;
    assert_eq!(page.total, 20);

    // Every generated locale comes from the seed pool
    let document = engine.export(None, None).await?;
    for locale in document.data.keys() {
        assert!(
            SEED_LOCALES.contains(&locale.as_str()),
            "unexpected locale {}",
            locale
        );
    }
    Ok(())
}
