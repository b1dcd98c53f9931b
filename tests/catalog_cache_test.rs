//! Integration tests for the catalog snapshot cache.
//!
//! These tests cover the read path order (memory, persisted snapshot,
//! network), the 24 hour freshness boundary, coalescing of concurrent
//! fetches, and tolerance of storage failures.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rotomdex::api::PokeApiClient;
use rotomdex::cache::CatalogCache;
use rotomdex::models::{CatalogEntry, CatalogSnapshot};
use rotomdex::storage::{FileStore, KeyValueStore, MemoryStore, SNAPSHOT_KEY};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer) -> PokeApiClient {
    PokeApiClient::with_base_urls(
        format!("{}/api/v2", server.uri()),
        format!("{}/graphql", server.uri()),
    )
}

/// Helper to mount a batched catalog response carrying a single entry.
async fn mount_catalog(server: &MockServer, name: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "species": [{
                    "id": 1,
                    "name": name,
                    "generation_id": 1,
                    "names": [],
                    "pokemon": [{"types": [{"type": {"name": "grass"}}]}]
                }]
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn seeded_snapshot(name: &str, age_hours: i64) -> String {
    let snapshot = CatalogSnapshot::with_timestamp(
        vec![CatalogEntry {
            id: 1,
            name: name.to_string(),
            local_name: None,
            types: vec!["grass".to_string()],
            generation: Some(1),
        }],
        Utc::now() - chrono::Duration::hours(age_hours),
    );
    serde_json::to_string(&snapshot).unwrap()
}

// ============================================================================
// Read path order
// ============================================================================

#[tokio::test]
async fn test_network_fetch_populates_memory_and_store() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 1).await;
    let store = Arc::new(MemoryStore::new());
    let cache = CatalogCache::new(store.clone() as Arc<dyn KeyValueStore>);
    let client = mock_client(&server);

    let snapshot = cache.get_or_fetch(&client).await.unwrap();

    assert_eq!(snapshot.entries[0].name, "bulbasaur");
    assert!(cache.current().await.is_some());
    assert!(store.get(SNAPSHOT_KEY).unwrap().is_some());
}

#[tokio::test]
async fn test_second_read_is_served_from_memory() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 1).await;
    let cache = CatalogCache::new(Arc::new(MemoryStore::new()));
    let client = mock_client(&server);

    let first = cache.get_or_fetch(&client).await.unwrap();
    let second = cache.get_or_fetch(&client).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    server.verify().await;
}

#[tokio::test]
async fn test_concurrent_reads_share_one_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "data": {
                        "species": [{
                            "id": 1,
                            "name": "bulbasaur",
                            "generation_id": 1,
                            "names": [],
                            "pokemon": []
                        }]
                    }
                }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let cache = CatalogCache::new(Arc::new(MemoryStore::new()));
    let client = mock_client(&server);

    let (a, b) = tokio::join!(cache.get_or_fetch(&client), cache.get_or_fetch(&client));

    assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    server.verify().await;
}

// ============================================================================
// Freshness boundary
// ============================================================================

#[tokio::test]
async fn test_fresh_persisted_snapshot_avoids_network() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 0).await;
    let store = Arc::new(MemoryStore::new());
    store.set(SNAPSHOT_KEY, &seeded_snapshot("persisted", 1)).unwrap();
    let cache = CatalogCache::new(store as Arc<dyn KeyValueStore>);

    let snapshot = cache.get_or_fetch(&mock_client(&server)).await.unwrap();

    assert_eq!(snapshot.entries[0].name, "persisted");
    server.verify().await;
}

#[tokio::test]
async fn test_snapshot_at_exactly_24_hours_is_refetched() {
    let server = MockServer::start().await;
    mount_catalog(&server, "refetched", 1).await;
    let store = Arc::new(MemoryStore::new());
    store.set(SNAPSHOT_KEY, &seeded_snapshot("stale", 24)).unwrap();
    let cache = CatalogCache::new(store as Arc<dyn KeyValueStore>);

    let snapshot = cache.get_or_fetch(&mock_client(&server)).await.unwrap();

    assert_eq!(snapshot.entries[0].name, "refetched");
    server.verify().await;
}

#[tokio::test]
async fn test_snapshot_just_inside_24_hours_is_adopted() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 0).await;
    let store = Arc::new(MemoryStore::new());
    store.set(SNAPSHOT_KEY, &seeded_snapshot("persisted", 23)).unwrap();
    let cache = CatalogCache::new(store as Arc<dyn KeyValueStore>);

    let snapshot = cache.get_or_fetch(&mock_client(&server)).await.unwrap();

    assert_eq!(snapshot.entries[0].name, "persisted");
    server.verify().await;
}

// ============================================================================
// Invalidation and storage failures
// ============================================================================

#[tokio::test]
async fn test_invalidate_drops_both_layers_and_refetches() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 2).await;
    let store = Arc::new(MemoryStore::new());
    let cache = CatalogCache::new(store.clone() as Arc<dyn KeyValueStore>);
    let client = mock_client(&server);

    cache.get_or_fetch(&client).await.unwrap();
    cache.invalidate().await;
    assert!(cache.current().await.is_none());
    assert!(store.get(SNAPSHOT_KEY).unwrap().is_none());

    cache.get_or_fetch(&client).await.unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_storage_write_failure_does_not_fail_the_fetch() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 1).await;
    let store = Arc::new(MemoryStore::new());
    store.set_fail_writes(true);
    let cache = CatalogCache::new(store.clone() as Arc<dyn KeyValueStore>);

    let snapshot = cache.get_or_fetch(&mock_client(&server)).await.unwrap();

    // The fetch succeeded and is usable in memory even though nothing
    // could be persisted.
    assert_eq!(snapshot.entries[0].name, "bulbasaur");
    store.set_fail_writes(false);
    assert!(store.get(SNAPSHOT_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_persisted_snapshot_falls_through_to_network() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 1).await;
    let store = Arc::new(MemoryStore::new());
    store.set(SNAPSHOT_KEY, "{definitely not a snapshot").unwrap();
    let cache = CatalogCache::new(store as Arc<dyn KeyValueStore>);

    let snapshot = cache.get_or_fetch(&mock_client(&server)).await.unwrap();
    assert_eq!(snapshot.entries[0].name, "bulbasaur");
    server.verify().await;
}

// ============================================================================
// File-backed persistence
// ============================================================================

#[tokio::test]
async fn test_snapshot_round_trips_through_file_store() {
    let server = MockServer::start().await;
    mount_catalog(&server, "bulbasaur", 1).await;
    let dir = tempfile::tempdir().unwrap();
    let client = mock_client(&server);

    let first_cache = CatalogCache::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    let fetched = first_cache.get_or_fetch(&client).await.unwrap();
    assert_eq!(fetched.entries[0].name, "bulbasaur");

    // A fresh cache over the same directory adopts the persisted snapshot
    // without touching the network again.
    let second_cache = CatalogCache::new(Arc::new(FileStore::open(dir.path()).unwrap()));
    let adopted = second_cache.get_or_fetch(&client).await.unwrap();
    assert_eq!(adopted.entries[0].name, "bulbasaur");
    server.verify().await;
}
