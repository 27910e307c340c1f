//! Integration Tests for the Command Shell
//!
//! Drives full command scripts through a Session and checks the rendered
//! replies.

use layered_kv::kv::hasher::KeyHasher;
use layered_kv::shell::Reply;
use layered_kv::{Session, Store, StoreConfig};

// == Helper Functions ==

fn create_test_session(config: StoreConfig) -> Session {
    Session::from_config(&config).unwrap()
}

/// Runs each line and collects the rendered replies, skipping blank lines.
async fn run_script(session: &Session, lines: &[&str]) -> Vec<String> {
    let mut output = Vec::new();
    for line in lines {
        if let Some(reply) = session.execute(line).await {
            output.push(reply.to_string());
        }
    }
    output
}

// == Basic Commands ==

#[tokio::test]
async fn test_set_get_del_script() {
    let session = create_test_session(StoreConfig::default());

    let output = run_script(
        &session,
        &[
            "SET fruit1 apple",
            "GET fruit1",
            "DEL fruit1",
            "GET fruit1",
            "DEL fruit1",
        ],
    )
    .await;

    assert_eq!(
        output,
        vec!["OK", "\"apple\"", "OK (deleted)", "(nil)", "OK (key not found)"]
    );
}

#[tokio::test]
async fn test_get_unknown_key() {
    let session = create_test_session(StoreConfig::default().with_filter_size(100));

    let output = run_script(&session, &["GET unknown_key", "BLOOM unknown_key"]).await;

    assert_eq!(
        output,
        vec!["(nil)", "Key \"unknown_key\" is DEFINITELY NOT present."]
    );
}

#[tokio::test]
async fn test_prefix_listing() {
    let session = create_test_session(StoreConfig::default());

    let output = run_script(
        &session,
        &[
            "SET app_service running",
            "SET app_config loaded",
            "SET db_host localhost",
            "PREFIX app",
            "PREFIX cache",
        ],
    )
    .await;

    assert_eq!(output[3], "1) app_config\n2) app_service");
    assert_eq!(output[4], "(no keys found with this prefix)");
}

#[tokio::test]
async fn test_prefix_trie_order() {
    let session = create_test_session(StoreConfig::default());

    run_script(
        &session,
        &["SET apply 1", "SET apple 2", "SET application 3", "SET apricot 4"],
    )
    .await;

    let reply = session.execute("PREFIX app").await;
    assert_eq!(
        reply,
        Some(Reply::Keys(vec![
            "apple".to_string(),
            "application".to_string(),
            "apply".to_string(),
        ]))
    );
}

#[tokio::test]
async fn test_bloom_after_delete_may_report_present() {
    let session = create_test_session(StoreConfig::default());

    let output = run_script(&session, &["SET fruit1 apple", "DEL fruit1", "BLOOM fruit1"]).await;

    // Filter bits are never cleared, so a removed key still tests positive
    assert_eq!(
        output[2],
        "Key \"fruit1\" MIGHT be present (check GET for confirmation)."
    );
    assert_eq!(session.execute("GET fruit1").await.unwrap().to_string(), "(nil)");
}

// == LRU Through the Shell ==

#[tokio::test]
async fn test_small_cache_still_serves_everything() {
    let session = create_test_session(StoreConfig::default().with_cache_capacity(2));

    let output = run_script(
        &session,
        &[
            "SET fruit1 apple",
            "SET fruit2 banana",
            "GET fruit1",
            "SET fruit3 cherry",
            "GET fruit3",
            "GET fruit1",
            "GET fruit2",
        ],
    )
    .await;

    assert_eq!(
        output,
        vec!["OK", "OK", "\"apple\"", "OK", "\"cherry\"", "\"apple\"", "\"banana\""]
    );

    let stats = session.store.read().await.stats();
    assert_eq!(stats.cache_hits, 3);
    assert_eq!(stats.table_hits, 1);
    assert_eq!(stats.cached_entries, 2);
}

// == Stats, Help, Errors ==

#[tokio::test]
async fn test_stats_command_outputs_json() {
    let session = create_test_session(StoreConfig::default());

    run_script(&session, &["SET a 1", "GET a", "GET a", "GET b", "GET c"]).await;
    let reply = session.execute("STATS").await.unwrap().to_string();

    let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(json["cache_hits"], 2);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_errors_and_help() {
    let session = create_test_session(StoreConfig::default());

    let output = run_script(&session, &["", "SET onlykey", "FLUSHALL", "help"]).await;

    assert_eq!(output.len(), 3);
    assert_eq!(
        output[0],
        "ERR: Wrong number of arguments for SET: expected 2, got 1"
    );
    assert_eq!(output[1], "ERR: Unknown command: FLUSHALL");
    assert!(output[2].starts_with("Commands:"));
}

#[tokio::test]
async fn test_exit_reply() {
    let session = create_test_session(StoreConfig::default());

    let reply = session.execute("EXIT").await.unwrap();
    assert!(reply.is_exit());
    assert_eq!(reply.to_string(), "Exiting store.");
}

// == Custom Hashers ==

struct OneBucketHasher;

impl KeyHasher for OneBucketHasher {
    fn hash(&self, _key: &str) -> u32 {
        7
    }
}

#[tokio::test]
async fn test_injected_hasher_false_positive_is_not_an_error() {
    let config = StoreConfig::default().with_filter_size(16);
    let store = Store::with_hashers(&config, vec![Box::new(OneBucketHasher)]).unwrap();
    let session = Session::new(store);

    let output = run_script(&session, &["SET real value", "BLOOM ghost", "GET ghost", "DEL ghost"]).await;

    assert_eq!(
        output,
        vec![
            "OK",
            "Key \"ghost\" MIGHT be present (check GET for confirmation).",
            "(nil)",
            "OK (key not found)",
        ]
    );

    let stats = session.store.read().await.stats();
    assert_eq!(stats.false_positives, 2);
}

// == Concurrent Sessions ==

#[tokio::test]
async fn test_concurrent_sessions_share_one_store() {
    let session = create_test_session(StoreConfig::default().with_cache_capacity(4));

    let mut handles = Vec::new();
    for worker in 0..8 {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                session.execute(&format!("SET w{}_k{} v{}", worker, i, i)).await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let store = session.store.read().await;
    assert_eq!(store.len(), 200);
    assert_eq!(store.prefix_search("w3_").len(), 25);
    assert!(store.stats().cached_entries <= 4);
}
