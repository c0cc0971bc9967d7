use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::{Value, json};
use spotgraph::{
    Error, Result,
    graph::{GraphStore, GraphValue, QueryResult, StoreFactory, statements},
    pipeline::{IngestOptions, fetch_songs, ingest_playlist},
    spotify::PlaylistSource,
    types::RawPlaylist,
};

type Log = Arc<Mutex<Vec<String>>>;

struct LoggingStore {
    log: Log,
    rows: Vec<Vec<GraphValue>>,
}

#[async_trait]
impl GraphStore for LoggingStore {
    async fn query(&mut self, statement: &str, _params: &Value) -> Result<QueryResult> {
        self.log.lock().unwrap().push(statement.to_string());
        Ok(QueryResult {
            rows: self.rows.clone(),
            ..QueryResult::default()
        })
    }
}

/// Hands out logging stores; the first `refuse` opens fail.
#[derive(Default)]
struct Stores {
    log: Log,
    refuse: usize,
    opened: AtomicUsize,
    rows: Vec<Vec<GraphValue>>,
}

#[async_trait]
impl StoreFactory for Stores {
    type Store = LoggingStore;

    async fn open(&self) -> Result<LoggingStore> {
        if self.opened.fetch_add(1, Ordering::SeqCst) < self.refuse {
            return Err(Error::StoreUnavailable("connection refused".to_string()));
        }
        Ok(LoggingStore {
            log: Arc::clone(&self.log),
            rows: self.rows.clone(),
        })
    }
}

struct StaticSource(Value);

#[async_trait]
impl PlaylistSource for StaticSource {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<RawPlaylist> {
        if self.0.is_null() {
            return Err(Error::NotFound(playlist_id.to_string()));
        }
        Ok(serde_json::from_value(self.0.clone())?)
    }
}

fn source() -> StaticSource {
    StaticSource(json!({
        "id": "p1",
        "name": "Mix",
        "tracks": {"items": [
            {"track": {"id": "t1", "name": "Song", "artists": [{"id": "a", "name": "A"}]}}
        ]}
    }))
}

#[tokio::test]
async fn test_unreachable_store_on_clear_only_warns() {
    let stores = Stores {
        refuse: 1,
        ..Stores::default()
    };

    let playlist = ingest_playlist(&source(), &stores, "p1", IngestOptions::default())
        .await
        .unwrap();

    assert_eq!(playlist.tracks().len(), 1);
    let log = stores.log.lock().unwrap();
    assert!(!log.contains(&statements::CLEAR.to_string()));
    assert_eq!(log.first().map(String::as_str), Some(statements::UPSERT_PLAYLIST));
}

#[tokio::test]
async fn test_clear_runs_before_save() {
    let stores = Stores::default();
    ingest_playlist(&source(), &stores, "p1", IngestOptions::default())
        .await
        .unwrap();

    let log = stores.log.lock().unwrap();
    assert_eq!(log[0], statements::CLEAR);
    assert_eq!(log.len(), 7);
}

#[tokio::test]
async fn test_keep_skips_clear() {
    let stores = Stores::default();
    ingest_playlist(&source(), &stores, "p1", IngestOptions { clear: false })
        .await
        .unwrap();

    assert!(!stores.log.lock().unwrap().contains(&statements::CLEAR.to_string()));
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let stores = Stores::default();
    let err = ingest_playlist(&StaticSource(Value::Null), &stores, "p1", IngestOptions { clear: false })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(stores.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_playlist_is_not_saved() {
    let stores = Stores::default();
    let empty = StaticSource(json!({"id": "p1", "tracks": {"items": []}}));
    let err = ingest_playlist(&empty, &stores, "p1", IngestOptions { clear: false })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyResult(_)));
    assert!(stores.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_with_store_down_fails() {
    let stores = Stores {
        refuse: usize::MAX,
        ..Stores::default()
    };
    let err = ingest_playlist(&source(), &stores, "p1", IngestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_songs_on_empty_graph() {
    let stores = Stores::default();
    let err = fetch_songs(&stores, None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResult(_)));
    assert_eq!(stores.log.lock().unwrap()[0], statements::ALL_SONGS);
}

#[tokio::test]
async fn test_fetch_songs_for_one_playlist() {
    let row = |id: &str, title: &str, artist_id: &str, artist: &str| {
        vec![
            GraphValue::Text(id.to_string()),
            GraphValue::Text(title.to_string()),
            GraphValue::Text(artist_id.to_string()),
            GraphValue::Text(artist.to_string()),
        ]
    };
    let stores = Stores {
        rows: vec![row("t1", "Song", "a", "A"), row("t1", "Song", "b", "B")],
        ..Stores::default()
    };

    let songs = fetch_songs(&stores, Some("p1")).await.unwrap();
    assert_eq!(songs, vec!["Song by A, B"]);
    assert_eq!(stores.log.lock().unwrap()[0], statements::SONGS_IN_PLAYLIST);
}
