use std::time::{Duration, Instant};

use async_trait::async_trait;
use spotgraph::{
    Error, Result,
    export::{SongSink, create_and_export, export_songs},
};

/// Sink answering searches from a fixed script.
#[derive(Default)]
struct FakeSink {
    /// query -> outcome; missing queries have no match
    known: Vec<(String, Result<Option<String>>)>,
    searches: Vec<(String, Instant)>,
    inserted: Vec<(String, String)>,
    created: Vec<String>,
}

impl FakeSink {
    fn with(mut self, query: &str, outcome: Result<Option<String>>) -> Self {
        self.known.push((query.to_string(), outcome));
        self
    }
}

#[async_trait]
impl SongSink for FakeSink {
    async fn create_playlist(&mut self, name: &str) -> Result<String> {
        self.created.push(name.to_string());
        Ok(format!("PL{}", self.created.len()))
    }

    async fn search_song(&mut self, query: &str) -> Result<Option<String>> {
        self.searches.push((query.to_string(), Instant::now()));
        match self.known.iter().position(|(q, _)| q == query) {
            Some(i) => self.known.remove(i).1,
            None => Ok(None),
        }
    }

    async fn insert_item(&mut self, playlist_id: &str, video_id: &str) -> Result<()> {
        self.inserted.push((playlist_id.to_string(), video_id.to_string()));
        Ok(())
    }
}

fn songs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_unmatched_song_is_skipped() {
    let mut sink = FakeSink::default().with("X", Ok(Some("vidX".to_string())));
    let interval = Duration::from_millis(20);

    let start = Instant::now();
    let report = export_songs(&mut sink, "PL", &songs(&["X", "Y"]), interval).await;

    assert_eq!(report.added, vec!["X"]);
    assert_eq!(report.skipped, vec!["Y"]);
    assert!(report.is_complete());
    assert_eq!(sink.inserted, vec![("PL".to_string(), "vidX".to_string())]);
    assert!(start.elapsed() >= interval);
}

#[tokio::test]
async fn test_songs_are_spaced_by_interval() {
    let mut sink = FakeSink::default();
    let interval = Duration::from_millis(15);

    export_songs(&mut sink, "PL", &songs(&["A", "B", "C"]), interval).await;

    assert_eq!(sink.searches.len(), 3);
    for pair in sink.searches.windows(2) {
        assert!(pair[1].1.duration_since(pair[0].1) >= interval);
    }
}

#[tokio::test]
async fn test_quota_stops_export() {
    let mut sink = FakeSink::default()
        .with("A", Ok(Some("vidA".to_string())))
        .with("B", Err(Error::QuotaExceeded("quotaExceeded".to_string())))
        .with("C", Ok(Some("vidC".to_string())));

    let report = export_songs(&mut sink, "PL", &songs(&["A", "B", "C"]), Duration::ZERO).await;

    assert_eq!(report.added, vec!["A"]);
    assert!(report.quota_exceeded);
    assert_eq!(report.unprocessed, vec!["B", "C"]);
    assert!(!report.is_complete());
    assert_eq!(sink.searches.len(), 2);
}

#[tokio::test]
async fn test_transient_error_is_recorded_and_loop_continues() {
    let mut sink = FakeSink::default()
        .with("A", Err(Error::NotFound("backend hiccup".to_string())))
        .with("B", Ok(Some("vidB".to_string())));

    let report = export_songs(&mut sink, "PL", &songs(&["A", "B"]), Duration::ZERO).await;

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "A");
    assert_eq!(report.added, vec!["B"]);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_create_and_export_targets_new_playlist() {
    let mut sink = FakeSink::default().with("Song by A", Ok(Some("v1".to_string())));

    let (playlist_id, report) =
        create_and_export(&mut sink, "Road Trip", &songs(&["Song by A"]), Duration::ZERO)
            .await
            .unwrap();

    assert_eq!(playlist_id, "PL1");
    assert_eq!(sink.created, vec!["Road Trip"]);
    assert_eq!(sink.inserted, vec![("PL1".to_string(), "v1".to_string())]);
    assert_eq!(report.added.len(), 1);
}

#[tokio::test]
async fn test_empty_song_list_creates_empty_playlist() {
    let mut sink = FakeSink::default();
    let (_, report) = create_and_export(&mut sink, "Nothing", &[], Duration::from_secs(5))
        .await
        .unwrap();
    assert!(report.added.is_empty());
    assert!(sink.searches.is_empty());
}
