//! Integration tests for the styleprint analysis engine
//!
//! These tests exercise the full pipeline: analyze raw posts, persist the
//! feature bundles through the file store, recompute style markers, and read
//! them back. No external services are required.

use styleprint::{
    analyze_post, FileStore, MarkerScope, PostAnalysis, ScopeType, StyleMarkerAggregator,
    StyleStore,
};
use tempfile::TempDir;

const MUSIC_POSTS: &[(&str, &str, &str)] = &[
    (
        "post-1",
        "Late Night Listening",
        "I love this album! The beat is incredible and the melody stays with you. \
         Honestly the best record of the year.",
    ),
    (
        "post-2",
        "On Repeat",
        "This track has been on my playlist all week. The lyrics are amazing and \
         the sound is huge. You should listen to it today!",
    ),
    (
        "post-3",
        "Vinyl Morning",
        "Spinning vinyl this morning. The band leans into a slower rhythm, and \
         the artist lets every song breathe. Beautiful music for a quiet day.",
    ),
];

async fn seeded_store(temp_dir: &TempDir) -> FileStore {
    let mut store = FileStore::new(temp_dir.path()).await.unwrap();
    for (id, title, content) in MUSIC_POSTS {
        let features = analyze_post(content, title).unwrap();
        store
            .store_analysis(PostAnalysis::new(id.to_string(), features))
            .await
            .unwrap();
    }
    store
}

/// Analyze, persist, aggregate, and read back global markers.
#[tokio::test]
async fn test_full_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir).await;
    let mut aggregator = StyleMarkerAggregator::new(store);

    let markers = aggregator
        .compute_global_style_markers(3)
        .await
        .unwrap()
        .expect("three posts should be enough");

    assert_eq!(markers.scope_type, ScopeType::Global);
    assert_eq!(markers.topic_name, None);
    assert_eq!(markers.posts_analyzed, 3);
    assert!(markers.avg_tone_score >= 0.0 && markers.avg_tone_score <= 1.0);
    assert!(markers.avg_sentence_length > 0.0);
    assert!(!markers.tone_description.is_empty());
    assert!(!markers.personality_traits.is_empty());

    // The persisted record matches the returned one
    let stored = aggregator
        .store()
        .get_style_markers(&MarkerScope::Global)
        .await
        .unwrap()
        .expect("markers should be persisted");
    assert_eq!(stored, markers);
}

/// Topic-scoped markers only consider posts with that primary topic.
#[tokio::test]
async fn test_topic_scoped_markers() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir).await;

    // All three seed posts classify as music
    for (id, _, _) in MUSIC_POSTS {
        let analysis = store.get_analysis(id).await.unwrap().unwrap();
        assert_eq!(analysis.features.primary_topic.as_deref(), Some("music"));
    }

    let mut aggregator = StyleMarkerAggregator::new(store);
    let markers = aggregator
        .compute_topic_style_markers("music", 3)
        .await
        .unwrap()
        .expect("three music posts should be enough");

    assert_eq!(markers.scope_type, ScopeType::TopicSpecific);
    assert_eq!(markers.topic_name.as_deref(), Some("music"));
    assert_eq!(markers.posts_analyzed, 3);
    assert!(markers
        .personality_traits
        .contains(&"deeply engaged with music and sound".to_string()));
}

/// Below the minimum post count the aggregator returns None and writes nothing.
#[tokio::test]
async fn test_min_posts_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path()).await.unwrap();

    // Two of the three required posts
    for (id, title, content) in &MUSIC_POSTS[..2] {
        let features = analyze_post(content, title).unwrap();
        store
            .store_analysis(PostAnalysis::new(id.to_string(), features))
            .await
            .unwrap();
    }

    let mut aggregator = StyleMarkerAggregator::new(store);
    let result = aggregator
        .compute_topic_style_markers("music", 3)
        .await
        .unwrap();
    assert!(result.is_none());

    let stored = aggregator
        .store()
        .get_style_markers(&MarkerScope::Topic("music".to_string()))
        .await
        .unwrap();
    assert!(stored.is_none(), "a skipped computation must not persist");

    // One more post flips the result to a populated set
    let (id, title, content) = &MUSIC_POSTS[2];
    let features = analyze_post(content, title).unwrap();
    let mut store = aggregator.into_store();
    store
        .store_analysis(PostAnalysis::new(id.to_string(), features))
        .await
        .unwrap();

    let mut aggregator = StyleMarkerAggregator::new(store);
    let markers = aggregator
        .compute_topic_style_markers("music", 3)
        .await
        .unwrap();
    assert!(markers.is_some());
    assert_eq!(markers.unwrap().posts_analyzed, 3);
}

/// Re-running with no new posts yields an equal set except for the timestamp.
#[tokio::test]
async fn test_recomputation_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir).await;
    let mut aggregator = StyleMarkerAggregator::new(store);

    let first = aggregator
        .compute_global_style_markers(3)
        .await
        .unwrap()
        .unwrap();
    let mut second = aggregator
        .compute_global_style_markers(3)
        .await
        .unwrap()
        .unwrap();

    second.last_updated_at = first.last_updated_at;
    assert_eq!(first, second);

    // Still exactly one global record
    let stored = aggregator
        .store()
        .get_style_markers(&MarkerScope::Global)
        .await
        .unwrap();
    assert!(stored.is_some());
}

/// Persisted analyses survive a fresh store instance over the same directory.
#[tokio::test]
async fn test_analysis_round_trip_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let original = {
        let mut store = FileStore::new(temp_dir.path()).await.unwrap();
        let features = analyze_post(
            "I love this album! The beat is incredible.",
            "New Release Review",
        )
        .unwrap();
        let analysis = PostAnalysis::new("round-trip".to_string(), features);
        store.store_analysis(analysis.clone()).await.unwrap();
        analysis
    };

    let store = FileStore::new(temp_dir.path()).await.unwrap();
    let retrieved = store.get_analysis("round-trip").await.unwrap();
    assert_eq!(retrieved, Some(original));
}

/// Per-post error handling: one invalid post does not abort a batch.
#[tokio::test]
async fn test_batch_continues_past_invalid_post() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path()).await.unwrap();

    let batch = [
        ("ok-1", "Title", "The album has a great beat."),
        ("bad-1", "Empty", ""),
        ("ok-2", "Title", "Another track with a fine melody."),
    ];

    let mut analyzed = 0;
    let mut skipped = 0;
    for (id, title, content) in batch {
        match analyze_post(content, title) {
            Ok(features) => {
                store
                    .store_analysis(PostAnalysis::new(id.to_string(), features))
                    .await
                    .unwrap();
                analyzed += 1;
            }
            Err(_) => skipped += 1,
        }
    }

    assert_eq!(analyzed, 2);
    assert_eq!(skipped, 1);
    assert_eq!(store.get_all_analyses().await.unwrap().len(), 2);
}

/// Growing the corpus monotonically updates the stored marker set.
#[tokio::test]
async fn test_recomputation_tracks_corpus_growth() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir).await;
    let mut aggregator = StyleMarkerAggregator::new(store);

    let first = aggregator
        .compute_global_style_markers(3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.posts_analyzed, 3);

    let mut store = aggregator.into_store();
    let features = analyze_post(
        "A fourth post about a new song and its chorus. However, the mix is uneven.",
        "Fourth",
    )
    .unwrap();
    store
        .store_analysis(PostAnalysis::new("post-4".to_string(), features))
        .await
        .unwrap();

    let mut aggregator = StyleMarkerAggregator::new(store);
    let second = aggregator
        .compute_global_style_markers(3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.posts_analyzed, 4);
}
