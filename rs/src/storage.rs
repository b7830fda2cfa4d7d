//! File-based record store implementation
//!
//! Stores each analysis and each marker set as its own JSON document under a
//! base directory. Nested fields stay native structured types in memory;
//! JSON encoding happens only here, at the storage boundary.

use crate::models::{MarkerScope, PostAnalysis, StyleMarkerSet, StyleStore};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage directory error: {message}")]
    Directory { message: String },
}

/// File-based store
///
/// One JSON file per record: `analyses/<post_id>.json` for feature bundles,
/// `markers/global.json` and `markers/topic-<name>.json` for marker sets.
/// Both tables are cached in memory after the first read.
pub struct FileStore {
    analyses_dir: PathBuf,
    markers_dir: PathBuf,

    analyses: RwLock<HashMap<String, PostAnalysis>>,
    analyses_loaded: RwLock<bool>,

    markers: RwLock<HashMap<String, StyleMarkerSet>>,
    markers_loaded: RwLock<bool>,
}

impl FileStore {
    /// Create a store rooted at `base_dir`, creating subdirectories as needed.
    pub async fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let analyses_dir = base_dir.join("analyses");
        let markers_dir = base_dir.join("markers");

        for dir in [&analyses_dir, &markers_dir] {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
            let metadata = fs::metadata(dir).await?;
            if !metadata.is_dir() {
                return Err(StoreError::Directory {
                    message: format!("{} is not a directory", dir.display()),
                });
            }
        }

        Ok(Self {
            analyses_dir,
            markers_dir,
            analyses: RwLock::new(HashMap::new()),
            analyses_loaded: RwLock::new(false),
            markers: RwLock::new(HashMap::new()),
            markers_loaded: RwLock::new(false),
        })
    }

    fn analysis_path(&self, post_id: &str) -> PathBuf {
        self.analyses_dir.join(format!("{post_id}.json"))
    }

    fn marker_path(scope: &MarkerScope) -> String {
        match scope {
            MarkerScope::Global => "global.json".to_string(),
            MarkerScope::Topic(topic) => format!("topic-{topic}.json"),
        }
    }

    async fn ensure_analyses_loaded(&self) -> Result<(), StoreError> {
        if *self.analyses_loaded.read().await {
            return Ok(());
        }

        let mut cache = self.analyses.write().await;
        let mut loaded_guard = self.analyses_loaded.write().await;

        // Double-check in case another task loaded while we were waiting
        if *loaded_guard {
            return Ok(());
        }

        tracing::info!("Loading analyses from {}", self.analyses_dir.display());
        let mut entries = fs::read_dir(&self.analyses_dir).await?;
        let mut loaded_count = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::load_json::<PostAnalysis>(&path).await {
                Ok(analysis) => {
                    cache.insert(analysis.post_id.clone(), analysis);
                    loaded_count += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to load analysis from {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!("Loaded {} analyses", loaded_count);
        *loaded_guard = true;
        Ok(())
    }

    async fn ensure_markers_loaded(&self) -> Result<(), StoreError> {
        if *self.markers_loaded.read().await {
            return Ok(());
        }

        let mut cache = self.markers.write().await;
        let mut loaded_guard = self.markers_loaded.write().await;

        if *loaded_guard {
            return Ok(());
        }

        let mut entries = fs::read_dir(&self.markers_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::load_json::<StyleMarkerSet>(&path).await {
                Ok(markers) => {
                    cache.insert(Self::marker_path(&markers.scope()), markers);
                }
                Err(e) => {
                    tracing::warn!("Failed to load markers from {}: {}", path.display(), e);
                }
            }
        }

        *loaded_guard = true;
        Ok(())
    }

    async fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl StyleStore for FileStore {
    async fn store_analysis(&mut self, analysis: PostAnalysis) -> crate::Result<()> {
        Self::save_json(&self.analysis_path(&analysis.post_id), &analysis)
            .await
            .context("Failed to save analysis to file")?;

        self.ensure_analyses_loaded().await?;
        let mut cache = self.analyses.write().await;
        cache.insert(analysis.post_id.clone(), analysis);

        Ok(())
    }

    async fn get_analysis(&self, post_id: &str) -> crate::Result<Option<PostAnalysis>> {
        self.ensure_analyses_loaded().await?;
        let cache = self.analyses.read().await;
        Ok(cache.get(post_id).cloned())
    }

    async fn get_all_analyses(&self) -> crate::Result<Vec<PostAnalysis>> {
        self.ensure_analyses_loaded().await?;
        let cache = self.analyses.read().await;
        Ok(cache.values().cloned().collect())
    }

    async fn get_analyses_for_topic(&self, topic: &str) -> crate::Result<Vec<PostAnalysis>> {
        self.ensure_analyses_loaded().await?;
        let cache = self.analyses.read().await;
        Ok(cache
            .values()
            .filter(|a| a.features.primary_topic.as_deref() == Some(topic))
            .cloned()
            .collect())
    }

    async fn upsert_style_markers(&mut self, markers: StyleMarkerSet) -> crate::Result<()> {
        let key = Self::marker_path(&markers.scope());
        Self::save_json(&self.markers_dir.join(&key), &markers)
            .await
            .context("Failed to save style markers to file")?;

        self.ensure_markers_loaded().await?;
        let mut cache = self.markers.write().await;
        cache.insert(key, markers);

        Ok(())
    }

    async fn get_style_markers(&self, scope: &MarkerScope) -> crate::Result<Option<StyleMarkerSet>> {
        self.ensure_markers_loaded().await?;
        let cache = self.markers.read().await;
        Ok(cache.get(&Self::marker_path(scope)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_post;
    use crate::models::{ScopeType, StyleMarkerSet};
    use chrono::Utc;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).await.unwrap();
        (store, temp_dir)
    }

    fn analysis(post_id: &str, content: &str, title: &str) -> PostAnalysis {
        PostAnalysis::new(post_id.to_string(), analyze_post(content, title).unwrap())
    }

    fn marker_set(scope: &MarkerScope) -> StyleMarkerSet {
        StyleMarkerSet {
            scope_type: scope.scope_type(),
            topic_name: scope.topic_name().map(str::to_string),
            tone_description: "Casual and friendly".to_string(),
            vocabulary_description: "Uses a balanced vocabulary".to_string(),
            sentence_style_description: "Mixes sentence lengths freely".to_string(),
            punctuation_pattern: "Restrained, conventional punctuation".to_string(),
            personality_traits: vec!["balanced and measured".to_string()],
            avg_tone_score: 0.5,
            avg_sentence_length: 12.0,
            avg_vocabulary_richness: 0.7,
            avg_exclamation_freq: 1.0,
            avg_question_freq: 0.5,
            common_phrases: vec!["melody".to_string()],
            characteristic_words: vec!["melody".to_string()],
            posts_analyzed: 3,
            last_updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).await;
        assert!(store.is_ok());
    }

    #[tokio::test]
    async fn test_store_and_retrieve_analysis() {
        let (mut store, _temp_dir) = create_test_store().await;

        let record = analysis("post-1", "The new album has a great beat.", "Album notes");
        store.store_analysis(record.clone()).await.unwrap();

        let retrieved = store.get_analysis("post-1").await.unwrap();
        assert_eq!(retrieved, Some(record));
    }

    #[tokio::test]
    async fn test_reanalysis_replaces_wholesale() {
        let (mut store, _temp_dir) = create_test_store().await;

        store
            .store_analysis(analysis("post-1", "First draft text here.", "Draft"))
            .await
            .unwrap();
        store
            .store_analysis(analysis("post-1", "Second draft, fully rewritten.", "Draft"))
            .await
            .unwrap();

        let all = store.get_all_analyses().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].features.character_count, "Second draft, fully rewritten.".len());
    }

    #[tokio::test]
    async fn test_topic_filter() {
        let (mut store, _temp_dir) = create_test_store().await;

        store
            .store_analysis(analysis(
                "music-1",
                "The album track has a strong beat and melody.",
                "Song",
            ))
            .await
            .unwrap();
        store
            .store_analysis(analysis(
                "tech-1",
                "The software platform ships a new app and digital tool.",
                "Tech",
            ))
            .await
            .unwrap();

        let music = store.get_analyses_for_topic("music").await.unwrap();
        assert_eq!(music.len(), 1);
        assert_eq!(music[0].post_id, "music-1");

        let culture = store.get_analyses_for_topic("culture").await.unwrap();
        assert!(culture.is_empty());
    }

    #[tokio::test]
    async fn test_marker_upsert_overwrites() {
        let (mut store, _temp_dir) = create_test_store().await;
        let scope = MarkerScope::Global;

        let mut first = marker_set(&scope);
        first.posts_analyzed = 3;
        store.upsert_style_markers(first).await.unwrap();

        let mut second = marker_set(&scope);
        second.posts_analyzed = 5;
        store.upsert_style_markers(second).await.unwrap();

        let current = store.get_style_markers(&scope).await.unwrap().unwrap();
        assert_eq!(current.posts_analyzed, 5);
        assert_eq!(current.scope_type, ScopeType::Global);
    }

    #[tokio::test]
    async fn test_topic_markers_keyed_separately() {
        let (mut store, _temp_dir) = create_test_store().await;

        store
            .upsert_style_markers(marker_set(&MarkerScope::Global))
            .await
            .unwrap();
        store
            .upsert_style_markers(marker_set(&MarkerScope::Topic("music".to_string())))
            .await
            .unwrap();

        let global = store.get_style_markers(&MarkerScope::Global).await.unwrap();
        let music = store
            .get_style_markers(&MarkerScope::Topic("music".to_string()))
            .await
            .unwrap();
        assert!(global.is_some());
        assert!(music.is_some());
        assert_eq!(music.unwrap().topic_name.as_deref(), Some("music"));
    }

    #[tokio::test]
    async fn test_file_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let record = analysis("post-9", "The album track has a strong beat.", "Persisted");

        {
            let mut store = FileStore::new(temp_dir.path()).await.unwrap();
            store.store_analysis(record.clone()).await.unwrap();
            store
                .upsert_style_markers(marker_set(&MarkerScope::Global))
                .await
                .unwrap();
        }

        {
            let store = FileStore::new(temp_dir.path()).await.unwrap();
            let retrieved = store.get_analysis("post-9").await.unwrap();
            assert_eq!(retrieved, Some(record));

            let markers = store.get_style_markers(&MarkerScope::Global).await.unwrap();
            assert!(markers.is_some());
        }
    }

    #[tokio::test]
    async fn test_missing_records_return_none() {
        let (store, _temp_dir) = create_test_store().await;

        assert!(store.get_analysis("missing").await.unwrap().is_none());
        assert!(store
            .get_style_markers(&MarkerScope::Topic("music".to_string()))
            .await
            .unwrap()
            .is_none());
    }
}
