//! Styleprint: Writing Style Analysis Engine
//!
//! Analyzes blog post text into structured feature bundles and aggregates
//! them into corpus-level style markers used to drive caption generation.
//!
//! The analyzer is a pure, deterministic function; the aggregator composes
//! with it only through a persisted record store, so the two never call each
//! other directly.

pub mod analyzer;
pub mod constants;
pub mod lexicon;
pub mod markers;
pub mod models;
pub mod storage;

// Re-export main types for convenience
pub use analyzer::{analyze_post, AnalysisError};
pub use markers::StyleMarkerAggregator;
pub use models::{
    EmotionIndicators, KeywordCount, MarkerScope, PostAnalysis, PostFeatureBundle, ScopeType,
    StyleMarkerSet, StyleStore, VocabularyProfile,
};
pub use storage::{FileStore, StoreError};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
