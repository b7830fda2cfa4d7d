//! Core data models for the styleprint analysis engine
//!
//! These models keep JSON compatibility with the persisted record format:
//! nested fields are native structured types in memory and serialize as
//! JSON documents at the storage boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-post vocabulary summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyProfile {
    /// Number of distinct meaningful words (stop words and short tokens excluded)
    pub unique_word_count: usize,

    /// Total number of meaningful word occurrences
    pub total_meaningful_words: usize,

    /// Words that occur exactly once, in first-encounter order, capped at 10
    pub rare_words: Vec<String>,
}

/// A keyword and its occurrence count within one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Emotion indicator densities.
///
/// Each value is (matched words / total words) * 10. These are unnormalized
/// densities, not probabilities, and can exceed 1.0 for short, dense text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionIndicators {
    pub enthusiasm: f64,
    pub reflective: f64,
    pub critical: f64,
}

/// Structured features extracted from one blog post.
///
/// Produced by [`crate::analyzer::analyze_post`]; immutable once computed.
/// Re-analyzing a post replaces the stored bundle wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFeatureBundle {
    pub title: String,

    /// Total word tokens in the sanitized content
    pub word_count: usize,

    /// Characters in the raw content
    pub character_count: usize,

    /// Detected topics by descending relevance score, at most three
    pub detected_topics: Vec<String>,

    /// Best-scoring topic, or None when no keyword matched
    pub primary_topic: Option<String>,

    /// Primary topic score over the sum of all nonzero topic scores, in [0, 1]
    pub topic_confidence: f64,

    pub vocabulary: VocabularyProfile,

    /// Most frequent meaningful words, descending by count, at most twenty
    pub top_keywords: Vec<KeywordCount>,

    /// Distinct meaningful words over total meaningful words, in [0, 1]
    pub vocabulary_richness: f64,

    pub avg_sentence_length: f64,
    pub sentence_length_variance: f64,
    pub short_sentence_ratio: f64,
    pub long_sentence_ratio: f64,

    /// Punctuation rates per 1000 words
    pub exclamation_frequency: f64,
    pub question_frequency: f64,
    pub ellipsis_frequency: f64,
    pub dash_frequency: f64,

    /// Matched casual/formal marker strings, not deduplicated
    pub casual_markers: Vec<String>,
    pub formal_markers: Vec<String>,

    pub emotion_indicators: EmotionIndicators,

    pub uses_first_person: bool,
    pub uses_second_person: bool,

    pub paragraph_count: usize,
    pub avg_paragraph_length: f64,
}

/// Persisted analysis record: one feature bundle keyed by an opaque post id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAnalysis {
    /// Externally supplied post identifier
    pub post_id: String,

    /// When this analysis was computed
    pub analyzed_at: DateTime<Utc>,

    pub features: PostFeatureBundle,
}

impl PostAnalysis {
    /// Wrap a freshly computed feature bundle for persistence.
    pub fn new(post_id: String, features: PostFeatureBundle) -> Self {
        Self {
            post_id,
            analyzed_at: Utc::now(),
            features,
        }
    }
}

/// Scope discriminant for a persisted style marker set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeType {
    Global,
    TopicSpecific,
}

/// Lookup key for style marker sets: the whole corpus, or one topic's slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerScope {
    Global,
    Topic(String),
}

impl MarkerScope {
    pub fn scope_type(&self) -> ScopeType {
        match self {
            MarkerScope::Global => ScopeType::Global,
            MarkerScope::Topic(_) => ScopeType::TopicSpecific,
        }
    }

    pub fn topic_name(&self) -> Option<&str> {
        match self {
            MarkerScope::Global => None,
            MarkerScope::Topic(topic) => Some(topic),
        }
    }
}

impl std::fmt::Display for MarkerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerScope::Global => write!(f, "global"),
            MarkerScope::Topic(topic) => write!(f, "topic '{topic}'"),
        }
    }
}

/// Aggregated style markers for one scope.
///
/// Uniquely identified by `(scope_type, topic_name)`; recomputation
/// overwrites the stored record for that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMarkerSet {
    pub scope_type: ScopeType,

    /// None iff `scope_type` is `Global`
    pub topic_name: Option<String>,

    pub tone_description: String,
    pub vocabulary_description: String,
    pub sentence_style_description: String,
    pub punctuation_pattern: String,
    pub personality_traits: Vec<String>,

    pub avg_tone_score: f64,
    pub avg_sentence_length: f64,
    pub avg_vocabulary_richness: f64,
    pub avg_exclamation_freq: f64,
    pub avg_question_freq: f64,

    pub common_phrases: Vec<String>,
    pub characteristic_words: Vec<String>,

    pub posts_analyzed: usize,
    pub last_updated_at: DateTime<Utc>,
}

impl StyleMarkerSet {
    /// The scope key this set is stored under.
    pub fn scope(&self) -> MarkerScope {
        match &self.topic_name {
            None => MarkerScope::Global,
            Some(topic) => MarkerScope::Topic(topic.clone()),
        }
    }
}

/// Main record-store interface trait
///
/// Abstracts over storage backends. Injected explicitly into the aggregator
/// rather than resolved from process-wide state, which keeps tests on an
/// isolated store instance.
#[async_trait::async_trait]
pub trait StyleStore: Send + Sync {
    /// Persist an analysis, replacing any existing record with the same post id
    async fn store_analysis(&mut self, analysis: PostAnalysis) -> crate::Result<()>;

    /// Retrieve a single analysis by post id
    async fn get_analysis(&self, post_id: &str) -> crate::Result<Option<PostAnalysis>>;

    /// Get all persisted analyses (for global aggregation)
    async fn get_all_analyses(&self) -> crate::Result<Vec<PostAnalysis>>;

    /// Get the analyses whose primary topic matches `topic`
    async fn get_analyses_for_topic(&self, topic: &str) -> crate::Result<Vec<PostAnalysis>>;

    /// Persist a marker set, replacing any existing record for its scope key
    async fn upsert_style_markers(&mut self, markers: StyleMarkerSet) -> crate::Result<()>;

    /// Retrieve the current marker set for a scope, if one has been computed
    async fn get_style_markers(&self, scope: &MarkerScope) -> crate::Result<Option<StyleMarkerSet>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_bundle() -> PostFeatureBundle {
        PostFeatureBundle {
            title: "Test".to_string(),
            word_count: 0,
            character_count: 0,
            detected_topics: Vec::new(),
            primary_topic: None,
            topic_confidence: 0.0,
            vocabulary: VocabularyProfile {
                unique_word_count: 0,
                total_meaningful_words: 0,
                rare_words: Vec::new(),
            },
            top_keywords: Vec::new(),
            vocabulary_richness: 0.0,
            avg_sentence_length: 0.0,
            sentence_length_variance: 0.0,
            short_sentence_ratio: 0.0,
            long_sentence_ratio: 0.0,
            exclamation_frequency: 0.0,
            question_frequency: 0.0,
            ellipsis_frequency: 0.0,
            dash_frequency: 0.0,
            casual_markers: Vec::new(),
            formal_markers: Vec::new(),
            emotion_indicators: EmotionIndicators {
                enthusiasm: 0.0,
                reflective: 0.0,
                critical: 0.0,
            },
            uses_first_person: false,
            uses_second_person: false,
            paragraph_count: 0,
            avg_paragraph_length: 0.0,
        }
    }

    #[test]
    fn test_post_analysis_creation() {
        let analysis = PostAnalysis::new("post-42".to_string(), minimal_bundle());
        assert_eq!(analysis.post_id, "post-42");
        assert_eq!(analysis.features.title, "Test");
    }

    #[test]
    fn test_marker_scope_accessors() {
        assert_eq!(MarkerScope::Global.scope_type(), ScopeType::Global);
        assert_eq!(MarkerScope::Global.topic_name(), None);

        let scope = MarkerScope::Topic("music".to_string());
        assert_eq!(scope.scope_type(), ScopeType::TopicSpecific);
        assert_eq!(scope.topic_name(), Some("music"));
    }

    #[test]
    fn test_analysis_json_round_trip() {
        let analysis = PostAnalysis::new("post-1".to_string(), minimal_bundle());

        let json = serde_json::to_string_pretty(&analysis).unwrap();
        assert!(json.contains("\"post_id\""));
        assert!(json.contains("\"features\""));
        assert!(json.contains("\"vocabulary\""));

        let decoded: PostAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, analysis);
    }

    #[test]
    fn test_scope_type_serializes_kebab_case() {
        let json = serde_json::to_string(&ScopeType::TopicSpecific).unwrap();
        assert_eq!(json, "\"topic-specific\"");
        let json = serde_json::to_string(&ScopeType::Global).unwrap();
        assert_eq!(json, "\"global\"");
    }
}
