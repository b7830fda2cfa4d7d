//! Style marker aggregation over persisted post analyses
//!
//! Reads the accumulated feature bundles from the record store, averages
//! them globally or per topic, renders deterministic natural-language
//! descriptions, and upserts the result keyed by scope. Recomputation is a
//! full overwrite, never an incremental merge.

use crate::analyzer::{round2, round4};
use crate::constants::{
    CHARACTERISTIC_MIN_WORD_LEN, CHARACTERISTIC_WORD_LIMIT, COMMON_PHRASE_LIMIT,
    CONCISE_AVG_SENTENCE_WORDS, ELABORATE_AVG_SENTENCE_WORDS, ELLIPSIS_NOTABLE_RATE,
    EMOTION_TRAIT_THRESHOLD, EXCLAMATION_ENTHUSIASTIC_RATE, EXCLAMATION_OCCASIONAL_RATE,
    FIRST_PERSON_VOICE_RATIO, LONG_STYLE_RATIO, NEUTRAL_TONE_SCORE, PHRASE_SOURCE_KEYWORDS,
    QUESTION_ENGAGED_RATE, RICHNESS_BAND_LIMITED, RICHNESS_BAND_MODERATE,
    SECOND_PERSON_VOICE_RATIO, SHORT_STYLE_RATIO, TONE_BAND_BALANCED, TONE_BAND_CASUAL,
    TONE_BAND_EXTREMELY_CASUAL, TONE_BAND_POLISHED, WORD_SOURCE_KEYWORDS,
};
use crate::models::{MarkerScope, PostAnalysis, PostFeatureBundle, StyleMarkerSet, StyleStore};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashMap;

/// Recomputes and persists style marker sets from stored analyses.
///
/// Holds an injected record store; performs no internal concurrency control.
/// Concurrent recomputation of the same scope key races at the store's
/// upsert granularity (last write wins).
pub struct StyleMarkerAggregator<S> {
    store: S,
}

impl<S: StyleStore> StyleMarkerAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the aggregator and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Recompute the corpus-wide marker set.
    ///
    /// Returns `Ok(None)` without touching the store when fewer than
    /// `min_posts` analyses exist. Callers must treat `None` as "skipped",
    /// not as a failure.
    pub async fn compute_global_style_markers(
        &mut self,
        min_posts: usize,
    ) -> crate::Result<Option<StyleMarkerSet>> {
        let analyses = self
            .store
            .get_all_analyses()
            .await
            .context("Failed to fetch analyses")?;

        self.compute_for_scope(MarkerScope::Global, analyses, min_posts)
            .await
    }

    /// Recompute the marker set for one topic's slice of the corpus.
    pub async fn compute_topic_style_markers(
        &mut self,
        topic: &str,
        min_posts: usize,
    ) -> crate::Result<Option<StyleMarkerSet>> {
        let analyses = self
            .store
            .get_analyses_for_topic(topic)
            .await
            .context("Failed to fetch analyses")?;

        self.compute_for_scope(MarkerScope::Topic(topic.to_string()), analyses, min_posts)
            .await
    }

    async fn compute_for_scope(
        &mut self,
        scope: MarkerScope,
        mut analyses: Vec<PostAnalysis>,
        min_posts: usize,
    ) -> crate::Result<Option<StyleMarkerSet>> {
        if analyses.len() < min_posts {
            tracing::debug!(
                "Skipping {} markers: {} of {} required posts",
                scope,
                analyses.len(),
                min_posts
            );
            return Ok(None);
        }

        // Stores may return records in arbitrary order; keyword tie-breaking
        // depends on encounter order, so fix it by post id.
        analyses.sort_by(|a, b| a.post_id.cmp(&b.post_id));

        let bundles: Vec<&PostFeatureBundle> = analyses.iter().map(|a| &a.features).collect();
        let markers = build_marker_set(&scope, &bundles);

        self.store
            .upsert_style_markers(markers.clone())
            .await
            .context("Failed to persist style markers")?;

        tracing::info!(
            "Updated {} markers from {} analyzed posts",
            scope,
            markers.posts_analyzed
        );
        Ok(Some(markers))
    }
}

struct AggregateStats {
    tone_score: f64,
    avg_sentence_length: f64,
    avg_richness: f64,
    avg_short_ratio: f64,
    avg_long_ratio: f64,
    avg_exclamation: f64,
    avg_question: f64,
    avg_ellipsis: f64,
    first_person_ratio: f64,
    second_person_ratio: f64,
    enthusiasm: f64,
    reflective: f64,
    critical: f64,
}

fn aggregate(bundles: &[&PostFeatureBundle]) -> AggregateStats {
    let n = bundles.len() as f64;
    let mean =
        |f: &dyn Fn(&PostFeatureBundle) -> f64| bundles.iter().map(|&b| f(b)).sum::<f64>() / n;

    // Marker instances are counted flattened across bundles, not deduplicated
    let formal: usize = bundles.iter().map(|b| b.formal_markers.len()).sum();
    let casual: usize = bundles.iter().map(|b| b.casual_markers.len()).sum();
    let tone_score = if formal + casual == 0 {
        NEUTRAL_TONE_SCORE
    } else {
        round2(formal as f64 / (formal + casual) as f64)
    };

    let first = bundles.iter().filter(|b| b.uses_first_person).count() as f64;
    let second = bundles.iter().filter(|b| b.uses_second_person).count() as f64;

    AggregateStats {
        tone_score,
        avg_sentence_length: round2(mean(&|b| b.avg_sentence_length)),
        avg_richness: round4(mean(&|b| b.vocabulary_richness)),
        avg_short_ratio: round2(mean(&|b| b.short_sentence_ratio)),
        avg_long_ratio: round2(mean(&|b| b.long_sentence_ratio)),
        avg_exclamation: round2(mean(&|b| b.exclamation_frequency)),
        avg_question: round2(mean(&|b| b.question_frequency)),
        avg_ellipsis: round2(mean(&|b| b.ellipsis_frequency)),
        first_person_ratio: first / n,
        second_person_ratio: second / n,
        enthusiasm: round2(mean(&|b| b.emotion_indicators.enthusiasm)),
        reflective: round2(mean(&|b| b.emotion_indicators.reflective)),
        critical: round2(mean(&|b| b.emotion_indicators.critical)),
    }
}

fn build_marker_set(scope: &MarkerScope, bundles: &[&PostFeatureBundle]) -> StyleMarkerSet {
    let stats = aggregate(bundles);

    StyleMarkerSet {
        scope_type: scope.scope_type(),
        topic_name: scope.topic_name().map(str::to_string),
        tone_description: describe_tone(&stats, scope),
        vocabulary_description: describe_vocabulary(&stats, scope),
        sentence_style_description: describe_sentence_style(&stats),
        punctuation_pattern: describe_punctuation(&stats),
        personality_traits: personality_traits(&stats, scope),
        avg_tone_score: stats.tone_score,
        avg_sentence_length: stats.avg_sentence_length,
        avg_vocabulary_richness: stats.avg_richness,
        avg_exclamation_freq: stats.avg_exclamation,
        avg_question_freq: stats.avg_question,
        common_phrases: rank_keywords(bundles, PHRASE_SOURCE_KEYWORDS, 0, COMMON_PHRASE_LIMIT),
        characteristic_words: rank_keywords(
            bundles,
            WORD_SOURCE_KEYWORDS,
            CHARACTERISTIC_MIN_WORD_LEN,
            CHARACTERISTIC_WORD_LIMIT,
        ),
        posts_analyzed: bundles.len(),
        last_updated_at: Utc::now(),
    }
}

fn topic_suffix(scope: &MarkerScope) -> String {
    match scope.topic_name() {
        Some(topic) => format!(" when writing about {topic}"),
        None => String::new(),
    }
}

fn describe_tone(stats: &AggregateStats, scope: &MarkerScope) -> String {
    let base = if stats.tone_score < TONE_BAND_EXTREMELY_CASUAL {
        "Extremely casual and conversational"
    } else if stats.tone_score < TONE_BAND_CASUAL {
        "Casual and friendly"
    } else if stats.tone_score < TONE_BAND_BALANCED {
        "Balanced, mixing casual warmth with polish"
    } else if stats.tone_score <= TONE_BAND_POLISHED {
        "Polished and articulate"
    } else {
        "Formal and sophisticated"
    };

    let mut description = String::from(base);
    if stats.first_person_ratio > FIRST_PERSON_VOICE_RATIO {
        description.push_str(", speaks from personal experience");
    }
    if stats.second_person_ratio > SECOND_PERSON_VOICE_RATIO {
        description.push_str(", directly addresses the reader");
    }
    description.push_str(&topic_suffix(scope));
    description
}

fn describe_vocabulary(stats: &AggregateStats, scope: &MarkerScope) -> String {
    let base = if stats.avg_richness < RICHNESS_BAND_LIMITED {
        "Relies on a familiar, repeated vocabulary"
    } else if stats.avg_richness < RICHNESS_BAND_MODERATE {
        "Uses a balanced vocabulary with moderate variety"
    } else {
        "Draws on a wide-ranging, varied vocabulary"
    };

    format!("{base}{}", topic_suffix(scope))
}

fn describe_sentence_style(stats: &AggregateStats) -> String {
    let base = if stats.avg_short_ratio > SHORT_STYLE_RATIO {
        "Favors short, punchy sentences"
    } else if stats.avg_long_ratio > LONG_STYLE_RATIO {
        "Leans into long, flowing sentences"
    } else {
        "Mixes sentence lengths freely"
    };

    if stats.avg_sentence_length < CONCISE_AVG_SENTENCE_WORDS {
        format!("{base}, concise overall")
    } else if stats.avg_sentence_length > ELABORATE_AVG_SENTENCE_WORDS {
        format!("{base}, elaborate overall")
    } else {
        base.to_string()
    }
}

fn describe_punctuation(stats: &AggregateStats) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if stats.avg_exclamation > EXCLAMATION_ENTHUSIASTIC_RATE {
        parts.push("enthusiastic exclamations");
    } else if stats.avg_exclamation > EXCLAMATION_OCCASIONAL_RATE {
        parts.push("occasional exclamations");
    }
    if stats.avg_question > QUESTION_ENGAGED_RATE {
        parts.push("engages readers with questions");
    }
    if stats.avg_ellipsis > ELLIPSIS_NOTABLE_RATE {
        parts.push("trails off with ellipses");
    }

    if parts.is_empty() {
        "Restrained, conventional punctuation".to_string()
    } else {
        parts.join(", ")
    }
}

fn personality_traits(stats: &AggregateStats, scope: &MarkerScope) -> Vec<String> {
    let mut traits: Vec<String> = Vec::new();

    if stats.enthusiasm > EMOTION_TRAIT_THRESHOLD {
        traits.push("energetic and expressive".to_string());
    }
    if stats.reflective > EMOTION_TRAIT_THRESHOLD {
        traits.push("thoughtful and introspective".to_string());
    }
    if stats.critical > EMOTION_TRAIT_THRESHOLD {
        traits.push("analytical with a critical eye".to_string());
    }
    if stats.first_person_ratio > FIRST_PERSON_VOICE_RATIO {
        traits.push("personal and self-revealing".to_string());
    }
    if stats.second_person_ratio > SECOND_PERSON_VOICE_RATIO {
        traits.push("reader-focused".to_string());
    }

    match scope.topic_name() {
        Some("music") => traits.push("deeply engaged with music and sound".to_string()),
        Some("personal") => traits.push("open about their own life".to_string()),
        _ => {}
    }

    if traits.is_empty() {
        traits.push("balanced and measured".to_string());
    }
    traits
}

/// Tally the leading top-keywords of every bundle and return the most
/// frequent ones, stable on ties by first encounter.
fn rank_keywords(
    bundles: &[&PostFeatureBundle],
    per_bundle: usize,
    min_word_len: usize,
    limit: usize,
) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for bundle in bundles {
        for keyword in bundle.top_keywords.iter().take(per_bundle) {
            if keyword.word.len() < min_word_len {
                continue;
            }
            let entry = counts.entry(keyword.word.as_str()).or_insert(0);
            if *entry == 0 {
                order.push(keyword.word.as_str());
            }
            *entry += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = order.iter().map(|w| (*w, counts[w])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}
