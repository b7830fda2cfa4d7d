//! Constants for the writing style analysis pipeline
//!
//! Thresholds and caps shared by the analyzer and the marker aggregator.
//! Persisted feature bundles were computed against these values, so changing
//! them invalidates stored analyses.

// Sentence structure

/// Sentences with fewer words than this count as "short".
pub const SHORT_SENTENCE_WORD_LIMIT: usize = 10;

/// Sentences with more words than this count as "long".
pub const LONG_SENTENCE_WORD_LIMIT: usize = 25;

// Vocabulary analysis

/// Tokens below this length are never counted as meaningful words.
pub const MIN_MEANINGFUL_WORD_LEN: usize = 3;

/// Maximum number of top keywords retained per post.
pub const TOP_KEYWORD_LIMIT: usize = 20;

/// Maximum number of rare words (frequency exactly one) retained per post.
pub const RARE_WORD_LIMIT: usize = 10;

// Punctuation analysis

/// Punctuation counts are normalized to occurrences per this many words.
pub const PUNCTUATION_RATE_BASE: f64 = 1000.0;

// Tone analysis

/// Emotion indicators are word densities scaled by this factor.
/// The result is not a probability and can exceed 1.0 for short, dense text.
pub const EMOTION_DENSITY_SCALE: f64 = 10.0;

// Topic classification

/// Maximum number of detected topics reported per post.
pub const DETECTED_TOPIC_LIMIT: usize = 3;

// Marker aggregation

/// Default minimum number of analyzed posts before markers are computed.
pub const DEFAULT_MIN_POSTS_REQUIRED: usize = 3;

/// Tone score used when no casual or formal markers were observed at all.
pub const NEUTRAL_TONE_SCORE: f64 = 0.5;

/// Maximum number of common phrases retained per marker set.
pub const COMMON_PHRASE_LIMIT: usize = 20;

/// Maximum number of characteristic words retained per marker set.
pub const CHARACTERISTIC_WORD_LIMIT: usize = 15;

/// How many of each bundle's top keywords feed the common-phrase tally.
pub const PHRASE_SOURCE_KEYWORDS: usize = 5;

/// How many of each bundle's top keywords feed the characteristic-word tally.
pub const WORD_SOURCE_KEYWORDS: usize = 10;

/// Minimum word length for characteristic words.
pub const CHARACTERISTIC_MIN_WORD_LEN: usize = 4;

// Description thresholds

/// Tone score bands, lowest first: below each bound the corresponding
/// phrase applies; above the last bound the most formal phrase applies.
pub const TONE_BAND_EXTREMELY_CASUAL: f64 = 0.30;
pub const TONE_BAND_CASUAL: f64 = 0.45;
pub const TONE_BAND_BALANCED: f64 = 0.60;
pub const TONE_BAND_POLISHED: f64 = 0.85;

/// First-person ratio above which the voice reads as personal.
pub const FIRST_PERSON_VOICE_RATIO: f64 = 0.7;

/// Second-person ratio above which the voice addresses the reader.
pub const SECOND_PERSON_VOICE_RATIO: f64 = 0.5;

/// Vocabulary richness bands.
pub const RICHNESS_BAND_LIMITED: f64 = 0.40;
pub const RICHNESS_BAND_MODERATE: f64 = 0.70;

/// Short-sentence ratio above which the style reads as punchy.
pub const SHORT_STYLE_RATIO: f64 = 0.5;

/// Long-sentence ratio above which the style reads as flowing.
pub const LONG_STYLE_RATIO: f64 = 0.3;

/// Average sentence length bounds for the concise/elaborate qualifiers.
pub const CONCISE_AVG_SENTENCE_WORDS: f64 = 12.0;
pub const ELABORATE_AVG_SENTENCE_WORDS: f64 = 18.0;

/// Exclamation rate (per 1000 words) thresholds.
pub const EXCLAMATION_ENTHUSIASTIC_RATE: f64 = 5.0;
pub const EXCLAMATION_OCCASIONAL_RATE: f64 = 2.0;

/// Question rate (per 1000 words) above which the writing engages readers.
pub const QUESTION_ENGAGED_RATE: f64 = 3.0;

/// Ellipsis rate (per 1000 words) above which trailing pauses are notable.
pub const ELLIPSIS_NOTABLE_RATE: f64 = 2.0;

/// Average emotion indicator above which the matching trait is reported.
pub const EMOTION_TRAIT_THRESHOLD: f64 = 0.8;
