//! Post analyzer: deterministic feature extraction from blog post text
//!
//! The pipeline is fully synchronous, CPU-bound string processing with no
//! suspension points, so it is safe to run concurrently across posts. The
//! same `(content, title)` pair always yields a byte-identical bundle.

use crate::constants::{
    DETECTED_TOPIC_LIMIT, EMOTION_DENSITY_SCALE, LONG_SENTENCE_WORD_LIMIT,
    MIN_MEANINGFUL_WORD_LEN, PUNCTUATION_RATE_BASE, RARE_WORD_LIMIT,
    SHORT_SENTENCE_WORD_LIMIT, TOP_KEYWORD_LIMIT,
};
use crate::lexicon::{
    CASUAL_MARKERS, CRITICAL_WORDS, ENTHUSIASM_WORDS, FIRST_PERSON_PRONOUNS, FORMAL_MARKERS,
    REFLECTIVE_WORDS, SECOND_PERSON_PRONOUNS, STOP_WORDS, TOPIC_TAXONOMY,
};
use crate::models::{EmotionIndicators, KeywordCount, PostFeatureBundle, VocabularyProfile};
use std::collections::HashMap;
use thiserror::Error;

/// Analyzer-specific errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("post content must be a non-empty string")]
    InvalidInput,
}

/// Analyze one post and return its feature bundle.
///
/// Errors with [`AnalysisError::InvalidInput`] only when `content` is empty;
/// degenerate but non-empty content (a single word, punctuation soup) yields
/// a zeroed-out bundle instead of an error.
pub fn analyze_post(content: &str, title: &str) -> Result<PostFeatureBundle, AnalysisError> {
    if content.is_empty() {
        return Err(AnalysisError::InvalidInput);
    }

    let sanitized = sanitize(content);
    let words = tokenize(&sanitized);

    // Single-word fragments are not sentences
    let sentences = if words.len() < 2 {
        Vec::new()
    } else {
        split_sentences(&sanitized)
    };

    let structure = sentence_structure(&sentences);
    let vocabulary = analyze_vocabulary(&words);
    let punctuation = analyze_punctuation(&sanitized, words.len());
    let tone = analyze_tone(content, &words);
    let topics = classify_topics(title, content);
    let paragraphs = analyze_paragraphs(&sanitized);

    Ok(PostFeatureBundle {
        title: title.to_string(),
        word_count: words.len(),
        character_count: content.chars().count(),
        detected_topics: topics.detected,
        primary_topic: topics.primary,
        topic_confidence: topics.confidence,
        vocabulary: vocabulary.profile,
        top_keywords: vocabulary.top_keywords,
        vocabulary_richness: vocabulary.richness,
        avg_sentence_length: structure.avg_length,
        sentence_length_variance: structure.variance,
        short_sentence_ratio: structure.short_ratio,
        long_sentence_ratio: structure.long_ratio,
        exclamation_frequency: punctuation.exclamation,
        question_frequency: punctuation.question,
        ellipsis_frequency: punctuation.ellipsis,
        dash_frequency: punctuation.dash,
        casual_markers: tone.casual_markers,
        formal_markers: tone.formal_markers,
        emotion_indicators: tone.emotion,
        uses_first_person: tone.first_person,
        uses_second_person: tone.second_person,
        paragraph_count: paragraphs.count,
        avg_paragraph_length: paragraphs.avg_length,
    })
}

/// Round to two decimal places (the precision of stored metrics).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to four decimal places (used for vocabulary richness).
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Strip markup tags and HTML entities, then normalize whitespace.
///
/// Runs of horizontal whitespace collapse to a single space; runs of blank
/// lines collapse to one blank line so paragraph boundaries survive.
fn sanitize(content: &str) -> String {
    collapse_whitespace(&strip_markup(content))
}

fn strip_markup(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '<' => {
                // Skip to the closing '>'; an unterminated tag swallows the rest
                while i < chars.len() && chars[i] != '>' {
                    i += 1;
                }
                i += 1;
                out.push(' ');
            }
            '&' => {
                // Entity forms: &name; and &#nnn;
                let mut j = i + 1;
                while j < chars.len()
                    && j - i <= 10
                    && (chars[j].is_ascii_alphanumeric() || chars[j] == '#')
                {
                    j += 1;
                }
                if j > i + 1 && j < chars.len() && chars[j] == ';' {
                    out.push(' ');
                    i = j + 1;
                } else {
                    out.push('&');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_newlines = 0usize;
    let mut pending_space = false;

    for c in text.chars() {
        if c == '\n' {
            pending_newlines += 1;
            pending_space = false;
        } else if c.is_whitespace() {
            if pending_newlines == 0 {
                pending_space = true;
            }
        } else {
            if !out.is_empty() {
                if pending_newlines >= 2 {
                    out.push_str("\n\n");
                } else if pending_newlines == 1 {
                    out.push('\n');
                } else if pending_space {
                    out.push(' ');
                }
            }
            pending_newlines = 0;
            pending_space = false;
            out.push(c);
        }
    }

    out
}

/// Split text into sentences on runs of `.`, `!`, `?` followed by whitespace.
///
/// Terminator runs not followed by whitespace ("3.5", "v1.2") do not split.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            // Consume the rest of the terminator run
            while matches!(chars.peek(), Some('.' | '!' | '?')) {
                chars.next();
            }
            if chars.peek().map_or(true, |n| n.is_whitespace()) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            } else {
                current.push(c);
            }
        } else {
            current.push(c);
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// Lowercase and split into word tokens.
///
/// Any character outside `[a-z0-9'-]` becomes a space before splitting.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '\'' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

struct SentenceStats {
    avg_length: f64,
    variance: f64,
    short_ratio: f64,
    long_ratio: f64,
}

fn sentence_structure(sentences: &[String]) -> SentenceStats {
    if sentences.is_empty() {
        return SentenceStats {
            avg_length: 0.0,
            variance: 0.0,
            short_ratio: 0.0,
            long_ratio: 0.0,
        };
    }

    let counts: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    // Population variance, not sample variance
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    let short = counts
        .iter()
        .filter(|&&c| c < SHORT_SENTENCE_WORD_LIMIT as f64)
        .count() as f64;
    let long = counts
        .iter()
        .filter(|&&c| c > LONG_SENTENCE_WORD_LIMIT as f64)
        .count() as f64;

    SentenceStats {
        avg_length: round2(mean),
        variance: round2(variance),
        short_ratio: round2(short / n),
        long_ratio: round2(long / n),
    }
}

struct VocabStats {
    profile: VocabularyProfile,
    top_keywords: Vec<KeywordCount>,
    richness: f64,
}

fn is_meaningful(word: &str) -> bool {
    word.len() >= MIN_MEANINGFUL_WORD_LEN && !STOP_WORDS.contains(&word)
}

fn analyze_vocabulary(words: &[String]) -> VocabStats {
    // First-encounter order is preserved so equal counts sort stably
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for word in words {
        if !is_meaningful(word) {
            continue;
        }
        let entry = counts.entry(word.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(word.as_str());
        }
        *entry += 1;
        total += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.iter().map(|w| (*w, counts[w])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_keywords = ranked
        .iter()
        .take(TOP_KEYWORD_LIMIT)
        .map(|(word, count)| KeywordCount {
            word: word.to_string(),
            count: *count,
        })
        .collect();

    let rare_words: Vec<String> = order
        .iter()
        .filter(|w| counts[*w] == 1)
        .take(RARE_WORD_LIMIT)
        .map(|w| w.to_string())
        .collect();

    let unique = order.len();
    let richness = if total == 0 {
        0.0
    } else {
        round4(unique as f64 / total as f64)
    };

    VocabStats {
        profile: VocabularyProfile {
            unique_word_count: unique,
            total_meaningful_words: total,
            rare_words,
        },
        top_keywords,
        richness,
    }
}

struct PunctuationStats {
    exclamation: f64,
    question: f64,
    ellipsis: f64,
    dash: f64,
}

fn analyze_punctuation(sanitized: &str, word_count: usize) -> PunctuationStats {
    let chars: Vec<char> = sanitized.chars().collect();
    let mut exclamations = 0usize;
    let mut questions = 0usize;
    let mut ellipses = 0usize;
    let mut dashes = 0usize;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '!' => {
                exclamations += 1;
                i += 1;
            }
            '?' => {
                questions += 1;
                i += 1;
            }
            '.' => {
                let mut j = i;
                while j < chars.len() && chars[j] == '.' {
                    j += 1;
                }
                if j - i >= 3 {
                    ellipses += 1;
                }
                i = j;
            }
            '\u{2014}' => {
                dashes += 1;
                i += 1;
            }
            '-' => {
                if chars.get(i + 1) == Some(&'-') {
                    dashes += 1;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    let rate = |count: usize| {
        if word_count == 0 {
            0.0
        } else {
            round2(count as f64 * (PUNCTUATION_RATE_BASE / word_count as f64))
        }
    };

    PunctuationStats {
        exclamation: rate(exclamations),
        question: rate(questions),
        ellipsis: rate(ellipses),
        dash: rate(dashes),
    }
}

struct ToneStats {
    casual_markers: Vec<String>,
    formal_markers: Vec<String>,
    emotion: EmotionIndicators,
    first_person: bool,
    second_person: bool,
}

fn analyze_tone(raw_content: &str, words: &[String]) -> ToneStats {
    let lowered = raw_content.to_lowercase();
    let padded = format!(" {lowered} ");

    // A marker hits as a whole word token or as a space-delimited substring
    // of the raw content; the latter is what catches multi-word markers.
    let collect_markers = |markers: &[&str]| -> Vec<String> {
        markers
            .iter()
            .filter(|marker| {
                words.iter().any(|w| w == *marker)
                    || padded.contains(&format!(" {marker} "))
            })
            .map(|marker| marker.to_string())
            .collect()
    };

    let density = |list: &[&str]| {
        if words.is_empty() {
            0.0
        } else {
            let matched = words.iter().filter(|w| list.contains(&w.as_str())).count();
            round2(matched as f64 / words.len() as f64 * EMOTION_DENSITY_SCALE)
        }
    };

    ToneStats {
        casual_markers: collect_markers(CASUAL_MARKERS),
        formal_markers: collect_markers(FORMAL_MARKERS),
        emotion: EmotionIndicators {
            enthusiasm: density(ENTHUSIASM_WORDS),
            reflective: density(REFLECTIVE_WORDS),
            critical: density(CRITICAL_WORDS),
        },
        first_person: words
            .iter()
            .any(|w| FIRST_PERSON_PRONOUNS.contains(&w.as_str())),
        second_person: words
            .iter()
            .any(|w| SECOND_PERSON_PRONOUNS.contains(&w.as_str())),
    }
}

struct TopicResult {
    detected: Vec<String>,
    primary: Option<String>,
    confidence: f64,
}

/// Score the fixed taxonomy against title + content tokens.
///
/// A token scores for every keyword it contains as a substring, which lets
/// "albums" hit "album" but also lets short keywords over-match. Stable sort
/// means taxonomy declaration order breaks score ties.
fn classify_topics(title: &str, content: &str) -> TopicResult {
    let tokens = tokenize(&format!("{title} {content}"));

    let mut scored: Vec<(&str, usize)> = Vec::new();
    for (topic, keywords) in TOPIC_TAXONOMY {
        let score: usize = keywords
            .iter()
            .map(|kw| tokens.iter().filter(|t| t.contains(kw)).count())
            .sum();
        if score > 0 {
            scored.push((*topic, score));
        }
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let total: usize = scored.iter().map(|(_, score)| score).sum();
    let detected: Vec<String> = scored
        .iter()
        .take(DETECTED_TOPIC_LIMIT)
        .map(|(topic, _)| topic.to_string())
        .collect();
    let primary = scored.first().map(|(topic, _)| topic.to_string());
    let confidence = match scored.first() {
        Some((_, top)) if total > 0 => round2((*top as f64 / total as f64).clamp(0.0, 1.0)),
        _ => 0.0,
    };

    TopicResult {
        detected,
        primary,
        confidence,
    }
}

struct ParagraphStats {
    count: usize,
    avg_length: f64,
}

fn analyze_paragraphs(sanitized: &str) -> ParagraphStats {
    let paragraphs: Vec<&str> = sanitized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return ParagraphStats {
            count: 0,
            avg_length: 0.0,
        };
    }

    let total_words: usize = paragraphs
        .iter()
        .map(|p| p.split_whitespace().count())
        .sum();

    ParagraphStats {
        count: paragraphs.len(),
        avg_length: round2(total_words as f64 / paragraphs.len() as f64),
    }
}
