//! Fixed word lists backing the style analysis pipeline
//!
//! These lists are part of the analyzer's contract: changing them changes
//! the feature bundles produced for existing posts, so additions should be
//! treated like a data-format migration.

/// Common English words excluded from vocabulary analysis.
///
/// Tokens of length <= 2 are filtered separately, so very short stop words
/// ("a", "an", "of") appear here mostly for completeness.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not",
    "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "why", "will",
    "with", "would", "you", "your",
];

/// Topic taxonomy in declaration order.
///
/// Declaration order doubles as the tie-break for equal topic scores, so the
/// ordering here is load-bearing. Keyword hits use substring containment over
/// word tokens; short keywords ("ai", "dj") deliberately over-match.
pub const TOPIC_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "music",
        &[
            "music", "song", "album", "track", "artist", "band", "beat", "melody", "lyrics",
            "playlist", "concert", "vinyl", "record", "listen", "sound", "genre", "remix", "dj",
            "tune", "rhythm",
        ],
    ),
    (
        "personal",
        &[
            "life", "feel", "feeling", "think", "thought", "today", "myself", "journey",
            "moment", "memory", "family", "friend", "home", "heart", "dream", "hope", "change",
            "story", "grateful",
        ],
    ),
    (
        "review",
        &[
            "review", "rating", "recommend", "opinion", "verdict", "pros", "cons", "amazing",
            "terrible", "worth", "quality", "compare", "best", "worst", "favorite", "impression",
        ],
    ),
    (
        "tutorial",
        &[
            "how", "guide", "step", "tutorial", "learn", "tip", "setup", "install", "create",
            "build", "make", "use", "example", "follow", "start", "beginner",
        ],
    ),
    (
        "culture",
        &[
            "culture", "art", "film", "movie", "book", "fashion", "design", "history", "city",
            "travel", "food", "scene", "community", "event", "festival", "exhibition",
        ],
    ),
    (
        "technology",
        &[
            "technology", "tech", "software", "app", "code", "computer", "internet", "digital",
            "ai", "data", "device", "gadget", "online", "platform", "website", "tool",
        ],
    ),
];

/// Casual slang and filler markers.
///
/// Multi-word entries only match via the padded-substring check in the tone
/// stage; single-word entries also match as whole tokens.
pub const CASUAL_MARKERS: &[&str] = &[
    "gonna",
    "wanna",
    "kinda",
    "sorta",
    "dunno",
    "yeah",
    "nah",
    "cool",
    "awesome",
    "super",
    "totally",
    "literally",
    "honestly",
    "basically",
    "stuff",
    "btw",
    "lol",
    "haha",
    "tbh",
    "you know",
    "i mean",
    "pretty much",
    "a lot",
    "no way",
];

/// Formal connectives and hedges.
pub const FORMAL_MARKERS: &[&str] = &[
    "furthermore",
    "moreover",
    "however",
    "nevertheless",
    "consequently",
    "therefore",
    "thus",
    "regarding",
    "whereas",
    "notwithstanding",
    "accordingly",
    "subsequently",
    "in addition",
    "in conclusion",
    "in contrast",
    "in particular",
    "with respect to",
    "as a result",
    "for instance",
    "on the other hand",
];

/// First-person pronoun tokens.
pub const FIRST_PERSON_PRONOUNS: &[&str] = &[
    "i", "i'm", "i've", "i'll", "i'd", "me", "my", "mine", "myself", "we", "we're", "we've",
    "our", "ours", "us",
];

/// Second-person pronoun tokens.
pub const SECOND_PERSON_PRONOUNS: &[&str] = &[
    "you", "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
];

/// Words counted toward the enthusiasm indicator.
pub const ENTHUSIASM_WORDS: &[&str] = &[
    "love",
    "amazing",
    "awesome",
    "incredible",
    "fantastic",
    "excited",
    "exciting",
    "brilliant",
    "beautiful",
    "wonderful",
    "perfect",
    "best",
    "favorite",
    "obsessed",
    "stunning",
    "great",
];

/// Words counted toward the reflective indicator.
pub const REFLECTIVE_WORDS: &[&str] = &[
    "think",
    "wonder",
    "realize",
    "realized",
    "remember",
    "reflect",
    "perhaps",
    "maybe",
    "seems",
    "feels",
    "sense",
    "consider",
    "notice",
    "imagine",
    "quiet",
    "meaning",
];

/// Words counted toward the critical indicator.
pub const CRITICAL_WORDS: &[&str] = &[
    "but",
    "however",
    "problem",
    "issue",
    "disappointing",
    "disappointed",
    "lacks",
    "weak",
    "fails",
    "overrated",
    "mediocre",
    "boring",
    "flawed",
    "unfortunately",
    "wrong",
    "worse",
];
