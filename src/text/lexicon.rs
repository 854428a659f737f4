//! Fixed word tables used by the normalizer and the feature tagger.

/// Low-information words removed during normalization. Multi-word entries
/// match across any whitespace run.
pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "ah", "oh", "like", "you know", "actually", "basically", "frankly", "honestly",
];

/// Contraction surface forms and their expansions
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
];

pub const NEGATIONS: &[&str] = &["not", "never", "no", "don't", "won't", "can't"];

pub const REFERENCES: &[&str] = &["you", "he", "she", "they", "him", "her"];

pub const AGREEMENT: &[&str] = &["agree", "exactly", "right", "absolutely", "definitely"];

pub const DISAGREEMENT: &[&str] = &["no", "not", "wrong", "disagree", "never", "impossible"];

pub const EMOTION: &[&str] = &["happy", "angry", "sad", "furious", "frustrated", "excited"];

pub const PERSONAL_ATTACKS: &[&str] = &["liar", "stupid", "ignorant", "dumb", "fool", "clueless"];

pub const GROUP_IDENTITY: &[&str] = &["we", "us", "they", "them"];

pub const EMPHASIS: &[&str] = &["absolutely", "really", "very", "totally", "completely"];

// "in case" can never match a single token; kept to mirror the keyword list.
pub const CONDITIONALS: &[&str] = &["if", "unless", "otherwise", "in case"];
