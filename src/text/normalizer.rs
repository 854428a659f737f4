use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::lexicon::{CONTRACTIONS, FILLER_WORDS};

/// Anything that is not an ASCII word character counts as a word boundary
const NOT_WORD: &str = r"[^A-Za-z0-9_]";

/// Separator allowed between the words of a multi-word filler
const PHRASE_GAP: &str = r"(?:\s|[^\x00-\x7F])+";

static CONTRACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = CONTRACTIONS
        .iter()
        .map(|(contraction, _)| regex::escape(contraction))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(^|{NOT_WORD})({alternation})($|{NOT_WORD})")).expect("valid regex")
});

static FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = FILLER_WORDS
        .iter()
        .map(|filler| {
            filler
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(PHRASE_GAP)
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(^|{NOT_WORD})(?:{alternation})($|{NOT_WORD})")).expect("valid regex")
});

static NON_ASCII_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex"));

/// Toggles for the normalization steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Fold to lower-case
    pub lowercase: bool,
    /// Expand contractions from the fixed table
    pub expand_contractions: bool,
    /// Remove filler words
    pub remove_fillers: bool,
    /// Keep punctuation (when false, every non-alphanumeric, non-space char is dropped)
    pub preserve_punctuation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            expand_contractions: true,
            remove_fillers: true,
            preserve_punctuation: true,
        }
    }
}

/// Utterance text normalizer
///
/// Steps run in a fixed order:
/// 1. Lower-case
/// 2. Expand contractions (whole words only)
/// 3. Remove fillers (whole words only)
/// 4. Replace non-ASCII runs with a space, collapse whitespace, trim (always)
/// 5. Strip punctuation
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.config)
    }
}

/// Normalize a single utterance string
pub fn normalize(text: &str, config: &NormalizerConfig) -> String {
    let mut text = if config.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    if config.expand_contractions {
        text = expand_contractions(&text);
    }

    if config.remove_fillers {
        text = remove_fillers(&text);
    }

    let ascii = NON_ASCII_RE.replace_all(&text, " ");
    text = collapse_whitespace(&ascii);

    if !config.preserve_punctuation {
        let stripped = PUNCTUATION_RE.replace_all(&text, "");
        text = collapse_whitespace(&stripped);
    }

    text
}

fn expand_contractions(text: &str) -> String {
    replace_until_stable(text, &CONTRACTION_RE, |caps: &Captures| {
        let expansion = CONTRACTIONS
            .iter()
            .find(|(contraction, _)| *contraction == &caps[2])
            .map(|(_, expansion)| *expansion)
            .unwrap_or(&caps[2]);
        format!("{}{}{}", &caps[1], expansion, &caps[3])
    })
}

fn remove_fillers(text: &str) -> String {
    replace_until_stable(text, &FILLER_RE, |caps: &Captures| {
        format!("{}{}", &caps[1], &caps[2])
    })
}

/// Boundary characters are consumed by each match, so adjacent hits need
/// another pass.
fn replace_until_stable<F>(text: &str, re: &Regex, replacement: F) -> String
where
    F: Fn(&Captures) -> String,
{
    let mut current = text.to_string();
    loop {
        let next = re.replace_all(&current, |caps: &Captures| replacement(caps)).into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        normalize(text, &NormalizerConfig::default())
    }

    #[test]
    fn test_expands_contractions() {
        let cleaned = clean("I can't go");
        assert!(cleaned.contains("cannot"));
        assert!(!cleaned.contains("can't"));
        assert_eq!(cleaned, "i cannot go");
    }

    #[test]
    fn test_adjacent_contractions() {
        assert_eq!(clean("don't don't"), "do not do not");
    }

    #[test]
    fn test_contraction_must_be_whole_word() {
        assert_eq!(clean("scan't"), "scan't");
        // won't is not in the expansion table
        assert_eq!(clean("I won't"), "i won't");
    }

    #[test]
    fn test_removes_fillers_without_merging_words() {
        assert_eq!(clean("Um, I uh think so"), ", i think so");
        assert_eq!(clean("I like um like it"), "i it");
        assert_eq!(clean("well you know it is"), "well it is");
        assert_eq!(clean("likely alike"), "likely alike");
    }

    #[test]
    fn test_multi_word_filler_across_whitespace() {
        assert_eq!(clean("you   know\nwhat"), "what");
        assert_eq!(clean("you um know what"), "what");
    }

    #[test]
    fn test_non_ascii_and_whitespace() {
        assert_eq!(clean("  caf\u{e9}\u{e9}   bar\t\tbaz  "), "caf bar baz");
        assert_eq!(clean("hello\u{2014}world"), "hello world");
    }

    #[test]
    fn test_strip_punctuation() {
        let config = NormalizerConfig {
            preserve_punctuation: false,
            ..Default::default()
        };
        assert_eq!(normalize("Is this - true?!", &config), "is this true");
    }

    #[test]
    fn test_everything_disabled_still_cleans_whitespace() {
        let config = NormalizerConfig {
            lowercase: false,
            expand_contractions: false,
            remove_fillers: false,
            preserve_punctuation: true,
        };
        assert_eq!(normalize("  Um  I CAN'T\u{a0}go ", &config), "Um I CAN'T go");
    }

    #[test]
    fn test_case_sensitive_when_not_lowercased() {
        let config = NormalizerConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(normalize("Um, I Can't", &config), "Um, I Can't");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "I can't believe it, um, you know?",
            "you\u{2014}know what I mean",
            "Like\u{e9} like",
            "  We DON'T agree!! ",
            "Frankly, honestly, basically: no.",
            "",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
