use std::collections::HashSet;

use crate::models::Features;

use super::lexicon::{
    AGREEMENT, CONDITIONALS, DISAGREEMENT, EMOTION, EMPHASIS, GROUP_IDENTITY, NEGATIONS,
    PERSONAL_ATTACKS, REFERENCES,
};

/// Compute every lexical feature for an already-normalized utterance
///
/// Tokens come from whitespace splitting only, so "agree." does not match
/// "agree" and multi-word keywords never match.
pub fn tag_features(cleaned_text: &str) -> Features {
    let words: HashSet<&str> = cleaned_text.split_whitespace().collect();

    Features {
        is_question: is_question(cleaned_text),
        is_exclamation: is_exclamation(cleaned_text),
        contains_negation: contains_any(&words, NEGATIONS),
        contains_reference: contains_any(&words, REFERENCES),
        contains_agreement: contains_any(&words, AGREEMENT),
        contains_disagreement: contains_any(&words, DISAGREEMENT),
        contains_emotion_words: contains_any(&words, EMOTION),
        contains_personal_attack: contains_any(&words, PERSONAL_ATTACKS),
        contains_group_identity: contains_any(&words, GROUP_IDENTITY),
        contains_emphasis: contains_any(&words, EMPHASIS),
        contains_conditional: contains_any(&words, CONDITIONALS),
        sentence_length: sentence_length(cleaned_text),
    }
}

pub fn is_question(text: &str) -> bool {
    text.ends_with('?')
}

pub fn is_exclamation(text: &str) -> bool {
    text.ends_with('!')
}

pub fn sentence_length(text: &str) -> usize {
    text.split_whitespace().count()
}

fn contains_any(words: &HashSet<&str>, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| words.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;
    use crate::text::NormalizerConfig;

    #[test]
    fn test_question_and_exclamation() {
        assert!(is_question("is this true?"));
        assert!(!is_question("this is true"));
        assert!(is_exclamation("stop!"));
        assert!(tag_features("this is true").is_statement());
        assert!(!tag_features("really?").is_statement());
    }

    #[test]
    fn test_keyword_sets() {
        let features = tag_features("you are a liar and we know it");
        assert!(features.contains_reference);
        assert!(features.contains_personal_attack);
        assert!(features.contains_group_identity);
        assert!(!features.contains_agreement);
        assert!(!features.contains_negation);
        assert_eq!(features.sentence_length, 8);
    }

    #[test]
    fn test_overlapping_sets() {
        let features = tag_features("no i absolutely disagree");
        assert!(features.contains_negation);
        assert!(features.contains_disagreement);
        assert!(features.contains_agreement);
        assert!(features.contains_emphasis);
    }

    #[test]
    fn test_tokens_keep_attached_punctuation() {
        let features = tag_features("i agree.");
        assert!(!features.contains_agreement);
        assert!(tag_features("i agree . totally").contains_agreement);
    }

    #[test]
    fn test_multi_word_keyword_never_matches() {
        assert!(!tag_features("in case it rains").contains_conditional);
        assert!(tag_features("if it rains").contains_conditional);
    }

    #[test]
    fn test_expanded_contraction_loses_negation_keyword() {
        let cleaned = normalize("I don't know", &NormalizerConfig::default());
        assert!(tag_features(&cleaned).contains_negation); // via "not"
        assert!(tag_features("i won't").contains_negation);
    }

    #[test]
    fn test_sentence_length_matches_split() {
        for text in ["", "one", "a  b\tc", " lead and trail "] {
            assert_eq!(sentence_length(text), text.split_whitespace().count());
        }
    }

    #[test]
    fn test_empty_text() {
        let features = tag_features("");
        assert_eq!(features, Features::default());
        assert!(features.is_statement());
    }
}
