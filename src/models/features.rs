use serde::{Deserialize, Serialize};

/// Closed set of boolean lexical features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    IsQuestion,
    IsExclamation,
    IsStatement,
    ContainsNegation,
    ContainsReference,
    ContainsAgreement,
    ContainsDisagreement,
    ContainsEmotionWords,
    ContainsPersonalAttack,
    ContainsGroupIdentity,
    ContainsEmphasis,
    ContainsConditional,
}

impl Feature {
    pub const ALL: [Feature; 12] = [
        Feature::IsQuestion,
        Feature::IsExclamation,
        Feature::IsStatement,
        Feature::ContainsNegation,
        Feature::ContainsReference,
        Feature::ContainsAgreement,
        Feature::ContainsDisagreement,
        Feature::ContainsEmotionWords,
        Feature::ContainsPersonalAttack,
        Feature::ContainsGroupIdentity,
        Feature::ContainsEmphasis,
        Feature::ContainsConditional,
    ];

    /// Column / field name
    pub fn name(self) -> &'static str {
        match self {
            Feature::IsQuestion => "is_question",
            Feature::IsExclamation => "is_exclamation",
            Feature::IsStatement => "is_statement",
            Feature::ContainsNegation => "contains_negation",
            Feature::ContainsReference => "contains_reference",
            Feature::ContainsAgreement => "contains_agreement",
            Feature::ContainsDisagreement => "contains_disagreement",
            Feature::ContainsEmotionWords => "contains_emotion_words",
            Feature::ContainsPersonalAttack => "contains_personal_attack",
            Feature::ContainsGroupIdentity => "contains_group_identity",
            Feature::ContainsEmphasis => "contains_emphasis",
            Feature::ContainsConditional => "contains_conditional",
        }
    }
}

/// Feature vector for one cleaned utterance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub is_question: bool,
    pub is_exclamation: bool,
    pub contains_negation: bool,
    pub contains_reference: bool,
    pub contains_agreement: bool,
    pub contains_disagreement: bool,
    pub contains_emotion_words: bool,
    pub contains_personal_attack: bool,
    pub contains_group_identity: bool,
    pub contains_emphasis: bool,
    pub contains_conditional: bool,
    /// Number of whitespace-delimited tokens
    pub sentence_length: usize,
}

impl Features {
    /// Neither a question nor an exclamation
    pub fn is_statement(&self) -> bool {
        !self.is_question && !self.is_exclamation
    }

    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::IsQuestion => self.is_question,
            Feature::IsExclamation => self.is_exclamation,
            Feature::IsStatement => self.is_statement(),
            Feature::ContainsNegation => self.contains_negation,
            Feature::ContainsReference => self.contains_reference,
            Feature::ContainsAgreement => self.contains_agreement,
            Feature::ContainsDisagreement => self.contains_disagreement,
            Feature::ContainsEmotionWords => self.contains_emotion_words,
            Feature::ContainsPersonalAttack => self.contains_personal_attack,
            Feature::ContainsGroupIdentity => self.contains_group_identity,
            Feature::ContainsEmphasis => self.contains_emphasis,
            Feature::ContainsConditional => self.contains_conditional,
        }
    }

    /// All boolean features as (name, value) pairs, in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        Feature::ALL.into_iter().map(|f| (f.name(), self.get(f)))
    }

    /// Names of the features that fired
    pub fn active(&self) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, value)| *value)
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_is_derived() {
        let mut features = Features::default();
        assert!(features.is_statement());
        features.is_question = true;
        assert!(!features.is_statement());
        assert!(!features.get(Feature::IsStatement));
    }

    #[test]
    fn test_iter_covers_every_feature() {
        let features = Features {
            contains_emphasis: true,
            ..Default::default()
        };
        let names: Vec<_> = features.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), Feature::ALL.len());
        assert_eq!(features.active(), vec!["is_statement", "contains_emphasis"]);
    }
}
