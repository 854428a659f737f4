use serde::{Deserialize, Deserializer, Serialize};

use super::Features;

/// A pre-parsed speaker/text record as found in JSON or CSV transcripts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub speaker: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub text: String,
    #[serde(default, deserialize_with = "opaque_time")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "opaque_time")]
    pub end_time: Option<String>,
}

impl TranscriptRecord {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            start_time: None,
            end_time: None,
        }
    }
}

/// Time markers are opaque: accept strings or numbers, keep the textual form
fn opaque_time<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Speakers and text may arrive as numbers (diarizer speaker ids); keep the
/// textual form. Null becomes empty, arrays and objects are rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// One turn of speech attributed to one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker identifier, case as found in the source
    pub speaker: String,
    /// Original text of the turn (continuation lines joined with '\n')
    pub raw_text: String,
    /// Start marker, only for formats that encode timing
    pub start_time: Option<String>,
    /// End marker, only for formats that encode timing
    pub end_time: Option<String>,
    /// Zero-based position within the transcript
    pub sequence_index: usize,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, raw_text: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            speaker: speaker.into(),
            raw_text: raw_text.into(),
            start_time: None,
            end_time: None,
            sequence_index,
        }
    }

    pub fn with_times(mut self, start_time: Option<String>, end_time: Option<String>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }
}

/// An utterance with its normalized text and lexical features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedUtterance {
    #[serde(flatten)]
    pub utterance: Utterance,
    pub cleaned_text: String,
    pub features: Features,
    pub is_moderator: bool,
}

impl AnnotatedUtterance {
    pub fn speaker(&self) -> &str {
        &self.utterance.speaker
    }

    pub fn sequence_index(&self) -> usize {
        self.utterance.sequence_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_numeric_times() {
        let json = r#"{"speaker": "A", "text": "hi", "start_time": 1.5, "end_time": "00:02"}"#;
        let record: TranscriptRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.start_time.as_deref(), Some("1.5"));
        assert_eq!(record.end_time.as_deref(), Some("00:02"));
    }

    #[test]
    fn test_record_accepts_numeric_speaker_and_text() {
        let record: TranscriptRecord =
            serde_json::from_str(r#"{"speaker": 1, "text": 42}"#).unwrap();
        assert_eq!(record.speaker, "1");
        assert_eq!(record.text, "42");

        let record: TranscriptRecord = serde_json::from_str(r#"{"speaker": null, "text": "hi"}"#).unwrap();
        assert_eq!(record.speaker, "");

        assert!(serde_json::from_str::<TranscriptRecord>(r#"{"speaker": [1], "text": "hi"}"#).is_err());
    }

    #[test]
    fn test_record_missing_fields_default() {
        let record: TranscriptRecord = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(record.speaker, "");
        assert_eq!(record.start_time, None);
        assert_eq!(record.end_time, None);
    }
}
