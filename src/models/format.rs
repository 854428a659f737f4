use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

/// Input layout of a raw transcript, chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    /// JSON array of speaker/text records, optionally wrapped in `{"transcript": [...]}`
    Json,
    /// Tabular rows with at least `speaker` and `text` columns
    Csv,
    /// One `SPEAKER [START - END]: TEXT` line per utterance
    Timestamped,
    /// Turns separated by blank lines, speaker before the first colon
    Blocks,
    /// Upper-case speaker labels followed by continuation lines
    SpeakerLines,
}

impl TranscriptFormat {
    pub const ALL: [TranscriptFormat; 5] = [
        TranscriptFormat::Json,
        TranscriptFormat::Csv,
        TranscriptFormat::Timestamped,
        TranscriptFormat::Blocks,
        TranscriptFormat::SpeakerLines,
    ];

    /// Canonical name used on the command line and in logs
    pub fn name(self) -> &'static str {
        match self {
            TranscriptFormat::Json => "json",
            TranscriptFormat::Csv => "csv",
            TranscriptFormat::Timestamped => "timestamped",
            TranscriptFormat::Blocks => "blocks",
            TranscriptFormat::SpeakerLines => "speaker-lines",
        }
    }

    /// Whether the format is parsed line by line from plain text
    pub fn is_line_oriented(self) -> bool {
        matches!(
            self,
            TranscriptFormat::Timestamped | TranscriptFormat::SpeakerLines
        )
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TranscriptFormat {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hint = s.trim().to_ascii_lowercase();
        TranscriptFormat::ALL
            .into_iter()
            .find(|format| format.name() == hint)
            .ok_or_else(|| TranscriptError::UnsupportedFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_names() {
        assert_eq!("json".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Json);
        assert_eq!(
            " Speaker-Lines ".parse::<TranscriptFormat>().unwrap(),
            TranscriptFormat::SpeakerLines
        );
        for format in TranscriptFormat::ALL {
            assert_eq!(format.name().parse::<TranscriptFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = "docx".parse::<TranscriptFormat>().unwrap_err();
        assert!(matches!(err, TranscriptError::UnsupportedFormat(hint) if hint == "docx"));
    }
}
