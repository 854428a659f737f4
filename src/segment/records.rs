use serde_json::Value;

use crate::error::{Result, TranscriptError};
use crate::models::{TranscriptRecord, Utterance};

use super::{SegmentIssue, SegmentObserver};

/// Turn pre-parsed records into utterances, preserving their order
///
/// Records without a speaker or with blank text are skipped.
pub fn segment_records(records: &[TranscriptRecord], observer: &dyn SegmentObserver) -> Vec<Utterance> {
    let mut utterances = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let speaker = record.speaker.trim();
        let text = record.text.trim();

        if speaker.is_empty() {
            observer.issue(SegmentIssue::MalformedRecord {
                record: i + 1,
                reason: "missing speaker".to_string(),
            });
            continue;
        }
        if text.is_empty() {
            observer.issue(SegmentIssue::EmptyTurn {
                speaker: speaker.to_string(),
            });
            continue;
        }

        utterances.push(
            Utterance::new(speaker, text, utterances.len())
                .with_times(record.start_time.clone(), record.end_time.clone()),
        );
    }

    utterances
}

/// Parse a JSON transcript: either a top-level array of records or an
/// object whose `transcript` key holds that array
pub fn parse_json_records(json: &str, observer: &dyn SegmentObserver) -> Result<Vec<TranscriptRecord>> {
    let document: Value = serde_json::from_str(json)?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("transcript") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(TranscriptError::InvalidShape(
                    "\"transcript\" is not an array".to_string(),
                ));
            }
            None => {
                return Err(TranscriptError::InvalidShape(
                    "object without a \"transcript\" key".to_string(),
                ));
            }
        },
        other => {
            return Err(TranscriptError::InvalidShape(format!(
                "expected an array or object, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<TranscriptRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => observer.issue(SegmentIssue::MalformedRecord {
                record: i + 1,
                reason: e.to_string(),
            }),
        }
    }

    Ok(records)
}

/// Parse CSV rows with a header containing at least `speaker` and `text`
pub fn parse_csv_records(csv_text: &str, observer: &dyn SegmentObserver) -> Result<Vec<TranscriptRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let speaker_col = column("speaker").ok_or_else(|| TranscriptError::MissingColumn("speaker".to_string()))?;
    let text_col = column("text").ok_or_else(|| TranscriptError::MissingColumn("text".to_string()))?;
    let start_col = column("start_time");
    let end_col = column("end_time");

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                observer.issue(SegmentIssue::MalformedRecord {
                    record: i + 1,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let field = |col: Option<usize>| {
            col.and_then(|c| row.get(c))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        records.push(TranscriptRecord {
            speaker: field(Some(speaker_col)).unwrap_or_default(),
            text: field(Some(text_col)).unwrap_or_default(),
            start_time: field(start_col),
            end_time: field(end_col),
        });
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{CollectingObserver, SilentObserver};

    #[test]
    fn test_nested_json() {
        let json = r#"{"transcript": [
            {"speaker": "MODERATOR", "text": "Welcome.", "start_time": "00:00", "end_time": "00:03"},
            {"speaker": "ALICE", "text": "Thank you."}
        ]}"#;
        let records = parse_json_records(json, &SilentObserver).unwrap();
        let utterances = segment_records(&records, &SilentObserver);

        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].start_time.as_deref(), Some("00:00"));
        assert_eq!(utterances[1].speaker, "ALICE");
        assert_eq!(utterances[1].start_time, None);
        assert_eq!(utterances[1].sequence_index, 1);
    }

    #[test]
    fn test_top_level_array() {
        let json = r#"[{"speaker": "A", "text": "one"}, {"speaker": "B", "text": "two"}]"#;
        let records = parse_json_records(json, &SilentObserver).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unrecognized_json_shape() {
        let err = parse_json_records(r#"{"turns": []}"#, &SilentObserver).unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidShape(_)));

        let err = parse_json_records("42", &SilentObserver).unwrap_err();
        assert!(matches!(err, TranscriptError::InvalidShape(_)));

        let err = parse_json_records("{not json", &SilentObserver).unwrap_err();
        assert!(matches!(err, TranscriptError::Json(_)));
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let json = r#"[
            {"speaker": "A", "text": "kept"},
            "not an object",
            {"speaker": "", "text": "no speaker"},
            {"speaker": "B", "text": "   "},
            {"speaker": "C", "text": "also kept"}
        ]"#;
        let observer = CollectingObserver::new();
        let records = parse_json_records(json, &observer).unwrap();
        let utterances = segment_records(&records, &observer);

        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[1].speaker, "C");
        assert_eq!(utterances[1].sequence_index, 1);
        assert_eq!(observer.len(), 3);
    }

    #[test]
    fn test_numeric_speakers_pass_through() {
        let json = r#"[{"speaker": 1, "text": "hi"}, {"speaker": "Mod ", "text": "x"}]"#;
        let observer = CollectingObserver::new();
        let records = parse_json_records(json, &observer).unwrap();
        let utterances = segment_records(&records, &observer);

        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].speaker, "1");
        assert_eq!(utterances[0].raw_text, "hi");
        assert_eq!(utterances[1].speaker, "Mod");
        assert!(observer.is_empty());
    }

    #[test]
    fn test_csv_rows() {
        let csv_text = "speaker,start_time,text,extra\nALICE,00:01,\"Hello, everyone\",x\nBOB,,Hi,y\n";
        let records = parse_csv_records(csv_text, &SilentObserver).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Hello, everyone");
        assert_eq!(records[0].start_time.as_deref(), Some("00:01"));
        assert_eq!(records[0].end_time, None);
        assert_eq!(records[1].start_time, None);
    }

    #[test]
    fn test_csv_missing_column() {
        let err = parse_csv_records("speaker,words\nA,hi\n", &SilentObserver).unwrap_err();
        assert!(matches!(err, TranscriptError::MissingColumn(col) if col == "text"));
    }
}
