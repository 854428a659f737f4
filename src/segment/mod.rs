pub mod blocks;
pub mod observer;
pub mod records;
pub mod speaker_lines;
pub mod timestamped;

pub use blocks::*;
pub use observer::*;
pub use records::*;
pub use speaker_lines::*;
pub use timestamped::*;

use crate::error::Result;
use crate::models::{TranscriptFormat, Utterance};

/// Split a raw transcript into ordered, speaker-attributed utterances
///
/// The format is always chosen by the caller; no content sniffing happens
/// here. Malformed lines, blocks and records are reported to `observer` and
/// skipped. Only an unreadable document shape (bad JSON, missing CSV column)
/// fails the call.
pub fn segment(
    text: &str,
    format: TranscriptFormat,
    observer: &dyn SegmentObserver,
) -> Result<Vec<Utterance>> {
    let utterances = match format {
        TranscriptFormat::Json => {
            let records = parse_json_records(text, observer)?;
            segment_records(&records, observer)
        }
        TranscriptFormat::Csv => {
            let records = parse_csv_records(text, observer)?;
            segment_records(&records, observer)
        }
        TranscriptFormat::Timestamped => segment_timestamped(text, observer),
        TranscriptFormat::Blocks => segment_blocks(text, observer),
        TranscriptFormat::SpeakerLines => segment_speaker_lines(text, observer),
    };

    observer.finished(format, utterances.len());
    Ok(utterances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TranscriptDocument;

    fn pairs(utterances: &[Utterance]) -> Vec<(String, String)> {
        utterances
            .iter()
            .map(|u| (u.speaker.clone(), u.raw_text.clone()))
            .collect()
    }

    #[test]
    fn test_dispatch_by_format() {
        let text = "ALICE [0 - 1]: hi\nBOB [1 - 2]: hello";
        assert_eq!(segment(text, TranscriptFormat::Timestamped, &SilentObserver).unwrap().len(), 2);
        // the same text read as blocks is a single block split at the first colon
        let blocks = segment(text, TranscriptFormat::Blocks, &SilentObserver).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].speaker, "ALICE [0 - 1]");
    }

    #[test]
    fn test_records_round_trip_for_every_text_format() {
        let samples = [
            (TranscriptFormat::Timestamped, "A [0 - 1]: one\nB [1 - 2]: two"),
            (TranscriptFormat::Blocks, "A: one\n\nB: two\nmore"),
            (TranscriptFormat::SpeakerLines, "A: one\nB: two\nmore"),
        ];

        for (format, text) in samples {
            let first = segment(text, format, &SilentObserver).unwrap();
            let json = serde_json::to_string(&TranscriptDocument::from_utterances(&first)).unwrap();
            let second = segment(&json, TranscriptFormat::Json, &SilentObserver).unwrap();

            assert_eq!(pairs(&first), pairs(&second), "format {}", format);
            let indices: Vec<_> = second.iter().map(|u| u.sequence_index).collect();
            assert_eq!(indices, (0..second.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_csv_round_trip_keeps_quoted_text() {
        let first = vec![
            Utterance::new("A", "one, two", 0).with_times(Some("0".into()), Some("1".into())),
            Utterance::new("B", "say \"three\"", 1).with_times(Some("1".into()), Some("2".into())),
            Utterance::new("C", "four\nfive", 2),
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in TranscriptDocument::from_utterances(&first).transcript {
            writer.serialize(entry).unwrap();
        }
        let csv_text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let second = segment(&csv_text, TranscriptFormat::Csv, &SilentObserver).unwrap();
        assert_eq!(second, first);
    }
}
