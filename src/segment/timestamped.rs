use crate::models::Utterance;

use super::{SegmentIssue, SegmentObserver};

const RANGE_OPEN: &str = " [";
const RANGE_CLOSE: &str = "]: ";
const RANGE_SEPARATOR: &str = " - ";

/// Parse `SPEAKER [START - END]: TEXT` lines, one utterance per line
///
/// Lines missing either marker, or whose range does not split into exactly
/// two parts, are reported and skipped.
pub fn segment_timestamped(text: &str, observer: &dyn SegmentObserver) -> Vec<Utterance> {
    let mut utterances = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(parsed) if parsed.text.is_empty() => observer.issue(SegmentIssue::EmptyTurn {
                speaker: parsed.speaker.to_string(),
            }),
            Some(parsed) => {
                utterances.push(
                    Utterance::new(parsed.speaker, parsed.text, utterances.len()).with_times(
                        Some(parsed.start_time.to_string()),
                        Some(parsed.end_time.to_string()),
                    ),
                );
            }
            None => observer.issue(SegmentIssue::malformed_line(i + 1, line)),
        }
    }

    utterances
}

#[derive(Debug, PartialEq, Eq)]
struct TimestampedLine<'a> {
    speaker: &'a str,
    start_time: &'a str,
    end_time: &'a str,
    text: &'a str,
}

fn parse_line(line: &str) -> Option<TimestampedLine<'_>> {
    let (speaker_info, text) = line.split_once(RANGE_CLOSE)?;
    let (speaker, range) = speaker_info.split_once(RANGE_OPEN)?;

    let mut parts = range.split(RANGE_SEPARATOR);
    let start_time = parts.next()?.trim();
    let end_time = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let speaker = speaker.trim();
    if speaker.is_empty() {
        return None;
    }

    Some(TimestampedLine {
        speaker,
        start_time,
        end_time,
        text: text.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{CollectingObserver, SilentObserver};

    #[test]
    fn test_parse_timestamped_line() {
        let utterances = segment_timestamped("ALICE [00:01 - 00:05]: Hello there", &SilentObserver);

        assert_eq!(utterances.len(), 1);
        let u = &utterances[0];
        assert_eq!(u.speaker, "ALICE");
        assert_eq!(u.start_time.as_deref(), Some("00:01"));
        assert_eq!(u.end_time.as_deref(), Some("00:05"));
        assert_eq!(u.raw_text, "Hello there");
        assert_eq!(u.sequence_index, 0);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "\
ALICE [00:01 - 00:05]: Hello there
BOB [00:06 - 00:09] missing separator
CAROL: no time range
DAVE [00:10]: one part only
ERIN [00:11 - 00:12 - 00:13]: three parts

FRANK [00:14 - 00:20]: Goodbye";
        let observer = CollectingObserver::new();
        let utterances = segment_timestamped(text, &observer);

        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[1].speaker, "FRANK");
        assert_eq!(utterances[1].sequence_index, 1);
        assert_eq!(observer.len(), 4);
        assert!(matches!(
            observer.issues()[0],
            SegmentIssue::MalformedLine { line: 2, .. }
        ));
    }

    #[test]
    fn test_text_may_contain_brackets() {
        let utterances = segment_timestamped(
            "Dr. Smith [1:00 - 1:04]: see [ref]: the appendix",
            &SilentObserver,
        );
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].speaker, "Dr. Smith");
        assert_eq!(utterances[0].raw_text, "see [ref]: the appendix");
    }
}
