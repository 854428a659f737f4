use crate::models::Utterance;

use super::{SegmentIssue, SegmentObserver};

/// Parse turns separated by blank lines; the speaker is everything before the
/// first colon of the block
pub fn segment_blocks(text: &str, observer: &dyn SegmentObserver) -> Vec<Utterance> {
    let text = text.replace("\r\n", "\n");
    let mut utterances = Vec::new();

    for (i, block) in text.split("\n\n").enumerate() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let Some((speaker, body)) = block.split_once(':') else {
            observer.issue(SegmentIssue::malformed_segment(i + 1, block));
            continue;
        };

        let speaker = speaker.trim();
        let body = body.trim();
        if speaker.is_empty() {
            observer.issue(SegmentIssue::malformed_segment(i + 1, block));
            continue;
        }
        if body.is_empty() {
            observer.issue(SegmentIssue::EmptyTurn {
                speaker: speaker.to_string(),
            });
            continue;
        }

        utterances.push(Utterance::new(speaker, body, utterances.len()));
    }

    utterances
}
