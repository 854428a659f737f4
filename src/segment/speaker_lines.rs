use crate::models::Utterance;

use super::{SegmentIssue, SegmentObserver};

const SPEAKER_TOKEN: &str = "SPEAKER";

/// A turn being accumulated
struct PendingTurn {
    speaker: String,
    lines: Vec<String>,
}

/// Parse transcripts where a turn starts with an upper-case `LABEL:` line and
/// continues over the following lines until the next label
pub fn segment_speaker_lines(text: &str, observer: &dyn SegmentObserver) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut pending: Option<PendingTurn> = None;

    for (i, line) in text.lines().enumerate() {
        if let Some((label, rest)) = speaker_label(line) {
            if let Some(turn) = pending.take() {
                flush(turn, &mut utterances, observer);
            }
            pending = Some(PendingTurn {
                speaker: label.to_string(),
                lines: vec![rest.trim().to_string()],
            });
            continue;
        }

        match pending.as_mut() {
            // blank lines are kept as empty markers
            Some(turn) => turn.lines.push(line.trim().to_string()),
            None if line.trim().is_empty() => {}
            None => observer.issue(SegmentIssue::orphan_text(i + 1, line.trim())),
        }
    }

    if let Some(turn) = pending.take() {
        flush(turn, &mut utterances, observer);
    }

    utterances
}

fn flush(turn: PendingTurn, utterances: &mut Vec<Utterance>, observer: &dyn SegmentObserver) {
    let text = turn.lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        observer.issue(SegmentIssue::EmptyTurn {
            speaker: turn.speaker,
        });
        return;
    }
    let index = utterances.len();
    utterances.push(Utterance::new(turn.speaker, text, index));
}

/// Split a line into `(label, rest)` when it starts a new turn
///
/// The text before the first colon must either contain `SPEAKER` or be
/// upper-case: at least one upper-case letter and no lower-case ones, so
/// digits and punctuation are allowed.
pub fn speaker_label(line: &str) -> Option<(&str, &str)> {
    let (label, rest) = line.split_once(':')?;
    let label = label.trim();
    if label.contains(SPEAKER_TOKEN) || is_upper_case(label) {
        Some((label, rest))
    } else {
        None
    }
}

fn is_upper_case(label: &str) -> bool {
    label.chars().any(char::is_uppercase) && !label.chars().any(char::is_lowercase)
}
