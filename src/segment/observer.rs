use std::cell::RefCell;
use std::fmt;

use tracing::{debug, warn};

use crate::models::TranscriptFormat;

const PREVIEW_CHARS: usize = 50;

/// A recoverable problem found while segmenting; the offending input is skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentIssue {
    /// A line that does not match the timestamped micro-grammar
    MalformedLine { line: usize, preview: String },
    /// A blank-line-delimited block without a usable `speaker: text` split
    MalformedSegment { segment: usize, preview: String },
    /// A structured record without a speaker, or an undecodable row
    MalformedRecord { record: usize, reason: String },
    /// Text seen before any speaker label
    OrphanText { line: usize, preview: String },
    /// A speaker turn whose text is empty after trimming
    EmptyTurn { speaker: String },
}

impl SegmentIssue {
    pub fn malformed_line(line: usize, text: &str) -> Self {
        SegmentIssue::MalformedLine {
            line,
            preview: preview(text),
        }
    }

    pub fn malformed_segment(segment: usize, text: &str) -> Self {
        SegmentIssue::MalformedSegment {
            segment,
            preview: preview(text),
        }
    }

    pub fn orphan_text(line: usize, text: &str) -> Self {
        SegmentIssue::OrphanText {
            line,
            preview: preview(text),
        }
    }
}

impl fmt::Display for SegmentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentIssue::MalformedLine { line, preview } => {
                write!(f, "skipped malformed line {}: {:?}", line, preview)
            }
            SegmentIssue::MalformedSegment { segment, preview } => {
                write!(f, "skipped non-speaker block {}: {:?}", segment, preview)
            }
            SegmentIssue::MalformedRecord { record, reason } => {
                write!(f, "skipped record {}: {}", record, reason)
            }
            SegmentIssue::OrphanText { line, preview } => {
                write!(f, "discarded text before first speaker on line {}: {:?}", line, preview)
            }
            SegmentIssue::EmptyTurn { speaker } => {
                write!(f, "dropped empty turn for speaker {:?}", speaker)
            }
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Receives parse diagnostics from the segmenter
///
/// The segmenter itself never logs; callers choose where issues go.
pub trait SegmentObserver {
    fn issue(&self, issue: SegmentIssue);

    fn finished(&self, _format: TranscriptFormat, _utterances: usize) {}
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl SegmentObserver for SilentObserver {
    fn issue(&self, _issue: SegmentIssue) {}
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SegmentObserver for TracingObserver {
    fn issue(&self, issue: SegmentIssue) {
        match &issue {
            SegmentIssue::OrphanText { line, .. } => warn!(line = *line, "{}", issue),
            _ => debug!("{}", issue),
        }
    }

    fn finished(&self, format: TranscriptFormat, utterances: usize) {
        debug!(%format, utterances, "segmentation finished");
    }
}

/// Keeps every issue for later inspection
#[derive(Debug, Default)]
pub struct CollectingObserver {
    issues: RefCell<Vec<SegmentIssue>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> Vec<SegmentIssue> {
        self.issues.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.issues.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.borrow().is_empty()
    }

    pub fn take(&self) -> Vec<SegmentIssue> {
        self.issues.take()
    }
}

impl SegmentObserver for CollectingObserver {
    fn issue(&self, issue: SegmentIssue) {
        self.issues.borrow_mut().push(issue);
    }
}
