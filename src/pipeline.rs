use tracing::debug;

use crate::error::Result;
use crate::models::{AnnotatedUtterance, TranscriptFormat, TranscriptRecord, Utterance};
use crate::segment::{segment, segment_records, SegmentObserver, SilentObserver};
use crate::text::{tag_features, Normalizer, NormalizerConfig};

/// Configuration for the annotation pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Normalizer toggles
    pub normalizer: NormalizerConfig,
    /// Speaker identifier flagged as moderator (case-insensitive)
    pub moderator: Option<String>,
}

/// Segment -> normalize -> tag
pub struct Pipeline {
    normalizer: Normalizer,
    moderator: Option<String>,
    observer: Box<dyn SegmentObserver>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    /// Create a pipeline that reports nothing
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalizer),
            moderator: config
                .moderator
                .map(|name| moderator_key(&name))
                .filter(|name| !name.is_empty()),
            observer: Box::new(SilentObserver),
        }
    }

    /// Route segmentation diagnostics to `observer`
    pub fn with_observer(mut self, observer: impl SegmentObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Segment and annotate a whole transcript
    pub fn process(&self, text: &str, format: TranscriptFormat) -> Result<Vec<AnnotatedUtterance>> {
        let utterances = segment(text, format, self.observer.as_ref())?;
        Ok(self.annotate_all(utterances))
    }

    /// Annotate pre-parsed records
    pub fn process_records(&self, records: &[TranscriptRecord]) -> Vec<AnnotatedUtterance> {
        let utterances = segment_records(records, self.observer.as_ref());
        self.annotate_all(utterances)
    }

    /// Segment and annotate one newly available chunk, appending the results
    /// to `accumulator` with sequence indices continuing from its length
    ///
    /// Returns the number of utterances appended. On error nothing is appended.
    pub fn process_chunk(
        &self,
        chunk: &str,
        format: TranscriptFormat,
        accumulator: &mut TranscriptAccumulator,
    ) -> Result<usize> {
        let annotated = self.process(chunk, format)?;
        let added = annotated.len();
        accumulator.append(annotated);
        debug!(added, total = accumulator.len(), "chunk processed");
        Ok(added)
    }

    /// Normalize and tag a single utterance
    pub fn annotate(&self, utterance: Utterance) -> AnnotatedUtterance {
        let cleaned_text = self.normalizer.normalize(&utterance.raw_text);
        let features = tag_features(&cleaned_text);
        let is_moderator = self
            .moderator
            .as_deref()
            .is_some_and(|moderator| moderator_key(&utterance.speaker) == moderator);

        AnnotatedUtterance {
            utterance,
            cleaned_text,
            features,
            is_moderator,
        }
    }

    fn annotate_all(&self, utterances: Vec<Utterance>) -> Vec<AnnotatedUtterance> {
        utterances.into_iter().map(|u| self.annotate(u)).collect()
    }
}

fn moderator_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Append-only, ordered store of annotated utterances owned by the caller
///
/// Indices of appended batches are shifted so the running sequence stays
/// zero-based and gap-free. Stored rows are never modified.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAccumulator {
    utterances: Vec<AnnotatedUtterance>,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch whose indices start at zero; returns the appended slice
    pub fn append(&mut self, batch: Vec<AnnotatedUtterance>) -> &[AnnotatedUtterance] {
        let offset = self.utterances.len();
        self.utterances.extend(batch.into_iter().enumerate().map(|(i, mut annotated)| {
            annotated.utterance.sequence_index = offset + i;
            annotated
        }));
        &self.utterances[offset..]
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn utterances(&self) -> &[AnnotatedUtterance] {
        &self.utterances
    }

    /// Rows appended at or after `index`
    pub fn since(&self, index: usize) -> &[AnnotatedUtterance] {
        &self.utterances[index.min(self.utterances.len())..]
    }
}
