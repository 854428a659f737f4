pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod realtime;
pub mod segment;
pub mod text;

pub use error::{Result, TranscriptError};
pub use io::{
    format_from_path, format_preview, load_transcript, read_source, write_annotated_csv,
    write_annotated_json, AnnotatedRow, CsvSink, TranscriptDocument, TranscriptEntry,
};
pub use models::{
    AnnotatedUtterance, Feature, Features, TranscriptFormat, TranscriptRecord, Utterance,
};
pub use pipeline::{Pipeline, PipelineConfig, TranscriptAccumulator};
pub use realtime::{flush, watch, FileTailer, WatchConfig, WatchSummary};
pub use segment::{
    segment, segment_blocks, segment_records, segment_speaker_lines, segment_timestamped,
    CollectingObserver, SegmentIssue, SegmentObserver, SilentObserver, TracingObserver,
};
pub use text::{normalize, tag_features, Normalizer, NormalizerConfig};
