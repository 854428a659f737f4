use std::fs::OpenOptions;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{AnnotatedUtterance, Utterance};

/// JSON transcript wrapper: `{"transcript": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptDocument {
    pub transcript: Vec<TranscriptEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub text: String,
}

impl TranscriptDocument {
    pub fn from_utterances(utterances: &[Utterance]) -> Self {
        Self {
            transcript: utterances
                .iter()
                .map(|u| TranscriptEntry {
                    speaker: u.speaker.clone(),
                    start_time: u.start_time.clone(),
                    end_time: u.end_time.clone(),
                    text: u.raw_text.clone(),
                })
                .collect(),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// One flat output row per annotated utterance
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRow<'a> {
    pub sequence_index: usize,
    pub speaker: &'a str,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub text: &'a str,
    pub cleaned_text: &'a str,
    pub is_question: bool,
    pub is_exclamation: bool,
    pub is_statement: bool,
    pub contains_negation: bool,
    pub contains_reference: bool,
    pub contains_agreement: bool,
    pub contains_disagreement: bool,
    pub contains_emotion_words: bool,
    pub contains_personal_attack: bool,
    pub contains_group_identity: bool,
    pub contains_emphasis: bool,
    pub contains_conditional: bool,
    pub sentence_length: usize,
    pub is_moderator: bool,
}

impl<'a> From<&'a AnnotatedUtterance> for AnnotatedRow<'a> {
    fn from(row: &'a AnnotatedUtterance) -> Self {
        let u = &row.utterance;
        let f = &row.features;
        Self {
            sequence_index: u.sequence_index,
            speaker: &u.speaker,
            start_time: u.start_time.as_deref(),
            end_time: u.end_time.as_deref(),
            text: &u.raw_text,
            cleaned_text: &row.cleaned_text,
            is_question: f.is_question,
            is_exclamation: f.is_exclamation,
            is_statement: f.is_statement(),
            contains_negation: f.contains_negation,
            contains_reference: f.contains_reference,
            contains_agreement: f.contains_agreement,
            contains_disagreement: f.contains_disagreement,
            contains_emotion_words: f.contains_emotion_words,
            contains_personal_attack: f.contains_personal_attack,
            contains_group_identity: f.contains_group_identity,
            contains_emphasis: f.contains_emphasis,
            contains_conditional: f.contains_conditional,
            sentence_length: f.sentence_length,
            is_moderator: row.is_moderator,
        }
    }
}

/// Write annotated rows to a new CSV file (header included)
pub fn write_annotated_csv(path: &Path, rows: &[AnnotatedUtterance]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(AnnotatedRow::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write annotated rows as a pretty-printed JSON array
pub fn write_annotated_json(path: &Path, rows: &[AnnotatedUtterance]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, rows)?;
    Ok(())
}

/// Append-mode CSV sink for incremental processing
///
/// The header is written only when the file starts out empty.
pub struct CsvSink {
    writer: csv::Writer<std::fs::File>,
    rows_written: usize,
}

impl CsvSink {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, rows: &[AnnotatedUtterance]) -> Result<()> {
        for row in rows {
            self.writer.serialize(AnnotatedRow::from(row))?;
        }
        self.writer.flush()?;
        self.rows_written += rows.len();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

/// Short text rendering of annotated rows
pub fn format_preview(rows: &[AnnotatedUtterance], limit: usize) -> String {
    let mut output = String::new();

    for row in rows.iter().take(limit) {
        let mut flags = row.features.active();
        if row.is_moderator {
            flags.push("moderator");
        }
        output.push_str(&format!(
            "[{}] {}: {}\n    {} words; {}\n",
            row.sequence_index(),
            row.speaker(),
            truncate(&row.cleaned_text, 60),
            row.features.sentence_length,
            flags.join(", ")
        ));
    }

    output
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push_str("...");
    short
}
