use std::path::Path;

use tracing::debug;

use crate::error::{Result, TranscriptError};
use crate::models::TranscriptFormat;

/// Choose a format from the file extension: `json`, `csv`, or `txt`
/// (blank-line-delimited turns)
pub fn format_from_path(path: &Path) -> Result<TranscriptFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(TranscriptFormat::Json),
        "csv" => Ok(TranscriptFormat::Csv),
        "txt" => Ok(TranscriptFormat::Blocks),
        _ => Err(TranscriptError::UnsupportedFormat(extension)),
    }
}

/// Read a transcript source, mapping a missing file to `NotFound`
pub fn read_source(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Read {} characters from {:?}", content.len(), path);
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TranscriptError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(TranscriptError::Io(e)),
    }
}

/// Read a transcript and resolve its format, preferring an explicit override
pub fn load_transcript(path: &Path, format: Option<TranscriptFormat>) -> Result<(String, TranscriptFormat)> {
    if !path.exists() {
        return Err(TranscriptError::NotFound(path.to_path_buf()));
    }
    let format = match format {
        Some(format) => format,
        None => format_from_path(path)?,
    };
    let content = read_source(path)?;
    Ok((content, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_path(Path::new("a.json")).unwrap(), TranscriptFormat::Json);
        assert_eq!(format_from_path(Path::new("a.CSV")).unwrap(), TranscriptFormat::Csv);
        assert_eq!(format_from_path(Path::new("dir/a.txt")).unwrap(), TranscriptFormat::Blocks);
        assert!(matches!(
            format_from_path(Path::new("a.docx")),
            Err(TranscriptError::UnsupportedFormat(ext)) if ext == "docx"
        ));
        assert!(format_from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = PathBuf::from("/definitely/not/here.txt");
        assert!(matches!(read_source(&path), Err(TranscriptError::NotFound(_))));
        assert!(matches!(load_transcript(&path, None), Err(TranscriptError::NotFound(_))));
    }

    #[test]
    fn test_load_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.log");
        std::fs::write(&path, "A [0 - 1]: hi\n").unwrap();

        assert!(matches!(load_transcript(&path, None), Err(TranscriptError::UnsupportedFormat(_))));
        let (content, format) = load_transcript(&path, Some(TranscriptFormat::Timestamped)).unwrap();
        assert_eq!(format, TranscriptFormat::Timestamped);
        assert_eq!(content, "A [0 - 1]: hi\n");
    }
}
