use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::error::{Result, TranscriptError};

/// Reads whatever has been appended to a file since the previous fetch
///
/// Only complete lines are returned; a trailing partial line stays in the
/// file until its newline arrives or [`FileTailer::fetch_remaining`] drains it.
#[derive(Debug, Default)]
pub struct FileTailer {
    path: Option<PathBuf>,
    position: u64,
}

impl FileTailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            position: 0,
        }
    }

    /// Switch to a new file and start reading it from the beginning
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
        self.position = 0;
    }

    /// Byte offset of the first unread byte
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Return the newly appended complete lines (possibly empty)
    pub fn fetch_new_data(&mut self) -> Result<String> {
        self.fetch(false)
    }

    /// Return everything unread, including a final line without a newline
    pub fn fetch_remaining(&mut self) -> Result<String> {
        self.fetch(true)
    }

    fn fetch(&mut self, include_partial: bool) -> Result<String> {
        let path = self.path.as_deref().ok_or(TranscriptError::NoSource)?;

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TranscriptError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        // truncated or replaced file: start over
        if file.metadata()?.len() < self.position {
            self.position = 0;
        }

        file.seek(SeekFrom::Start(self.position))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        if !include_partial {
            let complete = match buffer.iter().rposition(|&b| b == b'\n') {
                Some(last_newline) => last_newline + 1,
                None => return Ok(String::new()),
            };
            buffer.truncate(complete);
        }
        self.position += buffer.len() as u64;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
