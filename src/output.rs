//! Newline-delimited JSON output.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{Error, Result};

/// Characters that cannot appear inside a single path component on the
/// platforms we write to.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn a query into a file base name: reserved and control characters
/// become `_`, everything else is kept verbatim.
pub fn file_stem(query: &str) -> String {
    query
        .chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// `<folder>/<query>.json`
pub fn output_path(folder: &Path, query: &str) -> PathBuf {
    folder.join(format!("{}.json", file_stem(query)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Created,
    Writing,
    Flushed,
    Aborted,
}

/// Buffered writer producing one JSON object per line.
///
/// Any serialization or IO failure moves the writer to
/// [`WriterState::Aborted`]; the partial file is left on disk.
pub struct ResultWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    state: WriterState,
    lines: usize,
}

impl ResultWriter {
    /// Create the output folder (with any missing parents) and create or
    /// truncate `<folder>/<query>.json`.
    pub async fn create(folder: &Path, query: &str) -> Result<Self> {
        fs::create_dir_all(folder)
            .await
            .map_err(|source| Error::CreateFolder {
                path: folder.to_path_buf(),
                source,
            })?;

        let path = output_path(folder, query);
        debug!(path = %path.display(), "Creating output file");
        let file = File::create(&path)
            .await
            .map_err(|source| Error::CreateFile {
                path: path.clone(),
                source,
            })?;

        Ok(ResultWriter {
            path,
            writer: BufWriter::new(file),
            state: WriterState::Created,
            lines: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Serialize `record` as a single line of JSON and append it.
    pub async fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        self.ensure_open()?;
        self.state = WriterState::Writing;

        let mut line = match serde_json::to_vec(record) {
            Ok(line) => line,
            Err(e) => {
                self.state = WriterState::Aborted;
                return Err(Error::Serialization(e));
            }
        };
        line.push(b'\n');

        if let Err(source) = self.writer.write_all(&line).await {
            self.state = WriterState::Aborted;
            return Err(Error::WriteLine {
                path: self.path.clone(),
                source,
            });
        }

        self.lines += 1;
        Ok(())
    }

    /// Flush buffered lines to disk and return how many were written.
    pub async fn finish(mut self) -> Result<usize> {
        self.ensure_open()?;

        if let Err(source) = self.writer.flush().await {
            self.state = WriterState::Aborted;
            return Err(Error::Flush {
                path: self.path.clone(),
                source,
            });
        }

        self.state = WriterState::Flushed;
        Ok(self.lines)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            WriterState::Created | WriterState::Writing => Ok(()),
            WriterState::Flushed | WriterState::Aborted => Err(Error::WriterAborted {
                path: self.path.clone(),
            }),
        }
    }
}
