//! A JSON file holding one serde value. Reads tell "absent" apart from "unreadable", writes go
//! through a temporary file in the same directory that is then renamed over the target, so
//! readers see either the old or the new contents.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreWriteError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize value for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub struct JsonFileStore<A> {
    path: PathBuf,
    phantom: PhantomData<A>,
}

impl<A: Serialize + DeserializeOwned> JsonFileStore<A> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<A>, StoreReadError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreReadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|source| StoreReadError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Like [`Self::read`] but an absent or unreadable file yields the default value. Read
    /// errors are logged, never returned.
    pub fn read_or_default(&self) -> A
    where
        A: Default,
    {
        match self.read() {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(path = %self.path.display(), "no stored state found, starting empty");
                A::default()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "failed to load stored state, starting empty: {e}"
                );
                A::default()
            }
        }
    }

    pub fn write(&self, value: &A) -> Result<(), StoreWriteError> {
        let io_error = |source: io::Error| StoreWriteError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp_file = NamedTempFile::new_in(dir).map_err(io_error)?;

        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
            StoreWriteError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(io_error)?;
        drop(writer);

        temp_file
            .persist(&self.path)
            .map_err(|persist_error| io_error(persist_error.error))?;

        Ok(())
    }
}
