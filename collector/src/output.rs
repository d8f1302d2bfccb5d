//! Everything the collector writes to disk: the video CSV and the plain-text
//! category and language listings.

use crate::error::{Error, Result};
use crate::extract::{CSV_HEADER, VideoRecord};
use crate::youtube_api::{Categories, Languages};
use csv::{QuoteStyle, WriterBuilder};
use indexmap::IndexMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LANGUAGES_FILE: &str = "YouTube Languages.txt";

/// `{dir}/{REGION}_YouTube_Cat.csv`
pub fn categories_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{region}_YouTube_Cat.csv"))
}

/// `{dir}/{REGION}.csv`, where video records go unless told otherwise.
pub fn default_records_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{region}.csv"))
}

/// Append-only CSV of [`VideoRecord`]s.
///
/// Every field is quoted. The header row is written only when the target
/// starts out empty, so successive runs against the same file keep a single
/// header. Each appended row is flushed before `append` returns.
#[derive(Debug)]
pub struct RecordSink<W: Write> {
    writer: csv::Writer<W>,
}

impl RecordSink<File> {
    /// Opens (and if necessary creates) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        create_parent(path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        let is_new = file.metadata().map_err(|e| Error::io(path, e))?.len() == 0;

        tracing::debug!(path = %path.display(), is_new, "opened video record file");
        Self::from_writer(file, is_new)
    }
}

impl<W: Write> RecordSink<W> {
    pub fn from_writer(writer: W, write_header: bool) -> Result<Self> {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(writer);
        let mut sink = Self { writer };
        if write_header {
            sink.writer.write_record(CSV_HEADER)?;
            sink.writer.flush().map_err(csv::Error::from)?;
        }
        Ok(sink)
    }

    /// Writes one record and flushes it through to the underlying writer.
    pub fn append(&mut self, record: &VideoRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Persist(e.into_error().into()))
    }
}

/// Writes one `"{id}: {title}"` line per category and returns the file path.
pub fn write_categories(dir: &Path, region: &str, categories: &Categories) -> Result<PathBuf> {
    let path = categories_path(dir, region);
    write_listing(&path, categories)?;
    Ok(path)
}

/// Writes one `"{code}: {name}"` line per language and returns the file path.
pub fn write_languages(dir: &Path, languages: &Languages) -> Result<PathBuf> {
    let path = dir.join(LANGUAGES_FILE);
    write_listing(&path, languages)?;
    Ok(path)
}

fn write_listing(path: &Path, entries: &IndexMap<String, String>) -> Result<()> {
    create_parent(path)?;
    let mut content = String::new();
    for (key, value) in entries {
        content.push_str(&format!("{key}: {value}\n"));
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "wrote listing");
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}
