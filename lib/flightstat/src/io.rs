use crate::error::{AnalysisError, FileError};
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    fs::create_dir_all(path.as_ref()).with_context(|| format!("create_dir_all {}", path.as_ref().display()))
}

/// Lists regular files under `dir` whose file name matches `pattern`, sorted by path.
/// Only direct children are listed unless `recursive` is set.
pub fn discover_files(dir: impl AsRef<Path>, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>, AnalysisError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(AnalysisError::CorpusMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(AnalysisError::CorpusNotDirectory(dir.to_path_buf()));
    }
    let matcher = glob::Pattern::new(pattern).map_err(|source| AnalysisError::BadPattern { pattern: pattern.to_string(), source })?;

    let mut walker = walkdir::WalkDir::new(dir).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }
    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| AnalysisError::CorpusUnreadable { path: dir.to_path_buf(), source })?;
        if entry.file_type().is_file() && matcher.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

pub fn open_writer(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    if let Some(parent) = path.as_ref().parent() {
        ensure_dir(parent)?;
    }
    let file = File::create(path.as_ref()).with_context(|| format!("create {}", path.as_ref().display()))?;
    Ok(BufWriter::new(file))
}

pub fn open_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, std::io::Error> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Reads a whole file as a JSON array of `T`.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FileError> {
    let reader = open_reader(path).map_err(|source| FileError::Unreadable { path: path.to_path_buf(), source })?;
    serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            let source = std::io::Error::from(source);
            FileError::Unreadable { path: path.to_path_buf(), source }
        } else {
            FileError::Malformed { path: path.to_path_buf(), source }
        }
    })
}

/// Writes `items` as a JSON array indented by four spaces.
pub fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let mut writer = open_writer(path)?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    items.serialize(&mut ser).with_context(|| format!("serialize {}", path.display()))?;
    writer.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
