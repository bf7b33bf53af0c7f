//! Loads a deck from a delimited two-column text file (term, translation).
//!
//! One record per line, no header row, UTF-8. Records that do not have exactly
//! two fields are reported as warnings and skipped; the rest of the file still
//! loads. A term seen twice keeps its first position and takes the later
//! translation.

use crate::models::{CardEntry, Deck};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("expected 2 fields, found {0}")]
    FieldCount(usize),
    #[error("field is not valid UTF-8")]
    Encoding,
    #[error("unreadable record: {0}")]
    Malformed(String),
}

/// A skipped record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    pub line: u64,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No valid cards in {} ({} malformed rows)", path.display(), warnings.len())]
    EmptyDeck {
        path: PathBuf,
        warnings: Vec<FormatError>,
    },
}

#[derive(Clone, Debug)]
pub struct LoadedDeck {
    pub deck: Deck,
    pub warnings: Vec<FormatError>,
}

/// Loads the deck stored at `path`.
pub fn load(path: &Path, options: LoadOptions) -> Result<LoadedDeck, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    log::debug!("Loading deck from {}", path.display());
    load_from_reader(file, path, options)
}

/// Same as `load`, reading from any source. `path` only names the deck and
/// appears in errors.
pub fn load_from_reader<R: Read>(
    reader: R,
    path: &Path,
    options: LoadOptions,
) -> Result<LoadedDeck, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut entries: Vec<CardEntry> = Vec::new();
    let mut index_by_term: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                match err.into_kind() {
                    csv::ErrorKind::Io(source) => {
                        return Err(LoadError::Io {
                            path: path.to_path_buf(),
                            source,
                        });
                    }
                    other => {
                        warnings.push(FormatError {
                            line,
                            kind: FormatErrorKind::Malformed(format!("{:?}", other)),
                        });
                        continue;
                    }
                }
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            warnings.push(FormatError {
                line,
                kind: FormatErrorKind::FieldCount(record.len()),
            });
            continue;
        }
        let (Ok(term), Ok(translation)) = (
            std::str::from_utf8(&record[0]),
            std::str::from_utf8(&record[1]),
        ) else {
            warnings.push(FormatError {
                line,
                kind: FormatErrorKind::Encoding,
            });
            continue;
        };

        match index_by_term.get(term) {
            Some(&index) => {
                log::warn!(
                    "Duplicate term '{}' on line {}, keeping the later translation",
                    term,
                    line
                );
                entries[index].translation = translation.to_string();
            }
            None => {
                index_by_term.insert(term.to_string(), entries.len());
                entries.push(CardEntry::new(term, translation));
            }
        }
    }

    for warning in &warnings {
        log::warn!("Skipping record in {}: {}", path.display(), warning);
    }

    if entries.is_empty() {
        return Err(LoadError::EmptyDeck {
            path: path.to_path_buf(),
            warnings,
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| Deck::default().name);
    log::debug!("Loaded {} cards into deck '{}'", entries.len(), name);

    Ok(LoadedDeck {
        deck: Deck::new(name, entries),
        warnings,
    })
}
