//! Entry manifests: one `title,image_path,flag` record per line, where a
//! flag of `"1"` marks the entry as large (2x2 cells) and anything else as
//! small (one cell).

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error::MontageError;

/// Whether an entry occupies one grid cell or a 2x2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Large,
}

/// One manifest record. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Entry {
    pub title: String,
    pub image: PathBuf,
    pub size: SizeClass,
}

impl Entry {
    pub fn is_large(&self) -> bool {
        matches!(self.size, SizeClass::Large)
    }
}

/// An ordered list of entries, in original input order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<Entry>,
}

impl Manifest {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, size: SizeClass) -> usize {
        self.entries.iter().filter(|e| e.size == size).count()
    }
}

/// Parse a whole manifest. Fails on the first malformed record, so callers
/// never start rendering against a partially valid input. Blank lines are
/// skipped.
pub fn load_from_str(s: &str) -> Result<Manifest, MontageError> {
    let mut entries = Vec::new();
    for (i, line) in s.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(parse_line(line).map_err(|detail| MontageError::MalformedRecord {
            line: i + 1,
            detail,
        })?);
    }
    Ok(Manifest { entries })
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Manifest> {
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest {}", path.as_ref().display()))?;
    Ok(load_from_str(&data)?)
}

fn parse_line(line: &str) -> Result<Entry, String> {
    let fields: Vec<&str> = line.split(',').collect();
    match fields.as_slice() {
        [title, image, flag] => Ok(Entry {
            title: (*title).to_string(),
            image: PathBuf::from(image),
            size: if *flag == "1" { SizeClass::Large } else { SizeClass::Small },
        }),
        _ => Err(format!("expected 3 comma-separated fields, got {}", fields.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_in_order() {
        let m = load_from_str("a,/img/a.jpg,0\nb,/img/b.jpg,1\nc,/img/c.jpg,x\n").unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.entries()[0].title, "a");
        assert_eq!(m.entries()[1].title, "b");
        assert_eq!(m.entries()[2].title, "c");
    }

    #[test]
    fn test_size_flag_mapping() {
        let m = load_from_str("a,a.jpg,1\nb,b.jpg,0\nc,c.jpg,2\n").unwrap();
        assert_eq!(m.entries()[0].size, SizeClass::Large);
        // anything that is not exactly "1" is small
        assert_eq!(m.entries()[1].size, SizeClass::Small);
        assert_eq!(m.entries()[2].size, SizeClass::Small);
        assert_eq!(m.count_of(SizeClass::Large), 1);
        assert_eq!(m.count_of(SizeClass::Small), 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let m = load_from_str("a,a.jpg,0\n\n  \nb,b.jpg,1\n").unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let err = load_from_str("a,a.jpg,0\nno-commas-here\n").unwrap_err();
        match err {
            MontageError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(load_from_str("a,b,c,d\n").is_err());
    }

    #[test]
    fn test_empty_manifest_is_ok() {
        let m = load_from_str("").unwrap();
        assert!(m.is_empty());
    }
}
