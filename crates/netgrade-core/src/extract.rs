//! Loading router configs out of submissions
//!
//! A submission is a zip archive (or, for local use, a directory) holding
//! one `.txt` file per router. Entries are keyed by base filename and keep
//! the order in which they were first seen.

use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::{GradeError, Result};

/// Router id → raw config text, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    entries: Vec<(String, String)>,
}

impl ConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a config; a repeated id replaces the text but keeps its position
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((id, text)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, text)| (id.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ConfigSet::new();
        for (id, text) in iter {
            set.insert(id, text);
        }
        set
    }
}

/// Where a submission's configs come from
#[derive(Debug, Clone)]
pub enum ConfigInput {
    /// Zip archive held in memory, with a display name for messages
    ArchiveBytes { name: String, bytes: Vec<u8> },
    /// Zip archive on disk
    ArchivePath(PathBuf),
    /// Directory tree of `.txt` files
    Directory(PathBuf),
}

impl ConfigInput {
    /// Pick archive or directory based on what `path` is
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ConfigInput::Directory(path)
        } else {
            ConfigInput::ArchivePath(path)
        }
    }

    /// Name used in messages and for the assignment-type hint
    pub fn name(&self) -> String {
        match self {
            ConfigInput::ArchiveBytes { name, .. } => name.clone(),
            ConfigInput::ArchivePath(path) | ConfigInput::Directory(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Load configs, failing with [`GradeError::NoConfigsFound`] when there are none
    pub fn load(&self) -> Result<ConfigSet> {
        let set = self.load_lenient()?;
        if set.is_empty() {
            return Err(GradeError::no_configs(self.name()));
        }
        Ok(set)
    }

    /// Load configs; zero `.txt` entries is an empty set, not an error
    pub fn load_lenient(&self) -> Result<ConfigSet> {
        match self {
            ConfigInput::ArchiveBytes { bytes, .. } => read_archive(Cursor::new(bytes)),
            ConfigInput::ArchivePath(path) => {
                let file = std::fs::File::open(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => GradeError::SourceNotFound { path: path.clone() },
                    _ => GradeError::io_operation("open archive", path.display(), e),
                })?;
                read_archive(file)
            }
            ConfigInput::Directory(path) => read_directory(path),
        }
    }
}

/// Load configs from zip bytes, failing when no `.txt` entries exist
pub fn load_configs(bytes: &[u8]) -> Result<ConfigSet> {
    let set = load_configs_lenient(bytes)?;
    if set.is_empty() {
        return Err(GradeError::no_configs("archive"));
    }
    Ok(set)
}

/// Load configs from zip bytes; an archive without `.txt` entries yields an empty set
pub fn load_configs_lenient(bytes: &[u8]) -> Result<ConfigSet> {
    read_archive(Cursor::new(bytes))
}

fn is_config_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".txt")
}

fn base_name(entry_name: &str) -> &str {
    entry_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(entry_name)
}

/// Upper bound on the buffer reserved up front for one archive entry.
///
/// Entry headers come from untrusted uploads, so the declared size only
/// seeds the allocation and `read_to_end` grows past it as needed.
const MAX_PREALLOC: usize = 1 << 20;

fn capacity_hint(declared: u64) -> usize {
    declared.min(MAX_PREALLOC as u64) as usize
}

#[instrument(skip(reader))]
fn read_archive<R: Read + Seek>(reader: R) -> Result<ConfigSet> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut set = ConfigSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = base_name(entry.name()).to_string();
        if !is_config_name(&name) {
            debug!(entry = entry.name(), "skipping non-config entry");
            continue;
        }

        let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
        entry.read_to_end(&mut bytes)?;
        set.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    }

    debug!(configs = set.len(), "read archive");
    Ok(set)
}

#[instrument]
fn read_directory(root: &Path) -> Result<ConfigSet> {
    if !root.exists() {
        return Err(GradeError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut set = ConfigSet::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_config_name(&name) {
            continue;
        }
        let bytes = std::fs::read(entry.path())
            .map_err(|e| GradeError::io_operation("read config", entry.path().display(), e))?;
        set.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    }

    debug!(configs = set.len(), "read directory");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_load_keys_by_base_name_in_order() {
        let bytes = archive(&[
            ("lab/R2.txt", b"hostname R2"),
            ("lab/R1.TXT", b"hostname R1"),
            ("lab/readme.md", b"ignored"),
        ]);
        let set = load_configs(&bytes).unwrap();
        let ids: Vec<&str> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["R2.txt", "R1.TXT"]);
        assert_eq!(set.get("R2.txt"), Some("hostname R2"));
    }

    #[test]
    fn test_capacity_hint_clamps_declared_size() {
        assert_eq!(capacity_hint(0), 0);
        assert_eq!(capacity_hint(512), 512);
        assert_eq!(capacity_hint(0xFFFF_FFF0), MAX_PREALLOC);
    }

    #[test]
    fn test_inflated_declared_size_still_loads() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("R1.txt", options).unwrap();
        writer.write_all(b"hostname R1").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        // Uncompressed size sits 24 bytes into the central directory header.
        let central = bytes
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let set = load_configs(&bytes).unwrap();
        assert_eq!(set.get("R1.txt"), Some("hostname R1"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes = archive(&[("R1.txt", b"hostname R\xff1")]);
        let set = load_configs(&bytes).unwrap();
        assert_eq!(set.get("R1.txt"), Some("hostname R\u{fffd}1"));
    }

    #[test]
    fn test_no_configs_is_error() {
        let bytes = archive(&[("notes.md", b"nothing")]);
        let err = load_configs(&bytes).unwrap_err();
        assert!(matches!(err, GradeError::NoConfigsFound { .. }));
    }

    #[test]
    fn test_lenient_returns_empty() {
        let bytes = archive(&[("notes.md", b"nothing")]);
        assert!(load_configs_lenient(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_bytes_are_archive_error() {
        let err = load_configs(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, GradeError::Archive(_)));
    }

    #[test]
    fn test_duplicate_base_names_keep_first_position() {
        let bytes = archive(&[
            ("a/R1.txt", b"first"),
            ("R2.txt", b"two"),
            ("b/R1.txt", b"second"),
        ]);
        let set = load_configs(&bytes).unwrap();
        let entries: Vec<(&str, &str)> = set.iter().collect();
        assert_eq!(entries, vec![("R1.txt", "second"), ("R2.txt", "two")]);
    }

    #[test]
    fn test_directory_input() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("R1.txt"), "hostname R1").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("R2.txt"), "hostname R2").unwrap();
        std::fs::write(dir.path().join("notes.md"), "skip").unwrap();

        let input = ConfigInput::from_path(dir.path());
        let set = input.load().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("R2.txt"), Some("hostname R2"));
    }

    #[test]
    fn test_empty_directory_is_no_configs() {
        let dir = tempdir().unwrap();
        let input = ConfigInput::Directory(dir.path().to_path_buf());
        assert!(matches!(
            input.load().unwrap_err(),
            GradeError::NoConfigsFound { .. }
        ));
        assert!(input.load_lenient().unwrap().is_empty());
    }

    #[test]
    fn test_missing_archive_path() {
        let dir = tempdir().unwrap();
        let input = ConfigInput::ArchivePath(dir.path().join("absent.zip"));
        assert!(matches!(
            input.load().unwrap_err(),
            GradeError::SourceNotFound { .. }
        ));
    }
}
