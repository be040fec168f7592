use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::utils::bytes_to_hex;

/// Single file inside an APK along with the digest of its contents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub hash: String,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
        }
    }

    /// Create an entry for the given contents, hashed with SHA-256
    pub fn from_contents(path: impl Into<String>, contents: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let digest = hasher.finalize();
        Self::new(path, bytes_to_hex(digest.as_slice()))
    }
}

/// Buckets used for the per-file hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Drawable,
    Layout,
    Asset,
    Other,
}

impl FileCategory {
    /// Classify a path inside the APK
    pub fn for_path(path: &str) -> Self {
        let path = path.trim_start_matches('/');
        if path.starts_with("assets/") {
            return Self::Asset;
        }
        let Some(rest) = path.strip_prefix("res/") else {
            return Self::Other;
        };
        let dir = rest.split('/').next().unwrap_or_default();
        // Qualified directories look like drawable-hdpi-v4 or layout-land
        let base = dir.split('-').next().unwrap_or_default();
        match base {
            "drawable" | "mipmap" => Self::Drawable,
            "layout" => Self::Layout,
            _ => Self::Other,
        }
    }
}

/// Digests of the files found in the APK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FileData {
    /// Digest of classes.dex
    pub dex_hash: Option<String>,
    /// Digest of resources.arsc
    pub arsc_hash: Option<String>,
    pub drawable_hashes: Vec<FileEntry>,
    pub layout_hashes: Vec<FileEntry>,
    pub asset_hashes: Vec<FileEntry>,
    pub other_hashes: Vec<FileEntry>,
}

impl FileData {
    /// Reduce a category of entries to their digests, keeping order
    pub fn only_hash(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|it| it.hash.clone()).collect()
    }

    pub fn category(&self, category: FileCategory) -> &[FileEntry] {
        match category {
            FileCategory::Drawable => &self.drawable_hashes,
            FileCategory::Layout => &self.layout_hashes,
            FileCategory::Asset => &self.asset_hashes,
            FileCategory::Other => &self.other_hashes,
        }
    }

    /// Append an entry to the category its path belongs to.
    ///
    /// `classes.dex` and `resources.arsc` are stored in their dedicated
    /// fields instead.
    pub fn push(&mut self, entry: FileEntry) {
        match entry.path.trim_start_matches('/') {
            "classes.dex" => {
                self.dex_hash = Some(entry.hash);
                return;
            }
            "resources.arsc" => {
                self.arsc_hash = Some(entry.hash);
                return;
            }
            _ => {}
        }
        let into = match FileCategory::for_path(&entry.path) {
            FileCategory::Drawable => &mut self.drawable_hashes,
            FileCategory::Layout => &mut self.layout_hashes,
            FileCategory::Asset => &mut self.asset_hashes,
            FileCategory::Other => &mut self.other_hashes,
        };
        into.push(entry);
    }
}
