//! Flat, insertion-ordered file store for the playground project.
//!
//! Every mutation goes through [`FileStore::set`], [`FileStore::create_dir`] or
//! [`FileStore::remove`]; each successful call queues one [`FileChange`] per
//! touched node, which the store drains with [`FileStore::take_changes`] inside
//! the same dispatch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

use super::error::{Result, SessionError};
use super::language::LanguageTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub byte_size: usize,
    pub last_modified: SystemTime,
    pub language: LanguageTag,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub path: String,
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub metadata: FileMetadata,
}

impl FileNode {
    fn file(path: &str, content: String) -> Self {
        Self {
            path: path.to_string(),
            kind: FileKind::File,
            metadata: FileMetadata {
                byte_size: content.len(),
                last_modified: SystemTime::now(),
                language: LanguageTag::from_path(path),
                version: 1,
            },
            content: Some(content),
        }
    }

    fn directory(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: FileKind::Directory,
            content: None,
            metadata: FileMetadata {
                byte_size: 0,
                last_modified: SystemTime::now(),
                language: LanguageTag::PlainText,
                version: 1,
            },
        }
    }

    pub fn name(&self) -> &str {
        file_name(&self.path)
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// File text; empty for directories.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// One entry of the snapshot handed to the preview compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub kind: FileKind,
}

#[derive(Debug, Default)]
pub struct FileStore {
    files: IndexMap<String, FileNode>,
    pending: Vec<FileChange>,
    revision: u64,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Result<&FileNode> {
        self.files
            .get(path)
            .ok_or_else(|| SessionError::NotFound(path.to_string()))
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.files.get(path).is_some_and(FileNode::is_file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.values().filter(|node| node.is_file()).count()
    }

    /// Bumped once per successful mutating call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &FileNode)> + '_ {
        self.files.iter().map(|(path, node)| (path.as_str(), node))
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn set(&mut self, path: &str, content: impl Into<String>) -> Result<ChangeKind> {
        validate_path(path)?;
        self.ensure_no_file_ancestor(path)?;
        self.ensure_no_descendants(path)?;

        let content = content.into();
        let kind = match self.files.get_mut(path) {
            Some(node) if node.kind == FileKind::Directory => {
                return Err(SessionError::InvalidPath {
                    path: path.to_string(),
                    reason: "path is a directory",
                });
            }
            Some(node) => {
                node.metadata.byte_size = content.len();
                node.metadata.last_modified = SystemTime::now();
                node.metadata.version += 1;
                node.content = Some(content);
                ChangeKind::Updated
            }
            None => {
                self.files
                    .insert(path.to_string(), FileNode::file(path, content));
                ChangeKind::Created
            }
        };

        self.record(path, kind);
        Ok(kind)
    }

    /// Creates a directory node. Returns `false` if the directory already exists.
    pub fn create_dir(&mut self, path: &str) -> Result<bool> {
        validate_path(path)?;
        self.ensure_no_file_ancestor(path)?;

        match self.files.get(path) {
            Some(node) if node.kind == FileKind::Directory => return Ok(false),
            Some(_) => {
                return Err(SessionError::InvalidPath {
                    path: path.to_string(),
                    reason: "a file already exists at this path",
                });
            }
            None => {}
        }

        self.files
            .insert(path.to_string(), FileNode::directory(path));
        self.record(path, ChangeKind::Created);
        Ok(true)
    }

    /// Removes `path` (and every descendant when it is a directory).
    /// Absent paths are a no-op. Returns the removed paths in insertion order.
    pub fn remove(&mut self, path: &str) -> Vec<String> {
        let Some(node) = self.files.get(path) else {
            return Vec::new();
        };

        let removed: Vec<String> = if node.kind == FileKind::Directory {
            let prefix = format!("{}/", path);
            self.files
                .keys()
                .filter(|key| key.as_str() == path || key.starts_with(&prefix))
                .cloned()
                .collect()
        } else {
            vec![path.to_string()]
        };

        for key in &removed {
            self.files.shift_remove(key);
            self.pending.push(FileChange {
                path: key.clone(),
                kind: ChangeKind::Deleted,
            });
        }
        self.revision += 1;
        removed
    }

    pub fn take_changes(&mut self) -> Vec<FileChange> {
        std::mem::take(&mut self.pending)
    }

    /// `(path, content)` of every file, in insertion order.
    pub fn source_snapshot(&self) -> Vec<SourceFile> {
        self.files
            .values()
            .filter(|node| node.is_file())
            .map(|node| SourceFile {
                path: node.path.clone(),
                content: node.text().to_string(),
            })
            .collect()
    }

    /// Directory view derived from the flat map; parents implied by file
    /// paths are listed even without a directory node.
    pub fn tree(&self) -> Vec<TreeRow> {
        let mut rows: BTreeMap<String, TreeRow> = BTreeMap::new();

        for node in self.files.values() {
            let mut end = 0;
            while let Some(offset) = node.path[end..].find('/') {
                let parent = &node.path[..end + offset];
                rows.entry(parent.to_string())
                    .or_insert_with(|| tree_row(parent, FileKind::Directory));
                end += offset + 1;
            }
            rows.insert(node.path.clone(), tree_row(&node.path, node.kind));
        }

        rows.into_values().collect()
    }

    fn record(&mut self, path: &str, kind: ChangeKind) {
        self.revision += 1;
        self.pending.push(FileChange {
            path: path.to_string(),
            kind,
        });
    }

    fn ensure_no_file_ancestor(&self, path: &str) -> Result<()> {
        let mut end = 0;
        while let Some(offset) = path[end..].find('/') {
            let ancestor = &path[..end + offset];
            if self.files.get(ancestor).is_some_and(FileNode::is_file) {
                return Err(SessionError::InvalidPath {
                    path: path.to_string(),
                    reason: "a parent segment is a file",
                });
            }
            end += offset + 1;
        }
        Ok(())
    }

    fn ensure_no_descendants(&self, path: &str) -> Result<()> {
        let prefix = format!("{}/", path);
        if self.files.keys().any(|key| key.starts_with(&prefix)) {
            return Err(SessionError::InvalidPath {
                path: path.to_string(),
                reason: "path has descendants",
            });
        }
        Ok(())
    }
}

pub fn validate_path(path: &str) -> Result<()> {
    let reason = if path.is_empty() {
        Some("path is empty")
    } else if path.starts_with('/') {
        Some("path must be relative")
    } else if path.ends_with('/') {
        Some("path must not end with '/'")
    } else if path.contains('\\') {
        Some("use '/' as the separator")
    } else if path.chars().any(char::is_control) {
        Some("path contains control characters")
    } else if path.split('/').any(str::is_empty) {
        Some("path contains an empty segment")
    } else if path.split('/').any(|segment| segment == "." || segment == "..") {
        Some("path contains a relative segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SessionError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn tree_row(path: &str, kind: FileKind) -> TreeRow {
    TreeRow {
        path: path.to_string(),
        name: file_name(path).to_string(),
        depth: path.matches('/').count(),
        kind,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/project.rs"]
mod tests;
