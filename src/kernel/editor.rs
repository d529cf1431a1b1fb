use serde::{Deserialize, Serialize};

use super::error::{Result, SessionError};
use super::project::{ChangeKind, FileChange, FileStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Start/end ordered so that `start <= end`.
    pub fn normalized(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}

/// Focused file and open tabs.
///
/// `active_file`, when set, is always one of `open_tabs`; `open_tabs` holds
/// no duplicates and keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    active_file: Option<String>,
    open_tabs: Vec<String>,
    cursor: Option<Position>,
    selection: Option<Selection>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn open_tabs(&self) -> &[String] {
        &self.open_tabs
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_open(&self, path: &str) -> bool {
        self.open_tabs.iter().any(|tab| tab == path)
    }

    pub fn focus(&mut self, files: &FileStore, path: &str) -> Result<bool> {
        ensure_file(files, path)?;

        let mut changed = self.push_tab(path);
        if self.active_file.as_deref() != Some(path) {
            self.active_file = Some(path.to_string());
            self.cursor = None;
            self.selection = None;
            changed = true;
        }
        Ok(changed)
    }

    pub fn open_tab(&mut self, files: &FileStore, path: &str) -> Result<bool> {
        ensure_file(files, path)?;
        Ok(self.push_tab(path))
    }

    /// Closes `path`. When it was active, focus moves to the tab on its left;
    /// closing the leftmost tab focuses the new leftmost tab, and closing the
    /// last tab clears focus.
    pub fn close_tab(&mut self, path: &str) -> bool {
        let Some(index) = self.open_tabs.iter().position(|tab| tab == path) else {
            return false;
        };
        self.open_tabs.remove(index);

        if self.active_file.as_deref() == Some(path) {
            let neighbor = index
                .checked_sub(1)
                .and_then(|left| self.open_tabs.get(left))
                .or_else(|| self.open_tabs.first());
            self.active_file = neighbor.cloned();
            self.cursor = None;
            self.selection = None;
        }
        true
    }

    /// Reacts to a file store notification; deletions close the tab.
    pub fn apply_change(&mut self, change: &FileChange) -> bool {
        match change.kind {
            ChangeKind::Deleted => self.close_tab(&change.path),
            ChangeKind::Created | ChangeKind::Updated => false,
        }
    }

    pub fn set_cursor(&mut self, position: Position) -> bool {
        if self.active_file.is_none() || self.cursor == Some(position) {
            return false;
        }
        self.cursor = Some(position);
        true
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) -> bool {
        if self.active_file.is_none() {
            return false;
        }
        let selection = selection.map(Selection::normalized);
        if self.selection == selection {
            return false;
        }
        self.selection = selection;
        true
    }

    /// Text covered by the current selection in the active file.
    pub fn selected_text(&self, files: &FileStore) -> Option<String> {
        let selection = self.selection?;
        let node = files.get(self.active_file.as_deref()?).ok()?;
        let text = node.text();
        let start = byte_offset(text, selection.start)?;
        let end = byte_offset(text, selection.end)?;
        (start < end).then(|| text[start..end].to_string())
    }

    fn push_tab(&mut self, path: &str) -> bool {
        if self.is_open(path) {
            return false;
        }
        self.open_tabs.push(path.to_string());
        true
    }
}

fn ensure_file(files: &FileStore, path: &str) -> Result<()> {
    if files.contains_file(path) {
        Ok(())
    } else {
        Err(SessionError::UnknownFile(path.to_string()))
    }
}

/// Byte offset of a line/column (columns count chars); clamps the column to
/// the line end.
fn byte_offset(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        line_start += text[line_start..].find('\n')? + 1;
    }
    let line = text[line_start..].split('\n').next().unwrap_or("");
    let column = line
        .char_indices()
        .nth(position.column as usize)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    Some(line_start + column)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/editor.rs"]
mod tests;
