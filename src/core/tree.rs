use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::utils::{io, path};

/// Text file tree addressed by `/`-rooted workspace paths.
pub trait FileTree {
    fn exists(&self, path: &str) -> bool;
    fn read(&self, path: &str) -> Result<String>;
    fn write(&self, path: &str, content: &str) -> Result<()>;
    fn delete(&self, path: &str) -> Result<()>;
}

/// Tree backed by a directory on disk. Virtual `/` is `root`.
pub struct LocalTree {
    root: PathBuf,
}

impl LocalTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Host path for a virtual path. Rejects paths that climb above the root.
    pub fn host_path(&self, virtual_path: &str) -> Result<PathBuf> {
        let normalized = path::normalize(virtual_path).ok_or_else(|| {
            Error::validation_invalid_argument(
                "path",
                "Path escapes the workspace root",
                Some(virtual_path.to_string()),
                None,
            )
        })?;

        Ok(self.root.join(normalized.trim_start_matches('/')))
    }
}

impl FileTree for LocalTree {
    fn exists(&self, path: &str) -> bool {
        self.host_path(path).is_ok_and(|p| p.is_file())
    }

    fn read(&self, path: &str) -> Result<String> {
        io::read_file(&self.host_path(path)?, "read file")
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        io::write_file_atomic(&self.host_path(path)?, content, "write file")
    }

    fn delete(&self, path: &str) -> Result<()> {
        let host = self.host_path(path)?;
        if !host.is_file() {
            return Err(Error::internal_io(
                format!("File not found: {}", host.display()),
                Some("delete file".to_string()),
            ));
        }

        io::remove_file(&host, "delete file")
    }
}

/// In-memory tree for callers that do not want to touch the disk.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: RefCell<BTreeMap<String, String>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(key(path), content.to_string());
        self
    }

    /// All file paths currently in the tree, sorted.
    pub fn files(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

fn key(file: &str) -> String {
    path::normalize(file).unwrap_or_else(|| file.to_string())
}

impl FileTree for MemoryTree {
    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(&key(path))
    }

    fn read(&self, path: &str) -> Result<String> {
        self.files.borrow().get(&key(path)).cloned().ok_or_else(|| {
            Error::internal_io(
                format!("File not found: {}", path),
                Some("read file".to_string()),
            )
        })
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(key(path), content.to_string());
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .remove(&key(path))
            .map(|_| ())
            .ok_or_else(|| {
                Error::internal_io(
                    format!("File not found: {}", path),
                    Some("delete file".to_string()),
                )
            })
    }
}
