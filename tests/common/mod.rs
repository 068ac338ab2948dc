#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use modsweep::scan::{ScanReport, Scanner};
use tempfile::TempDir;

/// Temporary directory tree with helpers for laying out projects.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `bytes` bytes to `relative`, creating parent directories.
    pub fn add_file(&self, relative: impl AsRef<Path>, bytes: usize) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![b'x'; bytes]).unwrap();
        path
    }

    /// Create `<project>/node_modules` holding one package of `bytes` bytes.
    pub fn add_project(&self, project: &str, bytes: usize) -> PathBuf {
        self.add_file(format!("{project}/package.json"), 2);
        self.add_file(format!("{project}/node_modules/pkg/index.js"), bytes);
        self.dir.path().join(project).join("node_modules")
    }

    /// Scan the workspace with default settings and no output.
    pub fn scan(&self) -> ScanReport {
        Scanner::builder()
            .quiet(true)
            .build()
            .unwrap()
            .scan(self.dir.path())
    }
}

impl std::ops::Deref for Workspace {
    type Target = TempDir;

    fn deref(&self) -> &Self::Target {
        &self.dir
    }
}
