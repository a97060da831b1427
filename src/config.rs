//! Resolved configuration for a cleaning run and its validation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CleanError, Result};

/// Options controlling which files a run deletes.
#[derive(Debug, Clone, Default)]
pub struct CleanConfig {
    root: PathBuf,
    names: Vec<String>,
    patterns: Vec<String>,
    name_list: Option<PathBuf>,
    recursive: bool,
    exclude: bool,
    all: bool,
}

impl CleanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CleanConfig {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Exact file names to match.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Regular expressions searched for within file names.
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// File listing exact names, one per line. Replaces `names` on validation.
    pub fn name_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.name_list = Some(path.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn exclude(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    /// Check the configuration and resolve the root to its canonical absolute form.
    ///
    /// The name list is read first, then the criteria are checked without touching
    /// the tree, then the root must exist and be a directory.
    pub fn validate(mut self) -> Result<ValidConfig> {
        if let Some(list) = self.name_list.take() {
            self.names = read_name_list(&list)?;
        }

        if !self.all && self.names.is_empty() && self.patterns.is_empty() {
            return Err(CleanError::InvalidConfig {
                details: "no file names or patterns given (use --name, --reg, --file or --all)"
                    .to_string(),
            });
        }

        match fs::symlink_metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(CleanError::MissingRoot { path: self.root }),
        }

        let root = self
            .root
            .canonicalize()
            .map_err(|_| CleanError::MissingRoot {
                path: self.root.clone(),
            })?;

        Ok(ValidConfig {
            root,
            names: self.names,
            patterns: self.patterns,
            recursive: self.recursive,
            exclude: self.exclude,
            all: self.all,
        })
    }
}

/// A configuration that passed validation. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct ValidConfig {
    root: PathBuf,
    names: Vec<String>,
    patterns: Vec<String>,
    recursive: bool,
    exclude: bool,
    all: bool,
}

impl ValidConfig {
    /// Canonical absolute root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn is_exclude(&self) -> bool {
        self.exclude
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    pub fn has_criteria(&self) -> bool {
        !self.names.is_empty() || !self.patterns.is_empty()
    }
}

/// Read exact file names from a text file, one per line, skipping blank lines.
pub fn read_name_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| CleanError::NameList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
