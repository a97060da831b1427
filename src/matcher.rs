//! File name matching and the delete/keep decision.

use regex::Regex;

use crate::config::ValidConfig;
use crate::error::{CleanError, Result};

/// What to do with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Delete,
    Keep,
}

/// Decide whether a file is deleted.
///
/// Outside all mode the match result alone decides. In all mode every file is
/// deleted unless `exclude` is set, criteria exist and the file matches them.
pub fn decide(all: bool, exclude: bool, has_criteria: bool, matched: bool) -> Decision {
    let delete = if all {
        !(exclude && has_criteria && matched)
    } else {
        matched
    };

    if delete {
        Decision::Delete
    } else {
        Decision::Keep
    }
}

/// Matches file names against exact names and regular expressions.
///
/// Patterns are compiled on first use, so a malformed pattern is only
/// reported once matching actually reaches it.
pub struct Matcher {
    names: Vec<String>,
    patterns: Vec<String>,
    compiled: Vec<Option<Regex>>,
}

impl Matcher {
    pub fn new(names: Vec<String>, patterns: Vec<String>) -> Self {
        let compiled = patterns.iter().map(|_| None).collect();
        Matcher {
            names,
            patterns,
            compiled,
        }
    }

    pub fn from_config(config: &ValidConfig) -> Self {
        Self::new(config.names().to_vec(), config.patterns().to_vec())
    }

    pub fn has_criteria(&self) -> bool {
        !self.names.is_empty() || !self.patterns.is_empty()
    }

    /// True if `file_name` equals an exact name or contains a match for any pattern.
    pub fn matches(&mut self, file_name: &str) -> Result<bool> {
        if self.names.iter().any(|name| name == file_name) {
            return Ok(true);
        }

        for (pattern, slot) in self.patterns.iter().zip(self.compiled.iter_mut()) {
            if slot.is_none() {
                let regex = Regex::new(pattern).map_err(|source| CleanError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                *slot = Some(regex);
            }
            if slot.as_ref().is_some_and(|regex| regex.is_match(file_name)) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
