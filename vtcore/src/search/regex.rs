// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Compiled pattern wrapper.
//!
//! Patterns compile Unicode-aware and multi-line (row text is matched as
//! joined paragraphs). Compile failure is the one regex error that surfaces
//! to the caller; runtime match failures read as "no match".

use miette::Diagnostic;
use thiserror::Error;

/// What a pattern is registered for: hyperlink-style hover matching or
/// scrollback search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RegexPurpose {
    Match,
    Search,
}

/// Extra compile flags the embedder may request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub case_insensitive: bool,
}

/// Regex compile failure, surfaced at the registration boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum SearchError {
    #[error("failed to compile pattern: {source}")]
    #[diagnostic(code(vtcore::regex::compile))]
    Compile {
        #[source]
        source: Box<regex::Error>,
    },
}

/// A compiled pattern plus its registration purpose.
#[derive(Debug, Clone)]
pub struct TermRegex {
    regex: regex::Regex,
    purpose: RegexPurpose,
}

impl TermRegex {
    pub fn new(
        pattern: &str,
        purpose: RegexPurpose,
        flags: RegexFlags,
    ) -> Result<Self, SearchError> {
        let regex = regex::RegexBuilder::new(pattern)
            .multi_line(true)
            .unicode(true)
            .case_insensitive(flags.case_insensitive)
            .build()
            .map_err(|source| SearchError::Compile {
                source: Box::new(source),
            })?;
        Ok(Self { regex, purpose })
    }

    #[must_use]
    pub fn purpose(&self) -> RegexPurpose { self.purpose }

    #[must_use]
    pub fn as_regex(&self) -> &regex::Regex { &self.regex }
}

#[cfg(test)]
mod tests {
    use super::{RegexFlags, RegexPurpose, TermRegex};

    #[test]
    fn test_compile_ok() {
        let re = TermRegex::new(
            r"https?://\S+",
            RegexPurpose::Match,
            RegexFlags::default(),
        )
        .unwrap();
        assert!(re.as_regex().is_match("see http://example.org now"));
        assert_eq!(re.purpose(), RegexPurpose::Match);
    }

    #[test]
    fn test_compile_failure_surfaces() {
        let err = TermRegex::new("(unclosed", RegexPurpose::Search, RegexFlags::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_case_insensitive_flag() {
        let re = TermRegex::new(
            "error",
            RegexPurpose::Search,
            RegexFlags {
                case_insensitive: true,
            },
        )
        .unwrap();
        assert!(re.as_regex().is_match("ERROR: boom"));
    }
}
