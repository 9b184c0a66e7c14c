//! Tag expression grammar.
//!
//! A tag attached to a destination field names one or more source paths and an
//! optional list of options:
//!
//! ```text
//! path ("|" path)* ("," option)*
//! path := segment ("." segment)*
//! ```
//!
//! Alternatives are evaluated in order and the last one that resolves wins.
//! Tags are parsed on every merge; nothing is cached between calls.
//!
//! ```
//! use fieldmerge::TagExpression;
//!
//! let expr = TagExpression::parse("EV.URL|FV.Service.URL,hydrate")?;
//! assert_eq!(expr.alternatives().len(), 2);
//! assert!(expr.options().hydrate());
//! assert_eq!(expr.to_string(), "EV.URL|FV.Service.URL,hydrate");
//! # Ok::<(), fieldmerge::TagError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod options;

pub use options::TagOptions;

const ALTERNATIVE_SEPARATOR: char = '|';
const SEGMENT_SEPARATOR: char = '.';
const OPTION_SEPARATOR: char = ',';

/// Grammar violations detected while parsing a tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagError {
    /// The tag contains no usable path alternative.
    #[error("tag contains no path")]
    Empty,

    /// A path alternative contains an empty segment, as in `Foo..Bar`.
    #[error("path '{path}' contains an empty segment")]
    EmptySegment {
        /// The offending alternative as written.
        path: String,
    },

    /// The option list contains an empty entry, as in `A.B,,hydrate`.
    #[error("tag contains an empty option")]
    EmptyOption,

    /// An option name is not recognised and strict option checking is on.
    #[error("unknown tag option '{option}'")]
    UnknownOption {
        /// The unrecognised option name.
        option: String,
    },
}

/// One dotted path alternative, such as `FV.Service.URL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagPath {
    segments: Vec<String>,
}

impl TagPath {
    /// Builds a path from its segments.
    ///
    /// The grammar never yields an empty path, but one built here resolves to
    /// the whole source value.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Segments in traversal order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

/// A parsed tag: ordered path alternatives plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExpression {
    alternatives: Vec<TagPath>,
    options: TagOptions,
}

impl TagExpression {
    /// Parses a raw tag string.
    ///
    /// Empty alternatives produced by doubled or dangling `|` separators are
    /// dropped, so `"A.B||C.D"` is accepted. Whitespace around segments and
    /// options is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Empty`] when no alternative remains,
    /// [`TagError::EmptySegment`] when an alternative has an empty segment, and
    /// [`TagError::EmptyOption`] when the option list has an empty entry.
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let (paths, options) = match raw.split_once(OPTION_SEPARATOR) {
            Some((paths, options)) => (paths, Some(options)),
            None => (raw, None),
        };
        let alternatives = parse_alternatives(paths)?;
        let options = options
            .map(TagOptions::parse)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            alternatives,
            options,
        })
    }

    /// Path alternatives in tag order.
    #[must_use]
    pub fn alternatives(&self) -> &[TagPath] {
        &self.alternatives
    }

    /// Options attached to the tag.
    #[must_use]
    pub const fn options(&self) -> &TagOptions {
        &self.options
    }
}

impl FromStr for TagExpression {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for path in &self.alternatives {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{path}")?;
            first = false;
        }
        for option in self.options.names() {
            write!(f, ",{option}")?;
        }
        Ok(())
    }
}

fn parse_alternatives(raw: &str) -> Result<Vec<TagPath>, TagError> {
    let mut alternatives = Vec::new();
    for candidate in raw.split(ALTERNATIVE_SEPARATOR).map(str::trim) {
        if candidate.is_empty() {
            continue;
        }
        let segments: Vec<&str> = candidate.split(SEGMENT_SEPARATOR).map(str::trim).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(TagError::EmptySegment {
                path: candidate.to_owned(),
            });
        }
        alternatives.push(TagPath::new(segments));
    }
    if alternatives.is_empty() {
        return Err(TagError::Empty);
    }
    Ok(alternatives)
}
