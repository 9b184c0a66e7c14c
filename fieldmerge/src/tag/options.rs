//! Option list handling for tag expressions.

use super::{OPTION_SEPARATOR, TagError};

/// Option name that discards zero-valued resolutions.
pub(crate) const SKIP_ZERO: &str = "skipzero";
/// Option name that converts textual values with the configured hydrator.
pub(crate) const HYDRATE: &str = "hydrate";

/// Options attached to a tag after the first comma.
///
/// Unknown names are preserved in declaration order so the expression can be
/// written back out unchanged; they have no effect unless strict option
/// checking rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    names: Vec<String>,
    skip_zero: bool,
    hydrate: bool,
}

impl TagOptions {
    pub(super) fn parse(raw: &str) -> Result<Self, TagError> {
        let mut options = Self::default();
        for token in raw.split(OPTION_SEPARATOR).map(str::trim) {
            if token.is_empty() {
                return Err(TagError::EmptyOption);
            }
            options.insert(token);
        }
        Ok(options)
    }

    fn insert(&mut self, name: &str) {
        if self.names.iter().any(|existing| existing == name) {
            return;
        }
        match name {
            SKIP_ZERO => self.skip_zero = true,
            HYDRATE => self.hydrate = true,
            _ => {}
        }
        self.names.push(name.to_owned());
    }

    /// Whether `skipzero` is set.
    #[must_use]
    pub const fn skip_zero(&self) -> bool {
        self.skip_zero
    }

    /// Whether `hydrate` is set.
    #[must_use]
    pub const fn hydrate(&self) -> bool {
        self.hydrate
    }

    /// All option names in the order they were written, duplicates removed.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Option names that carry no meaning for the engine.
    pub fn unknown(&self) -> impl Iterator<Item = &str> {
        self.names().filter(|name| !matches!(*name, SKIP_ZERO | HYDRATE))
    }

    /// Fails on the first unrecognised option.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::UnknownOption`] naming the first unknown option.
    pub fn ensure_known(&self) -> Result<(), TagError> {
        self.unknown()
            .next()
            .map_or(Ok(()), |option| {
                Err(TagError::UnknownOption {
                    option: option.to_owned(),
                })
            })
    }
}
