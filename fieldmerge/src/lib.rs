//! Declarative, tag-driven field merging.
//!
//! A destination struct annotates its fields with tag expressions naming one or
//! more paths into a source value. [`merge`] walks each path, keeps the last
//! alternative that yields a value and assigns it to the field. Optional
//! source branches that are absent simply do not contribute, which makes the
//! engine a convenient way to layer environment values, file values and
//! defaults.
//!
//! ```
//! use fieldmerge::{Merge, Record};
//!
//! #[derive(Record)]
//! struct EnvVars {
//!     #[fieldmerge(rename = "URL")]
//!     pub url: Option<String>,
//! }
//!
//! #[derive(Record)]
//! struct FileVals {
//!     #[fieldmerge(rename = "URL")]
//!     pub url: String,
//! }
//!
//! #[derive(Record)]
//! struct Sources {
//!     #[fieldmerge(rename = "EV")]
//!     pub env: Option<EnvVars>,
//!     #[fieldmerge(rename = "FV")]
//!     pub file: FileVals,
//! }
//!
//! #[derive(Default, Merge)]
//! struct Settings {
//!     // File values override environment values when both are present.
//!     #[fieldmerge(from = "EV.URL|FV.URL,skipzero")]
//!     url: String,
//! }
//!
//! let sources = Sources {
//!     env: Some(EnvVars { url: Some("http://env".into()) }),
//!     file: FileVals { url: String::new() },
//! };
//! let mut settings = Settings::default();
//! fieldmerge::merge(&mut settings, &sources)?;
//! assert_eq!(settings.url, "http://env");
//! # Ok::<(), fieldmerge::MergeError>(())
//! ```
//!
//! Sources implement [`Reflect`]. `#[derive(Record)]` covers user structs.
//! Standard collections, `Option` and smart pointers work out of the box, as do
//! parsed JSON documents with the default `serde_json` feature.

pub use fieldmerge_macros::{Merge, Record};

mod error;
mod hydrate;
mod merge;
mod reconcile;
pub mod reflect;
pub mod resolve;
pub mod select;
pub mod tag;

pub use error::{ErrorKind, FieldContext, MergeError, MergeResult};
pub use hydrate::{HydrateError, Hydrator, ParseHydrator};
pub use merge::{Merge, MergeContext, Merger, merge};
pub use reflect::{KeyError, KeyedMap, MapKey, Record, Reflect, Sequence, Shape};
pub use resolve::{Resolution, ResolveError, Resolved, resolve};
pub use tag::{TagError, TagExpression, TagOptions, TagPath};

#[cfg(feature = "serde_json")]
pub use serde_json;
#[cfg(feature = "toml")]
pub use toml;
