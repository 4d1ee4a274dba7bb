//! Note tree building and slug resolution for the notes site.
//!
//! This crate provides:
//! - [`TreeBuilder`]: walks the content root into an ordered [`NoteTree`]
//! - [`SlugResolver`]: maps a slug back to its [`Note`]
//! - [`enumerate_slugs`] / [`static_params`]: every statically resolvable route
//! - [`search`]: substring search over file notes
//! - [`Notes`]: facade tying these together for a configured content root
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use notes_site::Notes;
//! use notes_storage::FsStorage;
//!
//! let notes = Notes::new(Arc::new(FsStorage::new(PathBuf::from("content"))));
//!
//! // Navigation tree
//! let tree = notes.tree();
//!
//! // Page lookup from route segments
//! let note = notes.note_from_segments(&["rust", "ownership"]);
//! ```

mod node;
mod notes;
mod resolver;
mod search;
mod slugs;
mod tree;

pub use node::{Iter, Node, NodeKind, NoteTree};
pub use notes::{DEFAULT_ROUTE_PREFIX, Notes, SearchHit};
pub use resolver::{Note, SlugResolver};
pub use search::search;
pub use slugs::{SlugParams, decode_segments, encode_segment, enumerate_slugs, href, static_params};
pub use tree::TreeBuilder;
