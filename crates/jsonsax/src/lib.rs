//! An event-driven, streaming JSON tokenizer.
//!
//! The tokenizer scans JSON text and reports structural and scalar events to
//! a [`JsonListener`] in document order, without building a tree. Input may
//! arrive in arbitrarily split chunks; the listener can stop the parse at any
//! time by answering `false` from [`JsonListener::is_alive`].
//!
//! [`TreeBuilder`] is a ready-made listener that collects the events into an
//! owned [`Map`] of [`Value`]s, and [`parse_tree`] wraps it in one call.
//!
//! ```rust
//! use jsonsax::{EventRecorder, JsonEvent, parse_str};
//!
//! let mut recorder = EventRecorder::new();
//! parse_str(r#"{"a":1,"b":[true,false]}"#, &mut recorder).unwrap();
//! assert_eq!(recorder.events()[0], JsonEvent::StartBlock(String::new()));
//! assert_eq!(recorder.events()[2], JsonEvent::StartArray("b".to_string()));
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod listener;
mod options;
mod source;
mod tokenizer;
mod tree;
mod value;

#[cfg(feature = "std")]
pub mod data;

#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub use error::ReadError;
pub use error::{ErrorKind, ParserError};
pub use listener::{EventRecorder, JsonEvent, JsonListener};
pub use options::{NumberMode, ParserOptions};
#[cfg(feature = "std")]
pub use source::{READ_BUFFER_SIZE, parse_reader, parse_reader_with_options};
pub use source::{parse_str, parse_str_with_options};
pub use tokenizer::{JsonTokenizer, ParseStatus};
#[cfg(feature = "std")]
pub use tree::parse_tree_reader;
pub use tree::{ROOT_KEY, TreeBuilder, parse_tree, parse_tree_with_options};
pub use value::{Map, Value};
