//! A listener that assembles the event stream into a [`Map`].
//!
//! The root object's members become the members of the result. Any other
//! root value (an array or a scalar) is stored under the key `"root"`.
//! Object members whose value is `null` are left out; `null` array elements
//! are kept.
//!
//! ```
//! use jsonsax::{Value, parse_tree};
//!
//! let tree = parse_tree(r#"{"name":"Bob","age":7,"pet":null}"#).unwrap();
//! assert_eq!(tree.get("name"), Some(&Value::String("Bob".into())));
//! assert_eq!(tree.get("age"), Some(&Value::Long(7)));
//! assert_eq!(tree.get("pet"), None);
//!
//! let tree = parse_tree("[1,2]").unwrap();
//! assert_eq!(tree.get("root"), Some(&Value::Array(vec![1i64.into(), 2i64.into()])));
//! ```
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::io::Read;

#[cfg(feature = "std")]
use crate::error::ReadError;
use crate::{
    error::ParserError,
    listener::JsonListener,
    options::ParserOptions,
    source::parse_str_with_options,
    value::{Map, Value},
};

/// Key under which a root array or scalar is stored.
pub const ROOT_KEY: &str = "root";

#[derive(Debug)]
enum Node {
    Object(Map),
    Array(Vec<Value>),
}

#[derive(Debug)]
struct Frame {
    /// Member key in the parent object, `None` inside arrays and at the root.
    key: Option<String>,
    node: Node,
}

/// Builds a [`Map`] from listener events.
///
/// Containers still open when the parse stops (for example after a
/// cancellation) are closed by [`TreeBuilder::into_map`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    result: Map,
    stack: Vec<Frame>,
    pending_key: Option<String>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes any open containers and returns the tree.
    #[must_use]
    pub fn into_map(mut self) -> Map {
        while !self.stack.is_empty() {
            self.close();
        }
        self.result
    }

    fn open(&mut self, node: Node) {
        let key = match (&node, self.stack.is_empty()) {
            (Node::Object(_), true) => None,
            (Node::Array(_), true) => Some(ROOT_KEY.into()),
            (_, false) => self.pending_key.take(),
        };
        self.stack.push(Frame { key, node });
    }

    fn close(&mut self) {
        let Some(Frame { key, node }) = self.stack.pop() else {
            return;
        };
        match node {
            Node::Object(map) if self.stack.is_empty() && key.is_none() => {
                for (k, v) in map {
                    self.result.insert(k, v);
                }
            }
            Node::Object(map) => self.attach(key, Value::Object(map)),
            Node::Array(items) => self.attach(key, Value::Array(items)),
        }
    }

    /// Adds a finished value to the innermost open container.
    fn attach(&mut self, key: Option<String>, value: Value) {
        match self.stack.last_mut().map(|frame| &mut frame.node) {
            Some(Node::Object(map)) => {
                if !value.is_null() {
                    map.insert(key.unwrap_or_default(), value);
                }
            }
            Some(Node::Array(items)) => items.push(value),
            None => {
                self.result
                    .insert(key.unwrap_or_else(|| ROOT_KEY.into()), value);
            }
        }
    }

    fn scalar(&mut self, value: Value) {
        let key = self.pending_key.take();
        self.attach(key, value);
    }
}

impl JsonListener for TreeBuilder {
    fn start_block(&mut self, _name: &str) {
        self.open(Node::Object(Map::new()));
    }

    fn end_block(&mut self, _name: &str) {
        self.close();
    }

    fn start_array(&mut self, _name: &str) {
        self.open(Node::Array(Vec::new()));
    }

    fn end_array(&mut self, _name: &str) {
        self.close();
    }

    fn string_token(&mut self, value: &str) {
        self.scalar(Value::String(value.into()));
    }

    fn numeric_token(&mut self, value: f64) {
        self.scalar(Value::Number(value));
    }

    fn long_token(&mut self, value: i64) {
        self.scalar(Value::Long(value));
    }

    fn boolean_token(&mut self, value: bool) {
        self.scalar(Value::Boolean(value));
    }

    fn null_token(&mut self) {
        self.scalar(Value::Null);
    }

    // The value already arrived through `string_token`.
    fn key_value(&mut self, _key: &str, _value: &str) {}

    fn member_key(&mut self, key: &str) {
        self.pending_key = Some(key.into());
    }
}

/// Parses `text` into a tree with default options.
///
/// # Errors
///
/// Returns the first syntax error in `text`.
pub fn parse_tree(text: &str) -> Result<Map, ParserError> {
    parse_tree_with_options(text, ParserOptions::default())
}

/// Parses `text` into a tree with the given options.
///
/// With [`ParserOptions::allow_multiple_json_values`], root objects merge
/// into one map and a later root array or scalar replaces an earlier one.
///
/// # Errors
///
/// Returns the first syntax error in `text`.
pub fn parse_tree_with_options(text: &str, options: ParserOptions) -> Result<Map, ParserError> {
    let mut builder = TreeBuilder::new();
    parse_str_with_options(text, &mut builder, options)?;
    Ok(builder.into_map())
}

/// Parses UTF-8 JSON read from `reader` into a tree.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8 and JSON syntax errors.
#[cfg(feature = "std")]
pub fn parse_tree_reader<R: Read>(reader: R) -> Result<Map, ReadError> {
    let mut builder = TreeBuilder::new();
    crate::source::parse_reader(reader, &mut builder)?;
    Ok(builder.into_map())
}
