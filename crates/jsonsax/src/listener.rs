//! The event contract between the tokenizer and its consumer.
//!
//! A [`JsonListener`] receives one call per structural or scalar event, in
//! document order. Nothing is buffered into a tree: the listener decides what
//! to keep.
//!
//! # Examples
//!
//! ```
//! use jsonsax::{EventRecorder, JsonEvent, parse_str};
//!
//! let mut recorder = EventRecorder::new();
//! parse_str(r#"{"name":"Bob"}"#, &mut recorder).unwrap();
//! assert_eq!(
//!     recorder.events(),
//!     &[
//!         JsonEvent::StartBlock(String::new()),
//!         JsonEvent::String("Bob".to_string()),
//!         JsonEvent::KeyValue("name".to_string(), "Bob".to_string()),
//!         JsonEvent::EndBlock(String::new()),
//!     ]
//! );
//! ```
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

/// Consumer of tokenizer events.
///
/// `name` arguments carry the object key under which a container appears,
/// or the empty string for the root value and for array elements. The name
/// passed to `end_block`/`end_array` is always the one passed to the
/// matching start call.
pub trait JsonListener {
    /// An object (`{`) opens.
    fn start_block(&mut self, name: &str);

    /// An object (`}`) closes.
    fn end_block(&mut self, name: &str);

    /// An array (`[`) opens.
    fn start_array(&mut self, name: &str);

    /// An array (`]`) closes.
    fn end_array(&mut self, name: &str);

    /// A quoted string value. Object keys are never reported here.
    fn string_token(&mut self, value: &str);

    /// A number with a fraction or exponent, or an integer outside the `i64`
    /// range.
    fn numeric_token(&mut self, value: f64);

    /// An integral number within the `i64` range.
    fn long_token(&mut self, value: i64);

    /// A `true` or `false` literal.
    fn boolean_token(&mut self, value: bool);

    /// A `null` literal.
    fn null_token(&mut self) {}

    /// A string-valued object member. Always follows the `string_token` call
    /// for the same value.
    fn key_value(&mut self, key: &str, value: &str);

    /// An object key has been read. The member's value events follow.
    fn member_key(&mut self, _key: &str) {}

    /// Polled before every event. Returning `false` stops tokenizing without
    /// an error.
    fn is_alive(&self) -> bool {
        true
    }
}

macro_rules! forward_listener {
    ($($ty:ty),*) => {
        $(
            impl<L: JsonListener + ?Sized> JsonListener for $ty {
                fn start_block(&mut self, name: &str) {
                    (**self).start_block(name);
                }
                fn end_block(&mut self, name: &str) {
                    (**self).end_block(name);
                }
                fn start_array(&mut self, name: &str) {
                    (**self).start_array(name);
                }
                fn end_array(&mut self, name: &str) {
                    (**self).end_array(name);
                }
                fn string_token(&mut self, value: &str) {
                    (**self).string_token(value);
                }
                fn numeric_token(&mut self, value: f64) {
                    (**self).numeric_token(value);
                }
                fn long_token(&mut self, value: i64) {
                    (**self).long_token(value);
                }
                fn boolean_token(&mut self, value: bool) {
                    (**self).boolean_token(value);
                }
                fn null_token(&mut self) {
                    (**self).null_token();
                }
                fn key_value(&mut self, key: &str, value: &str) {
                    (**self).key_value(key, value);
                }
                fn member_key(&mut self, key: &str) {
                    (**self).member_key(key);
                }
                fn is_alive(&self) -> bool {
                    (**self).is_alive()
                }
            }
        )*
    };
}

forward_listener!(&mut L, Box<L>);

/// One listener call, captured as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonEvent {
    /// `start_block(name)`
    StartBlock(String),
    /// `end_block(name)`
    EndBlock(String),
    /// `start_array(name)`
    StartArray(String),
    /// `end_array(name)`
    EndArray(String),
    /// `string_token(value)`
    String(String),
    /// `numeric_token(value)`
    Number(f64),
    /// `long_token(value)`
    Long(i64),
    /// `boolean_token(value)`
    Boolean(bool),
    /// `null_token()`
    Null,
    /// `key_value(key, value)`
    KeyValue(String, String),
}

impl JsonEvent {
    /// Delivers this event to `listener`.
    pub fn replay<L: JsonListener + ?Sized>(&self, listener: &mut L) {
        match self {
            JsonEvent::StartBlock(name) => listener.start_block(name),
            JsonEvent::EndBlock(name) => listener.end_block(name),
            JsonEvent::StartArray(name) => listener.start_array(name),
            JsonEvent::EndArray(name) => listener.end_array(name),
            JsonEvent::String(value) => listener.string_token(value),
            JsonEvent::Number(value) => listener.numeric_token(*value),
            JsonEvent::Long(value) => listener.long_token(*value),
            JsonEvent::Boolean(value) => listener.boolean_token(*value),
            JsonEvent::Null => listener.null_token(),
            JsonEvent::KeyValue(key, value) => listener.key_value(key, value),
        }
    }
}

/// A listener that records every event it receives.
///
/// An optional event limit makes the recorder report itself as no longer
/// alive once that many events have been stored.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<JsonEvent>,
    limit: Option<usize>,
}

impl EventRecorder {
    /// Creates a recorder without a limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that stops the tokenizer after `limit` events.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit: Some(limit),
        }
    }

    /// The events received so far.
    #[must_use]
    pub fn events(&self) -> &[JsonEvent] {
        &self.events
    }

    /// Consumes the recorder and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<JsonEvent> {
        self.events
    }
}

impl JsonListener for EventRecorder {
    fn start_block(&mut self, name: &str) {
        self.events.push(JsonEvent::StartBlock(name.to_string()));
    }

    fn end_block(&mut self, name: &str) {
        self.events.push(JsonEvent::EndBlock(name.to_string()));
    }

    fn start_array(&mut self, name: &str) {
        self.events.push(JsonEvent::StartArray(name.to_string()));
    }

    fn end_array(&mut self, name: &str) {
        self.events.push(JsonEvent::EndArray(name.to_string()));
    }

    fn string_token(&mut self, value: &str) {
        self.events.push(JsonEvent::String(value.to_string()));
    }

    fn numeric_token(&mut self, value: f64) {
        self.events.push(JsonEvent::Number(value));
    }

    fn long_token(&mut self, value: i64) {
        self.events.push(JsonEvent::Long(value));
    }

    fn boolean_token(&mut self, value: bool) {
        self.events.push(JsonEvent::Boolean(value));
    }

    fn null_token(&mut self) {
        self.events.push(JsonEvent::Null);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.events
            .push(JsonEvent::KeyValue(key.to_string(), value.to_string()));
    }

    fn is_alive(&self) -> bool {
        self.limit.is_none_or(|limit| self.events.len() < limit)
    }
}
