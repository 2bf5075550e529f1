use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{EventRecorder, JsonEvent, JsonListener, JsonTokenizer, ParseStatus, ParserOptions};

pub(crate) fn strict_options() -> ParserOptions {
    ParserOptions {
        panic_on_error: true,
        ..Default::default()
    }
}

/// Number of cases each `QuickCheck` property runs.
pub(crate) fn test_count() -> u64 {
    if cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Tokenizes `input` in one chunk, panicking on any syntax error.
pub(crate) fn events(input: &str) -> Vec<JsonEvent> {
    events_with(input, strict_options())
}

pub(crate) fn events_with(input: &str, options: ParserOptions) -> Vec<JsonEvent> {
    let mut recorder = EventRecorder::new();
    let mut tokenizer = JsonTokenizer::new(&mut recorder, options);
    tokenizer.feed(input).unwrap();
    assert_ne!(tokenizer.finish().unwrap(), ParseStatus::Incomplete);
    recorder.into_events()
}

/// Tokenizes `chunks` in order, returning the events or the first error.
pub(crate) fn events_chunked(
    chunks: &[&str],
) -> Result<Vec<JsonEvent>, crate::ParserError> {
    let mut recorder = EventRecorder::new();
    let mut tokenizer = JsonTokenizer::new(&mut recorder, ParserOptions::default());
    for chunk in chunks {
        tokenizer.feed(chunk)?;
    }
    tokenizer.finish()?;
    Ok(recorder.into_events())
}

pub(crate) fn block(name: &str) -> JsonEvent {
    JsonEvent::StartBlock(name.to_string())
}

pub(crate) fn end_block(name: &str) -> JsonEvent {
    JsonEvent::EndBlock(name.to_string())
}

pub(crate) fn array(name: &str) -> JsonEvent {
    JsonEvent::StartArray(name.to_string())
}

pub(crate) fn end_array(name: &str) -> JsonEvent {
    JsonEvent::EndArray(name.to_string())
}

pub(crate) fn string(value: &str) -> JsonEvent {
    JsonEvent::String(value.to_string())
}

pub(crate) fn key_value(key: &str, value: &str) -> JsonEvent {
    JsonEvent::KeyValue(key.to_string(), value.to_string())
}

/// Checks that container events nest properly and that every end event
/// repeats the name of its start event.
pub(crate) fn assert_balanced(events: &[JsonEvent]) {
    let mut stack: Vec<&JsonEvent> = Vec::new();
    for event in events {
        match event {
            JsonEvent::StartBlock(_) | JsonEvent::StartArray(_) => stack.push(event),
            JsonEvent::EndBlock(name) => {
                assert_eq!(stack.pop(), Some(&JsonEvent::StartBlock(name.clone())));
            }
            JsonEvent::EndArray(name) => {
                assert_eq!(stack.pop(), Some(&JsonEvent::StartArray(name.clone())));
            }
            _ => {}
        }
    }
    assert!(stack.is_empty(), "unclosed containers: {stack:?}");
}

#[derive(Debug, Clone, Copy)]
enum Context {
    Block { first: bool },
    Array { first: bool },
}

/// Serializes an event stream back into JSON text.
///
/// Numeric, boolean and null object members carry no key in the event
/// stream, so they are written under generated keys; string members and
/// container members keep the key reported by `key_value` or by the
/// container name.
#[derive(Debug, Default)]
pub(crate) struct EventWriter {
    out: String,
    stack: Vec<Context>,
    pending_string: Option<String>,
    generated_keys: usize,
}

impl EventWriter {
    pub(crate) fn into_json(self) -> String {
        assert!(self.pending_string.is_none(), "string member without key");
        self.out
    }

    fn begin_value(&mut self, key: Option<&str>) {
        match self.stack.last_mut() {
            None => {}
            Some(Context::Array { first }) => {
                if !*first {
                    self.out.push(',');
                }
                *first = false;
            }
            Some(Context::Block { first }) => {
                if !*first {
                    self.out.push(',');
                }
                *first = false;
                let key = match key {
                    Some(key) => key.to_string(),
                    None => {
                        self.generated_keys += 1;
                        format!("#{}", self.generated_keys)
                    }
                };
                self.write_string(&key);
                self.out.push(':');
            }
        }
    }

    fn write_string(&mut self, value: &str) {
        self.out.push_str(&serde_json::to_string(value).unwrap());
    }

    fn in_block(&self) -> bool {
        matches!(self.stack.last(), Some(Context::Block { .. }))
    }
}

impl JsonListener for EventWriter {
    fn start_block(&mut self, name: &str) {
        self.begin_value(Some(name));
        self.out.push('{');
        self.stack.push(Context::Block { first: true });
    }

    fn end_block(&mut self, _name: &str) {
        self.stack.pop();
        self.out.push('}');
    }

    fn start_array(&mut self, name: &str) {
        self.begin_value(Some(name));
        self.out.push('[');
        self.stack.push(Context::Array { first: true });
    }

    fn end_array(&mut self, _name: &str) {
        self.stack.pop();
        self.out.push(']');
    }

    fn string_token(&mut self, value: &str) {
        if self.in_block() {
            self.pending_string = Some(value.to_string());
        } else {
            self.begin_value(None);
            self.write_string(value);
        }
    }

    fn numeric_token(&mut self, value: f64) {
        self.begin_value(None);
        let number = serde_json::Number::from_f64(value).unwrap();
        self.out.push_str(&number.to_string());
    }

    fn long_token(&mut self, value: i64) {
        self.begin_value(None);
        self.out.push_str(&value.to_string());
    }

    fn boolean_token(&mut self, value: bool) {
        self.begin_value(None);
        self.out.push_str(if value { "true" } else { "false" });
    }

    fn null_token(&mut self) {
        self.begin_value(None);
        self.out.push_str("null");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        let pending = self.pending_string.take();
        assert_eq!(pending.as_deref(), Some(value));
        self.begin_value(Some(key));
        self.write_string(value);
    }
}

/// The events a correct tokenizer must produce for `value`.
pub(crate) fn expected_events(value: &serde_json::Value) -> Vec<JsonEvent> {
    fn walk(value: &serde_json::Value, name: &str, key: Option<&str>, out: &mut Vec<JsonEvent>) {
        use serde_json::Value;

        match value {
            Value::Null => out.push(JsonEvent::Null),
            Value::Bool(b) => out.push(JsonEvent::Boolean(*b)),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(long), _) => out.push(JsonEvent::Long(long)),
                (None, Some(double)) => out.push(JsonEvent::Number(double)),
                (None, None) => unreachable!("arbitrary precision is disabled"),
            },
            Value::String(s) => {
                out.push(JsonEvent::String(s.clone()));
                if let Some(key) = key {
                    out.push(JsonEvent::KeyValue(key.to_string(), s.clone()));
                }
            }
            Value::Array(items) => {
                out.push(JsonEvent::StartArray(name.to_string()));
                for item in items {
                    walk(item, "", None, out);
                }
                out.push(JsonEvent::EndArray(name.to_string()));
            }
            Value::Object(map) => {
                out.push(JsonEvent::StartBlock(name.to_string()));
                for (k, v) in map {
                    walk(v, k, Some(k), out);
                }
                out.push(JsonEvent::EndBlock(name.to_string()));
            }
        }
    }

    let mut out = Vec::new();
    walk(value, "", None, &mut out);
    out
}
