//! Request/response payloads as opaque byte sources.
//!
//! A [`Data`] knows how to write its bytes into a sink and how large it is.
//! [`parse_data`] pipes any payload straight into a tokenizer without first
//! collecting it into memory.

use alloc::{string::String, vec::Vec};
use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use crate::{
    error::ReadError,
    listener::JsonListener,
    options::ParserOptions,
    source::Utf8Feeder,
    tokenizer::{JsonTokenizer, ParseStatus},
};

/// A payload that can be streamed into a byte sink.
pub trait Data {
    /// Writes the whole payload into `sink`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the backing store or of `sink`.
    fn append_to(&self, sink: &mut dyn Write) -> io::Result<()>;

    /// Total payload size in bytes.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be inspected.
    fn size(&self) -> io::Result<u64>;
}

/// A payload backed by an in-memory string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringData {
    text: String,
}

impl StringData {
    /// Wraps `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Data for StringData {
    fn append_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(self.text.as_bytes())
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.text.len() as u64)
    }
}

/// A payload backed by a raw byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesData {
    bytes: Vec<u8>,
}

impl BytesData {
    /// Wraps `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl Data for BytesData {
    fn append_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self.bytes)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.bytes.len() as u64)
    }
}

/// A payload read from a file each time it is streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    path: PathBuf,
}

impl FileData {
    /// Refers to the file at `path`. The file is not opened until needed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Data for FileData {
    fn append_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        let mut file = File::open(&self.path)?;
        io::copy(&mut file, sink)?;
        Ok(())
    }

    fn size(&self) -> io::Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }
}

/// Tokenizes a payload with default options.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8 and JSON syntax errors.
pub fn parse_data<D: Data + ?Sized, L: JsonListener + ?Sized>(
    data: &D,
    listener: &mut L,
) -> Result<ParseStatus, ReadError> {
    parse_data_with_options(data, listener, ParserOptions::default())
}

/// Tokenizes a payload with the given options.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8 and JSON syntax errors.
pub fn parse_data_with_options<D: Data + ?Sized, L: JsonListener + ?Sized>(
    data: &D,
    listener: &mut L,
    options: ParserOptions,
) -> Result<ParseStatus, ReadError> {
    let mut sink = TokenizerSink {
        feeder: Utf8Feeder::new(JsonTokenizer::new(listener, options)),
        failure: None,
    };

    if let Err(err) = data.append_to(&mut sink) {
        // A tokenizer failure is reported to the payload as an I/O error;
        // surface the original instead.
        return Err(sink.failure.take().unwrap_or(ReadError::Io(err)));
    }
    sink.feeder.finish()
}

/// Adapts a tokenizer to `io::Write`. Once the listener cancels, the rest of
/// the payload is accepted and dropped.
struct TokenizerSink<'a, L: JsonListener + ?Sized> {
    feeder: Utf8Feeder<'a, L>,
    failure: Option<ReadError>,
}

impl<L: JsonListener + ?Sized> Write for TokenizerSink<'_, L> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.feeder.push(buf) {
            Ok(_) => Ok(buf.len()),
            Err(err) => {
                log::debug!("json payload rejected: {err}");
                self.failure = Some(err);
                Err(io::Error::other("json tokenizer rejected payload"))
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
