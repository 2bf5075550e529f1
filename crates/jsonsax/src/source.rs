//! One-call entry points that drive a [`JsonTokenizer`] over a whole input.

#[cfg(feature = "std")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{self, Read};

#[cfg(feature = "std")]
use crate::error::ReadError;
use crate::{
    error::ParserError,
    listener::JsonListener,
    options::ParserOptions,
    tokenizer::{JsonTokenizer, ParseStatus},
};

/// Size of the chunks pulled from readers.
#[cfg(feature = "std")]
pub const READ_BUFFER_SIZE: usize = 8192;

/// Tokenizes `text` with default options.
///
/// # Errors
///
/// Returns the first syntax error in `text`.
pub fn parse_str<L: JsonListener + ?Sized>(
    text: &str,
    listener: &mut L,
) -> Result<ParseStatus, ParserError> {
    parse_str_with_options(text, listener, ParserOptions::default())
}

/// Tokenizes `text` with the given options.
///
/// # Errors
///
/// Returns the first syntax error in `text`.
pub fn parse_str_with_options<L: JsonListener + ?Sized>(
    text: &str,
    listener: &mut L,
    options: ParserOptions,
) -> Result<ParseStatus, ParserError> {
    let mut tokenizer = JsonTokenizer::new(listener, options);
    if tokenizer.feed(text)? == ParseStatus::Cancelled {
        return Ok(ParseStatus::Cancelled);
    }
    tokenizer.finish()
}

/// Tokenizes UTF-8 JSON read from `reader` with default options.
///
/// The reader is consumed in chunks of [`READ_BUFFER_SIZE`] bytes; reading
/// stops as soon as the listener cancels.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8 and JSON syntax errors.
#[cfg(feature = "std")]
pub fn parse_reader<R: Read, L: JsonListener + ?Sized>(
    reader: R,
    listener: &mut L,
) -> Result<ParseStatus, ReadError> {
    parse_reader_with_options(reader, listener, ParserOptions::default())
}

/// Tokenizes UTF-8 JSON read from `reader` with the given options.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8 and JSON syntax errors.
#[cfg(feature = "std")]
pub fn parse_reader_with_options<R: Read, L: JsonListener + ?Sized>(
    mut reader: R,
    listener: &mut L,
    options: ParserOptions,
) -> Result<ParseStatus, ReadError> {
    let mut feeder = Utf8Feeder::new(JsonTokenizer::new(listener, options));
    let mut chunk = [0u8; READ_BUFFER_SIZE];

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                log::debug!("json reader failed: {err}");
                return Err(err.into());
            }
        };
        log::trace!("read {read} bytes of json input");

        if feeder.push(&chunk[..read])? == ParseStatus::Cancelled {
            return Ok(ParseStatus::Cancelled);
        }
    }

    feeder.finish()
}

/// Decodes UTF-8 bytes for a tokenizer, carrying sequences split across
/// chunk boundaries over to the next push.
#[cfg(feature = "std")]
pub(crate) struct Utf8Feeder<'a, L: JsonListener + ?Sized> {
    tokenizer: JsonTokenizer<'a, L>,
    carry: Vec<u8>,
    /// Bytes decoded and fed so far.
    consumed: u64,
    status: ParseStatus,
}

#[cfg(feature = "std")]
impl<'a, L: JsonListener + ?Sized> Utf8Feeder<'a, L> {
    pub(crate) fn new(tokenizer: JsonTokenizer<'a, L>) -> Self {
        Self {
            tokenizer,
            carry: Vec::new(),
            consumed: 0,
            status: ParseStatus::Incomplete,
        }
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) -> Result<ParseStatus, ReadError> {
        if self.status == ParseStatus::Cancelled {
            return Ok(ParseStatus::Cancelled);
        }

        self.carry.extend_from_slice(bytes);
        let (text, invalid) = match core::str::from_utf8(&self.carry) {
            Ok(text) => (text, false),
            // The first chunk's valid part is the `valid_up_to` prefix.
            Err(err) => (
                self.carry.utf8_chunks().next().map_or("", |chunk| chunk.valid()),
                err.error_len().is_some(),
            ),
        };

        let valid = text.len();
        if valid > 0 {
            self.status = self.tokenizer.feed(text)?;
            self.consumed += valid as u64;
            self.carry.drain(..valid);
        }

        if invalid && self.status != ParseStatus::Cancelled {
            return Err(ReadError::InvalidUtf8 {
                byte_offset: self.consumed,
            });
        }
        Ok(self.status)
    }

    pub(crate) fn finish(self) -> Result<ParseStatus, ReadError> {
        if self.status == ParseStatus::Cancelled {
            return Ok(ParseStatus::Cancelled);
        }
        if !self.carry.is_empty() {
            return Err(ReadError::InvalidUtf8 {
                byte_offset: self.consumed,
            });
        }
        Ok(self.tokenizer.finish()?)
    }
}
