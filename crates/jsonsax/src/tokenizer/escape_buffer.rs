//! Decoding of `\uXXXX` escape sequences.
//!
//! [`UnicodeEscapeBuffer`] accumulates four ASCII hexadecimal digits into a
//! UTF-16 code unit. A high surrogate is held until the following escape
//! supplies the low half; the pair is then combined into one `char`.
//! Unpaired surrogates are rejected since they have no `char`
//! representation.

/// What happened after feeding one more hex digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnicodeStep {
    /// Fewer than four digits so far.
    NeedMore,
    /// A complete character.
    Char(char),
    /// A high surrogate was decoded; the next escape must be its low half.
    NeedLowSurrogate,
    /// Not a hex digit, or a surrogate without its partner.
    Invalid,
}

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u32,
    len: u8,
    high: Option<u32>,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clears accumulated digits and any pending high surrogate.
    pub(crate) fn reset(&mut self) {
        self.unit = 0;
        self.len = 0;
        self.high = None;
    }

    pub(crate) fn feed(&mut self, c: char) -> UnicodeStep {
        let Some(digit) = c.to_digit(16) else {
            return UnicodeStep::Invalid;
        };

        self.unit = (self.unit << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return UnicodeStep::NeedMore;
        }

        let unit = self.unit;
        self.unit = 0;
        self.len = 0;

        match self.high.take() {
            Some(high) if LOW_SURROGATES.contains(&unit) => {
                let code = 0x1_0000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
                char::from_u32(code).map_or(UnicodeStep::Invalid, UnicodeStep::Char)
            }
            Some(_) => UnicodeStep::Invalid,
            None if HIGH_SURROGATES.contains(&unit) => {
                self.high = Some(unit);
                UnicodeStep::NeedLowSurrogate
            }
            None => char::from_u32(unit).map_or(UnicodeStep::Invalid, UnicodeStep::Char),
        }
    }
}
