#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use jsonsax::{EventRecorder, JsonEvent, JsonTokenizer, NumberMode, ParserError, ParserOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    allow_multiple_json_values: bool,
    doubles: bool,
    split_seed: u64,
    text: String,
}

fn tokenize(chunks: &[&str], options: ParserOptions) -> Result<Vec<JsonEvent>, ParserError> {
    let mut recorder = EventRecorder::new();
    let mut tokenizer = JsonTokenizer::new(&mut recorder, options);
    for chunk in chunks {
        tokenizer.feed(chunk)?;
    }
    tokenizer.finish()?;
    Ok(recorder.into_events())
}

fn tokenizer(data: &[u8]) {
    let Ok(input) = Input::arbitrary_take_rest(Unstructured::new(data)) else {
        return;
    };

    let options = ParserOptions {
        allow_multiple_json_values: input.allow_multiple_json_values,
        number_mode: if input.doubles {
            NumberMode::Doubles
        } else {
            NumberMode::Longs
        },
        panic_on_error: false,
    };

    let whole = tokenize(&[input.text.as_str()], options);
    let chunks = split_into_safe_chunks(&input.text, input.split_seed);
    let parts = tokenize(&chunks, options);

    // Errors must be reported at the same place however the input is split.
    assert_eq!(whole, parts, "chunking changed the outcome for {:?}", input.text);

    if !input.allow_multiple_json_values
        && serde_json::from_str::<serde_json::Value>(&input.text).is_ok()
    {
        assert!(whole.is_ok(), "rejected valid JSON {:?}: {whole:?}", input.text);
    }
}

fuzz_target!(|data: &[u8]| tokenizer(data));

/// Split a UTF-8 `&str` into boundary-safe chunks using a deterministic random
/// value to generate splits.
///
/// * `split_seed` may be any `u64`.
/// * Each chunk is at least one byte.
/// * Every slice ends on a valid UTF-8 boundary, so it can’t panic.
fn split_into_safe_chunks(serialized: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = serialized.len();
    let mut seed = split_seed;

    while start < len {
        let remaining = len - start;

        let mut size = (seed as usize % remaining) + 1;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9_7F4A_7C15;

        // Bump `size` forward until it lands on a char boundary
        // (or hits the end of the string, which is always a boundary).
        while start + size < len && !serialized.is_char_boundary(start + size) {
            size += 1;
        }

        chunks.push(&serialized[start..start + size]);
        start += size;
    }

    chunks
}
