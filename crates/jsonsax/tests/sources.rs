#![expect(missing_docs)]

use std::io::{self, Cursor, Read, Write};

use jsonsax::{
    ErrorKind, EventRecorder, JsonEvent, ParseStatus, ReadError,
    data::{BytesData, Data, FileData, StringData, parse_data},
    parse_reader, parse_str, parse_tree, parse_tree_reader,
};

const DOCUMENT: &str = r#"{
    "request": {"filename": "example.rs", "tags": ["serde", "tokio"]},
    "unicode": "héllo wörld 😀 é😀",
    "numbers": [0, -1, 9223372036854775807, 9223372036854775808, 1.5e3],
    "flags": [true, false, null]
}"#;

fn reference_events() -> Vec<JsonEvent> {
    let mut recorder = EventRecorder::new();
    assert_eq!(parse_str(DOCUMENT, &mut recorder), Ok(ParseStatus::Complete));
    recorder.into_events()
}

/// Hands out at most one byte per read, splitting every multi-byte sequence.
struct OneByte<R>(R);

impl<R: Read> Read for OneByte<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.0.read(&mut buf[..len])
    }
}

/// Fails with `Interrupted` on every other call.
struct Flaky<R> {
    inner: R,
    interrupt: bool,
}

impl<R: Read> Read for Flaky<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

#[test]
fn one_byte_reader_matches_in_memory_parse() {
    let mut recorder = EventRecorder::new();
    let status = parse_reader(OneByte(DOCUMENT.as_bytes()), &mut recorder).unwrap();
    assert_eq!(status, ParseStatus::Complete);
    assert_eq!(recorder.into_events(), reference_events());
}

#[test]
fn interrupted_reads_are_retried() {
    let reader = Flaky {
        inner: Cursor::new(DOCUMENT),
        interrupt: false,
    };
    let mut recorder = EventRecorder::new();
    assert_eq!(
        parse_reader(reader, &mut recorder).unwrap(),
        ParseStatus::Complete
    );
    assert_eq!(recorder.into_events(), reference_events());
}

#[test]
fn document_larger_than_one_read_buffer() {
    let mut text = String::from("[");
    for i in 0..jsonsax::READ_BUFFER_SIZE {
        if i > 0 {
            text.push(',');
        }
        text.push_str("\"ü\"");
    }
    text.push(']');

    let mut recorder = EventRecorder::new();
    assert_eq!(
        parse_reader(text.as_bytes(), &mut recorder).unwrap(),
        ParseStatus::Complete
    );
    assert_eq!(recorder.events().len(), jsonsax::READ_BUFFER_SIZE + 2);
}

#[test]
fn reader_errors_are_propagated() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    let mut recorder = EventRecorder::new();
    let err = parse_reader(Broken, &mut recorder).unwrap_err();
    assert!(
        matches!(&err, ReadError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe),
        "{err}"
    );
}

#[test]
fn invalid_utf8_reports_byte_offset() {
    let mut recorder = EventRecorder::new();
    let err = parse_reader(&b"[\"\xC3\xA9\", \"\xFF\"]"[..], &mut recorder).unwrap_err();
    assert!(
        matches!(err, ReadError::InvalidUtf8 { byte_offset: 8 }),
        "{err}"
    );
}

#[test]
fn syntax_errors_keep_their_location() {
    let mut recorder = EventRecorder::new();
    let err = parse_reader("[\n1,\n]".as_bytes(), &mut recorder).unwrap_err();
    let ReadError::Syntax(err) = err else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    assert_eq!((err.offset, err.line, err.column), (5, 3, 1));
}

#[test]
fn file_data_streams_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();
    file.flush().unwrap();

    let data = FileData::new(file.path());
    assert_eq!(data.size().unwrap(), DOCUMENT.len() as u64);

    let mut recorder = EventRecorder::new();
    assert_eq!(
        parse_data(&data, &mut recorder).unwrap(),
        ParseStatus::Complete
    );
    assert_eq!(recorder.into_events(), reference_events());
}

#[test]
fn data_payloads_agree() {
    let payloads: Vec<Box<dyn Data>> = vec![
        Box::new(StringData::new(DOCUMENT)),
        Box::new(BytesData::new(DOCUMENT.as_bytes())),
    ];
    for data in &payloads {
        assert_eq!(data.size().unwrap(), DOCUMENT.len() as u64);

        let mut sink = Vec::new();
        data.append_to(&mut sink).unwrap();
        assert_eq!(sink, DOCUMENT.as_bytes());

        let mut recorder = EventRecorder::new();
        assert_eq!(
            parse_data(&**data, &mut recorder).unwrap(),
            ParseStatus::Complete
        );
        assert_eq!(recorder.into_events(), reference_events());
    }
}

#[test]
fn cancelled_payload_is_not_an_error() {
    let data = StringData::new(DOCUMENT);
    let mut recorder = EventRecorder::with_limit(2);
    assert_eq!(
        parse_data(&data, &mut recorder).unwrap(),
        ParseStatus::Cancelled
    );
    assert_eq!(recorder.events().len(), 2);
}

#[test]
fn tree_from_split_reader_matches_tree_from_str() {
    let tree = parse_tree_reader(OneByte(Cursor::new(DOCUMENT.as_bytes()))).unwrap();
    assert_eq!(Ok(tree.clone()), parse_tree(DOCUMENT));
    assert_eq!(
        tree.keys().collect::<Vec<_>>(),
        vec!["request", "unicode", "numbers", "flags"]
    );
    assert_eq!(
        tree.get("flags").map(ToString::to_string).as_deref(),
        Some("[true,false,null]")
    );
}
