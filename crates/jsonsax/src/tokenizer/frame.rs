use alloc::{string::String, vec::Vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Block,
    Array,
}

impl FrameKind {
    /// The container closed by `c`, if `c` is a closing bracket.
    pub(crate) fn closed_by(c: char) -> Option<Self> {
        match c {
            '}' => Some(FrameKind::Block),
            ']' => Some(FrameKind::Array),
            _ => None,
        }
    }
}

/// Stack entry, one per open container. `name` is echoed back on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    pub(crate) name: String,
}

#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
        }
    }

    pub(crate) fn push(&mut self, kind: FrameKind, name: String) {
        self.frames.push(Frame { kind, name });
    }

    /// Pops the innermost frame only if it is of `kind`.
    pub(crate) fn pop_matching(&mut self, kind: FrameKind) -> Option<Frame> {
        if self.last_kind()? == kind {
            self.frames.pop()
        } else {
            None
        }
    }

    pub(crate) fn last_kind(&self) -> Option<FrameKind> {
        self.frames.last().map(|frame| frame.kind)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
