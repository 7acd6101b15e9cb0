//! Display sinks: read-only observers of the calculator's frame.

use crate::core::Frame;
use std::io::Write;

/// Receives a frame after every state change.
///
/// A sink only reads: it gets the frame by reference and has no way to
/// reach back into the calculator.
pub trait DisplaySink {
    fn render(&mut self, frame: &Frame);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn render(&mut self, frame: &Frame) {
        (**self).render(frame);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn render(&mut self, frame: &Frame) {
        (**self).render(frame);
    }
}

/// Keeps every frame it was shown.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

/// Keeps only the most recent frame.
#[derive(Debug, Default, Clone)]
pub struct LatestSink {
    latest: Option<Frame>,
}

impl LatestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Frame> {
        self.latest.as_ref()
    }
}

impl DisplaySink for LatestSink {
    fn render(&mut self, frame: &Frame) {
        self.latest = Some(frame.clone());
    }
}

/// Writes each frame as two lines: the previous-operand line, then the
/// current operand.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for WriterSink<W> {
    fn render(&mut self, frame: &Frame) {
        let written = writeln!(self.writer, "{frame}").and_then(|()| self.writer.flush());
        if let Err(error) = written {
            tracing::warn!(%error, "failed to write display frame");
        }
    }
}
