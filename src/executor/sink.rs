//! Output consumers for rendered chunks

use std::io::Write;

use super::error::RenderError;

/// Receives output chunks in program order
pub trait Sink {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError>;
}

impl Sink for String {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError> {
        self.push_str(chunk);
        Ok(())
    }
}

/// Collects each chunk separately
impl Sink for Vec<String> {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError> {
        self.push(chunk.to_string());
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError> {
        (**self).accept(chunk)
    }
}

/// Streams chunks into an [`std::io::Write`]
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

impl<W: Write> Sink for WriterSink<W> {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError> {
        self.writer.write_all(chunk.as_bytes())?;
        Ok(())
    }
}

/// Adapts a closure into a [`Sink`]
pub struct FnSink<F> {
    f: F,
}

/// Build a sink from a closure
pub fn from_fn<F: FnMut(&str)>(f: F) -> FnSink<F> {
    FnSink { f }
}

impl<F: FnMut(&str)> Sink for FnSink<F> {
    fn accept(&mut self, chunk: &str) -> Result<(), RenderError> {
        (self.f)(chunk);
        Ok(())
    }
}
