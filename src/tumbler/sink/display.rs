use super::{render_lock, LockSink};
use crate::error::Result;
use crate::model::LockConfiguration;
use std::io::Write;

/// Interactive sink: every lock goes straight to the writer and is flushed
/// before the next one is produced.
pub struct DisplaySink<W: Write> {
    out: W,
}

impl<W: Write> DisplaySink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LockSink for DisplaySink<W> {
    fn write_lock(&mut self, index: u64, config: &LockConfiguration<'_>) -> Result<()> {
        render_lock(&mut self.out, index, config)?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
