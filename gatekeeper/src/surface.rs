//! Where a positive verdict is shown.

use std::io::{self, Write};

use envguard_scorer::{Locale, Verdict};
use thiserror::Error;

use crate::screen::BlockMessage;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("blocking surface I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Presents the block to the operator of the runtime.
///
/// Implementations that return must have finished showing the block; the
/// gatekeeper treats startup as blocked whether or not this succeeds.
pub trait BlockSurface {
    fn block(&self, verdict: &Verdict) -> Result<(), SurfaceError>;
}

impl<T: BlockSurface + ?Sized> BlockSurface for &T {
    fn block(&self, verdict: &Verdict) -> Result<(), SurfaceError> {
        (**self).block(verdict)
    }
}

impl<T: BlockSurface + ?Sized> BlockSurface for Box<T> {
    fn block(&self, verdict: &Verdict) -> Result<(), SurfaceError> {
        (**self).block(verdict)
    }
}

/// Writes the fixed message to stderr. Used when there is no terminal.
#[derive(Debug, Clone)]
pub struct StderrBlockSurface {
    locale: Locale,
}

impl StderrBlockSurface {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn write_message(&self, out: &mut impl Write) -> io::Result<()> {
        let message = BlockMessage::for_locale(self.locale);
        writeln!(out, "{}", message.title)?;
        for line in message.lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

impl BlockSurface for StderrBlockSurface {
    fn block(&self, _verdict: &Verdict) -> Result<(), SurfaceError> {
        self.write_message(&mut io::stderr().lock())?;
        Ok(())
    }
}
