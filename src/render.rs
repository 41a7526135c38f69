//! Progress renderers.
//!
//! The cycler only produces [`Progress`] values. A [`Renderer`] turns them
//! into something visible; [`TerminalRenderer`] redraws a single terminal
//! line and [`MemoryRenderer`] keeps every frame for inspection.

use std::io::{self, Write};

use crate::cycler::Progress;

const CLEAR_LINE: &str = "\r\x1b[2K";
const FAINT: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Receives each progress value as the animation advances.
pub trait Renderer {
    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written.
    fn render(&mut self, progress: &Progress) -> io::Result<()>;

    /// Called once when the animation stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the final output cannot be written.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// TerminalRenderer
// ============================================================================

/// Redraws the current phrase in place on one terminal line.
///
/// A cursor follows the text and is drawn faint while the animation waits.
/// Without ANSI support the line is cleared by padding with spaces.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    ansi: bool,
    cursor: char,
    last_width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer writing to `out`.
    #[must_use]
    pub const fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            cursor: '|',
            last_width: 0,
        }
    }

    /// Replaces the cursor character.
    #[must_use]
    pub fn with_cursor(mut self, cursor: char) -> Self {
        self.cursor = cursor;
        self
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, progress: &Progress) -> io::Result<()> {
        let width = progress.revealed_len() + 1;
        if self.ansi {
            write!(self.out, "{CLEAR_LINE}{}", progress.phrase)?;
            if progress.status.is_waiting() {
                write!(self.out, "{FAINT}{}{RESET}", self.cursor)?;
            } else {
                write!(self.out, "{}", self.cursor)?;
            }
        } else {
            let pad = self.last_width.saturating_sub(width);
            write!(
                self.out,
                "\r{}{}{:pad$}",
                progress.phrase,
                self.cursor,
                ""
            )?;
        }
        self.last_width = width;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

// ============================================================================
// MemoryRenderer
// ============================================================================

/// Records every frame it is given.
#[derive(Debug, Default, Clone)]
pub struct MemoryRenderer {
    /// Frames in the order they were rendered.
    pub frames: Vec<Progress>,
    /// Whether [`Renderer::finish`] was called.
    pub finished: bool,
}

impl MemoryRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The phrase text of every frame.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.frames.iter().map(|p| p.phrase.as_str()).collect()
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, progress: &Progress) -> io::Result<()> {
        self.frames.push(progress.clone());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
