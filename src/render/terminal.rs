use std::io::Write;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};

use crate::{
    foundation::{
        core::CharGrid,
        error::{MorphError, MorphResult},
    },
    render::sink::FrameRenderer,
    scene::words::guess_full_word,
};

fn io_err(e: std::io::Error) -> MorphError {
    MorphError::Other(e.into())
}

/// Bottom toolbar text, centred and cut to `cols`.
pub fn toolbar_row(cols: usize, autoplay: bool) -> String {
    let text = if autoplay {
        "[a] Stop Autoplay | [q] Quit"
    } else {
        "[a] Start Autoplay | [q] Quit"
    };
    let pad = cols.saturating_sub(text.chars().count()) / 2;
    let mut row: String = " ".repeat(pad);
    row.push_str(text);
    let mut row: String = row.chars().take(cols).collect();
    while row.chars().count() < cols {
        row.push(' ');
    }
    row
}

/// Half-open column ranges of alphanumeric runs in `line`.
pub fn word_runs(line: &[char]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, c) in line.iter().enumerate() {
        match (c.is_alphanumeric(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, line.len()));
    }
    runs
}

/// Runs of `line` worth underlining on a live frame.
///
/// With no related words every run counts; otherwise only runs that resolve to a related
/// word through [`guess_full_word`].
pub fn related_runs(line: &[char], related: &[String]) -> Vec<(usize, usize)> {
    let runs = word_runs(line);
    if related.is_empty() {
        return runs;
    }
    runs.into_iter()
        .filter(|&(s, e)| {
            let fragment: String = line[s..e].iter().collect();
            guess_full_word(&fragment, related).is_some()
        })
        .collect()
}

/// Full-screen crossterm renderer. The last display row holds the toolbar.
///
/// Live frames underline the runs that belong to the related vocabulary.
pub struct TerminalRenderer<W: Write> {
    out: W,
    autoplay: bool,
    active: bool,
    related: Vec<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            autoplay: false,
            active: false,
            related: Vec::new(),
        }
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Vocabulary used to pick which runs a live frame underlines.
    pub fn set_related(&mut self, related: &[String]) {
        self.related = related.to_vec();
    }

    /// Switch to the alternate screen and hide the cursor.
    pub fn enter(&mut self) -> MorphResult<()> {
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .map_err(io_err)?;
        self.active = true;
        Ok(())
    }

    /// Restore the primary screen. Safe to call more than once.
    pub fn leave(&mut self) -> MorphResult<()> {
        if !self.active {
            return Ok(());
        }
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen).map_err(io_err)?;
        self.active = false;
        Ok(())
    }

    fn draw(&mut self, frame: &CharGrid, underline_words: bool) -> MorphResult<()> {
        for r in 0..frame.rows() {
            let line = frame.row(r);
            queue!(self.out, cursor::MoveTo(0, r as u16)).map_err(io_err)?;
            if !underline_words {
                let text: String = line.iter().collect();
                queue!(self.out, Print(text)).map_err(io_err)?;
                continue;
            }
            let mut at = 0;
            for (s, e) in related_runs(line, &self.related) {
                let plain: String = line[at..s].iter().collect();
                let word: String = line[s..e].iter().collect();
                queue!(
                    self.out,
                    Print(plain),
                    SetAttribute(Attribute::Underlined),
                    Print(word),
                    SetAttribute(Attribute::NoUnderline)
                )
                .map_err(io_err)?;
                at = e;
            }
            let tail: String = line[at..].iter().collect();
            queue!(self.out, Print(tail)).map_err(io_err)?;
        }

        let toolbar = toolbar_row(frame.cols(), self.autoplay);
        queue!(
            self.out,
            cursor::MoveTo(0, frame.rows() as u16),
            SetAttribute(Attribute::Reverse),
            Print(toolbar),
            SetAttribute(Attribute::NoReverse)
        )
        .map_err(io_err)?;
        self.out.flush().map_err(io_err)
    }
}

impl<W: Write> FrameRenderer for TerminalRenderer<W> {
    fn render_replay(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.draw(frame, false)
    }

    fn render_live(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.draw(frame, true)
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Writes each frame as plain text followed by a blank line.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, frame: &CharGrid) -> MorphResult<()> {
        writeln!(self.out, "{frame}\n").map_err(io_err)
    }
}

impl<W: Write> FrameRenderer for TextRenderer<W> {
    fn render_replay(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.write(frame)
    }

    fn render_live(&mut self, frame: &CharGrid) -> MorphResult<()> {
        self.write(frame)
    }
}

/// Current terminal size as `(rows, cols)`.
pub fn terminal_size() -> MorphResult<(usize, usize)> {
    let (cols, rows) = terminal::size().map_err(io_err)?;
    Ok((usize::from(rows), usize::from(cols)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/terminal.rs"]
mod tests;
