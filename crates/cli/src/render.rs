//! Terminal progress rendering
//!
//! One line per worker, redrawn in place each poll tick:
//!
//! ```text
//! [##########|####------|----------]  44%
//! [##########|##########|#######---]  90%
//! ```
//!
//! Each `|`-separated segment is one stage; the trailing percentage is the
//! mean across stages.

use std::io::{self, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use progress_engine::ProgressTable;
use runner::ProgressView;

const EDGE_COLOR: Color = Color::DarkCyan;
const FILL_COLOR: Color = Color::Green;

/// In-place progress bar renderer
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    lines_drawn: u16,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the cursor once the run is over
    pub fn finish(&mut self) {
        let mut out = io::stdout();
        let _ = queue!(out, cursor::Show);
        let _ = out.flush();
    }

    fn draw(&mut self, table: &ProgressTable) -> io::Result<()> {
        let mut out = io::stdout();
        // Hashes per stage segment, sized so a full bar is ~100 wide.
        let hashes_per_stage = (100.0 / table.stage_count().max(1) as f64).ceil() as usize;

        queue!(out, cursor::Hide)?;
        if self.lines_drawn > 0 {
            queue!(out, cursor::MoveUp(self.lines_drawn))?;
        }

        for slot in table.slots() {
            queue!(out, terminal::Clear(terminal::ClearType::CurrentLine))?;
            queue!(out, SetForegroundColor(EDGE_COLOR))?;
            write!(out, "[")?;
            for (stage, fraction) in slot.stages().iter().enumerate() {
                let filled = (*fraction * hashes_per_stage as f32).floor() as usize;
                queue!(out, SetForegroundColor(FILL_COLOR))?;
                write!(out, "{}", "#".repeat(filled))?;
                queue!(out, SetForegroundColor(EDGE_COLOR))?;
                write!(out, "{}", "-".repeat(hashes_per_stage - filled))?;
                if stage < slot.stages().len() - 1 {
                    write!(out, "|")?;
                }
            }
            write!(out, "]")?;
            queue!(out, SetForegroundColor(FILL_COLOR))?;
            writeln!(out, " {:3.0}%", (slot.overall() * 100.0).ceil())?;
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        self.lines_drawn = table.worker_count() as u16;
        Ok(())
    }
}

impl ProgressView for TerminalRenderer {
    fn render(&mut self, table: &ProgressTable) {
        // Terminal write failures must never stall a run.
        let _ = self.draw(table);
    }
}
