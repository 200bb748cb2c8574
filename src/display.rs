//! Terminal output of rendered paths: an interactive scrollable view, or a
//! one-shot print to stdout.

use crate::collatz::{Sequence, SequenceCollection};
use crate::config::PathsConfig;
use crate::error::Result;
use crate::help::show_help_modal;
use crate::render::render;
use crate::surface::BrailleCanvas;
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use crossterm::style::Color;

const HELP: &str = "\
COLLATZ PATHS
─────────────────────────
←↑↓→ / hjkl  Scroll
PgUp/PgDn    Scroll a page
Home         Back to start
q/Esc        Quit
?            Close help";

/// Cells moved per arrow press
const SCROLL_X: isize = 4;
const SCROLL_Y: isize = 2;

/// Top-left canvas cell shown in the terminal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
}

impl Viewport {
    /// Move by `(dx, dy)` cells without scrolling past the canvas edge
    pub fn scroll(&mut self, dx: isize, dy: isize, canvas: (usize, usize), view: (usize, usize)) {
        let max_x = canvas.0.saturating_sub(view.0);
        let max_y = canvas.1.saturating_sub(view.1);
        self.x = self.x.saturating_add_signed(dx).min(max_x);
        self.y = self.y.saturating_add_signed(dy).min(max_y);
    }
}

/// Copy the canvas cells visible from `view` into the top `rows` rows
fn blit(term: &mut Terminal, canvas: &BrailleCanvas, view: Viewport, rows: u16) {
    let (width, _) = term.size();
    for ty in 0..rows {
        for tx in 0..width {
            if let Some((ch, color)) = canvas.cell(view.x + tx as usize, view.y + ty as usize) {
                term.set(tx as i32, ty as i32, ch, Some(color.to_color()));
            }
        }
    }
}

fn summary(collection: &SequenceCollection) -> String {
    let first = collection.iter().next().map(Sequence::start);
    let last = collection.iter().last().map(Sequence::start);
    match (first, last) {
        (Some(first), Some(last)) => format!("{} paths, n = {}..={}", collection.len(), first, last),
        _ => "no paths".to_string(),
    }
}

fn draw(term: &mut Terminal, canvas: &BrailleCanvas, view: Viewport, summary: &str) {
    let (_, height) = term.size();
    let rows = height.saturating_sub(1);

    term.clear();
    blit(term, canvas, view, rows);

    let status = format!(" {}  at {},{}  ? help ", summary, view.x, view.y);
    term.set_str(0, rows as i32, &status, Some(Color::DarkGrey));
}

/// Draw in the alternate screen, then let the user scroll until they quit
pub fn run_interactive(config: &PathsConfig, collection: &SequenceCollection) -> Result<()> {
    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let heading = summary(collection);
    let mut canvas = BrailleCanvas::new();
    let mut view = Viewport::default();

    render(&mut canvas, collection, config, |canvas| {
        draw(&mut term, canvas, view, &heading);
        Ok(term.present()?)
    })?;

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            draw(&mut term, &canvas, view, &heading);
            term.present()?;
        }

        let Some(code) = term.wait_key(50)? else {
            continue;
        };

        let page = (width as usize, height.saturating_sub(1) as usize);
        let page_rows = page.1 as isize;
        let (dx, dy) = match code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('?') => {
                if show_help_modal(&mut term, HELP)? {
                    break;
                }
                continue;
            }
            KeyCode::Home => {
                view = Viewport::default();
                (0, 0)
            }
            KeyCode::Left | KeyCode::Char('h') => (-SCROLL_X, 0),
            KeyCode::Right | KeyCode::Char('l') => (SCROLL_X, 0),
            KeyCode::Up | KeyCode::Char('k') => (0, -SCROLL_Y),
            KeyCode::Down | KeyCode::Char('j') => (0, SCROLL_Y),
            KeyCode::PageUp => (0, -page_rows),
            KeyCode::PageDown => (0, page_rows),
            _ => continue,
        };

        view.scroll(dx, dy, canvas.cells(), page);
        draw(&mut term, &canvas, view, &heading);
        term.present()?;
    }

    Ok(())
}

/// Render and print to stdout, clipped to the terminal width
pub fn run_print(config: &PathsConfig, collection: &SequenceCollection) -> Result<()> {
    let mut canvas = BrailleCanvas::new();
    render(&mut canvas, collection, config, |_| Ok(()))?;

    let (cols, rows) = canvas.cells();
    let term_width = crossterm::terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    let width = cols.min(term_width).min(u16::MAX as usize) as u16;
    let height = rows.min(u16::MAX as usize) as u16;

    let mut term = Terminal::detached(width, height);
    blit(&mut term, &canvas, Viewport::default(), height);
    term.print_to_stdout()?;
    Ok(())
}
