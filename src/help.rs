use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

/// Box around the help text, centered in `width` x `height`
struct HelpBox<'a> {
    lines: Vec<&'a str>,
    inner_width: usize,
    x: u16,
    y: u16,
}

impl<'a> HelpBox<'a> {
    fn layout(width: u16, height: u16, help_text: &'a str) -> Self {
        let lines: Vec<&str> = help_text.lines().collect();
        let inner_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let box_width = inner_width + 4; // 2 chars padding each side
        let box_height = lines.len() + 2;

        Self {
            x: ((width as usize).saturating_sub(box_width) / 2) as u16,
            y: ((height as usize).saturating_sub(box_height) / 2) as u16,
            lines,
            inner_width,
        }
    }

    fn border(&self, left: char, right: char) -> String {
        format!("{}{}{}", left, "─".repeat(self.inner_width + 2), right)
    }

    fn row(&self, line: &str) -> String {
        let padding = self.inner_width.saturating_sub(line.chars().count());
        format!(" {}{} ", line, " ".repeat(padding))
    }
}

/// Show a modal help overlay on top of the current frame.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_help_box(&HelpBox::layout(width, height, help_text))?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from back buffer.
    term.present()?;
    Ok(false)
}

fn draw_help_box(help: &HelpBox) -> io::Result<()> {
    let border_color = Color::White;
    let text_color = Color::Grey;
    let right_x = help.x + help.inner_width as u16 + 3;

    let mut out = stdout();

    queue!(out, MoveTo(help.x, help.y), SetForegroundColor(border_color), Print(help.border('┌', '┐')))?;

    for (i, line) in help.lines.iter().enumerate() {
        let y = help.y + 1 + i as u16;
        queue!(out, MoveTo(help.x, y), SetForegroundColor(border_color), Print('│'))?;
        queue!(out, SetForegroundColor(text_color), Print(help.row(line)))?;
        queue!(out, SetForegroundColor(border_color), MoveTo(right_x, y), Print('│'))?;
    }

    let bottom_y = help.y + help.lines.len() as u16 + 1;
    queue!(out, MoveTo(help.x, bottom_y), SetForegroundColor(border_color), Print(help.border('└', '┘')))?;

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}
