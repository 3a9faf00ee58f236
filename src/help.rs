use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::io;

pub const PLAY_HELP: &str = "\
WINDCHIMES
─────────────────────
 w       New wind
 + / -   More / fewer chimes
 c       Next chord
 m       Mute / unmute
 Space   Pause / resume
 1-9     Speed (1=fast)
 q/Esc   Quit
 ?       Close help
─────────────────────";

/// Draw a centered box with `help_text` into the back buffer
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    let lines: Vec<&str> = help_text.lines().collect();
    if lines.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let box_width = inner + 2;
    let box_height = lines.len() + 2;
    let left = (width as usize).saturating_sub(box_width) as i32 / 2;
    let top = (height as usize).saturating_sub(box_height) as i32 / 2;
    let border = Some(Color::White);

    let horizontal = "─".repeat(inner);
    term.set_str(left, top, &format!("┌{}┐", horizontal), border);
    for (i, line) in lines.iter().enumerate() {
        let y = top + 1 + i as i32;
        let padded = format!(" {:<width$} ", line, width = inner - 2);
        term.set(left, y, '│', border);
        term.set_str(left + 1, y, &padded, Some(Color::Grey));
        term.set(left + 1 + inner as i32, y, '│', border);
    }
    term.set_str(left, top + box_height as i32 - 1, &format!("└{}┘", horizontal), border);
}

/// Show the overlay until `?` closes it.
/// Returns true if the user asked to quit while it was open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    render_help_overlay(term, help_text);
    term.present()?;

    loop {
        match term.wait_key(50)? {
            Some(KeyCode::Char('?')) => return Ok(false),
            Some(KeyCode::Char('q')) | Some(KeyCode::Esc) => return Ok(true),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_centered_box() {
        let mut term = Terminal::offscreen(60, 20);
        render_help_overlay(&mut term, "AB\nC");
        // inner 4, box 6 x 4
        assert_eq!(term.get(27, 8).map(|c| c.ch), Some('┌'));
        assert_eq!(term.get(32, 8).map(|c| c.ch), Some('┐'));
        assert_eq!(term.get(29, 9).map(|c| c.ch), Some('A'));
        assert_eq!(term.get(27, 11).map(|c| c.ch), Some('└'));
    }

    #[test]
    fn test_help_mentions_every_control() {
        for key in ["w ", "+ / -", "c ", "m ", "Space", "1-9", "q/Esc"] {
            assert!(PLAY_HELP.contains(key), "missing {}", key);
        }
    }
}
