use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Double-buffered terminal. Drawing goes to the back buffer; `present`
/// writes only the cells that changed since the last frame.
pub struct Terminal {
    width: u16,
    height: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        let cells = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            back: vec![Cell::default(); cells],
            front: vec![Cell::default(); cells],
            alternate_screen,
        })
    }

    /// Off-screen buffer of a fixed size; never touches the tty until printed
    pub fn offscreen(width: u16, height: u16) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![Cell::default(); cells],
            front: vec![Cell::default(); cells],
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate both buffers; the next `present` repaints everything
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let cells = width as usize * height as usize;
        self.back = vec![Cell::default(); cells];
        self.front = vec![Cell { ch: '\0', fg: None }; cells];
    }

    /// Clear the back buffer
    pub fn clear(&mut self) {
        self.back.fill(Cell::default());
    }

    /// Clear the actual terminal
    pub fn clear_screen(&mut self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        self.front.fill(Cell::default());
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = Cell { ch, fg };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg);
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.back[i])
    }

    fn write_cell(out: &mut impl Write, x: u16, y: u16, cell: Cell) -> io::Result<()> {
        queue!(out, MoveTo(x, y))?;
        match cell.fg {
            Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
            None => queue!(out, Print(cell.ch))?,
        }
        Ok(())
    }

    /// Write cells that differ from what is on screen
    pub fn present(&mut self) -> io::Result<()> {
        let mut out = stdout().lock();
        let width = self.width.max(1) as usize;

        for (i, (back, front)) in self.back.iter().zip(self.front.iter_mut()).enumerate() {
            if back != front {
                Self::write_cell(&mut out, (i % width) as u16, (i / width) as u16, *back)?;
                *front = *back;
            }
        }

        out.flush()
    }

    /// Repaint the whole back buffer regardless of what is on screen
    pub fn render(&mut self) -> io::Result<()> {
        self.front.fill(Cell { ch: '\0', fg: None });
        self.present()
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds.max(0.0).min(60.0)));
    }

    /// Print buffer to stdout with ANSI colors (for sketch mode)
    pub fn print_to_stdout(&self) {
        let width = self.width.max(1) as usize;
        for row in self.back.chunks(width) {
            let mut line = String::new();
            for cell in row {
                match cell.fg {
                    Some(Color::Rgb { r, g, b }) if cell.ch != ' ' => {
                        line.push_str(&format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, cell.ch));
                    }
                    Some(Color::AnsiValue(v)) if cell.ch != ' ' => {
                        line.push_str(&format!("\x1b[38;5;{}m{}\x1b[0m", v, cell.ch));
                    }
                    _ => line.push(cell.ch),
                }
            }
            println!("{}", line.trim_end());
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
