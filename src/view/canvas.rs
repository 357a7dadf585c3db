use std::io::{self, Write};

use crate::{pos, Pos};

pub struct Canvas {
    cells: Vec<char>,
    status: String,
    width: usize,
    height: usize,
}

impl Canvas {
    /// a canvas covering the terminal, minus one line for the status bar.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![' '; width * height],
            status: String::new(),
            width,
            height,
        }
    }

    /// draws `c` at `pos`, positions off the canvas are ignored.
    pub fn plot(&mut self, pos: Pos, c: char) {
        let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.cells[x + y * self.width] = c;
        }
    }

    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = pos!(x as i32, y as i32);
                if let Some(c) = f(pos) {
                    self.plot(pos, c);
                }
            }
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect())
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;
        for (index, line) in self.lines().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let status: String = self.status.chars().take(self.width).collect();
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}
