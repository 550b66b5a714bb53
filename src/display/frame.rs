/// A composed frame: a grid of coloured characters, independent of any
/// terminal.
use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col as i32, row as i32).map(|i| self.cells[i])
    }

    /// Write one cell; anything off the grid is clipped.
    pub fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch, fg };
        }
    }

    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    /// Text centred on `row`.
    pub fn centered(&mut self, row: i32, text: &str, fg: Color) {
        let col = (self.width as i32 - text.chars().count() as i32) / 2;
        self.text(col, row, text, fg);
    }

    pub fn fill(&mut self, ch: char, fg: Color) {
        self.cells.fill(Cell { ch, fg });
    }

    /// Recolour every non-blank cell.
    pub fn tint(&mut self, fg: Color) {
        for cell in self.cells.iter_mut().filter(|c| c.ch != ' ') {
            cell.fg = fg;
        }
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    /// Every row joined with newlines; handy for searching a frame.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|r| self.row_text(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
