//! In-memory grid used by the test suites.

use crate::attributes::CellAttributes;
use crate::screen::{DoubleHeight, Screen};

#[derive(Clone, Copy)]
struct Cell {
    c: char,
    attribute: CellAttributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            attribute: CellAttributes::default(),
        }
    }
}

/// A plain character matrix implementing every screen operation literally.
/// Wrapping is immediate rather than deferred; close enough for exercising
/// the emulation layer.
pub(crate) struct TestScreen {
    width: u16,
    height: u16,
    cursor_x: u16,
    cursor_y: u16,
    origin_mode: bool,
    region_top: u16,
    region_bottom: u16,
    attribute: CellAttributes,
    rows: Vec<Vec<Cell>>,
    pub beeps: usize,
    pub cursor_shown: bool,
    pub inverted: bool,
    pub double_width: bool,
    pub double_height: DoubleHeight,
}

impl TestScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            origin_mode: false,
            region_top: 0,
            region_bottom: height - 1,
            attribute: CellAttributes::default(),
            rows: blank_rows(width, height),
            beeps: 0,
            cursor_shown: true,
            inverted: false,
            double_width: false,
            double_height: DoubleHeight::None,
        }
    }

    pub fn ch(&self, row: u16, col: u16) -> char {
        self.rows[row as usize][col as usize].c
    }

    pub fn attr_at(&self, row: u16, col: u16) -> CellAttributes {
        self.rows[row as usize][col as usize].attribute
    }

    pub fn row_text(&self, row: u16) -> String {
        self.rows[row as usize]
            .iter()
            .map(|cell| cell.c)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.c == ' '))
    }

    fn blank_row(&self) -> Vec<Cell> {
        vec![Cell::default(); self.width as usize]
    }
}

fn blank_rows(width: u16, height: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); width as usize]; height as usize]
}

impl Screen for TestScreen {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn cursor_x(&self) -> u16 {
        self.cursor_x
    }

    fn cursor_y(&self) -> u16 {
        self.cursor_y
    }

    fn origin_mode(&self) -> bool {
        self.origin_mode
    }

    fn set_origin_mode(&mut self, on: bool) {
        self.origin_mode = on;
    }

    fn scroll_region_top(&self) -> u16 {
        self.region_top
    }

    fn scroll_region_bottom(&self) -> u16 {
        self.region_bottom
    }

    fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        self.region_top = top;
        self.region_bottom = bottom;
    }

    fn attribute(&self) -> CellAttributes {
        self.attribute
    }

    fn set_attribute(&mut self, attribute: CellAttributes) {
        self.attribute = attribute;
    }

    fn cursor_position(&mut self, row: u16, col: u16) {
        self.cursor_y = row.min(self.height - 1);
        self.cursor_x = col.min(self.width - 1);
    }

    fn cursor_up(&mut self, count: u16, honor_scroll_region: bool) {
        let floor = if honor_scroll_region && self.cursor_y >= self.region_top
        {
            self.region_top
        } else {
            0
        };
        self.cursor_y = self.cursor_y.saturating_sub(count).max(floor);
    }

    fn cursor_down(&mut self, count: u16, honor_scroll_region: bool) {
        let ceiling =
            if honor_scroll_region && self.cursor_y <= self.region_bottom {
                self.region_bottom
            } else {
                self.height - 1
            };
        self.cursor_y = self.cursor_y.saturating_add(count).min(ceiling);
    }

    fn cursor_left(&mut self, count: u16, _honor_scroll_region: bool) {
        self.cursor_x = self.cursor_x.saturating_sub(count);
    }

    fn cursor_right(&mut self, count: u16, _honor_scroll_region: bool) {
        self.cursor_x = self.cursor_x.saturating_add(count).min(self.width - 1);
    }

    fn cursor_linefeed(&mut self, new_line_mode: bool) {
        if self.cursor_y == self.region_bottom {
            self.scroll_region_up(self.region_top, self.region_bottom, 1);
        } else if self.cursor_y < self.height - 1 {
            self.cursor_y += 1;
        }

        if new_line_mode {
            self.cursor_x = 0;
        }
    }

    fn carriage_return(&mut self) {
        self.cursor_x = 0;
    }

    fn print_character(&mut self, c: char, insert: bool, autowrap: bool) {
        if insert {
            let row = &mut self.rows[self.cursor_y as usize];
            row.insert(self.cursor_x as usize, Cell {
                c,
                attribute: self.attribute,
            });
            row.truncate(self.width as usize);
        } else {
            self.rows[self.cursor_y as usize][self.cursor_x as usize] = Cell {
                c,
                attribute: self.attribute,
            };
        }

        if self.cursor_x + 1 < self.width {
            self.cursor_x += 1;
        } else if autowrap {
            self.cursor_x = 0;
            self.cursor_linefeed(false);
        }
    }

    fn erase_line(&mut self, start: u16, end: u16, honor_protected: bool) {
        let row = &mut self.rows[self.cursor_y as usize];
        for col in start..=end.min(self.width - 1) {
            let cell = &mut row[col as usize];
            if honor_protected && cell.attribute.protected() {
                continue;
            }
            *cell = Cell::default();
        }
    }

    fn erase_screen(
        &mut self,
        r1: u16,
        c1: u16,
        r2: u16,
        c2: u16,
        honor_protected: bool,
    ) {
        for row in r1..=r2.min(self.height - 1) {
            for col in c1..=c2.min(self.width - 1) {
                let cell = &mut self.rows[row as usize][col as usize];
                if honor_protected && cell.attribute.protected() {
                    continue;
                }
                *cell = Cell::default();
            }
        }
    }

    fn delete_characters(&mut self, count: u16) {
        let x = self.cursor_x as usize;
        let row = &mut self.rows[self.cursor_y as usize];
        for _ in 0..count.min(self.width - self.cursor_x) {
            row.remove(x);
            row.push(Cell::default());
        }
    }

    fn insert_blanks(&mut self, count: u16) {
        let x = self.cursor_x as usize;
        let row = &mut self.rows[self.cursor_y as usize];
        for _ in 0..count.min(self.width - self.cursor_x) {
            row.insert(x, Cell::default());
        }
        row.truncate(self.width as usize);
    }

    fn scroll_region_up(&mut self, top: u16, bottom: u16, count: u16) {
        for _ in 0..count {
            self.rows.remove(top as usize);
            self.rows.insert(bottom as usize, self.blank_row());
        }
    }

    fn scroll_region_down(&mut self, top: u16, bottom: u16, count: u16) {
        for _ in 0..count {
            self.rows.remove(bottom as usize);
            self.rows.insert(top as usize, self.blank_row());
        }
    }

    fn set_columns(&mut self, columns: u16) {
        self.width = columns;
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.rows = blank_rows(self.width, self.height);
    }

    fn set_double_width(&mut self, on: bool) {
        self.double_width = on;
    }

    fn set_double_height(&mut self, half: DoubleHeight) {
        self.double_height = half;
    }

    fn invert_colors(&mut self) {
        self.inverted = true;
    }

    fn deinvert_colors(&mut self) {
        self.inverted = false;
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }

    fn cursor_on(&mut self) {
        self.cursor_shown = true;
    }

    fn cursor_off(&mut self) {
        self.cursor_shown = false;
    }
}
