//! Cursor and viewport state
//!
//! The cursor lives in viewport coordinates and is clamped on every move,
//! so `cx < cols` and `cy < rows` hold no matter what keys arrive.

use crate::terminal::WindowSize;

/// Direction of a single-step cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor position and viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    cx: usize,
    cy: usize,
    cols: usize,
    rows: usize,
}

impl ViewState {
    /// Cursor at the origin of a viewport of `size`
    ///
    /// A zero dimension is bumped to one so the cursor always has a cell.
    pub fn new(size: WindowSize) -> Self {
        Self {
            cx: 0,
            cy: 0,
            cols: usize::from(size.cols).max(1),
            rows: usize::from(size.rows).max(1),
        }
    }

    /// Cursor column (0-indexed)
    pub fn cx(&self) -> usize {
        self.cx
    }

    /// Cursor row (0-indexed)
    pub fn cy(&self) -> usize {
        self.cy
    }

    /// Viewport width
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Viewport height
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Move the cursor one cell, stopping at the viewport edges
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.cx = self.cx.saturating_sub(1),
            Direction::Right => self.cx = (self.cx + 1).min(self.cols - 1),
            Direction::Up => self.cy = self.cy.saturating_sub(1),
            Direction::Down => self.cy = (self.cy + 1).min(self.rows - 1),
        }
    }

    /// Move to the first column
    pub fn line_start(&mut self) {
        self.cx = 0;
    }

    /// Move to the last column
    pub fn line_end(&mut self) {
        self.cx = self.cols - 1;
    }

    /// Step up or down once per viewport row
    pub fn page(&mut self, direction: Direction) {
        for _ in 0..self.rows {
            self.step(direction);
        }
    }

    /// Move to an absolute position, clamping to bounds
    pub fn move_to(&mut self, cx: usize, cy: usize) {
        self.cx = cx.min(self.cols - 1);
        self.cy = cy.min(self.rows - 1);
    }
}
