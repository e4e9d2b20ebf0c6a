//! Bitmap text layout on the 8x8 `font8x8` glyph set.
//!
//! Text is laid out as a grid of lit cells. Combining marks (as used by the
//! glitched hour labels) have no glyph of their own; each one lights a short
//! bar stacked above or below the glyph it decorates.

use font8x8::legacy::BASIC_LEGACY;
use glam::Vec2;
use std::collections::HashSet;

/// Glyph cells per side
const GLYPH_CELLS: i32 = 8;

/// Row index of the baseline (bottom edge of row 6)
const BASELINE_ROW: i32 = 7;

/// Lit cells of a laid-out string
#[derive(Debug, Clone)]
pub struct TextCells {
    /// Top-left corner of grid cell (0, 0), in the caller's coordinates
    pub origin: Vec2,

    /// Side of one cell (pixels)
    pub cell: f32,

    /// Lit `(column, row)` cells; rows may be negative (marks above)
    pub lit: HashSet<(i32, i32)>,
}

impl TextCells {
    /// Top-left corner of a grid cell
    pub fn corner(&self, col: i32, row: i32) -> Vec2 {
        self.origin + Vec2::new(col as f32, row as f32) * self.cell
    }

    /// Cell edges that separate a lit cell from an unlit one, as segments
    pub fn outline(&self) -> Vec<(Vec2, Vec2)> {
        let mut edges = Vec::new();
        for &(col, row) in &self.lit {
            if !self.lit.contains(&(col, row - 1)) {
                edges.push((self.corner(col, row), self.corner(col + 1, row)));
            }
            if !self.lit.contains(&(col, row + 1)) {
                edges.push((self.corner(col, row + 1), self.corner(col + 1, row + 1)));
            }
            if !self.lit.contains(&(col - 1, row)) {
                edges.push((self.corner(col, row), self.corner(col, row + 1)));
            }
            if !self.lit.contains(&(col + 1, row)) {
                edges.push((self.corner(col + 1, row), self.corner(col + 1, row + 1)));
            }
        }
        edges
    }
}

/// Lay out `text` centred on `x` with its baseline at `y`
pub fn layout_text(text: &str, x: f32, y: f32, font_px: f32) -> TextCells {
    let cell = font_px / GLYPH_CELLS as f32;
    let mut lit = HashSet::new();

    let mut column = 0;
    let mut marks_above = 0;
    let mut marks_below = 0;
    for ch in text.chars() {
        if is_combining_mark(ch) {
            // Marks before any base glyph decorate a virtual glyph at column 0
            let base = (column - GLYPH_CELLS).max(0);
            let code = ch as u32;
            let mark_col = base + 1 + (code % 5) as i32;
            let row = if is_below_mark(code) {
                marks_below += 1;
                BASELINE_ROW + marks_below
            } else {
                marks_above += 1;
                -marks_above
            };
            lit.insert((mark_col, row));
            lit.insert((mark_col + 1, row));
            continue;
        }

        for (row, bits) in glyph_for_char(ch).iter().enumerate() {
            for bit in 0..GLYPH_CELLS {
                if bits & (1 << bit) != 0 {
                    lit.insert((column + bit, row as i32));
                }
            }
        }
        column += GLYPH_CELLS;
        marks_above = 0;
        marks_below = 0;
    }

    let width = column as f32 * cell;
    TextCells {
        origin: Vec2::new(x - width / 2.0, y - BASELINE_ROW as f32 * cell),
        cell,
        lit,
    }
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

/// Combining marks that attach below the base glyph
fn is_below_mark(code: u32) -> bool {
    matches!(
        code,
        0x0316..=0x0333
            | 0x0339..=0x033C
            | 0x0345
            | 0x0347..=0x0349
            | 0x034D..=0x034E
            | 0x0353..=0x0356
            | 0x0359..=0x035A
            | 0x035C
            | 0x035F
            | 0x0362
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_centred() {
        let cells = layout_text("12", 100.0, 50.0, 16.0);
        assert_eq!(cells.cell, 2.0);
        // Two glyphs of 8 cells at 2px each = 32px wide
        assert_eq!(cells.origin.x, 84.0);
        assert_eq!(cells.origin.y, 50.0 - 14.0);
        assert!(cells.lit.iter().all(|&(col, _)| (0..16).contains(&col)));
        assert!(!cells.lit.is_empty());
    }

    #[test]
    fn test_combining_marks_do_not_advance() {
        let plain = layout_text("S", 0.0, 0.0, 8.0);
        let marked = layout_text("S\u{0337}\u{031F}\u{0310}", 0.0, 0.0, 8.0);
        // Same advance, so same horizontal origin
        assert_eq!(plain.origin, marked.origin);
        assert!(marked.lit.len() > plain.lit.len());
        assert!(marked.lit.iter().any(|&(_, row)| row < 0));
        assert!(marked.lit.iter().any(|&(_, row)| row > BASELINE_ROW));
    }

    #[test]
    fn test_non_ascii_falls_back_to_question_mark() {
        let fallback = layout_text("\u{00e9}", 0.0, 0.0, 8.0);
        let question = layout_text("?", 0.0, 0.0, 8.0);
        assert_eq!(fallback.lit, question.lit);
    }

    #[test]
    fn test_outline_of_single_cell() {
        let cells = TextCells {
            origin: Vec2::ZERO,
            cell: 1.0,
            lit: [(0, 0)].into_iter().collect(),
        };
        assert_eq!(cells.outline().len(), 4);

        let pair = TextCells {
            origin: Vec2::ZERO,
            cell: 1.0,
            lit: [(0, 0), (1, 0)].into_iter().collect(),
        };
        // Shared edge is interior
        assert_eq!(pair.outline().len(), 6);
    }
}
