//! Text rendering of the grid.
//!
//! ```text
//! >>>>>> STEP 3 <<<<<<
//! |←| |↓|
//! ------
//! ```
//!
//! Arrows are drawn with their heading on a background color picked by arrow
//! id; a free goal marker is a blank cell in the color of its arrow.
use crate::{
    grid::{CellView, Grid},
    meta::ArrowId,
};
use colored::{ColoredString, Colorize};

// Background of arrow `id` and its goal marker.
fn arrow_color(id: ArrowId, glyph: &str) -> ColoredString {
    match id % 4 {
        0 => glyph.on_bright_red(),
        1 => glyph.on_bright_green(),
        2 => glyph.on_bright_blue(),
        _ => glyph.on_yellow(),
    }
}

/// Renders `grid` after `step` steps. Cells get background colors only if
/// `colored` is `true`.
pub fn render(grid: &Grid, step: usize, colored: bool) -> String {
    let mut out = format!(">>>>>> STEP {} <<<<<<\n", step);

    for i in 0..grid.height() {
        out.push('|');
        for j in 0..grid.width() {
            let cell = grid.cell((i, j));
            let glyph = match cell {
                CellView::Arrow { heading, .. } => heading.symbol(),
                CellView::Sign(d) => d.symbol(),
                CellView::Goal(_) | CellView::Empty => ' ',
            }
            .to_string();
            if colored {
                let painted = match cell {
                    CellView::Arrow { id, .. } | CellView::Goal(id) => arrow_color(id, &glyph),
                    CellView::Sign(_) | CellView::Empty => glyph.on_bright_white(),
                };
                out.push_str(&painted.to_string());
            } else {
                out.push_str(&glyph);
            }
            out.push('|');
        }
        out.push('\n');
        out.push_str(&"-".repeat(grid.width() * 2));
        out.push('\n');
    }
    out
}
