use itertools::Itertools;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Tiles per row; also the stride for up/down cursor moves
pub const GRID_COLUMNS: usize = 3;
pub const TILE_HEIGHT: u16 = 3;
const TILE_MIN_WIDTH: u16 = 9;
const TILE_GAP: u16 = 2;

/// Tile width wide enough for the widest label plus borders and padding
pub fn tile_width(labels: &[String]) -> u16 {
    let widest = labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    (widest + 4).max(TILE_MIN_WIDTH)
}

/// Lay out `count` tiles in rows of `columns`, centered inside `area`.
///
/// Tiles that would fall outside `area` are clipped to it.
pub fn tile_rects(area: Rect, count: usize, columns: usize, width: u16) -> Vec<Rect> {
    if count == 0 || columns == 0 {
        return vec![];
    }

    let cols = columns.min(count);
    let rows = count.div_ceil(cols);

    let grid_width = ((width + TILE_GAP) as usize * cols).saturating_sub(TILE_GAP as usize);
    let grid_height = TILE_HEIGHT as usize * rows;

    let x0 = area.x as usize + (area.width as usize).saturating_sub(grid_width) / 2;
    let y0 = area.y as usize + (area.height as usize).saturating_sub(grid_height) / 2;

    (0..rows)
        .cartesian_product(0..cols)
        .take(count)
        .map(|(row, col)| {
            let x = x0 + col * (width + TILE_GAP) as usize;
            let y = y0 + row * TILE_HEIGHT as usize;
            let x = x.min(u16::MAX as usize) as u16;
            let y = y.min(u16::MAX as usize) as u16;
            Rect::new(x, y, width, TILE_HEIGHT).intersection(area)
        })
        .collect()
}
