use crate::layout::RowGeometry;

/// Width of the hour-label gutter ("HH:00 ")
pub const GUTTER_WIDTH: u16 = 6;

/// Zoom steps: cells per hour row.
const ZOOM_STEPS: [u16; 3] = [1, 2, 4];

/// The 24-hour grid the TUI day view draws on. All coordinates are terminal
/// cells, relative to the card area (right of the gutter).
#[derive(Debug, Clone, Copy)]
pub struct DayGrid {
    /// Cells per hour row
    pub zoom: u16,
    /// Vertical scroll in cells
    pub scroll: i32,
    /// Card area size, updated each frame before layout
    pub width: u16,
    pub height: u16,
}

impl DayGrid {
    pub fn new(zoom: u16) -> Self {
        let zoom = if ZOOM_STEPS.contains(&zoom) { zoom } else { 2 };
        DayGrid {
            zoom,
            scroll: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn total_height(&self) -> i32 {
        24 * self.zoom as i32
    }

    fn max_scroll(&self) -> i32 {
        (self.total_height() - self.height as i32).max(0)
    }

    /// Resize the card area. Returns true if the size actually changed.
    pub fn set_viewport(&mut self, width: u16, height: u16) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.scroll = self.scroll.clamp(0, self.max_scroll());
        true
    }

    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let next = (self.scroll + delta).clamp(0, self.max_scroll());
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        true
    }

    /// Scroll so the given hour sits at the top (clamped to the document).
    pub fn scroll_to_hour(&mut self, hour: u32) {
        self.scroll = (hour as i32 * self.zoom as i32).clamp(0, self.max_scroll());
    }

    /// Step zoom up or down, keeping the top-of-viewport hour stable.
    pub fn step_zoom(&mut self, up: bool) -> bool {
        let idx = ZOOM_STEPS.iter().position(|&z| z == self.zoom).unwrap_or(1);
        let next = if up {
            (idx + 1).min(ZOOM_STEPS.len() - 1)
        } else {
            idx.saturating_sub(1)
        };
        if next == idx {
            return false;
        }
        let top_minutes = self.scroll as i64 * 60 / self.zoom as i64;
        self.zoom = ZOOM_STEPS[next];
        self.scroll = (top_minutes * self.zoom as i64 / 60) as i32;
        self.scroll = self.scroll.clamp(0, self.max_scroll());
        true
    }

    /// Minute-of-day at the top of the grid row containing the given local y,
    /// for placing a quick-created task. None outside the 24-hour document.
    pub fn minute_at(&self, y: i32) -> Option<u32> {
        let doc_y = y + self.scroll;
        if doc_y < 0 || doc_y >= self.total_height() {
            return None;
        }
        let row = doc_y / self.zoom as i32;
        let within = doc_y % self.zoom as i32;
        Some((row * 60 + within * 60 / self.zoom as i32) as u32)
    }
}

impl RowGeometry for DayGrid {
    fn row_y(&self, hour: u32) -> i32 {
        hour as i32 * self.zoom as i32 - self.scroll
    }

    fn row_height(&self, _hour: u32) -> i32 {
        self.zoom as i32
    }

    fn viewport_width(&self) -> i32 {
        self.width as i32
    }

    fn viewport_height(&self) -> i32 {
        self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_clamps_to_document() {
        let mut grid = DayGrid::new(2);
        grid.set_viewport(80, 20);
        // 48-cell document, 20-cell viewport: max scroll 28
        assert!(grid.scroll_by(100));
        assert_eq!(grid.scroll, 28);
        assert!(!grid.scroll_by(1));
        grid.scroll_by(-100);
        assert_eq!(grid.scroll, 0);
    }

    #[test]
    fn zoom_keeps_top_hour_stable() {
        let mut grid = DayGrid::new(2);
        grid.set_viewport(80, 20);
        grid.scroll_to_hour(9);
        assert_eq!(grid.scroll, 18);

        assert!(grid.step_zoom(true));
        assert_eq!(grid.zoom, 4);
        assert_eq!(grid.scroll, 36); // still 09:00 at the top

        assert!(grid.step_zoom(false));
        assert!(grid.step_zoom(false));
        assert_eq!(grid.zoom, 1);
        assert!(!grid.step_zoom(false));
    }

    #[test]
    fn minute_at_maps_rows_back_to_minutes() {
        let mut grid = DayGrid::new(2);
        grid.set_viewport(80, 48);
        // zoom 2: each cell is 30 minutes
        assert_eq!(grid.minute_at(0), Some(0));
        assert_eq!(grid.minute_at(1), Some(30));
        assert_eq!(grid.minute_at(19), Some(9 * 60 + 30));
        assert_eq!(grid.minute_at(47), Some(23 * 60 + 30));
        assert_eq!(grid.minute_at(48), None);
        assert_eq!(grid.minute_at(-1), None);

        grid.scroll = 10;
        assert_eq!(grid.minute_at(0), Some(5 * 60));
    }

    #[test]
    fn row_geometry_is_uniform_and_scrolled() {
        let mut grid = DayGrid::new(4);
        grid.set_viewport(60, 24);
        grid.scroll = 8;
        assert_eq!(grid.row_y(0), -8);
        assert_eq!(grid.row_y(2), 0);
        assert_eq!(grid.row_height(13), 4);
        assert_eq!(grid.viewport_width(), 60);
    }
}
