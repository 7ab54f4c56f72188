/// A rectangle in viewport coordinates (cells in the TUI, but the layout
/// math is unit-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Vertical geometry of the 24-hour grid the day view draws on.
///
/// Row heights need not be uniform and offsets may be negative (scrolled off
/// the top); this is the only interface the layout engine has to the
/// rendering surface.
pub trait RowGeometry {
    /// y offset of the top of the given hour row (0-23), viewport-relative
    fn row_y(&self, hour: u32) -> i32;
    /// Height of the given hour row
    fn row_height(&self, hour: u32) -> i32;
    fn viewport_width(&self) -> i32;
    fn viewport_height(&self) -> i32;
}

/// Uniform-row geometry, used by the `day` CLI command and tests.
#[derive(Debug, Clone, Copy)]
pub struct UniformRows {
    pub row_height: i32,
    pub scroll: i32,
    pub width: i32,
    pub height: i32,
}

impl UniformRows {
    /// Geometry where y maps 1:1 to minutes since midnight.
    pub fn minutes(width: i32) -> Self {
        UniformRows {
            row_height: 60,
            scroll: 0,
            width,
            height: 24 * 60,
        }
    }
}

impl RowGeometry for UniformRows {
    fn row_y(&self, hour: u32) -> i32 {
        hour as i32 * self.row_height - self.scroll
    }

    fn row_height(&self, _hour: u32) -> i32 {
        self.row_height
    }

    fn viewport_width(&self) -> i32 {
        self.width
    }

    fn viewport_height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10, 20, 5, 4);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(14, 23));
        assert!(!rect.contains(15, 20));
        assert!(!rect.contains(10, 24));
        assert!(!rect.contains(9, 20));
    }

    #[test]
    fn uniform_rows_scroll_shifts_offsets() {
        let geo = UniformRows {
            row_height: 4,
            scroll: 10,
            width: 80,
            height: 40,
        };
        assert_eq!(geo.row_y(0), -10);
        assert_eq!(geo.row_y(5), 10);
        assert_eq!(geo.row_height(5), 4);
    }
}
