use tally_base::math::{f64_to_usize_clamp, Bounds2f, ToF64, Vec2f};
use tally_window::drawer::Drawer;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme;

/// The read-only strip above the keypad. Text sits right-aligned
/// like on a desk calculator; when the expression outgrows the
/// width, the oldest characters scroll off the left edge.
pub struct Display {
    bounds: Bounds2f,
}

impl Display {
    pub fn new() -> Self {
        Self {
            bounds: Bounds2f::ZERO,
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds2f) {
        self.bounds = bounds;
    }

    pub fn render(&self, drawer: &mut Drawer, text: &str, is_error: bool) {
        if self.bounds.area() > 0.0 {
            let rows = f64_to_usize_clamp(self.bounds.size.y);
            for row in 0..rows {
                drawer.fill_row(
                    Vec2f {
                        x: self.bounds.pos.x,
                        y: self.bounds.pos.y + row.to_f64(),
                    },
                    self.bounds.size.x,
                    theme::SURFACE,
                );
            }

            // one column of padding on both sides
            let max_width = f64_to_usize_clamp(self.bounds.size.x).saturating_sub(2);
            let shown = tail(text, max_width);

            let foreground = if is_error { theme::ERROR } else { theme::TEXT };
            drawer.draw_colored_text(
                Vec2f {
                    x: self.bounds.pos.x + self.bounds.size.x
                        - shown.width().to_f64()
                        - 1.0,
                    y: self.bounds.pos.y + (self.bounds.size.y / 2.0).floor(),
                },
                shown,
                Some(foreground),
                Some(theme::SURFACE),
            );
        }
    }
}

/// Longest suffix of `text` that fits in `max_width` display columns.
fn tail(text: &str, max_width: usize) -> &str {
    let mut width: usize = 0;
    let mut start = text.len();

    for (idx, ch) in text.char_indices().rev() {
        width = width.saturating_add(ch.width().unwrap_or(0));
        if width > max_width {
            break;
        }
        start = idx;
    }

    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail() {
        // fits
        assert_eq!(tail("2+2", 10), "2+2");
        assert_eq!(tail("", 10), "");

        // overflows: keep the most recent characters
        assert_eq!(tail("123456", 4), "3456");
        assert_eq!(tail("123456", 0), "");
    }
}
