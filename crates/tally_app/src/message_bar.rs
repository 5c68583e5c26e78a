use tally_base::math::Bounds2f;
use tally_window::drawer::Drawer;

use crate::theme;

pub struct MessageBar {
    bounds: Bounds2f,
    message: Option<String>,
}

impl MessageBar {
    pub fn new() -> Self {
        Self {
            bounds: Bounds2f::ZERO,
            message: None,
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds2f) {
        self.bounds = bounds;
    }

    pub fn set_message<T: AsRef<str>>(&mut self, message: T) {
        self.message = Some(message.as_ref().to_string());
    }

    pub fn render(&self, drawer: &mut Drawer) {
        if self.bounds.area() > 0.0 {
            if let Some(message) = &self.message {
                drawer.draw_colored_text(
                    self.bounds.pos,
                    message,
                    Some(theme::MUTED),
                    Some(theme::BACKGROUND),
                );
            }
        }
    }
}
