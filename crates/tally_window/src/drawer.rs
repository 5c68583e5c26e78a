use anyhow::Result;
use tally_base::{
    color::Color,
    math::{f64_to_u16_clamp, f64_to_usize_clamp, Vec2f},
};

use crate::terminal::{self, TerminalPos};

/// Draw calls are queued up during a frame and only hit the
/// terminal on `present`, so a frame is always drawn whole.
pub struct Drawer {
    queue: Vec<DrawCommand>,
}

enum DrawCommand {
    Text {
        pos: Vec2f,
        text: String,
    },
    ColoredText {
        pos: Vec2f,
        text: String,
        foreground: Option<Color>,
        background: Option<Color>,
    },
    FillRow {
        pos: Vec2f,
        width: f64,
        background: Color,
    },
}

fn convert_vec2f_to_terminal_pos(pos: Vec2f) -> TerminalPos {
    TerminalPos {
        x: f64_to_u16_clamp(pos.x),
        y: f64_to_u16_clamp(pos.y),
    }
}

fn convert_color_to_crossterm_color(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drawer {
    pub fn new() -> Self {
        Self { queue: vec![] }
    }

    pub fn draw_text<T: AsRef<str>>(&mut self, pos: Vec2f, text: T) {
        self.queue.push(DrawCommand::Text {
            pos,
            text: text.as_ref().to_string(),
        });
    }

    pub fn draw_colored_text<T: AsRef<str>>(
        &mut self,
        pos: Vec2f,
        text: T,
        foreground: Option<Color>,
        background: Option<Color>,
    ) {
        self.queue.push(DrawCommand::ColoredText {
            pos,
            text: text.as_ref().to_string(),
            foreground,
            background,
        });
    }

    /// Paints `width` cells of background color starting at `pos`,
    /// used for button faces and the display surface.
    pub fn fill_row(&mut self, pos: Vec2f, width: f64, background: Color) {
        self.queue.push(DrawCommand::FillRow {
            pos,
            width,
            background,
        });
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn present(&mut self) -> Result<()> {
        terminal::start_draw()?;

        self.queue
            .drain(..)
            .map(|command| match command {
                DrawCommand::Text { pos, text } => {
                    terminal::draw_text(convert_vec2f_to_terminal_pos(pos), text)
                }
                DrawCommand::ColoredText {
                    pos,
                    text,
                    foreground,
                    background,
                } => terminal::draw_colored_text(
                    convert_vec2f_to_terminal_pos(pos),
                    text,
                    foreground.map(convert_color_to_crossterm_color),
                    background.map(convert_color_to_crossterm_color),
                ),
                DrawCommand::FillRow {
                    pos,
                    width,
                    background,
                } => terminal::draw_colored_text(
                    convert_vec2f_to_terminal_pos(pos),
                    " ".repeat(f64_to_usize_clamp(width)),
                    None,
                    Some(convert_color_to_crossterm_color(background)),
                ),
            })
            .find(Result::is_err)
            .unwrap_or(Ok(()))?;

        terminal::end_draw()?;

        Ok(())
    }
}
