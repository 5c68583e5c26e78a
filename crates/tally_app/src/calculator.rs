use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tally_base::math::{f64_to_usize_clamp, Bounds2f, ToF64, Vec2f};
use tally_core::{
    commands::{CalculatorCommand, Operator},
    expression::Expression,
};
use tally_window::{drawer::Drawer, window::Window};

use crate::{display::Display, keypad::Keypad, message_bar::MessageBar, theme};

pub struct Calculator {
    should_quit: bool,
    window: Window,
    drawer: Drawer,
    window_size: Vec2f,

    expression: Expression,
    display: Display,
    keypad: Keypad,
    message_bar: MessageBar,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            window: Window::new(),
            drawer: Drawer::new(),
            window_size: Vec2f::ZERO,
            expression: Expression::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            message_bar: MessageBar::new(),
        }
    }

    pub fn run(&mut self) {
        self.window.init();
        self.window.set_title("Tally").expect("able to set title");

        let terminal_size = self.window.size();
        self.handle_new_window_size(terminal_size);
        self.message_bar
            .set_message("HELP: Enter = evaluate | Esc = clear | n = negate | Ctrl-Q = quit");

        let repl_result = self.repl();

        self.window.deinit();
        repl_result.expect("repl has no fatal error");
    }

    fn repl(&mut self) -> Result<()> {
        self.draw()?;

        while !self.should_quit {
            let event = event::read()?;
            self.handle_event(&event);
            self.draw()?;
        }
        Ok(())
    }

    fn execute_command(&mut self, command: CalculatorCommand) -> bool {
        if matches!(command, CalculatorCommand::QuitAll) {
            self.should_quit = true;
            true
        } else {
            self.expression.execute_command(command)
        }
    }

    /// Display strip across the top, keypad filling the middle,
    /// one help row at the bottom. A one-column margin keeps the
    /// widgets off the terminal edges.
    fn handle_new_window_size(&mut self, size: Vec2f) {
        self.window_size = size;

        let inner_width = (size.x - 2.0).max(0.0);
        let display_height = 3.0_f64.min(size.y);

        self.display.set_bounds(Bounds2f {
            pos: Vec2f { x: 1.0, y: 1.0 },
            size: Vec2f {
                x: inner_width,
                y: display_height,
            },
        });

        let keypad_top = display_height + 2.0;
        self.keypad.set_bounds(Bounds2f {
            pos: Vec2f {
                x: 1.0,
                y: keypad_top,
            },
            size: Vec2f {
                x: inner_width,
                y: (size.y - keypad_top - 1.0).max(0.0),
            },
        });

        self.message_bar.set_bounds(Bounds2f {
            pos: Vec2f {
                x: 0.0,
                y: size.y - 1.0,
            },
            size: Vec2f {
                x: size.x,
                y: if size.y > 1.0 { 1.0 } else { 0.0 },
            },
        });
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match command_for_key(modifiers, code) {
                Some(command) => self.execute_command(command),
                None => false,
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let pos = Vec2f {
                    x: f64::from(*column),
                    y: f64::from(*row),
                };

                match self.keypad.command_at(pos) {
                    Some(command) => self.execute_command(command),
                    None => false,
                }
            }
            Event::Resize(width, height) => {
                let size = Vec2f {
                    x: f64::from(*width),
                    y: f64::from(*height),
                };

                self.handle_new_window_size(size);
                true
            }
            _ => false,
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.drawer.clear();

        let rows = f64_to_usize_clamp(self.window_size.y);
        for row in 0..rows {
            self.drawer.fill_row(
                Vec2f {
                    x: 0.0,
                    y: row.to_f64(),
                },
                self.window_size.x,
                theme::BACKGROUND,
            );
        }

        self.display.render(
            &mut self.drawer,
            self.expression.display(),
            self.expression.has_error(),
        );
        self.keypad.render(&mut self.drawer);
        self.message_bar.render(&mut self.drawer);

        self.drawer.present()?;
        Ok(())
    }
}

fn command_for_key(modifiers: &KeyModifiers, code: &KeyCode) -> Option<CalculatorCommand> {
    match (modifiers, code) {
        (&KeyModifiers::CONTROL, &KeyCode::Char('q')) => Some(CalculatorCommand::QuitAll),
        // NOTE: for SHIFT case, crossterm hands over the shifted
        // character itself ('+', '*', '%'), so no translation is
        // needed here
        (&KeyModifiers::NONE | &KeyModifiers::SHIFT, &KeyCode::Char(ch)) => command_for_char(ch),
        (&KeyModifiers::NONE, &KeyCode::Enter) => Some(CalculatorCommand::Evaluate),
        (&KeyModifiers::NONE, &KeyCode::Backspace) => Some(CalculatorCommand::EraseLastCharacter),
        (&KeyModifiers::NONE, &KeyCode::Esc) => Some(CalculatorCommand::ClearAll),
        _ => None,
    }
}

/// Printable keys: digits, operators, the decimal point, and the
/// mnemonic action keys for the buttons that have no dedicated
/// character on a keyboard.
fn command_for_char(ch: char) -> Option<CalculatorCommand> {
    match ch {
        '0'..='9' => Some(CalculatorCommand::InsertDigit(ch)),
        '.' => Some(CalculatorCommand::InsertDecimalPoint),
        '=' => Some(CalculatorCommand::Evaluate),
        '%' => Some(CalculatorCommand::ApplyPercent),
        'n' => Some(CalculatorCommand::ToggleSign),
        'c' => Some(CalculatorCommand::ClearAll),
        _ => Operator::from_char(ch).map(CalculatorCommand::InsertOperator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_for_key() {
        // quitting is a control chord, not a printable key
        assert_eq!(
            command_for_key(&KeyModifiers::CONTROL, &KeyCode::Char('q')),
            Some(CalculatorCommand::QuitAll)
        );
        assert_eq!(command_for_key(&KeyModifiers::NONE, &KeyCode::Char('q')), None);

        assert_eq!(
            command_for_key(&KeyModifiers::NONE, &KeyCode::Enter),
            Some(CalculatorCommand::Evaluate)
        );
        assert_eq!(
            command_for_key(&KeyModifiers::NONE, &KeyCode::Backspace),
            Some(CalculatorCommand::EraseLastCharacter)
        );
        assert_eq!(
            command_for_key(&KeyModifiers::NONE, &KeyCode::Esc),
            Some(CalculatorCommand::ClearAll)
        );

        // shifted characters arrive pre-translated
        assert_eq!(
            command_for_key(&KeyModifiers::SHIFT, &KeyCode::Char('+')),
            Some(CalculatorCommand::InsertOperator(Operator::Add))
        );
    }

    #[test]
    fn test_command_for_char() {
        assert_eq!(command_for_char('7'), Some(CalculatorCommand::InsertDigit('7')));
        assert_eq!(command_for_char('.'), Some(CalculatorCommand::InsertDecimalPoint));
        assert_eq!(command_for_char('='), Some(CalculatorCommand::Evaluate));
        assert_eq!(command_for_char('%'), Some(CalculatorCommand::ApplyPercent));
        assert_eq!(command_for_char('n'), Some(CalculatorCommand::ToggleSign));
        assert_eq!(command_for_char('c'), Some(CalculatorCommand::ClearAll));
        assert_eq!(
            command_for_char('/'),
            Some(CalculatorCommand::InsertOperator(Operator::Divide))
        );

        assert_eq!(command_for_char('x'), None);
        assert_eq!(command_for_char(' '), None);
    }
}
