use tally_base::math::{f64_to_usize_clamp, Bounds2f, ToF64, Vec2f};
use tally_core::commands::{CalculatorCommand, Operator};
use tally_window::drawer::Drawer;
use unicode_width::UnicodeWidthStr;

use crate::theme;

struct Key {
    label: &'static str,
    command: CalculatorCommand,
    accent: bool,
}

const GRID_COLUMNS: usize = 4;
const GRID_ROWS: usize = 5;

/// Same arrangement as a pocket calculator: the clear row on top,
/// digits below, operators down the right edge.
const KEYS: [[Key; GRID_COLUMNS]; GRID_ROWS] = [
    [
        Key {
            label: "C",
            command: CalculatorCommand::ClearAll,
            accent: true,
        },
        Key {
            label: "±",
            command: CalculatorCommand::ToggleSign,
            accent: true,
        },
        Key {
            label: "%",
            command: CalculatorCommand::ApplyPercent,
            accent: true,
        },
        Key {
            label: "/",
            command: CalculatorCommand::InsertOperator(Operator::Divide),
            accent: true,
        },
    ],
    [
        Key {
            label: "7",
            command: CalculatorCommand::InsertDigit('7'),
            accent: false,
        },
        Key {
            label: "8",
            command: CalculatorCommand::InsertDigit('8'),
            accent: false,
        },
        Key {
            label: "9",
            command: CalculatorCommand::InsertDigit('9'),
            accent: false,
        },
        Key {
            label: "*",
            command: CalculatorCommand::InsertOperator(Operator::Multiply),
            accent: true,
        },
    ],
    [
        Key {
            label: "4",
            command: CalculatorCommand::InsertDigit('4'),
            accent: false,
        },
        Key {
            label: "5",
            command: CalculatorCommand::InsertDigit('5'),
            accent: false,
        },
        Key {
            label: "6",
            command: CalculatorCommand::InsertDigit('6'),
            accent: false,
        },
        Key {
            label: "-",
            command: CalculatorCommand::InsertOperator(Operator::Subtract),
            accent: true,
        },
    ],
    [
        Key {
            label: "1",
            command: CalculatorCommand::InsertDigit('1'),
            accent: false,
        },
        Key {
            label: "2",
            command: CalculatorCommand::InsertDigit('2'),
            accent: false,
        },
        Key {
            label: "3",
            command: CalculatorCommand::InsertDigit('3'),
            accent: false,
        },
        Key {
            label: "+",
            command: CalculatorCommand::InsertOperator(Operator::Add),
            accent: true,
        },
    ],
    [
        Key {
            label: "0",
            command: CalculatorCommand::InsertDigit('0'),
            accent: false,
        },
        Key {
            label: ".",
            command: CalculatorCommand::InsertDecimalPoint,
            accent: false,
        },
        Key {
            label: "←",
            command: CalculatorCommand::EraseLastCharacter,
            accent: true,
        },
        Key {
            label: "=",
            command: CalculatorCommand::Evaluate,
            accent: true,
        },
    ],
];

pub struct Keypad {
    bounds: Bounds2f,
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            bounds: Bounds2f::ZERO,
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds2f) {
        self.bounds = bounds;
    }

    /// Cells tile the keypad bounds edge to edge; the rendered
    /// button face leaves a one-cell gutter on the right and
    /// bottom so neighbours stay visually apart.
    fn cell_bounds(&self, row: usize, column: usize) -> Bounds2f {
        let cell_width = self.bounds.size.x / GRID_COLUMNS.to_f64();
        let cell_height = self.bounds.size.y / GRID_ROWS.to_f64();

        Bounds2f {
            pos: Vec2f {
                x: self.bounds.pos.x + column.to_f64() * cell_width,
                y: self.bounds.pos.y + row.to_f64() * cell_height,
            },
            size: Vec2f {
                x: cell_width,
                y: cell_height,
            },
        }
    }

    pub fn render(&self, drawer: &mut Drawer) {
        if self.bounds.area() > 0.0 {
            KEYS.iter().enumerate().for_each(|(row, keys)| {
                keys.iter().enumerate().for_each(|(column, key)| {
                    render_key(drawer, key, self.cell_bounds(row, column));
                });
            });
        }
    }

    /// Maps a terminal position to the command of the key under
    /// it, for mouse input.
    pub fn command_at(&self, pos: Vec2f) -> Option<CalculatorCommand> {
        if !self.bounds.contains(pos) {
            return None;
        }

        KEYS.iter().enumerate().find_map(|(row, keys)| {
            keys.iter().enumerate().find_map(|(column, key)| {
                self.cell_bounds(row, column)
                    .contains(pos)
                    .then_some(key.command)
            })
        })
    }
}

fn render_key(drawer: &mut Drawer, key: &Key, cell: Bounds2f) {
    let face_width = (cell.size.x - 1.0).max(1.0);
    let face_rows = f64_to_usize_clamp((cell.size.y - 1.0).max(1.0));

    for row in 0..face_rows {
        drawer.fill_row(
            Vec2f {
                x: cell.pos.x,
                y: cell.pos.y + row.to_f64(),
            },
            face_width,
            theme::SURFACE,
        );
    }

    let foreground = if key.accent {
        theme::ACCENT
    } else {
        theme::TEXT
    };
    let label_offset_x = ((face_width - key.label.width().to_f64()) / 2.0).max(0.0);

    drawer.draw_colored_text(
        Vec2f {
            x: (cell.pos.x + label_offset_x).floor(),
            y: cell.pos.y + (face_rows.to_f64() / 2.0).floor(),
        },
        key.label,
        Some(foreground),
        Some(theme::SURFACE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypad_40_by_20() -> Keypad {
        let mut keypad = Keypad::new();
        keypad.set_bounds(Bounds2f {
            pos: Vec2f::ZERO,
            size: Vec2f { x: 40.0, y: 20.0 },
        });
        keypad
    }

    #[test]
    fn test_command_at_corners() {
        let keypad = keypad_40_by_20();

        // top-left key is clear, bottom-right is evaluate
        assert_eq!(
            keypad.command_at(Vec2f::ZERO),
            Some(CalculatorCommand::ClearAll)
        );
        assert_eq!(
            keypad.command_at(Vec2f { x: 39.0, y: 19.0 }),
            Some(CalculatorCommand::Evaluate)
        );
    }

    #[test]
    fn test_command_at_digit_grid() {
        let keypad = keypad_40_by_20();

        // cells are 10x4: (15, 5) lands in row 1, column 1
        assert_eq!(
            keypad.command_at(Vec2f { x: 15.0, y: 5.0 }),
            Some(CalculatorCommand::InsertDigit('8'))
        );
        assert_eq!(
            keypad.command_at(Vec2f { x: 35.0, y: 9.0 }),
            Some(CalculatorCommand::InsertOperator(Operator::Subtract))
        );
    }

    #[test]
    fn test_command_at_outside() {
        let keypad = keypad_40_by_20();

        assert_eq!(keypad.command_at(Vec2f { x: 40.0, y: 0.0 }), None);
        assert_eq!(keypad.command_at(Vec2f { x: 0.0, y: 20.0 }), None);

        // zero-sized keypad swallows nothing
        let empty = Keypad::new();
        assert_eq!(empty.command_at(Vec2f::ZERO), None);
    }

    #[test]
    fn test_every_key_is_reachable() {
        let keypad = keypad_40_by_20();

        KEYS.iter().enumerate().for_each(|(row, keys)| {
            keys.iter().enumerate().for_each(|(column, key)| {
                let cell = keypad.cell_bounds(row, column);
                assert_eq!(keypad.command_at(cell.pos), Some(key.command));
            });
        });
    }
}
