#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }
}

/// One variant per key on the calculator, whether it arrives as a
/// key press or as a click on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorCommand {
    InsertDigit(char),
    InsertOperator(Operator),
    InsertDecimalPoint,
    EraseLastCharacter,
    ClearAll,
    ToggleSign,
    ApplyPercent,
    Evaluate,
    QuitAll,
}
