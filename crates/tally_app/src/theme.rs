use tally_base::color::Color;

// GitHub-light palette.

pub const BACKGROUND: Color = Color {
    r: 0xf6,
    g: 0xf8,
    b: 0xfa,
};

pub const SURFACE: Color = Color::WHITE;

pub const TEXT: Color = Color {
    r: 0x24,
    g: 0x29,
    b: 0x2e,
};

pub const ACCENT: Color = Color {
    r: 0x03,
    g: 0x66,
    b: 0xd6,
};

pub const ERROR: Color = Color {
    r: 0xd7,
    g: 0x3a,
    b: 0x49,
};

pub const MUTED: Color = Color {
    r: 0x6a,
    g: 0x73,
    b: 0x7d,
};
