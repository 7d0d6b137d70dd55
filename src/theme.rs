use crate::core::Rgba8;

/// Number of block fill colors each theme carries.
pub const PALETTE_LEN: usize = 8;

/// Resolved appearance bundle: background gradient endpoints, rule and text
/// colors, and the ordered block palette. Immutable `'static` data, safe to
/// share across concurrent renders.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background_top: Rgba8,
    pub background_bottom: Rgba8,
    pub rule: Rgba8,
    pub axis_text: Rgba8,
    pub block_text: Rgba8,
    pub palette: [Rgba8; PALETTE_LEN],
}

/// Closed set of style variants. Unknown names resolve to the default
/// instead of failing, so style lookup is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Cool,
    Warm,
    Dark,
    Paper,
}

impl Style {
    pub const DEFAULT: Style = Style::Cool;

    /// Pure lookup: style name to variant, default on anything unknown.
    pub fn resolve(name: &str) -> Style {
        match name.trim().to_ascii_lowercase().as_str() {
            "cool" => Style::Cool,
            "warm" => Style::Warm,
            "dark" => Style::Dark,
            "paper" => Style::Paper,
            _ => Style::DEFAULT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Cool => "cool",
            Style::Warm => "warm",
            Style::Dark => "dark",
            Style::Paper => "paper",
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            Style::Cool => &COOL,
            Style::Warm => &WARM,
            Style::Dark => &DARK,
            Style::Paper => &PAPER,
        }
    }
}

const COOL: Theme = Theme {
    background_top: Rgba8::rgb(0xE8, 0xF1, 0xFA),
    background_bottom: Rgba8::rgb(0xC9, 0xDC, 0xF0),
    rule: Rgba8::rgb(0xA9, 0xBE, 0xD6),
    axis_text: Rgba8::rgb(0x3A, 0x4A, 0x5F),
    block_text: Rgba8::rgb(0xFF, 0xFF, 0xFF),
    palette: [
        Rgba8::rgb(0x4A, 0x90, 0xD9),
        Rgba8::rgb(0x5B, 0xA8, 0xA0),
        Rgba8::rgb(0x7B, 0x68, 0xC8),
        Rgba8::rgb(0x48, 0xA9, 0xC5),
        Rgba8::rgb(0x60, 0x7D, 0xB8),
        Rgba8::rgb(0x3D, 0xB3, 0x89),
        Rgba8::rgb(0x8E, 0x7C, 0xC3),
        Rgba8::rgb(0x52, 0x9E, 0xD4),
    ],
};

const WARM: Theme = Theme {
    background_top: Rgba8::rgb(0xFD, 0xF3, 0xE3),
    background_bottom: Rgba8::rgb(0xF7, 0xDD, 0xC4),
    rule: Rgba8::rgb(0xD9, 0xBC, 0x9C),
    axis_text: Rgba8::rgb(0x6B, 0x4A, 0x2F),
    block_text: Rgba8::rgb(0xFF, 0xFF, 0xFF),
    palette: [
        Rgba8::rgb(0xE2, 0x84, 0x4A),
        Rgba8::rgb(0xD9, 0x6A, 0x6A),
        Rgba8::rgb(0xC9, 0x8A, 0x3D),
        Rgba8::rgb(0xB8, 0x6B, 0x8E),
        Rgba8::rgb(0xCF, 0x7A, 0x52),
        Rgba8::rgb(0xA8, 0x8A, 0x4F),
        Rgba8::rgb(0xD1, 0x5C, 0x7F),
        Rgba8::rgb(0xBF, 0x79, 0x3B),
    ],
};

const DARK: Theme = Theme {
    background_top: Rgba8::rgb(0x1C, 0x20, 0x2A),
    background_bottom: Rgba8::rgb(0x12, 0x14, 0x1C),
    rule: Rgba8::rgb(0x3A, 0x40, 0x50),
    axis_text: Rgba8::rgb(0xC8, 0xCE, 0xDA),
    block_text: Rgba8::rgb(0xF2, 0xF4, 0xF8),
    palette: [
        Rgba8::rgb(0x3E, 0x6B, 0xA8),
        Rgba8::rgb(0x45, 0x7F, 0x6B),
        Rgba8::rgb(0x6B, 0x4F, 0x9E),
        Rgba8::rgb(0x8A, 0x5A, 0x44),
        Rgba8::rgb(0x4A, 0x7C, 0x93),
        Rgba8::rgb(0x7E, 0x4E, 0x6E),
        Rgba8::rgb(0x55, 0x6B, 0x3D),
        Rgba8::rgb(0x5E, 0x5A, 0xA8),
    ],
};

const PAPER: Theme = Theme {
    background_top: Rgba8::rgb(0xFA, 0xF8, 0xF2),
    background_bottom: Rgba8::rgb(0xEF, 0xEA, 0xDD),
    rule: Rgba8::rgb(0xC4, 0xBC, 0xA8),
    axis_text: Rgba8::rgb(0x4A, 0x45, 0x3A),
    block_text: Rgba8::rgb(0xFF, 0xFF, 0xFF),
    palette: [
        Rgba8::rgb(0x7A, 0x92, 0x6B),
        Rgba8::rgb(0x9E, 0x7B, 0x5F),
        Rgba8::rgb(0x6E, 0x87, 0x9C),
        Rgba8::rgb(0xA8, 0x6E, 0x6E),
        Rgba8::rgb(0x8C, 0x7F, 0xA0),
        Rgba8::rgb(0x74, 0x9A, 0x8D),
        Rgba8::rgb(0xB0, 0x8A, 0x52),
        Rgba8::rgb(0x88, 0x74, 0x60),
    ],
};
