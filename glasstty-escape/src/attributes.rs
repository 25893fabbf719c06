use bitflags::bitflags;

bitflags! {
    /// Rendition flags of a cell. `PROTECTED` is the DECSCA guard bit; it
    /// is not a rendition and survives `SGR 0`.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rendition: u8 {
        const BOLD      = 0b0000_0001;
        const UNDERLINE = 0b0000_0010;
        const BLINK     = 0b0000_0100;
        const REVERSE   = 0b0000_1000;
        const PROTECTED = 0b0001_0000;
    }
}

/// Standard colors addressable through SGR 30-37/40-47.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// SGR 30-37 and 40-47 share the same final digit.
    pub(crate) fn from_sgr_digit(digit: u16) -> Option<Self> {
        let color = match digit {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            7 => Self::White,
            _ => return None,
        };

        Some(color)
    }
}

/// The attribute word carried by every printed cell: rendition flags plus
/// foreground/background color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CellAttributes {
    pub rendition: Rendition,
    pub foreground: Color,
    pub background: Color,
}

impl CellAttributes {
    /// `SGR 0`: drop every rendition except the protection guard and fall
    /// back to the default palette entry.
    pub fn reset(&mut self) {
        self.rendition &= Rendition::PROTECTED;
        self.foreground = Color::Default;
        self.background = Color::Default;
    }

    #[inline]
    pub fn protected(&self) -> bool {
        self.rendition.contains(Rendition::PROTECTED)
    }

    pub(crate) fn set_protected(&mut self, on: bool) {
        self.rendition.set(Rendition::PROTECTED, on);
    }
}
