use crate::level::EmulationLevel;

/// The character sets a VT220 can designate into its G0..G3 registers.
///
/// Each set is a fixed 7-bit to Unicode mapping. GL lookups use bits 0-6 of
/// the incoming byte; GR lookups strip the top bit first. The ROM cartridge
/// sets have no published tables and fall back to ASCII.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Ascii,
    BritishNrc,
    DecLineDrawing,
    Rom,
    RomSpecial,
    Vt52Graphics,
    DecSupplemental,
    DutchNrc,
    FinnishNrc,
    FrenchNrc,
    FrenchCanadianNrc,
    GermanNrc,
    ItalianNrc,
    NorwegianNrc,
    SpanishNrc,
    SwedishNrc,
    SwissNrc,
}

/// G register a designator escape targets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CharsetIndex {
    #[default]
    G0,
    G1,
    G2,
    G3,
}

impl Charset {
    /// Resolve a designator final byte (`ESC ( ch` and friends). The
    /// national replacement sets exist on the VT220 only; lower levels
    /// ignore those finals.
    pub fn from_designator(
        byte: u8,
        level: EmulationLevel,
    ) -> Option<Charset> {
        let charset = match byte {
            b'A' => Self::BritishNrc,
            b'B' => Self::Ascii,
            b'0' => Self::DecLineDrawing,
            b'1' => Self::Rom,
            b'2' => Self::RomSpecial,
            b'<' => Self::DecSupplemental,
            _ => {
                if level != EmulationLevel::Vt220 {
                    return None;
                }

                match byte {
                    b'4' => Self::DutchNrc,
                    b'C' | b'5' => Self::FinnishNrc,
                    b'R' => Self::FrenchNrc,
                    b'Q' => Self::FrenchCanadianNrc,
                    b'K' => Self::GermanNrc,
                    b'Y' => Self::ItalianNrc,
                    b'E' | b'6' => Self::NorwegianNrc,
                    b'Z' => Self::SpanishNrc,
                    b'H' | b'7' => Self::SwedishNrc,
                    b'=' => Self::SwissNrc,
                    _ => return None,
                }
            },
        };

        Some(charset)
    }

    /// Map a 7-bit character to the glyph this set displays for it. Ascii
    /// is the common case and for that we want to do as little as possible.
    #[inline]
    pub fn map(self, c: char) -> char {
        match self {
            Self::Ascii | Self::Rom | Self::RomSpecial => c,
            Self::BritishNrc => match c {
                '#' => '£',
                _ => c,
            },
            Self::DecLineDrawing => match c {
                '_' => ' ',
                '`' => '◆',
                'a' => '▒',
                'b' => '\u{2409}', // Symbol for horizontal tabulation
                'c' => '\u{240c}', // Symbol for form feed
                'd' => '\u{240d}', // Symbol for carriage return
                'e' => '\u{240a}', // Symbol for line feed
                'f' => '°',
                'g' => '±',
                'h' => '\u{2424}', // Symbol for newline
                'i' => '\u{240b}', // Symbol for vertical tabulation
                'j' => '┘',
                'k' => '┐',
                'l' => '┌',
                'm' => '└',
                'n' => '┼',
                'o' => '⎺',
                'p' => '⎻',
                'q' => '─',
                'r' => '⎼',
                's' => '⎽',
                't' => '├',
                'u' => '┤',
                'v' => '┴',
                'w' => '┬',
                'x' => '│',
                'y' => '≤',
                'z' => '≥',
                '{' => 'π',
                '|' => '≠',
                '}' => '£',
                '~' => '·',
                _ => c,
            },
            Self::Vt52Graphics => match c {
                '^' | '_' | '`' => ' ',
                'a' => '█',
                'b' => '¹',
                'c' => '³',
                'd' => '⁵',
                'e' => '⁷',
                'f' => '°',
                'g' => '±',
                'h' => '→',
                'i' => '…',
                'j' => '÷',
                'k' => '↓',
                'l' | 'm' => '⎺',
                'n' | 'o' => '⎻',
                'p' => '─',
                'q' | 'r' => '⎼',
                's' => '⎽',
                't' => '₀',
                'u' => '₁',
                'v' => '₂',
                'w' => '₃',
                'x' => '₄',
                'y' => '₅',
                'z' => '₆',
                '{' => '₇',
                '|' => '₈',
                '}' => '₉',
                '~' => '¶',
                _ => c,
            },
            // DEC multinational: Latin-1 except for a handful of slots.
            Self::DecSupplemental => match c {
                '(' => '¤',
                'W' => 'Œ',
                ']' => 'Ÿ',
                'w' => 'œ',
                '}' => 'ÿ',
                _ => match char::from_u32(c as u32 + 0x80) {
                    Some(mapped) => mapped,
                    None => c,
                },
            },
            Self::DutchNrc => match c {
                '#' => '£',
                '@' => '¾',
                '[' => 'ĳ',
                '\\' => '½',
                ']' => '|',
                '{' => '¨',
                '|' => 'ƒ',
                '}' => '¼',
                '~' => '´',
                _ => c,
            },
            Self::FinnishNrc => match c {
                '[' => 'Ä',
                '\\' => 'Ö',
                ']' => 'Å',
                '^' => 'Ü',
                '`' => 'é',
                '{' => 'ä',
                '|' => 'ö',
                '}' => 'å',
                '~' => 'ü',
                _ => c,
            },
            Self::FrenchNrc => match c {
                '#' => '£',
                '@' => 'à',
                '[' => '°',
                '\\' => 'ç',
                ']' => '§',
                '{' => 'é',
                '|' => 'ù',
                '}' => 'è',
                '~' => '¨',
                _ => c,
            },
            Self::FrenchCanadianNrc => match c {
                '@' => 'à',
                '[' => 'â',
                '\\' => 'ç',
                ']' => 'ê',
                '^' => 'î',
                '`' => 'ô',
                '{' => 'é',
                '|' => 'ù',
                '}' => 'è',
                '~' => 'û',
                _ => c,
            },
            Self::GermanNrc => match c {
                '@' => '§',
                '[' => 'Ä',
                '\\' => 'Ö',
                ']' => 'Ü',
                '{' => 'ä',
                '|' => 'ö',
                '}' => 'ü',
                '~' => 'ß',
                _ => c,
            },
            Self::ItalianNrc => match c {
                '#' => '£',
                '@' => '§',
                '[' => '°',
                '\\' => 'ç',
                ']' => 'é',
                '`' => 'ù',
                '{' => 'à',
                '|' => 'ò',
                '}' => 'è',
                '~' => 'ì',
                _ => c,
            },
            Self::NorwegianNrc => match c {
                '@' => 'Ä',
                '[' => 'Æ',
                '\\' => 'Ø',
                ']' => 'Å',
                '^' => 'Ü',
                '`' => 'ä',
                '{' => 'æ',
                '|' => 'ø',
                '}' => 'å',
                '~' => 'ü',
                _ => c,
            },
            Self::SpanishNrc => match c {
                '#' => '£',
                '@' => '§',
                '[' => '¡',
                '\\' => 'Ñ',
                ']' => '¿',
                '{' => '°',
                '|' => 'ñ',
                '}' => 'ç',
                _ => c,
            },
            Self::SwedishNrc => match c {
                '@' => 'É',
                '[' => 'Ä',
                '\\' => 'Ö',
                ']' => 'Å',
                '^' => 'Ü',
                '`' => 'é',
                '{' => 'ä',
                '|' => 'ö',
                '}' => 'å',
                '~' => 'ü',
                _ => c,
            },
            Self::SwissNrc => match c {
                '#' => 'ù',
                '@' => 'à',
                '[' => 'é',
                '\\' => 'ç',
                ']' => 'ê',
                '^' => 'î',
                '_' => 'è',
                '`' => 'ô',
                '{' => 'ä',
                '|' => 'ö',
                '}' => 'ü',
                '~' => 'û',
                _ => c,
            },
        }
    }
}
