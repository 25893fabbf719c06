use log::debug;

use crate::charset::{Charset, CharsetIndex};
use crate::emulator::Performer;
use crate::host::Host;
use crate::level::EmulationLevel;
use crate::screen::{DoubleHeight, Screen};

/// Escape sequence identified by its intermediates and final byte.
///
/// The VT52 submode reuses most of the ANSI final bytes with entirely
/// different meanings (`ESC D` is cursor-left, not Index), so parsing takes
/// the submode flag and yields disjoint variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EscSequence {
    /// IND - Index, line feed without carriage return.
    Index,
    /// NEL - Next Line.
    NextLine,
    /// HTS - Horizontal Tab Set.
    HorizontalTabSet,
    /// RI - Reverse Index, moves the cursor up one line and scrolls the
    /// region down when leaving it through the top.
    ReverseIndex,
    /// ST - String Terminator.
    StringTerminator,
    /// RIS - Full Reset.
    FullReset,
    /// DECID - Return Terminal ID (obsolete form of CSI c, aka DA).
    ReturnTerminalId,
    /// DECSC - Save cursor and rendition state.
    SaveCursor,
    /// DECRC - Restore saved cursor state.
    RestoreCursor,
    /// DECPAM - Application Keypad.
    ApplicationKeypad,
    /// DECPNM - Numeric Keypad.
    NumericKeypad,
    /// SS2 - Single shift of G2 for the next printable.
    SingleShiftTwo,
    /// SS3 - Single shift of G3 for the next printable.
    SingleShiftThree,
    /// LS2 - Locking shift of G2 into GL.
    LockShiftG2,
    /// LS3 - Locking shift of G3 into GL.
    LockShiftG3,
    /// LS1R - Locking shift of G1 into GR.
    LockShiftG1Right,
    /// LS2R - Locking shift of G2 into GR.
    LockShiftG2Right,
    /// LS3R - Locking shift of G3 into GR.
    LockShiftG3Right,
    /// SCS - Designate a character set into G0..G3.
    DesignateCharset(CharsetIndex, u8),
    /// DECALN - Screen alignment display.
    ScreenAlignment,
    /// DECDHL - Double-height line, top half.
    DoubleHeightTop,
    /// DECDHL - Double-height line, bottom half.
    DoubleHeightBottom,
    /// DECSWL - Single-width line.
    SingleWidthLine,
    /// DECDWL - Double-width line.
    DoubleWidthLine,
    /// S7C1T - Responses use two-byte 7-bit control introducers.
    SevenBitControls,
    /// S8C1T - Responses use single-byte C1 control introducers.
    EightBitControls,

    // VT52 submode
    /// Cursor up one row.
    Vt52CursorUp,
    /// Cursor down one row.
    Vt52CursorDown,
    /// Cursor right one column.
    Vt52CursorRight,
    /// Cursor left one column.
    Vt52CursorLeft,
    /// Select the VT52 graphics character set.
    Vt52GraphicsOn,
    /// Back to the standard character set.
    Vt52GraphicsOff,
    /// Cursor home.
    Vt52Home,
    /// Reverse line feed.
    Vt52ReverseLineFeed,
    /// Erase from the cursor to the end of the screen.
    Vt52EraseToEndOfScreen,
    /// Erase from the cursor to the end of the line.
    Vt52EraseToEndOfLine,
    /// Identify; the answer is `ESC / Z`.
    Vt52Identify,
    /// Enter alternate-keypad mode.
    Vt52AlternateKeypad,
    /// Leave alternate-keypad mode.
    Vt52NumericKeypad,
    /// Leave the VT52 submode and return to ANSI operation.
    EnterAnsiMode,

    Unspecified {
        control: u8,
        intermediates: Vec<u8>,
    },
}

impl EscSequence {
    pub(crate) fn parse(
        intermediates: &[u8],
        control: u8,
        vt52: bool,
    ) -> Self {
        if vt52 {
            return Self::parse_vt52(intermediates, control);
        }

        let intermediate = if intermediates.len() == 1 {
            Some(intermediates[0])
        } else {
            None
        };

        match (intermediate, control) {
            (None, b'D') => Self::Index,
            (None, b'E') => Self::NextLine,
            (None, b'H') => Self::HorizontalTabSet,
            (None, b'M') => Self::ReverseIndex,
            (None, b'N') => Self::SingleShiftTwo,
            (None, b'O') => Self::SingleShiftThree,
            (None, b'\\') => Self::StringTerminator,
            (None, b'c') => Self::FullReset,
            (None, b'Z') => Self::ReturnTerminalId,
            (None, b'7') => Self::SaveCursor,
            (None, b'8') => Self::RestoreCursor,
            (None, b'=') => Self::ApplicationKeypad,
            (None, b'>') => Self::NumericKeypad,
            (None, b'n') => Self::LockShiftG2,
            (None, b'o') => Self::LockShiftG3,
            (None, b'~') => Self::LockShiftG1Right,
            (None, b'}') => Self::LockShiftG2Right,
            (None, b'|') => Self::LockShiftG3Right,
            (Some(b'('), ch) => Self::DesignateCharset(CharsetIndex::G0, ch),
            (Some(b')'), ch) => Self::DesignateCharset(CharsetIndex::G1, ch),
            (Some(b'*'), ch) => Self::DesignateCharset(CharsetIndex::G2, ch),
            (Some(b'+'), ch) => Self::DesignateCharset(CharsetIndex::G3, ch),
            (Some(b'#'), b'3') => Self::DoubleHeightTop,
            (Some(b'#'), b'4') => Self::DoubleHeightBottom,
            (Some(b'#'), b'5') => Self::SingleWidthLine,
            (Some(b'#'), b'6') => Self::DoubleWidthLine,
            (Some(b'#'), b'8') => Self::ScreenAlignment,
            (Some(b' '), b'F') => Self::SevenBitControls,
            (Some(b' '), b'G') => Self::EightBitControls,
            _ => Self::Unspecified {
                control,
                intermediates: intermediates.to_vec(),
            },
        }
    }

    /// The VT52 repertoire. Finals outside it are discarded; the two-byte
    /// `ESC Y` address never reaches this point, the state machine handles
    /// it.
    fn parse_vt52(intermediates: &[u8], control: u8) -> Self {
        if !intermediates.is_empty() {
            return Self::Unspecified {
                control,
                intermediates: intermediates.to_vec(),
            };
        }

        match control {
            b'A' => Self::Vt52CursorUp,
            b'B' => Self::Vt52CursorDown,
            b'C' => Self::Vt52CursorRight,
            b'D' => Self::Vt52CursorLeft,
            b'F' => Self::Vt52GraphicsOn,
            b'G' => Self::Vt52GraphicsOff,
            b'H' => Self::Vt52Home,
            b'I' => Self::Vt52ReverseLineFeed,
            b'J' => Self::Vt52EraseToEndOfScreen,
            b'K' => Self::Vt52EraseToEndOfLine,
            b'Z' => Self::Vt52Identify,
            b'=' => Self::Vt52AlternateKeypad,
            b'>' => Self::Vt52NumericKeypad,
            b'<' => Self::EnterAnsiMode,
            _ => Self::Unspecified {
                control,
                intermediates: Vec::new(),
            },
        }
    }
}

pub(crate) fn perform<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    intermediates: &[u8],
    byte: u8,
) {
    let vt220 = performer.state.level == EmulationLevel::Vt220;

    match EscSequence::parse(intermediates, byte, performer.state.vt52) {
        EscSequence::Index => performer.screen.cursor_linefeed(false),
        EscSequence::NextLine => performer.screen.cursor_linefeed(true),
        EscSequence::HorizontalTabSet => performer.set_tab_stop(),
        EscSequence::ReverseIndex => performer.reverse_index(),
        EscSequence::StringTerminator => {},
        EscSequence::FullReset => performer.full_reset(),
        EscSequence::ReturnTerminalId => performer.primary_attributes(),
        EscSequence::SaveCursor => performer.save_cursor(),
        EscSequence::RestoreCursor => performer.restore_cursor(),
        EscSequence::ApplicationKeypad => {
            performer.state.application_keypad = true;
        },
        EscSequence::NumericKeypad => {
            performer.state.application_keypad = false;
        },
        EscSequence::SingleShiftTwo if vt220 => {
            performer.state.single_shift = Some(CharsetIndex::G2);
        },
        EscSequence::SingleShiftThree if vt220 => {
            performer.state.single_shift = Some(CharsetIndex::G3);
        },
        EscSequence::LockShiftG2 if vt220 => {
            performer.state.shift_out = false;
            performer.state.lockshift_gl = Some(CharsetIndex::G2);
        },
        EscSequence::LockShiftG3 if vt220 => {
            performer.state.shift_out = false;
            performer.state.lockshift_gl = Some(CharsetIndex::G3);
        },
        EscSequence::LockShiftG1Right if vt220 => {
            performer.state.lockshift_gr = Some(CharsetIndex::G1);
        },
        EscSequence::LockShiftG2Right if vt220 => {
            performer.state.lockshift_gr = Some(CharsetIndex::G2);
        },
        EscSequence::LockShiftG3Right if vt220 => {
            performer.state.lockshift_gr = Some(CharsetIndex::G3);
        },
        EscSequence::DesignateCharset(index, ch) => {
            match Charset::from_designator(ch, performer.state.level) {
                Some(charset) => {
                    performer.state.charsets[index as usize] = charset;
                },
                None => {
                    debug!("[unknown charset designator] {:?}", ch as char)
                },
            }
        },
        EscSequence::ScreenAlignment => performer.screen_alignment(),
        EscSequence::DoubleHeightTop => {
            performer.screen.set_double_height(DoubleHeight::Top);
        },
        EscSequence::DoubleHeightBottom => {
            performer.screen.set_double_height(DoubleHeight::Bottom);
        },
        EscSequence::SingleWidthLine => {
            performer.screen.set_double_width(false);
        },
        EscSequence::DoubleWidthLine => {
            performer.screen.set_double_width(true);
        },
        EscSequence::SevenBitControls if vt220 => {
            performer.state.s8c1t = false;
        },
        EscSequence::EightBitControls if vt220 => {
            performer.state.s8c1t = true;
        },

        EscSequence::Vt52CursorUp => performer.screen.cursor_up(1, false),
        EscSequence::Vt52CursorDown => {
            performer.screen.cursor_down(1, false)
        },
        EscSequence::Vt52CursorRight => {
            performer.screen.cursor_right(1, false)
        },
        EscSequence::Vt52CursorLeft => {
            performer.screen.cursor_left(1, false)
        },
        EscSequence::Vt52GraphicsOn => {
            performer.state.vt52_graphics = true;
        },
        EscSequence::Vt52GraphicsOff => {
            performer.state.vt52_graphics = false;
        },
        EscSequence::Vt52Home => performer.screen.cursor_position(0, 0),
        EscSequence::Vt52ReverseLineFeed => performer.reverse_index(),
        EscSequence::Vt52EraseToEndOfScreen => performer.erase_below(false),
        EscSequence::Vt52EraseToEndOfLine => {
            let x = performer.screen.cursor_x();
            let width = performer.screen.width();
            performer.screen.erase_line(x, width - 1, false);
        },
        EscSequence::Vt52Identify => {
            performer.host.write_back(b"\x1b/Z");
        },
        EscSequence::Vt52AlternateKeypad => {
            performer.state.application_keypad = true;
        },
        EscSequence::Vt52NumericKeypad => {
            performer.state.application_keypad = false;
        },
        EscSequence::EnterAnsiMode => performer.leave_vt52(),

        sequence => {
            debug!("[unexpected esc] {sequence:?}");
        },
    }
}
