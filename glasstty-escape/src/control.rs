use std::fmt;

use log::debug;

use crate::charset::CharsetIndex;
use crate::emulator::{Emit, Performer};
use crate::host::Host;
use crate::screen::Screen;

/// Enumeration of the C0/C1 control codes acted on outside of an escape
/// sequence. The C1 rows only arrive on an 8-bit terminal; the 7-bit
/// emulations mask them away before dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControlCode {
    // C0
    /// (NUL) Fill character, normally discarded.
    Null,
    /// (ENQ, Caret = ^E) Enquiry, solicits the answerback message.
    Enquiry,
    /// (BEL, Caret = ^G, C = \a) Bell, triggers the beeper on the terminal.
    Bell,
    /// (BS, Caret = ^H, C = \b) Backspace, moves the cursor left without
    /// wrapping.
    Backspace,
    /// (HT, Caret = ^I, C = \t) Horizontal Tabulation, move to next
    /// predetermined position.
    HorizontalTab,
    /// (LF, Caret = ^J, C = \n) Linefeed, move to same position on next
    /// line (or column 0 under LNM).
    LineFeed,
    /// (VT, Caret = ^K, C = \v) Vertical Tabulation, treated as LF.
    VerticalTab,
    /// (FF, Caret = ^L, C = \f) Form Feed, treated as LF.
    FormFeed,
    /// (CR, Caret = ^M, C = \r) Carriage Return, move to column 0.
    CarriageReturn,
    /// (SO, Caret = ^N) Shift Out, locking shift of G1 into GL.
    ShiftOut,
    /// (SI, Caret = ^O) Shift In, locking shift of G0 into GL.
    ShiftIn,
    /// (CAN, Caret = ^X) Cancel; the parser already aborted the sequence.
    Cancel,
    /// (SUB, Caret = ^Z) Substitute, treated like CAN.
    Substitute,

    // C1
    /// (IND) Index.
    Index,
    /// (NEL) Next Line.
    NextLine,
    /// (HTS) Horizontal Tabulation Set.
    HorizontalTabSet,
    /// (RI) Reverse Index.
    ReverseIndex,
    /// (SS2) Single Shift of G2 for the next printable.
    SingleShiftTwo,
    /// (SS3) Single Shift of G3 for the next printable.
    SingleShiftThree,

    // Misc
    /// Unexpected control code
    Unexpected(u8),
}

impl From<u8> for ControlCode {
    fn from(byte: u8) -> Self {
        use ControlCode::*;
        match byte {
            // C0
            0x00 => Null,
            0x05 => Enquiry,
            0x07 => Bell,
            0x08 => Backspace,
            0x09 => HorizontalTab,
            0x0A => LineFeed,
            0x0B => VerticalTab,
            0x0C => FormFeed,
            0x0D => CarriageReturn,
            0x0E => ShiftOut,
            0x0F => ShiftIn,
            0x18 => Cancel,
            0x1A => Substitute,

            // C1
            0x84 => Index,
            0x85 => NextLine,
            0x88 => HorizontalTabSet,
            0x8D => ReverseIndex,
            0x8E => SingleShiftTwo,
            0x8F => SingleShiftThree,

            // Misc
            other => Unexpected(other),
        }
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ControlCode::*;
        let code = match self {
            // C0
            Null => "NUL",
            Enquiry => "ENQ",
            Bell => "BEL",
            Backspace => "BS",
            HorizontalTab => "HT",
            LineFeed => "LF",
            VerticalTab => "VT",
            FormFeed => "FF",
            CarriageReturn => "CR",
            ShiftOut => "SO",
            ShiftIn => "SI",
            Cancel => "CAN",
            Substitute => "SUB",

            // C1
            Index => "IND",
            NextLine => "NEL",
            HorizontalTabSet => "HTS",
            ReverseIndex => "RI",
            SingleShiftTwo => "SS2",
            SingleShiftThree => "SS3",

            // Misc
            Unexpected(_) => "UNEXPECTED",
        };

        match self {
            Unexpected(b) => write!(f, "{code}: 0x{b:02X}"),
            _ => write!(f, "{code}"),
        }
    }
}

pub(crate) fn perform<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    byte: u8,
) {
    let code = ControlCode::from(byte);
    match code {
        // C0
        ControlCode::Null => {
            if performer.state.config.display_null {
                performer.emit = Emit::Char(' ');
            }
        },
        ControlCode::Enquiry => {
            let Performer { state, host, .. } = performer;
            host.write_back(state.config.answerback.as_bytes());
        },
        ControlCode::Bell => performer.screen.beep(),
        ControlCode::Backspace => performer.screen.cursor_left(1, false),
        ControlCode::HorizontalTab => performer.horizontal_tab(),
        ControlCode::LineFeed
        | ControlCode::VerticalTab
        | ControlCode::FormFeed => {
            let new_line_mode = performer.state.new_line_mode;
            performer.screen.cursor_linefeed(new_line_mode);
        },
        ControlCode::CarriageReturn => performer.screen.carriage_return(),
        ControlCode::ShiftOut => {
            performer.state.shift_out = true;
            performer.state.lockshift_gl = None;
        },
        ControlCode::ShiftIn => {
            performer.state.shift_out = false;
            performer.state.lockshift_gl = None;
        },
        ControlCode::Cancel | ControlCode::Substitute => {},

        // C1
        ControlCode::Index => performer.screen.cursor_linefeed(false),
        ControlCode::NextLine => performer.screen.cursor_linefeed(true),
        ControlCode::HorizontalTabSet => performer.set_tab_stop(),
        ControlCode::ReverseIndex => performer.reverse_index(),
        ControlCode::SingleShiftTwo => {
            performer.state.single_shift = Some(CharsetIndex::G2);
        },
        ControlCode::SingleShiftThree => {
            performer.state.single_shift = Some(CharsetIndex::G3);
        },

        _ => debug!("[unexpected: control_code] {code}"),
    }
}
