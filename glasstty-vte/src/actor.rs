//! Callbacks invoked by the terminal parser.
//!
//! The [`Parser`](crate::parser::Parser) walks through a byte stream and
//! translates it into higher level terminal actions. Those actions are handed
//! over to an [`Actor`] implementation that is responsible for mutating the
//! terminal model, writing responses back to the host, or whatever else the
//! embedding application needs. The trait methods mirror the action set
//! defined by the DEC ANSI escape sequence state machine. Implementations
//! should be prepared to receive any sequence of calls that is valid
//! according to the protocol, and should avoid performing additional parsing
//! themselves.

use crate::csi::CsiParam;

/// Consumer-facing interface for terminal actions emitted by the parser.
///
/// Each method corresponds to a particular class of escape sequence or
/// printable data encountered while decoding a stream of terminal bytes.
///
/// ## Terminology:
/// An intermediate is a character in the range 0x20-0x2f that
/// occurs before the final character in an escape sequence.
///
/// `ignored_excess_intermediates` is set when more intermediates arrived
/// than the collect buffer holds; the excess is discarded.
///
/// `params` are decimal integer parameters separated by semicolons. An
/// omitted parameter is reported as zero, which stands for the default
/// value of that parameter.
pub trait Actor {
    /// Emits a single printable byte as a character. Bytes in the GR range
    /// (0xA0-0xFF) arrive unmasked; mapping them through the right-half
    /// character set is the actor's concern.
    fn print(&mut self, c: char);

    /// Executes an immediate single-byte control function.
    ///
    /// This covers C0/C1 control characters that are *not* part of longer
    /// sequences (e.g. `BEL`, `BS`, `CR`, `CAN`, `SUB`, `IND`, `NEL`,
    /// `HTS`).
    fn execute(&mut self, byte: u8);

    /// Signals the start of a Device Control String (DCS).
    fn hook(
        &mut self,
        params: &[i64],
        intermediates: &[u8],
        ignored_excess_intermediates: bool,
        byte: u8,
    );

    /// Marks the end of the current device control string (DCS).
    fn unhook(&mut self);

    /// Passes a payload byte of the device control string chosen in
    /// [`Actor::hook`]. C0 controls are passed through as well.
    fn put(&mut self, byte: u8);

    /// Dispatches an Operating System Command (OSC).
    fn osc_dispatch(&mut self, params: &[&[u8]]);

    /// Dispatches a Control Sequence Introducer (CSI) escape.
    fn csi_dispatch(
        &mut self,
        params: &[CsiParam],
        parameters_truncated: bool,
        byte: u8,
    );

    /// Dispatches a standard escape sequence.
    fn esc_dispatch(
        &mut self,
        intermediates: &[u8],
        ignored_excess_intermediates: bool,
        byte: u8,
    );

    /// Dispatches the two address bytes of a VT52 `ESC Y` direct cursor
    /// address. Both are raw, still carrying the 0x20 offset.
    fn vt52_address(&mut self, row: u8, col: u8);
}
