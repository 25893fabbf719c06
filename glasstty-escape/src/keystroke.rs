//! Logical key to byte-sequence encoding.
//!
//! The byte string a key produces depends on mode state the host controls:
//! DECCKM switches the cursor keys between ANSI and application prefixes,
//! DECKPAM/DECKPNM do the same for the numeric keypad, LNM widens Return to
//! CR LF, and the VT52 submode has prefixes of its own. Encoding is a pure
//! function of that state; it never touches the screen.

use crate::emulator::Emulator;

/// Logical keys with terminal-defined encodings. Keys that produce plain
/// text are not represented; the shell sends those bytes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    CursorUp,
    CursorDown,
    CursorRight,
    CursorLeft,
    /// PF1 through PF4 above the keypad.
    Pf1,
    Pf2,
    Pf3,
    Pf4,
    /// A digit key of the numeric keypad.
    Keypad(u8),
    KeypadMinus,
    KeypadComma,
    KeypadPeriod,
    KeypadEnter,
    Tab,
    Backspace,
    Return,
    LineFeed,
}

/// Encode a key under the emulator's current mode state.
pub fn encode(key: Key, emulator: &Emulator) -> &'static [u8] {
    let vt52 = emulator.vt52_mode();

    match key {
        Key::CursorUp | Key::CursorDown | Key::CursorRight
        | Key::CursorLeft => {
            cursor_key(key, vt52, emulator.application_arrows())
        },
        Key::Pf1 | Key::Pf2 | Key::Pf3 | Key::Pf4 => pf_key(key, vt52),
        Key::Keypad(_)
        | Key::KeypadMinus
        | Key::KeypadComma
        | Key::KeypadPeriod
        | Key::KeypadEnter => {
            keypad_key(key, vt52, emulator.application_keypad(), emulator)
        },
        Key::Tab => b"\t",
        Key::Backspace => {
            if emulator.config().hard_backspace {
                b"\x08"
            } else {
                b"\x7f"
            }
        },
        Key::Return => {
            if emulator.new_line_mode() {
                b"\r\n"
            } else {
                b"\r"
            }
        },
        Key::LineFeed => b"\n",
    }
}

fn cursor_key(key: Key, vt52: bool, application: bool) -> &'static [u8] {
    match (key, vt52, application) {
        (Key::CursorUp, true, _) => b"\x1bA",
        (Key::CursorDown, true, _) => b"\x1bB",
        (Key::CursorRight, true, _) => b"\x1bC",
        (Key::CursorLeft, true, _) => b"\x1bD",
        (Key::CursorUp, false, false) => b"\x1b[A",
        (Key::CursorDown, false, false) => b"\x1b[B",
        (Key::CursorRight, false, false) => b"\x1b[C",
        (Key::CursorLeft, false, false) => b"\x1b[D",
        (Key::CursorUp, false, true) => b"\x1bOA",
        (Key::CursorDown, false, true) => b"\x1bOB",
        (Key::CursorRight, false, true) => b"\x1bOC",
        (Key::CursorLeft, false, true) => b"\x1bOD",
        _ => unreachable!("not a cursor key: {key:?}"),
    }
}

fn pf_key(key: Key, vt52: bool) -> &'static [u8] {
    match (key, vt52) {
        (Key::Pf1, false) => b"\x1bOP",
        (Key::Pf2, false) => b"\x1bOQ",
        (Key::Pf3, false) => b"\x1bOR",
        (Key::Pf4, false) => b"\x1bOS",
        (Key::Pf1, true) => b"\x1bP",
        (Key::Pf2, true) => b"\x1bQ",
        (Key::Pf3, true) => b"\x1bR",
        (Key::Pf4, true) => b"\x1bS",
        _ => unreachable!("not a PF key: {key:?}"),
    }
}

fn keypad_key(
    key: Key,
    vt52: bool,
    application: bool,
    emulator: &Emulator,
) -> &'static [u8] {
    if !application {
        return match key {
            Key::Keypad(0) => b"0",
            Key::Keypad(1) => b"1",
            Key::Keypad(2) => b"2",
            Key::Keypad(3) => b"3",
            Key::Keypad(4) => b"4",
            Key::Keypad(5) => b"5",
            Key::Keypad(6) => b"6",
            Key::Keypad(7) => b"7",
            Key::Keypad(8) => b"8",
            Key::Keypad(9) => b"9",
            Key::KeypadMinus => b"-",
            Key::KeypadComma => b",",
            Key::KeypadPeriod => b".",
            Key::KeypadEnter => {
                if emulator.new_line_mode() {
                    b"\r\n"
                } else {
                    b"\r"
                }
            },
            _ => b"",
        };
    }

    if vt52 {
        match key {
            Key::Keypad(0) => b"\x1b?p",
            Key::Keypad(1) => b"\x1b?q",
            Key::Keypad(2) => b"\x1b?r",
            Key::Keypad(3) => b"\x1b?s",
            Key::Keypad(4) => b"\x1b?t",
            Key::Keypad(5) => b"\x1b?u",
            Key::Keypad(6) => b"\x1b?v",
            Key::Keypad(7) => b"\x1b?w",
            Key::Keypad(8) => b"\x1b?x",
            Key::Keypad(9) => b"\x1b?y",
            Key::KeypadMinus => b"\x1b?m",
            Key::KeypadComma => b"\x1b?l",
            Key::KeypadPeriod => b"\x1b?n",
            Key::KeypadEnter => b"\x1b?M",
            _ => b"",
        }
    } else {
        match key {
            Key::Keypad(0) => b"\x1bOp",
            Key::Keypad(1) => b"\x1bOq",
            Key::Keypad(2) => b"\x1bOr",
            Key::Keypad(3) => b"\x1bOs",
            Key::Keypad(4) => b"\x1bOt",
            Key::Keypad(5) => b"\x1bOu",
            Key::Keypad(6) => b"\x1bOv",
            Key::Keypad(7) => b"\x1bOw",
            Key::Keypad(8) => b"\x1bOx",
            Key::Keypad(9) => b"\x1bOy",
            Key::KeypadMinus => b"\x1bOm",
            Key::KeypadComma => b"\x1bOl",
            Key::KeypadPeriod => b"\x1bOn",
            Key::KeypadEnter => b"\x1bOM",
            _ => b"",
        }
    }
}
