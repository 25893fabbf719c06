/// Wrapper for the ANSI modes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Known ANSI mode.
    Named(NamedMode),
    /// Unidentified public mode.
    Unknown(u16),
}

impl Mode {
    pub(crate) fn from_raw(mode: u16) -> Self {
        match mode {
            2 => Self::Named(NamedMode::KeyboardAction),
            4 => Self::Named(NamedMode::Insert),
            12 => Self::Named(NamedMode::SendReceive),
            20 => Self::Named(NamedMode::LineFeedNewLine),
            _ => Self::Unknown(mode),
        }
    }

    /// Get the raw value of the mode.
    pub fn raw(self) -> u16 {
        match self {
            Self::Named(named) => named as u16,
            Self::Unknown(mode) => mode,
        }
    }
}

impl From<NamedMode> for Mode {
    fn from(value: NamedMode) -> Self {
        Self::Named(value)
    }
}

/// ANSI modes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NamedMode {
    /// KAM. Recognized, no effect here.
    KeyboardAction = 2,
    /// IRM insert mode.
    Insert = 4,
    /// SRM. Setting it turns local echo off.
    SendReceive = 12,
    /// LNM. LF implies CR when set.
    LineFeedNewLine = 20,
}

/// Wrapper for the private DEC modes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrivateMode {
    /// Known private mode.
    Named(NamedPrivateMode),
    /// Unknown private mode.
    Unknown(u16),
}

impl PrivateMode {
    pub(crate) fn from_raw(mode: u16) -> Self {
        match mode {
            1 => Self::Named(NamedPrivateMode::CursorKeys),
            2 => Self::Named(NamedPrivateMode::AnsiMode),
            3 => Self::Named(NamedPrivateMode::ColumnMode),
            4 => Self::Named(NamedPrivateMode::SmoothScroll),
            5 => Self::Named(NamedPrivateMode::ReverseVideo),
            6 => Self::Named(NamedPrivateMode::Origin),
            7 => Self::Named(NamedPrivateMode::LineWrap),
            8 => Self::Named(NamedPrivateMode::AutoRepeat),
            25 => Self::Named(NamedPrivateMode::ShowCursor),
            42 => Self::Named(NamedPrivateMode::NationalReplacement),
            _ => Self::Unknown(mode),
        }
    }

    /// Get the raw value of the mode.
    pub fn raw(self) -> u16 {
        match self {
            Self::Named(named) => named as u16,
            Self::Unknown(mode) => mode,
        }
    }
}

impl From<NamedPrivateMode> for PrivateMode {
    fn from(value: NamedPrivateMode) -> Self {
        Self::Named(value)
    }
}

/// Private DEC modes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NamedPrivateMode {
    /// DECCKM. Arrow keys send `ESC O` prefixes instead of `ESC [`.
    CursorKeys = 1,
    /// DECANM. Resetting it drops the terminal into the VT52 submode;
    /// the way back is `ESC <`.
    AnsiMode = 2,
    /// DECCOLM. Selects 132 columns when set, 80 when reset. Either
    /// direction clears the screen and resets the scrolling region.
    ColumnMode = 3,
    /// DECSCLM. Recognized, no effect here.
    SmoothScroll = 4,
    /// DECSCNM. Inverts the whole display, scrollback included.
    ReverseVideo = 5,
    /// DECOM. Row coordinates become relative to the scrolling region.
    Origin = 6,
    /// DECAWM.
    LineWrap = 7,
    /// DECARM. Recognized, no effect here.
    AutoRepeat = 8,
    /// DECTCEM, VT220 only.
    ShowCursor = 25,
    /// DECNRCM, VT220 only. Recognized, no effect here.
    NationalReplacement = 42,
}

/// Mode for clearing line.
///
/// Relative to cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClearMode {
    /// Clear right of cursor.
    Right,
    /// Clear left of cursor.
    Left,
    /// Clear entire line.
    All,
}

/// Mode for clearing the display.
///
/// Relative to cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Clear below cursor.
    Below,
    /// Clear above cursor.
    Above,
    /// Clear entire display.
    All,
}

/// Mode for clearing tab stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClearMode {
    /// Clear stop under cursor.
    Current,
    /// Clear all stops.
    All,
}
