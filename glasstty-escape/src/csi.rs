use log::debug;

use glasstty_vte::CsiParam;

use crate::attributes::Color;
use crate::emulator::Performer;
use crate::host::Host;
use crate::level::EmulationLevel;
use crate::mode::{
    ClearMode, LineClearMode, Mode, NamedMode, NamedPrivateMode, PrivateMode,
    TabClearMode,
};
use crate::screen::Screen;

/// Control sequence with raw arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Csi {
    /// ICH
    InsertBlank(u16),
    /// CUU
    CursorUp(u16),
    /// CUD
    CursorDown(u16),
    /// CUF
    CursorForward(u16),
    /// CUB
    CursorBackward(u16),
    /// CUP
    CursorPosition(u16, u16),
    /// HVP
    HorizontalAndVerticalPosition(u16, u16),
    /// ED / DECSED
    EraseDisplay { mode: u16, selective: bool },
    /// EL / DECSEL
    EraseLine { mode: u16, selective: bool },
    /// IL
    InsertLine(u16),
    /// DL
    DeleteLine(u16),
    /// DCH
    DeleteCharacter(u16),
    /// ECH
    EraseCharacters(u16),
    /// TBC
    TabClear(u16),
    /// SM
    SetMode(Vec<Mode>),
    /// DECSET
    SetModePrivate(Vec<PrivateMode>),
    /// RM
    ResetMode(Vec<Mode>),
    /// DECRST
    ResetModePrivate(Vec<PrivateMode>),
    /// SGR
    SelectGraphicRendition(Vec<u16>),
    /// DSR / DECDSR
    DeviceStatusReport { report: u16, private: bool },
    /// DA1
    PrimaryDeviceAttributes,
    /// DA2
    SecondaryDeviceAttributes,
    /// DA3
    TertiaryDeviceAttributes,
    /// DECSTBM
    SetTopAndBottomMargin(u16, u16),
    /// DECREQTPARM
    RequestTerminalParameters(u16),
    /// MC
    MediaCopy(u16),
    /// DECSCL
    SetConformanceLevel(Vec<u16>),
    /// DECSCA
    SelectCharacterProtection(u16),
    /// Misc sequences
    Unspecified {
        params: Vec<CsiParam>,
        final_byte: u8,
    },
}

impl From<(&[CsiParam], u8)> for Csi {
    fn from(value: (&[CsiParam], u8)) -> Self {
        let (raw_params, final_byte) = value;

        match (final_byte, raw_params) {
            (b'h', [CsiParam::P(b'?'), rest @ ..]) => {
                let modes = parse_params(rest)
                    .into_iter()
                    .map(PrivateMode::from_raw)
                    .collect();

                Self::SetModePrivate(modes)
            },
            (b'h', params) => {
                let modes = parse_params(params)
                    .into_iter()
                    .map(Mode::from_raw)
                    .collect();

                Self::SetMode(modes)
            },
            (b'l', [CsiParam::P(b'?'), rest @ ..]) => {
                let modes = parse_params(rest)
                    .into_iter()
                    .map(PrivateMode::from_raw)
                    .collect();

                Self::ResetModePrivate(modes)
            },
            (b'l', params) => {
                let modes = parse_params(params)
                    .into_iter()
                    .map(Mode::from_raw)
                    .collect();

                Self::ResetMode(modes)
            },
            (b'm', params) => {
                Self::SelectGraphicRendition(parse_params(params))
            },
            (b'J', [CsiParam::P(b'?'), rest @ ..]) => Self::EraseDisplay {
                mode: single(rest),
                selective: true,
            },
            (b'J', params) => Self::EraseDisplay {
                mode: single(params),
                selective: false,
            },
            (b'K', [CsiParam::P(b'?'), rest @ ..]) => Self::EraseLine {
                mode: single(rest),
                selective: true,
            },
            (b'K', params) => Self::EraseLine {
                mode: single(params),
                selective: false,
            },
            (b'n', [CsiParam::P(b'?'), rest @ ..]) => {
                Self::DeviceStatusReport {
                    report: single(rest),
                    private: true,
                }
            },
            (b'n', params) => Self::DeviceStatusReport {
                report: single(params),
                private: false,
            },
            (b'c', []) => Self::PrimaryDeviceAttributes,
            (b'c', [CsiParam::Integer(0)]) => Self::PrimaryDeviceAttributes,
            (b'c', [CsiParam::P(b'>'), ..]) => {
                Self::SecondaryDeviceAttributes
            },
            (b'c', [CsiParam::P(b'='), ..]) => {
                Self::TertiaryDeviceAttributes
            },
            (b'p', [params @ .., CsiParam::P(b'"')]) => {
                Self::SetConformanceLevel(parse_params(params))
            },
            (b'q', [params @ .., CsiParam::P(b'"')]) => {
                Self::SelectCharacterProtection(single(params))
            },
            (b'i', [CsiParam::P(b'?'), rest @ ..]) => {
                Self::MediaCopy(single(rest))
            },
            (b'i', params) => Self::MediaCopy(single(params)),
            (b'@', params) => Self::InsertBlank(single(params)),
            (b'A', params) => Self::CursorUp(single(params)),
            (b'B', params) => Self::CursorDown(single(params)),
            (b'C', params) => Self::CursorForward(single(params)),
            (b'D', params) => Self::CursorBackward(single(params)),
            (b'H', params) => {
                let (row, col) = pair(params);
                Self::CursorPosition(row, col)
            },
            (b'f', params) => {
                let (row, col) = pair(params);
                Self::HorizontalAndVerticalPosition(row, col)
            },
            (b'L', params) => Self::InsertLine(single(params)),
            (b'M', params) => Self::DeleteLine(single(params)),
            (b'P', params) => Self::DeleteCharacter(single(params)),
            (b'X', params) => Self::EraseCharacters(single(params)),
            (b'g', params) => Self::TabClear(single(params)),
            (b'r', params) => {
                let (top, bottom) = pair(params);
                Self::SetTopAndBottomMargin(top, bottom)
            },
            (b'x', params) => Self::RequestTerminalParameters(single(params)),
            _ => Self::Unspecified {
                params: raw_params.to_vec(),
                final_byte,
            },
        }
    }
}

pub(crate) fn perform<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    params: &[CsiParam],
    params_truncated: bool,
    byte: u8,
) {
    if params_truncated {
        return unexpected(params, byte);
    }

    let vt220 = performer.state.level == EmulationLevel::Vt220;

    match Csi::from((params, byte)) {
        Csi::InsertBlank(count) => {
            performer.screen.insert_blanks(count.max(1));
        },
        Csi::CursorUp(rows) => {
            performer.screen.cursor_up(rows.max(1), true);
        },
        Csi::CursorDown(rows) => {
            performer.screen.cursor_down(rows.max(1), true);
        },
        Csi::CursorForward(cols) => {
            performer.screen.cursor_right(cols.max(1), true);
        },
        Csi::CursorBackward(cols) => {
            performer.screen.cursor_left(cols.max(1), true);
        },
        Csi::CursorPosition(row, col)
        | Csi::HorizontalAndVerticalPosition(row, col) => {
            performer.cursor_address(row, col);
        },
        Csi::EraseDisplay { mode, selective } => {
            if selective && !vt220 {
                return unexpected(params, byte);
            }

            let mode = match mode {
                0 => ClearMode::Below,
                1 => ClearMode::Above,
                2 => ClearMode::All,
                _ => {
                    return unexpected(params, byte);
                },
            };

            erase_display(performer, mode, selective);
        },
        Csi::EraseLine { mode, selective } => {
            if selective && !vt220 {
                return unexpected(params, byte);
            }

            let mode = match mode {
                0 => LineClearMode::Right,
                1 => LineClearMode::Left,
                2 => LineClearMode::All,
                _ => {
                    return unexpected(params, byte);
                },
            };

            erase_line(performer, mode, selective);
        },
        Csi::InsertLine(count) => {
            let y = performer.screen.cursor_y();
            let top = performer.screen.scroll_region_top();
            let bottom = performer.screen.scroll_region_bottom();
            if y >= top && y <= bottom {
                performer.screen.scroll_region_down(y, bottom, count.max(1));
            }
        },
        Csi::DeleteLine(count) => {
            let y = performer.screen.cursor_y();
            let top = performer.screen.scroll_region_top();
            let bottom = performer.screen.scroll_region_bottom();
            if y >= top && y <= bottom {
                performer.screen.scroll_region_up(y, bottom, count.max(1));
            }
        },
        Csi::DeleteCharacter(count) => {
            performer.screen.delete_characters(count.max(1));
        },
        Csi::EraseCharacters(count) => {
            let x = performer.screen.cursor_x();
            let width = performer.screen.width();
            let end = x.saturating_add(count.max(1) - 1).min(width - 1);
            performer.screen.erase_line(x, end, false);
        },
        Csi::TabClear(mode_index) => {
            let mode = match mode_index {
                0 => TabClearMode::Current,
                3 => TabClearMode::All,
                _ => {
                    return unexpected(params, byte);
                },
            };

            match mode {
                TabClearMode::Current => performer.clear_tab_stop_at_cursor(),
                TabClearMode::All => performer.clear_all_tab_stops(),
            }
        },
        Csi::SetMode(modes) => {
            for mode in modes {
                update_mode(performer, mode, true);
            }
        },
        Csi::ResetMode(modes) => {
            for mode in modes {
                update_mode(performer, mode, false);
            }
        },
        Csi::SetModePrivate(modes) => {
            for mode in modes {
                update_private_mode(performer, mode, true);
            }
        },
        Csi::ResetModePrivate(modes) => {
            for mode in modes {
                update_private_mode(performer, mode, false);
            }
        },
        Csi::SelectGraphicRendition(values) => {
            select_graphic_rendition(performer, &values);
        },
        Csi::DeviceStatusReport { report, private } => {
            device_status_report(performer, report, private);
        },
        Csi::PrimaryDeviceAttributes => performer.primary_attributes(),
        Csi::SecondaryDeviceAttributes => {
            if vt220 {
                performer.reply_csi(">1;10;0c");
            }
        },
        Csi::TertiaryDeviceAttributes => {},
        Csi::SetTopAndBottomMargin(top, bottom) => {
            set_scroll_region(performer, top, bottom);
        },
        Csi::RequestTerminalParameters(request) => {
            if request <= 1 {
                performer
                    .reply_csi(&format!("{};1;1;128;128;1;0x", request + 2));
            } else {
                unexpected(params, byte);
            }
        },
        Csi::MediaCopy(code) => match code {
            5 => performer.state.printer_controller = true,
            4 => performer.state.printer_controller = false,
            _ => debug!("[ignored media copy] code: {code}"),
        },
        Csi::SetConformanceLevel(values) => {
            if vt220 {
                set_conformance_level(performer, &values);
            }
        },
        Csi::SelectCharacterProtection(request) => {
            if !vt220 {
                return unexpected(params, byte);
            }

            let mut attribute = performer.screen.attribute();
            attribute.set_protected(request == 1);
            performer.screen.set_attribute(attribute);
        },
        Csi::Unspecified { params, final_byte } => {
            unexpected(params.as_slice(), final_byte);
        },
    }
}

fn erase_display<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    mode: ClearMode,
    selective: bool,
) {
    let width = performer.screen.width();
    let height = performer.screen.height();

    match mode {
        ClearMode::Below => performer.erase_below(selective),
        ClearMode::Above => performer.erase_above(selective),
        ClearMode::All => {
            performer
                .screen
                .erase_screen(0, 0, height - 1, width - 1, selective);
        },
    }
}

fn erase_line<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    mode: LineClearMode,
    selective: bool,
) {
    let x = performer.screen.cursor_x();
    let width = performer.screen.width();

    match mode {
        LineClearMode::Right => {
            performer.screen.erase_line(x, width - 1, selective);
        },
        LineClearMode::Left => performer.screen.erase_line(0, x, selective),
        LineClearMode::All => {
            performer.screen.erase_line(0, width - 1, selective);
        },
    }
}

/// DECSTBM. Invalid margins are discarded; a valid region homes the
/// cursor.
fn set_scroll_region<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    top: u16,
    bottom: u16,
) {
    let height = performer.screen.height();
    let top = top.max(1);
    let bottom = if bottom == 0 { height } else { bottom };

    if top >= bottom || bottom > height {
        return;
    }

    performer.screen.set_scroll_region(top - 1, bottom - 1);
    performer.home();
}

fn update_mode<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    mode: Mode,
    enabled: bool,
) {
    let Mode::Named(named) = mode else {
        debug!("[ignored mode] {:?} -> {enabled}", mode.raw());
        return;
    };

    match named {
        NamedMode::KeyboardAction => {},
        NamedMode::Insert => performer.state.insert_mode = enabled,
        NamedMode::SendReceive => performer.state.local_echo = !enabled,
        NamedMode::LineFeedNewLine => {
            performer.state.new_line_mode = enabled;
        },
    }
}

fn update_private_mode<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    mode: PrivateMode,
    enabled: bool,
) {
    let vt220 = performer.state.level == EmulationLevel::Vt220;

    let PrivateMode::Named(named) = mode else {
        debug!("[ignored private mode] {:?} -> {enabled}", mode.raw());
        return;
    };

    match named {
        NamedPrivateMode::CursorKeys => {
            performer.state.application_arrows = enabled;
        },
        NamedPrivateMode::AnsiMode => {
            if enabled {
                performer.leave_vt52();
            } else {
                performer.enter_vt52();
            }
        },
        NamedPrivateMode::ColumnMode => {
            performer.state.column_132 = enabled;
            let columns = if enabled { 132 } else { 80 };
            performer.screen.set_columns(columns);

            let height = performer.screen.height();
            performer.screen.set_scroll_region(0, height - 1);
            performer.screen.erase_screen(
                0,
                0,
                height - 1,
                columns - 1,
                false,
            );
            performer.screen.cursor_position(0, 0);
        },
        NamedPrivateMode::SmoothScroll => {},
        NamedPrivateMode::ReverseVideo => {
            if performer.state.reverse_video != enabled {
                performer.state.reverse_video = enabled;
                if enabled {
                    performer.screen.invert_colors();
                } else {
                    performer.screen.deinvert_colors();
                }
            }
        },
        NamedPrivateMode::Origin => {
            performer.screen.set_origin_mode(enabled);
            performer.home();
        },
        NamedPrivateMode::LineWrap => performer.state.autowrap = enabled,
        NamedPrivateMode::AutoRepeat => {},
        NamedPrivateMode::ShowCursor => {
            if vt220 {
                performer.state.cursor_visible = enabled;
                if enabled {
                    performer.screen.cursor_on();
                } else {
                    performer.screen.cursor_off();
                }
            }
        },
        NamedPrivateMode::NationalReplacement => {},
    }
}

fn select_graphic_rendition<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    values: &[u16],
) {
    use crate::attributes::Rendition;

    let vt220 = performer.state.level == EmulationLevel::Vt220;
    let color = performer.state.config.enable_color;
    let mut attribute = performer.screen.attribute();

    for &value in values {
        match value {
            0 => attribute.reset(),
            1 => attribute.rendition |= Rendition::BOLD,
            4 => attribute.rendition |= Rendition::UNDERLINE,
            5 => attribute.rendition |= Rendition::BLINK,
            7 => attribute.rendition |= Rendition::REVERSE,
            22 if vt220 => attribute.rendition -= Rendition::BOLD,
            24 if vt220 => attribute.rendition -= Rendition::UNDERLINE,
            25 if vt220 => attribute.rendition -= Rendition::BLINK,
            27 if vt220 => attribute.rendition -= Rendition::REVERSE,
            30..=37 if color => {
                if let Some(fg) = Color::from_sgr_digit(value - 30) {
                    attribute.foreground = fg;
                }
            },
            38 | 39 if color => attribute.foreground = Color::Default,
            40..=47 if color => {
                if let Some(bg) = Color::from_sgr_digit(value - 40) {
                    attribute.background = bg;
                }
            },
            49 if color => attribute.background = Color::Default,
            other => debug!("[ignored sgr] {other}"),
        }
    }

    performer.screen.set_attribute(attribute);
}

fn device_status_report<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    report: u16,
    private: bool,
) {
    let vt220 = performer.state.level == EmulationLevel::Vt220;

    match (private, report) {
        (false, 5) => performer.reply_csi("0n"),
        (_, 6) => {
            let mut row = performer.screen.cursor_y() + 1;
            if performer.screen.origin_mode() {
                row = row.saturating_sub(performer.screen.scroll_region_top());
            }
            let col = performer.screen.cursor_x() + 1;

            if private {
                // DECXCPR, the extended report, exists on the VT220 only.
                if vt220 {
                    performer.reply_csi(&format!("?{row};{col}R"));
                }
            } else {
                performer.reply_csi(&format!("{row};{col}R"));
            }
        },
        // Printer status is a DEC-private report; there is no printer,
        // so it is never ready.
        (true, 15) => performer.reply_csi("?13n"),
        (true, 25) if vt220 => performer.reply_csi("?21n"),
        (true, 26) if vt220 => performer.reply_csi("?27;1n"),
        _ => debug!("[ignored dsr] report: {report}, private: {private}"),
    }
}

/// DECSCL. 61 selects VT100 operation, 62 native VT220 operation; the
/// second parameter picks the width of response control introducers.
fn set_conformance_level<S: Screen, H: Host>(
    performer: &mut Performer<'_, S, H>,
    values: &[u16],
) {
    match values.first().copied() {
        Some(61) => {
            performer.state.level = EmulationLevel::Vt100;
            performer.state.s8c1t = false;
        },
        Some(62) => {
            performer.state.level = EmulationLevel::Vt220;
            performer.state.s8c1t = !matches!(values.get(1).copied(), Some(1));
        },
        other => debug!("[ignored conformance level] {other:?}"),
    }
}

fn single(params: &[CsiParam]) -> u16 {
    parse_params(params)[0]
}

fn pair(params: &[CsiParam]) -> (u16, u16) {
    let values = parse_params(params);
    (values[0], values.get(1).copied().unwrap_or(0))
}

fn parse_params(params: &[CsiParam]) -> Vec<u16> {
    let mut values = Vec::new();
    let mut pending: Option<u16> = None;

    for param in params.iter() {
        match param {
            CsiParam::Integer(value) => {
                let parsed = if (0..=i64::from(u16::MAX)).contains(value) {
                    *value as u16
                } else {
                    0
                };
                pending = Some(parsed);
            },
            CsiParam::P(b';') => {
                values.push(pending.take().unwrap_or(0));
            },
            CsiParam::P(_) => {},
        }
    }

    if let Some(value) = pending {
        values.push(value);
    } else if values.is_empty() {
        values.push(0);
    }

    values
}

fn unexpected(params: &[CsiParam], byte: u8) {
    debug!("[unexpected csi] final: {:?}, params: {params:?}", byte as char);
}
