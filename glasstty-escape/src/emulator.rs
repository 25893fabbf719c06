use log::debug;

use glasstty_vte::{Actor as VtActor, CsiParam, Parser as VtParser};

use crate::attributes::CellAttributes;
use crate::charset::{Charset, CharsetIndex};
use crate::config::Config;
use crate::host::Host;
use crate::level::EmulationLevel;
use crate::screen::{DoubleHeight, Screen};
use crate::{control, csi, esc};

/// Largest display the default tab ruler covers. Reset re-derives the ruler
/// from the actual screen width.
const DEFAULT_TAB_RULER_WIDTH: u16 = 132;

/// Result of feeding one byte to the emulator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Emit {
    /// Byte consumed; nothing to render.
    #[default]
    None,
    /// A code point to place at the cursor, respecting the insert and
    /// autowrap modes in force.
    Char(char),
}

/// DECSC snapshot. Restoring without one loads the documented defaults.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SavedCursor {
    row: u16,
    col: u16,
    attribute: CellAttributes,
    origin_mode: bool,
    charsets: [Charset; 4],
    gr_charset: Charset,
    lockshift_gl: Option<CharsetIndex>,
    lockshift_gr: Option<CharsetIndex>,
    autowrap: bool,
}

/// Mode and character-set state owned by the emulator. The cursor, the
/// scrolling region, origin mode and the attribute word live on the screen
/// side; everything else is here.
pub(crate) struct EmulatorState {
    pub config: Config,
    pub level: EmulationLevel,
    pub vt52: bool,
    pub vt52_graphics: bool,
    pub charsets: [Charset; 4],
    pub gr_charset: Charset,
    pub shift_out: bool,
    pub single_shift: Option<CharsetIndex>,
    pub lockshift_gl: Option<CharsetIndex>,
    pub lockshift_gr: Option<CharsetIndex>,
    pub s8c1t: bool,
    pub insert_mode: bool,
    pub new_line_mode: bool,
    pub autowrap: bool,
    pub application_keypad: bool,
    pub application_arrows: bool,
    pub reverse_video: bool,
    pub column_132: bool,
    pub local_echo: bool,
    pub cursor_visible: bool,
    pub printer_controller: bool,
    pub tab_stops: Vec<u16>,
    pub saved: Option<SavedCursor>,
}

impl EmulatorState {
    fn new(config: Config) -> Self {
        Self {
            config,
            level: EmulationLevel::default(),
            vt52: false,
            vt52_graphics: false,
            charsets: default_charsets(),
            gr_charset: Charset::DecSupplemental,
            shift_out: false,
            single_shift: None,
            lockshift_gl: None,
            lockshift_gr: None,
            s8c1t: false,
            insert_mode: false,
            new_line_mode: false,
            autowrap: true,
            application_keypad: false,
            application_arrows: false,
            reverse_video: false,
            column_132: false,
            local_echo: true,
            cursor_visible: true,
            printer_controller: false,
            tab_stops: default_tab_stops(DEFAULT_TAB_RULER_WIDTH),
            saved: None,
        }
    }

    /// Everything back to power-on defaults except the configuration and
    /// the emulation level.
    fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        let level = self.level;
        *self = Self::new(config);
        self.level = level;
    }
}

fn default_charsets() -> [Charset; 4] {
    [
        Charset::Ascii,
        Charset::DecLineDrawing,
        Charset::Ascii,
        Charset::Ascii,
    ]
}

fn default_tab_stops(width: u16) -> Vec<u16> {
    (8..width).step_by(8).collect()
}

/// A VT100/VT102/VT220 terminal without a screen of its own.
///
/// The emulator owns the parser and every mode register; the display grid
/// and the byte channel back to the host are borrowed per call. One byte in,
/// at most one printable code point out; everything else happens through the
/// [`Screen`] operations and the [`Host`] sink.
pub struct Emulator {
    parser: VtParser,
    state: EmulatorState,
}

impl Emulator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut emulator = Self {
            parser: VtParser::new(),
            state: EmulatorState::new(config),
        };
        emulator.sync_parser();
        emulator
    }

    /// Consume one byte received from the host.
    pub fn feed_byte<S: Screen, H: Host>(
        &mut self,
        byte: u8,
        screen: &mut S,
        host: &mut H,
    ) -> Emit {
        let emit = {
            let mut performer = Performer {
                state: &mut self.state,
                screen,
                host,
                emit: Emit::None,
            };
            self.parser.advance(std::slice::from_ref(&byte), &mut performer);
            performer.emit
        };

        self.sync_parser();
        emit
    }

    /// Consume a chunk of bytes, placing emitted characters on the screen.
    pub fn advance<S: Screen, H: Host>(
        &mut self,
        bytes: &[u8],
        screen: &mut S,
        host: &mut H,
    ) {
        for &byte in bytes {
            if let Emit::Char(c) = self.feed_byte(byte, screen, host) {
                screen.print_character(
                    c,
                    self.state.insert_mode,
                    self.state.autowrap,
                );
            }
        }
    }

    /// Hard terminal reset (RIS).
    pub fn reset<S: Screen>(&mut self, screen: &mut S) {
        self.parser.reset();
        full_reset(&mut self.state, screen);
        self.sync_parser();
    }

    /// Switch the emulated terminal. Leaves the VT52 submode and abandons
    /// any sequence in flight.
    pub fn set_emulation_level(&mut self, level: EmulationLevel) {
        self.state.level = level;
        self.state.vt52 = false;
        self.state.vt52_graphics = false;
        self.parser.reset();
        self.sync_parser();
    }

    fn sync_parser(&mut self) {
        self.parser
            .set_strip_high_bit(self.state.level.strips_high_bit());
        self.parser.set_vt52(self.state.vt52);
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    pub fn level(&self) -> EmulationLevel {
        self.state.level
    }

    /// Whether the transient VT52 submode is active.
    pub fn vt52_mode(&self) -> bool {
        self.state.vt52
    }

    /// DECCKM: arrow keys send application prefixes.
    pub fn application_arrows(&self) -> bool {
        self.state.application_arrows
    }

    /// DECKPAM/DECKPNM: keypad sends application sequences.
    pub fn application_keypad(&self) -> bool {
        self.state.application_keypad
    }

    /// LNM.
    pub fn new_line_mode(&self) -> bool {
        self.state.new_line_mode
    }

    /// IRM.
    pub fn insert_mode(&self) -> bool {
        self.state.insert_mode
    }

    /// DECAWM.
    pub fn autowrap(&self) -> bool {
        self.state.autowrap
    }

    /// SRM: whether keystrokes echo locally.
    pub fn local_echo(&self) -> bool {
        self.state.local_echo
    }

    /// DECTCEM.
    pub fn cursor_visible(&self) -> bool {
        self.state.cursor_visible
    }

    /// Printable output is being discarded for the (absent) printer.
    pub fn printer_controller(&self) -> bool {
        self.state.printer_controller
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Per-byte execution context binding the emulator state to the borrowed
/// screen and host. The sequence handlers in [`control`], [`esc`] and
/// [`csi`] all run against this.
pub(crate) struct Performer<'a, S: Screen, H: Host> {
    pub state: &'a mut EmulatorState,
    pub screen: &'a mut S,
    pub host: &'a mut H,
    pub emit: Emit,
}

impl<S: Screen, H: Host> VtActor for Performer<'_, S, H> {
    fn print(&mut self, c: char) {
        self.print_char(c);
    }

    fn execute(&mut self, byte: u8) {
        control::perform(self, byte);
    }

    fn hook(
        &mut self,
        params: &[i64],
        intermediates: &[u8],
        _ignored_excess_intermediates: bool,
        byte: u8,
    ) {
        // DCS payloads (DECUDK, sixel) are tracked but not interpreted.
        debug!(
            "[ignored dcs] params: {params:?}, intermediates: \
             {intermediates:?}, final: {byte:?}"
        );
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, params: &[&[u8]]) {
        debug!("[ignored osc] params: {params:?}");
    }

    fn csi_dispatch(
        &mut self,
        params: &[CsiParam],
        parameters_truncated: bool,
        byte: u8,
    ) {
        csi::perform(self, params, parameters_truncated, byte);
    }

    fn esc_dispatch(
        &mut self,
        intermediates: &[u8],
        _ignored_excess_intermediates: bool,
        byte: u8,
    ) {
        esc::perform(self, intermediates, byte);
    }

    fn vt52_address(&mut self, row: u8, col: u8) {
        // The address bytes carry a 0x20 offset and arrive unvalidated;
        // clamp to the display rather than run off it.
        let row = u16::from(row.saturating_sub(0x20))
            .min(self.screen.height().saturating_sub(1));
        let col = u16::from(col.saturating_sub(0x20))
            .min(self.screen.width().saturating_sub(1));
        self.screen.cursor_position(row, col);
    }
}

impl<S: Screen, H: Host> Performer<'_, S, H> {
    /// Printable-byte pipeline: consume any pending single shift, pick the
    /// half-plane character set and map to a glyph. The result is handed
    /// back to the caller through [`Emit`]; nothing is placed here.
    fn print_char(&mut self, c: char) {
        if self.state.printer_controller {
            return;
        }

        let single_shift = self.state.single_shift.take();

        let code = c as u32;
        let mapped = if code >= 0xa0 {
            let index = (code - 0x80) as u8 as char;
            self.gr_charset().map(index)
        } else if self.state.vt52 && self.state.vt52_graphics {
            Charset::Vt52Graphics.map(c)
        } else {
            let index = single_shift
                .or(self.state.lockshift_gl)
                .unwrap_or(if self.state.shift_out {
                    CharsetIndex::G1
                } else {
                    CharsetIndex::G0
                });
            self.state.charsets[index as usize].map(c)
        };

        self.emit = Emit::Char(mapped);
    }

    fn gr_charset(&self) -> Charset {
        match self.state.lockshift_gr {
            Some(index) => self.state.charsets[index as usize],
            None => self.state.gr_charset,
        }
    }

    /// Send a control-sequence response, using the single-byte CSI
    /// introducer when the host asked for 8-bit controls.
    pub(crate) fn reply_csi(&mut self, tail: &str) {
        if self.state.s8c1t && self.state.level == EmulationLevel::Vt220 {
            self.host.write_back(&[0x9b]);
        } else {
            self.host.write_back(b"\x1b[");
        }
        self.host.write_back(tail.as_bytes());
    }

    /// Move the cursor to a 1-based position from the host, converting to
    /// the display's coordinates. In origin mode the row is relative to
    /// the scrolling region and cannot leave it.
    pub(crate) fn cursor_address(&mut self, row: u16, col: u16) {
        let row = row.max(1);
        let col = col.max(1);

        let col = (col - 1).min(self.screen.width().saturating_sub(1));
        let row = if self.screen.origin_mode() {
            self.screen
                .scroll_region_top()
                .saturating_add(row - 1)
                .min(self.screen.scroll_region_bottom())
        } else {
            (row - 1).min(self.screen.height().saturating_sub(1))
        };

        self.screen.cursor_position(row, col);
    }

    pub(crate) fn home(&mut self) {
        self.cursor_address(1, 1);
    }

    /// HT: advance to the next tab stop, or the right edge if there is
    /// none.
    pub(crate) fn horizontal_tab(&mut self) {
        let x = self.screen.cursor_x();
        let y = self.screen.cursor_y();
        let width = self.screen.width();

        let next = self
            .state
            .tab_stops
            .iter()
            .copied()
            .find(|&stop| stop > x && stop < width);

        self.screen.cursor_position(y, next.unwrap_or(width - 1));
    }

    /// HTS: remember a stop at the cursor column, keeping the ruler
    /// sorted and free of duplicates.
    pub(crate) fn set_tab_stop(&mut self) {
        let x = self.screen.cursor_x();
        if let Err(pos) = self.state.tab_stops.binary_search(&x) {
            self.state.tab_stops.insert(pos, x);
        }
    }

    pub(crate) fn clear_tab_stop_at_cursor(&mut self) {
        let x = self.screen.cursor_x();
        if let Ok(pos) = self.state.tab_stops.binary_search(&x) {
            self.state.tab_stops.remove(pos);
        }
    }

    pub(crate) fn clear_all_tab_stops(&mut self) {
        self.state.tab_stops.clear();
    }

    pub(crate) fn save_cursor(&mut self) {
        self.state.saved = Some(SavedCursor {
            row: self.screen.cursor_y(),
            col: self.screen.cursor_x(),
            attribute: self.screen.attribute(),
            origin_mode: self.screen.origin_mode(),
            charsets: self.state.charsets,
            gr_charset: self.state.gr_charset,
            lockshift_gl: self.state.lockshift_gl,
            lockshift_gr: self.state.lockshift_gr,
            autowrap: self.state.autowrap,
        });
    }

    /// DECRC. Without a prior DECSC this is not an error; the documented
    /// defaults load instead.
    pub(crate) fn restore_cursor(&mut self) {
        match self.state.saved {
            Some(saved) => {
                self.screen.set_origin_mode(saved.origin_mode);
                self.screen.set_attribute(saved.attribute);
                let row =
                    saved.row.min(self.screen.height().saturating_sub(1));
                let col =
                    saved.col.min(self.screen.width().saturating_sub(1));
                self.screen.cursor_position(row, col);
                self.state.charsets = saved.charsets;
                self.state.gr_charset = saved.gr_charset;
                self.state.lockshift_gl = saved.lockshift_gl;
                self.state.lockshift_gr = saved.lockshift_gr;
                if self.state.level == EmulationLevel::Vt220 {
                    self.state.autowrap = saved.autowrap;
                }
            },
            None => {
                self.screen.set_origin_mode(false);
                self.screen.set_attribute(CellAttributes::default());
                self.screen.cursor_position(0, 0);
                self.state.charsets = default_charsets();
                self.state.gr_charset = Charset::DecSupplemental;
                self.state.lockshift_gl = None;
                self.state.lockshift_gr = None;
            },
        }
    }

    /// RI: move up one row, scrolling the region down when the cursor is
    /// already on its top row.
    pub(crate) fn reverse_index(&mut self) {
        let y = self.screen.cursor_y();
        let top = self.screen.scroll_region_top();

        if y == top {
            let bottom = self.screen.scroll_region_bottom();
            self.screen.scroll_region_down(top, bottom, 1);
        } else {
            self.screen.cursor_up(1, true);
        }
    }

    /// Primary DA. Shared between `CSI c` and the obsolete `ESC Z`.
    pub(crate) fn primary_attributes(&mut self) {
        let tail = self.state.level.primary_attributes();
        self.reply_csi(tail);
    }

    /// Erase from the cursor to the end of the display, cursor line
    /// included from the cursor column on.
    pub(crate) fn erase_below(&mut self, honor_protected: bool) {
        let x = self.screen.cursor_x();
        let y = self.screen.cursor_y();
        let width = self.screen.width();
        let height = self.screen.height();

        self.screen.erase_line(x, width - 1, honor_protected);
        if y + 1 < height {
            self.screen.erase_screen(
                y + 1,
                0,
                height - 1,
                width - 1,
                honor_protected,
            );
        }
    }

    /// Erase from the start of the display to the cursor inclusive.
    pub(crate) fn erase_above(&mut self, honor_protected: bool) {
        let x = self.screen.cursor_x();
        let y = self.screen.cursor_y();
        let width = self.screen.width();

        if y > 0 {
            self.screen.erase_screen(0, 0, y - 1, width - 1, honor_protected);
        }
        self.screen.erase_line(0, x, honor_protected);
    }

    /// DECALN: flood the display with `E`, cursor staying put.
    pub(crate) fn screen_alignment(&mut self) {
        let x = self.screen.cursor_x();
        let y = self.screen.cursor_y();

        for row in 0..self.screen.height() {
            for col in 0..self.screen.width() {
                self.screen.cursor_position(row, col);
                self.screen.print_character('E', false, false);
            }
        }

        self.screen.cursor_position(y, x);
    }

    pub(crate) fn enter_vt52(&mut self) {
        self.state.vt52 = true;
        self.state.vt52_graphics = false;
    }

    pub(crate) fn leave_vt52(&mut self) {
        self.state.vt52 = false;
        self.state.vt52_graphics = false;
    }

    pub(crate) fn full_reset(&mut self) {
        full_reset(self.state, self.screen);
    }
}

/// RIS. Shared between `ESC c` and [`Emulator::reset`].
fn full_reset<S: Screen>(state: &mut EmulatorState, screen: &mut S) {
    state.reset();
    state.tab_stops = default_tab_stops(screen.width());

    screen.set_attribute(CellAttributes::default());
    screen.set_origin_mode(false);
    screen.set_scroll_region(0, screen.height().saturating_sub(1));
    screen.deinvert_colors();
    screen.set_double_width(false);
    screen.set_double_height(DoubleHeight::None);
    screen.erase_screen(
        0,
        0,
        screen.height().saturating_sub(1),
        screen.width().saturating_sub(1),
        false,
    );
    screen.cursor_position(0, 0);
    screen.cursor_on();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Color, Rendition};
    use crate::testing::TestScreen;

    struct Term {
        emulator: Emulator,
        screen: TestScreen,
        host: Vec<u8>,
    }

    impl Term {
        fn new() -> Self {
            Self::with_config(Config::default())
        }

        fn with_config(config: Config) -> Self {
            Self {
                emulator: Emulator::new(config),
                screen: TestScreen::new(80, 24),
                host: Vec::new(),
            }
        }

        fn with_level(level: EmulationLevel) -> Self {
            let mut term = Self::new();
            term.emulator.set_emulation_level(level);
            term
        }

        fn feed(&mut self, bytes: &[u8]) {
            self.emulator
                .advance(bytes, &mut self.screen, &mut self.host);
        }

        fn cursor(&self) -> (u16, u16) {
            (self.screen.cursor_y(), self.screen.cursor_x())
        }
    }

    #[test]
    fn clear_screen_and_home() {
        let mut term = Term::new();
        term.feed(b"junk");
        term.feed(b"\x1b[2J\x1b[H");

        assert!(term.screen.is_blank());
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn cup_then_print() {
        let mut term = Term::new();
        term.feed(b"\x1b[2;3HABC");

        assert_eq!(term.screen.ch(1, 2), 'A');
        assert_eq!(term.screen.ch(1, 3), 'B');
        assert_eq!(term.screen.ch(1, 4), 'C');
        assert_eq!(term.cursor(), (1, 5));
    }

    #[test]
    fn origin_mode_pins_cursor_to_region() {
        let mut term = Term::new();
        term.feed(b"\x1b[?6h\x1b[5;10r\x1b[1;1HX");

        assert_eq!(term.screen.ch(4, 0), 'X');
        assert_eq!(term.screen.cursor_y(), 4);

        // CUU cannot leave the region through the top.
        term.feed(b"\x1b[5A");
        assert_eq!(term.screen.cursor_y(), 4);

        // Nor can CUP address below it.
        term.feed(b"\x1b[99;1H");
        assert_eq!(term.screen.cursor_y(), 9);
    }

    #[test]
    fn cursor_position_report() {
        let mut term = Term::new();
        term.feed(b"\x1b[5;10H\x1b[6n");

        assert_eq!(term.host, b"\x1b[5;10R");
    }

    #[test]
    fn cursor_position_report_is_origin_relative() {
        let mut term = Term::new();
        term.feed(b"\x1b[?6h\x1b[5;10r\x1b[2;1H\x1b[6n");

        assert_eq!(term.host, b"\x1b[2;1R");
    }

    #[test]
    fn primary_device_attributes_per_level() {
        let mut term = Term::with_level(EmulationLevel::Vt100);
        term.feed(b"\x1b[c");
        assert_eq!(term.host, b"\x1b[?1;2c");

        let mut term = Term::with_level(EmulationLevel::Vt102);
        term.feed(b"\x1b[c");
        assert_eq!(term.host, b"\x1b[?6c");

        let mut term = Term::new();
        term.feed(b"\x1b[c");
        assert_eq!(term.host, b"\x1b[?62;1;6c");
    }

    #[test]
    fn eight_bit_controls_change_response_introducer() {
        let mut term = Term::new();
        term.feed(b"\x1b G\x1b[c");
        assert_eq!(term.host, b"\x9b?62;1;6c");

        term.host.clear();
        term.feed(b"\x1b F\x1b[c");
        assert_eq!(term.host, b"\x1b[?62;1;6c");
    }

    #[test]
    fn own_attributes_response_parses_cleanly() {
        let mut term = Term::new();
        term.feed(b"\x1b[c");

        let response = term.host.clone();
        let mut peer = Term::new();
        peer.feed(&response);

        assert!(peer.screen.is_blank());
        assert_eq!(peer.cursor(), (0, 0));
    }

    #[test]
    fn secondary_device_attributes() {
        let mut term = Term::new();
        term.feed(b"\x1b[>c");
        assert_eq!(term.host, b"\x1b[>1;10;0c");

        // No such report on a VT102.
        let mut term = Term::with_level(EmulationLevel::Vt102);
        term.feed(b"\x1b[>c");
        assert!(term.host.is_empty());
    }

    #[test]
    fn obsolete_decid_reports_attributes() {
        let mut term = Term::new();
        term.feed(b"\x1bZ");
        assert_eq!(term.host, b"\x1b[?62;1;6c");
    }

    #[test]
    fn drawing_charset_designation() {
        let mut term = Term::new();
        term.feed(b"\x1b(0abc\x1b(B");

        assert_eq!(term.screen.ch(0, 0), '▒');
        assert_eq!(term.screen.ch(0, 1), '\u{2409}');
        assert_eq!(term.screen.ch(0, 2), '\u{240c}');

        term.feed(b"a");
        assert_eq!(term.screen.ch(0, 3), 'a');
    }

    #[test]
    fn shift_out_selects_g1() {
        let mut term = Term::new();
        // G1 holds the drawing set by default.
        term.feed(b"\x0eq\x0fq");

        assert_eq!(term.screen.ch(0, 0), '─');
        assert_eq!(term.screen.ch(0, 1), 'q');
    }

    #[test]
    fn single_shift_covers_one_character() {
        let mut term = Term::new();
        term.feed(b"\x1b*0\x1bNaa");

        assert_eq!(term.screen.ch(0, 0), '▒');
        assert_eq!(term.screen.ch(0, 1), 'a');
    }

    #[test]
    fn lock_shift_persists_until_replaced() {
        let mut term = Term::new();
        term.feed(b"\x1b*0\x1bnqq");

        assert_eq!(term.screen.ch(0, 0), '─');
        assert_eq!(term.screen.ch(0, 1), '─');

        term.feed(b"\x0fq");
        assert_eq!(term.screen.ch(0, 2), 'q');
    }

    #[test]
    fn gr_prints_through_the_supplemental_set() {
        let mut term = Term::new();
        term.feed(&[0xe1]);
        assert_eq!(term.screen.ch(0, 0), 'á');
    }

    #[test]
    fn gr_lock_shift_replaces_the_supplemental_set() {
        let mut term = Term::new();
        // LS2R with the drawing set in G2.
        term.feed(b"\x1b*0\x1b}");
        term.feed(&[0xf1]);
        assert_eq!(term.screen.ch(0, 0), '─');
    }

    #[test]
    fn vt100_strips_the_high_bit() {
        let mut term = Term::with_level(EmulationLevel::Vt100);
        term.feed(&[0xc1]);
        assert_eq!(term.screen.ch(0, 0), 'A');
    }

    #[test]
    fn eight_bit_csi_introducer() {
        let mut term = Term::new();
        term.feed(&[0x9b]);
        term.feed(b"2;3H");
        assert_eq!(term.cursor(), (1, 2));
    }

    #[test]
    fn save_restore_round_trip() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;31m\x1b[?6h\x1b[10;20r\x1b[3;7H\x1b(0\x1b7");

        let saved_attribute = term.screen.attribute();
        let saved_cursor = term.cursor();

        term.feed(b"\x1b[0m\x1b[?6l\x1b[1;1H\x1b(B");
        term.feed(b"\x1b8");

        assert_eq!(term.screen.attribute(), saved_attribute);
        assert_eq!(term.cursor(), saved_cursor);
        assert!(term.screen.origin_mode());

        // G0 still holds the drawing set.
        term.feed(b"a");
        assert_eq!(
            term.screen.ch(saved_cursor.0, saved_cursor.1),
            '▒'
        );
    }

    #[test]
    fn restore_without_save_loads_defaults() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;31m\x1b[?6h\x1b[5;8H");
        term.feed(b"\x1b8");

        assert_eq!(term.cursor(), (0, 0));
        assert_eq!(term.screen.attribute(), CellAttributes::default());
        assert!(!term.screen.origin_mode());
    }

    #[test]
    fn alignment_display_is_idempotent() {
        let mut term = Term::new();
        term.feed(b"\x1b[4;7H\x1b#8");

        assert_eq!(term.screen.ch(0, 0), 'E');
        assert_eq!(term.screen.ch(23, 79), 'E');
        assert_eq!(term.cursor(), (3, 6));

        let before: Vec<String> =
            (0..24).map(|row| term.screen.row_text(row)).collect();
        term.feed(b"\x1b#8");
        let after: Vec<String> =
            (0..24).map(|row| term.screen.row_text(row)).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn sgr_zero_matches_fresh_reset() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;4;5;7;31;44m\x1b[m");
        assert_eq!(term.screen.attribute(), CellAttributes::default());
    }

    #[test]
    fn sgr_sets_rendition_and_colors() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;4;31;44m");

        let attribute = term.screen.attribute();
        assert!(attribute.rendition.contains(Rendition::BOLD));
        assert!(attribute.rendition.contains(Rendition::UNDERLINE));
        assert_eq!(attribute.foreground, Color::Red);
        assert_eq!(attribute.background, Color::Blue);

        term.feed(b"\x1b[24;39m");
        let attribute = term.screen.attribute();
        assert!(!attribute.rendition.contains(Rendition::UNDERLINE));
        assert!(attribute.rendition.contains(Rendition::BOLD));
        assert_eq!(attribute.foreground, Color::Default);
    }

    #[test]
    fn sgr_colors_ignored_when_disabled() {
        let config = Config {
            enable_color: false,
            ..Config::default()
        };
        let mut term = Term::with_config(config);
        term.feed(b"\x1b[31;44m");

        assert_eq!(term.screen.attribute(), CellAttributes::default());
    }

    #[test]
    fn linefeed_scrolls_region_at_bottom() {
        let mut term = Term::new();
        term.feed(b"\x1b[5;10r");
        term.feed(b"\x1b[5;1HA");
        term.feed(b"\x1b[6;1HB");
        term.feed(b"\x1b[10;1H\n");

        // Region content moved up one row; row 0 is untouched.
        assert_eq!(term.screen.ch(4, 0), 'B');
        assert_eq!(term.screen.cursor_y(), 9);
    }

    #[test]
    fn reverse_index_scrolls_region_at_top() {
        let mut term = Term::new();
        term.feed(b"\x1b[5;10r");
        term.feed(b"\x1b[5;1HA");
        term.feed(b"\x1bM");

        assert_eq!(term.screen.ch(5, 0), 'A');
        assert_eq!(term.screen.ch(4, 0), ' ');
        assert_eq!(term.screen.cursor_y(), 4);
    }

    #[test]
    fn next_line_returns_the_carriage() {
        let mut term = Term::new();
        term.feed(b"\x1b[2;5H\x1bE");
        assert_eq!(term.cursor(), (2, 0));
    }

    #[test]
    fn insert_and_delete_lines_stay_inside_region() {
        let mut term = Term::new();
        term.feed(b"\x1b[5;10r");
        term.feed(b"\x1b[5;1HA");
        term.feed(b"\x1b[6;1HB");

        term.feed(b"\x1b[5;1H\x1b[L");
        assert_eq!(term.screen.ch(4, 0), ' ');
        assert_eq!(term.screen.ch(5, 0), 'A');
        assert_eq!(term.screen.ch(6, 0), 'B');

        term.feed(b"\x1b[M");
        assert_eq!(term.screen.ch(4, 0), 'A');
        assert_eq!(term.screen.ch(5, 0), 'B');

        // Outside the region IL is a no-op.
        term.feed(b"\x1b[1;1H\x1b[L");
        assert_eq!(term.screen.ch(4, 0), 'A');
    }

    #[test]
    fn insert_delete_erase_characters() {
        let mut term = Term::new();
        term.feed(b"ABCDEF\x1b[1;1H");

        term.feed(b"\x1b[2@");
        assert_eq!(term.screen.row_text(0), "  ABCDEF");

        term.feed(b"\x1b[2P");
        assert_eq!(term.screen.row_text(0), "ABCDEF");

        term.feed(b"\x1b[3X");
        assert_eq!(term.screen.row_text(0), "   DEF");
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn erase_line_variants() {
        let mut term = Term::new();
        term.feed(b"ABCDEF\x1b[1;3H");

        term.feed(b"\x1b[K");
        assert_eq!(term.screen.row_text(0), "AB");

        term.feed(b"\x1b[1;1HABCDEF\x1b[1;3H\x1b[1K");
        assert_eq!(term.screen.row_text(0), "   DEF");

        term.feed(b"\x1b[2K");
        assert_eq!(term.screen.row_text(0), "");
    }

    #[test]
    fn erase_display_below_and_above() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;1HAA\x1b[2;1HBB\x1b[3;1HCC");

        term.feed(b"\x1b[2;2H\x1b[J");
        assert_eq!(term.screen.row_text(0), "AA");
        assert_eq!(term.screen.row_text(1), "B");
        assert_eq!(term.screen.row_text(2), "");

        term.feed(b"\x1b[1J");
        assert_eq!(term.screen.row_text(0), "");
        assert_eq!(term.screen.row_text(1), "");
    }

    #[test]
    fn protected_cells_survive_selective_erase() {
        let mut term = Term::new();
        term.feed(b"\x1b[1\"qAB\x1b[0\"qCD");

        assert!(term.screen.attr_at(0, 0).protected());
        assert!(!term.screen.attr_at(0, 2).protected());

        term.feed(b"\x1b[?2J");

        assert_eq!(term.screen.row_text(0), "AB");

        term.feed(b"\x1b[2J");
        assert!(term.screen.is_blank());
    }

    #[test]
    fn selective_erase_needs_a_vt220() {
        let mut term = Term::with_level(EmulationLevel::Vt102);
        term.feed(b"AB\x1b[1;1H\x1b[?2J");
        assert_eq!(term.screen.row_text(0), "AB");
    }

    #[test]
    fn tab_stops_default_every_eight() {
        let mut term = Term::new();
        term.feed(b"\t");
        assert_eq!(term.screen.cursor_x(), 8);
        term.feed(b"\t");
        assert_eq!(term.screen.cursor_x(), 16);
    }

    #[test]
    fn tab_set_and_clear() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;4H\x1bH\r\t");
        assert_eq!(term.screen.cursor_x(), 3);

        // TBC 0 clears the stop under the cursor.
        term.feed(b"\x1b[g\r\t");
        assert_eq!(term.screen.cursor_x(), 8);

        // TBC 3 clears the ruler; HT runs to the right edge.
        term.feed(b"\x1b[3g\r\t");
        assert_eq!(term.screen.cursor_x(), 79);
    }

    #[test]
    fn insert_mode_shifts_the_line() {
        let mut term = Term::new();
        term.feed(b"AB\x1b[4h\x1b[1;1HC");
        assert_eq!(term.screen.row_text(0), "CAB");

        term.feed(b"\x1b[4l\x1b[1;1HD");
        assert_eq!(term.screen.row_text(0), "DAB");
    }

    #[test]
    fn newline_mode_returns_carriage_on_lf() {
        let mut term = Term::new();
        term.feed(b"AB\n");
        assert_eq!(term.cursor(), (1, 2));

        term.feed(b"\x1b[20hCD\n");
        assert_eq!(term.cursor(), (2, 0));
    }

    #[test]
    fn autowrap_can_be_disabled() {
        let mut term = Term::new();
        term.feed(b"\x1b[?7l\x1b[1;80HXY");
        assert_eq!(term.screen.ch(0, 79), 'Y');
        assert_eq!(term.cursor(), (0, 79));

        term.feed(b"\x1b[?7h\x1b[1;80HZW");
        assert_eq!(term.screen.ch(0, 79), 'Z');
        assert_eq!(term.screen.ch(1, 0), 'W');
    }

    #[test]
    fn reverse_video_toggles_once() {
        let mut term = Term::new();
        term.feed(b"\x1b[?5h\x1b[?5h");
        assert!(term.screen.inverted);
        term.feed(b"\x1b[?5l");
        assert!(!term.screen.inverted);
    }

    #[test]
    fn column_mode_clears_and_resizes() {
        let mut term = Term::new();
        term.feed(b"junk\x1b[5;10r\x1b[?3h");

        assert_eq!(term.screen.width(), 132);
        assert!(term.screen.is_blank());
        assert_eq!(term.cursor(), (0, 0));
        assert_eq!(term.screen.scroll_region_bottom(), 23);

        term.feed(b"\x1b[?3l");
        assert_eq!(term.screen.width(), 80);
    }

    #[test]
    fn cursor_visibility_is_a_vt220_mode() {
        let mut term = Term::new();
        term.feed(b"\x1b[?25l");
        assert!(!term.screen.cursor_shown);
        term.feed(b"\x1b[?25h");
        assert!(term.screen.cursor_shown);

        let mut term = Term::with_level(EmulationLevel::Vt100);
        term.feed(b"\x1b[?25l");
        assert!(term.screen.cursor_shown);
    }

    #[test]
    fn enquiry_sends_the_answerback() {
        let mut term = Term::new();
        term.feed(b"\x05");
        assert_eq!(term.host, b"glasstty");
    }

    #[test]
    fn bell_beeps() {
        let mut term = Term::new();
        term.feed(b"\x07\x07");
        assert_eq!(term.screen.beeps, 2);
    }

    #[test]
    fn null_byte_renders_only_when_configured() {
        let mut term = Term::new();
        term.feed(b"A\x00B");
        assert_eq!(term.screen.row_text(0), "AB");

        let config = Config {
            display_null: true,
            ..Config::default()
        };
        let mut term = Term::with_config(config);
        term.feed(b"A\x00B");
        assert_eq!(term.screen.ch(0, 1), ' ');
        assert_eq!(term.screen.ch(0, 2), 'B');
    }

    #[test]
    fn request_terminal_parameters() {
        let mut term = Term::new();
        term.feed(b"\x1b[x");
        assert_eq!(term.host, b"\x1b[2;1;1;128;128;1;0x");

        term.host.clear();
        term.feed(b"\x1b[1x");
        assert_eq!(term.host, b"\x1b[3;1;1;128;128;1;0x");
    }

    #[test]
    fn status_reports() {
        let mut term = Term::new();
        term.feed(b"\x1b[5n");
        assert_eq!(term.host, b"\x1b[0n");

        term.host.clear();
        term.feed(b"\x1b[?15n");
        assert_eq!(term.host, b"\x1b[?13n");

        // Printer status is private-only; the bare form says nothing.
        term.host.clear();
        term.feed(b"\x1b[15n");
        assert!(term.host.is_empty());

        term.host.clear();
        term.feed(b"\x1b[?25n");
        assert_eq!(term.host, b"\x1b[?21n");

        term.host.clear();
        term.feed(b"\x1b[?26n");
        assert_eq!(term.host, b"\x1b[?27;1n");
    }

    #[test]
    fn printer_controller_discards_output() {
        let mut term = Term::new();
        term.feed(b"\x1b[5iAB\x1b[4iC");

        assert_eq!(term.screen.row_text(0), "C");
        assert!(!term.emulator.printer_controller());
    }

    #[test]
    fn single_shift_survives_printer_controller() {
        let mut term = Term::new();
        term.feed(b"\x1b*0\x1bN\x1b[5ix\x1b[4ia");

        assert_eq!(term.screen.ch(0, 0), '▒');
    }

    #[test]
    fn conformance_level_switches_emulation() {
        let mut term = Term::new();
        term.feed(b"\x1b[61\"p");
        assert_eq!(term.emulator.level(), EmulationLevel::Vt100);

        // Back up to VT220 with 7-bit responses forced.
        let mut term = Term::new();
        term.feed(b"\x1b G\x1b[62;1\"p\x1b[c");
        assert_eq!(term.host, b"\x1b[?62;1;6c");

        let mut term = Term::new();
        term.feed(b"\x1b[62;2\"p\x1b[c");
        assert_eq!(term.host, b"\x9b?62;1;6c");
    }

    #[test]
    fn keypad_modes_follow_esc_equals() {
        let mut term = Term::new();
        term.feed(b"\x1b=");
        assert!(term.emulator.application_keypad());
        term.feed(b"\x1b>");
        assert!(!term.emulator.application_keypad());
    }

    #[test]
    fn double_size_lines_forward_to_the_screen() {
        let mut term = Term::new();
        term.feed(b"\x1b#3");
        assert_eq!(term.screen.double_height, DoubleHeight::Top);
        term.feed(b"\x1b#4");
        assert_eq!(term.screen.double_height, DoubleHeight::Bottom);
        term.feed(b"\x1b#6");
        assert!(term.screen.double_width);
        term.feed(b"\x1b#5");
        assert!(!term.screen.double_width);
    }

    #[test]
    fn full_reset_restores_power_on_state() {
        let mut term = Term::new();
        term.feed(b"\x1b[1;31mAB\x1b[?6h\x1b[5;10r\x1b[?25l\x1b[20h");
        term.feed(b"\x1bc");

        assert!(term.screen.is_blank());
        assert_eq!(term.cursor(), (0, 0));
        assert_eq!(term.screen.attribute(), CellAttributes::default());
        assert!(!term.screen.origin_mode());
        assert_eq!(term.screen.scroll_region_top(), 0);
        assert_eq!(term.screen.scroll_region_bottom(), 23);
        assert!(term.screen.cursor_shown);
        assert!(!term.emulator.new_line_mode());
    }

    #[test]
    fn feed_byte_emits_at_most_one_character() {
        let mut term = Term::new();
        let emit = term.emulator.feed_byte(
            b'A',
            &mut term.screen,
            &mut term.host,
        );
        assert_eq!(emit, Emit::Char('A'));

        let emit = term.emulator.feed_byte(
            0x1b,
            &mut term.screen,
            &mut term.host,
        );
        assert_eq!(emit, Emit::None);
    }

    #[test]
    fn malformed_csi_is_absorbed() {
        let mut term = Term::new();
        term.feed(b"\x1b[4:3mX");
        assert_eq!(term.screen.ch(0, 0), 'X');
        assert_eq!(term.screen.attribute(), CellAttributes::default());
    }

    #[test]
    fn can_aborts_a_sequence_cleanly() {
        let mut term = Term::new();
        term.feed(b"\x1b[2;\x18X");
        assert_eq!(term.screen.ch(0, 0), 'X');
    }

    mod vt52 {
        use super::*;

        fn vt52_term() -> Term {
            let mut term = Term::with_level(EmulationLevel::Vt100);
            term.feed(b"\x1b[?2l");
            assert!(term.emulator.vt52_mode());
            term
        }

        #[test]
        fn direct_cursor_address() {
            let mut term = vt52_term();
            term.feed(b"\x1bY");
            term.feed(&[0x20 + 5, 0x20 + 10]);
            assert_eq!(term.cursor(), (5, 10));
        }

        #[test]
        fn direct_cursor_address_clamps() {
            let mut term = vt52_term();
            term.feed(b"\x1bY\x7f\x7f");
            assert_eq!(term.cursor(), (23, 79));
        }

        #[test]
        fn cursor_steps_and_home() {
            let mut term = vt52_term();
            term.feed(b"\x1bB\x1bB\x1bC\x1bC\x1bC\x1bA\x1bD");
            assert_eq!(term.cursor(), (1, 2));
            term.feed(b"\x1bH");
            assert_eq!(term.cursor(), (0, 0));
        }

        #[test]
        fn graphics_charset() {
            let mut term = vt52_term();
            term.feed(b"\x1bFf\x1bGf");
            assert_eq!(term.screen.ch(0, 0), '°');
            assert_eq!(term.screen.ch(0, 1), 'f');
        }

        #[test]
        fn identify() {
            let mut term = vt52_term();
            term.feed(b"\x1bZ");
            assert_eq!(term.host, b"\x1b/Z");
        }

        #[test]
        fn erase_to_end_of_line_and_screen() {
            let mut term = vt52_term();
            term.feed(b"ABCD");
            term.feed(b"\x1bY");
            term.feed(&[0x20, 0x20 + 2]);
            term.feed(b"\x1bK");
            assert_eq!(term.screen.row_text(0), "AB");

            term.feed(b"\x1bJ");
            assert_eq!(term.screen.row_text(0), "AB");
            assert_eq!(term.screen.ch(0, 2), ' ');
        }

        #[test]
        fn leaves_to_ansi_mode() {
            let mut term = vt52_term();
            term.feed(b"\x1b<");
            assert!(!term.emulator.vt52_mode());

            // ANSI sequences work again and DA reflects the level.
            term.feed(b"\x1b[c");
            assert_eq!(term.host, b"\x1b[?1;2c");
        }

        #[test]
        fn reverse_linefeed() {
            let mut term = vt52_term();
            term.feed(b"A\x1bI");
            assert_eq!(term.screen.ch(1, 0), 'A');
            assert_eq!(term.screen.cursor_y(), 0);
        }

        #[test]
        fn alternate_keypad() {
            let mut term = vt52_term();
            term.feed(b"\x1b=");
            assert!(term.emulator.application_keypad());
            term.feed(b"\x1b>");
            assert!(!term.emulator.application_keypad());
        }
    }
}
