use crate::actor::Actor;
use crate::csi::CsiParam;
use crate::enums::{Action, State};
use crate::transitions;

const MAX_INTERMEDIATES: usize = 32;
const MAX_OSC_PARAMS: usize = 16;
const MAX_OSC_BYTES: usize = 1024;
const MAX_PARAMS: usize = 16;

#[derive(Debug)]
struct Params {
    items: [CsiParam; MAX_PARAMS],
    current: Option<CsiParam>,
    full: bool,
    idx: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            items: [CsiParam::default(); MAX_PARAMS],
            current: None,
            full: false,
            idx: 0,
        }
    }
}

impl Params {
    fn get(&self) -> &[CsiParam] {
        &self.items[..self.idx]
    }

    fn push(&mut self, param: CsiParam) {
        if self.idx >= MAX_PARAMS {
            self.full = true;
            return;
        }

        self.items[self.idx] = param;
        self.idx += 1;
    }

    fn finish(&mut self) {
        if let Some(val) = self.current.take() {
            self.push(val);
        }
    }

    fn clear(&mut self) {
        self.current.take();
        self.full = false;
        self.idx = 0;
        self.items = [CsiParam::default(); MAX_PARAMS];
    }
}

#[derive(Debug, Default)]
struct OscState {
    buffer: Vec<u8>,
    params: [usize; MAX_OSC_PARAMS],
    idx: usize,
    full: bool,
}

impl OscState {
    fn put(&mut self, byte: u8) {
        if byte == b';' {
            match self.idx {
                MAX_OSC_PARAMS => {
                    self.full = true;
                },
                num => {
                    self.params[num.saturating_sub(1)] = self.buffer.len();
                    self.idx += 1;
                },
            }

            return;
        }

        if self.full || self.buffer.len() >= MAX_OSC_BYTES {
            return;
        }

        self.buffer.push(byte);

        if self.idx == 0 {
            self.idx = 1;
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.idx = 0;
        self.full = false;
        self.params = Default::default();
    }
}

#[derive(Debug, Default)]
struct Intermediates {
    items: [u8; MAX_INTERMEDIATES],
    idx: usize,
    ignored_excess: bool,
}

impl Intermediates {
    fn get(&self) -> &[u8] {
        &self.items[..self.idx]
    }

    fn reset_index(&mut self) {
        self.idx = 0;
    }

    fn collect(&mut self, byte: u8) {
        if self.idx < MAX_INTERMEDIATES {
            self.items[self.idx] = byte;
            self.idx += 1;
        } else {
            self.ignored_excess = true;
        }
    }

    fn clear(&mut self) {
        self.reset_index();
        self.ignored_excess = false;
        self.items = Default::default();
    }
}

/// Byte-at-a-time DEC ANSI parser.
///
/// The driver owns the current [`State`] and the accumulation buffers; all
/// semantic work happens in the [`Actor`] callbacks. Two knobs adapt the
/// machine to the emulation in force:
///
/// * `strip_high_bit` — the 7-bit terminals (VT100/VT102) mask the top bit
///   of every incoming byte before dispatch, so C1 controls degrade to
///   their 7-bit aliases and GR printables fold onto GL.
/// * `vt52` — while the VT52 submode is active, `ESC Y` starts the
///   two-byte direct cursor address instead of dispatching a final.
#[derive(Default)]
pub struct Parser {
    state: State,
    intermediates: Intermediates,
    params: Params,
    osc: OscState,
    strip_high_bit: bool,
    vt52: bool,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask the top bit of every input byte before dispatch (VT100/VT102).
    pub fn set_strip_high_bit(&mut self, on: bool) {
        self.strip_high_bit = on;
    }

    /// Toggle the VT52 submode handling of `ESC Y`.
    pub fn set_vt52(&mut self, on: bool) {
        self.vt52 = on;
    }

    /// Abandon any in-progress sequence and return to ground.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.clear();
    }

    /// Advance the parser with a new chunk of bytes.
    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) {
        for &raw in bytes {
            let byte = if self.strip_high_bit { raw & 0x7f } else { raw };

            let (next_state, action) =
                transitions::transit(self.state, byte, self.vt52);

            if self.state == next_state {
                self.perform(action, byte, actor);
                continue;
            }

            self.perform(transitions::exit_action(self.state), 0, actor);
            self.perform(action, byte, actor);
            self.perform(transitions::entry_action(next_state), byte, actor);

            self.state = next_state;
        }
    }

    fn perform<A: Actor>(&mut self, action: Action, byte: u8, actor: &mut A) {
        use Action::*;

        match action {
            Print => actor.print(byte as char),
            Execute => actor.execute(byte),
            Put => actor.put(byte),
            CsiDispatch => self.csi_dispatch(actor, byte),
            EscDispatch => self.esc_dispatch(actor, byte),
            Vt52Dispatch => self.vt52_dispatch(actor, byte),
            Param => self.handle_param_byte(byte),
            Clear => self.clear(),
            Collect => self.intermediates.collect(byte),
            Hook => self.hook(actor, byte),
            Unhook => actor.unhook(),
            OscStart => self.osc.clear(),
            OscPut => self.osc.put(byte),
            OscEnd => self.osc_dispatch(actor),
            None | Ignore => {},
        }
    }

    /// Promote early intermediates to parameters.
    ///
    /// This handles sequences such as DECSET that use `?` prior to other
    /// numeric parameters. `?` is technically in the intermediate range
    /// and shouldn't appear in the parameter position according to
    /// ECMA 48.
    fn promote_intermediates_to_params(&mut self) {
        if self.intermediates.idx > 0 {
            for i in 0..self.intermediates.idx {
                if self.params.full {
                    self.intermediates.ignored_excess = true;
                    break;
                }
                self.params.push(CsiParam::P(self.intermediates.items[i]));
            }
            self.intermediates.reset_index();
        }
    }

    fn handle_param_byte(&mut self, byte: u8) {
        if self.params.full {
            return;
        }

        self.promote_intermediates_to_params();

        if byte.is_ascii_digit() {
            let digit = (byte - b'0') as i64;
            match self.params.current.take() {
                Some(CsiParam::Integer(value)) => {
                    let updated =
                        value.saturating_mul(10).saturating_add(digit);
                    self.params.current.replace(CsiParam::Integer(updated));
                },
                Some(param) => {
                    debug_assert!(false, "unexpected param: {param:?}");
                },
                None => {
                    self.params.current.replace(CsiParam::Integer(digit));
                },
            }
        } else {
            self.params.finish();
            self.params.push(CsiParam::P(byte));
        }
    }

    fn hook<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        self.params.finish();
        let integers: Vec<i64> = self
            .params
            .get()
            .iter()
            .map(|param| match param {
                CsiParam::Integer(val) => *val,
                CsiParam::P(_) => 0,
            })
            .collect();

        actor.hook(
            &integers,
            self.intermediates.get(),
            self.intermediates.ignored_excess,
            byte,
        );
    }

    fn csi_dispatch<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        self.params.finish();
        self.promote_intermediates_to_params();
        actor.csi_dispatch(
            self.params.get(),
            self.intermediates.ignored_excess,
            byte,
        );
    }

    fn esc_dispatch<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        actor.esc_dispatch(
            self.intermediates.get(),
            self.intermediates.ignored_excess,
            byte,
        );
    }

    fn vt52_dispatch<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        let row = self.intermediates.get().first().copied().unwrap_or(0x20);
        actor.vt52_address(row, byte);
    }

    fn osc_dispatch<A: Actor>(&mut self, actor: &mut A) {
        if self.osc.idx == 0 {
            actor.osc_dispatch(&[]);
            return;
        }

        let mut buffer = self.osc.buffer.as_slice();
        let limit = self.osc.idx.min(MAX_OSC_PARAMS);

        let mut params: Vec<&[u8]> = Vec::with_capacity(limit);
        let mut offset = 0usize;

        for &end in &self.osc.params[..limit - 1] {
            let (a, b) = buffer.split_at(end - offset);
            params.push(a);
            buffer = b;
            offset = end;
        }

        params.push(buffer);
        actor.osc_dispatch(&params[..limit]);
    }

    fn clear(&mut self) {
        self.intermediates.clear();
        self.params.clear();
        self.osc.clear();
    }
}
