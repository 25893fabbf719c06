mod attributes;
mod charset;
mod config;
mod control;
mod csi;
mod emulator;
mod esc;
mod host;
mod keystroke;
mod level;
mod mode;
mod screen;

#[cfg(test)]
mod testing;

pub use attributes::{CellAttributes, Color, Rendition};
pub use charset::{Charset, CharsetIndex};
pub use config::Config;
pub use emulator::{Emit, Emulator};
pub use glasstty_vte as vte;
pub use host::Host;
pub use keystroke::{Key, encode};
pub use level::{EmulationLevel, ParseLevelError};
pub use mode::{
    ClearMode, LineClearMode, Mode, NamedMode, NamedPrivateMode, PrivateMode,
    TabClearMode,
};
pub use screen::{DoubleHeight, Screen};
