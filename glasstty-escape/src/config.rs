use serde::{Deserialize, Serialize};

/// Behavior knobs the outer shell exposes to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// String sent to the host in response to ENQ.
    pub answerback: String,
    /// Honor SGR color parameters. When off, 30-49 are ignored.
    pub enable_color: bool,
    /// Render NUL bytes as spaces instead of dropping them.
    pub display_null: bool,
    /// Backspace key sends BS; otherwise it sends DEL.
    pub hard_backspace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            answerback: "glasstty".to_string(),
            enable_color: true,
            display_null: false,
            hard_backspace: true,
        }
    }
}
