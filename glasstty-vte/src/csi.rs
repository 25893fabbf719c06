/// One element of a CSI sequence's parameter list.
///
/// ECMA-48 frames a control sequence as `CSI P… I… F`: parameter bytes in
/// 0x30-0x3F, intermediate bytes in 0x20-0x2F, and one final byte in
/// 0x40-0x7E. The parser reduces each run of digits to a single
/// [`CsiParam::Integer`] and keeps every other parameter byte — the `;`
/// separator and the private markers `<`, `=`, `>`, `?` — in sequence
/// order as [`CsiParam::P`]. A consumer can therefore tell `CSI ? 6 h`
/// from `CSI 6 h`, and spot an omitted slot by the separators around it;
/// which default the empty slot stands for is the handler's business, not
/// the parser's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CsiParam {
    /// A run of decimal digits, saturated rather than wrapped when the
    /// host overdoes it.
    Integer(i64),
    /// Any non-digit parameter byte, unmodified.
    P(u8),
}

impl Default for CsiParam {
    fn default() -> Self {
        Self::Integer(0)
    }
}
