//! Mapping between variable indices and literal codes. The encoding is the
//! one `cdcl` uses on the wire: `2 * var` for the positive literal and
//! `2 * var + 1` for the negative one.

use sattrait::{LitCode, VarIndex};

/// Largest variable index whose literals fit in a `LitCode`.
pub const MAX_VAR: VarIndex = (LitCode::MAX >> 1) as VarIndex;

pub fn positive(var: VarIndex) -> LitCode {
    debug_assert!(var <= MAX_VAR, "variable {} out of range", var);
    (var as LitCode) << 1
}

pub fn negative(var: VarIndex) -> LitCode {
    positive(var) | 1
}

/// Inverse of `positive`/`negative`: the variable and whether the literal is negative.
pub fn decode(code: LitCode) -> (VarIndex, bool) {
    ((code >> 1) as VarIndex, code & 1 != 0)
}
