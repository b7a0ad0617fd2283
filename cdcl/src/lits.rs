// ------
// Variables and literals
// ------

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub i32);

impl Var {
    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

/// Literal encoded as `2 * var + sign`. `sign` is set for the negated literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(pub i32);

impl Lit {
    pub fn new(Var(var): Var, sign: bool) -> Lit {
        Lit(2 * var + sign as i32)
    }

    pub fn sign(&self) -> bool {
        (self.0 & 1) != 0
    }

    pub fn var(&self) -> Var {
        Var(self.0 >> 1)
    }

    /// Position of the literal in literal-indexed maps (watch lists).
    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;
    fn not(self) -> Lit {
        Lit(self.0 ^ 1)
    }
}

pub const LIT_UNDEF: Lit = Lit(-2);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LBool {
    True,
    False,
    Undef,
}

impl LBool {
    pub fn from_bool(b: bool) -> LBool {
        if b {
            LBool::True
        } else {
            LBool::False
        }
    }

    /// Flip a defined value when `b` is set.
    pub fn xor(self, b: bool) -> LBool {
        match (self, b) {
            (LBool::Undef, _) | (_, false) => self,
            (LBool::True, true) => LBool::False,
            (LBool::False, true) => LBool::True,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            LBool::True => Some(true),
            LBool::False => Some(false),
            LBool::Undef => None,
        }
    }
}

impl Default for LBool {
    fn default() -> Self {
        LBool::Undef
    }
}
