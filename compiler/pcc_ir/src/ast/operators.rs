//! Unary, binary and step operators.

/// Binary operators, including comparisons.
///
/// `&`, `|` and `^` share one precedence tier; the six comparisons share
/// the next one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Shift
    Shl,
    Shr,

    // Bitwise
    And,
    Or,
    Xor,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Register-register mnemonic for arithmetic, shift and bitwise operators.
    ///
    /// `%` and the comparisons lower to instruction sequences instead.
    pub const fn opcode(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("add"),
            Self::Sub => Some("sub"),
            Self::Mul => Some("mul"),
            Self::Div => Some("div"),
            Self::Shl => Some("shl"),
            Self::Shr => Some("shr"),
            Self::And => Some("and"),
            Self::Or => Some("or"),
            Self::Xor => Some("xor"),
            _ => None,
        }
    }

    /// Register-immediate mnemonic.
    pub const fn immediate_opcode(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("addi"),
            Self::Sub => Some("subi"),
            Self::Mul => Some("muli"),
            Self::Div => Some("divi"),
            Self::Shl => Some("sli"),
            Self::Shr => Some("sri"),
            Self::And => Some("andi"),
            Self::Or => Some("ori"),
            Self::Xor => Some("xori"),
            _ => None,
        }
    }

    /// Whether `a op b == b op a`, so a constant left operand may be moved
    /// into the immediate slot.
    pub const fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Mul | Self::And | Self::Or | Self::Xor | Self::Eq | Self::NotEq
        )
    }
}

/// Prefix operators other than `++`/`--`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `*x`
    Deref,
    /// `&x`
    AddrOf,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Deref => "*",
            Self::AddrOf => "&",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

/// `++x`, `--x`, `x++`, `x--`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StepOp {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl StepOp {
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::PreInc | Self::PreDec)
    }

    pub const fn is_increment(self) -> bool {
        matches!(self, Self::PreInc | Self::PostInc)
    }

    pub const fn as_symbol(self) -> &'static str {
        if self.is_increment() {
            "++"
        } else {
            "--"
        }
    }
}
