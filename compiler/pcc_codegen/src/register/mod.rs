//! Target registers and the per-method register allocator.
//!
//! Allocation is first-free over a fixed pool: the twelve temporaries
//! `r1`..`r12`, then the fourteen argument-like registers `a0`..`a13`.
//! There is no spilling. Running out is reported by the caller.

use std::fmt;

use pcc_ir::Type;

/// A target register.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Reg {
    /// `r0`, always reads as zero.
    Zero,
    /// `r1`..`r12`.
    Temp(u8),
    /// `a0`..`a13`.
    Arg(u8),
    /// `r14`, the frame pointer.
    Frame,
    /// `r15`, the return address on method entry.
    ReturnAddress,
    /// Stands in for a value after an error. Never allocated.
    Invalid,
}

/// Allocation order. Bit `i` of [`RegisterFile`] tracks entry `i`.
const POOL: [Reg; 26] = [
    Reg::Temp(1),
    Reg::Temp(2),
    Reg::Temp(3),
    Reg::Temp(4),
    Reg::Temp(5),
    Reg::Temp(6),
    Reg::Temp(7),
    Reg::Temp(8),
    Reg::Temp(9),
    Reg::Temp(10),
    Reg::Temp(11),
    Reg::Temp(12),
    Reg::Arg(0),
    Reg::Arg(1),
    Reg::Arg(2),
    Reg::Arg(3),
    Reg::Arg(4),
    Reg::Arg(5),
    Reg::Arg(6),
    Reg::Arg(7),
    Reg::Arg(8),
    Reg::Arg(9),
    Reg::Arg(10),
    Reg::Arg(11),
    Reg::Arg(12),
    Reg::Arg(13),
];

impl Reg {
    fn pool_index(self) -> Option<usize> {
        POOL.iter().position(|&r| r == self)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Zero => f.write_str("r0"),
            Reg::Temp(n) => write!(f, "r{n}"),
            Reg::Arg(n) => write!(f, "a{n}"),
            Reg::Frame => f.write_str("r14"),
            Reg::ReturnAddress => f.write_str("r15"),
            Reg::Invalid => f.write_str("invalidRegister"),
        }
    }
}

/// Which pool registers are in use, one bit each.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct RegisterFile {
    used: u32,
}

impl RegisterFile {
    /// Number of allocatable registers.
    pub const CAPACITY: usize = POOL.len();

    pub fn new() -> Self {
        Self::default()
    }

    /// Take the first free register, `None` when all are in use.
    pub fn allocate(&mut self) -> Option<Reg> {
        let index = (0..Self::CAPACITY).find(|&i| self.used & (1 << i) == 0)?;
        self.used |= 1 << index;
        Some(POOL[index])
    }

    /// Return `reg` to the pool. Registers outside the pool are ignored.
    pub fn free(&mut self, reg: Reg) {
        if let Some(index) = reg.pool_index() {
            self.used &= !(1 << index);
        }
    }

    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// Number of registers currently allocated.
    pub fn allocated(&self) -> u32 {
        self.used.count_ones()
    }

    pub fn is_allocated(&self, reg: Reg) -> bool {
        reg.pool_index()
            .is_some_and(|index| self.used & (1 << index) != 0)
    }
}

/// A register together with the type of the value it holds.
///
/// For register-literal types the register holds the value itself; for
/// arrays and structs it holds the address of the value.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub reg: Reg,
    pub ty: Type,
}

impl Value {
    pub fn new(reg: Reg, ty: Type) -> Self {
        Value { reg, ty }
    }

    /// The error sentinel: `invalidRegister` of type `void`.
    pub fn invalid() -> Self {
        Value::new(Reg::Invalid, Type::Void)
    }
}

#[cfg(test)]
mod tests;
