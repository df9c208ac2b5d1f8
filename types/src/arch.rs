use serde::{Deserialize, Serialize};
use std::fmt;

/// Processor families the hardware generator knows how to drive.
///
/// The value is fixed by the compilation target; there is no runtime
/// architecture detection beyond what the compiler target implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Aarch64,
    Unknown,
}

/// Hardware random instructions, one per supported family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Intel Secure Key `RDRAND`, success reported in CF.
    Rdrand,
    /// Armv8.5-A `RNDR` system register read, failure reported in Z.
    Rndr,
}

impl Arch {
    /// The architecture this crate was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else if cfg!(target_arch = "aarch64") {
            Arch::Aarch64
        } else if cfg!(target_arch = "arm") {
            Arch::Arm
        } else {
            Arch::Unknown
        }
    }

    /// Instruction used on this family, if the family has one at all.
    ///
    /// 32-bit ARM has no RNDR and reports `None`.
    pub fn instruction(&self) -> Option<Instruction> {
        match self {
            Arch::X86 | Arch::X86_64 => Some(Instruction::Rdrand),
            Arch::Aarch64 => Some(Instruction::Rndr),
            Arch::Arm | Arch::Unknown => None,
        }
    }

    /// Native register width in bits.
    pub fn word_bits(&self) -> u32 {
        match self {
            Arch::X86_64 | Arch::Aarch64 => 64,
            Arch::X86 | Arch::Arm => 32,
            Arch::Unknown => usize::BITS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Arm => "arm",
            Arch::Aarch64 => "aarch64",
            Arch::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Rdrand => write!(f, "RDRAND"),
            Instruction::Rndr => write!(f, "RNDR"),
        }
    }
}
