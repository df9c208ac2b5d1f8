pub mod arch;
pub mod error_code;

pub use arch::{Arch, Instruction};
pub use error_code::ErrorCode;
