use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that stop the machine from making progress.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid opcode {opcode:#06X} at {address:#06X}")]
    InvalidOpcode { address: u16, opcode: u16 },

    #[error("stack underflow: RET at {address:#06X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("memory access out of bounds: {len} byte(s) at {address:#06X}")]
    MemoryOutOfBounds { address: usize, len: usize },

    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("invalid key {0:#04X}, keys are 0x0..=0xF")]
    InvalidKey(u8),

    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),
}
