pub use chip8::Chip8;
pub use error::{Error, Result};
pub use instruction::{decode, Instruction, Trace, INSTRUCTION_SET};
pub use quirks::Quirks;
pub use state::{frame_to_text, pixel, FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
mod operations;
mod quirks;
pub mod stack;
mod state;
