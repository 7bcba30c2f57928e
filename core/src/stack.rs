/// # Call Stack
/// Return addresses pushed by `CALL` and popped by `RET`.
///
/// The stack grows as needed; real programs stay within 16 frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Vec<u16>,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, address: u16) {
        self.frames.push(address);
    }

    /// Removes the most recent return address, or `None` if nothing was ever pushed.
    pub fn pop(&mut self) -> Option<u16> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
