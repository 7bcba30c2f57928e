use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Error, Result};
use crate::instruction::{decode, Trace};
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - counting down its timers
/// - inspecting its frame buffer for rendering by some display
/// - disassembling the loaded program
///
/// Nothing here sleeps or spawns threads: the host decides how often `step`
/// and `tick_timers` run (nominally some hundreds of Hz and 60Hz).
#[derive(Clone, Debug, Default)]
pub struct Chip8 {
    state: State,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
        }
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        let mut chip8 = Chip8::new();
        chip8.state.quirks = quirks;
        chip8
    }

    /// Copies a program into memory at 0x200 and points the pc at it.
    ///
    /// Returns the number of bytes loaded. Programs that don't fit are rejected
    /// without touching memory.
    pub fn load(&mut self, program: &[u8]) -> Result<usize> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..].fill(0);
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        self.state.pc = PROGRAM_START;
        self.state.program_end = PROGRAM_START + program.len() as u16;
        Ok(program.len())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn std::io::Read) -> Result<usize> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load(&program)
    }

    /// Executes the instruction at the pc.
    ///
    /// Returns `None` once the pc has run off the end of the loaded program,
    /// otherwise a trace of the instruction that was executed. An error leaves
    /// the pc on the offending instruction.
    pub fn step(&mut self) -> Result<Option<Trace>> {
        let address = self.state.pc;
        if address >= self.state.program_end {
            return Ok(None);
        }

        let opcode = self.state.op_at(address)?;
        let instruction = decode(opcode).ok_or(Error::InvalidOpcode { address, opcode })?;
        let operands = (instruction.operands)(opcode);
        let trace = Trace {
            address,
            opcode,
            mnemonic: instruction.render(operands),
        };

        (instruction.execute)(&mut self.state, operands)?;
        Ok(Some(trace))
    }

    /// Counts both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad index 0x0..=0xF
    pub fn key_down(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = true;
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad index 0x0..=0xF
    pub fn key_up(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = false;
        Ok(())
    }

    fn key_mut(&mut self, key: u8) -> Result<&mut bool> {
        if key as usize >= KEY_COUNT {
            return Err(Error::InvalidKey(key));
        }
        Ok(&mut self.state.keys[key as usize])
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the host should be playing a tone.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Lists every word of the loaded program without executing anything.
    pub fn decompile(&self) -> Vec<Trace> {
        let memory = &self.state.memory;
        (PROGRAM_START..self.state.program_end)
            .step_by(2)
            .map(|address| {
                let high = memory[address as usize];
                let low = memory.get(address as usize + 1).copied().unwrap_or(0);
                Trace::new(address, u16::from_be_bytes([high, low]))
            })
            .collect()
    }
}
