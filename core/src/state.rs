use crate::constants::{
    BYTES_PER_ROW, DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    SPRITE_SHEET, VIDEO_MEMORY_SIZE,
};
use crate::error::{Error, Result};
use crate::quirks::Quirks;
use crate::stack::Stack;

/// 64x32 pixels packed 8 to a byte, row-major; byte `row * 8 + column / 8`.
/// The most significant bit of each byte is the leftmost pixel.
pub type FrameBuffer = [u8; VIDEO_MEMORY_SIZE];

/// The complete Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always pointing at the next instruction
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down by the host at 60Hz
///
/// ## Memory
/// - a call stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font sprite sheet
///     - programs are loaded from 0x200 up to `program_end`
/// - 256 bytes of packed video memory
///
/// ## Input
/// - the down/up status of keys 0..F, written only by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; KEY_COUNT],
    pub program_end: u16,
    pub quirks: Quirks,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [0; VIDEO_MEMORY_SIZE],
            draw_flag: false,
            keys: [false; KEY_COUNT],
            program_end: PROGRAM_START,
            quirks: Quirks::default(),
        }
    }

    /// Moves on to the next instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves on to the next instruction, skipping it when `condition` holds.
    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 4 } else { 2 };
        self.pc = self.pc.wrapping_add(step);
    }

    /// Sets VF to 1 if `flag` else 0.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }

    /// Borrows `len` bytes of memory starting at `address`.
    pub fn memory_at(&self, address: u16, len: usize) -> Result<&[u8]> {
        let start = address as usize;
        self.memory
            .get(start..start + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: start,
                len,
            })
    }

    /// Mutably borrows `len` bytes of memory starting at `address`.
    pub fn memory_at_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8]> {
        let start = address as usize;
        self.memory
            .get_mut(start..start + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: start,
                len,
            })
    }

    /// Gets the big-endian opcode at `address`.
    pub fn op_at(&self, address: u16) -> Result<u16> {
        let bytes = self.memory_at(address, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer = [0; VIDEO_MEMORY_SIZE];
        self.draw_flag = true;
    }

    /// XORs `sprite` onto the frame buffer with its top left corner at (x, y).
    ///
    /// Each sprite row straddles two frame buffer bytes: it is shifted right by
    /// `x % 8`, the high part landing in column byte `x / 8` and the spill in the
    /// next column byte of the same row. Columns wrap within the row and rows wrap
    /// around the bottom of the screen.
    ///
    /// Returns true if any set pixel was erased.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = x as usize % DISPLAY_WIDTH;
        let y = y as usize % DISPLAY_HEIGHT;
        let column = x / 8;
        let shift = x % 8;
        let mut collision = false;

        for (offset, row_bits) in sprite.iter().enumerate() {
            let row = (y + offset) % DISPLAY_HEIGHT;
            let spread = (u16::from(*row_bits) << 8) >> shift;
            let high = (spread >> 8) as u8;
            let low = spread as u8;

            let left = row * BYTES_PER_ROW + column;
            let right = row * BYTES_PER_ROW + (column + 1) % BYTES_PER_ROW;

            collision |= self.frame_buffer[left] & high != 0;
            collision |= self.frame_buffer[right] & low != 0;
            self.frame_buffer[left] ^= high;
            self.frame_buffer[right] ^= low;
        }

        self.draw_flag = true;
        collision
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the pixel at (x, y) is lit; coordinates wrap around the screen.
pub fn pixel(frame: &FrameBuffer, x: usize, y: usize) -> bool {
    let x = x % DISPLAY_WIDTH;
    let y = y % DISPLAY_HEIGHT;
    frame[y * BYTES_PER_ROW + x / 8] & (0x80 >> (x % 8)) != 0
}

/// Renders the frame as 32 lines of 64 characters, `#` for lit pixels.
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    let mut text = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            text.push(if pixel(frame, x, y) { '#' } else { '.' });
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loads_sprite_sheet() {
        let state = State::new();
        assert_eq!(state.memory[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(state.memory[75..80], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(state.pc, 0x200);
        assert!(state.stack.is_empty());
    }

    #[test]
    fn test_op_at_is_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.op_at(0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_op_at_last_byte_is_out_of_bounds() {
        let state = State::new();
        assert!(matches!(
            state.op_at(0xFFF),
            Err(Error::MemoryOutOfBounds {
                address: 0xFFF,
                len: 2
            })
        ));
    }

    #[test]
    fn test_memory_at_rejects_overrun() {
        let state = State::new();
        assert!(state.memory_at(0xFFE, 2).is_ok());
        assert!(state.memory_at(0xFFE, 3).is_err());
    }

    #[test]
    fn test_draw_byte_aligned() {
        let mut state = State::new();
        let collision = state.draw_sprite(8, 1, &[0xFF]);
        assert!(!collision);
        assert_eq!(state.frame_buffer[BYTES_PER_ROW + 1], 0xFF);
        assert_eq!(state.frame_buffer[BYTES_PER_ROW + 2], 0x00);
    }

    #[test]
    fn test_draw_straddles_two_bytes() {
        let mut state = State::new();
        state.draw_sprite(4, 0, &[0xFF]);
        assert_eq!(state.frame_buffer[0], 0x0F);
        assert_eq!(state.frame_buffer[1], 0xF0);
    }

    #[test]
    fn test_draw_wraps_within_row() {
        let mut state = State::new();
        state.draw_sprite(60, 0, &[0xFF]);
        assert_eq!(state.frame_buffer[7], 0x0F);
        assert_eq!(state.frame_buffer[0], 0xF0);
        // nothing bleeds into the next row
        assert_eq!(state.frame_buffer[8], 0x00);
    }

    #[test]
    fn test_draw_wraps_vertically() {
        let mut state = State::new();
        state.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(pixel(&state.frame_buffer, 0, 31));
        assert!(pixel(&state.frame_buffer, 0, 0));
    }

    #[test]
    fn test_draw_reports_collision_only_on_overlap() {
        let mut state = State::new();
        state.frame_buffer[0] = 0x0F;
        assert!(!state.draw_sprite(0, 0, &[0xF0]));
        assert!(state.draw_sprite(0, 0, &[0x01]));
        assert_eq!(state.frame_buffer[0], 0xFE);
    }

    #[test]
    fn test_pixel_reads_msb_first() {
        let mut frame = [0; VIDEO_MEMORY_SIZE];
        frame[0] = 0x80;
        frame[BYTES_PER_ROW * 2 + 7] = 0x01;
        assert!(pixel(&frame, 0, 0));
        assert!(!pixel(&frame, 1, 0));
        assert!(pixel(&frame, 63, 2));
    }

    #[test]
    fn test_frame_to_text() {
        let mut frame = [0; VIDEO_MEMORY_SIZE];
        frame[0] = 0xA0;
        let text = frame_to_text(&frame);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with("#.#."));
        assert_eq!(lines[1], ".".repeat(DISPLAY_WIDTH));
    }
}
