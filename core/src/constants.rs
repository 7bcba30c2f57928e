/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded at, and execution starts from, this address.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// The display is 64x32 monochrome pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Pixels are packed 8 to a byte so a row is 8 bytes wide.
pub const BYTES_PER_ROW: usize = DISPLAY_WIDTH / 8;
pub const VIDEO_MEMORY_SIZE: usize = BYTES_PER_ROW * DISPLAY_HEIGHT;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Address of the first font glyph and the size of each one.
pub const FONT_BASE: u16 = 0x000;
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, 5 bytes each.
///
/// Each byte is a row of 8 pixels of which only the high 4 are used, e.g. `0`:
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Default instruction rate of the driving loop.
pub const CLOCK_HZ: u32 = 500;

/// Rate at which the delay and sound timers count down.
pub const TIMER_HZ: u32 = 60;
