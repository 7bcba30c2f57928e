use sdl2::keyboard::Keycode;

/// Host keys for the hex keypad, row by row. The keypad's 4x4 grid sits on
/// the left four columns of a QWERTY keyboard.
const HOST_ROWS: [[Keycode; 4]; 4] = [
    [Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4],
    [Keycode::Q, Keycode::W, Keycode::E, Keycode::R],
    [Keycode::A, Keycode::S, Keycode::D, Keycode::F],
    [Keycode::Z, Keycode::X, Keycode::C, Keycode::V],
];

/// Key values printed on the keypad, in the same positions as `HOST_ROWS`.
const KEYPAD_ROWS: [[u8; 4]; 4] = [
    [0x1, 0x2, 0x3, 0xC],
    [0x4, 0x5, 0x6, 0xD],
    [0x7, 0x8, 0x9, 0xE],
    [0xA, 0x0, 0xB, 0xF],
];

/// Translates a window key event into the keypad key the core expects.
///
/// This lives in the frontend; the core only ever sees key numbers
/// `0x0..=0xF` through `Chip8::key_down`/`key_up`.
pub fn keymap(key: Keycode) -> Option<u8> {
    HOST_ROWS
        .iter()
        .flatten()
        .zip(KEYPAD_ROWS.iter().flatten())
        .find(|(host, _)| **host == key)
        .map(|(_, hex)| *hex)
}
