use chip8_core::{Chip8, State};
use proptest::prelude::*;

/// Runs a single instruction with the given register values.
fn execute(op: u16, x: u8, y: u8) -> State {
    let mut chip8 = Chip8::new();
    chip8.load(&op.to_be_bytes()).unwrap();
    chip8.state_mut().v[0x1] = x;
    chip8.state_mut().v[0x2] = y;
    chip8.step().unwrap();
    chip8.state().clone()
}

proptest! {
    #[test]
    fn add_sets_carry_iff_sum_overflows(x in any::<u8>(), y in any::<u8>()) {
        let state = execute(0x8124, x, y);
        let sum = u16::from(x) + u16::from(y);
        prop_assert_eq!(state.v[0xF], u8::from(sum > 255));
        prop_assert_eq!(state.v[0x1], sum as u8);
        prop_assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn sub_sets_flag_iff_no_borrow(x in any::<u8>(), y in any::<u8>()) {
        let state = execute(0x8125, x, y);
        prop_assert_eq!(state.v[0xF], u8::from(x > y));
        prop_assert_eq!(state.v[0x1], x.wrapping_sub(y));
    }

    #[test]
    fn subn_sets_flag_iff_no_borrow(x in any::<u8>(), y in any::<u8>()) {
        let state = execute(0x8127, x, y);
        prop_assert_eq!(state.v[0xF], u8::from(y > x));
        prop_assert_eq!(state.v[0x1], y.wrapping_sub(x));
    }

    #[test]
    fn shifts_ignore_vy(x in any::<u8>(), y in any::<u8>()) {
        let right = execute(0x8126, x, y);
        prop_assert_eq!(right.v[0xF], x & 1);
        prop_assert_eq!(right.v[0x1], x >> 1);
        prop_assert_eq!(right.v[0x2], y);

        let left = execute(0x812E, x, y);
        prop_assert_eq!(left.v[0xF], x >> 7);
        prop_assert_eq!(left.v[0x1], x << 1);
        prop_assert_eq!(left.v[0x2], y);
    }

    #[test]
    fn drawing_twice_restores_the_frame(
        background in prop::collection::vec(any::<u8>(), 256),
        sprite in prop::collection::vec(any::<u8>(), 1..=15),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut state = State::new();
        state.frame_buffer.copy_from_slice(&background);
        state.draw_sprite(x, y, &sprite);
        state.draw_sprite(x, y, &sprite);
        prop_assert_eq!(&state.frame_buffer[..], &background[..]);

        let mut blank = State::new();
        prop_assert!(!blank.draw_sprite(x, y, &sprite));
        let collided = blank.draw_sprite(x, y, &sprite);
        prop_assert_eq!(collided, sprite.iter().any(|row| *row != 0));
        prop_assert!(blank.frame_buffer.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn skips_exactly_when_the_compare_holds(
        op in prop::sample::select(vec![0x3122u16, 0x4122, 0x5120, 0x9120]),
        x in prop_oneof![Just(0x22u8), any::<u8>()],
        y in any::<u8>(),
        same in any::<bool>(),
    ) {
        let y = if same { x } else { y };
        let state = execute(op, x, y);
        let skip = match op {
            0x3122 => x == 0x22,
            0x4122 => x != 0x22,
            0x5120 => x == y,
            _ => x != y,
        };
        prop_assert_eq!(state.pc, if skip { 0x204 } else { 0x202 });
    }
}
