use crate::constants::{FONT_BASE, GLYPH_SIZE};
use crate::error::{Error, Result};
use crate::opcode::Operands;
use crate::state::State;

/// The effect of an instruction on the machine.
///
/// Every operation sets the next `pc` itself, exactly once.
pub type Operation = fn(state: &mut State, op: Operands) -> Result<()>;

/// no-op; legacy machine code routine
pub fn sys(state: &mut State, _op: Operands) -> Result<()> {
    state.advance();
    Ok(())
}

/// clear
pub fn clr(state: &mut State, _op: Operands) -> Result<()> {
    state.clear_screen();
    state.advance();
    Ok(())
}

/// PC = STACK.pop() + 2
pub fn rts(state: &mut State, _op: Operands) -> Result<()> {
    let address = state.pc;
    let call_site = state
        .stack
        .pop()
        .ok_or(Error::StackUnderflow { address })?;
    state.pc = call_site;
    state.advance();
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, op: Operands) -> Result<()> {
    state.pc = op.addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, op: Operands) -> Result<()> {
    state.stack.push(state.pc);
    state.pc = op.addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, op: Operands) -> Result<()> {
    state.skip_if(state.v[op.x as usize] == op.byte);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, op: Operands) -> Result<()> {
    state.skip_if(state.v[op.x as usize] != op.byte);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, op: Operands) -> Result<()> {
    state.skip_if(state.v[op.x as usize] == state.v[op.y as usize]);
    Ok(())
}

/// Vx = kk
pub fn load(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] = op.byte;
    state.advance();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, op: Operands) -> Result<()> {
    let x = op.x as usize;
    state.v[x] = state.v[x].wrapping_add(op.byte);
    state.advance();
    Ok(())
}

/// Vx = Vy
pub fn mv(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] = state.v[op.y as usize];
    state.advance();
    Ok(())
}

/// Vx |= Vy
pub fn or(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] |= state.v[op.y as usize];
    state.advance();
    Ok(())
}

/// Vx &= Vy
pub fn and(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] &= state.v[op.y as usize];
    state.advance();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] ^= state.v[op.y as usize];
    state.advance();
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, op: Operands) -> Result<()> {
    let (res, over) = state.v[op.x as usize].overflowing_add(state.v[op.y as usize]);
    state.set_flag(over);
    state.v[op.x as usize] = res;
    state.advance();
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, op: Operands) -> Result<()> {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    state.set_flag(vx > vy);
    state.v[op.x as usize] = vx.wrapping_sub(vy);
    state.advance();
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, op: Operands) -> Result<()> {
    let vx = state.v[op.x as usize];
    state.v[0xF] = vx & 0x1;
    state.v[op.x as usize] = vx >> 1;
    state.advance();
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, op: Operands) -> Result<()> {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    state.set_flag(vy > vx);
    state.v[op.x as usize] = vy.wrapping_sub(vx);
    state.advance();
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, op: Operands) -> Result<()> {
    let vx = state.v[op.x as usize];
    state.v[0xF] = vx >> 7;
    state.v[op.x as usize] = vx << 1;
    state.advance();
    Ok(())
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, op: Operands) -> Result<()> {
    state.skip_if(state.v[op.x as usize] != state.v[op.y as usize]);
    Ok(())
}

/// I = addr
pub fn loadi(state: &mut State, op: Operands) -> Result<()> {
    state.i = op.addr;
    state.advance();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, op: Operands) -> Result<()> {
    state.pc = u16::from(state.v[0x0]) + op.addr;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, op: Operands) -> Result<()> {
    let rand_byte: u8 = ::rand::random();
    state.v[op.x as usize] = rand_byte & op.byte;
    state.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels would be erased
pub fn draw(state: &mut State, op: Operands) -> Result<()> {
    // n is a nibble, so a sprite is at most 15 rows
    let rows = op.byte as usize;
    let mut sprite = [0u8; 15];
    sprite[..rows].copy_from_slice(state.memory_at(state.i, rows)?);
    let (x, y) = (state.v[op.x as usize], state.v[op.y as usize]);
    let collision = state.draw_sprite(x, y, &sprite[..rows]);
    state.set_flag(collision);
    state.advance();
    Ok(())
}

/// Reads the key named by Vx, releasing it if keys are consumed on read.
/// Vx must name one of the 16 keys.
fn read_key(state: &mut State, x: u8) -> Result<bool> {
    let vx = state.v[x as usize];
    let down = *state
        .keys
        .get(vx as usize)
        .ok_or(Error::InvalidKey(vx))?;
    if state.quirks.consume_keys {
        state.keys[vx as usize] = false;
    }
    Ok(down)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, op: Operands) -> Result<()> {
    let down = read_key(state, op.x)?;
    state.skip_if(down);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, op: Operands) -> Result<()> {
    let down = read_key(state, op.x)?;
    state.skip_if(!down);
    Ok(())
}

/// Vx = DT
pub fn moved(state: &mut State, op: Operands) -> Result<()> {
    state.v[op.x as usize] = state.delay_timer;
    state.advance();
    Ok(())
}

/// await keypress for Vx
/// Leaves pc in place until a key is down so the next step checks again.
pub fn keyd(state: &mut State, op: Operands) -> Result<()> {
    if let Some(key) = state.keys.iter().position(|down| *down) {
        state.v[op.x as usize] = key as u8;
        state.advance();
    }
    Ok(())
}

/// DT = Vx
pub fn loads(state: &mut State, op: Operands) -> Result<()> {
    state.delay_timer = state.v[op.x as usize];
    state.advance();
    Ok(())
}

/// ST = Vx
pub fn ld(state: &mut State, op: Operands) -> Result<()> {
    state.sound_timer = state.v[op.x as usize];
    state.advance();
    Ok(())
}

/// I += Vx
pub fn addi(state: &mut State, op: Operands) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x as usize]));
    state.advance();
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, op: Operands) -> Result<()> {
    let digit = u16::from(state.v[op.x as usize] & 0xF);
    state.i = FONT_BASE + digit * GLYPH_SIZE;
    state.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, op: Operands) -> Result<()> {
    let vx = state.v[op.x as usize];
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state.memory_at_mut(state.i, 3)?.copy_from_slice(&digits);
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, op: Operands) -> Result<()> {
    let count = op.x as usize + 1;
    let registers = state.v;
    state
        .memory_at_mut(state.i, count)?
        .copy_from_slice(&registers[..count]);
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, op: Operands) -> Result<()> {
    let count = op.x as usize + 1;
    let mut registers = state.v;
    registers[..count].copy_from_slice(state.memory_at(state.i, count)?);
    state.v = registers;
    state.advance();
    Ok(())
}
