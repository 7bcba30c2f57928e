/// Field accessors for a 16-bit Chip-8 word.
///
/// Which instruction a word encodes is settled by the bitmask table in
/// `instruction`. These accessors only pull out the data fields, and the
/// operand rules below combine them into the four operand shapes:
/// - an address, `[_adr]` (`JP`, `CALL`, `LD I`)
/// - a register and a byte, `[_xkk]` (`SE Vx, kk`, `RND`)
/// - two registers, `[_xy_]` (the `8xy_` ALU group)
/// - two registers and a nibble, `[_xyn]` (`DRW`)
pub trait Opcode {
    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Values pulled out of an opcode by an instruction's operand rule.
///
/// Fields the rule doesn't extract are left at zero. `byte` carries either the
/// `kk` immediate or, for `DRW`, the `n` sprite height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    pub addr: u16,
    pub byte: u8,
    pub x: u8,
    pub y: u8,
}

/// A pure function from an opcode to its operands.
pub type OperandRule = fn(op: u16) -> Operands;

/// `[____]` fixed instructions that carry no data.
pub fn no_operands(_op: u16) -> Operands {
    Operands::default()
}

/// `[_adr]`
pub fn address(op: u16) -> Operands {
    Operands {
        addr: op.addr(),
        ..Operands::default()
    }
}

/// `[_x__]`
pub fn register(op: u16) -> Operands {
    Operands {
        x: op.x(),
        ..Operands::default()
    }
}

/// `[_xkk]`
pub fn register_and_byte(op: u16) -> Operands {
    Operands {
        x: op.x(),
        byte: op.kk(),
        ..Operands::default()
    }
}

/// `[_xy_]`
pub fn two_registers(op: u16) -> Operands {
    Operands {
        x: op.x(),
        y: op.y(),
        ..Operands::default()
    }
}

/// `[_xyn]`
pub fn two_registers_and_nibble(op: u16) -> Operands {
    Operands {
        x: op.x(),
        y: op.y(),
        byte: op.n(),
        ..Operands::default()
    }
}
