use std::fmt;

use crate::opcode::{
    address, no_operands, register, register_and_byte, two_registers,
    two_registers_and_nibble, OperandRule, Operands,
};
use crate::operations::{self as ops, Operation};

/// # Instruction
/// A single entry of the instruction set.
///
/// A 16-bit word `w` is this instruction when `w & bitmask == opcode`.
/// The bitmask selects the nibbles that identify the instruction, e.g.
/// - `0xFFFF` exact match (`CLS`)
/// - `0xF000` first nibble only (`JP addr`)
/// - `0xF00F` first and last nibble (`ADD Vx, Vy`)
/// - `0xF0FF` first nibble and low byte (`LD B, Vx`)
///
/// `template` renders the instruction for traces and disassembly; `{x}`, `{y}`,
/// `{n}`, `{kk}` and `{addr}` are replaced with the operands.
pub struct Instruction {
    pub opcode: u16,
    pub bitmask: u16,
    pub template: &'static str,
    pub operands: OperandRule,
    pub execute: Operation,
}

impl Instruction {
    pub fn matches(&self, word: u16) -> bool {
        word & self.bitmask == self.opcode
    }

    /// Renders the mnemonic for `operands`, e.g. `LD V1, 0x0A`.
    pub fn render(&self, operands: Operands) -> String {
        self.template
            .replace("{x}", &format!("{:X}", operands.x))
            .replace("{y}", &format!("{:X}", operands.y))
            .replace("{n}", &format!("{:X}", operands.byte))
            .replace("{kk}", &format!("0x{:02X}", operands.byte))
            .replace("{addr}", &format!("0x{:03X}", operands.addr))
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("{:#06X}", self.opcode))
            .field("bitmask", &format_args!("{:#06X}", self.bitmask))
            .field("template", &self.template)
            .finish()
    }
}

const fn instruction(
    opcode: u16,
    bitmask: u16,
    template: &'static str,
    operands: OperandRule,
    execute: Operation,
) -> Instruction {
    Instruction {
        opcode,
        bitmask,
        template,
        operands,
        execute,
    }
}

/// The Chip-8 instruction set in decode priority order.
///
/// Decoding takes the first match, so an instruction must come before any
/// instruction whose bitmask is looser and could also match it (`SYS` after
/// `CLS` and `RET`).
pub static INSTRUCTION_SET: [Instruction; 35] = [
    instruction(0x00E0, 0xFFFF, "CLS", no_operands, ops::clr),
    instruction(0x00EE, 0xFFFF, "RET", no_operands, ops::rts),
    instruction(0x0000, 0xF000, "SYS {addr}", address, ops::sys),
    instruction(0x1000, 0xF000, "JP {addr}", address, ops::jump),
    instruction(0x2000, 0xF000, "CALL {addr}", address, ops::call),
    instruction(0x3000, 0xF000, "SE V{x}, {kk}", register_and_byte, ops::ske),
    instruction(0x4000, 0xF000, "SNE V{x}, {kk}", register_and_byte, ops::skne),
    instruction(0x5000, 0xF00F, "SE V{x}, V{y}", two_registers, ops::skre),
    instruction(0x6000, 0xF000, "LD V{x}, {kk}", register_and_byte, ops::load),
    instruction(0x7000, 0xF000, "ADD V{x}, {kk}", register_and_byte, ops::add),
    instruction(0x8000, 0xF00F, "LD V{x}, V{y}", two_registers, ops::mv),
    instruction(0x8001, 0xF00F, "OR V{x}, V{y}", two_registers, ops::or),
    instruction(0x8002, 0xF00F, "AND V{x}, V{y}", two_registers, ops::and),
    instruction(0x8003, 0xF00F, "XOR V{x}, V{y}", two_registers, ops::xor),
    instruction(0x8004, 0xF00F, "ADD V{x}, V{y}", two_registers, ops::addr),
    instruction(0x8005, 0xF00F, "SUB V{x}, V{y}", two_registers, ops::sub),
    instruction(0x8006, 0xF00F, "SHR V{x} {, V{y}}", two_registers, ops::shr),
    instruction(0x8007, 0xF00F, "SUBN V{x}, V{y}", two_registers, ops::subn),
    instruction(0x800E, 0xF00F, "SHL V{x} {, V{y}}", two_registers, ops::shl),
    instruction(0x9000, 0xF00F, "SNE V{x}, V{y}", two_registers, ops::skrne),
    instruction(0xA000, 0xF000, "LD I, {addr}", address, ops::loadi),
    instruction(0xB000, 0xF000, "JP V0, {addr}", address, ops::jumpi),
    instruction(0xC000, 0xF000, "RND V{x}, {kk}", register_and_byte, ops::rand),
    instruction(0xD000, 0xF000, "DRW V{x}, V{y}, {n}", two_registers_and_nibble, ops::draw),
    instruction(0xE09E, 0xF0FF, "SKP V{x}", register, ops::skpr),
    instruction(0xE0A1, 0xF0FF, "SKNP V{x}", register, ops::skup),
    instruction(0xF007, 0xF0FF, "LD V{x}, DT", register, ops::moved),
    instruction(0xF00A, 0xF0FF, "LD V{x}, K", register, ops::keyd),
    instruction(0xF015, 0xF0FF, "LD DT, V{x}", register, ops::loads),
    instruction(0xF018, 0xF0FF, "LD ST, V{x}", register, ops::ld),
    instruction(0xF01E, 0xF0FF, "ADD I, V{x}", register, ops::addi),
    instruction(0xF029, 0xF0FF, "LD F, V{x}", register, ops::ldspr),
    instruction(0xF033, 0xF0FF, "LD B, V{x}", register, ops::bcd),
    instruction(0xF055, 0xF0FF, "LD [I], V{x}", register, ops::stor),
    instruction(0xF065, 0xF0FF, "LD V{x}, [I]", register, ops::read),
];

/// Selects the Instruction for a given opcode, if any
pub fn decode(op: u16) -> Option<&'static Instruction> {
    INSTRUCTION_SET.iter().find(|instruction| instruction.matches(op))
}

/// # Trace
/// A rendering of one decoded word: where it lives, the raw word and its mnemonic.
///
/// Displays as `0x0200: 600A LD V0, 0x0A`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub address: u16,
    pub opcode: u16,
    pub mnemonic: String,
}

impl Trace {
    pub fn new(address: u16, opcode: u16) -> Self {
        let mnemonic = match decode(opcode) {
            Some(instruction) => instruction.render((instruction.operands)(opcode)),
            None => format!("DW 0x{:04X}", opcode),
        };
        Trace {
            address,
            opcode,
            mnemonic,
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:04X}: {:04X} {}",
            self.address, self.opcode, self.mnemonic
        )
    }
}
