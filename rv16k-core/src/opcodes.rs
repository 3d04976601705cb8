use crate::bitpat::BitPat;
use crate::cpu::ops_alu::*;
use crate::cpu::ops_jump::*;
use crate::cpu::ops_memory::*;
use crate::cpu::Cpu;
use crate::trace::Tracer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // Jump / branch commands:
    NOP,
    J,
    JAL,
    JALR,
    JR,
    JL,
    JLE,
    JE,
    JNE,
    JB,
    JBE,
    // Move and memory commands:
    LI,
    SWSP,
    SW,
    SB,
    LWSP,
    LW,
    LBU,
    LB,
    MOV,
    // Arithmetic and logical commands:
    CMP,
    CMPI,
    ADD,
    SUB,
    AND,
    OR,
    XOR,
    LSL,
    LSR,
    ASR,
    ADDI,
}

impl Instruction {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::NOP => "NOP",
            Instruction::J => "J",
            Instruction::JAL => "JAL",
            Instruction::JALR => "JALR",
            Instruction::JR => "JR",
            Instruction::JL => "JL",
            Instruction::JLE => "JLE",
            Instruction::JE => "JE",
            Instruction::JNE => "JNE",
            Instruction::JB => "JB",
            Instruction::JBE => "JBE",
            Instruction::LI => "LI",
            Instruction::SWSP => "SWSP",
            Instruction::SW => "SW",
            Instruction::SB => "SB",
            Instruction::LWSP => "LWSP",
            Instruction::LW => "LW",
            Instruction::LBU => "LBU",
            Instruction::LB => "LB",
            Instruction::MOV => "MOV",
            Instruction::CMP => "CMP",
            Instruction::CMPI => "CMPI",
            Instruction::ADD => "ADD",
            Instruction::SUB => "SUB",
            Instruction::AND => "AND",
            Instruction::OR => "OR",
            Instruction::XOR => "XOR",
            Instruction::LSL => "LSL",
            Instruction::LSR => "LSR",
            Instruction::ASR => "ASR",
            Instruction::ADDI => "ADDI",
        }
    }
}

pub type OperationFn = fn(&mut Cpu, u16, &mut Tracer);

/// One dispatch table row: the tag, its pattern compiled to a mask/value
/// pair, and the handler.
pub struct Operation {
    pub instruction: Instruction,
    pub pattern: BitPat,
    pub execute: OperationFn,
}

const fn pat(template: &str) -> BitPat {
    match BitPat::parse(template) {
        Some(pattern) => pattern,
        None => panic!("malformed bit pattern template"),
    }
}

const fn entry(instruction: Instruction, template: &str, execute: OperationFn) -> Operation {
    Operation {
        instruction,
        pattern: pat(template),
        execute,
    }
}

/// The dispatch table. A fetched word is tested against the rows in this
/// order and the first match wins, so the order is a correctness property:
/// NOP sits at the head to short-circuit zeroed ROM tails, and every
/// family's fully-literal rows come before wider wildcard rows could
/// shadow them.
#[rustfmt::skip]
pub static OPERATIONS: [Operation; 31] = [
    entry(Instruction::NOP,  "0b0000_0000_0000_0000", nop),
    entry(Instruction::J,    "0b0101_0010_0000_0000", j),
    entry(Instruction::JAL,  "0b0111_0011_0000_0000", jal),
    entry(Instruction::JALR, "0b0110_0001_xxxx_0000", jalr),
    entry(Instruction::JR,   "0b0100_0000_xxxx_0000", jr),
    entry(Instruction::JL,   "0b0100_0100_0xxx_xxxx", jl),
    entry(Instruction::JLE,  "0b0100_0100_1xxx_xxxx", jle),
    entry(Instruction::JE,   "0b0100_0101_0xxx_xxxx", je),
    entry(Instruction::JNE,  "0b0100_0101_1xxx_xxxx", jne),
    entry(Instruction::JB,   "0b0100_0110_0xxx_xxxx", jb),
    entry(Instruction::JBE,  "0b0100_0110_1xxx_xxxx", jbe),
    entry(Instruction::LI,   "0b0111_1000_xxxx_xxxx", li),
    entry(Instruction::SWSP, "0b1000_xxxx_xxxx_xxxx", swsp),
    entry(Instruction::SW,   "0b1001_0010_xxxx_xxxx", sw),
    entry(Instruction::SB,   "0b1001_1010_xxxx_xxxx", sb),
    entry(Instruction::LWSP, "0b1010_xxxx_xxxx_xxxx", lwsp),
    entry(Instruction::LW,   "0b1011_0010_xxxx_xxxx", lw),
    entry(Instruction::LBU,  "0b1011_1010_xxxx_xxxx", lbu),
    entry(Instruction::LB,   "0b1011_1110_xxxx_xxxx", lb),
    entry(Instruction::MOV,  "0b1100_0000_xxxx_xxxx", mov),
    entry(Instruction::CMP,  "0b1100_0011_xxxx_xxxx", cmp),
    entry(Instruction::CMPI, "0b1101_0011_xxxx_xxxx", cmpi),
    entry(Instruction::ADD,  "0b1110_0010_xxxx_xxxx", add),
    entry(Instruction::SUB,  "0b1110_0011_xxxx_xxxx", sub),
    entry(Instruction::AND,  "0b1110_0100_xxxx_xxxx", and),
    entry(Instruction::OR,   "0b1110_0101_xxxx_xxxx", or),
    entry(Instruction::XOR,  "0b1110_0110_xxxx_xxxx", xor),
    entry(Instruction::LSL,  "0b1110_1001_xxxx_xxxx", lsl),
    entry(Instruction::LSR,  "0b1110_1010_xxxx_xxxx", lsr),
    entry(Instruction::ASR,  "0b1110_1011_xxxx_xxxx", asr),
    entry(Instruction::ADDI, "0b1111_0010_xxxx_xxxx", addi),
];
