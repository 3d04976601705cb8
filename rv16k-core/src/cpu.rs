use crate::constants::{DATA_RAM_SIZE, INST_ROM_SIZE};
use crate::opcodes::OPERATIONS;
use crate::trace::Tracer;
use std::fmt;

pub mod ops_alu;
pub mod ops_jump;
pub mod ops_memory;

#[cfg(test)]
#[macro_use]
mod test_helpers;


/// The four condition flags, printed in trace lines as `SZCV` digits.
///
/// The carry flag is non-standard: add-like instructions set it when the
/// 17-bit sum does NOT overflow (`sum <= 0xFFFF`), and SUB/CMP/CMPI force it
/// to zero when the negated subtrahend is zero. JB/JBE test it as written,
/// so assembled programs depend on this polarity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub sign: bool,
    pub zero: bool,
    pub carry: bool,
    pub overflow: bool,
}

impl Flags {
    pub fn clear(&mut self) {
        *self = Flags::default();
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            u8::from(self.sign),
            u8::from(self.zero),
            u8::from(self.carry),
            u8::from(self.overflow),
        )
    }
}

/// This struct implements the RV16K 16-bit register machine.
///
/// Sixteen 16-bit registers, a byte-addressed program counter, separate
/// instruction ROM and data RAM (both little-endian for word accesses), and
/// four condition flags. x0 doubles as the link register and x1 as the
/// stack pointer.
pub struct Cpu {
    pub reg: [u16; 16],

    /// Program counter, byte-addressed. Instructions are 2 bytes; the ones
    /// that fetch a trailing immediate word occupy 4.
    pub pc: u16,

    /// Instruction ROM. Populated once at startup from the ELF loader or a
    /// hex seed string, then read-only while the simulation runs.
    pub inst_rom: [u8; INST_ROM_SIZE],

    /// Data RAM, mutated by store handlers and read by load handlers.
    pub data_ram: [u8; DATA_RAM_SIZE],

    pub flags: Flags,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            reg: [0; 16],
            pc: 0,
            inst_rom: [0; INST_ROM_SIZE],
            data_ram: [0; DATA_RAM_SIZE],
            flags: Flags::default(),
        }
    }

    /// Copy a program image into instruction ROM starting at address 0.
    pub fn load_rom(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= INST_ROM_SIZE,
            "program image does not fit in instruction ROM",
        );
        self.inst_rom[..bytes.len()].copy_from_slice(bytes);
    }

    /// Copy a seed image into data RAM starting at address 0.
    pub fn load_ram(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= DATA_RAM_SIZE,
            "seed image does not fit in data RAM",
        );
        self.data_ram[..bytes.len()].copy_from_slice(bytes);
    }

    /// Does one fetch-decode-execute cycle. Returns false when the fetched
    /// word matches no table entry, which ends the simulation; the final
    /// register dump still runs.
    pub fn step(&mut self, trace: &mut Tracer) -> bool {
        let word = self.fetch_word();
        for operation in OPERATIONS.iter() {
            if operation.pattern.matches(word) {
                trace.instruction(operation.instruction.mnemonic());
                (operation.execute)(self, word, trace);
                trace.flags(self.flags);
                return true;
            }
        }
        trace.invalid_operation();
        false
    }

    /// Read the 16-bit little-endian ROM word at the current PC.
    pub fn fetch_word(&self) -> u16 {
        let pc = usize::from(self.pc);
        assert!(
            pc + 1 < INST_ROM_SIZE,
            "instruction fetch out of ROM bounds",
        );
        u16::from(self.inst_rom[pc]) | u16::from(self.inst_rom[pc + 1]) << 8
    }

    pub fn read_reg(&self, index: u8) -> u16 {
        self.reg[usize::from(index)]
    }

    fn write_reg(&mut self, trace: &mut Tracer, index: u8, value: u16) {
        self.reg[usize::from(index)] = value;
        trace.reg(index, value);
    }

    fn pc_add(&mut self, trace: &mut Tracer, offset: u16) {
        self.pc = self.pc.wrapping_add(offset);
        trace.pc(self.pc);
    }

    fn pc_write(&mut self, trace: &mut Tracer, addr: u16) {
        self.pc = addr;
        trace.pc(self.pc);
    }

    pub fn read_ram_byte(&self, addr: u16) -> u8 {
        let addr = usize::from(addr);
        assert!(addr < DATA_RAM_SIZE, "byte read out of RAM bounds");
        self.data_ram[addr]
    }

    pub fn read_ram_word(&self, addr: u16) -> u16 {
        let addr = usize::from(addr);
        assert!(addr + 1 < DATA_RAM_SIZE, "word read out of RAM bounds");
        u16::from(self.data_ram[addr]) | u16::from(self.data_ram[addr + 1]) << 8
    }

    fn write_ram_byte(&mut self, trace: &mut Tracer, addr: u16, value: u8) {
        let index = usize::from(addr);
        assert!(index < DATA_RAM_SIZE, "byte write out of RAM bounds");
        self.data_ram[index] = value;
        trace.ram(addr, value);
    }

    fn write_ram_word(&mut self, trace: &mut Tracer, addr: u16, value: u16) {
        let index = usize::from(addr);
        assert!(index + 1 < DATA_RAM_SIZE, "word write out of RAM bounds");
        let lo = (value & 0xFF) as u8;
        let hi = (value >> 8) as u8;
        self.data_ram[index] = lo;
        self.data_ram[index + 1] = hi;
        trace.ram(addr, lo);
        trace.ram(addr.wrapping_add(1), hi);
    }

    /// Add `a + b`, setting all four flags, and return the wrapped sum.
    /// Carry detection runs in 32-bit space; the stored polarity is the
    /// inverted one described on `Flags`.
    fn update_add_flags(&mut self, a: u16, b: u16) -> u16 {
        let sum = u32::from(a) + u32::from(b);
        let result = sum as u16;
        self.flags.carry = sum <= 0xFFFF;
        self.flags.sign = sign_of(result);
        self.flags.zero = result == 0;
        self.flags.overflow = overflows(a, b, result);
        result
    }

    /// Subtract path: `negated` is the two's-complement of the subtrahend.
    /// Same derivations as the add path, except carry is forced to zero
    /// when `negated` is zero (a zero subtrahend can never borrow).
    fn update_sub_flags(&mut self, negated: u16, b: u16) -> u16 {
        let result = self.update_add_flags(negated, b);
        if negated == 0 {
            self.flags.carry = false;
        }
        result
    }

    /// Logical and shift instructions: carry is cleared, sign/zero come
    /// from the result, and overflow still runs through the arithmetic
    /// formula over the two operands (vestigial but architected).
    fn update_logic_flags(&mut self, a: u16, b: u16, result: u16) {
        self.flags.carry = false;
        self.flags.sign = sign_of(result);
        self.flags.zero = result == 0;
        self.flags.overflow = overflows(a, b, result);
    }

    /// Plain value moves (LI, MOV): carry and overflow are cleared.
    fn update_value_flags(&mut self, value: u16) {
        self.flags.carry = false;
        self.flags.sign = sign_of(value);
        self.flags.zero = value == 0;
        self.flags.overflow = false;
    }
}

fn sign_of(value: u16) -> bool {
    value & 0x8000 != 0
}

/// Signed overflow of `a + b = r`: the operands agree in sign and the
/// result does not. Subtraction feeds the negated subtrahend in as `a`.
fn overflows(a: u16, b: u16, r: u16) -> bool {
    sign_of(a) == sign_of(b) && sign_of(b) != sign_of(r)
}
