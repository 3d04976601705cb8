use crate::bits::{get_bits, sign_ext};
use crate::cpu::Cpu;
use crate::trace::Tracer;

fn rd_field(word: u16) -> u8 {
    get_bits(word, 0, 3) as u8
}

fn rs_field(word: u16) -> u8 {
    get_bits(word, 4, 7) as u8
}

/// Add registers
/// Function: Rd := Rs + Rd
/// Flags: S Z C V
pub fn add(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word));
    let b = cpu.read_reg(rd_field(word));
    let result = cpu.update_add_flags(a, b);
    cpu.write_reg(trace, rd_field(word), result);
    cpu.pc_add(trace, 2);
}

/// Add immediate
/// Function: Rd := sign_ext(rs, 3) + Rd
/// Flags: S Z C V
pub fn addi(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = sign_ext(u16::from(rs_field(word)), 3);
    let b = cpu.read_reg(rd_field(word));
    let result = cpu.update_add_flags(a, b);
    cpu.write_reg(trace, rd_field(word), result);
    cpu.pc_add(trace, 2);
}

/// Subtract registers
/// Function: Rd := (~Rs + 1) + Rd
/// Flags: S Z C V, carry forced low on a zero subtrahend
pub fn sub(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word)).wrapping_neg();
    let b = cpu.read_reg(rd_field(word));
    let result = cpu.update_sub_flags(a, b);
    cpu.write_reg(trace, rd_field(word), result);
    cpu.pc_add(trace, 2);
}

/// Compare registers
/// Function: (~Rs + 1) + Rd, result discarded
/// Flags: S Z C V, carry forced low on a zero subtrahend
pub fn cmp(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word)).wrapping_neg();
    let b = cpu.read_reg(rd_field(word));
    cpu.update_sub_flags(a, b);
    cpu.pc_add(trace, 2);
}

/// Compare immediate
/// Function: (~sign_ext(rs, 3) + 1) + Rd, result discarded
/// Flags: S Z C V, carry forced low on a zero subtrahend
pub fn cmpi(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = sign_ext(u16::from(rs_field(word)), 3).wrapping_neg();
    let b = cpu.read_reg(rd_field(word));
    cpu.update_sub_flags(a, b);
    cpu.pc_add(trace, 2);
}

/// Bitwise and
/// Function: Rd := Rs & Rd
/// Flags: S Z (C cleared, V vestigial)
pub fn and(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word));
    let b = cpu.read_reg(rd_field(word));
    let result = a & b;
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(a, b, result);
    cpu.pc_add(trace, 2);
}

/// Bitwise or
/// Function: Rd := Rs | Rd
/// Flags: S Z (C cleared, V vestigial)
pub fn or(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word));
    let b = cpu.read_reg(rd_field(word));
    let result = a | b;
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(a, b, result);
    cpu.pc_add(trace, 2);
}

/// Bitwise exclusive or
/// Function: Rd := Rs ^ Rd
/// Flags: S Z (C cleared, V vestigial)
pub fn xor(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let a = cpu.read_reg(rs_field(word));
    let b = cpu.read_reg(rd_field(word));
    let result = a ^ b;
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(a, b, result);
    cpu.pc_add(trace, 2);
}

/// Logical shift left
/// Function: Rd := Rd << Rs
/// Flags: S Z (C cleared, V vestigial)
pub fn lsl(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let count = cpu.read_reg(rs_field(word));
    let operand = cpu.read_reg(rd_field(word));
    // Counts of 16 or more drain every bit out.
    let result = if count >= 16 { 0 } else { operand << count };
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(count, operand, result);
    cpu.pc_add(trace, 2);
}

/// Logical shift right
/// Function: Rd := Rd >> Rs
/// Flags: S Z (C cleared, V vestigial)
pub fn lsr(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let count = cpu.read_reg(rs_field(word));
    let operand = cpu.read_reg(rd_field(word));
    let result = if count >= 16 { 0 } else { operand >> count };
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(count, operand, result);
    cpu.pc_add(trace, 2);
}

/// Arithmetic shift right
/// Function: Rd := Rd >> Rs, replicating the sign bit
/// Flags: S Z (C cleared, V vestigial)
pub fn asr(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let count = cpu.read_reg(rs_field(word));
    let operand = cpu.read_reg(rd_field(word));
    let result = ((operand as i16) >> count.min(15)) as u16;
    cpu.write_reg(trace, rd_field(word), result);
    cpu.update_logic_flags(count, operand, result);
    cpu.pc_add(trace, 2);
}
