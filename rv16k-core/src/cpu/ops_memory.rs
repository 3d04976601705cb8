use crate::bits::{get_bits, sign_ext};
use crate::constants::STACK_POINTER;
use crate::cpu::Cpu;
use crate::trace::Tracer;

fn rd_field(word: u16) -> u8 {
    get_bits(word, 0, 3) as u8
}

fn rs_field(word: u16) -> u8 {
    get_bits(word, 4, 7) as u8
}

/// Load immediate
/// Function: Rd := imm_w
/// Flags: S Z (C and V cleared)
pub fn li(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    cpu.update_value_flags(imm);
    cpu.write_reg(trace, rd_field(word), imm);
    cpu.pc_add(trace, 2);
}

/// Move register
/// Function: Rd := Rs
/// Flags: S Z (C and V cleared)
pub fn mov(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let value = cpu.read_reg(rs_field(word));
    cpu.write_reg(trace, rd_field(word), value);
    cpu.pc_add(trace, 2);
    cpu.update_value_flags(value);
}

/// Store word, stack-relative
/// Function: mem_w[x1 + imm] := Rs, imm = word[8..11]<<5 | rd<<1
/// Flags: S Z C V from the address add
pub fn swsp(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let imm = (get_bits(word, 8, 11) << 5) + (u16::from(rd_field(word)) << 1);
    let base = cpu.read_reg(STACK_POINTER);
    let addr = cpu.update_add_flags(imm, base);
    let value = cpu.read_reg(rs_field(word));
    cpu.write_ram_word(trace, addr, value);
    cpu.pc_add(trace, 2);
}

/// Store word
/// Function: mem_w[imm_w + Rd] := Rs
/// Flags: S Z C V from the address add
pub fn sw(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    let base = cpu.read_reg(rd_field(word));
    let addr = cpu.update_add_flags(imm, base);
    let value = cpu.read_reg(rs_field(word));
    cpu.write_ram_word(trace, addr, value);
    cpu.pc_add(trace, 2);
}

/// Store byte
/// Function: mem_b[imm_w + Rd] := Rs & 0xFF
/// Flags: S Z C V from the address add
pub fn sb(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    let base = cpu.read_reg(rd_field(word));
    let addr = cpu.update_add_flags(imm, base);
    let value = (cpu.read_reg(rs_field(word)) & 0xFF) as u8;
    cpu.write_ram_byte(trace, addr, value);
    cpu.pc_add(trace, 2);
}

/// Load word, stack-relative
/// Function: Rd := mem_w[x1 + imm], imm = word[4..11]<<1
/// Flags: S Z C V from the address add
pub fn lwsp(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    let imm = get_bits(word, 4, 11) << 1;
    let base = cpu.read_reg(STACK_POINTER);
    let addr = cpu.update_add_flags(imm, base);
    let value = cpu.read_ram_word(addr);
    cpu.write_reg(trace, rd_field(word), value);
    cpu.pc_add(trace, 2);
}

/// Load word
/// Function: Rd := mem_w[imm_w + Rs]
/// Flags: S Z C V from the address add
pub fn lw(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    let base = cpu.read_reg(rs_field(word));
    let addr = cpu.update_add_flags(imm, base);
    let value = cpu.read_ram_word(addr);
    cpu.write_reg(trace, rd_field(word), value);
    cpu.pc_add(trace, 2);
}

/// Load byte unsigned
/// Function: Rd := zero_ext(mem_b[imm_w + Rs])
/// Flags: S Z C V from the address add
pub fn lbu(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    let base = cpu.read_reg(rs_field(word));
    let addr = cpu.update_add_flags(imm, base);
    let value = u16::from(cpu.read_ram_byte(addr));
    cpu.write_reg(trace, rd_field(word), value);
    cpu.pc_add(trace, 2);
}

/// Load byte signed
/// Function: Rd := sign_ext(mem_b[imm_w + Rs], 7)
/// Flags: S Z C V from the address add
pub fn lb(cpu: &mut Cpu, word: u16, trace: &mut Tracer) {
    cpu.pc_add(trace, 2);
    let imm = cpu.fetch_word();
    let base = cpu.read_reg(rs_field(word));
    let addr = cpu.update_add_flags(imm, base);
    let value = sign_ext(u16::from(cpu.read_ram_byte(addr)), 7);
    cpu.write_reg(trace, rd_field(word), value);
    cpu.pc_add(trace, 2);
}
