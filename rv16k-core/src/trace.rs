//! Per-step execution trace sink.
//!
//! The engine reports every architectural mutation through a `Tracer` that
//! the driver constructs once after argument parsing. A quiet tracer drops
//! everything; a buffering tracer keeps the text in memory so tests can
//! compare it byte for byte.

use crate::cpu::Flags;
use std::fmt;

enum Sink {
    Quiet,
    Stdout,
    Buffer(String),
}

pub struct Tracer {
    sink: Sink,
}

impl Tracer {
    pub fn quiet() -> Tracer {
        Tracer { sink: Sink::Quiet }
    }

    pub fn stdout() -> Tracer {
        Tracer { sink: Sink::Stdout }
    }

    pub fn buffer() -> Tracer {
        Tracer {
            sink: Sink::Buffer(String::new()),
        }
    }

    /// The text collected so far. Empty for non-buffering sinks.
    pub fn contents(&self) -> &str {
        match &self.sink {
            Sink::Buffer(text) => text,
            _ => "",
        }
    }

    pub fn instruction(&mut self, mnemonic: &str) {
        self.emit(format_args!("Inst:{}\t", mnemonic));
    }

    pub fn pc(&mut self, pc: u16) {
        self.emit(format_args!("PC <= 0x{:04X} ", pc));
    }

    pub fn reg(&mut self, index: u8, value: u16) {
        self.emit(format_args!("Reg x{} <= 0x{:04X} ", index, value));
    }

    pub fn ram(&mut self, addr: u16, value: u8) {
        self.emit(format_args!("DataRam[0x{:04X}] <= 0x{:02X} ", addr, value));
    }

    /// Closes a step line: the flag fragment plus the newline.
    pub fn flags(&mut self, flags: Flags) {
        self.emit(format_args!("FLAGS(SZCV) <= {} \n", flags));
    }

    pub fn invalid_operation(&mut self) {
        self.emit(format_args!("Invalid Operation!\n"));
    }

    fn emit(&mut self, args: fmt::Arguments) {
        match &mut self.sink {
            Sink::Quiet => {}
            Sink::Stdout => print!("{}", args),
            Sink::Buffer(text) => {
                use fmt::Write;
                // Writing into a String cannot fail.
                let _ = text.write_fmt(args);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quiet_sink_emits_nothing() {
        let mut trace = Tracer::quiet();
        trace.instruction("NOP");
        trace.pc(2);
        trace.flags(Flags::default());
        assert_eq!(trace.contents(), "");
    }

    #[test]
    fn buffer_sink_collects_fragments_in_order() {
        let mut trace = Tracer::buffer();
        trace.instruction("LI");
        trace.pc(0x0002);
        trace.reg(3, 0xABCD);
        trace.ram(0x0010, 0xCD);
        trace.flags(Flags {
            sign: true,
            zero: false,
            carry: false,
            overflow: false,
        });
        assert_eq!(
            trace.contents(),
            "Inst:LI\tPC <= 0x0002 Reg x3 <= 0xABCD DataRam[0x0010] <= 0xCD \
             FLAGS(SZCV) <= 1000 \n",
        );
    }
}
