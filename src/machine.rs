//! The execution core: a fetch-decode-execute machine over one tape.
//!
//! A [`Machine`] owns the program, the tape, the input queue, and both
//! pointers. It recognizes the eight classic symbols and treats every other
//! character as commentary. Loops are resolved by scanning the program text
//! for the matching bracket on every jump; nothing is precomputed and
//! bracket balance is never validated up front.
//!
//! Input is interactive rather than stream-shaped: `,` consumes a buffered
//! keystroke when one is pending and otherwise parks the machine in
//! [`Status::AwaitingInput`] until the session delivers a key through
//! [`Machine::resume`].
//!
//! ```
//! use bfi::{Machine, Program, Status};
//!
//! let mut machine = Machine::new(Program::new("++>+++."), Vec::new());
//! let status = machine.run().expect("program stays on the tape");
//! assert_eq!(status, Status::Halted);
//! assert_eq!(machine.output(), b"\x03\n");
//! ```

use std::io::{self, Write};

use crate::input::InputQueue;
use crate::program::Program;
use crate::tape::Tape;

/// What the machine is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Executing symbols.
    Running,
    /// Parked on a `,` until a key arrives.
    AwaitingInput,
    /// Finished, whether by reaching the end of the program, faulting, or
    /// being stopped.
    Halted,
}

/// Fatal conditions. Each one ends the run; none are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// The data pointer tried to move past the last cell.
    #[error("Pointer exceeded memory length ({len})")]
    PointerOverflow { ip: usize, len: usize },

    /// The data pointer tried to move below cell zero.
    #[error("Pointer set to -1")]
    PointerUnderflow { ip: usize },

    /// The output sink failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

/// The interpreter proper.
///
/// Construction puts the machine at instruction zero, data pointer zero, on
/// an all-zero tape, in [`Status::Running`]. Output produced by `.` goes to
/// the `W` sink and is flushed per write so it interleaves honestly with
/// typed input.
#[derive(Debug)]
pub struct Machine<W> {
    program: Program,
    tape: Tape,
    input: InputQueue,
    ip: usize,
    ptr: usize,
    status: Status,
    out: W,
}

impl<W: Write> Machine<W> {
    /// A machine over `program` with the standard 30,000-cell tape.
    pub fn new(program: Program, out: W) -> Self {
        Self::with_tape(program, Tape::new(), out)
    }

    /// A machine over `program` with a caller-supplied tape.
    pub fn with_tape(program: Program, tape: Tape, out: W) -> Self {
        Self {
            program,
            tape,
            input: InputQueue::new(),
            ip: 0,
            ptr: 0,
            status: Status::Running,
            out,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The output sink, for inspection after a run.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Buffer a keystroke for a later `,`.
    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Stop the machine unconditionally. Writes nothing; the interrupt key
    /// ends a session through this.
    pub fn halt(&mut self) {
        self.status = Status::Halted;
    }

    /// Execute symbols until the machine suspends on input or halts.
    pub fn run(&mut self) -> Result<Status, MachineError> {
        while self.status == Status::Running {
            self.step()?;
        }
        Ok(self.status)
    }

    /// Deliver the key a suspended `,` was waiting for: store its code point
    /// at the data pointer, leave [`Status::AwaitingInput`], and advance
    /// past the `,`. The caller re-enters [`Machine::run`] afterwards.
    ///
    /// Code points above 255 keep only their low byte, matching the 8-bit
    /// cell they land in.
    pub fn resume(&mut self, ch: char) -> Result<Status, MachineError> {
        if self.status != Status::AwaitingInput {
            return Ok(self.status);
        }
        self.tape.write(self.ptr, ch as u8);
        self.status = Status::Running;
        self.advance()?;
        Ok(self.status)
    }

    /// Execute the symbol under the instruction pointer.
    ///
    /// Every path except a suspending `,` ends by advancing the instruction
    /// pointer; advancing past the end of the program writes the trailing
    /// newline and halts.
    pub fn step(&mut self) -> Result<(), MachineError> {
        if self.status != Status::Running {
            return Ok(());
        }

        match self.program.symbol_at(self.ip) {
            Some('+') => self.tape.increment(self.ptr),
            Some('-') => self.tape.decrement(self.ptr),
            Some('>') => {
                if self.ptr + 1 >= self.tape.len() {
                    self.status = Status::Halted;
                    return Err(MachineError::PointerOverflow {
                        ip: self.ip,
                        len: self.tape.len(),
                    });
                }
                self.ptr += 1;
            }
            Some('<') => {
                if self.ptr == 0 {
                    self.status = Status::Halted;
                    return Err(MachineError::PointerUnderflow { ip: self.ip });
                }
                self.ptr -= 1;
            }
            Some('.') => self.emit(self.tape.read(self.ptr))?,
            Some(',') => match self.input.pop_front() {
                Some(ch) => self.tape.write(self.ptr, ch as u8),
                None => {
                    // Park on the ',' itself; resume() stores the key and
                    // advances past it.
                    self.status = Status::AwaitingInput;
                    return Ok(());
                }
            },
            Some('[') => {
                if self.tape.read(self.ptr) == 0 {
                    self.jump_forward();
                }
            }
            Some(']') => {
                if self.tape.read(self.ptr) != 0 {
                    self.jump_backward();
                }
            }
            // Anything else is commentary.
            Some(_) => {}
            // Only reachable when the program is empty; the end-of-program
            // check below finishes the run.
            None => {}
        }

        self.advance()
    }

    /// Resolve `[` over a zero cell: scan right for the matching `]`,
    /// tracking nesting depth. The match becomes the current instruction and
    /// the usual post-step advance moves past it. An unmatched `[` scans off
    /// the end, which finishes the run at the end-of-program check.
    fn jump_forward(&mut self) {
        let mut depth = 0usize;
        self.ip += 1;
        while let Some(symbol) = self.program.symbol_at(self.ip) {
            match symbol {
                ']' if depth == 0 => return,
                ']' => depth -= 1,
                '[' => depth += 1,
                _ => {}
            }
            self.ip += 1;
        }
    }

    /// Resolve `]` over a nonzero cell: scan left for the matching `[`. An
    /// unmatched `]` runs off the front and finishes the run the same way an
    /// unmatched `[` does.
    fn jump_backward(&mut self) {
        let mut depth = 0usize;
        while self.ip > 0 {
            self.ip -= 1;
            match self.program.symbol_at(self.ip) {
                Some('[') if depth == 0 => return,
                Some('[') => depth -= 1,
                Some(']') => depth += 1,
                _ => {}
            }
        }
        self.ip = self.program.len();
    }

    /// Write the character whose code point is `byte`, UTF-8 encoded, and
    /// flush so output ordering tracks execution exactly.
    fn emit(&mut self, byte: u8) -> Result<(), MachineError> {
        let ip = self.ip;
        let mut buf = [0u8; 4];
        let encoded = (byte as char).encode_utf8(&mut buf);
        self.out
            .write_all(encoded.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| MachineError::Io { ip, source })
    }

    /// Move to the next instruction; past the end of the program, write the
    /// trailing newline and halt.
    fn advance(&mut self) -> Result<(), MachineError> {
        self.ip += 1;
        if self.ip >= self.program.len() {
            let ip = self.ip;
            self.out
                .write_all(b"\n")
                .and_then(|_| self.out.flush())
                .map_err(|source| MachineError::Io { ip, source })?;
            self.status = Status::Halted;
        }
        Ok(())
    }
}
