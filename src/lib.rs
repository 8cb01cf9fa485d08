//! An interactive Brainfuck interpreter.
//!
//! Programs run against a 30,000-cell byte tape, and standard input is a
//! keyboard rather than a stream: keystrokes arrive as discrete events, keys
//! pressed while the program is busy are buffered for later `,` instructions,
//! and a `,` with nothing buffered suspends the machine until the next key.
//!
//! Behaviors:
//! - Cell arithmetic wraps modulo 256; moving the data pointer off either
//!   end of the tape is fatal.
//! - Matching brackets are found by scanning the program text on every jump.
//!   Nothing is precomputed and bracket balance is never validated.
//! - Characters outside `><+-.,[]` are ignored.
//! - A trailing newline is written when the program runs off its end.
//! - The raw-mode `^C` byte ends the session immediately.
//!
//! The pieces: a [`Tape`], a [`Program`], an [`InputQueue`], and the
//! [`Machine`] that drives them. The [`console`] module owns the terminal
//! session around the machine.
//!
//! Quick start, with a byte buffer standing in for the terminal:
//!
//! ```
//! use bfi::{Machine, Program};
//!
//! let mut machine = Machine::new(Program::new("+++."), Vec::new());
//! machine.run().expect("program stays on the tape");
//! assert_eq!(machine.output(), b"\x03\n");
//! ```

pub mod console;
pub mod input;
pub mod machine;
pub mod program;
pub mod tape;

pub use input::InputQueue;
pub use machine::{Machine, MachineError, Status};
pub use program::Program;
pub use tape::{TAPE_LEN, Tape};
