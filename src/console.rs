//! The interactive session: terminal setup, the keystroke source, and the
//! loop that drives a [`Machine`] against live input.
//!
//! When standard input is a terminal it is switched to raw mode for the
//! whole session, so keys reach the program one at a time without waiting
//! for Enter and without local echo. Piped input works the same way, just
//! without the terminal setup.

use std::io::{self, IsTerminal, Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use nu_ansi_term::Color::Red;

use crate::machine::{Machine, MachineError, Status};
use crate::program::Program;

/// The byte `^C` produces in raw mode (ETX). Receiving it ends the session
/// immediately, whatever the machine is doing.
pub const INTERRUPT: char = '\u{3}';

/// How a session ended. All three are orderly endings with exit code zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran off its end; the trailing newline is already out.
    Finished,
    /// The interrupt keystroke arrived.
    Interrupted,
    /// Input closed while the machine was waiting for a key, so no key can
    /// ever arrive.
    InputClosed,
}

/// Run `program` against the real terminal and return the process exit code:
/// zero for any orderly ending, one for a fatal fault.
pub fn run(program: Program) -> i32 {
    let raw = io::stdin().is_terminal();
    if raw {
        if let Err(e) = enable_raw_mode() {
            eprintln!("bfi: failed to enable raw mode: {e}");
            return 1;
        }
    }

    let keys = spawn_keystroke_source();
    let mut machine = Machine::new(program, io::stdout());
    let result = drive(&mut machine, &keys);

    if raw {
        let _ = disable_raw_mode();
    }
    let _ = io::stdout().flush();

    match result {
        Ok(_) => 0,
        Err(err) => {
            report_fatal(&err);
            1
        }
    }
}

/// Read standard input one byte at a time on a dedicated thread, forwarding
/// each byte as a character. One key per byte is the supported shape;
/// multibyte sequences arrive as their individual bytes.
fn spawn_keystroke_source() -> Receiver<char> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut byte = [0u8; 1];
        loop {
            match stdin.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(byte[0] as char).is_err() {
                        break;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    rx
}

/// The session's run loop.
///
/// While the machine is running, keys that arrived in the meantime are
/// buffered and the machine continues; while it is awaiting input, the loop
/// blocks for one key and resumes with it. The interrupt key is checked
/// before a key is buffered or delivered, so it wins over pending data. A
/// closed key source while waiting means no input can ever arrive, which
/// ends the session quietly.
fn drive<W: Write>(
    machine: &mut Machine<W>,
    keys: &Receiver<char>,
) -> Result<Outcome, MachineError> {
    loop {
        match machine.status() {
            Status::Halted => return Ok(Outcome::Finished),
            Status::AwaitingInput => match keys.recv() {
                Ok(INTERRUPT) => {
                    machine.halt();
                    return Ok(Outcome::Interrupted);
                }
                Ok(ch) => {
                    machine.resume(ch)?;
                }
                Err(_) => return Ok(Outcome::InputClosed),
            },
            Status::Running => {
                for ch in keys.try_iter() {
                    if ch == INTERRUPT {
                        machine.halt();
                        return Ok(Outcome::Interrupted);
                    }
                    machine.push_input(ch);
                }
                machine.run()?;
            }
        }
    }
}

/// Render a fatal fault on stderr, styled when stderr is a terminal.
fn report_fatal(err: &MachineError) {
    let header = if io::stderr().is_terminal() {
        Red.bold().paint("Fatal!").to_string()
    } else {
        "Fatal!".to_string()
    };
    eprintln!("\n\n{header} {err}\nHalting!");
    let _ = io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_for(source: &str) -> Machine<Vec<u8>> {
        Machine::new(Program::new(source), Vec::new())
    }

    #[test]
    fn delivers_key_to_a_waiting_machine() {
        let (tx, rx) = mpsc::channel();
        tx.send('Z').unwrap();
        let mut machine = machine_for(",.");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::Finished);
        assert_eq!(machine.output(), b"Z\n");
    }

    #[test]
    fn early_keys_are_buffered_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send('a').unwrap();
        tx.send('b').unwrap();
        let mut machine = machine_for(",.,.");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::Finished);
        assert_eq!(machine.output(), b"ab\n");
    }

    #[test]
    fn interrupt_stops_a_waiting_machine() {
        let (tx, rx) = mpsc::channel();
        tx.send(INTERRUPT).unwrap();
        let mut machine = machine_for(",.");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::Interrupted);
        assert_eq!(machine.status(), Status::Halted);
        assert!(machine.output().is_empty());
    }

    #[test]
    fn interrupt_wins_over_buffered_keys() {
        let (tx, rx) = mpsc::channel();
        tx.send(INTERRUPT).unwrap();
        tx.send('x').unwrap();
        let mut machine = machine_for("+.");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::Interrupted);
        assert!(machine.output().is_empty());
    }

    #[test]
    fn closed_source_while_waiting_ends_the_session() {
        let (tx, rx) = mpsc::channel::<char>();
        drop(tx);
        let mut machine = machine_for(",");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::InputClosed);
        assert_eq!(machine.status(), Status::AwaitingInput);
        assert!(machine.output().is_empty());
    }

    #[test]
    fn program_without_input_finishes_on_an_idle_source() {
        let (_tx, rx) = mpsc::channel::<char>();
        let mut machine = machine_for("++.");
        let outcome = drive(&mut machine, &rx).unwrap();
        assert_eq!(outcome, Outcome::Finished);
        assert_eq!(machine.output(), b"\x02\n");
    }

    #[test]
    fn fatal_fault_surfaces_from_the_loop() {
        let (_tx, rx) = mpsc::channel::<char>();
        let mut machine = machine_for("<");
        let err = drive(&mut machine, &rx).unwrap_err();
        assert!(matches!(err, MachineError::PointerUnderflow { .. }));
    }
}
