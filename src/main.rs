use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use bfi::{Program, console};

/// Run a Brainfuck program with live keyboard input.
#[derive(Parser, Debug)]
#[command(name = "bfi", version, about)]
struct Cli {
    /// Path to the program file; the whole file is the instruction stream
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // SIGINT can still arrive out of band (raw mode only remaps the ^C key,
    // and the signal also fires when input is piped). Restore the terminal
    // and leave the same way the in-band interrupt does.
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("bfi: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        std::process::exit(1);
    }

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("bfi: failed to read program file: {e}");
            let _ = io::stderr().flush();
            std::process::exit(1);
        }
    };

    std::process::exit(console::run(Program::new(&source)));
}
