use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slang::compiler::Compiler;
use slang::interpreter::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the interactive prompt
    Repl,
    /// Compiles and runs a source file
    Build {
        /// The source file to compile
        source_path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build { source_path }) => Compiler::compile_file(source_path),
        Some(Commands::Repl) | None => run_repl(),
    }
}

fn run_repl() {
    println!("== slang interpreter v{} ==", env!("CARGO_PKG_VERSION"));

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        print!(">>> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("[ERROR] {}", e);
        }
        match stdin.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                continue;
            }
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line) {
            break;
        }
        if let Err(e) = session.run_line(line) {
            eprintln!("[ERROR] {}", e);
        }
    }
}

/// The literal word `exit`, any casing, ends the session.
fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit")
}

#[cfg(test)]
mod tests {
    use super::is_exit;

    #[test]
    fn test_exit_is_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("Exit"));
        assert!(is_exit("EXIT"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
    }
}
