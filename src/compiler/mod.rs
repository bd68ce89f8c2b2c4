use std::fs;
use std::path::Path;

use crate::backend::jit::Jit;
use crate::backend::lowering::Lowerer;
use crate::backend::vm::Vm;
use crate::backend::{self, Executor};
use crate::interpreter::evaluator::Evaluator;
use crate::parser::line::LineParser;

/// Batch front end: read a source file, parse it line by line, evaluate
/// the statements, and on full success lower the program, run it through
/// the native backend, and print the instruction trace.
///
/// This is an inner error boundary: the first fatal evaluation error
/// aborts the remaining statements but the process keeps running; the
/// caller decides what happens next.
pub struct Compiler;

impl Compiler {
    pub fn compile_file(path: impl AsRef<Path>) {
        let path = path.as_ref();
        if !path.exists() {
            println!("File not found: {}", path.display());
            return;
        }

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("[ERROR] could not read {}: {}", path.display(), e);
                return;
            }
        };

        println!("[INFO] compiling {}", path.display());
        println!("[INFO] parsing...");
        let mut parser = LineParser::new();
        let program = parser.parse(&source);
        for error in parser.errors() {
            eprintln!("[ERROR] {}", error);
        }

        println!("[INFO] evaluating...");
        println!("==================== program output ====================");
        let mut evaluator = Evaluator::new();
        let result = evaluator.run(&program);
        println!("========================================================");
        if let Err(e) = result {
            eprintln!("[ERROR] {}", e);
            println!("[INFO] aborted, remaining statements skipped");
            return;
        }

        let mut lowerer = Lowerer::new();
        lowerer.lower(&backend::reduce(&program));

        let native = Jit::new().and_then(|mut jit| jit.execute(lowerer.instructions()));
        if let Err(e) = native {
            eprintln!("[ERROR] native execution failed: {}", e);
            println!("[INFO] falling back to the vm executor");
            let mut vm = Vm::new();
            if let Err(e) = vm.execute(lowerer.instructions()) {
                eprintln!("[ERROR] {}", e);
                return;
            }
        }

        println!("================= lowered instructions =================");
        for instr in lowerer.instructions() {
            println!("[instr] {}", instr);
        }
        println!("========================================================");
        println!("[INFO] compilation finished");
    }
}
