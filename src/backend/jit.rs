use std::collections::HashMap;

use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{Linkage, Module};

use super::lowering::Instr;
use super::Executor;
use crate::error::BackendError;

extern "C" fn print_i64(value: i64) -> i32 {
    println!("{}", value);
    0
}

/// Native-code executor: translates the instruction list into a single
/// `main` function, compiles it in process, and invokes it once.
pub struct Jit {
    module: JITModule,
    ctx: codegen::Context,
}

impl Jit {
    pub fn new() -> Result<Self, BackendError> {
        let mut builder = JITBuilder::new(cranelift_module::default_libcall_names())
            .map_err(|e| BackendError::Compile(e.to_string()))?;
        builder.symbol("print", print_i64 as *const u8);
        let module = JITModule::new(builder);
        let ctx = module.make_context();
        Ok(Self { module, ctx })
    }

    fn compile(&mut self, instructions: &[Instr]) -> Result<fn() -> i32, BackendError> {
        let mut print_sig = self.module.make_signature();
        print_sig.params.push(AbiParam::new(types::I64));
        print_sig.returns.push(AbiParam::new(types::I32));
        let print_func = self
            .module
            .declare_function("print", Linkage::Import, &print_sig)
            .map_err(|e| BackendError::Compile(e.to_string()))?;

        let mut sig = self.module.make_signature();
        sig.returns.push(AbiParam::new(types::I32));
        let func_id = self
            .module
            .declare_function("main", Linkage::Local, &sig)
            .map_err(|e| BackendError::Compile(e.to_string()))?;
        self.ctx.func.signature = sig;

        let mut builder_context = FunctionBuilderContext::new();
        let mut builder = FunctionBuilder::new(&mut self.ctx.func, &mut builder_context);
        let entry_block = builder.create_block();
        builder.switch_to_block(entry_block);

        let print_ref = self.module.declare_func_in_func(print_func, builder.func);

        let mut stack: Vec<Value> = Vec::new();
        let mut variables: HashMap<u32, Variable> = HashMap::new();

        for (index, instr) in instructions.iter().enumerate() {
            match instr {
                Instr::LoadConst(value) => {
                    stack.push(builder.ins().iconst(types::I64, *value));
                }
                Instr::StoreSlot(slot) => {
                    let value = stack
                        .pop()
                        .ok_or(BackendError::StackUnderflow { index })?;
                    let next_index = variables.len();
                    let var = *variables.entry(*slot).or_insert_with(|| {
                        let var = Variable::new(next_index);
                        builder.declare_var(var, types::I64);
                        var
                    });
                    builder.def_var(var, value);
                }
                Instr::CallPrint => {
                    let value = stack
                        .pop()
                        .ok_or(BackendError::StackUnderflow { index })?;
                    builder.ins().call(print_ref, &[value]);
                }
                Instr::Nop(_) => {
                    builder.ins().nop();
                }
            }
        }

        let zero = builder.ins().iconst(types::I32, 0);
        builder.ins().return_(&[zero]);
        builder.seal_all_blocks();
        builder.finalize();

        self.module
            .define_function(func_id, &mut self.ctx)
            .map_err(|e| BackendError::Compile(e.to_string()))?;
        self.module.clear_context(&mut self.ctx);
        self.module
            .finalize_definitions()
            .map_err(|e| BackendError::Compile(e.to_string()))?;

        let code = self.module.get_finalized_function(func_id);
        // The produced routine matches the declared `fn() -> i32` signature.
        Ok(unsafe { std::mem::transmute::<*const u8, fn() -> i32>(code) })
    }
}

impl Executor for Jit {
    fn execute(&mut self, instructions: &[Instr]) -> Result<(), BackendError> {
        let entry = self.compile(instructions)?;
        entry();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jit_executes_lowered_program() {
        let instructions = vec![
            Instr::LoadConst(3),
            Instr::StoreSlot(0),
            Instr::LoadConst(7),
            Instr::CallPrint,
            Instr::Nop("declaration"),
        ];
        let mut jit = Jit::new().expect("jit init");
        jit.execute(&instructions).expect("jit run");
    }

    #[test]
    fn test_jit_rejects_underflowing_program() {
        let mut jit = Jit::new().expect("jit init");
        let result = jit.execute(&[Instr::CallPrint]);
        assert!(matches!(
            result,
            Err(BackendError::StackUnderflow { index: 0 })
        ));
    }

    #[test]
    fn test_jit_handles_empty_program() {
        let mut jit = Jit::new().expect("jit init");
        jit.execute(&[]).expect("empty program still returns 0");
    }
}
