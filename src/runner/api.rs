//! Entry point for running programs: `EvalContext` owns a realm and its
//! execution context stack, and survives across `eval_source` calls so a
//! REPL keeps its global bindings.

use crate::parser::ast::ProgramData;
use crate::parser::static_semantics::{
    lexically_scoped_function_declarations, var_declared_names,
};
use crate::parser::JsParser;
use crate::runner::ds::env_record::{new_declarative_environment, EnvironmentRecordType};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::execution_context::{ExecutionContext, ExecutionContextStack};
use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::realm::{set_default_global_bindings, CodeRealm};
use crate::runner::ds::value::JsValue;
use crate::runner::eval::function::instantiate_function_object;
use crate::runner::eval::statement::run_statement_list;
use crate::runner::eval::types::ValueResult;
use crate::runner::std_lib;

/// Tunables injected at construction time.
pub struct EvalOptions {
    /// Run every program as if it opened with `"use strict"`.
    pub force_strict: bool,
    /// Script call frames allowed before a call raises a range error.
    pub max_call_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            force_strict: false,
            max_call_depth: 512,
        }
    }
}

/// One isolated engine instance. Two contexts share nothing, so globals
/// mutated in one are invisible to the other.
pub struct EvalContext {
    pub realm: CodeRealm,
    pub ctx_stack: ExecutionContextStack,
    pub options: EvalOptions,
}

impl EvalContext {
    pub fn new() -> Self {
        EvalContext::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        let realm = CodeRealm::new();
        set_default_global_bindings(&realm);
        std_lib::register_builtins(&realm);
        let mut ctx_stack = ExecutionContextStack::new();
        // The root context stays pushed for the life of the instance.
        ctx_stack.push_execution_ctx(ExecutionContext {
            function: None,
            lex_env: realm.global_env.clone(),
            var_env: realm.global_env.clone(),
            is_strict: options.force_strict,
        });
        EvalContext {
            realm,
            ctx_stack,
            options,
        }
    }

    /// Parse and run `source`, returning the last statement's value.
    pub fn eval_source(&mut self, source: &str) -> ValueResult {
        let program = JsParser::parse_to_ast_from_str(source)
            .map_err(|e| JErrorType::SyntaxError(e.to_string()))?;
        self.execute_program(&program)
    }

    pub fn execute_program(&mut self, program: &ProgramData) -> ValueResult {
        let strict = program.is_strict || self.options.force_strict;
        self.running_ctx_mut().is_strict = strict;
        global_declaration_instantiation(self, program)?;
        let completion = run_statement_list(&program.body, self)?;
        Ok(completion.get_value())
    }

    pub fn running_ctx(&self) -> &ExecutionContext {
        match self.ctx_stack.get_running_execution_ctx() {
            Some(ctx) => ctx,
            None => panic!("no running execution context"),
        }
    }

    pub fn running_ctx_mut(&mut self) -> &mut ExecutionContext {
        match self.ctx_stack.get_running_execution_ctx_mut() {
            Some(ctx) => ctx,
            None => panic!("no running execution context"),
        }
    }

    pub fn current_lex_env(&self) -> JsLexEnvironmentType {
        self.running_ctx().lex_env.clone()
    }

    pub fn is_strict_code(&self) -> bool {
        self.running_ctx().is_strict
    }

    /// Enter a fresh declarative scope for a block.
    pub fn push_block_scope(&mut self) {
        let outer = self.current_lex_env();
        let scope = new_declarative_environment(Some(outer));
        self.running_ctx_mut().lex_env = scope;
    }

    /// Leave the innermost block scope, restoring its outer environment.
    pub fn pop_block_scope(&mut self) {
        let outer = self.current_lex_env().borrow().outer.clone();
        if let Some(outer) = outer {
            self.running_ctx_mut().lex_env = outer;
        }
    }

    /// Declare a `let` or `const` name in the innermost scope. The binding
    /// stays uninitialized until [`EvalContext::initialize_binding`] runs.
    pub fn create_binding(&mut self, name: &str, is_immutable: bool) -> Result<(), JErrorType> {
        let lex = self.current_lex_env();
        let mut env = lex.borrow_mut();
        let already_declared = match &env.inner {
            EnvironmentRecordType::Global(record) => {
                record.has_lexical_declaration(name) || record.has_var_declaration(name)
            }
            other => other.as_env_record().has_binding(name),
        };
        if already_declared {
            return Err(JErrorType::SyntaxError(format!(
                "Identifier '{}' has already been declared",
                name
            )));
        }
        let record = env.inner.as_env_record_mut();
        if is_immutable {
            record.create_immutable_binding(name.to_string());
        } else {
            record.create_mutable_binding(name.to_string());
        }
        Ok(())
    }

    pub fn initialize_binding(&mut self, name: &str, value: JsValue) -> Result<(), JErrorType> {
        let lex = self.current_lex_env();
        let result = lex
            .borrow_mut()
            .inner
            .as_env_record_mut()
            .initialize_binding(name, value);
        result
    }

    /// Read a binding from the global environment, e.g. to inspect what a
    /// script left behind after it ran.
    pub fn get_global_binding(&self, name: &str) -> ValueResult {
        let env = self.realm.global_env.borrow();
        let result = env.inner.as_env_record().get_binding_value(name);
        result
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        EvalContext::new()
    }
}

/// Hoisting pass for top-level code. `var` names and function declarations
/// become properties of the global object before any statement runs, which
/// is what lets a program call a function declared below the call site.
fn global_declaration_instantiation(
    ctx: &mut EvalContext,
    program: &ProgramData,
) -> Result<(), JErrorType> {
    let global_env = ctx.realm.global_env.clone();
    {
        let mut env = global_env.borrow_mut();
        if let EnvironmentRecordType::Global(record) = &mut env.inner {
            for name in var_declared_names(&program.body) {
                record.create_global_var_binding(name)?;
            }
        }
    }
    for function in lexically_scoped_function_declarations(&program.body) {
        let name = match &function.name {
            Some(id) => id.name.clone(),
            None => continue,
        };
        let function_object = instantiate_function_object(ctx, function);
        let mut env = global_env.borrow_mut();
        if let EnvironmentRecordType::Global(record) = &mut env.inner {
            record.create_global_function_binding(name, function_object)?;
        }
    }
    Ok(())
}
