use crate::runner::ds::lex_env::JsLexEnvironmentType;
use crate::runner::ds::object::JsObjectType;

/// State of one running frame: the function being evaluated (`None` for
/// top-level code), its scope chains and whether its code is strict.
///
/// `lex_env` moves as blocks are entered and left; `var_env` stays on the
/// frame's function (or global) scope so `var` hoisting lands in the right
/// place.
pub struct ExecutionContext {
    pub function: Option<JsObjectType>,
    pub lex_env: JsLexEnvironmentType,
    pub var_env: JsLexEnvironmentType,
    pub is_strict: bool,
}

pub struct ExecutionContextStack {
    stack: Vec<ExecutionContext>,
}

impl ExecutionContextStack {
    pub fn new() -> Self {
        ExecutionContextStack { stack: Vec::new() }
    }

    pub fn get_running_execution_ctx(&self) -> Option<&ExecutionContext> {
        self.stack.last()
    }

    pub fn get_running_execution_ctx_mut(&mut self) -> Option<&mut ExecutionContext> {
        self.stack.last_mut()
    }

    pub fn pop_running_execution_ctx(&mut self) -> Option<ExecutionContext> {
        self.stack.pop()
    }

    pub fn push_execution_ctx(&mut self, ctx: ExecutionContext) {
        self.stack.push(ctx)
    }

    /// Frame count, compared against the configured call depth limit.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
