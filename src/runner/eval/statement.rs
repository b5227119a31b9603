//! Statement execution. Statements complete normally or with a `return`;
//! runtime errors travel separately as `Err`.

use crate::parser::ast::{
    BlockStatementData, ExpressionType, StatementType, VariableDeclarationData,
    VariableDeclarationKind,
};
use crate::parser::static_semantics::lexically_scoped_function_declarations;
use crate::runner::api::EvalContext;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::JsValue;

use super::expression::{
    evaluate_expression, put_reference_value, resolve_identifier_reference,
};
use super::function::instantiate_function_object;
use super::types::{Completion, EvalResult};

pub fn execute_statement(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    match stmt {
        StatementType::EmptyStatement { .. } => Ok(Completion::normal()),

        StatementType::ExpressionStatement { expression, .. } => {
            let value = evaluate_expression(expression, ctx)?;
            Ok(Completion::normal_with_value(value))
        }

        StatementType::BlockStatement(block) => execute_block_statement(block, ctx),

        StatementType::VariableDeclaration(declaration) => {
            execute_variable_declaration(declaration, ctx)
        }

        // Hoisted before the surrounding statement list ran, so by now the
        // binding already holds the function object.
        StatementType::FunctionDeclaration(_) => Ok(Completion::normal()),

        StatementType::ReturnStatement { argument, .. } => match argument {
            Some(argument) => {
                let value = evaluate_expression(argument, ctx)?;
                Ok(Completion::return_value(value))
            }
            None => Ok(Completion::return_undefined()),
        },

        StatementType::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            if to_boolean(&evaluate_expression(test, ctx)?) {
                execute_statement(consequent, ctx)
            } else {
                match alternate {
                    Some(alternate) => execute_statement(alternate, ctx),
                    None => Ok(Completion::normal()),
                }
            }
        }

        StatementType::WhileStatement { test, body, .. } => {
            execute_while_statement(test, body, ctx)
        }
    }
}

/// Run a statement list, threading the value of the last value-producing
/// statement through the trailing ones so the list's completion value is
/// the last expression evaluated, not a trailing declaration's emptiness.
pub fn run_statement_list(statements: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    let mut result = Completion::normal();
    for stmt in statements {
        let next = execute_statement(stmt, ctx)?;
        let next = next.update_empty(result.get_value());
        if next.is_abrupt() {
            return Ok(next);
        }
        result = next;
    }
    Ok(result)
}

/// Instantiate the function declarations sitting directly in `statements`
/// and bind them in the current scope. Runs before the list itself, which
/// is what lets calls appear above the declaration.
pub fn hoist_function_declarations(
    statements: &[StatementType],
    ctx: &mut EvalContext,
) -> Result<(), JErrorType> {
    for function in lexically_scoped_function_declarations(statements) {
        let name = match &function.name {
            Some(id) => id.name.clone(),
            None => continue,
        };
        let function_object = instantiate_function_object(ctx, function);
        let lex = ctx.current_lex_env();
        let mut env = lex.borrow_mut();
        let record = env.inner.as_env_record_mut();
        if record.has_binding(&name) {
            record.set_mutable_binding(&name, function_object)?;
        } else {
            record.create_mutable_binding(name.clone());
            record.initialize_binding(&name, function_object)?;
        }
    }
    Ok(())
}

fn execute_block_statement(block: &BlockStatementData, ctx: &mut EvalContext) -> EvalResult {
    ctx.push_block_scope();
    // Capture the outcome before popping so an error cannot leave the
    // block scope on the chain.
    let result = match hoist_function_declarations(&block.body, ctx) {
        Ok(()) => run_statement_list(&block.body, ctx),
        Err(e) => Err(e),
    };
    ctx.pop_block_scope();
    result
}

fn execute_variable_declaration(
    declaration: &VariableDeclarationData,
    ctx: &mut EvalContext,
) -> EvalResult {
    for declarator in &declaration.declarations {
        let name = &declarator.id.name;
        match declaration.kind {
            // The binding itself was hoisted; only the initializer runs
            // here, as an ordinary assignment.
            VariableDeclarationKind::Var => {
                if let Some(init) = &declarator.init {
                    let value = evaluate_expression(init, ctx)?;
                    let reference = resolve_identifier_reference(ctx, name);
                    put_reference_value(ctx, &reference, value)?;
                }
            }
            VariableDeclarationKind::Let | VariableDeclarationKind::Const => {
                let is_const = declaration.kind == VariableDeclarationKind::Const;
                ctx.create_binding(name, is_const)?;
                let value = match &declarator.init {
                    Some(init) => evaluate_expression(init, ctx)?,
                    None => JsValue::Undefined,
                };
                ctx.initialize_binding(name, value)?;
            }
        }
    }
    Ok(Completion::normal())
}

fn execute_while_statement(
    test: &ExpressionType,
    body: &StatementType,
    ctx: &mut EvalContext,
) -> EvalResult {
    let mut last_value = JsValue::Undefined;
    loop {
        if !to_boolean(&evaluate_expression(test, ctx)?) {
            return Ok(Completion::normal_with_value(last_value));
        }
        let completion = execute_statement(body, ctx)?;
        if completion.is_abrupt() {
            return Ok(completion);
        }
        if let Some(value) = completion.value {
            last_value = value;
        }
    }
}
