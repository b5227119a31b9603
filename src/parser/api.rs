//! Parser entry point and AST construction.
//!
//! [`JsParser`] wraps the pest-generated parser; `parse_to_ast_from_str` runs
//! the grammar and lowers the pair tree into [`ast`](super::ast) nodes with a
//! `build_ast_from_*` function per grammar rule. Early ("static semantics")
//! errors such as an invalid assignment target or a duplicate parameter in
//! strict code are reported here as custom pest errors carrying the span.

use std::rc::Rc;

use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::{Parser, Span};
use pest_derive::Parser;

use super::ast::*;
use super::static_semantics;

#[derive(Parser)]
#[grammar = "parser/js_grammar.pest"] // relative to src
pub struct JsParser;

/// Flags threaded through the builders. `strict` is inherited by nested
/// functions; `in_function` legalizes `return`.
#[derive(Debug, Clone, Copy)]
struct BuildContext {
    strict: bool,
    in_function: bool,
}

impl JsParser {
    /// Parse a complete program into an AST.
    pub fn parse_to_ast_from_str(code: &str) -> Result<ProgramData, Error<Rule>> {
        let mut pairs = JsParser::parse(Rule::program, code)?;
        match pairs.next() {
            Some(program) => build_ast_from_program(program),
            None => Err(Error::new_from_pos(
                ErrorVariant::CustomError {
                    message: "[p0] Empty parse result".to_string(),
                },
                pest::Position::from_start(code),
            )),
        }
    }
}

fn get_meta(pair: &Pair<Rule>) -> Meta {
    let span = pair.as_span();
    Meta {
        start_index: span.start(),
        end_index: span.end(),
    }
}

fn get_unexpected_error(state: &str, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: format!("[{}] Unexpected rule '{:?}'", state, pair.as_rule()),
        },
        pair.as_span(),
    )
}

fn get_semantic_error(message: String, span: Span) -> Error<Rule> {
    Error::new_from_span(ErrorVariant::CustomError { message }, span)
}

fn expect_next<'a>(
    state: &str,
    span: Span<'a>,
    inner: &mut Pairs<'a, Rule>,
) -> Result<Pair<'a, Rule>, Error<Rule>> {
    match inner.next() {
        Some(p) => Ok(p),
        None => Err(get_semantic_error(
            format!("[{}] Unexpected end of rule", state),
            span,
        )),
    }
}

// ── Program and statements ───────────────────────────────────────────

fn build_ast_from_program(pair: Pair<Rule>) -> Result<ProgramData, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut ctx = BuildContext {
        strict: false,
        in_function: false,
    };
    let mut body = Vec::new();
    let mut is_strict = false;
    let mut first = true;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::statement => {
                let stmt = build_ast_from_statement(p, ctx)?;
                if first {
                    first = false;
                    if static_semantics::is_use_strict_directive(&stmt) {
                        is_strict = true;
                        ctx.strict = true;
                    }
                }
                body.push(stmt);
            }
            Rule::EOI => {}
            _ => return Err(get_unexpected_error("p1", &p)),
        }
    }
    Ok(ProgramData {
        meta,
        body,
        is_strict,
    })
}

fn build_ast_from_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<StatementType, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("s1", span, &mut inner)?;
    match p.as_rule() {
        Rule::block_statement => Ok(StatementType::BlockStatement(
            build_ast_from_block_statement(p, ctx)?,
        )),
        Rule::variable_statement => build_ast_from_variable_statement(p, ctx),
        Rule::function_declaration => {
            let f = build_ast_from_function(p, ctx)?;
            Ok(StatementType::FunctionDeclaration(Rc::new(f)))
        }
        Rule::if_statement => build_ast_from_if_statement(p, ctx),
        Rule::while_statement => build_ast_from_while_statement(p, ctx),
        Rule::return_statement => build_ast_from_return_statement(p, ctx),
        Rule::empty_statement => Ok(StatementType::EmptyStatement { meta: get_meta(&p) }),
        Rule::expression_statement => {
            let meta = get_meta(&p);
            let span = p.as_span();
            let mut inner = p.into_inner();
            let expr_pair = expect_next("s2", span, &mut inner)?;
            let expression = build_ast_from_expression(expr_pair, ctx)?;
            Ok(StatementType::ExpressionStatement { meta, expression })
        }
        _ => Err(get_unexpected_error("s3", &p)),
    }
}

fn build_ast_from_block_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<BlockStatementData, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut body = Vec::new();
    for p in pair.into_inner() {
        body.push(build_ast_from_statement(p, ctx)?);
    }
    Ok(BlockStatementData { meta, body })
}

fn build_ast_from_variable_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let kind_pair = expect_next("v1", span, &mut inner)?;
    let kind = match kind_pair.as_str() {
        "var" => VariableDeclarationKind::Var,
        "let" => VariableDeclarationKind::Let,
        "const" => VariableDeclarationKind::Const,
        _ => return Err(get_unexpected_error("v2", &kind_pair)),
    };
    let mut declarations = Vec::new();
    for p in inner {
        let decl_meta = get_meta(&p);
        let decl_span = p.as_span();
        let mut decl_inner = p.into_inner();
        let id_pair = expect_next("v3", decl_span.clone(), &mut decl_inner)?;
        let id = build_ast_from_binding_identifier(id_pair)?;
        let init = match decl_inner.next() {
            Some(init_pair) => {
                let init_span = init_pair.as_span();
                let mut init_inner = init_pair.into_inner();
                let expr_pair = expect_next("v4", init_span, &mut init_inner)?;
                Some(build_ast_from_assignment_expression(expr_pair, ctx)?)
            }
            None => None,
        };
        if kind == VariableDeclarationKind::Const && init.is_none() {
            return Err(get_semantic_error(
                "Missing initializer in const declaration".to_string(),
                decl_span,
            ));
        }
        declarations.push(VariableDeclaratorData {
            meta: decl_meta,
            id,
            init,
        });
    }
    Ok(StatementType::VariableDeclaration(VariableDeclarationData {
        meta,
        kind,
        declarations,
    }))
}

fn build_ast_from_binding_identifier(pair: Pair<Rule>) -> Result<IdentifierData, Error<Rule>> {
    let meta = get_meta(&pair);
    Ok(IdentifierData {
        meta,
        name: pair.as_str().trim().to_string(),
    })
}

fn build_ast_from_if_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let mut test = None;
    let mut consequent = None;
    let mut alternate = None;
    for p in inner.by_ref() {
        match p.as_rule() {
            Rule::kw_if | Rule::kw_else => {}
            Rule::expression => test = Some(build_ast_from_expression(p, ctx)?),
            Rule::statement => {
                let stmt = build_ast_from_statement(p, ctx)?;
                if consequent.is_none() {
                    consequent = Some(stmt);
                } else {
                    alternate = Some(stmt);
                }
            }
            _ => return Err(get_unexpected_error("i1", &p)),
        }
    }
    match (test, consequent) {
        (Some(test), Some(consequent)) => Ok(StatementType::IfStatement {
            meta,
            test,
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        }),
        _ => Err(get_semantic_error(
            "[i2] Incomplete if statement".to_string(),
            span,
        )),
    }
}

fn build_ast_from_while_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let mut test = None;
    let mut body = None;
    for p in inner.by_ref() {
        match p.as_rule() {
            Rule::kw_while => {}
            Rule::expression => test = Some(build_ast_from_expression(p, ctx)?),
            Rule::statement => body = Some(build_ast_from_statement(p, ctx)?),
            _ => return Err(get_unexpected_error("w1", &p)),
        }
    }
    match (test, body) {
        (Some(test), Some(body)) => Ok(StatementType::WhileStatement {
            meta,
            test,
            body: Box::new(body),
        }),
        _ => Err(get_semantic_error(
            "[w2] Incomplete while statement".to_string(),
            span,
        )),
    }
}

fn build_ast_from_return_statement(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<StatementType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    if !ctx.in_function {
        return Err(get_semantic_error(
            "Illegal return statement".to_string(),
            span,
        ));
    }
    let mut argument = None;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::kw_return => {}
            Rule::expression => argument = Some(build_ast_from_expression(p, ctx)?),
            _ => return Err(get_unexpected_error("r1", &p)),
        }
    }
    Ok(StatementType::ReturnStatement { meta, argument })
}

// ── Functions ────────────────────────────────────────────────────────

/// Shared by function declarations and function expressions; arrows go
/// through [`build_ast_from_arrow_function`].
fn build_ast_from_function(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<FunctionData, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut name = None;
    let mut params = Vec::new();
    let mut body = None;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::kw_function => {}
            Rule::binding_identifier => name = Some(build_ast_from_binding_identifier(p)?),
            Rule::formal_parameters => params = build_ast_from_formal_parameters(p)?,
            Rule::function_body => body = Some(build_ast_from_function_body(p, ctx)?),
            _ => return Err(get_unexpected_error("f1", &p)),
        }
    }
    let body = match body {
        Some(b) => b,
        None => {
            return Err(get_semantic_error(
                "[f2] Function without a body".to_string(),
                span,
            ))
        }
    };
    check_formal_parameters(&params, &body, ctx, span)?;
    Ok(FunctionData {
        meta,
        name,
        params,
        body: Rc::new(body),
        is_arrow: false,
    })
}

fn build_ast_from_formal_parameters(
    pair: Pair<Rule>,
) -> Result<Vec<IdentifierData>, Error<Rule>> {
    let mut params = Vec::new();
    for p in pair.into_inner() {
        params.push(build_ast_from_binding_identifier(p)?);
    }
    Ok(params)
}

fn build_ast_from_function_body(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<FunctionBodyData, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut body_ctx = BuildContext {
        strict: ctx.strict,
        in_function: true,
    };
    let mut statements = Vec::new();
    let mut is_strict = false;
    let mut first = true;
    for p in pair.into_inner() {
        let stmt = build_ast_from_statement(p, body_ctx)?;
        if first {
            first = false;
            if static_semantics::is_use_strict_directive(&stmt) {
                is_strict = true;
                body_ctx.strict = true;
            }
        }
        statements.push(stmt);
    }
    Ok(FunctionBodyData {
        meta,
        statements,
        is_strict,
    })
}

fn check_formal_parameters(
    params: &[IdentifierData],
    body: &FunctionBodyData,
    ctx: BuildContext,
    span: Span,
) -> Result<(), Error<Rule>> {
    if ctx.strict || body.is_strict {
        if let Some(dup) = static_semantics::find_duplicate_parameter(params) {
            return Err(get_semantic_error(
                format!(
                    "Duplicate parameter name '{}' not allowed in this context",
                    dup.name
                ),
                span,
            ));
        }
    }
    Ok(())
}

fn build_ast_from_arrow_function(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let params_pair = expect_next("a1", span.clone(), &mut inner)?;
    let mut params = Vec::new();
    for p in params_pair.into_inner() {
        match p.as_rule() {
            Rule::binding_identifier => params.push(build_ast_from_binding_identifier(p)?),
            Rule::formal_parameters => params = build_ast_from_formal_parameters(p)?,
            _ => return Err(get_unexpected_error("a2", &p)),
        }
    }
    let body_pair = expect_next("a3", span.clone(), &mut inner)?;
    let body_span = body_pair.as_span();
    let mut body_inner = body_pair.into_inner();
    let content = expect_next("a4", body_span, &mut body_inner)?;
    let body = match content.as_rule() {
        Rule::function_body => build_ast_from_function_body(content, ctx)?,
        Rule::assignment_expression => {
            // Concise body desugars to a single return statement.
            let expr_meta = get_meta(&content);
            let argument = build_ast_from_assignment_expression(content, ctx)?;
            FunctionBodyData {
                meta: expr_meta.clone(),
                statements: vec![StatementType::ReturnStatement {
                    meta: expr_meta,
                    argument: Some(argument),
                }],
                is_strict: false,
            }
        }
        _ => return Err(get_unexpected_error("a5", &content)),
    };
    check_formal_parameters(&params, &body, ctx, span)?;
    Ok(ExpressionType::ArrowFunctionExpression(Rc::new(
        FunctionData {
            meta,
            name: None,
            params,
            body: Rc::new(body),
            is_arrow: true,
        },
    )))
}

// ── Expressions ──────────────────────────────────────────────────────

fn build_ast_from_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("e1", span, &mut inner)?;
    build_ast_from_assignment_expression(p, ctx)
}

fn build_ast_from_assignment_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("e2", span, &mut inner)?;
    match p.as_rule() {
        Rule::arrow_function => build_ast_from_arrow_function(p, ctx),
        Rule::assignment => build_ast_from_assignment(p, ctx),
        Rule::conditional_expression => build_ast_from_conditional_expression(p, ctx),
        _ => Err(get_unexpected_error("e3", &p)),
    }
}

fn build_ast_from_assignment(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();

    let lhs_pair = expect_next("e4", span.clone(), &mut inner)?;
    let lhs_span = lhs_pair.as_span();
    let lhs = build_ast_from_left_hand_side_expression(lhs_pair, ctx)?;
    let target = match static_semantics::expression_to_assignment_target(lhs) {
        Some(t) => t,
        None => {
            return Err(get_semantic_error(
                "Invalid left-hand side in assignment".to_string(),
                lhs_span,
            ))
        }
    };

    let op_pair = expect_next("e5", span.clone(), &mut inner)?;
    let operator = match op_pair.as_str() {
        "=" => AssignmentOperator::Assign,
        "+=" => AssignmentOperator::AddAssign,
        "-=" => AssignmentOperator::SubtractAssign,
        "*=" => AssignmentOperator::MultiplyAssign,
        "/=" => AssignmentOperator::DivideAssign,
        "%=" => AssignmentOperator::RemainderAssign,
        _ => return Err(get_unexpected_error("e6", &op_pair)),
    };

    let value_pair = expect_next("e7", span, &mut inner)?;
    let value = build_ast_from_assignment_expression(value_pair, ctx)?;

    Ok(ExpressionType::AssignmentExpression {
        meta,
        operator,
        target: Box::new(target),
        value: Box::new(value),
    })
}

fn build_ast_from_conditional_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let test_pair = expect_next("e8", span.clone(), &mut inner)?;
    let test = build_ast_from_logical_or_expression(test_pair, ctx)?;
    match inner.next() {
        None => Ok(test),
        Some(consequent_pair) => {
            let consequent = build_ast_from_assignment_expression(consequent_pair, ctx)?;
            let alternate_pair = expect_next("e9", span, &mut inner)?;
            let alternate = build_ast_from_assignment_expression(alternate_pair, ctx)?;
            Ok(ExpressionType::ConditionalExpression {
                meta,
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            })
        }
    }
}

fn build_ast_from_logical_or_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e10", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_logical_and_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        if op_pair.as_rule() != Rule::logical_or_operator {
            return Err(get_unexpected_error("e11", &op_pair));
        }
        let right_pair = expect_next("e12", span.clone(), &mut inner)?;
        let right = build_ast_from_logical_and_expression(right_pair, ctx)?;
        expr = ExpressionType::LogicalExpression {
            meta: meta.clone(),
            operator: LogicalOperator::Or,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_logical_and_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e13", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_equality_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        if op_pair.as_rule() != Rule::logical_and_operator {
            return Err(get_unexpected_error("e14", &op_pair));
        }
        let right_pair = expect_next("e15", span.clone(), &mut inner)?;
        let right = build_ast_from_equality_expression(right_pair, ctx)?;
        expr = ExpressionType::LogicalExpression {
            meta: meta.clone(),
            operator: LogicalOperator::And,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_equality_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e16", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_relational_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        let operator = match op_pair.as_str() {
            "===" => BinaryOperator::StrictEqual,
            "!==" => BinaryOperator::StrictNotEqual,
            "==" => BinaryOperator::LooseEqual,
            "!=" => BinaryOperator::LooseNotEqual,
            _ => return Err(get_unexpected_error("e17", &op_pair)),
        };
        let right_pair = expect_next("e18", span.clone(), &mut inner)?;
        let right = build_ast_from_relational_expression(right_pair, ctx)?;
        expr = ExpressionType::BinaryExpression {
            meta: meta.clone(),
            operator,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_relational_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e19", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_additive_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        let operator = match op_pair.as_str() {
            "<=" => BinaryOperator::LessThanEqual,
            ">=" => BinaryOperator::GreaterThanEqual,
            "<" => BinaryOperator::LessThan,
            ">" => BinaryOperator::GreaterThan,
            _ => return Err(get_unexpected_error("e20", &op_pair)),
        };
        let right_pair = expect_next("e21", span.clone(), &mut inner)?;
        let right = build_ast_from_additive_expression(right_pair, ctx)?;
        expr = ExpressionType::BinaryExpression {
            meta: meta.clone(),
            operator,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_additive_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e22", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_multiplicative_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        let operator = match op_pair.as_str() {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            _ => return Err(get_unexpected_error("e23", &op_pair)),
        };
        let right_pair = expect_next("e24", span.clone(), &mut inner)?;
        let right = build_ast_from_multiplicative_expression(right_pair, ctx)?;
        expr = ExpressionType::BinaryExpression {
            meta: meta.clone(),
            operator,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_multiplicative_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let first = expect_next("e25", span.clone(), &mut inner)?;
    let mut expr = build_ast_from_unary_expression(first, ctx)?;
    while let Some(op_pair) = inner.next() {
        let operator = match op_pair.as_str() {
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Remainder,
            _ => return Err(get_unexpected_error("e26", &op_pair)),
        };
        let right_pair = expect_next("e27", span.clone(), &mut inner)?;
        let right = build_ast_from_unary_expression(right_pair, ctx)?;
        expr = ExpressionType::BinaryExpression {
            meta: meta.clone(),
            operator,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_ast_from_unary_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("e28", span.clone(), &mut inner)?;
    match p.as_rule() {
        Rule::unary_operator => {
            let operator = match p.as_str() {
                "typeof" => UnaryOperator::Typeof,
                "!" => UnaryOperator::Not,
                "-" => UnaryOperator::Minus,
                "+" => UnaryOperator::Plus,
                _ => return Err(get_unexpected_error("e29", &p)),
            };
            let argument_pair = expect_next("e30", span, &mut inner)?;
            let argument = build_ast_from_unary_expression(argument_pair, ctx)?;
            Ok(ExpressionType::UnaryExpression {
                meta,
                operator,
                argument: Box::new(argument),
            })
        }
        Rule::left_hand_side_expression => build_ast_from_left_hand_side_expression(p, ctx),
        _ => Err(get_unexpected_error("e31", &p)),
    }
}

fn build_ast_from_left_hand_side_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("e32", span, &mut inner)?;
    match p.as_rule() {
        Rule::call_expression => build_ast_from_call_expression(p, ctx),
        Rule::new_expression => build_ast_from_new_expression(p, ctx),
        _ => Err(get_unexpected_error("e33", &p)),
    }
}

fn build_ast_from_call_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let callee_pair = expect_next("c1", span.clone(), &mut inner)?;
    let callee = build_ast_from_member_expression(callee_pair, ctx)?;
    let args_pair = expect_next("c2", span, &mut inner)?;
    let arguments = build_ast_from_arguments(args_pair, ctx)?;
    let mut expr = ExpressionType::CallExpression {
        meta: meta.clone(),
        callee: Box::new(callee),
        arguments,
    };
    for tail in inner {
        let tail_span = tail.as_span();
        let mut tail_inner = tail.into_inner();
        let p = expect_next("c3", tail_span, &mut tail_inner)?;
        match p.as_rule() {
            Rule::arguments => {
                let arguments = build_ast_from_arguments(p, ctx)?;
                expr = ExpressionType::CallExpression {
                    meta: meta.clone(),
                    callee: Box::new(expr),
                    arguments,
                };
            }
            Rule::member_access => {
                expr = apply_member_access(expr, p, &meta, ctx)?;
            }
            _ => return Err(get_unexpected_error("c4", &p)),
        }
    }
    Ok(expr)
}

fn build_ast_from_new_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("n1", span.clone(), &mut inner)?;
    match p.as_rule() {
        Rule::member_expression => build_ast_from_member_expression(p, ctx),
        Rule::kw_new => {
            // `new X` without an argument list.
            let callee_pair = expect_next("n2", span, &mut inner)?;
            let callee = build_ast_from_new_expression(callee_pair, ctx)?;
            Ok(ExpressionType::NewExpression {
                meta,
                callee: Box::new(callee),
                arguments: Vec::new(),
            })
        }
        _ => Err(get_unexpected_error("n3", &p)),
    }
}

fn build_ast_from_member_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let head = expect_next("m1", span, &mut inner)?;
    let mut expr = match head.as_rule() {
        Rule::new_member => {
            let head_span = head.as_span();
            let head_meta = get_meta(&head);
            let mut head_inner = head.into_inner();
            let mut callee = None;
            let mut arguments = Vec::new();
            for p in head_inner.by_ref() {
                match p.as_rule() {
                    Rule::kw_new => {}
                    Rule::member_expression => {
                        callee = Some(build_ast_from_member_expression(p, ctx)?)
                    }
                    Rule::arguments => arguments = build_ast_from_arguments(p, ctx)?,
                    _ => return Err(get_unexpected_error("m2", &p)),
                }
            }
            match callee {
                Some(callee) => ExpressionType::NewExpression {
                    meta: head_meta,
                    callee: Box::new(callee),
                    arguments,
                },
                None => {
                    return Err(get_semantic_error(
                        "[m3] Incomplete new expression".to_string(),
                        head_span,
                    ))
                }
            }
        }
        Rule::primary_expression => build_ast_from_primary_expression(head, ctx)?,
        _ => return Err(get_unexpected_error("m4", &head)),
    };
    for access in inner {
        expr = apply_member_access(expr, access, &meta, ctx)?;
    }
    Ok(expr)
}

/// Wrap `object` in a MemberExpression for one `.name` or `[expr]` access.
fn apply_member_access(
    object: ExpressionType,
    access: Pair<Rule>,
    meta: &Meta,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let access_span = access.as_span();
    let mut inner = access.into_inner();
    let p = expect_next("m5", access_span.clone(), &mut inner)?;
    let property = match p.as_rule() {
        Rule::identifier_name => MemberProperty::Simple(IdentifierData {
            meta: get_meta(&p),
            name: p.as_str().to_string(),
        }),
        Rule::expression => MemberProperty::Computed(Box::new(build_ast_from_expression(p, ctx)?)),
        _ => return Err(get_unexpected_error("m6", &p)),
    };
    Ok(ExpressionType::MemberExpression(MemberExpressionData {
        meta: Meta {
            start_index: meta.start_index,
            end_index: access_span.end(),
        },
        object: Box::new(object),
        property,
    }))
}

fn build_ast_from_arguments(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<Vec<ExpressionType>, Error<Rule>> {
    let mut arguments = Vec::new();
    for list in pair.into_inner() {
        for p in list.into_inner() {
            arguments.push(build_ast_from_assignment_expression(p, ctx)?);
        }
    }
    Ok(arguments)
}

fn build_ast_from_primary_expression(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("pr1", span, &mut inner)?;
    match p.as_rule() {
        Rule::this_exp => Ok(ExpressionType::ThisExpression { meta: get_meta(&p) }),
        Rule::literal => build_ast_from_literal(p),
        Rule::array_literal => build_ast_from_array_literal(p, ctx),
        Rule::object_literal => build_ast_from_object_literal(p, ctx),
        Rule::function_expression => {
            let f = build_ast_from_function(p, ctx)?;
            Ok(ExpressionType::FunctionExpression(Rc::new(f)))
        }
        Rule::parenthesized_expression => {
            let paren_span = p.as_span();
            let mut paren_inner = p.into_inner();
            let expr_pair = expect_next("pr2", paren_span, &mut paren_inner)?;
            build_ast_from_expression(expr_pair, ctx)
        }
        Rule::identifier_reference => Ok(ExpressionType::Identifier(IdentifierData {
            meta: get_meta(&p),
            name: p.as_str().trim().to_string(),
        })),
        _ => Err(get_unexpected_error("pr3", &p)),
    }
}

fn build_ast_from_array_literal(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut elements = Vec::new();
    for p in pair.into_inner() {
        elements.push(build_ast_from_assignment_expression(p, ctx)?);
    }
    Ok(ExpressionType::ArrayExpression { meta, elements })
}

fn build_ast_from_object_literal(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let mut properties = Vec::new();
    for p in pair.into_inner() {
        properties.push(build_ast_from_property_definition(p, ctx)?);
    }
    Ok(ExpressionType::ObjectExpression { meta, properties })
}

fn build_ast_from_property_definition(
    pair: Pair<Rule>,
    ctx: BuildContext,
) -> Result<PropertyData, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("o1", span, &mut inner)?;
    match p.as_rule() {
        Rule::property_assignment => {
            let pa_span = p.as_span();
            let mut pa_inner = p.into_inner();
            let key_pair = expect_next("o2", pa_span.clone(), &mut pa_inner)?;
            let key = build_ast_from_property_key(key_pair)?;
            let value_pair = expect_next("o3", pa_span, &mut pa_inner)?;
            let value = build_ast_from_assignment_expression(value_pair, ctx)?;
            Ok(PropertyData { meta, key, value })
        }
        Rule::method_definition => {
            let md_meta = get_meta(&p);
            let md_span = p.as_span();
            let mut key = None;
            let mut params = Vec::new();
            let mut body = None;
            for part in p.into_inner() {
                match part.as_rule() {
                    Rule::property_key => key = Some(build_ast_from_property_key(part)?),
                    Rule::formal_parameters => params = build_ast_from_formal_parameters(part)?,
                    Rule::function_body => body = Some(build_ast_from_function_body(part, ctx)?),
                    _ => return Err(get_unexpected_error("o4", &part)),
                }
            }
            let (key, body) = match (key, body) {
                (Some(k), Some(b)) => (k, b),
                _ => {
                    return Err(get_semantic_error(
                        "[o5] Incomplete method definition".to_string(),
                        md_span,
                    ))
                }
            };
            check_formal_parameters(&params, &body, ctx, md_span)?;
            let name = match &key {
                PropertyKeyData::Identifier(id) => Some(id.clone()),
                _ => None,
            };
            let value = ExpressionType::FunctionExpression(Rc::new(FunctionData {
                meta: md_meta,
                name,
                params,
                body: Rc::new(body),
                is_arrow: false,
            }));
            Ok(PropertyData { meta, key, value })
        }
        Rule::shorthand_property => {
            let sp_span = p.as_span();
            let mut sp_inner = p.into_inner();
            let id_pair = expect_next("o6", sp_span, &mut sp_inner)?;
            let id = IdentifierData {
                meta: get_meta(&id_pair),
                name: id_pair.as_str().trim().to_string(),
            };
            Ok(PropertyData {
                meta,
                key: PropertyKeyData::Identifier(id.clone()),
                value: ExpressionType::Identifier(id),
            })
        }
        _ => Err(get_unexpected_error("o7", &p)),
    }
}

fn build_ast_from_property_key(pair: Pair<Rule>) -> Result<PropertyKeyData, Error<Rule>> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("k1", span, &mut inner)?;
    match p.as_rule() {
        Rule::identifier_name => Ok(PropertyKeyData::Identifier(IdentifierData {
            meta: get_meta(&p),
            name: p.as_str().to_string(),
        })),
        Rule::string_literal => {
            let meta = get_meta(&p);
            Ok(PropertyKeyData::String(
                meta,
                decode_string_literal(p.as_str()),
            ))
        }
        Rule::numeric_literal => {
            let meta = get_meta(&p);
            Ok(PropertyKeyData::Numeric(meta, parse_number(p.as_str())))
        }
        _ => Err(get_unexpected_error("k2", &p)),
    }
}

fn build_ast_from_literal(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let meta = get_meta(&pair);
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let p = expect_next("l1", span, &mut inner)?;
    let value = match p.as_rule() {
        Rule::null_literal => LiteralType::NullLiteral,
        Rule::boolean_literal => LiteralType::BooleanLiteral(p.as_str() == "true"),
        Rule::numeric_literal => LiteralType::NumberLiteral(parse_number(p.as_str())),
        Rule::string_literal => LiteralType::StringLiteral(decode_string_literal(p.as_str())),
        _ => return Err(get_unexpected_error("l2", &p)),
    };
    Ok(ExpressionType::Literal(LiteralData { meta, value }))
}

fn parse_number(text: &str) -> NumberLiteralType {
    if !text.contains('.') && !text.contains('e') && !text.contains('E') {
        if let Ok(i) = text.parse::<i64>() {
            return NumberLiteralType::IntegerLiteral(i);
        }
    }
    NumberLiteralType::FloatLiteral(text.parse::<f64>().unwrap_or(f64::NAN))
}

/// Strip the surrounding quotes and resolve escape sequences.
fn decode_string_literal(raw: &str) -> String {
    let body = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('v') => out.push('\u{000B}'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
