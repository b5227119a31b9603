//! Early checks and classifications that run on freshly built AST nodes.

use crate::parser::ast::{
    AssignmentTarget, ExpressionType, FunctionData, IdentifierData, LiteralData, LiteralType,
    StatementType, VariableDeclarationKind,
};
use std::rc::Rc;

/// True when the statement is exactly the `"use strict"` directive prologue.
/// Only a plain string literal counts; `("use strict")` or a concatenation
/// does not.
pub(crate) fn is_use_strict_directive(stmt: &StatementType) -> bool {
    if let StatementType::ExpressionStatement { expression, .. } = stmt {
        if let ExpressionType::Literal(LiteralData {
            value: LiteralType::StringLiteral(s),
            ..
        }) = expression
        {
            return s == "use strict";
        }
    }
    false
}

/// First parameter name that appears more than once, if any.
pub(crate) fn find_duplicate_parameter(params: &[IdentifierData]) -> Option<&IdentifierData> {
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|p| p.name == param.name) {
            return Some(param);
        }
    }
    None
}

/// Names declared with `var` anywhere in the statement list, in source order
/// without duplicates. The walk descends into blocks and control flow but
/// stops at function boundaries, which hoist their own names.
pub(crate) fn var_declared_names(statements: &[StatementType]) -> Vec<String> {
    let mut names = Vec::new();
    collect_var_declared_names(statements, &mut names);
    names
}

fn collect_var_declared_names(statements: &[StatementType], names: &mut Vec<String>) {
    for stmt in statements {
        collect_var_declared_names_in(stmt, names);
    }
}

fn collect_var_declared_names_in(stmt: &StatementType, names: &mut Vec<String>) {
    match stmt {
        StatementType::VariableDeclaration(decl) => {
            if decl.kind == VariableDeclarationKind::Var {
                for declarator in &decl.declarations {
                    if !names.contains(&declarator.id.name) {
                        names.push(declarator.id.name.clone());
                    }
                }
            }
        }
        StatementType::BlockStatement(block) => {
            collect_var_declared_names(&block.body, names);
        }
        StatementType::IfStatement {
            consequent,
            alternate,
            ..
        } => {
            collect_var_declared_names_in(consequent, names);
            if let Some(alternate) = alternate {
                collect_var_declared_names_in(alternate, names);
            }
        }
        StatementType::WhileStatement { body, .. } => {
            collect_var_declared_names_in(body, names);
        }
        _ => {}
    }
}

/// Function declarations sitting directly in the statement list. Nested
/// blocks hoist at their own level, so the walk does not descend.
pub(crate) fn lexically_scoped_function_declarations(
    statements: &[StatementType],
) -> Vec<&Rc<FunctionData>> {
    statements
        .iter()
        .filter_map(|stmt| match stmt {
            StatementType::FunctionDeclaration(function) => Some(function),
            _ => None,
        })
        .collect()
}

/// Reclassify an expression that appeared left of `=` as a write target.
/// Identifiers and member accesses are the only simple assignment targets in
/// this subset.
pub(crate) fn expression_to_assignment_target(
    expression: ExpressionType,
) -> Option<AssignmentTarget> {
    match expression {
        ExpressionType::Identifier(id) => Some(AssignmentTarget::Identifier(id)),
        ExpressionType::MemberExpression(m) => Some(AssignmentTarget::Member(m)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Meta;

    fn ident(name: &str) -> IdentifierData {
        IdentifierData {
            meta: Meta {
                start_index: 0,
                end_index: 0,
            },
            name: name.to_string(),
        }
    }

    #[test]
    fn duplicate_parameter_detection() {
        assert!(find_duplicate_parameter(&[ident("a"), ident("b")]).is_none());
        let params = [ident("a"), ident("b"), ident("a")];
        let dup = find_duplicate_parameter(&params);
        assert_eq!(dup.map(|d| d.name.as_str()), Some("a"));
    }
}
