//! Expression evaluation. References are resolved here too, since member
//! accesses and identifiers double as assignment targets and as the place
//! a call picks its receiver from.

use std::cmp::Ordering;

use crate::parser::ast::{
    AssignmentOperator, AssignmentTarget, BinaryOperator, ExpressionType, LiteralData,
    LiteralType, LogicalOperator, MemberExpressionData, MemberProperty, NumberLiteralType,
    PropertyData, PropertyKeyData, UnaryOperator,
};
use crate::runner::api::EvalContext;
use crate::runner::ds::array_object::array_create;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::{resolve_binding_environment, resolve_this_environment};
use crate::runner::ds::object::object_create;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::{get_property, set_property};
use crate::runner::ds::operations::test_and_comparison::{
    abstract_equality_comparison, relational_comparison, strict_equality_comparison,
};
use crate::runner::ds::operations::type_conversion::{
    f64_to_number, get_type, number_to_f64, to_boolean, to_number, to_primitive, to_string,
    TYPE_STR_UNDEFINED,
};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::eval::function::{call_function, construct_function, instantiate_function_object};
use crate::runner::eval::types::{Reference, ReferenceBase, ReferenceResult, ValueResult};

pub fn evaluate_expression(expression: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    match expression {
        ExpressionType::Literal(literal) => Ok(literal_value(literal)),

        ExpressionType::Identifier(id) => {
            let reference = resolve_identifier_reference(ctx, &id.name);
            get_reference_value(&reference)
        }

        ExpressionType::ThisExpression { .. } => resolve_this_binding(ctx),

        ExpressionType::ArrayExpression { elements, .. } => evaluate_array_literal(elements, ctx),

        ExpressionType::ObjectExpression { properties, .. } => {
            evaluate_object_literal(properties, ctx)
        }

        ExpressionType::FunctionExpression(function)
        | ExpressionType::ArrowFunctionExpression(function) => {
            Ok(instantiate_function_object(ctx, function))
        }

        ExpressionType::UnaryExpression {
            operator, argument, ..
        } => evaluate_unary_expression(operator, argument, ctx),

        ExpressionType::BinaryExpression {
            operator,
            left,
            right,
            ..
        } => {
            let left_value = evaluate_expression(left, ctx)?;
            let right_value = evaluate_expression(right, ctx)?;
            Ok(apply_binary_operator(operator, &left_value, &right_value))
        }

        ExpressionType::LogicalExpression {
            operator,
            left,
            right,
            ..
        } => evaluate_logical_expression(operator, left, right, ctx),

        ExpressionType::ConditionalExpression {
            test,
            consequent,
            alternate,
            ..
        } => {
            if to_boolean(&evaluate_expression(test, ctx)?) {
                evaluate_expression(consequent, ctx)
            } else {
                evaluate_expression(alternate, ctx)
            }
        }

        ExpressionType::AssignmentExpression {
            operator,
            target,
            value,
            ..
        } => evaluate_assignment_expression(operator, target, value, ctx),

        ExpressionType::MemberExpression(member) => {
            let reference = evaluate_member_to_reference(member, ctx)?;
            get_reference_value(&reference)
        }

        ExpressionType::CallExpression {
            callee, arguments, ..
        } => evaluate_call_expression(callee, arguments, ctx),

        ExpressionType::NewExpression {
            callee, arguments, ..
        } => {
            let constructor = evaluate_expression(callee, ctx)?;
            let args = evaluate_arguments(arguments, ctx)?;
            construct_function(ctx, &constructor, args)
        }
    }
}

fn literal_value(literal: &LiteralData) -> JsValue {
    match &literal.value {
        LiteralType::NullLiteral => JsValue::Null,
        LiteralType::BooleanLiteral(b) => JsValue::Boolean(*b),
        LiteralType::NumberLiteral(n) => match n {
            NumberLiteralType::IntegerLiteral(i) => JsValue::Number(JsNumberType::Integer(*i)),
            // Literals like 1e999 come out of the parse as infinity.
            NumberLiteralType::FloatLiteral(f) => JsValue::Number(f64_to_number(*f)),
        },
        LiteralType::StringLiteral(s) => JsValue::String(s.clone()),
    }
}

// ============================================================================
// References
// ============================================================================

/// Find the innermost scope declaring `name`. Unresolved names still get a
/// reference carrying the name so the eventual error can report it.
pub fn resolve_identifier_reference(ctx: &EvalContext, name: &str) -> Reference {
    let strict = ctx.is_strict_code();
    match resolve_binding_environment(&ctx.current_lex_env(), name) {
        Some(env) => Reference::binding(env, name, strict),
        None => Reference::unresolvable(name, strict),
    }
}

/// Evaluate `base.name` or `base[expr]` down to a reference. The base value
/// is computed here; reading or writing through it is the caller's choice.
pub fn evaluate_member_to_reference(
    member: &MemberExpressionData,
    ctx: &mut EvalContext,
) -> ReferenceResult {
    // Failures on `this.x` should talk about the missing receiver rather
    // than a bad property chain, so note where the base came from.
    let base_is_this = matches!(member.object.as_ref(), ExpressionType::ThisExpression { .. });
    let base = evaluate_expression(&member.object, ctx)?;
    let key = match &member.property {
        MemberProperty::Simple(id) => PropertyKey::Str(id.name.clone()),
        MemberProperty::Computed(expression) => {
            let key_value = evaluate_expression(expression, ctx)?;
            PropertyKey::from_value(&key_value)
        }
    };
    let strict = ctx.is_strict_code();
    Ok(if base_is_this {
        Reference::this_property(base, key, strict)
    } else {
        Reference::property(base, key, strict)
    })
}

pub fn get_reference_value(reference: &Reference) -> ValueResult {
    match &reference.base {
        ReferenceBase::Environment(env) => {
            let result = env
                .borrow()
                .inner
                .as_env_record()
                .get_binding_value(&reference.referenced_name_str());
            result
        }
        ReferenceBase::Unresolvable => Err(JErrorType::ReferenceError(format!(
            "'{}' is not defined",
            reference.referenced_name_str()
        ))),
        ReferenceBase::Value(base) => match base {
            JsValue::Object(o) => Ok(get_property(o, &reference.referenced_name)),
            JsValue::Undefined | JsValue::Null => {
                if reference.via_this {
                    Err(JErrorType::UnboundReceiver(format!(
                        "cannot read property '{}' of unbound 'this'",
                        reference.referenced_name_str()
                    )))
                } else {
                    Err(JErrorType::TypeError(format!(
                        "Cannot read property '{}' of {}",
                        reference.referenced_name_str(),
                        to_string(base)
                    )))
                }
            }
            // Primitives carry no own properties in this model.
            _ => Ok(JsValue::Undefined),
        },
    }
}

pub fn put_reference_value(
    ctx: &mut EvalContext,
    reference: &Reference,
    value: JsValue,
) -> Result<(), JErrorType> {
    match &reference.base {
        ReferenceBase::Environment(env) => {
            let result = env
                .borrow_mut()
                .inner
                .as_env_record_mut()
                .set_mutable_binding(&reference.referenced_name_str(), value);
            result
        }
        ReferenceBase::Unresolvable => {
            if reference.strict {
                Err(JErrorType::ReferenceError(format!(
                    "'{}' is not defined",
                    reference.referenced_name_str()
                )))
            } else {
                // Sloppy-mode writes to unknown names create globals.
                set_property(
                    &ctx.realm.global_this,
                    reference.referenced_name.clone(),
                    value,
                )
            }
        }
        ReferenceBase::Value(base) => match base {
            JsValue::Object(o) => set_property(o, reference.referenced_name.clone(), value),
            JsValue::Undefined | JsValue::Null => {
                if reference.via_this {
                    Err(JErrorType::UnboundReceiver(format!(
                        "cannot set property '{}' of unbound 'this'",
                        reference.referenced_name_str()
                    )))
                } else {
                    Err(JErrorType::TypeError(format!(
                        "Cannot set property '{}' of {}",
                        reference.referenced_name_str(),
                        to_string(base)
                    )))
                }
            }
            _ => {
                if reference.strict {
                    Err(JErrorType::TypeError(format!(
                        "Cannot create property '{}' on {} '{}'",
                        reference.referenced_name_str(),
                        get_type(base),
                        to_string(base)
                    )))
                } else {
                    // Writes to primitives are silently dropped.
                    Ok(())
                }
            }
        },
    }
}

/// `this` evaluates to whatever the nearest non-arrow activation bound, or
/// the global object at top level. Arrow and block scopes never answer, so
/// the walk passes through them.
pub fn resolve_this_binding(ctx: &EvalContext) -> ValueResult {
    let env = resolve_this_environment(&ctx.current_lex_env());
    let result = env.borrow().inner.get_this_binding();
    result
}

// ============================================================================
// Literals
// ============================================================================

fn evaluate_array_literal(elements: &[ExpressionType], ctx: &mut EvalContext) -> ValueResult {
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(evaluate_expression(element, ctx)?);
    }
    let prototype = ctx.realm.object_prototype.clone();
    Ok(JsValue::Object(array_create(values, Some(prototype))))
}

fn evaluate_object_literal(properties: &[PropertyData], ctx: &mut EvalContext) -> ValueResult {
    let object = object_create(Some(ctx.realm.object_prototype.clone()));
    for property in properties {
        let key = property_key_of(&property.key);
        let value = evaluate_expression(&property.value, ctx)?;
        object.borrow_mut().base_mut().set_own_property(key, value);
    }
    Ok(JsValue::Object(object))
}

fn property_key_of(key: &PropertyKeyData) -> PropertyKey {
    match key {
        PropertyKeyData::Identifier(id) => PropertyKey::Str(id.name.clone()),
        PropertyKeyData::String(_, s) => PropertyKey::from_str(s),
        PropertyKeyData::Numeric(_, n) => match n {
            NumberLiteralType::IntegerLiteral(i) => {
                PropertyKey::from_value(&JsValue::Number(JsNumberType::Integer(*i)))
            }
            NumberLiteralType::FloatLiteral(f) => {
                PropertyKey::from_value(&JsValue::Number(f64_to_number(*f)))
            }
        },
    }
}

// ============================================================================
// Operators
// ============================================================================

fn evaluate_unary_expression(
    operator: &UnaryOperator,
    argument: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    // typeof tolerates unresolved names instead of raising.
    if let UnaryOperator::Typeof = operator {
        if let ExpressionType::Identifier(id) = argument {
            if resolve_identifier_reference(ctx, &id.name).is_unresolvable() {
                return Ok(JsValue::String(TYPE_STR_UNDEFINED.to_string()));
            }
        }
    }
    let value = evaluate_expression(argument, ctx)?;
    Ok(match operator {
        UnaryOperator::Minus => negate_number(&value),
        UnaryOperator::Plus => JsValue::Number(to_number(&value)),
        UnaryOperator::Not => JsValue::Boolean(!to_boolean(&value)),
        UnaryOperator::Typeof => JsValue::String(get_type(&value).to_string()),
    })
}

fn negate_number(value: &JsValue) -> JsValue {
    JsValue::Number(match to_number(value) {
        JsNumberType::Integer(i) => match i.checked_neg() {
            Some(n) => JsNumberType::Integer(n),
            None => f64_to_number(-(i as f64)),
        },
        JsNumberType::Float(f) => f64_to_number(-f),
        JsNumberType::NaN => JsNumberType::NaN,
        JsNumberType::PositiveInfinity => JsNumberType::NegativeInfinity,
        JsNumberType::NegativeInfinity => JsNumberType::PositiveInfinity,
    })
}

fn evaluate_logical_expression(
    operator: &LogicalOperator,
    left: &ExpressionType,
    right: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let left_value = evaluate_expression(left, ctx)?;
    let short_circuits = match operator {
        LogicalOperator::And => !to_boolean(&left_value),
        LogicalOperator::Or => to_boolean(&left_value),
    };
    if short_circuits {
        Ok(left_value)
    } else {
        evaluate_expression(right, ctx)
    }
}

pub fn apply_binary_operator(
    operator: &BinaryOperator,
    left: &JsValue,
    right: &JsValue,
) -> JsValue {
    match operator {
        // Arithmetic
        BinaryOperator::Add => apply_addition(left, right),
        BinaryOperator::Subtract => apply_numeric_op(left, right, i64::checked_sub, |a, b| a - b),
        BinaryOperator::Multiply => apply_numeric_op(left, right, i64::checked_mul, |a, b| a * b),
        BinaryOperator::Divide => apply_division(left, right),
        BinaryOperator::Remainder => apply_remainder(left, right),

        // Comparison
        BinaryOperator::LessThan => JsValue::Boolean(matches!(
            relational_comparison(left, right),
            Some(Ordering::Less)
        )),
        BinaryOperator::GreaterThan => JsValue::Boolean(matches!(
            relational_comparison(left, right),
            Some(Ordering::Greater)
        )),
        BinaryOperator::LessThanEqual => JsValue::Boolean(matches!(
            relational_comparison(left, right),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )),
        BinaryOperator::GreaterThanEqual => JsValue::Boolean(matches!(
            relational_comparison(left, right),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )),

        // Equality
        BinaryOperator::StrictEqual => JsValue::Boolean(strict_equality_comparison(left, right)),
        BinaryOperator::StrictNotEqual => {
            JsValue::Boolean(!strict_equality_comparison(left, right))
        }
        BinaryOperator::LooseEqual => JsValue::Boolean(abstract_equality_comparison(left, right)),
        BinaryOperator::LooseNotEqual => {
            JsValue::Boolean(!abstract_equality_comparison(left, right))
        }
    }
}

/// Either side being a string after primitive conversion makes `+` concat;
/// otherwise it is numeric addition.
fn apply_addition(left: &JsValue, right: &JsValue) -> JsValue {
    let a = to_primitive(left);
    let b = to_primitive(right);
    if matches!(a, JsValue::String(_)) || matches!(b, JsValue::String(_)) {
        return JsValue::String(format!("{}{}", to_string(&a), to_string(&b)));
    }
    apply_numeric_op(&a, &b, i64::checked_add, |x, y| x + y)
}

/// Integer pairs stay integers while the operation fits; everything else
/// runs on f64 and is reclassified on the way out, which is also where a
/// zero divisor turns into an infinity or NaN.
fn apply_numeric_op<F, G>(left: &JsValue, right: &JsValue, int_op: F, float_op: G) -> JsValue
where
    F: Fn(i64, i64) -> Option<i64>,
    G: Fn(f64, f64) -> f64,
{
    let a = to_number(left);
    let b = to_number(right);
    if let (JsNumberType::Integer(x), JsNumberType::Integer(y)) = (&a, &b) {
        if let Some(result) = int_op(*x, *y) {
            return JsValue::Number(JsNumberType::Integer(result));
        }
    }
    JsValue::Number(f64_to_number(float_op(number_to_f64(&a), number_to_f64(&b))))
}

fn apply_division(left: &JsValue, right: &JsValue) -> JsValue {
    let a = to_number(left);
    let b = to_number(right);
    if let (JsNumberType::Integer(x), JsNumberType::Integer(y)) = (&a, &b) {
        // Keep exact quotients integral.
        if let (Some(quotient), Some(0)) = (x.checked_div(*y), x.checked_rem(*y)) {
            return JsValue::Number(JsNumberType::Integer(quotient));
        }
    }
    JsValue::Number(f64_to_number(number_to_f64(&a) / number_to_f64(&b)))
}

fn apply_remainder(left: &JsValue, right: &JsValue) -> JsValue {
    let a = to_number(left);
    let b = to_number(right);
    if let (JsNumberType::Integer(x), JsNumberType::Integer(y)) = (&a, &b) {
        if let Some(remainder) = x.checked_rem(*y) {
            return JsValue::Number(JsNumberType::Integer(remainder));
        }
    }
    JsValue::Number(f64_to_number(number_to_f64(&a) % number_to_f64(&b)))
}

fn evaluate_assignment_expression(
    operator: &AssignmentOperator,
    target: &AssignmentTarget,
    value_expression: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let reference = match target {
        AssignmentTarget::Identifier(id) => resolve_identifier_reference(ctx, &id.name),
        AssignmentTarget::Member(member) => evaluate_member_to_reference(member, ctx)?,
    };
    let value = match operator.binary_operator() {
        None => evaluate_expression(value_expression, ctx)?,
        Some(binary) => {
            let old = get_reference_value(&reference)?;
            let rhs = evaluate_expression(value_expression, ctx)?;
            apply_binary_operator(&binary, &old, &rhs)
        }
    };
    put_reference_value(ctx, &reference, value.clone())?;
    Ok(value)
}

// ============================================================================
// Calls
// ============================================================================

/// A property-access callee supplies its base object as the receiver. Any
/// other callee form passes no receiver at all.
fn evaluate_call_expression(
    callee: &ExpressionType,
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> ValueResult {
    let (function, this_argument) = match callee {
        ExpressionType::MemberExpression(member) => {
            let reference = evaluate_member_to_reference(member, ctx)?;
            let function = get_reference_value(&reference)?;
            (function, reference.get_this_value())
        }
        other => (evaluate_expression(other, ctx)?, JsValue::Undefined),
    };
    let args = evaluate_arguments(arguments, ctx)?;
    call_function(ctx, &function, this_argument, args)
}

fn evaluate_arguments(
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> Result<Vec<JsValue>, JErrorType> {
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(evaluate_expression(argument, ctx)?);
    }
    Ok(args)
}
