use super::api::JsParser;
use super::api::Rule;
use super::ast::{
    ExpressionType, LiteralType, NumberLiteralType, StatementType, VariableDeclarationKind,
};

use pest::consumes_to;
use pest::fails_with;
use pest::parses_to;
use std::time::Instant;

#[test]
fn test_integer_number() {
    parses_to! {
        parser: JsParser,
        input: "10",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 2)
        ]
    };
}

#[test]
fn test_decimal_number() {
    parses_to! {
        parser: JsParser,
        input: "10.5",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 4)
        ]
    };
}

#[test]
fn test_decimal_number_with_trailing_dot() {
    parses_to! {
        parser: JsParser,
        input: "10.",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 3)
        ]
    };
}

#[test]
fn test_decimal_number_with_leading_dot() {
    parses_to! {
        parser: JsParser,
        input: ".5",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 2)
        ]
    };
}

#[test]
fn test_number_with_exponent() {
    parses_to! {
        parser: JsParser,
        input: "3e10",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 4)
        ]
    };
    parses_to! {
        parser: JsParser,
        input: "12E-7",
        rule: Rule::numeric_literal,
        tokens: [
            numeric_literal(0, 5)
        ]
    };
}

#[test]
fn test_number_rejects_bare_exponent() {
    fails_with! {
        parser: JsParser,
        input: "e10",
        rule: Rule::numeric_literal,
        positives: vec![Rule::numeric_literal],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_string1() {
    parses_to! {
        parser: JsParser,
        input: "'lecture hall'",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 14)
        ]
    };
}

#[test]
fn test_string2() {
    parses_to! {
        parser: JsParser,
        input: "\"double quoted\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 15)
        ]
    };
}

#[test]
fn test_string3() {
    parses_to! {
        parser: JsParser,
        input: "\"say \\\"hi\\\"\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 12)
        ]
    };
}

#[test]
fn test_string4() {
    parses_to! {
        parser: JsParser,
        input: "'he said \"hi\"'",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 14)
        ]
    };
}

#[test]
fn test_string5() {
    parses_to! {
        parser: JsParser,
        input: "\"\"",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 2)
        ]
    };
    parses_to! {
        parser: JsParser,
        input: "''",
        rule: Rule::string_literal,
        tokens: [
            string_literal(0, 2)
        ]
    };
}

#[test]
fn test_string_rejects_raw_newline() {
    fails_with! {
        parser: JsParser,
        input: "\"line\nbreak\"",
        rule: Rule::string_literal,
        positives: vec![Rule::string_literal],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_identifier1() {
    parses_to! {
        parser: JsParser,
        input: "thisBinding",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 11)
        ]
    };
}

#[test]
fn test_identifier2() {
    parses_to! {
        parser: JsParser,
        input: "$scope",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 6)
        ]
    };
    parses_to! {
        parser: JsParser,
        input: "_ctx42",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 6)
        ]
    };
}

#[test]
fn test_identifier_rejects_keyword() {
    fails_with! {
        parser: JsParser,
        input: "function",
        rule: Rule::identifier,
        positives: vec![Rule::identifier],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_literal_wrappers() {
    parses_to! {
        parser: JsParser,
        input: "true",
        rule: Rule::literal,
        tokens: [
            literal(0, 4, [
                boolean_literal(0, 4)
            ])
        ]
    };
    parses_to! {
        parser: JsParser,
        input: "null",
        rule: Rule::literal,
        tokens: [
            literal(0, 4, [
                null_literal(0, 4)
            ])
        ]
    };
}

#[test]
fn test_var1() {
    parses_to! {
        parser: JsParser,
        input: "var x = 5;",
        rule: Rule::variable_statement,
        tokens: [
            variable_statement(0, 10, [
                variable_kind(0, 3),
                variable_declaration(4, 9, [
                    binding_identifier(4, 5, [
                        identifier(4, 5)
                    ]),
                    initializer(6, 9, [
                        assignment_expression(8, 9, [
                            conditional_expression(8, 9, [
                                logical_or_expression(8, 9, [
                                    logical_and_expression(8, 9, [
                                        equality_expression(8, 9, [
                                            relational_expression(8, 9, [
                                                additive_expression(8, 9, [
                                                    multiplicative_expression(8, 9, [
                                                        unary_expression(8, 9, [
                                                            left_hand_side_expression(8, 9, [
                                                                new_expression(8, 9, [
                                                                    member_expression(8, 9, [
                                                                        primary_expression(8, 9, [
                                                                            literal(8, 9, [
                                                                                numeric_literal(8, 9)
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_call1() {
    parses_to! {
        parser: JsParser,
        input: "f(1);",
        rule: Rule::expression_statement,
        tokens: [
            expression_statement(0, 5, [
                expression(0, 4, [
                    assignment_expression(0, 4, [
                        conditional_expression(0, 4, [
                            logical_or_expression(0, 4, [
                                logical_and_expression(0, 4, [
                                    equality_expression(0, 4, [
                                        relational_expression(0, 4, [
                                            additive_expression(0, 4, [
                                                multiplicative_expression(0, 4, [
                                                    unary_expression(0, 4, [
                                                        left_hand_side_expression(0, 4, [
                                                            call_expression(0, 4, [
                                                                member_expression(0, 1, [
                                                                    primary_expression(0, 1, [
                                                                        identifier_reference(0, 1, [
                                                                            identifier(0, 1)
                                                                        ])
                                                                    ])
                                                                ]),
                                                                arguments(1, 4, [
                                                                    argument_list(2, 3, [
                                                                        assignment_expression(2, 3, [
                                                                            conditional_expression(2, 3, [
                                                                                logical_or_expression(2, 3, [
                                                                                    logical_and_expression(2, 3, [
                                                                                        equality_expression(2, 3, [
                                                                                            relational_expression(2, 3, [
                                                                                                additive_expression(2, 3, [
                                                                                                    multiplicative_expression(2, 3, [
                                                                                                        unary_expression(2, 3, [
                                                                                                            left_hand_side_expression(2, 3, [
                                                                                                                new_expression(2, 3, [
                                                                                                                    member_expression(2, 3, [
                                                                                                                        primary_expression(2, 3, [
                                                                                                                            literal(2, 3, [
                                                                                                                                numeric_literal(2, 3)
                                                                                                                            ])
                                                                                                                        ])
                                                                                                                    ])
                                                                                                                ])
                                                                                                            ])
                                                                                                        ])
                                                                                                    ])
                                                                                                ])
                                                                                            ])
                                                                                        ])
                                                                                    ])
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_this_member1() {
    parses_to! {
        parser: JsParser,
        input: "this.count;",
        rule: Rule::expression_statement,
        tokens: [
            expression_statement(0, 11, [
                expression(0, 10, [
                    assignment_expression(0, 10, [
                        conditional_expression(0, 10, [
                            logical_or_expression(0, 10, [
                                logical_and_expression(0, 10, [
                                    equality_expression(0, 10, [
                                        relational_expression(0, 10, [
                                            additive_expression(0, 10, [
                                                multiplicative_expression(0, 10, [
                                                    unary_expression(0, 10, [
                                                        left_hand_side_expression(0, 10, [
                                                            new_expression(0, 10, [
                                                                member_expression(0, 10, [
                                                                    primary_expression(0, 4, [
                                                                        this_exp(0, 4, [
                                                                            kw_this(0, 4)
                                                                        ])
                                                                    ]),
                                                                    member_access(4, 10, [
                                                                        identifier_name(5, 10)
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_typeof1() {
    parses_to! {
        parser: JsParser,
        input: "typeof x;",
        rule: Rule::expression_statement,
        tokens: [
            expression_statement(0, 9, [
                expression(0, 8, [
                    assignment_expression(0, 8, [
                        conditional_expression(0, 8, [
                            logical_or_expression(0, 8, [
                                logical_and_expression(0, 8, [
                                    equality_expression(0, 8, [
                                        relational_expression(0, 8, [
                                            additive_expression(0, 8, [
                                                multiplicative_expression(0, 8, [
                                                    unary_expression(0, 8, [
                                                        unary_operator(0, 6, [
                                                            kw_typeof(0, 6)
                                                        ]),
                                                        unary_expression(7, 8, [
                                                            left_hand_side_expression(7, 8, [
                                                                new_expression(7, 8, [
                                                                    member_expression(7, 8, [
                                                                        primary_expression(7, 8, [
                                                                            identifier_reference(7, 8, [
                                                                                identifier(7, 8)
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_function1() {
    parses_to! {
        parser: JsParser,
        input: "function bump(n) { return n; }",
        rule: Rule::function_expression,
        tokens: [
            function_expression(0, 30, [
                kw_function(0, 8),
                binding_identifier(9, 13, [
                    identifier(9, 13)
                ]),
                formal_parameters(14, 15, [
                    binding_identifier(14, 15, [
                        identifier(14, 15)
                    ])
                ]),
                function_body(17, 30, [
                    statement(19, 28, [
                        return_statement(19, 28, [
                            kw_return(19, 25),
                            expression(26, 27, [
                                assignment_expression(26, 27, [
                                    conditional_expression(26, 27, [
                                        logical_or_expression(26, 27, [
                                            logical_and_expression(26, 27, [
                                                equality_expression(26, 27, [
                                                    relational_expression(26, 27, [
                                                        additive_expression(26, 27, [
                                                            multiplicative_expression(26, 27, [
                                                                unary_expression(26, 27, [
                                                                    left_hand_side_expression(26, 27, [
                                                                        new_expression(26, 27, [
                                                                            member_expression(26, 27, [
                                                                                primary_expression(26, 27, [
                                                                                    identifier_reference(26, 27, [
                                                                                        identifier(26, 27)
                                                                                    ])
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_function2() {
    parses_to! {
        parser: JsParser,
        input: "function bump(n) {\n    return this.count + n;\n}",
        rule: Rule::function_expression,
        tokens: [
            function_expression(0, 47, [
                kw_function(0, 8),
                binding_identifier(9, 13, [
                    identifier(9, 13)
                ]),
                formal_parameters(14, 15, [
                    binding_identifier(14, 15, [
                        identifier(14, 15)
                    ])
                ]),
                function_body(17, 47, [
                    statement(23, 45, [
                        return_statement(23, 45, [
                            kw_return(23, 29),
                            expression(30, 44, [
                                assignment_expression(30, 44, [
                                    conditional_expression(30, 44, [
                                        logical_or_expression(30, 44, [
                                            logical_and_expression(30, 44, [
                                                equality_expression(30, 44, [
                                                    relational_expression(30, 44, [
                                                        additive_expression(30, 44, [
                                                            multiplicative_expression(30, 40, [
                                                                unary_expression(30, 40, [
                                                                    left_hand_side_expression(30, 40, [
                                                                        new_expression(30, 40, [
                                                                            member_expression(30, 40, [
                                                                                primary_expression(30, 34, [
                                                                                    this_exp(30, 34, [
                                                                                        kw_this(30, 34)
                                                                                    ])
                                                                                ]),
                                                                                member_access(34, 40, [
                                                                                    identifier_name(35, 40)
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ]),
                                                            additive_operator(41, 42),
                                                            multiplicative_expression(43, 44, [
                                                                unary_expression(43, 44, [
                                                                    left_hand_side_expression(43, 44, [
                                                                        new_expression(43, 44, [
                                                                            member_expression(43, 44, [
                                                                                primary_expression(43, 44, [
                                                                                    identifier_reference(43, 44, [
                                                                                        identifier(43, 44)
                                                                                    ])
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_arrow1() {
    parses_to! {
        parser: JsParser,
        input: "x => x + 1",
        rule: Rule::assignment_expression,
        tokens: [
            assignment_expression(0, 10, [
                arrow_function(0, 10, [
                    arrow_parameters(0, 1, [
                        binding_identifier(0, 1, [
                            identifier(0, 1)
                        ])
                    ]),
                    arrow_body(5, 10, [
                        assignment_expression(5, 10, [
                            conditional_expression(5, 10, [
                                logical_or_expression(5, 10, [
                                    logical_and_expression(5, 10, [
                                        equality_expression(5, 10, [
                                            relational_expression(5, 10, [
                                                additive_expression(5, 10, [
                                                    multiplicative_expression(5, 6, [
                                                        unary_expression(5, 6, [
                                                            left_hand_side_expression(5, 6, [
                                                                new_expression(5, 6, [
                                                                    member_expression(5, 6, [
                                                                        primary_expression(5, 6, [
                                                                            identifier_reference(5, 6, [
                                                                                identifier(5, 6)
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ]),
                                                    additive_operator(7, 8),
                                                    multiplicative_expression(9, 10, [
                                                        unary_expression(9, 10, [
                                                            left_hand_side_expression(9, 10, [
                                                                new_expression(9, 10, [
                                                                    member_expression(9, 10, [
                                                                        primary_expression(9, 10, [
                                                                            literal(9, 10, [
                                                                                numeric_literal(9, 10)
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_object1() {
    parses_to! {
        parser: JsParser,
        input: "{ count: 0 }",
        rule: Rule::object_literal,
        tokens: [
            object_literal(0, 12, [
                property_definition(2, 10, [
                    property_assignment(2, 10, [
                        property_key(2, 7, [
                            identifier_name(2, 7)
                        ]),
                        assignment_expression(9, 10, [
                            conditional_expression(9, 10, [
                                logical_or_expression(9, 10, [
                                    logical_and_expression(9, 10, [
                                        equality_expression(9, 10, [
                                            relational_expression(9, 10, [
                                                additive_expression(9, 10, [
                                                    multiplicative_expression(9, 10, [
                                                        unary_expression(9, 10, [
                                                            left_hand_side_expression(9, 10, [
                                                                new_expression(9, 10, [
                                                                    member_expression(9, 10, [
                                                                        primary_expression(9, 10, [
                                                                            literal(9, 10, [
                                                                                numeric_literal(9, 10)
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_object_shorthand1() {
    parses_to! {
        parser: JsParser,
        input: "{ x }",
        rule: Rule::object_literal,
        tokens: [
            object_literal(0, 5, [
                property_definition(2, 3, [
                    shorthand_property(2, 3, [
                        identifier(2, 3)
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_new1() {
    parses_to! {
        parser: JsParser,
        input: "new Counter(1)",
        rule: Rule::left_hand_side_expression,
        tokens: [
            left_hand_side_expression(0, 14, [
                new_expression(0, 14, [
                    member_expression(0, 14, [
                        new_member(0, 14, [
                            kw_new(0, 3),
                            member_expression(4, 11, [
                                primary_expression(4, 11, [
                                    identifier_reference(4, 11, [
                                        identifier(4, 11)
                                    ])
                                ])
                            ]),
                            arguments(11, 14, [
                                argument_list(12, 13, [
                                    assignment_expression(12, 13, [
                                        conditional_expression(12, 13, [
                                            logical_or_expression(12, 13, [
                                                logical_and_expression(12, 13, [
                                                    equality_expression(12, 13, [
                                                        relational_expression(12, 13, [
                                                            additive_expression(12, 13, [
                                                                multiplicative_expression(12, 13, [
                                                                    unary_expression(12, 13, [
                                                                        left_hand_side_expression(12, 13, [
                                                                            new_expression(12, 13, [
                                                                                member_expression(12, 13, [
                                                                                    primary_expression(12, 13, [
                                                                                        literal(12, 13, [
                                                                                            numeric_literal(12, 13)
                                                                                        ])
                                                                                    ])
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ])
            ])
        ]
    };
}

#[test]
fn test_program1() {
    parses_to! {
        parser: JsParser,
        input: "x;",
        rule: Rule::program,
        tokens: [
            program(0, 2, [
                statement(0, 2, [
                    expression_statement(0, 2, [
                        expression(0, 1, [
                            assignment_expression(0, 1, [
                                conditional_expression(0, 1, [
                                    logical_or_expression(0, 1, [
                                        logical_and_expression(0, 1, [
                                            equality_expression(0, 1, [
                                                relational_expression(0, 1, [
                                                    additive_expression(0, 1, [
                                                        multiplicative_expression(0, 1, [
                                                            unary_expression(0, 1, [
                                                                left_hand_side_expression(0, 1, [
                                                                    new_expression(0, 1, [
                                                                        member_expression(0, 1, [
                                                                            primary_expression(0, 1, [
                                                                                identifier_reference(0, 1, [
                                                                                    identifier(0, 1)
                                                                                ])
                                                                            ])
                                                                        ])
                                                                    ])
                                                                ])
                                                            ])
                                                        ])
                                                    ])
                                                ])
                                            ])
                                        ])
                                    ])
                                ])
                            ])
                        ])
                    ])
                ]),
                EOI(2, 2)
            ])
        ]
    };
}

fn first_initializer(code: &str) -> LiteralType {
    let program = JsParser::parse_to_ast_from_str(code).unwrap();
    match &program.body[0] {
        StatementType::VariableDeclaration(decl) => match &decl.declarations[0].init {
            Some(ExpressionType::Literal(data)) => data.value.clone(),
            other => panic!("Expected a literal initializer, got {:?}", other),
        },
        other => panic!("Expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_ast_variable_declaration() {
    let program = JsParser::parse_to_ast_from_str("var x = 5;").unwrap();
    assert_eq!(program.body.len(), 1);
    match &program.body[0] {
        StatementType::VariableDeclaration(decl) => {
            assert_eq!(decl.kind, VariableDeclarationKind::Var);
            assert_eq!(decl.declarations.len(), 1);
            assert_eq!(decl.declarations[0].id.name, "x");
        }
        other => panic!("Expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_ast_number_literals() {
    assert_eq!(
        first_initializer("var a = 42;"),
        LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(42))
    );
    assert_eq!(
        first_initializer("var b = 2.5;"),
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(2.5))
    );
    assert_eq!(
        first_initializer("var c = 1e3;"),
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(1000.0))
    );
}

#[test]
fn test_ast_string_escapes() {
    assert_eq!(
        first_initializer("var s = 'a\\nb';"),
        LiteralType::StringLiteral("a\nb".to_string())
    );
    assert_eq!(
        first_initializer("var s = \"tab\\there\";"),
        LiteralType::StringLiteral("tab\there".to_string())
    );
}

#[test]
fn test_ast_strict_directive() {
    let strict = JsParser::parse_to_ast_from_str("\"use strict\"; var x = 1;").unwrap();
    assert!(strict.is_strict);
    let also_strict = JsParser::parse_to_ast_from_str("'use strict'; var x = 1;").unwrap();
    assert!(also_strict.is_strict);
    let sloppy = JsParser::parse_to_ast_from_str("var x = 1;").unwrap();
    assert!(!sloppy.is_strict);
}

#[test]
fn test_ast_arrow_function() {
    let program = JsParser::parse_to_ast_from_str("var add = (a, b) => a + b;").unwrap();
    match &program.body[0] {
        StatementType::VariableDeclaration(decl) => match &decl.declarations[0].init {
            Some(ExpressionType::ArrowFunctionExpression(f)) => {
                assert!(f.is_arrow);
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.params[0].name, "a");
                assert_eq!(f.params[1].name, "b");
                // The concise body desugars to a single return statement.
                assert_eq!(f.body.statements.len(), 1);
                assert!(matches!(
                    f.body.statements[0],
                    StatementType::ReturnStatement { .. }
                ));
            }
            other => panic!("Expected an arrow function, got {:?}", other),
        },
        other => panic!("Expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_ast_method_definition() {
    let program =
        JsParser::parse_to_ast_from_str("var obj = { greet(name) { return name; } };").unwrap();
    match &program.body[0] {
        StatementType::VariableDeclaration(decl) => match &decl.declarations[0].init {
            Some(ExpressionType::ObjectExpression { properties, .. }) => {
                assert_eq!(properties.len(), 1);
                assert_eq!(properties[0].key.name(), "greet");
                match &properties[0].value {
                    ExpressionType::FunctionExpression(f) => {
                        assert!(!f.is_arrow);
                        assert_eq!(f.params.len(), 1);
                    }
                    other => panic!("Expected a function expression, got {:?}", other),
                }
            }
            other => panic!("Expected an object literal, got {:?}", other),
        },
        other => panic!("Expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_ast_reserved_property_names() {
    // Keywords stay legal after a dot even though they never parse as
    // identifier references.
    assert!(JsParser::parse_to_ast_from_str("box.new;").is_ok());
    assert!(JsParser::parse_to_ast_from_str("box.this;").is_ok());
    assert!(JsParser::parse_to_ast_from_str("box.while;").is_ok());
}

#[test]
fn test_ast_invalid_assignment_target() {
    assert!(JsParser::parse_to_ast_from_str("1 = 2;").is_err());
    assert!(JsParser::parse_to_ast_from_str("f() = 2;").is_err());
}

#[test]
fn test_ast_const_requires_initializer() {
    assert!(JsParser::parse_to_ast_from_str("const x;").is_err());
    assert!(JsParser::parse_to_ast_from_str("const x = 1;").is_ok());
}

#[test]
fn test_ast_return_outside_function() {
    assert!(JsParser::parse_to_ast_from_str("return 1;").is_err());
    assert!(JsParser::parse_to_ast_from_str("function f() { return 1; }").is_ok());
}

#[test]
fn test_ast_duplicate_parameters() {
    assert!(JsParser::parse_to_ast_from_str("function f(a, a) { return a; }").is_ok());
    assert!(
        JsParser::parse_to_ast_from_str("\"use strict\"; function f(a, a) { return a; }").is_err()
    );
    assert!(
        JsParser::parse_to_ast_from_str("function f(a, a) { \"use strict\"; return a; }").is_err()
    );
}

#[test]
fn test_ast_missing_semicolon() {
    assert!(JsParser::parse_to_ast_from_str("var x = 1").is_err());
}

#[test]
fn test_perf1() {
    let start = Instant::now();
    let result = JsParser::parse_to_ast_from_str("[[[[[[[[]]]]]]]];");
    let end = Instant::now();
    match result {
        Ok(_) => {
            assert!(
                end.saturating_duration_since(start).as_millis() < 800,
                "Script taking too long to run."
            );
        }
        Err(e) => {
            assert!(false, "There was an error {}", e);
        }
    }
}
