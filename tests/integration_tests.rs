//! Integration tests for whole-program type checking.
//!
//! These tests build complete programs as ASTs and run them through the public
//! entry points, checking the final verdict, the diagnostics and their spans.

use std::rc::Rc;

use datac::{
    ast::{
        ast::{ExprWrapper, StmtWrapper},
        expressions::{BinaryExpr, CallExpr, FloatExpr, IntegerExpr, SymbolExpr},
        statements::{
            BlockStmt, BreakStmt, ExpressionStmt, FieldDecl, FnDeclStmt, Parameter, ReturnStmt,
            StructDeclStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::ErrorCode,
    render_diagnostic,
    type_checker::type_checker::{type_check, TypeChecker},
    types::{
        primitive::{DataType, SymbolType},
        types::{Type, TypeWrapper},
    },
    Position, Span,
};

fn span(line: u32, column: u32, length: u32) -> Span {
    Span::new(Position::new(Rc::new("main.fx".to_string()), line, column), length)
}

fn named(name: &str) -> TypeWrapper {
    TypeWrapper::new(SymbolType::new(name))
}

fn int(value: i128) -> ExprWrapper {
    ExprWrapper::new(IntegerExpr { value, span: Span::null() })
}

fn sym(name: &str) -> ExprWrapper {
    ExprWrapper::new(SymbolExpr {
        value: name.to_string(),
        span: Span::null(),
    })
}

fn ret(value: ExprWrapper) -> StmtWrapper {
    StmtWrapper::new(ReturnStmt {
        value: Some(value),
        span: Span::null(),
    })
}

fn block(body: Vec<StmtWrapper>) -> BlockStmt {
    BlockStmt {
        body,
        span: Span::null(),
    }
}

fn function(name: &str, parameters: Vec<Parameter>, return_type: &str, body: Vec<StmtWrapper>) -> StmtWrapper {
    StmtWrapper::new(FnDeclStmt {
        identifier: name.to_string(),
        parameters,
        return_type: named(return_type),
        body: Some(block(body)),
        span: Span::null(),
    })
}

/// `def main() -> int { <body> return 0; }`
fn main_fn(mut body: Vec<StmtWrapper>) -> StmtWrapper {
    body.push(ret(int(0)));
    function("main", vec![], "int", body)
}

/// `def f(int x) -> int { return x; };`
fn int_identity() -> StmtWrapper {
    function(
        "f",
        vec![Parameter {
            identifier: "x".to_string(),
            param_type: named("int"),
            is_constant: false,
            span: Span::null(),
        }],
        "int",
        vec![ret(sym("x"))],
    )
}

fn call_f_with_float() -> ExprWrapper {
    ExprWrapper::new(CallExpr {
        callee: sym("f"),
        arguments: vec![ExprWrapper::new(FloatExpr {
            value: 3.14,
            span: span(6, 7, 4),
        })],
        template_arguments: vec![],
        span: span(6, 5, 7),
    })
}

fn expr_stmt(expression: ExprWrapper) -> StmtWrapper {
    StmtWrapper::new(ExpressionStmt {
        expression,
        span: Span::null(),
    })
}

#[test]
fn test_argument_mismatch_reports_once() {
    let program = block(vec![int_identity(), main_fn(vec![expr_stmt(call_f_with_float())])]);

    let mut checker = TypeChecker::new();
    assert!(!checker.check_program(&program), "Program should be rejected");
    assert_eq!(checker.diagnostics.len(), 1);

    let error = checker.diagnostics.iter().next().expect("one diagnostic");
    assert_eq!(error.get_error_code(), ErrorCode::TypeMismatch);
    assert_eq!(error.get_span(), &span(6, 7, 4));

    // The call keeps its declared result type despite the bad argument.
    let result = checker.check_expr(&call_f_with_float());
    assert_eq!(result.name(), "int");
}

#[test]
fn test_break_placement() {
    let inside_loop = block(vec![main_fn(vec![StmtWrapper::new(WhileStmt {
        condition: int(1),
        body: StmtWrapper::new(block(vec![StmtWrapper::new(BreakStmt { span: Span::null() })])),
        is_do_while: false,
        span: Span::null(),
    })])]);
    assert!(type_check(&inside_loop).is_ok(), "Break inside a loop is legal");

    let at_function_top = block(vec![main_fn(vec![StmtWrapper::new(BreakStmt {
        span: span(2, 5, 5),
    })])]);
    match type_check(&at_function_top) {
        Ok(_) => panic!("Break outside a loop should be rejected"),
        Err(diagnostics) => {
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics.count(ErrorCode::InvalidContext), 1);
        }
    }
}

#[test]
fn test_missing_entry_point() {
    let program = block(vec![int_identity()]);
    let diagnostics = match type_check(&program) {
        Ok(_) => panic!("A program without main should be rejected"),
        Err(diagnostics) => diagnostics,
    };
    assert_eq!(diagnostics.count(ErrorCode::UndefinedIdentifier), 1);
}

#[test]
fn test_symbol_table_returned_on_success() {
    let program = block(vec![int_identity(), main_fn(vec![])]);
    let table = type_check(&program).expect("Program should type check");

    let f = table.lookup_global("f").expect("f is declared");
    assert!(f.is_callable());
    assert_eq!(f.return_type().map(|ty| ty.name()), Some("int".to_string()));
    assert!(table.lookup_global("x").is_none(), "Parameters stay in the function scope");
}

#[test]
fn test_struct_layout_through_registry() {
    let field = |name: &str, ty: &str, alignment: Option<u64>| FieldDecl {
        identifier: name.to_string(),
        field_type: named(ty),
        alignment,
        is_volatile: false,
        span: Span::null(),
    };
    let header = |name: &str, is_packed: bool, alignment: Option<u64>| {
        StmtWrapper::new(StructDeclStmt {
            name: name.to_string(),
            fields: vec![field("flag", "u8", None), field("value", "int", alignment)],
            is_packed,
            alignment: None,
            span: Span::null(),
        })
    };

    let program = block(vec![
        header("Packed", true, None),
        header("Padded", false, Some(32)),
        main_fn(vec![]),
    ]);
    let table = type_check(&program).expect("Struct declarations should type check");

    assert_eq!(table.lookup_type("Packed").map(|t| t.size_in_bits()), Some(40));
    assert_eq!(table.lookup_type("Padded").map(|t| t.size_in_bits()), Some(64));
}

#[test]
fn test_shadowed_width_is_restored() {
    let local = |name: &str, ty: &str| {
        StmtWrapper::new(VarDeclStmt {
            identifier: name.to_string(),
            is_constant: false,
            is_volatile: false,
            assigned_value: None,
            explicit_type: Some(named(ty)),
            span: Span::null(),
        })
    };

    // Once the inner block closes `x` is an `int` again; the inner `float`
    // would make `x + y` unassignable to a 32-bit target.
    let program = block(vec![main_fn(vec![
        local("x", "int"),
        StmtWrapper::new(block(vec![local("x", "float")])),
        local("y", "int"),
        StmtWrapper::new(VarDeclStmt {
            identifier: "sum".to_string(),
            is_constant: false,
            is_volatile: false,
            assigned_value: Some(ExprWrapper::new(BinaryExpr {
                left: sym("x"),
                operator: "+".to_string(),
                right: sym("y"),
                span: Span::null(),
            })),
            explicit_type: Some(TypeWrapper::new(DataType::signed(32))),
            span: Span::null(),
        }),
    ])]);

    assert!(type_check(&program).is_ok());
}

#[test]
fn test_rendered_checker_diagnostic() {
    let source = "def f(int x) -> int {\n    return x;\n};\n\ndef main() -> int {\n    f(3.14);\n    return 0;\n};\n";
    let program = block(vec![int_identity(), main_fn(vec![expr_stmt(call_f_with_float())])]);

    let diagnostics = match type_check(&program) {
        Ok(_) => panic!("Program should be rejected"),
        Err(diagnostics) => diagnostics.into_vec(),
    };
    let rendered = render_diagnostic(&diagnostics[0], source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: TypeMismatch (Expected argument type `int`, received `float`)"
    );
    assert_eq!(lines[1], "-> main.fx:6:7");
    assert_eq!(lines[3], "6 | f(3.14);");
    assert_eq!(lines[4], "  | --^^^^");
}
