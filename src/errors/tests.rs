//! Unit tests for error handling.
//!
//! This module contains tests for error codes, tips and the diagnostic collector.

use crate::errors::errors::{Diagnostics, Error, ErrorCode, ErrorImpl, ErrorTip};
use crate::{Position, Span};
use std::rc::Rc;

fn span_at(line: u32, column: u32) -> Span {
    Span::new(Position::new(Rc::new("test.fx".to_string()), line, column), 1)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UndefinedIdentifier {
            identifier: "foo".to_string(),
        },
        span_at(1, 10),
    );

    assert_eq!(error.get_error_name(), "UndefinedIdentifier");
    assert_eq!(error.get_error_code(), ErrorCode::UndefinedIdentifier);
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::BreakOutsideLoop, span_at(42, 3));

    assert_eq!(error.get_position().line, 42);
    assert_eq!(error.get_position().column, 3);
    assert_eq!(error.get_span().length, 1);
}

#[test]
fn test_mismatch_causes_share_a_code() {
    let causes = vec![
        ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        ErrorImpl::ArgumentTypeMismatch {
            expected: "int".to_string(),
            received: "float".to_string(),
        },
        ErrorImpl::MissingArguments {
            expected: 2,
            received: 1,
        },
        ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 3,
        },
        ErrorImpl::NonIntegralIndex {
            received: "float".to_string(),
        },
        ErrorImpl::UnexpectedReturnValue,
        ErrorImpl::RecursiveType {
            type_: "Node".to_string(),
        },
    ];

    for cause in causes {
        let error = Error::new(cause, Span::null());
        assert_eq!(error.get_error_code(), ErrorCode::TypeMismatch);
    }
}

#[test]
fn test_context_causes_share_a_code() {
    for cause in [
        ErrorImpl::BreakOutsideLoop,
        ErrorImpl::ContinueOutsideLoop,
        ErrorImpl::ReturnOutsideFunction,
        ErrorImpl::ThisOutsideObject,
        ErrorImpl::InvalidAssignmentTarget,
    ] {
        assert_eq!(Error::new(cause, Span::null()).get_error_name(), "InvalidContext");
    }
}

#[test]
fn test_missing_entry_point_is_undefined_identifier() {
    let error = Error::new(
        ErrorImpl::MissingEntryPoint {
            name: "main".to_string(),
        },
        Span::null(),
    );

    assert_eq!(error.get_error_code(), ErrorCode::UndefinedIdentifier);
}

#[test]
fn test_error_message() {
    let error = Error::new(
        ErrorImpl::MemberNotFound {
            type_: "Point".to_string(),
            member: "z".to_string(),
        },
        Span::null(),
    );

    assert_eq!(error.message(), "type \"Point\" has no member \"z\"");
    assert_eq!(error.get_tip().to_string(), "`Point` has no member `z`");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::ConstViolation {
            target: "x".to_string(),
        },
        span_at(3, 5),
    );

    assert_eq!(
        error.to_string(),
        "ConstViolation: cannot modify const \"x\" at test.fx:3:5"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::InvalidOperand {
            operator: "!".to_string(),
            operand: "Point".to_string(),
        },
        Span::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostics_preserve_order() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.push(Error::new(ErrorImpl::BreakOutsideLoop, span_at(1, 1)));
    diagnostics.push(Error::new(
        ErrorImpl::NotCallable {
            type_: "int".to_string(),
        },
        span_at(2, 1),
    ));
    diagnostics.push(Error::new(ErrorImpl::ContinueOutsideLoop, span_at(3, 1)));

    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.count(ErrorCode::InvalidContext), 2);
    assert_eq!(diagnostics.count(ErrorCode::NotCallable), 1);

    let lines: Vec<u32> = diagnostics.iter().map(|e| e.get_position().line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}
