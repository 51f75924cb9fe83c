use std::fmt::Display;

use thiserror::Error;

use crate::{Position, Span};

/// The diagnostic taxonomy. Every [`ErrorImpl`] cause belongs to exactly one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UndefinedIdentifier,
    UndefinedType,
    Redeclaration,
    TypeMismatch,
    InvalidContext,
    NotCallable,
    NotIndexable,
    MemberNotFound,
    ConstViolation,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UndefinedIdentifier => "UndefinedIdentifier",
            ErrorCode::UndefinedType => "UndefinedType",
            ErrorCode::Redeclaration => "Redeclaration",
            ErrorCode::TypeMismatch => "TypeMismatch",
            ErrorCode::InvalidContext => "InvalidContext",
            ErrorCode::NotCallable => "NotCallable",
            ErrorCode::NotIndexable => "NotIndexable",
            ErrorCode::MemberNotFound => "MemberNotFound",
            ErrorCode::ConstViolation => "ConstViolation",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        self.get_error_code().as_str()
    }

    pub fn get_error_code(&self) -> ErrorCode {
        match &self.internal_error {
            ErrorImpl::UndefinedIdentifier { .. } | ErrorImpl::MissingEntryPoint { .. } => {
                ErrorCode::UndefinedIdentifier
            }
            ErrorImpl::UndefinedType { .. } => ErrorCode::UndefinedType,
            ErrorImpl::Redeclaration { .. } => ErrorCode::Redeclaration,
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::ArgumentTypeMismatch { .. }
            | ErrorImpl::FieldTypeMismatch { .. }
            | ErrorImpl::ReturnTypeMismatch { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::NonBooleanCondition { .. }
            | ErrorImpl::NonIntegralIndex { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::UnexpectedReturnValue
            | ErrorImpl::ExpectedExplicitValue
            | ErrorImpl::InvalidCast { .. }
            | ErrorImpl::TemplateArgumentMismatch { .. }
            | ErrorImpl::RecursiveType { .. } => ErrorCode::TypeMismatch,
            ErrorImpl::BreakOutsideLoop
            | ErrorImpl::ContinueOutsideLoop
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::ThrowOutsideFunction
            | ErrorImpl::ThisOutsideObject
            | ErrorImpl::NestedTemplate { .. }
            | ErrorImpl::InvalidAssignmentTarget => ErrorCode::InvalidContext,
            ErrorImpl::NotCallable { .. } => ErrorCode::NotCallable,
            ErrorImpl::NotIndexable { .. } => ErrorCode::NotIndexable,
            ErrorImpl::MemberNotFound { .. } => ErrorCode::MemberNotFound,
            ErrorImpl::ConstViolation { .. } => ErrorCode::ConstViolation,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UndefinedIdentifier { identifier } => {
                ErrorTip::Suggestion(format!("`{}` is not declared in this scope", identifier))
            }
            ErrorImpl::MissingEntryPoint { name } => ErrorTip::Suggestion(format!(
                "Programs need a callable `{}` declared at global scope",
                name
            )),
            ErrorImpl::UndefinedType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::Redeclaration { symbol } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope",
                symbol
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::FieldTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected field type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Function returns `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::InvalidOperands { .. } | ErrorImpl::InvalidOperand { .. } => ErrorTip::None,
            ErrorImpl::NonBooleanCondition { received } => ErrorTip::Suggestion(format!(
                "`{}` cannot be used as a condition",
                received
            )),
            ErrorImpl::NonIntegralIndex { received } => ErrorTip::Suggestion(format!(
                "Indices must be integral, received `{}`",
                received
            )),
            ErrorImpl::MissingReturnValue { expected } => ErrorTip::Suggestion(format!(
                "Function returns `{}`, add a return value",
                expected
            )),
            ErrorImpl::UnexpectedReturnValue => {
                ErrorTip::Suggestion(String::from("Functions returning `void` cannot return a value"))
            }
            ErrorImpl::ExpectedExplicitValue => ErrorTip::Suggestion(String::from(
                "Expected explicit value when no type is given",
            )),
            ErrorImpl::InvalidCast { .. } => ErrorTip::None,
            ErrorImpl::TemplateArgumentMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} template arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::RecursiveType { type_ } => ErrorTip::Suggestion(format!(
                "`{}` would have unbounded size, refer to it through a pointer",
                type_
            )),
            ErrorImpl::BreakOutsideLoop => {
                ErrorTip::Suggestion(String::from("`break` can only be used inside a loop or switch"))
            }
            ErrorImpl::ContinueOutsideLoop => {
                ErrorTip::Suggestion(String::from("`continue` can only be used inside a loop"))
            }
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` can only be used inside a function"))
            }
            ErrorImpl::ThrowOutsideFunction => {
                ErrorTip::Suggestion(String::from("`throw` can only be used inside a function"))
            }
            ErrorImpl::ThisOutsideObject => {
                ErrorTip::Suggestion(String::from("`this` can only be used inside an object method"))
            }
            ErrorImpl::NestedTemplate { name } => ErrorTip::Suggestion(format!(
                "Template `{}` cannot be declared inside another template",
                name
            )),
            ErrorImpl::InvalidAssignmentTarget => {
                ErrorTip::Suggestion(String::from("Only variables, members, indices and dereferences can be assigned"))
            }
            ErrorImpl::NotCallable { type_ } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be called", type_))
            }
            ErrorImpl::NotIndexable { type_ } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be indexed", type_))
            }
            ErrorImpl::MemberNotFound { type_, member } => {
                ErrorTip::Suggestion(format!("`{}` has no member `{}`", type_, member))
            }
            ErrorImpl::ConstViolation { target } => {
                ErrorTip::Suggestion(format!("`{}` is const and cannot be modified", target))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at {}",
            self.get_error_name(),
            self.internal_error,
            self.span.start
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("undefined symbol {identifier:?}")]
    UndefinedIdentifier { identifier: String },
    #[error("no callable entry point {name:?} declared")]
    MissingEntryPoint { name: String },
    #[error("unknown type {type_}")]
    UndefinedType { type_: String },
    #[error("{symbol:?} already declared")]
    Redeclaration { symbol: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMismatch { expected: String, received: String },
    #[error("field types do not match: expected {expected:?}, received {received:?}")]
    FieldTypeMismatch { expected: String, received: String },
    #[error("return type does not match: expected {expected:?}, received {received:?}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("operator {operator:?} cannot be applied to {left:?} and {right:?}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator {operator:?} cannot be applied to {operand:?}")]
    InvalidOperand { operator: String, operand: String },
    #[error("condition of type {received:?} is not boolean-convertible")]
    NonBooleanCondition { received: String },
    #[error("index of type {received:?} is not integral")]
    NonIntegralIndex { received: String },
    #[error("missing return value of type {expected:?}")]
    MissingReturnValue { expected: String },
    #[error("unexpected return value in function returning void")]
    UnexpectedReturnValue,
    #[error("expected explicit value when no type is given")]
    ExpectedExplicitValue,
    #[error("cannot cast {from:?} to {to:?}")]
    InvalidCast { from: String, to: String },
    #[error("template arguments do not match: expected {expected:?}, received {received:?}")]
    TemplateArgumentMismatch { expected: usize, received: usize },
    #[error("type {type_:?} contains itself by value")]
    RecursiveType { type_: String },
    #[error("break outside of loop")]
    BreakOutsideLoop,
    #[error("continue outside of loop")]
    ContinueOutsideLoop,
    #[error("return outside of function")]
    ReturnOutsideFunction,
    #[error("throw outside of function")]
    ThrowOutsideFunction,
    #[error("this outside of object method")]
    ThisOutsideObject,
    #[error("nested template {name:?}")]
    NestedTemplate { name: String },
    #[error("expression is not assignable")]
    InvalidAssignmentTarget,
    #[error("type {type_:?} is not callable")]
    NotCallable { type_: String },
    #[error("type {type_:?} is not indexable")]
    NotIndexable { type_: String },
    #[error("type {type_:?} has no member {member:?}")]
    MemberNotFound { type_: String, member: String },
    #[error("cannot modify const {target:?}")]
    ConstViolation { target: String },
}

/// Ordered, append-only list of diagnostics collected during a single check.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn push(&mut self, error: Error) {
        tracing::debug!(
            code = error.get_error_name(),
            message = %error.message(),
            position = %error.get_position(),
            "diagnostic"
        );
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Number of collected diagnostics carrying `code`.
    pub fn count(&self, code: ErrorCode) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_error_code() == code)
            .count()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
