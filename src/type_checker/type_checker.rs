use std::collections::HashMap;

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Diagnostics, Error, ErrorImpl},
    symbol_table::{symbol::Symbol, symbol_table::SymbolTable},
    types::{
        composite::{ArrayType, FunctionType, PointerType},
        primitive::{ErrorType, SymbolType, TemplateParameterType},
        types::{Type, TypeKind, TypeWrapper},
    },
    Span,
};

use super::builtins::register_builtins;

/// Behaviour switches for a single run of the checker.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Fail the program when no callable entry point is declared at global scope.
    pub require_main: bool,
    pub entry_point: String,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            require_main: true,
            entry_point: String::from("main"),
        }
    }
}

/// State threaded through the walk and saved/restored around nested constructs.
#[derive(Debug, Clone, Default)]
pub struct TypeCheckContext {
    /// Declared return type of the enclosing function, if any.
    pub return_type: Option<TypeWrapper>,
    pub in_loop: bool,
    pub in_switch: bool,
    pub in_try: bool,
    /// Object whose method body is being checked.
    pub this_type: Option<TypeWrapper>,
    /// Template parameter bindings, one frame per template declaration.
    pub template_frames: Vec<HashMap<String, TypeWrapper>>,
}

impl TypeCheckContext {
    pub fn in_function(&self) -> bool {
        self.return_type.is_some()
    }

    pub fn in_template(&self) -> bool {
        !self.template_frames.is_empty()
    }

    pub fn lookup_template_parameter(&self, name: &str) -> Option<TypeWrapper> {
        self.template_frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).cloned())
    }
}

#[derive(Debug)]
pub struct TypeChecker {
    pub symbol_table: SymbolTable,
    pub diagnostics: Diagnostics,
    pub context: TypeCheckContext,
    pub options: CheckerOptions,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::with_options(CheckerOptions::default())
    }

    pub fn with_options(options: CheckerOptions) -> Self {
        let mut checker = TypeChecker {
            symbol_table: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            context: TypeCheckContext::default(),
            options,
        };

        if let Err(error) = register_builtins(&mut checker.symbol_table) {
            checker.diagnostics.push(error);
        }

        checker
    }

    /// Checks every top-level statement in the global scope.
    ///
    /// Returns `true` only when no diagnostics were collected and, unless
    /// disabled, a callable entry point exists at global scope.
    #[tracing::instrument(skip(self, program), fields(statements = program.body.len()))]
    pub fn check_program(&mut self, program: &BlockStmt) -> bool {
        for stmt in program.iter() {
            self.check_stmt(stmt);
        }

        if self.options.require_main {
            let has_entry_point = self
                .symbol_table
                .lookup_global(&self.options.entry_point)
                .map(|symbol| symbol.is_callable())
                .unwrap_or(false);

            if !has_entry_point {
                let name = self.options.entry_point.clone();
                self.report(ErrorImpl::MissingEntryPoint { name }, &Span::null());
            }
        }

        let passed = self.diagnostics.is_empty();
        tracing::debug!(passed, diagnostics = self.diagnostics.len(), "type check finished");
        passed
    }

    pub fn report(&mut self, error: ErrorImpl, span: &Span) {
        self.diagnostics.push(Error::new(error, span.clone()));
    }

    /// Reports `error` and hands back the `Error` type to continue with.
    pub fn report_error(&mut self, error: ErrorImpl, span: &Span) -> TypeWrapper {
        self.report(error, span);
        error_type()
    }

    pub fn declare(&mut self, symbol: Symbol) {
        if let Err(error) = self.symbol_table.declare_symbol(symbol) {
            self.diagnostics.push(error);
        }
    }

    /// Builtin type by name, `Error` if the registry was tampered with.
    pub fn builtin(&self, name: &str) -> TypeWrapper {
        self.symbol_table
            .lookup_type(name)
            .unwrap_or_else(error_type)
    }

    /// Resolves the named references inside a type annotation against the
    /// active template bindings and the named-type registry.
    pub fn resolve_type(&mut self, ty: &TypeWrapper, span: &Span) -> TypeWrapper {
        match ty.get_type_kind() {
            TypeKind::Symbol => {
                let name = match ty.downcast_ref::<SymbolType>() {
                    Some(symbol) => symbol.name.clone(),
                    None => return ty.clone(),
                };

                if let Some(bound) = self.context.lookup_template_parameter(&name) {
                    return bound;
                }

                match self.symbol_table.lookup_type(&name) {
                    Some(resolved) => resolved,
                    None => self.report_error(ErrorImpl::UndefinedType { type_: name }, span),
                }
            }
            TypeKind::Array => match ty.downcast_ref::<ArrayType>() {
                Some(array) => {
                    let element = self.resolve_type(&array.element, span);
                    TypeWrapper::new(ArrayType::new(element, array.size))
                }
                None => ty.clone(),
            },
            TypeKind::Pointer => match ty.downcast_ref::<PointerType>() {
                Some(pointer) => {
                    let pointee = self.resolve_type(&pointer.pointee, span);
                    TypeWrapper::new(
                        PointerType::new(pointee)
                            .with_qualifiers(pointer.is_const, pointer.is_volatile),
                    )
                }
                None => ty.clone(),
            },
            TypeKind::Function => match ty.downcast_ref::<FunctionType>() {
                Some(function) => {
                    let parameters = function
                        .parameters
                        .iter()
                        .map(|parameter| self.resolve_type(parameter, span))
                        .collect();
                    let return_type = self.resolve_type(&function.return_type, span);
                    TypeWrapper::new(FunctionType::new(parameters, return_type))
                }
                None => ty.clone(),
            },
            _ => ty.clone(),
        }
    }

    /// Registry version of a user type. Objects and structs are registered as a
    /// name-only shell before their members are known, so types captured early
    /// may lack members.
    pub fn canonical_type(&self, ty: &TypeWrapper) -> TypeWrapper {
        if !matches!(
            ty.get_type_kind(),
            TypeKind::Object | TypeKind::Struct | TypeKind::Enum
        ) {
            return ty.clone();
        }

        match self.symbol_table.lookup_type(&ty.name()) {
            Some(registered) if registered.get_type_kind() == ty.get_type_kind() => registered,
            _ => ty.clone(),
        }
    }

    pub fn push_template_frame(&mut self, parameters: &[String]) {
        let frame = parameters
            .iter()
            .map(|name| {
                (
                    name.clone(),
                    TypeWrapper::new(TemplateParameterType::new(name)),
                )
            })
            .collect();
        self.context.template_frames.push(frame);
        tracing::trace!(?parameters, "enter template");
    }

    pub fn pop_template_frame(&mut self) {
        self.context.template_frames.pop();
        tracing::trace!("exit template");
    }
}

pub fn error_type() -> TypeWrapper {
    TypeWrapper::new(ErrorType)
}

/// Checks `program` with the default options.
///
/// On success the populated symbol table is handed back for later stages;
/// otherwise every collected diagnostic is returned in report order.
pub fn type_check(program: &BlockStmt) -> Result<SymbolTable, Diagnostics> {
    let mut checker = TypeChecker::new();
    if checker.check_program(program) {
        Ok(checker.symbol_table)
    } else {
        Err(checker.diagnostics)
    }
}
