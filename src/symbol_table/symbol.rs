use std::collections::HashMap;

use crate::{
    types::{
        composite::FunctionType,
        types::{Type, TypeKind, TypeWrapper},
    },
    Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    Operator,
    Type,
    Namespace,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub symbol_type: TypeWrapper,
    pub span: Span,
    pub is_constant: bool,
    pub is_volatile: bool,
    /// Parameter names of a template declaration.
    pub template_parameters: Vec<String>,
    /// Members of a namespace, kept reachable after its scope is popped.
    pub members: HashMap<String, Symbol>,
    /// Whether a function has been given a body, as opposed to a prototype only.
    pub is_defined: bool,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, symbol_type: TypeWrapper, span: Span) -> Self {
        Symbol {
            name: name.to_string(),
            kind,
            symbol_type,
            span,
            is_constant: false,
            is_volatile: false,
            template_parameters: vec![],
            members: HashMap::new(),
            is_defined: false,
        }
    }

    pub fn with_qualifiers(mut self, is_constant: bool, is_volatile: bool) -> Self {
        self.is_constant = is_constant;
        self.is_volatile = is_volatile;
        self
    }

    pub fn with_template_parameters(mut self, parameters: Vec<String>) -> Self {
        self.template_parameters = parameters;
        self
    }

    pub fn with_members(mut self, members: HashMap<String, Symbol>) -> Self {
        self.members = members;
        self
    }

    pub fn with_definition(mut self, is_defined: bool) -> Self {
        self.is_defined = is_defined;
        self
    }

    pub fn is_callable(&self) -> bool {
        self.symbol_type.get_type_kind() == TypeKind::Function
    }

    pub fn is_template(&self) -> bool {
        !self.template_parameters.is_empty()
    }

    pub fn parameter_types(&self) -> Option<&[TypeWrapper]> {
        self.symbol_type
            .downcast_ref::<FunctionType>()
            .map(|function| function.parameters.as_slice())
    }

    pub fn return_type(&self) -> Option<&TypeWrapper> {
        self.symbol_type
            .downcast_ref::<FunctionType>()
            .map(|function| &function.return_type)
    }
}
