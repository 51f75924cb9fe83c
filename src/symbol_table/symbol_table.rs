use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    types::types::TypeWrapper,
    Span,
};

use super::symbol::Symbol;

#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<usize>,
}

impl Scope {
    pub fn new(parent: Option<usize>) -> Self {
        Scope {
            symbols: HashMap::new(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn into_symbols(self) -> HashMap<String, Symbol> {
        self.symbols
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: usize,
    /// Named types (builtins, objects, structs, enums, aliases), visible program-wide.
    types: HashMap<String, TypeWrapper>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(None)],
            current: 0,
            types: HashMap::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new(Some(self.current)));
        self.current = self.scopes.len() - 1;
        tracing::trace!(depth = self.depth(), "push scope");
    }

    /// Pops the current scope and hands it back. The global scope is never popped.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        let parent = self.scopes[self.current].parent?;
        let scope = self.scopes.pop();
        self.current = parent;
        tracing::trace!(depth = self.depth(), "pop scope");
        scope
    }

    /// Number of scopes from the global scope to the current one, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut index = self.current;
        while let Some(parent) = self.scopes[index].parent {
            depth += 1;
            index = parent;
        }
        depth
    }

    pub fn is_global_scope(&self) -> bool {
        self.current == 0
    }

    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn current_scope(&self) -> &Scope {
        &self.scopes[self.current]
    }

    /// Declares `symbol` in the current scope.
    ///
    /// Shadowing a symbol from an enclosing scope is allowed; a name already
    /// declared in the current scope is left untouched and reported.
    pub fn declare_symbol(&mut self, symbol: Symbol) -> Result<(), Error> {
        let scope = &mut self.scopes[self.current];
        if scope.symbols.contains_key(&symbol.name) {
            return Err(Error::new(
                ErrorImpl::Redeclaration {
                    symbol: symbol.name.clone(),
                },
                symbol.span.clone(),
            ));
        }

        tracing::trace!(name = %symbol.name, kind = ?symbol.kind, ty = %symbol.symbol_type, "declare symbol");
        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks `name` up from the current scope outward; the innermost declaration wins.
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        let mut index = Some(self.current);
        while let Some(current) = index {
            let scope = &self.scopes[current];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            index = scope.parent;
        }
        None
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current].symbols.get(name)
    }

    pub fn lookup_global(&self, name: &str) -> Option<&Symbol> {
        self.scopes[0].symbols.get(name)
    }

    /// Records that the symbol `name` of the current scope now has a body.
    /// Returns `false` when the current scope has no such symbol.
    pub fn mark_defined(&mut self, name: &str) -> bool {
        match self.scopes[self.current].symbols.get_mut(name) {
            Some(symbol) => {
                tracing::trace!(name, "define symbol");
                symbol.is_defined = true;
                true
            }
            None => false,
        }
    }

    /// Registers a named type. Names are unique across the whole program.
    pub fn declare_type(&mut self, name: &str, ty: TypeWrapper, span: &Span) -> Result<(), Error> {
        if self.types.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::Redeclaration {
                    symbol: name.to_string(),
                },
                span.clone(),
            ));
        }

        tracing::trace!(name, ty = %ty, "declare type");
        self.types.insert(name.to_string(), ty);
        Ok(())
    }

    /// Replaces the shell registered under `name` once the full type is known.
    /// Returns `false` when no shell was registered.
    pub fn complete_type(&mut self, name: &str, ty: TypeWrapper) -> bool {
        match self.types.get_mut(name) {
            Some(slot) => {
                tracing::trace!(name, ty = %ty, "complete type");
                *slot = ty;
                true
            }
            None => false,
        }
    }

    pub fn lookup_type(&self, name: &str) -> Option<TypeWrapper> {
        self.types.get(name).cloned()
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &String> {
        self.types.keys()
    }
}
