use std::collections::HashSet;

use crate::{
    ast::{
        ast::{Expr, Stmt, StmtType, StmtWrapper},
        statements::{
            BlockStmt, EnumDeclStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt,
            NamespaceDeclStmt, ObjectDeclStmt, OperatorDeclStmt, Parameter, ReturnStmt,
            StructDeclStmt, SwitchStmt, TemplateDeclStmt, ThrowStmt, TryStmt, TypeAliasStmt,
            VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::ErrorImpl,
    symbol_table::symbol::{Symbol, SymbolKind},
    types::{
        compatibility::{can_assign, is_compatible, is_void},
        composite::{ArrayType, FunctionType},
        nominal::{EnumType, ObjectMember, ObjectType, StructField, StructType},
        primitive::{BuiltinType, DataType},
        types::{Type, TypeKind, TypeWrapper},
    },
    Span, DOWNCAST,
};

use super::{
    builtins::operator_symbol_name,
    expr::is_deferred,
    type_checker::{TypeCheckContext, TypeChecker},
};

/// Whether `ty` stores an aggregate named `owner` inline rather than behind a pointer.
fn holds_by_value(ty: &TypeWrapper, owner: &str, kind: TypeKind) -> bool {
    if ty.get_type_kind() == kind && ty.name() == owner {
        return true;
    }
    match ty.downcast_ref::<ArrayType>() {
        Some(array) => holds_by_value(&array.element, owner, kind),
        None => false,
    }
}

/// Name reported for a declaration wrapped in a template.
fn declaration_name(stmt: &StmtWrapper) -> String {
    match stmt.get_stmt_type() {
        StmtType::FnDeclStmt => DOWNCAST!(stmt, FnDeclStmt).identifier.clone(),
        StmtType::OperatorDeclStmt => {
            format!("operator{}", DOWNCAST!(stmt, OperatorDeclStmt).operator)
        }
        StmtType::ObjectDeclStmt => DOWNCAST!(stmt, ObjectDeclStmt).name.clone(),
        StmtType::StructDeclStmt => DOWNCAST!(stmt, StructDeclStmt).name.clone(),
        StmtType::TemplateDeclStmt => declaration_name(&DOWNCAST!(stmt, TemplateDeclStmt).declaration),
        _ => String::from("<anonymous>"),
    }
}

impl TypeChecker {
    pub fn check_stmt(&mut self, stmt: &StmtWrapper) {
        match stmt.get_stmt_type() {
            StmtType::ExpressionStmt => {
                self.check_expr(&DOWNCAST!(stmt, ExpressionStmt).expression);
            }
            StmtType::BlockStmt => self.check_block(DOWNCAST!(stmt, BlockStmt)),
            StmtType::VarDeclStmt => self.check_var_decl(DOWNCAST!(stmt, VarDeclStmt)),
            StmtType::IfStmt => {
                let if_stmt = DOWNCAST!(stmt, IfStmt);
                self.check_condition(&if_stmt.condition);
                self.check_stmt(&if_stmt.then_body);
                if let Some(else_body) = &if_stmt.else_body {
                    self.check_stmt(else_body);
                }
            }
            StmtType::WhileStmt => {
                let while_stmt = DOWNCAST!(stmt, WhileStmt);
                if while_stmt.is_do_while {
                    self.check_loop_body(&while_stmt.body);
                    self.check_condition(&while_stmt.condition);
                } else {
                    self.check_condition(&while_stmt.condition);
                    self.check_loop_body(&while_stmt.body);
                }
            }
            StmtType::ForStmt => self.check_for(DOWNCAST!(stmt, ForStmt)),
            StmtType::BreakStmt => {
                if !self.context.in_loop && !self.context.in_switch {
                    self.report(ErrorImpl::BreakOutsideLoop, stmt.get_span());
                }
            }
            StmtType::ContinueStmt => {
                if !self.context.in_loop {
                    self.report(ErrorImpl::ContinueOutsideLoop, stmt.get_span());
                }
            }
            StmtType::ReturnStmt => self.check_return(DOWNCAST!(stmt, ReturnStmt)),
            StmtType::TryStmt => self.check_try(DOWNCAST!(stmt, TryStmt)),
            StmtType::ThrowStmt => {
                let throw = DOWNCAST!(stmt, ThrowStmt);
                self.check_expr(&throw.value);
                if !self.context.in_function() {
                    self.report(ErrorImpl::ThrowOutsideFunction, &throw.span);
                }
            }
            StmtType::SwitchStmt => self.check_switch(DOWNCAST!(stmt, SwitchStmt)),
            StmtType::FnDeclStmt => self.check_fn_decl(DOWNCAST!(stmt, FnDeclStmt), &[]),
            StmtType::OperatorDeclStmt => {
                self.check_operator_decl(DOWNCAST!(stmt, OperatorDeclStmt), &[])
            }
            StmtType::ObjectDeclStmt => self.check_object_decl(DOWNCAST!(stmt, ObjectDeclStmt), &[]),
            StmtType::StructDeclStmt => self.check_struct_decl(DOWNCAST!(stmt, StructDeclStmt)),
            StmtType::EnumDeclStmt => self.check_enum_decl(DOWNCAST!(stmt, EnumDeclStmt)),
            StmtType::TypeAliasStmt => self.check_type_alias(DOWNCAST!(stmt, TypeAliasStmt)),
            StmtType::NamespaceDeclStmt => {
                self.check_namespace(DOWNCAST!(stmt, NamespaceDeclStmt))
            }
            StmtType::TemplateDeclStmt => self.check_template(DOWNCAST!(stmt, TemplateDeclStmt)),
        }
    }

    /// Checks `block` in a fresh scope.
    pub fn check_block(&mut self, block: &BlockStmt) {
        self.symbol_table.push_scope();
        self.check_statements(block);
        self.symbol_table.pop_scope();
    }

    /// Checks the statements of `block` in the current scope.
    pub fn check_statements(&mut self, block: &BlockStmt) {
        for stmt in block.iter() {
            self.check_stmt(stmt);
        }
    }

    fn check_loop_body(&mut self, body: &StmtWrapper) {
        let in_loop = self.context.in_loop;
        self.context.in_loop = true;
        self.check_stmt(body);
        self.context.in_loop = in_loop;
    }

    fn check_for(&mut self, for_stmt: &ForStmt) {
        self.symbol_table.push_scope();

        if let Some(initializer) = &for_stmt.initializer {
            self.check_stmt(initializer);
        }
        if let Some(condition) = &for_stmt.condition {
            self.check_condition(condition);
        }
        if let Some(update) = &for_stmt.update {
            self.check_expr(update);
        }
        self.check_loop_body(&for_stmt.body);

        self.symbol_table.pop_scope();
    }

    fn check_var_decl(&mut self, decl: &VarDeclStmt) {
        let declared = decl
            .explicit_type
            .as_ref()
            .map(|explicit| self.resolve_type(explicit, &decl.span));
        let value = decl
            .assigned_value
            .as_ref()
            .map(|value| (self.check_expr(value), value.get_span().clone()));

        let ty = match (declared, value) {
            (Some(declared), Some((value_type, value_span))) => {
                if !can_assign(&declared, &value_type)
                    && !is_deferred(&declared)
                    && !is_deferred(&value_type)
                {
                    self.report(
                        ErrorImpl::TypeMismatch {
                            expected: declared.name(),
                            received: value_type.name(),
                        },
                        &value_span,
                    );
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some((value_type, value_span))) => {
                if is_void(&value_type) {
                    self.report_error(
                        ErrorImpl::TypeMismatch {
                            expected: String::from("a value"),
                            received: value_type.name(),
                        },
                        &value_span,
                    )
                } else {
                    value_type
                }
            }
            (None, None) => self.report_error(ErrorImpl::ExpectedExplicitValue, &decl.span),
        };

        self.declare(
            Symbol::new(&decl.identifier, SymbolKind::Variable, ty, decl.span.clone())
                .with_qualifiers(decl.is_constant, decl.is_volatile),
        );
    }

    fn check_return(&mut self, return_stmt: &ReturnStmt) {
        let value = return_stmt
            .value
            .as_ref()
            .map(|value| (self.check_expr(value), value.get_span().clone()));

        let expected = match self.context.return_type.clone() {
            Some(expected) => expected,
            None => {
                self.report(ErrorImpl::ReturnOutsideFunction, &return_stmt.span);
                return;
            }
        };

        match value {
            Some((_, value_span)) if is_void(&expected) => {
                self.report(ErrorImpl::UnexpectedReturnValue, &value_span);
            }
            Some((value_type, value_span)) => {
                if !can_assign(&expected, &value_type)
                    && !is_deferred(&expected)
                    && !is_deferred(&value_type)
                {
                    self.report(
                        ErrorImpl::ReturnTypeMismatch {
                            expected: expected.name(),
                            received: value_type.name(),
                        },
                        &value_span,
                    );
                }
            }
            None => {
                if !is_void(&expected) && !is_deferred(&expected) {
                    self.report(
                        ErrorImpl::MissingReturnValue {
                            expected: expected.name(),
                        },
                        &return_stmt.span,
                    );
                }
            }
        }
    }

    fn check_try(&mut self, try_stmt: &TryStmt) {
        let in_try = self.context.in_try;
        self.context.in_try = true;
        self.check_block(&try_stmt.body);
        self.context.in_try = in_try;

        for catch in try_stmt.catches.iter() {
            self.symbol_table.push_scope();

            let ty = match &catch.catch_type {
                Some(catch_type) => self.resolve_type(catch_type, &catch.span),
                None => self.builtin("!void"),
            };
            self.declare(Symbol::new(
                &catch.identifier,
                SymbolKind::Variable,
                ty,
                catch.span.clone(),
            ));
            self.check_statements(&catch.body);

            self.symbol_table.pop_scope();
        }
    }

    fn check_switch(&mut self, switch: &SwitchStmt) {
        let scrutinee = self.check_expr(&switch.scrutinee);

        let in_switch = self.context.in_switch;
        self.context.in_switch = true;

        for case in switch.cases.iter() {
            if let Some(pattern) = &case.pattern {
                let pattern_type = self.check_expr(pattern);
                if !is_compatible(&scrutinee, &pattern_type)
                    && !is_deferred(&scrutinee)
                    && !is_deferred(&pattern_type)
                {
                    self.report(
                        ErrorImpl::TypeMismatch {
                            expected: scrutinee.name(),
                            received: pattern_type.name(),
                        },
                        pattern.get_span(),
                    );
                }
            }
            self.check_block(&case.body);
        }

        self.context.in_switch = in_switch;
    }

    /// Resolves parameter and return annotations into a function type.
    fn function_signature(
        &mut self,
        parameters: &[Parameter],
        return_type: &TypeWrapper,
        span: &Span,
    ) -> FunctionType {
        let parameter_types = parameters
            .iter()
            .map(|parameter| self.resolve_type(&parameter.param_type, &parameter.span))
            .collect();
        let return_type = self.resolve_type(return_type, span);
        FunctionType::new(parameter_types, return_type)
    }

    /// Binds parameters in a new scope and checks `body` with a fresh function context.
    fn check_function_body(
        &mut self,
        parameters: &[Parameter],
        signature: &FunctionType,
        body: &BlockStmt,
        this_type: Option<TypeWrapper>,
    ) {
        let template_frames = self.context.template_frames.clone();
        let outer = std::mem::replace(
            &mut self.context,
            TypeCheckContext {
                return_type: Some(signature.return_type.clone()),
                this_type,
                template_frames,
                ..Default::default()
            },
        );
        self.symbol_table.push_scope();

        for (parameter, ty) in parameters.iter().zip(signature.parameters.iter()) {
            self.declare(
                Symbol::new(
                    &parameter.identifier,
                    SymbolKind::Parameter,
                    ty.clone(),
                    parameter.span.clone(),
                )
                .with_qualifiers(parameter.is_constant, false),
            );
        }
        self.check_statements(body);

        self.symbol_table.pop_scope();
        self.context = outer;
    }

    /// Declares the function in the enclosing scope, then checks its body.
    ///
    /// Repeating a declaration with an identical signature is accepted, so a
    /// prototype can be followed by its definition. Only one of them may carry a body.
    pub fn check_fn_decl(&mut self, function: &FnDeclStmt, template_parameters: &[String]) {
        let signature =
            self.function_signature(&function.parameters, &function.return_type, &function.span);
        let ty = TypeWrapper::new(signature.clone());

        let prototype = self
            .symbol_table
            .lookup_local(&function.identifier)
            .filter(|existing| {
                existing.kind == SymbolKind::Function && existing.symbol_type.equals(&ty)
            })
            .map(|existing| existing.is_defined);

        match prototype {
            // A second body for an already defined function.
            Some(true) if function.body.is_some() => self.report(
                ErrorImpl::Redeclaration {
                    symbol: function.identifier.clone(),
                },
                &function.span,
            ),
            Some(_) => {
                if function.body.is_some() {
                    self.symbol_table.mark_defined(&function.identifier);
                }
            }
            None => {
                tracing::debug!(name = %function.identifier, ty = %ty, "declare function");
                self.declare(
                    Symbol::new(
                        &function.identifier,
                        SymbolKind::Function,
                        ty,
                        function.span.clone(),
                    )
                    .with_template_parameters(template_parameters.to_vec())
                    .with_definition(function.body.is_some()),
                );
            }
        }

        if let Some(body) = &function.body {
            self.check_function_body(&function.parameters, &signature, body, None);
        }
    }

    pub fn check_operator_decl(&mut self, operator: &OperatorDeclStmt, template_parameters: &[String]) {
        let signature =
            self.function_signature(&operator.parameters, &operator.return_type, &operator.span);
        let name = operator_symbol_name(&operator.operator, &signature.parameters);

        tracing::debug!(name = %name, "declare operator");
        self.declare(
            Symbol::new(
                &name,
                SymbolKind::Operator,
                TypeWrapper::new(signature.clone()),
                operator.span.clone(),
            )
            .with_template_parameters(template_parameters.to_vec()),
        );

        if let Some(body) = &operator.body {
            self.check_function_body(&operator.parameters, &signature, body, None);
        }
    }

    /// Registers the object, then checks every method with `this` bound to it.
    ///
    /// A name-only shell is registered first so members and method signatures
    /// can refer to the object itself.
    pub fn check_object_decl(&mut self, object: &ObjectDeclStmt, template_parameters: &[String]) {
        let shell = TypeWrapper::new(ObjectType {
            name: object.name.clone(),
            members: vec![],
        });
        if let Err(error) = self.symbol_table.declare_type(&object.name, shell, &object.span) {
            self.diagnostics.push(error);
            return;
        }

        let mut seen = HashSet::new();
        let mut members = vec![];

        for member in object.members.iter() {
            if !seen.insert(member.identifier.clone()) {
                self.report(
                    ErrorImpl::Redeclaration {
                        symbol: member.identifier.clone(),
                    },
                    &member.span,
                );
                continue;
            }
            let ty = self.resolve_member_type(
                &member.member_type,
                &member.span,
                &object.name,
                TypeKind::Object,
            );
            members.push(ObjectMember {
                name: member.identifier.clone(),
                ty,
                is_const: member.is_constant,
                is_volatile: member.is_volatile,
            });
        }

        let mut methods = vec![];
        for method in object.methods.iter() {
            if !seen.insert(method.identifier.clone()) {
                self.report(
                    ErrorImpl::Redeclaration {
                        symbol: method.identifier.clone(),
                    },
                    &method.span,
                );
                continue;
            }
            let signature =
                self.function_signature(&method.parameters, &method.return_type, &method.span);
            members.push(ObjectMember {
                name: method.identifier.clone(),
                ty: TypeWrapper::new(signature.clone()),
                is_const: true,
                is_volatile: false,
            });
            methods.push((method, signature));
        }

        let object_type = TypeWrapper::new(ObjectType {
            name: object.name.clone(),
            members,
        });
        self.symbol_table
            .complete_type(&object.name, object_type.clone());
        tracing::debug!(name = %object.name, bits = object_type.size_in_bits(), "declare object");

        self.declare(
            Symbol::new(
                &object.name,
                SymbolKind::Type,
                object_type.clone(),
                object.span.clone(),
            )
            .with_template_parameters(template_parameters.to_vec()),
        );

        for (method, signature) in methods {
            if let Some(body) = &method.body {
                self.check_function_body(
                    &method.parameters,
                    &signature,
                    body,
                    Some(object_type.clone()),
                );
            }
        }
    }

    /// Registers the struct, shell first so fields can point back at it.
    pub fn check_struct_decl(&mut self, structure: &StructDeclStmt) {
        let shell = TypeWrapper::new(StructType {
            name: structure.name.clone(),
            fields: vec![],
            is_packed: structure.is_packed,
            alignment: structure.alignment,
        });
        if let Err(error) = self
            .symbol_table
            .declare_type(&structure.name, shell, &structure.span)
        {
            self.diagnostics.push(error);
            return;
        }

        let mut seen = HashSet::new();
        let mut fields = vec![];

        for field in structure.fields.iter() {
            if !seen.insert(field.identifier.clone()) {
                self.report(
                    ErrorImpl::Redeclaration {
                        symbol: field.identifier.clone(),
                    },
                    &field.span,
                );
                continue;
            }
            let ty = self.resolve_member_type(
                &field.field_type,
                &field.span,
                &structure.name,
                TypeKind::Struct,
            );
            fields.push(StructField {
                name: field.identifier.clone(),
                ty,
                alignment: field.alignment,
                is_volatile: field.is_volatile,
            });
        }

        let struct_type = TypeWrapper::new(StructType {
            name: structure.name.clone(),
            fields,
            is_packed: structure.is_packed,
            alignment: structure.alignment,
        });
        self.symbol_table
            .complete_type(&structure.name, struct_type.clone());
        tracing::debug!(
            name = %structure.name,
            bits = struct_type.size_in_bits(),
            alignment = struct_type.alignment_in_bits(),
            packed = structure.is_packed,
            "declare struct"
        );

        self.declare(Symbol::new(
            &structure.name,
            SymbolKind::Type,
            struct_type,
            structure.span.clone(),
        ));
    }

    /// Resolves a member or field annotation of the aggregate `owner`.
    /// Holding `owner` by value, directly or as an array element, is reported.
    fn resolve_member_type(
        &mut self,
        annotation: &TypeWrapper,
        span: &Span,
        owner: &str,
        kind: TypeKind,
    ) -> TypeWrapper {
        let ty = self.resolve_type(annotation, span);
        if holds_by_value(&ty, owner, kind) {
            return self.report_error(
                ErrorImpl::RecursiveType {
                    type_: owner.to_string(),
                },
                span,
            );
        }
        ty
    }

    /// Enumerators without an explicit value continue from the previous one, starting at 0.
    pub fn check_enum_decl(&mut self, enumeration: &EnumDeclStmt) {
        let mut seen = HashSet::new();
        let mut enumerators = vec![];
        let mut next = 0i64;

        for (name, value) in enumeration.enumerators.iter() {
            if !seen.insert(name.clone()) {
                self.report(
                    ErrorImpl::Redeclaration {
                        symbol: format!("{}::{}", enumeration.name, name),
                    },
                    &enumeration.span,
                );
                continue;
            }
            let value = value.unwrap_or(next);
            enumerators.push((name.clone(), value));
            next = value.wrapping_add(1);
        }

        let enum_type = TypeWrapper::new(EnumType {
            name: enumeration.name.clone(),
            enumerators,
        });
        self.declare_named_type(&enumeration.name, enum_type, &enumeration.span);
    }

    /// Registers a user type in the registry and as a symbol of the current scope.
    fn declare_named_type(&mut self, name: &str, ty: TypeWrapper, span: &Span) {
        if let Err(error) = self.symbol_table.declare_type(name, ty.clone(), span) {
            self.diagnostics.push(error);
            return;
        }
        self.declare(Symbol::new(name, SymbolKind::Type, ty, span.clone()));
    }

    /// Aliases of `data` types display under the alias name.
    pub fn check_type_alias(&mut self, alias: &TypeAliasStmt) {
        let target = self.resolve_type(&alias.target, &alias.span);
        let ty = match target.downcast_ref::<DataType>() {
            Some(data) => TypeWrapper::new(data.clone().with_alias(&alias.name)),
            None => target.clone(),
        };

        tracing::debug!(name = %alias.name, ty = %ty, "declare alias");
        if let Err(error) = self.symbol_table.declare_type(&alias.name, ty, &alias.span) {
            self.diagnostics.push(error);
        }
    }

    /// Checks the namespace body in its own scope and keeps the symbols it
    /// declared reachable through `name::member`.
    pub fn check_namespace(&mut self, namespace: &NamespaceDeclStmt) {
        self.symbol_table.push_scope();
        self.check_statements(&namespace.body);
        let members = self
            .symbol_table
            .pop_scope()
            .map(|scope| scope.into_symbols())
            .unwrap_or_default();

        tracing::debug!(name = %namespace.name, members = members.len(), "declare namespace");
        self.declare(
            Symbol::new(
                &namespace.name,
                SymbolKind::Namespace,
                TypeWrapper::new(BuiltinType::void()),
                namespace.span.clone(),
            )
            .with_members(members),
        );
    }

    /// Binds the template parameters for the wrapped declaration only.
    /// Templates cannot be declared inside another template.
    pub fn check_template(&mut self, template: &TemplateDeclStmt) {
        if self.context.in_template() {
            self.report(
                ErrorImpl::NestedTemplate {
                    name: declaration_name(&template.declaration),
                },
                &template.span,
            );
            return;
        }

        self.push_template_frame(&template.parameters);

        let declaration = &template.declaration;
        match declaration.get_stmt_type() {
            StmtType::FnDeclStmt => {
                self.check_fn_decl(DOWNCAST!(declaration, FnDeclStmt), &template.parameters)
            }
            StmtType::OperatorDeclStmt => self.check_operator_decl(
                DOWNCAST!(declaration, OperatorDeclStmt),
                &template.parameters,
            ),
            StmtType::ObjectDeclStmt => self.check_object_decl(
                DOWNCAST!(declaration, ObjectDeclStmt),
                &template.parameters,
            ),
            _ => self.check_stmt(declaration),
        }

        self.pop_template_frame();
    }
}
