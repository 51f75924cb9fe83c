use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper},
        expressions::{
            ArrayLiteralExpr, AssignmentExpr, BinaryExpr, CallExpr, CastExpr, IndexExpr,
            LayoutQuery, MemberExpr, ScopeAccessExpr, SizeOfExpr, StructInitExpr, SymbolExpr,
            TernaryExpr, UnaryExpr,
        },
    },
    errors::errors::ErrorImpl,
    symbol_table::symbol::{Symbol, SymbolKind},
    types::{
        compatibility::{
            absorbs, can_assign, contains_template_parameter, deduce_bindings, get_common_type,
            is_assignable, is_boolean_convertible, is_compatible, is_integral, is_numeric,
            substitute,
        },
        composite::{ArrayType, FunctionType, PointerType},
        nominal::{EnumType, ObjectType, StructType},
        types::{Type, TypeKind, TypeWrapper},
    },
    Span, DOWNCAST,
};

use super::{
    builtins::{compound_base, operator_category, operator_symbol_name, OperatorCategory},
    type_checker::{error_type, TypeChecker},
};

/// Name of the object method run on construction.
pub const CONSTRUCTOR: &str = "__init";

/// The outcome of checking an expression that may appear on the left of an assignment.
#[derive(Debug, Clone)]
pub struct Place {
    pub ty: TypeWrapper,
    pub is_lvalue: bool,
    pub is_const: bool,
    /// How the location is named in diagnostics.
    pub description: String,
}

impl Place {
    fn value(ty: TypeWrapper) -> Self {
        Place {
            ty,
            is_lvalue: false,
            is_const: false,
            description: String::new(),
        }
    }
}

/// Operand types that postpone checking: error placeholders and unbound template parameters.
pub(super) fn is_deferred(ty: &TypeWrapper) -> bool {
    absorbs(ty) || contains_template_parameter(ty)
}

impl TypeChecker {
    pub fn check_expr(&mut self, expr: &ExprWrapper) -> TypeWrapper {
        match expr.get_expr_type() {
            ExprType::Integer => self.builtin("int"),
            ExprType::Float => self.builtin("float"),
            ExprType::String => self.builtin("string"),
            ExprType::Char => self.builtin("char"),
            ExprType::Bool => self.builtin("bool"),
            ExprType::Symbol
            | ExprType::Member
            | ExprType::Index
            | ExprType::ScopeAccess
            | ExprType::This => self.check_place(expr).ty,
            ExprType::Unary => {
                let unary = DOWNCAST!(expr, UnaryExpr);
                if unary.operator == "*" {
                    self.check_place(expr).ty
                } else {
                    self.check_unary(unary)
                }
            }
            ExprType::Binary => self.check_binary(DOWNCAST!(expr, BinaryExpr)),
            ExprType::Assignment => self.check_assignment(DOWNCAST!(expr, AssignmentExpr)),
            ExprType::CallExpr => self.check_call(DOWNCAST!(expr, CallExpr)),
            ExprType::Ternary => self.check_ternary(DOWNCAST!(expr, TernaryExpr)),
            ExprType::Cast => self.check_cast(DOWNCAST!(expr, CastExpr)),
            ExprType::ArrayLiteral => self.check_array_literal(DOWNCAST!(expr, ArrayLiteralExpr)),
            ExprType::StructInit => self.check_struct_init(DOWNCAST!(expr, StructInitExpr)),
            ExprType::SizeOf => {
                let size_of = DOWNCAST!(expr, SizeOfExpr);
                let target = self.resolve_type(&size_of.target, &size_of.span);
                let bits = match size_of.query {
                    LayoutQuery::Size => target.size_in_bits(),
                    LayoutQuery::Alignment => target.alignment_in_bits(),
                };
                tracing::trace!(ty = %target, bits, "layout query");
                self.builtin("u64")
            }
        }
    }

    /// Checks a condition of `if`, loops and ternaries.
    pub fn check_condition(&mut self, condition: &ExprWrapper) {
        let ty = self.check_expr(condition);
        if !is_boolean_convertible(&ty) && !contains_template_parameter(&ty) {
            self.report(
                ErrorImpl::NonBooleanCondition {
                    received: ty.name(),
                },
                condition.get_span(),
            );
        }
    }

    /// Checks an expression together with whether, and how, it can be assigned to.
    pub fn check_place(&mut self, expr: &ExprWrapper) -> Place {
        match expr.get_expr_type() {
            ExprType::Symbol => {
                let symbol = DOWNCAST!(expr, SymbolExpr);
                match self.symbol_table.lookup_symbol(&symbol.value) {
                    Some(found) => Place {
                        ty: found.symbol_type.clone(),
                        is_lvalue: matches!(
                            found.kind,
                            SymbolKind::Variable | SymbolKind::Parameter
                        ),
                        is_const: found.is_constant,
                        description: found.name.clone(),
                    },
                    None => Place::value(self.report_error(
                        ErrorImpl::UndefinedIdentifier {
                            identifier: symbol.value.clone(),
                        },
                        &symbol.span,
                    )),
                }
            }
            ExprType::This => match self.context.this_type.clone() {
                Some(ty) => Place {
                    ty,
                    is_lvalue: false,
                    is_const: false,
                    description: String::from("this"),
                },
                None => Place::value(
                    self.report_error(ErrorImpl::ThisOutsideObject, expr.get_span()),
                ),
            },
            ExprType::Member => self.check_member(DOWNCAST!(expr, MemberExpr)),
            ExprType::Index => self.check_index(DOWNCAST!(expr, IndexExpr)),
            ExprType::ScopeAccess => self.check_scope_access(DOWNCAST!(expr, ScopeAccessExpr)),
            ExprType::Unary if DOWNCAST!(expr, UnaryExpr).operator == "*" => {
                let unary = DOWNCAST!(expr, UnaryExpr);
                self.check_dereference(unary)
            }
            _ => Place::value(self.check_expr(expr)),
        }
    }

    fn check_dereference(&mut self, unary: &UnaryExpr) -> Place {
        let operand = self.check_expr(&unary.operand);
        if is_deferred(&operand) {
            return Place::value(error_type());
        }

        match operand.downcast_ref::<PointerType>() {
            Some(pointer) => Place {
                ty: pointer.pointee.clone(),
                is_lvalue: true,
                is_const: pointer.is_const,
                description: format!("*{}", operand.name()),
            },
            None => Place::value(self.report_error(
                ErrorImpl::InvalidOperand {
                    operator: unary.operator.clone(),
                    operand: operand.name(),
                },
                &unary.span,
            )),
        }
    }

    fn check_member(&mut self, member: &MemberExpr) -> Place {
        let base = self.check_place(&member.object);
        if is_deferred(&base.ty) {
            return Place::value(error_type());
        }

        let (target, base_const) = if member.is_arrow {
            match base.ty.downcast_ref::<PointerType>() {
                Some(pointer) => (pointer.pointee.clone(), pointer.is_const),
                None => {
                    return Place::value(self.report_error(
                        ErrorImpl::InvalidOperand {
                            operator: String::from("->"),
                            operand: base.ty.name(),
                        },
                        &member.span,
                    ))
                }
            }
        } else {
            (base.ty.clone(), base.is_const)
        };

        if is_deferred(&target) {
            return Place::value(error_type());
        }

        let target = self.canonical_type(&target);
        let description = format!("{}.{}", target.name(), member.property);
        // `this` names the receiver in place; `.` on a temporary is not assignable.
        let is_lvalue = member.is_arrow
            || base.is_lvalue
            || matches!(member.object.get_expr_type(), ExprType::This);

        if let Some(object) = target.downcast_ref::<ObjectType>() {
            if let Some(found) = object.get_member(&member.property) {
                return Place {
                    ty: found.ty.clone(),
                    is_lvalue,
                    is_const: base_const || found.is_const,
                    description,
                };
            }
        } else if let Some(structure) = target.downcast_ref::<StructType>() {
            if let Some(field) = structure.get_field(&member.property) {
                return Place {
                    ty: field.ty.clone(),
                    is_lvalue,
                    is_const: base_const,
                    description,
                };
            }
        }

        Place::value(self.report_error(
            ErrorImpl::MemberNotFound {
                type_: target.name(),
                member: member.property.clone(),
            },
            &member.span,
        ))
    }

    fn check_index(&mut self, index: &IndexExpr) -> Place {
        let base = self.check_place(&index.array);
        let index_ty = self.check_expr(&index.index);

        if !is_integral(&index_ty) && !is_deferred(&index_ty) {
            self.report(
                ErrorImpl::NonIntegralIndex {
                    received: index_ty.name(),
                },
                index.index.get_span(),
            );
        }

        if is_deferred(&base.ty) {
            return Place::value(error_type());
        }

        let (element, is_const, is_lvalue) = if let Some(array) = base.ty.downcast_ref::<ArrayType>() {
            (array.element.clone(), base.is_const, base.is_lvalue)
        } else if let Some(pointer) = base.ty.downcast_ref::<PointerType>() {
            (pointer.pointee.clone(), pointer.is_const, true)
        } else {
            return Place::value(self.report_error(
                ErrorImpl::NotIndexable {
                    type_: base.ty.name(),
                },
                index.array.get_span(),
            ));
        };

        Place {
            ty: element,
            is_lvalue,
            is_const,
            description: format!("{}[]", base.description),
        }
    }

    /// `Enum::Member` or `ns::inner::name`.
    fn check_scope_access(&mut self, access: &ScopeAccessExpr) -> Place {
        if let Some(ty) = self.symbol_table.lookup_type(&access.scope) {
            if let Some(enumeration) = ty.downcast_ref::<EnumType>() {
                return match enumeration.get_value(&access.member) {
                    Some(_) => Place::value(ty.clone()),
                    None => Place::value(self.report_error(
                        ErrorImpl::MemberNotFound {
                            type_: access.scope.clone(),
                            member: access.member.clone(),
                        },
                        &access.span,
                    )),
                };
            }
        }

        match self.resolve_namespace_member(access) {
            Ok(symbol) => Place {
                ty: symbol.symbol_type.clone(),
                is_lvalue: matches!(symbol.kind, SymbolKind::Variable),
                is_const: symbol.is_constant,
                description: format!("{}::{}", access.scope, access.member),
            },
            Err(error) => Place::value(self.report_error(error, &access.span)),
        }
    }

    /// Walks `a::b::c` through namespace members.
    fn resolve_namespace_member(&self, access: &ScopeAccessExpr) -> Result<Symbol, ErrorImpl> {
        let mut segments = access.scope.split("::");
        let root = segments.next().unwrap_or_default();

        let mut namespace = match self.symbol_table.lookup_symbol(root) {
            Some(symbol) if symbol.kind == SymbolKind::Namespace => symbol,
            _ => {
                return Err(ErrorImpl::UndefinedIdentifier {
                    identifier: root.to_string(),
                })
            }
        };

        for segment in segments {
            namespace = match namespace.members.get(segment) {
                Some(symbol) if symbol.kind == SymbolKind::Namespace => symbol,
                _ => {
                    return Err(ErrorImpl::MemberNotFound {
                        type_: namespace.name.clone(),
                        member: segment.to_string(),
                    })
                }
            };
        }

        namespace
            .members
            .get(&access.member)
            .cloned()
            .ok_or_else(|| ErrorImpl::MemberNotFound {
                type_: access.scope.clone(),
                member: access.member.clone(),
            })
    }

    fn check_unary(&mut self, unary: &UnaryExpr) -> TypeWrapper {
        match unary.operator.as_str() {
            "&" => {
                let place = self.check_place(&unary.operand);
                if is_deferred(&place.ty) {
                    return error_type();
                }
                if !place.is_lvalue {
                    return self.report_error(
                        ErrorImpl::InvalidOperand {
                            operator: unary.operator.clone(),
                            operand: place.ty.name(),
                        },
                        &unary.span,
                    );
                }
                TypeWrapper::new(PointerType::new(place.ty).with_qualifiers(place.is_const, false))
            }
            "++" | "--" => {
                let place = self.check_place(&unary.operand);
                if is_deferred(&place.ty) {
                    return place.ty;
                }
                if !place.is_lvalue {
                    return self.report_error(
                        ErrorImpl::InvalidAssignmentTarget,
                        unary.operand.get_span(),
                    );
                }
                if place.is_const {
                    self.report(
                        ErrorImpl::ConstViolation {
                            target: place.description.clone(),
                        },
                        unary.operand.get_span(),
                    );
                }
                if !is_numeric(&place.ty) && !place.ty.is_kind(TypeKind::Pointer) {
                    return self.report_error(
                        ErrorImpl::InvalidOperand {
                            operator: unary.operator.clone(),
                            operand: place.ty.name(),
                        },
                        &unary.span,
                    );
                }
                place.ty
            }
            operator => {
                let operand = self.check_expr(&unary.operand);
                if is_deferred(&operand) {
                    return if operator == "!" && !absorbs(&operand) {
                        self.builtin("bool")
                    } else {
                        operand
                    };
                }

                let valid = match operator {
                    "!" | "not" => is_boolean_convertible(&operand),
                    "-" | "+" => is_numeric(&operand),
                    "~" => is_integral(&operand),
                    _ => false,
                };

                if valid {
                    return match operator {
                        "!" | "not" => self.builtin("bool"),
                        _ => operand,
                    };
                }

                let overload = self.lookup_operator(operator, &[operand.clone()]);
                match overload {
                    Some(result) => result,
                    None => self.report_error(
                        ErrorImpl::InvalidOperand {
                            operator: operator.to_string(),
                            operand: operand.name(),
                        },
                        &unary.span,
                    ),
                }
            }
        }
    }

    fn check_binary(&mut self, binary: &BinaryExpr) -> TypeWrapper {
        let left = self.check_expr(&binary.left);
        let right = self.check_expr(&binary.right);
        self.binary_result(&binary.operator, &left, &right, &binary.span)
    }

    /// Result type of `left <operator> right`, reporting invalid operand pairs.
    pub fn binary_result(
        &mut self,
        operator: &str,
        left: &TypeWrapper,
        right: &TypeWrapper,
        span: &Span,
    ) -> TypeWrapper {
        let category = operator_category(operator);
        let yields_bool = matches!(
            category,
            Some(OperatorCategory::Comparison | OperatorCategory::Logical)
        );

        if absorbs(left) || absorbs(right) {
            return if yields_bool {
                self.builtin("bool")
            } else {
                error_type()
            };
        }
        if contains_template_parameter(left) || contains_template_parameter(right) {
            return if yields_bool {
                self.builtin("bool")
            } else {
                left.clone()
            };
        }

        let builtin = match category {
            Some(OperatorCategory::Arithmetic) => self.arithmetic_result(operator, left, right),
            Some(OperatorCategory::Comparison) => {
                let valid = match operator {
                    "==" | "!=" => is_compatible(left, right),
                    _ => {
                        (is_numeric(left) && is_numeric(right))
                            || (left.is_kind(TypeKind::Pointer) && is_compatible(left, right))
                    }
                };
                valid.then(|| self.builtin("bool"))
            }
            Some(OperatorCategory::Logical) => (is_boolean_convertible(left)
                && is_boolean_convertible(right))
            .then(|| self.builtin("bool")),
            Some(OperatorCategory::Bitwise) => {
                if is_integral(left) && is_integral(right) {
                    match operator {
                        "<<" | ">>" => Some(left.clone()),
                        _ => Some(get_common_type(left, right)),
                    }
                } else {
                    None
                }
            }
            None => None,
        };

        if let Some(result) = builtin {
            return result;
        }

        match self.lookup_operator(operator, &[left.clone(), right.clone()]) {
            Some(result) => result,
            None => self.report_error(
                ErrorImpl::InvalidOperands {
                    operator: operator.to_string(),
                    left: left.name(),
                    right: right.name(),
                },
                span,
            ),
        }
    }

    fn arithmetic_result(
        &self,
        operator: &str,
        left: &TypeWrapper,
        right: &TypeWrapper,
    ) -> Option<TypeWrapper> {
        if let Some(pointer) = left.downcast_ref::<PointerType>() {
            return match operator {
                "+" | "-" if is_integral(right) => Some(left.clone()),
                "-" if pointer.equals(right) => Some(self.builtin("i64")),
                _ => None,
            };
        }

        if !is_numeric(left) || !is_numeric(right) {
            return None;
        }
        if operator == "%" && !(is_integral(left) && is_integral(right)) {
            return None;
        }

        Some(get_common_type(left, right))
    }

    /// Return type of a user-declared overload matching the operand types exactly.
    fn lookup_operator(&self, operator: &str, operands: &[TypeWrapper]) -> Option<TypeWrapper> {
        let name = operator_symbol_name(operator, operands);
        self.symbol_table
            .lookup_symbol(&name)
            .and_then(|symbol| symbol.return_type().cloned())
    }

    fn check_assignment(&mut self, assignment: &AssignmentExpr) -> TypeWrapper {
        let target = self.check_place(&assignment.assignee);
        let value = self.check_expr(&assignment.value);

        if !target.is_lvalue && !absorbs(&target.ty) {
            self.report(
                ErrorImpl::InvalidAssignmentTarget,
                assignment.assignee.get_span(),
            );
            return target.ty;
        }
        if target.is_const {
            self.report(
                ErrorImpl::ConstViolation {
                    target: target.description.clone(),
                },
                assignment.assignee.get_span(),
            );
        }

        let stored = match compound_base(&assignment.operator) {
            Some(base) => self.binary_result(base, &target.ty, &value, &assignment.span),
            None => value,
        };

        if !can_assign(&target.ty, &stored) && !is_deferred(&target.ty) && !is_deferred(&stored) {
            self.report(
                ErrorImpl::TypeMismatch {
                    expected: target.ty.name(),
                    received: stored.name(),
                },
                assignment.value.get_span(),
            );
        }

        target.ty
    }

    /// Function, template, method and constructor calls.
    fn check_call(&mut self, call: &CallExpr) -> TypeWrapper {
        let callee_symbol = self.callee_symbol(&call.callee);
        let is_template = callee_symbol
            .as_ref()
            .map(|symbol| symbol.is_template())
            .unwrap_or(false);
        if let Some(symbol) = callee_symbol.filter(|symbol| symbol.is_template() && symbol.is_callable()) {
            return self.check_template_call(call, &symbol);
        }

        let callee = self.check_expr(&call.callee);
        let arguments: Vec<TypeWrapper> = call
            .arguments
            .iter()
            .map(|argument| self.check_expr(argument))
            .collect();

        if !call.template_arguments.is_empty() && !is_template {
            self.report(
                ErrorImpl::TemplateArgumentMismatch {
                    expected: 0,
                    received: call.template_arguments.len(),
                },
                &call.span,
            );
        }

        if is_deferred(&callee) {
            return error_type();
        }

        if let Some(function) = callee.downcast_ref::<FunctionType>() {
            self.check_arguments(&function.parameters, &arguments, call);
            return function.return_type.clone();
        }

        let object_type = self.canonical_type(&callee);
        if let Some(object) = object_type.downcast_ref::<ObjectType>() {
            let constructor = object
                .get_member(CONSTRUCTOR)
                .and_then(|member| member.ty.downcast_ref::<FunctionType>().cloned());
            match constructor {
                Some(constructor) => {
                    self.check_arguments(&constructor.parameters, &arguments, call)
                }
                None => self.check_arguments(&[], &arguments, call),
            }
            return object_type.clone();
        }

        self.report_error(
            ErrorImpl::NotCallable {
                type_: callee.name(),
            },
            call.callee.get_span(),
        )
    }

    /// The declared symbol a callee expression names directly, if any.
    fn callee_symbol(&self, callee: &ExprWrapper) -> Option<Symbol> {
        match callee.get_expr_type() {
            ExprType::Symbol => {
                let symbol = DOWNCAST!(callee, SymbolExpr);
                self.symbol_table.lookup_symbol(&symbol.value).cloned()
            }
            ExprType::ScopeAccess => {
                let access = DOWNCAST!(callee, ScopeAccessExpr);
                self.resolve_namespace_member(access).ok()
            }
            _ => None,
        }
    }

    /// Binds the template parameters of `symbol` from explicit arguments or by
    /// deduction, then checks the call against the substituted signature.
    fn check_template_call(&mut self, call: &CallExpr, symbol: &Symbol) -> TypeWrapper {
        let arguments: Vec<TypeWrapper> = call
            .arguments
            .iter()
            .map(|argument| self.check_expr(argument))
            .collect();

        let function = match symbol.symbol_type.downcast_ref::<FunctionType>() {
            Some(function) => function.clone(),
            None => {
                return self.report_error(
                    ErrorImpl::NotCallable {
                        type_: symbol.symbol_type.name(),
                    },
                    call.callee.get_span(),
                )
            }
        };

        let mut bindings: HashMap<String, TypeWrapper> = HashMap::new();
        if !call.template_arguments.is_empty() {
            if call.template_arguments.len() != symbol.template_parameters.len() {
                self.report(
                    ErrorImpl::TemplateArgumentMismatch {
                        expected: symbol.template_parameters.len(),
                        received: call.template_arguments.len(),
                    },
                    &call.span,
                );
            }
            for (name, argument) in symbol
                .template_parameters
                .iter()
                .zip(call.template_arguments.iter())
            {
                let resolved = self.resolve_type(argument, &call.span);
                bindings.insert(name.clone(), resolved);
            }
        } else {
            for (parameter, argument) in function.parameters.iter().zip(arguments.iter()) {
                deduce_bindings(parameter, argument, &mut bindings);
            }
        }

        let unbound = symbol
            .template_parameters
            .iter()
            .filter(|name| !bindings.contains_key(*name))
            .count();
        if unbound > 0 && call.template_arguments.is_empty() {
            self.report(
                ErrorImpl::TemplateArgumentMismatch {
                    expected: symbol.template_parameters.len(),
                    received: symbol.template_parameters.len() - unbound,
                },
                &call.span,
            );
        }

        tracing::trace!(function = %symbol.name, ?bindings, "instantiate template");

        let parameters: Vec<TypeWrapper> = function
            .parameters
            .iter()
            .map(|parameter| substitute(parameter, &bindings))
            .collect();
        self.check_arguments(&parameters, &arguments, call);

        let return_type = substitute(&function.return_type, &bindings);
        if contains_template_parameter(&return_type) && !self.context.in_template() {
            return error_type();
        }
        return_type
    }

    /// Arity and per-argument assignability. Each argument is reported at its own span.
    fn check_arguments(&mut self, parameters: &[TypeWrapper], arguments: &[TypeWrapper], call: &CallExpr) {
        if arguments.len() > parameters.len() {
            self.report(
                ErrorImpl::UnexpectedArguments {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                call.arguments[parameters.len()].get_span(),
            );
        } else if arguments.len() < parameters.len() {
            self.report(
                ErrorImpl::MissingArguments {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                &call.span,
            );
        }

        for (index, (parameter, argument)) in parameters.iter().zip(arguments.iter()).enumerate() {
            if is_deferred(parameter) || is_deferred(argument) {
                continue;
            }
            if !can_assign(parameter, argument) {
                self.report(
                    ErrorImpl::ArgumentTypeMismatch {
                        expected: parameter.name(),
                        received: argument.name(),
                    },
                    call.arguments[index].get_span(),
                );
            }
        }
    }

    fn check_ternary(&mut self, ternary: &TernaryExpr) -> TypeWrapper {
        self.check_condition(&ternary.condition);
        let then_type = self.check_expr(&ternary.then_expr);
        let else_type = self.check_expr(&ternary.else_expr);

        if then_type.equals(&else_type) {
            return then_type;
        }
        if is_numeric(&then_type) && is_numeric(&else_type) {
            return get_common_type(&then_type, &else_type);
        }
        if is_assignable(&then_type, &else_type) {
            return then_type;
        }
        if is_assignable(&else_type, &then_type) {
            return else_type;
        }

        self.report(
            ErrorImpl::TypeMismatch {
                expected: then_type.name(),
                received: else_type.name(),
            },
            ternary.else_expr.get_span(),
        );
        then_type
    }

    fn check_cast(&mut self, cast: &CastExpr) -> TypeWrapper {
        let target = self.resolve_type(&cast.target, &cast.span);
        let source = self.check_expr(&cast.value);

        let is_pointer = |ty: &TypeWrapper| ty.is_kind(TypeKind::Pointer);
        let is_integral_data = |ty: &TypeWrapper| ty.is_kind(TypeKind::Data) && is_integral(ty);

        let allowed = is_deferred(&target)
            || is_deferred(&source)
            || is_compatible(&target, &source)
            || (is_numeric(&target) && is_numeric(&source))
            || (is_pointer(&target) && is_pointer(&source))
            || (is_pointer(&target) && is_integral_data(&source))
            || (is_integral_data(&target) && is_pointer(&source));

        if !allowed {
            self.report(
                ErrorImpl::InvalidCast {
                    from: source.name(),
                    to: target.name(),
                },
                &cast.span,
            );
        }

        target
    }

    fn check_array_literal(&mut self, literal: &ArrayLiteralExpr) -> TypeWrapper {
        let elements: Vec<TypeWrapper> = literal
            .elements
            .iter()
            .map(|element| self.check_expr(element))
            .collect();

        let mut element_type = match elements.first() {
            Some(first) => first.clone(),
            None => return TypeWrapper::new(ArrayType::new(error_type(), Some(0))),
        };

        for (index, ty) in elements.iter().enumerate().skip(1) {
            if is_numeric(&element_type) && is_numeric(ty) {
                element_type = get_common_type(&element_type, ty);
            } else if !is_compatible(&element_type, ty) {
                self.report(
                    ErrorImpl::TypeMismatch {
                        expected: element_type.name(),
                        received: ty.name(),
                    },
                    literal.elements[index].get_span(),
                );
            }
        }

        TypeWrapper::new(ArrayType::new(element_type, Some(elements.len() as u64)))
    }

    fn check_struct_init(&mut self, init: &StructInitExpr) -> TypeWrapper {
        let ty = match self.symbol_table.lookup_type(&init.name) {
            Some(ty) => ty,
            None => {
                for (_, value) in init.fields.iter() {
                    self.check_expr(value);
                }
                return self.report_error(
                    ErrorImpl::UndefinedType {
                        type_: init.name.clone(),
                    },
                    &init.span,
                );
            }
        };

        if !matches!(ty.get_type_kind(), TypeKind::Struct | TypeKind::Object) {
            return self.report_error(
                ErrorImpl::TypeMismatch {
                    expected: String::from("struct or object"),
                    received: ty.name(),
                },
                &init.span,
            );
        }

        for (name, value) in init.fields.iter() {
            let value_type = self.check_expr(value);
            match ty.get_member_type(name) {
                Some(field_type) => {
                    if !can_assign(&field_type, &value_type)
                        && !is_deferred(&field_type)
                        && !is_deferred(&value_type)
                    {
                        self.report(
                            ErrorImpl::FieldTypeMismatch {
                                expected: field_type.name(),
                                received: value_type.name(),
                            },
                            value.get_span(),
                        );
                    }
                }
                None => self.report(
                    ErrorImpl::MemberNotFound {
                        type_: ty.name(),
                        member: name.clone(),
                    },
                    value.get_span(),
                ),
            }
        }

        ty
    }
}
