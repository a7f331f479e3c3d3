//! Display strings for symbols, as shown in hovers and signature help.

use crate::parser::ParameterDirection;

use super::symbols::{FunctionSymbol, ParameterInfo, Symbol, SymbolKind, TypeKind, VariableKind};
use super::table::SymbolTable;

/// One-line signature of `symbol`.
///
/// ```text
/// (local variable) int x
/// (field) float S.x
/// float4 Texture2D<float4>.Sample(SamplerState s, float2 location)
/// ```
pub fn symbol_markup(table: &SymbolTable, symbol: &Symbol) -> String {
    match symbol.kind() {
        SymbolKind::Type(ty) => type_markup(table, symbol, &ty.kind),
        SymbolKind::Function(function) => function_markup(table, symbol, function),
        SymbolKind::Variable(variable) => {
            let ty = table.type_name(variable.ty);
            let name = qualified_name(table, symbol);
            let label = match variable.kind {
                VariableKind::Global => "(global variable)",
                VariableKind::Local => "(local variable)",
                VariableKind::Parameter(_) => "(parameter)",
                VariableKind::Field => "(field)",
                VariableKind::ConstantBufferField => "(constant buffer variable)",
                VariableKind::Swizzle => "(swizzle)",
            };
            let mut markup = format!("{} ", label);
            if variable.is_static {
                markup.push_str("static ");
            }
            if variable.is_const {
                markup.push_str("const ");
            }
            markup.push_str(&format!("{} {}", ty, name));
            if let Some(semantic) = &variable.semantic {
                markup.push_str(&format!(" : {}", semantic));
            }
            markup
        }
        SymbolKind::Attribute(attribute) => {
            let parameters = attribute.parameters.iter().map(|p| parameter_markup(table, p));
            if attribute.parameters.is_empty() {
                format!("[{}]", symbol.name())
            } else {
                format!("[{}({})]", symbol.name(), parameters.collect::<Vec<_>>().join(", "))
            }
        }
        SymbolKind::Semantic(_) => format!("(semantic) {}", symbol.name()),
        SymbolKind::Macro(m) => {
            let head = match &m.parameters {
                Some(parameters) => format!("#define {}({})", symbol.name(), parameters.join(", ")),
                None => format!("#define {}", symbol.name()),
            };
            let body = m.body.trim();
            if body.is_empty() { head } else { format!("{} {}", head, body) }
        }
    }
}

fn type_markup(table: &SymbolTable, symbol: &Symbol, kind: &TypeKind) -> String {
    match kind {
        TypeKind::Struct => match symbol.as_type().and_then(|t| t.base) {
            Some(base) => format!("struct {} : {}", symbol.name(), table.get(base).name()),
            None => format!("struct {}", symbol.name()),
        },
        TypeKind::ConstantBuffer => format!("cbuffer {}", symbol.name()),
        TypeKind::Alias(target) => format!("typedef {} {}", table.type_name(*target), symbol.name()),
        _ => table.type_name(symbol.id()),
    }
}

fn function_markup(table: &SymbolTable, symbol: &Symbol, function: &FunctionSymbol) -> String {
    if function.is_numeric_constructor {
        return format!("{}(...)", symbol.name());
    }
    let parameters: Vec<String> = function
        .parameters
        .iter()
        .map(|p| parameter_markup(table, p))
        .collect();
    let mut markup = format!(
        "{} {}({})",
        table.type_name(function.return_type),
        qualified_name(table, symbol),
        parameters.join(", ")
    );
    if let Some(semantic) = &function.semantic {
        markup.push_str(&format!(" : {}", semantic));
    }
    markup
}

fn parameter_markup(table: &SymbolTable, parameter: &ParameterInfo) -> String {
    let direction = match parameter.direction {
        ParameterDirection::In => "",
        ParameterDirection::Out => "out ",
        ParameterDirection::InOut => "inout ",
    };
    let mut markup = format!("{}{} {}", direction, table.type_name(parameter.ty), parameter.name);
    if parameter.has_default {
        markup.push_str(" = ...");
    }
    markup
}

/// `S.x` for members, plain names otherwise.
fn qualified_name(table: &SymbolTable, symbol: &Symbol) -> String {
    let container = symbol.container().map(|c| table.get(c));
    match container {
        Some(container) if container.is_type() => format!("{}.{}", table.type_name(container.id()), symbol.name()),
        _ => symbol.name().to_string(),
    }
}
