//! Macro visibility across a compilation.

use crate::helpers::model_helpers::*;
use crate::helpers::source_fixtures::MACROS;

#[test]
fn test_macros_visible_after_definition() {
    let source = "float a;\n#define A 1\nfloat b;";
    let model = model_from(source);
    assert!(model.visible_macros(offset_of(source, "a;")).next().is_none());
    assert_eq!(model.visible_macros(offset_of(source, "float b")).count(), 1);

    let model = model_from(MACROS);

    let names: Vec<String> = model
        .visible_macros(offset_of(MACROS, "float f"))
        .map(|m| m.name.to_string())
        .collect();
    assert_eq!(names, vec!["SCALE".to_string(), "SQUARE".to_string()]);
}

#[test]
fn test_undef_ends_visibility() {
    let source = "#define A 1\nfloat before;\n#undef A\nfloat after;";
    let model = model_from(source);

    assert_eq!(model.visible_macros(offset_of(source, "float before")).count(), 1);
    assert_eq!(model.visible_macros(offset_of(source, "float after")).count(), 0);
}

#[test]
fn test_redefinition_shadows_earlier() {
    let source = "#define N 1\nfloat a;\n#undef N\n#define N 2\nfloat b;";
    let model = model_from(source);

    let active: Vec<String> = model
        .visible_macros(offset_of(source, "float b"))
        .map(|m| m.body.clone())
        .collect();
    assert_eq!(active, vec!["2".to_string()]);
}

#[test]
fn test_macro_definition_lookup_by_name() {
    let model = model_from(MACROS);
    let def = model
        .macro_definition_at(offset_of(MACROS, "SQUARE(v)"))
        .expect("SQUARE");
    assert!(def.is_function_like());
    assert_eq!(def.parameters.as_deref().map(|p| p.len()), Some(1));
    assert_eq!(def.signature(), "#define SQUARE(x) ((x) * (x))");
    assert!(def.is_in_root_file());
}

#[test]
fn test_macro_use_binds_to_definition() {
    let model = model_from(MACROS);
    let table = model.symbol_table();
    let square = model
        .syntax_tree()
        .root()
        .descendants()
        .filter(|n| n.kind() == hlsl::parser::SyntaxKind::NAME_REF)
        .find(|n| n.text() == "SQUARE")
        .and_then(|n| model.get_symbol(&n))
        .expect("macro symbol");
    assert_eq!(hlsl::hir::symbol_markup(table, square), "#define SQUARE(x) ((x) * (x))");
    assert_no_diagnostics(&model);
}
