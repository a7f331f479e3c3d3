//! Quick info: what to show when hovering a position.

use crate::base::{TextRange, TextSize};
use crate::hir::{SemanticModel, SymbolGroup, SymbolId, group_symbols, symbol_markup};
use crate::parser::{SyntaxKind, SyntaxToken};
use crate::syntax::navigation::{token_at, token_touching_left};

/// Hover content for one range of the root file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickInfo {
    /// The hovered name.
    pub range: TextRange,
    /// One signature per line.
    pub markup: String,
    /// Documentation of the symbol or macro, when it has any.
    pub documentation: Option<String>,
    /// The symbols shown; empty for macros.
    pub symbols: Vec<SymbolId>,
}

/// Quick info at `offset`, or `None` when the position names nothing.
pub fn quick_info(model: &SemanticModel, offset: TextSize) -> Option<QuickInfo> {
    if let Some(def) = model.compilation().macros().definition_at(offset) {
        return Some(QuickInfo {
            range: def.name_span.range,
            markup: def.signature(),
            documentation: def.documentation.clone(),
            symbols: Vec::new(),
        });
    }

    let token = identifier_at(model, offset)?;
    if let Some(info) = symbol_info(model, &token) {
        return Some(info);
    }

    let def = model.macro_definition_at(token.text_range().start())?;
    Some(QuickInfo {
        range: token.text_range(),
        markup: def.signature(),
        documentation: def.documentation.clone(),
        symbols: Vec::new(),
    })
}

/// The identifier at `offset`, or the one ending there.
fn identifier_at(model: &SemanticModel, offset: TextSize) -> Option<SyntaxToken> {
    let root = model.syntax_tree().root();
    let is_name = |t: &SyntaxToken| t.kind() == SyntaxKind::IDENT;
    token_at(&root, offset)
        .filter(is_name)
        .or_else(|| token_touching_left(&root, offset).filter(is_name))
}

fn symbol_info(model: &SemanticModel, token: &SyntaxToken) -> Option<QuickInfo> {
    let table = model.symbol_table();
    let ids: Vec<SymbolId> = token.parent_ancestors().take(2).find_map(|node| {
        if let Some(symbol) = model.get_declared_symbol(&node).or_else(|| model.get_symbol(&node)) {
            return Some(vec![symbol.id()]);
        }
        let candidates = model.get_candidate_symbols(&node);
        if candidates.is_empty() {
            None
        } else {
            Some(candidates.into_iter().map(|s| s.id()).collect())
        }
    })?;

    let groups = group_symbols(table, &ids);
    let markup = match groups.as_slice() {
        [group @ SymbolGroup::Ambiguous(_)] => group.description(table),
        [group] => symbol_markup(table, table.get(group.primary())),
        _ => return None,
    };
    let documentation = ids
        .first()
        .and_then(|&id| table.get(id).documentation())
        .map(str::to_string);
    Some(QuickInfo {
        range: token.text_range(),
        markup,
        documentation,
        symbols: ids,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::base::FileId;
    use crate::hir::{NoIncludes, bind};
    use crate::syntax::parse;

    fn info_at(text: &str, needle: &str) -> Option<QuickInfo> {
        let model = bind(Arc::new(parse(text, FileId::default())), &NoIncludes);
        let offset = TextSize::from(text.find(needle).unwrap() as u32);
        quick_info(&model, offset)
    }

    #[rstest]
    #[case("void f() { int x = 1; x = 2; }", "x = 2", "(local variable) int x")]
    #[case("float4 main() : SV_Target { return float4(1, 1, 1, 1); }", "main", "float4 main() : SV_Target")]
    #[case("#define SCALE 2\nfloat g() { return SCALE; }", "SCALE;", "#define SCALE 2")]
    #[case("#define SCALE 2\nfloat g() { return SCALE; }", "SCALE 2", "#define SCALE 2")]
    fn test_quick_info_markup(#[case] text: &str, #[case] needle: &str, #[case] expected: &str) {
        let info = info_at(text, needle).expect("quick info");
        assert_eq!(info.markup, expected);
    }

    #[test]
    fn test_field_access_quick_info() {
        let text = "struct S { float a; }; float g(S s) { return s.a; }";
        let offset = text.rfind(".a").unwrap() + 1;
        let model = bind(Arc::new(parse(text, FileId::default())), &NoIncludes);
        let info = quick_info(&model, TextSize::from(offset as u32)).expect("quick info");
        assert_eq!(info.markup, "(field) float S.a");
    }

    #[test]
    fn test_overloaded_call_shows_resolved_overload() {
        let text = "float f(float a) { return a; } int f(int a) { return a; } void g() { f(1.0); }";
        let model = bind(Arc::new(parse(text, FileId::default())), &NoIncludes);
        let offset = TextSize::from(text.rfind("f(1.0)").unwrap() as u32);
        let info = quick_info(&model, offset).expect("quick info");
        assert_eq!(info.markup, "float f(float a)");
    }

    #[test]
    fn test_nothing_in_whitespace() {
        assert_eq!(info_at("float x;   ", "   "), None);
    }
}
