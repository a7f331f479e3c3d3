use super::*;

ast_enum! {
    Directive {
        Define(DefineDirective),
        Undef(UndefDirective),
        Include(IncludeDirective),
        Conditional(ConditionalDirective),
        Other(OtherDirective),
    }
}

ast_node!(DefineDirective, DEFINE_DIRECTIVE);

impl DefineDirective {
    first_child_method!(name, Name);
    first_child_method!(body, MacroBody);

    /// `None` for object-like macros.
    pub fn parameters(&self) -> Option<Vec<SmolStr>> {
        let list = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::MACRO_PARAM_LIST)?;
        Some(list.children().filter_map(Name::cast).filter_map(|n| n.text()).collect())
    }

    pub fn is_function_like(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::MACRO_PARAM_LIST)
    }

    /// Replacement text with line continuations removed and trailing space trimmed.
    pub fn body_text(&self) -> String {
        let Some(body) = self.body() else {
            return String::new();
        };
        let mut text = String::new();
        for token in body
            .0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
        {
            match token.kind() {
                SyntaxKind::LINE_CONTINUATION => text.push(' '),
                _ => text.push_str(token.text()),
            }
        }
        text.trim_end().to_string()
    }
}

ast_node!(MacroBody, MACRO_BODY);

ast_node!(UndefDirective, UNDEF_DIRECTIVE);

impl UndefDirective {
    first_child_method!(name_ref, NameRef);
}

ast_node!(IncludeDirective, INCLUDE_DIRECTIVE);

impl IncludeDirective {
    /// The path without its delimiters, and whether it used `<...>`.
    pub fn path(&self) -> Option<(String, bool)> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find_map(|t| {
                let text = t.text();
                match t.kind() {
                    SyntaxKind::STRING_LITERAL => {
                        let inner = text.strip_prefix('"')?;
                        Some((inner.strip_suffix('"').unwrap_or(inner).to_string(), false))
                    }
                    SyntaxKind::SYSTEM_INCLUDE_PATH => {
                        let inner = text.strip_prefix('<')?;
                        Some((inner.strip_suffix('>').unwrap_or(inner).to_string(), true))
                    }
                    _ => None,
                }
            })
    }
}

ast_node!(
    ConditionalDirective,
    IF_DIRECTIVE | IFDEF_DIRECTIVE | IFNDEF_DIRECTIVE | ELIF_DIRECTIVE | ELSE_DIRECTIVE | ENDIF_DIRECTIVE
);

impl ConditionalDirective {
    first_child_method!(name_ref, NameRef);
}

ast_node!(OtherDirective, ERROR_DIRECTIVE | PRAGMA_DIRECTIVE | LINE_DIRECTIVE | BAD_DIRECTIVE);

impl OtherDirective {
    /// `#error` / `#pragma` text.
    pub fn text(&self) -> Option<String> {
        find_token(&self.0, SyntaxKind::DIRECTIVE_TEXT).map(|t| t.text().to_string())
    }
}
