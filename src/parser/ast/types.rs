use super::*;

ast_enum! {
    Type {
        Predefined(PredefinedType),
        VectorTemplate(VectorTemplateType),
        MatrixTemplate(MatrixTemplateType),
        Object(ObjectType),
        Named(NamedType),
        Struct(StructType),
    }
}

ast_node!(PredefinedType, PREDEFINED_TYPE);

impl PredefinedType {
    /// The type keyword; `unsigned int` is reported as `uint`.
    pub fn name(&self) -> Option<SmolStr> {
        let words: Vec<_> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .collect();
        match words.as_slice() {
            [unsigned, int] if unsigned.text() == "unsigned" && int.text() == "int" => {
                Some(SmolStr::new_static("uint"))
            }
            [first, ..] => Some(SmolStr::new(first.text())),
            [] => None,
        }
    }
}

ast_node!(VectorTemplateType, VECTOR_TEMPLATE_TYPE);

impl VectorTemplateType {
    first_child_method!(arguments, TemplateArgumentList);
}

ast_node!(MatrixTemplateType, MATRIX_TEMPLATE_TYPE);

impl MatrixTemplateType {
    first_child_method!(arguments, TemplateArgumentList);
}

ast_node!(ObjectType, OBJECT_TYPE);

impl ObjectType {
    first_child_method!(arguments, TemplateArgumentList);

    /// `Texture2D`, `StructuredBuffer`, ...
    pub fn name(&self) -> Option<SmolStr> {
        first_significant_token(&self.0).map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(TemplateArgumentList, TEMPLATE_ARGUMENT_LIST);

/// One template argument: a type, or an integer dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateArgument {
    Type(Type),
    Literal(LiteralExpr),
}

impl TemplateArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = TemplateArgument> + '_ {
        self.0.children().filter_map(|node| {
            if let Some(ty) = Type::cast(node.clone()) {
                Some(TemplateArgument::Type(ty))
            } else {
                LiteralExpr::cast(node).map(TemplateArgument::Literal)
            }
        })
    }
}

ast_node!(NamedType, NAMED_TYPE);

impl NamedType {
    first_child_method!(name_ref, NameRef);
}

ast_node!(StructType, STRUCT_TYPE);

impl StructType {
    // Present when this node declares the struct
    first_child_method!(name, Name);
    first_child_method!(field_list, FieldList);

    /// `struct S x;` referring to an existing struct, or the base type
    /// after `:` when there is a declared name.
    pub fn name_refs(&self) -> impl Iterator<Item = NameRef> + '_ {
        self.0.children().filter_map(NameRef::cast)
    }

    pub fn base(&self) -> Option<NameRef> {
        let mut after_colon = false;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::COLON => after_colon = true,
                rowan::NodeOrToken::Node(n) if after_colon => return NameRef::cast(n),
                _ => {}
            }
        }
        None
    }

    /// `struct S x;` with no body: the referenced name.
    pub fn reference(&self) -> Option<NameRef> {
        if self.base().is_some() || self.name().is_some() {
            return None;
        }
        self.name_refs().next()
    }
}

ast_node!(FieldList, FIELD_LIST);

impl FieldList {
    children_method!(members, Item);
}
