use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(items, Item);

    /// Directives anywhere in the file, in source order.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.0.descendants().filter_map(Directive::cast)
    }
}

ast_enum! {
    /// A top-level declaration, or a member of a struct body.
    Item {
        Variables(VariableDeclarationStatement),
        Function(Function),
        TypeDeclaration(TypeDeclarationStatement),
        ConstantBuffer(ConstantBuffer),
        Typedef(TypedefStatement),
    }
}

// ============================================================================
// Attributes and qualifiers
// ============================================================================

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    first_child_method!(name_ref, NameRef);

    pub fn arguments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ATTRIBUTE_ARGUMENT_LIST)
            .flat_map(|list| list.children().filter_map(Expr::cast).collect::<Vec<_>>())
    }
}

ast_node!(Semantic, SEMANTIC);

impl Semantic {
    /// The semantic name, e.g. `SV_Position`.
    pub fn text(&self) -> Option<SmolStr> {
        find_token(&self.0, SyntaxKind::IDENT).map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(RegisterLocation, REGISTER_LOCATION);
ast_node!(PackoffsetLocation, PACKOFFSET_LOCATION);

ast_node!(ArrayRankSpecifier, ARRAY_RANK_SPECIFIER);

impl ArrayRankSpecifier {
    first_child_method!(size, Expr);
}

ast_node!(Annotations, ANNOTATIONS);

impl Annotations {
    children_method!(declarations, VariableDeclarationStatement);
}

// ============================================================================
// Variables
// ============================================================================

ast_node!(VariableDeclarationStatement, VARIABLE_DECLARATION_STATEMENT);

impl VariableDeclarationStatement {
    children_method!(attributes, Attribute);
    first_child_method!(declaration, VariableDeclaration);
}

/// Storage and interpolation modifiers written before a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Static,
    Const,
    Extern,
    Uniform,
    Groupshared,
    Shared,
    Volatile,
    Precise,
}

ast_node!(VariableDeclaration, VARIABLE_DECLARATION);

impl VariableDeclaration {
    first_child_method!(ty, Type);
    children_method!(declarators, VariableDeclarator);
    has_token_method!(is_static, STATIC_KW, "static float k;");
    has_token_method!(is_const, CONST_KW, "const float k = 1;");

    /// Modifier keywords in source order.
    pub fn modifiers(&self) -> Vec<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .filter(|k| k.is_modifier())
            .collect()
    }

    token_to_enum_method!(storage_class, StorageClass, [
        STATIC_KW => Static,
        CONST_KW => Const,
        EXTERN_KW => Extern,
        UNIFORM_KW => Uniform,
        GROUPSHARED_KW => Groupshared,
        SHARED_KW => Shared,
        VOLATILE_KW => Volatile,
        PRECISE_KW => Precise,
    ]);
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    first_child_method!(name, Name);
    children_method!(array_ranks, ArrayRankSpecifier);
    first_child_method!(semantic, Semantic);
    first_child_method!(register, RegisterLocation);
    first_child_method!(annotations, Annotations);
    first_child_method!(initializer, EqualsValueClause);

    /// `SamplerState s { ... }` without `=`
    pub fn state_initializer(&self) -> Option<StateInitializer> {
        self.0.children().find_map(StateInitializer::cast).or_else(|| {
            self.initializer()
                .and_then(|init| init.0.children().find_map(StateInitializer::cast))
        })
    }
}

ast_node!(EqualsValueClause, EQUALS_VALUE_CLAUSE);

impl EqualsValueClause {
    first_child_method!(value, Expr);
}

ast_node!(StateInitializer, STATE_INITIALIZER);

impl StateInitializer {
    children_method!(properties, StateProperty);
}

ast_node!(StateProperty, STATE_PROPERTY);

impl StateProperty {
    pub fn name(&self) -> Option<SmolStr> {
        find_token(&self.0, SyntaxKind::IDENT).map(|t| SmolStr::new(t.text()))
    }

    // For `<tex>` this is the identifier inside the brackets
    first_child_method!(value, Expr);
}

// ============================================================================
// Functions
// ============================================================================

ast_node!(Function, FUNCTION_DECLARATION | FUNCTION_DEFINITION);

impl Function {
    children_method!(attributes, Attribute);
    first_child_method!(return_type, Type);
    first_child_method!(name, Name);
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(semantic, Semantic);
    first_child_method!(body, Block);
    has_token_method!(is_inline, INLINE_KW);

    pub fn is_definition(&self) -> bool {
        self.0.kind() == SyntaxKind::FUNCTION_DEFINITION
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.parameter_list()
            .into_iter()
            .flat_map(|list| list.parameters().collect::<Vec<_>>())
    }
}

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    children_method!(parameters, Parameter);
}

/// Data flow direction of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterDirection {
    #[default]
    In,
    Out,
    InOut,
}

ast_node!(Parameter, PARAMETER);

impl Parameter {
    first_child_method!(ty, Type);
    first_child_method!(declarator, VariableDeclarator);
    has_token_method!(is_uniform, UNIFORM_KW);

    pub fn name(&self) -> Option<Name> {
        self.declarator().and_then(|d| d.name())
    }

    token_to_enum_method!(explicit_direction, ParameterDirection, [
        IN_KW => In,
        OUT_KW => Out,
        INOUT_KW => InOut,
    ]);

    pub fn direction(&self) -> ParameterDirection {
        let has_in = has_token(&self.0, SyntaxKind::IN_KW);
        let has_out = has_token(&self.0, SyntaxKind::OUT_KW);
        match (has_in, has_out) {
            // `in out float x`
            (true, true) => ParameterDirection::InOut,
            _ => self.explicit_direction().unwrap_or_default(),
        }
    }

    /// Default value, `float x = 1`.
    pub fn default_value(&self) -> Option<Expr> {
        self.declarator()?.initializer()?.value()
    }
}

// ============================================================================
// Types, buffers, typedefs
// ============================================================================

ast_node!(TypeDeclarationStatement, TYPE_DECLARATION_STATEMENT);

impl TypeDeclarationStatement {
    first_child_method!(struct_type, StructType);
}

ast_node!(ConstantBuffer, CONSTANT_BUFFER_DECLARATION);

impl ConstantBuffer {
    first_child_method!(name, Name);
    first_child_method!(register, RegisterLocation);
    children_method!(declarations, VariableDeclarationStatement);
    has_token_method!(is_tbuffer, TBUFFER_KW);
}

ast_node!(TypedefStatement, TYPEDEF_STATEMENT);

impl TypedefStatement {
    first_child_method!(ty, Type);
    children_method!(declarators, TypedefDeclarator);
    has_token_method!(is_const, CONST_KW);
}

ast_node!(TypedefDeclarator, TYPEDEF_DECLARATOR);

impl TypedefDeclarator {
    first_child_method!(name, Name);
    children_method!(array_ranks, ArrayRankSpecifier);
}
