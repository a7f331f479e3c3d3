//! Type syntax
//!
//! ```text
//! Type = PredefinedType | VectorTemplate | MatrixTemplate | ObjectType | StructType | NamedType
//! VectorTemplate = 'vector' ('<' Type ',' INT '>')?
//! ObjectType = ObjectName ('<' TemplateArg (',' TemplateArg)* '>')?
//! StructType = 'struct' Name? (':' NameRef)? FieldList?
//! ```

use super::declarations::parse_struct_member;
use super::{HlslParser, ParseContext, nested};
use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

/// How a type name is spelled, before any semantic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNameClass {
    Scalar,
    Vector,
    Matrix,
    /// `vector`, optionally with template arguments
    GenericVector,
    /// `matrix`, optionally with template arguments
    GenericMatrix,
    Void,
    String,
    Object,
}

impl TypeNameClass {
    /// Types that can be invoked as constructors: `float3(...)`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Scalar | Self::Vector | Self::Matrix | Self::GenericVector | Self::GenericMatrix
        )
    }
}

pub const SCALAR_TYPE_NAMES: &[&str] = &[
    "bool",
    "int",
    "uint",
    "dword",
    "half",
    "float",
    "double",
    "min16float",
    "min10float",
    "min16int",
    "min12int",
    "min16uint",
];

pub const OBJECT_TYPE_NAMES: &[&str] = &[
    "AppendStructuredBuffer",
    "Buffer",
    "ByteAddressBuffer",
    "ConsumeStructuredBuffer",
    "InputPatch",
    "LineStream",
    "OutputPatch",
    "PointStream",
    "RWBuffer",
    "RWByteAddressBuffer",
    "RWStructuredBuffer",
    "RWTexture1D",
    "RWTexture1DArray",
    "RWTexture2D",
    "RWTexture2DArray",
    "RWTexture3D",
    "SamplerComparisonState",
    "SamplerState",
    "StructuredBuffer",
    "Texture1D",
    "Texture1DArray",
    "Texture2D",
    "Texture2DArray",
    "Texture2DMS",
    "Texture2DMSArray",
    "Texture3D",
    "TextureCube",
    "TextureCubeArray",
    "TriangleStream",
    "sampler",
    "sampler1D",
    "sampler2D",
    "sampler3D",
    "samplerCUBE",
    "texture",
    "Texture",
];

/// Split `float3x4` into (`float`, 3, 4); scalars report (name, 0, 0),
/// vectors (scalar, n, 0).
pub fn split_numeric_type_name(name: &str) -> Option<(&'static str, u8, u8)> {
    for &scalar in SCALAR_TYPE_NAMES {
        let Some(rest) = name.strip_prefix(scalar) else {
            continue;
        };
        let dims = rest.as_bytes();
        let dim = |b: u8| (b'1'..=b'4').contains(&b).then(|| b - b'0');
        match dims {
            [] => return Some((scalar, 0, 0)),
            [n] => {
                if let Some(n) = dim(*n) {
                    return Some((scalar, n, 0));
                }
            }
            [r, b'x', c] => {
                if let (Some(r), Some(c)) = (dim(*r), dim(*c)) {
                    return Some((scalar, r, c));
                }
            }
            _ => {}
        }
    }
    None
}

pub fn classify_type_name(name: &str) -> Option<TypeNameClass> {
    match name {
        "void" => return Some(TypeNameClass::Void),
        "string" => return Some(TypeNameClass::String),
        "vector" => return Some(TypeNameClass::GenericVector),
        "matrix" => return Some(TypeNameClass::GenericMatrix),
        "unsigned" => return Some(TypeNameClass::Scalar),
        _ => {}
    }
    if OBJECT_TYPE_NAMES.contains(&name) {
        return Some(TypeNameClass::Object);
    }
    split_numeric_type_name(name).map(|(_, rows, cols)| match (rows, cols) {
        (0, _) => TypeNameClass::Scalar,
        (_, 0) => TypeNameClass::Vector,
        _ => TypeNameClass::Matrix,
    })
}

/// Whether the current token begins a type.
pub(super) fn at_type_start<P: HlslParser>(p: &P) -> bool {
    match p.current_kind() {
        SyntaxKind::STRUCT_KW => true,
        SyntaxKind::IDENT => {
            classify_type_name(p.current_text()).is_some() || p.is_known_type(p.current_text())
        }
        _ => false,
    }
}

/// Parse a type, returning the kind of node built.
pub fn parse_type<P: HlslParser>(p: &mut P) -> Option<SyntaxKind> {
    match p.current_kind() {
        SyntaxKind::STRUCT_KW => {
            parse_struct_type(p);
            Some(SyntaxKind::STRUCT_TYPE)
        }
        SyntaxKind::IDENT => {
            let kind = match classify_type_name(p.current_text()) {
                Some(TypeNameClass::GenericVector) => SyntaxKind::VECTOR_TEMPLATE_TYPE,
                Some(TypeNameClass::GenericMatrix) => SyntaxKind::MATRIX_TEMPLATE_TYPE,
                Some(TypeNameClass::Object) => SyntaxKind::OBJECT_TYPE,
                Some(_) => SyntaxKind::PREDEFINED_TYPE,
                None => SyntaxKind::NAMED_TYPE,
            };
            p.start_node(kind);
            match kind {
                SyntaxKind::NAMED_TYPE => {
                    p.start_node(SyntaxKind::NAME_REF);
                    p.bump();
                    p.finish_node();
                }
                SyntaxKind::PREDEFINED_TYPE => {
                    let unsigned = p.current_text() == "unsigned";
                    p.bump();
                    if unsigned && p.at(SyntaxKind::IDENT) && p.current_text() == "int" {
                        p.bump();
                    }
                }
                _ => {
                    p.bump();
                    if p.at(SyntaxKind::LT) {
                        parse_template_argument_list(p);
                    }
                }
            }
            p.finish_node();
            Some(kind)
        }
        _ => {
            p.error(ErrorCode::E0302, "expected a type".to_string());
            None
        }
    }
}

/// TemplateArgumentList = '<' (Type | INT) (',' (Type | INT))* '>'
fn parse_template_argument_list<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::TEMPLATE_ARGUMENT_LIST);
    p.bump(); // <

    loop {
        match p.current_kind() {
            SyntaxKind::INT_LITERAL => {
                p.start_node(SyntaxKind::LITERAL_EXPR);
                p.bump();
                p.finish_node();
            }
            // `RWTexture2D<unorm float4>`
            SyntaxKind::IDENT if matches!(p.current_text(), "unorm" | "snorm") => {
                p.bump();
                continue;
            }
            SyntaxKind::IDENT | SyntaxKind::STRUCT_KW => {
                nested(p, |p| parse_type(p).is_some());
            }
            _ => {
                p.error(ErrorCode::E0305, "expected a template argument".to_string());
                break;
            }
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }

    match p.current_kind() {
        SyntaxKind::GT => p.bump(),
        SyntaxKind::GT_GT => p.bump_split_gt(),
        _ => p.error(ErrorCode::E0305, "expected '>' to close template arguments".to_string()),
    }
    p.finish_node();
}

/// StructType = 'struct' Name? (':' NameRef)? FieldList?
fn parse_struct_type<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::STRUCT_TYPE);
    p.bump(); // struct

    if p.at(SyntaxKind::IDENT) {
        let declares = matches!(p.nth(1), SyntaxKind::L_BRACE | SyntaxKind::COLON);
        if declares {
            let name = p.current_text().to_string();
            p.declare_type(&name);
            p.start_node(SyntaxKind::NAME);
        } else {
            p.start_node(SyntaxKind::NAME_REF);
        }
        p.bump();
        p.finish_node();
    }

    if p.eat(SyntaxKind::COLON) {
        if p.at(SyntaxKind::IDENT) {
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            p.finish_node();
        } else {
            p.error(ErrorCode::E0302, "expected a base type name".to_string());
        }
    }

    if p.at(SyntaxKind::L_BRACE) {
        parse_field_list(p);
    }
    p.finish_node();
}

/// FieldList = '{' StructMember* '}'
fn parse_field_list<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::FIELD_LIST);
    p.bump(); // {

    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.get_pos();
        nested(p, |p| {
            parse_struct_member(p);
            true
        });
        if p.get_pos() == before {
            p.recover(ParseContext::StructBody);
        }
    }

    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("float", Some(TypeNameClass::Scalar))]
    #[case("dword", Some(TypeNameClass::Scalar))]
    #[case("min16float3", Some(TypeNameClass::Vector))]
    #[case("half4x4", Some(TypeNameClass::Matrix))]
    #[case("vector", Some(TypeNameClass::GenericVector))]
    #[case("Texture2DMS", Some(TypeNameClass::Object))]
    #[case("float5", None)]
    #[case("float4x0", None)]
    #[case("MyStruct", None)]
    fn test_classify_type_name(#[case] name: &str, #[case] expected: Option<TypeNameClass>) {
        assert_eq!(classify_type_name(name), expected);
    }

    #[test]
    fn test_split_numeric_type_name() {
        assert_eq!(split_numeric_type_name("uint2"), Some(("uint", 2, 0)));
        assert_eq!(split_numeric_type_name("float3x2"), Some(("float", 3, 2)));
        assert_eq!(split_numeric_type_name("min16int"), Some(("min16int", 0, 0)));
    }
}
