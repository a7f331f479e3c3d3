//! Symbols: the named entities of a compilation.
//!
//! Every symbol lives in an arena and is addressed by a [`SymbolId`]. Ids
//! below the intrinsic count point into the shared intrinsic arena; the rest
//! belong to one compilation's [`SymbolTable`](super::SymbolTable). Symbols
//! refer to each other (a variable to its type, a method to its object type)
//! only through ids, and to syntax only through [`DeclSite`].

use std::fmt;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::parser::ParameterDirection;
use crate::syntax::NodePtr;

// ============================================================================
// IDS
// ============================================================================

/// Index of a symbol in the intrinsic arena or a compilation's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// NUMERIC TYPES
// ============================================================================

/// Scalar component types, ordered by promotion rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarType {
    Bool,
    Min12Int,
    Min16Int,
    Int,
    Min16Uint,
    Uint,
    Min10Float,
    Min16Float,
    Half,
    Float,
    Double,
}

impl ScalarType {
    pub const ALL: [ScalarType; 11] = [
        Self::Bool,
        Self::Min12Int,
        Self::Min16Int,
        Self::Int,
        Self::Min16Uint,
        Self::Uint,
        Self::Min10Float,
        Self::Min16Float,
        Self::Half,
        Self::Float,
        Self::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Min12Int => "min12int",
            Self::Min16Int => "min16int",
            Self::Int => "int",
            Self::Min16Uint => "min16uint",
            Self::Uint => "uint",
            Self::Min10Float => "min10float",
            Self::Min16Float => "min16float",
            Self::Half => "half",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// `dword` is an alias of `uint`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dword" => Some(Self::Uint),
            _ => Self::ALL.into_iter().find(|s| s.name() == name),
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn is_bool(self) -> bool {
        self == Self::Bool
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Min12Int | Self::Min16Int | Self::Int | Self::Min16Uint | Self::Uint
        )
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            Self::Min10Float | Self::Min16Float | Self::Half | Self::Float | Self::Double
        )
    }
}

/// Dimensions of a numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Scalar,
    Vector(u8),
    Matrix(u8, u8),
}

impl Shape {
    /// Scalar, `1..=4` vectors, then every matrix from `1x1` to `4x4`.
    pub fn all() -> impl Iterator<Item = Shape> {
        let vectors = (1..=4).map(Shape::Vector);
        let matrices = (1..=4).flat_map(|r| (1..=4).map(move |c| Shape::Matrix(r, c)));
        std::iter::once(Shape::Scalar).chain(vectors).chain(matrices)
    }

    pub fn components(self) -> u32 {
        match self {
            Self::Scalar => 1,
            Self::Vector(n) => u32::from(n),
            Self::Matrix(r, c) => u32::from(r) * u32::from(c),
        }
    }

    /// `float`, `float3`, `float3x4`
    pub fn type_name(self, scalar: ScalarType) -> String {
        match self {
            Self::Scalar => scalar.name().to_string(),
            Self::Vector(n) => format!("{}{}", scalar.name(), n),
            Self::Matrix(r, c) => format!("{}{}x{}", scalar.name(), r, c),
        }
    }
}

// ============================================================================
// OBJECT TYPES
// ============================================================================

/// Built-in resource and sampler types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Buffer,
    RWBuffer,
    ByteAddressBuffer,
    RWByteAddressBuffer,
    StructuredBuffer,
    RWStructuredBuffer,
    AppendStructuredBuffer,
    ConsumeStructuredBuffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture2DMS,
    Texture2DMSArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
    RWTexture1D,
    RWTexture1DArray,
    RWTexture2D,
    RWTexture2DArray,
    RWTexture3D,
    InputPatch,
    OutputPatch,
    PointStream,
    LineStream,
    TriangleStream,
    SamplerState,
    SamplerComparisonState,
    /// Legacy `sampler`, `sampler1D`, ... and `texture`
    LegacySampler(LegacySampler),
    LegacyTexture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LegacySampler {
    Generic,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 35] = [
        Self::Buffer,
        Self::RWBuffer,
        Self::ByteAddressBuffer,
        Self::RWByteAddressBuffer,
        Self::StructuredBuffer,
        Self::RWStructuredBuffer,
        Self::AppendStructuredBuffer,
        Self::ConsumeStructuredBuffer,
        Self::Texture1D,
        Self::Texture1DArray,
        Self::Texture2D,
        Self::Texture2DArray,
        Self::Texture2DMS,
        Self::Texture2DMSArray,
        Self::Texture3D,
        Self::TextureCube,
        Self::TextureCubeArray,
        Self::RWTexture1D,
        Self::RWTexture1DArray,
        Self::RWTexture2D,
        Self::RWTexture2DArray,
        Self::RWTexture3D,
        Self::InputPatch,
        Self::OutputPatch,
        Self::PointStream,
        Self::LineStream,
        Self::TriangleStream,
        Self::SamplerState,
        Self::SamplerComparisonState,
        Self::LegacySampler(LegacySampler::Generic),
        Self::LegacySampler(LegacySampler::Sampler1D),
        Self::LegacySampler(LegacySampler::Sampler2D),
        Self::LegacySampler(LegacySampler::Sampler3D),
        Self::LegacySampler(LegacySampler::SamplerCube),
        Self::LegacyTexture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Buffer => "Buffer",
            Self::RWBuffer => "RWBuffer",
            Self::ByteAddressBuffer => "ByteAddressBuffer",
            Self::RWByteAddressBuffer => "RWByteAddressBuffer",
            Self::StructuredBuffer => "StructuredBuffer",
            Self::RWStructuredBuffer => "RWStructuredBuffer",
            Self::AppendStructuredBuffer => "AppendStructuredBuffer",
            Self::ConsumeStructuredBuffer => "ConsumeStructuredBuffer",
            Self::Texture1D => "Texture1D",
            Self::Texture1DArray => "Texture1DArray",
            Self::Texture2D => "Texture2D",
            Self::Texture2DArray => "Texture2DArray",
            Self::Texture2DMS => "Texture2DMS",
            Self::Texture2DMSArray => "Texture2DMSArray",
            Self::Texture3D => "Texture3D",
            Self::TextureCube => "TextureCube",
            Self::TextureCubeArray => "TextureCubeArray",
            Self::RWTexture1D => "RWTexture1D",
            Self::RWTexture1DArray => "RWTexture1DArray",
            Self::RWTexture2D => "RWTexture2D",
            Self::RWTexture2DArray => "RWTexture2DArray",
            Self::RWTexture3D => "RWTexture3D",
            Self::InputPatch => "InputPatch",
            Self::OutputPatch => "OutputPatch",
            Self::PointStream => "PointStream",
            Self::LineStream => "LineStream",
            Self::TriangleStream => "TriangleStream",
            Self::SamplerState => "SamplerState",
            Self::SamplerComparisonState => "SamplerComparisonState",
            Self::LegacySampler(LegacySampler::Generic) => "sampler",
            Self::LegacySampler(LegacySampler::Sampler1D) => "sampler1D",
            Self::LegacySampler(LegacySampler::Sampler2D) => "sampler2D",
            Self::LegacySampler(LegacySampler::Sampler3D) => "sampler3D",
            Self::LegacySampler(LegacySampler::SamplerCube) => "samplerCUBE",
            Self::LegacyTexture => "texture",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Texture" => Some(Self::LegacyTexture),
            _ => Self::ALL.into_iter().find(|k| k.name() == name),
        }
    }

    /// Types whose template argument is an element type.
    pub fn has_element(self) -> bool {
        !matches!(
            self,
            Self::ByteAddressBuffer
                | Self::RWByteAddressBuffer
                | Self::SamplerState
                | Self::SamplerComparisonState
                | Self::LegacySampler(_)
                | Self::LegacyTexture
        )
    }

    /// Element type assumed when no template argument is written.
    pub fn defaults_to_float4(self) -> bool {
        self.texture_dimension().is_some() || matches!(self, Self::Buffer | Self::RWBuffer)
    }

    /// Coordinate dimension of a texture, not counting the array slice.
    pub fn texture_dimension(self) -> Option<u8> {
        match self {
            Self::Texture1D | Self::Texture1DArray | Self::RWTexture1D | Self::RWTexture1DArray => Some(1),
            Self::Texture2D
            | Self::Texture2DArray
            | Self::Texture2DMS
            | Self::Texture2DMSArray
            | Self::RWTexture2D
            | Self::RWTexture2DArray => Some(2),
            Self::Texture3D | Self::TextureCube | Self::TextureCubeArray | Self::RWTexture3D => Some(3),
            _ => None,
        }
    }

    pub fn is_texture_array(self) -> bool {
        matches!(
            self,
            Self::Texture1DArray
                | Self::Texture2DArray
                | Self::Texture2DMSArray
                | Self::TextureCubeArray
                | Self::RWTexture1DArray
                | Self::RWTexture2DArray
        )
    }

    pub fn is_cube(self) -> bool {
        matches!(self, Self::TextureCube | Self::TextureCubeArray)
    }

    pub fn is_multisampled(self) -> bool {
        matches!(self, Self::Texture2DMS | Self::Texture2DMSArray)
    }

    pub fn is_read_write(self) -> bool {
        matches!(
            self,
            Self::RWBuffer
                | Self::RWByteAddressBuffer
                | Self::RWStructuredBuffer
                | Self::RWTexture1D
                | Self::RWTexture1DArray
                | Self::RWTexture2D
                | Self::RWTexture2DArray
                | Self::RWTexture3D
        )
    }

    /// `obj[i]` is allowed.
    pub fn is_indexable(self) -> bool {
        matches!(
            self,
            Self::Buffer
                | Self::RWBuffer
                | Self::StructuredBuffer
                | Self::RWStructuredBuffer
                | Self::InputPatch
                | Self::OutputPatch
        ) || (self.texture_dimension().is_some() && !self.is_cube())
    }
}

// ============================================================================
// SYMBOL KINDS
// ============================================================================

/// Shape and meaning of a type symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar(ScalarType),
    Vector(ScalarType, u8),
    Matrix(ScalarType, u8, u8),
    Array { element: SymbolId, size: Option<u32> },
    Struct,
    Object { kind: ObjectKind, element: Option<SymbolId> },
    /// The container of `cbuffer`/`tbuffer` fields
    ConstantBuffer,
    /// A `typedef` name
    Alias(SymbolId),
    Void,
    String,
    /// No type could be determined, and no diagnostic was reported
    Unknown,
    /// Binding failed and a diagnostic was reported
    Error,
}

impl TypeKind {
    pub fn numeric(scalar: ScalarType, shape: Shape) -> Self {
        match shape {
            Shape::Scalar => Self::Scalar(scalar),
            Shape::Vector(n) => Self::Vector(scalar, n),
            Shape::Matrix(r, c) => Self::Matrix(scalar, r, c),
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Scalar(_) => Some(Shape::Scalar),
            Self::Vector(_, n) => Some(Shape::Vector(*n)),
            Self::Matrix(_, r, c) => Some(Shape::Matrix(*r, *c)),
            _ => None,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(s) | Self::Vector(s, _) | Self::Matrix(s, _, _) => Some(*s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.scalar_type().is_some()
    }

    /// Scalar components of a numeric type.
    pub fn component_count(&self) -> Option<u32> {
        self.shape().map(Shape::components)
    }

    pub fn is_error_or_unknown(&self) -> bool {
        matches!(self, Self::Error | Self::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSymbol {
    pub kind: TypeKind,
    /// Fields and methods, in declaration order.
    pub members: Vec<SymbolId>,
    /// Base struct after `:`.
    pub base: Option<SymbolId>,
}

impl TypeSymbol {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            base: None,
        }
    }
}

/// A formal parameter of a function or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterInfo {
    pub name: SmolStr,
    pub ty: SymbolId,
    pub direction: ParameterDirection,
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSymbol {
    pub return_type: SymbolId,
    pub parameters: Vec<ParameterInfo>,
    pub is_intrinsic: bool,
    /// `float4(...)` and friends
    pub is_numeric_constructor: bool,
    pub has_body: bool,
    pub semantic: Option<SmolStr>,
}

impl FunctionSymbol {
    /// Number of parameters without a default value.
    pub fn required_parameters(&self) -> usize {
        self.parameters.iter().filter(|p| !p.has_default).count()
    }

    /// Whether `count` arguments can be passed.
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.required_parameters() && count <= self.parameters.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Global,
    Local,
    Parameter(ParameterDirection),
    Field,
    ConstantBufferField,
    /// A vector or matrix component selection such as `.xyz` or `._m01`
    Swizzle,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSymbol {
    pub kind: VariableKind,
    pub ty: SymbolId,
    pub is_const: bool,
    pub is_static: bool,
    pub semantic: Option<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSymbol {
    pub parameters: Vec<ParameterInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticSymbol {
    /// `SV_*` semantics
    pub is_system_value: bool,
    /// Accepts an index suffix, as in `TEXCOORD3`
    pub is_indexed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacroSymbol {
    pub parameters: Option<Vec<SmolStr>>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Type(TypeSymbol),
    Function(FunctionSymbol),
    Variable(VariableSymbol),
    Attribute(AttributeSymbol),
    Semantic(SemanticSymbol),
    Macro(MacroSymbol),
}

// ============================================================================
// SYMBOL
// ============================================================================

/// Where a user symbol was declared.
///
/// A non-owning back-reference: `node` is resolved against the tree of
/// `file`, which the compilation owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclSite {
    pub file: FileId,
    pub node: NodePtr,
    pub name_range: TextRange,
    pub in_root_file: bool,
}

/// A named entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub(crate) id: SymbolId,
    pub(crate) name: SmolStr,
    pub(crate) kind: SymbolKind,
    pub(crate) decl: Option<DeclSite>,
    pub(crate) container: Option<SymbolId>,
    pub(crate) documentation: Option<String>,
}

impl Symbol {
    pub(crate) fn new(id: SymbolId, name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            decl: None,
            container: None,
            documentation: None,
        }
    }

    pub(crate) fn with_decl(mut self, decl: Option<DeclSite>) -> Self {
        self.decl = decl;
        self
    }

    pub(crate) fn with_container(mut self, container: Option<SymbolId>) -> Self {
        self.container = container;
        self
    }

    pub(crate) fn with_documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation.filter(|d| !d.is_empty());
        self
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn decl(&self) -> Option<&DeclSite> {
        self.decl.as_ref()
    }

    /// Struct of a field, object type of a method, buffer of a constant.
    pub fn container(&self) -> Option<SymbolId> {
        self.container
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match &self.kind {
            SymbolKind::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match &self.kind {
            SymbolKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableSymbol> {
        match &self.kind {
            SymbolKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeSymbol> {
        match &self.kind {
            SymbolKind::Attribute(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_macro(&self) -> Option<&MacroSymbol> {
        match &self.kind {
            SymbolKind::Macro(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::Type(_))
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self.kind, SymbolKind::Function(_))
    }

    /// Variables and functions: what an identifier expression may name.
    pub fn is_value(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable(_) | SymbolKind::Function(_))
    }

    pub fn is_intrinsic(&self) -> bool {
        self.decl.is_none() && !matches!(self.kind, SymbolKind::Macro(_))
    }

    pub fn is_numeric_constructor(&self) -> bool {
        self.as_function().is_some_and(|f| f.is_numeric_constructor)
    }

    /// The type a value of this symbol has: a variable's type, a
    /// function's return type, or the type itself.
    pub fn value_type(&self) -> Option<SymbolId> {
        match &self.kind {
            SymbolKind::Variable(v) => Some(v.ty),
            SymbolKind::Function(f) => Some(f.return_type),
            SymbolKind::Type(_) => Some(self.id),
            _ => None,
        }
    }

    pub fn is_in_root_file(&self) -> bool {
        self.decl.as_ref().is_some_and(|d| d.in_root_file)
    }
}
