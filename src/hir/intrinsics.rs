//! The built-in symbols every compilation sees.
//!
//! Built once on first use and shared read-only. Intrinsic symbols take the
//! low end of the [`SymbolId`] space, so a compilation's table can hand out
//! ids above [`Intrinsics::len`] without any coordination.

use std::sync::LazyLock;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::parser::ParameterDirection;
use crate::parser::grammar::split_numeric_type_name;

use super::symbols::{
    AttributeSymbol, FunctionSymbol, ObjectKind, ParameterInfo, ScalarType, SemanticSymbol, Shape,
    Symbol, SymbolId, SymbolKind, TypeKind, TypeSymbol, VariableKind, VariableSymbol,
};

static INTRINSICS: LazyLock<Intrinsics> = LazyLock::new(Intrinsics::build);

/// The shared intrinsic arena.
pub fn intrinsics() -> &'static Intrinsics {
    &INTRINSICS
}

const FLOATS: &[ScalarType] = &[ScalarType::Half, ScalarType::Float, ScalarType::Double];
const INTS: &[ScalarType] = &[ScalarType::Int, ScalarType::Uint];
const NUMERIC: &[ScalarType] = &[
    ScalarType::Int,
    ScalarType::Uint,
    ScalarType::Half,
    ScalarType::Float,
    ScalarType::Double,
];
const ALL: &[ScalarType] = &[
    ScalarType::Bool,
    ScalarType::Int,
    ScalarType::Uint,
    ScalarType::Half,
    ScalarType::Float,
    ScalarType::Double,
];

#[derive(Debug)]
pub struct Intrinsics {
    symbols: Vec<Symbol>,
    scope: IndexMap<SmolStr, Vec<SymbolId>>,
    numeric: FxHashMap<(ScalarType, Shape), SymbolId>,
    objects: FxHashMap<ObjectKind, SymbolId>,
    attributes: FxHashMap<SmolStr, SymbolId>,
    semantics: FxHashMap<SmolStr, SymbolId>,
    void: SymbolId,
    string: SymbolId,
    unknown: SymbolId,
    error: SymbolId,
}

impl Intrinsics {
    /// Number of intrinsic symbols; the first id a compilation may use.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Everything declared under `name`: types, their constructors, functions.
    pub fn lookup(&self, name: &str) -> &[SymbolId] {
        self.scope.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The intrinsic scope in declaration order.
    pub fn scope(&self) -> impl Iterator<Item = (&SmolStr, &[SymbolId])> {
        self.scope.iter().map(|(name, ids)| (name, ids.as_slice()))
    }

    pub fn numeric(&self, scalar: ScalarType, shape: Shape) -> SymbolId {
        self.numeric
            .get(&(scalar, shape))
            .copied()
            .unwrap_or(self.error)
    }

    pub fn scalar(&self, scalar: ScalarType) -> SymbolId {
        self.numeric(scalar, Shape::Scalar)
    }

    /// `float3x4`, `dword`, `min16float2` ...
    pub fn numeric_by_name(&self, name: &str) -> Option<SymbolId> {
        let (scalar, rows, cols) = split_numeric_type_name(name)?;
        let scalar = ScalarType::from_name(scalar)?;
        let shape = match (rows, cols) {
            (0, _) => Shape::Scalar,
            (n, 0) => Shape::Vector(n),
            (r, c) => Shape::Matrix(r, c),
        };
        Some(self.numeric(scalar, shape))
    }

    /// Default instantiation of an object type, e.g. `Texture2D<float4>`.
    pub fn object(&self, kind: ObjectKind) -> SymbolId {
        self.objects.get(&kind).copied().unwrap_or(self.error)
    }

    /// A built-in type by its keyword.
    pub fn type_by_name(&self, name: &str) -> Option<SymbolId> {
        match name {
            "void" => Some(self.void),
            "string" => Some(self.string),
            "vector" => Some(self.numeric(ScalarType::Float, Shape::Vector(4))),
            "matrix" => Some(self.numeric(ScalarType::Float, Shape::Matrix(4, 4))),
            _ => self
                .numeric_by_name(name)
                .or_else(|| ObjectKind::from_name(name).map(|kind| self.object(kind))),
        }
    }

    /// Attribute names are case-insensitive.
    pub fn attribute(&self, name: &str) -> Option<SymbolId> {
        self.attributes.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// A system or legacy semantic. `TEXCOORD3` finds `TEXCOORD`.
    pub fn semantic(&self, name: &str) -> Option<SymbolId> {
        let upper = name.to_ascii_uppercase();
        if let Some(&id) = self.semantics.get(upper.as_str()) {
            return Some(id);
        }
        let base = upper.trim_end_matches(|c: char| c.is_ascii_digit());
        if base.len() == upper.len() {
            return None;
        }
        let id = *self.semantics.get(base)?;
        let indexed = match &self.symbols[id.index()].kind {
            SymbolKind::Semantic(s) => s.is_indexed,
            _ => false,
        };
        indexed.then_some(id)
    }

    pub fn void(&self) -> SymbolId {
        self.void
    }

    pub fn string(&self) -> SymbolId {
        self.string
    }

    pub fn unknown(&self) -> SymbolId {
        self.unknown
    }

    pub fn error(&self) -> SymbolId {
        self.error
    }

    pub(crate) fn error_symbol(&self) -> &Symbol {
        &self.symbols[self.error.index()]
    }

    /// Methods of `kind` instantiated for `element`.
    pub(crate) fn method_symbols(
        &self,
        kind: ObjectKind,
        element: Option<SymbolId>,
        element_scalar: Option<ScalarType>,
    ) -> Vec<(&'static str, FunctionSymbol, &'static str)> {
        let resolve = |ty: MethodType| match ty {
            MethodType::Element => element.unwrap_or(self.unknown),
            MethodType::ElementVector4 => self.numeric(
                element_scalar.unwrap_or(ScalarType::Float),
                Shape::Vector(4),
            ),
            MethodType::Numeric(scalar, shape) => self.numeric(scalar, shape),
            MethodType::Void => self.void,
            MethodType::Object(kind) => self.object(kind),
        };
        object_methods(kind)
            .into_iter()
            .map(|entry| {
                let parameters = entry
                    .params
                    .iter()
                    .map(|&(name, direction, ty)| ParameterInfo {
                        name: SmolStr::new_static(name),
                        ty: resolve(ty),
                        direction,
                        has_default: false,
                    })
                    .collect();
                let function = FunctionSymbol {
                    return_type: resolve(entry.ret),
                    parameters,
                    is_intrinsic: true,
                    is_numeric_constructor: false,
                    has_body: false,
                    semantic: None,
                };
                (entry.name, function, entry.doc)
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    fn build() -> Self {
        let placeholder = SymbolId::new(0);
        let mut this = Self {
            symbols: Vec::new(),
            scope: IndexMap::new(),
            numeric: FxHashMap::default(),
            objects: FxHashMap::default(),
            attributes: FxHashMap::default(),
            semantics: FxHashMap::default(),
            void: placeholder,
            string: placeholder,
            unknown: placeholder,
            error: placeholder,
        };
        this.add_special_types();
        this.add_numeric_types();
        this.add_object_types();
        this.add_functions();
        this.add_attributes();
        this.add_semantics();
        debug!(symbols = this.symbols.len(), "built intrinsic symbols");
        this
    }

    fn push(
        &mut self,
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        container: Option<SymbolId>,
        doc: &str,
    ) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        let symbol = Symbol::new(id, name, kind)
            .with_container(container)
            .with_documentation(Some(doc.to_string()));
        self.symbols.push(symbol);
        id
    }

    fn declare(&mut self, name: &str, id: SymbolId) {
        self.scope.entry(SmolStr::new(name)).or_default().push(id);
    }

    fn set_members(&mut self, ty: SymbolId, members: Vec<SymbolId>) {
        if let SymbolKind::Type(t) = &mut self.symbols[ty.index()].kind {
            t.members = members;
        }
    }

    fn add_special_types(&mut self) {
        let ty = |kind| SymbolKind::Type(TypeSymbol::new(kind));
        self.void = self.push("void", ty(TypeKind::Void), None, "");
        self.string = self.push("string", ty(TypeKind::String), None, "");
        self.unknown = self.push("<unknown>", ty(TypeKind::Unknown), None, "");
        self.error = self.push("<error>", ty(TypeKind::Error), None, "");
        self.declare("void", self.void);
        self.declare("string", self.string);
    }

    fn add_numeric_types(&mut self) {
        for scalar in ScalarType::ALL {
            for shape in Shape::all() {
                let name = shape.type_name(scalar);
                let kind = SymbolKind::Type(TypeSymbol::new(TypeKind::numeric(scalar, shape)));
                let id = self.push(name.as_str(), kind, None, "");
                self.numeric.insert((scalar, shape), id);
            }
        }

        for scalar in ScalarType::ALL {
            let component = self.scalar(scalar);
            for shape in Shape::all() {
                let ty = self.numeric(scalar, shape);
                let names: Vec<String> = match shape {
                    Shape::Scalar => Vec::new(),
                    Shape::Vector(n) => {
                        let n = usize::from(n);
                        let xyzw = "xyzw"[..n].chars().map(String::from);
                        let rgba = "rgba"[..n].chars().map(String::from);
                        xyzw.chain(rgba).collect()
                    }
                    Shape::Matrix(rows, cols) => {
                        let cells: Vec<_> = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c))).collect();
                        let zero_based = cells.iter().map(|(r, c)| format!("_m{r}{c}"));
                        let one_based = cells.iter().map(|(r, c)| format!("_{}{}", r + 1, c + 1));
                        zero_based.chain(one_based).collect()
                    }
                };
                let members = names
                    .into_iter()
                    .map(|name| {
                        let kind = SymbolKind::Variable(VariableSymbol {
                            kind: VariableKind::Swizzle,
                            ty: component,
                            is_const: false,
                            is_static: false,
                            semantic: None,
                        });
                        self.push(name, kind, Some(ty), "")
                    })
                    .collect();
                self.set_members(ty, members);

                let name = shape.type_name(scalar);
                let constructor = SymbolKind::Function(FunctionSymbol {
                    return_type: ty,
                    parameters: Vec::new(),
                    is_intrinsic: true,
                    is_numeric_constructor: true,
                    has_body: false,
                    semantic: None,
                });
                let doc = format!("Constructs a {name} from scalar, vector and matrix components.");
                let constructor = self.push(name.as_str(), constructor, None, &doc);
                self.declare(&name, ty);
                self.declare(&name, constructor);
            }
        }

        self.declare("vector", self.numeric(ScalarType::Float, Shape::Vector(4)));
        self.declare("matrix", self.numeric(ScalarType::Float, Shape::Matrix(4, 4)));
    }

    fn add_object_types(&mut self) {
        let float4 = self.numeric(ScalarType::Float, Shape::Vector(4));
        for kind in ObjectKind::ALL {
            let element = kind.defaults_to_float4().then_some(float4);
            let ty = SymbolKind::Type(TypeSymbol::new(TypeKind::Object { kind, element }));
            let id = self.push(kind.name(), ty, None, object_doc(kind));
            self.objects.insert(kind, id);
            self.declare(kind.name(), id);
        }
        self.declare("Texture", self.object(ObjectKind::LegacyTexture));

        for kind in ObjectKind::ALL {
            let ty = self.object(kind);
            let element = kind.defaults_to_float4().then_some(float4);
            let element_scalar = element.map(|_| ScalarType::Float);
            let members = self
                .method_symbols(kind, element, element_scalar)
                .into_iter()
                .map(|(name, function, doc)| self.push(name, SymbolKind::Function(function), Some(ty), doc))
                .collect();
            self.set_members(ty, members);
        }
    }

    /// Resolve one type word of a function pattern.
    fn pattern_type(&self, word: &str, scalar: ScalarType, shape: Shape) -> SymbolId {
        match word {
            "T" => self.numeric(scalar, shape),
            "S" => self.scalar(scalar),
            "B" => self.numeric(ScalarType::Bool, shape),
            "I" => self.numeric(ScalarType::Int, shape),
            "U" => self.numeric(ScalarType::Uint, shape),
            "F" => self.numeric(ScalarType::Float, shape),
            other => self.type_by_name(other).unwrap_or(self.error),
        }
    }

    fn add_function(&mut self, name: &str, doc: &str, return_type: SymbolId, parameters: Vec<ParameterInfo>) {
        let function = SymbolKind::Function(FunctionSymbol {
            return_type,
            parameters,
            is_intrinsic: true,
            is_numeric_constructor: false,
            has_body: false,
            semantic: None,
        });
        let id = self.push(name, function, None, doc);
        self.declare(name, id);
    }

    fn add_functions(&mut self) {
        for entry in FUNCTIONS {
            let scalars: &[ScalarType] = if entry.shapes == Shapes::Fixed {
                &[ScalarType::Float]
            } else {
                entry.scalars
            };
            for &scalar in scalars {
                for shape in entry.shapes.iter() {
                    let parameters = entry
                        .params
                        .iter()
                        .map(|param| {
                            let (direction, ty, name) = parse_param(param);
                            ParameterInfo {
                                name: SmolStr::new(name),
                                ty: self.pattern_type(ty, scalar, shape),
                                direction,
                                has_default: false,
                            }
                        })
                        .collect();
                    let ret = self.pattern_type(entry.ret, scalar, shape);
                    self.add_function(entry.name, entry.doc, ret, parameters);
                }
            }
        }
        self.add_linear_algebra();
    }

    /// `mul`, `dot`, `cross`, `transpose` and `determinant`, whose result
    /// shapes depend on the argument shapes.
    fn add_linear_algebra(&mut self) {
        let param = |name: &'static str, ty| ParameterInfo {
            name: SmolStr::new_static(name),
            ty,
            direction: ParameterDirection::In,
            has_default: false,
        };
        let dims = 1..=4u8;

        const MUL_DOC: &str = "Multiplies x and y using matrix math. The inner dimension x-columns and y-rows must be equal.";
        for &s in NUMERIC {
            let t = |shape| self.numeric(s, shape);
            let mut overloads = vec![(t(Shape::Scalar), t(Shape::Scalar), t(Shape::Scalar))];
            for shape in Shape::all().skip(1) {
                overloads.push((t(Shape::Scalar), t(shape), t(shape)));
                overloads.push((t(shape), t(Shape::Scalar), t(shape)));
            }
            for n in dims.clone() {
                overloads.push((t(Shape::Vector(n)), t(Shape::Vector(n)), t(Shape::Scalar)));
                for c in dims.clone() {
                    overloads.push((t(Shape::Vector(n)), t(Shape::Matrix(n, c)), t(Shape::Vector(c))));
                    overloads.push((t(Shape::Matrix(c, n)), t(Shape::Vector(n)), t(Shape::Vector(c))));
                    for r in dims.clone() {
                        overloads.push((t(Shape::Matrix(r, n)), t(Shape::Matrix(n, c)), t(Shape::Matrix(r, c))));
                    }
                }
            }
            for (x, y, ret) in overloads {
                self.add_function("mul", MUL_DOC, ret, vec![param("x", x), param("y", y)]);
            }
        }

        for &s in NUMERIC {
            for n in dims.clone() {
                let v = self.numeric(s, Shape::Vector(n));
                let ret = self.scalar(s);
                self.add_function("dot", "Returns the dot product of two vectors.", ret, vec![param("x", v), param("y", v)]);
            }
        }

        let float3 = self.numeric(ScalarType::Float, Shape::Vector(3));
        self.add_function(
            "cross",
            "Returns the cross product of two 3D vectors.",
            float3,
            vec![param("x", float3), param("y", float3)],
        );

        for &s in ALL {
            for r in dims.clone() {
                for c in dims.clone() {
                    let m = self.numeric(s, Shape::Matrix(r, c));
                    let ret = self.numeric(s, Shape::Matrix(c, r));
                    self.add_function("transpose", "Transposes the specified matrix.", ret, vec![param("x", m)]);
                }
            }
        }

        for &s in FLOATS {
            for n in dims.clone() {
                let m = self.numeric(s, Shape::Matrix(n, n));
                let ret = self.scalar(s);
                self.add_function(
                    "determinant",
                    "Returns the determinant of the specified floating-point, square matrix.",
                    ret,
                    vec![param("m", m)],
                );
            }
        }
    }

    fn add_attributes(&mut self) {
        for &(name, doc, params) in ATTRIBUTES {
            let parameters = params
                .iter()
                .map(|param| {
                    let (param, has_default) = match param.strip_suffix('?') {
                        Some(p) => (p, true),
                        None => (*param, false),
                    };
                    let (ty, name) = param.split_once(' ').unwrap_or((param, param));
                    ParameterInfo {
                        name: SmolStr::new(name),
                        ty: self.type_by_name(ty).unwrap_or(self.error),
                        direction: ParameterDirection::In,
                        has_default,
                    }
                })
                .collect();
            let id = self.push(name, SymbolKind::Attribute(AttributeSymbol { parameters }), None, doc);
            self.attributes.insert(SmolStr::new(name.to_ascii_lowercase()), id);
        }
    }

    fn add_semantics(&mut self) {
        for &(name, doc, is_indexed) in SEMANTICS {
            let is_system_value = name.starts_with("SV_");
            let kind = SymbolKind::Semantic(SemanticSymbol {
                is_system_value,
                is_indexed,
            });
            let id = self.push(name, kind, None, doc);
            self.semantics.insert(SmolStr::new(name.to_ascii_uppercase()), id);
        }
    }
}

/// `out T s` into (direction, type word, name).
fn parse_param(param: &str) -> (ParameterDirection, &str, &str) {
    let mut words = param.split_whitespace();
    let mut first = words.next().unwrap_or_default();
    let direction = match first {
        "out" => ParameterDirection::Out,
        "inout" => ParameterDirection::InOut,
        _ => ParameterDirection::In,
    };
    if direction != ParameterDirection::In {
        first = words.next().unwrap_or_default();
    }
    (direction, first, words.next().unwrap_or_default())
}

// ============================================================================
// OBJECT METHODS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodType {
    /// The template argument
    Element,
    /// Four components of the element's scalar type, as `Gather` returns
    ElementVector4,
    Numeric(ScalarType, Shape),
    Void,
    Object(ObjectKind),
}

#[derive(Debug, Clone)]
pub(crate) struct MethodSpec {
    pub name: &'static str,
    pub doc: &'static str,
    pub ret: MethodType,
    pub params: Vec<(&'static str, ParameterDirection, MethodType)>,
}

fn float_n(n: u8) -> MethodType {
    MethodType::Numeric(ScalarType::Float, if n == 1 { Shape::Scalar } else { Shape::Vector(n) })
}

fn int_n(n: u8) -> MethodType {
    MethodType::Numeric(ScalarType::Int, if n == 1 { Shape::Scalar } else { Shape::Vector(n) })
}

const UINT: MethodType = MethodType::Numeric(ScalarType::Uint, Shape::Scalar);
const FLOAT: MethodType = MethodType::Numeric(ScalarType::Float, Shape::Scalar);
const INT: MethodType = MethodType::Numeric(ScalarType::Int, Shape::Scalar);
const SAMPLER: MethodType = MethodType::Object(ObjectKind::SamplerState);
const COMPARISON_SAMPLER: MethodType = MethodType::Object(ObjectKind::SamplerComparisonState);

fn method(
    name: &'static str,
    doc: &'static str,
    ret: MethodType,
    params: Vec<(&'static str, ParameterDirection, MethodType)>,
) -> MethodSpec {
    MethodSpec { name, doc, ret, params }
}

fn input(name: &'static str, ty: MethodType) -> (&'static str, ParameterDirection, MethodType) {
    (name, ParameterDirection::In, ty)
}

fn output(name: &'static str, ty: MethodType) -> (&'static str, ParameterDirection, MethodType) {
    (name, ParameterDirection::Out, ty)
}

/// Method signatures of an object type, independent of its element type.
pub(crate) fn object_methods(kind: ObjectKind) -> Vec<MethodSpec> {
    use ObjectKind as K;
    let mut methods = Vec::new();

    if let Some(dim) = kind.texture_dimension() {
        let array = u8::from(kind.is_texture_array());
        let coords = dim + array;
        let dims_names: Vec<&'static str> = {
            let mut names = vec!["width"];
            if dim >= 2 || kind.is_cube() {
                names.push("height");
            }
            if kind == K::Texture3D || kind == K::RWTexture3D {
                names.push("depth");
            }
            if kind.is_texture_array() {
                names.push("elements");
            }
            if kind.is_multisampled() {
                names.push("numberOfSamples");
            }
            names
        };
        methods.push(method(
            "GetDimensions",
            "Returns the dimensions of the texture.",
            MethodType::Void,
            dims_names.iter().map(|&n| output(n, UINT)).collect(),
        ));

        if kind.is_read_write() {
            methods.push(method(
                "Load",
                "Reads texture data.",
                MethodType::Element,
                vec![input("location", int_n(coords))],
            ));
            return methods;
        }

        if kind.is_multisampled() {
            methods.push(method(
                "Load",
                "Reads a single sample of texture data.",
                MethodType::Element,
                vec![input("location", int_n(coords)), input("sampleIndex", INT)],
            ));
            return methods;
        }

        let mut with_mip = vec![input("mipLevel", UINT)];
        with_mip.extend(dims_names.iter().map(|&n| output(n, UINT)));
        with_mip.push(output("numberOfLevels", UINT));
        methods.push(method(
            "GetDimensions",
            "Returns the dimensions of a mipmap level and the number of levels.",
            MethodType::Void,
            with_mip,
        ));

        let location = float_n(coords);
        let offset = (!kind.is_cube()).then(|| int_n(dim));

        methods.push(method(
            "Sample",
            "Samples a texture.",
            MethodType::Element,
            vec![input("s", SAMPLER), input("location", location)],
        ));
        if let Some(offset) = offset {
            methods.push(method(
                "Sample",
                "Samples a texture with a texel offset.",
                MethodType::Element,
                vec![input("s", SAMPLER), input("location", location), input("offset", offset)],
            ));
        }
        methods.push(method(
            "SampleBias",
            "Samples a texture after applying a bias to the mipmap level.",
            MethodType::Element,
            vec![input("s", SAMPLER), input("location", location), input("bias", FLOAT)],
        ));
        methods.push(method(
            "SampleLevel",
            "Samples a texture on the specified mipmap level.",
            MethodType::Element,
            vec![input("s", SAMPLER), input("location", location), input("lod", FLOAT)],
        ));
        methods.push(method(
            "SampleGrad",
            "Samples a texture using a gradient to influence the sample location.",
            MethodType::Element,
            vec![
                input("s", SAMPLER),
                input("location", location),
                input("ddx", float_n(dim)),
                input("ddy", float_n(dim)),
            ],
        ));
        methods.push(method(
            "SampleCmp",
            "Samples a texture and compares a single component against the specified comparison value.",
            FLOAT,
            vec![input("s", COMPARISON_SAMPLER), input("location", location), input("compareValue", FLOAT)],
        ));
        methods.push(method(
            "SampleCmpLevelZero",
            "Samples a texture on mipmap level 0 only and compares the result to a comparison value.",
            FLOAT,
            vec![input("s", COMPARISON_SAMPLER), input("location", location), input("compareValue", FLOAT)],
        ));
        methods.push(method(
            "CalculateLevelOfDetail",
            "Calculates the level of detail.",
            FLOAT,
            vec![input("s", SAMPLER), input("location", location)],
        ));
        if dim == 2 || kind.is_cube() {
            methods.push(method(
                "Gather",
                "Gets the four samples that would be used for bilinear interpolation when sampling a texture.",
                MethodType::ElementVector4,
                vec![input("s", SAMPLER), input("location", location)],
            ));
        }
        if !kind.is_cube() {
            methods.push(method(
                "Load",
                "Reads texel data without any filtering or sampling.",
                MethodType::Element,
                vec![input("location", int_n(coords + 1))],
            ));
        }
        return methods;
    }

    match kind {
        K::Buffer | K::RWBuffer => {
            methods.push(method(
                "GetDimensions",
                "Gets the resource dimensions.",
                MethodType::Void,
                vec![output("dim", UINT)],
            ));
            methods.push(method(
                "Load",
                "Reads buffer data.",
                MethodType::Element,
                vec![input("location", INT)],
            ));
        }
        K::StructuredBuffer | K::RWStructuredBuffer | K::AppendStructuredBuffer | K::ConsumeStructuredBuffer => {
            methods.push(method(
                "GetDimensions",
                "Gets the resource dimensions.",
                MethodType::Void,
                vec![output("numStructs", UINT), output("stride", UINT)],
            ));
            match kind {
                K::StructuredBuffer | K::RWStructuredBuffer => methods.push(method(
                    "Load",
                    "Reads buffer data.",
                    MethodType::Element,
                    vec![input("location", INT)],
                )),
                K::AppendStructuredBuffer => methods.push(method(
                    "Append",
                    "Appends a value to the end of the buffer.",
                    MethodType::Void,
                    vec![input("value", MethodType::Element)],
                )),
                _ => methods.push(method(
                    "Consume",
                    "Removes a value from the end of the buffer.",
                    MethodType::Element,
                    Vec::new(),
                )),
            }
            if kind == K::RWStructuredBuffer {
                methods.push(method(
                    "IncrementCounter",
                    "Increments the object's hidden counter.",
                    UINT,
                    Vec::new(),
                ));
                methods.push(method(
                    "DecrementCounter",
                    "Decrements the object's hidden counter.",
                    UINT,
                    Vec::new(),
                ));
            }
        }
        K::ByteAddressBuffer | K::RWByteAddressBuffer => {
            methods.push(method(
                "GetDimensions",
                "Gets the length of the buffer in bytes.",
                MethodType::Void,
                vec![output("dim", UINT)],
            ));
            let loads = [
                ("Load", "Gets one value from the buffer.", 1),
                ("Load2", "Gets two values from the buffer.", 2),
                ("Load3", "Gets three values from the buffer.", 3),
                ("Load4", "Gets four values from the buffer.", 4),
            ];
            for (name, doc, n) in loads {
                let ret = MethodType::Numeric(ScalarType::Uint, if n == 1 { Shape::Scalar } else { Shape::Vector(n) });
                methods.push(method(name, doc, ret, vec![input("address", UINT)]));
            }
            if kind == K::RWByteAddressBuffer {
                let stores = [
                    ("Store", "Stores one value.", 1),
                    ("Store2", "Stores two values.", 2),
                    ("Store3", "Stores three values.", 3),
                    ("Store4", "Stores four values.", 4),
                ];
                for (name, doc, n) in stores {
                    let value =
                        MethodType::Numeric(ScalarType::Uint, if n == 1 { Shape::Scalar } else { Shape::Vector(n) });
                    methods.push(method(
                        name,
                        doc,
                        MethodType::Void,
                        vec![input("address", UINT), input("value", value)],
                    ));
                }
                methods.push(method(
                    "InterlockedAdd",
                    "Adds the value, atomically.",
                    MethodType::Void,
                    vec![input("dest", UINT), input("value", UINT), output("original", UINT)],
                ));
            }
        }
        K::PointStream | K::LineStream | K::TriangleStream => {
            methods.push(method(
                "Append",
                "Appends output data to an existing stream.",
                MethodType::Void,
                vec![input("vertex", MethodType::Element)],
            ));
            methods.push(method(
                "RestartStrip",
                "Ends the current primitive strip and starts a new strip.",
                MethodType::Void,
                Vec::new(),
            ));
        }
        _ => {}
    }
    methods
}

fn object_doc(kind: ObjectKind) -> &'static str {
    use ObjectKind as K;
    match kind {
        K::SamplerState | K::LegacySampler(_) => "Sampler state used by texture sampling methods.",
        K::SamplerComparisonState => "Sampler state that performs a comparison when sampling.",
        K::Buffer | K::RWBuffer => "A buffer of typed elements.",
        K::ByteAddressBuffer | K::RWByteAddressBuffer => "A buffer addressed in bytes.",
        K::StructuredBuffer | K::RWStructuredBuffer => "A buffer of structures.",
        K::AppendStructuredBuffer => "An output buffer that values are appended to.",
        K::ConsumeStructuredBuffer => "An input buffer that values are consumed from.",
        K::InputPatch => "An array of control points for the hull shader.",
        K::OutputPatch => "An array of output control points.",
        K::PointStream | K::LineStream | K::TriangleStream => "A stream of geometry shader output primitives.",
        _ => "A texture resource.",
    }
}

// ============================================================================
// FUNCTIONS
// ============================================================================

/// Shapes a generic function pattern is instantiated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shapes {
    /// No type pattern: one overload
    Fixed,
    Scalar,
    Vector,
    ScalarVector,
    All,
}

impl Shapes {
    fn iter(self) -> Box<dyn Iterator<Item = Shape>> {
        match self {
            Self::Fixed | Self::Scalar => Box::new(std::iter::once(Shape::Scalar)),
            Self::Vector => Box::new((1..=4).map(Shape::Vector)),
            Self::ScalarVector => Box::new(Shape::all().take(5)),
            Self::All => Box::new(Shape::all()),
        }
    }
}

/// A generic intrinsic. In `ret` and `params`, `T` is the instantiated type,
/// `S` its scalar, and `B`/`I`/`U`/`F` the same shape over bool, int, uint
/// and float. Any other word names a concrete type.
struct FunctionSpec {
    name: &'static str,
    doc: &'static str,
    scalars: &'static [ScalarType],
    shapes: Shapes,
    ret: &'static str,
    params: &'static [&'static str],
}

const fn f(
    name: &'static str,
    scalars: &'static [ScalarType],
    shapes: Shapes,
    ret: &'static str,
    params: &'static [&'static str],
    doc: &'static str,
) -> FunctionSpec {
    FunctionSpec {
        name,
        doc,
        scalars,
        shapes,
        ret,
        params,
    }
}

use Shapes::{All as A, Fixed, Scalar as Sc, ScalarVector as SV, Vector as V};

#[rustfmt::skip]
static FUNCTIONS: &[FunctionSpec] = &[
    f("abs", NUMERIC, A, "T", &["T x"], "Returns the absolute value of the specified value."),
    f("acos", FLOATS, A, "T", &["T x"], "Returns the arccosine of the specified value."),
    f("all", ALL, A, "bool", &["T x"], "Determines if all components of the specified value are non-zero."),
    f("any", ALL, A, "bool", &["T x"], "Determines if any components of the specified value are non-zero."),
    f("asfloat", &[ScalarType::Int, ScalarType::Uint, ScalarType::Float], A, "F", &["T x"], "Interprets the bit pattern of x as a floating-point number."),
    f("asin", FLOATS, A, "T", &["T x"], "Returns the arcsine of the specified value."),
    f("asint", &[ScalarType::Uint, ScalarType::Float, ScalarType::Int], A, "I", &["T x"], "Interprets the bit pattern of x as an integer."),
    f("asuint", &[ScalarType::Int, ScalarType::Float, ScalarType::Uint], A, "U", &["T x"], "Interprets the bit pattern of x as an unsigned integer."),
    f("atan", FLOATS, A, "T", &["T x"], "Returns the arctangent of the specified value."),
    f("atan2", FLOATS, A, "T", &["T y", "T x"], "Returns the arctangent of two values (x,y)."),
    f("ceil", FLOATS, A, "T", &["T x"], "Returns the smallest integer value that is greater than or equal to the specified value."),
    f("clamp", NUMERIC, A, "T", &["T x", "T min", "T max"], "Clamps the specified value to the specified minimum and maximum range."),
    f("clip", FLOATS, A, "void", &["T x"], "Discards the current pixel if the specified value is less than zero."),
    f("cos", FLOATS, A, "T", &["T x"], "Returns the cosine of the specified value."),
    f("cosh", FLOATS, A, "T", &["T x"], "Returns the hyperbolic cosine of the specified value."),
    f("countbits", &[ScalarType::Uint], SV, "T", &["T value"], "Counts the number of bits (per component) in the input integer."),
    f("ddx", FLOATS, A, "T", &["T x"], "Returns the partial derivative of the specified value with respect to the screen-space x-coordinate."),
    f("ddx_coarse", &[ScalarType::Float], SV, "T", &["T x"], "Computes a low precision partial derivative with respect to the screen-space x-coordinate."),
    f("ddx_fine", &[ScalarType::Float], SV, "T", &["T x"], "Computes a high precision partial derivative with respect to the screen-space x-coordinate."),
    f("ddy", FLOATS, A, "T", &["T x"], "Returns the partial derivative of the specified value with respect to the screen-space y-coordinate."),
    f("ddy_coarse", &[ScalarType::Float], SV, "T", &["T x"], "Computes a low precision partial derivative with respect to the screen-space y-coordinate."),
    f("ddy_fine", &[ScalarType::Float], SV, "T", &["T x"], "Computes a high precision partial derivative with respect to the screen-space y-coordinate."),
    f("degrees", FLOATS, A, "T", &["T x"], "Converts the specified value from radians to degrees."),
    f("distance", FLOATS, V, "S", &["T x", "T y"], "Returns a distance scalar between two vectors."),
    f("exp", FLOATS, A, "T", &["T x"], "Returns the base-e exponential, or e^x, of the specified value."),
    f("exp2", FLOATS, A, "T", &["T x"], "Returns the base 2 exponential, or 2^x, of the specified value."),
    f("f16tof32", &[ScalarType::Uint], SV, "F", &["T value"], "Converts the float16 stored in the low-half of the uint to a float."),
    f("f32tof16", &[ScalarType::Float], SV, "U", &["T value"], "Converts an input into a float16 type."),
    f("faceforward", FLOATS, V, "T", &["T n", "T i", "T ng"], "Flips the surface-normal (if needed) to face in a direction opposite to i."),
    f("firstbithigh", INTS, SV, "T", &["T value"], "Gets the location of the first set bit starting from the highest order bit and working downward, per component."),
    f("firstbitlow", INTS, SV, "T", &["T value"], "Returns the location of the first set bit starting from the lowest order bit and working upward, per component."),
    f("floor", FLOATS, A, "T", &["T x"], "Returns the largest integer that is less than or equal to the specified value."),
    f("fmod", FLOATS, A, "T", &["T x", "T y"], "Returns the floating-point remainder of x/y."),
    f("frac", FLOATS, A, "T", &["T x"], "Returns the fractional (or decimal) part of x; which is greater than or equal to 0 and less than 1."),
    f("frexp", FLOATS, A, "T", &["T x", "out T exp"], "Returns the mantissa and exponent of the specified floating-point value."),
    f("fwidth", FLOATS, A, "T", &["T x"], "Returns the absolute value of the partial derivatives of the specified value."),
    f("isfinite", FLOATS, A, "B", &["T x"], "Determines if the specified floating-point value is finite."),
    f("isinf", FLOATS, A, "B", &["T x"], "Determines if the specified value is infinite."),
    f("isnan", FLOATS, A, "B", &["T x"], "Determines if the specified value is NAN or QNAN."),
    f("ldexp", FLOATS, A, "T", &["T x", "T exp"], "Returns the result of multiplying the specified value by two, raised to the power of the specified exponent."),
    f("length", FLOATS, V, "S", &["T x"], "Returns the length of the specified floating-point vector."),
    f("lerp", FLOATS, A, "T", &["T x", "T y", "T s"], "Performs a linear interpolation."),
    f("log", FLOATS, A, "T", &["T x"], "Returns the base-e logarithm of the specified value."),
    f("log10", FLOATS, A, "T", &["T x"], "Returns the base-10 logarithm of the specified value."),
    f("log2", FLOATS, A, "T", &["T x"], "Returns the base-2 logarithm of the specified value."),
    f("mad", NUMERIC, A, "T", &["T m", "T a", "T b"], "Performs an arithmetic multiply/add operation on three values."),
    f("max", NUMERIC, A, "T", &["T x", "T y"], "Selects the greater of x and y."),
    f("min", NUMERIC, A, "T", &["T x", "T y"], "Selects the lesser of x and y."),
    f("modf", FLOATS, A, "T", &["T x", "out T ip"], "Splits the value x into fractional and integer parts, each of which has the same sign as x."),
    f("normalize", FLOATS, V, "T", &["T x"], "Normalizes the specified floating-point vector according to x / length(x)."),
    f("pow", FLOATS, A, "T", &["T x", "T y"], "Returns the specified value raised to the specified power."),
    f("radians", FLOATS, A, "T", &["T x"], "Converts the specified value from degrees to radians."),
    f("rcp", FLOATS, A, "T", &["T x"], "Calculates a fast, approximate, per-component reciprocal."),
    f("reflect", FLOATS, V, "T", &["T i", "T n"], "Returns a reflection vector using an incident ray and a surface normal."),
    f("refract", FLOATS, V, "T", &["T i", "T n", "S eta"], "Returns a refraction vector using an entering ray, a surface normal, and a refraction index."),
    f("reversebits", &[ScalarType::Uint], SV, "T", &["T value"], "Reverses the order of the bits, per component."),
    f("round", FLOATS, A, "T", &["T x"], "Rounds the specified value to the nearest integer."),
    f("rsqrt", FLOATS, A, "T", &["T x"], "Returns the reciprocal of the square root of the specified value."),
    f("saturate", FLOATS, A, "T", &["T x"], "Clamps the specified value within the range of 0 to 1."),
    f("sign", NUMERIC, A, "I", &["T x"], "Returns an integer that indicates the sign of a value."),
    f("sin", FLOATS, A, "T", &["T x"], "Returns the sine of the specified value."),
    f("sincos", FLOATS, A, "void", &["T x", "out T s", "out T c"], "Returns the sine and cosine of x."),
    f("sinh", FLOATS, A, "T", &["T x"], "Returns the hyperbolic sine of the specified value."),
    f("smoothstep", FLOATS, A, "T", &["T min", "T max", "T x"], "Returns a smooth Hermite interpolation between 0 and 1, if x is in the range [min, max]."),
    f("sqrt", FLOATS, A, "T", &["T x"], "Returns the square root of the specified floating-point value, per component."),
    f("step", FLOATS, A, "T", &["T y", "T x"], "Compares two values, returning 0 or 1 based on which value is greater."),
    f("tan", FLOATS, A, "T", &["T x"], "Returns the tangent of the specified value."),
    f("tanh", FLOATS, A, "T", &["T x"], "Returns the hyperbolic tangent of the specified value."),
    f("trunc", FLOATS, A, "T", &["T x"], "Truncates a floating-point value to the integer component."),
    f("EvaluateAttributeAtCentroid", &[ScalarType::Float], SV, "T", &["T value"], "Evaluates at the pixel centroid."),
    f("EvaluateAttributeAtSample", &[ScalarType::Float], SV, "T", &["T value", "uint index"], "Evaluates at the indexed sample location."),
    f("InterlockedAdd", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic add of value to the dest resource variable."),
    f("InterlockedAdd", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic add of value to the dest resource variable."),
    f("InterlockedAnd", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic and."),
    f("InterlockedAnd", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic and."),
    f("InterlockedCompareExchange", INTS, Sc, "void", &["inout T dest", "T compare", "T value", "out T original"], "Atomically compares the destination with the comparison value. If they are identical, the destination is overwritten with the input value. The original value is set to the destination's original value."),
    f("InterlockedCompareStore", INTS, Sc, "void", &["inout T dest", "T compare", "T value"], "Atomically compares the destination to the comparison value. If they are identical, the destination is overwritten with the input value."),
    f("InterlockedExchange", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Assigns value to dest and returns the original value."),
    f("InterlockedMax", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic max."),
    f("InterlockedMax", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic max."),
    f("InterlockedMin", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic min."),
    f("InterlockedMin", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic min."),
    f("InterlockedOr", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic or."),
    f("InterlockedOr", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic or."),
    f("InterlockedXor", INTS, Sc, "void", &["inout T dest", "T value"], "Performs a guaranteed atomic xor."),
    f("InterlockedXor", INTS, Sc, "void", &["inout T dest", "T value", "out T original"], "Performs a guaranteed atomic xor."),
    f("WaveActiveSum", NUMERIC, SV, "T", &["T value"], "Returns the sum of all the values across all active lanes in the wave."),
    f("WaveActiveMax", NUMERIC, SV, "T", &["T value"], "Returns the maximum value across all active lanes in the wave."),
    f("WaveActiveMin", NUMERIC, SV, "T", &["T value"], "Returns the minimum value across all active lanes in the wave."),
    f("WaveReadLaneFirst", NUMERIC, SV, "T", &["T value"], "Returns the value of the expression for the active lane of the current wave with the smallest index."),
    f("AllMemoryBarrier", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all memory accesses have been completed."),
    f("AllMemoryBarrierWithGroupSync", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all memory accesses have been completed and all threads in the group have reached this call."),
    f("DeviceMemoryBarrier", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all device memory accesses have been completed."),
    f("DeviceMemoryBarrierWithGroupSync", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all device memory accesses have been completed and all threads in the group have reached this call."),
    f("GroupMemoryBarrier", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all group shared accesses have been completed."),
    f("GroupMemoryBarrierWithGroupSync", &[], Fixed, "void", &[], "Blocks execution of all threads in a group until all group shared accesses have been completed and all threads in the group have reached this call."),
    f("GetRenderTargetSampleCount", &[], Fixed, "uint", &[], "Gets the number of samples for a render target."),
    f("WaveGetLaneCount", &[], Fixed, "uint", &[], "Returns the number of lanes in a wave on this architecture."),
    f("WaveGetLaneIndex", &[], Fixed, "uint", &[], "Returns the index of the current lane within the current wave."),
    f("WaveIsFirstLane", &[], Fixed, "bool", &[], "Returns true only for the active lane in the current wave with the smallest index."),
    f("WaveActiveAllTrue", &[], Fixed, "bool", &["bool value"], "Returns true if the expression is true in all active lanes in the current wave."),
    f("WaveActiveAnyTrue", &[], Fixed, "bool", &["bool value"], "Returns true if the expression is true in any of the active lanes in the current wave."),
    f("D3DCOLORtoUBYTE4", &[], Fixed, "int4", &["float4 x"], "Converts a floating-point, 4D vector set by a D3DCOLOR to a UBYTE4."),
    f("dst", &[], Fixed, "float4", &["float4 x", "float4 y"], "Calculates a distance vector."),
    f("lit", &[], Fixed, "float4", &["float n_dot_l", "float n_dot_h", "float m"], "Returns a lighting coefficient vector."),
    f("msad4", &[], Fixed, "uint4", &["uint reference", "uint2 source", "uint4 accum"], "Compares a 4-byte reference value and an 8-byte source value and accumulates a vector of 4 sums."),
    f("noise", &[], Fixed, "float", &["float x"], "Generates a random value using the Perlin-noise algorithm."),
    f("tex1D", &[], Fixed, "float4", &["sampler1D s", "float t"], "Samples a 1D texture."),
    f("tex1Dlod", &[], Fixed, "float4", &["sampler1D s", "float4 t"], "Samples a 1D texture with mipmaps."),
    f("tex2D", &[], Fixed, "float4", &["sampler2D s", "float2 t"], "Samples a 2D texture."),
    f("tex2D", &[], Fixed, "float4", &["sampler2D s", "float2 t", "float2 ddx", "float2 ddy"], "Samples a 2D texture using a gradient to select the mip level."),
    f("tex2Dbias", &[], Fixed, "float4", &["sampler2D s", "float4 t"], "Samples a 2D texture after biasing the mip level by t.w."),
    f("tex2Dgrad", &[], Fixed, "float4", &["sampler2D s", "float2 t", "float2 ddx", "float2 ddy"], "Samples a 2D texture using a gradient to select the mip level."),
    f("tex2Dlod", &[], Fixed, "float4", &["sampler2D s", "float4 t"], "Samples a 2D texture with mipmaps."),
    f("tex2Dproj", &[], Fixed, "float4", &["sampler2D s", "float4 t"], "Samples a 2D texture using a projective divide."),
    f("tex3D", &[], Fixed, "float4", &["sampler3D s", "float3 t"], "Samples a 3D texture."),
    f("tex3Dlod", &[], Fixed, "float4", &["sampler3D s", "float4 t"], "Samples a 3D texture with mipmaps."),
    f("texCUBE", &[], Fixed, "float4", &["samplerCUBE s", "float3 t"], "Samples a cube texture."),
    f("texCUBElod", &[], Fixed, "float4", &["samplerCUBE s", "float4 t"], "Samples a cube texture with mipmaps."),
];

// ============================================================================
// ATTRIBUTES AND SEMANTICS
// ============================================================================

/// Parameters are `type name`; a trailing `?` marks an optional one.
#[rustfmt::skip]
static ATTRIBUTES: &[(&str, &str, &[&str])] = &[
    ("numthreads", "Defines the number of threads to be executed in a single thread group when a compute shader is dispatched.", &["uint x", "uint y", "uint z"]),
    ("unroll", "Unroll the loop until it stops executing.", &["uint count?"]),
    ("loop", "Generate code that uses flow control to execute each iteration of the loop.", &[]),
    ("fastopt", "Reduces the compile time but produces less aggressive optimizations.", &[]),
    ("allow_uav_condition", "Allows a compute shader loop termination condition to be based off of a UAV read.", &[]),
    ("branch", "Evaluate only one side of the if statement depending on the given condition.", &[]),
    ("flatten", "Evaluate both sides of the if statement and choose between the two resulting values.", &[]),
    ("forcecase", "Force a switch statement in the hardware.", &[]),
    ("call", "The bodies of the individual cases in the switch will be moved into hardware subroutines.", &[]),
    ("earlydepthstencil", "Forces depth-stencil testing before a shader executes.", &[]),
    ("domain", "Defines the patch type used in the hull shader.", &["string type"]),
    ("partitioning", "Defines the tessellation scheme to be used in the hull shader.", &["string scheme"]),
    ("outputtopology", "Defines the output primitive type for the tessellator.", &["string topology"]),
    ("outputcontrolpoints", "Defines the number of output control points that will be created.", &["uint count"]),
    ("patchconstantfunc", "Defines the function for computing patch constant data.", &["string name"]),
    ("maxtessfactor", "Indicates the maximum value that the hull shader would return for any tessellation factor.", &["float factor"]),
    ("maxvertexcount", "Declares the maximum number of vertices to create.", &["uint count"]),
    ("instance", "Instances a geometry shader.", &["uint count"]),
];

/// `(name, documentation, accepts an index suffix)`
#[rustfmt::skip]
static SEMANTICS: &[(&str, &str, bool)] = &[
    ("SV_ClipDistance", "Clip distance data.", true),
    ("SV_Coverage", "The coverage mask of the pixel.", false),
    ("SV_CullDistance", "Cull distance data.", true),
    ("SV_Depth", "Depth buffer data.", false),
    ("SV_DepthGreaterEqual", "Depth that is greater than or equal to the rasterized depth.", false),
    ("SV_DepthLessEqual", "Depth that is less than or equal to the rasterized depth.", false),
    ("SV_DispatchThreadID", "Indices for which combined thread and thread group a compute shader is executing in.", false),
    ("SV_DomainLocation", "Location of the point on the patch being evaluated.", false),
    ("SV_GroupID", "Indices for which thread group a compute shader is executing in.", false),
    ("SV_GroupIndex", "The flattened index of a compute shader thread within a thread group.", false),
    ("SV_GroupThreadID", "Indices for which an individual thread within a thread group a compute shader is executing in.", false),
    ("SV_GSInstanceID", "Geometry shader instance id.", false),
    ("SV_InsideTessFactor", "How much to tessellate within a patch surface.", false),
    ("SV_InstanceID", "Per-instance identifier automatically generated by the runtime.", false),
    ("SV_IsFrontFace", "Whether a triangle is front facing.", false),
    ("SV_OutputControlPointID", "Index of the control point being operated on by the hull shader.", false),
    ("SV_Position", "The position of the vertex in homogeneous space.", false),
    ("SV_PrimitiveID", "Per-primitive identifier automatically generated by the runtime.", false),
    ("SV_RenderTargetArrayIndex", "Render-target array index.", false),
    ("SV_SampleIndex", "Sample frequency index data.", false),
    ("SV_StencilRef", "The stencil reference value for the pixel.", false),
    ("SV_Target", "The output value stored in a render target.", true),
    ("SV_TessFactor", "How much to tessellate the edges of a patch.", false),
    ("SV_VertexID", "Per-vertex identifier automatically generated by the runtime.", false),
    ("SV_ViewportArrayIndex", "Viewport array index.", false),
    ("BINORMAL", "Binormal.", true),
    ("BLENDINDICES", "Blend indices.", true),
    ("BLENDWEIGHT", "Blend weights.", true),
    ("COLOR", "Diffuse or specular color.", true),
    ("DEPTH", "Output depth.", true),
    ("FOG", "Vertex fog.", false),
    ("NORMAL", "Normal vector.", true),
    ("POSITION", "Vertex position in object space.", true),
    ("POSITIONT", "Transformed vertex position.", false),
    ("PSIZE", "Point size.", true),
    ("TANGENT", "Tangent.", true),
    ("TESSFACTOR", "Tessellation factor.", true),
    ("TEXCOORD", "Texture coordinates.", true),
    ("VFACE", "Floating-point scalar that indicates a back-facing primitive.", false),
    ("VPOS", "The pixel location (x,y) in screen space.", false),
];
