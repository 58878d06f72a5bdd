//! Exported type surface of a compiled assembly.
//!
//! This module defines the read-only input the model builder consumes:
//! - [`TypeUniverse`], the injectable capability that enumerates exported types
//! - [`TypeShape`] / [`MemberShape`], plain descriptions of types and members
//! - [`TypeRef`], a reference to a type as it appears in a signature
//!
//! Shapes are never mutated once loaded. Anything able to enumerate a binary's
//! public surface can implement [`TypeUniverse`]; [`manifest::SurfaceManifest`]
//! reads a JSON or YAML dump of it.
pub mod manifest;
pub mod signature;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use manifest::SurfaceManifest;

/// Capability interface over a loaded binary's public surface.
pub trait TypeUniverse {
    /// Label of the binary, e.g. `Acme.Core.dll`
    fn assembly_name(&self) -> &str;

    /// Exported types in the binary's own enumeration order
    fn exported_types(&self) -> &[TypeShape];
}

/// Qualified name of a type definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Declaring namespace, absent for the global namespace
    pub namespace: Option<String>,
    /// Enclosing types for nested types, outermost first
    pub enclosing: Vec<String>,
    /// Simple name, including any arity suffix such as `` `1 ``
    pub name: String,
}

impl TypeName {
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            enclosing: Vec::new(),
            name: name.into(),
        }
    }

    /// Name of a type nested inside `self`.
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut enclosing = self.enclosing.clone();
        enclosing.push(self.name.clone());
        Self {
            namespace: self.namespace.clone(),
            enclosing,
            name: name.into(),
        }
    }

    /// Reflection full name, with `+` between nested types (`Acme.Outer+Inner`).
    pub fn full_name(&self) -> String {
        let mut full = String::new();
        if let Some(ns) = &self.namespace {
            full.push_str(ns);
            full.push('.');
        }
        for outer in &self.enclosing {
            full.push_str(outer);
            full.push('+');
        }
        full.push_str(&self.name);
        full
    }
}

/// Generic part of a named type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Generics {
    #[default]
    None,
    /// Open definition carrying its type parameter names
    Open(Vec<String>),
    /// Constructed type carrying its type arguments
    Closed(Vec<TypeRef>),
}

impl Generics {
    pub fn is_empty(&self) -> bool {
        match self {
            Generics::None => true,
            Generics::Open(params) => params.is_empty(),
            Generics::Closed(args) => args.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Generics::None => 0,
            Generics::Open(params) => params.len(),
            Generics::Closed(args) => args.len(),
        }
    }
}

/// A reference to a type as it appears in a member signature.
///
/// Serialized in reflection notation, see [`signature`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Named { name: TypeName, generics: Generics },
    /// Generic type parameter such as `T`
    Parameter(String),
    Array { element: Box<TypeRef>, rank: usize },
    /// `ref` / `out` parameter type
    ByRef(Box<TypeRef>),
}

impl TypeRef {
    /// Non-generic named type.
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeRef::Named {
            name: TypeName::new(Some(namespace), name),
            generics: Generics::None,
        }
    }

    pub fn void() -> Self {
        Self::named("System", "Void")
    }

    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn by_ref(element: TypeRef) -> Self {
        TypeRef::ByRef(Box::new(element))
    }

    /// Parse reflection notation, e.g. ``System.Collections.Generic.List`1<System.Int32>``.
    pub fn parse(signature: &str) -> crate::error::Result<Self> {
        signature::parse(signature)
    }

    /// Definition name when this is a named type.
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self,
            TypeRef::Named { name, generics: Generics::None }
                if name.namespace.as_deref() == Some("System") && name.name == "Void" && name.enclosing.is_empty()
        )
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&signature::format(self))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = crate::error::BuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        signature::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        signature::format(&value)
    }
}

/// Kind of an exported type as reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Class,
    Struct,
    Enum,
    Interface,
    Delegate,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Class => write!(f, "class"),
            ShapeKind::Struct => write!(f, "struct"),
            ShapeKind::Enum => write!(f, "enum"),
            ShapeKind::Interface => write!(f, "interface"),
            ShapeKind::Delegate => write!(f, "delegate"),
            ShapeKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Deprecation metadata read from the binary's own attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub message: Option<String>,
}

impl Deprecation {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// One exported type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeShape {
    /// Simple name including the arity suffix for generic definitions
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Enclosing types of a nested type, outermost first
    #[serde(default)]
    pub enclosing: Vec<String>,
    pub kind: ShapeKind,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    #[serde(default)]
    pub obsolete: Option<Deprecation>,
    /// Public members in enumeration order, inherited ones included
    #[serde(default)]
    pub members: Vec<MemberShape>,
    /// Named values of an enum
    #[serde(default)]
    pub enum_values: Vec<String>,
}

impl TypeShape {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            enclosing: Vec::new(),
            kind,
            generic_parameters: Vec::new(),
            is_abstract: false,
            is_sealed: false,
            base_type: None,
            obsolete: None,
            members: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    pub fn type_name(&self) -> TypeName {
        TypeName {
            namespace: self.namespace.clone().filter(|ns| !ns.is_empty()),
            enclosing: self.enclosing.clone(),
            name: self.name.clone(),
        }
    }

    /// The reference other signatures use to point at this type.
    pub fn self_ref(&self) -> TypeRef {
        let generics = if self.generic_parameters.is_empty() {
            Generics::None
        } else {
            Generics::Open(self.generic_parameters.clone())
        };
        TypeRef::Named {
            name: self.type_name(),
            generics,
        }
    }

    pub fn arity(&self) -> usize {
        self.generic_parameters.len()
    }

    /// Static classes are emitted as abstract and sealed.
    pub fn is_static(&self) -> bool {
        self.is_abstract && self.is_sealed
    }
}

/// Kind of a member as reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Field,
    Property,
    Constructor,
    Event,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Field => write!(f, "field"),
            MemberKind::Property => write!(f, "property"),
            MemberKind::Constructor => write!(f, "constructor"),
            MemberKind::Event => write!(f, "event"),
            MemberKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// One parameter of a method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterShape {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeRef,
    #[serde(default)]
    pub is_out: bool,
    #[serde(default)]
    pub is_optional: bool,
    /// Default value as source text
    #[serde(default)]
    pub default_value: Option<String>,
}

impl ParameterShape {
    pub fn new(name: impl Into<String>, param_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            param_type,
            is_out: false,
            is_optional: false,
            default_value: None,
        }
    }
}

/// One public member of a class or struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberShape {
    pub kind: MemberKind,
    /// Absent for constructors
    #[serde(default)]
    pub name: Option<String>,
    /// Return, field or property type
    #[serde(default, rename = "type")]
    pub member_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<ParameterShape>,
    /// Type parameters of a generic method
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    /// Compiler-synthesized accessor or operator
    #[serde(default)]
    pub special_name: bool,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_write: bool,
    /// Type that declares the member; absent means the owning type
    #[serde(default)]
    pub declaring_type: Option<TypeRef>,
    #[serde(default)]
    pub obsolete: Option<Deprecation>,
}

impl MemberShape {
    fn bare(kind: MemberKind, name: Option<String>, member_type: Option<TypeRef>) -> Self {
        Self {
            kind,
            name,
            member_type,
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            is_static: false,
            is_abstract: false,
            special_name: false,
            can_read: false,
            can_write: false,
            declaring_type: None,
            obsolete: None,
        }
    }

    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self::bare(MemberKind::Method, Some(name.into()), Some(return_type))
    }

    pub fn field(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self::bare(MemberKind::Field, Some(name.into()), Some(field_type))
    }

    pub fn property(name: impl Into<String>, property_type: TypeRef) -> Self {
        let mut shape = Self::bare(MemberKind::Property, Some(name.into()), Some(property_type));
        shape.can_read = true;
        shape
    }

    pub fn constructor() -> Self {
        Self::bare(MemberKind::Constructor, None, None)
    }

    pub fn with_parameter(mut self, parameter: ParameterShape) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn declared_by(mut self, declaring_type: TypeRef) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }
}
