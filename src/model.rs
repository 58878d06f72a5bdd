//! Unified documentation model handed to rendering.
//!
//! The model is read-only once built. Member entries keep the data of their
//! shape together with the prose resolved for their identifier; inherited
//! members point at their declaring type by reference only.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::canonical::DocId;
use crate::universe::{Deprecation, ShapeKind, TypeRef};

/// Closed classification of a documented type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Enum,
    Class,
    Struct,
}

impl TypeKind {
    /// Single dispatch from the surface kind. Interfaces and unknown kinds
    /// have no documented form and return `None`.
    pub fn classify(kind: ShapeKind) -> Option<TypeKind> {
        match kind {
            ShapeKind::Enum => Some(TypeKind::Enum),
            ShapeKind::Class | ShapeKind::Delegate => Some(TypeKind::Class),
            ShapeKind::Struct => Some(TypeKind::Struct),
            ShapeKind::Interface | ShapeKind::Unknown => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Class => write!(f, "class"),
            TypeKind::Struct => write!(f, "struct"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub is_abstract: bool,
    pub is_sealed: bool,
}

impl Modifiers {
    pub fn is_static(&self) -> bool {
        self.is_abstract && self.is_sealed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParamDoc {
    pub name: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueDoc {
    pub id: DocId,
    pub name: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDoc {
    pub name: String,
    pub param_type: TypeRef,
    pub is_out: bool,
    pub is_optional: bool,
    pub default_value: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDoc {
    pub id: DocId,
    pub name: String,
    pub return_type: TypeRef,
    pub summary: Option<String>,
    pub returns: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
    /// Declaring type when the method is inherited
    pub inherited_from: Option<TypeRef>,
    pub parameters: Vec<ParameterDoc>,
    pub type_parameters: Vec<TypeParamDoc>,
    pub obsolete: Option<Deprecation>,
}

impl MethodDoc {
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDoc {
    pub id: DocId,
    pub name: String,
    pub field_type: TypeRef,
    pub summary: Option<String>,
    pub is_static: bool,
    pub inherited_from: Option<TypeRef>,
    pub obsolete: Option<Deprecation>,
}

impl FieldDoc {
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDoc {
    pub id: DocId,
    pub name: String,
    pub property_type: TypeRef,
    pub summary: Option<String>,
    pub can_read: bool,
    pub can_write: bool,
    pub is_static: bool,
    pub inherited_from: Option<TypeRef>,
    pub obsolete: Option<Deprecation>,
}

impl PropertyDoc {
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorDoc {
    pub id: DocId,
    pub summary: Option<String>,
    pub parameters: Vec<ParameterDoc>,
    pub obsolete: Option<Deprecation>,
}

/// Members of a class or struct, each in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Members {
    pub methods: Vec<MethodDoc>,
    pub fields: Vec<FieldDoc>,
    pub properties: Vec<PropertyDoc>,
    pub constructors: Vec<ConstructorDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "body", rename_all = "lowercase")]
pub enum TypeBody {
    Enum { values: Vec<EnumValueDoc> },
    Composite(Members),
}

/// One documented type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeNode {
    pub id: DocId,
    pub name: String,
    pub namespace: Option<String>,
    /// Reference other signatures use to point at this type
    pub type_ref: TypeRef,
    pub kind: TypeKind,
    pub summary: Option<String>,
    pub obsolete: Option<Deprecation>,
    pub modifiers: Modifiers,
    pub base_type: Option<TypeRef>,
    pub type_parameters: Vec<TypeParamDoc>,
    pub body: TypeBody,
}

impl TypeNode {
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    pub fn members(&self) -> Option<&Members> {
        match &self.body {
            TypeBody::Composite(members) => Some(members),
            TypeBody::Enum { .. } => None,
        }
    }

    pub fn enum_values(&self) -> Option<&[EnumValueDoc]> {
        match &self.body {
            TypeBody::Enum { values } => Some(values),
            TypeBody::Composite(_) => None,
        }
    }
}

/// Every documented type of one binary, in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct DocModel {
    assembly: String,
    types: Vec<TypeNode>,
    #[serde(skip)]
    index: HashMap<TypeRef, usize>,
}

impl DocModel {
    pub fn new(assembly: impl Into<String>, types: Vec<TypeNode>) -> Self {
        let mut index = HashMap::with_capacity(types.len());
        for (position, node) in types.iter().enumerate() {
            index.entry(node.type_ref.clone()).or_insert(position);
        }
        Self {
            assembly: assembly.into(),
            types,
            index,
        }
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    pub fn types(&self) -> &[TypeNode] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Cross-reference predicate: true iff this exact type is a node of the model.
    pub fn is_documented(&self, type_ref: &TypeRef) -> bool {
        self.index.contains_key(type_ref)
    }

    pub fn find(&self, type_ref: &TypeRef) -> Option<&TypeNode> {
        self.index.get(type_ref).map(|&position| &self.types[position])
    }
}

impl PartialEq for DocModel {
    fn eq(&self, other: &Self) -> bool {
        self.assembly == other.assembly && self.types == other.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::identifier::type_id;
    use crate::universe::{Generics, TypeName};

    fn node(name: &str, type_ref: TypeRef) -> TypeNode {
        TypeNode {
            id: type_id(&TypeName::new(Some("Acme"), name)),
            name: name.to_string(),
            namespace: Some("Acme".to_string()),
            type_ref,
            kind: TypeKind::Class,
            summary: None,
            obsolete: None,
            modifiers: Modifiers::default(),
            base_type: None,
            type_parameters: Vec::new(),
            body: TypeBody::Composite(Members::default()),
        }
    }

    #[test]
    fn test_classify_is_exhaustive() {
        assert_eq!(TypeKind::classify(ShapeKind::Enum), Some(TypeKind::Enum));
        assert_eq!(TypeKind::classify(ShapeKind::Class), Some(TypeKind::Class));
        assert_eq!(TypeKind::classify(ShapeKind::Delegate), Some(TypeKind::Class));
        assert_eq!(TypeKind::classify(ShapeKind::Struct), Some(TypeKind::Struct));
        assert_eq!(TypeKind::classify(ShapeKind::Interface), None);
        assert_eq!(TypeKind::classify(ShapeKind::Unknown), None);
    }

    #[test]
    fn test_cross_reference_predicate() {
        let widget = TypeRef::named("Acme", "Widget");
        let boxed = TypeRef::Named {
            name: TypeName::new(Some("Acme"), "Box`1"),
            generics: Generics::Open(vec!["T".to_string()]),
        };
        let model = DocModel::new(
            "Acme.dll",
            vec![node("Widget", widget.clone()), node("Box`1", boxed.clone())],
        );

        assert!(model.is_documented(&widget));
        assert!(model.is_documented(&boxed));
        assert_eq!(model.find(&widget).map(|n| n.name.as_str()), Some("Widget"));

        // constructed instances and arrays are different types
        let closed = TypeRef::Named {
            name: TypeName::new(Some("Acme"), "Box`1"),
            generics: Generics::Closed(vec![TypeRef::named("System", "Int32")]),
        };
        assert!(!model.is_documented(&closed));
        assert!(!model.is_documented(&TypeRef::array_of(widget)));
        assert!(!model.is_documented(&TypeRef::named("System", "Object")));
    }

    #[test]
    fn test_modifiers() {
        let modifiers = Modifiers {
            is_abstract: true,
            is_sealed: true,
        };
        assert!(modifiers.is_static());
        assert!(!Modifiers::default().is_static());
    }
}
