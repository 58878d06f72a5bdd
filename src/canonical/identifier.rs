//! Canonical documentation identifiers.
//!
//! ```text
//! T:Acme.Widget
//! M:Acme.Widget.Compute(System.Int32)
//! M:Acme.Widget.#ctor
//! P:Acme.Widget.Name
//! F:Acme.Color.Red
//! ```
//!
//! Every function here is pure: equal inputs always give equal identifiers.

use std::fmt;

use serde::Serialize;

use super::{identifier_type_name, qualified_name};
use crate::universe::{TypeName, TypeRef};

/// A canonical identifier used as documentation lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The kind letter before the colon (`T`, `M`, `P`, `F`).
    pub fn kind_letter(&self) -> Option<char> {
        self.0.chars().next()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn parameter_list(parameters: &[TypeRef]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let signatures: Vec<String> = parameters.iter().map(qualified_name).collect();
    format!("({})", signatures.join(","))
}

pub fn type_id(name: &TypeName) -> DocId {
    DocId(format!("T:{}", identifier_type_name(name)))
}

pub fn method_id(declaring: &TypeName, method: &str, parameters: &[TypeRef]) -> DocId {
    DocId(format!(
        "M:{}.{}{}",
        identifier_type_name(declaring),
        method,
        parameter_list(parameters)
    ))
}

pub fn constructor_id(declaring: &TypeName, parameters: &[TypeRef]) -> DocId {
    method_id(declaring, "#ctor", parameters)
}

pub fn property_id(declaring: &TypeName, property: &str) -> DocId {
    DocId(format!("P:{}.{}", identifier_type_name(declaring), property))
}

pub fn field_id(declaring: &TypeName, field: &str) -> DocId {
    DocId(format!("F:{}.{}", identifier_type_name(declaring), field))
}

/// Enum values are documented as fields of the enum.
pub fn enum_value_id(enum_type: &TypeName, value: &str) -> DocId {
    field_id(enum_type, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::Generics;

    fn widget() -> TypeName {
        TypeName::new(Some("Acme"), "Widget")
    }

    #[test]
    fn test_type_id() {
        assert_eq!(type_id(&widget()).as_str(), "T:Acme.Widget");
        let inner = widget().nested("Part");
        assert_eq!(type_id(&inner).as_str(), "T:Acme.Widget.Part");
        // definitions keep their arity suffix
        let boxed = TypeName::new(Some("Acme"), "Box`1");
        assert_eq!(type_id(&boxed).as_str(), "T:Acme.Box`1");
    }

    #[test]
    fn test_method_id() {
        let id = method_id(&widget(), "Compute", &[TypeRef::named("System", "Int32")]);
        assert_eq!(id.as_str(), "M:Acme.Widget.Compute(System.Int32)");
        assert_eq!(id.kind_letter(), Some('M'));

        let no_params = method_id(&widget(), "Reset", &[]);
        assert_eq!(no_params.as_str(), "M:Acme.Widget.Reset");
    }

    #[test]
    fn test_method_id_with_generic_and_out_parameters() {
        let list = TypeRef::Named {
            name: TypeName::new(Some("System.Collections.Generic"), "List`1"),
            generics: Generics::Closed(vec![TypeRef::named("System", "String")]),
        };
        let out_int = TypeRef::by_ref(TypeRef::named("System", "Int32"));
        let id = method_id(&widget(), "TryRead", &[list, out_int]);
        assert_eq!(
            id.as_str(),
            "M:Acme.Widget.TryRead(System.Collections.Generic.List{System.String},System.Int32@)"
        );
    }

    #[test]
    fn test_constructor_id() {
        assert_eq!(constructor_id(&widget(), &[]).as_str(), "M:Acme.Widget.#ctor");
        let id = constructor_id(&widget(), &[TypeRef::array_of(TypeRef::named("System", "Byte"))]);
        assert_eq!(id.as_str(), "M:Acme.Widget.#ctor(System.Byte[])");
    }

    #[test]
    fn test_member_ids() {
        assert_eq!(property_id(&widget(), "Name").as_str(), "P:Acme.Widget.Name");
        assert_eq!(field_id(&widget(), "Count").as_str(), "F:Acme.Widget.Count");
        let color = TypeName::new(Some("Acme"), "Color");
        assert_eq!(enum_value_id(&color, "Red").as_str(), "F:Acme.Color.Red");
    }
}
