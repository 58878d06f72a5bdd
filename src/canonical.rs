//! Type name canonicalization.
//!
//! Three renderings of a [`TypeRef`] are produced here:
//! - a short display name (`List<int>`), optionally markup-escaped
//! - the qualified "printable" name used inside documentation identifiers
//!   (`System.Collections.Generic.List{System.Int32}`)
//! - a URL slug derived from the display name (`list%3Cint%3E`)
//!
//! Identifier synthesis built on top of these lives in [`identifier`].
pub mod identifier;

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::universe::{Generics, TypeName, TypeRef};

pub use identifier::DocId;

lazy_static! {
    /// CLR arity suffix such as `` `1 `` or `` `12 ``
    static ref ARITY_SUFFIX: Regex = Regex::new(r"`\d+").unwrap();
}

/// Built-in types that always render as their language keyword.
const PRIMITIVE_TOKENS: &[(&str, &str)] = &[
    ("System.UInt64", "ulong"),
    ("System.UInt32", "uint"),
    ("System.UInt16", "ushort"),
    ("System.Byte", "byte"),
    ("System.Int64", "long"),
    ("System.Int32", "int"),
    ("System.Int16", "short"),
    ("System.SByte", "sbyte"),
    ("System.Boolean", "bool"),
    ("System.String", "string"),
    ("System.Void", "void"),
    ("System.Object", "object"),
    ("System.Single", "float"),
    ("System.Double", "double"),
    ("System.UInt64[]", "ulong[]"),
    ("System.UInt32[]", "uint[]"),
    ("System.UInt16[]", "ushort[]"),
    ("System.Byte[]", "byte[]"),
    ("System.Int64[]", "long[]"),
    ("System.Int32[]", "int[]"),
    ("System.Int16[]", "short[]"),
    ("System.SByte[]", "sbyte[]"),
    ("System.Double[]", "double[]"),
    ("System.Single[]", "float[]"),
    ("System.String[]", "string[]"),
    ("System.Object[]", "object[]"),
];

/// Override table for primitive types and their one-dimensional arrays.
#[derive(Debug, Clone)]
pub struct PrimitiveTable {
    tokens: HashMap<&'static str, &'static str>,
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimitiveTable {
    pub fn new() -> Self {
        Self {
            tokens: PRIMITIVE_TOKENS.iter().copied().collect(),
        }
    }

    /// Keyword for `type_ref` if it is one of the overridden shapes.
    pub fn lookup(&self, type_ref: &TypeRef) -> Option<&'static str> {
        let key = match type_ref {
            TypeRef::Named {
                name,
                generics: Generics::None,
            } => name.full_name(),
            TypeRef::Array { element, rank: 1 } => match element.as_ref() {
                TypeRef::Named {
                    name,
                    generics: Generics::None,
                } => format!("{}[]", name.full_name()),
                _ => return None,
            },
            _ => return None,
        };
        self.tokens.get(key.as_str()).copied()
    }
}

/// Strip every arity suffix from a name (`` Dictionary`2 `` -> `Dictionary`).
pub fn strip_arity(name: &str) -> String {
    ARITY_SUFFIX.replace_all(name, "").into_owned()
}

/// Full name of a type definition as used in identifiers: nested separators
/// become `.` and reference markers become `@`. Arity suffixes are kept.
pub fn identifier_type_name(name: &TypeName) -> String {
    name.full_name().replace('+', ".").replace('&', "@")
}

/// Qualified signature of a type reference for identifier construction.
///
/// Constructed and open generics render as `Open{Arg1,Arg2}` with the arity
/// suffix removed; arrays append `[]` and by-reference types append `@`.
pub fn qualified_name(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Named { name, generics } => {
            let args: Vec<String> = match generics {
                Generics::None => Vec::new(),
                Generics::Open(params) => params.clone(),
                Generics::Closed(args) => args.iter().map(qualified_name).collect(),
            };
            if args.is_empty() {
                identifier_type_name(name)
            } else {
                format!(
                    "{}{{{}}}",
                    strip_arity(&identifier_type_name(name)),
                    args.join(",")
                )
            }
        }
        TypeRef::Parameter(name) => name.clone(),
        TypeRef::Array { element, rank } => format!(
            "{}[{}]",
            qualified_name(element),
            ",".repeat(rank.saturating_sub(1))
        ),
        TypeRef::ByRef(element) => format!("{}@", qualified_name(element)),
    }
}

/// Convert PascalCase to lowercase kebab-case.
///
/// An uppercase letter not preceded by another uppercase letter opens a new
/// segment, except at the first and last position. Runs of capitals stay joined.
pub fn pascal_to_kebab(pascal: &str) -> String {
    let chars: Vec<char> = pascal.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut kebab = String::with_capacity(pascal.len() + 4);
    let mut was_last_upper = false;

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if !was_last_upper && i != 0 && i != last {
                kebab.push('-');
            }
            kebab.extend(c.to_lowercase());
            was_last_upper = true;
        } else {
            kebab.push(*c);
            was_last_upper = false;
        }
    }

    kebab
}

fn percent_encode_brackets(text: &str) -> String {
    text.replace('<', "%3C").replace('>', "%3E")
}

/// Produces display names, slugs and page names. Built once per run.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    primitives: PrimitiveTable,
    api_base_url: String,
    page_extension: String,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self {
            primitives: PrimitiveTable::new(),
            api_base_url: "/api/".to_string(),
            page_extension: "md".to_string(),
        }
    }

    /// Base URL of the reference pages; a trailing `/` is added when missing.
    pub fn with_api_base_url(mut self, base: &str) -> Self {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.api_base_url = base;
        self
    }

    pub fn with_page_extension(mut self, extension: &str) -> Self {
        self.page_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Short name for display. `for_markup` escapes the angle brackets.
    pub fn display_name(&self, type_ref: &TypeRef, for_markup: bool) -> String {
        if let Some(token) = self.primitives.lookup(type_ref) {
            return token.to_string();
        }

        match type_ref {
            TypeRef::Named { name, generics } => {
                let base = strip_arity(&name.name);
                let args: Vec<String> = match generics {
                    Generics::None => Vec::new(),
                    Generics::Open(params) => params.clone(),
                    Generics::Closed(args) => args
                        .iter()
                        .map(|arg| self.display_name(arg, for_markup))
                        .collect(),
                };
                if args.is_empty() {
                    return base;
                }
                let (open, close) = if for_markup {
                    ("&lt;", "&gt;")
                } else {
                    ("<", ">")
                };
                format!("{}{}{}{}", base, open, args.join(","), close).replace(' ', "")
            }
            TypeRef::Parameter(name) => name.clone(),
            TypeRef::Array { element, rank } => format!(
                "{}[{}]",
                self.display_name(element, for_markup),
                ",".repeat(rank.saturating_sub(1))
            ),
            TypeRef::ByRef(element) => self.display_name(element, for_markup),
        }
    }

    /// Qualified identifier signature, see [`qualified_name`].
    pub fn qualified_name(&self, type_ref: &TypeRef) -> String {
        qualified_name(type_ref)
    }

    /// Lowercase hyphenated slug with percent-encoded angle brackets.
    pub fn url_slug(&self, type_ref: &TypeRef) -> String {
        percent_encode_brackets(&pascal_to_kebab(&self.display_name(type_ref, false)))
    }

    /// Identifier-safe slug used by the navigation manifest.
    pub fn relative_name(&self, type_ref: &TypeRef) -> String {
        self.url_slug(type_ref).replace(' ', "")
    }

    /// Permalink of a type's reference page.
    pub fn api_url(&self, type_ref: &TypeRef) -> String {
        format!("{}{}/", self.api_base_url, self.url_slug(type_ref))
    }

    /// File name of a type's reference page.
    pub fn page_file_name(&self, type_ref: &TypeRef) -> String {
        let stem = self
            .display_name(type_ref, false)
            .replace(['<', '>'], "_");
        format!("{}.{}", stem, self.page_extension)
    }
}
