//! Reflection notation for type references.
//!
//! ```text
//! Acme.Widget                      named type
//! Acme.Outer+Inner                 nested type
//! Acme.Box`1<System.Int32>         constructed generic
//! Acme.Box`1<!T>                   open generic definition
//! !T                               generic parameter
//! System.Int32[]  System.Int32[,]  arrays
//! System.Int32&                    by-reference
//! ```
//!
//! A `<...>` list whose entries are all bare `!name` parameters is read as an
//! open definition; any other list is a constructed type.

use crate::error::{BuildError, Result};
use crate::universe::{Generics, TypeName, TypeRef};

/// Parse a full signature. Trailing input is an error.
pub fn parse(signature: &str) -> Result<TypeRef> {
    let mut parser = SignatureParser::new(signature);
    let parsed = parser.parse_type()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(parsed)
}

/// Render a type reference back into reflection notation.
pub fn format(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Named { name, generics } => {
            let mut out = name.full_name();
            // An empty argument list has no bracket form.
            if generics.is_empty() {
                return out;
            }
            match generics {
                Generics::None => {}
                Generics::Open(params) => {
                    let params: Vec<String> = params.iter().map(|p| format!("!{}", p)).collect();
                    out.push_str(&format!("<{}>", params.join(",")));
                }
                Generics::Closed(args) => {
                    let args: Vec<String> = args.iter().map(format).collect();
                    out.push_str(&format!("<{}>", args.join(",")));
                }
            }
            out
        }
        TypeRef::Parameter(name) => format!("!{}", name),
        TypeRef::Array { element, rank } => {
            format!("{}[{}]", format(element), ",".repeat(rank.saturating_sub(1)))
        }
        TypeRef::ByRef(element) => format!("{}&", format(element)),
    }
}

struct SignatureParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> SignatureParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: &str) -> BuildError {
        BuildError::InvalidSignature {
            signature: self.input.to_string(),
            reason: format!("{} at position {}", reason, self.pos),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        self.skip_whitespace();
        let base = if self.eat('!') {
            TypeRef::Parameter(self.identifier()?)
        } else {
            let name = self.qualified_name()?;
            let generics = if self.eat('<') {
                self.generic_list()?
            } else {
                Generics::None
            };
            TypeRef::Named { name, generics }
        };
        self.suffixes(base)
    }

    fn identifier(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '`' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn qualified_name(&mut self) -> Result<TypeName> {
        let mut dotted = vec![self.identifier()?];
        while self.eat('.') {
            dotted.push(self.identifier()?);
        }
        let mut nested = Vec::new();
        while self.eat('+') {
            nested.push(self.identifier()?);
        }

        // The last dotted segment is the outermost type, the rest is the namespace.
        let outermost = dotted.pop().unwrap_or_default();
        let namespace = if dotted.is_empty() {
            None
        } else {
            Some(dotted.join("."))
        };

        let mut name = TypeName {
            namespace,
            enclosing: Vec::new(),
            name: outermost,
        };
        for inner in nested {
            name = name.nested(inner);
        }
        Ok(name)
    }

    fn generic_list(&mut self) -> Result<Generics> {
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            if self.eat('>') {
                break;
            }
            return Err(self.error("unterminated argument list"));
        }

        let all_parameters = args.iter().all(|a| matches!(a, TypeRef::Parameter(_)));
        if all_parameters {
            let params = args
                .into_iter()
                .filter_map(|a| match a {
                    TypeRef::Parameter(name) => Some(name),
                    _ => None,
                })
                .collect();
            Ok(Generics::Open(params))
        } else {
            Ok(Generics::Closed(args))
        }
    }

    fn suffixes(&mut self, mut current: TypeRef) -> Result<TypeRef> {
        loop {
            if self.eat('[') {
                let mut rank = 1;
                while self.eat(',') {
                    rank += 1;
                }
                if !self.eat(']') {
                    return Err(self.error("unterminated array rank"));
                }
                current = TypeRef::Array {
                    element: Box::new(current),
                    rank,
                };
            } else if self.eat('&') {
                current = TypeRef::ByRef(Box::new(current));
            } else {
                return Ok(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_name() {
        let parsed = parse("System.Int32").unwrap();
        assert_eq!(parsed, TypeRef::named("System", "Int32"));
    }

    #[test]
    fn test_parse_nested_name() {
        let parsed = parse("Acme.Net.Outer+Inner").unwrap();
        let name = parsed.type_name().unwrap();
        assert_eq!(name.namespace.as_deref(), Some("Acme.Net"));
        assert_eq!(name.enclosing, vec!["Outer".to_string()]);
        assert_eq!(name.name, "Inner");
    }

    #[test]
    fn test_parse_closed_generic() {
        let parsed =
            parse("System.Collections.Generic.Dictionary`2<System.String, System.Int32[]>").unwrap();
        match parsed {
            TypeRef::Named {
                generics: Generics::Closed(args),
                ..
            } => {
                assert_eq!(args.len(), 2);
                assert_eq!(args[1], TypeRef::array_of(TypeRef::named("System", "Int32")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_open_generic() {
        let parsed = parse("Acme.Pair`2<!TKey,!TValue>").unwrap();
        match parsed {
            TypeRef::Named {
                generics: Generics::Open(params),
                ..
            } => assert_eq!(params, vec!["TKey".to_string(), "TValue".to_string()]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_mixed_arguments_is_closed() {
        let parsed = parse("Acme.Pair`2<!T,System.Int32>").unwrap();
        assert!(matches!(
            parsed,
            TypeRef::Named {
                generics: Generics::Closed(_),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_suffixes() {
        let parsed = parse("System.Int32[,]&").unwrap();
        match parsed {
            TypeRef::ByRef(inner) => match *inner {
                TypeRef::Array { rank, .. } => assert_eq!(rank, 2),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("Acme.List`1<System.Int32").is_err());
        assert!(parse("Acme.Widget junk").is_err());
        assert!(parse("System.Int32[").is_err());
    }

    #[test]
    fn test_format_matches_input() {
        for signature in [
            "Acme.Outer+Inner",
            "Acme.Box`1<!T>",
            "System.Collections.Generic.List`1<System.Int32>[]",
            "System.Int32&",
            "!T",
        ] {
            assert_eq!(format(&parse(signature).unwrap()), signature);
        }
    }

    #[test]
    fn test_format_empty_generics_without_brackets() {
        for generics in [Generics::Open(Vec::new()), Generics::Closed(Vec::new())] {
            let bare = TypeRef::Named {
                name: TypeName::new(Some("Acme"), "Box`1"),
                generics,
            };
            let formatted = format(&bare);
            assert_eq!(formatted, "Acme.Box`1");

            let reparsed = parse(&formatted).unwrap();
            assert_eq!(format(&reparsed), formatted);
        }
    }
}
