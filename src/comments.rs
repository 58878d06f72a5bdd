//! Documentation comment store.
//!
//! Parses the XML documentation file a compiler emits next to the binary:
//!
//! ```xml
//! <doc>
//!   <members>
//!     <member name="M:Acme.Widget.Compute(System.Int32)">
//!       <summary>Computes a value.</summary>
//!       <param name="x">The input.</param>
//!       <returns>The result.</returns>
//!     </member>
//!   </members>
//! </doc>
//! ```
//!
//! Lookups are plain key lookups; a miss is the normal state of an
//! undocumented member, not an error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::error::{BuildError, BuildWarning, Result, WarningKind};

lazy_static! {
    /// Type arity (`` `1 ``) or method arity (``` ``1 ```) in a cref
    static ref CREF_ARITY: Regex = Regex::new(r"`{1,2}\d+").unwrap();
}

/// Resolved prose for one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    pub summary: Option<String>,
    pub returns: Option<String>,
    /// Parameter name to prose, in document order
    pub params: IndexMap<String, String>,
    /// Type parameter name to prose, in document order
    pub type_params: IndexMap<String, String>,
}

impl DocEntry {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn type_param(&self, name: &str) -> Option<&str> {
        self.type_params.get(name).map(String::as_str)
    }
}

/// Lookup table from canonical identifier to [`DocEntry`].
#[derive(Debug, Default)]
pub struct DocumentationStore {
    entries: HashMap<String, DocEntry>,
    warnings: Vec<BuildWarning>,
}

impl DocumentationStore {
    /// Parse a whole documentation file. Malformed XML aborts with
    /// [`BuildError::MalformedComments`]; a file without `<members>` is empty.
    pub fn parse(xml: &str) -> Result<Self> {
        let document =
            Document::parse(xml).map_err(|e| BuildError::MalformedComments(e.to_string()))?;

        let mut store = Self::default();

        let Some(members) = document
            .descendants()
            .find(|node| node.has_tag_name("members"))
        else {
            debug!("Documentation file has no <members> element");
            return Ok(store);
        };

        for member in members.children().filter(Node::is_element) {
            let Some(name) = member.attribute("name") else {
                continue;
            };

            let entry = parse_member(member);
            if store.entries.insert(name.to_string(), entry).is_some() {
                let warning = BuildWarning::new(
                    WarningKind::DuplicateDocumentation,
                    name,
                    "documented more than once, keeping the last block",
                );
                warn!("{}", warning);
                store.warnings.push(warning);
            }
        }

        debug!("Parsed {} documentation entries", store.entries.len());
        Ok(store)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Entry for `id`, or `None` when the identifier is undocumented.
    pub fn lookup(&self, id: &str) -> Option<&DocEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics collected while parsing.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

fn parse_member(member: Node<'_, '_>) -> DocEntry {
    let mut entry = DocEntry {
        summary: first_text(member, "summary"),
        returns: first_text(member, "returns"),
        ..Default::default()
    };

    for node in member.descendants().filter(Node::is_element) {
        let target = match node.tag_name().name() {
            "param" => &mut entry.params,
            "typeparam" => &mut entry.type_params,
            _ => continue,
        };
        if let Some(name) = node.attribute("name") {
            // Later blocks with the same name replace earlier ones.
            target.insert(name.to_string(), inner_text(node).trim().to_string());
        }
    }

    entry
}

fn first_text(member: Node<'_, '_>, tag: &str) -> Option<String> {
    member
        .descendants()
        .find(|node| node.has_tag_name(tag))
        .map(|node| inner_text(node).trim().to_string())
}

/// Text content of an element with inline references replaced by names.
fn inner_text(node: Node<'_, '_>) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or(""));
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let has_content = child
            .children()
            .any(|c| !c.is_text() || c.text().is_some_and(|t| !t.trim().is_empty()));
        match child.tag_name().name() {
            "see" | "seealso" if !has_content => {
                if let Some(cref) = child.attribute("cref") {
                    out.push_str(&cref_label(cref));
                } else if let Some(word) = child.attribute("langword") {
                    out.push_str(word);
                }
            }
            "paramref" | "typeparamref" => {
                if let Some(name) = child.attribute("name") {
                    out.push_str(name);
                }
            }
            _ => collect_text(child, out),
        }
    }
}

/// Short label for a `cref` such as `M:Acme.Widget.Compute(System.Int32)` -> `Compute`.
fn cref_label(cref: &str) -> String {
    let without_kind = match cref.split_once(':') {
        Some((kind, rest)) if kind.len() == 1 => rest,
        _ => cref,
    };
    let without_params = without_kind
        .split_once('(')
        .map(|(head, _)| head)
        .unwrap_or(without_kind);
    let last = without_params.rsplit('.').next().unwrap_or(without_params);
    CREF_ARITY.replace_all(last, "").into_owned()
}
