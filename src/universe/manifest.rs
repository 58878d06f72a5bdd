//! Surface manifest: a serialized dump of a binary's exported types.
//!
//! The manifest is the bridge between whatever tool reads the foreign binary
//! format and this crate. JSON and YAML are both accepted; the format is picked
//! from the file extension, falling back to trying JSON then YAML.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};
use crate::universe::{TypeShape, TypeUniverse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceManifest {
    /// File name of the binary, e.g. `Acme.Core.dll`
    pub assembly: String,
    #[serde(default)]
    pub types: Vec<TypeShape>,
}

impl SurfaceManifest {
    pub fn new(assembly: impl Into<String>, types: Vec<TypeShape>) -> Self {
        Self {
            assembly: assembly.into(),
            types,
        }
    }

    /// Load a manifest from disk. Any failure here means no model can be built.
    pub fn from_path(path: &Path) -> Result<Self> {
        let unresolvable = |reason: String| BuildError::UnresolvableSurface {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| unresolvable(e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let manifest = match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content).or_else(|_| Self::from_yaml_str(&content)),
        }
        .map_err(unresolvable)?;

        debug!(
            "Loaded surface manifest for {} ({} types) from {}",
            manifest.assembly,
            manifest.types.len(),
            path.display()
        );

        Ok(manifest)
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

impl TypeUniverse for SurfaceManifest {
    fn assembly_name(&self) -> &str {
        &self.assembly
    }

    fn exported_types(&self) -> &[TypeShape] {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::{Generics, MemberKind, ShapeKind, TypeRef};
    use std::io::Write;

    const YAML_MANIFEST: &str = r#"
assembly: Acme.Core.dll
types:
  - name: Widget
    namespace: Acme
    kind: class
    members:
      - kind: method
        name: Compute
        type: System.Int32
        parameters:
          - name: x
            type: System.Int32
      - kind: property
        name: Items
        type: System.Collections.Generic.List`1<Acme.Widget>
        can_read: true
  - name: Color
    namespace: Acme
    kind: enum
    enum_values: [Red, Green]
"#;

    #[test]
    fn test_yaml_manifest() {
        let manifest = SurfaceManifest::from_yaml_str(YAML_MANIFEST).unwrap();
        assert_eq!(manifest.assembly_name(), "Acme.Core.dll");
        assert_eq!(manifest.exported_types().len(), 2);

        let widget = &manifest.types[0];
        assert_eq!(widget.kind, ShapeKind::Class);
        assert_eq!(widget.members[0].kind, MemberKind::Method);
        assert_eq!(
            widget.members[0].parameters[0].param_type,
            TypeRef::named("System", "Int32")
        );
        match widget.members[1].member_type.as_ref().unwrap() {
            TypeRef::Named {
                generics: Generics::Closed(args),
                ..
            } => assert_eq!(args[0], TypeRef::named("Acme", "Widget")),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(manifest.types[1].enum_values, vec!["Red", "Green"]);
    }

    #[test]
    fn test_json_manifest_from_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"assembly": "Acme.dll", "types": [{{"name": "Point", "namespace": "Acme", "kind": "struct"}}]}}"#
        )
        .unwrap();

        let manifest = SurfaceManifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.types[0].kind, ShapeKind::Struct);
    }

    #[test]
    fn test_bad_signature_is_unresolvable() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "assembly: Acme.dll\ntypes:\n  - name: W\n    kind: class\n    base_type: \"Acme.Base<\"\n"
        )
        .unwrap();

        let err = SurfaceManifest::from_path(file.path()).unwrap_err();
        assert!(matches!(err, BuildError::UnresolvableSurface { .. }));
    }

    #[test]
    fn test_missing_file_is_unresolvable() {
        let err = SurfaceManifest::from_path(Path::new("/nonexistent/surface.json")).unwrap_err();
        assert!(matches!(err, BuildError::UnresolvableSurface { .. }));
    }
}
