//! refdoc
//!
//! Builds API reference documentation for a compiled binary by joining its
//! exported type surface with the XML documentation comments emitted by the
//! compiler, then renders one Markdown page per type plus a navigation manifest.

pub mod builder;
pub mod canonical;
pub mod comments;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod renderer;
pub mod site;
pub mod universe;

pub use builder::{BuildOutput, BuildStats, ModelBuilder};
pub use canonical::{Canonicalizer, DocId};
pub use comments::{DocEntry, DocumentationStore};
pub use crate::config::BuildConfig;
pub use error::{BuildError, BuildWarning, Result, WarningKind};
pub use model::{DocModel, TypeKind, TypeNode};
pub use navigation::{NavSection, NavigationBuilder};
pub use renderer::{PageRenderer, RenderedPage};
pub use site::{SiteStats, SiteWriter};
pub use universe::{SurfaceManifest, TypeRef, TypeShape, TypeUniverse};
