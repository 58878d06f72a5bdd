use log::{debug, info, warn};
use rayon::prelude::*;

use crate::canonical::identifier;
use crate::comments::{DocEntry, DocumentationStore};
use crate::error::{BuildWarning, WarningKind};
use crate::model::{
    ConstructorDoc, DocModel, EnumValueDoc, FieldDoc, Members, MethodDoc, Modifiers,
    ParameterDoc, PropertyDoc, TypeBody, TypeKind, TypeNode, TypeParamDoc,
};
use crate::universe::{
    MemberKind, MemberShape, ParameterShape, TypeName, TypeRef, TypeShape, TypeUniverse,
};

/// Result of one model build: the model plus every skipped-input diagnostic.
#[derive(Debug)]
pub struct BuildOutput {
    pub model: DocModel,
    pub warnings: Vec<BuildWarning>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildStats {
    pub types_documented: usize,
    pub types_skipped: usize,
    pub members_documented: usize,
    pub members_undocumented: usize,
}

/// Per-type result, merged in enumeration order after the (possibly parallel) pass.
struct TypeOutcome {
    node: Option<TypeNode>,
    warnings: Vec<BuildWarning>,
}

/// Builds the unified model from a type universe and the comment store.
pub struct ModelBuilder<'a> {
    store: &'a DocumentationStore,
    parallel: bool,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(store: &'a DocumentationStore) -> Self {
        Self {
            store,
            parallel: false,
        }
    }

    /// Build types on the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(&self, universe: &dyn TypeUniverse) -> BuildOutput {
        let shapes = universe.exported_types();
        info!(
            "Building documentation model for {} ({} exported types)",
            universe.assembly_name(),
            shapes.len()
        );

        let outcomes: Vec<TypeOutcome> = if self.parallel {
            shapes.par_iter().map(|shape| self.build_type(shape)).collect()
        } else {
            shapes.iter().map(|shape| self.build_type(shape)).collect()
        };

        let mut types = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for outcome in outcomes {
            for warning in &outcome.warnings {
                warn!("{}", warning);
            }
            warnings.extend(outcome.warnings);
            types.extend(outcome.node);
        }

        let model = DocModel::new(universe.assembly_name(), types);
        let stats = Self::stats(&model, &warnings);
        info!(
            "Documented {} types ({} skipped), {} of {} members have prose",
            stats.types_documented,
            stats.types_skipped,
            stats.members_documented,
            stats.members_documented + stats.members_undocumented
        );

        BuildOutput { model, warnings }
    }

    /// Counts for reporting.
    pub fn stats(model: &DocModel, warnings: &[BuildWarning]) -> BuildStats {
        let mut stats = BuildStats {
            types_documented: model.len(),
            types_skipped: warnings
                .iter()
                .filter(|w| w.kind == WarningKind::UnsupportedType)
                .count(),
            ..Default::default()
        };

        let mut tally = |summary: &Option<String>| {
            if summary.is_some() {
                stats.members_documented += 1;
            } else {
                stats.members_undocumented += 1;
            }
        };

        for node in model.types() {
            match &node.body {
                TypeBody::Enum { values } => values.iter().for_each(|v| tally(&v.summary)),
                TypeBody::Composite(members) => {
                    members.methods.iter().for_each(|m| tally(&m.summary));
                    members.fields.iter().for_each(|f| tally(&f.summary));
                    members.properties.iter().for_each(|p| tally(&p.summary));
                    members.constructors.iter().for_each(|c| tally(&c.summary));
                }
            }
        }

        stats
    }

    fn build_type(&self, shape: &TypeShape) -> TypeOutcome {
        let type_name = shape.type_name();
        let mut warnings = Vec::new();

        let Some(kind) = TypeKind::classify(shape.kind) else {
            warnings.push(BuildWarning::new(
                WarningKind::UnsupportedType,
                type_name.full_name(),
                format!("kind '{}' has no documented form, skipping", shape.kind),
            ));
            return TypeOutcome {
                node: None,
                warnings,
            };
        };

        let body = match kind {
            TypeKind::Enum => TypeBody::Enum {
                values: self.build_enum_values(shape, &type_name),
            },
            TypeKind::Class | TypeKind::Struct => {
                TypeBody::Composite(self.build_members(shape, &mut warnings))
            }
        };

        let id = identifier::type_id(&type_name);
        let entry = self.store.lookup(id.as_str());

        debug!(
            "Built {} {} ({})",
            kind,
            type_name.full_name(),
            if entry.is_some() { "documented" } else { "undocumented" }
        );

        let node = TypeNode {
            name: shape.name.clone(),
            namespace: type_name.namespace.clone(),
            type_ref: shape.self_ref(),
            kind,
            summary: entry.and_then(|e| e.summary.clone()),
            obsolete: shape.obsolete.clone(),
            modifiers: Modifiers {
                is_abstract: shape.is_abstract,
                is_sealed: shape.is_sealed,
            },
            base_type: shape.base_type.clone(),
            type_parameters: type_params(&shape.generic_parameters, entry),
            body,
            id,
        };

        TypeOutcome {
            node: Some(node),
            warnings,
        }
    }

    fn build_enum_values(&self, shape: &TypeShape, type_name: &TypeName) -> Vec<EnumValueDoc> {
        shape
            .enum_values
            .iter()
            .map(|value| {
                let id = identifier::enum_value_id(type_name, value);
                let summary = self
                    .store
                    .lookup(id.as_str())
                    .and_then(|e| e.summary.clone());
                EnumValueDoc {
                    id,
                    name: value.clone(),
                    summary,
                }
            })
            .collect()
    }

    fn build_members(&self, shape: &TypeShape, warnings: &mut Vec<BuildWarning>) -> Members {
        let owner = shape.self_ref();
        let owner_name = shape.type_name();
        let mut members = Members::default();

        for member in &shape.members {
            let declaring = member.declaring_type.as_ref().unwrap_or(&owner);
            let Some(declaring_name) = declaring.type_name() else {
                warnings.push(malformed(
                    &owner_name,
                    member,
                    format!("declaring type '{}' is not a named type", declaring),
                ));
                continue;
            };
            let inherited_from = (declaring_name != &owner_name).then(|| declaring.clone());

            match member.kind {
                MemberKind::Method => {
                    if member.special_name {
                        continue;
                    }
                    match self.method(member, declaring_name, inherited_from) {
                        Some(method) => members.methods.push(method),
                        None => warnings.push(malformed(&owner_name, member, "method without a name")),
                    }
                }
                MemberKind::Field => match self.field(member, declaring_name, inherited_from) {
                    Some(field) => members.fields.push(field),
                    None => warnings.push(malformed(
                        &owner_name,
                        member,
                        "field without a name or type",
                    )),
                },
                MemberKind::Property => {
                    match self.property(member, declaring_name, inherited_from) {
                        Some(property) => members.properties.push(property),
                        None => warnings.push(malformed(
                            &owner_name,
                            member,
                            "property without a name or type",
                        )),
                    }
                }
                MemberKind::Constructor => {
                    members.constructors.push(self.constructor(member, declaring_name))
                }
                MemberKind::Event | MemberKind::Unknown => warnings.push(BuildWarning::new(
                    WarningKind::UnsupportedMember,
                    member_subject(&owner_name, member),
                    format!("{} members are not documented, skipping", member.kind),
                )),
            }
        }

        members
    }

    fn method(
        &self,
        member: &MemberShape,
        declaring: &TypeName,
        inherited_from: Option<TypeRef>,
    ) -> Option<MethodDoc> {
        let name = member.name.clone()?;
        let id = identifier::method_id(declaring, &name, &parameter_types(&member.parameters));
        let entry = self.store.lookup(id.as_str());

        Some(MethodDoc {
            return_type: member.member_type.clone().unwrap_or_else(TypeRef::void),
            summary: entry.and_then(|e| e.summary.clone()),
            returns: entry.and_then(|e| e.returns.clone()),
            is_static: member.is_static,
            is_abstract: member.is_abstract,
            inherited_from,
            parameters: parameters(&member.parameters, entry),
            type_parameters: type_params(&member.generic_parameters, entry),
            obsolete: member.obsolete.clone(),
            name,
            id,
        })
    }

    fn field(
        &self,
        member: &MemberShape,
        declaring: &TypeName,
        inherited_from: Option<TypeRef>,
    ) -> Option<FieldDoc> {
        let name = member.name.clone()?;
        let field_type = member.member_type.clone()?;
        let id = identifier::field_id(declaring, &name);
        let entry = self.store.lookup(id.as_str());

        Some(FieldDoc {
            summary: entry.and_then(|e| e.summary.clone()),
            is_static: member.is_static,
            inherited_from,
            obsolete: member.obsolete.clone(),
            field_type,
            name,
            id,
        })
    }

    fn property(
        &self,
        member: &MemberShape,
        declaring: &TypeName,
        inherited_from: Option<TypeRef>,
    ) -> Option<PropertyDoc> {
        let name = member.name.clone()?;
        let property_type = member.member_type.clone()?;
        let id = identifier::property_id(declaring, &name);
        let entry = self.store.lookup(id.as_str());

        Some(PropertyDoc {
            summary: entry.and_then(|e| e.summary.clone()),
            can_read: member.can_read,
            can_write: member.can_write,
            // Taken from the accessors by the surface producer.
            is_static: member.is_static,
            inherited_from,
            obsolete: member.obsolete.clone(),
            property_type,
            name,
            id,
        })
    }

    fn constructor(&self, member: &MemberShape, declaring: &TypeName) -> ConstructorDoc {
        let id = identifier::constructor_id(declaring, &parameter_types(&member.parameters));
        let entry = self.store.lookup(id.as_str());

        ConstructorDoc {
            summary: entry.and_then(|e| e.summary.clone()),
            parameters: parameters(&member.parameters, entry),
            obsolete: member.obsolete.clone(),
            id,
        }
    }
}

fn parameter_types(parameters: &[ParameterShape]) -> Vec<TypeRef> {
    parameters.iter().map(|p| p.param_type.clone()).collect()
}

fn parameters(parameters: &[ParameterShape], entry: Option<&DocEntry>) -> Vec<ParameterDoc> {
    parameters
        .iter()
        .map(|p| ParameterDoc {
            name: p.name.clone(),
            param_type: p.param_type.clone(),
            is_out: p.is_out,
            is_optional: p.is_optional,
            default_value: p.default_value.clone(),
            summary: entry.and_then(|e| e.param(&p.name)).map(str::to_string),
        })
        .collect()
}

fn type_params(names: &[String], entry: Option<&DocEntry>) -> Vec<TypeParamDoc> {
    names
        .iter()
        .map(|name| TypeParamDoc {
            name: name.clone(),
            summary: entry.and_then(|e| e.type_param(name)).map(str::to_string),
        })
        .collect()
}

fn member_subject(owner: &TypeName, member: &MemberShape) -> String {
    format!(
        "{}.{}",
        owner.full_name(),
        member.name.as_deref().unwrap_or(".ctor")
    )
}

fn malformed(owner: &TypeName, member: &MemberShape, message: impl Into<String>) -> BuildWarning {
    BuildWarning::new(
        WarningKind::MalformedMember,
        member_subject(owner, member),
        message,
    )
}
