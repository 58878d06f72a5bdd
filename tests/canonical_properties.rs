//! Property tests for name canonicalization, identifiers and lookups.

use proptest::prelude::*;

use refdoc::canonical::{identifier, strip_arity, Canonicalizer};
use refdoc::universe::{Generics, TypeName};
use refdoc::{DocModel, DocumentationStore, ModelBuilder, PageRenderer, SurfaceManifest, TypeRef};

fn pascal_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}([A-Z][a-z]{1,6}){0,2}"
}

fn namespace() -> impl Strategy<Value = String> {
    prop::collection::vec(pascal_name(), 1..4).prop_map(|parts| parts.join("."))
}

fn simple_type() -> impl Strategy<Value = TypeRef> {
    prop_oneof![
        Just(TypeRef::named("System", "Int32")),
        Just(TypeRef::named("System", "String")),
        Just(TypeRef::named("System", "Boolean")),
        (namespace(), pascal_name()).prop_map(|(ns, name)| TypeRef::named(&ns, &name)),
    ]
}

proptest! {
    /// Display names of generic types carry no arity suffix and one entry per argument.
    #[test]
    fn generic_display_strips_arity(
        ns in namespace(),
        name in pascal_name(),
        args in prop::collection::vec(simple_type(), 1..6),
    ) {
        let generic = TypeRef::Named {
            name: TypeName::new(Some(ns.as_str()), format!("{}`{}", name, args.len())),
            generics: Generics::Closed(args.clone()),
        };
        let display = Canonicalizer::new().display_name(&generic, false);

        prop_assert!(!display.contains('`'));
        let open = display.find('<').unwrap();
        let inner = &display[open + 1..display.len() - 1];
        prop_assert_eq!(inner.split(',').count(), args.len());
        prop_assert_eq!(&display[..open], name.as_str());
    }

    /// Identifiers of plain members are `<letter>:<Namespace>.<Type>.<Member>`.
    #[test]
    fn member_identifiers_follow_grammar(
        ns in namespace(),
        type_name in pascal_name(),
        member in pascal_name(),
    ) {
        let declaring = TypeName::new(Some(ns.as_str()), type_name.clone());
        let expected = format!("{}.{}.{}", ns, type_name, member);

        let ids = [
            (identifier::method_id(&declaring, &member, &[]), 'M'),
            (identifier::property_id(&declaring, &member), 'P'),
            (identifier::field_id(&declaring, &member), 'F'),
        ];
        for (id, letter) in ids {
            prop_assert_eq!(id.as_str(), format!("{}:{}", letter, expected));
            prop_assert!(!id.as_str().contains('+'));
            prop_assert!(!id.as_str().contains('@'));
        }
    }

    /// Parameters without references never introduce reference markers.
    #[test]
    fn method_identifiers_list_parameters(
        member in pascal_name(),
        params in prop::collection::vec(simple_type(), 0..5),
    ) {
        let declaring = TypeName::new(Some("Acme"), "Widget");
        let id = identifier::method_id(&declaring, &member, &params);

        prop_assert!(!id.as_str().contains('@'));
        if params.is_empty() {
            prop_assert!(!id.as_str().contains('('));
        } else {
            prop_assert_eq!(id.as_str().matches(',').count(), params.len() - 1);
        }
    }

    /// Lookups return an entry or nothing for any input.
    #[test]
    fn lookup_is_total(id in "\\PC{0,40}") {
        let store = DocumentationStore::parse(
            r#"<doc><members><member name="T:Acme.Widget"><summary>A widget.</summary></member></members></doc>"#,
        ).unwrap();
        let entry = store.lookup(&id);
        prop_assert_eq!(entry.is_some(), id == "T:Acme.Widget");
    }

    #[test]
    fn strip_arity_removes_every_suffix(name in pascal_name(), arity in 1usize..40) {
        prop_assert_eq!(strip_arity(&format!("{}`{}", name, arity)), name);
    }

    /// Slugs are lowercase and never contain raw angle brackets.
    #[test]
    fn url_slugs_are_safe(name in pascal_name(), arg in pascal_name()) {
        let generic = TypeRef::Named {
            name: TypeName::new(Some("Acme"), format!("{}`1", name)),
            generics: Generics::Closed(vec![TypeRef::named("Acme", &arg)]),
        };
        let slug = Canonicalizer::new().url_slug(&generic);
        prop_assert!(!slug.contains('<') && !slug.contains('>'));
        let unescaped = slug.replace("%3C", "").replace("%3E", "");
        prop_assert!(!unescaped.chars().any(|c| c.is_uppercase()));
    }
}

#[test]
fn links_exist_only_for_model_nodes() {
    let surface = SurfaceManifest::from_yaml_str(
        "assembly: Acme.dll\ntypes:\n  - name: Widget\n    namespace: Acme\n    kind: class\n",
    )
    .unwrap();
    let store = DocumentationStore::default();
    let model: DocModel = ModelBuilder::new(&store).build(&surface).model;
    let canon = Canonicalizer::new();
    let renderer = PageRenderer::new(&model, &canon);

    let candidates = [
        TypeRef::named("Acme", "Widget"),
        TypeRef::named("Acme", "Gadget"),
        TypeRef::named("System", "Int32"),
        TypeRef::array_of(TypeRef::named("Acme", "Widget")),
        TypeRef::by_ref(TypeRef::named("Acme", "Widget")),
    ];
    for candidate in &candidates {
        let linked = renderer.linked_type(candidate).starts_with('[');
        assert_eq!(linked, model.is_documented(candidate), "{}", candidate);
    }
}
