//! Markdown page renderer for documented types.
//!
//! Pages are Markdown with embedded HTML blocks so static site generators can
//! style them. Every type reference in a signature becomes a link when the
//! referenced type has its own page, and inline code otherwise.

use crate::canonical::Canonicalizer;
use crate::model::{
    ConstructorDoc, DocModel, FieldDoc, MethodDoc, ParameterDoc, PropertyDoc, TypeBody,
    TypeNode, TypeParamDoc,
};
use crate::universe::{Deprecation, TypeRef};

/// A rendered page ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub file_name: String,
    /// Navigation entry for the page
    pub relative_name: String,
    pub content: String,
}

/// Renders reference pages for the types of one model.
pub struct PageRenderer<'a> {
    model: &'a DocModel,
    canon: &'a Canonicalizer,
    assembly_label: String,
}

impl<'a> PageRenderer<'a> {
    pub fn new(model: &'a DocModel, canon: &'a Canonicalizer) -> Self {
        Self {
            model,
            canon,
            assembly_label: model.assembly().to_string(),
        }
    }

    /// Override the assembly name shown in page headers.
    pub fn with_assembly_label(mut self, label: impl Into<String>) -> Self {
        self.assembly_label = label.into();
        self
    }

    /// Render every type of the model, in model order.
    pub fn render_all(&self) -> Vec<RenderedPage> {
        self.model.types().iter().map(|node| self.render(node)).collect()
    }

    pub fn render(&self, node: &TypeNode) -> RenderedPage {
        RenderedPage {
            file_name: self.canon.page_file_name(&node.type_ref),
            relative_name: self.canon.relative_name(&node.type_ref),
            content: self.render_page(node),
        }
    }

    /// Full page text: front matter, header block and member sections.
    pub fn render_page(&self, node: &TypeNode) -> String {
        let mut page = String::new();
        page.push_str("---\n");
        page.push_str(&format!(
            "title: {}\n",
            self.canon.display_name(&node.type_ref, true)
        ));
        page.push_str(&format!("permalink: {}\n", self.canon.api_url(&node.type_ref)));
        page.push_str("---\n\n");

        self.render_header(&mut page, node);

        match &node.body {
            TypeBody::Enum { values } => {
                page.push_str("<div>\n");
                page.push_str("\t<h3 markdown=\"1\">Enum Values</h3>\n");
                for value in values {
                    page.push_str("\t<div>\n");
                    page.push_str(&format!(
                        "\t\t<h4 markdown=\"1\"><b>``{}``</b></h4>\n",
                        value.name
                    ));
                    if let Some(summary) = &value.summary {
                        page.push_str(&format!("\t\t<p>{}</p>\n", prose(summary)));
                    }
                    page.push_str("\t</div>\n");
                }
                page.push_str("</div>\n");
            }
            TypeBody::Composite(members) => {
                self.render_properties(&mut page, &members.properties);
                self.render_fields(&mut page, &members.fields);
                self.render_constructors(&mut page, node, &members.constructors);
                self.render_methods(&mut page, &members.methods);
            }
        }

        page
    }

    /// `[``Name``](/api/name/)` for documented types, `` ``Name`` `` otherwise.
    pub fn linked_type(&self, type_ref: &TypeRef) -> String {
        let name = self.canon.display_name(type_ref, true);
        if self.model.is_documented(type_ref) {
            format!("[``{}``]({})", name, self.canon.api_url(type_ref))
        } else {
            format!("``{}``", name)
        }
    }

    fn render_header(&self, page: &mut String, node: &TypeNode) {
        page.push_str("<div style=\"line-height: 1;\">\n");
        page.push_str(&format!(
            "\t<h2 markdown=\"1\">{} ``{}``{}</h2>\n",
            self.canon.display_name(&node.type_ref, true),
            node.kind,
            obsolete_badge(node.obsolete.as_ref())
        ));
        if let Some(namespace) = &node.namespace {
            page.push_str(&format!(
                "\t<p style=\"font-size: 20px;\"><b>Namespace:</b> {}</p>\n",
                namespace
            ));
        }
        page.push_str(&format!(
            "\t<p style=\"font-size: 20px;\"><b>Assembly:</b> {}</p>\n",
            self.assembly_label
        ));
        if let Some(base) = &node.base_type {
            page.push_str(&format!(
                "\t<p style=\"font-size: 20px;\" markdown=\"1\"><b>Inherits:</b> {}</p>\n",
                self.linked_type(base)
            ));
        }
        page.push_str("</div>\n");

        if let Some(summary) = &node.summary {
            page.push_str(&format!("<p>{}</p>\n\n", prose(summary)));
        }

        self.render_type_parameters(page, &node.type_parameters, "");
    }

    fn render_properties(&self, page: &mut String, properties: &[PropertyDoc]) {
        let mut public = String::new();
        let mut inherited = String::new();

        for property in properties {
            let out = if property.is_inherited() {
                &mut inherited
            } else {
                &mut public
            };

            let accessors = format!(
                "{}{}",
                if property.can_read { "get; " } else { "" },
                if property.can_write { "set; " } else { "" }
            );
            out.push_str("\t<div style=\"line-height: 1;\">\n");
            out.push_str(&format!(
                "\t\t<h4 markdown=\"1\"><b>public {}{} {} {{ {}}}</b>{}</h4>\n",
                if property.is_static { "static " } else { "" },
                self.linked_type(&property.property_type),
                property.name,
                accessors,
                obsolete_badge(property.obsolete.as_ref())
            ));
            self.render_inherited_from(out, property.inherited_from.as_ref());
            render_summary(out, property.summary.as_deref());
            out.push_str("\t</div>\n");
        }

        write_section(page, "Public Properties", &public);
        write_section(page, "Inherited Properties", &inherited);
    }

    fn render_fields(&self, page: &mut String, fields: &[FieldDoc]) {
        let mut public = String::new();
        let mut inherited = String::new();

        for field in fields {
            let out = if field.is_inherited() {
                &mut inherited
            } else {
                &mut public
            };

            out.push_str("\t<div style=\"line-height: 1;\">\n");
            out.push_str(&format!(
                "\t\t<h4 markdown=\"1\"><b>public {}{} {};</b>{}</h4>\n",
                if field.is_static { "static " } else { "" },
                self.linked_type(&field.field_type),
                field.name,
                obsolete_badge(field.obsolete.as_ref())
            ));
            self.render_inherited_from(out, field.inherited_from.as_ref());
            render_summary(out, field.summary.as_deref());
            out.push_str("\t</div>\n");
        }

        write_section(page, "Public Fields", &public);
        write_section(page, "Inherited Fields", &inherited);
    }

    fn render_constructors(&self, page: &mut String, node: &TypeNode, constructors: &[ConstructorDoc]) {
        let mut body = String::new();

        for constructor in constructors {
            body.push_str("\t<div style=\"line-height: 1;\">\n");
            body.push_str(&format!(
                "\t\t<h4 markdown=\"1\"><b>public {}({});</b>{}</h4>\n",
                self.linked_type(&node.type_ref),
                self.parameter_list(&constructor.parameters),
                obsolete_badge(constructor.obsolete.as_ref())
            ));
            render_summary(&mut body, constructor.summary.as_deref());
            self.render_parameters(&mut body, &constructor.parameters);
            body.push_str("\t</div>\n");
        }

        write_section(page, "Public Constructors", &body);
    }

    fn render_methods(&self, page: &mut String, methods: &[MethodDoc]) {
        let mut public = String::new();
        let mut statics = String::new();
        let mut inherited = String::new();

        for method in methods {
            // Static methods are grouped together even when inherited.
            let out = if method.is_static {
                &mut statics
            } else if method.is_inherited() {
                &mut inherited
            } else {
                &mut public
            };
            self.render_method(out, method);
        }

        write_section(page, "Public Methods", &public);
        write_section(page, "Public Static Methods", &statics);
        write_section(page, "Inherited Methods", &inherited);
    }

    fn render_method(&self, out: &mut String, method: &MethodDoc) {
        let type_parameters = if method.type_parameters.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = method.type_parameters.iter().map(|t| t.name.as_str()).collect();
            format!("&lt;{}&gt;", names.join(","))
        };

        out.push_str("\t<div style=\"line-height: 1;\">\n");
        out.push_str(&format!(
            "\t\t<h4 markdown=\"1\"><b>public {}{}{} {}{}({});</b>{}</h4>\n",
            if method.is_static { "static " } else { "" },
            if method.is_abstract { "abstract " } else { "" },
            self.linked_type(&method.return_type),
            method.name,
            type_parameters,
            self.parameter_list(&method.parameters),
            obsolete_badge(method.obsolete.as_ref())
        ));
        self.render_inherited_from(out, method.inherited_from.as_ref());
        render_summary(out, method.summary.as_deref());
        self.render_type_parameters(out, &method.type_parameters, "\t\t");
        self.render_parameters(out, &method.parameters);

        if let (false, Some(returns)) = (method.return_type.is_void(), &method.returns) {
            out.push_str(&format!(
                "\t\t<h5 markdown=\"1\"><b>Returns {}</b></h5>\n",
                self.linked_type(&method.return_type)
            ));
            out.push_str("\t\t<div>\n");
            out.push_str(&format!("\t\t\t<p>{}</p>\n", prose(returns)));
            out.push_str("\t\t</div>\n");
        }

        out.push_str("\t</div>\n");
    }

    fn parameter_list(&self, parameters: &[ParameterDoc]) -> String {
        parameters
            .iter()
            .map(|p| self.parameter_signature(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parameter_signature(&self, parameter: &ParameterDoc) -> String {
        let mut signature = format!(
            "{}{} {}",
            if parameter.is_out { "out " } else { "" },
            self.linked_type(&parameter.param_type),
            parameter.name
        );
        if parameter.is_optional {
            if let Some(default) = &parameter.default_value {
                signature.push_str(&format!(" = {}", html_escape::encode_text(default)));
            }
        }
        signature
    }

    fn render_parameters(&self, out: &mut String, parameters: &[ParameterDoc]) {
        if parameters.is_empty() {
            return;
        }

        out.push_str("\t\t<h5><b>Parameters</b></h5>\n");
        for parameter in parameters {
            out.push_str("\t\t<div>\n");
            out.push_str(&format!(
                "\t\t\t<p style=\"font-size: 20px; color: #444;\" markdown=\"1\">{}</p>\n",
                self.parameter_signature(parameter)
            ));
            if let Some(summary) = &parameter.summary {
                out.push_str(&format!("\t\t\t<p>{}</p>\n", prose(summary)));
            }
            out.push_str("\t\t</div>\n");
        }
    }

    fn render_type_parameters(&self, out: &mut String, type_parameters: &[TypeParamDoc], indent: &str) {
        if type_parameters.iter().all(|t| t.summary.is_none()) {
            return;
        }

        out.push_str(&format!("{}<h5><b>Type Parameters</b></h5>\n", indent));
        for type_parameter in type_parameters {
            out.push_str(&format!("{}<div>\n", indent));
            out.push_str(&format!(
                "{}\t<p style=\"font-size: 20px; color: #444;\" markdown=\"1\">``{}``</p>\n",
                indent, type_parameter.name
            ));
            if let Some(summary) = &type_parameter.summary {
                out.push_str(&format!("{}\t<p>{}</p>\n", indent, prose(summary)));
            }
            out.push_str(&format!("{}</div>\n", indent));
        }
    }

    fn render_inherited_from(&self, out: &mut String, declaring: Option<&TypeRef>) {
        if let Some(declaring) = declaring {
            out.push_str(&format!(
                "\t\t<h5 markdown=\"1\">Inherited from: {}</h5>\n",
                self.linked_type(declaring)
            ));
        }
    }
}

fn prose(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn render_summary(out: &mut String, summary: Option<&str>) {
    if let Some(summary) = summary {
        out.push_str(&format!("\t\t<p>{}</p>\n", prose(summary)));
    }
}

/// Empty sections are omitted entirely.
fn write_section(page: &mut String, title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    page.push_str("<div>\n");
    page.push_str(&format!("\t<h3 markdown=\"1\">{}</h3>\n", title));
    page.push_str(body);
    page.push_str("</div>\n");
    page.push_str("<br>\n");
}

fn obsolete_badge(obsolete: Option<&Deprecation>) -> String {
    match obsolete {
        Some(deprecation) => format!(
            " <small><span class=\"label label-warning\" title=\"{}\">Obsolete</span></small>",
            html_escape::encode_double_quoted_attribute(deprecation.message.as_deref().unwrap_or(""))
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::comments::DocumentationStore;
    use crate::universe::{
        MemberShape, ParameterShape, ShapeKind, SurfaceManifest, TypeShape,
    };

    fn model() -> DocModel {
        let mut widget = TypeShape::new(Some("Acme"), "Widget", ShapeKind::Class);
        widget.obsolete = Some(Deprecation::with_message("Use \"Gadget\""));
        let mut reset = MemberShape::method("Reset", TypeRef::void());
        reset.is_static = true;
        let mut label = MemberShape::property("Label", TypeRef::named("System", "String"));
        label.can_write = true;
        widget.members = vec![
            MemberShape::method("Combine", TypeRef::named("Acme", "Widget"))
                .with_parameter(ParameterShape::new("other", TypeRef::named("Acme", "Widget"))),
            reset,
            MemberShape::method("ToString", TypeRef::named("System", "String"))
                .declared_by(TypeRef::named("System", "Object")),
            label,
            MemberShape::constructor(),
        ];

        let mut color = TypeShape::new(Some("Acme"), "Color", ShapeKind::Enum);
        color.enum_values = vec!["Red".to_string(), "Green".to_string()];

        let store = DocumentationStore::parse(
            r#"<doc><members>
                <member name="T:Acme.Widget"><summary>A <b>widget</b> &amp; more.</summary></member>
                <member name="M:Acme.Widget.Combine(Acme.Widget)">
                    <summary>Combines.</summary>
                    <returns>The combined widget.</returns>
                </member>
                <member name="M:Acme.Widget.Reset"><returns>Nothing.</returns></member>
                <member name="F:Acme.Color.Red"><summary>Red.</summary></member>
            </members></doc>"#,
        )
        .unwrap();

        ModelBuilder::new(&store)
            .build(&SurfaceManifest::new("Acme.dll", vec![widget, color]))
            .model
    }

    #[test]
    fn test_linked_type() {
        let model = model();
        let canon = Canonicalizer::new();
        let renderer = PageRenderer::new(&model, &canon);
        assert_eq!(
            renderer.linked_type(&TypeRef::named("Acme", "Widget")),
            "[``Widget``](/api/widget/)"
        );
        assert_eq!(renderer.linked_type(&TypeRef::named("System", "Int32")), "``int``");
        // arrays of documented types are not documented themselves
        assert_eq!(
            renderer.linked_type(&TypeRef::array_of(TypeRef::named("Acme", "Widget"))),
            "``Widget[]``"
        );
    }

    #[test]
    fn test_class_page_layout() {
        let model = model();
        let canon = Canonicalizer::new();
        let page = PageRenderer::new(&model, &canon)
            .with_assembly_label("Acme.Core.dll")
            .render_page(&model.types()[0]);

        assert!(page.starts_with("---\ntitle: Widget\npermalink: /api/widget/\n---\n\n"));
        assert!(page.contains("<h2 markdown=\"1\">Widget ``class`` <small><span class=\"label label-warning\" title=\"Use &quot;Gadget&quot;\">Obsolete</span></small></h2>"));
        assert!(page.contains("<b>Namespace:</b> Acme</p>"));
        assert!(page.contains("<b>Assembly:</b> Acme.Core.dll</p>"));
        assert!(page.contains("<p>A widget &amp; more.</p>"));
        assert!(page.contains(
            "<b>public [``Widget``](/api/widget/) Combine([``Widget``](/api/widget/) other);</b>"
        ));
        assert!(page.contains("<b>public static ``void`` Reset();</b>"));
        assert!(page.contains("Inherited from: ``object``"));
        assert!(page.contains("<b>public ``string`` Label { get; set; }</b>"));
        assert!(page.contains("<b>public [``Widget``](/api/widget/)();</b>"));

        // void return prose is never shown
        assert!(!page.contains("Nothing."));
        assert!(page.contains("<b>Returns [``Widget``](/api/widget/)</b>"));

        let order: Vec<usize> = [
            "Public Properties",
            "Public Constructors",
            "Public Methods",
            "Public Static Methods",
            "Inherited Methods",
        ]
        .iter()
        .map(|title| page.find(title).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(!page.contains("Public Fields"));
    }

    #[test]
    fn test_enum_page() {
        let model = model();
        let canon = Canonicalizer::new();
        let renderer = PageRenderer::new(&model, &canon);
        let page = renderer.render(&model.types()[1]);

        assert_eq!(page.file_name, "Color.md");
        assert_eq!(page.relative_name, "color");
        assert!(page.content.contains("Color ``enum``</h2>"));
        assert!(page.content.contains("<h4 markdown=\"1\"><b>``Red``</b></h4>\n\t\t<p>Red.</p>"));
        assert!(page.content.contains("<h4 markdown=\"1\"><b>``Green``</b></h4>\n\t</div>"));
    }

    #[test]
    fn test_parameter_signature_modifiers() {
        let model = model();
        let canon = Canonicalizer::new();
        let renderer = PageRenderer::new(&model, &canon);

        let mut count = ParameterDoc {
            name: "count".to_string(),
            param_type: TypeRef::by_ref(TypeRef::named("System", "Int32")),
            is_out: true,
            is_optional: false,
            default_value: None,
            summary: None,
        };
        assert_eq!(renderer.parameter_signature(&count), "out ``int`` count");

        count.is_out = false;
        count.param_type = TypeRef::named("System", "Int32");
        count.is_optional = true;
        count.default_value = Some("10".to_string());
        assert_eq!(renderer.parameter_signature(&count), "``int`` count = 10");
    }
}
