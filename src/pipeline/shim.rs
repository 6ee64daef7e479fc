//! Stand-ins for the email layout primitives.
//!
//! Email templates are written against a component library that is not
//! loaded in the preview. Each primitive is mapped onto the plain element it
//! would render, passing every attribute and its children through.

/// One layout primitive and the element it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShimComponent {
    /// Component name as used in JSX.
    pub name: &'static str,
    /// Native element rendered in its place.
    pub element: &'static str,
    /// Extra JSX attributes placed before the pass-through props.
    pub fixed_attrs: &'static str,
    /// Void elements render without children.
    pub void: bool,
}

impl ShimComponent {
    const fn wrap(name: &'static str, element: &'static str) -> Self {
        Self {
            name,
            element,
            fixed_attrs: "",
            void: false,
        }
    }

    /// The arrow-function definition for this primitive.
    pub fn definition(&self) -> String {
        let attrs = if self.fixed_attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", self.fixed_attrs)
        };
        if self.void {
            format!(
                "{name}: ({{ children, ...props }}) => <{el}{attrs} {{...props}} />",
                name = self.name,
                el = self.element,
            )
        } else {
            format!(
                "{name}: ({{ children, ...props }}) => <{el}{attrs} {{...props}}>{{children}}</{el}>",
                name = self.name,
                el = self.element,
            )
        }
    }
}

/// The primitives available to every preview.
pub const SHIM_COMPONENTS: &[ShimComponent] = &[
    ShimComponent::wrap("Body", "body"),
    ShimComponent::wrap("Button", "a"),
    ShimComponent::wrap("Container", "div"),
    ShimComponent::wrap("Head", "head"),
    ShimComponent::wrap("Heading", "h1"),
    ShimComponent::wrap("Html", "html"),
    ShimComponent {
        name: "Img",
        element: "img",
        fixed_attrs: "",
        void: true,
    },
    ShimComponent::wrap("Link", "a"),
    ShimComponent {
        name: "Preview",
        element: "div",
        fixed_attrs: "style={{ display: 'none' }}",
        void: false,
    },
    ShimComponent::wrap("Section", "div"),
    ShimComponent::wrap("Tailwind", "div"),
    ShimComponent::wrap("Text", "p"),
];

/// Render the destructuring block that brings the primitives into scope.
pub fn render_shim(indent: &str) -> String {
    let names = SHIM_COMPONENTS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!("{indent}const {{ {names} }} = {{\n");
    for (i, component) in SHIM_COMPONENTS.iter().enumerate() {
        let sep = if i + 1 == SHIM_COMPONENTS.len() { "" } else { "," };
        out.push_str(&format!("{indent}  {}{sep}\n", component.definition()));
    }
    out.push_str(&format!("{indent}}};\n"));
    out
}
