/// Composed subtree: plain data, produced by build functions and handed back
/// to the host. Static children are shared as `Rc<View>` so reuse across
/// rebuilds is observable by identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub kind: ViewKind,
    pub children: Vec<View>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Group,
    Text { text: String },
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            children: vec![],
        }
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    /// Depth-first text content, space-joined.
    pub fn text_content(&self) -> String {
        fn collect(view: &View, out: &mut Vec<String>) {
            if let ViewKind::Text { text } = &view.kind {
                out.push(text.clone());
            }
            for child in &view.children {
                collect(child, out);
            }
        }

        let mut parts = Vec::new();
        collect(self, &mut parts);
        parts.join(" ")
    }
}
