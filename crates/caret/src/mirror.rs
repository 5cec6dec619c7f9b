//! The offscreen element a locator measures in.

use css::{StyleSnapshot, Stylesheet, attach_styles, build_style_tree};
use html::{Node, NodeFactory, inner_markup};
use layout::{MirrorLayout, MirrorLayoutOptions, TextMeasurer, layout_mirror};

use crate::config::ClassNames;

/// What laying out a mirror needs from the outside.
#[derive(Clone, Copy)]
pub struct LayoutEnv<'a> {
    pub measurer: &'a dyn TextMeasurer,
    pub stylesheet: &'a Stylesheet,
    pub options: MirrorLayoutOptions,
}

/// A `pre` element holding a copy of a field's text plus the caret marker.
///
/// Layout is computed on demand and cached until the content or the inline
/// style changes.
#[derive(Clone, Debug)]
pub struct MirrorElement {
    root: Node,
    content: Vec<Node>,
    style: StyleSnapshot,
    factory: NodeFactory,
    cached: Option<MirrorLayout>,
    dirty: bool,
}

impl MirrorElement {
    pub fn new(names: &ClassNames) -> Self {
        let mut factory = NodeFactory::new();
        let root = factory.element_with_class("pre", &format!("{} {}", names.base, names.clone));
        Self {
            root,
            content: Vec::new(),
            style: StyleSnapshot::new(),
            factory,
            cached: None,
            dirty: true,
        }
    }

    pub fn style(&self) -> &StyleSnapshot {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleSnapshot {
        self.dirty = true;
        &mut self.style
    }

    /// Width and height the mirror is pinned to, if set.
    pub fn pinned_size(&self) -> Option<(f32, f32)> {
        Some((self.style.px("width")?, self.style.px("height")?))
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Vec<Node> {
        self.dirty = true;
        &mut self.content
    }

    /// Ids for nodes placed into this mirror.
    pub fn factory_mut(&mut self) -> &mut NodeFactory {
        &mut self.factory
    }

    /// Drop the previous content (marker included) and take `nodes`.
    pub fn replace_content(&mut self, nodes: Vec<Node>) {
        self.dirty = true;
        self.content = nodes;
    }

    pub fn inner_markup(&self) -> String {
        inner_markup(self.content())
    }

    /// Current layout, recomputed when content or style changed.
    ///
    /// `None` when the mirror does not render (e.g. `display: none` was
    /// copied from the field).
    pub fn layout(&mut self, env: &LayoutEnv<'_>) -> Option<&MirrorLayout> {
        if self.dirty {
            self.cached = self.render(env);
            self.dirty = false;
        }
        self.cached.as_ref()
    }

    fn render(&self, env: &LayoutEnv<'_>) -> Option<MirrorLayout> {
        let mut root = self.root.clone();
        root.set_attr("style", self.style.to_inline_css());
        if let Some(children) = root.children_mut() {
            children.clone_from(&self.content);
        }
        attach_styles(&mut root, env.stylesheet);

        let styled = build_style_tree(&root, None);
        let layout = layout_mirror(env.measurer, &styled, &env.options);
        log::trace!(
            target: "caret.mirror",
            "mirror laid out: {} lines",
            layout.as_ref().map_or(0, |l| l.lines.len())
        );
        layout
    }
}
