// File: crates/story-core/src/scene.rs
// Summary: Retained element tree for a chart plus the keyed enter/update/exit join.
// Notes:
// - Nodes carry a process-unique `NodeId`. A node that survives a join keeps its id,
//   which is how callers observe element identity across re-renders.
// - Attribute names follow SVG so the SVG writer can emit them verbatim.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::PathData;
use crate::theme::Rgba;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Group,
    Path,
    Circle,
    Rect,
    Line,
    Text,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Group => "g",
            Tag::Path => "path",
            Tag::Circle => "circle",
            Tag::Rect => "rect",
            Tag::Line => "line",
            Tag::Text => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    Num(f64),
    Text(String),
    Color(Rgba),
    Path(PathData),
}

impl From<f64> for Attr {
    fn from(v: f64) -> Self { Attr::Num(v) }
}
impl From<&str> for Attr {
    fn from(v: &str) -> Self { Attr::Text(v.to_string()) }
}
impl From<String> for Attr {
    fn from(v: String) -> Self { Attr::Text(v) }
}
impl From<Rgba> for Attr {
    fn from(v: Rgba) -> Self { Attr::Color(v) }
}
impl From<PathData> for Attr {
    fn from(v: PathData) -> Self { Attr::Path(v) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    /// Degrees, applied after the translation.
    pub rotate: f64,
}

#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    pub tag: Tag,
    pub class: String,
    pub key: Option<String>,
    pub attrs: BTreeMap<&'static str, Attr>,
    pub transform: Option<Transform>,
    /// Text content for `Tag::Text`.
    pub text: Option<String>,
    /// Hover text, emitted as an SVG `<title>` child.
    pub title: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: NodeId::next(),
            tag,
            class: String::new(),
            key: None,
            attrs: BTreeMap::new(),
            transform: None,
            text: None,
            title: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self { Self::new(Tag::Group) }

    pub fn path(d: PathData) -> Self {
        Self::new(Tag::Path).attr("d", d)
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(Tag::Circle).attr("cx", cx).attr("cy", cy).attr("r", r)
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Tag::Rect).attr("x", x).attr("y", y).attr("width", width).attr("height", height)
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Tag::Line).attr("x1", x1).attr("y1", y1).attr("x2", x2).attr("y2", y2)
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        let mut n = Self::new(Tag::Text).attr("x", x).attr("y", y);
        n.text = Some(content.into());
        n
    }

    pub fn id(&self) -> NodeId { self.id }

    // ---- builder-style setters -------------------------------------------------

    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<Attr>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    pub fn translate(mut self, tx: f64, ty: f64) -> Self {
        self.set_translate(tx, ty);
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.transform.get_or_insert_with(Transform::default).rotate = degrees;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    // ---- in-place mutation -----------------------------------------------------

    pub fn set(&mut self, name: &'static str, value: impl Into<Attr>) {
        self.attrs.insert(name, value.into());
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.text = Some(content.into());
    }

    pub fn set_translate(&mut self, tx: f64, ty: f64) {
        let t = self.transform.get_or_insert_with(Transform::default);
        t.tx = tx;
        t.ty = ty;
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        if !self.class.is_empty() {
            self.class.push(' ');
        }
        self.class.push_str(class);
    }

    pub fn set_class_flag(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.class = self.class.split_whitespace().filter(|c| *c != class).collect::<Vec<_>>().join(" ");
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    // ---- lookup ----------------------------------------------------------------

    pub fn num(&self, name: &str) -> Option<f64> {
        match self.attrs.get(name)? {
            Attr::Num(v) => Some(*v),
            _ => None,
        }
    }

    pub fn color(&self, name: &str) -> Option<Rgba> {
        match self.attrs.get(name)? {
            Attr::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn str_attr(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name)? {
            Attr::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn path_data(&self) -> Option<&PathData> {
        match self.attrs.get("d")? {
            Attr::Path(p) => Some(p),
            _ => None,
        }
    }

    /// First node (depth-first, self included) carrying `class`.
    pub fn find(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(class))
    }

    pub fn find_mut(&mut self, class: &str) -> Option<&mut Node> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(class))
    }

    /// Direct children carrying `class`, in order.
    pub fn children_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.has_class(class))
    }

    /// Direct child with `class` and `key`.
    pub fn keyed_child<'a>(&'a self, class: &'a str, key: &str) -> Option<&'a Node> {
        self.children_with_class(class).find(move |c| c.key.as_deref() == Some(key))
    }

    // ---- data join -------------------------------------------------------------

    /// Reconcile the children carrying `class` with `data`, keyed by `key`.
    ///
    /// Existing children whose key is still present are reused (same `NodeId`)
    /// and passed to `update`; new keys are created with `enter` and then
    /// updated; children whose key disappeared are removed. Joined children end
    /// up in data order, at the position of the first former `class` child.
    pub fn join<T, K, E, U>(
        &mut self,
        class: &str,
        data: &[T],
        key: K,
        mut enter: E,
        mut update: U,
    ) -> JoinReport
    where
        K: Fn(&T) -> String,
        E: FnMut(&T) -> Node,
        U: FnMut(&mut Node, &T, usize),
    {
        let insert_at = self
            .children
            .iter()
            .position(|c| c.has_class(class))
            .unwrap_or(self.children.len());

        let mut kept = Vec::with_capacity(self.children.len());
        let mut order = Vec::new();
        let mut pool: HashMap<String, Node> = HashMap::new();
        for child in self.children.drain(..) {
            if !child.has_class(class) {
                kept.push(child);
                continue;
            }
            // unkeyed members of the class cannot be matched and simply exit
            if let Some(k) = child.key.clone() {
                order.push(k.clone());
                pool.insert(k, child);
            }
        }

        let mut report = JoinReport::default();
        let mut joined = Vec::with_capacity(data.len());
        for (i, datum) in data.iter().enumerate() {
            let k = key(datum);
            let mut node = match pool.remove(&k) {
                Some(existing) => {
                    report.updated.push(k);
                    existing
                }
                None => {
                    let mut fresh = enter(datum);
                    fresh.add_class(class);
                    fresh.key = Some(k.clone());
                    report.entered.push(k);
                    fresh
                }
            };
            update(&mut node, datum, i);
            joined.push(node);
        }
        report.exited = order.into_iter().filter(|k| pool.contains_key(k)).collect();

        let tail = kept.split_off(insert_at.min(kept.len()));
        kept.extend(joined);
        kept.extend(tail);
        self.children = kept;
        report
    }
}

/// Keys that entered, were updated, or exited during one join.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

impl JoinReport {
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// A complete chart: canvas size, background and the root group.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub root: Node,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self { width, height, background, root: Node::group().class("chart") }
    }

    pub fn find(&self, class: &str) -> Option<&Node> { self.root.find(class) }
    pub fn find_mut(&mut self, class: &str) -> Option<&mut Node> { self.root.find_mut(class) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(parent: &Node, class: &str) -> Vec<String> {
        parent.children_with_class(class).filter_map(|c| c.key.clone()).collect()
    }

    fn join_names(parent: &mut Node, data: &[&str]) -> JoinReport {
        parent.join(
            "item",
            data,
            |d| d.to_string(),
            |_| Node::new(Tag::Path),
            |n, d, i| {
                n.set("index", i as f64);
                n.set_text(*d);
            },
        )
    }

    #[test]
    fn join_enters_updates_and_exits() {
        let mut g = Node::group();
        let r1 = join_names(&mut g, &["a", "b"]);
        assert_eq!(r1.entered, vec!["a", "b"]);
        assert!(r1.updated.is_empty());

        let r2 = join_names(&mut g, &["b", "c"]);
        assert_eq!(r2.entered, vec!["c"]);
        assert_eq!(r2.updated, vec!["b"]);
        assert_eq!(r2.exited, vec!["a"]);
        assert_eq!(names(&g, "item"), vec!["b", "c"]);
    }

    #[test]
    fn join_preserves_identity() {
        let mut g = Node::group();
        join_names(&mut g, &["a", "b"]);
        let id_b = g.keyed_child("item", "b").map(Node::id);
        join_names(&mut g, &["c", "b"]);
        assert_eq!(g.keyed_child("item", "b").map(Node::id), id_b);
        assert_eq!(g.keyed_child("item", "b").and_then(|n| n.num("index")), Some(1.0));
    }

    #[test]
    fn reorder_only_join_is_noop() {
        let mut g = Node::group();
        assert!(!join_names(&mut g, &["a", "b"]).is_noop());
        let r = join_names(&mut g, &["b", "a"]);
        assert!(r.is_noop());
        assert_eq!(r.updated, vec!["b", "a"]);
    }

    #[test]
    fn keyed_child_accepts_borrowed_lookup_keys() {
        let mut g = Node::group();
        join_names(&mut g, &["a", "b"]);
        let class = String::from("item");
        let found = {
            let key = String::from("b");
            g.keyed_child(&class, &key).map(Node::id)
        };
        assert_eq!(found, g.children_with_class("item").nth(1).map(Node::id));
        assert!(g.keyed_child(&class, "z").is_none());
    }

    #[test]
    fn join_leaves_other_children_in_place() {
        let mut g = Node::group().child(Node::rect(0.0, 0.0, 1.0, 1.0).class("frame"));
        join_names(&mut g, &["a"]);
        g.push(Node::text(0.0, 0.0, "caption").class("caption"));
        join_names(&mut g, &["a", "b"]);
        let classes: Vec<&str> = g.children.iter().map(|c| c.class.as_str()).collect();
        assert_eq!(classes, vec!["frame", "item", "item", "caption"]);
    }

    #[test]
    fn class_flags() {
        let mut n = Node::group().class("chips");
        n.set_class_flag("empty", true);
        assert!(n.has_class("empty"));
        n.set_class_flag("empty", false);
        assert_eq!(n.class, "chips");
    }
}
