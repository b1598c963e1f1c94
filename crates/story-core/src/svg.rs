// File: crates/story-core/src/svg.rs
// Summary: Serializes a scene to standalone SVG text and writes it to disk.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{StoryError, StoryResult};
use crate::scene::{Attr, Node, Scene, Tag, Transform};

const STYLE: &str = "text{font-family:Helvetica,Arial,sans-serif;font-size:12px;}";

/// Render `scene` as an SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(out, "  <style>{STYLE}</style>");
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        scene.width, scene.height, scene.background
    );
    write_node(&mut out, &scene.root, 1);
    out.push_str("</svg>\n");
    out
}

/// Write the SVG form of `scene` to `path`, creating parent directories.
pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> StoryResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoryError::Write { path: parent.to_path_buf(), source: e })?;
    }
    std::fs::write(path, to_svg(scene)).map_err(|e| StoryError::Write { path: path.to_path_buf(), source: e })
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = write!(out, "{pad}<{}", node.tag.name());
    if !node.class.is_empty() {
        let _ = write!(out, r#" class="{}""#, escape(&node.class));
    }
    if let Some(key) = &node.key {
        let _ = write!(out, r#" data-key="{}""#, escape(key));
    }
    if let Some(t) = &node.transform {
        let _ = write!(out, r#" transform="{}""#, transform_attr(t));
    }
    for (name, value) in &node.attrs {
        let _ = write!(out, r#" {name}="{}""#, attr_value(value));
    }

    let has_body = node.text.is_some() || node.title.is_some() || !node.children.is_empty();
    if !has_body {
        out.push_str("/>\n");
        return;
    }
    out.push('>');
    if node.tag == Tag::Text && node.children.is_empty() && node.title.is_none() {
        let _ = writeln!(out, "{}</{}>", escape(node.text.as_deref().unwrap_or("")), node.tag.name());
        return;
    }
    out.push('\n');
    if let Some(title) = &node.title {
        let _ = writeln!(out, "{pad}  <title>{}</title>", escape(title));
    }
    if let Some(text) = &node.text {
        let _ = writeln!(out, "{pad}  {}", escape(text));
    }
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
    let _ = writeln!(out, "{pad}</{}>", node.tag.name());
}

fn transform_attr(t: &Transform) -> String {
    let mut s = format!("translate({},{})", fmt_num(t.tx), fmt_num(t.ty));
    if t.rotate != 0.0 {
        let _ = write!(s, " rotate({})", fmt_num(t.rotate));
    }
    s
}

fn attr_value(value: &Attr) -> String {
    match value {
        Attr::Num(v) => fmt_num(*v),
        Attr::Text(s) => escape(s),
        Attr::Color(c) => c.to_string(),
        Attr::Path(p) => p.to_svg(),
    }
}

/// Up to two decimals, trailing zeros trimmed.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Rgba, BLUE};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(0.333333), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"A&B <"x">"#), "A&amp;B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn writes_nested_nodes() {
        let mut scene = Scene::new(100, 50, Rgba::rgb(255, 255, 255));
        scene.root.push(
            Node::group()
                .class("legend")
                .translate(10.0, 5.0)
                .child(Node::rect(0.0, 0.0, 18.0, 9.0).attr("fill", BLUE))
                .child(Node::text(24.0, 4.0, "O'Neal & co").keyed("x")),
        );
        scene.root.push(Node::circle(1.0, 2.0, 4.0).title("LAL\n3PA: 1.0"));
        let svg = to_svg(&scene);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
        assert!(svg.contains(r#"<g class="legend" transform="translate(10,5)">"#));
        assert!(svg.contains(r##"fill="#1f77b4""##));
        assert!(svg.contains(r#"data-key="x""#));
        assert!(svg.contains("O&#39;Neal &amp; co</text>"));
        assert!(svg.contains("<title>LAL\n3PA: 1.0</title>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
