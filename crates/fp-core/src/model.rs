//! Value types for diagram documents.
//!
//! A document is two flat ordered lists: nodes (placed shapes and labels)
//! and edges (directed straight connections between nodes). There is no
//! containment hierarchy — every node sits directly on the canvas.
//! Styling fields are optional; an absent field means "renderer default".

use crate::id::ElementId;
use serde::{Deserialize, Serialize};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas space. The rendering layer owns the screen→canvas
/// projection; positions here are always canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node's stored extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp both axes to a minimum floor.
    pub fn clamped(self, min_width: f32, min_height: f32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }

    /// Collapse both axes to the smaller one (circle aspect lock).
    pub fn squared(self) -> Self {
        let side = self.width.min(self.height);
        Self {
            width: side,
            height: side,
        }
    }
}

// ─── Color ───────────────────────────────────────────────────────────────

/// Opaque RGB color, stored as 8-bit channels. Parsed from and emitted as
/// hex swatch strings (`#RGB` or `#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            3 => {
                let n = u16::from_str_radix(hex, 16).ok()?;
                let (r, g, b) = ((n >> 8) as u8 & 0xF, (n >> 4) as u8 & 0xF, n as u8 & 0xF);
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let n = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::rgb((n >> 16) as u8, (n >> 8) as u8, n as u8))
            }
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, uppercase.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ─── Shapes & styling ────────────────────────────────────────────────────

/// What a node looks like on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
    Circle,
    Label,
}

impl ShapeKind {
    /// Size used when a node carries no explicit size.
    pub fn default_size(self) -> Size {
        match self {
            ShapeKind::Rect | ShapeKind::Circle => Size::new(120.0, 80.0),
            ShapeKind::Label => Size::new(100.0, 40.0),
        }
    }
}

/// Node border rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dotted,
}

/// Per-node style overrides. `None` means the renderer's default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeStyle {
    pub fill: Option<Color>,
    pub text_color: Option<Color>,
    pub border: Option<BorderStyle>,
}

// ─── Elements ────────────────────────────────────────────────────────────

/// A placed shape or label on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: ElementId,
    pub shape: ShapeKind,
    pub position: Vec2,
    pub label: String,
    /// Explicit size, set once the node has been resized. Absent means
    /// the shape default.
    pub size: Option<Size>,
    pub style: NodeStyle,
}

impl Node {
    pub fn new(id: ElementId, shape: ShapeKind, position: Vec2) -> Self {
        Self {
            id,
            shape,
            position,
            label: String::new(),
            size: None,
            style: NodeStyle::default(),
        }
    }

    /// The stored size, or the shape default when none was ever set.
    pub fn size_or_default(&self) -> Size {
        self.size.unwrap_or_else(|| self.shape.default_size())
    }

    /// The size the renderer should draw. Circles render as a square of
    /// the smaller stored axis — the stored axes may diverge mid-gesture,
    /// the rendered square never does.
    pub fn render_size(&self) -> Size {
        let size = self.size_or_default();
        match self.shape {
            ShapeKind::Circle => size.squared(),
            _ => size,
        }
    }
}

/// A directed connection between two nodes, drawn as a straight line by
/// the rendering layer. Structurally valid only while both endpoints are
/// live; `Document::remove_node` enforces this by cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
}

impl Edge {
    pub fn new(id: ElementId, source: ElementId, target: ElementId) -> Self {
        Self { id, source, target }
    }

    /// Whether this edge touches the given node on either end.
    pub fn touches(&self, node: ElementId) -> bool {
        self.source == node || self.target == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let short = Color::from_hex("f0a").unwrap();
        assert_eq!(short, Color::rgb(0xFF, 0x00, 0xAA));

        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
    }

    #[test]
    fn shape_default_sizes() {
        assert_eq!(ShapeKind::Rect.default_size(), Size::new(120.0, 80.0));
        assert_eq!(ShapeKind::Circle.default_size(), Size::new(120.0, 80.0));
        assert_eq!(ShapeKind::Label.default_size(), Size::new(100.0, 40.0));
    }

    #[test]
    fn circle_renders_square() {
        let mut node = Node::new(
            ElementId::intern("c1"),
            ShapeKind::Circle,
            Vec2::new(0.0, 0.0),
        );
        node.size = Some(Size::new(140.0, 90.0));
        assert_eq!(node.render_size(), Size::new(90.0, 90.0));
        // Stored size is untouched
        assert_eq!(node.size_or_default(), Size::new(140.0, 90.0));
    }

    #[test]
    fn node_serde_roundtrip() {
        let mut node = Node::new(
            ElementId::intern("n_ser"),
            ShapeKind::Rect,
            Vec2::new(3.0, 4.0),
        );
        node.label = "hello".into();
        node.style.fill = Some(Color::rgb(255, 0, 0));
        node.style.border = Some(BorderStyle::Dotted);

        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
