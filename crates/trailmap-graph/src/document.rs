//! Serde model of a roadmap document.
//!
//! Field names follow the camelCase JSON emitted by the roadmap catalog. Unknown node types
//! deserialize to [`NodeKind::Unknown`] instead of failing the whole document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Outline family used for sizing and boundary intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Rounded,
    Diamond,
    Circle,
    Hexagon,
    Cloud,
    Cylinder,
    /// Composite content cards and group containers. Intersects like a rectangle.
    Card,
}

impl ShapeKind {
    pub fn is_rectangular(self) -> bool {
        matches!(self, Self::Rectangle | Self::Rounded | Self::Card)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    #[default]
    Rectangle,
    Rounded,
    Diamond,
    Circle,
    Hexagon,
    Cloud,
    Cylinder,
    InfoCard,
    CodeCard,
    Group,
    VideoCard,
    ChecklistCard,
    QuizCard,
    ResourceCard,
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    pub fn shape(self) -> ShapeKind {
        match self {
            Self::Rectangle | Self::Unknown => ShapeKind::Rectangle,
            Self::Rounded => ShapeKind::Rounded,
            Self::Diamond => ShapeKind::Diamond,
            Self::Circle => ShapeKind::Circle,
            Self::Hexagon => ShapeKind::Hexagon,
            Self::Cloud => ShapeKind::Cloud,
            Self::Cylinder => ShapeKind::Cylinder,
            Self::InfoCard
            | Self::CodeCard
            | Self::Group
            | Self::VideoCard
            | Self::ChecklistCard
            | Self::QuizCard
            | Self::ResourceCard => ShapeKind::Card,
        }
    }

    pub fn is_group(self) -> bool {
        matches!(self, Self::Group)
    }
}

/// Per-instance style overrides that affect geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Explicit shape flag (e.g. a rectangle-typed node drawn as a diamond).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
}

impl NodeStyle {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.shape.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "NodeStyle::is_empty")]
    pub style: NodeStyle,
    /// Labels and content. Never inspected by layout or geometry.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: None,
            style: NodeStyle::default(),
            data: Value::Null,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.style.width = Some(width);
        self.style.height = Some(height);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Effective outline, honoring an explicit style shape.
    pub fn shape(&self) -> ShapeKind {
        self.style.shape.unwrap_or_else(|| self.kind.shape())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(
        mut self,
        source_handle: Option<impl Into<String>>,
        target_handle: Option<impl Into<String>>,
    ) -> Self {
        self.source_handle = source_handle.map(Into::into);
        self.target_handle = target_handle.map(Into::into);
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// A roadmap as delivered by the catalog: metadata plus the graph itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoadmapDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub graph: Graph,
}
