// ABOUTME: Declarative render tree for the color system document
// ABOUTME: Turns a graded report into frames, text and swatches for a canvas host to draw

use serde::{Serialize, Serializer};
use swatchbook_types::Color;

use crate::config::DocumentConfig;
use crate::report::{Report, ReportRow};

const ROOT_PADDING: f32 = 10.0;
const SECTION_PADDING: f32 = 64.0;
const SECTION_SPACING: f32 = 22.0;
const ROW_SPACING: f32 = 16.0;
const GROUP_SPACING: f32 = 8.0;
const TITLE_SIZE: f32 = 48.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 14.0;

/// Column headings of the token table, in row order
pub const COLUMNS: [&str; 7] = [
    "Context",
    "Token",
    "Description",
    "Background",
    "Foreground",
    "Contrast",
    "Preview",
];

/// Placeholder for an empty cell
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Regular,
    SemiBold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub direction: Direction,
    pub padding: f32,
    pub spacing: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hex_opt")]
    pub fill: Option<Color>,
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub name: String,
    pub content: String,
    pub font: FontSpec,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "hex_opt")]
    pub fill: Option<Color>,
}

/// Square filled with a color, optionally with text drawn on top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub name: String,
    #[serde(serialize_with = "hex")]
    pub fill: Color,
    pub size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<TextNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderNode {
    Frame(Frame),
    Text(TextNode),
    Swatch(Swatch),
}

impl RenderNode {
    pub fn name(&self) -> &str {
        match self {
            RenderNode::Frame(frame) => &frame.name,
            RenderNode::Text(text) => &text.name,
            RenderNode::Swatch(swatch) => &swatch.name,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Frame(frame) => &frame.children,
            _ => &[],
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            RenderNode::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            RenderNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_swatch(&self) -> Option<&Swatch> {
        match self {
            RenderNode::Swatch(swatch) => Some(swatch),
            _ => None,
        }
    }

    /// Depth-first search for the first node with the given name
    pub fn find(&self, name: &str) -> Option<&RenderNode> {
        if self.name() == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// Direct child with the given name
    pub fn child(&self, name: &str) -> Option<&RenderNode> {
        self.children().iter().find(|child| child.name() == name)
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(RenderNode::node_count).sum::<usize>()
    }
}

/// Builds the document tree for a report
pub struct ReportDocument<'c> {
    config: &'c DocumentConfig,
}

impl<'c> ReportDocument<'c> {
    pub fn build(report: &Report<'_>, config: &'c DocumentConfig) -> RenderNode {
        let document = Self { config };
        RenderNode::Frame(Frame {
            name: "Color System".to_string(),
            direction: Direction::Vertical,
            padding: ROOT_PADDING,
            spacing: ROOT_PADDING,
            width: Some(config.page_width),
            fill: Some(Color::WHITE),
            children: vec![document.header(), document.content(report)],
        })
    }

    fn header(&self) -> RenderNode {
        let title = self.text("Title", &self.config.title, TITLE_SIZE, FontStyle::SemiBold);
        let content = frame("Header Content", Direction::Vertical, 0.0, SECTION_SPACING, vec![title]);
        frame(
            "Header",
            Direction::Vertical,
            SECTION_PADDING,
            SECTION_SPACING,
            vec![content],
        )
    }

    fn content(&self, report: &Report<'_>) -> RenderNode {
        let headings = COLUMNS
            .iter()
            .map(|column| self.text(column, column, HEADING_SIZE, FontStyle::SemiBold))
            .collect();
        let mut children = vec![frame(
            "Column Headers",
            Direction::Horizontal,
            0.0,
            ROW_SPACING,
            headings,
        )];

        for (namespace, rows) in report.namespaces() {
            let rows: Vec<RenderNode> = rows
                .iter()
                .filter(|(_, row)| self.config.show_ungraded || row.is_graded())
                .map(|(base_name, row)| self.row(namespace, base_name, row))
                .collect();
            if !rows.is_empty() {
                children.push(frame(namespace, Direction::Vertical, 0.0, GROUP_SPACING, rows));
            }
        }

        frame(
            "Content",
            Direction::Vertical,
            SECTION_PADDING,
            SECTION_SPACING,
            children,
        )
    }

    fn row(&self, namespace: &str, base_name: &str, row: &ReportRow<'_>) -> RenderNode {
        let pair = &row.pair;
        let token_names = pair.tokens().map(|t| t.name()).collect::<Vec<_>>().join(" / ");
        let description = pair
            .tokens()
            .find_map(|t| t.description())
            .unwrap_or_default();
        let contrast = row
            .grade
            .map(|grade| grade.label())
            .unwrap_or_else(|| EMPTY_CELL.to_string());

        let background = pair.background.map(|t| t.color());
        let foreground = pair.foreground.map(|t| t.color());

        let preview = match (background, foreground) {
            (Some(bg), Some(fg)) => RenderNode::Swatch(Swatch {
                name: "Preview".to_string(),
                fill: bg,
                size: self.config.swatch_size,
                label: Some(TextNode {
                    fill: Some(fg),
                    ..self.text_node("Sample", &self.config.sample_text, BODY_SIZE, FontStyle::SemiBold)
                }),
            }),
            _ => self.text("Preview", EMPTY_CELL, BODY_SIZE, FontStyle::Regular),
        };

        let cells = vec![
            self.text("Context", namespace, BODY_SIZE, FontStyle::Regular),
            self.text("Token", &token_names, BODY_SIZE, FontStyle::SemiBold),
            self.text("Description", description, BODY_SIZE, FontStyle::Regular),
            self.swatch_cell("Background", background),
            self.swatch_cell("Foreground", foreground),
            self.text("Contrast", &contrast, BODY_SIZE, FontStyle::Regular),
            preview,
        ];
        frame(base_name, Direction::Horizontal, 0.0, ROW_SPACING, cells)
    }

    fn swatch_cell(&self, name: &str, color: Option<Color>) -> RenderNode {
        match color {
            Some(fill) => RenderNode::Swatch(Swatch {
                name: name.to_string(),
                fill,
                size: self.config.swatch_size,
                label: None,
            }),
            None => self.text(name, EMPTY_CELL, BODY_SIZE, FontStyle::Regular),
        }
    }

    fn text(&self, name: &str, content: &str, size: f32, style: FontStyle) -> RenderNode {
        RenderNode::Text(self.text_node(name, content, size, style))
    }

    fn text_node(&self, name: &str, content: &str, size: f32, style: FontStyle) -> TextNode {
        TextNode {
            name: name.to_string(),
            content: content.to_string(),
            font: FontSpec {
                family: self.config.font_family.clone(),
                size,
                style,
            },
            fill: None,
        }
    }
}

fn frame(
    name: &str,
    direction: Direction,
    padding: f32,
    spacing: f32,
    children: Vec<RenderNode>,
) -> RenderNode {
    RenderNode::Frame(Frame {
        name: name.to_string(),
        direction,
        padding,
        spacing,
        width: None,
        fill: None,
        children,
    })
}

fn hex<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color.to_hex())
}

fn hex_opt<S: Serializer>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error> {
    match color {
        Some(color) => hex(color, serializer),
        None => serializer.serialize_none(),
    }
}
