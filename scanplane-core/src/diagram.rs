//! Flow diagram renderer
//!
//! Lays out an ordered list of labels as boxes connected left to right by
//! arrows and renders the result as a standalone SVG document.
//!
//! Geometry depends only on the number of labels and the constants below, so
//! rendering the same labels twice yields the same document. Labels come from
//! remote plans and are escaped before they are embedded.

use std::fmt::Write;

/// Width of a node box
pub const NODE_WIDTH: u32 = 180;
/// Height of a node box
pub const NODE_HEIGHT: u32 = 56;
/// Horizontal space covered by a connector line
pub const GAP_X: u32 = 40;
/// Extra room left for the arrowhead after a connector line
pub const ARROW_LEN: u32 = 20;
/// Horizontal canvas padding
pub const PAD_X: u32 = 24;
/// Vertical canvas padding
pub const PAD_Y: u32 = 18;

/// Distance between the right edge of a node and the start of its connector
const CONNECTOR_INSET: u32 = 5;
const CORNER_RADIUS: u32 = 10;

/// Text used in place of a diagram when there is nothing to draw
pub const PLACEHOLDER: &str = "N/A";

/// Accessible label of the SVG root
pub const ARIA_LABEL: &str = "Architecture flow";

/// Position and size of one node box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NodeBox {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }
}

/// Horizontal arrow between two consecutive nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    pub x1: u32,
    pub x2: u32,
    pub y: u32,
}

impl Connector {
    /// Connector leaving `from` towards the next node
    fn after(from: &NodeBox) -> Self {
        let x1 = from.right() + CONNECTOR_INSET;
        Self {
            x1,
            x2: x1 + GAP_X,
            y: from.center_y(),
        }
    }
}

/// Computed geometry for `n` nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<NodeBox>,
    pub connectors: Vec<Connector>,
}

impl Layout {
    /// Lays out `n` nodes
    ///
    /// Returns `None` when there is nothing to draw, or when the canvas would
    /// be wider than `u32::MAX`.
    pub fn for_count(n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let count = u32::try_from(n).ok()?;

        // Every node and connector lies inside the canvas, so checking the
        // width covers all coordinates.
        let width = (count - 1)
            .checked_mul(GAP_X + ARROW_LEN)
            .and_then(|links| count.checked_mul(NODE_WIDTH)?.checked_add(links))
            .and_then(|w| w.checked_add(2 * PAD_X))?;
        let height = 2 * PAD_Y + NODE_HEIGHT;

        let mut nodes = Vec::with_capacity(n);
        let mut connectors = Vec::with_capacity(n - 1);
        let mut x = PAD_X;

        for i in 0..n {
            let node = NodeBox {
                x,
                y: PAD_Y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
            };
            nodes.push(node);

            if i + 1 < n {
                let connector = Connector::after(&node);
                // The next node starts where the arrowhead room ends.
                x = connector.x2 + ARROW_LEN - CONNECTOR_INSET;
                connectors.push(connector);
            }
        }

        Some(Self {
            width,
            height,
            nodes,
            connectors,
        })
    }
}

/// Rendered diagram, or the placeholder when there was nothing to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowDiagram {
    Unavailable,
    Svg(SvgDiagram),
}

/// A rendered SVG document along with the geometry it was drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDiagram {
    pub layout: Layout,
    pub markup: String,
}

impl FlowDiagram {
    /// Markup to embed: the SVG document, or the placeholder text
    pub fn markup(&self) -> &str {
        match self {
            FlowDiagram::Unavailable => PLACEHOLDER,
            FlowDiagram::Svg(svg) => &svg.markup,
        }
    }

    pub fn layout(&self) -> Option<&Layout> {
        match self {
            FlowDiagram::Unavailable => None,
            FlowDiagram::Svg(svg) => Some(&svg.layout),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FlowDiagram::Svg(_))
    }
}

/// Destination for a rendered diagram
pub trait MountPoint {
    fn mount(&mut self, diagram: &FlowDiagram);
}

impl MountPoint for String {
    fn mount(&mut self, diagram: &FlowDiagram) {
        self.clear();
        self.push_str(diagram.markup());
    }
}

/// Renders `items` into `mount`. Without a mount point nothing happens.
pub fn render_into<S: AsRef<str>>(mount: Option<&mut dyn MountPoint>, items: Option<&[S]>) {
    if let Some(mount) = mount {
        mount.mount(&render(items));
    }
}

/// Renders the labels as a flow diagram.
///
/// Absent or empty input yields [`FlowDiagram::Unavailable`].
pub fn render<S: AsRef<str>>(items: Option<&[S]>) -> FlowDiagram {
    let Some(items) = items else {
        return FlowDiagram::Unavailable;
    };
    let Some(layout) = Layout::for_count(items.len()) else {
        return FlowDiagram::Unavailable;
    };

    let markup = draw(&layout, items);
    FlowDiagram::Svg(SvgDiagram { layout, markup })
}

fn draw<S: AsRef<str>>(layout: &Layout, items: &[S]) -> String {
    let (width, height) = (layout.width, layout.height);
    let mut svg = String::with_capacity(1024 + items.len() * 512);

    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="{ARIA_LABEL}">"#
    );
    svg.push_str(concat!(
        "<defs>",
        r#"<marker id="arrow" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto">"#,
        r#"<polygon points="0 0, 10 3.5, 0 7" fill="currentColor"/>"#,
        "</marker>",
        r#"<filter id="softShadow" x="-20%" y="-20%" width="140%" height="140%">"#,
        r##"<feDropShadow dx="0" dy="2" stdDeviation="2" flood-color="#000" flood-opacity="0.25"/>"##,
        "</filter>",
        "</defs>",
    ));

    for (node, label) in layout.nodes.iter().zip(items) {
        let _ = write!(
            svg,
            r##"<g filter="url(#softShadow)"><rect x="{}" y="{}" rx="{r}" ry="{r}" width="{}" height="{}" fill="#0f172a" stroke="#334155" stroke-width="1"/>"##,
            node.x,
            node.y,
            node.width,
            node.height,
            r = CORNER_RADIUS,
        );
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-family="ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Ubuntu" font-size="14" fill="#e2e8f0">{}</text></g>"##,
            node.center_x(),
            node.center_y(),
            escape_markup(label.as_ref()),
        );
    }

    for c in &layout.connectors {
        let _ = write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="currentColor" stroke-width="2" marker-end="url(#arrow)"/>"#,
            c.x1, c.y, c.x2, c.y,
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Escapes the five reserved markup characters
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
