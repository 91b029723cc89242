#![forbid(unsafe_code)]

//! Experience timeline: a progress line plus per-node highlight channels.
//!
//! Progress comes from a driver with [`ScrollOffsets::timeline`] anchors
//! (`start 50%` to `end 80%`). From it:
//!
//! - line height grows `0 → content_height` px over the whole range;
//! - line opacity fades in over the first fifth;
//! - node `i` of `n` lights up over `[i/n, (i + node_span)/n]`, driving its
//!   outer gradient, inner gradient, innermost fill, glow and scale. The
//!   innermost fill starts `transparent` and fades into its gradient.
//!
//! [`ScrollOffsets::timeline`]: folio_core::ScrollOffsets::timeline

use folio_style::{ParseError, StyleValue};

use crate::reactive::{Derived, Observable};
use crate::scenes::{Channel, Scene};
use crate::transform::MotionTransform;

/// Style endpoints and ranges for the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineConfig {
    /// Progress at which the line reaches full opacity.
    pub opacity_until: f64,
    /// Width of a node's activation window, as a fraction of its slot.
    pub node_span: f64,
    pub outer_from: String,
    pub outer_to: String,
    pub inner_from: String,
    pub inner_to: String,
    pub innermost_from: String,
    pub innermost_to: String,
    pub glow_from: String,
    pub glow_to: String,
    pub scale_from: String,
    pub scale_to: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            opacity_until: 0.2,
            node_span: 0.5,
            outer_from: "linear-gradient(135deg, rgba(255,255,255,0.1), rgba(255,255,255,0.05))"
                .into(),
            outer_to: "linear-gradient(135deg, rgba(59,130,246,0.3), rgba(34,211,238,0.3))".into(),
            inner_from: "linear-gradient(135deg, rgba(255,255,255,0.8), rgba(255,255,255,0.6))"
                .into(),
            inner_to: "linear-gradient(135deg, rgb(59,130,246), rgb(34,211,238))".into(),
            innermost_from: "transparent".into(),
            innermost_to: "linear-gradient(135deg, rgb(59,130,246), rgb(34,211,238))".into(),
            // Two zero-size layers so the glow blends layer by layer.
            glow_from: "0 0 0px rgba(59,130,246,0), 0 0 0px rgba(34,211,238,0)".into(),
            glow_to: "0 0 20px rgba(59,130,246,0.6), 0 0 40px rgba(34,211,238,0.3)".into(),
            scale_from: "scale(1)".into(),
            scale_to: "scale(1.1)".into(),
        }
    }
}

/// Per-node transforms, parsed once from a [`TimelineConfig`].
#[derive(Debug, Clone)]
struct NodeStyles {
    outer: MotionTransform,
    inner: MotionTransform,
    innermost: MotionTransform,
    glow: MotionTransform,
    scale: MotionTransform,
}

impl NodeStyles {
    fn parse(config: &TimelineConfig) -> Result<Self, ParseError> {
        Ok(Self {
            outer: MotionTransform::parse(&config.outer_from, &config.outer_to)?,
            inner: MotionTransform::parse(&config.inner_from, &config.inner_to)?,
            innermost: MotionTransform::parse(&config.innermost_from, &config.innermost_to)?,
            glow: MotionTransform::parse(&config.glow_from, &config.glow_to)?,
            scale: MotionTransform::parse(&config.scale_from, &config.scale_to)?,
        })
    }
}

#[derive(Debug)]
struct Node {
    outer: Derived<StyleValue>,
    inner: Derived<StyleValue>,
    innermost: Derived<StyleValue>,
    glow: Derived<StyleValue>,
    scale: Derived<StyleValue>,
}

/// Activation window of node `index` out of `count`.
#[must_use]
pub fn node_window(index: usize, count: usize, span: f64) -> (f64, f64) {
    let n = count.max(1) as f64;
    let i = index as f64;
    (i / n, (i + span) / n)
}

/// Timeline line and node channels bound to one progress observable.
#[derive(Debug)]
pub struct TimelineScene {
    content_height: f64,
    height: Derived<StyleValue>,
    opacity: Derived<StyleValue>,
    nodes: Vec<Node>,
}

impl TimelineScene {
    /// Bind the line and `node_count` nodes to `progress`.
    ///
    /// Fails if any configured style text does not parse.
    pub fn new(
        progress: &Observable<f64>,
        node_count: usize,
        content_height: f64,
        config: &TimelineConfig,
    ) -> Result<Self, ParseError> {
        let styles = NodeStyles::parse(config)?;
        let content_height = if content_height.is_finite() {
            content_height.max(0.0)
        } else {
            0.0
        };

        let height = MotionTransform::new(0.0, content_height).bind(progress);
        let opacity = MotionTransform::new(0.0, 1.0)
            .over(0.0, config.opacity_until)
            .bind(progress);
        let nodes = (0..node_count)
            .map(|i| {
                let (start, end) = node_window(i, node_count, config.node_span);
                let bind = |t: &MotionTransform| t.clone().over(start, end).bind(progress);
                Node {
                    outer: bind(&styles.outer),
                    inner: bind(&styles.inner),
                    innermost: bind(&styles.innermost),
                    glow: bind(&styles.glow),
                    scale: bind(&styles.scale),
                }
            })
            .collect();

        tracing::debug!(node_count, content_height, "timeline scene bound");
        Ok(Self {
            content_height,
            height,
            opacity,
            nodes,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Current line height in px.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.height.get().as_number().unwrap_or(0.0)
    }

    /// Current line opacity.
    #[must_use]
    pub fn line_opacity(&self) -> f64 {
        self.opacity.get().as_number().unwrap_or(0.0)
    }

    /// Current `(outer, inner, innermost, glow, scale)` CSS of node `index`.
    #[must_use]
    pub fn node_styles(&self, index: usize) -> Option<[String; 5]> {
        self.nodes.get(index).map(|node| {
            [
                node.outer.get().to_string(),
                node.inner.get().to_string(),
                node.innermost.get().to_string(),
                node.glow.get().to_string(),
                node.scale.get().to_string(),
            ]
        })
    }
}

impl Scene for TimelineScene {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn channels(&self) -> Vec<Channel> {
        let mut out = vec![
            Channel::new("line.height", format!("{}px", self.height.get())),
            Channel::new("line.opacity", self.opacity.get().to_string()),
        ];
        for (i, node) in self.nodes.iter().enumerate() {
            out.push(Channel::new(format!("node{i}.background"), node.outer.get().to_string()));
            out.push(Channel::new(format!("node{i}.dot"), node.inner.get().to_string()));
            out.push(Channel::new(format!("node{i}.core"), node.innermost.get().to_string()));
            out.push(Channel::new(format!("node{i}.box-shadow"), node.glow.get().to_string()));
            out.push(Channel::new(format!("node{i}.transform"), node.scale.get().to_string()));
        }
        out
    }
}
