//! Paths a rendering shell needs for one squircle view.
//!
//! Given component props, [`SquircleLayers`] derives the fill path (inset by
//! the border so the stroke stays centered on the fill edge), the outer
//! silhouette shadows are cast from, the inner clip for children, and one
//! spread-adjusted path per shadow. Each role has its own size-one cache.

use std::sync::Arc;

use crate::cache::{PathCache, PathKey};
use crate::path::SquirclePath;

pub const DEFAULT_CORNER_SMOOTHING: f32 = 0.6;

/// Geometry-affecting props of a squircle view, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquircleProps {
    pub width: f32,
    pub height: f32,
    pub border_radius: f32,
    pub corner_smoothing: f32,
    pub border_width: f32,
}

impl Default for SquircleProps {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            border_radius: 0.0,
            corner_smoothing: DEFAULT_CORNER_SMOOTHING,
            border_width: 0.0,
        }
    }
}

impl SquircleProps {
    pub fn new(width: f32, height: f32, border_radius: f32) -> Self {
        Self {
            width,
            height,
            border_radius,
            ..Self::default()
        }
    }

    pub fn with_corner_smoothing(mut self, corner_smoothing: f32) -> Self {
        self.corner_smoothing = corner_smoothing;
        self
    }

    pub fn with_border_width(mut self, border_width: f32) -> Self {
        self.border_width = border_width;
        self
    }

    fn border(&self) -> f32 {
        if self.border_width.is_finite() {
            self.border_width.max(0.0)
        } else {
            0.0
        }
    }

    /// Radius of the outer silhouette: the fill radius grown to the outside
    /// edge of a centered border stroke.
    pub fn outer_radius(&self) -> f32 {
        self.border_radius + self.border() / 2.0
    }

    pub fn fill_key(&self) -> PathKey {
        PathKey {
            width: self.width,
            height: self.height,
            radius: self.border_radius,
            corner_smoothing: self.corner_smoothing,
            stroke_width: self.border(),
        }
    }

    pub fn outer_key(&self) -> PathKey {
        PathKey {
            width: self.width,
            height: self.height,
            radius: self.outer_radius(),
            corner_smoothing: self.corner_smoothing,
            stroke_width: 0.0,
        }
    }

    pub fn clip_key(&self) -> PathKey {
        let bw = self.border();
        PathKey {
            width: self.width,
            height: self.height,
            radius: (self.border_radius - bw).max(0.0),
            corner_smoothing: self.corner_smoothing,
            stroke_width: (2.0 * bw).max(0.0),
        }
    }

    /// The outer silhouette grown (or shrunk, for negative spread) by `spread`
    /// on every side.
    pub fn shadow_key(&self, spread: f32) -> PathKey {
        let spread = if spread.is_finite() { spread } else { 0.0 };
        PathKey {
            width: self.width,
            height: self.height,
            radius: (self.outer_radius() + spread).max(0.0),
            corner_smoothing: self.corner_smoothing,
            stroke_width: -2.0 * spread,
        }
    }
}

#[derive(Debug)]
pub struct SquircleLayers {
    props: SquircleProps,
    fill: PathCache,
    outer: PathCache,
    clip: PathCache,
    shadows: Vec<PathCache>,
    caching: bool,
}

impl SquircleLayers {
    pub fn new(props: SquircleProps) -> Self {
        Self {
            props,
            fill: PathCache::new(),
            outer: PathCache::new(),
            clip: PathCache::new(),
            shadows: Vec::new(),
            caching: true,
        }
    }

    /// Layers that rebuild every path on every request.
    pub fn uncached(props: SquircleProps) -> Self {
        Self {
            props,
            fill: PathCache::disabled(),
            outer: PathCache::disabled(),
            clip: PathCache::disabled(),
            shadows: Vec::new(),
            caching: false,
        }
    }

    pub fn props(&self) -> &SquircleProps {
        &self.props
    }

    /// Replace the props. Caches are keyed by value, so nothing needs to be
    /// invalidated here.
    pub fn set_props(&mut self, props: SquircleProps) {
        self.props = props;
    }

    pub fn update(&mut self, f: impl FnOnce(&mut SquircleProps)) {
        f(&mut self.props);
    }

    pub fn fill_path(&mut self) -> Arc<SquirclePath> {
        self.fill.get(self.props.fill_key())
    }

    pub fn outer_path(&mut self) -> Arc<SquirclePath> {
        self.outer.get(self.props.outer_key())
    }

    pub fn clip_path(&mut self) -> Arc<SquirclePath> {
        self.clip.get(self.props.clip_key())
    }

    /// Path for the shadow at `index` in paint order.
    pub fn shadow_path(&mut self, index: usize, spread: f32) -> Arc<SquirclePath> {
        while self.shadows.len() <= index {
            self.shadows.push(if self.caching {
                PathCache::new()
            } else {
                PathCache::disabled()
            });
        }
        self.shadows[index].get(self.props.shadow_key(spread))
    }

    /// Drop per-shadow caches beyond `count`, after the shadow list shrinks.
    pub fn retain_shadows(&mut self, count: usize) {
        self.shadows.truncate(count);
    }
}
