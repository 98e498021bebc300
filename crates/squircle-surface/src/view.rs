//! Software rendition of a squircle view.
//!
//! Paints in the same order as the platform views: every shadow as its own
//! blurred layer (first entry furthest back), then the fill, then a border
//! stroke centered on the fill edge. Children drawn through [`Frame`] are
//! clipped to the inner edge of the border when `clip_content` is set.

use squircle_core::{SquircleLayers, SquircleProps, SquirclePath};
use squircle_css::{ShadowColor, ShadowDescriptor, parse_box_shadow};
use tiny_skia::{Mask, Pixmap, PixmapPaint, Stroke, Transform};

use crate::blur::{blur_rgba, sigma_for_radius};
use crate::convert::{fill_rule, solid_paint, to_skia_path};
use crate::error::{RenderError, RenderResult};

const MAX_DIMENSION: u32 = 16384;

/// Paint-only props of a view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquircleStyle {
    pub background: ShadowColor,
    pub border_color: ShadowColor,
    pub clip_content: bool,
}

impl Default for SquircleStyle {
    fn default() -> Self {
        Self {
            background: ShadowColor::rgba(0, 0, 0, 0.0),
            border_color: ShadowColor::rgb(0, 0, 0),
            clip_content: false,
        }
    }
}

/// A view's geometry, paint and shadows.
#[derive(Debug)]
pub struct SquircleView {
    layers: SquircleLayers,
    style: SquircleStyle,
    shadows: Vec<ShadowDescriptor>,
    dp_scale: f32,
}

/// One rendered frame. `origin` is where the view's top-left corner landed
/// inside `pixmap`; the rest is room for shadows.
pub struct Frame {
    pub pixmap: Pixmap,
    pub origin: [f32; 2],
    clip: Option<Mask>,
}

fn shadow_pad(shadow: &ShadowDescriptor) -> f32 {
    (shadow.spread.abs() + shadow.blur.max(0.0)).ceil() + 2.0
}

/// Room one shadow needs on each side of the view, counting its offset.
fn shadow_extent(shadow: &ShadowDescriptor) -> f32 {
    (shadow_pad(shadow) + shadow.offset_x.abs().max(shadow.offset_y.abs())).ceil()
}

fn fits_canvas(props: &SquircleProps, extent: f32) -> bool {
    let limit = MAX_DIMENSION as f32;
    (props.width + 2.0 * extent).ceil() <= limit && (props.height + 2.0 * extent).ceil() <= limit
}

fn path_fill(pixmap: &mut Pixmap, path: &SquirclePath, color: ShadowColor, transform: Transform) {
    let abs = path.to_absolute();
    if let Some(skia) = to_skia_path(&abs) {
        pixmap.fill_path(&skia, &solid_paint(color), fill_rule(abs.fill_rule), transform, None);
    }
}

impl SquircleView {
    pub fn new(props: SquircleProps) -> Self {
        Self {
            layers: SquircleLayers::new(props),
            style: SquircleStyle::default(),
            shadows: Vec::new(),
            dp_scale: 1.0,
        }
    }

    pub fn with_style(mut self, style: SquircleStyle) -> Self {
        self.style = style;
        self
    }

    /// Shadow lengths are in density-independent pixels and multiplied by
    /// this before drawing.
    pub fn with_dp_scale(mut self, dp_scale: f32) -> Self {
        self.dp_scale = if dp_scale.is_finite() && dp_scale > 0.0 {
            dp_scale
        } else {
            1.0
        };
        self
    }

    pub fn props(&self) -> &SquircleProps {
        self.layers.props()
    }

    pub fn layers_mut(&mut self) -> &mut SquircleLayers {
        &mut self.layers
    }

    pub fn style_mut(&mut self) -> &mut SquircleStyle {
        &mut self.style
    }

    pub fn shadows(&self) -> &[ShadowDescriptor] {
        &self.shadows
    }

    pub fn set_box_shadow(&mut self, value: Option<&str>) {
        let scale = self.dp_scale;
        self.shadows = value
            .map(parse_box_shadow)
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.scaled(scale))
            .collect();
        self.layers.retain_shadows(self.shadows.len());
        log::debug!(target: "surface", "box shadow set: {} layer(s)", self.shadows.len());
    }

    /// Room needed on each side of the view so no shadow is cut off.
    ///
    /// Shadows too large for a single canvas are left out; [`Self::render`]
    /// skips them.
    pub fn margin(&self) -> f32 {
        let props = self.layers.props();
        self.shadows
            .iter()
            .map(shadow_extent)
            .filter(|&extent| fits_canvas(props, extent))
            .fold(0.0, f32::max)
    }

    /// Render into a new pixmap sized to the view plus [`Self::margin`].
    pub fn render(&mut self) -> RenderResult<Frame> {
        let props = *self.layers.props();
        let margin = self.margin();
        let width = (props.width + 2.0 * margin).ceil().max(0.0) as u32;
        let height = (props.height + 2.0 * margin).ceil().max(0.0) as u32;
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
        let origin = [margin, margin];
        let at_origin = Transform::from_translate(margin, margin);

        for index in 0..self.shadows.len() {
            self.draw_shadow(&mut pixmap, index, origin);
        }

        let fill = self.layers.fill_path();
        path_fill(&mut pixmap, &fill, self.style.background, at_origin);

        if props.border_width > 0.0 {
            if let Some(skia) = to_skia_path(&fill.to_absolute()) {
                let stroke = Stroke {
                    width: props.border_width,
                    line_cap: tiny_skia::LineCap::Round,
                    line_join: tiny_skia::LineJoin::Round,
                    ..Default::default()
                };
                pixmap.stroke_path(
                    &skia,
                    &solid_paint(self.style.border_color),
                    &stroke,
                    at_origin,
                    None,
                );
            }
        }

        let clip = if self.style.clip_content {
            let clip_path = self.layers.clip_path().to_absolute();
            // an empty clip (border wider than the view) still hides children
            Mask::new(width, height).map(|mut mask| {
                if let Some(skia) = to_skia_path(&clip_path) {
                    mask.fill_path(&skia, fill_rule(clip_path.fill_rule), true, at_origin);
                }
                mask
            })
        } else {
            None
        };

        log::debug!(
            target: "surface",
            "rendered {}x{} view into {}x{} pixmap",
            props.width,
            props.height,
            width,
            height
        );
        Ok(Frame {
            pixmap,
            origin,
            clip,
        })
    }

    fn draw_shadow(&mut self, target: &mut Pixmap, index: usize, origin: [f32; 2]) {
        let shadow = self.shadows[index];
        if !shadow.is_visible() {
            return;
        }
        let props = *self.layers.props();
        if !fits_canvas(&props, shadow_extent(&shadow)) {
            log::warn!(target: "surface", "skipping shadow {index}: too large to rasterize");
            return;
        }
        if props.width + 2.0 * shadow.spread <= 0.0 || props.height + 2.0 * shadow.spread <= 0.0 {
            log::debug!(target: "surface", "skipping shadow {index}: spread collapses the silhouette");
            return;
        }
        let pad = shadow_pad(&shadow);
        let layer_w = (props.width + 2.0 * pad).round().max(1.0) as u32;
        let layer_h = (props.height + 2.0 * pad).round().max(1.0) as u32;
        let Some(mut layer) = Pixmap::new(layer_w, layer_h) else {
            log::warn!(target: "surface", "skipping shadow {index}: {layer_w}x{layer_h} layer");
            return;
        };

        let path = self.layers.shadow_path(index, shadow.spread);
        path_fill(&mut layer, &path, shadow.color, Transform::from_translate(pad, pad));
        blur_rgba(
            layer.data_mut(),
            layer_w as usize,
            layer_h as usize,
            sigma_for_radius(shadow.blur),
        );

        let x = origin[0] - pad + shadow.offset_x;
        let y = origin[1] - pad + shadow.offset_y;
        target.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::from_translate(x.round(), y.round()),
            None,
        );
    }
}

impl Frame {
    /// Fill a child rectangle given in view coordinates, clipped like the
    /// view's children.
    pub fn fill_child(&mut self, x: f32, y: f32, w: f32, h: f32, color: ShadowColor) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x + self.origin[0], y + self.origin[1], w, h)
        else {
            return;
        };
        self.pixmap.fill_rect(
            rect,
            &solid_paint(color),
            Transform::identity(),
            self.clip.as_ref(),
        );
    }

    pub fn is_clipped(&self) -> bool {
        self.clip.is_some()
    }

    /// Straight-alpha RGBA of the pixel at view coordinates.
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let px = x + self.origin[0] as i32;
        let py = y + self.origin[1] as i32;
        if px < 0 || py < 0 {
            return None;
        }
        let c = self.pixmap.pixel(px as u32, py as u32)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Png(e.to_string()))
    }

    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> RenderResult<()> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RenderError::Png(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> SquircleView {
        SquircleView::new(SquircleProps::new(100.0, 60.0, 20.0)).with_style(SquircleStyle {
            background: ShadowColor::rgb(255, 255, 255),
            border_color: ShadowColor::rgb(255, 0, 0),
            clip_content: false,
        })
    }

    #[test]
    fn plain_view_has_no_margin() {
        let mut view = card();
        let frame = view.render().expect("render");
        assert_eq!(frame.origin, [0.0, 0.0]);
        assert_eq!((frame.pixmap.width(), frame.pixmap.height()), (100, 60));
        assert_eq!(frame.pixel_at(50, 30), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel_at(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn zero_size_is_an_error() {
        let mut view = SquircleView::new(SquircleProps::new(0.0, 10.0, 4.0));
        assert!(matches!(
            view.render(),
            Err(RenderError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn shadow_grows_the_canvas_and_paints_below() {
        let mut view = card();
        view.set_box_shadow(Some("0 6 8 0 rgba(0, 0, 0, 0.5)"));
        assert!(view.margin() >= 16.0);
        let frame = view.render().expect("render");
        assert!(frame.origin[0] >= 16.0);
        let below = frame.pixel_at(50, 62).expect("below");
        assert!(below[3] > 0);
        let above = frame.pixel_at(50, -12).expect("above");
        assert!(above[3] < below[3]);
    }

    #[test]
    fn dp_scale_applies_to_shadows() {
        let mut view = card().with_dp_scale(2.0);
        view.set_box_shadow(Some("1 2 3 4 #000"));
        let s = view.shadows()[0];
        assert_eq!((s.offset_x, s.offset_y, s.blur, s.spread), (2.0, 4.0, 6.0, 8.0));
        view.set_box_shadow(None);
        assert!(view.shadows().is_empty());
    }

    #[test]
    fn border_is_painted_on_the_edge() {
        let mut view = card();
        view.layers_mut().update(|p| p.border_width = 4.0);
        let frame = view.render().expect("render");
        let edge = frame.pixel_at(50, 1).expect("edge");
        assert_eq!(edge, [255, 0, 0, 255]);
    }

    #[test]
    fn children_are_clipped_when_requested() {
        let mut view = card();
        view.layers_mut().update(|p| p.border_width = 2.0);
        view.style_mut().clip_content = true;
        let mut frame = view.render().expect("render");
        assert!(frame.is_clipped());
        frame.fill_child(0.0, 0.0, 100.0, 60.0, ShadowColor::rgb(0, 0, 255));
        assert_eq!(frame.pixel_at(50, 30), Some([0, 0, 255, 255]));
        assert_ne!(frame.pixel_at(1, 1).map(|p| p[2]), Some(255));
    }

    #[test]
    fn oversized_shadow_is_skipped_and_the_view_still_renders() {
        let mut view = card();
        view.set_box_shadow(Some("0 0 20000 #000, 0 2 4 rgba(0, 0, 0, 0.5)"));
        assert_eq!(view.shadows().len(), 2);
        let margin = view.margin();
        assert!(margin > 0.0 && margin < 20.0);
        let frame = view.render().expect("render");
        assert!(frame.pixmap.width() <= MAX_DIMENSION);
        assert_eq!(frame.pixel_at(50, 30), Some([255, 255, 255, 255]));
        assert!(frame.pixel_at(50, 62).expect("below")[3] > 0);
    }

    #[test]
    fn collapsed_spread_draws_no_shadow() {
        let mut view = card();
        view.set_box_shadow(Some("0 0 0 -80 #000"));
        let frame = view.render().expect("render");
        let pad = view.margin() as i32;
        assert!(pad > 0);
        assert_eq!(frame.pixel_at(-pad, -pad).map(|p| p[3]), Some(0));
        assert_eq!(frame.pixel_at(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(frame.pixel_at(50, 30), Some([255, 255, 255, 255]));
    }

    #[test]
    fn border_wider_than_the_view_hides_children() {
        let mut view = card();
        view.layers_mut().update(|p| p.border_width = 80.0);
        view.style_mut().clip_content = true;
        let mut frame = view.render().expect("render");
        assert!(frame.is_clipped());
        frame.fill_child(0.0, 0.0, 100.0, 60.0, ShadowColor::rgb(0, 0, 255));
        assert_ne!(frame.pixel_at(50, 30).map(|p| p[2]), Some(255));
    }
}
