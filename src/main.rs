use anyhow::{Context, Result};
use squircle_config::SquircleConfig;
use squircle_core::dpi::dp_to_px;
use squircle_core::{DEFAULT_TOLERANCE, SquircleProps, tessellate_fill, tessellate_stroke};
use squircle_css::{ShadowColor, parse_color};
use squircle_surface::{SquircleStyle, SquircleView};

const DEFAULT_SHADOW: &str = "0px 1px 3px rgba(15, 23, 42, 0.12), 0px 10px 24px -6px rgba(15, 23, 42, 0.28)";

/// `--name=value` from the command line.
fn arg(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args().find_map(|a| a.strip_prefix(&prefix).map(str::to_string))
}

fn arg_f32(name: &str, default: f32) -> Result<f32> {
    match arg(name) {
        Some(v) => v
            .parse()
            .with_context(|| format!("--{name} expects a number, got {v:?}")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let config = SquircleConfig::load();
    if let Some(categories) = config.shadow.diagnostics.as_deref() {
        squircle_css::diagnostics::init_diagnostics(categories);
    }

    let scale = config.dp_scale();
    let width = dp_to_px(arg_f32("width", 200.0)?, scale);
    let height = dp_to_px(arg_f32("height", 120.0)?, scale);
    let radius = dp_to_px(arg_f32("radius", 32.0)?, scale);
    let border = dp_to_px(arg_f32("border", 1.0)?, scale);
    let smoothing = arg_f32("smoothing", config.corner_smoothing())?;
    let shadow = arg("shadow").unwrap_or_else(|| DEFAULT_SHADOW.to_string());
    let background = match arg("background") {
        Some(v) => parse_color(&v).with_context(|| format!("unsupported --background color {v:?}"))?,
        None => ShadowColor::rgb(255, 255, 255),
    };
    let out = arg("out").unwrap_or_else(|| "squircle.png".to_string());

    let props = SquircleProps::new(width, height, radius)
        .with_corner_smoothing(smoothing)
        .with_border_width(border);
    let mut view = SquircleView::new(props)
        .with_dp_scale(scale)
        .with_style(SquircleStyle {
            background,
            border_color: ShadowColor::rgba(15, 23, 42, 0.16),
            clip_content: false,
        });
    view.set_box_shadow(Some(&shadow));
    log::info!(
        "rendering {}x{} squircle r={} s={} with {} shadow(s)",
        width,
        height,
        radius,
        smoothing,
        view.shadows().len()
    );

    let tolerance = config.geometry.lyon_tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let fill = view.layers_mut().fill_path().to_absolute();
    let fill_mesh = tessellate_fill(&fill, background.to_lin_premul(), tolerance)
        .context("tessellating fill")?;
    let stroke_mesh = tessellate_stroke(&fill, border, background.to_lin_premul(), tolerance)
        .context("tessellating border")?;
    log::info!(
        "mesh: fill {} triangles, border {} triangles (tolerance {})",
        fill_mesh.triangle_count(),
        stroke_mesh.triangle_count(),
        tolerance
    );

    let frame = view.render().context("rendering preview")?;
    frame
        .save_png(&out)
        .with_context(|| format!("writing {out}"))?;
    log::info!(
        "wrote {} ({}x{})",
        out,
        frame.pixmap.width(),
        frame.pixmap.height()
    );
    Ok(())
}
