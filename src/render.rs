use std::path::Path;

use anyhow::Result;

use crate::engine::ConnectorEngine;
use crate::theme::Theme;

/// Assembles the stroke-only overlay: one path per edge, dash metrics from
/// the measured lengths, reveal driven by a CSS dash-offset transition with
/// a per-edge delay. The element is sized to exactly cover the container
/// and carries no fill or background of its own.
pub fn render_overlay_svg(engine: &ConnectorEngine, theme: &Theme) -> String {
    let (width, height) = engine.container_size().unwrap_or((0.0, 0.0));
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"none\">",
    ));

    let duration_s = engine.config().reveal_duration_ms / 1000.0;
    for (index, path) in engine.paths().iter().enumerate() {
        let delay_s = engine.delay_ms(index) / 1000.0;
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-dasharray=\"{:.2}\" stroke-dashoffset=\"{:.2}\" style=\"transition: stroke-dashoffset {duration_s}s {}; transition-delay: {delay_s}s\"/>",
            path.d,
            theme.stroke_color,
            theme.stroke_width,
            theme.stroke_linecap,
            path.length,
            path.offset,
            theme.transition_easing,
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    theme: &Theme,
    render: &crate::config::RenderConfig,
) -> Result<()> {
    // The overlay itself is transparent; raster export gets the configured
    // backdrop painted behind it.
    let backdrop = format!(
        "><rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.export_background
    );
    let svg = svg.replacen('>', &backdrop, 1);

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &opt)?;
    let size = tree.size();

    // Scale to the configured raster dimensions, preserving aspect ratio.
    let scale = if size.width() > 0.0 && size.height() > 0.0 {
        (render.width / size.width()).min(render.height / size.height())
    } else {
        1.0
    };
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}
