//! Icon rendering.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::icons::errors::IconError;
use crate::types::Color;

/// Produces an image file at `outfile` by compositing a solid `color` through
/// the alpha mask of `template`.
///
/// Implementations must be deterministic for identical inputs and must not
/// modify `template`.
pub trait IconRenderer: Send + Sync {
    fn render(&self, template: &Path, outfile: &Path, color: Color) -> Result<(), IconError>;
}

/// Default renderer: "source-in" composite on the template's alpha channel.
///
/// Every output pixel takes the RGB of `color`; its alpha is the mask alpha
/// scaled by the color's alpha. Fully transparent pixels are written as
/// transparent black so identical inputs give byte-identical PNGs.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaskRenderer;

fn to_channel(component: f64) -> u8 {
    if component.is_nan() {
        return 0;
    }
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl IconRenderer for MaskRenderer {
    fn render(&self, template: &Path, outfile: &Path, color: Color) -> Result<(), IconError> {
        let mask = image::open(template)
            .map_err(|e| IconError::RenderFailed {
                path: outfile.to_path_buf(),
                message: format!("cannot read template {}: {}", template.display(), e),
            })?
            .to_rgba8();

        let [red, green, blue, alpha] = color.components().map(to_channel);
        let (width, height) = mask.dimensions();

        let tinted = RgbaImage::from_fn(width, height, |x, y| {
            let mask_alpha = u32::from(mask.get_pixel(x, y)[3]);
            let out_alpha = ((mask_alpha * u32::from(alpha) + 127) / 255) as u8;
            if out_alpha == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([red, green, blue, out_alpha])
            }
        });

        tinted
            .save_with_format(outfile, ImageFormat::Png)
            .map_err(|e| IconError::RenderFailed {
                path: outfile.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(
            event = "core.icons.render_completed",
            path = %outfile.display(),
            width,
            height,
        );
        Ok(())
    }
}
