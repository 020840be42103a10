//! QR code rendering for the access modal.
//!
//! Encodes a URL into a QR symbol and rasterizes it to a PNG data URL that
//! can be assigned straight to an `<img>` src. Rendering is pure so it runs
//! the same on native (tests) and in the browser.

use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use qrcode::{Color, QrCode};
use thiserror::Error;

/// Visual parameters for a rendered access code.
#[derive(Debug, Clone, PartialEq)]
pub struct QrImageOptions {
    /// Output edge length in pixels.
    pub width: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    /// Module color as `#RRGGBB`.
    pub dark: String,
    /// Background color as `#RRGGBB`.
    pub light: String,
}

impl Default for QrImageOptions {
    fn default() -> Self {
        Self {
            width: 300,
            margin: 2,
            dark: "#000000".to_owned(),
            light: "#FFFFFF".to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum QrImageError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Render `text` as a QR code and return it as a `data:image/png;base64,`
/// URL.
///
/// The symbol plus quiet zone is scaled to fill `options.width` square
/// pixels. A width smaller than one pixel per module is bumped up to the
/// symbol's natural size, matching what the canvas-based encoders do with an
/// undersized width hint.
pub fn render_data_url(text: &str, options: &QrImageOptions) -> Result<String, QrImageError> {
    let dark = parse_hex_color(&options.dark)?;
    let light = parse_hex_color(&options.light)?;

    let code = QrCode::new(text)?;
    let modules = code.to_colors();
    let symbol_width = code.width() as u32;
    let total_modules = symbol_width + 2 * options.margin;
    let width = options.width.max(total_modules);

    let mut image = RgbImage::from_pixel(width, width, Rgb(light));
    for y in 0..width {
        let module_y = module_at(y, width, total_modules);
        for x in 0..width {
            let module_x = module_at(x, width, total_modules);
            if module_x < options.margin
                || module_y < options.margin
                || module_x >= options.margin + symbol_width
                || module_y >= options.margin + symbol_width
            {
                continue;
            }
            let index =
                ((module_y - options.margin) * symbol_width + (module_x - options.margin)) as usize;
            if modules[index] == Color::Dark {
                image.put_pixel(x, y, Rgb(dark));
            }
        }
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        width,
        width,
        ExtendedColorType::Rgb8,
    )?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{}", encoded))
}

/// Map a pixel coordinate to the module it falls in.
fn module_at(px: u32, width: u32, total_modules: u32) -> u32 {
    ((u64::from(px) * u64::from(total_modules)) / u64::from(width)) as u32
}

fn parse_hex_color(color: &str) -> Result<[u8; 3], QrImageError> {
    let invalid = || QrImageError::InvalidColor(color.to_owned());
    let digits = color.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |range| u8::from_str_radix(&digits[range], 16).map_err(|_| invalid());
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
