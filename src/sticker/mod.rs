pub mod budget;

use crate::bus::MediaAttachment;
use crate::errors::BotError;
use crate::utils::media::is_image_magic_bytes;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

/// Sticker wire format: lossy-capable, alpha-capable.
pub const STICKER_MIME: &str = "image/webp";

/// Input byte bounds. Anything below the floor is junk or a broken
/// download; anything above the ceiling is not worth decoding.
pub const MIN_INPUT_BYTES: usize = 1024;
pub const MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Intrinsic pixel bounds per side.
pub const MIN_DIMENSION: u32 = 50;
pub const MAX_DIMENSION: u32 = 4096;

#[derive(Debug, Clone)]
pub struct StickerOptions {
    pub target_size: u32,
    pub transparent_background: bool,
    pub quality_start: u8,
    pub size_budget_bytes: usize,
}

impl Default for StickerOptions {
    fn default() -> Self {
        Self {
            target_size: 512,
            transparent_background: false,
            quality_start: 80,
            size_budget_bytes: 1024 * 1024,
        }
    }
}

/// Normalize an arbitrary input image into a square, size-budgeted sticker.
///
/// Contain-fit onto a `target_size` square canvas (white, or fully
/// transparent in transparent mode), upright per EXIF orientation, encoded
/// as WebP on a descending quality ladder until it fits the byte budget.
pub fn transcode(
    asset: &MediaAttachment,
    options: &StickerOptions,
) -> Result<MediaAttachment, BotError> {
    if !asset.mime_type.to_ascii_lowercase().starts_with("image/") {
        return Err(BotError::UnsupportedMediaType(asset.mime_type.clone()));
    }

    let bytes = asset.data.len();
    if !(MIN_INPUT_BYTES..=MAX_INPUT_BYTES).contains(&bytes) {
        return Err(BotError::SizeOutOfRange {
            bytes,
            min: MIN_INPUT_BYTES,
            max: MAX_INPUT_BYTES,
        });
    }

    if !is_image_magic_bytes(&asset.data) {
        return Err(BotError::UnsupportedMediaType(
            "data does not look like an image".to_string(),
        ));
    }

    let img = image::load_from_memory(&asset.data)
        .map_err(|e| BotError::UnsupportedMediaType(format!("undecodable image: {e}")))?;

    let (width, height) = (img.width(), img.height());
    if width < MIN_DIMENSION
        || height < MIN_DIMENSION
        || width > MAX_DIMENSION
        || height > MAX_DIMENSION
    {
        return Err(BotError::DimensionOutOfRange {
            width,
            height,
            min: MIN_DIMENSION,
            max: MAX_DIMENSION,
        });
    }

    let img = match exif_orientation(&asset.data) {
        Some(o) if o > 1 => apply_orientation(img, o),
        _ => img,
    };

    let canvas = compose_square(&img, options);

    let steps = budget::quality_ladder(options.quality_start);
    let encoded = budget::fit(options.size_budget_bytes, &steps, |quality| {
        encode_webp(&canvas, quality)
    })
    .map_err(|e| match e {
        budget::FitError::BudgetExceeded { budget, .. } => BotError::ImageTooComplex { budget },
        budget::FitError::Encode(e) => BotError::Internal(e),
    })?;

    tracing::debug!(
        "sticker transcode: {}x{} {} -> {} bytes webp",
        width,
        height,
        asset.mime_type,
        encoded.len()
    );

    Ok(MediaAttachment {
        mime_type: STICKER_MIME.to_string(),
        data: encoded,
    })
}

/// Contain-fit the image onto a square canvas, center-padding the shorter
/// dimension (floor on the leading edge, remainder trailing) so the result
/// is always exactly `target_size` on both sides.
fn compose_square(img: &DynamicImage, options: &StickerOptions) -> RgbaImage {
    let target = options.target_size;
    let background = if options.transparent_background {
        Rgba([0, 0, 0, 0])
    } else {
        Rgba([255, 255, 255, 255])
    };

    let resized = img.resize(target, target, FilterType::Triangle);
    let mut canvas = RgbaImage::from_pixel(target, target, background);
    let x = i64::from((target - resized.width()) / 2);
    let y = i64::from((target - resized.height()) / 2);
    image::imageops::overlay(&mut canvas, &resized.to_rgba8(), x, y);
    canvas
}

fn encode_webp(canvas: &RgbaImage, quality: u8) -> anyhow::Result<Vec<u8>> {
    let encoder = webp::Encoder::from_rgba(canvas.as_raw(), canvas.width(), canvas.height());
    Ok(encoder.encode(f32::from(quality)).to_vec())
}

/// Read the EXIF orientation tag (1–8), if the container carries one.
fn exif_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut std::io::Cursor::new(bytes))
        .ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Rotate/flip to upright per the EXIF orientation value.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
