//! Image decode/encode boundaries
//!
//! Workers own raw RGBA8 buffers internally; this module is the only place
//! that touches encoded image files.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::debug;

use contracts::{PipelineError, TextureBuffer, WorkerId};

/// Decode an image file into an owned RGBA8 buffer
pub fn load_texture(path: &Path) -> Result<TextureBuffer, PipelineError> {
    let decoded = image::open(path)
        .map_err(|e| PipelineError::image_decode(path.display().to_string(), e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "decoded input image");
    Ok(TextureBuffer::from_bytes(width, height, decoded.as_raw()))
}

/// Cheaply verify that a path points at a decodable image.
///
/// Returns its dimensions; used by the parser to reject bad inputs before a
/// run starts.
pub fn probe_image(path: &Path) -> Result<(u32, u32), PipelineError> {
    ImageReader::open(path)
        .map_err(|e| PipelineError::image_decode(path.display().to_string(), e.to_string()))?
        .into_dimensions()
        .map_err(|e| PipelineError::image_decode(path.display().to_string(), e.to_string()))
}

/// Save one worker's buffer under a worker-indexed name.
///
/// `path_spec` is what the user typed for the output stage: an optional
/// directory prefix and a filename with an optional extension (default jpg).
/// Worker 2 of `output shots/img.png` writes `shots/img_2.png`. Parent
/// directories are created as needed. Returns the path written.
pub fn save_worker_texture(
    texture: &TextureBuffer,
    path_spec: &str,
    worker: WorkerId,
) -> Result<PathBuf, PipelineError> {
    let spec_path = Path::new(path_spec);
    let file_name = spec_path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(path_spec);
    let (stem, ext) = file_name.split_once('.').unwrap_or((file_name, "jpg"));
    let indexed = format!("{stem}_{worker}.{ext}");
    let target = match spec_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(indexed),
        _ => PathBuf::from(indexed),
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let format = ImageFormat::from_extension(ext).unwrap_or(ImageFormat::Jpeg);
    let img = RgbaImage::from_raw(
        texture.width(),
        texture.height(),
        texture.as_bytes().to_vec(),
    )
    .ok_or_else(|| {
        PipelineError::image_save(target.display().to_string(), "buffer size mismatch")
    })?;

    // JPEG has no alpha channel; flatten before encoding.
    let result = if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .save_with_format(&target, format)
    } else {
        img.save_with_format(&target, format)
    };
    result.map_err(|e| PipelineError::image_save(target.display().to_string(), e.to_string()))?;

    debug!(path = %target.display(), worker = %worker, "saved output image");
    Ok(target)
}
