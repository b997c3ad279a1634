use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;

const MAX_MEDIA_SIZE: usize = 20 * 1024 * 1024; // 20MB

/// How long a saved media file may sit in the media dir before cleanup.
const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Return the `~/.stickerbot/media/` directory, creating it if needed.
pub fn media_dir() -> Result<PathBuf> {
    let dir = super::get_bot_home()
        .context("failed to determine stickerbot home")?
        .join("media");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create media directory: {}", dir.display()))?;
    Ok(dir)
}

/// Save binary data to a file in `~/.stickerbot/media/`.
///
/// Validates size (20MB max) and image magic bytes for image extensions.
/// Returns the absolute path to the saved file.
pub fn save_media_file(bytes: &[u8], prefix: &str, extension: &str) -> Result<String> {
    if bytes.is_empty() {
        bail!("empty media data");
    }
    if bytes.len() > MAX_MEDIA_SIZE {
        bail!(
            "media too large: {} bytes (max {})",
            bytes.len(),
            MAX_MEDIA_SIZE
        );
    }

    let image_exts = ["png", "jpg", "jpeg", "gif", "webp"];
    if image_exts.contains(&extension) && !is_image_magic_bytes(bytes) {
        bail!(
            "data does not match expected image format for .{}",
            extension
        );
    }

    let media_dir = media_dir()?;

    // Sanitize prefix and extension to prevent path traversal
    let safe_prefix = crate::utils::safe_filename(prefix);
    let safe_ext = crate::utils::safe_filename(extension);

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let random = fastrand::u32(..);
    let filename = format!("{safe_prefix}_{timestamp}_{random:08x}.{safe_ext}");
    let path = media_dir.join(&filename);

    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write media file: {}", path.display()))?;

    Ok(path.to_string_lossy().to_string())
}

/// Remove media files older than one hour. Best-effort; errors on
/// individual files are skipped so one bad entry never blocks the sweep.
pub fn cleanup_stale_media() -> Result<usize> {
    let dir = media_dir()?;
    let mut removed = 0;
    for entry in std::fs::read_dir(&dir)? {
        let Ok(entry) = entry else { continue };
        let Ok(meta) = entry.metadata() else { continue };
        if !meta.is_file() {
            continue;
        }
        let Ok(modified) = meta.modified() else {
            continue;
        };
        if modified.elapsed().unwrap_or_default() > STALE_AFTER
            && std::fs::remove_file(entry.path()).is_ok()
        {
            tracing::debug!("removed stale media file: {}", entry.path().display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// Map a file extension to the image MIME type the pipeline expects.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/png",
    }
}

/// Check if bytes start with known image magic bytes.
pub fn is_image_magic_bytes(data: &[u8]) -> bool {
    if data.len() < 4 {
        return false;
    }
    // PNG: 89 50 4E 47
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return true;
    }
    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return true;
    }
    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF8") {
        return true;
    }
    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return true;
    }
    false
}
