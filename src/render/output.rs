use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{PassError, PassResult};

/// Write `card` as PNG, creating parent directories as needed.
///
/// With `overwrite == false` an existing file at `path` is left untouched and reported as
/// [`PassError::InvalidInput`].
pub fn write_png(card: &RgbaImage, path: &Path, overwrite: bool) -> PassResult<()> {
    if !overwrite && path.exists() {
        return Err(PassError::invalid_input(format!(
            "output '{}' already exists",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        card.as_raw(),
        card.width(),
        card.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "card written");
    Ok(())
}
