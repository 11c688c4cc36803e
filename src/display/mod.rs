use std::fs;
use std::path::{Path, PathBuf};
use image::ImageFormat;
use crate::errors::DisplayError;
use crate::rendering::BackBuffer;

/// A bistable panel. `push` blocks until the hardware refresh has completed;
/// taking `&mut self` keeps pushes strictly one at a time.
pub trait PanelDisplay {
    fn dimensions(&self) -> (u32, u32);
    fn push(&mut self, frame: &BackBuffer) -> Result<(), DisplayError>;
}

/// Writes every frame to a PNG file, replacing the previous one atomically.
/// Used headless and as the hand-off point for an external panel driver.
pub struct PngFileDisplay {
    path: PathBuf,
    width: u32,
    height: u32
}

impl PngFileDisplay {
    pub fn new(path: &Path, width: u32, height: u32) -> Self {
        Self { path: path.to_path_buf(), width, height }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

impl PanelDisplay for PngFileDisplay {
    fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    fn push(&mut self, frame: &BackBuffer) -> Result<(), DisplayError> {
        check_frame(self.dimensions(), frame)?;

        let staging = self.staging_path();
        frame.save_with_format(&staging, ImageFormat::Png).map_err(DisplayError::Encode)?;
        fs::rename(&staging, &self.path).map_err(DisplayError::Io)?;

        tracing::debug!(path = %self.path.display(), "frame written");
        Ok(())
    }
}

pub fn check_frame(dimensions: (u32, u32), frame: &BackBuffer) -> Result<(), DisplayError> {
    let (width, height) = dimensions;
    if frame.dimensions() != dimensions {
        return Err(DisplayError::FrameSize { frame_width: frame.width(), frame_height: frame.height(), width, height });
    }
    Ok(())
}
