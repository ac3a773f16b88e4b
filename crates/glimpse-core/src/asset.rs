use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::DEFAULT_FPS;
use crate::error::{GlimpseError, Result};
use crate::io::ser::SerReader;

/// Immutable descriptor of the source equirectangular video.
///
/// SER carries no frame rate in its header, so `fps` comes from the
/// timestamp trailer when one is present, else from the caller, else
/// [`DEFAULT_FPS`].
#[derive(Clone, Debug)]
pub struct VideoAsset {
    pub path: PathBuf,
    pub folder: PathBuf,
    pub name: String,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub total_frames: usize,
}

impl VideoAsset {
    /// Build the descriptor by probing the SER header.
    pub fn from_ser(path: &Path, fps_override: Option<f64>) -> Result<Self> {
        let reader = SerReader::open(path)?;
        let fps = fps_override
            .or_else(|| reader.derived_fps())
            .unwrap_or(DEFAULT_FPS);

        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| GlimpseError::Director(format!("No file name in {}", path.display())))?;

        Ok(Self {
            path: path.to_path_buf(),
            folder,
            name,
            fps,
            width: reader.header.width,
            height: reader.header.height,
            bit_depth: reader.header.pixel_depth,
            total_frames: reader.frame_count(),
        })
    }

    /// Per-source working directory: `<folder>/<name>/`.
    pub fn workdir(&self) -> PathBuf {
        self.folder.join(&self.name)
    }

    /// Create the working directory if absent. Failure is fatal.
    pub fn ensure_workdir(&self) -> Result<PathBuf> {
        let dir = self.workdir();
        fs::create_dir_all(&dir).map_err(|e| {
            GlimpseError::Director(format!(
                "Could not create working directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(dir)
    }

    /// Segment file name: `<name>_g<4-digit-index>.ser`.
    pub fn split_name(&self, time_block: usize) -> String {
        format!("{}_g{:04}.ser", self.name, time_block)
    }

    /// View file name: `<name>_g<4-digit-index>_h<3-digit-pan>_v<3-digit-tilt>.ser`.
    pub fn view_name(&self, time_block: usize, lambda_deg: f64, phi_deg: f64) -> String {
        format!(
            "{}_g{:04}_h{:03}_v{:03}.ser",
            self.name,
            time_block,
            lambda_deg.round() as i64,
            phi_deg.round() as i64
        )
    }
}

/// One fixed-duration chunk of the source video.
#[derive(Clone, Debug)]
pub struct Segment {
    pub path: PathBuf,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub index: usize,
    pub frame_count: usize,
}

/// A reprojected clip: one segment seen under one fixed direction.
#[derive(Clone, Debug)]
pub struct View {
    pub path: PathBuf,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub segment_index: usize,
    pub phi_index: usize,
    pub lambda_index: usize,
    pub frame_count: usize,
}
