//! Picture import and viewing through external programs.
//!
//! Importing shrinks and converts a picture with ImageMagick (`identify` and
//! `convert`). Without ImageMagick only `.jpg` files can be imported, and they
//! are copied untouched.
//!
//! The store decides the target file name; an importer only has to put the
//! picture there.

use crate::error::{InvError, Result};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

pub trait PictureImporter {
    /// Place the picture found at `source` at `dest`.
    fn import(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Copies JPEG files as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyImporter;

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg"))
}

impl PictureImporter for CopyImporter {
    fn import(&self, source: &Path, dest: &Path) -> Result<()> {
        if !is_jpeg(source) {
            return Err(InvError::Picture(format!(
                "{}: without ImageMagick only .jpg files are supported",
                source.display()
            )));
        }
        fs::copy(source, dest).map_err(|e| {
            InvError::Picture(format!("{}: import failed: {}", source.display(), e))
        })?;
        Ok(())
    }
}

/// Resizes pictures whose longest side exceeds `max_side` and re-encodes
/// them as JPEG with the given quality.
#[derive(Debug, Clone, Copy)]
pub struct MagickImporter {
    pub max_side: u32,
    pub quality: u32,
}

/// Parses ImageMagick's `%G` geometry output, e.g. `4000x3000`.
pub fn parse_geometry(output: &str) -> Option<(u32, u32)> {
    let (w, h) = output.trim().split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Resize percentage that brings `longest_side` down to `max_side`.
pub fn shrink_percent(longest_side: u32, max_side: u32) -> u32 {
    if longest_side > max_side && longest_side > 0 {
        ((max_side as u64 * 100) / longest_side as u64) as u32
    } else {
        100
    }
}

impl MagickImporter {
    fn longest_side(&self, source: &Path) -> Result<u32> {
        let output = Command::new("identify")
            .args(["-format", "%G"])
            .arg(source)
            .output()
            .map_err(|e| InvError::Picture(format!("Failed to run identify: {}", e)))?;

        if !output.status.success() {
            return Err(InvError::Picture(format!(
                "{}: invalid picture",
                source.display()
            )));
        }

        let geometry = String::from_utf8_lossy(&output.stdout);
        let (w, h) = parse_geometry(&geometry).ok_or_else(|| {
            InvError::Picture(format!(
                "{}: unexpected geometry '{}'",
                source.display(),
                geometry.trim()
            ))
        })?;
        Ok(w.max(h))
    }
}

impl PictureImporter for MagickImporter {
    fn import(&self, source: &Path, dest: &Path) -> Result<()> {
        let percent = shrink_percent(self.longest_side(source)?, self.max_side);
        debug!(source = %source.display(), percent, "converting picture");

        let output = Command::new("convert")
            .arg("-resize")
            .arg(format!("{}%", percent))
            .arg("-quality")
            .arg(self.quality.to_string())
            .arg(source)
            .arg(dest)
            .output()
            .map_err(|e| InvError::Picture(format!("Failed to run convert: {}", e)))?;

        if !output.status.success() {
            return Err(InvError::Picture(format!(
                "{}: shrinking and import failed: {}",
                source.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// True if ImageMagick's `identify` can be run.
pub fn magick_available() -> bool {
    Command::new("identify")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// The importer picked for this run. `degraded` is set when ImageMagick was
/// wanted but could not be found.
pub struct ImporterChoice {
    pub importer: Box<dyn PictureImporter>,
    pub degraded: bool,
}

pub fn select_importer(no_magick: bool, max_side: u32, quality: u32) -> ImporterChoice {
    if no_magick {
        return ImporterChoice {
            importer: Box::new(CopyImporter),
            degraded: false,
        };
    }
    if magick_available() {
        ImporterChoice {
            importer: Box::new(MagickImporter { max_side, quality }),
            degraded: false,
        }
    } else {
        warn!("ImageMagick not found, pictures will be copied unmodified");
        ImporterChoice {
            importer: Box::new(CopyImporter),
            degraded: true,
        }
    }
}

/// Opens `path` with the configured viewer in the background.
///
/// `viewer` may carry arguments, e.g. `feh --scale-down`.
pub fn view(viewer: &str, path: &Path) -> Result<()> {
    let mut parts = viewer.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| InvError::Picture("No picture viewer configured".to_string()))?;

    Command::new(program)
        .args(parts)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| InvError::Picture(format!("Failed to launch {}: {}", program, e)))?;
    Ok(())
}
