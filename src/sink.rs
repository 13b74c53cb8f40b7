//!
//! src/sink.rs
//!
//! Writes the rendered svg to disk and keeps the readme's marker
//! block pointing at it. The svg write goes through a tempfile
//! rename, the readme is only rewritten when its bytes changed
//!

use std::{fs, io::Write, path::{Path, PathBuf}};
use tempfile::NamedTempFile;

use crate::BadgeError;

pub const START_MARKER: &str = "<!-- SC_LIKES:START -->";
pub const END_MARKER: &str = "<!-- SC_LIKES:END -->";

pub struct BadgeSink {
    svg_path: PathBuf,
}

impl BadgeSink {
    pub fn new(svg_path: impl AsRef<Path>) -> Self {
        Self { svg_path: svg_path.as_ref().to_path_buf() }
    }

    pub fn write_svg(&self, svg: &str) -> Result<(), BadgeError> {
        let parent = match self.svg_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(svg.as_bytes())?;
        temp.persist(&self.svg_path)
            .map_err(|e| BadgeError::Io(e.error))?;

        tracing::debug!(path = %self.svg_path.display(), "sink.svg.written");
        Ok(())
    }

    /// Relative embed path for the readme, forward-slash normalized
    pub fn embed_reference(&self) -> String {
        let path = self.svg_path.to_string_lossy().replace('\\', "/");
        format!("![SoundCloud](./{})", path.trim_start_matches("./"))
    }

    /// Rewrites the marker block to reference the written svg. Returns
    /// whether the readme actually changed on disk
    pub fn ensure_readme_block(&self, readme: &Path) -> Result<bool, BadgeError> {
        let original = fs::read_to_string(readme)?;
        let updated = replace_marker_block(
            &original,
            START_MARKER,
            END_MARKER,
            &self.embed_reference()
        )?;

        if updated == original {
            tracing::debug!(path = %readme.display(), "sink.readme.unchanged");
            return Ok(false);
        }

        fs::write(readme, updated)?;
        tracing::debug!(path = %readme.display(), "sink.readme.rewritten");
        Ok(true)
    }
}

/// Replaces everything strictly between the first start/end marker
/// pair with a single reference line
pub fn replace_marker_block(
    doc: &str,
    start_marker: &str,
    end_marker: &str,
    reference: &str
) -> Result<String, BadgeError> {
    let start = doc.find(start_marker)
        .ok_or_else(|| BadgeError::MarkerNotFound(
            format!("missing {start_marker}")
        ))?;
    let after_start = start + start_marker.len();

    let end = doc[after_start..].find(end_marker)
        .map(|i| after_start + i)
        .ok_or_else(|| BadgeError::MarkerNotFound(
            format!("missing {end_marker}")
        ))?;

    let mut out = String::with_capacity(doc.len() + reference.len());
    out.push_str(&doc[..after_start]);
    out.push('\n');
    out.push_str(reference);
    out.push('\n');
    out.push_str(&doc[end..]);
    Ok(out)
}
