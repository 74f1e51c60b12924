/// Sidecar file access on the local file system
use cadence_core::{Result, SidecarSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `SidecarSource` backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl SidecarSource for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&self, path: &Path, lines: Option<&[String]>) -> Result<()> {
        match lines {
            Some(lines) => {
                let mut content = lines.join("\n");
                if !content.is_empty() {
                    content.push('\n');
                }
                debug!("Writing {} lines to {}", lines.len(), path.display());
                fs::write(path, content)?;
            }
            None if path.exists() => {
                debug!("Removing {}", path.display());
                fs::remove_file(path)?;
            }
            None => {}
        }
        Ok(())
    }
}

/// Companion file next to `media`: same base name, `extension` suffix
pub fn sidecar_path(media: &Path, extension: &str) -> PathBuf {
    media.with_extension(extension)
}
