use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::icons::errors::IconError;
use crate::icons::key;
use crate::icons::render::{IconRenderer, MaskRenderer};
use crate::types::Color;

/// Outcome of pre-populating icons for a batch of colors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IconBatch {
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

/// Color-keyed icon files under a single root directory.
///
/// Icons are only ever added. Once a file exists for a key it is returned as
/// is and never rendered again.
pub struct IconCache {
    root: PathBuf,
    default_icon: PathBuf,
    template: Option<PathBuf>,
    renderer: Box<dyn IconRenderer>,
}

impl IconCache {
    pub fn new(root: PathBuf, default_icon: PathBuf, template: Option<PathBuf>) -> Self {
        Self::with_renderer(root, default_icon, template, Box::new(MaskRenderer))
    }

    pub fn with_renderer(
        root: PathBuf,
        default_icon: PathBuf,
        template: Option<PathBuf>,
        renderer: Box<dyn IconRenderer>,
    ) -> Self {
        Self {
            root,
            default_icon,
            template,
            renderer,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_icon(&self) -> &Path {
        &self.default_icon
    }

    /// Where the icon for `color` lives, whether or not it exists yet.
    pub fn icon_path(&self, color: &Color) -> PathBuf {
        key::path_of(&self.root, color)
    }

    /// Icon for `color` if already rendered, otherwise `default`.
    ///
    /// Never touches the filesystem beyond an existence check.
    pub fn get_icon(&self, color: &Color, default: &Path) -> PathBuf {
        let path = self.icon_path(color);
        if path.is_file() {
            path
        } else {
            default.to_path_buf()
        }
    }

    /// [`get_icon`](Self::get_icon) with the cache's own default icon.
    pub fn get_icon_or_default(&self, color: &Color) -> PathBuf {
        self.get_icon(color, &self.default_icon)
    }

    /// Return the icon for `color`, rendering it first if needed.
    ///
    /// Concurrent calls for a new color may both render; each writes a temp
    /// file and renames it into place, and renders are deterministic, so the
    /// last rename wins with identical content.
    pub fn create_icon(&self, color: &Color) -> Result<PathBuf, IconError> {
        let template = self.template.as_deref().ok_or(IconError::NoTemplate)?;

        let path = self.icon_path(color);
        if path.is_file() {
            return Ok(path);
        }

        if !template.is_file() {
            return Err(IconError::MissingTemplate {
                path: template.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!(
            event = "core.icons.create_started",
            key = %key::key_of(color),
            path = %path.display(),
        );

        let temp_file = temp_path_for(&path);
        if let Err(e) = self.renderer.render(template, &temp_file, *color) {
            remove_temp_file(&temp_file);
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_file, &path) {
            remove_temp_file(&temp_file);
            return Err(IconError::IoError { source: e });
        }

        info!(event = "core.icons.create_completed", path = %path.display());
        Ok(path)
    }

    /// Make sure every distinct color has an icon.
    ///
    /// Colors are deduplicated by key first. A failure for one color is
    /// logged and does not stop the rest.
    pub fn create_icons<I>(&self, colors: I) -> IconBatch
    where
        I: IntoIterator<Item = Color>,
    {
        let distinct: BTreeMap<String, Color> = colors
            .into_iter()
            .map(|color| (key::key_of(&color), color))
            .collect();

        let mut batch = IconBatch::default();
        for (key, color) in distinct {
            if self.icon_path(&color).is_file() {
                batch.existing += 1;
                continue;
            }
            match self.create_icon(&color) {
                Ok(_) => batch.created += 1,
                Err(e) => {
                    batch.failed += 1;
                    warn!(
                        event = "core.icons.create_failed",
                        key = %key,
                        error = %e,
                    );
                }
            }
        }

        debug!(
            event = "core.icons.batch_completed",
            created = batch.created,
            existing = batch.existing,
            failed = batch.failed,
        );
        batch
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.tmp", file_name, std::process::id()))
}

fn remove_temp_file(temp_file: &Path) {
    if temp_file.exists()
        && let Err(e) = fs::remove_file(temp_file)
    {
        warn!(
            event = "core.icons.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            error = %e,
        );
    }
}
