//! Static export - renders every page of the site into the public directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

use crate::content::Course;
use crate::pages::{PageQuery, PageStatus, SiteRenderer};
use crate::routes::ROUTES;
use crate::store::{self, RecordStore};
use crate::templates::STYLESHEET;
use crate::Site;

/// Static site exporter
pub struct Generator {
    public_dir: PathBuf,
    static_dir: PathBuf,
    renderer: SiteRenderer,
}

impl Generator {
    /// Create a generator reading from the store configured for `site`
    pub fn new(site: &Site) -> Result<Self> {
        Self::with_store(site, store::open(site))
    }

    pub fn with_store(site: &Site, store: Arc<dyn RecordStore>) -> Result<Self> {
        Ok(Self {
            public_dir: site.public_dir.clone(),
            static_dir: site.static_dir.clone(),
            renderer: SiteRenderer::new(site.config.clone(), store)?,
        })
    }

    /// Generate the entire site, returning the number of pages written
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.public_dir)?;

        // Nothing cancels an export
        let cancel = CancellationToken::new();
        let mut written = 0;

        for route in ROUTES {
            let rendered = self
                .renderer
                .render(route.page, &PageQuery::default(), &cancel)
                .await?;
            self.write_page(route.path, &rendered.html)?;
            written += 1;
        }

        let courses = store::fetch_all::<Course>(self.renderer.store())
            .await
            .context("Failed to read courses for detail pages")?;

        for course in &courses {
            if !is_safe_segment(&course.id) {
                tracing::warn!(id = %course.id, "Skipping course with an id unusable as a path");
                continue;
            }
            let rendered = self.renderer.render_course(&course.id, &cancel).await?;
            if rendered.status == PageStatus::NotFound {
                tracing::warn!(id = %course.id, "Course vanished during export");
                continue;
            }
            // Static servers decode request paths, so the directory holds the raw id
            self.write_page(&format!("/courses/{}", course.id), &rendered.html)?;
            written += 1;
        }

        self.write_stylesheet()?;
        self.copy_static_dir()?;

        Ok(written)
    }

    /// Write `html` as `<public>/<path>/index.html`
    fn write_page(&self, path: &str, html: &str) -> Result<()> {
        // Strip leading slash from path to avoid creating absolute paths
        let clean_path = path.trim_start_matches('/');
        let output_path = self.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated page: {:?}", output_path);
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let dir = self.public_dir.join("assets");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("site.css"), STYLESHEET)?;
        Ok(())
    }

    /// Copy the static directory to `<public>/static`
    fn copy_static_dir(&self) -> Result<()> {
        if !self.static_dir.exists() {
            tracing::debug!("No static directory at {:?}", self.static_dir);
            return Ok(());
        }
        copy_tree(&self.static_dir, &self.public_dir.join("static"))
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(from)?;
        let dest = to.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
    }
    Ok(())
}

/// Whether an id can be used as a single directory name
fn is_safe_segment(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
}
