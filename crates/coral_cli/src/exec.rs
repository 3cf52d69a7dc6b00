use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coral_core::cdn::CdnTransformer;
use coral_core::data::load_gallery;
use coral_core::model::{Album, SiteConfig};
use coral_core::paths::{self, PageMapping};
use coral_core::templates::{
    STYLESHEET, STYLESHEET_NAME, render_album_page, render_index_page, render_viewer_page,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub albums: usize,
    pub pages: usize,
}

pub fn gallery_path(root: &Path, config: &SiteConfig) -> PathBuf {
    root.join(&config.data.gallery)
}

pub fn build_site(root: &Path, config: &SiteConfig, out_dir: &Path) -> Result<BuildReport> {
    let albums = load_gallery(&gallery_path(root, config));
    info!(albums = albums.len(), "loaded gallery");
    write_site(config, &albums, out_dir)
}

pub fn write_site(config: &SiteConfig, albums: &[Album], out_dir: &Path) -> Result<BuildReport> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let cdn = CdnTransformer::from_config(config);
    let mut report = BuildReport {
        albums: albums.len(),
        pages: 0,
    };

    write_page(out_dir, &paths::index_page(), &render_index_page(config, albums, &cdn)?)?;
    write_page(
        out_dir,
        &paths::not_found_page(),
        &render_album_page(config, None, &cdn)?,
    )?;
    report.pages += 2;

    for (album_index, album) in albums.iter().enumerate() {
        let html = render_album_page(config, Some((album_index, album)), &cdn)?;
        write_page(out_dir, &paths::album_page(album_index), &html)?;
        report.pages += 1;

        for item_index in 0..album.items.len() {
            let html = render_viewer_page(config, album_index, album, item_index, &cdn)?;
            write_page(out_dir, &paths::viewer_page(album_index, item_index), &html)?;
            report.pages += 1;
        }
        debug!(album = album_index, items = album.items.len(), "wrote album");
    }

    let stylesheet = out_dir.join(STYLESHEET_NAME);
    fs::write(&stylesheet, STYLESHEET)
        .with_context(|| format!("failed to write {}", stylesheet.display()))?;

    info!(pages = report.pages, out = %out_dir.display(), "build complete");
    Ok(report)
}

fn write_page(out_dir: &Path, page: &PageMapping, html: &str) -> Result<()> {
    let path = out_dir.join(&page.output);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))
}
