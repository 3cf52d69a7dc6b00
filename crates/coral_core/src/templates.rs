//! Page assembly on top of the embedded minijinja templates.

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, context};

use crate::cdn::{CdnTransformer, TransformOpts};
use crate::gallery::{
    CardOptions, GridOptions, album_heading, render_album_cards, render_album_grid,
};
use crate::lightbox::{
    Direction, Lightbox, LightboxLinks, LightboxView, ViewerHost, key_controls,
    render_lightbox_html,
};
use crate::model::{Album, SiteConfig};
use crate::paths;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("album.html", include_str!("../templates/album.html")),
    ("viewer.html", include_str!("../templates/viewer.html")),
];

pub const STYLESHEET_NAME: &str = "gallery.css";
pub const STYLESHEET: &str = include_str!("../templates/gallery.css");

fn template_env() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    for (name, source) in TEMPLATES.iter().copied() {
        env.add_template(name, source)
            .with_context(|| format!("invalid template {name}"))?;
    }
    Ok(env)
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    let env = template_env().context("failed to initialize templates")?;
    let template = env
        .get_template(name)
        .with_context(|| format!("missing template {name}"))?;
    template
        .render(ctx)
        .with_context(|| format!("failed to render {name}"))
}

pub fn render_index_page(cfg: &SiteConfig, albums: &[Album], cdn: &CdnTransformer) -> Result<String> {
    let album_href = |index: usize| paths::album_page(index).href;
    let options = CardOptions {
        cover: TransformOpts::fill(cfg.gallery.cover_width),
        srcset_widths: &cfg.gallery.srcset_widths,
        album_href: &album_href,
    };
    render(
        "index.html",
        context! {
            site_title => cfg.site.title.clone(),
            site_language => cfg.site.language.clone(),
            page_title => "Galeria",
            rel => "",
            scroll_locked => false,
            cards_html => render_album_cards(albums, cdn, &options),
            has_albums => !albums.is_empty(),
        },
    )
}

/// Album page with thumbnails linking to the per-item viewer pages. `None`
/// renders the "album not found" page.
pub fn render_album_page(
    cfg: &SiteConfig,
    album: Option<(usize, &Album)>,
    cdn: &CdnTransformer,
) -> Result<String> {
    let heading = album_heading(album.map(|(_, album)| album));
    let grid_html = match album {
        Some((album_index, album)) => {
            let item_href = move |item: usize| paths::viewer_page(album_index, item).href;
            let options = GridOptions {
                thumb: TransformOpts::fit(cfg.gallery.thumb_width),
                item_href: Some(&item_href),
            };
            render_album_grid(album, cdn, &options)
        }
        None => String::new(),
    };
    render(
        "album.html",
        context! {
            site_title => cfg.site.title.clone(),
            site_language => cfg.site.language.clone(),
            page_title => heading.title.clone(),
            rel => "",
            scroll_locked => false,
            title => heading.title,
            description => heading.description,
            grid_html => grid_html,
        },
    )
}

/// Records what the viewer asked of the page while it was driven.
#[derive(Debug, Default)]
pub struct PageHost {
    pub scroll_locked: bool,
    pub keyboard_bound: bool,
    pub presented: Option<LightboxView>,
}

impl ViewerHost for PageHost {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_keyboard_bound(&mut self, bound: bool) {
        self.keyboard_bound = bound;
    }

    fn present(&mut self, view: &LightboxView) {
        self.presented = Some(view.clone());
    }
}

/// Standalone page showing the viewer opened at `item_index`. Prev/next link
/// to the pages the viewer would navigate to.
pub fn render_viewer_page(
    cfg: &SiteConfig,
    album_index: usize,
    album: &Album,
    item_index: usize,
    cdn: &CdnTransformer,
) -> Result<String> {
    let mut viewer = Lightbox::new(
        cdn.clone(),
        TransformOpts::fit(cfg.gallery.viewer_width),
        PageHost::default(),
    );
    viewer.open(&album.items, item_index as isize);

    let close = paths::album_href_from_viewer(album_index);
    let current = viewer.current_index().unwrap_or(item_index);
    let links = LightboxLinks {
        prev: paths::viewer_sibling_href(viewer.peek(Direction::Prev).unwrap_or(current)),
        next: paths::viewer_sibling_href(viewer.peek(Direction::Next).unwrap_or(current)),
        close,
    };

    let host = viewer.host();
    let view = host.presented.clone().unwrap_or_else(LightboxView::closed);
    let heading = album_heading(Some(album));
    render(
        "viewer.html",
        context! {
            site_title => cfg.site.title.clone(),
            site_language => cfg.site.language.clone(),
            page_title => heading.title,
            rel => "../",
            scroll_locked => host.scroll_locked,
            keyboard_bound => host.keyboard_bound,
            key_controls => key_controls(),
            lightbox_html => render_lightbox_html(&view, Some(&links)),
        },
    )
}
