//! Album cards and item thumbnail grids.

use crate::cdn::{CdnTransformer, TransformOpts};
use crate::html::{escape_attr, escape_text};
use crate::model::{Album, Item};

pub const DEFAULT_ALBUM_TITLE: &str = "Álbum";
pub const NOT_FOUND_TITLE: &str = "Álbum não encontrado";
pub const NOT_FOUND_DESCRIPTION: &str =
    "O álbum que você está procurando não existe ou o endereço está incorreto.";
const CARD_SIZES: &str = "(min-width:1024px) 33vw, (min-width:640px) 50vw, 100vw";

pub struct GridOptions<'a> {
    pub thumb: TransformOpts,
    /// Link target per item index. Without one, tiles are buttons carrying
    /// `data-lightbox-open` for a page runtime to wire up.
    pub item_href: Option<&'a dyn Fn(usize) -> String>,
}

pub struct CardOptions<'a> {
    pub cover: TransformOpts,
    pub srcset_widths: &'a [u32],
    pub album_href: &'a dyn Fn(usize) -> String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumHeading {
    pub title: String,
    pub description: String,
}

pub fn album_heading(album: Option<&Album>) -> AlbumHeading {
    match album {
        Some(album) => AlbumHeading {
            title: if album.title.is_empty() {
                DEFAULT_ALBUM_TITLE.to_string()
            } else {
                album.title.clone()
            },
            description: album.description.clone(),
        },
        None => AlbumHeading {
            title: NOT_FOUND_TITLE.to_string(),
            description: NOT_FOUND_DESCRIPTION.to_string(),
        },
    }
}

/// One tile per item; an album without items yields an empty string.
pub fn render_album_grid(album: &Album, cdn: &CdnTransformer, options: &GridOptions<'_>) -> String {
    let mut html = String::new();
    for (index, item) in album.items.iter().enumerate() {
        html.push_str(&render_tile(index, item, cdn, options));
    }
    html
}

fn render_tile(
    index: usize,
    item: &Item,
    cdn: &CdnTransformer,
    options: &GridOptions<'_>,
) -> String {
    let inner = match item {
        Item::Photo { src, alt } => format!(
            "<img class=\"album-tile__img\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape_attr(&cdn.transform(src, &options.thumb)),
            escape_attr(alt)
        ),
        Item::Video { .. } => "<span class=\"album-tile__video\"><span class=\"album-tile__play\">▶ Vídeo</span></span>"
            .to_string(),
    };

    let kind = match item {
        Item::Photo { .. } => "photo",
        Item::Video { .. } => "video",
    };
    let opener = match options.item_href {
        Some(href) => format!(
            "<a class=\"album-tile__open\" href=\"{}\">{inner}</a>",
            escape_attr(&href(index))
        ),
        None => format!(
            "<button type=\"button\" class=\"album-tile__open\" data-lightbox-open=\"{index}\">{inner}</button>"
        ),
    };
    format!("<div class=\"album-tile\" data-index=\"{index}\" data-kind=\"{kind}\">{opener}</div>")
}

pub fn render_album_cards(albums: &[Album], cdn: &CdnTransformer, options: &CardOptions<'_>) -> String {
    albums
        .iter()
        .enumerate()
        .map(|(index, album)| render_album_card(index, album, cdn, options))
        .collect()
}

pub fn render_album_card(
    index: usize,
    album: &Album,
    cdn: &CdnTransformer,
    options: &CardOptions<'_>,
) -> String {
    let mut html = String::new();
    html.push_str("<a class=\"album-card\" href=\"");
    html.push_str(&escape_attr(&(options.album_href)(index)));
    html.push_str("\">");

    match album.cover.as_deref() {
        Some(cover) => {
            html.push_str("<div class=\"album-card__cover\"><img src=\"");
            html.push_str(&escape_attr(&cdn.transform(cover, &options.cover)));
            html.push('"');
            let srcset = cdn.build_srcset(cover, options.srcset_widths, &options.cover);
            if !srcset.is_empty() {
                html.push_str(" srcset=\"");
                html.push_str(&escape_attr(&srcset));
                html.push_str("\" sizes=\"");
                html.push_str(CARD_SIZES);
                html.push('"');
            }
            html.push_str(" alt=\"");
            html.push_str(&escape_attr(&album.title));
            html.push_str("\" loading=\"lazy\"></div>");
        }
        None => html.push_str("<div class=\"album-card__cover album-card__cover--empty\"></div>"),
    }

    html.push_str("<div class=\"album-card__body\"><h3 class=\"album-card__title\">");
    html.push_str(&escape_text(&album.title));
    html.push_str("</h3>");
    if !album.description.is_empty() {
        html.push_str("<p class=\"album-card__description\">");
        html.push_str(&escape_text(&album.description));
        html.push_str("</p>");
    }
    html.push_str("<span class=\"album-card__open\">Abrir álbum →</span></div></a>");
    html
}
