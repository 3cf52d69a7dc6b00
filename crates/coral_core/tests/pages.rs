use std::fs;

use coral_core::cdn::CdnTransformer;
use coral_core::config::parse_site_config;
use coral_core::data::{load_gallery, load_json_document};
use coral_core::model::{Album, Item, SiteConfig};
use coral_core::templates::{render_album_page, render_index_page, render_viewer_page};
use tempfile::TempDir;

fn config() -> SiteConfig {
    parse_site_config("site:\n  title: Coral Vozes\n  origin: https://coral.example.org/\n")
        .expect("config")
}

fn album() -> Album {
    Album {
        title: "Retiro".to_string(),
        description: "Retiro anual".to_string(),
        cover: Some("capa.jpg".to_string()),
        items: vec![
            Item::photo("a.jpg", "A"),
            Item::photo("b.jpg", "B"),
            Item::video("https://youtu.be/abc123XYZ"),
        ],
    }
}

#[test]
fn index_page_lists_album_cards() {
    let cfg = config();
    let cdn = CdnTransformer::from_config(&cfg);
    let html = render_index_page(&cfg, &[album()], &cdn).expect("render");
    assert!(html.contains("<title>Galeria · Coral Vozes</title>"));
    assert!(html.contains("href=\"album-0.html\""));
    assert!(!html.contains("gallery__empty"));
}

#[test]
fn index_page_without_albums_shows_empty_note() {
    let cfg = config();
    let cdn = CdnTransformer::from_config(&cfg);
    let html = render_index_page(&cfg, &[], &cdn).expect("render");
    assert!(html.contains("gallery__empty"));
}

#[test]
fn album_page_links_tiles_to_viewer_pages() {
    let cfg = config();
    let cdn = CdnTransformer::from_config(&cfg);
    let album = album();
    let html = render_album_page(&cfg, Some((4, &album)), &cdn).expect("render");
    assert!(html.contains("id=\"album-page-title\" class=\"album__title\">Retiro</h1>"));
    assert!(html.contains("href=\"album-4/view-0.html\""));
    assert!(html.contains("href=\"album-4/view-2.html\""));
}

#[test]
fn unknown_album_renders_not_found() {
    let cfg = config();
    let cdn = CdnTransformer::from_config(&cfg);
    let html = render_album_page(&cfg, None, &cdn).expect("render");
    assert!(html.contains("Álbum não encontrado"));
    assert!(!html.contains("album-tile"));
}

#[test]
fn viewer_page_links_wrap_around() {
    let cfg = config();
    let cdn = CdnTransformer::from_config(&cfg);
    let album = album();

    let first = render_viewer_page(&cfg, 1, &album, 0, &cdn).expect("render");
    assert!(first.contains("id=\"lb-prev\" class=\"lightbox__prev\" href=\"view-2.html\""));
    assert!(first.contains("id=\"lb-next\" class=\"lightbox__next\" href=\"view-1.html\""));
    assert!(first.contains("href=\"../album-1.html\""));
    assert!(first.contains("class=\"is-locked\""));
    assert!(first.contains("addEventListener(\"keydown\""));
    assert!(first.contains(
        "var keys = { \"Escape\": \"lb-close\", \"ArrowRight\": \"lb-next\", \"ArrowLeft\": \"lb-prev\" };"
    ));
    assert!(first.contains("c_fit,w_2000"));

    let last = render_viewer_page(&cfg, 1, &album, 2, &cdn).expect("render");
    assert!(last.contains("id=\"lb-next\" class=\"lightbox__next\" href=\"view-0.html\""));
    assert!(last.contains("https://www.youtube.com/embed/abc123XYZ"));
}

#[test]
fn broken_document_loads_as_empty_gallery() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("galeria.json");
    fs::write(&path, "{ not json").expect("write");
    assert!(load_json_document(&path).is_null());
    assert!(load_gallery(&path).is_empty());
    assert!(load_gallery(&temp.path().join("missing.json")).is_empty());
}
