use coral_core::cdn::{CdnTransformer, TransformOpts};
use coral_core::lightbox::{
    ClickTarget, Direction, KEY_BINDINGS, Lightbox, LightboxLinks, LightboxView, Slot, ViewerHost,
    ViewerState, key_controls, render_lightbox_html,
};
use coral_core::model::{CdnConfig, Item};
use coral_core::normalize::normalize_album;
use coral_core::video::VideoProvider;
use serde_json::json;

#[derive(Debug, Default)]
struct RecordingHost {
    scroll_locked: bool,
    keyboard_bound: bool,
    views: Vec<LightboxView>,
}

impl ViewerHost for RecordingHost {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_keyboard_bound(&mut self, bound: bool) {
        self.keyboard_bound = bound;
    }

    fn present(&mut self, view: &LightboxView) {
        self.views.push(view.clone());
    }
}

fn cdn() -> CdnTransformer {
    CdnTransformer::new(&CdnConfig::default(), "https://coral.example.org/")
}

fn viewer() -> Lightbox<RecordingHost> {
    Lightbox::new(cdn(), TransformOpts::fit(2000), RecordingHost::default())
}

fn photos(count: usize) -> Vec<Item> {
    (0..count)
        .map(|idx| Item::photo(format!("p{idx}.jpg"), format!("Foto {idx}")))
        .collect()
}

#[test]
fn navigation_wraps_in_both_directions() {
    let items = photos(4);
    let mut lightbox = viewer();
    lightbox.open(&items, 0);
    lightbox.navigate(Direction::Prev);
    assert_eq!(lightbox.current_index(), Some(3));
    lightbox.navigate(Direction::Next);
    assert_eq!(lightbox.current_index(), Some(0));

    lightbox.open(&items, 3);
    lightbox.navigate(Direction::Next);
    assert_eq!(lightbox.current_index(), Some(0));
}

#[test]
fn start_index_wraps_modulo_length() {
    let items = photos(3);
    let mut lightbox = viewer();
    lightbox.open(&items, -1);
    assert_eq!(lightbox.current_index(), Some(2));
    lightbox.open(&items, 7);
    assert_eq!(lightbox.current_index(), Some(1));
}

#[test]
fn retiro_album_wraps_from_video_to_first_photo() {
    let album = normalize_album(&json!({
        "titulo": "Retiro",
        "fotos": ["a.jpg", "b.jpg"],
        "videos": ["https://youtu.be/xyz"]
    }))
    .expect("album");
    let mut lightbox = viewer();
    lightbox.open(&album.items, 2);
    assert!(matches!(lightbox.view().slot, Slot::Frame { .. }));
    lightbox.navigate(Direction::Next);
    assert_eq!(lightbox.current_index(), Some(0));
    assert!(matches!(lightbox.view().slot, Slot::Image { .. }));
}

#[test]
fn controls_hidden_for_single_item() {
    let mut lightbox = viewer();
    lightbox.open(&photos(1), 0);
    assert!(!lightbox.view().controls_visible);
    lightbox.navigate(Direction::Next);
    assert_eq!(lightbox.current_index(), Some(0));
    assert!(!lightbox.view().controls_visible);

    lightbox.open(&photos(2), 0);
    assert!(lightbox.view().controls_visible);
    lightbox.navigate(Direction::Next);
    assert!(lightbox.host().views.last().expect("view").controls_visible);
}

#[test]
fn open_locks_scroll_and_close_restores_it() {
    let mut lightbox = viewer();
    lightbox.open(&photos(2), 0);
    assert!(lightbox.host().scroll_locked);
    assert!(lightbox.host().keyboard_bound);

    lightbox.close();
    assert!(!lightbox.host().scroll_locked);
    assert!(!lightbox.host().keyboard_bound);
    assert_eq!(lightbox.state(), &ViewerState::Closed);
    assert_eq!(lightbox.host().views.last(), Some(&LightboxView::closed()));
}

#[test]
fn close_while_closed_is_a_no_op() {
    let mut lightbox = viewer();
    lightbox.close();
    lightbox.navigate(Direction::Next);
    assert!(lightbox.host().views.is_empty());
    assert_eq!(lightbox.current_index(), None);
}

#[test]
fn opening_an_empty_album_stays_closed() {
    let mut lightbox = viewer();
    lightbox.open(&[], 0);
    assert!(!lightbox.is_open());
    assert!(!lightbox.host().scroll_locked);
}

#[test]
fn keys_only_act_while_open() {
    let mut lightbox = viewer();
    assert!(!lightbox.handle_key("ArrowRight"));
    assert!(!lightbox.handle_key("Escape"));

    lightbox.open(&photos(3), 0);
    assert!(lightbox.handle_key("ArrowRight"));
    assert_eq!(lightbox.current_index(), Some(1));
    assert!(lightbox.handle_key("ArrowLeft"));
    assert!(lightbox.handle_key("ArrowLeft"));
    assert_eq!(lightbox.current_index(), Some(2));
    assert!(!lightbox.handle_key("Enter"));
    assert!(lightbox.handle_key("Escape"));
    assert!(!lightbox.is_open());
}

#[test]
fn backdrop_closes_but_media_does_not() {
    let mut lightbox = viewer();
    lightbox.open(&photos(2), 0);
    lightbox.handle_click(ClickTarget::Media);
    assert!(lightbox.is_open());
    lightbox.handle_click(ClickTarget::NextControl);
    assert_eq!(lightbox.current_index(), Some(1));
    lightbox.handle_click(ClickTarget::Backdrop);
    assert!(!lightbox.is_open());

    lightbox.open(&photos(2), 0);
    lightbox.handle_click(ClickTarget::CloseControl);
    assert!(!lightbox.is_open());

    lightbox.open(&photos(2), 0);
    lightbox.handle_history_back();
    assert!(!lightbox.is_open());
}

#[test]
fn items_are_snapshotted_on_open() {
    let mut items = photos(2);
    let mut lightbox = viewer();
    lightbox.open(&items, 1);
    items.clear();
    assert_eq!(lightbox.current_item(), Some(&Item::photo("p1.jpg", "Foto 1")));
}

#[test]
fn slot_follows_item_kind() {
    let items = vec![
        Item::photo("a.jpg", "Coro"),
        Item::video("https://vimeo.com/987654"),
        Item::video("https://example.com/clip.mp4"),
        Item::video("https://example.com/stream"),
    ];
    let mut lightbox = viewer();
    lightbox.open(&items, 0);
    match lightbox.view().slot {
        Slot::Image { src, alt } => {
            assert!(src.contains("c_fit,w_2000"));
            assert_eq!(alt, "Coro");
        }
        other => panic!("expected image, got {other:?}"),
    }

    lightbox.navigate(Direction::Next);
    assert_eq!(
        lightbox.view().slot,
        Slot::Frame {
            provider: VideoProvider::Vimeo,
            src: "https://player.vimeo.com/video/987654".to_string()
        }
    );

    lightbox.navigate(Direction::Next);
    assert_eq!(
        lightbox.view().slot,
        Slot::Video {
            src: "https://example.com/clip.mp4".to_string()
        }
    );

    lightbox.navigate(Direction::Next);
    assert_eq!(
        lightbox.view().slot,
        Slot::Video {
            src: "https://example.com/stream".to_string()
        }
    );

    lightbox.navigate(Direction::Next);
    assert!(matches!(lightbox.view().slot, Slot::Image { .. }));
    lightbox.close();
    assert_eq!(lightbox.view().slot, Slot::Empty);
}

#[test]
fn rendered_overlay_hides_controls_for_single_item() {
    let mut lightbox = Lightbox::detached(cdn(), 2000);
    lightbox.open(&photos(1), 0);
    let html = render_lightbox_html(&lightbox.view(), None);
    assert!(html.contains("id=\"lb-prev\" class=\"lightbox__prev\" aria-label=\"Anterior\" hidden"));
    assert!(html.contains("id=\"lb-next\" class=\"lightbox__next\" aria-label=\"Próximo\" hidden"));
    assert!(!html.contains("lightbox__counter"));
    assert!(html.contains("<img id=\"lightbox-img\""));
}

#[test]
fn rendered_overlay_uses_links_and_embeds_video() {
    let mut lightbox = Lightbox::detached(cdn(), 2000);
    lightbox.open(&[Item::photo("a.jpg", ""), Item::video("https://youtu.be/abc123XYZ")], 1);
    let links = LightboxLinks {
        prev: "view-0.html".to_string(),
        next: "view-0.html".to_string(),
        close: "../album-0.html".to_string(),
    };
    let html = render_lightbox_html(&lightbox.view(), Some(&links));
    assert!(html.contains("<a id=\"lb-close\" class=\"lightbox__close\" href=\"../album-0.html\""));
    assert!(html.contains("<iframe class=\"lightbox__frame\" src=\"https://www.youtube.com/embed/abc123XYZ\""));
    assert!(html.contains("2 / 2"));
    assert!(!html.contains(" hidden>"));
}

#[test]
fn closed_overlay_is_hidden_with_empty_slot() {
    let html = render_lightbox_html(&LightboxView::closed(), None);
    assert!(html.starts_with("<div id=\"lightbox\" class=\"lightbox\" data-close=\"lightbox\" hidden>"));
    assert!(html.contains("<img id=\"lightbox-img\" class=\"lightbox__media\" alt=\"\">"));
}

#[test]
fn every_key_binding_targets_a_rendered_control() {
    let mut lightbox = Lightbox::detached(cdn(), 2000);
    lightbox.open(&photos(3), 0);
    let html = render_lightbox_html(&lightbox.view(), None);
    let controls = key_controls();
    assert_eq!(controls.len(), KEY_BINDINGS.len());
    for (key, id) in controls {
        assert!(html.contains(&format!("id=\"{id}\"")), "{key} -> {id}");
    }
    assert_eq!(ClickTarget::Backdrop.control_id(), None);
}

#[test]
fn key_bindings_drive_the_same_transitions_as_clicks() {
    for (key, target) in KEY_BINDINGS {
        let mut by_key = viewer();
        let mut by_click = viewer();
        by_key.open(&photos(3), 1);
        by_click.open(&photos(3), 1);
        assert!(by_key.handle_key(key));
        by_click.handle_click(*target);
        assert_eq!(by_key.state(), by_click.state(), "{key}");
    }
}
