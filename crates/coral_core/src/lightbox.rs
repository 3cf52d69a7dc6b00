//! Full-screen album viewer. Input handlers are shared by page runtimes and
//! the static viewer pages, which bind [`KEY_BINDINGS`] to overlay links.

use crate::cdn::{CdnTransformer, TransformOpts};
use crate::html::escape_attr;
use crate::model::Item;
use crate::video::{VideoProvider, classify_video};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    /// `current` is always a valid index into the non-empty `items`.
    Open { items: Vec<Item>, current: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Media,
    CloseControl,
    PrevControl,
    NextControl,
}

const CLOSE_ID: &str = "lb-close";
const PREV_ID: &str = "lb-prev";
const NEXT_ID: &str = "lb-next";

impl ClickTarget {
    pub fn control_id(self) -> Option<&'static str> {
        match self {
            ClickTarget::CloseControl => Some(CLOSE_ID),
            ClickTarget::PrevControl => Some(PREV_ID),
            ClickTarget::NextControl => Some(NEXT_ID),
            ClickTarget::Backdrop | ClickTarget::Media => None,
        }
    }
}

pub const KEY_BINDINGS: &[(&str, ClickTarget)] = &[
    ("Escape", ClickTarget::CloseControl),
    ("ArrowRight", ClickTarget::NextControl),
    ("ArrowLeft", ClickTarget::PrevControl),
];

pub fn key_controls() -> Vec<(&'static str, &'static str)> {
    KEY_BINDINGS
        .iter()
        .filter_map(|(key, target)| target.control_id().map(|id| (*key, id)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Image { src: String, alt: String },
    Frame { provider: VideoProvider, src: String },
    Video { src: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub open: bool,
    pub slot: Slot,
    pub controls_visible: bool,
    pub index: Option<usize>,
    pub total: usize,
}

impl LightboxView {
    pub fn closed() -> Self {
        Self {
            open: false,
            slot: Slot::Empty,
            controls_visible: false,
            index: None,
            total: 0,
        }
    }
}

pub trait ViewerHost {
    fn set_scroll_locked(&mut self, locked: bool);
    fn set_keyboard_bound(&mut self, bound: bool);
    fn present(&mut self, view: &LightboxView);
}

impl ViewerHost for () {
    fn set_scroll_locked(&mut self, _locked: bool) {}
    fn set_keyboard_bound(&mut self, _bound: bool) {}
    fn present(&mut self, _view: &LightboxView) {}
}

pub struct Lightbox<H: ViewerHost = ()> {
    state: ViewerState,
    cdn: CdnTransformer,
    image: TransformOpts,
    host: H,
}

impl Lightbox<()> {
    pub fn detached(cdn: CdnTransformer, viewer_width: u32) -> Self {
        Lightbox::new(cdn, TransformOpts::fit(viewer_width), ())
    }
}

impl<H: ViewerHost> Lightbox<H> {
    pub fn new(cdn: CdnTransformer, image: TransformOpts, host: H) -> Self {
        Self {
            state: ViewerState::Closed,
            cdn,
            image,
            host,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            ViewerState::Open { current, .. } => Some(*current),
            ViewerState::Closed => None,
        }
    }

    pub fn current_item(&self) -> Option<&Item> {
        match &self.state {
            ViewerState::Open { items, current } => items.get(*current),
            ViewerState::Closed => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Opening an empty list leaves the viewer as it was.
    pub fn open(&mut self, items: &[Item], start: isize) {
        if items.is_empty() {
            return;
        }
        let current = wrap_index(start, items.len());
        self.state = ViewerState::Open {
            items: items.to_vec(),
            current,
        };
        self.host.set_scroll_locked(true);
        self.host.set_keyboard_bound(true);
        self.present();
    }

    pub fn peek(&self, direction: Direction) -> Option<usize> {
        match &self.state {
            ViewerState::Open { items, current } => {
                Some(wrap_index(*current as isize + direction.step(), items.len()))
            }
            ViewerState::Closed => None,
        }
    }

    pub fn navigate(&mut self, direction: Direction) {
        let Some(next) = self.peek(direction) else {
            return;
        };
        if let ViewerState::Open { current, .. } = &mut self.state {
            *current = next;
        }
        self.present();
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = ViewerState::Closed;
        self.host.set_scroll_locked(false);
        self.host.set_keyboard_bound(false);
        self.host.present(&LightboxView::closed());
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match KEY_BINDINGS.iter().find(|(bound, _)| *bound == key) {
            Some((_, target)) => {
                self.handle_click(*target);
                true
            }
            None => false,
        }
    }

    pub fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseControl => self.close(),
            ClickTarget::PrevControl => self.navigate(Direction::Prev),
            ClickTarget::NextControl => self.navigate(Direction::Next),
            ClickTarget::Media => {}
        }
    }

    pub fn handle_history_back(&mut self) {
        self.close();
    }

    pub fn view(&self) -> LightboxView {
        match &self.state {
            ViewerState::Closed => LightboxView::closed(),
            ViewerState::Open { items, current } => LightboxView {
                open: true,
                slot: self.slot_for(&items[*current]),
                controls_visible: items.len() > 1,
                index: Some(*current),
                total: items.len(),
            },
        }
    }

    fn slot_for(&self, item: &Item) -> Slot {
        match item {
            Item::Photo { src, alt } => Slot::Image {
                src: self.cdn.transform(src, &self.image),
                alt: alt.clone(),
            },
            Item::Video { src } => {
                let embed = classify_video(src);
                match (embed.provider(), embed.embed_url()) {
                    (Some(provider), Some(url)) => Slot::Frame { provider, src: url },
                    _ => Slot::Video { src: src.clone() },
                }
            }
        }
    }

    fn present(&mut self) {
        let view = self.view();
        self.host.present(&view);
    }
}

fn wrap_index(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxLinks {
    pub prev: String,
    pub next: String,
    pub close: String,
}

/// Overlay markup for `view`. With `links`, controls are anchors; otherwise
/// they are buttons for a page runtime.
pub fn render_lightbox_html(view: &LightboxView, links: Option<&LightboxLinks>) -> String {
    let mut html = String::new();
    html.push_str("<div id=\"lightbox\" class=\"lightbox\" data-close=\"lightbox\"");
    if !view.open {
        html.push_str(" hidden");
    }
    html.push('>');

    html.push_str(&control(
        CLOSE_ID,
        "lightbox__close",
        "Fechar",
        "×",
        links.map(|l| l.close.as_str()),
        true,
    ));
    html.push_str(&control(
        PREV_ID,
        "lightbox__prev",
        "Anterior",
        "‹",
        links.map(|l| l.prev.as_str()),
        view.controls_visible,
    ));
    html.push_str(&control(
        NEXT_ID,
        "lightbox__next",
        "Próximo",
        "›",
        links.map(|l| l.next.as_str()),
        view.controls_visible,
    ));

    html.push_str(&render_slot(&view.slot));

    if let Some(index) = view.index {
        if view.total > 1 {
            html.push_str(&format!(
                "<div class=\"lightbox__counter\">{} / {}</div>",
                index + 1,
                view.total
            ));
        }
    }
    html.push_str("</div>");
    html
}

fn control(
    id: &str,
    class: &str,
    label: &str,
    glyph: &str,
    href: Option<&str>,
    visible: bool,
) -> String {
    let hidden = if visible { "" } else { " hidden" };
    match href {
        Some(href) => format!(
            "<a id=\"{id}\" class=\"{class}\" href=\"{}\" aria-label=\"{label}\"{hidden}>{glyph}</a>",
            escape_attr(href)
        ),
        None => format!(
            "<button type=\"button\" id=\"{id}\" class=\"{class}\" aria-label=\"{label}\"{hidden}>{glyph}</button>"
        ),
    }
}

fn render_slot(slot: &Slot) -> String {
    match slot {
        Slot::Empty => "<img id=\"lightbox-img\" class=\"lightbox__media\" alt=\"\">".to_string(),
        Slot::Image { src, alt } => format!(
            "<img id=\"lightbox-img\" class=\"lightbox__media\" src=\"{}\" alt=\"{}\">",
            escape_attr(src),
            escape_attr(alt)
        ),
        Slot::Frame { src, .. } => format!(
            "<div id=\"lightbox-img\" class=\"lightbox__media lightbox__media--video\"><iframe class=\"lightbox__frame\" src=\"{}\" frameborder=\"0\" allowfullscreen></iframe></div>",
            escape_attr(src)
        ),
        Slot::Video { src } => format!(
            "<div id=\"lightbox-img\" class=\"lightbox__media lightbox__media--video\"><video class=\"lightbox__video\" controls src=\"{}\"></video></div>",
            escape_attr(src)
        ),
    }
}
