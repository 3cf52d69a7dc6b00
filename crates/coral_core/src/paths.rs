use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMapping {
    /// Link from the site root.
    pub href: String,
    pub output: PathBuf,
}

pub fn index_page() -> PageMapping {
    mapping("index.html".to_string())
}

pub fn not_found_page() -> PageMapping {
    mapping("404.html".to_string())
}

pub fn album_page(album: usize) -> PageMapping {
    mapping(format!("album-{album}.html"))
}

pub fn viewer_page(album: usize, item: usize) -> PageMapping {
    mapping(format!("{}/{}", album_dir(album), viewer_file(item)))
}

/// Link to a sibling viewer page, from inside the album's viewer directory.
pub fn viewer_sibling_href(item: usize) -> String {
    viewer_file(item)
}

/// Link back to the album page, from inside the album's viewer directory.
pub fn album_href_from_viewer(album: usize) -> String {
    format!("../{}", album_page(album).href)
}

fn album_dir(album: usize) -> String {
    format!("album-{album}")
}

fn viewer_file(item: usize) -> String {
    format!("view-{item}.html")
}

fn mapping(href: String) -> PageMapping {
    PageMapping {
        output: PathBuf::from(&href),
        href,
    }
}
