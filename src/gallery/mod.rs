//! Presentation state for the gallery, kept free of any UI framework.
//!
//! Three independent pieces: the folder view, per-tile image load state, and
//! the full-size overlay. Overlay state is tracked apart from the tiles, so
//! updating one never invalidates the other.

use crate::drive::listing::FolderRecord;

/// A failing tile gets exactly one URL rewrite before going terminal.
pub const MAX_TILE_FALLBACKS: usize = 1;

struct FallbackRule {
    trigger: &'static str,
    rewrite: fn(&str) -> Option<String>,
}

/// Ordered alternate access patterns for a Drive image URL. The first rule
/// whose trigger appears in the current URL wins.
const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        trigger: "uc?export=view",
        rewrite: |url| {
            drive_file_id(url)
                .map(|id| format!("https://drive.google.com/thumbnail?id={id}&sz=w400-h300-c"))
        },
    },
    FallbackRule {
        trigger: "thumbnail",
        rewrite: |url| drive_file_id(url).map(|id| format!("https://drive.google.com/uc?id={id}")),
    },
];

/// Extract the Drive file id from either the `id=` query form or the
/// `/d/<id>/` path form.
fn drive_file_id(url: &str) -> Option<String> {
    if let Some((_, rest)) = url.split_once("id=") {
        let id = rest.split('&').next().unwrap_or_default();
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    if let Some((_, rest)) = url.split_once("/d/") {
        let id = rest.split('/').next().unwrap_or_default();
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    None
}

fn next_fallback_url(url: &str) -> Option<String> {
    FALLBACK_RULES
        .iter()
        .find(|rule| url.contains(rule.trigger))
        .and_then(|rule| (rule.rewrite)(url))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ImageTile {
    url: String,
    state: TileState,
    fallbacks_used: usize,
}

impl ImageTile {
    pub fn new(url: impl Into<String>) -> Self {
        ImageTile {
            url: url.into(),
            state: TileState::Pending,
            fallbacks_used: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &TileState {
        &self.state
    }

    pub fn mark_loaded(&mut self) {
        self.state = TileState::Loaded;
    }

    /// A load failure rewrites the URL through the next access pattern, at
    /// most `MAX_TILE_FALLBACKS` times; after that the tile is terminally
    /// failed.
    pub fn mark_failed(&mut self) {
        if self.fallbacks_used < MAX_TILE_FALLBACKS {
            if let Some(next) = next_fallback_url(&self.url) {
                self.url = next;
                self.fallbacks_used += 1;
                self.state = TileState::Pending;
                return;
            }
        }
        self.state = TileState::Failed;
    }
}

#[derive(Debug)]
pub enum GalleryView {
    Loading,
    Empty,
    Error(String),
    Loaded {
        folders: Vec<FolderRecord>,
        selected: usize,
    },
}

impl GalleryView {
    pub fn loading() -> Self {
        GalleryView::Loading
    }

    /// Folders arrive already sorted newest-first; the first one becomes the
    /// default selection.
    pub fn resolve(folders: Vec<FolderRecord>) -> Self {
        if folders.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Loaded {
                folders,
                selected: 0,
            }
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        GalleryView::Error(message.into())
    }

    /// Switch the selection to the folder with the given id. Returns false
    /// when the id is unknown, leaving the selection untouched.
    pub fn select(&mut self, folder_id: &str) -> bool {
        if let GalleryView::Loaded { folders, selected } = self {
            if let Some(index) = folders.iter().position(|folder| folder.id == folder_id) {
                *selected = index;
                return true;
            }
        }
        false
    }

    pub fn selected_folder(&self) -> Option<&FolderRecord> {
        match self {
            GalleryView::Loaded { folders, selected } => folders.get(*selected),
            _ => None,
        }
    }
}

/// Full-size image overlay, dismissed by the close control or escape.
#[derive(Debug, Default)]
pub struct Overlay {
    image: Option<String>,
    loading: bool,
}

impl Overlay {
    pub fn open(&mut self, url: impl Into<String>) {
        self.image = Some(url.into());
        self.loading = true;
    }

    pub fn mark_loaded(&mut self) {
        self.loading = false;
    }

    pub fn close(&mut self) {
        self.image = None;
        self.loading = false;
    }

    /// Escape behaves exactly like the close control.
    pub fn dismiss(&mut self) {
        self.close();
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, modified: &str) -> FolderRecord {
        FolderRecord {
            id: id.to_string(),
            name: id.to_string(),
            last_modified: modified.parse().unwrap(),
            images: vec![format!("/proxy-image/{id}-img")],
        }
    }

    #[test]
    fn view_fallback_url_is_tried_exactly_once() {
        let mut tile = ImageTile::new("https://drive.google.com/uc?export=view&id=abc123");

        tile.mark_failed();
        assert_eq!(
            tile.url(),
            "https://drive.google.com/thumbnail?id=abc123&sz=w400-h300-c"
        );
        assert_eq!(tile.state(), &TileState::Pending);

        tile.mark_failed();
        assert_eq!(tile.state(), &TileState::Failed);
        // No third rewrite; the URL stays at the fallback form.
        assert_eq!(
            tile.url(),
            "https://drive.google.com/thumbnail?id=abc123&sz=w400-h300-c"
        );
    }

    #[test]
    fn thumbnail_url_falls_back_to_direct_form() {
        let mut tile = ImageTile::new("https://drive.google.com/thumbnail?id=abc123&sz=w400");

        tile.mark_failed();
        assert_eq!(tile.url(), "https://drive.google.com/uc?id=abc123");
        assert_eq!(tile.state(), &TileState::Pending);
    }

    #[test]
    fn unrecognized_url_fails_without_a_rewrite() {
        let mut tile = ImageTile::new("/proxy-image/abc123");

        tile.mark_failed();
        assert_eq!(tile.state(), &TileState::Failed);
        assert_eq!(tile.url(), "/proxy-image/abc123");
    }

    #[test]
    fn file_id_is_parsed_from_both_url_forms() {
        assert_eq!(
            drive_file_id("https://drive.google.com/uc?export=view&id=abc&x=1"),
            Some("abc".to_string())
        );
        assert_eq!(
            drive_file_id("https://drive.google.com/file/d/xyz/view"),
            Some("xyz".to_string())
        );
        assert_eq!(drive_file_id("https://example.com/plain"), None);
    }

    #[test]
    fn most_recent_folder_is_selected_by_default() {
        let mut view = GalleryView::resolve(vec![
            record("newest", "2024-01-15T10:30:00Z"),
            record("older", "2024-01-10T14:20:00Z"),
        ]);

        assert_eq!(view.selected_folder().unwrap().id, "newest");

        assert!(view.select("older"));
        assert_eq!(view.selected_folder().unwrap().id, "older");

        assert!(!view.select("missing"));
        assert_eq!(view.selected_folder().unwrap().id, "older");
    }

    #[test]
    fn no_folders_resolves_to_empty() {
        let view = GalleryView::resolve(Vec::new());
        assert!(matches!(view, GalleryView::Empty));
        assert!(view.selected_folder().is_none());
    }

    #[test]
    fn overlay_state_is_independent_of_tiles() {
        let mut tile = ImageTile::new("/proxy-image/abc");
        tile.mark_loaded();

        let mut overlay = Overlay::default();
        overlay.open("/proxy-image/abc");
        assert!(overlay.is_open());
        assert!(overlay.is_loading());

        overlay.mark_loaded();
        assert!(!overlay.is_loading());

        overlay.dismiss();
        assert!(!overlay.is_open());

        // The tile never saw any of the overlay transitions.
        assert_eq!(tile.state(), &TileState::Loaded);
    }
}
