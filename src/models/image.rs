//! Per-question image attachment state.

use std::path::{Path, PathBuf};

/// Where a question's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageState {
    #[default]
    NoImage,
    /// Already stored on the server.
    Existing { id: String, url: String },
    /// Chosen locally, uploaded with the next save.
    Pending { path: PathBuf, file_name: String },
}

/// Hover preview for the attached image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub caption: String,
}

impl ImagePreview {
    /// Build the preview of a freshly read local file.
    pub fn from_file(file_name: &str, bytes: &[u8]) -> Self {
        let format = detect_format(bytes).unwrap_or("unknown format");
        Self {
            caption: format!("{} · {} · {}", file_name, format_size(bytes.len()), format),
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            caption: url.to_string(),
        }
    }
}

/// Image state plus its preview, kept in step by a generation counter.
///
/// Every transition drops the current preview and bumps the generation, so
/// a file read that completes after a newer choice or a removal is ignored.
#[derive(Debug, Clone, Default)]
pub struct ImageAttachment {
    state: ImageState,
    preview: Option<ImagePreview>,
    generation: u64,
}

impl ImageAttachment {
    /// Existing server image referenced by `url` (e.g. `/quiz/image/<id>`).
    ///
    /// A missing or malformed URL gives an empty attachment.
    pub fn from_server_url(url: Option<&str>) -> Self {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Self::default();
        };
        let id = url.rsplit('/').next().unwrap_or_default().trim();
        if id.is_empty() {
            return Self::default();
        }
        Self {
            state: ImageState::Existing {
                id: id.to_string(),
                url: url.to_string(),
            },
            preview: Some(ImagePreview::from_url(url)),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ImageState {
        &self.state
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_image(&self) -> bool {
        !matches!(self.state, ImageState::NoImage)
    }

    /// Move to the pending state for `path`. Returns the generation the
    /// caller must hand back to [`ImageAttachment::preview_loaded`].
    pub fn choose_file(&mut self, path: PathBuf) -> u64 {
        let file_name = file_name_of(&path);
        self.state = ImageState::Pending { path, file_name };
        self.preview = None;
        self.generation += 1;
        self.generation
    }

    /// Attach the preview of a completed read. Returns false for stale reads.
    pub fn preview_loaded(&mut self, generation: u64, preview: ImagePreview) -> bool {
        if generation != self.generation || !matches!(self.state, ImageState::Pending { .. }) {
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// Drop a pending file whose read failed. Returns false for stale reads.
    pub fn preview_failed(&mut self, generation: u64) -> bool {
        if generation != self.generation || !matches!(self.state, ImageState::Pending { .. }) {
            return false;
        }
        self.remove();
        true
    }

    pub fn remove(&mut self) {
        self.state = ImageState::NoImage;
        self.preview = None;
        self.generation += 1;
    }

    /// Reference sent in the question payload for the card at `card_index`.
    pub fn reference(&self, card_index: usize) -> Option<String> {
        match &self.state {
            ImageState::NoImage => None,
            ImageState::Existing { id, .. } => Some(id.clone()),
            ImageState::Pending { .. } => Some(upload_placeholder(card_index)),
        }
    }
}

/// Placeholder the server resolves against the uploaded `files` parts.
pub fn upload_placeholder(card_index: usize) -> String {
    format!("file_{}", card_index)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn detect_format(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("PNG")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("JPEG")
    } else if bytes.starts_with(b"GIF8") {
        Some("GIF")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("WebP")
    } else if bytes.starts_with(b"BM") {
        Some("BMP")
    } else {
        None
    }
}

fn format_size(len: usize) -> String {
    if len < 1024 {
        format!("{} B", len)
    } else if len < 1024 * 1024 {
        format!("{:.1} KiB", len as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", len as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_image_id_is_last_segment() {
        let image = ImageAttachment::from_server_url(Some("/quiz/image/65f1abc"));
        assert_eq!(
            image.state(),
            &ImageState::Existing {
                id: "65f1abc".to_string(),
                url: "/quiz/image/65f1abc".to_string()
            }
        );
        assert_eq!(image.reference(3).as_deref(), Some("65f1abc"));
        assert!(image.preview().is_some());
    }

    #[test]
    fn test_malformed_server_url_means_no_image() {
        assert!(!ImageAttachment::from_server_url(None).has_image());
        assert!(!ImageAttachment::from_server_url(Some("  ")).has_image());
        assert!(!ImageAttachment::from_server_url(Some("/quiz/image/")).has_image());
    }

    #[test]
    fn test_pending_image_uses_positional_placeholder() {
        let mut image = ImageAttachment::default();
        image.choose_file(PathBuf::from("/tmp/cat.png"));
        assert_eq!(image.reference(2).as_deref(), Some("file_2"));
        assert!(image.preview().is_none());
    }

    #[test]
    fn test_stale_preview_is_ignored() {
        let mut image = ImageAttachment::from_server_url(Some("/quiz/image/abc"));
        let first = image.choose_file(PathBuf::from("a.png"));
        let second = image.choose_file(PathBuf::from("b.png"));

        assert!(!image.preview_loaded(first, ImagePreview::from_file("a.png", b"")));
        assert!(image.preview().is_none());
        assert!(image.preview_loaded(second, ImagePreview::from_file("b.png", b"")));
        assert!(image.preview().is_some());

        image.remove();
        assert!(!image.preview_loaded(second, ImagePreview::from_file("b.png", b"")));
        assert_eq!(image.reference(0), None);
    }

    #[test]
    fn test_failed_read_falls_back_to_no_image() {
        let mut image = ImageAttachment::default();
        let generation = image.choose_file(PathBuf::from("gone.png"));
        assert!(image.preview_failed(generation));
        assert_eq!(image.state(), &ImageState::NoImage);
    }

    #[test]
    fn test_preview_caption_detects_format() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A];
        let preview = ImagePreview::from_file("logo.png", &png);
        assert_eq!(preview.caption, "logo.png · 6 B · PNG");

        let blob = vec![0u8; 2048];
        let preview = ImagePreview::from_file("blob.bin", &blob);
        assert_eq!(preview.caption, "blob.bin · 2.0 KiB · unknown format");
    }
}
