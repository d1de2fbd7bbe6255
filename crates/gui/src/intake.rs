#![forbid(unsafe_code)]

//! Attachment intake channels: file picker, drag-and-drop and clipboard
//! paste. Each channel produces `Attachment` candidates; validation and
//! dedup happen inside the set itself.

use std::io::Cursor;
use std::path::Path;

use relato_core::Attachment;

pub(crate) fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

pub(crate) fn is_image_path(path: &Path) -> bool {
    mime_for_path(path).is_some()
}

/// Reads a picked or dropped file into a candidate. Unknown extensions pass
/// through with a non-image type so the set rejects them with an alert
/// naming the file.
pub(crate) fn attachment_from_path(path: &Path) -> Option<Attachment> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let data = std::fs::read(path).ok()?;
    let mime = mime_for_path(path).unwrap_or("application/octet-stream");
    Some(Attachment::new(name, mime, data))
}

/// Opens the native picker and returns every selected file as a candidate.
pub(crate) fn pick_image_files() -> Vec<Attachment> {
    let picked = rfd::FileDialog::new()
        .add_filter("Imagens", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .set_title("Selecionar fotos")
        .pick_files();
    picked
        .unwrap_or_default()
        .iter()
        .filter_map(|p| attachment_from_path(p))
        .collect()
}

/// Clipboard image, re-encoded as PNG. Returns `None` when the clipboard
/// holds no image (text paste is left to the focused widget).
pub(crate) fn clipboard_image_attachment() -> Option<Attachment> {
    let mut clipboard = arboard::Clipboard::new().ok()?;
    let img = clipboard.get_image().ok()?;
    let (w, h) = (img.width as u32, img.height as u32);
    let rgba = image::RgbaImage::from_raw(w, h, img.bytes.into_owned())?;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .ok()?;
    Some(Attachment::new(
        format!("colada-{}x{}.png", w, h),
        "image/png",
        png,
    ))
}

/// Cache key for an attachment preview; (name, size) is the set's own
/// identity, so the texture follows the attachment's lifetime.
pub(crate) fn attachment_texture_key(a: &Attachment) -> String {
    format!("attachment://{}/{}", a.name, a.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_for_known_image_extensions() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("b.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("c.txt")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }

    #[test]
    fn texture_key_tracks_name_and_size() {
        let a = Attachment::new("a.png", "image/png", vec![0; 3]);
        let b = Attachment::new("a.png", "image/png", vec![0; 4]);
        assert_ne!(attachment_texture_key(&a), attachment_texture_key(&b));
    }
}
