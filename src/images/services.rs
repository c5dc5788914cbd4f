use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_filename(name: &str) -> bool {
    lazy_static! {
        static ref FILENAME_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap();
    }
    FILENAME_RE.is_match(name) && !name.contains("..")
}

pub(crate) fn mime_from_ext(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// File-name stem used for a food's picture: `Chilli Ramen` -> `chilli_ramen`.
pub fn image_slug(food_name: &str) -> String {
    let mut slug = String::with_capacity(food_name.len());
    for c in food_name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

pub fn image_url(base_url: &str, food_name: &str) -> String {
    format!("{}/images/{}.jpg", base_url.trim_end_matches('/'), image_slug(food_name))
}

/// Reads an image from `dir`; `Ok(None)` when the file does not exist.
pub async fn load_image(dir: &Path, name: &str) -> anyhow::Result<Option<(Bytes, &'static str)>> {
    anyhow::ensure!(is_valid_filename(name), "invalid image name {name:?}");
    let path: PathBuf = dir.join(name);
    match tokio::fs::read(&path).await {
        Ok(raw) => Ok(Some((Bytes::from(raw), mime_from_ext(name)))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read image {}", path.display())),
    }
}

#[cfg(test)]
mod image_tests {
    use tempfile::TempDir;

    #[test]
    fn test_mime_from_ext() {
        assert_eq!(super::mime_from_ext("ramen.jpg"), "image/jpeg");
        assert_eq!(super::mime_from_ext("ramen.JPEG"), "image/jpeg");
        assert_eq!(super::mime_from_ext("ramen.png"), "image/png");
        assert_eq!(super::mime_from_ext("ramen.webp"), "image/webp");
        assert_eq!(super::mime_from_ext("ramen.gif"), "image/gif");
        assert_eq!(super::mime_from_ext("ramen.heic"), "image/heic");
        assert_eq!(super::mime_from_ext("ramen"), "application/octet-stream");
        assert_eq!(super::mime_from_ext("ramen.txt"), "application/octet-stream");
    }

    #[test]
    fn test_is_valid_filename() {
        assert!(super::is_valid_filename("chilli_ramen.jpg"));
        assert!(super::is_valid_filename("Bibimbap-2.png"));
        assert!(!super::is_valid_filename("../secret.json"));
        assert!(!super::is_valid_filename("a..b.jpg"));
        assert!(!super::is_valid_filename(".hidden"));
        assert!(!super::is_valid_filename("dir/file.jpg"));
        assert!(!super::is_valid_filename(""));
    }

    #[test]
    fn test_image_slug_and_url() {
        assert_eq!(super::image_slug("Chilli Ramen"), "chilli_ramen");
        assert_eq!(super::image_slug("Mala Xiang-Guo!"), "mala_xiang_guo");
        assert_eq!(
            super::image_url("https://bot.example/", "Oatmeal with Berries"),
            "https://bot.example/images/oatmeal_with_berries.jpg"
        );
    }

    #[tokio::test]
    async fn test_load_image() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ramen.png"), b"png-bytes").unwrap();

        let (body, ct) = super::load_image(dir.path(), "ramen.png").await.unwrap().unwrap();
        assert_eq!(&body[..], b"png-bytes");
        assert_eq!(ct, "image/png");

        assert!(super::load_image(dir.path(), "missing.jpg").await.unwrap().is_none());
        assert!(super::load_image(dir.path(), "../ramen.png").await.is_err());
    }
}
