//! Content sniffing for uploaded receipts
//!
//! The declared MIME type of an upload is never trusted; the actual file
//! kind is derived from the bytes. Receipts are images or PDFs.

use image::ImageFormat;

/// A recognized receipt file kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKind {
    pub extension: &'static str,
    pub mime: &'static str,
}

const PDF: FileKind = FileKind {
    extension: "pdf",
    mime: "application/pdf",
};
const PNG: FileKind = FileKind {
    extension: "png",
    mime: "image/png",
};
const JPG: FileKind = FileKind {
    extension: "jpg",
    mime: "image/jpeg",
};
const WEBP: FileKind = FileKind {
    extension: "webp",
    mime: "image/webp",
};

/// Sniff the file kind from content. Returns None for anything that is not
/// a supported receipt format, in which case the caller skips the upload.
pub fn detect(data: &[u8]) -> Option<FileKind> {
    if data.starts_with(b"%PDF") {
        return Some(PDF);
    }
    match image::guess_format(data).ok()? {
        ImageFormat::Png => Some(PNG),
        ImageFormat::Jpeg => Some(JPG),
        ImageFormat::WebP => Some(WEBP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = b"\x89PNG\r\n\x1a\nrest-of-file";
        let kind = detect(data).unwrap();
        assert_eq!(kind.extension, "png");
        assert_eq!(kind.mime, "image/png");
    }

    #[test]
    fn test_detect_jpeg() {
        let data = b"\xff\xd8\xff\xe0\x00\x10JFIF";
        let kind = detect(data).unwrap();
        assert_eq!(kind.extension, "jpg");
        assert_eq!(kind.mime, "image/jpeg");
    }

    #[test]
    fn test_detect_pdf() {
        let data = b"%PDF-1.7\n%binary";
        let kind = detect(data).unwrap();
        assert_eq!(kind.extension, "pdf");
        assert_eq!(kind.mime, "application/pdf");
    }

    #[test]
    fn test_detect_webp() {
        let data = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
        let kind = detect(data).unwrap();
        assert_eq!(kind.extension, "webp");
    }

    #[test]
    fn test_unknown_content_is_none() {
        assert!(detect(b"hello world, not a receipt").is_none());
        assert!(detect(b"").is_none());
    }
}
