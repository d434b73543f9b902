use std::path::Path;

/// Extensions that are always treated as binary, whatever the content.
const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "svg", "tiff", "tif",
    // Video
    "mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v",
    // Audio
    "mp3", "wav", "flac", "aac", "ogg", "wma", "m4a",
    // Archives
    "zip", "tar", "gz", "bz2", "7z", "rar", "xz",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // Executables
    "exe", "dll", "so", "dylib", "bin", "app",
    // Fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // Other
    "sqlite", "db", "iso", "dmg", "pkg", "deb", "rpm",
];

const SAMPLE_SIZE: usize = 8192;
const NON_PRINTABLE_THRESHOLD: f64 = 0.3;

/// Decides whether a file should be treated as binary, from its name first and
/// then from either content snapshot.
#[must_use]
pub fn is_binary(filename: &str, committed: &[u8], working: &[u8]) -> bool {
    if has_binary_extension(filename) {
        return true;
    }

    [committed, working]
        .iter()
        .any(|content| !content.is_empty() && looks_binary(content))
}

fn has_binary_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn looks_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }

    if sample.contains(&0) {
        return true;
    }

    let non_printable = sample
        .iter()
        .filter(|&&byte| {
            (byte < 32 && !matches!(byte, b'\t' | b'\n' | b'\r')) || byte > 126
        })
        .count();

    #[allow(clippy::cast_precision_loss)]
    let ratio = non_printable as f64 / sample.len() as f64;
    ratio > NON_PRINTABLE_THRESHOLD
}
