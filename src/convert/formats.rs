use std::path::Path;

/// Source extensions the file set accepts, matched case-insensitively.
pub const SUPPORTED_INPUT_EXTENSIONS: [&str; 7] =
    ["heic", "jpg", "jpeg", "png", "bmp", "tiff", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Webp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Webp => "WEBP",
        }
    }

    /// Fixed destination extension, without the dot.
    pub fn extension(&self) -> &str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn all() -> Vec<OutputFormat> {
        vec![
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::Bmp,
            OutputFormat::Tiff,
            OutputFormat::Webp,
        ]
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
            OutputFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| SUPPORTED_INPUT_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_mapping_is_fixed() {
        let expected = [
            (OutputFormat::Jpeg, "jpg"),
            (OutputFormat::Png, "png"),
            (OutputFormat::Bmp, "bmp"),
            (OutputFormat::Tiff, "tiff"),
            (OutputFormat::Webp, "webp"),
        ];
        for (format, ext) in expected {
            assert_eq!(format.extension(), ext);
        }
        assert_eq!(OutputFormat::all().len(), 5);
    }

    #[test]
    fn input_extensions_match_case_insensitively() {
        assert!(is_supported_input(&PathBuf::from("/photos/IMG_0001.HEIC")));
        assert!(is_supported_input(&PathBuf::from("/photos/scan.Jpeg")));
        assert!(is_supported_input(&PathBuf::from("a.gif")));
        assert!(!is_supported_input(&PathBuf::from("/photos/notes.txt")));
        assert!(!is_supported_input(&PathBuf::from("/photos/clip.mp4")));
        assert!(!is_supported_input(&PathBuf::from("no_extension")));
    }

    #[test]
    fn webp_is_output_only() {
        assert!(!is_supported_input(&PathBuf::from("a.webp")));
        assert_eq!(OutputFormat::Webp.extension(), "webp");
    }
}
