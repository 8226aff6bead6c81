/// File type categorisation based on file extensions.
///
/// Every file is mapped to one of a closed set of categories by a static
/// extension table. Unmapped extensions land in `Other`, files without a
/// suffix in `NoExtension`. A [`CategoryFilter`] decides which categories a
/// scan aggregates.
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Broad file type categories used for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Documents,
    Images,
    Video,
    Audio,
    Archives,
    Programs,
    Code,
    DiscImages,
    Torrents,
    Design,
    Ebooks,
    Other,
    NoExtension,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Documents,
        Category::Images,
        Category::Video,
        Category::Audio,
        Category::Archives,
        Category::Programs,
        Category::Code,
        Category::DiscImages,
        Category::Torrents,
        Category::Design,
        Category::Ebooks,
        Category::Other,
        Category::NoExtension,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Images => "Images",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Archives => "Archives",
            Self::Programs => "Programs",
            Self::Code => "Code",
            Self::DiscImages => "Disc images",
            Self::Torrents => "Torrents",
            Self::Design => "Design files",
            Self::Ebooks => "E-books",
            Self::Other => "Other",
            Self::NoExtension => "No extension",
        }
    }

    /// Command-line name, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Images => "images",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Archives => "archives",
            Self::Programs => "programs",
            Self::Code => "code",
            Self::DiscImages => "disc-images",
            Self::Torrents => "torrents",
            Self::Design => "design",
            Self::Ebooks => "ebooks",
            Self::Other => "other",
            Self::NoExtension => "no-extension",
        }
    }

    /// Extensions (lowercase, without the dot) mapped to this category.
    /// Empty for `Other` and `NoExtension`.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Documents => &[
                "txt", "doc", "docx", "pdf", "rtf", "odt", "xls", "xlsx", "ods", "ppt", "pptx",
                "odp", "csv", "md",
            ],
            Self::Images => &[
                "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "svg", "ico", "heic",
                "heif", "raw",
            ],
            Self::Video => &[
                "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "3gp",
            ],
            Self::Audio => &["mp3", "wav", "flac", "aac", "ogg", "wma", "m4a", "opus"],
            Self::Archives => &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "zst"],
            Self::Programs => &[
                "exe", "dll", "msi", "app", "deb", "rpm", "apk", "appimage", "so", "dylib",
            ],
            Self::Code => &[
                "py", "js", "ts", "html", "css", "java", "cpp", "c", "h", "hpp", "cs", "php",
                "rb", "go", "rs", "sh", "json", "toml", "yaml", "yml", "xml", "sql",
            ],
            Self::DiscImages => &["iso", "img", "dmg", "vhd", "vhdx", "vmdk"],
            Self::Torrents => &["torrent", "magnet"],
            Self::Design => &["psd", "ai", "sketch", "fig", "xd"],
            Self::Ebooks => &["epub", "mobi", "azw", "azw3", "fb2"],
            Self::Other | Self::NoExtension => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown file category '{0}' (run `spacetally categories` for the list)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Category::ALL
            .into_iter()
            .find(|cat| cat.name() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Categorise a bare extension (no leading dot).
///
/// Zero-heap-allocation hot path: extensions are lowercased into a fixed-size
/// stack buffer rather than allocating a `String`. Extensions longer than
/// 16 bytes are treated as `Other`, an empty one as `NoExtension`.
pub fn categorise_extension(ext: &str) -> Category {
    let bytes = ext.as_bytes();
    if bytes.is_empty() {
        return Category::NoExtension;
    }
    if bytes.len() > 16 {
        return Category::Other;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return Category::Other,
    };

    match lower_str {
        "txt" | "doc" | "docx" | "pdf" | "rtf" | "odt" | "xls" | "xlsx" | "ods" | "ppt"
        | "pptx" | "odp" | "csv" | "md" => Category::Documents,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "tif" | "webp" | "svg" | "ico"
        | "heic" | "heif" | "raw" => Category::Images,
        "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpg" | "mpeg"
        | "3gp" => Category::Video,
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" | "opus" => Category::Audio,
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "zst" => Category::Archives,
        "exe" | "dll" | "msi" | "app" | "deb" | "rpm" | "apk" | "appimage" | "so" | "dylib" => {
            Category::Programs
        }
        "py" | "js" | "ts" | "html" | "css" | "java" | "cpp" | "c" | "h" | "hpp" | "cs"
        | "php" | "rb" | "go" | "rs" | "sh" | "json" | "toml" | "yaml" | "yml" | "xml"
        | "sql" => Category::Code,
        "iso" | "img" | "dmg" | "vhd" | "vhdx" | "vmdk" => Category::DiscImages,
        "torrent" | "magnet" => Category::Torrents,
        "psd" | "ai" | "sketch" | "fig" | "xd" => Category::Design,
        "epub" | "mobi" | "azw" | "azw3" | "fb2" => Category::Ebooks,
        _ => Category::Other,
    }
}

/// Classify a file by name. Only the final suffix counts, so
/// `backup.tar.gz` is an archive and `.env` has no extension.
pub fn classify(file_name: &str) -> Category {
    match Path::new(file_name).extension() {
        Some(ext) => categorise_extension(&ext.to_string_lossy()),
        None => Category::NoExtension,
    }
}

/// Which categories a scan aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every file, whatever its category.
    #[default]
    All,
    /// Only the listed categories.
    Only(BTreeSet<Category>),
}

impl CategoryFilter {
    /// Build a filter from a list; an empty list means `All`.
    pub fn from_categories<I: IntoIterator<Item = Category>>(categories: I) -> Self {
        let set: BTreeSet<Category> = categories.into_iter().collect();
        if set.is_empty() {
            Self::All
        } else {
            Self::Only(set)
        }
    }

    /// `Other` only matches when explicitly selected. Files without an
    /// extension are unmapped as well, so selecting `Other` includes them.
    pub fn is_included(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => {
                set.contains(&category)
                    || (category == Category::NoExtension && set.contains(&Category::Other))
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all categories"),
            Self::Only(set) => {
                let names: Vec<&str> = set.iter().map(|c| c.label()).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}
