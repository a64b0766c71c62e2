//! Configuration options for Markdown export

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
    /// Use setext-style headings (underlined with = or -)
    /// Only works for levels 1 and 2, falls back to ATX below that
    Setext,
}

/// Options for an export
#[derive(Debug, Clone)]
pub struct Options {
    /// Heading style (atx or setext)
    pub heading_style: HeadingStyle,

    /// File extensions (without the dot) treated as inline images
    pub image_extensions: Vec<String>,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,
}

impl Options {
    /// Check whether a path ends in a recognized image extension
    pub fn is_image_path(&self, path: &str) -> bool {
        let Some((_, extension)) = path.rsplit_once('.') else {
            return false;
        };
        self.image_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            image_extensions: ["jpeg", "jpg", "png", "gif", "svg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            hr: "---".to_string(),
            bullet_list_marker: '-',
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
        }
    }
}
