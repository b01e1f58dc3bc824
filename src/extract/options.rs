//! Extraction options and configuration.

/// Default ratio below the cell's median font size at which a digit run
/// counts as a raised annotation.
pub const DEFAULT_SMALL_FONT_RATIO: f32 = 0.70;

/// Options for table extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Pass cell text through [`clean_text`](super::clean_text) before storing it
    pub clean_data: bool,

    /// Font-size ratio for the superscript size heuristic
    pub small_font_ratio: f32,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable text cleaning.
    pub fn with_clean_data(mut self, clean: bool) -> Self {
        self.clean_data = clean;
        self
    }

    /// Keep cell text exactly as read.
    pub fn raw(mut self) -> Self {
        self.clean_data = false;
        self
    }

    /// Set the font-size ratio for the superscript heuristic.
    pub fn with_small_font_ratio(mut self, ratio: f32) -> Self {
        self.small_font_ratio = ratio;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            clean_data: true,
            small_font_ratio: DEFAULT_SMALL_FONT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new().raw().with_small_font_ratio(0.5);

        assert!(!options.clean_data);
        assert_eq!(options.small_font_ratio, 0.5);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert!(options.clean_data);
        assert_eq!(options.small_font_ratio, DEFAULT_SMALL_FONT_RATIO);
    }
}
