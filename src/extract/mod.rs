//! Table extraction: annotation detection, section grouping and cell cleaning.

mod classify;
mod clean;
mod engine;
mod options;
pub mod section;

pub use classify::{
    classify, is_subscript_digit, is_superscript_digit, Annotation, AnnotationClassifier,
};
pub use clean::clean_text;
pub use engine::TableExtractor;
pub use options::{ExtractOptions, DEFAULT_SMALL_FONT_RATIO};
pub use section::{is_heading, segment, SegmentedTable, Segmentation};
