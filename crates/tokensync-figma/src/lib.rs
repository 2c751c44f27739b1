mod client;
mod color;
mod extractor;
mod sync;
mod types;

pub use client::{FigmaApi, FigmaClient};
pub use color::{format_number, to_css_color};
pub use extractor::{Extraction, TokenExtractor};
pub use sync::{BrandSyncOptions, BrandSyncReport, SourceSyncReport, TokenSync};
pub use types::*;
