//! PDF export of the two template pages

pub mod layout;
pub mod pipeline;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use layout::{Orientation, PageFormat, Placement};
pub use pipeline::{
    DocumentBackend, ExportConfig, ExportOutcome, ExportState, Exporter, PageId, PdfDocument,
    Raster, RasterOptions, Rasterizer,
};
