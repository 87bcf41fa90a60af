//! Page geometry for the exported PDF

use crate::consts::{A4_HEIGHT_MM, A4_WIDTH_MM};

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
        }
    }
}

/// Paper format in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub orientation: Orientation,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageFormat {
    pub const A4_PORTRAIT: PageFormat = PageFormat {
        orientation: Orientation::Portrait,
        width_mm: A4_WIDTH_MM,
        height_mm: A4_HEIGHT_MM,
    };
}

/// Where an image lands on a page, in millimetres from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Placement {
    /// Full page width at the top-left, height scaled to keep the aspect
    /// ratio. Tall rasters run past the bottom edge; they are not shrunk.
    ///
    /// Returns `None` for a raster with no area.
    pub fn full_width(format: &PageFormat, raster_width: u32, raster_height: u32) -> Option<Self> {
        if raster_width == 0 || raster_height == 0 {
            return None;
        }
        let width_mm = format.width_mm;
        let height_mm = f64::from(raster_height) * width_mm / f64::from(raster_width);
        Some(Self {
            x_mm: 0.0,
            y_mm: 0.0,
            width_mm,
            height_mm,
        })
    }

    pub fn overflows(&self, format: &PageFormat) -> bool {
        self.y_mm + self.height_mm > format.height_mm
    }
}
