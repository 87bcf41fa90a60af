//! Browser export backends: `html2canvas` for rasterization, `jsPDF` for
//! document assembly. Both libraries are loaded by the host page.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

use super::layout::{PageFormat, Placement};
use super::pipeline::{DocumentBackend, PageId, PdfDocument, Raster, RasterOptions, Rasterizer};
use crate::error::ExportError;

#[wasm_bindgen(inline_js = "
    export async function rasterize_element(id, scale, background) {
        const el = document.getElementById(id);
        if (!el) {
            throw new Error('missing element #' + id);
        }
        const canvas = await window.html2canvas(el, {
            scale,
            useCORS: true,
            allowTaint: true,
            logging: false,
            backgroundColor: background,
        });
        return { dataUrl: canvas.toDataURL('image/png'), width: canvas.width, height: canvas.height };
    }

    export function pdf_create(orientation, width, height) {
        return new window.jspdf.jsPDF({ orientation, unit: 'mm', format: [width, height] });
    }

    export function pdf_add_image(doc, dataUrl, x, y, width, height) {
        doc.addImage(dataUrl, 'PNG', x, y, width, height);
    }

    export function pdf_add_page(doc) {
        doc.addPage();
    }

    export function pdf_save(doc, fileName) {
        doc.save(fileName);
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn rasterize_element(id: &str, scale: f64, background: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn pdf_create(orientation: &str, width: f64, height: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn pdf_add_image(
        doc: &JsValue,
        data_url: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn pdf_add_page(doc: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn pdf_save(doc: &JsValue, file_name: &str) -> Result<(), JsValue>;
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Rasterizes the `#page-1` / `#page-2` containers
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRasterizer;

impl Rasterizer for HtmlRasterizer {
    async fn rasterize(&self, page: PageId, options: &RasterOptions) -> Result<Raster, ExportError> {
        let fail = |reason: String| ExportError::Rasterize {
            page: page.label(),
            reason,
        };

        let result = rasterize_element(page.element_id(), options.scale, &options.background)
            .await
            .map_err(|e| fail(describe(&e)))?;

        let field = |name: &str| Reflect::get(&result, &JsValue::from_str(name)).ok();
        let data_url = field("dataUrl")
            .and_then(|v| v.as_string())
            .ok_or_else(|| fail("no image data".into()))?;
        let width = field("width").and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = field("height").and_then(|v| v.as_f64()).unwrap_or(0.0);

        Ok(Raster {
            data_url,
            width: width as u32,
            height: height as u32,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsPdfBackend;

pub struct JsPdfDocument {
    doc: JsValue,
}

impl DocumentBackend for JsPdfBackend {
    type Document = JsPdfDocument;

    fn create(&self, format: &PageFormat) -> Result<JsPdfDocument, ExportError> {
        let doc = pdf_create(format.orientation.as_str(), format.width_mm, format.height_mm)
            .map_err(|e| ExportError::Document(describe(&e)))?;
        Ok(JsPdfDocument { doc })
    }
}

impl PdfDocument for JsPdfDocument {
    fn add_image(&mut self, raster: &Raster, placement: &Placement) -> Result<(), ExportError> {
        pdf_add_image(
            &self.doc,
            &raster.data_url,
            placement.x_mm,
            placement.y_mm,
            placement.width_mm,
            placement.height_mm,
        )
        .map_err(|e| ExportError::Document(describe(&e)))
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        pdf_add_page(&self.doc).map_err(|e| ExportError::Document(describe(&e)))
    }

    fn save(self, file_name: &str) -> Result<(), ExportError> {
        pdf_save(&self.doc, file_name).map_err(|e| ExportError::Document(describe(&e)))
    }
}
