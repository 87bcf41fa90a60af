//! Two-page PDF export
//!
//! Page 1 is rasterized and placed before page 2 starts rendering, so only
//! one page raster is alive at a time and page order is fixed. At most one
//! export runs at once; a trigger while `Exporting` is ignored.

use std::cell::{Cell, RefCell};

use super::layout::{PageFormat, Placement};
use crate::error::ExportError;

/// The two template pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    First,
    Second,
}

impl PageId {
    pub fn label(&self) -> &'static str {
        match self {
            PageId::First => "page 1",
            PageId::Second => "page 2",
        }
    }

    /// DOM id of the page container
    pub fn element_id(&self) -> &'static str {
        match self {
            PageId::First => "page-1",
            PageId::Second => "page-2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    /// CSS color painted behind the page
    pub background: String,
}

/// A rendered page as a PNG data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// Renders an on-screen page region to an image
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    async fn rasterize(&self, page: PageId, options: &RasterOptions) -> Result<Raster, ExportError>;
}

/// A PDF being assembled. Nothing reaches the user until `save`.
pub trait PdfDocument {
    fn add_image(&mut self, raster: &Raster, placement: &Placement) -> Result<(), ExportError>;
    fn add_page(&mut self) -> Result<(), ExportError>;
    /// Hand the finished file to the user as a download
    fn save(self, file_name: &str) -> Result<(), ExportError>;
}

pub trait DocumentBackend {
    type Document: PdfDocument;

    fn create(&self, format: &PageFormat) -> Result<Self::Document, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting,
    /// Transient: reported on failure right before returning to `Idle`
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved { file_name: String, pages: usize },
    /// Another export was already running
    Skipped,
    Failed(ExportError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub file_name: String,
    pub scale: f64,
    pub fallback_background: String,
}

pub struct Exporter<R, D> {
    rasterizer: R,
    documents: D,
    config: ExportConfig,
    state: Cell<ExportState>,
    observer: RefCell<Option<Box<dyn Fn(ExportState)>>>,
}

impl<R: Rasterizer, D: DocumentBackend> Exporter<R, D> {
    pub fn new(rasterizer: R, documents: D, config: ExportConfig) -> Self {
        Self {
            rasterizer,
            documents,
            config,
            state: Cell::new(ExportState::Idle),
            observer: RefCell::new(None),
        }
    }

    pub fn state(&self) -> ExportState {
        self.state.get()
    }

    pub fn is_exporting(&self) -> bool {
        self.state.get() == ExportState::Exporting
    }

    /// Called on every state change
    pub fn set_observer(&self, observer: impl Fn(ExportState) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Export both pages into one PDF and trigger the download.
    ///
    /// `theme_background` is the host's background color, if any.
    pub async fn export(&self, theme_background: Option<&str>) -> ExportOutcome {
        if self.is_exporting() {
            log::debug!("Export already running, ignoring trigger");
            return ExportOutcome::Skipped;
        }

        let guard = StateGuard::enter(self);
        let options = RasterOptions {
            scale: self.config.scale,
            background: self.background(theme_background),
        };

        match self.run(&options).await {
            Ok(pages) => {
                guard.finish();
                log::info!("Exported {} pages to {}", pages, self.config.file_name);
                ExportOutcome::Saved {
                    file_name: self.config.file_name.clone(),
                    pages,
                }
            }
            Err(e) => {
                log::error!("PDF export failed: {}", e);
                guard.fail();
                ExportOutcome::Failed(e)
            }
        }
    }

    fn background(&self, theme_background: Option<&str>) -> String {
        match theme_background.map(str::trim) {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => self.config.fallback_background.clone(),
        }
    }

    async fn run(&self, options: &RasterOptions) -> Result<usize, ExportError> {
        let format = PageFormat::A4_PORTRAIT;

        let (first, placement) = self.render(PageId::First, &format, options).await?;
        let mut document = self.documents.create(&format)?;
        document.add_image(&first, &placement)?;
        drop(first);

        document.add_page()?;
        let (second, placement) = self.render(PageId::Second, &format, options).await?;
        document.add_image(&second, &placement)?;

        document.save(&self.config.file_name)?;
        Ok(2)
    }

    async fn render(
        &self,
        page: PageId,
        format: &PageFormat,
        options: &RasterOptions,
    ) -> Result<(Raster, Placement), ExportError> {
        let raster = self.rasterizer.rasterize(page, options).await?;
        let placement = Placement::full_width(format, raster.width, raster.height).ok_or(
            ExportError::EmptyRaster {
                page: page.label(),
                width: raster.width,
                height: raster.height,
            },
        )?;
        if placement.overflows(format) {
            log::warn!(
                "{} is taller than the page ({:.1} mm), bottom will be cut",
                page.label(),
                placement.height_mm
            );
        }
        log::debug!("Rasterized {} at {}x{}", page.label(), raster.width, raster.height);
        Ok((raster, placement))
    }

    fn set_state(&self, state: ExportState) {
        self.state.set(state);
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(state);
        }
    }
}

/// Holds the `Exporting` state. Dropping it (including when the export
/// future is dropped mid-flight) returns the exporter to `Idle`.
struct StateGuard<'a, R: Rasterizer, D: DocumentBackend> {
    exporter: &'a Exporter<R, D>,
}

impl<'a, R: Rasterizer, D: DocumentBackend> StateGuard<'a, R, D> {
    fn enter(exporter: &'a Exporter<R, D>) -> Self {
        exporter.set_state(ExportState::Exporting);
        Self { exporter }
    }

    fn finish(self) {}

    fn fail(self) {
        self.exporter.set_state(ExportState::Failed);
    }
}

impl<R: Rasterizer, D: DocumentBackend> Drop for StateGuard<'_, R, D> {
    fn drop(&mut self) {
        self.exporter.set_state(ExportState::Idle);
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::rc::Rc;

    use futures::channel::oneshot;

    use super::*;

    pub type EventLog = Rc<RefCell<Vec<String>>>;

    /// Rasterizer returning fixed-size rasters, optionally blocked on a gate
    #[derive(Default)]
    pub struct FakeRasterizer {
        pub events: EventLog,
        pub size: Option<(u32, u32)>,
        pub fail_on: Option<PageId>,
        pub gate: RefCell<Option<oneshot::Receiver<()>>>,
        pub seen_options: Rc<RefCell<Vec<RasterOptions>>>,
    }

    impl FakeRasterizer {
        pub fn new(events: EventLog) -> Self {
            Self {
                events,
                ..Self::default()
            }
        }

        /// Block the next rasterization until the returned sender fires
        pub fn gated(events: EventLog) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let rasterizer = Self {
                gate: RefCell::new(Some(rx)),
                ..Self::new(events)
            };
            (rasterizer, tx)
        }
    }

    impl Rasterizer for FakeRasterizer {
        async fn rasterize(&self, page: PageId, options: &RasterOptions) -> Result<Raster, ExportError> {
            self.events.borrow_mut().push(format!("rasterize {}", page.element_id()));
            self.seen_options.borrow_mut().push(options.clone());
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.fail_on == Some(page) {
                return Err(ExportError::Rasterize {
                    page: page.label(),
                    reason: "canvas tainted".into(),
                });
            }
            let (width, height) = self.size.unwrap_or((1260, 1782));
            Ok(Raster {
                data_url: format!("data:image/png;base64,{}", page.element_id()),
                width,
                height,
            })
        }
    }

    #[derive(Default)]
    pub struct FakeBackend {
        pub events: EventLog,
        pub saved: Rc<RefCell<Vec<String>>>,
        pub fail_save: bool,
    }

    pub struct FakeDocument {
        events: EventLog,
        saved: Rc<RefCell<Vec<String>>>,
        fail_save: bool,
    }

    impl DocumentBackend for FakeBackend {
        type Document = FakeDocument;

        fn create(&self, format: &PageFormat) -> Result<FakeDocument, ExportError> {
            self.events.borrow_mut().push(format!(
                "create {} {}x{}",
                format.orientation.as_str(),
                format.width_mm,
                format.height_mm
            ));
            Ok(FakeDocument {
                events: self.events.clone(),
                saved: self.saved.clone(),
                fail_save: self.fail_save,
            })
        }
    }

    impl PdfDocument for FakeDocument {
        fn add_image(&mut self, raster: &Raster, placement: &Placement) -> Result<(), ExportError> {
            let source = raster.data_url.rsplit(',').next().unwrap_or_default();
            self.events.borrow_mut().push(format!(
                "image {} at {},{} {}x{}",
                source, placement.x_mm, placement.y_mm, placement.width_mm, placement.height_mm
            ));
            Ok(())
        }

        fn add_page(&mut self) -> Result<(), ExportError> {
            self.events.borrow_mut().push("add page".into());
            Ok(())
        }

        fn save(self, file_name: &str) -> Result<(), ExportError> {
            if self.fail_save {
                return Err(ExportError::Document("download blocked".into()));
            }
            self.events.borrow_mut().push(format!("save {}", file_name));
            self.saved.borrow_mut().push(file_name.to_string());
            Ok(())
        }
    }

    pub fn config() -> ExportConfig {
        ExportConfig {
            file_name: "week.pdf".into(),
            scale: 2.0,
            fallback_background: "#ffffff".into(),
        }
    }
}
