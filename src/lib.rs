//! Weekly Planner - a weekly planning template for chat mini apps
//!
//! Core modules:
//! - `planner`: Snapshot model, form state store, field paths
//! - `persistence`: Local or host-delivered snapshot saving
//! - `export`: Two-page A4 PDF export pipeline
//! - `platform`: Storage/host/dialog capabilities (browser and native)
//! - `session`: One editing session wiring the above together
//! - `settings`: Application configuration

pub mod error;
pub mod export;
pub mod persistence;
pub mod planner;
pub mod platform;
pub mod session;
pub mod settings;

pub use error::{ExportError, PersistenceError, PlannerError};
pub use planner::{FormStore, Goal, Habit, PlannerSnapshot};
pub use session::PlannerSession;
pub use settings::Settings;

/// Planner configuration constants
pub mod consts {
    /// Template shape
    pub const HABIT_COUNT: usize = 3;
    pub const DAYS_PER_WEEK: usize = 7;
    pub const GOAL_COUNT: usize = 3;
    pub const STEPS_PER_GOAL: usize = 3;

    /// LocalStorage key for the planner snapshot
    pub const SNAPSHOT_STORAGE_KEY: &str = "financialPlannerData";

    /// Download name of the exported PDF
    pub const EXPORT_FILE_NAME: &str = "Финансовый_план_на_неделю.pdf";

    /// Rasterization supersampling factor
    pub const RASTER_SCALE: f64 = 2.0;
    /// Page background when the host provides no theme color
    pub const DEFAULT_BACKGROUND: &str = "#ffffff";

    /// A4 paper, millimetres
    pub const A4_WIDTH_MM: f64 = 210.0;
    pub const A4_HEIGHT_MM: f64 = 297.0;
}
