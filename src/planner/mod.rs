//! Planner form state
//!
//! Pure data and editing logic, no browser dependencies:
//! - Fixed-shape snapshot and restore merging
//! - Form state store with swap-on-write containers
//! - Dotted field paths used by form controls
//! - Current-week label

pub mod field;
pub mod snapshot;
pub mod store;
pub mod week;

pub use field::{FieldPath, FieldValue};
pub use snapshot::{Goal, Habit, PlannerSnapshot, merge_with_defaults};
pub use store::{FormStore, TextField};
pub use week::{current_week_label, week_label};
