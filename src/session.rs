//! One editing session
//!
//! Ties the form store to its persistence and export. The save mode is
//! fixed at construction: a present host means host delivery, otherwise
//! local storage.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::{PersistenceError, PlannerError};
use crate::export::{DocumentBackend, ExportConfig, ExportOutcome, ExportState, Exporter, Rasterizer};
use crate::persistence::{Persistence, SaveMode};
use crate::planner::{FieldPath, FieldValue, FormStore, TextField, current_week_label};
use crate::platform::{HostBridge, KeyValueStore, Notifier};
use crate::settings::Settings;

/// Host main button label
pub const SAVE_LABEL: &str = "Сохранить";

/// Asked before wiping the form
pub const CLEAR_PROMPT: &str =
    "Вы уверены, что хотите очистить все данные? Это действие нельзя отменить.";

/// Capabilities injected into a session
pub struct Capabilities {
    pub store: Rc<dyn KeyValueStore>,
    pub host: Option<Rc<dyn HostBridge>>,
    pub notifier: Rc<dyn Notifier>,
}

/// Host theme colors with their fallbacks applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
}

impl ThemeColors {
    pub fn from_host(host: &dyn HostBridge) -> Self {
        Self {
            background: host.theme_param("bg_color").unwrap_or_else(|| "#ffffff".into()),
            text: host.theme_param("text_color").unwrap_or_else(|| "#000000".into()),
        }
    }
}

pub struct PlannerSession<R, D> {
    form: RefCell<FormStore>,
    persistence: Persistence,
    exporter: Exporter<R, D>,
    host: Option<Rc<dyn HostBridge>>,
    notifier: Rc<dyn Notifier>,
    week_label: Box<dyn Fn() -> String>,
}

impl<R, D> PlannerSession<R, D>
where
    R: Rasterizer + 'static,
    D: DocumentBackend + 'static,
{
    pub fn new(caps: Capabilities, settings: &Settings, rasterizer: R, documents: D) -> Self {
        let persistence = match &caps.host {
            Some(host) => Persistence::host(Rc::clone(host)),
            None => Persistence::local(
                Rc::clone(&caps.store),
                Rc::clone(&caps.notifier),
                settings.storage_key.clone(),
            ),
        };
        log::info!("Save mode: {:?}", persistence.mode());

        let config = ExportConfig {
            file_name: settings.export_file_name.clone(),
            scale: settings.raster_scale,
            fallback_background: settings.fallback_background.clone(),
        };

        Self {
            form: RefCell::new(FormStore::new()),
            persistence,
            exporter: Exporter::new(rasterizer, documents, config),
            host: caps.host,
            notifier: caps.notifier,
            week_label: Box::new(current_week_label),
        }
    }

    /// Override how the current week label is produced
    pub fn with_week_label(mut self, label: impl Fn() -> String + 'static) -> Self {
        self.week_label = Box::new(label);
        self
    }

    pub fn save_mode(&self) -> SaveMode {
        self.persistence.mode()
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    pub fn theme(&self) -> Option<ThemeColors> {
        self.host.as_deref().map(ThemeColors::from_host)
    }

    /// Announce readiness to the host, wire its main button, then fill the
    /// form: current week first, replaced wholesale by a saved snapshot.
    pub fn start(self: &Rc<Self>) {
        if let Some(host) = &self.host {
            host.expand();
            host.ready();
            let session = Rc::downgrade(self);
            host.show_main_button(
                SAVE_LABEL,
                Box::new(move || {
                    if let Some(session) = session.upgrade() {
                        if let Err(e) = session.save() {
                            log::error!("Save failed: {}", e);
                        }
                    }
                }),
            );
        }

        self.form
            .borrow_mut()
            .set_text(TextField::DateRange, (self.week_label)());

        if let Some(snapshot) = self.persistence.load() {
            self.form.borrow_mut().replace(snapshot);
        }
    }

    pub fn form(&self) -> Ref<'_, FormStore> {
        self.form.borrow()
    }

    pub fn edit<T>(&self, f: impl FnOnce(&mut FormStore) -> T) -> T {
        f(&mut self.form.borrow_mut())
    }

    /// Apply a form control's value to the field it names
    pub fn apply(&self, path: &str, value: FieldValue) -> Result<(), PlannerError> {
        let path: FieldPath = path.parse()?;
        self.edit(|form| path.apply(form, value))
    }

    pub fn save(&self) -> Result<SaveMode, PersistenceError> {
        let snapshot = self.form.borrow().snapshot();
        self.persistence.save(&snapshot)
    }

    /// Wipe the form after the user confirms. Returns whether it happened.
    pub fn clear(&self) -> bool {
        if !self.notifier.confirm(CLEAR_PROMPT) {
            return false;
        }
        if let Err(e) = self.persistence.clear() {
            log::warn!("Stored planner not removed: {}", e);
        }
        let mut form = self.form.borrow_mut();
        form.reset();
        form.set_text(TextField::DateRange, (self.week_label)());
        log::info!("Planner cleared");
        true
    }

    /// Ask the host to close the app
    pub fn close(&self) {
        if let Some(host) = &self.host {
            host.close();
        }
    }

    pub fn export_state(&self) -> ExportState {
        self.exporter.state()
    }

    pub fn on_export_state(&self, observer: impl Fn(ExportState) + 'static) {
        self.exporter.set_observer(observer);
    }

    /// Export both pages to PDF. Failures are logged only.
    pub async fn export(&self) -> ExportOutcome {
        let background = self.host.as_ref().and_then(|h| h.theme_param("bg_color"));
        self.exporter.export(background.as_deref()).await
    }
}
