//! Snapshot persistence
//!
//! Two exclusive modes, picked once per session:
//! - Local: one JSON value under a fixed key in a `KeyValueStore`
//! - Host delivery: the JSON is handed to the mini-app host, fire and forget

use std::rc::Rc;

use crate::error::PersistenceError;
use crate::planner::PlannerSnapshot;
use crate::platform::{HostBridge, KeyValueStore, Notifier};

/// Confirmation shown after a local save
pub const SAVED_MESSAGE: &str = "Данные сохранены!";

/// Where a save went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Local,
    HostDelivery,
}

enum Channel {
    Local {
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        key: String,
    },
    Host(Rc<dyn HostBridge>),
}

pub struct Persistence {
    channel: Channel,
}

impl Persistence {
    pub fn local(
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            channel: Channel::Local {
                store,
                notifier,
                key: key.into(),
            },
        }
    }

    pub fn host(host: Rc<dyn HostBridge>) -> Self {
        Self {
            channel: Channel::Host(host),
        }
    }

    pub fn mode(&self) -> SaveMode {
        match self.channel {
            Channel::Local { .. } => SaveMode::Local,
            Channel::Host(_) => SaveMode::HostDelivery,
        }
    }

    /// Write the whole snapshot
    pub fn save(&self, snapshot: &PlannerSnapshot) -> Result<SaveMode, PersistenceError> {
        let json = snapshot.to_json()?;
        match &self.channel {
            Channel::Local { store, notifier, key } => {
                store.set(key, &json)?;
                log::info!("Planner saved ({} bytes)", json.len());
                notifier.notify(SAVED_MESSAGE);
            }
            Channel::Host(host) => {
                host.send_data(&json);
                log::info!("Planner sent to host ({} bytes)", json.len());
            }
        }
        Ok(self.mode())
    }

    /// Read the stored snapshot, if any.
    ///
    /// `None` means "keep the defaults": nothing stored, unreadable text,
    /// or host mode, which has nothing to restore from.
    pub fn load(&self) -> Option<PlannerSnapshot> {
        match &self.channel {
            Channel::Local { store, key, .. } => {
                let text = match store.get(key) {
                    Ok(Some(text)) => text,
                    Ok(None) => {
                        log::info!("No saved planner, starting fresh");
                        return None;
                    }
                    Err(e) => {
                        log::warn!("Saved planner unreadable: {}", e);
                        return None;
                    }
                };
                let snapshot = PlannerSnapshot::from_stored(&text);
                match &snapshot {
                    Some(_) => log::info!("Loaded saved planner"),
                    None => log::warn!("Ignoring malformed saved planner"),
                }
                snapshot
            }
            Channel::Host(host) => {
                // The host identifies the user but offers no stored planner.
                match host.user_id() {
                    Some(id) => log::info!("Opened by host user {}", id),
                    None => log::info!("Opened by host without user data"),
                }
                None
            }
        }
    }

    /// Drop the stored snapshot. Host mode has nothing to remove.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        if let Channel::Local { store, key, .. } = &self.channel {
            store.remove(key)?;
            log::info!("Saved planner cleared");
        }
        Ok(())
    }
}
