//! Browser implementations (wasm32 only)

use wasm_bindgen::prelude::*;
use web_sys::Storage;

use super::{HostBridge, KeyValueStore, Notifier, host_launched};
use crate::error::PersistenceError;

// Bindings for window.Telegram.WebApp
#[wasm_bindgen(inline_js = "
    function app() {
        return (window.Telegram && window.Telegram.WebApp) || null;
    }

    export function host_init_data() {
        const tg = app();
        return tg && typeof tg.initData === 'string' ? tg.initData : undefined;
    }

    export function host_theme_param(name) {
        const tg = app();
        const value = tg && tg.themeParams ? tg.themeParams[name] : undefined;
        return value === undefined || value === null || value === '' ? undefined : String(value);
    }

    export function host_send_data(data) {
        app().sendData(data);
    }

    export function host_close() {
        app().close();
    }

    export function host_ready() {
        app().ready();
    }

    export function host_expand() {
        app().expand();
    }

    export function host_main_button(label, onClick) {
        const button = app().MainButton;
        button.setText(label);
        button.show();
        button.onClick(onClick);
    }

    export function host_user_id() {
        const tg = app();
        const user = tg && tg.initDataUnsafe ? tg.initDataUnsafe.user : undefined;
        return user && typeof user.id === 'number' ? user.id : undefined;
    }
")]
extern "C" {
    fn host_init_data() -> Option<String>;
    fn host_theme_param(name: &str) -> Option<String>;
    fn host_send_data(data: &str);
    fn host_close();
    fn host_ready();
    fn host_expand();
    fn host_main_button(label: &str, on_click: &Closure<dyn FnMut()>);
    fn host_user_id() -> Option<f64>;
}

/// The Telegram mini-app runtime
#[derive(Debug, Clone, Copy)]
pub struct TelegramHost {
    _private: (),
}

impl TelegramHost {
    /// The host, if the page was opened inside the chat client
    pub fn detect() -> Option<Self> {
        host_launched(host_init_data().as_deref()).then_some(Self { _private: () })
    }
}

impl HostBridge for TelegramHost {
    fn theme_param(&self, name: &str) -> Option<String> {
        host_theme_param(name)
    }

    fn send_data(&self, data: &str) {
        host_send_data(data);
    }

    fn close(&self) {
        host_close();
    }

    fn ready(&self) {
        host_ready();
    }

    fn expand(&self) {
        host_expand();
    }

    fn show_main_button(&self, label: &str, on_click: Box<dyn FnMut()>) {
        let closure = Closure::wrap(on_click);
        host_main_button(label, &closure);
        closure.forget();
    }

    fn user_id(&self) -> Option<i64> {
        host_user_id().map(|id| id as i64)
    }
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, PersistenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.storage
            .get_item(key)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PersistenceError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.storage
            .remove_item(key)
            .map_err(|e| PersistenceError::Remove(format!("{:?}", e)))
    }
}

/// `window.alert` / `window.confirm`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
