//! Recording fakes for host and dialogs

use std::cell::{Cell, RefCell};

use super::{HostBridge, Notifier};

#[derive(Default)]
pub struct FakeHost {
    pub bg_color: Option<String>,
    pub user: Option<i64>,
    pub sent: RefCell<Vec<String>>,
    pub closed: Cell<bool>,
    pub ready_calls: Cell<u32>,
    pub expand_calls: Cell<u32>,
    pub main_button: RefCell<Option<String>>,
    pub on_click: RefCell<Option<Box<dyn FnMut()>>>,
}

impl FakeHost {
    pub fn with_theme(bg_color: &str) -> Self {
        Self {
            bg_color: Some(bg_color.to_string()),
            ..Self::default()
        }
    }

    /// Simulate a tap on the host's main button
    pub fn click_main_button(&self) {
        let handler = self.on_click.borrow_mut().take();
        if let Some(mut h) = handler {
            h();
            *self.on_click.borrow_mut() = Some(h);
        }
    }
}

impl HostBridge for FakeHost {
    fn theme_param(&self, name: &str) -> Option<String> {
        match name {
            "bg_color" => self.bg_color.clone(),
            _ => None,
        }
    }

    fn send_data(&self, data: &str) {
        self.sent.borrow_mut().push(data.to_string());
    }

    fn close(&self) {
        self.closed.set(true);
    }

    fn ready(&self) {
        self.ready_calls.set(self.ready_calls.get() + 1);
    }

    fn expand(&self) {
        self.expand_calls.set(self.expand_calls.get() + 1);
    }

    fn show_main_button(&self, label: &str, on_click: Box<dyn FnMut()>) {
        *self.main_button.borrow_mut() = Some(label.to_string());
        *self.on_click.borrow_mut() = Some(on_click);
    }

    fn user_id(&self) -> Option<i64> {
        self.user
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub answer: Cell<bool>,
    pub notices: RefCell<Vec<String>>,
    pub questions: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Cell::new(answer),
            ..Self::default()
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}
