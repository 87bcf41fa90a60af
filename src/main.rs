//! Weekly Planner entry point
//!
//! Handles platform-specific initialization and binds the page's form
//! controls to the planner session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

    use weekly_planner::export::ExportState;
    use weekly_planner::export::web::{HtmlRasterizer, JsPdfBackend};
    use weekly_planner::planner::{FieldPath, FieldValue};
    use weekly_planner::platform::web::{BrowserNotifier, LocalStorage, TelegramHost};
    use weekly_planner::platform::{HostBridge, KeyValueStore, MemoryStore};
    use weekly_planner::session::{Capabilities, PlannerSession};
    use weekly_planner::settings::LogLevel;
    use weekly_planner::Settings;

    type Session = PlannerSession<HtmlRasterizer, JsPdfBackend>;

    const EXPORT_LABEL: &str = "PDF";
    const EXPORTING_LABEL: &str = "Экспорт...";

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(LogLevel::default().to_level()).expect("Failed to init logger");

        let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::warn!("{}, keeping data in memory", e);
                Rc::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(&*store);
        log::set_max_level(settings.log_level.to_level().to_level_filter());

        log::info!("Weekly Planner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let host = TelegramHost::detect().map(|h| Rc::new(h) as Rc<dyn HostBridge>);
        let caps = Capabilities {
            store,
            host,
            notifier: Rc::new(BrowserNotifier),
        };
        let session = Rc::new(Session::new(caps, &settings, HtmlRasterizer, JsPdfBackend));

        if let Some(theme) = session.theme() {
            apply_theme(&document, &theme.background, &theme.text);
        }

        session.start();

        show_host_controls(&document, session.has_host());
        bind_fields(&document, session.clone());
        render_fields(&document, &session);
        setup_save_button(&document, session.clone());
        setup_clear_button(&document, session.clone());
        setup_export_button(&document, session.clone());
        setup_close_button(&document, session);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        log::info!("Weekly Planner running!");
    }

    fn apply_theme(document: &Document, background: &str, text: &str) {
        let Some(root) = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let style = root.style();
        let _ = style.set_property("--tg-theme-bg-color", background);
        let _ = style.set_property("--tg-theme-text-color", text);
    }

    /// Save/Clear and the footer are for the plain web page; Close only
    /// makes sense inside the host.
    fn show_host_controls(document: &Document, has_host: bool) {
        let set_hidden = |id: &str, hidden: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        };
        set_hidden("save-btn", has_host);
        set_hidden("clear-btn", has_host);
        set_hidden("footer", has_host);
        set_hidden("close-btn", !has_host);
    }

    /// Every element carrying a `data-field` path
    fn field_elements(document: &Document) -> Vec<(Element, FieldPath)> {
        let Ok(nodes) = document.query_selector_all("[data-field]") else {
            return Vec::new();
        };
        let mut fields = Vec::new();
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(raw) = el.get_attribute("data-field") else {
                continue;
            };
            match raw.parse::<FieldPath>() {
                Ok(path) => fields.push((el, path)),
                Err(e) => log::warn!("Skipping control: {}", e),
            }
        }
        fields
    }

    fn bind_fields(document: &Document, session: Rc<Session>) {
        for (el, path) in field_elements(document) {
            let session = session.clone();
            let control = el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(value) = read_control(&control, path) else {
                    return;
                };
                if let Err(e) = session.edit(|form| path.apply(form, value)) {
                    log::warn!("Edit rejected: {}", e);
                }
            });
            let event = if path.is_checkbox() { "change" } else { "input" };
            let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn read_control(el: &Element, path: FieldPath) -> Option<FieldValue> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(if path.is_checkbox() {
                FieldValue::Checked(input.checked())
            } else {
                FieldValue::Text(input.value())
            });
        }
        el.dyn_ref::<HtmlTextAreaElement>()
            .map(|area| FieldValue::Text(area.value()))
    }

    /// Push the store's values into the controls
    fn render_fields(document: &Document, session: &Session) {
        let form = session.form();
        for (el, path) in field_elements(document) {
            match path.read(&form) {
                Some(FieldValue::Checked(done)) => {
                    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                        input.set_checked(done);
                    }
                }
                Some(FieldValue::Text(text)) => {
                    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                        input.set_value(&text);
                    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                        area.set_value(&text);
                    }
                }
                None => {}
            }
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_save_button(document: &Document, session: Rc<Session>) {
        on_click(document, "save-btn", move || {
            if let Err(e) = session.save() {
                log::error!("Save failed: {}", e);
            }
        });
    }

    fn setup_clear_button(document: &Document, session: Rc<Session>) {
        let doc = document.clone();
        on_click(document, "clear-btn", move || {
            if session.clear() {
                render_fields(&doc, &session);
            }
        });
    }

    fn setup_export_button(document: &Document, session: Rc<Session>) {
        let Some(btn) = document
            .get_element_by_id("export-btn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        else {
            return;
        };

        {
            let btn = btn.clone();
            session.on_export_state(move |state| {
                let busy = state == ExportState::Exporting;
                btn.set_disabled(busy);
                btn.set_text_content(Some(if busy { EXPORTING_LABEL } else { EXPORT_LABEL }));
            });
        }

        on_click(document, "export-btn", move || {
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // Failures are already logged by the exporter.
                let _ = session.export().await;
            });
        });
    }

    fn setup_close_button(document: &Document, session: Rc<Session>) {
        on_click(document, "close-btn", move || session.close());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use weekly_planner::PlannerSnapshot;
    use weekly_planner::planner::current_week_label;

    env_logger::init();
    log::info!("Weekly Planner (native) starting...");
    log::info!("The planner runs in the browser - run with `trunk serve` for the web version");

    let snapshot = PlannerSnapshot {
        date_range: current_week_label(),
        ..PlannerSnapshot::new()
    };
    match snapshot.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize empty planner: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
