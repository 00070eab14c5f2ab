//! Web entry point for the NestEgg widget.
//!
//! The rendering layer (chart, bar editor, table, pie) lives in JavaScript
//! and talks to [`NestEggWidget`] through JSON strings. Edits return the
//! refreshed view so the page never combines stale savings and interest
//! data. Each edit restarts a debounce timer; the save runs once the user
//! has been idle for [`SAVE_DEBOUNCE_MS`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use nestegg_core::schedule::ScheduleField;
use nestegg_core::segments::Segment;
use wasm_bindgen::prelude::*;

use crate::SAVE_DEBOUNCE_MS;
use crate::platform::WebStorage;
use crate::session::Session;

type SharedSession = Rc<RefCell<Session<WebStorage>>>;

fn parse_field(field: &str) -> Result<ScheduleField, JsValue> {
    field.parse().map_err(|e: String| JsValue::from_str(&e))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct NestEggWidget {
    session: SharedSession,
    pending_save: Option<Timeout>,
}

#[wasm_bindgen]
impl NestEggWidget {
    /// Restore the saved schedule (or the defaults) from LocalStorage.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Rc::new(RefCell::new(Session::load(WebStorage::new()))),
            pending_save: None,
        }
    }

    /// Current derived view as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        let mut session = self.session.borrow_mut();
        serde_json::to_string(session.view()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setSavingsSegments)]
    pub fn set_savings_segments(&mut self, segments_json: &str) -> Result<String, JsValue> {
        self.replace(ScheduleField::Savings, segments_json)
    }

    #[wasm_bindgen(js_name = setInterestSegments)]
    pub fn set_interest_segments(&mut self, segments_json: &str) -> Result<String, JsValue> {
        self.replace(ScheduleField::Rate, segments_json)
    }

    pub fn split(&mut self, field: &str, index: usize) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.edit(|session| session.split(field, index))
    }

    #[wasm_bindgen(js_name = moveDivider)]
    pub fn move_divider(
        &mut self,
        field: &str,
        index: usize,
        new_boundary: u32,
    ) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.edit(|session| session.move_divider(field, index, new_boundary))
    }

    #[wasm_bindgen(js_name = removeDivider)]
    pub fn remove_divider(&mut self, field: &str, index: usize) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.edit(|session| session.remove_divider(field, index))
    }

    /// Set a segment's value from raw text; invalid text is ignored.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, field: &str, index: usize, text: &str) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.edit(|session| {
            session
                .set_value_text(field, index, text)
                .unwrap_or(false)
        })
    }

    /// Write a table cell from raw text; invalid text is ignored.
    #[wasm_bindgen(js_name = editTableCell)]
    pub fn edit_table_cell(&mut self, field: &str, age: u32, text: &str) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.edit(|session| session.edit_table_cell(field, age, text).unwrap_or(false))
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.edit(|session| {
            session.reset();
            true
        })
    }

    /// Save immediately, cancelling any pending debounced save.
    pub fn flush(&mut self) {
        self.pending_save = None;
        self.session.borrow_mut().flush();
    }
}

impl Default for NestEggWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl NestEggWidget {
    fn replace(&mut self, field: ScheduleField, segments_json: &str) -> Result<String, JsValue> {
        let segments: Vec<Segment> = serde_json::from_str(segments_json).map_err(to_js_error)?;
        self.session
            .borrow_mut()
            .replace(field, segments)
            .map_err(to_js_error)?;
        self.schedule_save();
        self.view()
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Session<WebStorage>) -> bool) -> Result<String, JsValue> {
        let changed = apply(&mut self.session.borrow_mut());
        if changed {
            self.schedule_save();
        }
        self.view()
    }

    /// Restart the debounce timer; dropping the previous timeout cancels it.
    fn schedule_save(&mut self) {
        let session = Rc::clone(&self.session);
        self.pending_save = Some(Timeout::new(SAVE_DEBOUNCE_MS, move || {
            session.borrow_mut().flush();
        }));
    }
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    crate::init_logging_web();

    tracing::info!("NestEgg web version starting");
}
