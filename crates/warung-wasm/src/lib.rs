//! # warung-wasm
//!
//! WebAssembly bindings for warung-site-rs.
//!
//! This crate runs the whole site engine in the browser:
//! - Binding the site document onto the live page
//! - The visitor's cart and checkout lifecycle
//! - Order, direct order, inquiry and reservation messages with their deep-links
//! - Operator mutators that rebind only the affected sections
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSite } from 'warung-wasm';
//!
//! await init();
//!
//! const site = new WasmSite(JSON.stringify(siteConfig));
//!
//! site.add_item('Nasi Gudeg', 15000);
//! const outcome = site.checkout();
//! if (outcome.event === 'checkout_composed') {
//!   window.open(outcome.external_url, '_blank');
//!   site.confirm_handoff();
//! }
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod dom;

use dom::DomPresentation;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use warung_core::{
    compose_direct_order, compose_inquiry, compose_reservation, validate, CartCommand,
    DirtySections, Inquiry, Reservation, Session, SessionEvent, SiteConfig, SiteError,
    SiteResult,
};
use warung_render::{bind, refresh};

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: SiteError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// The site engine bound to the current page
#[wasm_bindgen]
pub struct WasmSite {
    config: SiteConfig,
    session: Session,
    page: Option<DomPresentation>,
}

#[wasm_bindgen]
impl WasmSite {
    /// Load the site document (JSON), log findings and bind the page
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSite, JsValue> {
        let config = SiteConfig::from_json(config_json).map_err(to_js_error)?;

        for finding in validate(&config) {
            web_sys::console::warn_1(&JsValue::from_str(&finding.to_string()));
        }

        let mut site = Self::with_page(config, DomPresentation::from_window());
        site.bind_page();
        Ok(site)
    }

    /// Apply a command object, e.g. `{ command: "add", label, unit_price }`
    pub fn dispatch(&mut self, command: JsValue) -> Result<JsValue, JsValue> {
        let command: CartCommand = serde_wasm_bindgen::from_value(command)
            .map_err(|e| JsValue::from_str(&format!("Invalid command: {}", e)))?;
        let event = self.run(command).map_err(to_js_error)?;
        to_js(&event)
    }

    pub fn add_item(&mut self, label: String, unit_price: u64) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::Add { label, unit_price })
    }

    pub fn set_quantity(&mut self, label: String, quantity: i64) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::SetQuantity { label, quantity })
    }

    pub fn remove_item(&mut self, label: String) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::Remove { label })
    }

    pub fn open_review(&mut self) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::OpenReview)
    }

    pub fn close_review(&mut self) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::CloseReview)
    }

    /// Compose the order, or return the rejection with its visitor message
    pub fn checkout(&mut self) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::Checkout)
    }

    pub fn confirm_handoff(&mut self) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::ConfirmHandoff)
    }

    pub fn cancel_handoff(&mut self) -> Result<JsValue, JsValue> {
        self.run_js(CartCommand::CancelHandoff)
    }

    /// Cart summary and phase for a display refresh
    pub fn session(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view(&self.config.ordering.currency))
    }

    /// Visitor text for a rejection returned by `checkout`
    pub fn rejection_message(&self, event: JsValue) -> Result<String, JsValue> {
        let event: SessionEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid event: {}", e)))?;
        match event {
            SessionEvent::CheckoutRejected(reason) => {
                Ok(reason.user_message(&self.config.ordering.currency))
            }
            _ => Err(JsValue::from_str("Not a checkout rejection")),
        }
    }

    /// Single item order when the cart is disabled
    pub fn direct_order(&self, label: &str, unit_price: u64) -> Result<JsValue, JsValue> {
        to_js(&compose_direct_order(label, unit_price, &self.config))
    }

    /// Contact form message
    pub fn inquiry(&self, form: JsValue) -> Result<JsValue, JsValue> {
        let form: Inquiry = serde_wasm_bindgen::from_value(form)
            .map_err(|e| JsValue::from_str(&format!("Invalid inquiry: {}", e)))?;
        let outbound = compose_inquiry(&form, &self.config).map_err(to_js_error)?;
        to_js(&outbound)
    }

    /// Reservation form message
    pub fn reservation(&self, form: JsValue) -> Result<JsValue, JsValue> {
        let form: Reservation = serde_wasm_bindgen::from_value(form)
            .map_err(|e| JsValue::from_str(&format!("Invalid reservation: {}", e)))?;
        let outbound = compose_reservation(&form, &self.config).map_err(to_js_error)?;
        to_js(&outbound)
    }

    pub fn findings(&self) -> Result<JsValue, JsValue> {
        to_js(&validate(&self.config))
    }

    pub fn rename(&mut self, name: String) {
        let dirty = self.config.rename(name);
        self.refresh_page(&dirty);
    }

    pub fn recolor(&mut self, primary: String, secondary: String, accent: String) {
        let dirty = self.config.recolor(primary, secondary, accent);
        self.refresh_page(&dirty);
    }

    pub fn change_handle(&mut self, handle: String) {
        let dirty = self.config.change_handle(handle);
        self.refresh_page(&dirty);
    }

    pub fn change_contact(&mut self, phone: String, handle: String, email: Option<String>) {
        let dirty = self.config.change_contact(phone, handle, email);
        self.refresh_page(&dirty);
    }
}

impl WasmSite {
    fn with_page(config: SiteConfig, page: Option<DomPresentation>) -> Self {
        Self {
            config,
            session: Session::new(),
            page,
        }
    }

    fn run(&mut self, command: CartCommand) -> SiteResult<SessionEvent> {
        self.session.apply(command, &self.config)
    }

    fn run_js(&mut self, command: CartCommand) -> Result<JsValue, JsValue> {
        let event = self.run(command).map_err(to_js_error)?;
        to_js(&event)
    }

    fn bind_page(&mut self) {
        if let Some(page) = self.page.as_mut() {
            bind(&self.config, page);
        }
    }

    fn refresh_page(&mut self, dirty: &DirtySections) {
        if let Some(page) = self.page.as_mut() {
            refresh(dirty, &self.config, page);
        }
    }
}

/// Darken a `#RRGGBB` color by `percent`; `None` for malformed input
#[wasm_bindgen]
pub fn darken_color(color: &str, percent: f64) -> Option<String> {
    warung_core::darken(color, percent)
}

/// Format an amount the way the cart shows it (e.g., "Rp 25.000")
#[wasm_bindgen]
pub fn format_rupiah(amount: u64) -> String {
    warung_core::CurrencyFormat::default().display(amount)
}

/// Whether a messaging handle is digits-only with the given country prefix
#[wasm_bindgen]
pub fn validate_handle(handle: &str, prefix: &str) -> bool {
    !handle.is_empty() && handle.chars().all(|c| c.is_ascii_digit()) && handle.starts_with(prefix)
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
