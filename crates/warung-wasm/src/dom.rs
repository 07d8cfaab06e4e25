//! # DOM Presentation
//!
//! [`Presentation`] over the live page. Selectors are CSS selectors and may
//! match several elements; every match is written. Style variables are set
//! on the document element.

use wasm_bindgen::JsCast;
use warung_render::Presentation;
use web_sys::{Document, Element, HtmlElement};

pub struct DomPresentation {
    document: Document,
}

impl DomPresentation {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    fn each(&self, selector: &str, mut f: impl FnMut(&Element)) {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(&element);
            }
        }
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }
}

impl Presentation for DomPresentation {
    fn contains(&self, selector: &str) -> bool {
        matches!(self.document.query_selector(selector), Ok(Some(_)))
    }

    fn set_text(&mut self, selector: &str, text: &str) {
        self.each(selector, |e| e.set_text_content(Some(text)));
    }

    fn set_markup(&mut self, selector: &str, markup: &str) {
        self.each(selector, |e| e.set_inner_html(markup));
    }

    fn clear(&mut self, selector: &str) {
        self.each(selector, |e| e.set_text_content(None));
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) {
        self.each(selector, |e| {
            e.set_attribute(name, value).ok();
        });
    }

    fn remove_attribute(&mut self, selector: &str, name: &str) {
        self.each(selector, |e| {
            e.remove_attribute(name).ok();
        });
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            root.style().set_property(name, value).ok();
        }
    }

    fn remove_variable(&mut self, name: &str) {
        if let Some(root) = self.root() {
            root.style().remove_property(name).ok();
        }
    }
}
