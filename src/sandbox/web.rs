//! Browser sandbox backed by an `<iframe>`.
//!
//! Only built for `wasm32` with the `web` feature.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlIFrameElement, MessageEvent};

use crate::channel::{CompileError, COMPILE_ERROR_TYPE};
use crate::error::{PreviewError, Result};
use crate::host::{ErrorDisplay, PreviewHost};
use crate::sandbox::config::PreviewConfig;
use crate::sandbox::{DocumentStream, Sandbox};

fn js_error(context: &str, value: JsValue) -> PreviewError {
    PreviewError::Load(anyhow::anyhow!("{context}: {value:?}"))
}

/// An iframe whose document is rewritten on every load.
#[derive(Debug, Default)]
pub struct IframeSandbox {
    frame: Option<HtmlIFrameElement>,
}

impl IframeSandbox {
    /// Wrap an iframe element.
    pub fn new(frame: HtmlIFrameElement) -> Self {
        Self { frame: Some(frame) }
    }

    /// A sandbox with no element yet, e.g. before the first render.
    pub fn unattached() -> Self {
        Self::default()
    }

    /// Attach or replace the iframe element.
    pub fn attach(&mut self, frame: HtmlIFrameElement) {
        self.frame = Some(frame);
    }

    fn content_document(&self) -> Option<Document> {
        let frame = self.frame.as_ref()?;
        frame
            .content_document()
            .or_else(|| frame.content_window().and_then(|window| window.document()))
    }
}

impl Sandbox for IframeSandbox {
    type Stream = IframeStream;

    fn open(&mut self) -> Result<Option<IframeStream>> {
        let Some(document) = self.content_document() else {
            return Ok(None);
        };
        document
            .open()
            .map_err(|e| js_error("failed to open frame document", e))?;
        Ok(Some(IframeStream { document }))
    }
}

/// An open iframe document.
#[derive(Debug)]
pub struct IframeStream {
    document: Document,
}

impl DocumentStream for IframeStream {
    fn write(&mut self, text: &str) -> Result<()> {
        self.document
            .write_1(text)
            .map_err(|e| js_error("failed to write frame document", e))
    }

    fn close(self) -> Result<()> {
        self.document
            .close()
            .map_err(|e| js_error("failed to close frame document", e))
    }
}

/// Read a compile error out of a posted JS value.
fn decode_js_message(data: &JsValue) -> Option<CompileError> {
    if !data.is_object() {
        return None;
    }
    let kind = js_sys::Reflect::get(data, &JsValue::from_str("type")).ok()?;
    if kind.as_string().as_deref() != Some(COMPILE_ERROR_TYPE) {
        return None;
    }
    let error = js_sys::Reflect::get(data, &JsValue::from_str("error"))
        .ok()?
        .as_string()?;
    Some(CompileError::new(error))
}

/// A preview host bound to an iframe and the window's `message` events.
///
/// The message listener lives exactly as long as this value.
pub struct WebPreview {
    host: Rc<RefCell<PreviewHost<IframeSandbox>>>,
    _listener: EventListener,
}

impl WebPreview {
    /// Mount a preview into `frame`, calling `on_error` whenever a sandbox
    /// error arrives.
    pub fn mount<F>(config: PreviewConfig, frame: HtmlIFrameElement, on_error: F) -> Result<Self>
    where
        F: Fn(&ErrorDisplay) + 'static,
    {
        let window = web_sys::window()
            .ok_or_else(|| PreviewError::Config("no global window".to_string()))?;

        let host = Rc::new(RefCell::new(PreviewHost::new(
            config,
            IframeSandbox::new(frame),
        )?));
        host.borrow_mut().mount();

        let listener_host = Rc::clone(&host);
        let listener = EventListener::new(&window, "message", move |event| {
            let Some(event) = event.dyn_ref::<MessageEvent>() else {
                return;
            };
            let Some(error) = decode_js_message(&event.data()) else {
                return;
            };
            let Ok(mut host) = listener_host.try_borrow_mut() else {
                return;
            };
            host.report(error);
            on_error(host.error());
        });

        Ok(Self {
            host,
            _listener: listener,
        })
    }

    /// Shared access to the host for UI event handlers.
    pub fn host(&self) -> Rc<RefCell<PreviewHost<IframeSandbox>>> {
        Rc::clone(&self.host)
    }
}

/// Assemble the preview document for `source` with the default configuration.
#[wasm_bindgen(js_name = assemblePreview)]
pub fn assemble_preview(source: &str) -> String {
    crate::pipeline::compile(source, &PreviewConfig::default()).into_string()
}
