//! WASM exports for resize handles
//!
//! Exposes the controller to JavaScript as `Resizable`:
//!
//! ```js
//! const resizable = new Resizable('#panel', {
//!   handles: 'e s se',
//!   threshold: 10,
//!   bound: true,
//!   onMove: (delta, event) => { ... },
//! });
//! resizable.destroy();
//! ```

mod platform;

pub use platform::{WebListener, WebPlatform};

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

use crate::controller::{Resizable, Target};
use crate::error::ResizeError;
use crate::geometry::Delta;
use crate::options::{ResizeConfig, ResizeOptions};
use crate::session::Phase;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

impl From<ResizeError> for JsValue {
    fn from(err: ResizeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Resize controller for JavaScript hosts
#[wasm_bindgen(js_name = Resizable)]
pub struct ResizableController {
    inner: Resizable<WebPlatform>,
}

#[wasm_bindgen(js_class = Resizable)]
impl ResizableController {
    /// Attach handles to `target` (an element or a selector string)
    #[wasm_bindgen(constructor)]
    pub fn new(target: JsValue, options: JsValue) -> Result<ResizableController, JsValue> {
        let target = target_from_js(target)?;
        let options = options_from_js(&options)?;
        let platform = Rc::new(WebPlatform::new()?);
        let inner = Resizable::new(platform, target, options)?;
        Ok(Self { inner })
    }

    /// Remove every handle and listener
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        self.inner.destroy();
    }

    /// Rebuild the handles with new options
    #[wasm_bindgen]
    pub fn reinit(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options = options_from_js(&options)?;
        self.inner.reinit(options)?;
        Ok(())
    }

    /// Number of attached handles
    #[wasm_bindgen(js_name = handleCount)]
    pub fn handle_count(&self) -> usize {
        self.inner.handle_count()
    }
}

/// Phase tags passed to `callback`: `{ START, MOVE, END }`
#[wasm_bindgen(js_name = resizePhases)]
pub fn resize_phases() -> JsValue {
    let phases = Object::new();
    for phase in [Phase::Start, Phase::Move, Phase::End] {
        let tag = JsValue::from_str(phase.as_str());
        let _ = Reflect::set(&phases, &tag, &tag);
    }
    phases.into()
}

fn target_from_js(target: JsValue) -> Result<Target<HtmlElement>, ResizeError> {
    if target.is_null() || target.is_undefined() {
        return Err(ResizeError::MissingTarget);
    }
    if let Some(selector) = target.as_string() {
        return Ok(Target::Selector(selector));
    }
    target
        .dyn_into::<HtmlElement>()
        .map(Target::Element)
        .map_err(|_| ResizeError::platform("target must be an HTMLElement or a selector"))
}

fn options_from_js(options: &JsValue) -> Result<ResizeOptions<Event>, ResizeError> {
    if options.is_null() || options.is_undefined() {
        return Ok(ResizeOptions::new());
    }

    // JSON.stringify drops the function-valued fields.
    let json: String = js_sys::JSON::stringify(options)
        .map_err(|e| ResizeError::InvalidOptions(format!("{:?}", e)))?
        .into();
    let config: ResizeConfig =
        serde_json::from_str(&json).map_err(|e| ResizeError::InvalidOptions(e.to_string()))?;

    let mut resize_options = ResizeOptions::from_config(config);
    if let Some(callback) = function_field(options, "callback") {
        resize_options = resize_options.callback(move |phase, delta, event| {
            let result = callback.call3(
                &JsValue::NULL,
                &JsValue::from_str(phase.as_str()),
                &delta_to_js(delta),
                event,
            );
            report(result, "callback");
        });
    }
    if let Some(hook) = function_field(options, "onStart") {
        resize_options = resize_options.on_start(phase_hook(hook, "onStart"));
    }
    if let Some(hook) = function_field(options, "onMove") {
        resize_options = resize_options.on_move(phase_hook(hook, "onMove"));
    }
    if let Some(hook) = function_field(options, "onEnd") {
        resize_options = resize_options.on_end(phase_hook(hook, "onEnd"));
    }
    Ok(resize_options)
}

fn function_field(options: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(options, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn phase_hook(hook: Function, name: &'static str) -> impl FnMut(&Delta, &Event) + 'static {
    move |delta, event| {
        let result = hook.call2(&JsValue::NULL, &delta_to_js(delta), event);
        report(result, name);
    }
}

fn report(result: Result<JsValue, JsValue>, name: &str) {
    if let Err(err) = result {
        log(&format!("[zos-resize] {} threw: {:?}", name, err));
    }
}

fn delta_to_js(delta: &Delta) -> JsValue {
    let object = Object::new();
    let fields = [
        ("top", delta.top),
        ("right", delta.right),
        ("bottom", delta.bottom),
        ("left", delta.left),
        ("width", delta.width),
        ("height", delta.height),
    ];
    for (name, value) in fields {
        let _ = Reflect::set(&object, &JsValue::from_str(name), &JsValue::from_f64(value as f64));
    }
    object.into()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_null_target_is_rejected() {
        assert!(ResizableController::new(JsValue::NULL, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_attaches_configured_handles() {
        let platform = WebPlatform::new().unwrap();
        let document = web_sys::window().unwrap().document().unwrap();
        let target: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&target).unwrap();

        let options = Object::new();
        Reflect::set(&options, &"handles".into(), &"e s".into()).unwrap();
        let mut resizable = ResizableController::new(target.clone().into(), options.into()).unwrap();
        assert_eq!(resizable.handle_count(), 2);
        assert_eq!(target.child_element_count(), 2);
        assert_eq!(platform.computed_position(&target).unwrap(), "relative");

        resizable.destroy();
        assert_eq!(target.child_element_count(), 0);
    }
}
