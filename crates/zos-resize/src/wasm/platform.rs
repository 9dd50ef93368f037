//! Browser platform backed by `web-sys`

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, MouseEvent, PointerEvent, TouchEvent, Window};

use super::log;
use crate::error::ResizeError;
use crate::math::{Rect, Size, Vec2};
use crate::platform::{
    touch_point, EventCallback, InputMode, ListenTarget, Platform, PointerEventKind, PointerSample,
};

/// Registered DOM listener; keeps its closure alive until removed
pub struct WebListener {
    target: EventTarget,
    event_name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Platform over the page's `window` and `document`
pub struct WebPlatform {
    window: Window,
    document: Document,
    mode: InputMode,
}

impl WebPlatform {
    /// Bind to the global window, detecting touch support once
    pub fn new() -> Result<Self, ResizeError> {
        let window = web_sys::window().ok_or_else(|| ResizeError::platform("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| ResizeError::platform("window has no document"))?;
        let touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
        let mode = if touch { InputMode::Touch } else { InputMode::Pointer };

        Ok(Self {
            window,
            document,
            mode,
        })
    }
}

fn js_error(context: &str, err: JsValue) -> ResizeError {
    ResizeError::platform(format!("{}: {:?}", context, err))
}

impl Platform for WebPlatform {
    type Element = HtmlElement;
    type Event = Event;
    type Listener = WebListener;

    fn input_mode(&self) -> InputMode {
        self.mode
    }

    fn query_element(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn create_element(&self, tag: &str) -> Result<HtmlElement, ResizeError> {
        self.document
            .create_element(tag)
            .map_err(|e| js_error("createElement", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ResizeError::platform(format!("<{}> is not an HTMLElement", tag)))
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<(), ResizeError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }

    fn remove_child(&self, parent: &HtmlElement, child: &HtmlElement) -> Result<(), ResizeError> {
        parent
            .remove_child(child)
            .map(|_| ())
            .map_err(|e| js_error("removeChild", e))
    }

    fn child_elements(&self, parent: &HtmlElement) -> Vec<HtmlElement> {
        let children = parent.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn get_attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn computed_position(&self, element: &HtmlElement) -> Result<String, ResizeError> {
        let style = self
            .window
            .get_computed_style(element)
            .map_err(|e| js_error("getComputedStyle", e))?
            .ok_or_else(|| ResizeError::platform("no computed style"))?;
        style
            .get_property_value("position")
            .map_err(|e| js_error("getPropertyValue", e))
    }

    fn set_style(&self, element: &HtmlElement, declarations: &[(&str, String)]) -> Result<(), ResizeError> {
        let style = element.style();
        for (property, value) in declarations {
            style
                .set_property(property, value)
                .map_err(|e| js_error("style.setProperty", e))?;
        }
        Ok(())
    }

    fn set_attribute(&self, element: &HtmlElement, name: &str, value: &str) -> Result<(), ResizeError> {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", e))
    }

    fn bounding_rect(&self, element: &HtmlElement) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.x() as f32, rect.y() as f32, rect.width() as f32, rect.height() as f32)
    }

    fn viewport_size(&self) -> Size {
        match self.document.document_element() {
            Some(root) => Size::new(root.client_width() as f32, root.client_height() as f32),
            None => Size::ZERO,
        }
    }

    fn now_ms(&self) -> f64 {
        match self.window.performance() {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }

    fn pointer_sample(&self, event: &Event) -> Option<PointerSample> {
        match self.mode {
            InputMode::Touch => {
                let event = event.dyn_ref::<TouchEvent>()?;
                let touch = touch_point(event.touches().get(0), event.changed_touches().get(0))?;
                Some(PointerSample::primary(Vec2::new(
                    touch.client_x() as f32,
                    touch.client_y() as f32,
                )))
            }
            InputMode::Pointer => {
                let mouse = event.dyn_ref::<MouseEvent>()?;
                let primary_pointer = event
                    .dyn_ref::<PointerEvent>()
                    .map(PointerEvent::is_primary)
                    .unwrap_or(true);
                Some(PointerSample {
                    position: Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32),
                    primary: primary_pointer && mouse.button() <= 0,
                })
            }
        }
    }

    fn listen(
        &self,
        target: ListenTarget<'_, HtmlElement>,
        kind: PointerEventKind,
        callback: EventCallback<Event>,
    ) -> Result<WebListener, ResizeError> {
        let target: EventTarget = match target {
            ListenTarget::Element(element) => element.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
        };
        let event_name = self.mode.event_name(kind);
        let closure = Closure::wrap(Box::new(move |event: Event| callback(&event)) as Box<dyn FnMut(Event)>);

        target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", e))?;

        Ok(WebListener {
            target,
            event_name,
            closure,
        })
    }

    fn unlisten(&self, listener: WebListener) {
        let WebListener {
            target,
            event_name,
            closure,
        } = listener;
        if let Err(err) =
            target.remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        {
            log(&format!("[zos-resize] removeEventListener({}) failed: {:?}", event_name, err));
        }
    }
}
