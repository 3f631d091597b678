//! JavaScript-facing editor and browser event wiring.

use crate::dom::DomHost;
use js_sys::Function;
use kurbo::Point;
use shapedrop_core::{
    Canvas, CanvasConfig, CanvasEvent, DRAG_PAYLOAD_MIME, EventResponse, ListenerSet, Tracking,
};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, MouseEvent};

type DragClosure = Closure<dyn FnMut(DragEvent)>;
type MouseClosure = Closure<dyn FnMut(MouseEvent)>;
type DomListeners = ListenerSet<Element, Function>;

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn related_element(event: &MouseEvent) -> Option<Element> {
    event.related_target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn as_function<T: ?Sized + WasmClosure>(closure: &Closure<T>) -> &Function {
    closure.as_ref().unchecked_ref()
}

/// Document listeners used while a shape is being moved.
struct TrackingHandlers {
    mousemove: Function,
    mouseup: Function,
}

/// State reachable from every event closure.
struct Shared {
    canvas: RefCell<Canvas<DomHost>>,
    /// Kinds dropped during the current event, delivered once the canvas is
    /// no longer borrowed.
    pending_drops: Rc<RefCell<Vec<String>>>,
    drop_callbacks: RefCell<Vec<Function>>,
    tracking: RefCell<Option<TrackingHandlers>>,
}

impl Shared {
    fn dispatch(&self, event: CanvasEvent<Element>) -> Option<EventResponse> {
        let result = self.canvas.borrow_mut().handle_event(event);
        let response = match result {
            Ok(response) => {
                self.apply_tracking(response.tracking);
                Some(response)
            }
            Err(err) => {
                log::error!("Canvas event failed: {}", err);
                None
            }
        };
        self.flush_drops();
        response
    }

    fn apply_tracking(&self, tracking: Option<Tracking>) {
        let Some(tracking) = tracking else {
            return;
        };
        let handlers = self.tracking.borrow();
        let Some(handlers) = handlers.as_ref() else {
            return;
        };
        let document = self.canvas.borrow().host().document().clone();
        let result = match tracking {
            Tracking::Begin => document
                .add_event_listener_with_callback("mousemove", &handlers.mousemove)
                .and_then(|_| document.add_event_listener_with_callback("mouseup", &handlers.mouseup)),
            Tracking::End => document
                .remove_event_listener_with_callback("mousemove", &handlers.mousemove)
                .and_then(|_| {
                    document.remove_event_listener_with_callback("mouseup", &handlers.mouseup)
                }),
        };
        if let Err(err) = result {
            log::error!("Failed to update document tracking: {:?}", err);
        }
    }

    fn flush_drops(&self) {
        let kinds: Vec<String> = self.pending_drops.borrow_mut().drain(..).collect();
        if kinds.is_empty() {
            return;
        }
        let callbacks = self.drop_callbacks.borrow().clone();
        for kind in &kinds {
            for callback in &callbacks {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(kind)) {
                    log::error!("Drop callback failed: {:?}", err);
                }
            }
        }
    }
}

/// Drag-and-drop shape editor mounted into a page element.
///
/// Dropping the editor (`free()` from JavaScript) detaches every listener it
/// attached, including document tracking of a move in progress.
#[wasm_bindgen]
pub struct ShapeEditor {
    shared: Rc<Shared>,
    dragstart: DragClosure,
    dragenter: DragClosure,
    dragover: DragClosure,
    dragleave: DragClosure,
    drop: DragClosure,
    mousedown: MouseClosure,
    _mousemove: MouseClosure,
    _mouseup: MouseClosure,
    surface_listeners: DomListeners,
    panel_listeners: DomListeners,
}

#[wasm_bindgen]
impl ShapeEditor {
    /// Create an editor with a `width` x `height` surface inside `mount`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, mount: Element) -> Result<ShapeEditor, JsValue> {
        Self::with_config(CanvasConfig::new(width, height), mount)
    }

    /// Create an editor from a `{ width, height }` object or its JSON text;
    /// missing fields take their defaults.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, mount: Element) -> Result<ShapeEditor, JsValue> {
        let config: CanvasConfig = if config.is_undefined() || config.is_null() {
            CanvasConfig::default()
        } else if let Some(json) = config.as_string() {
            CanvasConfig::from_json(&json).map_err(to_js)?
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js)?
        };
        Self::with_config(config, mount)
    }

    /// Attach the drawing surface to the mount element.
    #[wasm_bindgen(js_name = createCanvas)]
    pub fn create_canvas(&self) -> Result<(), JsValue> {
        self.shared.canvas.borrow_mut().render_surface().map_err(to_js)
    }

    /// Attach the shapes panel to the mount element.
    #[wasm_bindgen(js_name = createShapesPanel)]
    pub fn create_shapes_panel(&mut self) -> Result<(), JsValue> {
        let mut canvas = self.shared.canvas.borrow_mut();
        if canvas.panel().is_some() {
            return Ok(());
        }
        let panel = canvas.render_panel().map_err(to_js)?.panel_node().clone();
        self.panel_listeners
            .bind(canvas.host_mut(), &panel, "dragstart", as_function(&self.dragstart))
            .map_err(to_js)
    }

    /// Start accepting drops and shape moves.
    #[wasm_bindgen(js_name = enableDragAndDropEvents)]
    pub fn enable_drag_and_drop_events(&mut self) -> Result<(), JsValue> {
        if !self.surface_listeners.is_empty() {
            return Ok(());
        }
        let mut canvas = self.shared.canvas.borrow_mut();
        for (node, event, handler) in self.surface_bindings(&canvas) {
            self.surface_listeners
                .bind(canvas.host_mut(), &node, event, &handler)
                .map_err(to_js)?;
        }
        canvas.enable_interaction();
        Ok(())
    }

    /// Stop accepting drops and shape moves. A move in progress ends here.
    #[wasm_bindgen(js_name = disableDragAndDropEvents)]
    pub fn disable_drag_and_drop_events(&mut self) -> Result<(), JsValue> {
        let (response, unbound) = {
            let mut canvas = self.shared.canvas.borrow_mut();
            let unbound = self.surface_listeners.unbind_all(canvas.host_mut());
            (canvas.disable_interaction(), unbound)
        };
        self.shared.apply_tracking(response.tracking);
        unbound.map_err(to_js)
    }

    /// Call `callback(kind)` for every drop that carries a shape kind.
    #[wasm_bindgen(js_name = bindDropEvent)]
    pub fn bind_drop_event(&self, callback: Function) {
        self.shared.drop_callbacks.borrow_mut().push(callback);
    }

    /// Number of shapes on the surface.
    #[wasm_bindgen(js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        self.shared.canvas.borrow().shapes().len()
    }
}

impl ShapeEditor {
    fn with_config(config: CanvasConfig, mount: Element) -> Result<ShapeEditor, JsValue> {
        let host = DomHost::new().map_err(to_js)?;
        let mut canvas = Canvas::new(host, config, mount).map_err(to_js)?;

        let pending_drops = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending_drops);
        canvas.on_drop(move |kind| sink.borrow_mut().push(kind.to_string()));

        let shared = Rc::new(Shared {
            canvas: RefCell::new(canvas),
            pending_drops,
            drop_callbacks: RefCell::new(Vec::new()),
            tracking: RefCell::new(None),
        });

        let dragenter = drag_listener(&shared, |event| CanvasEvent::DragEnter {
            position: client_point(event),
        });
        let dragover = drag_listener(&shared, |event| CanvasEvent::DragOver {
            position: client_point(event),
        });
        let dragleave = drag_listener(&shared, |event| CanvasEvent::DragLeave {
            related: related_element(event),
        });
        let drop = drag_listener(&shared, |event| CanvasEvent::Drop {
            position: Some(client_point(event)),
            payload: event
                .data_transfer()
                .and_then(|dt| dt.get_data(DRAG_PAYLOAD_MIME).ok()),
        });
        let mousedown = mouse_listener(&shared, |event| CanvasEvent::PointerDown {
            position: client_point(event),
            target: target_element(event),
        });
        let mousemove = mouse_listener(&shared, |event| CanvasEvent::PointerMove {
            position: client_point(event),
        });
        let mouseup = mouse_listener(&shared, |event| CanvasEvent::PointerUp {
            position: client_point(event),
        });
        *shared.tracking.borrow_mut() = Some(TrackingHandlers {
            mousemove: as_function(&mousemove).clone(),
            mouseup: as_function(&mouseup).clone(),
        });

        let dragstart = {
            let shared = Rc::clone(&shared);
            Closure::wrap(Box::new(move |event: DragEvent| {
                let canvas = shared.canvas.borrow();
                let payload = target_element(&event)
                    .and_then(|target| canvas.panel().and_then(|p| p.drag_start(&target)));
                let (Some(payload), Some(transfer)) = (payload, event.data_transfer()) else {
                    return;
                };
                if let Err(err) = transfer.set_data(&payload.mime, &payload.data) {
                    log::error!("Failed to set drag data: {:?}", err);
                }
            }) as Box<dyn FnMut(DragEvent)>)
        };

        log::info!("Shape editor created ({}x{})", config.width, config.height);
        Ok(ShapeEditor {
            shared,
            dragstart,
            dragenter,
            dragover,
            dragleave,
            drop,
            mousedown,
            _mousemove: mousemove,
            _mouseup: mouseup,
            surface_listeners: ListenerSet::new(),
            panel_listeners: ListenerSet::new(),
        })
    }

    /// Surface listeners installed while drag and drop is enabled.
    fn surface_bindings(&self, canvas: &Canvas<DomHost>) -> [(Element, &'static str, Function); 5] {
        let container = canvas.container().clone();
        let root = canvas.root().clone();
        [
            (container.clone(), "dragenter", as_function(&self.dragenter).clone()),
            (container.clone(), "dragover", as_function(&self.dragover).clone()),
            (container.clone(), "dragleave", as_function(&self.dragleave).clone()),
            (container, "drop", as_function(&self.drop).clone()),
            (root, "mousedown", as_function(&self.mousedown).clone()),
        ]
    }
}

impl Drop for ShapeEditor {
    fn drop(&mut self) {
        if self.shared.canvas.try_borrow_mut().is_err() {
            log::error!("Shape editor dropped while handling an event; listeners left attached");
            return;
        }
        if let Err(err) = self.disable_drag_and_drop_events() {
            log::error!("Failed to detach surface listeners: {:?}", err);
        }
        let mut canvas = self.shared.canvas.borrow_mut();
        if let Err(err) = self.panel_listeners.unbind_all(canvas.host_mut()) {
            log::error!("Failed to detach panel listeners: {}", err);
        }
        log::debug!("Shape editor torn down");
    }
}

fn drag_listener(
    shared: &Rc<Shared>,
    to_event: fn(&DragEvent) -> CanvasEvent<Element>,
) -> DragClosure {
    let shared = Rc::clone(shared);
    Closure::wrap(Box::new(move |event: DragEvent| {
        if let Some(response) = shared.dispatch(to_event(&event)) {
            if response.prevent_default {
                event.prevent_default();
            }
        }
    }) as Box<dyn FnMut(DragEvent)>)
}

fn mouse_listener(
    shared: &Rc<Shared>,
    to_event: fn(&MouseEvent) -> CanvasEvent<Element>,
) -> MouseClosure {
    let shared = Rc::clone(shared);
    Closure::wrap(Box::new(move |event: MouseEvent| {
        if let Some(response) = shared.dispatch(to_event(&event)) {
            if response.prevent_default {
                event.prevent_default();
            }
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}

/// Initialize panic reporting and console logging.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", err).into());
    }

    log::info!("ShapeDrop loaded");
}
