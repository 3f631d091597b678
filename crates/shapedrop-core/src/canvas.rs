//! Canvas surface and its pointer interaction state machine.

use crate::config::{CanvasConfig, ConfigError};
use crate::host::{Host, HostError, Namespace};
use crate::input::{CanvasEvent, EventResponse, Tracking};
use crate::node::{self, Attributes};
use crate::panel::ShapesPanel;
use crate::shapes::{ShapeElement, ShapeId, ShapePatch, create_shape, drop_preset};
use crate::transform::ScreenTransform;
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Class of the HTML box wrapping the drawing root.
pub const CONTAINER_CLASS: &str = "headless-canvas";

/// Id and class of the drawing root.
pub const SURFACE_ID: &str = "svg-content";

/// Canvas errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Surface transform is not invertible")]
    SingularTransform,
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// State of an in-progress move of an existing shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveSession {
    /// Shape being moved.
    pub target: ShapeId,
    /// Pointer position minus anchor, captured at pointer-down.
    pub offset: Vec2,
}

/// Interaction state of the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A panel entry is being dragged over the surface.
    DraggingNewShape,
    /// An existing shape follows the pointer.
    MovingShape(MoveSession),
}

/// Callback receiving the kind string of every drop carrying a payload.
pub type DropObserver = Box<dyn FnMut(&str)>;

/// The drawing surface: owns its nodes, shapes and interaction state.
pub struct Canvas<H: Host> {
    host: H,
    config: CanvasConfig,
    mount: H::Node,
    root: H::Node,
    container: H::Node,
    shapes: Vec<ShapeElement<H::Node>>,
    panel: Option<ShapesPanel<H::Node>>,
    state: InteractionState,
    /// Last screen position seen during a drag, used to place drops.
    last_pointer: Point,
    interactive: bool,
    observers: Vec<DropObserver>,
}

impl<H: Host> Canvas<H> {
    /// Create the surface nodes. Nothing is attached to `mount` until
    /// [`Canvas::render_surface`] is called.
    pub fn new(mut host: H, config: CanvasConfig, mount: H::Node) -> CanvasResult<Self> {
        config.validate()?;

        let root = host.create_element(Namespace::Svg, "svg")?;
        let container_attrs = Attributes::new()
            .with("class", CONTAINER_CLASS)
            .with_style("width", format!("{}px", config.width))
            .with_style("height", format!("{}px", config.height));
        let container = node::contain(&mut host, &root, &container_attrs)?;

        Ok(Self {
            host,
            config,
            mount,
            root,
            container,
            shapes: Vec::new(),
            panel: None,
            state: InteractionState::Idle,
            last_pointer: Point::ZERO,
            interactive: false,
            observers: Vec::new(),
        })
    }

    /// Configure the drawing root and attach the surface to the mount point.
    pub fn render_surface(&mut self) -> CanvasResult<()> {
        let (width, height) = (self.config.width, self.config.height);
        let attrs = Attributes::new()
            .with("width", width)
            .with("height", height)
            .with("viewBox", format!("0 0 {} {}", width, height))
            .with("xmlns", crate::host::SVG_NS)
            .with("version", "1.1")
            .with("preserveAspectRatio", "xMidYMid meet")
            .with("class", SURFACE_ID)
            .with("id", SURFACE_ID)
            .with_style("background-color", "transparent");
        node::update_element(&mut self.host, &self.root, &attrs)?;
        self.host.append_child(&self.container, &self.root)?;
        self.host.append_child(&self.mount, &self.container)?;
        log::info!("Canvas surface rendered ({}x{})", width, height);
        Ok(())
    }

    /// Build the shapes panel and attach it to the mount point.
    ///
    /// The panel is built once; later calls return the existing one.
    pub fn render_panel(&mut self) -> CanvasResult<&ShapesPanel<H::Node>> {
        let panel = match self.panel.take() {
            Some(panel) => panel,
            None => {
                let panel = ShapesPanel::new(&mut self.host)?;
                self.host.append_child(&self.mount, panel.panel_node())?;
                panel
            }
        };
        Ok(self.panel.insert(panel))
    }

    /// Start reacting to pointer and drag events.
    pub fn enable_interaction(&mut self) {
        self.interactive = true;
        log::debug!("Canvas interaction enabled");
    }

    /// Stop reacting to events. A live move session is ended.
    pub fn disable_interaction(&mut self) -> EventResponse {
        self.interactive = false;
        log::debug!("Canvas interaction disabled");
        self.end_move()
    }

    /// Register a callback invoked with the kind string of every drop.
    pub fn on_drop(&mut self, observer: impl FnMut(&str) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Feed one host event through the state machine.
    pub fn handle_event(&mut self, event: CanvasEvent<H::Node>) -> CanvasResult<EventResponse> {
        if !self.interactive {
            return Ok(EventResponse::default());
        }
        match event {
            CanvasEvent::DragEnter { position } | CanvasEvent::DragOver { position } => {
                self.last_pointer = position;
                if self.state == InteractionState::Idle {
                    log::debug!("Idle -> DraggingNewShape");
                    self.state = InteractionState::DraggingNewShape;
                }
                Ok(EventResponse::prevent_default())
            }
            CanvasEvent::DragLeave { related } => {
                let still_inside = related
                    .as_ref()
                    .is_some_and(|node| self.host.contains(&self.container, node));
                if !still_inside && self.state == InteractionState::DraggingNewShape {
                    log::debug!("DraggingNewShape -> Idle (left surface)");
                    self.state = InteractionState::Idle;
                }
                Ok(EventResponse::default())
            }
            CanvasEvent::Drop { position, payload } => self.drop_payload(position, payload),
            CanvasEvent::PointerDown { position, target } => self.begin_move(position, target),
            CanvasEvent::PointerMove { position } => self.continue_move(position),
            CanvasEvent::PointerUp { .. } => Ok(self.end_move()),
        }
    }

    fn drop_payload(
        &mut self,
        position: Option<Point>,
        payload: Option<String>,
    ) -> CanvasResult<EventResponse> {
        if let Some(position) = position {
            self.last_pointer = position;
        }
        if self.state == InteractionState::DraggingNewShape {
            log::debug!("DraggingNewShape -> Idle (drop)");
            self.state = InteractionState::Idle;
        }

        let mut response = EventResponse::prevent_default();
        let Some(kind) = payload.filter(|p| !p.trim().is_empty()) else {
            log::debug!("Drop without a shape kind ignored");
            return Ok(response);
        };

        let created = self.create_dropped(&kind);
        for observer in &mut self.observers {
            observer(&kind);
        }
        response.created = created?;
        Ok(response)
    }

    fn create_dropped(&mut self, kind: &str) -> CanvasResult<Option<ShapeId>> {
        let center = self.to_local(self.last_pointer)?;
        let Some(shape) = create_shape(kind, &drop_preset(center)) else {
            log::warn!("Ignoring drop of unknown shape kind {:?}", kind);
            return Ok(None);
        };
        let element = ShapeElement::new(&mut self.host, shape)?;
        self.host.append_child(&self.root, element.node())?;
        let id = element.id().to_string();
        log::debug!(
            "Dropped {} {} at ({}, {})",
            element.shape().kind(),
            id,
            center.x,
            center.y
        );
        self.shapes.push(element);
        Ok(Some(id))
    }

    fn begin_move(
        &mut self,
        position: Point,
        target: Option<H::Node>,
    ) -> CanvasResult<EventResponse> {
        if matches!(self.state, InteractionState::MovingShape(_)) {
            return Ok(EventResponse::default());
        }
        let Some(element) = target.and_then(|t| self.shapes.iter().find(|s| s.owns(&t))) else {
            return Ok(EventResponse::default());
        };
        let target = element.id().to_string();
        let anchor = element.shape().anchor();

        let local = self.to_local(position)?;
        let offset = local - anchor;
        log::debug!("-> MovingShape {} (offset {}, {})", target, offset.x, offset.y);
        self.state = InteractionState::MovingShape(MoveSession { target, offset });
        Ok(EventResponse::tracking(Tracking::Begin, true))
    }

    fn continue_move(&mut self, position: Point) -> CanvasResult<EventResponse> {
        let InteractionState::MovingShape(session) = &self.state else {
            return Ok(EventResponse::default());
        };
        let (target, offset) = (session.target.clone(), session.offset);

        let local = self.to_local(position)?;
        let Some(element) = self.shapes.iter_mut().find(|s| s.id() == target) else {
            log::warn!("Move target {} no longer exists", target);
            return Ok(self.end_move());
        };
        element.set_position(&mut self.host, local - offset)?;
        Ok(EventResponse::prevent_default())
    }

    fn end_move(&mut self) -> EventResponse {
        if let InteractionState::MovingShape(session) = &self.state {
            log::debug!("MovingShape {} -> Idle", session.target);
            self.state = InteractionState::Idle;
            return EventResponse::tracking(Tracking::End, false);
        }
        EventResponse::default()
    }

    /// Convert a screen point to the surface's local space using the current
    /// transform of the drawing root.
    pub fn to_local(&self, screen: Point) -> CanvasResult<Point> {
        let transform = ScreenTransform::new(self.host.screen_transform(&self.root)?);
        transform
            .screen_to_local(screen)
            .ok_or(CanvasError::SingularTransform)
    }

    /// Apply a partial update to a shape. Returns false if no such shape.
    pub fn update_shape(&mut self, id: &str, patch: &ShapePatch) -> CanvasResult<bool> {
        match self.shapes.iter_mut().find(|s| s.id() == id) {
            Some(element) => {
                element.update(&mut self.host, patch)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Shapes in append (paint) order.
    pub fn shapes(&self) -> &[ShapeElement<H::Node>] {
        &self.shapes
    }

    /// Get a shape by id.
    pub fn shape(&self, id: &str) -> Option<&ShapeElement<H::Node>> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Whether events are being handled.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The rendered panel, if any.
    pub fn panel(&self) -> Option<&ShapesPanel<H::Node>> {
        self.panel.as_ref()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Drawing root node (shape nodes are its children).
    pub fn root(&self) -> &H::Node {
        &self.root
    }

    /// Box wrapping the drawing root.
    pub fn container(&self) -> &H::Node {
        &self.container
    }

    pub fn mount(&self) -> &H::Node {
        &self.mount
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
