//! Browser DOM implementation of the core host capabilities.

use js_sys::Function;
use kurbo::Affine;
use shapedrop_core::host::{Host, HostError, HostResult, Namespace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, SvgElement, SvgGraphicsElement};

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Host backed by the page document.
#[derive(Debug, Clone)]
pub struct DomHost {
    document: Document,
}

impl DomHost {
    /// Host for the current window's document.
    pub fn new() -> HostResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HostError::CreateFailed("no document available".to_string()))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Host for DomHost {
    type Node = Element;
    type Handler = Function;

    fn create_element(&mut self, namespace: Namespace, tag: &str) -> HostResult<Element> {
        let result = match namespace {
            Namespace::Html => self.document.create_element(tag),
            Namespace::Svg => self.document.create_element_ns(namespace.uri(), tag),
        };
        result.map_err(|e| HostError::CreateFailed(format!("<{}>: {}", tag, describe(&e))))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> HostResult<()> {
        node.set_attribute(name, value)
            .map_err(|e| HostError::Attribute(format!("{}: {}", name, describe(&e))))
    }

    fn set_style_property(&mut self, node: &Element, property: &str, value: &str) -> HostResult<()> {
        let style = if let Some(html) = node.dyn_ref::<HtmlElement>() {
            html.style()
        } else if let Some(svg) = node.dyn_ref::<SvgElement>() {
            svg.style()
        } else {
            return Err(HostError::Attribute(format!(
                "<{}> has no inline style",
                node.tag_name()
            )));
        };
        style
            .set_property(property, value)
            .map_err(|e| HostError::Attribute(format!("style {}: {}", property, describe(&e))))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> HostResult<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| HostError::Tree(describe(&e)))
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn add_listener(&mut self, node: &Element, event: &str, handler: &Function) -> HostResult<()> {
        node.add_event_listener_with_callback(event, handler)
            .map_err(|e| HostError::Listener(format!("{}: {}", event, describe(&e))))
    }

    fn remove_listener(&mut self, node: &Element, event: &str, handler: &Function) -> HostResult<()> {
        node.remove_event_listener_with_callback(event, handler)
            .map_err(|e| HostError::Listener(format!("{}: {}", event, describe(&e))))
    }

    fn screen_transform(&self, node: &Element) -> HostResult<Affine> {
        let matrix = node
            .dyn_ref::<SvgGraphicsElement>()
            .and_then(|g| g.get_screen_ctm())
            .ok_or(HostError::TransformUnavailable)?;
        Ok(Affine::new([
            matrix.a() as f64,
            matrix.b() as f64,
            matrix.c() as f64,
            matrix.d() as f64,
            matrix.e() as f64,
            matrix.f() as f64,
        ]))
    }
}
