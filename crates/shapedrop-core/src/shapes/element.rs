//! A shape paired with the host node it renders to.

use super::{Shape, ShapePatch};
use crate::host::{Host, HostResult};
use crate::node;
use kurbo::Point;

/// Shape model plus its exclusively owned node.
///
/// All node writes go through this type so the model and the node never
/// disagree.
#[derive(Debug, Clone)]
pub struct ShapeElement<N> {
    shape: Shape,
    node: N,
}

impl<N: Clone + PartialEq> ShapeElement<N> {
    /// Create the node for `shape`.
    pub fn new<H: Host<Node = N>>(host: &mut H, shape: Shape) -> HostResult<Self> {
        let node = shape.create(host)?;
        Ok(Self { shape, node })
    }

    /// The shape model.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Shape identifier.
    pub fn id(&self) -> &str {
        self.shape.id()
    }

    /// The owned node. Do not detach or destroy it independently.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Check whether `node` is this shape's node.
    pub fn owns(&self, node: &N) -> bool {
        &self.node == node
    }

    /// Apply a partial update to the model and the node in place.
    pub fn update<H: Host<Node = N>>(&mut self, host: &mut H, patch: &ShapePatch) -> HostResult<()> {
        let writes = self.shape.apply_patch(patch);
        node::update_element(host, &self.node, &writes)
    }

    /// Move the anchor and write the kind's positional attributes.
    pub fn set_position<H: Host<Node = N>>(&mut self, host: &mut H, anchor: Point) -> HostResult<()> {
        self.shape.set_anchor(anchor);
        node::update_element(host, &self.node, &self.shape.anchor_attributes())
    }

    /// Attach an interaction handler to the node.
    pub fn bind_interaction<H: Host<Node = N>>(
        &self,
        host: &mut H,
        event: &str,
        handler: &H::Handler,
    ) -> HostResult<()> {
        host.add_listener(&self.node, event, handler)
    }

    /// Detach a handler attached with [`ShapeElement::bind_interaction`].
    pub fn unbind_interaction<H: Host<Node = N>>(
        &self,
        host: &mut H,
        event: &str,
        handler: &H::Handler,
    ) -> HostResult<()> {
        host.remove_listener(&self.node, event, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HandlerId, MemoryHost};
    use crate::shapes::{StylePatch, create_shape, drop_preset};
    use std::collections::BTreeMap;

    fn rect(host: &mut MemoryHost) -> ShapeElement<crate::host::NodeId> {
        let mut attrs = drop_preset(Point::new(130.0, 80.0));
        attrs.style.stroke_width = 3.0;
        let shape = create_shape("rectangle", &attrs).unwrap();
        ShapeElement::new(host, shape).unwrap()
    }

    #[test]
    fn test_update_fill_leaves_stroke() {
        let mut host = MemoryHost::new();
        let mut el = rect(&mut host);

        el.update(&mut host, &ShapePatch::style(StylePatch::fill("green")))
            .unwrap();

        let node = *el.node();
        assert_eq!(host.attribute(node, "fill"), Some("green"));
        assert_eq!(host.attribute(node, "stroke"), Some("black"));
        assert_eq!(host.attribute_f64(node, "stroke-width"), Some(3.0));
        assert_eq!(el.shape().style().fill, "green");
        assert_eq!(el.shape().style().stroke, "black");
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut host = MemoryHost::new();
        let mut el = rect(&mut host);
        let mut css = BTreeMap::new();
        css.insert("opacity".to_string(), "0.5".to_string());
        let patch = ShapePatch {
            x: Some(5.0),
            width: Some(40.0),
            style: StylePatch::fill("green"),
            css,
            ..ShapePatch::default()
        };

        el.update(&mut host, &patch).unwrap();
        let once = host.to_markup(*el.node());
        let model_once = el.shape().clone();

        el.update(&mut host, &patch).unwrap();
        assert_eq!(host.to_markup(*el.node()), once);
        assert_eq!(el.shape(), &model_once);
        assert_eq!(host.style_property(*el.node(), "opacity"), Some("0.5"));
    }

    #[test]
    fn test_css_group_applied_per_property() {
        let mut host = MemoryHost::new();
        let mut el = rect(&mut host);

        let mut first = BTreeMap::new();
        first.insert("opacity".to_string(), "0.5".to_string());
        first.insert("cursor".to_string(), "move".to_string());
        el.update(&mut host, &ShapePatch { css: first, ..ShapePatch::default() })
            .unwrap();

        let mut second = BTreeMap::new();
        second.insert("opacity".to_string(), "1".to_string());
        el.update(&mut host, &ShapePatch { css: second, ..ShapePatch::default() })
            .unwrap();

        assert_eq!(host.style_property(*el.node(), "opacity"), Some("1"));
        assert_eq!(host.style_property(*el.node(), "cursor"), Some("move"));
    }

    #[test]
    fn test_set_position_writes_anchor() {
        let mut host = MemoryHost::new();
        let mut el = rect(&mut host);
        el.set_position(&mut host, Point::new(110.0, 40.0)).unwrap();

        assert_eq!(host.attribute_f64(*el.node(), "x"), Some(110.0));
        assert_eq!(host.attribute_f64(*el.node(), "y"), Some(40.0));
        assert_eq!(el.shape().anchor(), Point::new(110.0, 40.0));
    }

    #[test]
    fn test_bind_and_unbind_interaction() {
        let mut host = MemoryHost::new();
        let el = rect(&mut host);
        el.bind_interaction(&mut host, "mouseover", &HandlerId(7)).unwrap();
        assert_eq!(host.listeners(*el.node()).len(), 1);

        el.unbind_interaction(&mut host, "mouseover", &HandlerId(7)).unwrap();
        assert!(host.listeners(*el.node()).is_empty());
    }
}
