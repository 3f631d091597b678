//! Palette of draggable shape previews.

use crate::host::{Host, HostResult, Namespace};
use crate::input::DragPayload;
use crate::node::{self, Attributes};
use crate::shapes::{KIND_ATTRIBUTE, PANEL_BOX_SIZE, Shape, ShapeElement, ShapeKind, panel_preset};

/// Id of the panel container node.
pub const PANEL_ID: &str = "shapes-panel";

/// Class of each draggable preview box.
pub const PANEL_BOX_CLASS: &str = "panel-shape-box";

/// One preview in the panel.
#[derive(Debug, Clone)]
pub struct PanelEntry<N> {
    kind: ShapeKind,
    preview: ShapeElement<N>,
    frame: N,
    node: N,
}

impl<N: Clone + PartialEq> PanelEntry<N> {
    fn new<H: Host<Node = N>>(host: &mut H, kind: ShapeKind) -> HostResult<Self> {
        let shape = Shape::from_attributes(kind, &panel_preset(kind));
        let preview = ShapeElement::new(host, shape)?;

        let size = PANEL_BOX_SIZE;
        let frame_attrs = Attributes::new()
            .with("width", size)
            .with("height", size)
            .with("viewBox", format!("0 0 {} {}", size, size))
            .with(KIND_ATTRIBUTE, kind);
        let frame = node::create_element(host, Namespace::Svg, "svg", &frame_attrs)?;
        host.append_child(&frame, preview.node())?;

        let box_attrs = Attributes::new()
            .with("draggable", "true")
            .with("class", PANEL_BOX_CLASS)
            .with(KIND_ATTRIBUTE, kind);
        let node = node::contain(host, &frame, &box_attrs)?;

        Ok(Self {
            kind,
            preview,
            frame,
            node,
        })
    }

    /// Kind this entry creates.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Preview shape shown in the entry.
    pub fn preview(&self) -> &ShapeElement<N> {
        &self.preview
    }

    /// Draggable box node.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Payload placed in the drag transfer when a drag starts on this entry.
    pub fn drag_payload(&self) -> DragPayload {
        DragPayload::for_kind(self.kind)
    }

    fn contains(&self, node: &N) -> bool {
        &self.node == node || &self.frame == node || self.preview.owns(node)
    }
}

/// Fixed palette with one entry per supported kind.
#[derive(Debug, Clone)]
pub struct ShapesPanel<N> {
    node: N,
    entries: Vec<PanelEntry<N>>,
}

impl<N: Clone + PartialEq> ShapesPanel<N> {
    /// Build the panel and all of its entries.
    pub fn new<H: Host<Node = N>>(host: &mut H) -> HostResult<Self> {
        let node = node::create_element(
            host,
            Namespace::Html,
            "div",
            &Attributes::new().with("id", PANEL_ID),
        )?;

        let mut entries = Vec::with_capacity(ShapeKind::ALL.len());
        for kind in ShapeKind::ALL {
            let entry = PanelEntry::new(host, kind)?;
            host.append_child(&node, entry.node())?;
            entries.push(entry);
        }

        log::debug!("Shapes panel built with {} entries", entries.len());
        Ok(Self { node, entries })
    }

    /// Container node holding every entry.
    pub fn panel_node(&self) -> &N {
        &self.node
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[PanelEntry<N>] {
        &self.entries
    }

    /// Entry whose box (or anything inside it) is `node`.
    pub fn entry_for(&self, node: &N) -> Option<&PanelEntry<N>> {
        self.entries.iter().find(|e| e.contains(node))
    }

    /// Drag payload for a drag that started on `node`.
    pub fn drag_start(&self, node: &N) -> Option<DragPayload> {
        let payload = self.entry_for(node).map(PanelEntry::drag_payload);
        if payload.is_none() {
            log::debug!("Drag started outside any panel entry");
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::input::DRAG_PAYLOAD_MIME;
    use crate::shapes::SHAPE_CLASS;

    #[test]
    fn test_panel_structure() {
        let mut host = MemoryHost::new();
        let panel = ShapesPanel::new(&mut host).unwrap();
        let root = *panel.panel_node();

        assert_eq!(host.attribute(root, "id"), Some(PANEL_ID));
        assert_eq!(host.children(root).len(), 2);

        let kinds: Vec<_> = panel.entries().iter().map(PanelEntry::kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Circle, ShapeKind::Rectangle]);

        for entry in panel.entries() {
            let node = *entry.node();
            assert_eq!(host.tag(node), Some("div"));
            assert_eq!(host.attribute(node, "draggable"), Some("true"));
            assert!(host.has_class(node, PANEL_BOX_CLASS));
            assert_eq!(host.attribute(node, KIND_ATTRIBUTE), Some(entry.kind().as_str()));

            let frame = host.children(node)[0];
            assert_eq!(host.tag(frame), Some("svg"));
            assert_eq!(host.attribute(frame, "viewBox"), Some("0 0 100 100"));

            let preview = host.children(frame)[0];
            assert!(host.has_class(preview, SHAPE_CLASS));
            assert_eq!(host.tag(preview), Some(entry.kind().svg_tag()));
        }
    }

    #[test]
    fn test_panel_previews_use_presets() {
        let mut host = MemoryHost::new();
        let panel = ShapesPanel::new(&mut host).unwrap();
        let circle = *panel.entries()[0].preview().node();
        let rect = *panel.entries()[1].preview().node();

        assert_eq!(host.attribute(circle, "id"), Some("circle-panel"));
        assert_eq!(host.attribute(circle, "fill"), Some("red"));
        assert_eq!(host.attribute_f64(circle, "r"), Some(50.0));
        assert_eq!(host.attribute(rect, "id"), Some("rectangle-panel"));
        assert_eq!(host.attribute(rect, "fill"), Some("blue"));
        assert_eq!(host.attribute_f64(rect, "width"), Some(100.0));
    }

    #[test]
    fn test_drag_start_payload() {
        let mut host = MemoryHost::new();
        let panel = ShapesPanel::new(&mut host).unwrap();
        let rect_entry = &panel.entries()[1];

        let payload = panel.drag_start(rect_entry.node()).unwrap();
        assert_eq!(payload.mime, DRAG_PAYLOAD_MIME);
        assert_eq!(payload.data, "rectangle");

        // Drags reported on the inner preview resolve to the same entry.
        let inner = panel.drag_start(rect_entry.preview().node()).unwrap();
        assert_eq!(inner, payload);

        assert!(panel.drag_start(panel.panel_node()).is_none());
    }
}
