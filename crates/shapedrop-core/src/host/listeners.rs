//! Listeners attached by one owner and detached together.

use super::{Host, HostResult};

/// Record of listeners bound through a host, so the owner can detach all of
/// them before its handlers go away.
#[derive(Debug, Clone)]
pub struct ListenerSet<N, F> {
    bound: Vec<(N, &'static str, F)>,
}

impl<N, F> Default for ListenerSet<N, F> {
    fn default() -> Self {
        Self { bound: Vec::new() }
    }
}

impl<N: Clone, F: Clone> ListenerSet<N, F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to `node` and remember it.
    pub fn bind<H: Host<Node = N, Handler = F>>(
        &mut self,
        host: &mut H,
        node: &N,
        event: &'static str,
        handler: &F,
    ) -> HostResult<()> {
        host.add_listener(node, event, handler)?;
        self.bound.push((node.clone(), event, handler.clone()));
        Ok(())
    }

    /// Detach every remembered listener.
    ///
    /// All removals are attempted; the first failure is returned.
    pub fn unbind_all<H: Host<Node = N, Handler = F>>(&mut self, host: &mut H) -> HostResult<()> {
        let mut result = Ok(());
        for (node, event, handler) in self.bound.drain(..) {
            if let Err(err) = host.remove_listener(&node, event, &handler) {
                log::warn!("Failed to detach {} listener: {}", event, err);
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    /// Number of listeners currently bound.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HandlerId, MemoryHost, Namespace};

    #[test]
    fn test_unbind_all_detaches_everything() {
        let mut host = MemoryHost::new();
        let container = host.create_element(Namespace::Html, "div").unwrap();
        let root = host.create_element(Namespace::Svg, "svg").unwrap();

        let mut listeners = ListenerSet::new();
        for event in ["dragenter", "dragover", "dragleave", "drop"] {
            listeners
                .bind(&mut host, &container, event, &HandlerId(1))
                .unwrap();
        }
        listeners
            .bind(&mut host, &root, "mousedown", &HandlerId(2))
            .unwrap();
        assert_eq!(listeners.len(), 5);
        assert_eq!(host.listeners(container).len(), 4);

        listeners.unbind_all(&mut host).unwrap();
        assert!(listeners.is_empty());
        assert!(host.listeners(container).is_empty());
        assert!(host.listeners(root).is_empty());
    }

    #[test]
    fn test_unbind_leaves_foreign_listeners() {
        let mut host = MemoryHost::new();
        let node = host.create_element(Namespace::Html, "div").unwrap();
        host.add_listener(&node, "click", &HandlerId(9)).unwrap();

        let mut listeners = ListenerSet::new();
        listeners
            .bind(&mut host, &node, "dragstart", &HandlerId(1))
            .unwrap();
        listeners.unbind_all(&mut host).unwrap();

        assert_eq!(host.listeners(node), &[("click".to_string(), HandlerId(9))]);
        // A second teardown is a no-op.
        listeners.unbind_all(&mut host).unwrap();
    }
}
