use super::*;

/// Structural events raised while the tree is mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    Placed { value: u32, node: NodeId },
    Subdivided { node: NodeId, depth: u32 },
    /// The target node was taken, so the object went to the nearest free ancestor.
    Climbed { value: u32, from: NodeId, to: NodeId },
    Removed { value: u32, node: NodeId },
    Pruned { node: NodeId },
    /// The object left its node and is being reinserted below `to`.
    Relocated { value: u32, from: NodeId, to: NodeId },
    RootFallback { value: u32 },
    StaleHandle { value: u32, node: NodeId },
    OutOfBounds { value: u32 },
    /// Parked in the overflow set.
    Unplaceable { value: u32 },
}

impl QuadTree {
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&TraceEvent) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    #[inline(always)]
    pub(super) fn emit(&mut self, event: TraceEvent) {
        log::trace!("{:?}", event);
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}
