use common::shapes::Rectangle;
use smallvec::SmallVec;

/// Opaque handle to a node in the tree's node store.
pub type NodeId = u32;

pub(crate) const ROOT: NodeId = 0;
pub(crate) const NO_NODE: NodeId = u32::MAX;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Occupant {
    pub(crate) value: u32,
    pub(crate) footprint: Rectangle,
}

impl Occupant {
    #[inline(always)]
    pub(crate) fn new(value: u32, footprint: Rectangle) -> Self {
        Self { value, footprint }
    }
}

pub(crate) type NodeStack = SmallVec<[NodeId; 64]>;

pub(crate) fn validate_bounds(bounds: &Rectangle) -> crate::QuadtreeResult<()> {
    let (width, height) = (bounds.width, bounds.height);
    if !(bounds.x.is_finite() && bounds.y.is_finite() && width.is_finite() && height.is_finite())
        || width <= 0.0
        || height <= 0.0
    {
        return Err(crate::QuadtreeError::InvalidRectangleDims { width, height });
    }
    Ok(())
}
