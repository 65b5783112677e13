use super::*;

pub(crate) struct Node {
    pub(super) bounds: Rectangle,
    pub(super) parent: NodeId,
    /// First of four contiguous children, `NO_NODE` for a leaf.
    pub(super) children: NodeId,
    pub(super) depth: u32,
    pub(super) occupant: Option<Occupant>,
    pub(super) occupied_subtree: bool,
}

impl Node {
    #[inline(always)]
    pub(super) fn new_leaf(bounds: Rectangle, parent: NodeId, depth: u32) -> Self {
        Self {
            bounds,
            parent,
            children: NO_NODE,
            depth,
            occupant: None,
            occupied_subtree: false,
        }
    }

    #[inline(always)]
    pub(super) fn vacant() -> Self {
        Self::new_leaf(Rectangle::default(), NO_NODE, 0)
    }

    #[inline(always)]
    pub(super) fn is_leaf(&self) -> bool {
        self.children == NO_NODE
    }

    #[inline(always)]
    pub(super) fn child(&self, index: usize) -> NodeId {
        debug_assert!(!self.is_leaf());
        self.children + index as u32
    }

    #[inline(always)]
    pub(super) fn parent(&self) -> Option<NodeId> {
        if self.parent == NO_NODE {
            None
        } else {
            Some(self.parent)
        }
    }
}

/// Snapshot of one reachable node, for diagnostics and invariant checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub bounds: Rectangle,
    pub depth: u32,
    pub parent: Option<NodeId>,
    pub children: Option<[NodeId; 4]>,
    pub occupant: Option<(u32, Rectangle)>,
    pub occupied_subtree: bool,
}

impl QuadTree {
    pub(super) fn alloc_children(&mut self, node: NodeId) -> NodeId {
        let parent = &self.nodes[node as usize];
        debug_assert!(parent.is_leaf());
        let quadrants = parent.bounds.quadrants();
        let depth = parent.depth + 1;
        let first = match self.free_blocks.pop() {
            Some(first) => first,
            None => {
                let first = self.nodes.len() as NodeId;
                for _ in 0..4 {
                    self.nodes.push(Node::vacant());
                }
                first
            }
        };
        for (i, bounds) in quadrants.into_iter().enumerate() {
            self.nodes[first as usize + i] = Node::new_leaf(bounds, node, depth);
        }
        self.nodes[node as usize].children = first;
        first
    }

    // Drops the whole subtree below `node`, returning its blocks to the free list.
    pub(super) fn release_children(&mut self, node: NodeId) {
        let first = self.nodes[node as usize].children;
        if first == NO_NODE {
            return;
        }
        self.nodes[node as usize].children = NO_NODE;
        for i in 0..4 {
            let child = first + i;
            self.release_children(child);
            debug_assert!(self.nodes[child as usize].occupant.is_none());
            self.nodes[child as usize] = Node::vacant();
        }
        self.free_blocks.push(first);
    }

    #[inline(always)]
    pub(super) fn children_occupied(&self, node: NodeId) -> bool {
        let node = &self.nodes[node as usize];
        !node.is_leaf() && (0..4).any(|i| self.nodes[node.child(i) as usize].occupied_subtree)
    }

    pub(super) fn can_subdivide(&self, node: NodeId) -> bool {
        let node = &self.nodes[node as usize];
        node.depth < self.max_depth
            && node.bounds.width * 0.5 >= self.min_size
            && node.bounds.height * 0.5 >= self.min_size
    }

    pub(super) fn node_info(&self, id: NodeId) -> NodeInfo {
        let node = &self.nodes[id as usize];
        NodeInfo {
            id,
            bounds: node.bounds,
            depth: node.depth,
            parent: node.parent(),
            children: if node.is_leaf() {
                None
            } else {
                Some([node.child(0), node.child(1), node.child(2), node.child(3)])
            },
            occupant: node.occupant.map(|occupant| (occupant.value, occupant.footprint)),
            occupied_subtree: node.occupied_subtree,
        }
    }

    // Depth-first, root first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeInfo> + '_ {
        let mut stack = NodeStack::new();
        stack.push(ROOT);
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id as usize];
            if !node.is_leaf() {
                for i in (0..4).rev() {
                    stack.push(node.child(i));
                }
            }
            Some(self.node_info(id))
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_blocks.len() * 4
    }
}
