use super::*;

impl QuadTree {
    // Fails with `OutOfBounds`, leaving the tree untouched, when the footprint
    // does not fit inside `start`.
    pub(super) fn insert_at(&mut self, start: NodeId, occupant: Occupant) -> QuadtreeResult<NodeId> {
        if !self.node_contains(start, &occupant.footprint) {
            return Err(out_of_bounds(&occupant));
        }
        self.insert_descend(start, occupant)
    }

    // `start` must already contain the footprint.
    pub(super) fn insert_descend(
        &mut self,
        start: NodeId,
        occupant: Occupant,
    ) -> QuadtreeResult<NodeId> {
        let mut node = start;
        loop {
            if self.nodes[node as usize].is_leaf() {
                if self.nodes[node as usize].occupant.is_none() {
                    return Ok(self.place(node, occupant));
                }
                if !self.can_subdivide(node) {
                    return self.place_climbing(node, occupant);
                }
                self.subdivide(node);
            }
            match self.child_containing(node, &occupant.footprint) {
                Some(child) => node = child,
                None => return self.place_climbing(node, occupant),
            }
        }
    }

    fn subdivide(&mut self, node: NodeId) {
        self.alloc_children(node);
        let depth = self.nodes[node as usize].depth + 1;
        self.emit(TraceEvent::Subdivided { node, depth });

        // An occupant that straddles the new quadrant lines stays put.
        if let Some(existing) = self.nodes[node as usize].occupant {
            if let Some(child) = self.child_containing(node, &existing.footprint) {
                self.nodes[node as usize].occupant = None;
                self.place(child, existing);
            }
        }
    }

    // First child, in NW, NE, SW, SE order, that fully contains `footprint`.
    fn child_containing(&self, node: NodeId, footprint: &Rectangle) -> Option<NodeId> {
        let node = &self.nodes[node as usize];
        if node.is_leaf() {
            return None;
        }
        (0..4)
            .map(|i| node.child(i))
            .find(|&child| self.node_contains(child, footprint))
    }

    fn place_climbing(&mut self, node: NodeId, occupant: Occupant) -> QuadtreeResult<NodeId> {
        let mut target = node;
        while self.nodes[target as usize].occupant.is_some() {
            match self.nodes[target as usize].parent() {
                Some(parent) => target = parent,
                None => {
                    self.overflow.insert(occupant.value, occupant.footprint);
                    self.emit(TraceEvent::Unplaceable {
                        value: occupant.value,
                    });
                    return Err(QuadtreeError::Unplaceable {
                        value: occupant.value,
                    });
                }
            }
        }
        if target != node {
            self.emit(TraceEvent::Climbed {
                value: occupant.value,
                from: node,
                to: target,
            });
        }
        if !self.nodes[target as usize].is_leaf() && !self.children_occupied(target) {
            self.release_children(target);
            self.emit(TraceEvent::Pruned { node: target });
        }
        Ok(self.place(target, occupant))
    }

    pub(super) fn place(&mut self, node: NodeId, occupant: Occupant) -> NodeId {
        debug_assert!(self.nodes[node as usize].occupant.is_none());
        self.nodes[node as usize].occupant = Some(occupant);
        self.owner_map.insert(occupant.value, node);
        self.mark_occupied_upward(node);
        self.emit(TraceEvent::Placed {
            value: occupant.value,
            node,
        });
        node
    }

    fn mark_occupied_upward(&mut self, node: NodeId) {
        self.nodes[node as usize].occupied_subtree = true;
        let mut current = self.nodes[node as usize].parent();
        while let Some(id) = current {
            let ancestor = &mut self.nodes[id as usize];
            if ancestor.occupied_subtree {
                break;
            }
            ancestor.occupied_subtree = true;
            current = ancestor.parent();
        }
    }

    #[inline(always)]
    pub(super) fn node_contains(&self, node: NodeId, footprint: &Rectangle) -> bool {
        collision_detection::rectangle_contains_rectangle(
            &self.nodes[node as usize].bounds,
            footprint,
        )
    }
}

pub(super) fn out_of_bounds(occupant: &Occupant) -> QuadtreeError {
    QuadtreeError::OutOfBounds {
        value: occupant.value,
        min_x: occupant.footprint.left(),
        min_y: occupant.footprint.top(),
        max_x: occupant.footprint.right(),
        max_y: occupant.footprint.bottom(),
    }
}
