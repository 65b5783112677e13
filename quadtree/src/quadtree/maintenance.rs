use super::*;

impl QuadTree {
    /// Moves `value` to match a new footprint.
    ///
    /// Starts from the node the value was last stored in and walks up to the
    /// nearest containing ancestor only when the footprint no longer fits.
    /// Overflowed, unknown or stale values are inserted from the root.
    pub fn update(&mut self, value: u32, footprint: Rectangle) -> QuadtreeResult<NodeId> {
        let occupant = Occupant::new(value, footprint);
        if self.overflow.remove(&value).is_some() {
            return self.insert_from_root(occupant);
        }
        let node = match self.node_of(value) {
            Ok(node) => node,
            Err(QuadtreeError::StaleHandle { node, .. }) => {
                self.emit(TraceEvent::StaleHandle { value, node });
                self.owner_map.remove(&value);
                return self.insert_from_root(occupant);
            }
            Err(_) => return self.insert_from_root(occupant),
        };

        self.clear_down(node);
        match self.insert_at(node, occupant) {
            Err(QuadtreeError::OutOfBounds { .. }) => {}
            Err(err) => {
                self.prune_upward(node);
                return Err(err);
            }
            placed => return placed,
        }

        let mut candidate = Some(self.prune_upward(node));
        while let Some(id) = candidate {
            if self.node_contains(id, &footprint) {
                self.emit(TraceEvent::Relocated {
                    value,
                    from: node,
                    to: id,
                });
                return self.insert_descend(id, occupant);
            }
            candidate = self.nodes[id as usize].parent();
        }

        self.emit(TraceEvent::RootFallback { value });
        self.insert_from_root(occupant)
    }

    /// Removes `value` and prunes every subtree left empty by it. Returns
    /// whether the value was tracked.
    pub fn delete(&mut self, value: u32) -> bool {
        if self.overflow.remove(&value).is_some() {
            return true;
        }
        let node = match self.node_of(value) {
            Ok(node) => node,
            Err(QuadtreeError::StaleHandle { node, .. }) => {
                self.emit(TraceEvent::StaleHandle { value, node });
                self.owner_map.remove(&value);
                return false;
            }
            Err(_) => return false,
        };
        self.nodes[node as usize].occupant = None;
        self.owner_map.remove(&value);
        self.emit(TraceEvent::Removed { value, node });
        self.prune_upward(node);
        true
    }

    pub(super) fn insert_from_root(&mut self, occupant: Occupant) -> QuadtreeResult<NodeId> {
        let result = self.insert_at(ROOT, occupant);
        if let Err(QuadtreeError::OutOfBounds { .. }) = result {
            self.emit(TraceEvent::OutOfBounds {
                value: occupant.value,
            });
        }
        result
    }

    // Keeps subdivisions when something still lives below.
    fn clear_down(&mut self, node: NodeId) {
        if let Some(occupant) = self.nodes[node as usize].occupant.take() {
            self.owner_map.remove(&occupant.value);
            self.emit(TraceEvent::Removed {
                value: occupant.value,
                node,
            });
        }
        if !self.children_occupied(node) {
            if !self.nodes[node as usize].is_leaf() {
                self.release_children(node);
                self.emit(TraceEvent::Pruned { node });
            }
            self.nodes[node as usize].occupied_subtree = false;
        }
    }

    // Returns the first node that still holds something, or the root.
    fn prune_upward(&mut self, node: NodeId) -> NodeId {
        let mut current = node;
        loop {
            let children_occupied = self.children_occupied(current);
            if !children_occupied && !self.nodes[current as usize].is_leaf() {
                self.release_children(current);
                self.emit(TraceEvent::Pruned { node: current });
            }
            let entry = &mut self.nodes[current as usize];
            let occupied = entry.occupant.is_some() || children_occupied;
            entry.occupied_subtree = occupied;
            if occupied {
                return current;
            }
            match entry.parent() {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }
}
