use super::*;

impl QuadTree {
    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_bounds(&bounding_box)?;
        let min_size = if config.min_size > 0.0 {
            config.min_size
        } else {
            1.0
        };
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(Node::new_leaf(bounding_box, NO_NODE, 0));
        Ok(Self {
            nodes,
            free_blocks: Vec::new(),
            owner_map: FxHashMap::default(),
            overflow: FxHashMap::default(),
            max_depth: config.max_depth as u32,
            min_size,
            observer: None,
        })
    }

    pub fn new(bounding_box: Rectangle) -> QuadtreeResult<Self> {
        Self::new_with_config(bounding_box, Config::default())
    }

    // A value that is already tracked is moved as by `update`.
    pub fn insert(&mut self, value: u32, footprint: Rectangle) -> QuadtreeResult<NodeId> {
        if self.owner_map.contains_key(&value) || self.overflow.contains_key(&value) {
            return self.update(value, footprint);
        }
        self.insert_from_root(Occupant::new(value, footprint))
    }

    pub fn node_of(&self, value: u32) -> QuadtreeResult<NodeId> {
        if self.overflow.contains_key(&value) {
            return Err(QuadtreeError::Unplaceable { value });
        }
        let node = *self
            .owner_map
            .get(&value)
            .ok_or(QuadtreeError::NotIndexed { value })?;
        let holds_value = self
            .nodes
            .get(node as usize)
            .and_then(|entry| entry.occupant)
            .map_or(false, |occupant| occupant.value == value);
        if !holds_value {
            return Err(QuadtreeError::StaleHandle { value, node });
        }
        Ok(node)
    }

    // Stored in a node or parked in the overflow set.
    pub fn contains(&self, value: u32) -> bool {
        self.overflow.contains_key(&value) || self.node_of(value).is_ok()
    }

    pub fn is_overflowed(&self, value: u32) -> bool {
        self.overflow.contains_key(&value)
    }

    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    pub fn footprint_of(&self, value: u32) -> QuadtreeResult<Rectangle> {
        if let Some(footprint) = self.overflow.get(&value) {
            return Ok(*footprint);
        }
        let node = self.node_of(value)?;
        self.nodes[node as usize]
            .occupant
            .map(|occupant| occupant.footprint)
            .ok_or(QuadtreeError::NotIndexed { value })
    }

    pub fn bounds(&self) -> Rectangle {
        self.nodes[ROOT as usize].bounds
    }

    pub fn len(&self) -> usize {
        self.owner_map.len() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner_map.is_empty() && self.overflow.is_empty()
    }
}
