use super::*;
use std::collections::hash_map;

/// Lazy region query over a [`QuadTree`].
///
/// Yields every tracked value whose footprint overlaps the region, edges
/// included, overflowed values last. Empty or disjoint branches are never
/// entered.
#[derive(Clone)]
pub struct QueryIter<'a> {
    tree: &'a QuadTree,
    region: Rectangle,
    stack: NodeStack,
    overflow: hash_map::Iter<'a, u32, Rectangle>,
}

impl<'a> Iterator for QueryIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while let Some(id) = self.stack.pop() {
            let node = &self.tree.nodes[id as usize];
            if !node.occupied_subtree
                || !collision_detection::rectangle_rectangle(&node.bounds, &self.region)
            {
                continue;
            }
            if !node.is_leaf() {
                for i in (0..4).rev() {
                    self.stack.push(node.child(i));
                }
            }
            if let Some(occupant) = node.occupant {
                if collision_detection::rectangle_rectangle(&occupant.footprint, &self.region) {
                    return Some(occupant.value);
                }
            }
        }
        let region = self.region;
        self.overflow
            .find(|(_, footprint)| collision_detection::rectangle_rectangle(footprint, &region))
            .map(|(value, _)| *value)
    }
}

impl QuadTree {
    pub fn query_region(&self, region: Rectangle) -> QueryIter<'_> {
        let mut stack = NodeStack::new();
        stack.push(ROOT);
        QueryIter {
            tree: self,
            region,
            stack,
            overflow: self.overflow.iter(),
        }
    }

    pub fn collisions(&self, region: Rectangle, collisions: &mut Vec<u32>) {
        collisions.extend(self.query_region(region));
    }

    pub fn collisions_with<F>(&self, region: Rectangle, mut f: F)
    where
        F: FnMut(u32),
    {
        for value in self.query_region(region) {
            f(value);
        }
    }
}
