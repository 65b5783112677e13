use crate::elastic;
use crate::error::CollisionResult;
use crate::particle::{Particle, ParticleId};
use crate::walls::reflect_off_walls;
use common::shapes::Rectangle;
use quadtree::collision_detection;
use quadtree::quadtree::{Config, NodeId, QuadTree, QueryIter};
use quadtree::{QuadtreeError, QuadtreeResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub collisions: usize,
    pub degenerate_pairs: usize,
    pub wall_contacts: usize,
    /// Particles parked in the index overflow at the end of the tick.
    pub overflowed: usize,
    /// Particles whose footprint left the arena at the end of the tick.
    pub unindexed: usize,
}

pub fn insert(index: &mut QuadTree, id: ParticleId, particle: &Particle) -> QuadtreeResult<NodeId> {
    index.insert(id, particle.footprint())
}

pub fn update(index: &mut QuadTree, id: ParticleId, particle: &Particle) -> QuadtreeResult<NodeId> {
    index.update(id, particle.footprint())
}

pub fn delete(index: &mut QuadTree, id: ParticleId) -> bool {
    index.delete(id)
}

pub fn query_region(index: &QuadTree, region: Rectangle) -> QueryIter<'_> {
    index.query_region(region)
}

// Strays are particles the index cannot hold because their footprint is
// outside the arena. They are still collision candidates.
fn sync(
    index: &mut QuadTree,
    id: ParticleId,
    particle: &Particle,
    strays: &mut Vec<ParticleId>,
) -> QuadtreeResult<NodeId> {
    let result = update(index, id, particle);
    match &result {
        Err(QuadtreeError::OutOfBounds { .. }) => {
            if !strays.contains(&id) {
                strays.push(id);
            }
        }
        _ => strays.retain(|&stray| stray != id),
    }
    if let Err(err) = &result {
        log::trace!("particle {} not stored in a node: {}", id, err);
    }
    result
}

fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

pub fn advance_tick(particles: &mut [Particle], index: &mut QuadTree, wall_bounds: &Rectangle) {
    tick(particles, index, wall_bounds);
}

/// Advances every particle by one tick, in id order.
///
/// Each particle is reflected off the walls, re-indexed, resolved against
/// every overlapping candidate and then moved. A collision rewrites both
/// particles at once, so later particles see the new state.
pub fn tick(particles: &mut [Particle], index: &mut QuadTree, wall_bounds: &Rectangle) -> TickReport {
    if index.bounds() != *wall_bounds {
        log::debug!(
            "wall bounds {:?} differ from index bounds {:?}",
            wall_bounds,
            index.bounds()
        );
    }

    let mut report = TickReport::default();
    let mut candidates: Vec<u32> = Vec::new();
    let mut strays: Vec<ParticleId> = (0..particles.len() as ParticleId)
        .filter(|&id| !index.contains(id))
        .collect();

    for i in 0..particles.len() {
        let id = i as ParticleId;

        if reflect_off_walls(&mut particles[i], wall_bounds).any() {
            report.wall_contacts += 1;
        }
        let _ = sync(index, id, &particles[i], &mut strays);

        let footprint = particles[i].footprint();
        candidates.clear();
        index.collisions(footprint, &mut candidates);
        candidates.extend(strays.iter().copied().filter(|&stray| {
            collision_detection::rectangle_rectangle(&particles[stray as usize].footprint(), &footprint)
        }));

        for &other in &candidates {
            let j = other as usize;
            if j == i || j >= particles.len() {
                continue;
            }
            let (particle, neighbour) = pair_mut(particles, i, j);
            if !particle.collides_with(neighbour) {
                continue;
            }
            match elastic::resolve(particle, neighbour) {
                Ok(()) => {
                    report.collisions += 1;
                    let _ = sync(index, id, &particles[i], &mut strays);
                    let _ = sync(index, other, &particles[j], &mut strays);
                }
                Err(err) => {
                    report.degenerate_pairs += 1;
                    log::debug!("skipping pair ({}, {}): {}", i, j, err);
                }
            }
        }

        particles[i].advance();
        match sync(index, id, &particles[i], &mut strays) {
            Ok(_) => {}
            Err(QuadtreeError::Unplaceable { .. }) => report.overflowed += 1,
            Err(_) => report.unindexed += 1,
        }
    }

    report
}

pub fn total_kinetic_energy(particles: &[Particle]) -> f32 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

pub struct Simulation {
    arena: Rectangle,
    index: QuadTree,
    particles: Vec<Particle>,
    last_report: TickReport,
    ticks: u64,
}

impl Simulation {
    pub fn new(arena: Rectangle) -> CollisionResult<Self> {
        Self::new_with_config(arena, Config::default())
    }

    pub fn new_with_config(arena: Rectangle, config: Config) -> CollisionResult<Self> {
        Ok(Self {
            arena,
            index: QuadTree::new_with_config(arena, config)?,
            particles: Vec::new(),
            last_report: TickReport::default(),
            ticks: 0,
        })
    }

    // The particle joins even when the index cannot hold it yet.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.particles.len() as ParticleId;
        if let Err(err) = insert(&mut self.index, id, &particle) {
            log::debug!("particle {} added without an index entry: {}", id, err);
        }
        self.particles.push(particle);
        id
    }

    pub fn advance_tick(&mut self) -> TickReport {
        let report = tick(&mut self.particles, &mut self.index, &self.arena);
        self.ticks += 1;
        self.last_report = report;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "tick {}: energy {} collisions {} wall contacts {}",
                self.ticks,
                total_kinetic_energy(&self.particles),
                report.collisions,
                report.wall_contacts
            );
        }
        report
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id as usize)
    }

    pub fn index(&self) -> &QuadTree {
        &self.index
    }

    pub fn arena(&self) -> Rectangle {
        self.arena
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        total_kinetic_energy(&self.particles)
    }
}
