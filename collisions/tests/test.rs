use collisions::elastic::resolve;
use collisions::simulation::{self, tick};
use collisions::walls::reflect_off_walls;
use collisions::*;
use common::shapes::Rectangle;
use proptest::prelude::*;
use quadtree::collision_detection::{rectangle_contains_rectangle, rectangle_rectangle};
use quadtree::quadtree::QuadTree;
use rand::prelude::*;
use rand::Rng;

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

fn energy(a: &Particle, b: &Particle) -> f32 {
    a.kinetic_energy() + b.kinetic_energy()
}

#[test]
fn head_on_collision_conserves_energy() {
    // Masses 100 and 400.
    let mut a = Particle::new(100.0, 100.0, 4.0, 0.0, 10.0);
    let mut b = Particle::new(128.0, 100.0, -2.0, 0.0, 20.0);
    assert!(a.collides_with(&b));
    let before = energy(&a, &b);
    assert_close(before, 1600.0, 1e-3);

    resolve(&mut a, &mut b).unwrap();

    assert_close(a.velocity().dx(), -5.6, 1e-4);
    assert_close(b.velocity().dx(), 0.4, 1e-4);
    assert_close(a.velocity().dy(), 0.0, 1e-4);
    assert_close(b.velocity().dy(), 0.0, 1e-4);
    assert_close(energy(&a, &b), before, before * 1e-3);
    // Rolled back one step, then moved with the new velocity.
    assert_close(a.x(), 96.0 - 5.6, 1e-4);
    assert_close(b.x(), 130.0 + 0.4, 1e-4);
}

#[test]
fn tangential_component_survives() {
    let mut a = Particle::new(51.0, 53.0, 1.0, 3.0, 10.0);
    let mut b = Particle::new(59.0, 48.0, -1.0, -2.0, 10.0);

    resolve(&mut a, &mut b).unwrap();

    assert_close(a.velocity().dx(), -1.0, 1e-5);
    assert_close(a.velocity().dy(), 3.0, 1e-5);
    assert_close(b.velocity().dx(), 1.0, 1e-5);
    assert_close(b.velocity().dy(), -2.0, 1e-5);
    assert_close(a.x(), 49.0, 1e-4);
    assert_close(a.y(), 53.0, 1e-4);
}

#[test]
fn coincident_centres_leave_particles_untouched() {
    let mut a = Particle::new(50.0, 50.0, 1.0, 0.0, 5.0);
    let mut b = Particle::new(51.0, 50.0, 2.0, 0.0, 5.0);
    let (before_a, before_b) = (a, b);

    let err = resolve(&mut a, &mut b).unwrap_err();
    assert!(matches!(err, CollisionError::DegenerateGeometry { .. }));
    assert_eq!(a, before_a);
    assert_eq!(b, before_b);
}

#[test]
fn degenerate_pair_is_counted_and_skipped() {
    let arena = Rectangle::new(0.0, 0.0, 200.0, 200.0);
    let mut index = QuadTree::new(arena).unwrap();
    // Stepping the mover back lands it on the resting particle's centre,
    // whichever of the two is being processed.
    let mut particles = vec![
        Particle::new(50.0, 50.0, 0.0, 0.0, 5.0),
        Particle::new(51.0, 51.0, 1.0, 1.0, 5.0),
    ];
    for (id, particle) in particles.iter().enumerate() {
        simulation::insert(&mut index, id as ParticleId, particle).unwrap();
    }

    let report = tick(&mut particles, &mut index, &arena);

    assert_eq!(report.collisions, 0);
    assert_eq!(report.degenerate_pairs, 2);
    assert_eq!((particles[0].x(), particles[0].y()), (50.0, 50.0));
    assert_eq!((particles[1].x(), particles[1].y()), (52.0, 52.0));
    assert_eq!(particles[1].velocity().dx(), 1.0);
}

#[test]
fn invalid_particles_are_rejected() {
    let err = Particle::try_new(10.0, 10.0, 0.0, 0.0, -1.0).unwrap_err();
    assert_eq!(
        err,
        CollisionError::InvalidParticle {
            x: 10.0,
            y: 10.0,
            radius: -1.0
        }
    );
    assert!(Particle::try_new(f32::INFINITY, 0.0, 0.0, 0.0, 1.0).is_err());
}

#[test]
fn wall_reflection_keeps_centre_inside() {
    let arena = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut index = QuadTree::new(arena).unwrap();
    let mut particles = vec![Particle::new(5.0, 50.0, -3.0, 0.0, 10.0)];

    let report = tick(&mut particles, &mut index, &arena);

    assert_eq!(report.wall_contacts, 1);
    assert_eq!(particles[0].velocity().dx(), 3.0);
    assert_eq!(particles[0].x(), 8.0);
    assert!(arena.contains_point(particles[0].x(), particles[0].y()));
}

#[test]
fn corner_reflects_both_axes() {
    let arena = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut p = Particle::new(97.0, 2.0, 2.0, -2.0, 2.0);
    let contact = reflect_off_walls(&mut p, &arena);
    assert!(contact.x && contact.y);
    assert_eq!((p.velocity().dx(), p.velocity().dy()), (-2.0, 2.0));
}

fn run_two_particles(arena: Rectangle) -> Vec<Particle> {
    let mut sim = Simulation::new(arena).unwrap();
    sim.add_particle(Particle::new(380.0, 150.0, 4.0, 0.0, 20.0));
    sim.add_particle(Particle::new(20.0, 20.0, 1.0, 1.0, 20.0));
    for _ in 0..10 {
        let report = sim.advance_tick();
        assert_eq!(report.collisions, 0);
    }
    assert_eq!(sim.ticks(), 10);
    sim.particles().to_vec()
}

#[test]
fn distant_particles_move_in_straight_lines() {
    let particles = run_two_particles(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
    assert_eq!((particles[0].x(), particles[0].y()), (420.0, 150.0));
    assert_eq!((particles[1].x(), particles[1].y()), (30.0, 30.0));
}

#[test]
fn particle_touching_the_right_wall_turns_back() {
    // A starts flush against the right wall of a 400 wide arena.
    let particles = run_two_particles(Rectangle::new(0.0, 0.0, 400.0, 300.0));
    assert_eq!(particles[0].velocity().dx(), -4.0);
    assert_eq!((particles[0].x(), particles[0].y()), (340.0, 150.0));
    assert_eq!((particles[1].x(), particles[1].y()), (30.0, 30.0));
}

#[test]
fn approaching_particles_bounce_apart() {
    let mut sim = Simulation::new(Rectangle::new(0.0, 0.0, 400.0, 300.0)).unwrap();
    let a = sim.add_particle(Particle::new(100.0, 100.0, 2.0, 0.0, 10.0));
    let b = sim.add_particle(Particle::new(125.0, 100.0, -2.0, 0.0, 10.0));
    let before = sim.total_kinetic_energy();

    let mut collisions = 0;
    for _ in 0..5 {
        collisions += sim.advance_tick().collisions;
    }

    assert_eq!(collisions, 1);
    let (pa, pb) = (sim.particle(a).unwrap(), sim.particle(b).unwrap());
    assert_close(pa.velocity().dx(), -2.0, 1e-5);
    assert_close(pb.velocity().dx(), 2.0, 1e-5);
    assert!(pb.x() - pa.x() > 20.0);
    assert_close(sim.total_kinetic_energy(), before, before * 1e-3);
}

#[test]
fn index_wrappers_track_particles() {
    let arena = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut index = QuadTree::new(arena).unwrap();
    let mut p = Particle::new(20.0, 20.0, 0.0, 0.0, 5.0);
    simulation::insert(&mut index, 7, &p).unwrap();

    p.set_position(70.0, 70.0);
    simulation::update(&mut index, 7, &p).unwrap();
    let near: Vec<u32> =
        simulation::query_region(&index, Rectangle::new(60.0, 60.0, 10.0, 10.0)).collect();
    assert_eq!(near, vec![7]);
    assert_eq!(
        simulation::query_region(&index, Rectangle::new(10.0, 10.0, 10.0, 10.0)).count(),
        0
    );

    assert!(simulation::delete(&mut index, 7));
    assert!(!simulation::delete(&mut index, 7));
    assert!(index.is_empty());
}

#[test]
fn mismatched_arena_still_ticks() {
    let mut index = QuadTree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    let walls = Rectangle::new(0.0, 0.0, 50.0, 50.0);
    let mut particles = vec![Particle::new(45.0, 25.0, 3.0, 0.0, 4.0)];
    tick(&mut particles, &mut index, &walls);
    assert_eq!(particles[0].velocity().dx(), -3.0);
}

#[test]
fn long_run_keeps_index_and_energy_consistent() {
    let arena = Rectangle::new(0.0, 0.0, 1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(11);
    let mut sim = Simulation::new(arena).unwrap();
    for _ in 0..150 {
        let radius = rng.gen_range(3.0..6.0);
        let (x, y) = arena.get_random_circle_coords_inside(radius, &mut rng);
        sim.add_particle(Particle::new(
            x,
            y,
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            radius,
        ));
    }
    let before = sim.total_kinetic_energy();

    for _ in 0..100 {
        sim.advance_tick();
    }

    for particle in sim.particles() {
        assert!(particle.x().is_finite() && particle.y().is_finite());
    }
    assert_every_particle_tracked(&sim);
    assert_close(sim.total_kinetic_energy(), before, before * 1e-2);
}

// Every particle inside the arena is tracked by the index with its current
// footprint; the rest are outside the arena.
fn assert_every_particle_tracked(sim: &Simulation) {
    let index = sim.index();
    let mut tracked = 0;
    for (id, particle) in sim.particles().iter().enumerate() {
        let id = id as ParticleId;
        let inside = rectangle_contains_rectangle(&sim.arena(), &particle.footprint());
        assert_eq!(index.contains(id), inside, "particle {}", id);
        if inside {
            assert_eq!(index.footprint_of(id), Ok(particle.footprint()));
            tracked += 1;
        }
    }
    assert_eq!(tracked, index.len());
}

#[test]
fn overflowed_particles_still_collide() {
    let mut sim = Simulation::new(Rectangle::new(0.0, 0.0, 400.0, 300.0)).unwrap();
    // Resting particles on the root and NW centre lines take both slots.
    sim.add_particle(Particle::new(200.0, 150.0, 0.0, 0.0, 1.0));
    sim.add_particle(Particle::new(100.0, 75.0, 0.0, 0.0, 1.0));
    let b = sim.add_particle(Particle::new(100.0, 30.0, 0.0, 3.0, 8.0));
    let c = sim.add_particle(Particle::new(100.0, 55.0, 0.0, -3.0, 8.0));
    assert!(sim.index().is_overflowed(b));
    assert!(sim.index().is_overflowed(c));

    let mut collisions = 0;
    for _ in 0..3 {
        let report = sim.advance_tick();
        assert_eq!(report.overflowed, 2);
        assert_eq!(report.unindexed, 0);
        collisions += report.collisions;
    }

    assert_eq!(collisions, 1);
    let (pb, pc) = (sim.particle(b).unwrap(), sim.particle(c).unwrap());
    assert_close(pb.velocity().dy(), -3.0, 1e-5);
    assert_close(pc.velocity().dy(), 3.0, 1e-5);
    assert!(!pb.collides_with(pc));
    assert_every_particle_tracked(&sim);
}

#[test]
fn particles_outside_the_arena_still_collide() {
    let arena = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let mut index = QuadTree::new(arena).unwrap();
    let mut particles = vec![
        Particle::new(3.0, 50.0, 0.0, 1.0, 5.0),
        Particle::new(3.0, 58.0, 0.0, -1.0, 5.0),
    ];

    let report = tick(&mut particles, &mut index, &arena);

    assert_eq!(report.collisions, 1);
    assert_eq!(report.unindexed, 2);
    assert_close(particles[0].velocity().dy(), -1.0, 1e-5);
    assert_close(particles[1].velocity().dy(), 1.0, 1e-5);
}

#[test]
fn crowded_arena_keeps_every_overlap_visible() {
    let arena = Rectangle::new(0.0, 0.0, 400.0, 300.0);
    let mut rng = StdRng::seed_from_u64(5);
    let mut sim = Simulation::new(arena).unwrap();
    for _ in 0..120 {
        let radius = rng.gen_range(3.0..8.0);
        let (x, y) = arena.get_random_circle_coords_inside(radius, &mut rng);
        sim.add_particle(Particle::new(
            x,
            y,
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            radius,
        ));
    }

    for _ in 0..60 {
        sim.advance_tick();
        assert_every_particle_tracked(&sim);

        let particles = sim.particles();
        for (i, a) in particles.iter().enumerate() {
            if !sim.index().contains(i as ParticleId) {
                continue;
            }
            let near: Vec<u32> = simulation::query_region(sim.index(), a.footprint()).collect();
            for (j, b) in particles.iter().enumerate() {
                let overlapping = rectangle_rectangle(&a.footprint(), &b.footprint());
                if overlapping && sim.index().contains(j as ParticleId) {
                    assert!(near.contains(&(j as u32)), "{} cannot see {}", i, j);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn isolated_collision_conserves_energy_and_momentum(
        ra in 1.0f32..20.0,
        rb in 1.0f32..20.0,
        va in (-5.0f32..5.0, -5.0f32..5.0),
        vb in (-5.0f32..5.0, -5.0f32..5.0),
        angle in 0.0f32..std::f32::consts::TAU,
        spread in 0.2f32..1.0,
    ) {
        let distance = (ra + rb) * spread;
        let mut a = Particle::new(va.0, va.1, va.0, va.1, ra);
        let mut b = Particle::new(
            distance * angle.cos() + vb.0,
            distance * angle.sin() + vb.1,
            vb.0,
            vb.1,
            rb,
        );
        let energy_before = energy(&a, &b);
        let momentum_before = (
            a.mass() * va.0 + b.mass() * vb.0,
            a.mass() * va.1 + b.mass() * vb.1,
        );

        resolve(&mut a, &mut b).unwrap();

        let energy_after = energy(&a, &b);
        prop_assert!((energy_after - energy_before).abs() <= energy_before * 1e-3 + 1e-3);

        let scale = a.mass() * 8.0 + b.mass() * 8.0;
        let momentum_after = (
            a.mass() * a.velocity().dx() + b.mass() * b.velocity().dx(),
            a.mass() * a.velocity().dy() + b.mass() * b.velocity().dy(),
        );
        prop_assert!((momentum_after.0 - momentum_before.0).abs() <= scale * 1e-4);
        prop_assert!((momentum_after.1 - momentum_before.1).abs() <= scale * 1e-4);
    }
}
