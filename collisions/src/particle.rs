use crate::error::{CollisionError, CollisionResult};
use common::shapes::{Circle, Rectangle, Shape};
use common::vector::Vector;
use quadtree::collision_detection;

/// Stable particle identity: the particle's position in the population.
pub type ParticleId = u32;

/// Circular particle moving one velocity step per tick. Mass is `radius²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    x: f32,
    y: f32,
    velocity: Vector,
    radius: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Self {
            x,
            y,
            velocity: Vector::new(dx, dy),
            radius,
        }
    }

    pub fn try_new(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> CollisionResult<Self> {
        let finite = [x, y, dx, dy, radius].iter().all(|v| v.is_finite());
        if !finite || radius <= 0.0 {
            return Err(CollisionError::InvalidParticle { x, y, radius });
        }
        Ok(Self::new(x, y, dx, dy, radius))
    }

    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline(always)]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline(always)]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[inline(always)]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    #[inline(always)]
    pub fn next_x(&self) -> f32 {
        self.x + self.velocity.dx()
    }

    #[inline(always)]
    pub fn next_y(&self) -> f32 {
        self.y + self.velocity.dy()
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    pub fn advance(&mut self) {
        self.x = self.next_x();
        self.y = self.next_y();
    }

    pub fn collides_with(&self, other: &Particle) -> bool {
        collision_detection::circle_circle(&self.circle(), &other.circle())
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }

    pub fn footprint(&self) -> Rectangle {
        self.circle().bounding_box()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass() * self.velocity.magnitude_sq()
    }
}

impl Shape for Particle {
    fn bounding_box(&self) -> Rectangle {
        self.footprint()
    }
}
