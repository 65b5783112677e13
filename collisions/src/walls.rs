use crate::particle::Particle;
use common::shapes::Rectangle;
use common::vector::Vector;

/// Which velocity components were turned back by a wall this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub y: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Points the velocity back into `bounds` on every axis where the predicted
/// next position would push the particle's edge past a wall.
///
/// This is not a plain sign flip: the component is set to face inward. The
/// two agree while the particle moves toward the wall. A particle already
/// overlapping a wall and moving inward keeps its velocity, where a flip
/// would send it back out.
pub fn reflect_off_walls(particle: &mut Particle, bounds: &Rectangle) -> WallContact {
    let radius = particle.radius();
    let next_x = particle.next_x();
    let next_y = particle.next_y();
    let velocity = particle.velocity();
    let (mut dx, mut dy) = (velocity.dx(), velocity.dy());
    let mut contact = WallContact::default();

    if next_x - radius < bounds.left() {
        dx = dx.abs();
        contact.x = true;
    } else if next_x + radius > bounds.right() {
        dx = -dx.abs();
        contact.x = true;
    }

    if next_y - radius < bounds.top() {
        dy = dy.abs();
        contact.y = true;
    } else if next_y + radius > bounds.bottom() {
        dy = -dy.abs();
        contact.y = true;
    }

    if contact.any() {
        particle.set_velocity(Vector::new(dx, dy));
    }
    contact
}
