use crate::error::{CollisionError, CollisionResult};
use crate::particle::Particle;
use common::vector::Vector;
use nalgebra::{UnitComplex, Vector2};

#[inline]
pub fn elastic_1d(v1: f32, v2: f32, m1: f32, m2: f32) -> (f32, f32) {
    let total = m1 + m2;
    (
        (v1 * (m1 - m2) + 2.0 * m2 * v2) / total,
        (v2 * (m2 - m1) + 2.0 * m1 * v1) / total,
    )
}

// Rotation taking the contact frame (x along the normal) to world space.
fn contact_frame(a: (f32, f32), b: (f32, f32)) -> Option<UnitComplex<f32>> {
    let delta = Vector2::new(a.0 - b.0, a.1 - b.1);
    let distance = delta.norm();
    if distance == 0.0 || !distance.is_finite() {
        return None;
    }
    Some(UnitComplex::from_cos_sin_unchecked(
        delta.x / distance,
        delta.y / distance,
    ))
}

fn to_vector2(v: Vector) -> Vector2<f32> {
    Vector2::new(v.dx(), v.dy())
}

/// Resolves a collision between `a` and `b`. Both are stepped back one
/// velocity step, the normal components are exchanged elastically and each
/// particle moves from its rolled-back position with its new velocity.
///
/// Both particles are left untouched when the rolled-back centres coincide.
pub fn resolve(a: &mut Particle, b: &mut Particle) -> CollisionResult<()> {
    let (va, vb) = (a.velocity(), b.velocity());
    let prev_a = (a.x() - va.dx(), a.y() - va.dy());
    let prev_b = (b.x() - vb.dx(), b.y() - vb.dy());

    let frame = contact_frame(prev_a, prev_b).ok_or(CollisionError::DegenerateGeometry {
        x: prev_a.0,
        y: prev_a.1,
    })?;

    let local_a = frame.inverse_transform_vector(&to_vector2(va));
    let local_b = frame.inverse_transform_vector(&to_vector2(vb));
    let (normal_a, normal_b) = elastic_1d(local_a.x, local_b.x, a.mass(), b.mass());

    let new_a = frame.transform_vector(&Vector2::new(normal_a, local_a.y));
    let new_b = frame.transform_vector(&Vector2::new(normal_b, local_b.y));

    a.set_velocity(Vector::new(new_a.x, new_a.y));
    b.set_velocity(Vector::new(new_b.x, new_b.y));
    a.set_position(prev_a.0 + new_a.x, prev_a.1 + new_a.y);
    b.set_position(prev_b.0 + new_b.x, prev_b.1 + new_b.y);
    Ok(())
}
