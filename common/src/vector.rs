/// Immutable 2D displacement.
///
/// Magnitude and angle are derived once at construction; changing a
/// velocity means building a new `Vector`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector {
    dx: f32,
    dy: f32,
    magnitude: f32,
    angle: f32,
}

impl Vector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            magnitude: (dx * dx + dy * dy).sqrt(),
            angle: dy.atan2(dx),
        }
    }

    #[inline(always)]
    pub fn dx(&self) -> f32 {
        self.dx
    }

    #[inline(always)]
    pub fn dy(&self) -> f32 {
        self.dy
    }

    #[inline(always)]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    #[inline(always)]
    pub fn magnitude_sq(&self) -> f32 {
        self.dx * self.dx + self.dy * self.dy
    }

    /// Direction in radians, `atan2(dy, dx)`.
    #[inline(always)]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn with_dx(&self, dx: f32) -> Self {
        Self::new(dx, self.dy)
    }

    pub fn with_dy(&self, dy: f32) -> Self {
        Self::new(self.dx, dy)
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f32, f32)> for Vector {
    fn from((dx, dy): (f32, f32)) -> Self {
        Self::new(dx, dy)
    }
}
