use quadtree::QuadtreeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionError {
    /// Two particles share a centre once their last move is undone, so no
    /// contact normal exists.
    DegenerateGeometry { x: f32, y: f32 },
    InvalidParticle { x: f32, y: f32, radius: f32 },
    Index(QuadtreeError),
}

pub type CollisionResult<T> = Result<T, CollisionError>;

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionError::DegenerateGeometry { x, y } => {
                write!(f, "particles coincide at ({}, {}), contact normal undefined", x, y)
            }
            CollisionError::InvalidParticle { x, y, radius } => {
                write!(
                    f,
                    "particle must have finite coordinates and a positive radius (x: {}, y: {}, radius: {})",
                    x, y, radius
                )
            }
            CollisionError::Index(err) => write!(f, "spatial index: {}", err),
        }
    }
}

impl std::error::Error for CollisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollisionError::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuadtreeError> for CollisionError {
    fn from(err: QuadtreeError) -> Self {
        CollisionError::Index(err)
    }
}
