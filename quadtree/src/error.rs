use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    InvalidRectangleDims {
        width: f32,
        height: f32,
    },
    OutOfBounds {
        value: u32,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    NotIndexed {
        value: u32,
    },
    StaleHandle {
        value: u32,
        node: u32,
    },
    Unplaceable {
        value: u32,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidRectangleDims { width, height } => {
                write!(
                    f,
                    "quadtree bounds must be finite and positive (width: {}, height: {})",
                    width, height
                )
            }
            QuadtreeError::OutOfBounds {
                value,
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                write!(
                    f,
                    "footprint of {} does not fit the target node (min_x: {}, min_y: {}, max_x: {}, max_y: {})",
                    value, min_x, min_y, max_x, max_y
                )
            }
            QuadtreeError::NotIndexed { value } => {
                write!(f, "{} is not currently indexed", value)
            }
            QuadtreeError::StaleHandle { value, node } => {
                write!(
                    f,
                    "node handle {} of {} no longer holds that value",
                    node, value
                )
            }
            QuadtreeError::Unplaceable { value } => {
                write!(
                    f,
                    "no free occupant slot between the target node and the root for {}, kept in overflow",
                    value
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
