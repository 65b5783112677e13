pub mod shapes;
pub mod vector;

pub use shapes::{Circle, Rectangle, Shape};
pub use vector::Vector;
