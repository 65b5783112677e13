#[derive(Debug, Clone)]
pub struct Config {
    // Node slots reserved up front.
    pub pool_size: usize,
    pub max_depth: usize,
    // Smallest quadrant edge a subdivision may produce.
    pub min_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_size: 4000,
            max_depth: 16,
            min_size: 1.0,
        }
    }
}
