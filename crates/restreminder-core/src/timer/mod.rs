mod engine;
mod intervals;

pub use engine::{IntervalEngine, Phase};
pub use intervals::IntervalConfig;
