pub mod engine;
pub mod index;
pub mod outcome;

pub use engine::{classify, classify_reading, composite_score, score_observation};
pub use index::{index_level, pollution_index};
pub use outcome::{ObservationScore, PollutantScore, ScoreReport};
