mod load;
mod parse;
mod progression;
mod repository;

pub use load::{load_repository, parse_repository};
pub use progression::{ProgressionStep, progression};
pub use repository::{Concept, ConceptRepository, FALLBACK_TOPIC_TITLE, GradeInfo, TopicInfo};
