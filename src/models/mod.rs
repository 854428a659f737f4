pub mod features;
pub mod format;
pub mod utterance;

pub use features::*;
pub use format::*;
pub use utterance::*;
