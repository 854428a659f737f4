pub mod features;
pub mod lexicon;
pub mod normalizer;

pub use features::*;
pub use normalizer::*;
