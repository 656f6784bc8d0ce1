pub mod feedback;
pub mod rationale;
pub mod recommendations;
pub mod scoring;
pub mod seed;
pub mod selector;

pub use rationale::rationale;
pub use scoring::score;
pub use selector::select_outfits;
