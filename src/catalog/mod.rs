pub mod notes;
pub mod pitch;

pub use notes::{Catalog, Note};
pub use pitch::{Accidental, PitchKey};
