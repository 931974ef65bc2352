//! Field definitions and the type tags they can declare.

mod def;
mod kind;

pub use def::{FieldDef, PLACE_KEY};
pub use kind::FieldKind;
