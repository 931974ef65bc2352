//! Response types for HTTP handlers.

mod errors;
mod forms;
mod monitors;
mod templates;

pub use errors::*;
pub use forms::*;
pub use monitors::*;
pub use templates::*;
