//! LaTeX output: escaping, cell lines, whole documents, and the hand-off to the compiler.

pub mod escape;
pub mod latex;
pub mod row;
pub mod typeset;

pub use latex::render_document;
pub use typeset::{TypesetOutcome, Typesetter};
