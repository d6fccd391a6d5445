//! Page layout: grid shape (`grid`) and the group flow that fills it (`flow`).

pub mod flow;
pub mod grid;
