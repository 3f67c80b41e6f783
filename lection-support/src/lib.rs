//! # Lection Support
//!
//! Text helpers shared by the lection crates: dependency chains,
//! short type names, "did you mean" hints and bean reports.

pub mod rendering;
