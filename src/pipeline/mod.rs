//! Single-shot evaluation of a full check set.

pub mod staged;

pub use staged::StagedValidator;
