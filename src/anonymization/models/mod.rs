//! Entity data models

pub mod entity;

pub use entity::{Entity, EntitySource, EntityType, ProcessingMode, Span};
