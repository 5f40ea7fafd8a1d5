//! Kindred core - domain types for genealogical graphs.
//!
//! This crate holds the vocabulary shared by the resolution, generation, and
//! layout stages of the Kindred engine: interned identifiers, member records,
//! relation kinds with a single central inversion function, calendar dates,
//! data-quality warnings, and the 2D geometry primitives the layout stage
//! emits.

pub mod geometry;
pub mod identifier;
pub mod member;
pub mod relation;
pub mod warning;
