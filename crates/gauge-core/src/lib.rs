//! # gauge-core
//!
//! Core types and the scorecard validator for Gauge.
//!
//! This crate provides the foundational types shared across all Gauge crates:
//! - Entity structs owned by the entity store (users, documents, analyses, ...)
//! - The normalized [`scorecard::Scorecard`] shape and its JSON Schema
//! - The lenient-but-bounded validator every provider output passes through
//! - Tag enums (document types, activity types, provider kinds)
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod scorecard;
pub mod validate;

/// Identifier assigned by the entity store. Monotonic per entity kind.
pub type EntityId = i64;
