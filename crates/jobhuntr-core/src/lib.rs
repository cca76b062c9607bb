//! # jobhuntr-core
//!
//! Core types, ID prefixes, request validation, and error types for jobhuntr.
//!
//! This crate provides the foundational types shared across all jobhuntr crates:
//! - Entity structs for the opportunity aggregate and its referenced documents
//! - The `DocumentRef` tagged reference and the `DocumentType` enum
//! - ID prefix constants
//! - Request types with required-field validation
//! - List and confirmation response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod requests;
pub mod responses;
