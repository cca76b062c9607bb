//! Entity structs for the opportunity aggregate.
//!
//! `Opportunity` owns an ordered list of `Process` entries. Each process points
//! at an independently stored `Application` or `Interview` through a
//! `DocumentRef`, and each of those documents points back at its opportunity
//! through `parent`.

mod application;
mod document;
mod interview;
mod opportunity;
mod process;

pub use application::Application;
pub use document::{Document, DocumentRef};
pub use interview::Interview;
pub use opportunity::Opportunity;
pub use process::Process;
