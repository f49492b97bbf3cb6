//! Skeleton data model and geometric editing engine for OpenPose keypoint graphs.
//!
//! This crate is renderer-agnostic. A rendering layer registers primitives through
//! [`Surface`] and reads positions, colours and visibility back as passive state.

#![forbid(unsafe_code)]

mod config;
mod error;
mod geometry;
mod ids;
mod model;
mod render;
mod runtime;

#[cfg(feature = "json")]
pub mod json;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use model::*;
pub use render::*;
pub use runtime::*;


#[cfg(test)]
mod model_tests;


#[cfg(all(test, feature = "json"))]
mod json_tests;

#[cfg(all(test, feature = "json"))]
mod config_tests;
