//! CLI command implementations.
//!
//! `render`, `run` and `create` share [`spec::SpecArgs`], which turns flags
//! and an optional spec file into a [`dockhand::ContainerSpec`].

pub mod create;
pub mod login;
pub mod pull;
pub mod render;
pub mod run;
pub mod spec;
