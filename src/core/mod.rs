//! Core module - functions and their metadata
//!
//! Contains the callable model every decorator works on.

pub mod argspec;
pub mod function;
pub mod value;
pub mod wrap;
