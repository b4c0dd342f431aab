//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,no_run
//! use snmposter::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Oid`], [`Value`], [`TypeTag`], [`OidStore`]
//! - Agents: [`Agent`], [`AgentRegistry`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::backend::SnmpBackend;
pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::registry::{Agent, AgentRegistry};
pub use crate::store::OidStore;
pub use crate::update::UpdateService;
pub use crate::value::{TypeTag, Value};

#[doc(no_inline)]
pub use crate::oid;
