//! snmposter: replay captured SNMP walk dumps as simulated agents.
//!
//! A fleet of simulated devices is described by a configuration file mapping
//! walk dumps to IP addresses. Each dump is parsed into an ordered OID store;
//! each store is wrapped in an [`registry::Agent`] and registered under its
//! address. A protocol responder drives agents through the
//! [`backend::SnmpBackend`] trait, and a control API mutates live stores
//! through [`update::UpdateService`].
//!
//! # Example
//!
//! ```no_run
//! use snmposter::config;
//! use snmposter::oid::Oid;
//!
//! fn main() -> snmposter::Result<()> {
//!     let agents = config::load_config("agents.conf")?;
//!     let registry = config::build_registry(&agents)?;
//!
//!     let agent = registry.lookup("10.0.0.1".parse().unwrap())?;
//!     let uptime = agent.get(&"1.3.6.1.2.1.1.3.0".parse::<Oid>()?);
//!     println!("{uptime:?}");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod oid;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod update;
pub mod value;
pub mod walk;

pub use error::{Error, Result};
pub use oid::Oid;
pub use registry::{Agent, AgentRegistry};
pub use store::OidStore;
pub use value::{TypeTag, Value};
