//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing
//! concrete implementations of the domain port traits:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **assist**: reqwest-backed hosted-model suggestion source
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no operational
//! rules.

pub mod assist;
pub mod persistence;
