//! In-memory station model for the Covert traitor rule.
//!
//! The traitor rule treats identity resolution, jobs, devices, factions,
//! role attachment and chat delivery as external collaborators. This crate
//! is the reference implementation of that state: the round binary and the
//! rule's tests run against it.
//!
//! # Modules
//!
//! - [`crew`] -- Crew members and minds ([`CrewMember`], [`Mind`])
//! - [`device`] -- PDAs, headsets, uplink stores, codeword listeners
//! - [`error`] -- Error types ([`StationError`])
//! - [`station`] -- The [`Station`] aggregate and its notification log

pub mod crew;
pub mod device;
pub mod error;
pub mod station;

pub use crew::{CrewMember, Mind};
pub use device::{CodewordListener, Device, UplinkStore};
pub use error::StationError;
pub use station::{Notification, Station};
