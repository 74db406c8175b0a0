//! Traitor role assignment and provisioning for the Covert simulation.
//!
//! When the round selects a participant as an antagonist, the traitor rule
//! flips a coin for their allegiance, installs a hidden uplink on the
//! matching device, briefs them with the allegiance's codewords and moves
//! them into the allegiance's faction. Each step that can fail runs before
//! anything visible changes, so a failed assignment leaves no trace.
//!
//! # Modules
//!
//! - [`assignment`] -- The assignment sequence ([`try_assign`], [`assign`])
//! - [`briefing`] -- Briefing text composition
//! - [`codewords`] -- Codeword pool generation
//! - [`config`] -- YAML configuration ([`RulesConfig`])
//! - [`datasets`] -- Named word lists ([`DatasetCatalog`])
//! - [`error`] -- Error types
//! - [`localization`] -- String tables ([`Localizer`], [`StringTable`])
//! - [`report`] -- Round-end summary text
//! - [`roster`] -- Active rules and cohort queries ([`RuleRegistry`])
//! - [`rule`] -- Rule instances ([`TraitorRule`])
//! - [`services`] -- Collaborator traits and their [`covert_station::Station`] impls
//! - [`system`] -- Lifecycle and event handlers ([`TraitorRuleSystem`])
//! - [`uplink`] -- Uplink provisioning

pub mod assignment;
pub mod briefing;
pub mod codewords;
pub mod config;
pub mod datasets;
pub mod error;
pub mod localization;
pub mod report;
pub mod roster;
pub mod rule;
pub mod services;
pub mod system;
pub mod uplink;

pub use assignment::{Assignment, assign, roll_allegiance, try_assign};
pub use briefing::compose_briefing;
pub use codewords::generate_codewords;
pub use config::{ConfigError, LoggingConfig, RulesConfig, TraitorRuleConfig};
pub use datasets::DatasetCatalog;
pub use error::{AssignError, CatalogError, ProvisionError, SystemError};
pub use localization::{Localizer, StringTable};
pub use report::append_round_end_codewords;
pub use roster::RuleRegistry;
pub use rule::{PerVariantState, TraitorRule};
pub use services::{
    CarrierDiscovery, FactionGraph, IdentityResolver, JobLookup, Notifier, PresenceLookup,
    RoleRegistry, RoundServices, UplinkInstaller,
};
pub use system::TraitorRuleSystem;
pub use uplink::{ProvisionRequest, ProvisionedUplink, provision};
