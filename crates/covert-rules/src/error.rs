//! Error types for the traitor rule.
//!
//! Every failure of an assignment is typed here, even though the public
//! event handlers fold them into a single `bool`: the typed form is what
//! gets logged and what tests assert on.

use covert_types::{CarrierKind, DeviceId, EntityId, MindId, RuleId};

/// Why an uplink could not be provisioned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    /// The participant wears no device the allegiance can use.
    #[error("no {kind} carrier found on entity {entity}")]
    NoCarrierFound {
        /// The participant.
        entity: EntityId,
        /// The device kind that was searched for.
        kind: CarrierKind,
    },

    /// The device refused the uplink.
    #[error("uplink provisioning failed on device {device} for entity {entity}: {reason}")]
    ProvisionFailed {
        /// The participant.
        entity: EntityId,
        /// The carrier device.
        device: DeviceId,
        /// What was rejected.
        reason: &'static str,
    },
}

/// Why a traitor assignment was aborted. No state changes on any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// The participant has no persistent identity.
    #[error("entity {0} has no mind")]
    NoIdentity(EntityId),

    /// The mind is already a traitor under this rule.
    #[error("mind {mind} is already assigned under rule {rule}")]
    AlreadyAssigned {
        /// The mind.
        mind: MindId,
        /// The rule instance.
        rule: RuleId,
    },

    /// See [`ProvisionError::NoCarrierFound`].
    #[error("no {kind} carrier found on entity {entity}")]
    NoCarrierFound {
        /// The participant.
        entity: EntityId,
        /// The device kind that was searched for.
        kind: CarrierKind,
    },

    /// See [`ProvisionError::ProvisionFailed`].
    #[error("uplink provisioning failed on device {device} for entity {entity}: {reason}")]
    ProvisionFailed {
        /// The participant.
        entity: EntityId,
        /// The carrier device.
        device: DeviceId,
        /// What was rejected.
        reason: &'static str,
    },
}

impl From<ProvisionError> for AssignError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::NoCarrierFound { entity, kind } => Self::NoCarrierFound { entity, kind },
            ProvisionError::ProvisionFailed {
                entity,
                device,
                reason,
            } => Self::ProvisionFailed {
                entity,
                device,
                reason,
            },
        }
    }
}

/// Errors loading word lists or string tables.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset catalog is not valid JSON.
    #[error("failed to parse dataset catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The string table is not valid YAML.
    #[error("failed to parse string table: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// A string table entry is not a valid template.
    #[error("invalid template for {key}: {message}")]
    Template {
        /// The string key.
        key: String,
        /// The template engine's message.
        message: String,
    },

    /// A word list referenced by configuration does not exist.
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the rule system's event handlers.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// The event targets a rule instance that is not registered.
    #[error("rule not registered: {0}")]
    UnknownRule(RuleId),

    /// Creating a rule instance failed to resolve its word lists.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provision_errors_convert_one_to_one() {
        let entity = EntityId::new();
        let err: AssignError = ProvisionError::NoCarrierFound {
            entity,
            kind: CarrierKind::Headset,
        }
        .into();
        assert_eq!(
            err,
            AssignError::NoCarrierFound {
                entity,
                kind: CarrierKind::Headset
            }
        );
    }

    #[test]
    fn error_messages_name_the_device() {
        let device = DeviceId::new();
        let err = ProvisionError::ProvisionFailed {
            entity: EntityId::new(),
            device,
            reason: "uplink rejected",
        };
        assert!(err.to_string().contains(&device.to_string()));
    }
}
