//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entities, persistent identities, devices and rule instances each get a
//! strongly-typed ID so that a mind can never be passed where an entity is
//! expected. All IDs use UUID v7 (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a live entity (a crew member's current body).
    EntityId
}

define_id! {
    /// Unique identifier for a persistent identity ("mind") that outlives
    /// the body it currently controls.
    MindId
}

define_id! {
    /// Unique identifier for an item able to carry an uplink (PDA, headset).
    DeviceId
}

define_id! {
    /// Unique identifier for an active traitor rule instance.
    RuleId
}
