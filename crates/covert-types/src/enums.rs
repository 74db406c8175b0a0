//! Enumeration types for the traitor rule.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Allegiance
// ---------------------------------------------------------------------------

/// One of the two mutually exclusive traitor sub-roles.
///
/// Each allegiance has its own codeword list, faction and carrier device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Allegiance {
    /// Works for the Syndicate; uplink lives on the worn PDA.
    Syndicate,
    /// Works against the station for a rival corporate interest; uplink
    /// lives on the worn headset.
    Corporate,
}

impl Allegiance {
    /// Both allegiances, in rolling order.
    pub const ALL: [Self; 2] = [Self::Syndicate, Self::Corporate];

    /// The allegiance this one is mutually exclusive with.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Syndicate => Self::Corporate,
            Self::Corporate => Self::Syndicate,
        }
    }
}

impl core::fmt::Display for Allegiance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Syndicate => write!(f, "Syndicate"),
            Self::Corporate => write!(f, "Corporate"),
        }
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// The kind of item that can host an uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CarrierKind {
    /// Personal data assistant worn in the ID slot.
    Pda,
    /// Communication headset worn on the ears.
    Headset,
}

impl core::fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pda => write!(f, "PDA"),
            Self::Headset => write!(f, "headset"),
        }
    }
}

/// Currency held by an uplink store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Currency {
    /// Syndicate uplink currency.
    Telecrystal,
    /// Corporate uplink currency.
    BluespaceCrystal,
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Telecrystal => write!(f, "Telecrystal"),
            Self::BluespaceCrystal => write!(f, "BluespaceCrystal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// A note of the chromatic scale. Unlock codes are ringtones made of notes.
///
/// [`Display`](core::fmt::Display) renders the spoken name (`Asharp`);
/// briefings substitute the `sharp` suffix with `#` when showing a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Note {
    /// A
    A,
    /// A sharp
    Asharp,
    /// B
    B,
    /// C
    C,
    /// C sharp
    Csharp,
    /// D
    D,
    /// D sharp
    Dsharp,
    /// E
    E,
    /// F
    F,
    /// F sharp
    Fsharp,
    /// G
    G,
    /// G sharp
    Gsharp,
}

impl Note {
    /// Every note, in scale order.
    pub const ALL: [Self; 12] = [
        Self::A,
        Self::Asharp,
        Self::B,
        Self::C,
        Self::Csharp,
        Self::D,
        Self::Dsharp,
        Self::E,
        Self::F,
        Self::Fsharp,
        Self::G,
        Self::Gsharp,
    ];

    /// The note's spoken name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Asharp => "Asharp",
            Self::B => "B",
            Self::C => "C",
            Self::Csharp => "Csharp",
            Self::D => "D",
            Self::Dsharp => "Dsharp",
            Self::E => "E",
            Self::F => "F",
            Self::Fsharp => "Fsharp",
            Self::G => "G",
            Self::Gsharp => "Gsharp",
        }
    }
}

impl core::fmt::Display for Note {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
