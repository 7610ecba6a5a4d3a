//! Observation identifier: which quantity was measured,
//! on which carrier band and with which tracking code.
//!
//! Each axis is an open enumeration: values are small integer indexes
//! into a name table owned by the [Registry], so new signals can be
//! declared at runtime without touching this crate.
mod registry;

pub use registry::{AxisTable, Registry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common behavior of the three identifier axes
pub trait Axis: Copy + Eq + Ord + std::fmt::Debug {
    /// Builds axis value from its raw index
    fn from_index(index: u32) -> Self;
    /// Raw index of this value in its [AxisTable]
    fn index(&self) -> u32;
}

macro_rules! axis_value {
    ($(#[$doc:meta])* $name: ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(u32);

        impl Axis for $name {
            fn from_index(index: u32) -> Self {
                Self(index)
            }
            fn index(&self) -> u32 {
                self.0
            }
        }
    };
}

axis_value!(
    /// Kind of measurement (pseudo range, phase..)
    ObservationType
);

axis_value!(
    /// Carrier frequency band the measurement was made on
    CarrierBand
);

axis_value!(
    /// Ranging code used to track the signal
    TrackingCode
);

impl ObservationType {
    pub const UNKNOWN: Self = Self(0);
    pub const RANGE: Self = Self(1);
    pub const PHASE: Self = Self(2);
    pub const DOPPLER: Self = Self(3);
    pub const SNR: Self = Self(4);
    pub const SSI: Self = Self(5);
    pub const LLI: Self = Self(6);
    pub const TRACK_LENGTH: Self = Self(7);
}

impl CarrierBand {
    pub const UNKNOWN: Self = Self(0);
    pub const L1: Self = Self(1);
    pub const L2: Self = Self(2);
    pub const L5: Self = Self(3);
    pub const L1L2: Self = Self(4);
    pub const G1: Self = Self(5);
    pub const G2: Self = Self(6);
    pub const E5B: Self = Self(7);
    pub const E5AB: Self = Self(8);
    pub const E6: Self = Self(9);
}

impl TrackingCode {
    pub const UNKNOWN: Self = Self(0);
    pub const CA: Self = Self(1);
    pub const P: Self = Self(2);
    pub const Y: Self = Self(3);
    pub const W: Self = Self(4);
    pub const N: Self = Self(5);
    pub const M: Self = Self(6);
    pub const C2M: Self = Self(7);
    pub const C2L: Self = Self(8);
    pub const C2LM: Self = Self(9);
    pub const I5: Self = Self(10);
    pub const Q5: Self = Self(11);
    pub const IQ5: Self = Self(12);
    pub const A: Self = Self(13);
    pub const B: Self = Self(14);
    pub const C: Self = Self(15);
    pub const BC: Self = Self(16);
    pub const ABC: Self = Self(17);
    /// Semi-codeless tracking
    pub const SEMI_CODELESS: Self = Self(18);
}

/// [ObsID] identifies one measured quantity.
/// Two identifiers are equal when all three axes are equal.
/// They sort by carrier band, then tracking code, then observation type:
/// this order is arbitrary but total, so [ObsID] can key ordered maps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsID {
    /// What was measured
    pub obs_type: ObservationType,
    /// On which carrier
    pub band: CarrierBand,
    /// Using which code
    pub code: TrackingCode,
}

impl ObsID {
    /// Builds a new [ObsID]
    pub fn new(obs_type: ObservationType, band: CarrierBand, code: TrackingCode) -> Self {
        Self {
            obs_type,
            band,
            code,
        }
    }
}

impl Ord for ObsID {
    fn cmp(&self, rhs: &Self) -> std::cmp::Ordering {
        self.band
            .cmp(&rhs.band)
            .then(self.code.cmp(&rhs.code))
            .then(self.obs_type.cmp(&rhs.obs_type))
    }
}

impl PartialOrd for ObsID {
    fn partial_cmp(&self, rhs: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}
