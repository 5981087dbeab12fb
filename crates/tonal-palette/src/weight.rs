//! The eleven canonical scale weights, 50 (lightest) through 950 (darkest).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One step of a color scale.
///
/// Ordering follows the numeric value, so iterating a `BTreeMap<Weight, _>`
/// walks from the lightest to the darkest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weight {
    W50,
    W100,
    W200,
    W300,
    W400,
    W500,
    W600,
    W700,
    W800,
    W900,
    W950,
}

impl Weight {
    /// All weights in ascending order.
    pub const ALL: [Self; 11] = [
        Self::W50, Self::W100, Self::W200, Self::W300, Self::W400, Self::W500,
        Self::W600, Self::W700, Self::W800, Self::W900, Self::W950,
    ];

    /// Numeric value (50, 100, ... 950).
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::W50 => 50,
            Self::W100 => 100,
            Self::W200 => 200,
            Self::W300 => 300,
            Self::W400 => 400,
            Self::W500 => 500,
            Self::W600 => 600,
            Self::W700 => 700,
            Self::W800 => 800,
            Self::W900 => 900,
            Self::W950 => 950,
        }
    }

    /// Position in [`Weight::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a weight by its numeric value.
    #[must_use]
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.value() == value)
    }

    /// OKLCH lightness target of this step on the reference curve.
    #[must_use]
    pub const fn target_lightness(self) -> f64 {
        crate::strategy::OKLCH_CURVE[self.index()]
    }

    /// The next lighter step, staying at 50.
    #[must_use]
    pub const fn lighter(self) -> Self {
        match self.index() {
            0 => self,
            i => Self::ALL[i - 1],
        }
    }

    /// The next darker step, staying at 950.
    #[must_use]
    pub const fn darker(self) -> Self {
        let i = self.index();
        if i + 1 >= Self::ALL.len() { self } else { Self::ALL[i + 1] }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.value())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u16::deserialize(deserializer)?;
        Self::from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("{value} is not a scale weight")))
    }
}
