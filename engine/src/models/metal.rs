//! Metal model
//!
//! Canonical metal types, the two-format metal key used to index variant
//! prices, and the physical reference data used for cast-metal cost.
//!
//! Legacy data stores variant prices under two key serializations:
//! - **space form**: `"Yellow Gold 14K"` (task-level pricing maps)
//! - **underscore form**: `"yellow_gold_14k"` (process-level pricing)
//!
//! Both describe the same logical key.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metal family, used for price lookup and purity adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalFamily {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

/// Canonical metal types known to the alias table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    YellowGold,
    WhiteGold,
    RoseGold,
    SterlingSilver,
    Platinum,
    Palladium,
}

impl MetalType {
    /// All canonical metal types
    pub const ALL: [MetalType; 6] = [
        MetalType::YellowGold,
        MetalType::WhiteGold,
        MetalType::RoseGold,
        MetalType::SterlingSilver,
        MetalType::Platinum,
        MetalType::Palladium,
    ];

    /// Display name used in the space-form key
    pub fn display_name(&self) -> &'static str {
        match self {
            MetalType::YellowGold => "Yellow Gold",
            MetalType::WhiteGold => "White Gold",
            MetalType::RoseGold => "Rose Gold",
            MetalType::SterlingSilver => "Sterling Silver",
            MetalType::Platinum => "Platinum",
            MetalType::Palladium => "Palladium",
        }
    }

    /// Metal family of this type
    pub fn family(&self) -> MetalFamily {
        match self {
            MetalType::YellowGold | MetalType::WhiteGold | MetalType::RoseGold => {
                MetalFamily::Gold
            }
            MetalType::SterlingSilver => MetalFamily::Silver,
            MetalType::Platinum => MetalFamily::Platinum,
            MetalType::Palladium => MetalFamily::Palladium,
        }
    }

    /// Look up a free-text alias
    ///
    /// Matching ignores case and treats `-`, `_` and whitespace alike.
    ///
    /// # Example
    /// ```
    /// use repair_pricing_core_rs::MetalType;
    ///
    /// assert_eq!(MetalType::from_alias("yellow-gold"), Some(MetalType::YellowGold));
    /// assert_eq!(MetalType::from_alias("Sterling_Silver"), Some(MetalType::SterlingSilver));
    /// assert_eq!(MetalType::from_alias("titanium"), None);
    /// ```
    pub fn from_alias(alias: &str) -> Option<MetalType> {
        let folded = fold_alias(alias);
        let metal = match folded.as_str() {
            "yellow gold" | "gold" | "yg" => MetalType::YellowGold,
            "white gold" | "wg" => MetalType::WhiteGold,
            "rose gold" | "pink gold" | "rg" => MetalType::RoseGold,
            "sterling silver" | "silver" | "sterling" | "ss" => MetalType::SterlingSilver,
            "platinum" | "plat" | "pt" => MetalType::Platinum,
            "palladium" | "pd" => MetalType::Palladium,
            _ => return None,
        };
        Some(metal)
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lower-case and collapse separators to single spaces
fn fold_alias(alias: &str) -> String {
    alias
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical (metal, karat) pair identifying a price bucket
///
/// Built by [`crate::pricing::metal_key::resolve`]. `metal` is the canonical
/// display name when the alias was recognized, otherwise the caller's text
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetalKey {
    metal: String,
    karat: String,
    metal_type: Option<MetalType>,
}

impl MetalKey {
    /// Create a key from already-normalized parts
    pub fn new(
        metal: impl Into<String>,
        karat: impl Into<String>,
        metal_type: Option<MetalType>,
    ) -> Self {
        Self {
            metal: metal.into(),
            karat: karat.into(),
            metal_type,
        }
    }

    /// Metal display name (or pass-through text)
    pub fn metal(&self) -> &str {
        &self.metal
    }

    /// Normalized karat/purity, upper-case (e.g. `"14K"`, `"925"`)
    pub fn karat(&self) -> &str {
        &self.karat
    }

    /// Canonical metal type, if the alias was recognized
    pub fn metal_type(&self) -> Option<MetalType> {
        self.metal_type
    }

    /// Metal family, if the alias was recognized
    pub fn family(&self) -> Option<MetalFamily> {
        self.metal_type.map(|t| t.family())
    }

    /// Space-separated display form, e.g. `"Yellow Gold 14K"`
    pub fn space_form(&self) -> String {
        format!("{} {}", self.metal, self.karat.to_uppercase())
    }

    /// Underscore-separated storage form, e.g. `"yellow_gold_14k"`
    pub fn underscore_form(&self) -> String {
        let metal = self
            .metal
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        format!("{}_{}", metal, self.karat).to_lowercase()
    }
}

impl fmt::Display for MetalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.space_form())
    }
}

/// Physical reference data for a cast metal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalSpec {
    /// Metal family, drives the purity adjustment
    pub family: MetalFamily,

    /// Weight ratio of cast metal to wax for the same volume
    pub specific_gravity: Decimal,

    /// Karats (gold only)
    #[serde(default)]
    pub karats: Option<u32>,

    /// Fineness as a fraction, e.g. 0.925 (silver only)
    #[serde(default)]
    pub purity: Option<Decimal>,
}

impl MetalSpec {
    /// Reference spec for a canonical metal type and normalized karat
    ///
    /// Returns `None` for combinations without reference data.
    ///
    /// # Example
    /// ```
    /// use repair_pricing_core_rs::{MetalSpec, MetalType};
    /// use rust_decimal_macros::dec;
    ///
    /// let spec = MetalSpec::standard(MetalType::YellowGold, "14K").unwrap();
    /// assert_eq!(spec.specific_gravity, dec!(13.07));
    /// assert_eq!(spec.karats, Some(14));
    /// ```
    pub fn standard(metal_type: MetalType, karat: &str) -> Option<MetalSpec> {
        let karat = karat.to_uppercase();
        match metal_type.family() {
            MetalFamily::Gold => {
                let (karats, specific_gravity) = match karat.as_str() {
                    "10K" => (10, dec!(11.57)),
                    "14K" => (14, dec!(13.07)),
                    "18K" => (18, dec!(15.58)),
                    "22K" => (22, dec!(17.86)),
                    "24K" => (24, dec!(19.32)),
                    _ => return None,
                };
                Some(MetalSpec {
                    family: MetalFamily::Gold,
                    specific_gravity,
                    karats: Some(karats),
                    purity: None,
                })
            }
            MetalFamily::Silver => {
                let (purity, specific_gravity) = match karat.as_str() {
                    "925" => (dec!(0.925), dec!(10.36)),
                    "999" => (dec!(0.999), dec!(10.49)),
                    _ => return None,
                };
                Some(MetalSpec {
                    family: MetalFamily::Silver,
                    specific_gravity,
                    karats: None,
                    purity: Some(purity),
                })
            }
            MetalFamily::Platinum => Some(MetalSpec {
                family: MetalFamily::Platinum,
                specific_gravity: dec!(21.45),
                karats: None,
                purity: None,
            }),
            MetalFamily::Palladium => Some(MetalSpec {
                family: MetalFamily::Palladium,
                specific_gravity: dec!(12.02),
                karats: None,
                purity: None,
            }),
        }
    }
}

/// Current per-gram metal prices
///
/// Gold is quoted for 24K and silver for .999 fine; the COG calculator
/// applies the purity adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPrices {
    pub gold: Decimal,
    pub silver: Decimal,
    pub platinum: Decimal,
    pub palladium: Decimal,
}

impl MetalPrices {
    /// Per-gram price for a metal family
    pub fn price_for(&self, family: MetalFamily) -> Decimal {
        match family {
            MetalFamily::Gold => self.gold,
            MetalFamily::Silver => self.silver,
            MetalFamily::Platinum => self.platinum,
            MetalFamily::Palladium => self.palladium,
        }
    }
}
