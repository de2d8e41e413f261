use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Identified;
use crate::{Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PackageName {
    Basic,
    Standard,
    Premium,
}

impl PackageName {
    pub const ALL: [PackageName; 3] =
        [PackageName::Basic, PackageName::Standard, PackageName::Premium];
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageName::Basic => "Basic",
            PackageName::Standard => "Standard",
            PackageName::Premium => "Premium",
        };
        f.write_str(name)
    }
}

/// Prices of optional add-ons; absent means not offered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageExtras {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mockup: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_kit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_fast: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageTier {
    pub name: PackageName,
    pub price: f64,
    pub delivery_days: u32,
    pub revisions: u32,
    #[serde(default)]
    pub extras: PackageExtras,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GigMedia {
    /// Usually a data URL.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub packages: Vec<PackageTier>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<GigMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Identified for Gig {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Gig {
    /// Check what serde cannot: a usable id and at most one
    /// package per tier.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::Validation("Gig id is required".to_owned()));
        }
        let mut seen = HashSet::new();
        for package in &self.packages {
            if !seen.insert(package.name) {
                return Err(StoreError::Validation(format!(
                    "Gig {} offers the {} package twice",
                    self.id, package.name
                )));
            }
        }
        Ok(())
    }

    pub fn package(&self, name: PackageName) -> Option<&PackageTier> {
        self.packages
            .iter()
            .find(|package| package.name == name)
    }

    /// Lowest package price, shown as "starting at" in listings.
    pub fn starting_price(&self) -> Option<f64> {
        self.packages
            .iter()
            .map(|package| package.price)
            .reduce(f64::min)
    }
}
