//! Product identifiers and search scope
//!
//! Each product owns exactly one workbook. The short codes are what the
//! HTTP surface and CLI accept; the labels are what the assistant sees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DashboardError;

/// One of the three fixed product workbooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "BC")]
    BusinessChecking,
    #[serde(rename = "CC")]
    ConsumerChecking,
    #[serde(rename = "CS")]
    ConsumerSavings,
}

impl ProductType {
    /// All products in search order
    pub const ALL: [ProductType; 3] = [
        ProductType::BusinessChecking,
        ProductType::ConsumerChecking,
        ProductType::ConsumerSavings,
    ];

    /// Short wire code (`BC`, `CC`, `CS`)
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::BusinessChecking => "BC",
            ProductType::ConsumerChecking => "CC",
            ProductType::ConsumerSavings => "CS",
        }
    }

    /// Human-readable workbook label
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::BusinessChecking => "Business Checking",
            ProductType::ConsumerChecking => "Consumer Checking",
            ProductType::ConsumerSavings => "Consumer Savings",
        }
    }

    /// Parse an optional query/body parameter, rejecting anything else
    pub fn parse_param(value: Option<&str>) -> Result<Self, DashboardError> {
        value
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| DashboardError::Validation("Invalid type".to_string()))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProductType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BC" => Ok(ProductType::BusinessChecking),
            "CC" => Ok(ProductType::ConsumerChecking),
            "CS" => Ok(ProductType::ConsumerSavings),
            other => Err(DashboardError::Validation(format!(
                "Unknown product type: {}",
                other
            ))),
        }
    }
}

/// Which products a search or question covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductScope {
    Single(ProductType),
    All,
}

impl ProductScope {
    /// Products searched on the first pass
    pub fn products(&self) -> Vec<ProductType> {
        match self {
            ProductScope::Single(product) => vec![*product],
            ProductScope::All => ProductType::ALL.to_vec(),
        }
    }

    /// Products left to try when a single-product search comes back empty.
    /// Never widens an `All` scope.
    pub fn widened(&self) -> Vec<ProductType> {
        match self {
            ProductScope::Single(product) => ProductType::ALL
                .iter()
                .copied()
                .filter(|p| p != product)
                .collect(),
            ProductScope::All => Vec::new(),
        }
    }

    pub fn parse_param(value: Option<&str>) -> Result<Self, DashboardError> {
        value.and_then(|v| v.parse().ok()).ok_or_else(|| {
            DashboardError::Validation("Invalid or missing product".to_string())
        })
    }
}

impl fmt::Display for ProductScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductScope::Single(product) => write!(f, "{}", product),
            ProductScope::All => f.write_str("ALL"),
        }
    }
}

impl FromStr for ProductScope {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            return Ok(ProductScope::All);
        }
        s.parse().map(ProductScope::Single)
    }
}
