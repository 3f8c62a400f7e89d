//! Tender action and direction enumerations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tender_core::AppError;

/// What a tender did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderAction {
    /// The tender reached its destination.
    Arrived,
    /// The tender left its origin.
    Departed,
    /// The tender is a few minutes out. Legacy: no longer offered by the operator view.
    Arriving,
}

impl TenderAction {
    /// Actions offered to the operator.
    pub const SELECTABLE: [TenderAction; 2] = [TenderAction::Arrived, TenderAction::Departed];

    /// Return the action label as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrived => "ARRIVED",
            Self::Departed => "DEPARTED",
            Self::Arriving => "ARRIVING",
        }
    }

    /// Whether the action is kept only for older records.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Arriving)
    }
}

impl std::fmt::Display for TenderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TenderAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARRIVED" => Ok(Self::Arrived),
            "DEPARTED" => Ok(Self::Departed),
            "ARRIVING" => Ok(Self::Arriving),
            other => Err(AppError::validation(format!(
                "Unknown tender action '{other}'"
            ))),
        }
    }
}

/// Which end of the tender route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// The pier.
    Shoreside,
    /// The vessel.
    Shipside,
}

impl Direction {
    /// Return the direction label as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shoreside => "SHORESIDE",
            Self::Shipside => "SHIPSIDE",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHORESIDE" => Ok(Self::Shoreside),
            "SHIPSIDE" => Ok(Self::Shipside),
            other => Err(AppError::validation(format!("Unknown direction '{other}'"))),
        }
    }
}
