//! Default behavior vocabulary for protists.
//!
//! Renderings are stable, unique per value and never contain `-`, so they are
//! safe to embed in tree identities.

use crate::data::tree::TreeNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for condition thresholds.
pub const MAX_PARAM: u8 = 100;

/// Terminal behaviors a protist can perform in a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtistAction {
    /// Consume food.
    Eat,
    /// Shelter against the weather.
    Cover,
    /// Leave shelter.
    Uncover,
}

impl ProtistAction {
    pub const ALL: [ProtistAction; 3] = [Self::Eat, Self::Cover, Self::Uncover];
}

impl fmt::Display for ProtistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eat => "eat",
            Self::Cover => "cover",
            Self::Uncover => "uncover",
        };
        f.write_str(name)
    }
}

/// Tests a protist can run against itself or its environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtistCondition {
    /// Health strictly above the threshold.
    HealthAbove(u8),
    /// Food strictly above the threshold.
    FoodAbove(u8),
    IsCold,
    IsHot,
}

impl ProtistCondition {
    /// Clamps thresholds into `0..=MAX_PARAM`.
    #[must_use]
    pub fn clamped(self) -> Self {
        match self {
            Self::HealthAbove(p) => Self::HealthAbove(p.min(MAX_PARAM)),
            Self::FoodAbove(p) => Self::FoodAbove(p.min(MAX_PARAM)),
            other => other,
        }
    }
}

impl fmt::Display for ProtistCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HealthAbove(p) => write!(f, "isHealthAbove({p})"),
            Self::FoodAbove(p) => write!(f, "isFoodAbove({p})"),
            Self::IsCold => f.write_str("isCold"),
            Self::IsHot => f.write_str("isHot"),
        }
    }
}

pub type ProtistTree = TreeNode<ProtistAction, ProtistCondition>;
