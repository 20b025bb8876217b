//! Entity roles on the platform.

use serde::{Deserialize, Serialize};

/// The kind of company a registration creates.
///
/// Exactly two variants: the sign-up wizard rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An ordering party that browses deposits and places orders.
    Pharmacy,
    /// A warehouse that lists stock and fulfills pharmacy orders.
    Deposit,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pharmacy => write!(f, "pharmacy"),
            Self::Deposit => write!(f, "deposit"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pharmacy" => Ok(Self::Pharmacy),
            "deposit" => Ok(Self::Deposit),
            _ => Err(format!("invalid entity kind: {s}")),
        }
    }
}

/// The role the backend reports for a signed-in account.
///
/// Unlike [`EntityKind`] this is open-ended: the backend may introduce
/// roles this client does not know about, and sign-in must treat those as
/// an error state rather than a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntityRole {
    Pharmacy,
    Deposit,
    Admin,
    /// Any role this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl EntityRole {
    /// The role-prefixed section of the site this role lands on after
    /// sign-in, if any.
    #[must_use]
    pub const fn home_path(&self) -> Option<&'static str> {
        match self {
            Self::Pharmacy => Some("/pharmacy"),
            Self::Deposit => Some("/deposit"),
            Self::Admin => Some("/admin"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for EntityRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pharmacy => write!(f, "pharmacy"),
            Self::Deposit => write!(f, "deposit"),
            Self::Admin => write!(f, "admin"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
