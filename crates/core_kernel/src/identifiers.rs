//! Strongly-typed identifiers for finance records
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidentally looking up a goal with a fund id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Identity
define_id!(UserId, "USR");

// Wallet
define_id!(TransactionId, "TXN");

// Savings
define_id!(GoalId, "GOL");
define_id!(GoalEntryId, "GEN");
define_id!(FundId, "FND");
define_id!(FundEntryId, "FEN");

// Credits
define_id!(CreditId, "CRD");
define_id!(PaymentId, "PAY");

// Projects
define_id!(ProjectId, "PRJ");
define_id!(ProjectTransactionId, "PTX");
define_id!(BudgetLineId, "BDL");
define_id!(MilestoneId, "MLS");
define_id!(TaskId, "TSK");
define_id!(MemberId, "MBR");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_id_display() {
        let id = GoalId::new();
        assert!(id.to_string().starts_with("GOL-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = CreditId::new_v7();
        let parsed: CreditId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: CreditId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let fund_id = FundId::from(uuid);
        let back: Uuid = fund_id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = ProjectId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
