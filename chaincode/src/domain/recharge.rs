//! Recharge transaction codes.

use std::fmt;
use std::str::FromStr;

use super::ContractError;

/// Code presented with a recharge; each maps to a fixed coin credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionCode {
    /// Credits 100 coins.
    Upg100,
    /// Credits 500 coins.
    Upg500,
    /// Credits 1000 coins.
    Upg1000,
}

impl TransactionCode {
    /// Every accepted code.
    pub const ALL: [Self; 3] = [Self::Upg100, Self::Upg500, Self::Upg1000];

    /// Coins granted by the code.
    #[must_use]
    pub const fn credit(self) -> u64 {
        match self {
            Self::Upg100 => 100,
            Self::Upg500 => 500,
            Self::Upg1000 => 1000,
        }
    }

    /// Code as presented by callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upg100 => "upg100",
            Self::Upg500 => "upg500",
            Self::Upg1000 => "upg1000",
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCode {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == value)
            .ok_or_else(|| ContractError::unknown_transaction_code(value))
    }
}
