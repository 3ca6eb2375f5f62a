//! Account records: pending requests and approved users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ContractError, EmailAddress, LedgerRecord, NationalId, PersonName, PhoneNumber, RecordKind,
    TransactionCode, UserId,
};

/// Pending account request awaiting registrar approval.
///
/// Written once by `requestNewUser` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserRequest {
    /// Participant-chosen identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: PersonName,
    /// Contact e-mail.
    pub email: EmailAddress,
    /// Contact phone number.
    pub phone: PhoneNumber,
    /// Government identity number.
    #[serde(alias = "aadhar")]
    pub national_id: NationalId,
    /// Time the request was submitted.
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl LedgerRecord for UserRequest {
    const KIND: RecordKind = RecordKind::UserRequest;
}

/// Approved account holding a coin balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    /// Participant-chosen identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: PersonName,
    /// Contact e-mail.
    pub email: EmailAddress,
    /// Contact phone number.
    pub phone: PhoneNumber,
    /// Government identity number.
    #[serde(alias = "aadhar")]
    pub national_id: NationalId,
    /// Time the originating request was submitted.
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    /// Credit available to the account.
    #[serde(alias = "upgradCoins")]
    pub coin_balance: u64,
}

impl User {
    /// Promote a request into an account with an empty balance.
    #[must_use]
    pub fn approve(request: UserRequest) -> Self {
        let UserRequest {
            user_id,
            name,
            email,
            phone,
            national_id,
            created_at,
        } = request;
        Self {
            user_id,
            name,
            email,
            phone,
            national_id,
            created_at,
            coin_balance: 0,
        }
    }

    /// Add the amount a recharge code grants.
    ///
    /// The balance is left untouched when the addition would overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::BalanceOverflow`] on overflow.
    pub fn credit(&mut self, code: TransactionCode) -> Result<(), ContractError> {
        self.coin_balance = self
            .coin_balance
            .checked_add(code.credit())
            .ok_or_else(|| ContractError::balance_overflow(self.user_id.as_str()))?;
        Ok(())
    }
}

impl LedgerRecord for User {
    const KIND: RecordKind = RecordKind::User;
}
