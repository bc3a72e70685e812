// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types for ledger operations.

use crate::base::{AccountId, StockId};
use thiserror::Error;

/// Broad classification of a [`LedgerError`].
///
/// `Type` means the input had the wrong fundamental shape (a fractional value
/// where a whole number is required). `Value` means the shape was fine but a
/// domain constraint was violated (format, range, insufficient funds/shares,
/// unknown id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
}

/// Ledger operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Name field contains non-alphabetic characters (or is empty)
    #[error("{field} must consist of only alphabetic characters")]
    InvalidName { field: &'static str },

    /// National id is not exactly 10 digits
    #[error("national id must consist of exactly 10 digits")]
    InvalidNationalId,

    /// Birthdate does not match the ##/##/#### shape
    #[error("birthdate must be in the form ##/##/####, where each # is a digit")]
    InvalidBirthdate,

    /// Balance has a fractional part
    #[error("balance must be a whole number")]
    FractionalBalance,

    /// Balance is negative
    #[error("balance must be greater than or equal to zero")]
    NegativeBalance,

    /// Open value is zero or negative
    #[error("open value must be greater than zero")]
    NonPositiveOpenValue,

    /// Volume has a fractional part
    #[error("volume must be a whole number")]
    FractionalVolume,

    /// Volume is zero or negative
    #[error("volume must be greater than zero")]
    NonPositiveVolume,

    /// Derived share count does not fit the supply counter
    #[error("volume too large for share accounting")]
    VolumeOverflow,

    /// Share count is not a whole number
    #[error("shares must be a whole number")]
    FractionalShares,

    /// Share count is absent or not a number at all
    #[error("shares must be a number")]
    MissingShares,

    /// Share count is zero
    #[error("shares must be a positive integer")]
    NonPositiveShares,

    /// Buy exceeds the stock's remaining supply
    #[error("shares must not exceed the remaining shares for this stock ({remaining})")]
    NotEnoughRemaining { remaining: u64 },

    /// Purchase cost exceeds the account balance
    #[error("not enough money in the account to buy these shares")]
    InsufficientFunds,

    /// Sell references a stock the account has never bought
    #[error("account doesn't have this stock")]
    StockNotHeld,

    /// Sell exceeds the account's held share count
    #[error("not enough shares in the account to sell ({held})")]
    NotEnoughHeld { held: u64 },

    /// Referenced account id does not exist
    #[error("no account with id {0}")]
    UnknownAccount(AccountId),

    /// Referenced stock id does not exist
    #[error("no stock with id {0}")]
    UnknownStock(StockId),

    /// Referenced symbol has no listing
    #[error("no listed stock with symbol {0}")]
    UnknownSymbol(String),
}

impl LedgerError {
    /// Classifies the error as a type mismatch or a domain-value violation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FractionalBalance
            | Self::FractionalVolume
            | Self::FractionalShares
            | Self::MissingShares => ErrorKind::Type,
            _ => ErrorKind::Value,
        }
    }
}
