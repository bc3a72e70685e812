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

//! Customer accounts.
//!
//! An [`Account`] is only observable in a valid state: the constructor and the
//! per-field setters validate every profile field before assignment, and the
//! buy/sell transactions check all preconditions before touching any counter,
//! so a failed transaction leaves both ledgers untouched.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brokerage_ledger_rs::{Account, AccountId};
//!
//! let account = Account::open(
//!     AccountId(1), "Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000),
//! ).unwrap();
//! assert_eq!(account.balance(), dec!(15000));
//! ```

use crate::LedgerError;
use crate::base::{AccountId, StockId};
use crate::stock::Stock;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An account's position in one stock listing: share count plus aggregate
/// cost basis. Carries the listing's symbol for reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    pub symbol: String,
    pub shares: u64,
    pub cost_basis: Decimal,
}

/// Brokerage customer account.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    first_name: String,
    last_name: String,
    national_id: String,
    birthdate: String,
    balance: Decimal,
    /// Holdings keyed by stock id, so listings that share a symbol stay
    /// separate positions. Entries are removed when a sell brings the share
    /// count back to zero.
    holdings: BTreeMap<StockId, Holding>,
}

impl Account {
    /// Opens an account after validating every profile field.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidName`] - Name is empty or not purely alphabetic.
    /// - [`LedgerError::InvalidNationalId`] - Not exactly 10 digits.
    /// - [`LedgerError::InvalidBirthdate`] - Not in `##/##/####` shape.
    /// - [`LedgerError::FractionalBalance`] - Balance is not a whole amount.
    /// - [`LedgerError::NegativeBalance`] - Balance is below zero.
    pub fn open(
        id: AccountId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: impl Into<String>,
        birthdate: impl Into<String>,
        balance: Decimal,
    ) -> Result<Self, LedgerError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let national_id = national_id.into();
        let birthdate = birthdate.into();

        validate_name(&first_name, "firstname")?;
        validate_name(&last_name, "lastname")?;
        validate_national_id(&national_id)?;
        validate_birthdate(&birthdate)?;
        validate_balance(balance)?;

        Ok(Self {
            id,
            first_name,
            last_name,
            national_id,
            birthdate,
            balance,
            holdings: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn birthdate(&self) -> &str {
        &self.birthdate
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Current position in the given stock listing, if any shares are held.
    pub fn holding(&self, stock_id: StockId) -> Option<&Holding> {
        self.holdings.get(&stock_id)
    }

    /// Iterates holdings in listing-id order.
    pub fn holdings(&self) -> impl Iterator<Item = (StockId, &Holding)> {
        self.holdings.iter().map(|(k, v)| (*k, v))
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> Result<(), LedgerError> {
        let value = value.into();
        validate_name(&value, "firstname")?;
        self.first_name = value;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) -> Result<(), LedgerError> {
        let value = value.into();
        validate_name(&value, "lastname")?;
        self.last_name = value;
        Ok(())
    }

    pub fn set_national_id(&mut self, value: impl Into<String>) -> Result<(), LedgerError> {
        let value = value.into();
        validate_national_id(&value)?;
        self.national_id = value;
        Ok(())
    }

    pub fn set_birthdate(&mut self, value: impl Into<String>) -> Result<(), LedgerError> {
        let value = value.into();
        validate_birthdate(&value)?;
        self.birthdate = value;
        Ok(())
    }

    /// Buys `shares` units of `stock`, debiting the balance and the stock's
    /// remaining supply in the same call.
    ///
    /// The cost is `shares * open value`, truncated to whole currency units.
    /// All preconditions are checked before any state changes, so a failure
    /// leaves both the account and the stock untouched.
    ///
    /// # Errors
    ///
    /// Checked in order, first failure wins:
    ///
    /// - [`LedgerError::NotEnoughRemaining`] - Purchase exceeds the stock's supply.
    /// - [`LedgerError::NonPositiveShares`] - Share count is zero.
    /// - [`LedgerError::InsufficientFunds`] - Cost exceeds the balance.
    pub fn buy_shares(&mut self, stock: &mut Stock, shares: u64) -> Result<String, LedgerError> {
        if shares > stock.remaining_shares() {
            return Err(LedgerError::NotEnoughRemaining {
                remaining: stock.remaining_shares(),
            });
        }
        if shares < 1 {
            return Err(LedgerError::NonPositiveShares);
        }
        let cost = (Decimal::from(shares) * stock.open_value()).trunc();
        if cost > self.balance {
            return Err(LedgerError::InsufficientFunds);
        }

        let holding = self
            .holdings
            .entry(stock.id())
            .or_insert_with(|| Holding {
                symbol: stock.symbol().to_owned(),
                shares: 0,
                cost_basis: Decimal::ZERO,
            });
        holding.shares += shares;
        holding.cost_basis += cost;
        self.balance -= cost;
        stock.take_shares(shares);
        self.assert_invariants();

        Ok(format!(
            "{} {} bought {} {} shares successfully",
            self.first_name,
            self.last_name,
            shares,
            stock.symbol()
        ))
    }

    /// Sells `shares` units of `stock`, crediting the balance and returning
    /// the shares to the stock's remaining supply.
    ///
    /// Proceeds are priced at the stock's current open value, truncated to
    /// whole currency units. A holding emptied by the sale is removed from the
    /// map. Positions are per listing id, so a second listing under the same
    /// symbol cannot absorb a sale of the first.
    ///
    /// # Errors
    ///
    /// Checked in order, first failure wins:
    ///
    /// - [`LedgerError::StockNotHeld`] - Account has no position in this listing.
    /// - [`LedgerError::NonPositiveShares`] - Share count is zero.
    /// - [`LedgerError::NotEnoughHeld`] - Sale exceeds the held share count.
    pub fn sell_shares(&mut self, stock: &mut Stock, shares: u64) -> Result<String, LedgerError> {
        // Existence first, so a never-held stock reports the domain error
        // rather than a lookup failure.
        let Some(holding) = self.holdings.get_mut(&stock.id()) else {
            return Err(LedgerError::StockNotHeld);
        };
        if shares < 1 {
            return Err(LedgerError::NonPositiveShares);
        }
        if shares > holding.shares {
            return Err(LedgerError::NotEnoughHeld {
                held: holding.shares,
            });
        }

        let proceeds = (Decimal::from(shares) * stock.open_value()).trunc();
        holding.shares -= shares;
        // Truncation of partial sells can undershoot the accumulated basis by
        // a unit; clamp rather than carry a negative basis.
        holding.cost_basis = (holding.cost_basis - proceeds).max(Decimal::ZERO);
        if holding.shares == 0 {
            self.holdings.remove(&stock.id());
        }
        self.balance += proceeds;
        stock.return_shares(shares);
        self.assert_invariants();

        Ok(format!(
            "{} {} sold {} {} shares successfully",
            self.first_name,
            self.last_name,
            shares,
            stock.symbol()
        ))
    }

    /// Formats the account's holdings, one line per stock plus a totals line.
    ///
    /// Pure read; mutates nothing.
    pub fn holdings_summary(&self) -> String {
        if self.holdings.is_empty() {
            return format!(
                "{} {} doesn't have any share",
                self.first_name, self.last_name
            );
        }

        let mut out = format!("{} {} shares:\n", self.first_name, self.last_name);
        let mut total_shares = 0u64;
        let mut total_value = Decimal::ZERO;
        for (position, holding) in self.holdings.values().enumerate() {
            total_shares += holding.shares;
            total_value += holding.cost_basis;
            out.push_str(&format!(
                "[{}] {:<6} Shares:{:<7}   Value = {}\n",
                position + 1,
                holding.symbol,
                holding.shares,
                holding.cost_basis
            ));
        }
        out.push_str(&format!(
            "Total shares:{:<7}   Total value = {}",
            total_shares, total_value
        ));
        out
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
        debug_assert!(
            self.holdings
                .values()
                .all(|h| h.cost_basis >= Decimal::ZERO),
            "Invariant violated: a holding's cost basis went negative"
        );
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}) {:<9} {:<9} Id:[{}]   Birthdate:[{}]   Balance = {}",
            self.id, self.first_name, self.last_name, self.national_id, self.birthdate, self.balance
        )
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let total_shares: u64 = self.holdings.values().map(|h| h.shares).sum();
        let total_value: Decimal = self.holdings.values().map(|h| h.cost_basis).sum();

        let mut state = serializer.serialize_struct("Account", 5)?;
        state.serialize_field("account", &self.id)?;
        state.serialize_field(
            "name",
            &format!("{} {}", self.first_name, self.last_name),
        )?;
        state.serialize_field("balance", &self.balance)?;
        state.serialize_field("total_shares", &total_shares)?;
        state.serialize_field("total_value", &total_value)?;
        state.end()
    }
}

fn validate_name(value: &str, field: &'static str) -> Result<(), LedgerError> {
    let stripped: String = value.chars().filter(|c| *c != ' ').collect();
    if stripped.is_empty() || !stripped.chars().all(char::is_alphabetic) {
        return Err(LedgerError::InvalidName { field });
    }
    Ok(())
}

fn validate_national_id(value: &str) -> Result<(), LedgerError> {
    if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::InvalidNationalId);
    }
    Ok(())
}

/// Shape check only: positions 2 and 5 are literal `/`, every other position a
/// digit. No calendar validation.
fn validate_birthdate(value: &str) -> Result<(), LedgerError> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return Err(LedgerError::InvalidBirthdate);
    }
    for (position, byte) in bytes.iter().enumerate() {
        let ok = match position {
            2 | 5 => *byte == b'/',
            _ => byte.is_ascii_digit(),
        };
        if !ok {
            return Err(LedgerError::InvalidBirthdate);
        }
    }
    Ok(())
}

fn validate_balance(value: Decimal) -> Result<(), LedgerError> {
    if !value.fract().is_zero() {
        return Err(LedgerError::FractionalBalance);
    }
    if value < Decimal::ZERO {
        return Err(LedgerError::NegativeBalance);
    }
    Ok(())
}
