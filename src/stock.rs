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

//! Stock listings.
//!
//! A [`Stock`] carries the per-share open value, the listed dollar volume, and
//! the derived share supply. The exchange-side `remaining` counter moves as
//! accounts buy and sell; it never exceeds the derived total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brokerage_ledger_rs::{Stock, StockId};
//!
//! let stock = Stock::new(StockId(1), "AAPL", dec!(144.59), dec!(113787000), "05/13/2022").unwrap();
//! assert_eq!(stock.total_shares(), 786_963);
//! assert_eq!(stock.remaining_shares(), stock.total_shares());
//! ```

use crate::LedgerError;
use crate::base::StockId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A listed stock with its tradable share supply.
#[derive(Debug, Clone)]
pub struct Stock {
    id: StockId,
    symbol: String,
    open_value: Decimal,
    volume: Decimal,
    trade_date: String,
    total_shares: u64,
    remaining_shares: u64,
}

impl Stock {
    const PRICE_PRECISION: u32 = 2;

    /// Lists a new stock after validating every field.
    ///
    /// The total share supply is derived as `floor(volume / open_value)` and
    /// the remaining counter starts at that total.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NonPositiveOpenValue`] - Open value is zero or negative.
    /// - [`LedgerError::FractionalVolume`] - Volume is not a whole dollar amount.
    /// - [`LedgerError::NonPositiveVolume`] - Volume is zero or negative.
    /// - [`LedgerError::VolumeOverflow`] - Derived supply exceeds the counter range.
    pub fn new(
        id: StockId,
        symbol: impl Into<String>,
        open_value: Decimal,
        volume: Decimal,
        trade_date: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        if open_value <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveOpenValue);
        }
        if !volume.fract().is_zero() {
            return Err(LedgerError::FractionalVolume);
        }
        if volume <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveVolume);
        }

        let total_shares = (volume / open_value)
            .floor()
            .to_u64()
            .ok_or(LedgerError::VolumeOverflow)?;

        Ok(Self {
            id,
            symbol: symbol.into(),
            open_value,
            volume,
            trade_date: trade_date.into(),
            total_shares,
            remaining_shares: total_shares,
        })
    }

    pub fn id(&self) -> StockId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Per-share price, used for both buy and sell pricing.
    pub fn open_value(&self) -> Decimal {
        self.open_value
    }

    /// Listed dollar volume the share supply was derived from.
    pub fn volume(&self) -> Decimal {
        self.volume
    }

    pub fn trade_date(&self) -> &str {
        &self.trade_date
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Shares still available for purchase from the exchange-side counter.
    pub fn remaining_shares(&self) -> u64 {
        self.remaining_shares
    }

    /// Returns `total - remaining`.
    pub fn sold_shares(&self) -> u64 {
        self.total_shares - self.remaining_shares
    }

    /// Removes shares from the remaining supply.
    ///
    /// Callers must have verified `shares <= remaining_shares()`.
    pub(crate) fn take_shares(&mut self, shares: u64) {
        debug_assert!(
            shares <= self.remaining_shares,
            "Invariant violated: taking {} shares with only {} remaining",
            shares,
            self.remaining_shares
        );
        self.remaining_shares -= shares;
        self.assert_invariants();
    }

    /// Returns shares to the remaining supply.
    ///
    /// Callers must have verified the shares were previously taken.
    pub(crate) fn return_shares(&mut self, shares: u64) {
        debug_assert!(
            self.remaining_shares + shares <= self.total_shares,
            "Invariant violated: returning {} shares would exceed total supply",
            shares
        );
        self.remaining_shares += shares;
        self.assert_invariants();
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.remaining_shares <= self.total_shares,
            "Invariant violated: remaining shares {} exceed total {}",
            self.remaining_shares,
            self.total_shares
        );
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}) {:<6} Open = {:<11} Volume = {:<13} Total shares:{:<9} Sold shares:{:<9} date:{}",
            self.id,
            self.symbol,
            self.open_value.round_dp(Self::PRICE_PRECISION),
            self.volume,
            self.total_shares,
            self.sold_shares(),
            self.trade_date
        )
    }
}

impl Serialize for Stock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Stock", 7)?;
        state.serialize_field("stock", &self.id)?;
        state.serialize_field("symbol", &self.symbol)?;
        state.serialize_field("open", &self.open_value.round_dp(Self::PRICE_PRECISION))?;
        state.serialize_field("volume", &self.volume)?;
        state.serialize_field("total_shares", &self.total_shares)?;
        state.serialize_field("remaining", &self.remaining_shares)?;
        state.serialize_field("date", &self.trade_date)?;
        state.end()
    }
}

/// Converts a decimal share quantity into a whole share count.
///
/// Used at parse boundaries (the order CSV) where quantities arrive as
/// decimals. A fractional quantity is a type mismatch; a negative one can
/// never be a valid count.
pub fn to_share_count(value: Decimal) -> Result<u64, LedgerError> {
    if !value.fract().is_zero() {
        return Err(LedgerError::FractionalShares);
    }
    value.to_u64().ok_or(LedgerError::NonPositiveShares)
}
