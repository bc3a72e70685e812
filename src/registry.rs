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

//! Ledger registry.
//!
//! The [`Registry`] owns every account and stock, assigns their sequential
//! ids, and routes buy/sell transactions to the right (account, stock) pair.
//! Entities are kept in creation order and never deleted, so reports iterate
//! in the order things were opened or listed.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brokerage_ledger_rs::Registry;
//!
//! let mut registry = Registry::new();
//! let account = registry
//!     .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000))
//!     .unwrap();
//! let stock = registry
//!     .list_stock("AAPL", dec!(144.59), dec!(113787000), "05/13/2022")
//!     .unwrap();
//! registry.buy(account, stock, 10).unwrap();
//! assert_eq!(registry.account(account).unwrap().balance(), dec!(13555));
//! ```

use crate::LedgerError;
use crate::account::Account;
use crate::base::{AccountId, StockId};
use crate::stock::Stock;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Owns all accounts and stocks in creation order.
///
/// # Invariants
///
/// - Ids are sequential from 1 and match the entity's position in its list.
/// - A buy/sell either applies to both ledgers (account balance/holdings and
///   stock supply) or to neither.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: Vec<Account>,
    stocks: Vec<Stock>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new account, assigning it the next sequential id.
    ///
    /// # Errors
    ///
    /// Any field validation error from [`Account::open`].
    pub fn open_account(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: impl Into<String>,
        birthdate: impl Into<String>,
        balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        let id = AccountId(self.accounts.len() as u32 + 1);
        let account = Account::open(id, first_name, last_name, national_id, birthdate, balance)?;
        self.accounts.push(account);
        Ok(id)
    }

    /// Lists a new stock, assigning it the next sequential id.
    ///
    /// # Errors
    ///
    /// Any field validation error from [`Stock::new`].
    pub fn list_stock(
        &mut self,
        symbol: impl Into<String>,
        open_value: Decimal,
        volume: Decimal,
        trade_date: impl Into<String>,
    ) -> Result<StockId, LedgerError> {
        let id = StockId(self.stocks.len() as u32 + 1);
        let stock = Stock::new(id, symbol, open_value, volume, trade_date)?;
        self.stocks.push(stock);
        Ok(id)
    }

    /// Buys shares on behalf of an account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::UnknownAccount`] / [`LedgerError::UnknownStock`] - Bad id.
    /// - Any transaction error from [`Account::buy_shares`].
    pub fn buy(
        &mut self,
        account_id: AccountId,
        stock_id: StockId,
        shares: u64,
    ) -> Result<String, LedgerError> {
        let account_index = Self::index_for(account_id.0, self.accounts.len())
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let stock_index = Self::index_for(stock_id.0, self.stocks.len())
            .ok_or(LedgerError::UnknownStock(stock_id))?;
        self.accounts[account_index].buy_shares(&mut self.stocks[stock_index], shares)
    }

    /// Sells shares held by an account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::UnknownAccount`] / [`LedgerError::UnknownStock`] - Bad id.
    /// - Any transaction error from [`Account::sell_shares`].
    pub fn sell(
        &mut self,
        account_id: AccountId,
        stock_id: StockId,
        shares: u64,
    ) -> Result<String, LedgerError> {
        let account_index = Self::index_for(account_id.0, self.accounts.len())
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let stock_index = Self::index_for(stock_id.0, self.stocks.len())
            .ok_or(LedgerError::UnknownStock(stock_id))?;
        self.accounts[account_index].sell_shares(&mut self.stocks[stock_index], shares)
    }

    /// Retrieves an account by id.
    pub fn account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        Self::index_for(id.0, self.accounts.len())
            .map(|index| &self.accounts[index])
            .ok_or(LedgerError::UnknownAccount(id))
    }

    /// Retrieves a stock by id.
    pub fn stock(&self, id: StockId) -> Result<&Stock, LedgerError> {
        Self::index_for(id.0, self.stocks.len())
            .map(|index| &self.stocks[index])
            .ok_or(LedgerError::UnknownStock(id))
    }

    /// First listed stock with the given symbol, if any.
    ///
    /// Symbols are not required to be unique; the earliest listing wins.
    pub fn stock_by_symbol(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.iter().find(|stock| stock.symbol() == symbol)
    }

    /// Iterates accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Iterates stocks in listing order.
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.iter()
    }

    /// One formatted line per account, in creation order.
    pub fn account_listing(&self) -> String {
        Self::listing(self.accounts.iter())
    }

    /// One formatted line per stock, in listing order.
    pub fn stock_listing(&self) -> String {
        Self::listing(self.stocks.iter())
    }

    fn listing<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
        let mut out = String::new();
        for item in items {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = write!(out, "{item}");
        }
        out
    }

    // Ids are assigned from the list length, so id N lives at index N - 1.
    fn index_for(id: u32, len: usize) -> Option<usize> {
        let index = (id as usize).checked_sub(1)?;
        (index < len).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry_with_universe() -> (Registry, AccountId, StockId) {
        let mut registry = Registry::new();
        let account = registry
            .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000))
            .unwrap();
        let stock = registry
            .list_stock("AAPL", dec!(144.59), dec!(113787000), "05/13/2022")
            .unwrap();
        (registry, account, stock)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut registry = Registry::new();
        let a1 = registry
            .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(100))
            .unwrap();
        let a2 = registry
            .open_account("Majid", "Messy", "0025328985", "10/16/2002", dec!(100))
            .unwrap();
        assert_eq!(a1, AccountId(1));
        assert_eq!(a2, AccountId(2));
    }

    #[test]
    fn failed_validation_does_not_consume_an_id() {
        let mut registry = Registry::new();
        let bad = registry.open_account("Al1", "Ronaldo", "0045375980", "01/10/2000", dec!(100));
        assert!(bad.is_err());
        let good = registry
            .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(100))
            .unwrap();
        assert_eq!(good, AccountId(1));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let (mut registry, account, stock) = registry_with_universe();
        assert_eq!(
            registry.buy(AccountId(99), stock, 1).unwrap_err(),
            LedgerError::UnknownAccount(AccountId(99))
        );
        assert_eq!(
            registry.buy(account, StockId(99), 1).unwrap_err(),
            LedgerError::UnknownStock(StockId(99))
        );
        assert_eq!(
            registry.account(AccountId(0)).unwrap_err(),
            LedgerError::UnknownAccount(AccountId(0))
        );
    }

    #[test]
    fn buy_routes_to_the_right_pair() {
        let (mut registry, account, stock) = registry_with_universe();
        let confirmation = registry.buy(account, stock, 10).unwrap();
        assert_eq!(confirmation, "Ali Ronaldo bought 10 AAPL shares successfully");
        assert_eq!(registry.account(account).unwrap().balance(), dec!(13555));
        assert_eq!(
            registry.stock(stock).unwrap().remaining_shares(),
            registry.stock(stock).unwrap().total_shares() - 10
        );
    }

    #[test]
    fn stock_by_symbol_returns_earliest_listing() {
        let mut registry = Registry::new();
        let first = registry
            .list_stock("DUP", dec!(10.0), dec!(1000), "01/01/2020")
            .unwrap();
        registry
            .list_stock("DUP", dec!(20.0), dec!(1000), "01/01/2020")
            .unwrap();
        assert_eq!(registry.stock_by_symbol("DUP").unwrap().id(), first);
        assert!(registry.stock_by_symbol("MISSING").is_none());
    }

    #[test]
    fn listings_follow_creation_order() {
        let mut registry = Registry::new();
        registry
            .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000))
            .unwrap();
        registry
            .open_account("Majid", "Messy", "0025328985", "10/16/2002", dec!(10000))
            .unwrap();
        let listing = registry.account_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1) Ali"));
        assert!(lines[1].starts_with("2) Majid"));
    }

    #[test]
    fn empty_listing_is_empty_string() {
        let registry = Registry::new();
        assert_eq!(registry.account_listing(), "");
        assert_eq!(registry.stock_listing(), "");
    }
}
