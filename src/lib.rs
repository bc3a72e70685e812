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

//! # Brokerage Ledger
//!
//! An in-memory brokerage ledger: customer accounts with validated profile
//! fields, stock listings with a derived share supply, and buy/sell
//! transactions that move money and shares between the two atomically.
//!
//! ## Core Components
//!
//! - [`Registry`]: Owns every account and stock, assigns ids, routes trades
//! - [`Account`]: Customer account with balance and per-stock [`Holding`]s
//! - [`Stock`]: Listed stock with open value and remaining-share counter
//! - [`LedgerError`]: Validation and transaction errors, classified by [`ErrorKind`]
//!
//! ## Example
//!
//! ```
//! use brokerage_ledger_rs::Registry;
//! use rust_decimal_macros::dec;
//!
//! let mut registry = Registry::new();
//! let account = registry
//!     .open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000))
//!     .unwrap();
//! let apple = registry
//!     .list_stock("AAPL", dec!(144.59), dec!(113787000), "05/13/2022")
//!     .unwrap();
//!
//! let confirmation = registry.buy(account, apple, 10).unwrap();
//! assert_eq!(confirmation, "Ali Ronaldo bought 10 AAPL shares successfully");
//! assert_eq!(registry.account(account).unwrap().balance(), dec!(13555));
//! ```
//!
//! ## Money Math
//!
//! Balances, prices, and volumes use [`rust_decimal::Decimal`]; transaction
//! costs and proceeds are truncated to whole currency units, identically on
//! buy and sell, so a buy-then-sell round trip restores both counters exactly.
//!
//! All state is process-local; there is no persistence and no concurrency.

pub mod account;
mod base;
pub mod error;
mod registry;
mod stock;

pub use account::{Account, Holding};
pub use base::{AccountId, StockId};
pub use error::{ErrorKind, LedgerError};
pub use registry::Registry;
pub use stock::{Stock, to_share_count};
