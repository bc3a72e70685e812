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

use brokerage_ledger_rs::{AccountId, LedgerError, Registry, StockId, to_share_count};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// Brokerage Ledger - Replay buy/sell orders against a demo universe
///
/// Seeds a fixed set of accounts and stocks, then either runs the built-in
/// demo session or replays orders from a CSV file, and prints account and
/// stock reports.
#[derive(Parser, Debug)]
#[command(name = "brokerage-ledger-rs")]
#[command(about = "An in-memory brokerage ledger with a scripted demo", long_about = None)]
struct Args {
    /// Path to CSV file with orders
    ///
    /// Expected format: op,account,symbol,shares
    /// Example: cargo run -- orders.csv
    ///
    /// When omitted, the built-in demo session runs instead.
    #[arg(value_name = "FILE")]
    orders: Option<PathBuf>,

    /// Emit account summaries as CSV instead of text reports
    #[arg(long)]
    csv: bool,
}

fn main() {
    let args = Args::parse();

    let mut registry = match seed_universe() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error seeding demo universe: {}", e);
            process::exit(1);
        }
    };

    match &args.orders {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error opening file '{}': {}", path.display(), e);
                    process::exit(1);
                }
            };
            if let Err(e) = replay_orders(BufReader::new(file), &mut registry) {
                eprintln!("Error processing orders: {}", e);
                process::exit(1);
            }
        }
        None => {
            if let Err(e) = run_demo_session(&mut registry) {
                eprintln!("Error running demo session: {}", e);
                process::exit(1);
            }
        }
    }

    if args.csv {
        if let Err(e) = write_accounts(&registry, std::io::stdout()) {
            eprintln!("Error writing output: {}", e);
            process::exit(1);
        }
    } else {
        print_reports(&registry);
    }
}

/// Creates the fixed demo universe: two accounts and five stocks.
fn seed_universe() -> Result<Registry, LedgerError> {
    let mut registry = Registry::new();

    registry.open_account("Ali", "Ronaldo", "0045375980", "01/10/2000", dec!(15000))?;
    registry.open_account("majid", "messy", "0025328985", "10/16/2002", dec!(10000))?;

    registry.list_stock("AMZN", dec!(2181.3798828125), dec!(4676700), "05/13/2022")?;
    registry.list_stock("FB", dec!(192.580001831054), dec!(24523500), "05/13/2022")?;
    registry.list_stock("TSLA", dec!(773.47998046875), dec!(30651800), "05/13/2022")?;
    registry.list_stock("GOOGLE", dec!(2290.65991210937), dec!(1747900), "05/13/2022")?;
    registry.list_stock("AAPL", dec!(144.58999633789), dec!(113787000), "05/13/2022")?;

    Ok(registry)
}

/// Runs the scripted demo trades and prints each confirmation.
fn run_demo_session(registry: &mut Registry) -> Result<(), LedgerError> {
    let account = AccountId(1);
    let facebook = stock_id_by_symbol(registry, "FB")?;
    let apple = stock_id_by_symbol(registry, "AAPL")?;

    println!("{}", registry.buy(account, apple, 10)?);
    println!("{}", registry.buy(account, apple, 5)?);
    println!("{}", registry.buy(account, facebook, 11)?);
    println!("{}", registry.sell(account, facebook, 2)?);
    Ok(())
}

/// Raw CSV record matching the order file format.
///
/// Fields: `op, account, symbol, shares`
#[derive(Debug, Deserialize)]
struct OrderRecord {
    op: String,
    account: u32,
    symbol: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    shares: Option<Decimal>,
}

#[derive(Debug, Clone, Copy)]
enum OrderSide {
    Buy,
    Sell,
}

impl OrderRecord {
    /// Returns `None` for order sides other than buy/sell.
    fn side(&self) -> Option<OrderSide> {
        match self.op.to_lowercase().as_str() {
            "buy" => Some(OrderSide::Buy),
            "sell" => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

/// Replays orders from a CSV reader against the registry.
///
/// Malformed rows and failed orders are skipped; in debug builds each skip is
/// reported on stderr.
///
/// # CSV Format
///
/// Expected columns: `op, account, symbol, shares`
/// - `op`: Order side (buy, sell)
/// - `account`: Account id (u32)
/// - `symbol`: Stock symbol; duplicate symbols resolve to the earliest listing
/// - `shares`: Whole share quantity
///
/// # Example
///
/// ```csv
/// op,account,symbol,shares
/// buy,1,AAPL,10
/// sell,1,AAPL,4
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
/// Individual order errors don't stop processing.
fn replay_orders<R: Read>(reader: R, registry: &mut Registry) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<OrderRecord>() {
        match result {
            Ok(record) => {
                let Some(side) = record.side() else {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping order with invalid op '{}'", record.op);
                    continue;
                };

                if let Err(_e) = apply_order(registry, &record, side) {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping order for account {}: {}", record.account, _e);
                }
            }
            Err(_e) => {
                // Skip malformed rows
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", _e);
                continue;
            }
        }
    }

    Ok(())
}

fn apply_order(
    registry: &mut Registry,
    record: &OrderRecord,
    side: OrderSide,
) -> Result<String, LedgerError> {
    let shares = to_share_count(record.shares.ok_or(LedgerError::MissingShares)?)?;
    let account = AccountId(record.account);
    let stock = stock_id_by_symbol(registry, &record.symbol)?;

    match side {
        OrderSide::Buy => registry.buy(account, stock, shares),
        OrderSide::Sell => registry.sell(account, stock, shares),
    }
}

fn stock_id_by_symbol(registry: &Registry, symbol: &str) -> Result<StockId, LedgerError> {
    registry
        .stock_by_symbol(symbol)
        .map(|stock| stock.id())
        .ok_or_else(|| LedgerError::UnknownSymbol(symbol.to_owned()))
}

/// Prints the account listing, stock listing, and per-account holdings.
fn print_reports(registry: &Registry) {
    println!("{}", registry.account_listing());
    println!("{}", registry.stock_listing());
    for account in registry.accounts() {
        println!("{}", account.holdings_summary());
    }
}

/// Write account summaries to a CSV writer
///
/// Outputs one row per account in creation order.
///
/// # CSV Format
///
/// Columns: `account, name, balance, total_shares, total_value`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_accounts<W: Write>(registry: &Registry, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for account in registry.accounts() {
        wtr.serialize(account)?;
    }

    wtr.flush()?;
    Ok(())
}
