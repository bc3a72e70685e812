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

//! Benchmarks for the brokerage ledger.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single buy and buy/sell cycle latency
//! - Order throughput against one stock
//! - Scaling with number of accounts

use brokerage_ledger_rs::{AccountId, Registry, StockId};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

// =============================================================================
// Helper Functions
// =============================================================================

fn registry_with_accounts(count: u32) -> Registry {
    let mut registry = Registry::new();
    for _ in 0..count {
        registry
            .open_account(
                "Ali",
                "Ronaldo",
                "0045375980",
                "01/10/2000",
                Decimal::from(1_000_000_000i64),
            )
            .unwrap();
    }
    registry
        .list_stock(
            "AAPL",
            Decimal::new(14459, 2),
            Decimal::from(100_000_000_000i64),
            "05/13/2022",
        )
        .unwrap();
    registry
}

// =============================================================================
// Latency Benchmarks
// =============================================================================

fn bench_single_buy(c: &mut Criterion) {
    c.bench_function("single_buy", |b| {
        b.iter(|| {
            let mut registry = registry_with_accounts(1);
            registry
                .buy(black_box(AccountId(1)), black_box(StockId(1)), 10)
                .unwrap();
        })
    });
}

fn bench_buy_sell_cycle(c: &mut Criterion) {
    c.bench_function("buy_sell_cycle", |b| {
        b.iter(|| {
            let mut registry = registry_with_accounts(1);
            registry.buy(AccountId(1), StockId(1), 10).unwrap();
            registry
                .sell(black_box(AccountId(1)), black_box(StockId(1)), 10)
                .unwrap();
        })
    });
}

fn bench_open_account(c: &mut Criterion) {
    c.bench_function("open_account", |b| {
        b.iter(|| {
            let mut registry = Registry::new();
            registry
                .open_account(
                    black_box("Ali"),
                    "Ronaldo",
                    "0045375980",
                    "01/10/2000",
                    Decimal::from(15000),
                )
                .unwrap();
        })
    });
}

// =============================================================================
// Throughput Benchmarks
// =============================================================================

fn bench_order_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_throughput");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let mut registry = registry_with_accounts(1);
                for _ in 0..count / 2 {
                    registry.buy(AccountId(1), StockId(1), 1).unwrap();
                    registry.sell(AccountId(1), StockId(1), 1).unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_account_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_scaling");

    for count in [10u32, 100, 1_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let mut registry = registry_with_accounts(count);
                for id in 1..=count {
                    registry.buy(AccountId(id), StockId(1), 1).unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_reporting(c: &mut Criterion) {
    c.bench_function("account_listing_1000", |b| {
        let registry = registry_with_accounts(1_000);
        b.iter(|| black_box(registry.account_listing()))
    });
}

criterion_group!(
    benches,
    bench_single_buy,
    bench_buy_sell_cycle,
    bench_open_account,
    bench_order_throughput,
    bench_account_scaling,
    bench_reporting,
);
criterion_main!(benches);
