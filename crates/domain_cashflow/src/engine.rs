//! Indirect-method cash flow engine
//!
//! Operates on two consecutive reports. Operating cash starts from net
//! profit, adds back the depreciation charge, and adjusts for
//! working-capital variations; investing follows tangible fixed-asset
//! deltas; financing follows financial debt, capital accounts, and a
//! synthetic dividends adjustment derived from retained earnings. The
//! computed net flow is then reconciled against the cash balance delta.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use core_kernel::{AccountId, Category};
use domain_report::{keys, Report};

use crate::rules::{classify_asset, classify_equity, classify_liability, AssetClass, EquityClass, LiabilityClass};
use crate::statement::{CashFlowStatement, FlowLine, FlowLineKind, FlowSection, Reconciliation};

/// Variations at or under a cent are noise, not flow lines
const LINE_THRESHOLD: Decimal = dec!(0.01);

/// Allowed absolute gap between actual and computed closing cash
const RECONCILIATION_TOLERANCE: Decimal = dec!(1.0);

/// An account seen across the period pair
struct AccountView {
    name: String,
    prior: Decimal,
    current: Decimal,
}

impl AccountView {
    fn delta(&self) -> Decimal {
        self.current - self.prior
    }
}

/// Builds the indirect-method statement for a consecutive period pair
pub fn cash_flow(prior: &Report, current: &Report) -> CashFlowStatement {
    let assets = account_union(prior, current, Category::Asset);
    let liabilities = account_union(prior, current, Category::Liability);
    let equity = account_union(prior, current, Category::Equity);
    let net_profit = current.totals.get(keys::NET_PROFIT);

    let operating = operating_section(&assets, &liabilities, net_profit);
    let investing = investing_section(&assets);
    let financing = financing_section(&liabilities, &equity, net_profit);

    let net_flow = operating.total + investing.total + financing.total;
    let reconciliation = reconcile(&assets, net_flow);

    if !reconciliation.reconciles {
        warn!(
            discrepancy = %reconciliation.discrepancy,
            prior = %prior.period(),
            current = %current.period(),
            "cash flow does not reconcile against the cash balance delta"
        );
    } else {
        debug!(net_flow = %net_flow, "cash flow reconciles");
    }

    CashFlowStatement {
        prior_period: prior.period(),
        current_period: current.period(),
        operating,
        investing,
        financing,
        net_flow,
        reconciliation,
    }
}

fn operating_section(
    assets: &[AccountView],
    liabilities: &[AccountView],
    net_profit: Decimal,
) -> FlowSection {
    let mut section = FlowSection::default();
    section.push(FlowLine::new("Net Profit", net_profit, FlowLineKind::NetProfit));

    let add_back = depreciation_add_back(assets);
    if add_back > Decimal::ZERO {
        section.push(FlowLine::new(
            "Depreciation Add-back",
            add_back,
            FlowLineKind::DepreciationAddBack,
        ));
    }

    // An operating asset that grows consumes cash, so its sign inverts.
    for account in assets {
        if classify_asset(&account.name) != AssetClass::Operating {
            continue;
        }
        let variation = account.prior - account.current;
        if variation.abs() > LINE_THRESHOLD {
            section.push(FlowLine::new(
                account.name.clone(),
                variation,
                FlowLineKind::WorkingCapital,
            ));
        }
    }

    for account in liabilities {
        if classify_liability(&account.name) != LiabilityClass::Operating {
            continue;
        }
        let variation = account.delta();
        if variation.abs() > LINE_THRESHOLD {
            section.push(FlowLine::new(
                account.name.clone(),
                variation,
                FlowLineKind::WorkingCapital,
            ));
        }
    }

    section
}

/// The period's depreciation charge, from the reserve's absolute growth
fn depreciation_add_back(assets: &[AccountView]) -> Decimal {
    let mut prior_reserve = Decimal::ZERO;
    let mut current_reserve = Decimal::ZERO;
    for account in assets {
        if classify_asset(&account.name) == AssetClass::Depreciation {
            prior_reserve += account.prior.abs();
            current_reserve += account.current.abs();
        }
    }
    current_reserve - prior_reserve
}

fn investing_section(assets: &[AccountView]) -> FlowSection {
    let mut section = FlowSection::default();
    for account in assets {
        if classify_asset(&account.name) != AssetClass::Fixed {
            continue;
        }
        // Buying a fixed asset is an outflow.
        let flow = -account.delta();
        if flow.abs() > LINE_THRESHOLD {
            section.push(FlowLine::new(
                account.name.clone(),
                flow,
                FlowLineKind::FixedAsset,
            ));
        }
    }
    section
}

fn financing_section(
    liabilities: &[AccountView],
    equity: &[AccountView],
    net_profit: Decimal,
) -> FlowSection {
    let mut section = FlowSection::default();

    for account in liabilities {
        if classify_liability(&account.name) != LiabilityClass::Financing {
            continue;
        }
        let variation = account.delta();
        if variation.abs() > LINE_THRESHOLD {
            section.push(FlowLine::new(
                account.name.clone(),
                variation,
                FlowLineKind::Financing,
            ));
        }
    }

    let mut retained_prior = Decimal::ZERO;
    let mut retained_current = Decimal::ZERO;
    for account in equity {
        match classify_equity(&account.name) {
            EquityClass::Retained => {
                retained_prior += account.prior;
                retained_current += account.current;
            }
            EquityClass::Capital => {
                let variation = account.delta();
                if variation.abs() > LINE_THRESHOLD {
                    section.push(FlowLine::new(
                        account.name.clone(),
                        variation,
                        FlowLineKind::CapitalVariation,
                    ));
                }
            }
        }
    }

    // Whatever part of the profit did not stay in retained earnings left
    // as dividends (or entered through another reconciling item). This
    // captures distributions without a dedicated dividends account.
    let dividend_adjustment = (retained_current - retained_prior) - net_profit;
    if dividend_adjustment.abs() > LINE_THRESHOLD {
        section.push(FlowLine::new(
            "Dividends / Retained-Earnings Adjustment",
            dividend_adjustment,
            FlowLineKind::DividendAdjustment,
        ));
    }

    section
}

fn reconcile(assets: &[AccountView], net_flow: Decimal) -> Reconciliation {
    let mut cash_start = Decimal::ZERO;
    let mut cash_end_actual = Decimal::ZERO;
    for account in assets {
        if classify_asset(&account.name) == AssetClass::Cash {
            cash_start += account.prior;
            cash_end_actual += account.current;
        }
    }

    let cash_end_computed = cash_start + net_flow;
    let discrepancy = cash_end_actual - cash_end_computed;
    Reconciliation {
        cash_start,
        cash_end_actual,
        cash_end_computed,
        discrepancy,
        reconciles: discrepancy.abs() < RECONCILIATION_TOLERANCE,
    }
}

/// Union of a category's accounts across both periods, amounts defaulting
/// to zero on the side where the account is absent
fn account_union(prior: &Report, current: &Report, category: Category) -> Vec<AccountView> {
    let mut merged: BTreeMap<AccountId, AccountView> = BTreeMap::new();

    for account in prior.accounts(category) {
        merged.insert(
            account.id,
            AccountView {
                name: account.name.clone(),
                prior: account.amount,
                current: Decimal::ZERO,
            },
        );
    }
    for account in current.accounts(category) {
        merged
            .entry(account.id)
            .and_modify(|view| {
                // Prefer the current period's name.
                view.name = account.name.clone();
                view.current = account.amount;
            })
            .or_insert_with(|| AccountView {
                name: account.name.clone(),
                prior: Decimal::ZERO,
                current: account.amount,
            });
    }

    merged.into_values().collect()
}
