//! Shared statement fixtures

use rust_decimal_macros::dec;

use domain_report::Report;

use crate::builders::ReportBuilder;

/// The worked statement used across suites:
/// Revenue 30,812,479.51 / Cost 16,169,380.12 / Expense 12,721,291.66
/// => Gross Profit 14,643,099.39, Net Profit 1,921,807.73.
pub fn worked_statement(year: i32) -> Report {
    ReportBuilder::for_year(year)
        .with_account("Cash", "Asset", "Current Asset", dec!(9895003.78))
        .with_account("Short-term debt", "Liability", "Current Liability", dec!(3031080.27))
        .with_account("Share capital", "Equity", "Share Capital", dec!(6863923.51))
        .with_account("Sales", "Revenue", "Operating", dec!(30812479.51))
        .with_account("Cost of sales", "Cost", "Sales", dec!(16169380.12))
        .with_account("General expenses", "Expense", "Administration", dec!(12721291.66))
        .build()
}

/// A small balanced two-statement company for comparative analyses
pub fn two_period_company() -> (Report, Report) {
    let base = ReportBuilder::for_year(2022)
        .with_account("Caja", "Asset", "Current Asset", dec!(1000))
        .with_account("Clientes", "Asset", "Current Asset", dec!(400))
        .with_account("Inventario", "Asset", "Current Asset", dec!(600))
        .with_account("Maquinaria", "Asset", "Fixed Asset", dec!(2000))
        .with_account("Depreciación acumulada", "Asset", "Fixed Asset", dec!(-200))
        .with_account("Proveedores", "Liability", "Current Liability", dec!(500))
        .with_account("Préstamo bancario", "Liability", "Long-Term Liability", dec!(800))
        .with_account("Capital social", "Equity", "Capital", dec!(2000))
        .with_account("Utilidades acumuladas", "Equity", "Resultados", dec!(500))
        .with_account("Ventas", "Revenue", "Operating", dec!(5000))
        .with_account("Costo de ventas", "Cost", "Sales", dec!(3000))
        .with_account("Gastos operativos", "Expense", "Operating Expense", dec!(1500))
        .build();

    let current = ReportBuilder::for_year(2023)
        .with_account("Caja", "Asset", "Current Asset", dec!(1550))
        .with_account("Clientes", "Asset", "Current Asset", dec!(500))
        .with_account("Inventario", "Asset", "Current Asset", dec!(550))
        .with_account("Maquinaria", "Asset", "Fixed Asset", dec!(2300))
        .with_account("Depreciación acumulada", "Asset", "Fixed Asset", dec!(-350))
        .with_account("Proveedores", "Liability", "Current Liability", dec!(650))
        .with_account("Préstamo bancario", "Liability", "Long-Term Liability", dec!(1000))
        .with_account("Capital social", "Equity", "Capital", dec!(2000))
        .with_account("Utilidades acumuladas", "Equity", "Resultados", dec!(900))
        .with_account("Ventas", "Revenue", "Operating", dec!(5600))
        .with_account("Costo de ventas", "Cost", "Sales", dec!(3300))
        .with_account("Gastos operativos", "Expense", "Operating Expense", dec!(1700))
        .build();

    (base, current)
}
