//! Account classification rules
//!
//! The cash flow engine sorts heterogeneous, free-text account names into
//! flow classes by token matching. The rules are ordered tables evaluated
//! top to bottom, with exclusions placed before inclusions: a depreciation
//! reserve never reaches the fixed-asset rule, work in process never
//! reaches either the operating or the investing rule, and cash itself is
//! only ever the reconciliation target.
//!
//! The token corpus covers English terms and the Spanish ones the source
//! books use (with and without accents).

use serde::{Deserialize, Serialize};

/// Flow class of an asset account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Cash and equivalents - the reconciliation target, never a flow line
    Cash,
    /// Accumulated depreciation / amortization - feeds the add-back
    Depreciation,
    /// Work in process / construction in progress - no flow line
    WorkInProcess,
    /// Working-capital asset - operating section
    Operating,
    /// Tangible fixed asset - investing section
    Fixed,
    /// Matched no rule - no flow line
    Other,
}

/// Flow class of a liability account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityClass {
    /// Loans and other financial debt - financing section
    Financing,
    /// Trade and accrued liabilities - operating section
    Operating,
    /// Matched no rule - no flow line
    Other,
}

/// Flow class of an equity account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityClass {
    /// Retained earnings / accumulated results - dividend reconciliation
    Retained,
    /// Everything else - capital variation lines
    Capital,
}

/// One ordered classification rule: first match wins
struct TokenRule<C> {
    class: C,
    any_of: &'static [&'static str],
    none_of: &'static [&'static str],
}

impl<C: Copy> TokenRule<C> {
    fn matches(&self, needle: &str) -> bool {
        self.any_of.iter().any(|token| needle.contains(token))
            && !self.none_of.iter().any(|token| needle.contains(token))
    }
}

const ASSET_RULES: &[TokenRule<AssetClass>] = &[
    // Exclusions first.
    TokenRule {
        class: AssetClass::Cash,
        any_of: &["cash", "caja", "bank", "banco", "treasur", "efectivo"],
        none_of: &[],
    },
    TokenRule {
        class: AssetClass::Depreciation,
        any_of: &["deprecia", "amortiza"],
        none_of: &[],
    },
    TokenRule {
        class: AssetClass::WorkInProcess,
        any_of: &[
            "work in process",
            "work-in-process",
            "in progress",
            "en proceso",
            "en curso",
        ],
        none_of: &[],
    },
    TokenRule {
        class: AssetClass::Operating,
        any_of: &[
            "client", "cliente", "receivable", "cobrar", "deudor", "inventor", "inventar",
            "existencia", "advance", "anticipo", "deposit", "deposito", "depósito", "garant",
            "tax", "iva", "vat", "impuesto",
        ],
        none_of: &[],
    },
    TokenRule {
        class: AssetClass::Fixed,
        any_of: &[
            "machin", "maquinar", "equip", "building", "edificio", "land", "terreno", "vehic",
            "vehíc", "furniture", "mobiliario", "construc", "propert", "propiedad", "planta",
        ],
        none_of: &[],
    },
];

const LIABILITY_RULES: &[TokenRule<LiabilityClass>] = &[
    // "creditor"/"acreedor" carry the financing stems but are trade debt.
    TokenRule {
        class: LiabilityClass::Financing,
        any_of: &[
            "loan", "prestamo", "préstamo", "credit", "credito", "crédito", "bank", "banco",
            "mortgage", "hipotec", "financ",
        ],
        none_of: &["creditor", "acreedor"],
    },
    TokenRule {
        class: LiabilityClass::Operating,
        any_of: &[
            "supplier", "proveedor", "creditor", "acreedor", "payable", "pagar", "tax",
            "impuesto", "withhold", "retencion", "retención", "accrued", "acumulad", "payroll",
            "nomina", "nómina", "salario",
        ],
        none_of: &[],
    },
];

const RETAINED_TOKENS: &[&str] = &[
    "retained",
    "utilidad",
    "resultado",
    "result",
    "profit",
    "loss",
    "perdida",
    "pérdida",
    "ganancia",
    "acumulad",
    "accumulat",
];

fn first_match<C: Copy>(rules: &[TokenRule<C>], name: &str, fallback: C) -> C {
    let needle = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&needle))
        .map(|rule| rule.class)
        .unwrap_or(fallback)
}

/// Classifies an asset account by name
pub fn classify_asset(name: &str) -> AssetClass {
    first_match(ASSET_RULES, name, AssetClass::Other)
}

/// Classifies a liability account by name
pub fn classify_liability(name: &str) -> LiabilityClass {
    first_match(LIABILITY_RULES, name, LiabilityClass::Other)
}

/// Classifies an equity account by name
pub fn classify_equity(name: &str) -> EquityClass {
    let needle = name.to_lowercase();
    if RETAINED_TOKENS.iter().any(|token| needle.contains(token)) {
        EquityClass::Retained
    } else {
        EquityClass::Capital
    }
}
