//! Derived Financial Analyses
//!
//! Pure functions over one or two built `Report`s. Nothing here touches
//! the ledger or mutates its input; each analysis returns a fresh,
//! serializable structure, so the same report can feed several analyses
//! concurrently.
//!
//! - **Vertical**: common-size percentages against Total Asset / Revenue
//! - **Horizontal**: account- and total-level deltas between two periods
//! - **Ratios**: liquidity, activity, leverage, profitability with
//!   optimality bands
//! - **Sources & Uses**: origin/application classification of variations
//! - **DuPont**: three-factor ROE decomposition with attribution
//! - **Pro-Forma**: percent-of-sales income projection

pub mod dupont;
pub mod horizontal;
pub mod proforma;
pub mod ratios;
pub mod sources_uses;
pub mod vertical;

pub use dupont::{dupont_analysis, DeterminingFactor, DuPontAnalysis, DuPontFactors};
pub use horizontal::{
    horizontal_analysis, AccountComparison, ComparativeAnalysis, TotalComparison,
};
pub use proforma::{
    project, ProFormaStatement, ProjectedLine, ProjectionAssumptions, DEFAULT_TAX_RATE,
};
pub use ratios::{ratio_analysis, OptimalBand, Ratio, RatioAnalysis, RatioState};
pub use sources_uses::{sources_and_uses, FundsBucket, FundsEntry, SourcesAndUses};
pub use vertical::{vertical_analysis, BaseWarning, PercentagedAccount, VerticalAnalysis};
