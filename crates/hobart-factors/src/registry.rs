//! Factor Registry
//!
//! Static metadata for the eight factor columns, read off the engine's own
//! factor instances so names and windows cannot drift.

use crate::{
    engine::FactorEngine,
    traits::{Factor, FactorKind},
};
use serde::Serialize;

/// Factor metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorInfo {
    /// Output column name (unique identifier)
    pub name: &'static str,
    /// Brief description of what the factor measures
    pub description: &'static str,
    /// Feature or label
    pub kind: FactorKind,
    /// Prior rows needed before the first defined value
    pub lookback: usize,
    /// Future rows read at each date
    pub lookahead: usize,
}

impl From<&dyn Factor> for FactorInfo {
    fn from(factor: &dyn Factor) -> Self {
        Self {
            name: factor.name(),
            description: factor.description(),
            kind: factor.kind(),
            lookback: factor.lookback(),
            lookahead: factor.lookahead(),
        }
    }
}

/// Get all available factor info, in output column order
pub fn available_factors() -> Vec<FactorInfo> {
    FactorEngine::new()
        .factors()
        .into_iter()
        .map(FactorInfo::from)
        .collect()
}

/// Get factors by kind
pub fn factors_by_kind(kind: FactorKind) -> Vec<FactorInfo> {
    available_factors()
        .into_iter()
        .filter(|f| f.kind == kind)
        .collect()
}

/// Get factor info by name
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors().into_iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FactorColumn;
    use rstest::rstest;

    #[test]
    fn test_available_factors_count() {
        assert_eq!(available_factors().len(), 8);
    }

    #[test]
    fn test_registry_matches_output_columns() {
        let names: Vec<_> = available_factors().into_iter().map(|f| f.name).collect();
        let columns: Vec<_> = FactorColumn::ALL.into_iter().map(FactorColumn::name).collect();
        assert_eq!(names, columns);
    }

    #[test]
    fn test_factors_by_kind() {
        assert_eq!(factors_by_kind(FactorKind::Feature).len(), 7);

        let labels = factors_by_kind(FactorKind::Label);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "ret_fwd_5d");
    }

    #[rstest]
    #[case("ret_1d", 1, 0)]
    #[case("ret_fwd_5d", 0, 5)]
    #[case("mom_20d", 20, 0)]
    #[case("mom_60d", 60, 0)]
    #[case("vol_20d", 20, 0)]
    #[case("zscore_20d_price", 19, 0)]
    #[case("adv_20d", 19, 0)]
    #[case("dollar_vol_20d", 19, 0)]
    fn test_windows(#[case] name: &str, #[case] lookback: usize, #[case] lookahead: usize) {
        let info = get_factor_info(name).unwrap();
        assert_eq!(info.lookback, lookback);
        assert_eq!(info.lookahead, lookahead);
        assert_eq!(info.kind, FactorColumn::from_name(name).unwrap().kind());
    }

    #[test]
    fn test_unknown_factor() {
        assert!(get_factor_info("book_to_price").is_none());
    }

    #[test]
    fn test_all_factors_have_descriptions() {
        for factor in available_factors() {
            assert!(
                !factor.description.is_empty(),
                "Factor {} has no description",
                factor.name
            );
        }
    }
}
