//! # Promotion Module
//!
//! The fixed table of promotion codes and the outcome of applying one.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply "ndrc20"                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize: trim + uppercase ──► "NDRC20"                               │
//! │       │                                                                 │
//! │       ├── in table? ──► Applied  { code: "NDRC20", rate: 20% }          │
//! │       │                  (replaces the previous promotion)             │
//! │       │                                                                 │
//! │       └── unknown   ──► Rejected { code }                               │
//! │                          (active promotion is cleared, discount = 0)    │
//! │                                                                         │
//! │  Only ONE promotion is active at a time. Codes never stack.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::DiscountRate;
use crate::validation::validate_discount_bps;

/// Message shown to the user when a code is not recognized.
pub const INVALID_CODE_MESSAGE: &str = "Code promo invalide";

/// Normalizes user input into the form stored in the table.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Promotion Table
// =============================================================================

/// Mapping of promotion code to discount rate. Fixed at build time.
#[derive(Debug, Clone, Default)]
pub struct PromotionTable {
    codes: HashMap<String, DiscountRate>,
}

impl PromotionTable {
    /// Builds a table from `(code, rate)` pairs.
    ///
    /// Codes are normalized; rates must be below 100%.
    pub fn new<I, S>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (S, DiscountRate)>,
        S: AsRef<str>,
    {
        let mut codes = HashMap::new();

        for (code, rate) in entries {
            let code = normalize_code(code.as_ref());
            if code.is_empty() {
                return Err(ValidationError::Required {
                    field: "promo code".to_string(),
                });
            }
            validate_discount_bps(rate.bps())?;

            if codes.insert(code.clone(), rate).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "promo code".to_string(),
                    value: code,
                });
            }
        }

        Ok(PromotionTable { codes })
    }

    /// The storefront's promotion codes.
    ///
    /// | Code            | Discount |
    /// |-----------------|----------|
    /// | `NDRC20`        | 20%      |
    /// | `INSTANTANIMAL` | 99%      |
    pub fn builtin() -> Self {
        let codes = [
            ("NDRC20".to_string(), DiscountRate::from_bps(2000)),
            ("INSTANTANIMAL".to_string(), DiscountRate::from_bps(9900)),
        ]
        .into_iter()
        .collect();

        PromotionTable { codes }
    }

    /// Looks up a code (case-insensitive, surrounding whitespace ignored).
    pub fn lookup(&self, code: &str) -> Option<ActivePromotion> {
        let code = normalize_code(code);
        self.codes
            .get(&code)
            .map(|&rate| ActivePromotion { code, rate })
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Checks if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

// =============================================================================
// Active Promotion & Outcome
// =============================================================================

/// The promotion currently applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActivePromotion {
    /// Normalized code, as it appears on the quote.
    pub code: String,

    /// Discount granted by the code.
    pub rate: DiscountRate,
}

/// Result of applying a promotion code to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PromotionOutcome {
    /// The code was recognized and is now the only active promotion.
    Applied(ActivePromotion),

    /// The code was not recognized; the cart now has no discount.
    Rejected {
        /// The normalized code that was refused.
        code: String,
    },
}

impl PromotionOutcome {
    /// Returns true if the code was accepted.
    pub fn is_applied(&self) -> bool {
        matches!(self, PromotionOutcome::Applied(_))
    }

    /// Discount in effect after this outcome.
    pub fn rate(&self) -> DiscountRate {
        match self {
            PromotionOutcome::Applied(promo) => promo.rate,
            PromotionOutcome::Rejected { .. } => DiscountRate::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes() {
        let table = PromotionTable::builtin();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("NDRC20").unwrap().rate.bps(), 2000);
        assert_eq!(table.lookup("INSTANTANIMAL").unwrap().rate.bps(), 9900);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = PromotionTable::builtin();
        let promo = table.lookup("ndrc20").unwrap();
        assert_eq!(promo.code, "NDRC20");
        assert_eq!(promo.rate, DiscountRate::from_bps(2000));
        assert!(table.lookup("  Ndrc20 ").is_some());
    }

    #[test]
    fn test_unknown_code() {
        let table = PromotionTable::builtin();
        assert!(table.lookup("bogus").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        assert!(PromotionTable::new([("", DiscountRate::from_bps(100))]).is_err());
        assert!(PromotionTable::new([("FREE", DiscountRate::from_bps(10000))]).is_err());
        assert!(PromotionTable::new([
            ("SALE", DiscountRate::from_bps(1000)),
            ("sale", DiscountRate::from_bps(1500)),
        ])
        .is_err());

        let table = PromotionTable::new([("hiver10", DiscountRate::from_percent(10))]).unwrap();
        assert_eq!(table.lookup("HIVER10").unwrap().rate.bps(), 1000);
    }

    #[test]
    fn test_outcome_rate() {
        let applied = PromotionOutcome::Applied(ActivePromotion {
            code: "NDRC20".to_string(),
            rate: DiscountRate::from_bps(2000),
        });
        assert!(applied.is_applied());
        assert_eq!(applied.rate().bps(), 2000);

        let rejected = PromotionOutcome::Rejected {
            code: "BOGUS".to_string(),
        };
        assert!(!rejected.is_applied());
        assert!(rejected.rate().is_zero());
    }
}
