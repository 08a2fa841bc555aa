// 🔎 Predicate Builder - search text + three tri-state selectors
// Every active criterion must pass (logical AND)

use crate::record::BeachRecord;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown value '{value}' for {control} filter")]
    UnknownSelector {
        control: &'static str,
        value: String,
    },
}

// ============================================================================
// SELECTORS
// ============================================================================

/// Lifeguard / shower selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    All,
    Yes,
    No,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::All => "all",
            Presence::Yes => "yes",
            Presence::No => "no",
        }
    }

    pub fn matches(&self, value: bool) -> bool {
        match self {
            Presence::All => true,
            Presence::Yes => value,
            Presence::No => !value,
        }
    }

    /// all → yes → no → all
    pub fn next(&self) -> Self {
        match self {
            Presence::All => Presence::Yes,
            Presence::Yes => Presence::No,
            Presence::No => Presence::All,
        }
    }

    /// Parse with the control name reported on failure
    pub fn parse_for(control: &'static str, value: &str) -> Result<Self, CriteriaError> {
        match value {
            "all" => Ok(Presence::All),
            "yes" => Ok(Presence::Yes),
            "no" => Ok(Presence::No),
            _ => Err(CriteriaError::UnknownSelector {
                control,
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for Presence {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Presence::parse_for("presence", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeFilter {
    #[default]
    All,
    Free,
    Paid,
}

impl FeeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeFilter::All => "all",
            FeeFilter::Free => "free",
            FeeFilter::Paid => "paid",
        }
    }

    pub fn matches(&self, is_free: bool) -> bool {
        match self {
            FeeFilter::All => true,
            FeeFilter::Free => is_free,
            FeeFilter::Paid => !is_free,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FeeFilter::All => FeeFilter::Free,
            FeeFilter::Free => FeeFilter::Paid,
            FeeFilter::Paid => FeeFilter::All,
        }
    }
}

impl FromStr for FeeFilter {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FeeFilter::All),
            "free" => Ok(FeeFilter::Free),
            "paid" => Ok(FeeFilter::Paid),
            _ => Err(CriteriaError::UnknownSelector {
                control: "fee",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// CRITERIA
// ============================================================================

/// Recomputed from the controls on every input event, never stored as history
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub lifeguard: Presence,
    pub shower: Presence,
    pub fee: FeeFilter,
}

impl FilterCriteria {
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty()
            && self.lifeguard == Presence::All
            && self.shower == Presence::All
            && self.fee == FeeFilter::All
    }

    /// Build criteria from raw control values; missing selectors mean `all`
    pub fn from_controls(
        search: Option<&str>,
        lifeguard: Option<&str>,
        shower: Option<&str>,
        fee: Option<&str>,
    ) -> Result<Self, CriteriaError> {
        Ok(FilterCriteria {
            search_term: search.unwrap_or_default().to_string(),
            lifeguard: lifeguard
                .map(|v| Presence::parse_for("lifeguard", v))
                .transpose()?
                .unwrap_or_default(),
            shower: shower
                .map(|v| Presence::parse_for("shower", v))
                .transpose()?
                .unwrap_or_default(),
            fee: fee.map(str::parse::<FeeFilter>).transpose()?.unwrap_or_default(),
        })
    }
}

/// Compose the criteria into a single predicate.
///
/// The search term is lower-cased once here, not per record.
pub fn build_predicate(criteria: &FilterCriteria) -> impl Fn(&BeachRecord) -> bool {
    let term = criteria.search_term.to_lowercase();
    let lifeguard = criteria.lifeguard;
    let shower = criteria.shower;
    let fee = criteria.fee;

    move |beach: &BeachRecord| {
        let matches_search = term.is_empty()
            || beach.name.to_lowercase().contains(&term)
            || beach.address.to_lowercase().contains(&term);

        matches_search
            && lifeguard.matches(beach.has_lifeguard)
            && shower.matches(beach.has_shower)
            && fee.matches(beach.is_free)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sunset() -> BeachRecord {
        BeachRecord {
            name: "Sunset Beach".to_string(),
            address: "123 Ocean Rd".to_string(),
            open_time: "9:00-18:00".to_string(),
            has_lifeguard: true,
            has_shower: true,
            is_free: false,
            note: String::new(),
        }
    }

    fn search(term: &str) -> FilterCriteria {
        FilterCriteria {
            search_term: term.to_string(),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn test_search_matches_name_and_address_case_insensitive() {
        let beach = sunset();
        assert!(build_predicate(&search("sunset"))(&beach));
        assert!(build_predicate(&search("ocean"))(&beach));
        assert!(build_predicate(&search("SUNSET BEACH"))(&beach));
        assert!(!build_predicate(&search("sand"))(&beach));
    }

    #[test]
    fn test_search_is_not_trimmed() {
        assert!(!build_predicate(&search(" sunset "))(&sunset()));
    }

    #[test]
    fn test_empty_criteria_passes_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unfiltered());
        assert!(build_predicate(&criteria)(&sunset()));
    }

    #[test]
    fn test_selectors_are_anded() {
        let criteria = FilterCriteria {
            lifeguard: Presence::Yes,
            fee: FeeFilter::Free,
            ..FilterCriteria::default()
        };
        // lifeguard passes, fee fails
        assert!(!build_predicate(&criteria)(&sunset()));

        let criteria = FilterCriteria {
            lifeguard: Presence::Yes,
            shower: Presence::Yes,
            fee: FeeFilter::Paid,
            search_term: "ocean".to_string(),
        };
        assert!(build_predicate(&criteria)(&sunset()));
    }

    #[test]
    fn test_presence_matching() {
        assert!(Presence::All.matches(true) && Presence::All.matches(false));
        assert!(Presence::Yes.matches(true) && !Presence::Yes.matches(false));
        assert!(Presence::No.matches(false) && !Presence::No.matches(true));
    }

    #[test]
    fn test_fee_matching() {
        assert!(FeeFilter::Free.matches(true));
        assert!(!FeeFilter::Free.matches(false));
        assert!(FeeFilter::Paid.matches(false));
        assert!(!FeeFilter::Paid.matches(true));
    }

    #[test]
    fn test_from_controls() {
        let criteria =
            FilterCriteria::from_controls(Some("beach"), Some("yes"), None, Some("paid")).unwrap();
        assert_eq!(criteria.search_term, "beach");
        assert_eq!(criteria.lifeguard, Presence::Yes);
        assert_eq!(criteria.shower, Presence::All);
        assert_eq!(criteria.fee, FeeFilter::Paid);
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        let err = FilterCriteria::from_controls(None, None, Some("maybe"), None).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnknownSelector {
                control: "shower",
                value: "maybe".to_string()
            }
        );
        assert!("yes".parse::<FeeFilter>().is_err());
    }

    #[test]
    fn test_selector_cycle() {
        assert_eq!(Presence::All.next().next().next(), Presence::All);
        assert_eq!(FeeFilter::All.next(), FeeFilter::Free);
        assert_eq!(FeeFilter::Free.next(), FeeFilter::Paid);
    }
}
