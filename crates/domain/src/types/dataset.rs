//! Group-scoped GET actions

use crate::impl_label_conversions;

/// Dataset actions fetched with `?action=<label>&sales_group=<group>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    SalesNames,
    Leads,
    LeadsBySales,
    ActivityLog,
    Opportunities,
    Companies,
    SalesGroups,
    Responsibles,
    Pillars,
    Brands,
}

impl_label_conversions!(Dataset {
    SalesNames => "getSalesNames",
    Leads => "leads",
    LeadsBySales => "leadBySales",
    ActivityLog => "getSalesActivityLog",
    Opportunities => "getOpportunities",
    Companies => "getCompanies",
    SalesGroups => "getSalesGroups",
    Responsibles => "getResponsibles",
    Pillars => "getPillars",
    Brands => "getBrands",
});

impl Dataset {
    /// Reference lists that can be browsed as-is.
    pub const LOOKUPS: [Self; 6] = [
        Self::Opportunities,
        Self::Companies,
        Self::SalesGroups,
        Self::Responsibles,
        Self::Pillars,
        Self::Brands,
    ];

    pub fn is_lookup(self) -> bool {
        Self::LOOKUPS.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_backend_actions() {
        assert_eq!(Dataset::LeadsBySales.label(), "leadBySales");
        assert_eq!(Dataset::ActivityLog.to_string(), "getSalesActivityLog");
        assert_eq!("getbrands".parse::<Dataset>().unwrap(), Dataset::Brands);
    }

    #[test]
    fn only_reference_lists_are_lookups() {
        assert!(Dataset::Pillars.is_lookup());
        assert!(!Dataset::Leads.is_lookup());
        assert!(!Dataset::SalesNames.is_lookup());
    }
}
