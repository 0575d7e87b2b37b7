//! Search fields and option lists

use std::collections::BTreeSet;

use salesdesk_domain::{impl_label_conversions, Record};

/// Fields an opportunity search can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    OpportunityName,
    Company,
    SalesName,
    PresalesAccountManager,
    Pillar,
    Solution,
    Brand,
}

impl_label_conversions!(SearchField {
    OpportunityName => "Opportunity Name",
    Company => "Company",
    SalesName => "Sales Name",
    PresalesAccountManager => "Presales Account Manager",
    Pillar => "Pillar",
    Solution => "Solution",
    Brand => "Brand",
});

impl SearchField {
    pub const ALL: [Self; 7] = [
        Self::OpportunityName,
        Self::Company,
        Self::SalesName,
        Self::PresalesAccountManager,
        Self::Pillar,
        Self::Solution,
        Self::Brand,
    ];

    /// Column / query parameter the field maps to.
    pub const fn column(self) -> &'static str {
        match self {
            Self::OpportunityName => "opportunity_name",
            Self::Company => "company_name",
            Self::SalesName => "sales_name",
            Self::PresalesAccountManager => "responsible_name",
            Self::Pillar => "pillar",
            Self::Solution => "solution",
            Self::Brand => "brand",
        }
    }
}

/// Sorted, de-duplicated values of `field` across `rows`, exactly as
/// stored. Blank values are skipped.
pub fn search_options(rows: &[Record], field: SearchField) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.text(field.column()))
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
