//! Core types: company records, source identification, search criteria.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single business listing, normalised across sources.
///
/// `name` is the deduplication key. Every other field is optional so that
/// later sources can fill gaps left by earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Business name, as reported by the source.
    pub name: String,
    /// Comma-joined category labels.
    pub business_type: Option<String>,
    /// Formatted address used as the display location.
    pub location: Option<String>,
    /// Formatted street address.
    pub address: Option<String>,
    /// Reported revenue, either a figure or free text such as `"$1M-$5M"`.
    pub revenue: Option<Revenue>,
    /// Contact detail (phone or email).
    pub contact: Option<String>,
    /// Provenance link back to the source listing.
    pub source_url: Option<String>,
}

/// Revenue as reported by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Revenue {
    /// A numeric figure.
    Amount(f64),
    /// A free-text band or description.
    Text(String),
}

impl Revenue {
    fn is_blank(&self) -> bool {
        match self {
            Self::Amount(value) => *value == 0.0,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|value| value.trim().is_empty())
}

fn fill(existing: &mut Option<String>, incoming: &Option<String>) {
    if blank(existing) && !blank(incoming) {
        existing.clone_from(incoming);
    }
}

impl CompanyRecord {
    /// Create a record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this record has a usable deduplication key.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Fill every empty field on `self` from the matching non-empty field
    /// on `other`. Populated fields are never overwritten and `name` is
    /// left alone.
    pub fn enrich_from(&mut self, other: &CompanyRecord) {
        fill(&mut self.business_type, &other.business_type);
        fill(&mut self.location, &other.location);
        fill(&mut self.address, &other.address);
        fill(&mut self.contact, &other.contact);
        fill(&mut self.source_url, &other.source_url);

        let revenue_missing = self.revenue.as_ref().is_none_or(Revenue::is_blank);
        let revenue_offered = other.revenue.as_ref().is_some_and(|r| !r.is_blank());
        if revenue_missing && revenue_offered {
            self.revenue.clone_from(&other.revenue);
        }
    }
}

/// The sources company-scout knows how to query.
///
/// Declaration order is merge priority order: earlier sources win when two
/// sources populate the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Mapping provider text search. The only live source.
    Places,
    /// Company registry lookup. Placeholder.
    Registry,
    /// Small-business investment directory. Placeholder.
    Directory,
    /// Regulatory filings (adviser registrations). Placeholder.
    Filings,
}

impl SourceKind {
    /// Returns the short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::Registry => "registry",
            Self::Directory => "directory",
            Self::Filings => "filings",
        }
    }

    /// Returns all sources in priority order.
    pub fn all() -> &'static [SourceKind] {
        &[Self::Places, Self::Registry, Self::Directory, Self::Filings]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Criteria for one aggregate company search.
///
/// Every adapter receives the same `CompanySearch` and derives its own
/// provider-specific request from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySearch {
    /// Industry keyword, e.g. `"plumbing"`.
    pub industry: String,
    /// Optional city bias.
    pub city: Option<String>,
    /// Optional state or region bias.
    pub state: Option<String>,
    /// Maximum number of records to return.
    pub limit: usize,
}

impl CompanySearch {
    /// Create criteria for `industry` with no location bias.
    pub fn new(industry: impl Into<String>, limit: usize) -> Self {
        Self {
            industry: industry.into(),
            city: None,
            state: None,
            limit,
        }
    }

    /// Set the city bias.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state bias.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Location bias: non-blank city and state joined with `", "`.
    ///
    /// Returns `None` when neither is given.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Free-text query sent to the places provider.
    pub fn places_query(&self) -> String {
        format!("{} companies", self.industry.trim())
    }

    /// Non-blank state, if any.
    pub fn state(&self) -> Option<&str> {
        self.state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_record_has_only_name() {
        let record = CompanyRecord::named("Acme Plumbing");
        assert_eq!(record.name, "Acme Plumbing");
        assert!(record.has_name());
        assert!(record.address.is_none());
        assert!(record.source_url.is_none());
    }

    #[test]
    fn blank_name_is_not_a_key() {
        assert!(!CompanyRecord::named("").has_name());
        assert!(!CompanyRecord::named("   ").has_name());
    }

    #[test]
    fn enrich_fills_absent_fields() {
        let mut existing = CompanyRecord {
            address: Some("123 Main".into()),
            ..CompanyRecord::named("Acme")
        };
        let incoming = CompanyRecord {
            address: Some("456 Oak".into()),
            contact: Some("555-0100".into()),
            revenue: Some(Revenue::Amount(2_500_000.0)),
            ..CompanyRecord::named("Acme")
        };
        existing.enrich_from(&incoming);
        assert_eq!(existing.address.as_deref(), Some("123 Main"));
        assert_eq!(existing.contact.as_deref(), Some("555-0100"));
        assert_eq!(existing.revenue, Some(Revenue::Amount(2_500_000.0)));
    }

    #[test]
    fn enrich_treats_empty_strings_as_gaps() {
        let mut existing = CompanyRecord {
            business_type: Some(String::new()),
            ..CompanyRecord::named("Acme")
        };
        let incoming = CompanyRecord {
            business_type: Some("plumber".into()),
            location: Some("  ".into()),
            ..CompanyRecord::named("Acme")
        };
        existing.enrich_from(&incoming);
        assert_eq!(existing.business_type.as_deref(), Some("plumber"));
        assert!(existing.location.is_none());
    }

    #[test]
    fn enrich_replaces_zero_revenue() {
        let mut existing = CompanyRecord {
            revenue: Some(Revenue::Amount(0.0)),
            ..CompanyRecord::named("Acme")
        };
        let incoming = CompanyRecord {
            revenue: Some(Revenue::Text("$1M-$5M".into())),
            ..CompanyRecord::named("Acme")
        };
        existing.enrich_from(&incoming);
        assert_eq!(existing.revenue, Some(Revenue::Text("$1M-$5M".into())));
    }

    #[test]
    fn enrich_never_touches_name() {
        let mut existing = CompanyRecord::named("Acme");
        existing.enrich_from(&CompanyRecord::named("Other"));
        assert_eq!(existing.name, "Acme");
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let json = serde_json::to_value(CompanyRecord::named("Acme")).expect("serialize");
        assert_eq!(json["name"], "Acme");
        assert!(json["address"].is_null());
        assert!(json["revenue"].is_null());
        assert!(json.as_object().expect("object").contains_key("source_url"));
    }

    #[test]
    fn revenue_deserializes_number_or_text() {
        let amount: Revenue = serde_json::from_str("1200000").expect("number");
        assert_eq!(amount, Revenue::Amount(1_200_000.0));
        let text: Revenue = serde_json::from_str("\"$1M-$5M\"").expect("text");
        assert_eq!(text, Revenue::Text("$1M-$5M".into()));
    }

    #[test]
    fn source_kind_display() {
        assert_eq!(SourceKind::Places.to_string(), "places");
        assert_eq!(SourceKind::Registry.to_string(), "registry");
        assert_eq!(SourceKind::Directory.to_string(), "directory");
        assert_eq!(SourceKind::Filings.to_string(), "filings");
    }

    #[test]
    fn source_kind_all_is_priority_order() {
        let all = SourceKind::all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], SourceKind::Places);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn location_joins_city_and_state() {
        let search = CompanySearch::new("plumbing", 3)
            .with_city("Chicago")
            .with_state("IL");
        assert_eq!(search.location().as_deref(), Some("Chicago, IL"));
    }

    #[test]
    fn location_uses_whichever_part_is_present() {
        let city_only = CompanySearch::new("plumbing", 3).with_city("Chicago");
        assert_eq!(city_only.location().as_deref(), Some("Chicago"));
        let state_only = CompanySearch::new("plumbing", 3).with_state("IL");
        assert_eq!(state_only.location().as_deref(), Some("IL"));
    }

    #[test]
    fn location_absent_when_blank() {
        let search = CompanySearch::new("plumbing", 3)
            .with_city("")
            .with_state("  ");
        assert!(search.location().is_none());
        assert!(search.state().is_none());
        assert!(CompanySearch::new("plumbing", 3).location().is_none());
    }

    #[test]
    fn places_query_appends_companies() {
        let search = CompanySearch::new("plumbing", 3);
        assert_eq!(search.places_query(), "plumbing companies");
    }
}
