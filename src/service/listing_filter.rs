use sqlx::{types::BigDecimal, Postgres, QueryBuilder};

use crate::models::filtermodel::{FilterSpec, PriceRange};
#[cfg(test)]
use crate::models::listingmodel::ListingWithLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    PriceTotal,
    PricePerAreaBasic,
    PricePerAreaDetailed,
}

impl NumericColumn {
    pub fn sql(self) -> &'static str {
        match self {
            NumericColumn::PriceTotal => "l.price_total",
            NumericColumn::PricePerAreaBasic => "l.price_per_area_basic",
            NumericColumn::PricePerAreaDetailed => "l.price_per_area_detailed",
        }
    }

    #[cfg(test)]
    fn value(self, row: &ListingWithLocation) -> Option<&BigDecimal> {
        match self {
            NumericColumn::PriceTotal => row.listing.price_total.as_ref(),
            NumericColumn::PricePerAreaBasic => row.listing.price_per_area_basic.as_ref(),
            NumericColumn::PricePerAreaDetailed => row.listing.price_per_area_detailed.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    City,
    District,
}

impl TextColumn {
    pub fn sql(self) -> &'static str {
        match self {
            TextColumn::City => "loc.city",
            TextColumn::District => "loc.district",
        }
    }

    #[cfg(test)]
    fn value(self, row: &ListingWithLocation) -> Option<&str> {
        match self {
            TextColumn::City => row.location.city.as_deref(),
            TextColumn::District => row.location.district.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
}

impl Comparison {
    fn sql(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
        }
    }

    #[cfg(test)]
    fn holds(self, value: &BigDecimal, bound: &BigDecimal) -> bool {
        match self {
            Comparison::AtLeast => value >= bound,
            Comparison::AtMost => value <= bound,
        }
    }
}

/// Boolean condition over the listing/location join.
///
/// Renders to SQL with bound parameters. Test builds can also evaluate it in
/// memory with the same null handling: a comparison against a missing value
/// is never satisfied.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    All(Vec<Condition>),
    Any(Vec<Condition>),
    NotNull(NumericColumn),
    Compare {
        column: NumericColumn,
        comparison: Comparison,
        value: BigDecimal,
    },
    RoomsIn(Vec<i32>),
    TextEquals {
        column: TextColumn,
        value: String,
    },
}

impl Condition {
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Condition::All(parts) => Self::push_joined(builder, parts, " AND ", "TRUE"),
            Condition::Any(parts) => Self::push_joined(builder, parts, " OR ", "FALSE"),
            Condition::NotNull(column) => {
                builder.push(column.sql()).push(" IS NOT NULL");
            }
            Condition::Compare {
                column,
                comparison,
                value,
            } => {
                builder
                    .push(format!("{} {} ", column.sql(), comparison.sql()))
                    .push_bind(value.clone());
            }
            Condition::RoomsIn(rooms) => {
                builder
                    .push("l.rooms = ANY(")
                    .push_bind(rooms.clone())
                    .push(")");
            }
            Condition::TextEquals { column, value } => {
                builder
                    .push(format!("{} = ", column.sql()))
                    .push_bind(value.clone());
            }
        }
    }

    fn push_joined(
        builder: &mut QueryBuilder<'_, Postgres>,
        parts: &[Condition],
        separator: &str,
        empty: &str,
    ) {
        if parts.is_empty() {
            builder.push(empty);
            return;
        }

        builder.push("(");
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                builder.push(separator);
            }
            part.push_sql(builder);
        }
        builder.push(")");
    }

    #[cfg(test)]
    pub fn matches(&self, row: &ListingWithLocation) -> bool {
        match self {
            Condition::All(parts) => parts.iter().all(|p| p.matches(row)),
            Condition::Any(parts) => parts.iter().any(|p| p.matches(row)),
            Condition::NotNull(column) => column.value(row).is_some(),
            Condition::Compare {
                column,
                comparison,
                value,
            } => column
                .value(row)
                .map_or(false, |v| comparison.holds(v, value)),
            Condition::RoomsIn(rooms) => row
                .listing
                .rooms
                .map_or(false, |r| rooms.contains(&r)),
            Condition::TextEquals { column, value } => column.value(row) == Some(value.as_str()),
        }
    }
}

/// Compiled form of a [`FilterSpec`]: one clause per constrained dimension,
/// combined with AND. No clauses means every listing matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    clauses: Vec<Condition>,
}

impl ListingFilter {
    pub fn from_spec(spec: &FilterSpec) -> Self {
        let mut clauses = Vec::new();

        if let Some(range) = &spec.price_total {
            clauses.extend(range_bounds(NumericColumn::PriceTotal, range));
        }

        if let Some(range) = spec.price_per_area.as_ref().filter(|r| !r.is_unbounded()) {
            // Either stored figure may carry the price per area; each side
            // only participates when its own column is present.
            let per_column = |column: NumericColumn| {
                let mut parts = vec![Condition::NotNull(column)];
                parts.extend(range_bounds(column, range));
                Condition::All(parts)
            };

            clauses.push(Condition::Any(vec![
                per_column(NumericColumn::PricePerAreaBasic),
                per_column(NumericColumn::PricePerAreaDetailed),
            ]));
        }

        if let Some(rooms) = spec.rooms.as_ref().filter(|r| !r.is_empty()) {
            clauses.push(Condition::RoomsIn(rooms.clone()));
        }

        if let Some(city) = trimmed(spec.city.as_deref()) {
            clauses.push(Condition::TextEquals {
                column: TextColumn::City,
                value: city,
            });
        }

        if let Some(district) = trimmed(spec.district.as_deref()) {
            clauses.push(Condition::TextEquals {
                column: TextColumn::District,
                value: district,
            });
        }

        ListingFilter { clauses }
    }

    pub fn clauses(&self) -> &[Condition] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends ` WHERE ...` to the builder, or nothing when unconstrained.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if self.clauses.is_empty() {
            return;
        }

        builder.push(" WHERE ");
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                builder.push(" AND ");
            }
            clause.push_sql(builder);
        }
    }

    #[cfg(test)]
    pub fn matches(&self, row: &ListingWithLocation) -> bool {
        self.clauses.iter().all(|c| c.matches(row))
    }
}

fn range_bounds(column: NumericColumn, range: &PriceRange) -> Vec<Condition> {
    let mut bounds = Vec::new();
    if let Some(min) = &range.min {
        bounds.push(Condition::Compare {
            column,
            comparison: Comparison::AtLeast,
            value: min.clone(),
        });
    }
    if let Some(max) = &range.max {
        bounds.push(Condition::Compare {
            column,
            comparison: Comparison::AtMost,
            value: max.clone(),
        });
    }
    bounds
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listingmodel::fixtures::{dec, listing, location, with_location};

    const BASE: &str = "SELECT l.listing_id FROM listing l JOIN location loc ON l.location_id = loc.location_id";

    fn render(filter: &ListingFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new(BASE);
        filter.push_where(&mut builder);
        builder.sql().trim_start_matches(BASE).to_string()
    }

    fn priced(
        id: i64,
        rooms: i32,
        total: &str,
        basic: Option<&str>,
        detailed: Option<&str>,
        city: &str,
        district: &str,
    ) -> ListingWithLocation {
        let mut l = listing(id);
        l.rooms = Some(rooms);
        l.price_total = Some(dec(total));
        l.price_per_area_basic = basic.map(dec);
        l.price_per_area_detailed = detailed.map(dec);
        with_location(l, location(id, Some(city), Some(district)))
    }

    fn sample() -> Vec<ListingWithLocation> {
        let missing_price = {
            let mut l = listing(100);
            l.rooms = Some(2);
            l.area = Some(dec("50.00"));
            with_location(l, location(1, Some("Warszawa"), Some("Centrum")))
        };
        let zero_area = {
            let mut l = listing(101);
            l.rooms = Some(3);
            l.area = Some(dec("0.00"));
            l.price_total = Some(dec("300000.00"));
            with_location(l, location(1, Some("Warszawa"), Some("Centrum")))
        };
        let no_location_data = {
            let mut l = listing(102);
            l.rooms = Some(1);
            with_location(l, location(4, None, None))
        };

        vec![
            priced(1, 3, "450000.00", Some("9000.00"), Some("9000.00"), "Warszawa", "Centrum"),
            priced(2, 2, "300000.00", Some("6666.67"), Some("6666.67"), "Warszawa", "Centrum"),
            priced(3, 4, "600000.00", Some("7500.00"), Some("7500.00"), "Kraków", "Centrum"),
            priced(4, 3, "500000.00", Some("7142.86"), None, "Warszawa", "Mokotów"),
            priced(5, 2, "520000.00", None, Some("8100.00"), "Warszawa", "Wola"),
            missing_price,
            zero_area,
            no_location_data,
        ]
    }

    fn matching_ids(spec: &FilterSpec) -> Vec<i64> {
        let filter = ListingFilter::from_spec(spec);
        sample()
            .iter()
            .filter(|row| filter.matches(row))
            .map(|row| row.listing.listing_id)
            .collect()
    }

    fn range(min: Option<&str>, max: Option<&str>) -> Option<PriceRange> {
        Some(PriceRange {
            min: min.map(dec),
            max: max.map(dec),
        })
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let filter = ListingFilter::from_spec(&FilterSpec::default());
        assert!(filter.is_unconstrained());
        assert_eq!(render(&filter), "");
        assert_eq!(matching_ids(&FilterSpec::default()).len(), sample().len());
    }

    #[test]
    fn test_blank_and_empty_fields_add_no_clauses() {
        let spec = FilterSpec {
            price_total: range(None, None),
            price_per_area: range(None, None),
            rooms: Some(vec![]),
            city: Some("   ".to_string()),
            district: Some(String::new()),
        };
        assert!(ListingFilter::from_spec(&spec).is_unconstrained());
    }

    #[test]
    fn test_price_total_range_excludes_missing_prices() {
        let spec = FilterSpec {
            price_total: range(Some("200000"), Some("500000")),
            ..Default::default()
        };
        assert_eq!(matching_ids(&spec), vec![1, 2, 4, 101]);

        let filter = ListingFilter::from_spec(&spec);
        assert_eq!(
            render(&filter),
            " WHERE l.price_total >= $1 AND l.price_total <= $2"
        );
    }

    #[test]
    fn test_price_total_single_bounds() {
        let min_only = FilterSpec {
            price_total: range(Some("500000"), None),
            ..Default::default()
        };
        assert_eq!(matching_ids(&min_only), vec![3, 4, 5]);

        let max_only = FilterSpec {
            price_total: range(None, Some("300000")),
            ..Default::default()
        };
        assert_eq!(matching_ids(&max_only), vec![2, 101]);
    }

    #[test]
    fn test_price_per_area_matches_either_column() {
        let spec = FilterSpec {
            price_per_area: range(Some("7000"), Some("8500")),
            ..Default::default()
        };
        // 4 only has the basic figure, 5 only the detailed one
        assert_eq!(matching_ids(&spec), vec![3, 4, 5]);

        let filter = ListingFilter::from_spec(&spec);
        assert_eq!(
            render(&filter),
            " WHERE ((l.price_per_area_basic IS NOT NULL AND l.price_per_area_basic >= $1 \
             AND l.price_per_area_basic <= $2) OR (l.price_per_area_detailed IS NOT NULL \
             AND l.price_per_area_detailed >= $3 AND l.price_per_area_detailed <= $4))"
        );
    }

    #[test]
    fn test_price_per_area_min_only_excludes_rows_without_figures() {
        let spec = FilterSpec {
            price_per_area: range(Some("5000"), None),
            ..Default::default()
        };
        // 101 has total and zero area but no stored figure, 100 has nothing
        assert_eq!(matching_ids(&spec), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rooms_set_membership() {
        let spec = FilterSpec {
            rooms: Some(vec![2, 3]),
            ..Default::default()
        };
        assert_eq!(matching_ids(&spec), vec![1, 2, 4, 5, 100, 101]);

        let filter = ListingFilter::from_spec(&spec);
        assert_eq!(render(&filter), " WHERE l.rooms = ANY($1)");
    }

    #[test]
    fn test_city_and_district_are_trimmed_but_case_sensitive() {
        let spec = FilterSpec {
            city: Some("  Warszawa ".to_string()),
            district: Some("Centrum".to_string()),
            ..Default::default()
        };
        assert_eq!(matching_ids(&spec), vec![1, 2, 100, 101]);

        let lower = FilterSpec {
            city: Some("warszawa".to_string()),
            ..Default::default()
        };
        assert!(matching_ids(&lower).is_empty());

        let filter = ListingFilter::from_spec(&spec);
        assert_eq!(
            render(&filter),
            " WHERE loc.city = $1 AND loc.district = $2"
        );
        assert_eq!(
            filter.clauses()[0],
            Condition::TextEquals {
                column: TextColumn::City,
                value: "Warszawa".to_string()
            }
        );
    }

    #[test]
    fn test_combined_dimensions_are_anded() {
        let spec = FilterSpec {
            price_total: range(Some("300000"), Some("600000")),
            price_per_area: range(Some("6000"), Some("9500")),
            rooms: Some(vec![2, 3]),
            city: Some("Warszawa".to_string()),
            district: Some("Centrum".to_string()),
        };
        assert_eq!(matching_ids(&spec), vec![1, 2]);
        assert_eq!(ListingFilter::from_spec(&spec).clauses().len(), 6);
    }

    #[test]
    fn test_no_results() {
        let spec = FilterSpec {
            price_total: range(Some("10000000"), None),
            ..Default::default()
        };
        assert!(matching_ids(&spec).is_empty());
    }

    #[test]
    fn test_empty_groups_render_as_constants() {
        let mut builder = QueryBuilder::<Postgres>::new("");
        Condition::All(vec![]).push_sql(&mut builder);
        builder.push(" ");
        Condition::Any(vec![]).push_sql(&mut builder);
        assert_eq!(builder.sql(), "TRUE FALSE");

        let row = sample().remove(0);
        assert!(Condition::All(vec![]).matches(&row));
        assert!(!Condition::Any(vec![]).matches(&row));
    }
}
