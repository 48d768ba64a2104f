//! Select, count and lookup statements for one entity type.
//!
//! Identifiers come from the entity descriptor, which only holds validated
//! plain identifiers. Values (filter text, identities) always pass through
//! [`quote_literal`]. Page bounds are integers after normalization.

use std::fmt;

use prodctl_core::config::LiteralDialect;
use prodctl_core::result::AppResult;
use prodctl_core::types::descriptor::{EntityDescriptor, FieldDef, quote_identifier};
use prodctl_core::types::filter::{LIKE_ESCAPE, SearchText};
use prodctl_core::types::pagination::NormalizedRequest;
use prodctl_core::types::sorting::SortDirection;

use super::literal::quote_literal;

/// Predicate used when a filter is given but nothing is searchable.
const MATCH_NOTHING: &str = "1 = 0";

/// The select and count statements for one page request.
///
/// Both are derived from the same predicate, so the count always describes
/// the result set the page was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatements {
    /// Statement returning the rows of the requested page.
    pub select: String,
    /// Statement returning the number of matching records.
    pub count: String,
}

/// Builds statements for the entity described by `descriptor`.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    descriptor: &'a EntityDescriptor,
    dialect: LiteralDialect,
}

impl<'a> QueryBuilder<'a> {
    /// Create a builder for an entity and a backend literal dialect.
    pub fn new(descriptor: &'a EntityDescriptor, dialect: LiteralDialect) -> Self {
        Self {
            descriptor,
            dialect,
        }
    }

    /// Case-insensitive "contains" match on every searchable field, OR-combined.
    ///
    /// Returns `None` when there is no filter. Case folding is the backend's
    /// `LOWER`: SQLite folds ASCII letters only, PostgreSQL follows the
    /// database locale.
    pub fn filter_predicate(&self, filter: Option<&SearchText>) -> AppResult<Option<String>> {
        let Some(filter) = filter else {
            return Ok(None);
        };

        let fields = self.descriptor.searchable_fields();
        if fields.is_empty() {
            return Ok(Some(MATCH_NOTHING.to_string()));
        }

        let pattern = quote_literal(&filter.contains_pattern(), self.dialect)?;
        let comparisons: Vec<String> = fields
            .iter()
            .map(|field| {
                format!(
                    "LOWER({}) LIKE LOWER({pattern}) ESCAPE '{LIKE_ESCAPE}'",
                    quote_identifier(field)
                )
            })
            .collect();

        Ok(Some(format!("({})", comparisons.join(" OR "))))
    }

    /// `ORDER BY` clause for a requested field or the default ordering.
    ///
    /// The direction applies to every ordering field. The primary key is
    /// appended as a final tiebreaker so that pages never overlap.
    pub fn order_by(&self, sort_by: Option<&'static str>, direction: SortDirection) -> String {
        let mut fields: Vec<&str> = match sort_by {
            Some(field) => vec![field],
            None => self.descriptor.default_sort_fields().to_vec(),
        };
        let primary_key = self.descriptor.primary_key();
        if !fields.contains(&primary_key) {
            fields.push(primary_key);
        }

        let terms: Vec<String> = fields
            .iter()
            .map(|field| format!("{} {}", quote_identifier(field), direction.as_sql()))
            .collect();
        format!("ORDER BY {}", terms.join(", "))
    }

    /// Select statement with optional predicate, ordering and page window.
    pub fn build_select(
        &self,
        predicate: Option<&str>,
        order_by: &str,
        window: Option<&NormalizedRequest>,
    ) -> String {
        let columns: Vec<String> = self
            .descriptor
            .fields()
            .iter()
            .map(FieldDef::select_expr)
            .collect();
        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            self.descriptor.table().to_sql()
        );
        push_where(&mut sql, predicate);
        sql.push(' ');
        sql.push_str(order_by);
        if let Some(request) = window {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", request.limit(), request.offset()));
        }
        sql
    }

    /// Count of distinct primary keys matching `predicate`.
    pub fn build_count(&self, predicate: Option<&str>) -> String {
        let mut sql = format!(
            "SELECT COUNT(DISTINCT {}) AS \"total\" FROM {}",
            quote_identifier(self.descriptor.primary_key()),
            self.descriptor.table().to_sql()
        );
        push_where(&mut sql, predicate);
        sql
    }

    /// Every record, default ordering, no filter, no window.
    pub fn select_all(&self) -> String {
        let order_by = self.order_by(None, SortDirection::Asc);
        self.build_select(None, &order_by, None)
    }

    /// Select and count statements for one normalized request.
    pub fn page(&self, request: &NormalizedRequest) -> AppResult<PageStatements> {
        let predicate = self.filter_predicate(request.filter.as_ref())?;
        let order_by = self.order_by(request.sort_by, request.direction);
        Ok(PageStatements {
            select: self.build_select(predicate.as_deref(), &order_by, Some(request)),
            count: self.build_count(predicate.as_deref()),
        })
    }

    /// Count statement for an optional filter.
    pub fn count(&self, filter: Option<&SearchText>) -> AppResult<String> {
        let predicate = self.filter_predicate(filter)?;
        Ok(self.build_count(predicate.as_deref()))
    }

    /// Lookup of one record by primary identity.
    ///
    /// The identity is rendered with `Display` and quoted like any other
    /// untrusted value, whatever its type.
    pub fn select_by_id(&self, id: &dyn fmt::Display) -> AppResult<String> {
        let predicate = format!(
            "{} = {}",
            quote_identifier(self.descriptor.primary_key()),
            quote_literal(&id.to_string(), self.dialect)?
        );
        let order_by = self.order_by(None, SortDirection::Asc);
        let mut sql = self.build_select(Some(&predicate), &order_by, None);
        sql.push_str(" LIMIT 1");
        Ok(sql)
    }
}

fn push_where(sql: &mut String, predicate: Option<&str>) {
    if let Some(predicate) = predicate {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodctl_core::config::PaginationConfig;
    use prodctl_core::traits::Entity;
    use prodctl_core::types::pagination::PageRequest;
    use prodctl_core::ErrorKind;
    use prodctl_entity::Product;

    const COLUMNS: &str = r#""id", "name", "product_group_id", "product_group_name""#;
    const DEFAULT_ORDER: &str =
        r#"ORDER BY "product_group_name" ASC, "name" ASC, "id" ASC"#;

    fn builder() -> QueryBuilder<'static> {
        QueryBuilder::new(Product::descriptor(), LiteralDialect::Standard)
    }

    fn normalize(request: PageRequest) -> NormalizedRequest {
        request.normalize(Product::descriptor(), &PaginationConfig::default())
    }

    #[test]
    fn test_no_filter_no_predicate() {
        assert_eq!(builder().filter_predicate(None).unwrap(), None);
    }

    #[test]
    fn test_filter_predicate_ors_searchable_fields() {
        let filter = SearchText::new(Some("ro"));
        let predicate = builder().filter_predicate(filter.as_ref()).unwrap().unwrap();
        assert_eq!(
            predicate,
            r#"(LOWER("name") LIKE LOWER('%ro%') ESCAPE '!' OR LOWER("product_group_name") LIKE LOWER('%ro%') ESCAPE '!')"#
        );
    }

    #[test]
    fn test_filter_injection_stays_inside_literal() {
        let filter = SearchText::new(Some("' OR 1=1 --"));
        let predicate = builder().filter_predicate(filter.as_ref()).unwrap().unwrap();
        assert_eq!(
            predicate,
            r#"(LOWER("name") LIKE LOWER('%'' OR 1=1 --%') ESCAPE '!' OR LOWER("product_group_name") LIKE LOWER('%'' OR 1=1 --%') ESCAPE '!')"#
        );
    }

    #[test]
    fn test_filter_with_control_character_is_rejected() {
        let filter = SearchText::new(Some("ro\0se"));
        let err = builder().filter_predicate(filter.as_ref()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EscapingBoundary);
    }

    #[test]
    fn test_default_order() {
        assert_eq!(builder().order_by(None, SortDirection::Asc), DEFAULT_ORDER);
    }

    #[test]
    fn test_requested_order_applies_direction_uniformly() {
        assert_eq!(
            builder().order_by(Some("name"), SortDirection::Desc),
            r#"ORDER BY "name" DESC, "id" DESC"#
        );
        assert_eq!(
            builder().order_by(None, SortDirection::Desc),
            r#"ORDER BY "product_group_name" DESC, "name" DESC, "id" DESC"#
        );
    }

    #[test]
    fn test_primary_key_is_not_repeated() {
        assert_eq!(
            builder().order_by(Some("id"), SortDirection::Asc),
            r#"ORDER BY "id" ASC"#
        );
    }

    #[test]
    fn test_select_all() {
        assert_eq!(
            builder().select_all(),
            format!(r#"SELECT {COLUMNS} FROM "Vines"."products" {DEFAULT_ORDER}"#)
        );
    }

    #[test]
    fn test_page_statements_share_predicate() {
        let request = normalize(PageRequest::new(2, 5).with_filter("ro"));
        let statements = builder().page(&request).unwrap();
        let predicate = builder()
            .filter_predicate(request.filter.as_ref())
            .unwrap()
            .unwrap();

        assert_eq!(
            statements.select,
            format!(
                r#"SELECT {COLUMNS} FROM "Vines"."products" WHERE {predicate} {DEFAULT_ORDER} LIMIT 5 OFFSET 5"#
            )
        );
        assert_eq!(
            statements.count,
            format!(r#"SELECT COUNT(DISTINCT "id") AS "total" FROM "Vines"."products" WHERE {predicate}"#)
        );
    }

    #[test]
    fn test_page_without_filter() {
        let request = normalize(PageRequest::new(1, 10).with_sort("name").with_descending(true));
        let statements = builder().page(&request).unwrap();
        assert_eq!(
            statements.select,
            format!(
                r#"SELECT {COLUMNS} FROM "Vines"."products" ORDER BY "name" DESC, "id" DESC LIMIT 10 OFFSET 0"#
            )
        );
        assert_eq!(
            statements.count,
            r#"SELECT COUNT(DISTINCT "id") AS "total" FROM "Vines"."products""#
        );
    }

    #[test]
    fn test_unknown_sort_uses_default_order() {
        let request = normalize(PageRequest::new(1, 10).with_sort("name; DROP TABLE products"));
        let statements = builder().page(&request).unwrap();
        assert!(statements.select.contains(DEFAULT_ORDER));
        assert!(!statements.select.contains("DROP"));
    }

    #[test]
    fn test_select_by_id_quotes_identity() {
        assert_eq!(
            builder().select_by_id(&42_i64).unwrap(),
            format!(
                r#"SELECT {COLUMNS} FROM "Vines"."products" WHERE "id" = '42' {DEFAULT_ORDER} LIMIT 1"#
            )
        );
        let hostile = "1' OR '1'='1";
        let sql = builder().select_by_id(&hostile).unwrap();
        assert!(sql.contains(r#"WHERE "id" = '1'' OR ''1''=''1' "#));
    }

    #[test]
    fn test_cast_columns_keep_their_names() {
        use prodctl_core::types::descriptor::TableIdentifier;

        let descriptor = EntityDescriptor::builder(TableIdentifier::new("Productie", "batches"), "id")
            .field(FieldDef::new("id", "ID").as_text())
            .field(FieldDef::new("potted", "Oppotdatum").as_text())
            .field(FieldDef::new("density", "Dichtheid").as_double())
            .searchable(&["id"])
            .default_sort(&["potted"])
            .build()
            .unwrap();
        let builder = QueryBuilder::new(&descriptor, LiteralDialect::Standard);

        let filter = SearchText::new(Some("ab"));
        let predicate = builder.filter_predicate(filter.as_ref()).unwrap().unwrap();
        assert_eq!(predicate, r#"(LOWER("id") LIKE LOWER('%ab%') ESCAPE '!')"#);

        assert_eq!(
            builder.select_all(),
            r#"SELECT CAST("id" AS VARCHAR) AS "id", CAST("potted" AS VARCHAR) AS "potted", CAST("density" AS DOUBLE PRECISION) AS "density" FROM "Productie"."batches" ORDER BY "potted" ASC, "id" ASC"#
        );
    }

    #[test]
    fn test_empty_searchable_set_matches_nothing() {
        use prodctl_core::types::descriptor::TableIdentifier;

        let descriptor = EntityDescriptor::builder(TableIdentifier::unqualified("codes"), "code")
            .field(FieldDef::new("code", "Code"))
            .default_sort(&["code"])
            .build()
            .unwrap();
        let builder = QueryBuilder::new(&descriptor, LiteralDialect::Standard);
        let filter = SearchText::new(Some("x"));
        assert_eq!(
            builder.filter_predicate(filter.as_ref()).unwrap().as_deref(),
            Some(MATCH_NOTHING)
        );
    }
}
