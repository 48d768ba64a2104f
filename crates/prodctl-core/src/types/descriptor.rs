//! Static per-entity metadata: storage location, declared fields,
//! searchable fields, and default ordering.
//!
//! A descriptor is built once per entity type and never mutated. Every name
//! it holds is checked at construction so that anything later embedded into
//! a statement as an identifier is a declared, plain SQL identifier.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Schema-qualified table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableIdentifier {
    /// Optional schema (Dremio space / folder).
    pub schema: Option<&'static str>,
    /// Table or view name.
    pub name: &'static str,
}

impl TableIdentifier {
    /// A table inside a schema.
    pub const fn new(schema: &'static str, name: &'static str) -> Self {
        Self {
            schema: Some(schema),
            name,
        }
    }

    /// A table without schema qualification.
    pub const fn unqualified(name: &'static str) -> Self {
        Self { schema: None, name }
    }

    /// Render as a quoted SQL identifier, e.g. `"Vines"."products"`.
    pub fn to_sql(&self) -> String {
        match self.schema {
            Some(schema) => format!("{}.{}", quote_identifier(schema), quote_identifier(self.name)),
            None => quote_identifier(self.name),
        }
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Type a column is converted to in the select list.
///
/// Used for columns whose native type the engine driver cannot decode
/// (UUID, DATE, NUMERIC). Text columns are parsed by the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlCast {
    /// `VARCHAR`
    Text,
    /// `DOUBLE PRECISION`
    Double,
}

impl SqlCast {
    /// The SQL type name.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Text => "VARCHAR",
            Self::Double => "DOUBLE PRECISION",
        }
    }
}

/// A declared entity field with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Column name.
    pub name: &'static str,
    /// Human-readable column title.
    pub title: &'static str,
    /// Longer description of the column.
    pub description: Option<&'static str>,
    /// Whether a UI should offer sorting on this column.
    pub sortable: bool,
    /// Whether a UI should hide this column.
    pub hidden: bool,
    /// Conversion applied when the column is selected.
    pub cast: Option<SqlCast>,
}

impl FieldDef {
    /// A visible, non-sortable field.
    pub const fn new(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            description: None,
            sortable: false,
            hidden: false,
            cast: None,
        }
    }

    /// Attach a description.
    pub const fn describe(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    /// Mark the field as sortable in the UI.
    pub const fn sortable(self) -> Self {
        Self {
            sortable: true,
            ..self
        }
    }

    /// Mark the field as hidden in the UI.
    pub const fn hidden(self) -> Self {
        Self {
            hidden: true,
            ..self
        }
    }

    /// Select the column as text.
    pub const fn as_text(self) -> Self {
        Self {
            cast: Some(SqlCast::Text),
            ..self
        }
    }

    /// Select the column as a double-precision float.
    pub const fn as_double(self) -> Self {
        Self {
            cast: Some(SqlCast::Double),
            ..self
        }
    }

    /// Select-list expression for this column, aliased back to its name.
    pub fn select_expr(&self) -> String {
        let column = quote_identifier(self.name);
        match self.cast {
            Some(cast) => format!("CAST({column} AS {}) AS {column}", cast.as_sql()),
            None => column,
        }
    }
}

/// Misconfiguration detected while building a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// A name is not a plain SQL identifier.
    #[error("'{0}' is not a plain SQL identifier")]
    InvalidIdentifier(String),
    /// The same field was declared twice.
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    /// A referenced field is not declared on the entity.
    #[error("{role} field '{field}' is not a declared field")]
    UnknownField {
        /// Where the name was referenced.
        role: &'static str,
        /// The offending name.
        field: String,
    },
    /// The entity declares no fields.
    #[error("entity declares no fields")]
    NoFields,
    /// No default ordering was given.
    #[error("default sort fields must not be empty")]
    EmptyDefaultSort,
}

/// Immutable description of an entity type.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDescriptor {
    table: TableIdentifier,
    primary_key: &'static str,
    fields: Vec<FieldDef>,
    searchable_fields: Vec<&'static str>,
    default_sort_fields: Vec<&'static str>,
}

impl EntityDescriptor {
    /// Start building a descriptor for a table keyed by `primary_key`.
    pub fn builder(table: TableIdentifier, primary_key: &'static str) -> DescriptorBuilder {
        DescriptorBuilder {
            table,
            primary_key,
            fields: Vec::new(),
            searchable_fields: Vec::new(),
            default_sort_fields: Vec::new(),
        }
    }

    /// Storage location.
    pub fn table(&self) -> &TableIdentifier {
        &self.table
    }

    /// The primary identity column.
    pub fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Fields matched by free-text filtering, in declared order.
    pub fn searchable_fields(&self) -> &[&'static str] {
        &self.searchable_fields
    }

    /// Ordering used when no explicit sort is requested.
    pub fn default_sort_fields(&self) -> &[&'static str] {
        &self.default_sort_fields
    }

    /// Look up a declared field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Map an untrusted name onto the descriptor's own field name.
    ///
    /// The returned string is the declared `'static` name, never the input.
    pub fn resolve_field(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|f| f.name)
    }

    /// Whether `name` participates in free-text filtering.
    pub fn is_searchable(&self, name: &str) -> bool {
        self.searchable_fields.contains(&name)
    }
}

/// Builder for [`EntityDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    table: TableIdentifier,
    primary_key: &'static str,
    fields: Vec<FieldDef>,
    searchable_fields: Vec<&'static str>,
    default_sort_fields: Vec<&'static str>,
}

impl DescriptorBuilder {
    /// Declare a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the fields matched by free-text filtering.
    pub fn searchable(mut self, names: &[&'static str]) -> Self {
        self.searchable_fields = names.to_vec();
        self
    }

    /// Set the default ordering.
    pub fn default_sort(mut self, names: &[&'static str]) -> Self {
        self.default_sort_fields = names.to_vec();
        self
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> Result<EntityDescriptor, DescriptorError> {
        if self.fields.is_empty() {
            return Err(DescriptorError::NoFields);
        }

        let table_parts = self.table.schema.into_iter().chain([self.table.name]);
        for name in table_parts {
            ensure_identifier(name)?;
        }

        let mut declared = HashSet::new();
        for field in &self.fields {
            ensure_identifier(field.name)?;
            if !declared.insert(field.name) {
                return Err(DescriptorError::DuplicateField(field.name.to_string()));
            }
        }

        ensure_declared(&declared, "primary key", &[self.primary_key])?;
        ensure_declared(&declared, "searchable", &self.searchable_fields)?;
        ensure_unique(&self.searchable_fields)?;

        if self.default_sort_fields.is_empty() {
            return Err(DescriptorError::EmptyDefaultSort);
        }
        ensure_declared(&declared, "default sort", &self.default_sort_fields)?;
        ensure_unique(&self.default_sort_fields)?;

        Ok(EntityDescriptor {
            table: self.table,
            primary_key: self.primary_key,
            fields: self.fields,
            searchable_fields: self.searchable_fields,
            default_sort_fields: self.default_sort_fields,
        })
    }
}

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Double-quote a validated identifier.
///
/// Only ever called with names that passed [`is_plain_identifier`], so the
/// result never contains an embedded quote.
pub fn quote_identifier(name: &str) -> String {
    debug_assert!(is_plain_identifier(name), "unvalidated identifier {name:?}");
    format!("\"{name}\"")
}

fn ensure_identifier(name: &str) -> Result<(), DescriptorError> {
    if is_plain_identifier(name) {
        Ok(())
    } else {
        Err(DescriptorError::InvalidIdentifier(name.to_string()))
    }
}

fn ensure_declared(
    declared: &HashSet<&'static str>,
    role: &'static str,
    names: &[&'static str],
) -> Result<(), DescriptorError> {
    match names.iter().find(|n| !declared.contains(*n)) {
        Some(unknown) => Err(DescriptorError::UnknownField {
            role,
            field: unknown.to_string(),
        }),
        None => Ok(()),
    }
}

fn ensure_unique(names: &[&'static str]) -> Result<(), DescriptorError> {
    let mut seen = HashSet::new();
    match names.iter().find(|n| !seen.insert(**n)) {
        Some(dup) => Err(DescriptorError::DuplicateField(dup.to_string())),
        None => Ok(()),
    }
}
