//! Product entity model.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use prodctl_core::result::AppResult;
use prodctl_core::traits::Entity;
use prodctl_core::types::descriptor::{EntityDescriptor, FieldDef, TableIdentifier};
use prodctl_core::types::row::Row;

static DESCRIPTOR: LazyLock<EntityDescriptor> = LazyLock::new(|| {
    EntityDescriptor::builder(TableIdentifier::new("Vines", "products"), "id")
        .field(FieldDef::new("id", "ID").hidden())
        .field(
            FieldDef::new("name", "Naam")
                .describe("Naam van het product")
                .sortable(),
        )
        .field(FieldDef::new("product_group_id", "Productgroep ID").hidden())
        .field(
            FieldDef::new("product_group_name", "Productgroep")
                .describe("Naam van de productgroep")
                .sortable(),
        )
        .searchable(&["name", "product_group_name"])
        .default_sort(&["product_group_name", "name"])
        .build()
        .unwrap_or_else(|e| panic!("invalid Product descriptor: {e}"))
});

/// A product we make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Identifier of the product group.
    pub product_group_id: i64,
    /// Name of the product group.
    pub product_group_name: String,
}

impl Entity for Product {
    type Id = i64;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.int("id")?,
            name: row.text("name")?,
            product_group_id: row.int("product_group_id")?,
            product_group_name: row.text("product_group_name")?,
        })
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
