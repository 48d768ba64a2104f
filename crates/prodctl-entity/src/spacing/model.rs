//! Spacing registration entity model.
//!
//! One record per batch ("partij"): the realised potting and spacing dates,
//! the planned densities, and the number of tables in use after each
//! spacing round.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use prodctl_core::result::AppResult;
use prodctl_core::traits::Entity;
use prodctl_core::types::descriptor::{EntityDescriptor, FieldDef, TableIdentifier};
use prodctl_core::types::row::Row;

static DESCRIPTOR: LazyLock<EntityDescriptor> = LazyLock::new(|| {
    EntityDescriptor::builder(
        TableIdentifier::new("Productie", "wijderzet_registratie"),
        "id",
    )
    .field(FieldDef::new("id", "ID").hidden().as_text())
    .field(FieldDef::new("partij_code", "Partij").sortable())
    .field(FieldDef::new("product_naam", "Product").sortable())
    .field(FieldDef::new("productgroep_naam", "Productgroep").sortable())
    .field(FieldDef::new("datum_oppotten_real", "Oppotdatum").sortable().as_text())
    .field(FieldDef::new("datum_uit_cel_real", "Uit cel").sortable().as_text())
    .field(FieldDef::new("datum_wdz1_real", "Wijderzet 1").sortable().as_text())
    .field(FieldDef::new("datum_wdz2_real", "Wijderzet 2").sortable().as_text())
    .field(FieldDef::new("aantal_planten_gerealiseerd", "Planten").sortable())
    .field(FieldDef::new("aantal_tafels_totaal", "Tafels totaal").sortable())
    .field(FieldDef::new("aantal_tafels_na_wdz1", "Tafels na WZ1").sortable())
    .field(FieldDef::new("aantal_tafels_na_wdz2", "Tafels na WZ2").sortable())
    .field(FieldDef::new("aantal_tafels_oppotten_plan", "Tafels plan").sortable().as_double())
    .field(FieldDef::new("dichtheid_oppotten_plan", "Dichtheid oppotten").sortable())
    .field(FieldDef::new("dichtheid_wz1_plan", "Dichtheid WZ1").sortable())
    .field(FieldDef::new("dichtheid_wz2_plan", "Dichtheid WZ2").sortable().as_double())
    .field(
        FieldDef::new("wijderzet_registratie_fout", "Fout")
            .describe("Registratie bevat een fout")
            .sortable(),
    )
    .searchable(&["partij_code", "product_naam", "productgroep_naam"])
    .default_sort(&["datum_oppotten_real", "partij_code"])
    .build()
    .unwrap_or_else(|e| panic!("invalid SpacingRecord descriptor: {e}"))
});

/// A spacing registration for one batch of plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingRecord {
    /// Unique registration identifier.
    pub id: Uuid,
    /// Batch code.
    pub partij_code: String,
    /// Product name.
    pub product_naam: String,
    /// Product group name.
    pub productgroep_naam: String,
    /// Realised potting date.
    pub datum_oppotten_real: NaiveDate,
    /// Realised date the batch left the growth cell.
    pub datum_uit_cel_real: Option<NaiveDate>,
    /// Realised date of the first spacing round.
    pub datum_wdz1_real: Option<NaiveDate>,
    /// Realised date of the second spacing round.
    pub datum_wdz2_real: Option<NaiveDate>,
    /// Number of plants realised.
    pub aantal_planten_gerealiseerd: i64,
    /// Total number of tables.
    pub aantal_tafels_totaal: i64,
    /// Tables in use after the first spacing round.
    pub aantal_tafels_na_wdz1: Option<i64>,
    /// Tables in use after the second spacing round.
    pub aantal_tafels_na_wdz2: Option<i64>,
    /// Planned number of tables at potting.
    pub aantal_tafels_oppotten_plan: f64,
    /// Planned density at potting (plants per table).
    pub dichtheid_oppotten_plan: i64,
    /// Planned density after the first spacing round.
    pub dichtheid_wz1_plan: Option<i64>,
    /// Planned density after the second spacing round.
    pub dichtheid_wz2_plan: Option<f64>,
    /// Whether the registration was flagged as erroneous.
    pub wijderzet_registratie_fout: bool,
}

impl Entity for SpacingRecord {
    type Id = Uuid;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_row(row: &Row) -> AppResult<Self> {
        Ok(Self {
            id: row.uuid("id")?,
            partij_code: row.text("partij_code")?,
            product_naam: row.text("product_naam")?,
            productgroep_naam: row.text("productgroep_naam")?,
            datum_oppotten_real: row.date("datum_oppotten_real")?,
            datum_uit_cel_real: row.opt_date("datum_uit_cel_real")?,
            datum_wdz1_real: row.opt_date("datum_wdz1_real")?,
            datum_wdz2_real: row.opt_date("datum_wdz2_real")?,
            aantal_planten_gerealiseerd: row.int("aantal_planten_gerealiseerd")?,
            aantal_tafels_totaal: row.int("aantal_tafels_totaal")?,
            aantal_tafels_na_wdz1: row.opt_int("aantal_tafels_na_wdz1")?,
            aantal_tafels_na_wdz2: row.opt_int("aantal_tafels_na_wdz2")?,
            aantal_tafels_oppotten_plan: row.float("aantal_tafels_oppotten_plan")?,
            dichtheid_oppotten_plan: row.int("dichtheid_oppotten_plan")?,
            dichtheid_wz1_plan: row.opt_int("dichtheid_wz1_plan")?,
            dichtheid_wz2_plan: row.opt_float("dichtheid_wz2_plan")?,
            wijderzet_registratie_fout: row.bool("wijderzet_registratie_fout")?,
        })
    }

    fn id(&self) -> &Uuid {
        &self.id
    }
}
