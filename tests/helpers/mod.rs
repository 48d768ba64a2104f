//! Shared test helpers for integration tests.
//!
//! Every test gets its own in-memory SQLite database with the `Vines` and
//! `Productie` schemas attached, reached through a single-connection pool so
//! that all statements see the same data.

#![allow(dead_code)]

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use prodctl_core::config::{LiteralDialect, PaginationConfig};
use prodctl_database::{ProductRepository, SpacingRepository, SqlEngine, SqlRepository};

const SCHEMA: &[&str] = &[
    r#"ATTACH DATABASE ':memory:' AS "Vines""#,
    r#"ATTACH DATABASE ':memory:' AS "Productie""#,
    r#"CREATE TABLE "Vines"."products" (
        "id" INTEGER PRIMARY KEY,
        "name" TEXT NOT NULL,
        "product_group_id" INTEGER NOT NULL,
        "product_group_name" TEXT NOT NULL
    )"#,
    r#"CREATE TABLE "Productie"."wijderzet_registratie" (
        "id" TEXT PRIMARY KEY,
        "partij_code" TEXT NOT NULL,
        "product_naam" TEXT NOT NULL,
        "productgroep_naam" TEXT NOT NULL,
        "datum_oppotten_real" TEXT NOT NULL,
        "datum_uit_cel_real" TEXT,
        "datum_wdz1_real" TEXT,
        "datum_wdz2_real" TEXT,
        "aantal_planten_gerealiseerd" INTEGER NOT NULL,
        "aantal_tafels_totaal" INTEGER NOT NULL,
        "aantal_tafels_na_wdz1" INTEGER,
        "aantal_tafels_na_wdz2" INTEGER,
        "aantal_tafels_oppotten_plan" REAL NOT NULL,
        "dichtheid_oppotten_plan" INTEGER NOT NULL,
        "dichtheid_wz1_plan" INTEGER,
        "dichtheid_wz2_plan" REAL,
        "wijderzet_registratie_fout" INTEGER NOT NULL
    )"#,
];

/// The three products used throughout the examples.
pub const EXAMPLE_PRODUCTS: &[(i64, &str, i64, &str)] = &[
    (1, "Rose", 10, "Flowers"),
    (2, "Tulip", 10, "Flowers"),
    (3, "Oak", 20, "Trees"),
];

/// One spacing registration row, in column order.
pub struct SpacingSeed {
    pub id: &'static str,
    pub partij_code: &'static str,
    pub product_naam: &'static str,
    pub productgroep_naam: &'static str,
    pub datum_oppotten_real: &'static str,
    pub datum_wdz1_real: Option<&'static str>,
    pub aantal_tafels_na_wdz1: Option<i64>,
    pub dichtheid_wz2_plan: Option<f64>,
    pub fout: bool,
}

/// Test database context
pub struct TestDb {
    /// Engine the repositories execute through
    pub engine: SqlEngine,
}

impl TestDb {
    /// Create a fresh in-memory database with empty tables
    pub async fn new() -> Self {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .expect("Failed to create schema");
        }

        Self {
            engine: SqlEngine::from_pool(pool, LiteralDialect::Standard),
        }
    }

    /// Database seeded with [`EXAMPLE_PRODUCTS`]
    pub async fn with_example_products() -> Self {
        let db = Self::new().await;
        db.insert_products(EXAMPLE_PRODUCTS).await;
        db
    }

    /// The underlying pool, for seeding
    pub fn pool(&self) -> &AnyPool {
        self.engine.pool()
    }

    /// Insert products
    pub async fn insert_products(&self, products: &[(i64, &str, i64, &str)]) {
        for (id, name, group_id, group_name) in products {
            sqlx::query(
                r#"INSERT INTO "Vines"."products" ("id", "name", "product_group_id", "product_group_name") VALUES (?, ?, ?, ?)"#,
            )
            .bind(*id)
            .bind(name.to_string())
            .bind(*group_id)
            .bind(group_name.to_string())
            .execute(self.pool())
            .await
            .expect("Failed to insert product");
        }
    }

    /// Insert spacing registrations
    pub async fn insert_spacing(&self, seeds: &[SpacingSeed]) {
        for seed in seeds {
            sqlx::query(
                r#"INSERT INTO "Productie"."wijderzet_registratie" VALUES
                   (?, ?, ?, ?, ?, NULL, ?, NULL, 1000, 10, ?, NULL, 10.5, 100, 50, ?, ?)"#,
            )
            .bind(seed.id.to_string())
            .bind(seed.partij_code.to_string())
            .bind(seed.product_naam.to_string())
            .bind(seed.productgroep_naam.to_string())
            .bind(seed.datum_oppotten_real.to_string())
            .bind(seed.datum_wdz1_real.map(str::to_string))
            .bind(seed.aantal_tafels_na_wdz1)
            .bind(seed.dichtheid_wz2_plan)
            .bind(i64::from(seed.fout))
            .execute(self.pool())
            .await
            .expect("Failed to insert spacing registration");
        }
    }

    /// Product repository with default limits
    pub fn products(&self) -> ProductRepository {
        SqlRepository::new(self.engine.clone(), PaginationConfig::default())
    }

    /// Product repository with custom limits
    pub fn products_with_limits(&self, limits: PaginationConfig) -> ProductRepository {
        SqlRepository::new(self.engine.clone(), limits)
    }

    /// Spacing repository with default limits
    pub fn spacing(&self) -> SpacingRepository {
        SqlRepository::new(self.engine.clone(), PaginationConfig::default())
    }
}
