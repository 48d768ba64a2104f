//! Integration tests for spacing registrations.

mod helpers;

use chrono::NaiveDate;
use uuid::Uuid;

use prodctl_core::traits::ReadRepository;
use prodctl_core::types::pagination::PageRequest;

use helpers::{SpacingSeed, TestDb};

const FIRST: &str = "12345678-1234-5678-1234-567812345678";
const SECOND: &str = "87654321-4321-8765-4321-876543218765";
const THIRD: &str = "00000000-0000-4000-8000-000000000003";

async fn seeded() -> TestDb {
    let db = TestDb::new().await;
    db.insert_spacing(&[
        SpacingSeed {
            id: FIRST,
            partij_code: "P-2023-001",
            product_naam: "Phalaenopsis White",
            productgroep_naam: "Orchids",
            datum_oppotten_real: "2023-01-09",
            datum_wdz1_real: Some("2023-03-01"),
            aantal_tafels_na_wdz1: Some(15),
            dichtheid_wz2_plan: Some(25.5),
            fout: false,
        },
        SpacingSeed {
            id: SECOND,
            partij_code: "P-2023-002",
            product_naam: "Phalaenopsis Pink",
            productgroep_naam: "Orchids",
            datum_oppotten_real: "2023-01-02",
            datum_wdz1_real: None,
            aantal_tafels_na_wdz1: None,
            dichtheid_wz2_plan: None,
            fout: true,
        },
        SpacingSeed {
            id: THIRD,
            partij_code: "B-2023-010",
            product_naam: "Ficus Benjamina",
            productgroep_naam: "Green",
            datum_oppotten_real: "2023-02-15",
            datum_wdz1_real: None,
            aantal_tafels_na_wdz1: None,
            dichtheid_wz2_plan: None,
            fout: false,
        },
    ])
    .await;
    db
}

#[tokio::test]
async fn test_get_all_orders_by_potting_date() {
    let db = seeded().await;
    let records = db.spacing().get_all().await.unwrap();

    let codes: Vec<&str> = records.iter().map(|r| r.partij_code.as_str()).collect();
    assert_eq!(codes, ["P-2023-002", "P-2023-001", "B-2023-010"]);
}

#[tokio::test]
async fn test_decodes_all_columns() {
    let db = seeded().await;
    let id = Uuid::parse_str(FIRST).unwrap();
    let record = db.spacing().get_by_id(&id).await.unwrap().expect("exists");

    assert_eq!(record.id, id);
    assert_eq!(record.product_naam, "Phalaenopsis White");
    assert_eq!(
        record.datum_oppotten_real,
        NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()
    );
    assert_eq!(record.datum_uit_cel_real, None);
    assert_eq!(record.datum_wdz1_real, NaiveDate::from_ymd_opt(2023, 3, 1));
    assert_eq!(record.aantal_planten_gerealiseerd, 1000);
    assert_eq!(record.aantal_tafels_na_wdz1, Some(15));
    assert_eq!(record.aantal_tafels_na_wdz2, None);
    assert_eq!(record.aantal_tafels_oppotten_plan, 10.5);
    assert_eq!(record.dichtheid_wz1_plan, Some(50));
    assert_eq!(record.dichtheid_wz2_plan, Some(25.5));
    assert!(!record.wijderzet_registratie_fout);

    let flagged = db
        .spacing()
        .get_by_id(&Uuid::parse_str(SECOND).unwrap())
        .await
        .unwrap()
        .expect("exists");
    assert!(flagged.wijderzet_registratie_fout);
    assert_eq!(flagged.dichtheid_wz2_plan, None);
}

#[tokio::test]
async fn test_missing_id_is_none() {
    let db = seeded().await;
    let found = db.spacing().get_by_id(&Uuid::nil()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_filter_searches_code_product_and_group() {
    let db = seeded().await;
    let repo = db.spacing();

    let (items, total) = repo
        .get_paginated(&PageRequest::new(1, 10).with_filter("phalaenopsis"))
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].partij_code, "P-2023-002");

    let (items, total) = repo
        .get_paginated(&PageRequest::new(1, 10).with_filter("b-2023"))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].product_naam, "Ficus Benjamina");

    let (_, total) = repo
        .get_paginated(&PageRequest::new(1, 10).with_filter("green"))
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_sort_on_non_searchable_field() {
    let db = seeded().await;
    let (items, _) = db
        .spacing()
        .get_paginated(
            &PageRequest::new(1, 2)
                .with_sort("partij_code")
                .with_descending(true),
        )
        .await
        .unwrap();

    let codes: Vec<&str> = items.iter().map(|r| r.partij_code.as_str()).collect();
    assert_eq!(codes, ["P-2023-002", "P-2023-001"]);
}

#[tokio::test]
async fn test_sort_on_cast_columns() {
    let db = seeded().await;
    let repo = db.spacing();

    let (items, _) = repo
        .get_paginated(
            &PageRequest::new(1, 10)
                .with_sort("datum_oppotten_real")
                .with_descending(true),
        )
        .await
        .unwrap();
    let codes: Vec<&str> = items.iter().map(|r| r.partij_code.as_str()).collect();
    assert_eq!(codes, ["B-2023-010", "P-2023-001", "P-2023-002"]);

    // Equal plan counts fall back to the identifier, which decodes as text.
    let (items, _) = repo
        .get_paginated(&PageRequest::new(1, 10).with_sort("aantal_tafels_oppotten_plan"))
        .await
        .unwrap();
    let ids: Vec<String> = items.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, [THIRD, FIRST, SECOND]);
    assert!(items.iter().all(|r| r.aantal_tafels_oppotten_plan == 10.5));
}
