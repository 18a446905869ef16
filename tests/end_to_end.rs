use chrono::NaiveDate;
use price_checker::errors::{JobError, LoadError, Side};
use price_checker::job::{self, JobConfig, Source};
use price_checker::report::ReportSink;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 24).unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn should_reconcile_csv_exports() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.csv");
    let vendor = dir.path().join("vendor.csv");

    fs::write(
        &catalog,
        "sku,name,product_online,price\n\
         A,Appliance,1,10.00\n\
         B,License,1,5.00\n\
         C,Support,1,7.00\n\
         D,Retired,2,1.00\n",
    )
    .unwrap();
    fs::write(
        &vendor,
        "sku,Description,price\n\
         A,Appliance,10.00\n\
         B,License,\"6.00\"\n\
         E,New bundle,\"1,299.00\"\n\
         F,Broken,row,too,long\n",
    )
    .unwrap();

    let config = JobConfig {
        source: Source::FlatFile {
            catalog,
            vendor,
            encoding: None,
        },
        output: ReportSink::new(dir.path(), "Cuda", run_date()),
    };

    let report = job::run(&config).unwrap();

    assert_eq!(
        report.paths.price_difference,
        dir.path()
            .join("Cuda-2024-09-24")
            .join("price-difference-2024-09-24.csv")
    );
    assert_eq!(
        read(&report.paths.price_difference),
        "sku,price,store_view_code,product_websites\nB,6.0,,base\n"
    );
    assert_eq!(
        read(&report.paths.disable_sku),
        "sku,product_online,store_view_code,product_websites\nC,2,,base\n"
    );
    assert_eq!(
        read(&report.paths.missing_sku),
        "sku,description,price\nE,New bundle,1299.0\n"
    );
    assert_eq!(report.summary.vendor_rows, 3);
}

#[test]
fn should_reconcile_sqlite_tables() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("firewalls.db");

    {
        let conn = Connection::open(&database).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE "meg-sonicwall-sep-24" (sku TEXT, product_online INTEGER, price REAL);
            INSERT INTO "meg-sonicwall-sep-24" VALUES ('A', 1, 10.0);
            INSERT INTO "meg-sonicwall-sep-24" VALUES ('B', 1, 5.0);
            INSERT INTO "meg-sonicwall-sep-24" VALUES ('C', 1, 7.0);

            CREATE TABLE "sonicwall-sep-24" (sku TEXT, Description TEXT, price REAL);
            INSERT INTO "sonicwall-sep-24" VALUES ('A', 'Appliance', 10.0);
            INSERT INTO "sonicwall-sep-24" VALUES ('B', 'License', 6.0);
            "#,
        )
        .unwrap();
    }

    let config = JobConfig {
        source: Source::Sqlite {
            database,
            catalog_table: "meg-sonicwall-sep-24".into(),
            vendor_table: "sonicwall-sep-24".into(),
        },
        output: ReportSink::new(dir.path(), "SW", run_date()),
    };

    let report = job::run(&config).unwrap();

    assert_eq!(
        read(&report.paths.price_difference),
        "sku,price,store_view_code,product_websites\nB,6.0,,base\n"
    );
    assert_eq!(
        read(&report.paths.disable_sku),
        "sku,product_online,store_view_code,product_websites\nC,2,,base\n"
    );
    assert_eq!(read(&report.paths.missing_sku), "sku,description,price\n");
}

#[test]
fn should_overwrite_reports_on_same_day_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.csv");
    let vendor = dir.path().join("vendor.csv");
    fs::write(&catalog, "sku,product_online,price\nA,1,10.00\nB,1,3.00\n").unwrap();
    fs::write(&vendor, "sku,price\nA,11.00\nB,4.00\n").unwrap();

    let config = JobConfig {
        source: Source::FlatFile {
            catalog,
            vendor: vendor.clone(),
            encoding: None,
        },
        output: ReportSink::new(dir.path(), "Cuda", run_date()),
    };

    let first = job::run(&config).unwrap();
    assert_eq!(
        read(&first.paths.price_difference),
        "sku,price,store_view_code,product_websites\nA,11.0,,base\nB,4.0,,base\n"
    );

    fs::write(&vendor, "sku,price\nA,11.00\nB,3.00\n").unwrap();
    let second = job::run(&config).unwrap();

    assert_eq!(first.paths, second.paths);
    assert_eq!(
        read(&second.paths.price_difference),
        "sku,price,store_view_code,product_websites\nA,11.0,,base\n"
    );
}

#[test]
fn should_write_nothing_when_table_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("firewalls.db");
    {
        let conn = Connection::open(&database).unwrap();
        conn.execute_batch(
            r#"CREATE TABLE "meg-sonicwall-sep-24" (sku TEXT, product_online INTEGER, price REAL);"#,
        )
        .unwrap();
    }

    let config = JobConfig {
        source: Source::Sqlite {
            database,
            catalog_table: "meg-sonicwall-sep-24".into(),
            vendor_table: "sonicwall-sep-24".into(),
        },
        output: ReportSink::new(dir.path(), "SW", run_date()),
    };

    let err = job::run(&config).unwrap_err();
    assert!(matches!(
        err,
        JobError::Load {
            side: Side::Vendor,
            source: LoadError::Sqlite(_)
        }
    ));
    assert!(!config.output.directory().exists());
}
