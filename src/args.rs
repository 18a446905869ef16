use crate::job::{JobConfig, Source};
use crate::report::ReportSink;
use chrono::NaiveDate;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flags shared by both binaries that control where reports go.
pub struct OutputArgs {
    pub tag: String,
    pub output_dir: String,
    pub date: Option<NaiveDate>,
}

/// Arguments for the CSV-backed run.
pub struct CsvArgs {
    pub catalog: String,
    pub vendor: String,
    pub encoding: Option<String>,
    pub output: OutputArgs,
}

/// Arguments for the SQLite-backed run.
pub struct DbArgs {
    pub database: String,
    pub catalog_table: String,
    pub vendor_table: String,
    pub output: OutputArgs,
}

impl CsvArgs {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let app = App::new("price-checker")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Compare a catalog export against a vendor price list (CSV files)")
            .arg(Arg::with_name("catalog")
                .long("catalog").takes_value(true)
                .default_value("cuda_export_catalog_product_20240914_094209.csv")
                .help("path of the catalog export CSV"))
            .arg(Arg::with_name("vendor")
                .long("vendor").takes_value(true)
                .default_value("cuda-sep-24.csv")
                .help("path of the vendor price list CSV"))
            .arg(Arg::with_name("encoding")
                .long("encoding").takes_value(true)
                .help("text encoding of both CSV files, e.g. windows-1252 (default UTF-8)"));
        let matches = output_args(app, "Cuda").get_matches_from(args);

        Self {
            catalog: value(&matches, "catalog"),
            vendor: value(&matches, "vendor"),
            encoding: matches.value_of("encoding").map(String::from),
            output: OutputArgs::from_matches(&matches),
        }
    }

    pub fn into_config(self, today: NaiveDate) -> JobConfig {
        JobConfig {
            source: Source::FlatFile {
                catalog: PathBuf::from(self.catalog),
                vendor: PathBuf::from(self.vendor),
                encoding: self.encoding,
            },
            output: self.output.into_sink(today),
        }
    }
}

impl DbArgs {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let app = App::new("price-checker-db")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Compare a catalog export against a vendor price list (SQLite tables)")
            .arg(Arg::with_name("database")
                .long("database").takes_value(true)
                .default_value("firewalls_database.db")
                .help("path of the SQLite database holding both tables"))
            .arg(Arg::with_name("catalog_table")
                .long("catalog-table").takes_value(true)
                .default_value("meg-sonicwall-sep-24")
                .help("name of the catalog export table"))
            .arg(Arg::with_name("vendor_table")
                .long("vendor-table").takes_value(true)
                .default_value("sonicwall-sep-24")
                .help("name of the vendor price list table"));
        let matches = output_args(app, "SW").get_matches_from(args);

        Self {
            database: value(&matches, "database"),
            catalog_table: value(&matches, "catalog_table"),
            vendor_table: value(&matches, "vendor_table"),
            output: OutputArgs::from_matches(&matches),
        }
    }

    pub fn into_config(self, today: NaiveDate) -> JobConfig {
        JobConfig {
            source: Source::Sqlite {
                database: PathBuf::from(self.database),
                catalog_table: self.catalog_table,
                vendor_table: self.vendor_table,
            },
            output: self.output.into_sink(today),
        }
    }
}

impl OutputArgs {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            tag: value(matches, "tag"),
            output_dir: value(matches, "output_dir"),
            // Already checked by the validator.
            date: matches
                .value_of("date")
                .and_then(|date| NaiveDate::parse_from_str(date, DATE_FORMAT).ok()),
        }
    }

    fn into_sink(self, today: NaiveDate) -> ReportSink {
        ReportSink::new(self.output_dir, self.tag, self.date.unwrap_or(today))
    }
}

fn output_args<'a, 'b>(app: App<'a, 'b>, default_tag: &'a str) -> App<'a, 'b> {
    app.arg(Arg::with_name("tag")
            .long("tag").takes_value(true)
            .default_value(default_tag)
            .help("label that prefixes the output folder name"))
        .arg(Arg::with_name("output_dir")
            .long("output-dir").takes_value(true)
            .default_value(".")
            .help("directory the dated output folder is created in"))
        .arg(Arg::with_name("date")
            .long("date").takes_value(true)
            .validator(|date| {
                NaiveDate::parse_from_str(&date, DATE_FORMAT)
                    .map(|_| ())
                    .map_err(|err| format!("expected a YYYY-MM-DD date: {}", err))
            })
            .help("run date used in output names, YYYY-MM-DD (default today)"))
}

fn value(matches: &ArgMatches, name: &str) -> String {
    matches.value_of(name).unwrap_or_default().to_string()
}
