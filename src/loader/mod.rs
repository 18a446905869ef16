//! Loaders that materialize an input table into typed records.
//!
//! Both loaders map their raw rows through a [`Schema`]: columns are matched
//! by name (case-insensitively), a missing required column fails the load,
//! and rows that do not conform to the schema are skipped with a warning.

pub mod flat_file;
pub mod sqlite;

use crate::errors::LoadError;
use crate::model::Schema;

/// Locate each schema column among the source's headers.
///
/// Returns one entry per `S::COLUMNS` entry; optional columns that are not
/// present resolve to `None`.
pub(crate) fn resolve_columns<S: Schema>(headers: &[String]) -> Result<Vec<Option<usize>>, LoadError> {
    S::COLUMNS
        .iter()
        .map(|column| {
            let position = headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(column.name));

            match position {
                None if column.required => Err(LoadError::MissingColumn {
                    column: column.name,
                }),
                position => Ok(position),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogRecord, VendorRecord};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn should_resolve_columns_in_schema_order() {
        let headers = headers(&["price", "name", "product_online", "sku"]);
        let positions = resolve_columns::<CatalogRecord>(&headers).unwrap();

        assert_eq!(positions, vec![Some(3), Some(2), Some(0)]);
    }

    #[test]
    fn should_match_headers_case_insensitively() {
        let headers = headers(&["SKU", "Description", " Price "]);
        let positions = resolve_columns::<VendorRecord>(&headers).unwrap();

        assert_eq!(positions, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn should_allow_missing_optional_columns() {
        let headers = headers(&["sku", "price"]);
        let positions = resolve_columns::<VendorRecord>(&headers).unwrap();

        assert_eq!(positions, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn should_fail_on_missing_required_column() {
        let headers = headers(&["sku", "price"]);
        let err = resolve_columns::<CatalogRecord>(&headers).unwrap_err();

        assert_eq!(
            err.to_string(),
            LoadError::MissingColumn {
                column: "product_online"
            }
            .to_string()
        );
    }
}
