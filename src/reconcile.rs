use crate::model::{
    CatalogRecord, DisableSku, JoinedRecord, MissingSku, PriceDifference, ProductOnline,
    VendorRecord, DEFAULT_WEBSITE,
};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// The three report subsets derived from one catalog/vendor comparison.
#[derive(Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub price_differences: Vec<PriceDifference>,
    pub disabled: Vec<DisableSku>,
    pub missing: Vec<MissingSku>,
    pub summary: ReconSummary,
}

/// Row counts gathered while reconciling, for logging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconSummary {
    pub catalog_rows: usize,
    pub vendor_rows: usize,
    pub joined_rows: usize,
    pub price_differences: usize,
    pub disabled: usize,
    pub missing: usize,

    /// Catalog skus that matched more than one vendor row.
    pub fanned_out_skus: usize,
}

/// Left join `catalog` onto `vendor` by sku.
///
/// Every catalog row appears in the output, in catalog order. A catalog row
/// with no vendor match is paired with `None`. A catalog row whose sku occurs
/// several times in the vendor list is repeated once per vendor row.
pub fn left_join<'a>(
    catalog: &'a [CatalogRecord],
    vendor: &'a [VendorRecord],
) -> Vec<JoinedRecord<'a>> {
    let mut by_sku: HashMap<&str, Vec<&VendorRecord>> = HashMap::new();
    for record in vendor {
        by_sku.entry(record.sku.as_str()).or_default().push(record);
    }

    let mut joined = Vec::with_capacity(catalog.len());
    for record in catalog {
        match by_sku.get(record.sku.as_str()) {
            Some(matches) => joined.extend(matches.iter().map(|v| JoinedRecord {
                catalog: record,
                vendor: Some(*v),
            })),
            None => joined.push(JoinedRecord {
                catalog: record,
                vendor: None,
            }),
        }
    }

    joined
}

/// Vendor rows whose sku is absent from the catalog, in vendor order.
pub fn vendor_only<'a>(
    catalog: &[CatalogRecord],
    vendor: &'a [VendorRecord],
) -> Vec<&'a VendorRecord> {
    let known: HashSet<&str> = catalog.iter().map(|record| record.sku.as_str()).collect();
    vendor
        .iter()
        .filter(|record| !known.contains(record.sku.as_str()))
        .collect()
}

/// Compare the catalog against the vendor price list.
///
/// - An active catalog product whose vendor price is present and not exactly
///   equal to the catalog price gets a price update with the vendor's price.
/// - An active catalog product with no vendor price gets disabled.
/// - A vendor product the catalog does not list is reported as missing.
///
/// Products that are disabled, or whose activation flag is unknown, are left
/// out of the first two reports.
pub fn reconcile(catalog: &[CatalogRecord], vendor: &[VendorRecord]) -> Reconciliation {
    let joined = left_join(catalog, vendor);

    let mut result = Reconciliation::default();
    for row in joined.iter().filter(|row| row.catalog.is_active()) {
        match row.price_vendor() {
            Some(price) if row.price_catalog() != Some(price) => {
                result.price_differences.push(PriceDifference {
                    sku: row.catalog.sku.clone(),
                    price,
                    store_view_code: None,
                    product_websites: DEFAULT_WEBSITE,
                })
            }
            Some(_) => {}
            None => result.disabled.push(DisableSku {
                sku: row.catalog.sku.clone(),
                product_online: ProductOnline::DISABLED_CODE,
                store_view_code: None,
                product_websites: DEFAULT_WEBSITE,
            }),
        }
    }

    result.missing = vendor_only(catalog, vendor)
        .into_iter()
        .map(|record| MissingSku {
            sku: record.sku.clone(),
            description: record.description.clone(),
            price: record.price,
        })
        .collect();

    let fanned_out_skus = count_fanned_out(catalog, vendor);
    if fanned_out_skus > 0 {
        warn!(
            skus = fanned_out_skus,
            "vendor list repeats skus, matching catalog rows are reported once per vendor row"
        );
    }

    result.summary = ReconSummary {
        catalog_rows: catalog.len(),
        vendor_rows: vendor.len(),
        joined_rows: joined.len(),
        price_differences: result.price_differences.len(),
        disabled: result.disabled.len(),
        missing: result.missing.len(),
        fanned_out_skus,
    };

    result
}

fn count_fanned_out(catalog: &[CatalogRecord], vendor: &[VendorRecord]) -> usize {
    let mut vendor_counts: HashMap<&str, usize> = HashMap::new();
    for record in vendor {
        *vendor_counts.entry(record.sku.as_str()).or_default() += 1;
    }

    catalog
        .iter()
        .map(|record| record.sku.as_str())
        .filter(|sku| vendor_counts.get(sku).copied().unwrap_or(0) > 1)
        .collect::<HashSet<_>>()
        .len()
}
