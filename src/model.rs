use crate::price::normalize_price;
use serde::Serialize;

/// A single untyped value read from one of the input sources before it is
/// mapped onto a record schema.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Render the cell as a non-empty string, if it holds anything.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Integer(value) => Some(value.to_string()),
            Cell::Real(value) => Some(value.to_string()),
            Cell::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
        }
    }

    /// Interpret the cell as a price. Text goes through the normalizer, so a
    /// value such as "1,299.00" is accepted and "N/A" becomes missing.
    pub fn as_price(&self) -> Option<f64> {
        match self {
            Cell::Null => None,
            Cell::Integer(value) => Some(*value as f64),
            Cell::Real(value) if value.is_finite() => Some(*value),
            Cell::Real(_) => None,
            Cell::Text(text) => normalize_price(text),
        }
    }
}

/// A column a record schema reads from its source.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub required: bool,
}

impl Column {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// A fixed, named schema that loaders map raw rows onto.
pub trait Schema: Sized {
    /// Columns read from the source, in the order `from_cells` receives them.
    /// Optional columns that the source lacks are passed as `Cell::Null`.
    const COLUMNS: &'static [Column];

    /// Build a record from one row, or return `None` if the row does not
    /// conform to the schema.
    fn from_cells(cells: Vec<Cell>) -> Option<Self>;
}

/// The catalog activation flag.
#[derive(Clone, Debug, PartialEq)]
pub enum ProductOnline {
    /// `1`: the product is sellable online.
    Active,
    /// `2`: the product has been switched off.
    Disabled,
    /// Any other value present in the export.
    Unrecognized(String),
}

impl ProductOnline {
    pub const DISABLED_CODE: u8 = 2;

    fn from_number(value: f64, raw: String) -> Self {
        if value == 1.0 {
            ProductOnline::Active
        } else if value == 2.0 {
            ProductOnline::Disabled
        } else {
            ProductOnline::Unrecognized(raw)
        }
    }

    /// Map a raw cell onto the flag. Missing or blank values are unknown.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Null => None,
            Cell::Integer(value) => Some(Self::from_number(*value as f64, value.to_string())),
            Cell::Real(value) => Some(Self::from_number(*value, value.to_string())),
            Cell::Text(_) => {
                let text = cell.as_text()?;
                match text.parse::<f64>() {
                    Ok(value) => Some(Self::from_number(value, text)),
                    Err(_) => Some(ProductOnline::Unrecognized(text)),
                }
            }
        }
    }
}

/// A row of the e-commerce catalog export.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogRecord {
    pub sku: String,
    pub product_online: Option<ProductOnline>,
    pub price: Option<f64>,
}

impl CatalogRecord {
    pub fn is_active(&self) -> bool {
        self.product_online == Some(ProductOnline::Active)
    }
}

impl Schema for CatalogRecord {
    const COLUMNS: &'static [Column] = &[
        Column::required("sku"),
        Column::required("product_online"),
        Column::required("price"),
    ];

    fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        let [sku, product_online, price]: [Cell; 3] = cells.try_into().ok()?;
        Some(Self {
            sku: sku.as_text()?,
            product_online: ProductOnline::from_cell(&product_online),
            price: price.as_price(),
        })
    }
}

/// A row of the vendor price list.
#[derive(Clone, Debug, PartialEq)]
pub struct VendorRecord {
    pub sku: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl Schema for VendorRecord {
    const COLUMNS: &'static [Column] = &[
        Column::required("sku"),
        Column::optional("description"),
        Column::required("price"),
    ];

    fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        let [sku, description, price]: [Cell; 3] = cells.try_into().ok()?;
        Some(Self {
            sku: sku.as_text()?,
            description: description.as_text(),
            price: price.as_price(),
        })
    }
}

/// A catalog row paired with the vendor row it matched, if any.
#[derive(Clone, Copy, Debug)]
pub struct JoinedRecord<'a> {
    pub catalog: &'a CatalogRecord,
    pub vendor: Option<&'a VendorRecord>,
}

impl<'a> JoinedRecord<'a> {
    pub fn price_catalog(&self) -> Option<f64> {
        self.catalog.price
    }

    pub fn price_vendor(&self) -> Option<f64> {
        self.vendor.and_then(|vendor| vendor.price)
    }
}

/// A catalog price update: the vendor's price for an active product whose
/// catalog price has drifted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceDifference {
    pub sku: String,
    pub price: f64,
    pub store_view_code: Option<String>,
    pub product_websites: &'static str,
}

/// An active product the vendor no longer prices, to be switched off.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisableSku {
    pub sku: String,
    pub product_online: u8,
    pub store_view_code: Option<String>,
    pub product_websites: &'static str,
}

/// A vendor product that the catalog does not list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissingSku {
    pub sku: String,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// The website code every catalog update is scoped to.
pub const DEFAULT_WEBSITE: &str = "base";
