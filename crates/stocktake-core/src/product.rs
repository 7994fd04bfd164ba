//! Product records and the payloads that create or modify them.
//!
//! Incoming payloads are deliberately loose ([`ProductInput`],
//! [`QuantityUpdate`]): browser forms send numbers as strings, and every
//! field may be absent. [`ProductInput::validate`] turns a payload into
//! [`ProductFields`], the only shape the stores accept.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Length of a hex-encoded document id.
const ID_HEX_LEN: usize = 24;

// ============================================================================
// ProductId
// ============================================================================

/// Identifier of a stored product (24 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a raw id string. No validation is performed.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the shape the document store assigns.
    ///
    /// Ids that are not well formed can never match a stored product.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == ID_HEX_LEN && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// Product
// ============================================================================

/// A stored product, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Units in stock.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
    /// Supplying company.
    pub company: String,
    /// Product type / category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// When the product was first stored.
    pub created_at: DateTime<Utc>,
    /// When the product was last written.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product from validated fields.
    pub fn from_fields(id: ProductId, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            quantity: fields.quantity,
            price: fields.price,
            company: fields.company,
            kind: fields.kind,
            description: fields.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field, keeping id and creation time.
    pub fn apply(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.quantity = fields.quantity;
        self.price = fields.price;
        self.company = fields.company;
        self.kind = fields.kind;
        self.description = fields.description;
        self.updated_at = now;
    }
}

// ============================================================================
// Numeric input
// ============================================================================

/// A number as sent by a client: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number.
    Number(serde_json::Number),
    /// A string that should contain a number.
    Text(String),
}

impl NumericInput {
    /// Interpret as a whole number.
    ///
    /// `3`, `3.0`, `"3"` and `"3.0"` all give 3; `3.5` and `"3.5"` fail.
    pub fn as_integer(&self, field: &str) -> Result<i64> {
        let whole = match self {
            NumericInput::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_float)),
            NumericInput::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_float))
            }
        };
        whole.ok_or_else(|| {
            Error::validation_field(field, format!("{field} must be a whole number"))
        })
    }

    /// Interpret as a finite decimal number.
    pub fn as_decimal(&self, field: &str) -> Result<f64> {
        let value = match self {
            NumericInput::Number(n) => n.as_f64(),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::validation_field(field, format!("{field} must be a number")))
    }
}

fn whole_float(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(n.into())
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Create/replace payload for a product. Every field is optional until
/// [`validate`](ProductInput::validate) is called.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    /// Product name.
    #[serde(default)]
    pub name: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub quantity: Option<NumericInput>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<NumericInput>,
    /// Supplying company.
    #[serde(default)]
    pub company: Option<String>,
    /// Product type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated product fields, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    /// Product name (non-blank).
    pub name: String,
    /// Units in stock (non-negative).
    pub quantity: i64,
    /// Unit price (finite, non-negative).
    pub price: f64,
    /// Supplying company (non-blank).
    pub company: String,
    /// Product type (non-blank).
    pub kind: String,
    /// Description, empty when not supplied.
    pub description: String,
}

impl ProductInput {
    /// Check required fields and numeric ranges.
    ///
    /// Fails on the first offending field, in declaration order.
    pub fn validate(self) -> Result<ProductFields> {
        let name = required_text("name", self.name)?;
        let quantity = non_negative_quantity(required("quantity", self.quantity)?)?;
        let price = required("price", self.price)?.as_decimal("price")?;
        if price < 0.0 {
            return Err(Error::validation_field("price", "price must not be negative"));
        }
        let company = required_text("company", self.company)?;
        let kind = required_text("type", self.kind)?;

        Ok(ProductFields {
            name,
            quantity,
            price,
            company,
            kind,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Payload for the quantity-only update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantityUpdate {
    /// New units in stock.
    #[serde(default)]
    pub quantity: Option<NumericInput>,
}

impl QuantityUpdate {
    /// Validate and return the new quantity.
    pub fn validate(self) -> Result<i64> {
        non_negative_quantity(required("quantity", self.quantity)?)
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::validation_field(field, format!("{field} is required")))
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    let value = required(field, value)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation_field(field, format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn non_negative_quantity(input: NumericInput) -> Result<i64> {
    let quantity = input.as_integer("quantity")?;
    if quantity < 0 {
        return Err(Error::validation_field(
            "quantity",
            "quantity must not be negative",
        ));
    }
    Ok(quantity)
}

// ============================================================================
// ProductFilter
// ============================================================================

/// Filter applied when listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact company match; `None` lists everything.
    pub company: Option<String>,
}

impl ProductFilter {
    /// No filtering.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter by company. Blank or absent company means no filter.
    pub fn by_company(company: Option<&str>) -> Self {
        Self {
            company: company
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.company
            .as_deref()
            .is_none_or(|company| product.company == company)
    }
}
