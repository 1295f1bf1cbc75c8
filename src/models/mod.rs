use serde::Deserialize;
use serde_json::Value;

/// Which tracking table the session operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Simple,
}

/// Location information attached to a listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
}

/// One key/label pair from the listing's attribute list
#[derive(Debug, Clone, Deserialize)]
pub struct ListingAttribute {
    pub key: String,
    #[serde(default)]
    pub value_label: Option<String>,
}

/// Raw listing as returned by the classifieds API.
///
/// `price` is kept as a raw JSON value on purpose: the API returns it
/// sometimes as a number, sometimes as a string, sometimes wrapped in a
/// one-element list. The normalizer sorts that out.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub list_id: i64,
    pub url: String,
    pub subject: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub location: ListingLocation,
    #[serde(default)]
    pub attributes: Vec<ListingAttribute>,
    #[serde(default)]
    pub user_id: String,
}

/// Full-mode tracked record: surface, price-per-m² and five free-text
/// columns the user fills in over time.
#[derive(Debug, Clone, PartialEq)]
pub struct FullRecord {
    /// Creation date, dd/mm/yyyy. Set once, never recomputed.
    pub date_added: String,
    /// Listing URL, the natural key of the table.
    pub link: String,
    pub title: String,
    pub price: f64,
    /// Square meters; 0.0 means unknown.
    pub surface: f64,
    /// floor(price / surface), 0 when surface is unknown.
    pub price_per_sqm: i64,
    pub energy_rate: String,
    // User-editable columns below. Extraction sets defaults and never
    // touches them again.
    pub monthly_charges: String,
    pub exposure: String,
    pub note: String,
    pub renovation: String,
    pub offer: String,
}

/// Options offered for the renovation column (display hint, not validated)
pub const RENOVATION_OPTIONS: [&str; 4] =
    ["Aucun", "Rafraîchissement", "Gros œuvre", "À définir"];

/// Simple-mode record: no surface handling, derived labels instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleRecord {
    pub link: String,
    pub title: String,
    /// "city (zipcode)"
    pub location: String,
    pub price: f64,
    /// Seller name, or "ID: <prefix>" when the API hides it.
    pub seller: String,
    /// Monthly charges scraped from the body text, or "Non spécifié".
    pub charges: String,
    pub energy_rate: String,
    pub property_type: String,
}
