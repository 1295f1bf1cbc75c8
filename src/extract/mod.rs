pub mod normalize;

pub use normalize::{coerce_number, coerce_text, normalize_number, Coerced};

use std::collections::HashMap;

use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{FullRecord, RawListing, SimpleRecord};

lazy_static! {
    /// Ad identifiers are 9 to 11 digit runs inside the listing URL.
    static ref AD_ID: Regex = Regex::new(r"(\d{9,11})").unwrap();
    /// Surface fallback in the subject line, e.g. "54.5 m²". The unit
    /// glyph is matched case-sensitively.
    static ref SURFACE: Regex = Regex::new(r"(\d+(?:[.,]\d+)?)\s*m²").unwrap();
    /// Monthly charges mentioned in the body, e.g. "150 € de charges".
    static ref CHARGES: Regex =
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*€?\s*(?:de\s*)?charges").unwrap();
}

/// Reduce a pasted URL (or bare id) to the numeric ad identifier.
/// Unrecognized input is passed through so the API gets to reject it.
pub fn extract_id(url_or_id: &str) -> &str {
    if !url_or_id.is_empty() && url_or_id.chars().all(|c| c.is_ascii_digit()) {
        return url_or_id;
    }
    match AD_ID.find(url_or_id) {
        Some(m) => m.as_str(),
        None => url_or_id,
    }
}

/// Canonical record built from one raw listing. Both table variants go
/// through this seam so the session can stay generic over the row type.
pub trait FromListing: Sized {
    fn from_listing(raw: &RawListing) -> Self;
}

/// Attribute list flattened to key -> value_label for O(1) lookup.
fn attr_map(raw: &RawListing) -> HashMap<&str, &str> {
    raw.attributes
        .iter()
        .filter_map(|a| a.value_label.as_deref().map(|v| (a.key.as_str(), v)))
        .collect()
}

/// Surface in m²: the "square" attribute first, then a scan of the subject
/// line. 0.0 means unknown.
fn surface_of(raw: &RawListing, attrs: &HashMap<&str, &str>) -> f64 {
    let from_attr = attrs
        .get("square")
        .map(|v| coerce_text(v).value)
        .unwrap_or(0.0);
    if from_attr > 0.0 {
        return from_attr;
    }
    match SURFACE.captures(&raw.subject) {
        Some(caps) => coerce_text(&caps[1]).value,
        None => 0.0,
    }
}

/// Monthly charges label scraped from the body text.
fn charges_of(body: Option<&str>) -> String {
    body.and_then(|text| CHARGES.captures(text))
        .map(|caps| format!("{} €", &caps[1]))
        .unwrap_or_else(|| "Non spécifié".to_string())
}

/// Seller label: contact name when the API exposes it, otherwise a
/// truncated user id.
fn seller_of(raw: &RawListing, attrs: &HashMap<&str, &str>) -> String {
    match attrs.get("contact_name") {
        Some(name) => name.to_string(),
        None => {
            let prefix: String = raw.user_id.chars().take(8).collect();
            format!("ID: {prefix}")
        }
    }
}

fn price_of(raw: &RawListing) -> f64 {
    normalize_number(Some(&raw.price))
}

impl FromListing for FullRecord {
    fn from_listing(raw: &RawListing) -> Self {
        let attrs = attr_map(raw);
        let surface = surface_of(raw, &attrs);
        let price = price_of(raw);
        let price_per_sqm = if surface > 0.0 {
            (price / surface) as i64
        } else {
            0
        };

        FullRecord {
            date_added: Local::now().format("%d/%m/%Y").to_string(),
            link: raw.url.clone(),
            title: raw.subject.clone(),
            price,
            surface,
            price_per_sqm,
            energy_rate: attrs.get("energy_rate").unwrap_or(&"N/A").to_string(),
            monthly_charges: String::new(),
            exposure: String::new(),
            note: String::new(),
            renovation: "À définir".to_string(),
            offer: String::new(),
        }
    }
}

impl FromListing for SimpleRecord {
    fn from_listing(raw: &RawListing) -> Self {
        let attrs = attr_map(raw);

        SimpleRecord {
            link: raw.url.clone(),
            title: raw.subject.clone(),
            location: format!("{} ({})", raw.location.city, raw.location.zipcode),
            price: price_of(raw),
            seller: seller_of(raw, &attrs),
            charges: charges_of(raw.body.as_deref()),
            energy_rate: attrs
                .get("energy_rate")
                .unwrap_or(&"Non spécifié")
                .to_string(),
            property_type: attrs
                .get("real_estate_type")
                .unwrap_or(&"Non précisé")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingAttribute, ListingLocation};
    use serde_json::json;

    fn listing() -> RawListing {
        RawListing {
            list_id: 2_915_031_246,
            url: "https://www.leboncoin.fr/ad/ventes_immobilieres/2915031246".into(),
            subject: "Bel appartement 54.5 m² lumineux".into(),
            price: json!([125_000]),
            body: Some("Appartement T3, 150 € de charges par mois.".into()),
            location: ListingLocation {
                city: "Lyon".into(),
                zipcode: "69003".into(),
            },
            attributes: vec![
                ListingAttribute {
                    key: "energy_rate".into(),
                    value_label: Some("D".into()),
                },
                ListingAttribute {
                    key: "real_estate_type".into(),
                    value_label: Some("Appartement".into()),
                },
            ],
            user_id: "a1b2c3d4-e5f6-7890".into(),
        }
    }

    #[test]
    fn id_from_url_or_passthrough() {
        assert_eq!(
            extract_id("https://www.leboncoin.fr/ad/ventes_immobilieres/2915031246"),
            "2915031246"
        );
        assert_eq!(extract_id("2915031246"), "2915031246");
        assert_eq!(extract_id("not-an-ad"), "not-an-ad");
    }

    #[test]
    fn surface_falls_back_to_subject_scan() {
        let raw = listing(); // no "square" attribute
        let rec = FullRecord::from_listing(&raw);
        assert_eq!(rec.surface, 54.5);
    }

    #[test]
    fn surface_attribute_wins_over_subject() {
        let mut raw = listing();
        raw.attributes.push(ListingAttribute {
            key: "square".into(),
            value_label: Some("62 m²".into()),
        });
        let rec = FullRecord::from_listing(&raw);
        assert_eq!(rec.surface, 62.0);
    }

    #[test]
    fn price_per_sqm_is_floored() {
        let raw = listing();
        let rec = FullRecord::from_listing(&raw);
        // 125000 / 54.5 = 2293.57..
        assert_eq!(rec.price_per_sqm, 2293);
    }

    #[test]
    fn price_per_sqm_zero_when_surface_unknown() {
        let mut raw = listing();
        raw.subject = "Appartement lumineux".into();
        let rec = FullRecord::from_listing(&raw);
        assert_eq!(rec.surface, 0.0);
        assert_eq!(rec.price_per_sqm, 0);
    }

    #[test]
    fn full_record_defaults() {
        let rec = FullRecord::from_listing(&listing());
        assert_eq!(rec.energy_rate, "D");
        assert_eq!(rec.renovation, "À définir");
        assert_eq!(rec.monthly_charges, "");
        assert_eq!(rec.offer, "");
        // dd/mm/yyyy
        assert_eq!(rec.date_added.len(), 10);
        assert_eq!(rec.date_added.matches('/').count(), 2);
    }

    #[test]
    fn missing_energy_rate_uses_sentinel() {
        let mut raw = listing();
        raw.attributes.clear();
        assert_eq!(FullRecord::from_listing(&raw).energy_rate, "N/A");
        assert_eq!(SimpleRecord::from_listing(&raw).energy_rate, "Non spécifié");
    }

    #[test]
    fn simple_record_derived_labels() {
        let rec = SimpleRecord::from_listing(&listing());
        assert_eq!(rec.location, "Lyon (69003)");
        assert_eq!(rec.charges, "150 €");
        assert_eq!(rec.seller, "ID: a1b2c3d4");
        assert_eq!(rec.property_type, "Appartement");
        assert_eq!(rec.price, 125_000.0);
    }

    #[test]
    fn charges_scan_is_case_insensitive_and_optional() {
        assert_eq!(charges_of(Some("Prévoir 89,50 € de CHARGES.")), "89,50 €");
        assert_eq!(charges_of(Some("120 charges comprises")), "120 €");
        assert_eq!(charges_of(Some("aucune mention")), "Non spécifié");
        assert_eq!(charges_of(None), "Non spécifié");
    }

    #[test]
    fn contact_name_wins_over_user_id() {
        let mut raw = listing();
        raw.attributes.push(ListingAttribute {
            key: "contact_name".into(),
            value_label: Some("Agence Dupont".into()),
        });
        assert_eq!(SimpleRecord::from_listing(&raw).seller, "Agence Dupont");
    }
}
