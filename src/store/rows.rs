//! Column mappings between the record types and their CSV files. Column
//! order here is the persisted order; it never changes on round-trip.

use crate::models::{FullRecord, SimpleRecord};
use crate::store::TableRow;

fn number(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}

impl TableRow for FullRecord {
    const HEADERS: &'static [&'static str] = &[
        "Date Ajout",
        "Lien",
        "Titre",
        "Prix (€)",
        "Surface (m²)",
        "Prix/m² (€)",
        "DPE",
        "Charges / mois",
        "Exposition",
        "Note/Avis",
        "Travaux",
        "Offre",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date_added.clone(),
            self.link.clone(),
            self.title.clone(),
            self.price.to_string(),
            self.surface.to_string(),
            self.price_per_sqm.to_string(),
            self.energy_rate.clone(),
            self.monthly_charges.clone(),
            self.exposure.clone(),
            self.note.clone(),
            self.renovation.clone(),
            self.offer.clone(),
        ]
    }

    fn from_row(row: &[String]) -> Self {
        FullRecord {
            date_added: row[0].clone(),
            link: row[1].clone(),
            title: row[2].clone(),
            price: number(&row[3]),
            surface: number(&row[4]),
            price_per_sqm: number(&row[5]) as i64,
            energy_rate: row[6].clone(),
            monthly_charges: row[7].clone(),
            exposure: row[8].clone(),
            note: row[9].clone(),
            renovation: row[10].clone(),
            offer: row[11].clone(),
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn key(&self) -> Option<&str> {
        Some(&self.link)
    }
}

impl TableRow for SimpleRecord {
    const HEADERS: &'static [&'static str] = &[
        "Lien",
        "Titre",
        "Localisation",
        "Prix (€)",
        "Vendeur",
        "Charges",
        "DPE",
        "Type",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.link.clone(),
            self.title.clone(),
            self.location.clone(),
            self.price.to_string(),
            self.seller.clone(),
            self.charges.clone(),
            self.energy_rate.clone(),
            self.property_type.clone(),
        ]
    }

    fn from_row(row: &[String]) -> Self {
        SimpleRecord {
            link: row[0].clone(),
            title: row[1].clone(),
            location: row[2].clone(),
            price: number(&row[3]),
            seller: row[4].clone(),
            charges: row[5].clone(),
            energy_rate: row[6].clone(),
            property_type: row[7].clone(),
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}
