//! Read-only order snapshot used as composer input.
//!
//! The composer never mutates these entities; it only produces drawing
//! commands. Domain codes (status, service type, equipment, damage type,
//! vehicle side) are stored as raw strings and translated through the lookup
//! tables at render time, so an unmapped code still renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Fuel gauge in eighths, 0..=8.
    #[serde(default)]
    pub fuel_level: Option<u8>,
    #[serde(default)]
    pub fuel_meter: Option<f64>,
    /// Scheduled pickup/delivery timestamp (RFC 3339).
    #[serde(default)]
    pub event_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleData {
    pub owner: String,
    pub plate: String,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    #[serde(default)]
    pub order_code: Option<String>,
    #[serde(default)]
    pub contract_code: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

/// Six optional non-negative monetary line items plus a free-text note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesRecord {
    #[serde(default)]
    pub fuel: Option<f64>,
    #[serde(default)]
    pub wash: Option<f64>,
    #[serde(default)]
    pub additive: Option<f64>,
    #[serde(default)]
    pub toll: Option<f64>,
    #[serde(default)]
    pub parking: Option<f64>,
    #[serde(default)]
    pub other: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

impl ExpensesRecord {
    /// Line items with an amount > 0, in fixed display order.
    pub fn positive_items(&self) -> Vec<(&'static str, f64)> {
        [
            ("Kraftstoff", self.fuel),
            ("Fahrzeugwäsche", self.wash),
            ("Additive", self.additive),
            ("Maut", self.toll),
            ("Parkgebühren", self.parking),
            ("Sonstiges", self.other),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.filter(|amount| *amount > 0.0).map(|amount| (label, amount)))
        .collect()
    }

    pub fn subtotal(&self) -> f64 {
        self.positive_items().iter().map(|(_, v)| v).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub signer_name: String,
    /// Path or URL of the signature image.
    pub asset_ref: String,
    /// RFC 3339.
    pub signed_at: String,
    pub is_driver: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub name: String,
    pub asset_ref: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339.
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRecord {
    pub side: String,
    pub damage_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fully hydrated snapshot of one handover order, supplied by the store.
/// At most one driver and one customer signature exist per order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    pub id: String,
    pub order_number: String,
    pub status: String,
    pub service_type: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// RFC 3339.
    pub created_at: String,
    pub client_address: Address,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub pickup_address: Option<Address>,
    #[serde(default)]
    pub delivery_address: Option<Address>,
    pub vehicle: VehicleData,
    #[serde(default)]
    pub expenses: Option<ExpensesRecord>,
    #[serde(default)]
    pub driver_signature: Option<Signature>,
    #[serde(default)]
    pub customer_signature: Option<Signature>,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
    #[serde(default)]
    pub damages: Vec<DamageRecord>,
    #[serde(default)]
    pub driver: Option<Driver>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_items_filters_zero_and_absent() {
        let record = ExpensesRecord {
            fuel: Some(85.0),
            wash: Some(0.0),
            toll: Some(35.0),
            ..Default::default()
        };
        let items = record.positive_items();
        assert_eq!(items, vec![("Kraftstoff", 85.0), ("Maut", 35.0)]);
        assert_eq!(record.subtotal(), 120.0);
    }

    #[test]
    fn empty_record_has_no_items() {
        let record = ExpensesRecord::default();
        assert!(record.positive_items().is_empty());
        assert_eq!(record.subtotal(), 0.0);
    }

    #[test]
    fn order_snapshot_round_trips_as_json() {
        let order = crate::testdata::sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: OrderAggregate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.order_number, order.order_number);
        assert_eq!(back.equipment, order.equipment);
    }
}
