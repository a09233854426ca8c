pub mod assets;
pub mod canvas;
pub mod compose;
pub mod error;
pub mod format;
pub mod labels;
pub mod layout;
pub mod mail;
pub mod model;
pub mod sanitize;
pub mod store;

pub use compose::ReportComposer;
pub use error::ReportError;
pub use model::OrderAggregate;

#[cfg(test)]
pub(crate) mod testdata {
    use crate::assets::{AssetError, AssetResolver};
    use crate::model::*;

    /// Resolver that knows no assets at all.
    pub struct NullResolver;

    impl AssetResolver for NullResolver {
        fn resolve(&self, _reference: &str) -> Result<Option<Vec<u8>>, AssetError> {
            Ok(None)
        }

        fn find_logo(&self) -> Option<Vec<u8>> {
            None
        }
    }

    pub fn sample_address() -> Address {
        Address {
            street: "Hauptstraße".to_string(),
            house_number: "12a".to_string(),
            zip: "10115".to_string(),
            city: "Berlin".to_string(),
            country: "Deutschland".to_string(),
            company: Some("Muster Autohaus GmbH".to_string()),
            contact_name: Some("Erika Mustermann".to_string()),
            contact_phone: Some("+49 30 1234567".to_string()),
            contact_email: Some("erika@example.de".to_string()),
            fuel_level: Some(6),
            fuel_meter: Some(45230.0),
            event_date: Some("2024-03-15T09:30:00Z".to_string()),
        }
    }

    pub fn sample_order() -> OrderAggregate {
        OrderAggregate {
            id: "ord-42".to_string(),
            order_number: "UE-2024-0042".to_string(),
            status: "ASSIGNED".to_string(),
            service_type: "TRANSFER".to_string(),
            vehicle_type: "PKW".to_string(),
            description: "Überführung von Berlin nach Hamburg.".to_string(),
            comments: None,
            equipment: vec!["FIRST_AID_KIT".to_string(), "WARNING_TRIANGLE".to_string()],
            created_at: "2024-03-14T08:00:00Z".to_string(),
            client_address: sample_address(),
            billing_address: None,
            pickup_address: Some(sample_address()),
            delivery_address: None,
            vehicle: VehicleData {
                owner: "Muster Autohaus GmbH".to_string(),
                plate: "B-MW 1234".to_string(),
                vin: "WBA12345678901234".to_string(),
                brand: "BMW".to_string(),
                model: "320d".to_string(),
                year: "2021".to_string(),
                color: "Schwarz".to_string(),
                order_code: None,
                contract_code: None,
                cost_center: None,
                remark: None,
            },
            expenses: None,
            driver_signature: None,
            customer_signature: None,
            images: Vec::new(),
            damages: Vec::new(),
            driver: Some(Driver {
                name: "Max Fahrer".to_string(),
                email: "max@example.de".to_string(),
                phone: "+49 170 9876543".to_string(),
            }),
        }
    }
}
