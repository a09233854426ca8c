//! Fixed display strings and code→label lookup tables.
//!
//! The report is rendered in a single fixed locale (German). Lookups map the
//! domain codes stored on the order to display strings; unmapped codes render
//! literally so an unknown code never breaks a report.

pub const COMPANY_NAME: &str = "AutoLogistik GmbH";
pub const COMPANY_ADDRESS: &str = "Industriestraße 45, 60311 Frankfurt am Main";
pub const COMPANY_CONTACT: &str = "Tel. +49 69 555 0100 / info@autologistik.example";

pub const DOCUMENT_TITLE: &str = "Fahrzeug-Übergabeprotokoll";

pub const NOT_SPECIFIED: &str = "nicht angegeben";
pub const NOT_AVAILABLE: &str = "nicht verfügbar";
pub const NO_ADDRESS: &str = "Keine Adresse verfügbar";
pub const NO_DAMAGES: &str = "Keine Schäden festgestellt";
pub const NO_EXTRA_COSTS: &str = "Keine zusätzlichen Kosten";
pub const SIGNATURE_PENDING: &str = "Unterschrift ausstehend";
pub const SIGNATURE_NOT_AVAILABLE: &str = "Unterschrift nicht verfügbar";
pub const PHOTO_NOT_AVAILABLE: &str = "Foto nicht verfügbar";
pub const PHOTO_LOAD_ERROR: &str = "Fehler beim Laden des Fotos";
pub const PHOTO_CAPTION_DEFAULT: &str = "Dokumentation";

pub const CONFIRMATION_BANNER: &str = "Mit ihrer Unterschrift bestätigen beide Parteien die \
ordnungsgemäße Übergabe des Fahrzeugs gemäß den in diesem Protokoll dokumentierten Angaben \
zu Zustand, Ausstattung und Schäden.";

pub const LEGAL_VALIDITY_TITLE: &str = "Gültigkeit";
pub const LEGAL_VALIDITY_TEXT: &str = "Dieses Protokoll ist nur vollständig unterschrieben \
gültig und dokumentiert den Fahrzeugzustand zum Zeitpunkt der Übergabe.";
pub const LEGAL_PRIVACY_TITLE: &str = "Datenschutz";
pub const LEGAL_PRIVACY_TEXT: &str = "Personenbezogene Daten werden ausschließlich zur \
Abwicklung des Auftrags verarbeitet und nicht an Dritte weitergegeben.";
pub const LEGAL_BINDING_TITLE: &str = "Verbindlichkeit";
pub const LEGAL_BINDING_TEXT: &str = "Spätere Beanstandungen, die nicht in diesem Protokoll \
vermerkt sind, können nicht berücksichtigt werden.";

pub const PHOTO_FOOTER_NOTICE: &str =
    "Fotodokumentation – Bestandteil des Übergabeprotokolls, nicht einzeln gültig.";

/// Order status code → display label.
pub fn status_label(code: &str) -> String {
    match code.trim() {
        "OPEN" => "Offen",
        "ASSIGNED" => "Zugewiesen",
        "IN_PROGRESS" => "In Bearbeitung",
        "DELIVERED" => "Zugestellt",
        "COMPLETED" => "Abgeschlossen",
        "CANCELLED" => "Storniert",
        other => return fallback(other),
    }
    .to_string()
}

/// Service type code → display label.
pub fn service_type_label(code: &str) -> String {
    match code.trim() {
        "TRANSFER" => "Überführung",
        "PICKUP" => "Abholung",
        "DELIVERY" => "Zustellung",
        "ROUND_TRIP" => "Hin- und Rückfahrt",
        other => return fallback(other),
    }
    .to_string()
}

/// Equipment item code → (icon, display label).
pub fn equipment_label(code: &str) -> (&'static str, String) {
    let label = match code.trim() {
        "FIRST_AID_KIT" => "Verbandskasten",
        "WARNING_TRIANGLE" => "Warndreieck",
        "SAFETY_VEST" => "Warnweste",
        "SPARE_WHEEL" => "Ersatzrad",
        "CAR_JACK" => "Wagenheber",
        "TOOL_KIT" => "Bordwerkzeug",
        "REGISTRATION_DOCUMENT" => "Fahrzeugschein",
        "VEHICLE_KEY" => "Fahrzeugschlüssel",
        "NAVIGATION" => "Navigationssystem",
        "CHARGING_CABLE" => "Ladekabel",
        other => return ("•", fallback(other)),
    };
    ("✓", label.to_string())
}

/// Damage type code → display label.
pub fn damage_type_label(code: &str) -> String {
    match code.trim() {
        "SCRATCH" => "Kratzer",
        "DENT" => "Delle",
        "CRACK" => "Riss",
        "RUST" => "Rost",
        "PAINT_DAMAGE" => "Lackschaden",
        "STONE_CHIP" => "Steinschlag",
        "BROKEN_PART" => "Bruch",
        "OTHER" => "Sonstiges",
        other => return fallback(other),
    }
    .to_string()
}

/// Vehicle side code → display label.
pub fn vehicle_side_label(code: &str) -> String {
    match code.trim() {
        "FRONT" => "Front",
        "REAR" => "Heck",
        "LEFT" => "Linke Seite",
        "RIGHT" => "Rechte Seite",
        "ROOF" => "Dach",
        "INTERIOR" => "Innenraum",
        other => return fallback(other),
    }
    .to_string()
}

/// Identity fallback: the raw code renders as its own text, never empty.
fn fallback(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_translate() {
        assert_eq!(status_label("ASSIGNED"), "Zugewiesen");
        assert_eq!(service_type_label("TRANSFER"), "Überführung");
        assert_eq!(damage_type_label("SCRATCH"), "Kratzer");
        assert_eq!(vehicle_side_label("REAR"), "Heck");
        assert_eq!(equipment_label("SPARE_WHEEL").1, "Ersatzrad");
    }

    #[test]
    fn unmapped_code_renders_literally() {
        assert_eq!(damage_type_label("HAIL_DAMAGE"), "HAIL_DAMAGE");
        assert_eq!(status_label("ARCHIVED"), "ARCHIVED");
    }

    #[test]
    fn empty_code_never_yields_empty_output() {
        assert_eq!(status_label("  "), NOT_SPECIFIED);
        assert_eq!(vehicle_side_label(""), NOT_SPECIFIED);
    }
}
