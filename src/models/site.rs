use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Weekly opening hours as displayed on the page. An empty `saturday`
/// hides the line entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficeHours {
    pub weekdays: String,
    pub saturday: String,
}

/// One staff bio shown next to the doctor highlight media (two at most,
/// matching the capped media section).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorInfo {
    pub full_name: String,
    pub license: String,
    pub education: String,
    pub experience: String,
}

/// The companion site configuration document. Pure data read by the page
/// renderer; edited through the config endpoints and persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub site_url: String,
    #[validate(length(min = 1, message = "clinicName must not be empty"))]
    pub clinic_name: String,
    /// Locale city, also folded into derived file names and alt text.
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    pub state: String,
    pub address_line1: String,
    pub address_line2: String,
    pub postal_code: String,
    pub logo_url: String,
    pub years_experience: String,
    pub implants_placed: String,
    pub google_rating: String,
    pub office_hours: OfficeHours,
    pub google_maps_url: String,
    pub doctors: Vec<DoctorInfo>,
    /// Digits only, with country code.
    pub whatsapp_e164: String,
    /// Lead-form submission endpoint used by the rendered page.
    pub webhook_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://example.com".to_string(),
            clinic_name: "Evo Smile Studio".to_string(),
            city: "Maricá".to_string(),
            state: "RJ".to_string(),
            address_line1: String::new(),
            address_line2: String::new(),
            postal_code: String::new(),
            logo_url: String::new(),
            years_experience: "15".to_string(),
            implants_placed: "5000".to_string(),
            google_rating: "4,9".to_string(),
            office_hours: OfficeHours {
                weekdays: "Monday to Friday, 8am to 6pm".to_string(),
                saturday: String::new(),
            },
            google_maps_url: String::new(),
            doctors: Vec::new(),
            whatsapp_e164: String::new(),
            webhook_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_a_city_for_slug_derivation() {
        let config = SiteConfig::default();
        assert!(!config.city.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_city_fails_validation() {
        let config = SiteConfig {
            city: String::new(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn wire_format_is_camel_case_and_total() {
        let json = serde_json::to_value(SiteConfig::default()).unwrap();
        assert!(json.get("clinicName").is_some());
        assert!(json.get("officeHours").is_some());
        assert!(json.get("whatsappE164").is_some());

        // A partial document (e.g. hand-edited) still loads.
        let partial: SiteConfig = serde_json::from_str(r#"{"city": "Niterói"}"#).unwrap();
        assert_eq!(partial.city, "Niterói");
        assert_eq!(partial.clinic_name, SiteConfig::default().clinic_name);
    }
}
