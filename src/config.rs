//! Business profile configuration.

use serde::{Deserialize, Serialize};

/// Identity of the garage, printed on rendered documents and used to build
/// download filenames.
///
/// # Example
///
/// ```
/// use garage_kit::GarageProfile;
///
/// let profile = GarageProfile::default()
///     .with_name("HILLSIDE AUTO WORKS")
///     .with_location("PUNE")
///     .with_contact("9800000000");
///
/// assert_eq!(profile.slug(), "Hillside-Auto-Works");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GarageProfile {
    /// Business name, rendered as the document header.
    pub name: String,
    /// City/locality line under the name.
    pub location: String,
    /// Contact phone, rendered in header and footer.
    pub contact: String,
}

impl GarageProfile {
    /// Set the business name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the location line.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the contact phone.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    /// Title-cased, dash-joined form of the business name, used as the
    /// filename prefix for rendered documents.
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Default for GarageProfile {
    fn default() -> Self {
        GarageProfile {
            name: "GOKUL MOTOR GARAGE".to_string(),
            location: "AMALNER".to_string(),
            contact: "9370071035".to_string(),
        }
    }
}
