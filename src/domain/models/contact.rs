use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id given to the contact singleton when it is first created
pub const CONTACT_ID: &str = "contact";

/// Company contact details. Exactly one record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Vec<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub business_hours: Vec<String>,
    /// Network name -> profile URL
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for the contact singleton. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfoPatch {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<Vec<String>>,
    #[serde(default)]
    pub email: Option<Vec<String>>,
    #[serde(default)]
    pub business_hours: Option<Vec<String>>,
    #[serde(default)]
    pub social_links: Option<BTreeMap<String, String>>,
}

impl ContactInfo {
    /// Build the singleton from a patch when none exists yet
    pub fn from_patch(patch: ContactInfoPatch) -> Self {
        let now = Utc::now();
        Self {
            id: CONTACT_ID.to_string(),
            address: patch.address.unwrap_or_default(),
            phone: patch.phone.unwrap_or_default(),
            email: patch.email.unwrap_or_default(),
            business_hours: patch.business_hours.unwrap_or_default(),
            social_links: patch.social_links.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch in place and bump `updated_at`
    pub fn apply(&mut self, patch: ContactInfoPatch) {
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(hours) = patch.business_hours {
            self.business_hours = hours;
        }
        if let Some(links) = patch.social_links {
            self.social_links = links;
        }
        self.updated_at = Utc::now();
    }
}

impl From<ContactInfo> for ContactInfoPatch {
    fn from(info: ContactInfo) -> Self {
        Self {
            address: Some(info.address),
            phone: Some(info.phone),
            email: Some(info.email),
            business_hours: Some(info.business_hours),
            social_links: Some(info.social_links),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut info = ContactInfo::from_patch(ContactInfoPatch {
            address: Some("Kathmandu".to_string()),
            phone: Some(vec!["+977 1".to_string()]),
            ..Default::default()
        });
        let id = info.id.clone();

        info.apply(ContactInfoPatch {
            email: Some(vec!["info@example.com".to_string()]),
            ..Default::default()
        });

        assert_eq!(info.id, id);
        assert_eq!(info.address, "Kathmandu");
        assert_eq!(info.phone, vec!["+977 1".to_string()]);
        assert_eq!(info.email, vec!["info@example.com".to_string()]);
    }
}
