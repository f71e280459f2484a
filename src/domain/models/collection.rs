use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every collection the content layer persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Snippets,
    Services,
    Portfolio,
    Partners,
    Contact,
    Submissions,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 6] = [
        CollectionKind::Snippets,
        CollectionKind::Services,
        CollectionKind::Portfolio,
        CollectionKind::Partners,
        CollectionKind::Contact,
        CollectionKind::Submissions,
    ];

    /// Table name in the structured store
    pub fn table_name(&self) -> &'static str {
        match self {
            CollectionKind::Snippets => "cms_content",
            CollectionKind::Services => "cms_services",
            CollectionKind::Portfolio => "cms_portfolio",
            CollectionKind::Partners => "cms_partners",
            CollectionKind::Contact => "cms_contact",
            CollectionKind::Submissions => "form_submissions",
        }
    }

    /// Key used by the local key-value store
    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKind::Snippets => "naya-cms-content",
            CollectionKind::Services => "naya-cms-services",
            CollectionKind::Portfolio => "naya-cms-portfolio",
            CollectionKind::Partners => "naya-cms-partners",
            CollectionKind::Contact => "naya-cms-contact",
            CollectionKind::Submissions => "naya-cms-forms",
        }
    }

    /// Human label used in log lines and user-facing errors
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Snippets => "content",
            CollectionKind::Services => "services",
            CollectionKind::Portfolio => "portfolio",
            CollectionKind::Partners => "partners",
            CollectionKind::Contact => "contact information",
            CollectionKind::Submissions => "form submissions",
        }
    }

    pub fn from_slug(slug: &str) -> Option<CollectionKind> {
        match slug {
            "snippets" | "content" => Some(CollectionKind::Snippets),
            "services" => Some(CollectionKind::Services),
            "portfolio" => Some(CollectionKind::Portfolio),
            "partners" => Some(CollectionKind::Partners),
            "contact" => Some(CollectionKind::Contact),
            "submissions" | "forms" => Some(CollectionKind::Submissions),
            _ => None,
        }
    }
}

/// Items of the admin-edited, bulk-replaced lists (services, portfolio, partners)
pub trait OrderedItem: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: CollectionKind;

    fn id(&self) -> &str;
    fn display_order(&self) -> i32;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    /// Symbolic icon name ("Code", "Shield", ...)
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceItem {
    pub fn new(title: impl Into<String>, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            icon: "Code".to_string(),
            title: title.into(),
            description: String::new(),
            features: Vec::new(),
            category: None,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

impl OrderedItem for ServiceItem {
    const COLLECTION: CollectionKind = CollectionKind::Services;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PortfolioItem {
    pub fn new(title: impl Into<String>, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            category: None,
            description: None,
            image_url: None,
            tags: Vec::new(),
            link: None,
            featured: false,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

impl OrderedItem for PortfolioItem {
    const COLLECTION: CollectionKind = CollectionKind::Portfolio;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnerItem {
    pub fn new(name: impl Into<String>, display_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            logo: None,
            description: None,
            website: None,
            category: None,
            display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

impl OrderedItem for PartnerItem {
    const COLLECTION: CollectionKind = CollectionKind::Partners;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_slugs() {
        assert_eq!(CollectionKind::from_slug("services"), Some(CollectionKind::Services));
        assert_eq!(CollectionKind::from_slug("forms"), Some(CollectionKind::Submissions));
        assert_eq!(CollectionKind::from_slug("unknown"), None);
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<_> = CollectionKind::ALL.iter().map(|c| c.table_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CollectionKind::ALL.len());
    }

    #[test]
    fn test_portfolio_missing_optionals_deserialize() {
        let json = serde_json::json!({
            "id": "p1",
            "title": "Site",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        });
        let item: PortfolioItem = serde_json::from_value(json).unwrap();
        assert!(item.tags.is_empty());
        assert!(!item.featured);
        assert_eq!(item.display_order, 0);
    }
}
