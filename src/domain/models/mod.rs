// Content models shared between the CMS client and server

pub mod collection;
pub mod contact;
pub mod snapshot;
pub mod snippet;
pub mod submission;
pub mod user;

pub use collection::{CollectionKind, OrderedItem, PartnerItem, PortfolioItem, ServiceItem};
pub use contact::{ContactInfo, ContactInfoPatch, CONTACT_ID};
pub use snapshot::ContentSnapshot;
pub use snippet::ContentSnippet;
pub use submission::{FormSubmission, FormSubmissionPatch, NewFormSubmission, SubmissionStatus};
pub use user::{AuthSession, AuthUser, Role, UserProfile};
