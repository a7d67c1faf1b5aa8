pub mod content_type;
pub mod error;
pub mod item;
pub mod marketplace;
pub mod pack;
pub mod release_note;
pub mod result;
pub mod store;
pub mod version;

pub use content_type::ContentType;
pub use error::{ModelError, Result};
pub use item::ContentItem;
pub use marketplace::Marketplace;
pub use pack::{BreakingChanges, Pack, PackMetadata, PackSnapshot, ReleaseNote};
pub use release_note::{RnDocument, RnEntry, RnSection, parse_release_note};
pub use result::ValidationResult;
pub use store::{ContentStore, ItemId, PackId};
pub use version::{ContentVersion, MINIMUM_PLATFORM_VERSION};
