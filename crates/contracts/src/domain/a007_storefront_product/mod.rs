pub mod list;
pub mod record;

pub use list::ProductListResponse;
pub use record::{FeaturedImage, ProductRecord, PublicationRef, ResourcePublication};
