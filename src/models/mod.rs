pub mod media;
pub mod site;

pub use media::{MAX_SCALE, MIN_SCALE, MediaItem, MediaSections, MediaType, SectionKey, Transform};
pub use site::{DoctorInfo, OfficeHours, SiteConfig};
