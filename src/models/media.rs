use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Zoom range accepted for a stored framing.
pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Canonical extension of the processed asset.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image => "webp",
            Self::Video => "mp4",
        }
    }

    /// Top-level asset folder the file is stored under.
    pub fn base_folder(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }

    /// Leading keyword of derived file names.
    pub fn slug_prefix(&self) -> &'static str {
        match self {
            Self::Image => "dental-implant",
            Self::Video => "dental-implant-video",
        }
    }
}

/// The fixed set of page sections that carry managed media. Wire names
/// match the keys of the persisted content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SectionKey {
    #[serde(rename = "smilesTransformed")]
    SmilesTransformed,
    #[serde(rename = "doctorHighlight")]
    DoctorHighlight,
    #[serde(rename = "realStories")]
    RealStories,
    #[serde(rename = "clinicStructure")]
    ClinicStructure,
}

impl SectionKey {
    pub const ALL: [SectionKey; 4] = [
        Self::SmilesTransformed,
        Self::DoctorHighlight,
        Self::RealStories,
        Self::ClinicStructure,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "smilesTransformed" => Some(Self::SmilesTransformed),
            "doctorHighlight" => Some(Self::DoctorHighlight),
            "realStories" => Some(Self::RealStories),
            "clinicStructure" => Some(Self::ClinicStructure),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmilesTransformed => "smilesTransformed",
            Self::DoctorHighlight => "doctorHighlight",
            Self::RealStories => "realStories",
            Self::ClinicStructure => "clinicStructure",
        }
    }

    /// Subfolder under the images/videos asset roots.
    pub fn asset_folder(&self) -> &'static str {
        match self {
            Self::SmilesTransformed => "smiles",
            Self::DoctorHighlight => "doctor",
            Self::RealStories => "stories",
            Self::ClinicStructure => "clinic",
        }
    }

    /// Width ceiling for processed images. Staff portraits keep more
    /// resolution than gallery shots.
    pub fn image_width_ceiling(&self) -> u32 {
        match self {
            Self::DoctorHighlight => 1400,
            _ => 1000,
        }
    }

    /// Maximum number of items, for capped sections.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Self::DoctorHighlight => Some(2),
            _ => None,
        }
    }

    /// Accessibility/SEO text for a new item in this section.
    pub fn alt_text(&self, description: Option<&str>, city: &str) -> String {
        let subject = match self {
            Self::SmilesTransformed => {
                format!("Before and after of a patient treated with dental implants in {city}")
            }
            Self::DoctorHighlight => format!("Implant dentistry specialist in {city}"),
            Self::RealStories => format!("Patient testimonial about dental implants in {city}"),
            Self::ClinicStructure => format!("Facilities of the dental implant clinic in {city}"),
        };
        match description {
            Some(text) if !text.is_empty() => format!("{text} - {subject}"),
            _ => subject,
        }
    }
}

/// Operator-adjusted pan/zoom framing of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Transform {
    pub const NEUTRAL: Transform = Transform {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Bring a requested framing into the accepted range. At or below
    /// neutral zoom there is nothing to pan, so offsets collapse to zero.
    pub fn clamped(self) -> Transform {
        let scale = self.scale.clamp(MIN_SCALE, MAX_SCALE);
        if scale <= 1.0 {
            Transform {
                scale,
                offset_x: 0.0,
                offset_y: 0.0,
            }
        } else {
            Transform { scale, ..self }
        }
    }
}

/// One stored media asset as recorded in the content document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Site-root relative path, e.g. `/images/clinic/<file>.webp`.
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Still image shown before a video plays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    /// Zero-based position within the section, dense after every mutation.
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

/// The whole persisted content document: one ordered list per section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSections {
    pub smiles_transformed: Vec<MediaItem>,
    pub doctor_highlight: Vec<MediaItem>,
    pub real_stories: Vec<MediaItem>,
    pub clinic_structure: Vec<MediaItem>,
}

impl MediaSections {
    pub fn section(&self, key: SectionKey) -> &[MediaItem] {
        match key {
            SectionKey::SmilesTransformed => &self.smiles_transformed,
            SectionKey::DoctorHighlight => &self.doctor_highlight,
            SectionKey::RealStories => &self.real_stories,
            SectionKey::ClinicStructure => &self.clinic_structure,
        }
    }

    pub fn section_mut(&mut self, key: SectionKey) -> &mut Vec<MediaItem> {
        match key {
            SectionKey::SmilesTransformed => &mut self.smiles_transformed,
            SectionKey::DoctorHighlight => &mut self.doctor_highlight,
            SectionKey::RealStories => &mut self.real_stories,
            SectionKey::ClinicStructure => &mut self.clinic_structure,
        }
    }

    /// Insert under the section's cardinality policy and return the item as
    /// stored. A capped section at capacity replaces its last slot instead
    /// of growing.
    pub fn insert(&mut self, key: SectionKey, mut item: MediaItem) -> MediaItem {
        let list = self.section_mut(key);
        match key.capacity() {
            Some(cap) if list.len() >= cap => {
                item.order = cap - 1;
                list[cap - 1] = item.clone();
            }
            _ => {
                item.order = list.len();
                list.push(item.clone());
            }
        }
        item
    }

    /// Remove by id, renumbering the remainder so `order` stays dense and
    /// zero-based.
    pub fn remove(&mut self, key: SectionKey, id: &str) -> Option<MediaItem> {
        let list = self.section_mut(key);
        let index = list.iter().position(|item| item.id == id)?;
        let removed = list.remove(index);
        for (order, item) in list.iter_mut().enumerate() {
            item.order = order;
        }
        Some(removed)
    }

    pub fn find_mut(&mut self, key: SectionKey, id: &str) -> Option<&mut MediaItem> {
        self.section_mut(key).iter_mut().find(|item| item.id == id)
    }
}
