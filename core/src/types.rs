//! Item records returned by the storefront endpoints.
//!
//! Wire field names are snake_case and map onto the Rust field names
//! directly. The exceptions are declared with `#[serde(rename)]`: the `type`
//! field of a deep link, and the banner `img_url` exposed as `image_url`.
//! Most fields are optional because each endpoint only fills the ones it
//! uses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-app navigation target attached to an ad or marquee entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppLink {
    pub category_id: Option<String>,
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

/// Scrolling headline on the main page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marquee {
    pub subject: Option<String>,
    pub app: Option<AppLink>,
    pub subject_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignLink {
    pub url: Option<String>,
    pub app: Option<AppLink>,
    pub campaign_name: Option<String>,
    pub url_mobile: Option<String>,
    pub ad_title: Option<String>,
    pub ad_name: Option<String>,
}

/// A banner entry.
///
/// `id` is generated on decode and never sent over the wire; list views use
/// it as a stable identity. Several fields are only filled by particular
/// endpoints: `head_id4` by the AD3 slot, `campaign_id` by category-mid
/// banners, `ad_name`/`ad_title` by the main swipe banners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BannerAd {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub url: Option<String>,
    pub app: Option<AppLink>,
    pub flagshipstore_ad_id: Option<String>,
    pub flagshipstore_id: Option<String>,
    pub flagshipstore_name: Option<String>,
    pub category_name: Option<String>,
    pub head_id: Option<i64>,
    pub url_mobile: Option<String>,
    #[serde(rename = "img_url")]
    pub image_url: Option<String>,
    pub img_url_m: Option<String>,
    pub create_date: Option<String>,
    pub theme_color: Option<String>,
    pub url_m: Option<String>,
    pub head_id4: Option<i64>,
    pub campaign_id: Option<String>,
    pub ad_name: Option<String>,
    pub ad_title: Option<String>,
    pub special_id: Option<i64>,
}

impl BannerAd {
    /// Image to display: the primary image, else the mobile image, else "".
    pub fn img_url(&self) -> &str {
        self.image_url
            .as_deref()
            .or(self.img_url_m.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryAd {
    pub name: String,
    pub theme: Option<String>,
    pub url: Option<String>,
    pub app: Option<AppLink>,
    pub img_url: Option<String>,
    pub ad_name: Option<String>,
    pub ad_title: Option<String>,
}

/// Portrait banner on the main page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwpPortraitAd {
    pub name: Option<String>,
    pub url: Option<String>,
    pub app: Option<AppLink>,
    pub campaign_id: Option<String>,
    pub img_url: Option<String>,
    pub ad_name: Option<String>,
    pub ad_title: Option<String>,
}
