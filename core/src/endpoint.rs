//! Catalog of server operations.
//!
//! Adding an operation means adding one variant plus its suffix and verb;
//! the exhaustive matches below make a forgotten arm a compile error.

use crate::http::HttpMethod;

/// Path prefix shared by every operation.
pub const BASE_PATH: &str = "/api/";

/// A logical server operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    // Main page
    MarqueeList,
    CampaignLink,
    SwpMainAd,
    CategoryAd,
    SwpPortraitAd,
    FlagshipStoreAd,
    CategoryMidAd,
    MiddleCategoryCenterAd,

    // Search page
    SearchOrder,
    SearchOrderDetail,
}

impl Endpoint {
    pub const ALL: [Endpoint; 10] = [
        Endpoint::MarqueeList,
        Endpoint::CampaignLink,
        Endpoint::SwpMainAd,
        Endpoint::CategoryAd,
        Endpoint::SwpPortraitAd,
        Endpoint::FlagshipStoreAd,
        Endpoint::CategoryMidAd,
        Endpoint::MiddleCategoryCenterAd,
        Endpoint::SearchOrder,
        Endpoint::SearchOrderDetail,
    ];

    /// Operation name as it appears in the URL.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::MarqueeList => "MarqueeList",
            Endpoint::CampaignLink => "CampaignLink",
            Endpoint::SwpMainAd => "SwpMainAD",
            Endpoint::CategoryAd => "CategoryAD",
            Endpoint::SwpPortraitAd => "SwpPortraitAD",
            Endpoint::FlagshipStoreAd => "FlagshipStoreAd",
            Endpoint::CategoryMidAd => "CategoryMidAD",
            Endpoint::MiddleCategoryCenterAd => "MiddleCategoryCenterAD",
            Endpoint::SearchOrder => "SearchOrder",
            Endpoint::SearchOrderDetail => "SearchOrderDetail",
        }
    }

    /// Full path relative to the base URL, e.g. `/api/MarqueeList`.
    pub fn path(self) -> String {
        format!("{BASE_PATH}{}", self.name())
    }

    pub fn http_method(self) -> HttpMethod {
        match self {
            Endpoint::MarqueeList
            | Endpoint::CampaignLink
            | Endpoint::SwpMainAd
            | Endpoint::CategoryAd
            | Endpoint::SwpPortraitAd
            | Endpoint::FlagshipStoreAd
            | Endpoint::CategoryMidAd
            | Endpoint::MiddleCategoryCenterAd => HttpMethod::GET,
            Endpoint::SearchOrder | Endpoint::SearchOrderDetail => HttpMethod::POST,
        }
    }

    /// Reverse lookup by operation name.
    pub fn from_name(name: &str) -> Option<Endpoint> {
        Endpoint::ALL.into_iter().find(|endpoint| endpoint.name() == name)
    }
}
