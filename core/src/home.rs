//! The main page: five independent endpoints joined into one result.

use tokio::sync::oneshot;

use crate::aggregate::{self, Aggregator};
use crate::banner::BannerResult;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::types::{CampaignLink, CategoryAd, Marquee, SwpPortraitAd};

/// Everything the main page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeFeed {
    pub marquees: Vec<Marquee>,
    pub campaign_links: Vec<CampaignLink>,
    pub main_banners: BannerResult,
    pub category_ads: Vec<CategoryAd>,
    pub portrait_ads: Vec<SwpPortraitAd>,
}

impl HomeFeed {
    /// Fetch all sections concurrently. Fails with the first branch error.
    pub async fn load(aggregator: &Aggregator) -> Result<Self, ApiError> {
        let joined = tokio::try_join!(
            aggregator.branch::<Vec<Marquee>>(Endpoint::MarqueeList),
            aggregator.branch::<Vec<CampaignLink>>(Endpoint::CampaignLink),
            aggregator.branch::<BannerResult>(Endpoint::SwpMainAd),
            aggregator.branch::<Vec<CategoryAd>>(Endpoint::CategoryAd),
            aggregator.branch::<Vec<SwpPortraitAd>>(Endpoint::SwpPortraitAd),
        );

        match joined {
            Ok((marquees, campaign_links, main_banners, category_ads, portrait_ads)) => {
                tracing::info!(
                    marquees = marquees.len(),
                    campaign_links = campaign_links.len(),
                    main_banners = main_banners.banners().len(),
                    category_ads = category_ads.len(),
                    portrait_ads = portrait_ads.len(),
                    "home feed loaded"
                );
                Ok(Self {
                    marquees,
                    campaign_links,
                    main_banners,
                    category_ads,
                    portrait_ads,
                })
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    error = %e,
                    policy = ?aggregator.policy(),
                    "home feed failed"
                );
                Err(e)
            }
        }
    }

    /// Start loading in the background; the receiver gets the single result.
    pub fn spawn_load(aggregator: &Aggregator) -> oneshot::Receiver<Result<Self, ApiError>> {
        let aggregator = aggregator.clone();
        aggregate::deliver(async move { Self::load(&aggregator).await })
    }
}
