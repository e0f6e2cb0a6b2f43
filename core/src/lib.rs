//! Typed async client for the storefront API.
//!
//! # Overview
//! Every server operation answers with the same JSON envelope
//! (`code`, `redirect`, `data`, `token`). This crate turns an [`Endpoint`]
//! into a request, runs it through a [`Transport`], unwraps the envelope into
//! a typed payload, and classifies every failure as one [`ApiError`].
//! [`Aggregator`] fans several calls out concurrently and joins them, and
//! [`HomeFeed`] is the main-page join built on it.
//!
//! # Design
//! - `ApiClient` is configuration plus transport; it keeps no state between
//!   calls and is cheap to clone into spawned branches.
//! - Request building and response parsing are pure (`build_request`,
//!   `parse_response`); only the transport does I/O.
//! - Deployment selection is an explicit [`ClientConfig`] value, so tests
//!   inject their own base URL, token and transport.

pub mod aggregate;
pub mod banner;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod home;
pub mod http;
pub mod transport;
pub mod types;

pub use aggregate::{Aggregator, Branch, BranchPolicy};
pub use banner::{BannerError, BannerResult, BannerSlots};
pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use endpoint::Endpoint;
pub use envelope::Envelope;
pub use error::ApiError;
pub use home::HomeFeed;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{AppLink, BannerAd, CampaignLink, CategoryAd, Marquee, SwpPortraitAd};
