//! Fan-out / fan-in of independent pipeline calls.
//!
//! Each [`Branch`] is one spawned request. Branches are joined with
//! `tokio::try_join!`, which yields every result in declared order once all
//! succeed, or the first error as soon as any branch fails:
//!
//! ```no_run
//! # async fn demo(aggregator: storefront_core::Aggregator) -> Result<(), storefront_core::ApiError> {
//! use storefront_core::{CampaignLink, Endpoint, Marquee};
//!
//! let (marquees, links) = tokio::try_join!(
//!     aggregator.branch::<Vec<Marquee>>(Endpoint::MarqueeList),
//!     aggregator.branch::<Vec<CampaignLink>>(Endpoint::CampaignLink),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! What happens to the branches still running after a failure is decided by
//! [`BranchPolicy`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::task::AbortOnDropHandle;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;

/// Fate of in-flight branches once a join has already failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchPolicy {
    /// Abort them; dropping the branch aborts its task.
    #[default]
    CancelOnFailure,
    /// Let them run to completion and discard their results.
    Detach,
}

/// A spawned pipeline call, awaited as `Result<T, ApiError>`.
///
/// Must be created inside a Tokio runtime.
pub struct Branch<T> {
    handle: BranchHandle<T>,
}

enum BranchHandle<T> {
    Abortable(AbortOnDropHandle<Result<T, ApiError>>),
    Detached(JoinHandle<Result<T, ApiError>>),
}

impl<T: Send + 'static> Branch<T> {
    pub fn spawn<F>(future: F, policy: BranchPolicy) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let task = tokio::spawn(future);
        let handle = match policy {
            BranchPolicy::CancelOnFailure => BranchHandle::Abortable(AbortOnDropHandle::new(task)),
            BranchPolicy::Detach => BranchHandle::Detached(task),
        };
        Self { handle }
    }
}

impl<T> Future for Branch<T> {
    type Output = Result<T, ApiError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let joined = match &mut self.get_mut().handle {
            BranchHandle::Abortable(handle) => Pin::new(handle).poll(cx),
            BranchHandle::Detached(handle) => Pin::new(handle).poll(cx),
        };
        joined.map(|result| result.unwrap_or_else(|e| Err(join_failed(&e))))
    }
}

fn join_failed(err: &JoinError) -> ApiError {
    let reason = if err.is_cancelled() {
        "branch cancelled"
    } else {
        "branch panicked"
    };
    tracing::error!(error = %err, "{reason}");
    ApiError::RequestFailed(reason.to_string())
}

/// Spawns pipeline calls on a shared client.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: ApiClient,
    policy: BranchPolicy,
}

impl Aggregator {
    /// Uses the client's configured branch policy.
    pub fn new(client: ApiClient) -> Self {
        let policy = client.config().branch_policy;
        Self { client, policy }
    }

    pub fn with_policy(client: ApiClient, policy: BranchPolicy) -> Self {
        Self { client, policy }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn policy(&self) -> BranchPolicy {
        self.policy
    }

    /// Start fetching `endpoint` as `T`.
    pub fn branch<T>(&self, endpoint: Endpoint) -> Branch<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.client.clone();
        Branch::spawn(
            async move { client.fetch::<T>(endpoint).await },
            self.policy,
        )
    }
}

/// Run `join` on its own task and hand its single result to the returned
/// receiver, the completion context of the consumer.
///
/// The result is sent exactly once. If the receiver is gone, the result is
/// dropped.
pub fn deliver<T, F>(join: F) -> oneshot::Receiver<Result<T, ApiError>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = join.await;
        if tx.send(result).is_err() {
            tracing::debug!("completion receiver dropped before delivery");
        }
    });
    rx
}
