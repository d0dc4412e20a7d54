#![expect(clippy::module_name_repetitions)]

use std::{collections::VecDeque, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use crate::types::{ConfirmationRequest, ConfirmationResult};

/// Client side of the orchestrator confirmation RPC.
///
/// One call is one synchronous round trip: an ordered sequence of requests
/// produces an ordered sequence of results. Transport, addressing and
/// encoding are the implementor's concern.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn confirm_block_hashes(
        &self,
        requests: Vec<ConfirmationRequest>,
    ) -> Result<Vec<ConfirmationResult>>;
}

#[async_trait]
impl<O: Orchestrator> Orchestrator for Arc<O> {
    async fn confirm_block_hashes(
        &self,
        requests: Vec<ConfirmationRequest>,
    ) -> Result<Vec<ConfirmationResult>> {
        self.as_ref().confirm_block_hashes(requests).await
    }
}

/// Scripted orchestrator for tests. Responses are consumed in the order they
/// were queued; running out of responses fails the call.
#[derive(Default)]
pub struct MockOrchestrator {
    responses: Mutex<VecDeque<Vec<ConfirmationResult>>>,
    requests_seen: Mutex<Vec<Vec<ConfirmationRequest>>>,
}

#[async_trait]
impl Orchestrator for MockOrchestrator {
    async fn confirm_block_hashes(
        &self,
        requests: Vec<ConfirmationRequest>,
    ) -> Result<Vec<ConfirmationResult>> {
        self.requests_seen.lock().push(requests);

        let response = self
            .responses
            .lock()
            .pop_front()
            .ok_or(Error::OutOfResponses)?;

        Ok(response)
    }
}

impl MockOrchestrator {
    pub fn queue_response(&self, response: Vec<ConfirmationResult>) {
        self.responses.lock().push_back(response);
    }

    pub fn queue_repeated_response(&self, response: Vec<ConfirmationResult>, times: usize) {
        let mut responses = self.responses.lock();

        for _ in 0..times {
            responses.push_back(response.clone());
        }
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests_seen.lock().len()
    }

    #[must_use]
    pub fn requests_seen(&self) -> Vec<Vec<ConfirmationRequest>> {
        self.requests_seen.lock().clone()
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error("mock orchestrator ran out of scripted responses")]
    OutOfResponses,
}

#[cfg(test)]
mod tests {
    use types::phase0::primitives::H256;

    use crate::types::ConfirmationStatus;

    use super::*;

    #[tokio::test]
    async fn mock_replays_responses_in_order() -> Result<()> {
        let mock = MockOrchestrator::default();
        let request = ConfirmationRequest {
            slot: 1,
            block_root: H256::repeat_byte(1),
        };

        let result_with = |status| ConfirmationResult {
            slot: 1,
            block_root: H256::repeat_byte(1),
            status,
        };

        mock.queue_response(vec![result_with(ConfirmationStatus::Pending)]);
        mock.queue_response(vec![result_with(ConfirmationStatus::Verified)]);

        assert_eq!(
            mock.confirm_block_hashes(vec![request]).await?,
            vec![result_with(ConfirmationStatus::Pending)],
        );
        assert_eq!(
            mock.confirm_block_hashes(vec![request]).await?,
            vec![result_with(ConfirmationStatus::Verified)],
        );
        assert_eq!(mock.request_count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn mock_fails_when_out_of_responses() {
        let mock = MockOrchestrator::default();

        let result = mock.confirm_block_hashes(vec![]).await;

        assert!(result.is_err());
    }
}
