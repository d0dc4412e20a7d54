use core::time::Duration;
use std::sync::Arc;

use anyhow::{bail, ensure, Context as _, Result};
use async_channel::Receiver;
use futures::{select_biased, FutureExt as _};
use log::{debug, error};
use orchestrator::{ConfirmationRequest, ConfirmationResult, ConfirmationStatus, Orchestrator};
use parking_lot::RwLock;
use types::phase0::containers::SignedBeaconBlock;

use crate::error::ConfirmationError;

/// Delay between confirmation status fetches from the orchestrator.
pub const CONFIRMATION_STATUS_FETCHING_INTERVAL: Duration = Duration::from_millis(500);

/// Maximum number of `Pending` statuses tolerated for one block.
pub const MAX_PENDING_BLOCK_TRY_LIMIT: usize = 40;

/// Drives a block from pending to a terminal confirmation outcome and gates
/// the node's own block proposals while a confirmation is in flight.
pub struct ConfirmationService<O> {
    orchestrator: Option<Arc<O>>,
    can_propose: RwLock<bool>,
    orc_verification: RwLock<bool>,
    shutdown_rx: Receiver<()>,
}

impl<O: Orchestrator> ConfirmationService<O> {
    #[must_use]
    pub fn new(orchestrator: Option<Arc<O>>, shutdown_rx: Receiver<()>) -> Self {
        Self {
            orchestrator,
            can_propose: RwLock::new(true),
            orc_verification: RwLock::new(true),
            shutdown_rx,
        }
    }

    /// Whether the node's own validator may propose on top of the current
    /// head. False exactly for the duration of a confirmation wait.
    #[must_use]
    pub fn can_propose(&self) -> bool {
        *self.can_propose.read()
    }

    /// Whether orchestrator-gated proposing is enabled at all. An operator
    /// switch, independent of the per-block wait.
    #[must_use]
    pub fn orc_verification(&self) -> bool {
        *self.orc_verification.read()
    }

    pub fn activate_orc_verification(&self) {
        *self.orc_verification.write() = true;
    }

    pub fn deactivate_orc_verification(&self) {
        *self.orc_verification.write() = false;
    }

    /// Polls the orchestrator until it reaches a verdict on `block`.
    ///
    /// Returns `Ok(())` on `Verified`. Fails with a [`ConfirmationError`]
    /// describing the terminal state otherwise:
    /// - `Invalid` verdicts and exhausted retry budgets mean the block must
    ///   be discarded and re-downloaded.
    /// - [`ConfirmationError::Interrupted`] means shutdown preempted the
    ///   wait. It is not a verdict on the block; the caller should rerun the
    ///   wait when possible.
    /// - Transport and protocol errors (missing client, RPC failure, empty
    ///   response, slot mismatch, unknown status) fail immediately without
    ///   consuming the retry budget.
    pub async fn wait_for_confirmation(&self, block: &SignedBeaconBlock) -> Result<()> {
        // Suspend the node's own proposals until this wait concludes,
        // whatever the outcome.
        let _proposal_gate = ProposalGate::engage(&self.can_propose);

        debug!(
            "waiting for confirmation from orchestrator (slot: {})",
            block.slot(),
        );

        let mut try_limit = MAX_PENDING_BLOCK_TRY_LIMIT;
        let mut interval = tokio::time::interval(CONFIRMATION_STATUS_FETCHING_INTERVAL);

        loop {
            select_biased! {
                _ = self.shutdown_rx.recv().fuse() => {
                    debug!("shutting down, exiting confirmation wait");
                    bail!(ConfirmationError::Interrupted);
                }
                _ = interval.tick().fuse() => {
                    let result = self.fetch_confirmation(block).await?;

                    ensure!(
                        result.slot == block.slot(),
                        ConfirmationError::SlotMismatch {
                            requested: block.slot(),
                            received: result.slot,
                        },
                    );

                    match result.status {
                        ConfirmationStatus::Verified => {
                            debug!(
                                "got verified status from orchestrator \
                                 (slot: {}, block root: {:?})",
                                result.slot, result.block_root,
                            );
                            return Ok(());
                        }
                        ConfirmationStatus::Pending => {
                            debug!(
                                "got pending status from orchestrator \
                                 (slot: {}, block root: {:?})",
                                result.slot, result.block_root,
                            );

                            try_limit -= 1;

                            if try_limit == 0 {
                                error!(
                                    "orchestrator kept reporting pending status, \
                                     discarding the block (slot: {})",
                                    result.slot,
                                );
                                bail!(ConfirmationError::TryLimitExceeded);
                            }
                        }
                        ConfirmationStatus::Invalid => {
                            debug!(
                                "got invalid status from orchestrator \
                                 (slot: {}, block root: {:?})",
                                result.slot, result.block_root,
                            );
                            bail!(ConfirmationError::InvalidBlock);
                        }
                        ConfirmationStatus::Unknown => {
                            error!(
                                "got unknown status from orchestrator, \
                                 discarding the block (slot: {})",
                                result.slot,
                            );
                            bail!(ConfirmationError::UnknownStatus);
                        }
                    }
                }
            }
        }
    }

    async fn fetch_confirmation(&self, block: &SignedBeaconBlock) -> Result<ConfirmationResult> {
        let orchestrator = self
            .orchestrator
            .as_ref()
            .ok_or(ConfirmationError::MissingClient)?;

        // Exactly one block needs confirmation at a time.
        let request = ConfirmationRequest {
            slot: block.slot(),
            block_root: block.hash_tree_root(),
        };

        let results = orchestrator
            .confirm_block_hashes(vec![request])
            .await
            .context("could not fetch confirmation from orchestrator")?;

        let result = results
            .first()
            .copied()
            .ok_or(ConfirmationError::EmptyResponse)?;

        Ok(result)
    }
}

/// Clears the can-propose flag for as long as it is alive. Restoring via
/// `Drop` covers every exit path of the confirmation wait, including errors.
struct ProposalGate<'flag> {
    can_propose: &'flag RwLock<bool>,
}

impl<'flag> ProposalGate<'flag> {
    fn engage(can_propose: &'flag RwLock<bool>) -> Self {
        *can_propose.write() = false;
        Self { can_propose }
    }
}

impl Drop for ProposalGate<'_> {
    fn drop(&mut self) {
        *self.can_propose.write() = true;
    }
}
