//! Approval delegation for `confirm`-policy tools
//!
//! Message-passing hand-off to the external approval collaborator:
//! - The engine posts a request over an unbounded channel and returns
//!   immediately (never blocks on the host).
//! - The host resolves each request through its own UI or transport.
//! - A one-shot channel carries the outcome back to the suspended tool call.
//!
//! A request whose responder is dropped (host gone, session torn down)
//! resolves to [`ApprovalOutcome::Cancelled`]; only an explicit approval
//! permits execution.

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Resolution of an approval request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The tool call may execute exactly once
    Approved,
    /// The tool call must not execute
    Denied,
    /// The request was discarded before being resolved
    Cancelled,
}

impl ApprovalOutcome {
    /// Check whether the suspended tool call may proceed
    pub fn allows_execution(self) -> bool {
        matches!(self, ApprovalOutcome::Approved)
    }
}

/// An approval request as seen by the host collaborator
#[derive(Debug)]
pub struct ApprovalRequest {
    /// Unique request id
    pub id: Uuid,
    /// Tool awaiting approval
    pub tool: String,
    /// Mode that required confirmation
    pub mode: String,
    responder: oneshot::Sender<ApprovalOutcome>,
}

impl ApprovalRequest {
    /// Resolve this request; dropping it unresolved counts as cancellation
    pub fn resolve(self, outcome: ApprovalOutcome) {
        // Receiver may be gone if the session ended while pending
        drop(self.responder.send(outcome));
    }
}

/// Handle held by the suspended tool call
#[derive(Debug)]
pub struct PendingApproval {
    /// Id of the request this handle is waiting on
    pub id: Uuid,
    receiver: oneshot::Receiver<ApprovalOutcome>,
}

impl PendingApproval {
    /// Wait for the collaborator's decision
    ///
    /// Resolves to `Cancelled` when the request was discarded without an
    /// answer.
    pub async fn wait(self) -> ApprovalOutcome {
        self.receiver.await.unwrap_or(ApprovalOutcome::Cancelled)
    }
}

/// Bridges `RequiresApproval` decisions to the external collaborator
#[derive(Debug, Clone)]
pub struct ApprovalBridge {
    outbound: mpsc::UnboundedSender<ApprovalRequest>,
}

impl ApprovalBridge {
    /// Create a bridge plus the host-side stream of requests
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ApprovalRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { outbound: tx }, rx)
    }

    /// Post an approval request (non-blocking)
    ///
    /// The returned handle resolves when the collaborator answers. If the
    /// host side is no longer listening the handle resolves to `Cancelled`.
    pub fn request_approval(
        &self,
        tool: impl Into<String>,
        mode: impl Into<String>,
    ) -> PendingApproval {
        let (response_tx, response_rx) = oneshot::channel();
        let request = ApprovalRequest {
            id: Uuid::new_v4(),
            tool: tool.into(),
            mode: mode.into(),
            responder: response_tx,
        };
        let id = request.id;

        tracing::info!(
            request_id = %id,
            tool = %request.tool,
            mode = %request.mode,
            "Requesting tool approval"
        );
        // Unbounded channel: send only fails when the host dropped the
        // receiver, which the dropped responder already signals as Cancelled
        drop(self.outbound.send(request));

        PendingApproval {
            id,
            receiver: response_rx,
        }
    }
}
