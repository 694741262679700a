//! Dispatcher - routes parsed commands through the confirmation handshake
//! to the right handler and maps every failure to a recoverable reply.
//!
//! One inbound message is handled to completion before the next; no error
//! escapes as a panic or poisons another chat's pending confirmation.

use tracing::error;

use crate::application::handlers::{
    AmendReportError, AmendReportHandler, ConfigureSiteHandler, DeleteRowsHandler,
    QuerySummaryHandler, SubmitReportError, SubmitReportHandler,
};
use crate::application::reply::{RejectReason, Reply};
use crate::domain::command::Command;
use crate::domain::confirm::{ConfirmOutcome, ConfirmationRegistry, PendingAction};
use crate::domain::foundation::ChatId;
use crate::domain::sites::SiteError;

/// One inbound chat message, already attributed.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat: ChatId,
    pub reporter: String,
    pub text: String,
}

/// Routes commands to handlers.
pub struct Dispatcher {
    confirmations: ConfirmationRegistry,
    submit: SubmitReportHandler,
    amend: AmendReportHandler,
    delete: DeleteRowsHandler,
    query: QuerySummaryHandler,
    configure: ConfigureSiteHandler,
}

impl Dispatcher {
    pub fn new(
        confirmations: ConfirmationRegistry,
        submit: SubmitReportHandler,
        amend: AmendReportHandler,
        delete: DeleteRowsHandler,
        query: QuerySummaryHandler,
        configure: ConfigureSiteHandler,
    ) -> Self {
        Self {
            confirmations,
            submit,
            amend,
            delete,
            query,
            configure,
        }
    }

    /// Handles one message to completion and produces the reply.
    ///
    /// While the chat has a pending confirmation, the raw text is a PIN
    /// attempt and the parsed command (if any) is not executed.
    pub async fn dispatch(&self, message: &InboundMessage, command: Option<Command>) -> Reply {
        if self.confirmations.has_pending(message.chat) {
            match self.confirmations.resolve(message.chat, &message.text) {
                Some(ConfirmOutcome::Confirmed(action)) => return self.execute(action).await,
                Some(ConfirmOutcome::Mismatch) => {
                    return Reply::ConfirmRejected(RejectReason::PinMismatch)
                }
                Some(ConfirmOutcome::Expired) => {
                    return Reply::ConfirmRejected(RejectReason::Expired)
                }
                // Resolved elsewhere between the check and now; fall
                // through to normal handling.
                None => {}
            }
        }

        let Some(command) = command else {
            return Reply::SyntaxError;
        };

        match command {
            Command::Start => Reply::Greeting,
            Command::Work(report) => {
                match self.submit.handle_work(&message.reporter, report).await {
                    Ok(ack) => Reply::Report(ack),
                    Err(err) => submit_error_reply(err),
                }
            }
            Command::Rest(report) => {
                match self.submit.handle_rest(&message.reporter, report).await {
                    Ok(ack) => Reply::Rest(ack),
                    Err(err) => submit_error_reply(err),
                }
            }
            Command::Amend(report) => {
                match self.amend.handle(&message.reporter, report).await {
                    Ok(ack) => Reply::Report(ack),
                    Err(err) => amend_error_reply(err),
                }
            }
            Command::Query(kind) => match self.query.handle(kind).await {
                Ok(reply) => reply,
                Err(err) => {
                    error!(%err, "summary query failed");
                    Reply::Failure
                }
            },
            Command::ConfigureSite { site, capacity } => {
                match self.configure.handle(site.clone(), capacity).await {
                    Ok(change) => Reply::SiteConfigured {
                        site,
                        capacity,
                        change,
                    },
                    Err(SiteError::UnknownSite(site)) => Reply::UnknownSite { site },
                    Err(_) => Reply::SyntaxError,
                }
            }
            Command::DeleteLast => self.park(message.chat, PendingAction::DeleteLast),
            Command::DeleteAll => self.park(message.chat, PendingAction::DeleteAll),
        }
    }

    fn park(&self, chat: ChatId, action: PendingAction) -> Reply {
        self.confirmations.request(chat, action);
        Reply::ConfirmRequired {
            action,
            ttl_secs: self.confirmations.ttl_secs(),
        }
    }

    async fn execute(&self, action: PendingAction) -> Reply {
        match action {
            PendingAction::DeleteLast => match self.delete.delete_last().await {
                Ok(Some(position)) => Reply::DeletedLast { position },
                Ok(None) => Reply::NothingToDelete,
                Err(err) => {
                    error!(%err, "delete-last failed");
                    Reply::Failure
                }
            },
            PendingAction::DeleteAll => match self.delete.delete_all().await {
                Ok(()) => Reply::ClearedAll,
                Err(err) => {
                    error!(%err, "delete-all failed");
                    Reply::Failure
                }
            },
        }
    }
}

fn submit_error_reply(err: SubmitReportError) -> Reply {
    match err {
        SubmitReportError::UnknownSite(site) => Reply::UnknownSite { site },
        SubmitReportError::BadDayOverride(_) => Reply::SyntaxError,
        other => {
            error!(%other, "report submission failed");
            Reply::Failure
        }
    }
}

fn amend_error_reply(err: AmendReportError) -> Reply {
    match err {
        AmendReportError::UnknownSite(site) => Reply::UnknownSite { site },
        AmendReportError::NoMatchingReport { site, .. } => Reply::NoMatchingReport { site },
        AmendReportError::BadDayOverride(_) => Reply::SyntaxError,
        other => {
            error!(%other, "report amendment failed");
            Reply::Failure
        }
    }
}
