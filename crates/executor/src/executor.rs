//! Command dispatch.

use runledger_engine::RunStore;
use runledger_security::AccessPolicy;

use crate::handlers::{ingest, runs};
use crate::{Command, Error, Output, Result};

/// Dispatches commands to their handlers.
///
/// Holds the injected run store and the access policy. Cloning is cheap and
/// every clone shares the same store.
#[derive(Debug, Clone)]
pub struct Executor {
    store: RunStore,
    policy: AccessPolicy,
}

impl Executor {
    /// Create an executor over `store` governed by `policy`.
    pub fn new(store: RunStore, policy: AccessPolicy) -> Self {
        Self { store, policy }
    }

    /// The run store commands are executed against
    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// The access policy in force
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Execute a command from a trusted in-process caller.
    ///
    /// Skips the bearer-token check but still enforces the access mode: an
    /// ingest against a read-only ledger fails with `AccessDenied` before the
    /// payload is touched.
    pub fn execute(&self, command: Command) -> Result<Output> {
        if command.is_write() && !self.policy.allows_writes() {
            tracing::warn!(
                target: "runledger::executor",
                command = command.name(),
                "Write rejected by read-only access mode"
            );
            return Err(Error::AccessDenied {
                reason: format!("{} is not allowed on a read-only ledger", command.name()),
            });
        }

        let name = command.name();
        let result = match command {
            Command::Ingest { request } => ingest::ingest(&self.store, request),
            Command::GetRun { run_id } => runs::get_run(&self.store, run_id),
            Command::ListRuns { since, until } => runs::list_runs(&self.store, since, until),
            Command::Kinds => runs::kinds(),
        };

        if let Err(ref e) = result {
            if e.is_client_error() {
                tracing::debug!(
                    target: "runledger::executor",
                    command = name,
                    code = e.code(),
                    error = %e,
                    "Command rejected"
                );
            } else {
                tracing::warn!(
                    target: "runledger::executor",
                    command = name,
                    code = e.code(),
                    error = %e,
                    "Command failed"
                );
            }
        }
        result
    }

    /// Execute a command on behalf of a transport, checking the caller's
    /// `Authorization` header value first.
    ///
    /// Fails with `Config` when the policy has no bearer token, so an
    /// unconfigured deployment serves nobody.
    pub fn execute_authorized(
        &self,
        authorization: Option<&str>,
        command: Command,
    ) -> Result<Output> {
        self.policy.authorize(authorization)?;
        self.execute(command)
    }
}
