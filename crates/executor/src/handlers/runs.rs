//! Read handlers: one run, run listings, and the kind enumeration.

use runledger_core::IngestKind;
use runledger_engine::RunStore;

use crate::convert::convert_result;
use crate::types::{RunResponse, RunsResponse};
use crate::{Error, Output, Result};

/// Handle GetRun command.
pub fn get_run(store: &RunStore, run_id: String) -> Result<Output> {
    match convert_result(store.fetch_run(&run_id))? {
        Some(data) => Ok(Output::Run(RunResponse { run_id, data })),
        None => Err(Error::RunNotFound { run_id }),
    }
}

/// Handle ListRuns command.
///
/// The windowed query runs only when both bounds are non-empty; otherwise
/// every run is returned and the bounds are not echoed.
pub fn list_runs(
    store: &RunStore,
    since: Option<String>,
    until: Option<String>,
) -> Result<Output> {
    let since = since.filter(|s| !s.is_empty());
    let until = until.filter(|u| !u.is_empty());
    let response = match (since, until) {
        (Some(since), Some(until)) => {
            let runs = convert_result(store.fetch_runs_in_window(&since, &until))?;
            RunsResponse {
                since: Some(since),
                until: Some(until),
                runs,
            }
        }
        _ => RunsResponse {
            since: None,
            until: None,
            runs: convert_result(store.fetch_all_runs())?,
        },
    };
    Ok(Output::Runs(response))
}

/// Handle Kinds command.
pub fn kinds() -> Result<Output> {
    Ok(Output::Kinds(IngestKind::ALL.to_vec()))
}
