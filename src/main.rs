use std::process::ExitCode;

use crew_shift_scheduler::error::Error;
use crew_shift_scheduler::loader::parser::parse_json_stdin;
use crew_shift_scheduler::model::InputDocumentDto;
use crew_shift_scheduler::output::{OutputDocument, SolveStatus};
use crew_shift_scheduler::{logger, run};

/// Thin CLI shim (spec §6): read one JSON document from stdin, solve,
/// write one JSON document to stdout. Logging goes to stderr and the
/// log file only — stdout is reserved for the output document.
fn main() -> ExitCode {
    logger::init();
    log::info!("logger initialized, reading input document from stdin");

    let document = match parse_json_stdin::<InputDocumentDto>().and_then(|dto| run(&dto)) {
        Ok(document) => document,
        Err(err) => {
            log::error!("solve failed: {}", err);
            OutputDocument::error(err.to_string())
        }
    };

    let exit_code = if document.metadata.status == SolveStatus::Error { ExitCode::FAILURE } else { ExitCode::SUCCESS };

    match serde_json::to_string_pretty(&document).map_err(Error::SerializationError) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("failed to serialize output document: {}", err);
            return ExitCode::FAILURE;
        }
    }

    exit_code
}
