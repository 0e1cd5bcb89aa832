pub mod error;
pub mod loader;
pub mod logger;
pub mod model;
pub mod output;
pub mod role_registry;
pub mod solver;
pub mod time_grid;

use error::Result;
use model::{InputDocumentDto, ScheduleInput};
use output::OutputDocument;

/// End-to-end entry point: validates a raw input document and hands it
/// to the solver (spec §5 - a solve is a pure function from input to
/// output). Construction errors surface as `Err` so the CLI boundary can
/// turn them into an ERROR document (spec §7).
pub fn run(dto: &InputDocumentDto) -> Result<OutputDocument> {
    log::info!("building schedule input for {}", dto.date);
    let input = ScheduleInput::from_dto(dto)?;

    log::info!("solving for {} crew, {} slots", input.crew.len(), input.store.grid.slot_count());
    let document = solver::solve(&input)?;

    log::info!("solve finished: status={:?}, {} assignments", document.metadata.status, document.metadata.num_assignments);
    Ok(document)
}
