//! Undo / redo dispatch.

use super::DispatchResult;
use crate::Session;

pub(crate) fn handle_undo(session: &mut Session) -> DispatchResult {
    match session.undo() {
        Ok(true) => {
            tracing::trace!(target: "actions.dispatch", op = "undo", "undo");
            DispatchResult::dirty()
        }
        Ok(false) => DispatchResult::clean().with_message("Nothing to undo"),
        Err(e) => DispatchResult::error(e),
    }
}

pub(crate) fn handle_redo(session: &mut Session) -> DispatchResult {
    match session.redo() {
        Ok(true) => {
            tracing::trace!(target: "actions.dispatch", op = "redo", "redo");
            DispatchResult::dirty()
        }
        Ok(false) => DispatchResult::clean().with_message("Nothing to redo"),
        Err(e) => DispatchResult::error(e),
    }
}
