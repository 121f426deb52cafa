use serde::Serialize;
use tracing::debug;

use super::{ComponentConfig, ComponentId, SelectionEngine};
use crate::intelligence::context::DataContext;
use crate::intelligence::domain::Surface;

/// Result of re-running selection at a richer surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Escalation {
    pub surface: Surface,
    /// Component the compact config advertised via `expands_to`, if any.
    pub advertised: Option<ComponentId>,
    pub config: ComponentConfig,
}

/// Expand a turn rendered at `from` to the next richer surface.
///
/// Escalation is a second full selection pass with the same context, so the
/// expanded view may pick a different component than the advertised one.
/// Returns `None` when `from` has no richer surface or nothing matches there.
pub fn escalate(
    engine: &SelectionEngine<'_>,
    context: &DataContext,
    from: Surface,
) -> Option<Escalation> {
    let surface = from.richer()?;
    let advertised = engine
        .select(context, from)
        .and_then(|config| config.expands_to);
    let config = engine.select(context, surface)?;

    if advertised.is_some_and(|component| component != config.component) {
        debug!(
            advertised = ?advertised,
            selected = config.component.name(),
            surface = surface.label(),
            "escalation selected a different component than advertised"
        );
    }

    Some(Escalation {
        surface,
        advertised,
        config,
    })
}
