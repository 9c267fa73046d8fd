//! Milestones of a single initialization sequence.

use crate::errors::{ModbootError, ModbootResult};
use std::fmt;

/// A point reached while activating a module.
///
/// Milestones are strictly ordered: `Requested < Ready < Started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Milestone {
    /// The loader has been asked to instantiate the module.
    Requested,
    /// The module is linked and its exports are callable.
    Ready,
    /// The module's entry point has been invoked.
    Started,
}

impl Milestone {
    fn successor_of(current: Option<Milestone>) -> Option<Milestone> {
        match current {
            None => Some(Milestone::Requested),
            Some(Milestone::Requested) => Some(Milestone::Ready),
            Some(Milestone::Ready) => Some(Milestone::Started),
            Some(Milestone::Started) => None,
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Milestone::Requested => "requested",
            Milestone::Ready => "ready",
            Milestone::Started => "started",
        };
        f.write_str(name)
    }
}

/// Linear record of the milestones reached so far.
///
/// Each milestone can be reached once, and only directly after its
/// predecessor. There is no way back.
#[derive(Debug, Default)]
pub struct InitSequence {
    current: Option<Milestone>,
}

impl InitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last milestone reached, if any.
    pub fn current(&self) -> Option<Milestone> {
        self.current
    }

    /// Move to `next`, which must be the direct successor of the current milestone.
    pub fn advance(&mut self, next: Milestone) -> ModbootResult<()> {
        if Milestone::successor_of(self.current) != Some(next) {
            return Err(ModbootError::Internal(format!(
                "cannot move to '{}' from {}",
                next,
                self.current
                    .map_or_else(|| "the initial state".to_string(), |m| format!("'{m}'"))
            )));
        }

        tracing::trace!(milestone = %next, "Initialization milestone reached");
        self.current = Some(next);
        Ok(())
    }
}
