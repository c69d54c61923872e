//! Checkpoint-driven branch selection.

use crate::inputs::Switches;
use crate::particle::{MAX_CHECKPOINTS, Particle};
use crate::topology::{Checkpoint, SwitchId, TrackId};

/// A branch decision taken for one particle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Routing {
    /// Index of the checkpoint that fired.
    pub checkpoint: usize,
    /// Switch that was read.
    pub switch: SwitchId,
    /// What the switch read.
    pub switch_on: bool,
    /// Track before the decision.
    pub from: TrackId,
    /// Track after the decision.
    pub to: TrackId,
}

/// Apply the first matching checkpoint to `particle`, if any.
///
/// A checkpoint matches when the head offset equals its offset, the
/// particle's track is in its set, and it has not yet fired for this
/// particle. A slow particle sits on the same offset for several ticks, and
/// the fired set keeps the switch from being read again during that time.
/// Declaration order breaks ties. Runs before the particle advances.
pub fn resolve<S>(
    particle: &mut Particle,
    checkpoints: &[Checkpoint],
    switches: &mut S,
) -> Option<Routing>
where
    S: Switches + ?Sized,
{
    let head = particle.head();
    let (checkpoint_index, checkpoint) = checkpoints
        .iter()
        .take(MAX_CHECKPOINTS)
        .enumerate()
        .find(|(checkpoint_index, checkpoint)| {
            !particle.has_fired(*checkpoint_index) && checkpoint.applies(particle.track(), head)
        })?;

    let switch_on = switches.is_on(checkpoint.switch);
    let from = particle.track();
    let to = checkpoint.route(switch_on);
    particle.reroute(checkpoint_index, to);

    Some(Routing {
        checkpoint: checkpoint_index,
        switch: checkpoint.switch,
        switch_on,
        from,
        to,
    })
}
