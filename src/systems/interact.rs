use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    system::{Commands, Query, ResMut},
};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::{
    constants::fragment,
    error::GameError,
    events::InteractionEvent,
    scene,
    systems::{
        BossHealth, Dialogue, DialogueBox, FragmentCount, GameStage, Interactable, InteractionFlags, LeaderboardResource,
        RunResult, RunSummary, RunTimer,
    },
};

/// Dispatches clicks on interactable entities by their flags.
///
/// Flags are checked in order: dialogue, then fragment collection, then boss damage.
/// Once the boss falls, any remaining clicks in the same frame are dropped.
#[allow(clippy::too_many_arguments)]
pub fn interaction_system(
    mut events: EventReader<InteractionEvent>,
    mut commands: Commands,
    mut targets: Query<(&Interactable, Option<&Dialogue>, Option<&mut BossHealth>)>,
    mut fragments: ResMut<FragmentCount>,
    mut dialogue: ResMut<DialogueBox>,
    mut stage: ResMut<GameStage>,
    mut timer: ResMut<RunTimer>,
    mut leaderboard: ResMut<LeaderboardResource>,
    mut summary: ResMut<RunSummary>,
    mut errors: EventWriter<GameError>,
) {
    // Despawns are deferred, so consumed fragments must be tracked for the rest of the frame
    let mut consumed: SmallVec<[Entity; 4]> = SmallVec::new();

    for event in events.read() {
        let GameStage::Playing { mode } = *stage else {
            trace!(entity = ?event.entity, "Ignoring interaction outside of a run");
            continue;
        };

        if consumed.contains(&event.entity) {
            continue;
        }

        let Ok((interactable, line, health)) = targets.get_mut(event.entity) else {
            debug!(entity = ?event.entity, "Interaction target no longer exists");
            continue;
        };
        let flags = interactable.0;

        if flags.contains(InteractionFlags::DIALOGUE) {
            if let Some(Dialogue(text)) = line {
                dialogue.show(text.clone());
            }
        }

        if flags.contains(InteractionFlags::FRAGMENT) {
            commands.entity(event.entity).despawn();
            consumed.push(event.entity);
            fragments.0 += 1;
            info!(collected = fragments.0, required = fragment::REQUIRED, "Fragment collected");

            if fragments.0 == fragment::REQUIRED {
                scene::spawn_boss(&mut commands, &mut dialogue);
            }
        }

        if flags.contains(InteractionFlags::BOSS) {
            let Some(mut health) = health else {
                errors.write(GameError::InvalidState(format!(
                    "Boss entity {:?} has no health component",
                    event.entity
                )));
                continue;
            };

            health.0 = health.0.saturating_sub(1);
            debug!(remaining = health.0, "Boss hit");
            if health.0 > 0 {
                continue;
            }

            timer.stop();
            let millis = timer.millis();
            let rank = if mode.is_timed() {
                let (rank, saved) = leaderboard.submit(millis);
                if let Err(e) = saved {
                    errors.write(e.into());
                }
                rank
            } else {
                None
            };

            info!(%mode, millis, rank = ?rank.map(|r| r + 1), "Boss defeated, run complete");
            summary.0 = Some(RunResult { mode, millis, rank });
            *stage = GameStage::Ended { mode };
        }
    }
}
