use bevy_ecs::system::{Query, Res};

use crate::systems::{BossDrift, DeltaTime, Transform};

/// Moves drifting entities toward +Z, where the player starts.
pub fn boss_drift_system(delta_time: Res<DeltaTime>, mut bosses: Query<(&BossDrift, &mut Transform)>) {
    for (drift, mut transform) in bosses.iter_mut() {
        transform.translation.z += drift.speed * delta_time.seconds;
    }
}
