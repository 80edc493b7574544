use bevy_ecs::system::{Query, Res};

use crate::{entity::body::Body, systems::components::DeltaTime};

/// Integrates every body's velocity over the frame time.
///
/// This is the host half of movement: the decision systems only ever set velocities and snap
/// positions, and this system is the only place positions advance continuously.
pub fn movement_system(delta_time: Res<DeltaTime>, mut bodies: Query<&mut Body>) {
    for mut body in bodies.iter_mut() {
        body.integrate(delta_time.0);
    }
}
