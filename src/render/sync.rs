//! Position synchronization between the simulation and rendering.

use bevy::prelude::*;

use crate::render::bodies::BodyVisual;
use crate::render::z_layers;
use crate::simulation::Simulation;

/// Copy body positions, spin and visibility onto their entities.
///
/// Scene units map 1:1 to world units; the z offset only orders layers.
pub fn sync_body_transforms(
    simulation: Res<Simulation>,
    mut query: Query<(&BodyVisual, &mut Transform, &mut Visibility)>,
) {
    let bodies = simulation.bodies();
    for (visual, mut transform, mut visibility) in query.iter_mut() {
        let Some(body) = bodies.get(visual.index) else {
            continue;
        };

        let position = body.position();
        transform.translation = Vec3::new(position.x as f32, position.y as f32, z_layers::BODIES);
        transform.rotation = Quat::from_rotation_z(body.spin() as f32);

        let wanted = if body.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}
