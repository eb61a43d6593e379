//! Input-driven walking.

use engine_ecs::{QueryDescriptor, System, SystemContext, World};
use engine_math::{Transform3D, Vec2};
use game_components::{PlayerInput, Rigidbody};

/// Moves player-controlled bodies on the ground plane from their input flags
/// and applies their vertical velocity.
#[derive(Debug)]
pub struct MovementSystem {
    query: QueryDescriptor,
}

impl MovementSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new()
                .with::<Transform3D>()
                .with::<Rigidbody>()
                .with::<PlayerInput>(),
        }
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, ctx: &SystemContext) {
        for entity in world.query(&self.query) {
            let (Some(body), Some(input)) = (
                world.get_component::<Rigidbody>(entity).copied(),
                world.get_component::<PlayerInput>(entity).copied(),
            ) else {
                continue;
            };
            if body.is_kinematic {
                continue;
            }
            let Some(transform) = world.get_component_mut::<Transform3D>(entity) else {
                continue;
            };

            let (x, z) = input.move_axes();
            let direction = Vec2::new(x, z);
            if direction != Vec2::ZERO {
                let step = direction.normalize() * body.speed * ctx.dt;
                transform.position.x += step.x;
                transform.position.z += step.y;
                transform.rotation.y = x.atan2(z);
            }
            transform.position.y += body.velocity.y * ctx.dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec3;

    use super::*;

    fn walker(world: &mut World, input: PlayerInput) -> engine_ecs::Entity {
        world
            .spawn()
            .with(Transform3D::default())
            .with(Rigidbody::default().with_speed(4.0))
            .with(input)
            .id()
    }

    #[test]
    fn test_forward_moves_negative_z() {
        let mut world = World::new();
        let e = walker(
            &mut world,
            PlayerInput {
                forward: true,
                ..PlayerInput::default()
            },
        );
        MovementSystem::new().update(&mut world, &SystemContext::new(1, 0.5, 0.5));

        let t = world.get_component::<Transform3D>(e).unwrap();
        assert!((t.position.z + 2.0).abs() < 1e-5);
        assert_eq!(t.position.x, 0.0);
        assert!((t.rotation.y - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut world = World::new();
        let e = walker(
            &mut world,
            PlayerInput {
                backward: true,
                right: true,
                ..PlayerInput::default()
            },
        );
        MovementSystem::new().update(&mut world, &SystemContext::new(1, 1.0, 1.0));

        let p = world.get_component::<Transform3D>(e).unwrap().position;
        let planar = Vec2::new(p.x, p.z).length();
        assert!((planar - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_velocity_applies_without_input() {
        let mut world = World::new();
        let e = walker(&mut world, PlayerInput::default());
        world.get_component_mut::<Rigidbody>(e).unwrap().velocity = Vec3::new(0.0, 2.0, 0.0);
        MovementSystem::new().update(&mut world, &SystemContext::new(1, 0.5, 0.5));

        let t = world.get_component::<Transform3D>(e).unwrap();
        assert_eq!(t.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(t.rotation.y, 0.0);
    }

    #[test]
    fn test_kinematic_bodies_ignore_input() {
        let mut world = World::new();
        let e = world
            .spawn()
            .with(Transform3D::default())
            .with(Rigidbody::kinematic())
            .with(PlayerInput {
                left: true,
                ..PlayerInput::default()
            })
            .id();
        MovementSystem::new().update(&mut world, &SystemContext::new(1, 1.0, 1.0));
        assert_eq!(
            world.get_component::<Transform3D>(e).unwrap().position,
            Vec3::ZERO
        );
    }
}
