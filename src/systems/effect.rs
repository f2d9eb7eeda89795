//! Timed heal/damage-over-time effects.

use std::collections::HashMap;
use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use smallvec::SmallVec;
use strum_macros::IntoStaticStr;
use tracing::{debug, trace};

use crate::clock::GameClock;
use crate::error::GameResult;
use crate::events::ParticleEvent;
use crate::systems::components::Health;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum EffectKind {
    Regen,
    Burn,
}

/// A periodic change to an entity's health, active for a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    /// Healed per application.
    pub heal: f32,
    /// Dealt per application.
    pub damage: f32,
    pub interval_ms: u64,
    pub duration_ms: u64,
    pub created: u64,
    pub last_applied: u64,
}

impl Effect {
    pub fn builder(kind: EffectKind) -> EffectBuilder {
        EffectBuilder {
            kind,
            heal: 0.0,
            damage: 0.0,
            duration_ms: 0,
            interval_ms: 0,
        }
    }

    /// Whether the effect is still running at `now`.
    pub fn is_on(&self, now: u64) -> bool {
        now.saturating_sub(self.created) < self.duration_ms
    }

    /// Whether a full interval has passed since the last application.
    pub fn is_due(&self, now: u64) -> bool {
        now.saturating_sub(self.last_applied) >= self.interval_ms
    }

    pub fn apply(&mut self, health: &mut Health, now: u64) {
        health.heal(self.heal);
        health.damage(self.damage);
        self.last_applied = now;
    }
}

pub struct EffectBuilder {
    kind: EffectKind,
    heal: f32,
    damage: f32,
    duration_ms: u64,
    interval_ms: u64,
}

impl EffectBuilder {
    pub fn heal(mut self, amount: f32) -> Self {
        self.heal = amount;
        self
    }

    pub fn damage(mut self, amount: f32) -> Self {
        self.damage = amount;
        self
    }

    /// Total running time, and the time between applications.
    pub fn duration(mut self, duration: Duration, interval: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Finishes the effect, starting its timers at `now`.
    ///
    /// The first application happens one interval after creation.
    pub fn build(self, now: u64) -> Effect {
        Effect {
            kind: self.kind,
            heal: self.heal,
            damage: self.damage,
            interval_ms: self.interval_ms,
            duration_ms: self.duration_ms,
            created: now,
            last_applied: now,
        }
    }
}

/// Active effects, at most one per entity.
#[derive(Resource, Debug, Default)]
pub struct Effects {
    active: HashMap<Entity, Effect>,
}

impl Effects {
    /// Starts `effect` on `entity`, replacing (and returning) whatever was running there.
    pub fn add(&mut self, entity: Entity, effect: Effect) -> Option<Effect> {
        debug!(entity = ?entity, kind = <&'static str>::from(effect.kind), duration_ms = effect.duration_ms, "Effect added");
        self.active.insert(entity, effect)
    }

    pub fn get(&self, entity: Entity) -> Option<&Effect> {
        self.active.get(&entity)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<Effect> {
        self.active.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Drops expired effects, then ticks every effect whose interval has elapsed.
pub fn effect_system(
    clock: Res<GameClock>,
    mut effects: ResMut<Effects>,
    mut healths: Query<&mut Health>,
    mut particles: EventWriter<ParticleEvent>,
) -> GameResult<()> {
    let now = clock.ticks();

    effects.active.retain(|entity, effect| {
        let on = effect.is_on(now);
        if !on {
            debug!(entity = ?entity, kind = <&'static str>::from(effect.kind), "Effect expired");
        }
        on
    });

    let mut orphaned: SmallVec<[Entity; 4]> = SmallVec::new();
    for (entity, effect) in effects.active.iter_mut() {
        let Ok(mut health) = healths.get_mut(*entity) else {
            orphaned.push(*entity);
            continue;
        };

        if effect.is_due(now) {
            effect.apply(&mut health, now);
            trace!(entity = ?entity, hp = health.hp(), "Effect applied");
            particles.write(ParticleEvent::Effect {
                entity: *entity,
                healed: effect.heal > effect.damage,
            });
        }
    }

    for entity in orphaned {
        effects.active.remove(&entity);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regen(now: u64) -> Effect {
        Effect::builder(EffectKind::Regen)
            .heal(10.0)
            .duration(Duration::from_secs(8), Duration::from_secs(2))
            .build(now)
    }

    #[test]
    fn test_builder() {
        let effect = regen(100);
        assert_eq!(effect.heal, 10.0);
        assert_eq!(effect.damage, 0.0);
        assert_eq!(effect.duration_ms, 8000);
        assert_eq!(effect.interval_ms, 2000);
        assert_eq!(effect.created, 100);
    }

    #[test]
    fn test_is_on_until_duration() {
        let effect = regen(100);
        assert!(effect.is_on(100));
        assert!(effect.is_on(8099));
        assert!(!effect.is_on(8100));
    }

    #[test]
    fn test_interval() {
        let mut effect = regen(0);
        let mut health = Health::new(50.0, 100.0);
        assert!(!effect.is_due(1999));
        assert!(effect.is_due(2000));

        effect.apply(&mut health, 2000);
        assert_eq!(health.hp(), 60.0);
        assert!(!effect.is_due(3000));
    }

    #[test]
    fn test_one_effect_per_entity() {
        let mut world = bevy_ecs::world::World::new();
        let entity = world.spawn_empty().id();
        let mut effects = Effects::default();

        assert!(effects.add(entity, regen(0)).is_none());
        assert!(effects.add(entity, regen(50)).is_some());
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.get(entity).unwrap().created, 50);
    }
}
