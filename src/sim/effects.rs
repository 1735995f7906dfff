//! Transient hit feedback (purely cosmetic)
//!
//! Effects carry an absolute expiry and are pruned on tick. Nothing here feeds
//! back into score or round state.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::PARTICLE_COLORS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Falling slice of candy
    SliceDebris { pattern: usize },
    /// Floating "+N"
    ScorePopup { points: u64 },
    Particle { velocity: Vec2, color: u32 },
    /// Blade flash, tilted a few degrees
    Slash { angle_deg: f32 },
    /// Large "N COMBO!" banner (at most one at a time)
    ComboBanner { combo: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effect {
    pub id: u32,
    pub pos: Vec2,
    pub kind: EffectKind,
    pub expires_at_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Effects {
    items: Vec<Effect>,
    #[serde(skip)]
    next_id: u32,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, pos: Vec2, kind: EffectKind, now_ms: f64, lifetime_ms: f64) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Effect {
            id,
            pos,
            kind,
            expires_at_ms: now_ms + lifetime_ms,
        });
        id
    }

    /// Scatter `count` particles from `pos`
    pub fn burst(
        &mut self,
        pos: Vec2,
        count: usize,
        now_ms: f64,
        lifetime_ms: f64,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            // Biased upward so the burst pops before falling
            let velocity = Vec2::new(
                (rng.random::<f32>() - 0.5) * 12.0,
                (rng.random::<f32>() - 0.5) * 12.0 - 4.0,
            );
            let color = PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())];
            self.spawn(
                pos,
                EffectKind::Particle { velocity, color },
                now_ms,
                lifetime_ms,
            );
        }
    }

    /// Show the combo banner, replacing any banner still on screen
    pub fn show_banner(&mut self, combo: u32, pos: Vec2, now_ms: f64, lifetime_ms: f64) {
        self.items
            .retain(|e| !matches!(e.kind, EffectKind::ComboBanner { .. }));
        self.spawn(pos, EffectKind::ComboBanner { combo }, now_ms, lifetime_ms);
    }

    /// Drop everything whose lifetime has elapsed
    pub fn prune(&mut self, now_ms: f64) {
        self.items.retain(|e| e.expires_at_ms > now_ms);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_each_effect_expires_independently() {
        let mut effects = Effects::new();
        effects.spawn(Vec2::ZERO, EffectKind::Slash { angle_deg: 0.0 }, 0.0, 200.0);
        effects.spawn(Vec2::ZERO, EffectKind::ScorePopup { points: 1 }, 0.0, 1_000.0);
        effects.spawn(Vec2::ZERO, EffectKind::SliceDebris { pattern: 0 }, 0.0, 2_000.0);

        effects.prune(199.0);
        assert_eq!(effects.len(), 3);
        effects.prune(200.0);
        assert_eq!(effects.len(), 2);
        effects.prune(1_500.0);
        assert_eq!(effects.len(), 1);
        effects.prune(2_000.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_burst_uses_palette() {
        let mut effects = Effects::new();
        let mut rng = Pcg32::seed_from_u64(9);
        effects.burst(Vec2::new(50.0, 60.0), 20, 0.0, 800.0, &mut rng);
        assert_eq!(effects.len(), 20);
        for effect in effects.iter() {
            let EffectKind::Particle { velocity, color } = effect.kind else {
                panic!("expected particle");
            };
            assert!(PARTICLE_COLORS.contains(&color));
            assert!(velocity.x.abs() <= 6.0);
            assert!(velocity.y <= 2.0 && velocity.y >= -10.0);
        }
    }

    #[test]
    fn test_single_combo_banner() {
        let mut effects = Effects::new();
        effects.show_banner(3, Vec2::ZERO, 0.0, 800.0);
        effects.show_banner(4, Vec2::ZERO, 100.0, 800.0);
        let banners: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::ComboBanner { .. }))
            .collect();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind, EffectKind::ComboBanner { combo: 4 });
        assert_eq!(banners[0].expires_at_ms, 900.0);
    }
}
