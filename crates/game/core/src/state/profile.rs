//! Persistent data snapshots a combatant is built from.
//!
//! Profiles are read once at fight start. Nothing in a fight writes back to
//! them; deltas are reported through the end-of-fight hooks instead.

use crate::action::ActionId;
use crate::stats::{CoreStats, ResourceMeter};

use super::{Combatant, FighterId};

/// Base values of a player class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProfile {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Fight points before the level bonus.
    pub fight_points: u32,
    /// Breath at fight start.
    pub breath: u32,
    pub max_breath: u32,
    pub breath_regen: u32,
    pub actions: Vec<ActionId>,
}

/// Flat stat bonus granted by an equipped item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemBonus {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Snapshot of a player at fight start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub id: FighterId,
    pub name: String,
    pub class: ClassProfile,
    pub level: u32,
    pub items: Vec<ItemBonus>,
    /// Rage banked before the fight.
    pub rage: u32,
}

impl PlayerProfile {
    /// Fight points granted per level on top of the class base.
    pub const FIGHT_POINTS_PER_LEVEL: u32 = 10;

    pub fn new(id: u64, name: impl Into<String>, class: ClassProfile, level: u32) -> Self {
        Self {
            id: FighterId(id),
            name: name.into(),
            class,
            level,
            items: Vec::new(),
            rage: 0,
        }
    }

    pub fn with_items(mut self, items: Vec<ItemBonus>) -> Self {
        self.items = items;
        self
    }

    pub fn with_rage(mut self, rage: u32) -> Self {
        self.rage = rage;
        self
    }

    /// Class base plus every item bonus.
    pub fn base_stats(&self) -> CoreStats {
        self.items.iter().fold(
            CoreStats::new(self.class.attack, self.class.defense, self.class.speed),
            |stats, item| {
                CoreStats::new(
                    stats.attack.saturating_add(item.attack),
                    stats.defense.saturating_add(item.defense),
                    stats.speed.saturating_add(item.speed),
                )
            },
        )
    }

    pub fn max_fight_points(&self) -> u32 {
        self.class
            .fight_points
            .saturating_add(Self::FIGHT_POINTS_PER_LEVEL.saturating_mul(self.level))
    }

    pub fn to_combatant(&self) -> Combatant {
        Combatant::new(
            self.id,
            self.name.clone(),
            self.level,
            self.base_stats(),
            ResourceMeter::full(self.max_fight_points()),
            ResourceMeter::new(self.class.breath, self.class.max_breath),
            self.class.breath_regen,
        )
        .with_actions(self.class.actions.clone())
        .with_rage(self.rage)
    }

    pub fn into_combatant(self) -> Combatant {
        self.to_combatant()
    }
}

/// One attack of a monster template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterAttack {
    pub action: ActionId,
    /// Minimum monster level required to use this attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_level: u32,
    /// Selection weight; the action's AI weight is used when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: Option<u32>,
}

impl MonsterAttack {
    pub fn new(action: impl Into<ActionId>) -> Self {
        Self {
            action: action.into(),
            min_level: 0,
            weight: None,
        }
    }

    pub fn with_min_level(mut self, min_level: u32) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Monster template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterProfile {
    pub key: String,
    pub name: String,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub fight_points: u32,
    pub breath: u32,
    pub max_breath: u32,
    pub breath_regen: u32,
    pub attacks: Vec<MonsterAttack>,
}

impl MonsterProfile {
    /// Attacks whose level requirement the monster meets.
    pub fn eligible_attacks(&self) -> impl Iterator<Item = &MonsterAttack> {
        self.attacks.iter().filter(|a| a.min_level <= self.level)
    }

    pub fn to_combatant(&self, id: impl Into<FighterId>) -> Combatant {
        Combatant::new(
            id,
            self.name.clone(),
            self.level,
            CoreStats::new(self.attack, self.defense, self.speed),
            ResourceMeter::full(self.fight_points),
            ResourceMeter::new(self.breath, self.max_breath),
            self.breath_regen,
        )
        .with_actions(self.eligible_attacks().map(|a| a.action.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassProfile {
        ClassProfile {
            name: "ranger".into(),
            attack: 90,
            defense: 70,
            speed: 60,
            fight_points: 300,
            breath: 5,
            max_breath: 10,
            breath_regen: 3,
            actions: vec![ActionId::new("simpleAttack")],
        }
    }

    #[test]
    fn player_stats_include_items_and_level() {
        let player = PlayerProfile::new(1, "ayla", class(), 12).with_items(vec![
            ItemBonus {
                attack: 10,
                ..ItemBonus::default()
            },
            ItemBonus {
                defense: 5,
                speed: 2,
                ..ItemBonus::default()
            },
        ]);

        assert_eq!(player.base_stats(), CoreStats::new(100, 75, 62));
        assert_eq!(player.max_fight_points(), 420);

        let unit = player.to_combatant();
        assert_eq!(unit.id(), FighterId(1));
        assert_eq!(unit.fight_points().current, 420);
        assert_eq!(unit.breath().current, 5);
        assert_eq!(unit.actions(), &[ActionId::new("simpleAttack")]);
    }

    #[test]
    fn player_rage_is_carried() {
        let unit = PlayerProfile::new(1, "ayla", class(), 1).with_rage(4).into_combatant();
        assert_eq!(unit.rage(), 4);
    }

    #[test]
    fn monster_keeps_only_eligible_attacks() {
        let monster = MonsterProfile {
            key: "wolf".into(),
            name: "Wolf".into(),
            level: 5,
            attack: 50,
            defense: 40,
            speed: 70,
            fight_points: 200,
            breath: 4,
            max_breath: 8,
            breath_regen: 2,
            attacks: vec![
                MonsterAttack::new("bite"),
                MonsterAttack::new("howl").with_min_level(5),
                MonsterAttack::new("frenzy").with_min_level(10).with_weight(3),
            ],
        };

        let unit = monster.to_combatant(9);
        assert_eq!(unit.id(), FighterId(9));
        assert_eq!(unit.actions(), &[ActionId::new("bite"), ActionId::new("howl")]);
    }
}
