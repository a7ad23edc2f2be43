//! Immutable, id-keyed action catalog.

use std::collections::HashMap;

use crate::error::RegistryError;

use super::types::{ActionDescriptor, ActionEffect, ActionId};

/// Validated action catalog.
///
/// Built once from descriptors and shared read-only between fights.
/// Construction guarantees the builtin actions exist, ids are unique,
/// cross-references resolve and probabilities are in range.
#[derive(Clone, Debug)]
pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
    index: HashMap<ActionId, usize>,
    none: usize,
    out_of_breath: usize,
    rage: usize,
}

impl ActionRegistry {
    pub fn new(actions: Vec<ActionDescriptor>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(actions.len());
        for (position, action) in actions.iter().enumerate() {
            if index.insert(action.id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateAction(action.id.clone()));
            }
        }

        let builtin = |id: &'static str| {
            index
                .get(&ActionId::new(id))
                .copied()
                .ok_or(RegistryError::MissingBuiltin(id))
        };
        let none = builtin(ActionId::NONE)?;
        let out_of_breath = builtin(ActionId::OUT_OF_BREATH)?;
        let rage = builtin(ActionId::RAGE)?;

        for action in &actions {
            validate(action, &index)?;
        }

        Ok(Self {
            actions,
            index,
            none,
            out_of_breath,
            rage,
        })
    }

    pub fn get(&self, id: &ActionId) -> Option<&ActionDescriptor> {
        self.index.get(id).map(|&position| &self.actions[position])
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up `id`, falling back to the builtin `none` action.
    ///
    /// The flag is true when the fallback was used.
    pub fn resolve(&self, id: &ActionId) -> (&ActionDescriptor, bool) {
        match self.get(id) {
            Some(action) => (action, false),
            None => (self.none(), true),
        }
    }

    pub fn none(&self) -> &ActionDescriptor {
        &self.actions[self.none]
    }

    pub fn out_of_breath(&self) -> &ActionDescriptor {
        &self.actions[self.out_of_breath]
    }

    pub fn rage(&self) -> &ActionDescriptor {
        &self.actions[self.rage]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn validate(action: &ActionDescriptor, index: &HashMap<ActionId, usize>) -> Result<(), RegistryError> {
    let in_range = |field: &'static str, value: f64, min: f64, max: f64| {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(RegistryError::OutOfRange {
                action: action.id.clone(),
                field,
                value,
                min,
                max,
            })
        }
    };

    in_range("crit_chance", action.crit_chance, 0.0, 100.0)?;
    in_range("miss_chance", action.miss_chance, 0.0, 100.0)?;
    in_range("recoil", action.recoil, 0.0, 1.0)?;
    if let Some(alteration) = &action.alteration {
        in_range("alteration.chance", alteration.chance, 0.0, 100.0)?;
    }

    if let Some(info) = &action.attack
        && !info.is_ordered()
    {
        return Err(RegistryError::UnorderedAttackInfo(action.id.clone()));
    }

    let reference = match &action.effect {
        ActionEffect::Charge { follow_up } => Some(follow_up),
        ActionEffect::Cleanse { origin, .. } => Some(origin),
        _ => None,
    };
    if let Some(reference) = reference
        && !index.contains_key(reference)
    {
        return Err(RegistryError::UnknownReference {
            action: action.id.clone(),
            reference: reference.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackInfo;

    fn builtins() -> Vec<ActionDescriptor> {
        vec![
            ActionDescriptor::new(ActionId::NONE, ActionEffect::NoAction),
            ActionDescriptor::new(ActionId::OUT_OF_BREATH, ActionEffect::OutOfBreath),
            ActionDescriptor::new(ActionId::RAGE, ActionEffect::Rage),
        ]
    }

    fn with(extra: ActionDescriptor) -> Vec<ActionDescriptor> {
        let mut actions = builtins();
        actions.push(extra);
        actions
    }

    #[test]
    fn builds_and_resolves() {
        let registry =
            ActionRegistry::new(with(ActionDescriptor::attack("slash", AttackInfo::new(5, 10, 20))))
                .unwrap();

        assert_eq!(registry.len(), 4);
        let (slash, fallback) = registry.resolve(&ActionId::new("slash"));
        assert_eq!(slash.id.as_str(), "slash");
        assert!(!fallback);
        assert_eq!(registry.rage().effect, ActionEffect::Rage);
    }

    #[test]
    fn unknown_id_falls_back_to_none() {
        let registry = ActionRegistry::new(builtins()).unwrap();
        let (action, fallback) = registry.resolve(&ActionId::new("fireball"));
        assert_eq!(action.id, ActionId::none());
        assert!(fallback);
    }

    #[test]
    fn missing_builtin_is_rejected() {
        let mut actions = builtins();
        actions.retain(|a| a.id.as_str() != ActionId::RAGE);
        assert_eq!(
            ActionRegistry::new(actions).unwrap_err(),
            RegistryError::MissingBuiltin(ActionId::RAGE)
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = ActionRegistry::new(with(ActionDescriptor::new("none", ActionEffect::Support)))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateAction(ActionId::none()));
    }

    #[test]
    fn dangling_follow_up_is_rejected() {
        let charge = ActionDescriptor::new(
            "windUp",
            ActionEffect::Charge {
                follow_up: ActionId::new("smash"),
            },
        );
        assert!(matches!(
            ActionRegistry::new(with(charge)),
            Err(RegistryError::UnknownReference { .. })
        ));
    }

    #[test]
    fn bad_chances_are_rejected() {
        let action =
            ActionDescriptor::attack("wild", AttackInfo::new(1, 2, 3)).with_chances(120.0, 0.0);
        assert!(matches!(
            ActionRegistry::new(with(action)),
            Err(RegistryError::OutOfRange {
                field: "crit_chance",
                ..
            })
        ));
    }

    #[test]
    fn unordered_attack_info_is_rejected() {
        let action = ActionDescriptor::attack("odd", AttackInfo::new(10, 5, 20));
        assert_eq!(
            ActionRegistry::new(with(action)).unwrap_err(),
            RegistryError::UnorderedAttackInfo(ActionId::new("odd"))
        );
    }
}
