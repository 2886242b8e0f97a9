//! Modifier algebra: gain, consumption and decay.
//!
//! All functions read the idol and return updates; nothing is mutated here.

use crate::env::IdGenerator;
use crate::state::{Idol, Modifier, ModifierId, ModifierKind, ModifierTag, UpdateKind};

use super::calc::{ceil_percent, to_delta};

/// Updates granting `incoming` to the idol.
///
/// - a debuff meeting debuff protection spends one protection charge instead
/// - an additive kind merges into a matching instance
/// - a binary kind is added only if an identical one is absent
/// - anything else is added under a fresh id
pub fn apply_modifier_gain(
    idol: &Idol,
    incoming: &ModifierKind,
    ids: &mut dyn IdGenerator,
) -> Vec<UpdateKind> {
    let tag = incoming.tag();

    if tag.is_debuff() && idol.modifier_strength(ModifierTag::DebuffProtection) > 0 {
        return consume_modifier(idol, ModifierTag::DebuffProtection, 1);
    }

    if tag.is_binary() {
        if idol.modifiers.iter().any(|modifier| modifier.kind == *incoming) {
            return Vec::new();
        }
        return vec![addition(incoming, ids)];
    }

    if incoming.strength() == Some(0) {
        return Vec::new();
    }

    if let Some(existing) = idol
        .modifiers
        .iter()
        .find(|modifier| incoming.merges_into(&modifier.kind))
    {
        return vec![UpdateKind::ModifierUpdate {
            id: existing.id,
            delta: to_delta(incoming.strength().unwrap_or(0)),
        }];
    }

    vec![addition(incoming, ids)]
}

fn addition(kind: &ModifierKind, ids: &mut dyn IdGenerator) -> UpdateKind {
    UpdateKind::ModifierAddition {
        modifier: Modifier::new(ModifierId(ids.next_id()), kind.clone()),
    }
}

/// Spends up to `amount` strength from instances of `tag`, in acquisition order.
///
/// Instances reaching zero are removed when zero is terminal for the kind.
/// Emits nothing when no instance is present.
pub fn consume_modifier(idol: &Idol, tag: ModifierTag, amount: u32) -> Vec<UpdateKind> {
    let mut updates = Vec::new();
    let mut remaining = amount;
    for modifier in idol.modifiers.iter().filter(|modifier| modifier.tag() == tag) {
        if remaining == 0 {
            break;
        }
        let Some(strength) = modifier.kind.strength() else {
            continue;
        };
        let taken = strength.min(remaining);
        if taken == 0 {
            continue;
        }
        remaining -= taken;
        updates.push(UpdateKind::ModifierUpdate {
            id: modifier.id,
            delta: -to_delta(taken),
        });
        if strength == taken && tag.zero_is_terminal() {
            updates.push(UpdateKind::ModifierRemoval { id: modifier.id });
        }
    }
    updates
}

/// Turn-start decay.
///
/// Only modifiers captured by the previous turn-start snapshot lose a point,
/// so a modifier gained mid-turn keeps its full strength through the next
/// turn. Delayed effects count down every turn start regardless.
pub fn decay_over_time(idol: &Idol) -> Vec<UpdateKind> {
    let mut updates = Vec::new();
    for modifier in &idol.modifiers {
        let tag = modifier.tag();
        if !tag.decays_over_time() {
            continue;
        }
        if tag != ModifierTag::DelayedEffect
            && !idol.modifier_ids_at_turn_start.contains(&modifier.id)
        {
            continue;
        }
        let Some(strength) = modifier.kind.strength().filter(|strength| *strength > 0) else {
            continue;
        };
        updates.push(UpdateKind::ModifierUpdate {
            id: modifier.id,
            delta: -1,
        });
        if strength == 1 && tag.zero_is_terminal() {
            updates.push(UpdateKind::ModifierRemoval { id: modifier.id });
        }
    }
    updates
}

/// Scales the first instance of `tag` by `multiplier_percentage`, rounding up.
pub fn multiply_modifier(idol: &Idol, tag: ModifierTag, multiplier_percentage: u32) -> Vec<UpdateKind> {
    let Some(modifier) = idol.find_modifier(tag) else {
        return Vec::new();
    };
    let Some(strength) = modifier.kind.strength() else {
        return Vec::new();
    };
    let scaled = ceil_percent(u64::from(strength), multiplier_percentage);
    let delta = scaled.min(i32::MAX as u64) as i64 - i64::from(strength);
    if delta == 0 {
        return Vec::new();
    }
    let mut updates = vec![UpdateKind::ModifierUpdate {
        id: modifier.id,
        delta: delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
    }];
    if scaled == 0 && tag.zero_is_terminal() {
        updates.push(UpdateKind::ModifierRemoval { id: modifier.id });
    }
    updates
}
