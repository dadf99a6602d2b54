//! Upgrade shop: items bought with accumulated score.

use serde::Serialize;

use horde_core::enums::Edition;
use horde_core::types::ShopItemId;

use crate::error::ShopError;
use crate::store::ProgressionStore;

/// Reload time never drops below this.
pub const MIN_RELOAD_TIME_MS: u64 = 500;

/// Damage taken never drops below this fraction.
pub const MIN_DAMAGE_REDUCTION: f32 = 0.2;

/// The single stat change an item applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShopEffect {
    AddMaxHealth { amount: f32 },
    ScaleDamage { factor: f32 },
    AddMaxAmmo { amount: u32 },
    ShortenReload { ms: u64 },
    ScaleMovementSpeed { factor: f32 },
    ScaleDamageTaken { factor: f32 },
    AddHealthRegen { per_second: f32 },
}

impl ShopEffect {
    pub fn apply(&self, store: &mut ProgressionStore) {
        match *self {
            ShopEffect::AddMaxHealth { amount } => store.max_health += amount,
            ShopEffect::ScaleDamage { factor } => store.damage_multiplier *= factor,
            ShopEffect::AddMaxAmmo { amount } => store.max_ammo += amount,
            ShopEffect::ShortenReload { ms } => {
                store.reload_time_ms = store.reload_time_ms.saturating_sub(ms).max(MIN_RELOAD_TIME_MS)
            }
            ShopEffect::ScaleMovementSpeed { factor } => store.movement_speed_multiplier *= factor,
            ShopEffect::ScaleDamageTaken { factor } => {
                store.damage_reduction = (store.damage_reduction * factor).max(MIN_DAMAGE_REDUCTION)
            }
            ShopEffect::AddHealthRegen { per_second } => store.health_regen_per_second += per_second,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            ShopEffect::AddMaxHealth { amount } => format!("+{amount} max health"),
            ShopEffect::ScaleDamage { factor } => format!("x{factor} damage"),
            ShopEffect::AddMaxAmmo { amount } => format!("+{amount} magazine size"),
            ShopEffect::ShortenReload { ms } => format!("-{ms} ms reload"),
            ShopEffect::ScaleMovementSpeed { factor } => format!("x{factor} movement speed"),
            ShopEffect::ScaleDamageTaken { factor } => format!("x{factor} damage taken"),
            ShopEffect::AddHealthRegen { per_second } => format!("+{per_second} health per second"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: &'static str,
    pub price: u64,
    pub effect: ShopEffect,
}

pub const SHOP_ITEMS: [ShopItem; 7] = [
    ShopItem {
        id: ShopItemId(1),
        name: "Field medkit",
        price: 1000,
        effect: ShopEffect::AddMaxHealth { amount: 20.0 },
    },
    ShopItem {
        id: ShopItemId(2),
        name: "Hollow points",
        price: 2000,
        effect: ShopEffect::ScaleDamage { factor: 1.25 },
    },
    ShopItem {
        id: ShopItemId(3),
        name: "Extended magazine",
        price: 1500,
        effect: ShopEffect::AddMaxAmmo { amount: 10 },
    },
    ShopItem {
        id: ShopItemId(4),
        name: "Speed loader",
        price: 1500,
        effect: ShopEffect::ShortenReload { ms: 250 },
    },
    ShopItem {
        id: ShopItemId(5),
        name: "Running shoes",
        price: 1500,
        effect: ShopEffect::ScaleMovementSpeed { factor: 1.2 },
    },
    ShopItem {
        id: ShopItemId(6),
        name: "Body armour",
        price: 2500,
        effect: ShopEffect::ScaleDamageTaken { factor: 0.8 },
    },
    ShopItem {
        id: ShopItemId(7),
        name: "Adrenal implant",
        price: 3000,
        effect: ShopEffect::AddHealthRegen { per_second: 0.5 },
    },
];

/// Items stocked in `edition`.
pub fn catalog(edition: Edition) -> Vec<ShopItem> {
    SHOP_ITEMS
        .iter()
        .filter(|item| item.id.0 <= edition.shop_item_count())
        .copied()
        .collect()
}

/// Buy `id` with the store's total score. On error the store is untouched.
pub fn purchase(
    store: &mut ProgressionStore,
    edition: Edition,
    id: ShopItemId,
) -> Result<ShopItem, ShopError> {
    let item = catalog(edition)
        .into_iter()
        .find(|item| item.id == id)
        .ok_or(ShopError::UnknownItem(id))?;
    if store.total_score < item.price {
        return Err(ShopError::InsufficientScore {
            have: store.total_score,
            need: item.price,
        });
    }
    store.total_score -= item.price;
    item.effect.apply(store);
    Ok(item)
}
