use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use serde::Deserialize;

pub const REGISTER: &str = "REGISTER";
pub const PRODUCT: &str = "PRODUCT";
pub const PARKING_HELM: &str = "PARKING_HELM";
pub const MEAL_BREAK: &str = "MEAL_BREAK";

/// Governs how a role's assignments snap to the slot grid (spec §3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSizeMode {
    HourOnly,
    HalfHourOnly,
    HalfOrFull,
}

/// Metadata for a single role code, folded from input `roleMetadata`
/// entries over the default table below. Every field defaults rather
/// than rejects an unknown role — role codes not mentioned in
/// `roleMetadata` still get a usable, conservative entry.
#[derive(Debug, Clone)]
pub struct RoleMetadata {
    pub code: String,
    pub is_universal: bool,
    pub is_break_role: bool,
    pub is_parking_role: bool,
    pub allow_outside_store_hours: bool,
    pub slot_size_mode: SlotSizeMode,
    pub block_size: u32,
    pub min_slots: u32,
    pub max_slots: u32,
    pub slots_must_be_consecutive: bool,
    /// Soft-consecutivity flag (`isConsecutive` in the input). Distinct
    /// from `slots_must_be_consecutive`: this drives the §4.5 objective
    /// penalty, not a C10 hard constraint.
    pub is_consecutive: bool,
}

impl RoleMetadata {
    fn default_for(code: &str, max_slots_ceiling: u32) -> Self {
        let slot_size_mode = if code == REGISTER { SlotSizeMode::HourOnly } else { SlotSizeMode::HalfOrFull };

        RoleMetadata {
            code: code.to_string(),
            is_universal: matches!(code, REGISTER | PRODUCT | PARKING_HELM | MEAL_BREAK),
            is_break_role: code == MEAL_BREAK,
            is_parking_role: code == PARKING_HELM,
            allow_outside_store_hours: false,
            slot_size_mode,
            block_size: 1,
            min_slots: 0,
            max_slots: max_slots_ceiling,
            slots_must_be_consecutive: false,
            is_consecutive: false,
        }
    }

    pub fn from_dto(dto: &RoleMetadataDto, default: &RoleMetadata) -> Self {
        let slot_size_mode = match dto.slot_size_mode.as_deref() {
            Some("HOUR_ONLY") => SlotSizeMode::HourOnly,
            Some("HALF_HOUR_ONLY") => SlotSizeMode::HalfHourOnly,
            Some("HALF_OR_FULL") => SlotSizeMode::HalfOrFull,
            _ => default.slot_size_mode,
        };

        RoleMetadata {
            code: dto.role.clone(),
            is_universal: dto.is_universal.unwrap_or(default.is_universal),
            is_break_role: dto.is_break_role.unwrap_or(default.is_break_role),
            is_parking_role: dto.is_parking_role.unwrap_or(default.is_parking_role),
            allow_outside_store_hours: dto.allow_outside_store_hours.unwrap_or(default.allow_outside_store_hours),
            slot_size_mode,
            block_size: dto.block_size.unwrap_or(default.block_size).max(1),
            min_slots: dto.min_slots.unwrap_or(default.min_slots),
            max_slots: dto.max_slots.unwrap_or(default.max_slots),
            slots_must_be_consecutive: dto.slots_must_be_consecutive.unwrap_or(default.slots_must_be_consecutive),
            is_consecutive: dto.is_consecutive.unwrap_or(default.is_consecutive),
        }
    }
}

/// Raw `roleMetadata[]` entry. Every field but `role` is optional — absent
/// fields fall back to the default table entry for the same code (built-in
/// default, or the conservative blank default for a role never seen
/// before).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMetadataDto {
    pub role: String,
    pub is_universal: Option<bool>,
    pub is_break_role: Option<bool>,
    pub is_parking_role: Option<bool>,
    pub allow_outside_store_hours: Option<bool>,
    pub slot_size_mode: Option<String>,
    pub block_size: Option<u32>,
    pub min_slots: Option<u32>,
    pub max_slots: Option<u32>,
    pub slots_must_be_consecutive: Option<bool>,
    pub is_consecutive: Option<bool>,
}

lazy_static! {
    /// Roles with built-in defaults even when absent from `roleMetadata`.
    static ref BUILTIN_ROLES: HashSet<&'static str> = [REGISTER, PRODUCT, PARKING_HELM, MEAL_BREAK].into_iter().collect();
}

/// Classifies every role used anywhere in the input.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleMetadata>,
}

impl RoleRegistry {
    /// Builds the registry from the raw `roleMetadata` overrides plus the
    /// set of every role code observed anywhere else in the input
    /// (eligibility lists, demands, requirements, coverage windows,
    /// preferences). `max_slots_ceiling` bounds the default `max_slots`
    /// (there is no point defaulting it above the number of slots a day
    /// actually has).
    pub fn build(overrides: &[RoleMetadataDto], observed_codes: &HashSet<String>, max_slots_ceiling: u32) -> Self {
        let mut roles = HashMap::new();

        for code in BUILTIN_ROLES.iter() {
            roles.insert(code.to_string(), RoleMetadata::default_for(code, max_slots_ceiling));
        }
        for code in observed_codes {
            roles.entry(code.clone()).or_insert_with(|| RoleMetadata::default_for(code, max_slots_ceiling));
        }
        for ov in overrides {
            let default = roles.get(&ov.role).cloned().unwrap_or_else(|| RoleMetadata::default_for(&ov.role, max_slots_ceiling));
            roles.insert(ov.role.clone(), RoleMetadata::from_dto(ov, &default));
        }

        RoleRegistry { roles }
    }

    pub fn get(&self, code: &str) -> Option<&RoleMetadata> {
        self.roles.get(code)
    }

    pub fn is_universal(&self, code: &str) -> bool {
        self.get(code).map(|r| r.is_universal).unwrap_or(false)
    }

    pub fn is_break(&self, code: &str) -> bool {
        self.get(code).map(|r| r.is_break_role).unwrap_or(false)
    }

    pub fn is_parking(&self, code: &str) -> bool {
        self.get(code).map(|r| r.is_parking_role).unwrap_or(false)
    }

    pub fn allows_outside_hours(&self, code: &str) -> bool {
        self.get(code).map(|r| r.allow_outside_store_hours).unwrap_or(false)
    }

    pub fn block_size(&self, code: &str) -> u32 {
        self.get(code).map(|r| r.block_size).unwrap_or(1)
    }

    pub fn min_slots(&self, code: &str) -> u32 {
        self.get(code).map(|r| r.min_slots).unwrap_or(0)
    }

    pub fn max_slots(&self, code: &str) -> u32 {
        self.get(code).map(|r| r.max_slots).unwrap_or(u32::MAX)
    }

    pub fn must_be_consecutive(&self, code: &str) -> bool {
        self.get(code).map(|r| r.slots_must_be_consecutive).unwrap_or(false)
    }

    pub fn is_soft_consecutive(&self, code: &str) -> bool {
        self.get(code).map(|r| r.is_consecutive).unwrap_or(false)
    }

    pub fn slot_size_mode(&self, code: &str) -> SlotSizeMode {
        self.get(code).map(|r| r.slot_size_mode).unwrap_or(SlotSizeMode::HalfOrFull)
    }

    /// The first declared break-role, used by C8 (spec says "the meal
    /// break" uses a single designated break-role).
    pub fn first_break_role(&self) -> Option<&str> {
        self.roles.values().find(|r| r.is_break_role).map(|r| r.code.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_table() {
        let registry = RoleRegistry::build(&[], &HashSet::new(), 48);
        assert!(registry.is_universal(REGISTER));
        assert!(registry.is_universal(PRODUCT));
        assert!(registry.is_universal(PARKING_HELM));
        assert!(registry.is_universal(MEAL_BREAK));
        assert!(registry.is_break(MEAL_BREAK));
        assert!(registry.is_parking(PARKING_HELM));
        assert_eq!(registry.slot_size_mode(REGISTER), SlotSizeMode::HourOnly);
        assert_eq!(registry.slot_size_mode(PRODUCT), SlotSizeMode::HalfOrFull);
    }

    #[test]
    fn unknown_role_gets_conservative_default() {
        let mut observed = HashSet::new();
        observed.insert("ORDER_WRITER".to_string());
        let registry = RoleRegistry::build(&[], &observed, 48);
        assert!(!registry.is_universal("ORDER_WRITER"));
        assert!(!registry.must_be_consecutive("ORDER_WRITER"));
        assert_eq!(registry.block_size("ORDER_WRITER"), 1);
    }

    #[test]
    fn override_replaces_default() {
        let overrides = vec![RoleMetadataDto {
            role: "DEMO".to_string(),
            is_universal: None,
            is_break_role: None,
            is_parking_role: None,
            allow_outside_store_hours: None,
            slot_size_mode: None,
            block_size: Some(2),
            min_slots: None,
            max_slots: Some(48),
            slots_must_be_consecutive: Some(true),
            is_consecutive: None,
        }];
        let registry = RoleRegistry::build(&overrides, &HashSet::new(), 48);
        assert_eq!(registry.block_size("DEMO"), 2);
        assert!(registry.must_be_consecutive("DEMO"));
    }
}
