//! Keyword editor ids used by the Skyrim presets.
//!
//! Weapons are categorised by their `WeapType*` keyword. Animated Armoury adds
//! its own weapon types on top of the vanilla set; its weapons usually carry a
//! vanilla keyword as well, so its profiles are matched first.

/// Races with this keyword are humanoid NPC races.
pub const ACTOR_TYPE_NPC: &str = "ActorTypeNPC";

// ---------------------------------------------------------------------------
// Vanilla weapon types
// ---------------------------------------------------------------------------

/// One-handed sword.
pub const WEAP_TYPE_SWORD: &str = "WeapTypeSword";
/// Dagger.
pub const WEAP_TYPE_DAGGER: &str = "WeapTypeDagger";
/// One-handed axe.
pub const WEAP_TYPE_WAR_AXE: &str = "WeapTypeWarAxe";
/// Mace.
pub const WEAP_TYPE_MACE: &str = "WeapTypeMace";
/// Two-handed sword.
pub const WEAP_TYPE_GREATSWORD: &str = "WeapTypeGreatsword";
/// Two-handed axe.
pub const WEAP_TYPE_BATTLEAXE: &str = "WeapTypeBattleaxe";
/// Two-handed hammer.
pub const WEAP_TYPE_WARHAMMER: &str = "WeapTypeWarhammer";

/// Every vanilla melee weapon type.
pub const VANILLA_MELEE: [&str; 7] = [
    WEAP_TYPE_SWORD,
    WEAP_TYPE_DAGGER,
    WEAP_TYPE_WAR_AXE,
    WEAP_TYPE_MACE,
    WEAP_TYPE_GREATSWORD,
    WEAP_TYPE_BATTLEAXE,
    WEAP_TYPE_WARHAMMER,
];

// ---------------------------------------------------------------------------
// Animated Armoury weapon types
// ---------------------------------------------------------------------------

/// Rapier.
pub const WEAP_TYPE_RAPIER: &str = "WeapTypeRapier";
/// Katana.
pub const WEAP_TYPE_KATANA: &str = "WeapTypeKatana";
/// Claws.
pub const WEAP_TYPE_CLAW: &str = "WeapTypeClaw";
/// Whip.
pub const WEAP_TYPE_WHIP: &str = "WeapTypeWhip";
/// Pike.
pub const WEAP_TYPE_PIKE: &str = "WeapTypePike";
/// Halberd.
pub const WEAP_TYPE_HALBERD: &str = "WeapTypeHalberd";
/// Quarterstaff.
pub const WEAP_TYPE_QUARTERSTAFF: &str = "WeapTypeQtrStaff";
