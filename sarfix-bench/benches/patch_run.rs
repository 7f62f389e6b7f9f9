//! sarfix Benchmark Suite
//!
//! Performance targets:
//!   resolve_winners_5000_weapons_4_layers ... < 2ms
//!   full_run_5000_weapons_300_races ......... < 10ms
//!   weapon_rules_single .................... < 1μs

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use sarfix_core::record::{Attack, AttackData, Plugin, Race, Weapon};
use sarfix_core::resolver::winning_overrides;
use sarfix_core::rules::weapon::WeaponRules;
use sarfix_core::{FormKey, LoadOrder, ModKey, RecordStore};
use sarfix_skyrim::WeaponPreset;
use sarfix_skyrim::keywords::{ACTOR_TYPE_NPC, VANILLA_MELEE};

const WEAPONS: u32 = 5000;
const RACES: u32 = 300;
const LAYERS: usize = 4;

fn make_weapon(i: u32) -> Weapon {
    let keyword = VANILLA_MELEE[i as usize % VANILLA_MELEE.len()];
    let edid = if i % 50 == 0 { format!("Warstaff{i}") } else { format!("Weapon{i}") };
    Weapon::new(FormKey::new(ModKey::new("Skyrim.esm"), i), edid)
        .with_keyword(keyword)
        .with_stats(0.8 + (i % 7) as f32 / 10.0, 0.7 + (i % 5) as f32 / 10.0)
}

fn make_race(i: u32) -> Race {
    let mut race = Race::new(FormKey::new(ModKey::new("Skyrim.esm"), 0x10_0000 + i), format!("Race{i}"));
    if i % 3 != 0 {
        race = race.with_keyword(ACTOR_TYPE_NPC);
    }
    (0..6).fold(race, |r, n| r.with_attack(Attack::new(format!("attack{n}"), AttackData::default())))
}

/// Base game plus `LAYERS - 1` mods each overriding a slice of the weapons.
fn make_load_order() -> LoadOrder {
    let mut base = Plugin::new(ModKey::new("Skyrim.esm"));
    for i in 0..WEAPONS {
        base = base.with(make_weapon(i));
    }
    for i in 0..RACES {
        base = base.with(make_race(i));
    }

    let mut load_order = LoadOrder::new("SpeedAndReachFixes.esp").with_plugin(base);
    for layer in 1..LAYERS {
        let mut plugin = Plugin::new(ModKey::new(format!("Mod{layer}.esp")));
        for i in (0..WEAPONS).filter(|i| *i as usize % LAYERS == layer) {
            plugin = plugin.with(make_weapon(i).with_stats(1.0, 1.0));
        }
        load_order.push(plugin);
    }
    load_order
}

/// Benchmark: Winner resolution across the full weapon listing (target: < 2ms).
fn bench_resolve(c: &mut Criterion) {
    let load_order = make_load_order();
    c.bench_function("resolve_winners_5000_weapons_4_layers", |b| {
        b.iter(|| {
            let layers = load_order.list_layers::<Weapon>();
            black_box(winning_overrides(&layers).len());
        });
    });
}

/// Benchmark: Complete run, store cloned per iteration (target: < 10ms).
fn bench_full_run(c: &mut Criterion) {
    let load_order = make_load_order();
    let config = WeaponPreset::AnimatedArmoury.config();
    c.bench_function("full_run_5000_weapons_300_races", |b| {
        b.iter_batched(
            || load_order.clone(),
            |mut store| black_box(sarfix_core::run(&config, &mut store)),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: Weapon rules on one weapon (target: < 1μs).
fn bench_weapon_rules(c: &mut Criterion) {
    let config = WeaponPreset::AnimatedArmoury.config();
    let rules = WeaponRules::new(&config.weapons);
    let weapon = make_weapon(50);
    c.bench_function("weapon_rules_single", |b| {
        b.iter(|| black_box(rules.apply(black_box(&weapon))));
    });
}

criterion_group!(benches, bench_resolve, bench_full_run, bench_weapon_rules);
criterion_main!(benches);
