//! End-to-end scenarios for requirement resolution.
//!
//! Each test builds a small world by hand (or starts from the sample
//! workshop), runs the facade or the solution lifecycle, and checks both the
//! reported outcome and the state of the world afterwards.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::missing_panics_doc)]

use rust_decimal_macros::dec;
use workbench_crafting::{
    CraftingConfig, CraftingSession, FirstOption, FunctionalityTable, RequirementSet,
    RequirementSpec, ScriptedChooser, Solution, SourceCatalog, SourceMask,
};
use workbench_types::{
    Availability, Fuel, Functionality, Item, ItemType, ItemTypeId, PartFunction, Point,
    RequirementKind,
};
use workbench_world::{
    GameMap, ItemRegistry, Player, Tile, Vehicle, VehiclePart, World, standard_registry,
    workshop_world,
};

// =============================================================================
// Helpers
// =============================================================================

fn bare_world() -> World {
    World::new(standard_registry(), GameMap::new(), Player::new(Point::new(0, 0)))
}

fn catalog(world: &World) -> SourceCatalog {
    SourceCatalog::new(world, Some(6), &CraftingConfig::default())
}

fn gathered(world: &World, catalog: &SourceCatalog, reqs: &RequirementSet) -> Solution {
    let mut table = FunctionalityTable::new();
    let mut sol = Solution::init(reqs, &world.registry, &mut table).unwrap();
    sol.gather(world, catalog, true).unwrap();
    sol
}

fn planks(count: usize) -> Vec<Item> {
    (0..count).map(|_| Item::new("2x4")).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn only_hatchet_is_chosen_without_prompting() {
    let mut world = bare_world();
    world.player.inventory.push(vec![Item::new("hatchet")]);
    let cat = catalog(&world);
    let reqs = RequirementSet::new().tool(vec![
        RequirementSpec::new("hammer", -1),
        RequirementSpec::new("hatchet", -1),
    ]);
    let mut sol = gathered(&world, &cat, &reqs);
    let mut chooser = ScriptedChooser::new(vec![]);
    sol.select(&world, &cat, &mut chooser).unwrap();

    assert!(chooser.prompts.is_empty());
    let chosen = sol.complex_reqs[0].selected().unwrap();
    assert_eq!(chosen.requirement.item_type, ItemTypeId::from("hatchet"));
}

#[test]
fn planks_split_between_player_and_ground() {
    let mut world = bare_world();
    world.player.inventory.push(planks(6));
    world.map.set_tile(Tile::new(Point::new(1, 0)).with_items(planks(6)));
    let cat = catalog(&world);
    let reqs = RequirementSet::new().component(vec![RequirementSpec::new("2x4", 10)]);

    let mut sol = gathered(&world, &cat, &reqs);
    let simple = &sol.complex_reqs[0].simple_reqs[0];
    assert_eq!(simple.count_on_map, 6);
    assert_eq!(simple.count_on_player, 6);
    assert!(sol.is_possible());

    sol.select(&world, &cat, &mut FirstOption).unwrap();
    let report = sol.consume(&mut world, &cat, &mut FirstOption).unwrap();
    assert_eq!(report.used_components.len(), 10);

    let plank = ItemTypeId::from("2x4");
    assert_eq!(cat.amount_of(&world, &plank, SourceMask::PLAYER, None), 0);
    assert_eq!(cat.amount_of(&world, &plank, SourceMask::NEARBY, None), 2);
    assert!(world.player.inventory.is_empty());
}

#[test]
fn welder_functionality_short_of_charges() {
    let mut world = World::new(
        standard_registry(),
        GameMap::new(),
        Player::new(Point::new(0, 0))
            .with_bionic("bio_tools_welder")
            .with_power(50),
    );
    world
        .add_vehicle(
            Vehicle::new("rig truck", Point::new(0, 2))
                .with_part(VehiclePart::new(Point::new(0, 0), vec![PartFunction::WeldingRig]))
                .with_fuel(Fuel::Battery, 150),
        )
        .unwrap();
    let cat = catalog(&world);
    let reqs = RequirementSet::new().tool(vec![RequirementSpec::new("func:welder", 200)]);

    let sol = gathered(&world, &cat, &reqs);
    assert!(!sol.is_possible());
    assert_eq!(sol.missing(), vec!["func:welder (200)".to_owned()]);

    let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
    let err = session.gather_and_consume(&reqs, &mut FirstOption).unwrap_err();
    assert!(err.to_string().contains("func:welder"));
}

#[test]
fn one_saw_cannot_serve_two_tool_sets() {
    let mut world = bare_world();
    world.player.inventory.push(vec![Item::new("saw")]);
    let cat = catalog(&world);
    let single = RequirementSet::new().tool(vec![RequirementSpec::new("saw", -1)]);
    let double = single.clone().tool(vec![RequirementSpec::new("saw", -1)]);

    assert!(gathered(&world, &cat, &single).is_possible());
    let sol = gathered(&world, &cat, &double);
    assert!(!sol.is_possible());
    let available: Vec<bool> = sol
        .complex_reqs
        .iter()
        .map(|c| c.simple_reqs[0].availability == Availability::Available)
        .collect();
    assert_eq!(available.iter().filter(|a| **a).count(), 1);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn shared_nails_are_never_double_spent() {
    let mut world = workshop_world().unwrap();
    let cat = catalog(&world);
    let reqs = RequirementSet::new()
        .component(vec![RequirementSpec::new("nail", 60)])
        .component(vec![RequirementSpec::new("nail", 70)]);
    let mut sol = gathered(&world, &cat, &reqs);
    sol.select(&world, &cat, &mut FirstOption).unwrap();
    let report = sol.consume(&mut world, &cat, &mut FirstOption).unwrap();

    assert!(report.is_complete());
    let used: i64 = report.used_components.iter().filter_map(|i| i.charges).sum();
    assert_eq!(used, 130);
    let nail = ItemTypeId::from("nail");
    assert_eq!(cat.charges_of(&world, &nail, SourceMask::ALL, None), 10);
    let stock = cat.all_items_by_type(&world, &nail);
    assert!(stock.iter().all(|f| f.item.charges.unwrap_or(0) >= 0));
}

#[test]
fn amount_and_charge_claims_take_different_welders() {
    let mut world = bare_world();
    world.player.inventory.push(vec![Item::new("welder").with_charges(10)]);
    world.player.inventory.push(vec![Item::new("welder").with_charges(40)]);
    let cat = catalog(&world);
    let reqs = RequirementSet::new()
        .tool(vec![RequirementSpec::new("welder", -1)])
        .tool(vec![RequirementSpec::new("welder", 30)]);

    let mut sol = gathered(&world, &cat, &reqs);
    assert!(sol.is_possible());
    sol.select(&world, &cat, &mut FirstOption).unwrap();
    let report = sol.consume(&mut world, &cat, &mut FirstOption).unwrap();

    assert_eq!(
        report.used_tools,
        vec![
            Item::new("welder").with_charges(10),
            Item::new("welder").with_charges(30),
        ]
    );
    let left: Vec<Option<i64>> = world
        .player
        .inventory
        .iter()
        .flatten()
        .map(|i| i.charges)
        .collect();
    assert_eq!(left, vec![Some(10), Some(10)]);
}

#[test]
fn charge_claim_leaves_hammer_for_the_first_set() {
    let mut world = bare_world();
    world.player.inventory.push(vec![Item::new("welder").with_charges(40)]);
    world.player.inventory.push(vec![Item::new("hammer")]);
    let cat = catalog(&world);
    let reqs = RequirementSet::new()
        .tool(vec![RequirementSpec::new("welder", -1), RequirementSpec::new("hammer", -1)])
        .tool(vec![RequirementSpec::new("welder", 30)]);

    let mut sol = gathered(&world, &cat, &reqs);
    assert!(sol.is_possible());
    let mut chooser = ScriptedChooser::new(Vec::new());
    sol.select(&world, &cat, &mut chooser).unwrap();
    assert!(chooser.prompts.is_empty());
    let report = sol.consume(&mut world, &cat, &mut chooser).unwrap();

    assert_eq!(
        report.used_tools,
        vec![Item::new("hammer"), Item::new("welder").with_charges(30)]
    );
    let left: Vec<Option<i64>> = world
        .player
        .inventory
        .iter()
        .flatten()
        .map(|i| i.charges)
        .collect();
    assert_eq!(left, vec![Some(10), None]);
}

#[test]
fn repeated_checks_agree() {
    let world = workshop_world().unwrap();
    let cat = catalog(&world);
    let reqs = RequirementSet::new()
        .tool(vec![RequirementSpec::new("func:hammer", -1)])
        .component(vec![RequirementSpec::new("2x4", 5)]);
    let mut table = FunctionalityTable::new();
    let mut sol = Solution::init(&reqs, &world.registry, &mut table).unwrap();
    sol.gather(&world, &cat, false).unwrap();
    let first = sol.is_possible();
    sol.gather(&world, &cat, false).unwrap();
    assert_eq!(first, sol.is_possible());
    assert!(first);
}

#[test]
fn functionality_conversion_factors() {
    let registry = ItemRegistry::from(vec![
        ItemType::new("torch", "torch").provides("func:heat", Functionality::new(dec!(0))),
        ItemType::new("lighter", "lighter").provides("func:heat", Functionality::new(dec!(-1))),
        ItemType::new("stove", "stove").provides("func:heat", Functionality::new(dec!(0.5))),
    ]);
    let mut table = FunctionalityTable::new();
    let expand = |count: i64, table: &mut FunctionalityTable| {
        let reqs = RequirementSet::new().tool(vec![RequirementSpec::new("func:heat", count)]);
        let sol = Solution::init(&reqs, &registry, table).unwrap();
        sol.complex_reqs[0]
            .simple_reqs
            .iter()
            .map(|s| {
                (
                    s.requirement.item_type.to_string(),
                    s.requirement.kind,
                    s.requirement.count,
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(
        expand(3, &mut table),
        vec![
            ("lighter".to_owned(), RequirementKind::Amount, 1),
            ("stove".to_owned(), RequirementKind::Charges, 2),
        ]
    );
    assert_eq!(
        expand(1, &mut table),
        vec![
            ("lighter".to_owned(), RequirementKind::Amount, 1),
            ("stove".to_owned(), RequirementKind::Charges, 1),
        ]
    );
}

#[test]
fn persisted_selection_consumes_identically() {
    let reqs = RequirementSet::new()
        .tool(vec![RequirementSpec::new("func:welder", 20)])
        .component(vec![RequirementSpec::new("2x4", 4)])
        .component(vec![RequirementSpec::new("nail", 50)]);

    let mut direct_world = workshop_world().unwrap();
    let mut resumed_world = direct_world.clone();

    let cat = catalog(&direct_world);
    let mut direct = gathered(&direct_world, &cat, &reqs);
    direct.select(&direct_world, &cat, &mut FirstOption).unwrap();
    let mut copy = direct.clone();
    let blob = copy.serialize(&direct_world).unwrap();
    let direct_report = direct.consume(&mut direct_world, &cat, &mut FirstOption).unwrap();

    let mut session = CraftingSession::new(&mut resumed_world, CraftingConfig::default());
    let resumed_report = session
        .resume_and_consume(&reqs, &blob, &mut FirstOption)
        .unwrap();

    assert_eq!(direct_report, resumed_report);
    assert_eq!(direct_world.player, resumed_world.player);
    assert_eq!(direct_world.map, resumed_world.map);
}
