//! Standard item registry and a demonstration workshop world.
//!
//! The registry covers the tools, materials and pseudo items that the
//! environment, vehicle and bionic sources produce. [`workshop_world`]
//! places a player next to a campfire, a toilet and a parked work truck.

use rust_decimal::Decimal;
use workbench_types::{
    Fuel, Functionality, Furniture, Item, ItemType, PartFunction, Phase, Point,
};

use crate::error::WorldError;
use crate::map::{GameMap, Tile};
use crate::player::Player;
use crate::registry::ItemRegistry;
use crate::vehicle::{Vehicle, VehiclePart};
use crate::world::World;

/// Tool usable without spending charges.
const fn amount_only() -> Functionality {
    Functionality::new(Decimal::NEGATIVE_ONE)
}

/// Tool spending `factor` charges per requested charge.
const fn per_charge(factor: Decimal) -> Functionality {
    Functionality::new(factor)
}

/// Build the standard item registry.
pub fn standard_registry() -> ItemRegistry {
    ItemRegistry::from(vec![
        // --- Hand tools ---
        ItemType::new("hammer", "hammer")
            .provides("func:hammer", amount_only())
            .with_quality("HAMMER", 3),
        ItemType::new("hatchet", "hatchet")
            .provides("func:hammer", amount_only())
            .provides("func:axe", amount_only())
            .with_quality("HAMMER", 1)
            .with_quality("CUT", 1),
        ItemType::new("rock", "rock")
            .provides(
                "func:hammer",
                amount_only().with_time_modifier(Decimal::TWO),
            )
            .with_quality("HAMMER", 1),
        ItemType::new("saw", "wood saw")
            .provides("func:saw", amount_only())
            .with_quality("SAW_W", 2),
        ItemType::new("needle", "sewing needle").provides("func:sewing", amount_only()),
        // --- Charged tools ---
        ItemType::new("welder", "welder").provides("func:welder", per_charge(Decimal::ONE)),
        ItemType::new("hotplate", "hotplate")
            .provides("func:hotplate", per_charge(Decimal::ONE)),
        ItemType::new("soldering_iron", "soldering iron")
            .provides("func:soldering", per_charge(Decimal::ONE))
            .provides(
                "func:welder",
                per_charge(Decimal::new(5, 0)).with_time_modifier(Decimal::new(3, 0)),
            ),
        // --- Pseudo tools ---
        ItemType::new("toolset_welder", "integrated welder")
            .provides("func:welder", per_charge(Decimal::TWO)),
        ItemType::new("toolset_hammer", "integrated hammer")
            .provides("func:hammer", amount_only())
            .with_quality("HAMMER", 2),
        ItemType::new("welding_rig", "vehicle welding rig")
            .provides("func:welder", per_charge(Decimal::ONE)),
        ItemType::new("installed_kitchen_unit", "vehicle kitchen unit")
            .provides("func:hotplate", per_charge(Decimal::ONE)),
        ItemType::new("forge", "vehicle forge").provides("func:forge", per_charge(Decimal::ONE)),
        ItemType::new("chemistry_set", "vehicle chemistry lab")
            .provides("func:chemistry", per_charge(Decimal::ONE)),
        ItemType::new("autoclave", "vehicle autoclave")
            .provides("func:autoclave", per_charge(Decimal::ONE)),
        ItemType::new("fire", "nearby fire"),
        // --- Materials ---
        ItemType::new("2x4", "plank"),
        ItemType::new("nail", "nails").count_by_charges(),
        ItemType::new("thread", "thread").count_by_charges(),
        ItemType::new("rag", "rag"),
        ItemType::new("scrap", "scrap metal"),
        ItemType::new("battery", "battery").count_by_charges(),
        ItemType::new("apron", "leather apron"),
        // --- Liquids and containers ---
        ItemType::new("water", "water")
            .with_phase(Phase::Liquid)
            .count_by_charges(),
        ItemType::new("water_clean", "clean water")
            .with_phase(Phase::Liquid)
            .count_by_charges(),
        ItemType::new("bottle_plastic", "plastic bottle").container(),
    ])
}

/// Build a small workshop: a carpenter with a hammer and nails, planks and a
/// campfire nearby, a toilet, a sealed crate, and a parked work truck with a
/// welding rig and a kitchen.
///
/// # Errors
///
/// Returns [`WorldError`] if the truck cannot be placed.
pub fn workshop_world() -> Result<World, WorldError> {
    let player = Player::new(Point::new(0, 0))
        .with_stack(vec![Item::new("hammer")])
        .with_stack(vec![Item::new("nail").with_charges(40)])
        .wearing(Item::new("apron"))
        .with_bionic("bio_tools_welder")
        .with_power(50);

    let mut map = GameMap::new();
    map.set_tile(Tile::new(Point::new(1, 0)).with_items(vec![
        Item::new("2x4"),
        Item::new("2x4"),
        Item::new("2x4"),
    ]));
    map.set_tile(Tile::new(Point::new(2, 2)).burning());
    map.set_tile(Tile::new(Point::new(-2, 0)).with_furniture(Furniture::Toilet));
    map.set_tile(
        Tile::new(Point::new(3, -3))
            .sealed()
            .with_items(vec![Item::new("2x4"), Item::new("2x4")]),
    );
    map.add_item(Point::new(12, 12), Item::new("saw"));

    let mut world = World::new(standard_registry(), map, player);

    let truck = Vehicle::new("work truck", Point::new(0, 3))
        .with_part(
            VehiclePart::new(Point::new(0, 0), vec![PartFunction::Cargo]).with_items(vec![
                Item::new("nail").with_charges(100),
                Item::new("2x4"),
                Item::new("2x4"),
            ]),
        )
        .with_part(VehiclePart::new(
            Point::new(1, 0),
            vec![PartFunction::WeldingRig],
        ))
        .with_part(VehiclePart::new(Point::new(2, 0), vec![PartFunction::Kitchen]))
        .with_fuel(Fuel::Battery, 150)
        .with_fuel(Fuel::Water, 20);
    world.add_vehicle(truck)?;

    Ok(world)
}
