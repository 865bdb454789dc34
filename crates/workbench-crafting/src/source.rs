//! The source catalog: every place a requirement may be satisfied from.
//!
//! A [`SourceCatalog`] is built once per crafting session. At construction it
//! decides which map tiles, vehicle cargo parts and pseudo items are in
//! reach; it does not copy items. Every query reads the world through the
//! catalog's reach lists, so counting after a partial consume sees the
//! current state.
//!
//! Enumeration order is fixed: carried stacks, worn items, bionic pseudo
//! tools, ground items, vehicle cargo, vehicle pseudo items, environment
//! pseudo items.

use std::borrow::Cow;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use workbench_types::{Fuel, Item, ItemTypeId, Point, RequirementKind, VehicleId};
use workbench_world::World;

use crate::candidate::{Candidate, Locator, SourceMask};
use crate::config::CraftingConfig;
use crate::functionality::FunctionalityTable;
use crate::requirement::{Requirement, RequirementSpec};

/// What a pseudo item's charges are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backing {
    /// The player's bio-power.
    BioPower,
    /// A vehicle tank.
    VehicleFuel {
        /// The vehicle.
        vehicle: VehicleId,
        /// The tank.
        fuel: Fuel,
    },
    /// A fixed, inexhaustible supply (fire, water sources).
    Fixed(i64),
}

/// A pseudo item in reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoSource {
    /// Locator handed out for candidates.
    pub locator: Locator,
    /// The pseudo item type.
    pub item_type: ItemTypeId,
    /// Where its charges come from.
    pub backing: Backing,
}

impl PseudoSource {
    /// Current charges.
    pub fn charges(&self, world: &World) -> i64 {
        match &self.backing {
            Backing::BioPower => world.player.power.max(0),
            Backing::VehicleFuel { vehicle, fuel } => world
                .vehicle(*vehicle)
                .map_or(0, |v| v.fuel_left(*fuel)),
            Backing::Fixed(charges) => *charges,
        }
    }

    /// A transient item standing in for the source.
    pub fn materialize(&self, world: &World) -> Item {
        Item::new(self.item_type.clone()).with_charges(self.charges(world))
    }
}

/// An item found by a type search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// The top-level slot holding it.
    pub locator: Locator,
    /// The matching item (possibly nested inside the slot's item).
    pub item: Item,
}

/// The set of sources in reach of the player for one session.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    tiles: Vec<Point>,
    cargo: Vec<(VehicleId, Point)>,
    bionics: Vec<PseudoSource>,
    vehicle_pseudo: Vec<PseudoSource>,
    environment: Vec<PseudoSource>,
}

impl SourceCatalog {
    /// Build the catalog around the player.
    ///
    /// With `radius == None` only the player's own possessions and bionics
    /// are searched; map tiles, vehicles and the environment are skipped.
    pub fn new(world: &World, radius: Option<u32>, config: &CraftingConfig) -> Self {
        let mut catalog = Self::default();

        for bionic in &world.player.bionics {
            let Some(pseudo) = config.bionics.pseudo_for(bionic.id.as_str()) else {
                continue;
            };
            if world.registry.get(&pseudo).is_none() {
                warn!(bionic = %bionic.id, %pseudo, "Bionic pseudo tool has no item type");
                continue;
            }
            catalog.bionics.push(PseudoSource {
                locator: Locator::Bionic {
                    bionic: bionic.id.clone(),
                },
                item_type: pseudo,
                backing: Backing::BioPower,
            });
        }

        if let Some(radius) = radius {
            catalog.reach_surroundings(world, radius, config);
        }

        info!(
            radius = ?radius,
            tiles = catalog.tiles.len(),
            cargo = catalog.cargo.len(),
            bionics = catalog.bionics.len(),
            vehicle_pseudo = catalog.vehicle_pseudo.len(),
            environment = catalog.environment.len(),
            "Built source catalog"
        );
        catalog
    }

    fn reach_surroundings(&mut self, world: &World, radius: u32, config: &CraftingConfig) {
        let center = world.player.position;
        let env = &config.environment;

        for tile in world.map.tiles_within(center, radius) {
            if tile.sealed {
                continue;
            }
            self.tiles.push(tile.pos);
            if tile.is_fire_source() {
                self.environment.push(PseudoSource {
                    locator: Locator::Environment {
                        pos: tile.pos,
                        pseudo: env.fire_item.clone(),
                    },
                    item_type: env.fire_item.clone(),
                    backing: Backing::Fixed(env.fire_charges),
                });
            }
            if tile.is_water_source() {
                self.environment.push(PseudoSource {
                    locator: Locator::Environment {
                        pos: tile.pos,
                        pseudo: env.water_item.clone(),
                    },
                    item_type: env.water_item.clone(),
                    backing: Backing::Fixed(env.water_charges),
                });
            }
        }

        for vehicle in &world.vehicles {
            if !vehicle.is_stationary() {
                debug!(
                    vehicle = %vehicle.id,
                    velocity = vehicle.velocity,
                    "Skipping moving vehicle"
                );
                continue;
            }
            // One pseudo item per type and vehicle: parts share the tanks.
            let mut exposed: BTreeSet<&ItemTypeId> = BTreeSet::new();
            for part in &vehicle.parts {
                if vehicle.position_of(part.mount).square_distance(center) > radius {
                    continue;
                }
                if part.is_cargo() {
                    self.cargo.push((vehicle.id, part.mount));
                }
                for function in &part.functions {
                    for rule in config.pseudo_items_for(*function) {
                        if !exposed.insert(&rule.item) {
                            continue;
                        }
                        self.vehicle_pseudo.push(PseudoSource {
                            locator: Locator::VehiclePseudo {
                                vehicle: vehicle.id,
                                mount: part.mount,
                                pseudo: rule.item.clone(),
                            },
                            item_type: rule.item.clone(),
                            backing: Backing::VehicleFuel {
                                vehicle: vehicle.id,
                                fuel: rule.fuel,
                            },
                        });
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------
    // Enumeration
    // -------------------------------------------------------------------

    /// Every top-level slot in reach, restricted to `mask`, in catalog order.
    pub fn slots<'a>(
        &'a self,
        world: &'a World,
        mask: SourceMask,
    ) -> impl Iterator<Item = (Locator, Cow<'a, Item>)> + 'a {
        use workbench_types::SourceKind as K;

        let inventory = world
            .player
            .inventory
            .iter()
            .enumerate()
            .flat_map(|(stack, items)| {
                items.iter().enumerate().map(move |(index, item)| {
                    (Locator::Inventory { stack, index }, Cow::Borrowed(item))
                })
            });
        let worn = world
            .player
            .worn
            .iter()
            .enumerate()
            .map(|(index, item)| (Locator::Worn { index }, Cow::Borrowed(item)));
        let ground = self
            .tiles
            .iter()
            .filter_map(move |pos| world.map.tile(*pos))
            .flat_map(move |tile| {
                tile.items
                    .iter()
                    .enumerate()
                    .filter(move |(_, item)| {
                        !world
                            .registry
                            .get(&item.type_id)
                            .is_some_and(|t| t.is_liquid())
                    })
                    .map(move |(index, item)| {
                        (
                            Locator::Map {
                                pos: tile.pos,
                                index,
                            },
                            Cow::Borrowed(item),
                        )
                    })
            });
        let cargo = self
            .cargo
            .iter()
            .filter_map(move |(vehicle, mount)| {
                world
                    .vehicle(*vehicle)
                    .filter(|v| v.is_stationary())
                    .and_then(|v| v.part_at(*mount))
                    .map(|part| (*vehicle, *mount, part))
            })
            .flat_map(|(vehicle, mount, part)| {
                part.items.iter().enumerate().map(move |(index, item)| {
                    (
                        Locator::VehicleCargo {
                            vehicle,
                            mount,
                            index,
                        },
                        Cow::Borrowed(item),
                    )
                })
            });
        let pseudo = move |sources: &'a [PseudoSource]| {
            sources
                .iter()
                .map(move |s| (s.locator.clone(), Cow::Owned(s.materialize(world))))
        };

        let gate = move |kind: K| mask.includes(kind);
        gate(K::Inventory)
            .then_some(inventory)
            .into_iter()
            .flatten()
            .chain(gate(K::Worn).then_some(worn).into_iter().flatten())
            .chain(
                gate(K::Bionic)
                    .then(|| pseudo(&self.bionics))
                    .into_iter()
                    .flatten(),
            )
            .chain(gate(K::Map).then_some(ground).into_iter().flatten())
            .chain(gate(K::VehicleCargo).then_some(cargo).into_iter().flatten())
            .chain(
                gate(K::VehiclePseudo)
                    .then(|| pseudo(&self.vehicle_pseudo))
                    .into_iter()
                    .flatten(),
            )
            .chain(
                gate(K::Environment)
                    .then(|| pseudo(&self.environment))
                    .into_iter()
                    .flatten(),
            )
    }

    /// The pseudo source behind a pseudo locator.
    pub fn pseudo_source(&self, locator: &Locator) -> Option<&PseudoSource> {
        self.bionics
            .iter()
            .chain(&self.vehicle_pseudo)
            .chain(&self.environment)
            .find(|s| &s.locator == locator)
    }

    /// Re-resolve a locator against the current world.
    ///
    /// Returns `None` if the slot is gone or out of reach.
    pub fn resolve<'a>(&'a self, world: &'a World, locator: &Locator) -> Option<Cow<'a, Item>> {
        match locator {
            Locator::Inventory { stack, index } => world
                .player
                .inventory
                .get(*stack)
                .and_then(|items| items.get(*index))
                .map(Cow::Borrowed),
            Locator::Worn { index } => world.player.worn.get(*index).map(Cow::Borrowed),
            Locator::Map { pos, index } => {
                if !self.tiles.contains(pos) {
                    return None;
                }
                world
                    .map
                    .tile(*pos)
                    .and_then(|t| t.items.get(*index))
                    .map(Cow::Borrowed)
            }
            Locator::VehicleCargo {
                vehicle,
                mount,
                index,
            } => {
                if !self.cargo.contains(&(*vehicle, *mount)) {
                    return None;
                }
                world
                    .vehicle(*vehicle)
                    .and_then(|v| v.part_at(*mount))
                    .and_then(|p| p.items.get(*index))
                    .map(Cow::Borrowed)
            }
            Locator::Bionic { .. }
            | Locator::VehiclePseudo { .. }
            | Locator::Environment { .. } => {
                self.pseudo_source(locator)
                    .map(|s| Cow::Owned(s.materialize(world)))
            }
        }
    }

    /// Human-readable description of where a locator points.
    pub fn describe(&self, world: &World, locator: &Locator) -> String {
        match locator {
            Locator::Inventory { .. } => "carried".to_owned(),
            Locator::Worn { .. } => "worn".to_owned(),
            Locator::Bionic { bionic } => format!("bionic {bionic}"),
            Locator::Map { pos, .. } => format!("on the ground at {pos}"),
            Locator::VehicleCargo { vehicle, .. } => format!(
                "in the cargo of {}",
                world.vehicle(*vehicle).map_or("a vehicle", |v| v.name.as_str())
            ),
            Locator::VehiclePseudo { vehicle, .. } => format!(
                "built into {}",
                world.vehicle(*vehicle).map_or("a vehicle", |v| v.name.as_str())
            ),
            Locator::Environment { pos, .. } => format!("nearby at {pos}"),
        }
    }

    // -------------------------------------------------------------------
    // Counting
    // -------------------------------------------------------------------

    /// Total contribution toward `req` from `mask`, stopping once `max` is
    /// reached.
    pub fn count(
        &self,
        world: &World,
        req: &Requirement,
        mask: SourceMask,
        max: Option<i64>,
    ) -> i64 {
        let mut total = 0_i64;
        for (_, item) in self.slots(world, mask) {
            total = total.saturating_add(req.amount_or_charges(&item));
            if max.is_some_and(|m| total >= m) {
                break;
            }
        }
        total
    }

    /// Every slot that contributes toward `req`, with the total.
    ///
    /// Idempotent while the world is unchanged.
    pub fn collect_candidates(
        &self,
        world: &World,
        req: &Requirement,
        mask: SourceMask,
    ) -> (i64, Vec<Candidate>) {
        let mut total = 0_i64;
        let mut candidates = Vec::new();
        for (locator, item) in self.slots(world, mask) {
            let available = req.amount_or_charges(&item);
            if available > 0 {
                total = total.saturating_add(available);
                candidates.push(Candidate::new(locator, req.item_type.clone(), available));
            }
        }
        (total, candidates)
    }

    /// Units of a type, up to `max`.
    pub fn amount_of(
        &self,
        world: &World,
        item_type: &ItemTypeId,
        mask: SourceMask,
        max: Option<i64>,
    ) -> i64 {
        self.count(world, &Requirement::amount(item_type.clone(), 0), mask, max)
    }

    /// Charges of a type, up to `max`.
    pub fn charges_of(
        &self,
        world: &World,
        item_type: &ItemTypeId,
        mask: SourceMask,
        max: Option<i64>,
    ) -> i64 {
        self.count(world, &Requirement::charges(item_type.clone(), 0), mask, max)
    }

    /// Whether at least `quantity` units of a type are in reach.
    pub fn has_amount(&self, world: &World, item_type: &ItemTypeId, quantity: i64) -> bool {
        self.amount_of(world, item_type, SourceMask::ALL, Some(quantity)) >= quantity
    }

    /// Whether at least `quantity` charges of a type are in reach.
    pub fn has_charges(&self, world: &World, item_type: &ItemTypeId, quantity: i64) -> bool {
        self.charges_of(world, item_type, SourceMask::ALL, Some(quantity)) >= quantity
    }

    /// Units of a type around the player (not carried), up to `max`.
    pub fn map_amount_of(&self, world: &World, item_type: &ItemTypeId, max: Option<i64>) -> i64 {
        self.amount_of(world, item_type, SourceMask::NEARBY, max)
    }

    /// Charges of a type around the player (not carried), up to `max`.
    pub fn map_charges_of(&self, world: &World, item_type: &ItemTypeId, max: Option<i64>) -> i64 {
        self.charges_of(world, item_type, SourceMask::NEARBY, max)
    }

    /// Whether at least `quantity` units of a type are around the player.
    pub fn map_has_amount(&self, world: &World, item_type: &ItemTypeId, quantity: i64) -> bool {
        self.map_amount_of(world, item_type, Some(quantity)) >= quantity
    }

    /// Whether at least `quantity` charges of a type are around the player.
    pub fn map_has_charges(&self, world: &World, item_type: &ItemTypeId, quantity: i64) -> bool {
        self.map_charges_of(world, item_type, Some(quantity)) >= quantity
    }

    /// Whether at least `amount` items with `quality` at `level` or better
    /// are in reach.
    ///
    /// Only top-level items count; worn items are not tools.
    pub fn has_items_with_quality(
        &self,
        world: &World,
        quality: &str,
        level: i32,
        amount: usize,
    ) -> bool {
        const TOOL_SOURCES: SourceMask = SourceMask::ALL.without(SourceMask::WORN);
        let found = self
            .slots(world, TOOL_SOURCES)
            .filter(|(_, item)| {
                world
                    .registry
                    .get(&item.type_id)
                    .is_some_and(|t| t.has_quality(quality, level))
            })
            .take(amount)
            .count();
        found >= amount
    }

    // -------------------------------------------------------------------
    // Type searches
    // -------------------------------------------------------------------

    /// Every item of a type in reach, including items nested in containers.
    pub fn all_items_by_type(&self, world: &World, item_type: &ItemTypeId) -> Vec<Found> {
        self.all_items_by_types(world, std::slice::from_ref(item_type))
    }

    /// Every item of any of the given types in reach.
    pub fn all_items_by_types(&self, world: &World, item_types: &[ItemTypeId]) -> Vec<Found> {
        let mut found = Vec::new();
        for (locator, item) in self.slots(world, SourceMask::ALL) {
            collect_matching(&item, item_types, &locator, &mut found);
        }
        found
    }

    /// Time factor of the best reachable tool per tool alternative-set, worst
    /// across sets. `1` when nothing applies.
    pub fn compute_time_factor(
        &self,
        world: &World,
        tools: &[Vec<RequirementSpec>],
        functions: &mut FunctionalityTable,
    ) -> Decimal {
        let mut worst: Option<Decimal> = None;
        for alternatives in tools {
            let mut best: Option<Decimal> = None;
            for spec in alternatives {
                let options: Vec<(ItemTypeId, Decimal)> = if spec.type_id.is_functionality() {
                    functions
                        .providers(&world.registry, &spec.type_id)
                        .iter()
                        .filter(|p| p.converts(RequirementKind::Amount, 1).is_some())
                        .map(|p| (p.item_type.clone(), p.functionality.time_modifier))
                        .collect()
                } else {
                    vec![(spec.type_id.clone(), Decimal::ONE)]
                };
                for (item_type, modifier) in options {
                    if self.amount_of(world, &item_type, SourceMask::ALL, Some(1)) > 0 {
                        best = Some(best.map_or(modifier, |b| b.min(modifier)));
                    }
                }
            }
            if let Some(best) = best {
                worst = Some(worst.map_or(best, |w| w.max(best)));
            }
        }
        worst.unwrap_or(Decimal::ONE)
    }
}

fn collect_matching(
    item: &Item,
    item_types: &[ItemTypeId],
    locator: &Locator,
    out: &mut Vec<Found>,
) {
    if item_types.contains(&item.type_id) {
        out.push(Found {
            locator: locator.clone(),
            item: item.clone(),
        });
    }
    for inner in &item.contents {
        collect_matching(inner, item_types, locator, out);
    }
}

#[cfg(test)]
mod tests {
    use workbench_types::{Furniture, PartFunction};
    use workbench_world::{
        GameMap, Player, Tile, Vehicle, VehiclePart, standard_registry, workshop_world,
    };

    use super::*;

    fn catalog(world: &World) -> SourceCatalog {
        SourceCatalog::new(world, Some(6), &CraftingConfig::default())
    }

    #[test]
    fn workshop_reach() {
        let world = workshop_world().unwrap_or_default();
        let cat = catalog(&world);
        let plank = ItemTypeId::from("2x4");
        // Three on the ground, two in the truck; the sealed crate is hidden.
        assert_eq!(cat.amount_of(&world, &plank, SourceMask::ALL, None), 5);
        assert_eq!(cat.map_amount_of(&world, &plank, None), 5);
        assert_eq!(cat.amount_of(&world, &plank, SourceMask::PLAYER, None), 0);
        // The saw is out of reach.
        assert!(!cat.has_amount(&world, &ItemTypeId::from("saw"), 1));
        // Nails: 40 carried plus 100 in the truck.
        assert!(cat.has_charges(&world, &ItemTypeId::from("nail"), 140));
        assert!(!cat.map_has_charges(&world, &ItemTypeId::from("nail"), 101));
        assert!(cat.map_has_amount(&world, &plank, 5));
        assert!(!cat.map_has_amount(&world, &plank, 6));
    }

    #[test]
    fn pseudo_items_expose_backing_charges() {
        let world = workshop_world().unwrap_or_default();
        let cat = catalog(&world);
        assert_eq!(
            cat.charges_of(&world, &ItemTypeId::from("welding_rig"), SourceMask::ALL, None),
            150
        );
        assert_eq!(
            cat.charges_of(&world, &ItemTypeId::from("toolset_welder"), SourceMask::ALL, None),
            50
        );
        assert_eq!(
            cat.charges_of(&world, &ItemTypeId::from("water_clean"), SourceMask::ALL, None),
            20
        );
        assert_eq!(cat.charges_of(&world, &ItemTypeId::from("fire"), SourceMask::ALL, None), 1);
        assert_eq!(cat.charges_of(&world, &ItemTypeId::from("water"), SourceMask::ALL, None), 50);
    }

    #[test]
    fn no_radius_means_player_only() {
        let world = workshop_world().unwrap_or_default();
        let cat = SourceCatalog::new(&world, None, &CraftingConfig::default());
        assert_eq!(cat.amount_of(&world, &ItemTypeId::from("2x4"), SourceMask::ALL, None), 0);
        assert_eq!(cat.charges_of(&world, &ItemTypeId::from("fire"), SourceMask::ALL, None), 0);
        assert_eq!(
            cat.charges_of(&world, &ItemTypeId::from("toolset_welder"), SourceMask::ALL, None),
            50
        );
    }

    #[test]
    fn ground_liquids_are_skipped() {
        let mut map = GameMap::new();
        map.add_item(Point::new(1, 1), Item::new("water_clean").with_charges(30));
        map.add_item(
            Point::new(1, 1),
            Item::new("bottle_plastic")
                .with_contents(vec![Item::new("water_clean").with_charges(5)]),
        );
        let mut world = World::new(standard_registry(), map, Player::default());
        let cart = Vehicle::new("cart", Point::new(2, 2)).with_part(
            VehiclePart::new(Point::new(0, 0), vec![PartFunction::Cargo])
                .with_items(vec![Item::new("water_clean").with_charges(7)]),
        );
        assert!(world.add_vehicle(cart).is_ok());
        let cat = catalog(&world);
        assert_eq!(
            cat.charges_of(&world, &ItemTypeId::from("water_clean"), SourceMask::ALL, None),
            12
        );
    }

    #[test]
    fn moving_vehicles_are_ignored() {
        let mut world = World::new(standard_registry(), GameMap::new(), Player::default());
        let mut truck = Vehicle::new("truck", Point::new(1, 0)).with_part(
            VehiclePart::new(Point::new(0, 0), vec![PartFunction::Cargo])
                .with_items(vec![Item::new("hammer")]),
        );
        truck.velocity = 10;
        assert!(world.add_vehicle(truck).is_ok());
        let cat = catalog(&world);
        assert!(!cat.has_amount(&world, &ItemTypeId::from("hammer"), 1));
    }

    #[test]
    fn candidates_are_collected_in_catalog_order() {
        let world = workshop_world().unwrap_or_default();
        let cat = catalog(&world);
        let (total, candidates) =
            cat.collect_candidates(&world, &Requirement::charges("nail", 10), SourceMask::ALL);
        assert_eq!(total, 140);
        let kinds: Vec<_> = candidates.iter().map(Candidate::kind).collect();
        assert_eq!(
            kinds,
            vec![
                workbench_types::SourceKind::Inventory,
                workbench_types::SourceKind::VehicleCargo
            ]
        );
        let again =
            cat.collect_candidates(&world, &Requirement::charges("nail", 10), SourceMask::ALL);
        assert_eq!(again, (total, candidates));
    }

    #[test]
    fn early_exit_count() {
        let world = workshop_world().unwrap_or_default();
        let cat = catalog(&world);
        let req = Requirement::amount("2x4", 1);
        assert!(cat.count(&world, &req, SourceMask::ALL, Some(2)) < 5);
    }

    #[test]
    fn nested_items_are_found_by_type() {
        let mut world = World::new(standard_registry(), GameMap::new(), Player::default());
        world.player.inventory.push(vec![
            Item::new("bottle_plastic")
                .with_contents(vec![Item::new("water_clean").with_charges(2)]),
        ]);
        world.map.set_tile(Tile::new(Point::new(0, 1)).with_furniture(Furniture::Toilet));
        let cat = catalog(&world);
        let found = cat.all_items_by_types(
            &world,
            &[ItemTypeId::from("water_clean"), ItemTypeId::from("water")],
        );
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|f| f.locator == Locator::Inventory { stack: 0, index: 0 }));
    }

    #[test]
    fn quality_search_counts_reachable_tools() {
        let world = workshop_world().unwrap_or_default();
        let cat = catalog(&world);
        assert!(cat.has_items_with_quality(&world, "HAMMER", 3, 1));
        assert!(!cat.has_items_with_quality(&world, "HAMMER", 1, 2));
        // The only saw lies out of reach.
        assert!(!cat.has_items_with_quality(&world, "SAW_W", 1, 1));
        assert!(cat.has_items_with_quality(&world, "SAW_W", 1, 0));
    }

    #[test]
    fn quality_search_skips_worn_items() {
        let mut world = World::new(standard_registry(), GameMap::new(), Player::default());
        world.player.worn.push(Item::new("hatchet"));
        world.map.add_item(Point::new(1, 1), Item::new("rock"));
        world.player.inventory.push(vec![Item::new("hammer")]);
        let cat = catalog(&world);
        assert!(cat.has_items_with_quality(&world, "HAMMER", 1, 2));
        assert!(!cat.has_items_with_quality(&world, "HAMMER", 1, 3));
        assert!(!cat.has_items_with_quality(&world, "CUT", 1, 1));
    }

    #[test]
    fn time_factor_prefers_best_reachable_tool() {
        let mut world = World::new(standard_registry(), GameMap::new(), Player::default());
        world.player.inventory.push(vec![Item::new("rock")]);
        let cat = catalog(&world);
        let mut table = FunctionalityTable::new();
        let tools = vec![vec![RequirementSpec::new("func:hammer", -1)]];
        assert_eq!(cat.compute_time_factor(&world, &tools, &mut table), Decimal::TWO);
        world.player.inventory.push(vec![Item::new("hammer")]);
        assert_eq!(cat.compute_time_factor(&world, &tools, &mut table), Decimal::ONE);
    }
}
