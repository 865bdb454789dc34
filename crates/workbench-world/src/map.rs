//! Map tiles: ground items and terrain features.
//!
//! The [`GameMap`] is a sparse grid of [`Tile`]s keyed by [`Point`]. Tiles
//! that were never touched simply do not exist; [`GameMap::add_item`] creates
//! them on demand. Each tile carries its ground items plus the features the
//! crafting engine turns into pseudo items (fire, lava, water, toilets).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use workbench_types::{Furniture, Item, Point, Terrain};

use crate::error::WorldError;

/// One map square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Where the tile is.
    pub pos: Point,
    /// Ground type.
    #[serde(default)]
    pub terrain: Terrain,
    /// Furniture standing on the tile, if any.
    #[serde(default)]
    pub furniture: Option<Furniture>,
    /// Whether a fire field burns on the tile.
    #[serde(default)]
    pub fire: bool,
    /// Sealed tiles (closed crates, locked safes) hide their items.
    #[serde(default)]
    pub sealed: bool,
    /// Items lying on the tile.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Tile {
    /// An empty floor tile.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            terrain: Terrain::Floor,
            furniture: None,
            fire: false,
            sealed: false,
            items: Vec::new(),
        }
    }

    /// Set the terrain.
    #[must_use]
    pub const fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    /// Set the furniture.
    #[must_use]
    pub const fn with_furniture(mut self, furniture: Furniture) -> Self {
        self.furniture = Some(furniture);
        self
    }

    /// Light a fire on the tile.
    #[must_use]
    pub const fn burning(mut self) -> Self {
        self.fire = true;
        self
    }

    /// Seal the tile.
    #[must_use]
    pub const fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// Put items on the tile.
    #[must_use]
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Whether the tile offers fire (a fire field or lava).
    pub fn is_fire_source(&self) -> bool {
        self.fire || self.terrain == Terrain::Lava
    }

    /// Whether the tile offers water (open water or a toilet tank).
    pub fn is_water_source(&self) -> bool {
        self.terrain.is_water() || self.furniture == Some(Furniture::Toilet)
    }
}

/// Sparse grid of tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct GameMap {
    tiles: BTreeMap<Point, Tile>,
}

impl GameMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
        }
    }

    /// Place a tile, replacing whatever was there.
    pub fn set_tile(&mut self, tile: Tile) {
        self.tiles.insert(tile.pos, tile);
    }

    /// Get a tile.
    pub fn tile(&self, pos: Point) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    /// Get a tile mutably.
    pub fn tile_mut(&mut self, pos: Point) -> Option<&mut Tile> {
        self.tiles.get_mut(&pos)
    }

    /// Drop an item on a tile, creating a floor tile if needed.
    pub fn add_item(&mut self, pos: Point, item: Item) {
        self.tiles
            .entry(pos)
            .or_insert_with(|| Tile::new(pos))
            .items
            .push(item);
    }

    /// Every tile within `radius` (Chebyshev) of `center`, in point order.
    pub fn tiles_within(&self, center: Point, radius: u32) -> impl Iterator<Item = &Tile> {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let lo = center.offset(Point::new(r.saturating_neg(), r.saturating_neg()));
        let hi = center.offset(Point::new(r, r));
        self.tiles
            .range(lo..=hi)
            .map(|(_, tile)| tile)
            .filter(move |tile| tile.pos.square_distance(center) <= radius)
    }

    /// Borrow an item on a tile mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileNotFound`] or [`WorldError::SlotOutOfRange`].
    pub fn item_mut(&mut self, pos: Point, index: usize) -> Result<&mut Item, WorldError> {
        let tile = self
            .tiles
            .get_mut(&pos)
            .ok_or(WorldError::TileNotFound(pos))?;
        let len = tile.items.len();
        tile.items
            .get_mut(index)
            .ok_or(WorldError::SlotOutOfRange { index, len })
    }

    /// Remove an item from a tile and return it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileNotFound`] or [`WorldError::SlotOutOfRange`].
    pub fn remove_item(&mut self, pos: Point, index: usize) -> Result<Item, WorldError> {
        let tile = self
            .tiles
            .get_mut(&pos)
            .ok_or(WorldError::TileNotFound(pos))?;
        let len = tile.items.len();
        if index >= len {
            return Err(WorldError::SlotOutOfRange { index, len });
        }
        Ok(tile.items.remove(index))
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the map has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all tiles in point order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }
}

impl From<Vec<Tile>> for GameMap {
    fn from(tiles: Vec<Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().map(|t| (t.pos, t)).collect(),
        }
    }
}

impl From<GameMap> for Vec<Tile> {
    fn from(map: GameMap) -> Self {
        map.tiles.into_values().collect()
    }
}
