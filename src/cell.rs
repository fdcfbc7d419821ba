/// DELVE Project
/// `File` cell.rs
/// `Description` Grid cell representation module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use crate::texture::TextureId;

/// Cell face
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    Top = 4,
    Bottom = 5,
} // enum Face

impl Face {
    /// Human-readable face name getting function
    pub fn name(self) -> &'static str {
        match self {
            Face::North => "North",
            Face::East => "East",
            Face::South => "South",
            Face::West => "West",
            Face::Top => "Ceiling",
            Face::Bottom => "Floor",
        }
    } // fn name
} // impl Face

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Cell property flags
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct CellProperties: u32 {
        const SOLID = 1;
        const BLOCKED = 2;
        const INTERACTIVE = 4;
        /// Wall occupying only the center plane of the cell
        const THIN = 8;
    }
}

/// Cell activator kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Activator {
    /// Flips state between 0 and 1
    Toggle,
    Increment,
    Decrement,
    /// Opens or closes door
    Door,
} // enum Activator

/// Door status
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DoorStatus {
    Open,
    Opening,
    Closing,
    Closed,
} // enum DoorStatus

/// Door-specific cell payload
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Door {
    pub status: DoorStatus,
    /// Closed percentage, 0 is fully open, 100 is fully closed
    pub percent: f32,
    /// Full open or close duration, in milliseconds
    pub speed_ms: f32,
} // struct Door

impl Door {
    /// Closed door fraction
    pub fn closed_fraction(&self) -> f32 {
        self.percent / 100.0
    }
} // impl Door

/// Cell type with type-specific payload
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CellKind {
    Floor,
    Wall,
    Door(Door),
    Entrance,
    Exit,
} // enum CellKind

/// Default door animation duration, in milliseconds
pub const DEFAULT_DOOR_SPEED_MS: f32 = 1000.0;

/// Grid cell representation structure
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    /// Texture ids, indexed by `Face`
    pub texture_ids: [TextureId; 6],
    pub properties: CellProperties,
    pub activators: Vec<Activator>,
    pub state: u32,
} // struct Cell

impl Cell {
    /// Cell construction function
    /// * `kind` - cell type
    /// * `texture_ids` - per face texture ids
    /// * `properties` - cell property flags
    /// * Returns cell without activators
    pub fn new(kind: CellKind, texture_ids: [TextureId; 6], properties: CellProperties) -> Self {
        Self {
            kind,
            texture_ids,
            properties,
            activators: Vec::new(),
            state: 0,
        }
    } // fn new

    /// Activator adding function
    pub fn with_activator(mut self, activator: Activator) -> Self {
        self.activators.push(activator);
        self
    } // fn with_activator

    pub fn floor(texture_id: TextureId) -> Self {
        Self::new(CellKind::Floor, [texture_id; 6], CellProperties::empty())
    }

    pub fn wall(texture_ids: [TextureId; 6]) -> Self {
        Self::new(CellKind::Wall, texture_ids, CellProperties::SOLID)
    }

    pub fn simple_wall(texture_id: TextureId) -> Self {
        Self::wall([texture_id; 6])
    }

    /// Walkable-looking floor cell that blocks movement
    pub fn invisible_wall(texture_id: TextureId) -> Self {
        Self::new(CellKind::Floor, [texture_id; 6], CellProperties::BLOCKED)
    }

    pub fn entrance(texture_id: TextureId) -> Self {
        Self::new(CellKind::Entrance, [texture_id; 6], CellProperties::SOLID)
    }

    pub fn exit(texture_id: TextureId) -> Self {
        Self::new(CellKind::Exit, [texture_id; 6], CellProperties::empty())
    }

    pub fn switch_toggle(texture_ids: [TextureId; 6]) -> Self {
        Self::new(CellKind::Wall, texture_ids, CellProperties::SOLID | CellProperties::INTERACTIVE).with_activator(Activator::Toggle)
    }

    pub fn simple_switch_toggle(texture_id: TextureId) -> Self {
        Self::switch_toggle([texture_id; 6])
    }

    pub fn simple_switch_cycler(texture_id: TextureId) -> Self {
        Self::new(CellKind::Wall, [texture_id; 6], CellProperties::SOLID | CellProperties::INTERACTIVE).with_activator(Activator::Increment)
    }

    pub fn thin_wall(texture_id: TextureId) -> Self {
        Self::new(CellKind::Wall, [texture_id; 6], CellProperties::SOLID | CellProperties::THIN)
    }

    /// Door construction function
    /// * `texture_id` - door texture
    /// * `speed_ms` - full open/close duration in milliseconds
    /// * Returns closed door cell
    pub fn door(texture_id: TextureId, speed_ms: f32) -> Self {
        let door = Door {
            status: DoorStatus::Closed,
            percent: 100.0,
            speed_ms,
        };

        Self::new(
            CellKind::Door(door),
            [texture_id; 6],
            CellProperties::SOLID | CellProperties::THIN | CellProperties::INTERACTIVE,
        )
        .with_activator(Activator::Door)
    } // fn door

    /// Door payload getting function
    pub fn door_data(&self) -> Option<&Door> {
        match &self.kind {
            CellKind::Door(door) => Some(door),
            _ => None,
        }
    } // fn door_data

    pub fn door_data_mut(&mut self) -> Option<&mut Door> {
        match &mut self.kind {
            CellKind::Door(door) => Some(door),
            _ => None,
        }
    } // fn door_data_mut

    fn is_open_door(&self) -> bool {
        matches!(self.kind, CellKind::Door(Door { status: DoorStatus::Open, .. }))
    }

    /// Solidity check function. Fully open doors are never solid.
    pub fn is_solid(&self) -> bool {
        self.properties.contains(CellProperties::SOLID) && !self.is_open_door()
    } // fn is_solid

    /// Movement blocking check function. Fully open doors are never blocked.
    pub fn is_blocked(&self) -> bool {
        self.properties.contains(CellProperties::BLOCKED) && !self.is_open_door()
    } // fn is_blocked

    pub fn is_interactive(&self) -> bool {
        self.properties.contains(CellProperties::INTERACTIVE)
    }

    pub fn is_thin(&self) -> bool {
        self.properties.contains(CellProperties::THIN)
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, CellKind::Door(_))
    }

    /// Entity passability check function
    pub fn is_passable(&self) -> bool {
        !self.is_solid() && !self.is_blocked()
    } // fn is_passable

    /// Face texture getting function
    pub fn texture_id(&self, face: Face) -> TextureId {
        self.texture_ids[face as usize]
    } // fn texture_id
} // impl Cell

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_solidity_depends_on_status() {
        let mut cell = Cell::door(2, 500.0);
        assert!(cell.is_solid());
        assert!(cell.is_thin());
        assert!(cell.is_interactive());

        for (status, solid) in [
            (DoorStatus::Opening, true),
            (DoorStatus::Closing, true),
            (DoorStatus::Open, false),
        ] {
            if let Some(door) = cell.door_data_mut() {
                door.status = status;
            }
            assert_eq!(cell.is_solid(), solid, "{status:?}");
        }
    }

    #[test]
    fn invisible_wall_is_blocked_but_not_solid() {
        let cell = Cell::invisible_wall(2);

        assert_eq!(cell.kind, CellKind::Floor);
        assert!(!cell.is_solid());
        assert!(cell.is_blocked());
        assert!(!cell.is_passable());
    }

    #[test]
    fn wall_faces_are_indexed_by_face() {
        let cell = Cell::wall([6, 7, 8, 9, 2, 3]);

        assert_eq!(cell.texture_id(Face::North), 6);
        assert_eq!(cell.texture_id(Face::West), 9);
        assert_eq!(cell.texture_id(Face::Top), 2);
        assert_eq!(cell.texture_id(Face::Bottom), 3);
        assert_eq!(Face::Top.to_string(), "Ceiling");
    }

    #[test]
    fn switches_carry_activators() {
        assert_eq!(Cell::simple_switch_toggle(4).activators, vec![Activator::Toggle]);
        assert_eq!(Cell::simple_switch_cycler(10).activators, vec![Activator::Increment]);
        assert_eq!(Cell::door(2, DEFAULT_DOOR_SPEED_MS).activators, vec![Activator::Door]);
        assert!(Cell::exit(1).is_passable());
        assert!(!Cell::entrance(1).is_passable());
    }
}

// file cell.rs
