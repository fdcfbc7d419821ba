/// DELVE Project
/// `File` level.rs
/// `Description` Level representation and loading module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::collections::BTreeSet;

use crate::cell::{Cell, DEFAULT_DOOR_SPEED_MS};
use crate::sprite::{Sprite, SpriteProperties};
use crate::texture::TextureId;

/// Level entry/leave point
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Portal {
    pub x: i32,
    pub y: i32,
    /// Spawn heading, in degrees
    pub angle: f32,
    /// Explicit destination level index
    pub destination: Option<usize>,
} // struct Portal

impl Portal {
    pub fn new(x: i32, y: i32, angle: f32) -> Self {
        Self { x, y, angle, destination: None }
    }

    pub fn with_destination(mut self, destination: usize) -> Self {
        self.destination = Some(destination);
        self
    }
} // impl Portal

/// Level grid construction error
#[derive(Debug, PartialEq, Eq)]
pub enum LevelError {
    EmptyGrid,
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
} // enum LevelError

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGrid => f.write_str("level grid has no cells"),
            Self::RaggedRow { row, expected, actual } => {
                f.write_fmt(format_args!("level row {row} has {actual} cells, {expected} expected"))
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Level representation structure
#[derive(Clone, Debug)]
pub struct Level {
    pub depth: usize,
    pub name: Option<String>,
    pub entrance: Portal,
    pub exit: Portal,
    pub sprites: Vec<Sprite>,
    /// Floor texture used outside grid bounds
    pub floor: Option<TextureId>,
    /// Ceiling texture, ceiling is drawn as cell top faces if set
    pub ceiling: Option<TextureId>,
    pub skybox: Option<TextureId>,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
} // struct Level

impl Level {
    /// Level construction function
    /// * `depth` - level depth index
    /// * `entrance`, `exit` - level portals
    /// * `rows` - cell rows, top row first
    /// * Returns level or LevelError if grid is empty or not rectangular
    pub fn new(depth: usize, entrance: Portal, exit: Portal, rows: Vec<Vec<Cell>>) -> Result<Self, LevelError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::EmptyGrid);
        }

        if let Some((row, actual)) = rows.iter().map(Vec::len).enumerate().find(|(_, len)| *len != width) {
            return Err(LevelError::RaggedRow { row, expected: width, actual });
        }

        let height = rows.len();

        Ok(Self {
            depth,
            name: None,
            entrance,
            exit,
            sprites: Vec::new(),
            floor: None,
            ceiling: None,
            skybox: None,
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    } // fn new

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sprites(mut self, sprites: Vec<Sprite>) -> Self {
        self.sprites = sprites;
        self
    }

    pub fn with_floor(mut self, texture_id: TextureId) -> Self {
        self.floor = Some(texture_id);
        self
    }

    pub fn with_ceiling(mut self, texture_id: TextureId) -> Self {
        self.ceiling = Some(texture_id);
        self
    }

    pub fn with_skybox(mut self, texture_id: TextureId) -> Self {
        self.skybox = Some(texture_id);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    } // fn index

    /// Cell getting function
    /// * `x`, `y` - cell coordinates
    /// * Returns cell or None if coordinates are outside the grid
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|index| &self.cells[index])
    } // fn get_cell

    /// Mutable cell getting function
    pub fn get_cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|index| &mut self.cells[index])
    } // fn get_cell_mut

    /// Cell by world position getting function
    pub fn cell_at(&self, x: f32, y: f32) -> Option<&Cell> {
        self.get_cell(x.floor() as i32, y.floor() as i32)
    } // fn cell_at

    /// Iterator through cells with their coordinates getting function
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, &Cell)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, cell)| ((index % width) as i32, (index / width) as i32, cell))
    } // fn iter_cells

    /// Display name getting function
    /// * Returns level name or `Level {depth}` if it is not set
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Level {}", self.depth),
        }
    } // fn display_name

    /// Every texture referenced by the level getting function
    /// * Returns set of texture ids of cell faces, sprites and level defaults
    pub fn texture_ids(&self) -> BTreeSet<TextureId> {
        self.cells
            .iter()
            .flat_map(|cell| cell.texture_ids)
            .chain(self.sprites.iter().map(|sprite| sprite.texture_id))
            .chain(self.floor)
            .chain(self.ceiling)
            .chain(self.skybox)
            .collect()
    } // fn texture_ids
} // impl Level

/// Level text loading error representation structure
#[derive(Debug, PartialEq)]
pub enum WlvLoadingError {
    NumberParsingError(String),
    UnknownLineType(String),
    UnknownCellToken(String),
    UnknownSpriteFlag(String),
    InvalidTextureList(String),
    NotEnoughParameters(&'static str),
    MissingPortal(&'static str),
    Level(LevelError),
} // enum WlvLoadingError

impl std::fmt::Display for WlvLoadingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NumberParsingError(token) => f.write_fmt(format_args!("invalid number \"{token}\"")),
            Self::UnknownLineType(line_type) => f.write_fmt(format_args!("unknown line type \"{line_type}\"")),
            Self::UnknownCellToken(token) => f.write_fmt(format_args!("unknown cell token \"{token}\"")),
            Self::UnknownSpriteFlag(flag) => f.write_fmt(format_args!("unknown sprite flag \"{flag}\"")),
            Self::InvalidTextureList(token) => f.write_fmt(format_args!("cell \"{token}\" needs one or six texture ids")),
            Self::NotEnoughParameters(line_type) => f.write_fmt(format_args!("not enough parameters for \"{line_type}\"")),
            Self::MissingPortal(portal) => f.write_fmt(format_args!("level has no {portal}")),
            Self::Level(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for WlvLoadingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Level(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LevelError> for WlvLoadingError {
    fn from(value: LevelError) -> Self {
        Self::Level(value)
    }
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T, WlvLoadingError> {
    token.parse::<T>().map_err(|_| WlvLoadingError::NumberParsingError(token.to_string()))
}

fn parse_portal<'a>(line_type: &'static str, mut elem: impl Iterator<Item = &'a str>) -> Result<Portal, WlvLoadingError> {
    let ((sx, sy), sa) = elem.next().zip(elem.next()).zip(elem.next()).ok_or(WlvLoadingError::NotEnoughParameters(line_type))?;

    Ok(Portal {
        x: parse_number(sx)?,
        y: parse_number(sy)?,
        angle: parse_number(sa)?,
        destination: elem.next().map(parse_number).transpose()?,
    })
} // fn parse_portal

/// Cell token parsing function
/// * `token` - kind letter, one or six comma-separated texture ids and optional `@speed` for doors
fn parse_cell(token: &str) -> Result<Cell, WlvLoadingError> {
    let mut chars = token.chars();
    let kind = chars.next().ok_or_else(|| WlvLoadingError::UnknownCellToken(token.to_string()))?;
    let rest = chars.as_str();

    let (ids, speed) = match rest.split_once('@') {
        Some((ids, speed)) => (ids, Some(parse_number::<f32>(speed)?)),
        None => (rest, None),
    };

    let ids = ids.split(',').map(parse_number::<TextureId>).collect::<Result<Vec<_>, _>>()?;
    let texture_ids: [TextureId; 6] = match ids.as_slice() {
        &[id] => [id; 6],
        &[n, e, s, w, t, b] => [n, e, s, w, t, b],
        _ => return Err(WlvLoadingError::InvalidTextureList(token.to_string())),
    };

    let mut cell = match kind {
        'f' => Cell::floor(0),
        'w' => Cell::wall(texture_ids),
        'i' => Cell::invisible_wall(0),
        't' => Cell::switch_toggle(texture_ids),
        'c' => Cell::simple_switch_cycler(0),
        'n' => Cell::thin_wall(0),
        'd' => Cell::door(0, speed.unwrap_or(DEFAULT_DOOR_SPEED_MS)),
        'e' => Cell::entrance(0),
        'x' => Cell::exit(0),
        _ => return Err(WlvLoadingError::UnknownCellToken(token.to_string())),
    };

    if speed.is_some() && kind != 'd' {
        return Err(WlvLoadingError::UnknownCellToken(token.to_string()));
    }

    cell.texture_ids = texture_ids;
    Ok(cell)
} // fn parse_cell

impl Level {
    /// Level from .wlv file loading function
    /// * `source` - file text
    /// * Returns valid Level or WlvLoadingError
    pub fn load_from_wlv(source: &str) -> Result<Level, WlvLoadingError> {
        let mut name = None;
        let mut depth = 0usize;
        let mut entrance = None;
        let mut exit = None;
        let mut floor = None;
        let mut ceiling = None;
        let mut skybox = None;
        let mut rows = Vec::<Vec<Cell>>::new();
        let mut sprites = Vec::<Sprite>::new();

        for line in source.lines().map(|line| line.trim()) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut elem = line.split_whitespace();
            let line_type = match elem.next() {
                Some(s) => s,
                None => continue,
            };

            match line_type {
                "name" => {
                    let rest = line["name".len()..].trim();
                    if rest.is_empty() {
                        return Err(WlvLoadingError::NotEnoughParameters("name"));
                    }
                    name = Some(rest.to_string());
                }

                "depth" => {
                    depth = parse_number(elem.next().ok_or(WlvLoadingError::NotEnoughParameters("depth"))?)?;
                }

                "entrance" => entrance = Some(parse_portal("entrance", elem)?),
                "exit" => exit = Some(parse_portal("exit", elem)?),

                "floor" => floor = Some(parse_number(elem.next().ok_or(WlvLoadingError::NotEnoughParameters("floor"))?)?),
                "ceiling" => ceiling = Some(parse_number(elem.next().ok_or(WlvLoadingError::NotEnoughParameters("ceiling"))?)?),
                "skybox" => skybox = Some(parse_number(elem.next().ok_or(WlvLoadingError::NotEnoughParameters("skybox"))?)?),

                "row" => {
                    let row = elem.map(parse_cell).collect::<Result<Vec<Cell>, _>>()?;
                    if row.is_empty() {
                        return Err(WlvLoadingError::NotEnoughParameters("row"));
                    }
                    rows.push(row);
                }

                "sprite" => {
                    let (((sx, sy), st), ss) = elem.next()
                        .zip(elem.next())
                        .zip(elem.next())
                        .zip(elem.next())
                        .ok_or(WlvLoadingError::NotEnoughParameters("sprite"))?;

                    let mut properties = SpriteProperties::TINT;
                    for flag in elem {
                        match flag {
                            "notint" => properties.remove(SpriteProperties::TINT),
                            "top" => properties.insert(SpriteProperties::ALIGN_TOP),
                            "bottom" => properties.insert(SpriteProperties::ALIGN_BOTTOM),
                            "static" => properties.insert(SpriteProperties::STATIC),
                            _ => return Err(WlvLoadingError::UnknownSpriteFlag(flag.to_string())),
                        }
                    }

                    sprites.push(Sprite::no_tint(parse_number(sx)?, parse_number(sy)?, parse_number(st)?, parse_number(ss)?, properties));
                }

                _ => return Err(WlvLoadingError::UnknownLineType(line_type.to_string())),
            }
        }

        let entrance = entrance.ok_or(WlvLoadingError::MissingPortal("entrance"))?;
        let exit = exit.ok_or(WlvLoadingError::MissingPortal("exit"))?;

        let mut level = Level::new(depth, entrance, exit, rows)?.with_sprites(sprites);
        level.name = name;
        level.floor = floor;
        level.ceiling = ceiling;
        level.skybox = skybox;

        Ok(level)
    } // fn load_from_wlv
} // impl Level


// file level.rs
