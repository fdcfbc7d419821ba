/// DELVE Project
/// `File` state.rs
/// `Description` Level state machine and game runtime module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::asset::AssetLoader;
use crate::cell::CellKind;
use crate::config::Config;
use crate::entity::{Entity, Passage};
use crate::level::{Level, Portal};
use crate::math::degrees_to_radians;
use crate::scheduler::{Countdown, Scheduler, TimerScope};
use crate::texture::{LoadState, TextureRegistry};
use crate::util::tick_waker::tick_waker;

/// Interaction cool-down timer id
pub const INTERACT_TIMER_ID: &str = "interact";

/// Field of view step, direction length is multiplied or divided by it
const FOV_STEP: f32 = 1.1;

/// Direction length bounds, shorter direction gives wider field of view
const MIN_DIRECTION_LENGTH: f32 = 0.5;
const MAX_DIRECTION_LENGTH: f32 = 4.0;

/// Per-tick player intents
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub interact: bool,
    pub toggle_debug: bool,
    pub toggle_minimap: bool,
    pub toggle_pause: bool,
    pub increase_resolution: bool,
    pub decrease_resolution: bool,
    pub widen_fov: bool,
    pub narrow_fov: bool,
} // struct Intents

/// Level state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    /// No level is set yet
    Starting,
    /// Level textures are loading, only the placeholder is rendered
    Loading,
    /// Level is playable
    Loaded,
} // enum GameState

/// Level portal player is placed at
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spawn {
    Entrance,
    Exit,
} // enum Spawn

/// Level switching error
#[derive(Debug, PartialEq, Eq)]
pub enum StateError {
    UnknownLevel(usize),
} // enum StateError

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(index) => f.write_fmt(format_args!("there is no level {index}")),
        }
    }
}

impl std::error::Error for StateError {}

type LoadFuture = Pin<Box<dyn Future<Output = LoadState>>>;

/// In-progress level load
struct Loading {
    futures: Vec<LoadFuture>,
    spawn: Spawn,
    /// Player is placed once every texture is resolved
    placed: bool,
    elapsed: f32,
    failed: usize,
} // struct Loading

/// Spawn cell searching function. Checks 2x2 neighbourhood of portal, portal cell first.
/// * `level` - level to search in
/// * `portal` - spawn portal
/// * Returns first walkable floor cell coordinates
pub fn find_spawn(level: &Level, portal: &Portal) -> Option<(i32, i32)> {
    [(0, 0), (-1, 0), (0, -1), (-1, -1)]
        .into_iter()
        .map(|(dx, dy)| (portal.x + dx, portal.y + dy))
        .find(|(x, y)| {
            level
                .get_cell(*x, *y)
                .is_some_and(|cell| matches!(cell.kind, CellKind::Floor) && !cell.is_solid() && !cell.is_blocked())
        })
} // fn find_spawn

/// Game runtime: owns levels, player and timers
pub struct Game<L: AssetLoader + 'static> {
    config: Config,
    levels: Vec<Level>,
    current: Option<usize>,
    registry: Rc<TextureRegistry>,
    loader: Rc<L>,
    timers: Scheduler,
    player: Entity,
    score: u32,
    state: GameState,
    loading: Option<Loading>,
    pending: Option<(usize, Spawn)>,
} // struct Game

impl<L: AssetLoader + 'static> Game<L> {
    /// Game construction function
    /// * `config` - runtime configuration
    /// * `levels` - level catalogue, indexed by level number
    /// * `registry` - texture registry every level texture is registered in
    /// * `loader` - texture image loader
    pub fn new(config: Config, levels: Vec<Level>, registry: Rc<TextureRegistry>, loader: Rc<L>) -> Self {
        Self {
            config,
            levels,
            current: None,
            registry,
            loader,
            timers: Scheduler::new(),
            player: Entity::new(0.0, 0.0),
            score: 0,
            state: GameState::Starting,
            loading: None,
            pending: None,
        }
    } // fn new

    /// Current level setting function. Starts texture loading, level becomes playable in later ticks.
    /// * `index` - level to switch to
    /// * `spawn` - portal of new level to place player at
    /// * Returns StateError if there is no such level
    pub fn set_current_level(&mut self, index: usize, spawn: Spawn) -> Result<(), StateError> {
        let Some(level) = self.levels.get(index) else {
            tracing::warn!(level = index, "ignored transition to unknown level");
            return Err(StateError::UnknownLevel(index));
        };

        let textures = level.texture_ids();
        tracing::info!(level = index, name = %level.display_name(), textures = textures.len(), ?spawn, "level load started");

        self.timers.clear_scope(TimerScope::Level);
        self.state = GameState::Loading;
        self.current = Some(index);
        self.loading = Some(Loading {
            futures: textures
                .into_iter()
                .map(|id| Box::pin(self.registry.load_texture(id, Rc::clone(&self.loader))) as LoadFuture)
                .collect(),
            spawn,
            placed: false,
            elapsed: 0.0,
            failed: 0,
        });

        Ok(())
    } // fn set_current_level

    /// Pending transition applying function, must be called once after frame update and render
    /// * Returns true if level was switched
    pub fn finish_frame(&mut self) -> bool {
        match self.pending.take() {
            Some((index, spawn)) => self.set_current_level(index, spawn).is_ok(),
            None => false,
        }
    } // fn finish_frame

    /// Game updating function
    /// * `delta` - frame time, in seconds
    /// * `intents` - player intents of this tick
    pub fn tick(&mut self, delta: f32, intents: &Intents) {
        match self.state {
            GameState::Starting => {}
            GameState::Loading => self.update_loading(delta),
            GameState::Loaded => self.update_level(delta, intents),
        }
    } // fn tick

    fn update_loading(&mut self, delta: f32) {
        let (Some(loading), Some(index)) = (self.loading.as_mut(), self.current) else {
            return;
        };

        let waker = tick_waker();
        let mut cx = Context::from_waker(&waker);
        let mut failed = 0;

        loading.futures.retain_mut(|future| match future.as_mut().poll(&mut cx) {
            Poll::Pending => true,
            Poll::Ready(LoadState::Error) => {
                failed += 1;
                false
            }
            Poll::Ready(_) => false,
        });
        loading.failed += failed;
        loading.elapsed += delta;

        if !loading.futures.is_empty() {
            return;
        }

        if !loading.placed {
            loading.placed = true;
            tracing::info!(level = index, failed = loading.failed, "level textures resolved");

            let spawn = loading.spawn;
            let level = &self.levels[index];
            let portal = match spawn {
                Spawn::Entrance => level.entrance,
                Spawn::Exit => level.exit,
            };
            self.player = Self::spawn_player(&self.player, level, &portal);
        }

        let Some(loading) = self.loading.as_ref() else {
            return;
        };
        if loading.elapsed >= self.config.min_loading {
            self.loading = None;
            self.state = GameState::Loaded;
            tracing::info!(level = index, "level loaded");
        }
    } // fn update_loading

    /// Player at portal placing function
    /// * `previous` - player before transition, its field of view is kept
    /// * Returns placed player
    fn spawn_player(previous: &Entity, level: &Level, portal: &Portal) -> Entity {
        let (x, y) = find_spawn(level, portal).unwrap_or_else(|| {
            tracing::warn!(x = portal.x, y = portal.y, "no walkable cell near portal, spawning on it");
            (portal.x, portal.y)
        });

        let mut player = Entity::new(x as f32 + 0.5, y as f32 + 0.5);
        player.scale_direction(previous.direction.length());
        player.rotate(degrees_to_radians(portal.angle));

        tracing::info!(x = player.position.x, y = player.position.y, angle = portal.angle, "player placed");
        player
    } // fn spawn_player

    fn update_level(&mut self, delta: f32, intents: &Intents) {
        let Some(index) = self.current else {
            return;
        };
        let level = &mut self.levels[index];

        self.timers.update(delta, level);

        let rotation = (intents.rotate_right as i32 - intents.rotate_left as i32) as f32;
        if rotation != 0.0 {
            self.player.rotate(rotation * self.config.rotation_speed * delta);
        }

        let speed = self.config.movement_speed / self.player.direction.length();
        if intents.forward {
            self.player.move_by(speed * delta, level);
        }
        if intents.backward {
            self.player.move_by(-speed * 0.5 * delta, level);
        }

        if intents.widen_fov || intents.narrow_fov {
            let factor = if intents.widen_fov { 1.0 / FOV_STEP } else { FOV_STEP };
            let length = self.player.direction.length() * factor;
            if (MIN_DIRECTION_LENGTH..=MAX_DIRECTION_LENGTH).contains(&length) {
                self.player.scale_direction(factor);
            }
        }

        let collected = self.player.collect_pickups(level);
        if collected > 0 {
            self.score += collected as u32 * self.config.pickup_score;
            tracing::info!(collected, score = self.score, "pickups collected");
        }

        let mut passage = level
            .cell_at(self.player.position.x, self.player.position.y)
            .is_some_and(|cell| matches!(cell.kind, CellKind::Exit))
            .then_some(Passage::Exit);

        if intents.interact && !self.timers.has(INTERACT_TIMER_ID) {
            self.timers.register(INTERACT_TIMER_ID, TimerScope::Global, Countdown::new(self.config.interact_cooldown), false);
            passage = passage.or(self.player.interact(level, &mut self.timers).passage);
        }

        if let Some(passage) = passage {
            self.queue_passage(index, passage);
        }
    } // fn update_level

    /// Level transition queueing function
    /// * `index` - current level
    /// * `passage` - passage player went through
    fn queue_passage(&mut self, index: usize, passage: Passage) {
        if self.pending.is_some() {
            return;
        }
        let level = &self.levels[index];

        let target = match passage {
            Passage::Exit => Some((level.exit.destination.unwrap_or(level.depth + 1), Spawn::Entrance)),
            Passage::Entrance => level.entrance.destination.or(level.depth.checked_sub(1)).map(|target| (target, Spawn::Exit)),
        };

        match target {
            Some(target) => {
                tracing::debug!(from = index, to = target.0, ?passage, "level transition queued");
                self.pending = Some(target);
            }
            None => tracing::warn!(from = index, ?passage, "ignored transition above the first level"),
        }
    } // fn queue_passage

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current level getting function
    pub fn level(&self) -> Option<&Level> {
        self.current.and_then(|index| self.levels.get(index))
    } // fn level

    pub fn level_index(&self) -> Option<usize> {
        self.current
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pending_transition(&self) -> Option<(usize, Spawn)> {
        self.pending
    }

    pub fn registry(&self) -> &Rc<TextureRegistry> {
        &self.registry
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
} // impl Game


// file state.rs
