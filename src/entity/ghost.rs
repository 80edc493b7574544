//! Ghost entity implementation.
//!
//! Every archetype shares one movement routine: ghosts only decide at turning points, never
//! reverse on their own, and pick among the open neighbours by mode. The archetype only supplies
//! a chase target (see [`crate::entity::strategy`]) and a scatter anchor.

use bevy_ecs::component::Component;
use glam::{IVec2, Vec2};
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::constants::Ticks;
use crate::entity::body::{Body, Openings};
use crate::entity::mode::{GhostMode, ModeChange, ModeController, ModeDurations, ModeTrigger};
use crate::entity::strategy::{select_direction, Ambivalent, Ambush, DirectChase, Flank, Pursuit, TargetStrategy};
use crate::map::direction::Direction;
use crate::map::grid::{distance, tile_center, WallMap};

/// The four ghost archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GhostType {
    Red,
    Pink,
    Blue,
    Orange,
}

impl GhostType {
    /// The ghost whose position the flanking strategy pivots around.
    pub const FLANK_PARTNER: GhostType = GhostType::Red;

    /// The fixed tile this ghost retreats to while scattering.
    pub fn scatter_anchor(self) -> IVec2 {
        match self {
            GhostType::Red => IVec2::new(25, 0),
            GhostType::Pink => IVec2::new(2, 0),
            GhostType::Blue => IVec2::new(27, 35),
            GhostType::Orange => IVec2::new(0, 35),
        }
    }

    /// Spawn point, in tile units.
    fn spawn_tile(self) -> Vec2 {
        match self {
            GhostType::Red => Vec2::new(14.0, 14.5),
            GhostType::Pink => Vec2::new(14.5, 17.5),
            GhostType::Blue => Vec2::new(12.5, 17.5),
            GhostType::Orange => Vec2::new(15.5, 17.5),
        }
    }

    pub fn initial_direction(self) -> Direction {
        match self {
            GhostType::Red => Direction::Left,
            _ => Direction::Up,
        }
    }

    pub fn spawn(self, config: &EngineConfig) -> GhostSpawn {
        GhostSpawn {
            position: self.spawn_tile() * config.tile_size,
            direction: self.initial_direction(),
            scatter_anchor: self.scatter_anchor(),
        }
    }

    /// The chase strategy this archetype is known for.
    pub fn strategy(self, config: &EngineConfig) -> Box<dyn TargetStrategy> {
        match self {
            GhostType::Red => Box::new(DirectChase),
            GhostType::Pink => Box::new(Ambush {
                lead_tiles: config.ambush_lead_tiles,
            }),
            GhostType::Blue => Box::new(Flank {
                lead_tiles: config.flank_lead_tiles,
            }),
            GhostType::Orange => Box::new(Ambivalent {
                radius_tiles: config.ambivalent_radius_tiles,
            }),
        }
    }
}

/// Where and how a ghost starts out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSpawn {
    /// World position.
    pub position: Vec2,
    pub direction: Direction,
    pub scatter_anchor: IVec2,
}

/// Per-tick inputs a ghost reads from the rest of the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostContext {
    pub tick: Ticks,
    pub player_position: Vec2,
    pub player_facing: Option<Direction>,
    /// Position of [`GhostType::FLANK_PARTNER`], if it exists.
    pub partner_position: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostEvent {
    DirectionChanged(Direction),
    ModeChanged(ModeChange),
    /// An eaten ghost reached home and resumed its normal mode.
    Respawned,
}

pub type GhostEvents = SmallVec<[GhostEvent; 4]>;

/// How the ghost should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostVisual {
    Normal,
    Frightened,
    Eaten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GhostAnimation {
    pub direction: Direction,
    pub visual: GhostVisual,
}

/// A ghost agent.
#[derive(Component, Debug)]
pub struct Ghost {
    ghost_type: GhostType,
    strategy: Box<dyn TargetStrategy>,
    spawn: GhostSpawn,
    direction: Direction,
    modes: ModeController,
    first_move: bool,
    /// No optional turn is taken before this tick.
    turn_lock: Option<Ticks>,
    marker: IVec2,
    config: EngineConfig,
}

impl Ghost {
    pub fn new(ghost_type: GhostType, spawn: GhostSpawn, strategy: Box<dyn TargetStrategy>, config: &EngineConfig) -> Self {
        Self {
            ghost_type,
            strategy,
            spawn,
            direction: spawn.direction,
            modes: ModeController::new(Self::durations(config)),
            first_move: true,
            turn_lock: None,
            marker: Body::new(spawn.position).marker(config.tile_size),
            config: *config,
        }
    }

    /// A ghost with its archetype's usual spawn, anchor and strategy.
    pub fn standard(ghost_type: GhostType, config: &EngineConfig) -> Self {
        Self::new(ghost_type, ghost_type.spawn(config), ghost_type.strategy(config), config)
    }

    fn durations(config: &EngineConfig) -> ModeDurations {
        ModeDurations {
            scatter: config.ticks(config.scatter_duration),
            chase: config.ticks(config.chase_duration),
            frighten: config.ticks(config.frighten_duration),
        }
    }

    /// A body placed at this ghost's spawn point.
    pub fn spawn_body(&self) -> Body {
        Body::new(self.spawn.position)
    }

    pub fn ghost_type(&self) -> GhostType {
        self.ghost_type
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> GhostMode {
        self.modes.mode()
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    /// The tile the ghost occupied at its last update.
    pub fn marker(&self) -> IVec2 {
        self.marker
    }

    pub fn scatter_anchor(&self) -> IVec2 {
        self.spawn.scatter_anchor
    }

    /// Current speed, in world units per second.
    pub fn speed(&self) -> f32 {
        let factor = match self.modes.mode() {
            GhostMode::Frightened => self.config.frightened_speed_factor,
            GhostMode::Eaten => self.config.eaten_speed_factor,
            GhostMode::Scatter | GhostMode::Chase => 1.0,
        };
        self.config.ghost_speed * factor
    }

    pub fn animation(&self) -> GhostAnimation {
        let visual = match self.modes.mode() {
            GhostMode::Frightened => GhostVisual::Frightened,
            GhostMode::Eaten => GhostVisual::Eaten,
            GhostMode::Scatter | GhostMode::Chase => GhostVisual::Normal,
        };
        GhostAnimation {
            direction: self.direction,
            visual,
        }
    }

    /// Whether a recent turn still forbids another decision.
    pub fn is_turn_locked(&self, now: Ticks) -> bool {
        self.turn_lock.is_some_and(|until| now < until)
    }

    /// Restores the spawn state, as at level start.
    pub fn reset(&mut self, body: &mut Body) {
        self.direction = self.spawn.direction;
        self.modes = ModeController::new(Self::durations(&self.config));
        self.first_move = true;
        self.turn_lock = None;
        body.reset(self.spawn.position);
        self.marker = body.marker(self.config.tile_size);
    }

    /// The player ate a power pellet.
    pub fn frighten(&mut self, body: &mut Body, now: Ticks) -> Option<GhostEvent> {
        let change = self.modes.apply(ModeTrigger::Frighten, now)?;
        self.on_mode_change(change, body);
        Some(GhostEvent::ModeChanged(change))
    }

    /// The player caught this ghost.
    pub fn eaten(&mut self, body: &mut Body, now: Ticks) -> Option<GhostEvent> {
        let change = self.modes.apply(ModeTrigger::Eaten, now)?;
        self.on_mode_change(change, body);
        Some(GhostEvent::ModeChanged(change))
    }

    fn on_mode_change(&mut self, change: ModeChange, body: &mut Body) {
        debug!(ghost = self.ghost_type.as_ref(), from = change.from.as_ref(), to = change.to.as_ref(), reverse = change.reverse, "Ghost mode changed");
        if self.first_move {
            return;
        }
        if change.reverse {
            self.direction = self.direction.opposite();
            self.turn_lock = None;
        }
        body.steer(self.direction, self.speed());
    }

    /// Neighbours this ghost may enter. The pen door opens upward for everyone and both ways
    /// for eaten ghosts heading home.
    fn openings(&self, walls: &impl WallMap) -> Openings {
        let eaten = self.modes.mode() == GhostMode::Eaten;
        Openings::probe(self.marker, |tile, direction| {
            walls.is_wall(tile) && !(walls.is_door(tile) && (eaten || direction == Direction::Up))
        })
    }

    /// Runs one tick of the ghost's decision logic.
    pub fn update(&mut self, body: &mut Body, walls: &impl WallMap, context: &GhostContext, rng: &mut impl Rng) -> GhostEvents {
        let mut events = GhostEvents::new();
        let tile_size = self.config.tile_size;

        body.wrap_horizontal(self.config.screen_width());

        if let Some(change) = self.modes.tick(context.tick) {
            self.on_mode_change(change, body);
            events.push(GhostEvent::ModeChanged(change));
        }

        self.marker = body.marker(tile_size);

        if self.modes.mode() == GhostMode::Eaten && self.marker == self.config.home_tile {
            if let Some(change) = self.modes.apply(ModeTrigger::ReachedHome, context.tick) {
                self.on_mode_change(change, body);
                events.push(GhostEvent::ModeChanged(change));
                events.push(GhostEvent::Respawned);
            }
        }

        if self.first_move {
            self.change_direction(self.spawn.direction, body, context.tick, &mut events);
            self.first_move = false;
        }

        let openings = self.openings(walls);
        let turning_point = tile_center(self.marker, tile_size);
        if !body.is_near(turning_point, self.config.ghost_turn_tolerance) {
            return events;
        }

        // A locked ghost still turns away from a wall rather than walking into it.
        let blocked = !openings.allows(self.direction);
        if self.is_turn_locked(context.tick) && !blocked {
            return events;
        }

        let legal = openings.without(self.direction.opposite());
        if legal.count() > 1 || blocked {
            match self.choose_direction(legal, body, context, rng) {
                Some(direction) => self.change_direction(direction, body, context.tick, &mut events),
                None => warn!(ghost = self.ghost_type.as_ref(), marker = ?self.marker, "Ghost has no legal direction, keeping velocity"),
            }
        }

        events
    }

    fn choose_direction(&self, legal: Openings, body: &Body, context: &GhostContext, rng: &mut impl Rng) -> Option<Direction> {
        let tile_size = self.config.tile_size;
        let candidate = |direction: Direction| tile_center(self.marker + direction.as_ivec2(), tile_size);
        let scored = |target: Vec2| legal.directions().map(move |d| (d, distance(candidate(d), target)));

        let leaving_house = self.modes.mode() != GhostMode::Eaten && self.config.in_house(self.marker);

        let chosen = match self.modes.mode() {
            _ if leaving_house => select_direction(scored(self.house_exit())),
            GhostMode::Frightened => {
                let options: SmallVec<[Direction; 4]> = legal.directions().collect();
                options.choose(rng).copied()
            }
            GhostMode::Eaten => select_direction(scored(tile_center(self.config.home_tile, tile_size))),
            GhostMode::Scatter => select_direction(scored(tile_center(self.spawn.scatter_anchor, tile_size))),
            GhostMode::Chase => {
                let pursuit = Pursuit {
                    ghost_position: body.position,
                    player_position: context.player_position,
                    player_facing: context.player_facing,
                    partner_position: context.partner_position,
                    scatter_anchor: tile_center(self.spawn.scatter_anchor, tile_size),
                    tile_size,
                };
                select_direction(
                    legal
                        .directions()
                        .map(|d| (d, self.strategy.badness(candidate(d), &pursuit))),
                )
            }
        };

        trace!(ghost = self.ghost_type.as_ref(), mode = self.modes.mode().as_ref(), marker = ?self.marker, legal = ?legal, leaving_house, chosen = ?chosen, "Ghost decision");
        chosen
    }

    /// The doorway above the gate tiles, where ghosts in the pen aim until they are out.
    fn house_exit(&self) -> Vec2 {
        let tile_size = self.config.tile_size;
        let [left, right] = self.config.gate_tiles;
        (tile_center(left, tile_size) + tile_center(right, tile_size)) / 2.0 + Direction::Up.as_vec2() * tile_size
    }

    /// Commits to a heading. Except on the very first move, the ghost is snapped onto the turning
    /// point and further optional turns are locked for the cooldown.
    fn change_direction(&mut self, direction: Direction, body: &mut Body, now: Ticks, events: &mut GhostEvents) {
        // Eaten ghosts are exempt: they enter the pen through a gate tile on the way home.
        let direction = if self.config.is_gate(self.marker) && self.modes.mode() != GhostMode::Eaten {
            Direction::Up
        } else {
            direction
        };

        if !self.first_move {
            body.position = tile_center(self.marker, self.config.tile_size);
            self.turn_lock = Some(now + self.config.ticks(self.config.turn_cooldown));
        }

        body.steer(direction, self.speed());

        if self.first_move || direction != self.direction {
            events.push(GhostEvent::DirectionChanged(direction));
        }
        self.direction = direction;
    }
}
