//! Bounce physics for image/video entities.

use std::time::Duration;

use rand::Rng;

use super::Viewport;

/// Side length of an entity's square box, in pixels
pub const ENTITY_SIZE: f64 = 150.0;

/// One physics step per display frame
pub const BOUNCE_TICK: Duration = Duration::from_millis(16);

const MIN_SPEED: f64 = 2.0;
const MAX_SPEED: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Media entity moving across the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct BouncingEntity {
    pub id: u64,
    pub kind: EntityKind,
    pub content: String,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BouncingEntity {
    /// Place a new entity at a random position fully inside the viewport
    ///
    /// Each velocity component has a random magnitude in [2, 6) px/tick and a
    /// random sign.
    pub fn spawn(
        id: u64,
        kind: EntityKind,
        content: String,
        viewport: Viewport,
        rng: &mut impl Rng,
    ) -> Self {
        let max_x = free_span(viewport.width);
        let max_y = free_span(viewport.height);
        Self {
            id,
            kind,
            content,
            position: Vec2::new(rng.random_range(0.0..=max_x), rng.random_range(0.0..=max_y)),
            velocity: Vec2::new(random_component(rng), random_component(rng)),
        }
    }

    /// Advance one tick
    ///
    /// For each axis, if the next position would leave the viewport the
    /// velocity component is negated before the move is applied.
    pub fn step(&mut self, viewport: Viewport) {
        let next_x = self.position.x + self.velocity.x;
        if next_x < 0.0 || next_x + ENTITY_SIZE > viewport.width {
            self.velocity.x = -self.velocity.x;
        }
        let next_y = self.position.y + self.velocity.y;
        if next_y < 0.0 || next_y + ENTITY_SIZE > viewport.height {
            self.velocity.y = -self.velocity.y;
        }
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
    }
}

/// Room left for an entity's top-left corner along one axis
fn free_span(extent: f64) -> f64 {
    if !extent.is_finite() {
        return 0.0;
    }
    (extent.min(Viewport::MAX_DIMENSION) - ENTITY_SIZE).max(0.0)
}

fn random_component(rng: &mut impl Rng) -> f64 {
    let magnitude = rng.random_range(MIN_SPEED..MAX_SPEED);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// All live entities of one viewer
#[derive(Debug)]
pub struct BounceField {
    viewport: Viewport,
    entities: Vec<BouncingEntity>,
    next_id: u64,
}

impl BounceField {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Append one entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, content: String, rng: &mut impl Rng) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities
            .push(BouncingEntity::spawn(id, kind, content, self.viewport, rng));
        id
    }

    pub fn tick(&mut self) {
        let viewport = self.viewport;
        for entity in &mut self.entities {
            entity.step(viewport);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Adopt a new viewport and pull entities left outside it back in
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let max_x = free_span(viewport.width);
        let max_y = free_span(viewport.height);
        for entity in &mut self.entities {
            entity.position.x = entity.position.x.clamp(0.0, max_x);
            entity.position.y = entity.position.y.clamp(0.0, max_y);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[BouncingEntity] {
        &self.entities
    }
}
