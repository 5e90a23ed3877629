//! A single character drum
//!
//! The drum rests with one glyph's home row at the top of its 8-row window.
//! Planning a move fills a frame queue with absolute table positions; each
//! `draw_next()` renders one of them. The resting position is only updated
//! once the queue has been fully played.

use heapless::Vec;

use flapclock_display::{RenderSurface, SurfaceError};

use crate::config::{Order, RotationPolicy};
use crate::glyph::{GlyphSet, GLYPH_ROWS};
use crate::layout::DrumSpec;
use crate::motion::{shortest_direction, Direction, PositionTable, Row, START_PATTERN, STOP_PATTERN};

/// Frame queue capacity per drum
///
/// One full move is at most 48 stagger frames, the start pattern, one lap
/// of a 32-glyph drum and the stop pattern.
pub const MAX_FRAMES: usize = 512;

/// Move planning errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanError {
    /// Target is not in the drum's glyph set
    GlyphOutOfRange { glyph: u8, glyph_count: u8 },
    /// Frame queue cannot hold the move
    QueueFull,
}

/// One rotating character cell
#[derive(Debug, Clone)]
pub struct Drum<'a> {
    index: usize,
    x: u8,
    width: u8,
    glyphs: GlyphSet<'a>,
    table: PositionTable,
    /// Settled position
    position: u16,
    frames: Vec<u16, MAX_FRAMES>,
    /// Next frame to draw
    cursor: usize,
}

impl<'a> Drum<'a> {
    /// Create a drum at rest on glyph 0
    pub fn new(index: usize, spec: DrumSpec<'a>, order: Order) -> Self {
        let table = PositionTable::build(spec.glyphs.len() as u8, order);
        let position = table.home_of(0).unwrap_or(0);

        Self {
            index,
            x: spec.x,
            width: spec.width.min(8),
            glyphs: spec.glyphs,
            table,
            position,
            frames: Vec::new(),
            cursor: 0,
        }
    }

    /// Ordinal position in the ensemble
    pub fn index(&self) -> usize {
        self.index
    }

    /// Left column on the surface
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Columns drawn
    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn glyph_count(&self) -> u8 {
        self.table.glyph_count()
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Settled table position
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Glyph the drum is resting on
    pub fn current_glyph(&self) -> u8 {
        self.table.cell(self.position as usize).glyph
    }

    /// Position the drum will settle on once queued frames are played
    pub fn planned_position(&self) -> u16 {
        self.frames.last().copied().unwrap_or(self.position)
    }

    /// Glyph the drum will settle on once queued frames are played
    pub fn planned_glyph(&self) -> u8 {
        self.table.cell(self.planned_position() as usize).glyph
    }

    /// Full frame queue, including frames already drawn
    pub fn queued_frames(&self) -> &[u16] {
        &self.frames
    }

    /// Frames not drawn yet
    pub fn remaining_frames(&self) -> usize {
        self.frames.len() - self.cursor
    }

    /// True until `draw_next()` has reported the end of the queue
    pub fn is_moving(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Shortest way from the planned glyph to `target`
    pub fn shortest_direction(&self, target: u8) -> Direction {
        shortest_direction(
            self.planned_glyph(),
            target,
            self.table.glyph_count(),
            self.table.order(),
        )
    }

    /// Direction to use for `target` under a rotation policy
    pub fn direction_for(&self, policy: RotationPolicy, target: u8) -> Direction {
        match policy {
            RotationPolicy::Shortest => self.shortest_direction(target),
            RotationPolicy::Up => Direction::Up,
            RotationPolicy::Down => Direction::Down,
        }
    }

    /// Check that a glyph exists on this drum
    pub fn validate(&self, glyph: u8) -> Result<(), PlanError> {
        if glyph >= self.table.glyph_count() {
            return Err(PlanError::GlyphOutOfRange {
                glyph,
                glyph_count: self.table.glyph_count(),
            });
        }
        Ok(())
    }

    /// Queue a move to `target`, returning the number of frames added
    ///
    /// The move starts where the queue currently ends. Nothing is queued
    /// when `direction` is `Still` or the drum already rests on `target`.
    /// On `QueueFull` the queue is left as it was.
    pub fn plan_move(
        &mut self,
        target: u8,
        direction: Direction,
        stagger: usize,
    ) -> Result<usize, PlanError> {
        self.validate(target)?;

        let from = self.table.cell(self.planned_position() as usize);
        if direction.is_still() || from.is_home_of(target) {
            return Ok(0);
        }

        let queued = self.frames.len();
        match self.queue_move(target, direction.sign(), stagger) {
            Ok(()) => Ok(self.frames.len() - queued),
            Err(error) => {
                self.frames.truncate(queued);
                Err(error)
            }
        }
    }

    /// Drop frames queued after the first `len`
    pub(crate) fn truncate_queue(&mut self, len: usize) {
        self.frames.truncate(len.max(self.cursor));
    }

    fn queue_move(&mut self, target: u8, step: i8, stagger: usize) -> Result<(), PlanError> {
        for _ in 0..stagger {
            self.push_step(0)?;
        }

        for multiplier in START_PATTERN {
            self.push_step(multiplier * step)?;
        }

        // Home rows are unique, so this ends within one lap
        loop {
            let position = self.push_step(step)?;
            if self.table.cell(position as usize).is_home_of(target) {
                break;
            }
        }

        for multiplier in STOP_PATTERN {
            self.push_step(multiplier * step)?;
        }
        Ok(())
    }

    fn push_step(&mut self, delta: i8) -> Result<u16, PlanError> {
        let position = self.table.advance(self.planned_position(), delta);
        self.frames.push(position).map_err(|_| PlanError::QueueFull)?;
        Ok(position)
    }

    /// Render the next queued frame
    ///
    /// Returns `true` while frames were drawn. The call after the last frame
    /// settles the drum, renders the resting position, empties the queue and
    /// returns `false`; so does every call while no move is queued.
    pub fn draw_next<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        inverse: bool,
    ) -> Result<bool, SurfaceError> {
        if let Some(&frame) = self.frames.get(self.cursor) {
            self.render_at(frame, surface, inverse)?;
            self.cursor += 1;
            return Ok(true);
        }

        self.position = self.planned_position();
        self.frames.clear();
        self.cursor = 0;
        self.render_at(self.position, surface, inverse)?;
        Ok(false)
    }

    /// Redraw the settled position without touching the queue
    pub fn refresh<S: RenderSurface>(
        &self,
        surface: &mut S,
        inverse: bool,
    ) -> Result<(), SurfaceError> {
        self.render_at(self.position, surface, inverse)
    }

    /// Paint the 8-row window starting at `position`
    pub fn render_at<S: RenderSurface>(
        &self,
        position: u16,
        surface: &mut S,
        inverse: bool,
    ) -> Result<(), SurfaceError> {
        for (y, bits) in self.window(position).into_iter().enumerate() {
            for col in 0..self.width {
                let lit = bits & (1 << col) != 0;
                let x = self.x.checked_add(col).ok_or(SurfaceError::InvalidCoordinates)?;
                surface.set_pixel(x, y as u8, lit != inverse)?;
            }
        }
        Ok(())
    }

    /// Row bytes visible at `position`, masked to the drum width
    pub fn window(&self, position: u16) -> [u8; GLYPH_ROWS as usize] {
        let mask = if self.width >= 8 {
            0xFF
        } else {
            (1u8 << self.width) - 1
        };

        core::array::from_fn(|y| {
            let cell = self.table.cell(position as usize + y);
            let bits = match cell.row {
                Row::Glyph(row) => self.glyphs.get(cell.glyph).map_or(0, |g| g.row(row)),
                Row::Spacer => 0,
            };
            bits & mask
        })
    }
}
