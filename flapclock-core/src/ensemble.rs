//! Drum ensemble
//!
//! Owns the render surface and one drum per character slot. A request for a
//! new row of glyphs is planned on every drum with a cascading stagger (the
//! rightmost drum starts first), then played frame by frame until every
//! drum has settled.

use flapclock_display::{RenderSurface, SurfaceError};

use crate::config::EnsembleConfig;
use crate::drum::{Drum, PlanError};
use crate::layout::{DrumSpec, ALARM_ROWS, SYNC_FAILED_ROWS};
use crate::motion::STAGGER_FRAMES;

/// Ensemble errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnsembleError {
    /// Render surface failed
    Surface(SurfaceError),
    /// A drum rejected its target
    Plan { drum: usize, error: PlanError },
    /// Request does not have one glyph per drum
    TargetCountMismatch { expected: usize, got: usize },
}

impl From<SurfaceError> for EnsembleError {
    fn from(error: SurfaceError) -> Self {
        EnsembleError::Surface(error)
    }
}

/// Fixed row of drums drawn on one surface
pub struct Ensemble<'a, S, const N: usize> {
    surface: S,
    config: EnsembleConfig,
    drums: [Drum<'a>; N],
    alarm_enabled: bool,
    time_sync_failed: bool,
    /// Indicator visibility for the current face
    show_alarm: bool,
    show_sync: bool,
}

impl<'a, S: RenderSurface, const N: usize> Ensemble<'a, S, N> {
    /// Build the drums, each at rest on glyph 0
    ///
    /// Nothing is drawn until the first `refresh()` or move.
    pub fn new(surface: S, config: EnsembleConfig, specs: [DrumSpec<'a>; N]) -> Self {
        let drums = core::array::from_fn(|index| Drum::new(index, specs[index], config.order));

        Self {
            surface,
            config,
            drums,
            alarm_enabled: false,
            time_sync_failed: false,
            show_alarm: false,
            show_sync: false,
        }
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn drums(&self) -> &[Drum<'a>; N] {
        &self.drums
    }

    /// True while any drum still has queued frames
    pub fn is_playing(&self) -> bool {
        self.drums.iter().any(Drum::is_moving)
    }

    /// Glyph each drum is resting on
    pub fn current_glyphs(&self) -> [u8; N] {
        core::array::from_fn(|index| self.drums[index].current_glyph())
    }

    /// Set the alarm state; takes effect on the next frame or `refresh()`
    pub fn set_alarm_enabled(&mut self, enabled: bool) {
        self.alarm_enabled = enabled;
    }

    pub fn alarm_enabled(&self) -> bool {
        self.alarm_enabled
    }

    /// Set the time sync state; takes effect on the next frame or `refresh()`
    pub fn set_time_sync_failed(&mut self, failed: bool) {
        self.time_sync_failed = failed;
    }

    pub fn time_sync_failed(&self) -> bool {
        self.time_sync_failed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Zero-motion frames drum `index` waits before starting
    pub fn stagger(index: usize) -> usize {
        N.saturating_sub(index + 1) * STAGGER_FRAMES
    }

    /// Queue a move of every drum to `targets` without playing it
    ///
    /// All targets are checked before any drum is touched. If a drum cannot
    /// queue its move, every drum is rolled back and the indicator visibility
    /// is kept. Returns the length of the longest queue.
    pub fn plan_all(
        &mut self,
        targets: &[u8],
        show_alarm: bool,
        show_sync: bool,
    ) -> Result<usize, EnsembleError> {
        if targets.len() != N {
            return Err(EnsembleError::TargetCountMismatch {
                expected: N,
                got: targets.len(),
            });
        }
        for (drum, &target) in self.drums.iter().zip(targets) {
            drum.validate(target).map_err(|error| EnsembleError::Plan {
                drum: drum.index(),
                error,
            })?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("move_all_to {=[u8]}", targets);

        let queued: [usize; N] =
            core::array::from_fn(|index| self.drums[index].queued_frames().len());

        let rotation = self.config.rotation;
        for (drum, &target) in self.drums.iter_mut().zip(targets) {
            let direction = drum.direction_for(rotation, target);
            if let Err(error) = drum.plan_move(target, direction, Self::stagger(drum.index())) {
                let failed = drum.index();
                for (drum, &len) in self.drums.iter_mut().zip(queued.iter()) {
                    drum.truncate_queue(len);
                }
                return Err(EnsembleError::Plan {
                    drum: failed,
                    error,
                });
            }
        }

        self.show_alarm = show_alarm;
        self.show_sync = show_sync;

        Ok(self.drums.iter().map(Drum::remaining_frames).max().unwrap_or(0))
    }

    /// Move every drum to `targets` and block until the animation ends
    pub fn move_all_to<D>(
        &mut self,
        targets: &[u8],
        show_alarm: bool,
        show_sync: bool,
        delay: &mut D,
    ) -> Result<(), EnsembleError>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.plan_all(targets, show_alarm, show_sync)?;
        self.play(delay)
    }

    /// Move every drum to `targets`, pacing frames with an async delay
    pub async fn move_all_to_async<D>(
        &mut self,
        targets: &[u8],
        show_alarm: bool,
        show_sync: bool,
        delay: &mut D,
    ) -> Result<(), EnsembleError>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.plan_all(targets, show_alarm, show_sync)?;
        self.play_async(delay).await
    }

    /// Draw one animation frame
    ///
    /// Clears the surface, draws the indicators, advances every drum by one
    /// frame and presents. Returns `true` while any drum is still moving.
    pub fn step(&mut self) -> Result<bool, EnsembleError> {
        let inverse = self.config.inverse;
        self.surface.clear(inverse)?;
        self.draw_indicators()?;

        let mut animating = false;
        for drum in self.drums.iter_mut() {
            animating |= drum.draw_next(&mut self.surface, inverse)?;
        }

        self.surface.present()?;
        Ok(animating)
    }

    /// Play queued frames to completion, one row interval per frame
    pub fn play<D>(&mut self, delay: &mut D) -> Result<(), EnsembleError>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let mut frames = 0u32;
        loop {
            let animating = self.step()?;
            delay.delay_ms(self.config.row_interval_ms);
            frames += 1;
            if !animating {
                break;
            }
        }
        self.log_finished(frames);
        Ok(())
    }

    /// Async variant of `play()`
    pub async fn play_async<D>(&mut self, delay: &mut D) -> Result<(), EnsembleError>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let mut frames = 0u32;
        loop {
            let animating = self.step()?;
            delay.delay_ms(self.config.row_interval_ms).await;
            frames += 1;
            if !animating {
                break;
            }
        }
        self.log_finished(frames);
        Ok(())
    }

    /// Redraw settled drums and indicators without any motion
    pub fn refresh(&mut self) -> Result<(), EnsembleError> {
        let inverse = self.config.inverse;
        self.surface.clear(inverse)?;
        self.draw_indicators()?;
        for drum in self.drums.iter() {
            drum.refresh(&mut self.surface, inverse)?;
        }
        self.surface.present()?;
        Ok(())
    }

    fn draw_indicators(&mut self) -> Result<(), SurfaceError> {
        let (width, _) = self.surface.dimensions();
        let x = width.saturating_sub(1);
        let on = !self.config.inverse;

        if self.alarm_enabled && self.show_alarm {
            for y in ALARM_ROWS {
                self.surface.set_pixel(x, y, on)?;
            }
        }
        if self.time_sync_failed && self.show_sync {
            for y in SYNC_FAILED_ROWS {
                self.surface.set_pixel(x, y, on)?;
            }
        }
        Ok(())
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn log_finished(&self, frames: u32) {
        #[cfg(feature = "defmt")]
        defmt::trace!("animation finished after {} frames", frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Order, RotationPolicy};
    use crate::glyph::{digits, BLANK, COLON_TIME};
    use crate::layout::{standard_layout, DRUM_COUNT};
    use flapclock_display::FrameBuffer;

    /// Blocking delay that records every pause
    #[derive(Default)]
    struct RecordingDelay {
        pauses_ms: Vec<u32>,
    }

    impl embedded_hal::delay::DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.pauses_ms.push(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.pauses_ms.push(ms);
        }
    }

    impl embedded_hal_async::delay::DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.pauses_ms.push(ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.pauses_ms.push(ms);
        }
    }

    type Panel = FrameBuffer<4>;

    fn config(rotation: RotationPolicy) -> EnsembleConfig {
        EnsembleConfig {
            rotation,
            order: Order::Natural,
            row_interval_ms: 10,
            inverse: false,
        }
    }

    fn clock(rotation: RotationPolicy) -> Ensemble<'static, Panel, DRUM_COUNT> {
        Ensemble::new(Panel::new(), config(rotation), standard_layout())
    }

    fn digit_row(rotation: RotationPolicy) -> Ensemble<'static, Panel, 5> {
        let spec = |x| DrumSpec {
            x,
            width: 6,
            glyphs: digits(),
        };
        Ensemble::new(
            Panel::new(),
            config(rotation),
            [spec(0), spec(6), spec(12), spec(18), spec(24)],
        )
    }

    #[test]
    fn test_stagger_offsets() {
        assert_eq!(Ensemble::<Panel, 5>::stagger(0), 48);
        assert_eq!(Ensemble::<Panel, 5>::stagger(3), 12);
        assert_eq!(Ensemble::<Panel, 5>::stagger(4), 0);
    }

    #[test]
    fn test_cascade_lengths() {
        let mut ensemble = digit_row(RotationPolicy::Down);
        ensemble.plan_all(&[4, 4, 4, 4, 4], false, false).unwrap();

        let lengths: Vec<usize> = ensemble
            .drums()
            .iter()
            .map(|d| d.queued_frames().len())
            .collect();
        assert_eq!(lengths[0], lengths[4] + 48);
        for i in 0..4 {
            assert_eq!(lengths[i], lengths[i + 1] + STAGGER_FRAMES);
        }
    }

    #[test]
    fn test_move_all_to_settles_on_targets() {
        let mut ensemble = clock(RotationPolicy::Shortest);
        let mut delay = RecordingDelay::default();
        let targets = [1, 2, COLON_TIME, 3, 4];

        ensemble.move_all_to(&targets, true, true, &mut delay).unwrap();

        assert_eq!(ensemble.current_glyphs(), targets);
        assert!(!ensemble.is_playing());
        assert!(delay.pauses_ms.iter().all(|&ms| ms == 10));
    }

    #[test]
    fn test_play_paces_every_frame() {
        let mut ensemble = digit_row(RotationPolicy::Up);
        let longest = ensemble.plan_all(&[1, 1, 1, 1, 1], false, false).unwrap();

        let mut delay = RecordingDelay::default();
        ensemble.play(&mut delay).unwrap();

        // One pause per drawn frame plus the settling frame
        assert_eq!(delay.pauses_ms.len(), longest + 1);
    }

    #[test]
    fn test_play_async_matches_blocking() {
        let mut blocking = digit_row(RotationPolicy::Shortest);
        let mut nonblocking = digit_row(RotationPolicy::Shortest);
        let targets = [9, 8, 7, 6, 5];

        let mut delay_a = RecordingDelay::default();
        blocking.move_all_to(&targets, false, false, &mut delay_a).unwrap();

        let mut delay_b = RecordingDelay::default();
        embassy_futures::block_on(nonblocking.move_all_to_async(
            &targets,
            false,
            false,
            &mut delay_b,
        ))
        .unwrap();

        assert_eq!(delay_a.pauses_ms, delay_b.pauses_ms);
        assert_eq!(blocking.surface(), nonblocking.surface());
        assert_eq!(nonblocking.current_glyphs(), targets);
    }

    #[test]
    fn test_unchanged_targets_play_single_frame() {
        let mut ensemble = clock(RotationPolicy::Down);
        let mut delay = RecordingDelay::default();
        ensemble.move_all_to(&[0, 0, 0, 0, 0], false, false, &mut delay).unwrap();
        assert_eq!(delay.pauses_ms.len(), 1);
    }

    #[test]
    fn test_invalid_target_leaves_drums_untouched() {
        let mut ensemble = clock(RotationPolicy::Down);
        let result = ensemble.plan_all(&[1, 1, 1, 11, 1], false, false);

        assert_eq!(
            result,
            Err(EnsembleError::Plan {
                drum: 3,
                error: PlanError::GlyphOutOfRange {
                    glyph: 11,
                    glyph_count: 11
                }
            })
        );
        assert!(ensemble.drums().iter().all(|d| !d.is_moving()));
    }

    #[test]
    fn test_queue_full_rolls_back_every_drum() {
        let mut ensemble = digit_row(RotationPolicy::Up);

        // Fill the rightmost drum until it cannot take another move
        let mut target = 5;
        let mut filled = false;
        for _ in 0..20 {
            match ensemble.plan_all(&[0, 0, 0, 0, target], false, false) {
                Ok(_) => target = if target == 5 { 6 } else { 5 },
                Err(error) => {
                    assert_eq!(
                        error,
                        EnsembleError::Plan {
                            drum: 4,
                            error: PlanError::QueueFull
                        }
                    );
                    filled = true;
                    break;
                }
            }
        }
        assert!(filled);

        let before: Vec<usize> = ensemble
            .drums()
            .iter()
            .map(|d| d.queued_frames().len())
            .collect();
        assert_eq!(before[0], 0);

        // Drum 0 has room, drum 4 does not
        ensemble.set_alarm_enabled(true);
        let result = ensemble.plan_all(&[5, 0, 0, 0, target], true, false);
        assert_eq!(
            result,
            Err(EnsembleError::Plan {
                drum: 4,
                error: PlanError::QueueFull
            })
        );

        let after: Vec<usize> = ensemble
            .drums()
            .iter()
            .map(|d| d.queued_frames().len())
            .collect();
        assert_eq!(after, before);
        assert_eq!(ensemble.drums()[0].planned_glyph(), 0);

        // Indicator visibility from the rejected request is not applied
        ensemble.refresh().unwrap();
        assert_eq!(ensemble.surface().pixel(31, 7), Some(false));
    }

    #[test]
    fn test_is_playing_follows_queued_frames() {
        let mut ensemble = digit_row(RotationPolicy::Down);
        assert!(!ensemble.is_playing());

        ensemble.plan_all(&[1, 2, 3, 4, 5], false, false).unwrap();
        assert!(ensemble.is_playing());

        let mut delay = RecordingDelay::default();
        ensemble.play(&mut delay).unwrap();
        assert!(!ensemble.is_playing());
        assert_eq!(ensemble.current_glyphs(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_target_count_checked() {
        let mut ensemble = clock(RotationPolicy::Down);
        assert_eq!(
            ensemble.plan_all(&[1, 2, 3], false, false),
            Err(EnsembleError::TargetCountMismatch {
                expected: 5,
                got: 3
            })
        );
    }

    #[test]
    fn test_refresh_shows_indicators_without_motion() {
        let mut ensemble = clock(RotationPolicy::Down);
        let mut delay = RecordingDelay::default();
        ensemble
            .move_all_to(&[BLANK, BLANK, 0, BLANK, BLANK], true, true, &mut delay)
            .unwrap();
        assert_eq!(ensemble.surface().lit_count(), 0);

        ensemble.set_alarm_enabled(true);
        ensemble.refresh().unwrap();
        assert_eq!(ensemble.surface().pixel(31, 7), Some(true));
        assert_eq!(ensemble.surface().lit_count(), 1);

        ensemble.set_time_sync_failed(true);
        ensemble.refresh().unwrap();
        assert_eq!(ensemble.surface().pixel(31, 0), Some(true));
        assert_eq!(ensemble.surface().pixel(31, 3), Some(false));
        assert_eq!(ensemble.surface().pixel(31, 4), Some(true));
        assert_eq!(ensemble.surface().lit_count(), 5);
        assert!(!ensemble.is_playing());
    }

    #[test]
    fn test_hidden_indicators_not_drawn() {
        let mut ensemble = clock(RotationPolicy::Down);
        ensemble.set_alarm_enabled(true);
        ensemble.set_time_sync_failed(true);

        let mut delay = RecordingDelay::default();
        ensemble
            .move_all_to(&[BLANK, BLANK, 0, BLANK, BLANK], false, false, &mut delay)
            .unwrap();
        assert_eq!(ensemble.surface().lit_count(), 0);
    }

    #[test]
    fn test_inverse_background() {
        let mut ensemble = Ensemble::new(
            Panel::new(),
            EnsembleConfig {
                inverse: true,
                ..config(RotationPolicy::Down)
            },
            standard_layout(),
        );
        ensemble.set_alarm_enabled(true);
        let mut delay = RecordingDelay::default();
        ensemble
            .move_all_to(&[BLANK, BLANK, 0, BLANK, BLANK], true, false, &mut delay)
            .unwrap();

        // Everything lit except the alarm mark
        assert_eq!(ensemble.surface().lit_count(), 32 * 8 - 1);
        assert_eq!(ensemble.surface().pixel(31, 7), Some(false));
    }

    #[test]
    fn test_step_while_idle() {
        let mut ensemble = clock(RotationPolicy::Down);
        assert!(!ensemble.step().unwrap());
        // Resting on glyph 0 of the digit drums draws a zero
        assert!(ensemble.surface().lit_count() > 0);
    }
}
