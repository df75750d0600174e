//! Scroll-indexed section blending.
//!
//! A [`SectionTable`] tiles scroll progress `[0, 1]` with contiguous,
//! half-open `[start, end)` bands (the last band is closed). Each band
//! carries the [`VisualState`] at its start and at its end; evaluation
//! interpolates between the two.
//!
//! Evaluation is a pure function of the progress value and the table, so it
//! is safe to call every frame whether or not the page actually scrolled.
//! Bands may also carry [`SectionEffects`], time-driven overlays (glow
//! pulses, hue cycles, flickering lights) that
//! [`SectionTable::evaluate_at`] layers on top of the blended state.

use std::borrow::Cow;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::oscillator::Oscillator;
use crate::errors::{Result, WraithError};
use crate::scene::{Color, Hsl};

/// Model pose, material and light targets at one point of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    /// Light intensities by light name.
    #[serde(default)]
    pub lights: FxHashMap<String, f32>,
}

impl VisualState {
    /// Interpolates every numeric field linearly and the emissive color in
    /// HSL. `t <= 0` and `t >= 1` return the endpoints exactly.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return other.clone();
        }

        let lights = self
            .lights
            .iter()
            .map(|(name, &from)| {
                let to = other.lights.get(name).copied().unwrap_or(from);
                (name.clone(), lerp(from, to, t))
            })
            .collect();

        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
            scale: lerp(self.scale, other.scale, t),
            emissive: self.emissive.blend_hsl(other.emissive, t),
            emissive_intensity: lerp(self.emissive_intensity, other.emissive_intensity, t),
            lights,
        }
    }

    #[must_use]
    pub fn with_light(mut self, name: &str, intensity: f32) -> Self {
        self.lights.insert(name.to_string(), intensity);
        self
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            lights: FxHashMap::default(),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Emissive color whose hue walks a range over time instead of following
/// the blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueCycle {
    /// Hue at the start of a cycle, in turns.
    pub base: f32,
    /// Hue range one cycle covers, in turns.
    pub span: f32,
    /// Cycles per second.
    pub rate: f32,
    /// Cycles covered by scrolling through the whole band.
    #[serde(default)]
    pub sweep: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HueCycle {
    #[must_use]
    pub fn color(&self, time: f64, local: f32) -> Color {
        let turns = (time * f64::from(self.rate)).rem_euclid(1.0) as f32 + local * self.sweep;
        let hue = self.base + self.span * turns.rem_euclid(1.0);
        Hsl::new(hue.rem_euclid(1.0), self.saturation, self.lightness).to_rgb()
    }
}

/// Time-driven overlays a band adds to its blended [`VisualState`].
///
/// Effects are sampled from the band enclosing the current progress only,
/// so a band without effects holds its blended values perfectly still.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionEffects {
    /// Added to the emissive intensity.
    #[serde(default)]
    pub emissive_pulse: Option<Oscillator>,
    /// Replaces the blended emissive color.
    #[serde(default)]
    pub hue_cycle: Option<HueCycle>,
    /// Added to the intensity of the named lights the band drives.
    #[serde(default)]
    pub lights: FxHashMap<String, Oscillator>,
    /// Phase, in radians, every light oscillator gains across the band.
    #[serde(default)]
    pub light_sweep: f32,
}

impl SectionEffects {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emissive_pulse.is_none() && self.hue_cycle.is_none() && self.lights.is_empty()
    }

    /// Layers the effects at `time` onto `state`. `local` is the progress
    /// inside the band.
    pub fn apply(&self, state: &mut VisualState, time: f64, local: f32) {
        if let Some(pulse) = self.emissive_pulse {
            state.emissive_intensity = (state.emissive_intensity + pulse.sample(time)).max(0.0);
        }
        if let Some(cycle) = self.hue_cycle {
            state.emissive = cycle.color(time, local);
        }

        let shift = local * self.light_sweep;
        for (name, wave) in &self.lights {
            if let Some(intensity) = state.lights.get_mut(name) {
                *intensity = (*intensity + wave.sample_shifted(time, shift)).max(0.0);
            }
        }
    }
}

/// A named scroll band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: Cow<'static, str>,
    pub start: f32,
    pub end: f32,
    pub from: VisualState,
    pub to: VisualState,
    #[serde(default, skip_serializing_if = "SectionEffects::is_empty")]
    pub effects: SectionEffects,
}

impl Section {
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        start: f32,
        end: f32,
        from: VisualState,
        to: VisualState,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            from,
            to,
            effects: SectionEffects::default(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: SectionEffects) -> Self {
        self.effects = effects;
        self
    }

    /// A band that holds one state for its whole range.
    #[must_use]
    pub fn constant(
        name: impl Into<Cow<'static, str>>,
        start: f32,
        end: f32,
        state: VisualState,
    ) -> Self {
        Self::new(name, start, end, state.clone(), state)
    }

    /// Position inside the band in `[0, 1]`; zero-width bands report 0.
    #[must_use]
    pub fn local_progress(&self, progress: f32) -> f32 {
        let width = self.end - self.start;
        if width <= f32::EPSILON || progress <= self.start {
            return 0.0;
        }
        if progress >= self.end {
            return 1.0;
        }
        ((progress - self.start) / width).clamp(0.0, 1.0)
    }
}

/// Absolute tolerance when checking that adjacent bands meet.
const CONTIGUITY_EPSILON: f32 = 1e-5;

/// Validated, ordered list of sections covering `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    /// Validates and wraps `sections`.
    ///
    /// # Errors
    ///
    /// Fails on an empty table, non-finite or inverted bounds, gaps or
    /// overlaps between neighbours, a table that does not start at 0 or end
    /// at 1, or a section whose two states name different lights.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
            return Err(WraithError::EmptySections);
        };

        if first.start.abs() > CONTIGUITY_EPSILON {
            let reason = format!("table starts at {} instead of 0", first.start);
            return Err(WraithError::section(&first.name, reason));
        }
        if (last.end - 1.0).abs() > CONTIGUITY_EPSILON {
            let reason = format!("table ends at {} instead of 1", last.end);
            return Err(WraithError::section(&last.name, reason));
        }

        for section in &sections {
            if !section.start.is_finite() || !section.end.is_finite() {
                return Err(WraithError::section(&section.name, "non-finite range bound"));
            }
            if section.end < section.start {
                return Err(WraithError::section(
                    &section.name,
                    format!("inverted range [{}, {})", section.start, section.end),
                ));
            }
            let same_lights = section.from.lights.len() == section.to.lights.len()
                && section.from.lights.keys().all(|k| section.to.lights.contains_key(k));
            if !same_lights {
                return Err(WraithError::section(
                    &section.name,
                    "start and end states drive different lights",
                ));
            }
        }

        for pair in sections.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let seam = next.start - prev.end;
            if seam > CONTIGUITY_EPSILON {
                return Err(WraithError::section(
                    &next.name,
                    format!("gap after '{}' ({} .. {})", prev.name, prev.end, next.start),
                ));
            }
            if seam < -CONTIGUITY_EPSILON {
                return Err(WraithError::section(
                    &next.name,
                    format!("overlaps '{}' ({} < {})", prev.name, next.start, prev.end),
                ));
            }
        }

        Ok(Self { sections })
    }

    /// A table with a single band holding `state` everywhere.
    #[must_use]
    pub fn uniform(state: VisualState) -> Self {
        Self {
            sections: vec![Section::constant("Static", 0.0, 1.0, state)],
        }
    }

    /// Index of the band enclosing `progress`. Boundaries resolve to the
    /// band being entered; `1.0` resolves to the last band.
    #[must_use]
    pub fn index_at(&self, progress: f32) -> usize {
        let p = clamp_progress(progress);
        let idx = self.sections.partition_point(|s| s.end <= p);
        idx.min(self.sections.len() - 1)
    }

    #[must_use]
    pub fn section_at(&self, progress: f32) -> &Section {
        &self.sections[self.index_at(progress)]
    }

    /// Visual targets at `progress`.
    #[must_use]
    pub fn evaluate(&self, progress: f32) -> VisualState {
        let p = clamp_progress(progress);
        let section = self.section_at(p);
        section.from.lerp(&section.to, section.local_progress(p))
    }

    /// [`evaluate`](Self::evaluate) with the enclosing band's effects
    /// sampled at `time` seconds.
    #[must_use]
    pub fn evaluate_at(&self, progress: f32, time: f64) -> VisualState {
        let p = clamp_progress(progress);
        let section = self.section_at(p);
        let local = section.local_progress(p);
        let mut state = section.from.lerp(&section.to, local);
        section.effects.apply(&mut state, time, local);
        state
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The five-band page timeline: Hero, Features, Showcase, Premium and
    /// Finale, each a fifth of the scroll range.
    #[must_use]
    pub fn canonical() -> Self {
        // position, rotation y, scale, emissive, emissive intensity, lights
        let hero_start = key(
            Vec3::ZERO,
            0.0,
            4.0,
            0x7c3aed,
            0.4,
            [6.0, 5.0, 4.5, 3.5, 3.0],
        );
        let hero_end = key(
            Vec3::ZERO,
            0.0,
            4.0,
            0x7c3aed,
            0.6,
            [7.0, 5.5, 2.0, 1.5, 1.2],
        );
        let features_end = key(
            Vec3::new(5.0, 0.0, 2.0),
            0.4,
            3.2,
            0xec4899,
            0.6,
            [7.0, 5.5, 2.0, 1.5, 1.2],
        );
        let showcase_end = key(
            Vec3::new(-4.0, 2.0, -4.0),
            -0.6,
            2.0,
            0x3b82f6,
            0.7,
            [4.0, 4.0, 4.5, 4.5, 4.5],
        );
        let premium_end = key(
            Vec3::new(0.0, -8.0, -12.0),
            0.0,
            1.5,
            0x06b6d4,
            0.5,
            [4.0, 3.2, 2.4, 1.6, 1.2],
        );
        let finale_end = key(
            Vec3::ZERO,
            0.0,
            5.0,
            0xffffff,
            1.3,
            [10.0, 8.0, 6.0, 4.0, 3.0],
        );

        Self {
            sections: vec![
                Section::new("Hero", 0.0, 0.2, hero_start, hero_end.clone())
                    .with_effects(hero_effects()),
                Section::new("Features", 0.2, 0.4, hero_end, features_end.clone()),
                Section::new("Showcase", 0.4, 0.6, features_end, showcase_end.clone())
                    .with_effects(showcase_effects()),
                Section::new("Premium", 0.6, 0.8, showcase_end, premium_end.clone())
                    .with_effects(premium_effects()),
                Section::new("Finale", 0.8, 1.0, premium_end, finale_end),
            ],
        }
    }
}

fn light_waves<const N: usize>(waves: [(&str, Oscillator); N]) -> FxHashMap<String, Oscillator> {
    waves
        .into_iter()
        .map(|(name, wave)| (name.to_string(), wave))
        .collect()
}

/// Glow pulse, violet hue cycle and independent light flicker.
fn hero_effects() -> SectionEffects {
    SectionEffects {
        emissive_pulse: Some(Oscillator::sine(2.5, 0.2)),
        hue_cycle: Some(HueCycle {
            base: 0.7,
            span: 0.3,
            rate: 0.1,
            sweep: 0.0,
            saturation: 0.8,
            lightness: 0.6,
        }),
        lights: light_waves([
            ("primary", Oscillator::sine(2.8, 1.5)),
            ("secondary", Oscillator::sine(3.2, 1.2).with_phase(PI)),
            ("accent", Oscillator::sine(2.1, 1.0)),
            ("rim", Oscillator::sine(3.5, 1.0)),
            ("fill", Oscillator::sine(2.6, 0.8)),
        ]),
        light_sweep: 0.0,
    }
}

/// The two lead lights circle in quadrature, one lap per band.
fn showcase_effects() -> SectionEffects {
    SectionEffects {
        lights: light_waves([
            ("primary", Oscillator::sine(0.8, 2.0)),
            ("secondary", Oscillator::sine(0.8, 2.0).with_phase(FRAC_PI_2)),
        ]),
        light_sweep: TAU,
        ..SectionEffects::default()
    }
}

/// Spectrum sweep on the glow and a phased wave across all five lights.
fn premium_effects() -> SectionEffects {
    let wave = |fifths: f32| Oscillator::sine(1.0, 2.0).with_phase(PI * 0.4 * fifths);

    SectionEffects {
        emissive_pulse: Some(Oscillator::sine(3.0, 0.2)),
        hue_cycle: Some(HueCycle {
            base: 0.0,
            span: 1.0,
            rate: 0.2,
            sweep: 2.0,
            saturation: 0.9,
            lightness: 0.7,
        }),
        lights: light_waves([
            ("primary", wave(0.0)),
            ("secondary", wave(1.0)),
            ("accent", wave(2.0)),
            ("rim", wave(3.0)),
            ("fill", wave(4.0)),
        ]),
        light_sweep: 2.0 * TAU,
    }
}

impl TryFrom<Vec<Section>> for SectionTable {
    type Error = WraithError;

    fn try_from(sections: Vec<Section>) -> Result<Self> {
        Self::new(sections)
    }
}

impl From<SectionTable> for Vec<Section> {
    fn from(table: SectionTable) -> Self {
        table.sections
    }
}

/// Names of the colored point lights the canonical table drives, in order.
pub const SHOWCASE_LIGHTS: [&str; 5] = ["primary", "secondary", "accent", "rim", "fill"];

fn key(
    position: Vec3,
    rotation_y: f32,
    scale: f32,
    emissive: u32,
    intensity: f32,
    lights: [f32; 5],
) -> VisualState {
    VisualState {
        position,
        rotation: Vec3::new(0.0, rotation_y, 0.0),
        scale,
        emissive: Color::from_hex(emissive),
        emissive_intensity: intensity,
        lights: SHOWCASE_LIGHTS
            .iter()
            .zip(lights)
            .map(|(name, value)| ((*name).to_string(), value))
            .collect(),
    }
}

#[inline]
fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) }
}

/// Maps scroll progress to visual targets through a [`SectionTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionBlender {
    table: SectionTable,
}

impl SectionBlender {
    #[must_use]
    pub fn new(table: SectionTable) -> Self {
        Self { table }
    }

    #[inline]
    #[must_use]
    pub fn evaluate(&self, progress: f32) -> VisualState {
        self.table.evaluate(progress)
    }

    #[inline]
    #[must_use]
    pub fn evaluate_at(&self, progress: f32, time: f64) -> VisualState {
        self.table.evaluate_at(progress, time)
    }

    #[inline]
    #[must_use]
    pub fn index_at(&self, progress: f32) -> usize {
        self.table.index_at(progress)
    }

    #[inline]
    #[must_use]
    pub fn section_at(&self, progress: f32) -> &Section {
        self.table.section_at(progress)
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &SectionTable {
        &self.table
    }
}

impl Default for SectionBlender {
    fn default() -> Self {
        Self::new(SectionTable::canonical())
    }
}
