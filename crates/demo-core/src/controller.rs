//! The per-frame animated parameter controller.
//!
//! One `Controller` owns the uniform table of a demo. The host calls `tick`
//! once per rendered frame and feeds input between frames; panel edits and
//! impulses are queued and take effect on the next tick.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;

use crate::clock::SceneClock;
use crate::constants::NO_IMPULSE_TIME;
use crate::demo::{DemoSpec, Mode};
use crate::error::ConfigError;
use crate::event::{ImpulseEvent, InputEvent, Trigger};
use crate::param::{PanelEntry, PanelRange, Value, ValueKind};
use crate::particles::{
    burst, make_rng, spiral, BurstConfig, Emission, ParticleBuffer, ParticleVertex, ReseedConfig,
    SpiralConfig, TrailBuffer, TrailConfig,
};
use crate::rule::Rule;
use crate::uniforms::Uniforms;

type ChangeListener = Box<dyn FnMut(&str, &Value)>;

fn take_due(pending: &mut Option<ImpulseEvent>, t: f32) -> Option<ImpulseEvent> {
    if pending.as_ref().is_some_and(|ev| ev.time <= t) {
        pending.take()
    } else {
        None
    }
}

struct Slot {
    rule: Rule,
    range: Option<PanelRange>,
    panel: bool,
}

/// Particle state, one variant per particle mode.
enum Effect {
    None,
    Spiral {
        config: SpiralConfig,
        buffer: ParticleBuffer,
    },
    Burst {
        config: BurstConfig,
        buffer: ParticleBuffer,
    },
    Trail {
        config: TrailConfig,
        guide: usize,
        ring: TrailBuffer,
    },
}

pub struct Controller {
    name: String,
    mode: Mode,
    slots: Vec<Slot>,
    uniforms: Uniforms,
    clock: SceneClock,
    pending_pointer: Option<ImpulseEvent>,
    pending_key: Option<ImpulseEvent>,
    pending_overrides: Vec<(usize, Value)>,
    pending_resolution: Option<Vec2>,
    effect: Effect,
    rng: StdRng,
    generation: u64,
    reseeded_at: f32,
    reseed_key: Option<String>,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("elapsed", &self.clock.elapsed())
            .field("params", &self.uniforms.len())
            .finish()
    }
}

fn check_kind(name: &str, expected: ValueKind, got: ValueKind) -> Result<(), ConfigError> {
    if expected == got {
        Ok(())
    } else {
        Err(ConfigError::TypeMismatch {
            name: name.to_string(),
            expected,
            got,
        })
    }
}

impl Controller {
    pub fn new(spec: DemoSpec) -> Result<Self, ConfigError> {
        let mode = spec.mode();
        let mut uniforms = Uniforms::with_capacity(spec.params.len());
        let mut slots = Vec::with_capacity(spec.params.len());
        for p in spec.params {
            p.rule.validate(&p.name)?;
            if let Some(kind) = p.rule.produces() {
                check_kind(&p.name, kind, p.initial.kind())?;
            }
            if !p.initial.is_finite() {
                return Err(ConfigError::NonFinite(p.name));
            }
            if let Some(r) = p.range {
                let Value::Scalar(v) = p.initial else {
                    return Err(ConfigError::InvalidRule {
                        name: p.name,
                        reason: "only scalar parameters take a slider range",
                    });
                };
                if !(r.min <= r.max && r.step > 0.0) {
                    return Err(ConfigError::InvalidRule {
                        name: p.name,
                        reason: "slider range needs min <= max and a positive step",
                    });
                }
                if !r.contains(v) {
                    return Err(ConfigError::OutOfRange {
                        name: p.name,
                        value: v,
                        min: r.min,
                        max: r.max,
                    });
                }
            }
            let panel = p.is_panel_visible();
            if !uniforms.push(p.name.clone(), p.initial) {
                return Err(ConfigError::DuplicateParam(p.name));
            }
            slots.push(Slot {
                rule: p.rule,
                range: p.range,
                panel,
            });
        }

        let mut rng = make_rng(spec.seed);
        let effect = match spec.emission {
            None => Effect::None,
            Some(emission) => {
                let count = emission.count();
                if count == 0 {
                    return Err(ConfigError::EmptyParticleBuffer);
                }
                match emission {
                    Emission::Spiral(config) => {
                        config.validate()?;
                        let buffer = spiral::generate(&config, count, 0, &mut rng);
                        Effect::Spiral { config, buffer }
                    }
                    Emission::Burst(config) => {
                        config.validate()?;
                        let buffer = burst::generate(&config, count, 0, &mut rng);
                        Effect::Burst { config, buffer }
                    }
                    Emission::Trail(config) => {
                        config.validate()?;
                        let guide = uniforms
                            .index_of(&config.guide)
                            .filter(|&i| uniforms.value_at(i).kind() == ValueKind::Vec3)
                            .ok_or_else(|| ConfigError::MissingGuide(config.guide.clone()))?;
                        let origin = uniforms.value_at(guide).as_vec3().unwrap_or(Vec3::ZERO);
                        let ring = TrailBuffer::generate(&config, count, origin, 0, &mut rng);
                        Effect::Trail {
                            config,
                            guide,
                            ring,
                        }
                    }
                }
            }
        };

        log::info!(
            "[controller] {} ready: mode={} params={}",
            spec.name,
            mode.name(),
            uniforms.len()
        );
        Ok(Self {
            name: spec.name,
            mode,
            slots,
            uniforms,
            clock: SceneClock::new(),
            pending_pointer: None,
            pending_key: None,
            pending_overrides: Vec::new(),
            pending_resolution: None,
            effect,
            rng,
            generation: 0,
            reseeded_at: 0.0,
            reseed_key: spec.reseed_key,
            listeners: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Scene time of the most recent tick.
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Values published by the most recent tick (initial values before the first).
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Advance every parameter to `elapsed` seconds and publish the result.
    pub fn tick(&mut self, elapsed: f32) -> &Uniforms {
        let t = self.clock.advance_to(elapsed);
        let dt = self.clock.delta();

        let mut overridden = vec![false; self.slots.len()];
        for (i, value) in std::mem::take(&mut self.pending_overrides) {
            if self.slots[i].rule.is_driven() {
                self.slots[i].rule = Rule::Static;
            }
            self.uniforms.set_at(i, value);
            overridden[i] = true;
        }

        let pointer = take_due(&mut self.pending_pointer, t);
        let key = take_due(&mut self.pending_key, t);
        let resolution = self.pending_resolution.take();

        if self.burst_spent(t) {
            log::debug!("[controller] {} burst spent, relaunching", self.name);
            self.regenerate(self.particle_count(), None);
        }

        for i in 0..self.slots.len() {
            if overridden[i] {
                continue;
            }
            let prev = self.uniforms.value_at(i);
            let name = self.uniforms.name_at(i);
            let hit = pointer.as_ref().filter(|ev| ev.targets.contains(name));
            let pressed = key.as_ref().filter(|ev| ev.targets.contains(name));
            let next = match self.slots[i].rule {
                Rule::Static | Rule::TrailHead | Rule::TrailLength => prev,
                Rule::Clock => Value::Scalar(t),
                Rule::ClockOffset { offset } => Value::Scalar(t + offset),
                Rule::Oscillate(o) => Value::Scalar(o.eval(t)),
                Rule::Orbit(o) => Value::Vec3(o.eval(t, prev.as_vec3().unwrap_or(Vec3::Y))),
                Rule::SinceReseed => Value::Scalar((t - self.reseeded_at).max(0.0)),
                Rule::Decay(d) => {
                    if hit.is_some_and(|ev| ev.arms()) || pressed.is_some() {
                        log::debug!("[controller] {} armed {}", self.name, name);
                        Value::Scalar(d.peak)
                    } else {
                        Value::Scalar(d.step(prev.as_scalar().unwrap_or(0.0), dt))
                    }
                }
                Rule::ImpulseTime => match hit {
                    Some(ev) if ev.trigger == Trigger::Miss => Value::Scalar(NO_IMPULSE_TIME),
                    Some(ev) => Value::Scalar(ev.time),
                    None => prev,
                },
                Rule::ImpulsePoint => match hit.and_then(|ev| ev.point) {
                    Some(p) => Value::Vec3(p),
                    None => prev,
                },
                Rule::Resolution => resolution.map(Value::Vec2).unwrap_or(prev),
            };
            self.uniforms.set_at(i, next);
        }

        self.step_effect(t);
        self.publish_trail_state(&overridden);
        &self.uniforms
    }

    /// A relaunching burst whose particles have all outlived their lifetime.
    fn burst_spent(&self, t: f32) -> bool {
        match (self.mode, &self.effect) {
            (Mode::ParticleBurst, Effect::Burst { config, buffer }) => {
                config.relaunch && burst::spent(buffer, t - self.reseeded_at)
            }
            _ => false,
        }
    }

    fn step_effect(&mut self, t: f32) {
        match (self.mode, &mut self.effect) {
            (Mode::ParticleBurst, Effect::Burst { buffer, .. }) => {
                burst::fade(buffer, t - self.reseeded_at);
            }
            (Mode::ParticleTrail, Effect::Trail { guide, ring, .. }) => {
                if let Some(p) = self.uniforms.value_at(*guide).as_vec3() {
                    ring.push(p);
                }
            }
            // Spiral positions are fixed between reseeds.
            (Mode::ParticleSpiral | Mode::Oscillating | Mode::Decaying, _) => {}
            (mode, _) => log::warn!(
                "[controller] {} has no particle state for mode {}",
                self.name,
                mode.name()
            ),
        }
    }

    fn publish_trail_state(&mut self, overridden: &[bool]) {
        let Effect::Trail { ring, .. } = &self.effect else {
            return;
        };
        let (head, filled) = (ring.head() as f32, ring.filled() as f32);
        for (i, slot) in self.slots.iter().enumerate() {
            if overridden[i] {
                continue;
            }
            match slot.rule {
                Rule::TrailHead => self.uniforms.set_at(i, Value::Scalar(head)),
                Rule::TrailLength => self.uniforms.set_at(i, Value::Scalar(filled)),
                _ => {}
            }
        }
    }

    /// Queue an impulse for the first tick at or after its timestamp.
    ///
    /// Pointer and key impulses are queued separately. A newer impulse
    /// replaces a pending one of the same kind. Only pointer impulses touch
    /// the impulse time and point; key impulses just arm decays.
    pub fn apply_impulse(&mut self, event: ImpulseEvent) {
        let pending = if event.is_pointer() {
            &mut self.pending_pointer
        } else {
            &mut self.pending_key
        };
        if pending.is_some() {
            log::debug!("[controller] {} replacing pending impulse", self.name);
        }
        *pending = Some(event);
    }

    /// Regenerate the particle buffer from a fresh random draw.
    pub fn reseed(&mut self, config: ReseedConfig) -> Result<(), ConfigError> {
        if matches!(self.effect, Effect::None) {
            return Err(ConfigError::NoParticles(self.name.clone()));
        }
        if config.count == 0 {
            return Err(ConfigError::EmptyParticleBuffer);
        }
        if let Some(seed) = config.seed {
            self.rng = make_rng(Some(seed));
        }
        self.regenerate(config.count, config.seed);
        Ok(())
    }

    fn regenerate(&mut self, count: usize, seed: Option<u64>) {
        if matches!(self.effect, Effect::None) {
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        let rng = &mut self.rng;
        match &mut self.effect {
            Effect::None => {}
            Effect::Spiral { config, buffer } => {
                *buffer = spiral::generate(config, count, generation, rng);
            }
            Effect::Burst { config, buffer } => {
                *buffer = burst::generate(config, count, generation, rng);
            }
            Effect::Trail {
                config,
                guide,
                ring,
            } => {
                let origin = self
                    .uniforms
                    .value_at(*guide)
                    .as_vec3()
                    .unwrap_or(Vec3::ZERO);
                *ring = TrailBuffer::generate(config, count, origin, generation, rng);
            }
        }
        self.reseeded_at = self.clock.elapsed();
        log::info!(
            "[controller] {} reseeded {} particles (generation {}, seed {:?})",
            self.name,
            count,
            generation,
            seed
        );
    }

    /// Queue a panel override; it becomes visible on the next tick.
    ///
    /// Driven parameters are pinned to the new value. Stateful ones continue
    /// from it.
    pub fn set_static(&mut self, name: &str, value: Value) -> Result<(), ConfigError> {
        let i = self
            .uniforms
            .index_of(name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_string()))?;
        let slot = &self.slots[i];
        if matches!(slot.rule, Rule::TrailHead | Rule::TrailLength) {
            return Err(ConfigError::InvalidRule {
                name: name.to_string(),
                reason: "parameter is computed by the particle system",
            });
        }
        check_kind(name, self.uniforms.value_at(i).kind(), value.kind())?;
        if !value.is_finite() {
            return Err(ConfigError::NonFinite(name.to_string()));
        }
        if let (Some(r), Value::Scalar(v)) = (slot.range, value) {
            if !r.contains(v) {
                log::warn!("[controller] {} rejected {}={} (out of range)", self.name, name, v);
                return Err(ConfigError::OutOfRange {
                    name: name.to_string(),
                    value: v,
                    min: r.min,
                    max: r.max,
                });
            }
        }
        self.pending_overrides.push((i, value));
        for listener in &mut self.listeners {
            listener(name, &value);
        }
        Ok(())
    }

    /// Route one host input event, stamped with the last tick's time.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), ConfigError> {
        self.handle_at(event, self.clock.elapsed())
    }

    /// Route one host input event that happened at scene time `now`.
    pub fn handle_at(&mut self, event: InputEvent, now: f32) -> Result<(), ConfigError> {
        match event {
            InputEvent::Resize { width, height } => {
                self.pending_resolution = Some(InputEvent::resolution(width, height));
            }
            InputEvent::Click { hit: Some(point) } => {
                self.apply_impulse(ImpulseEvent::hit(now, point));
            }
            InputEvent::Click { hit: None } => self.apply_impulse(ImpulseEvent::miss(now)),
            InputEvent::Key(code) => {
                let reseeds = self
                    .reseed_key
                    .as_deref()
                    .is_some_and(|k| k.eq_ignore_ascii_case(&code));
                if self.mode.is_particle() && reseeds {
                    let count = self.particle_count();
                    self.reseed(ReseedConfig::new(count))?;
                } else {
                    log::debug!("[controller] {} ignored key {}", self.name, code);
                }
            }
        }
        Ok(())
    }

    /// Register a callback run after every accepted panel override.
    pub fn on_change(&mut self, listener: impl FnMut(&str, &Value) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Slider and colour-picker rows for the control panel.
    pub fn panel(&self) -> Vec<PanelEntry> {
        self.uniforms
            .iter()
            .zip(self.slots.iter())
            .filter(|(_, slot)| slot.panel)
            .map(|((name, value), slot)| PanelEntry {
                name: name.to_string(),
                value,
                range: slot.range,
            })
            .collect()
    }

    pub fn particles(&self) -> Option<&ParticleBuffer> {
        match &self.effect {
            Effect::Spiral { buffer, .. } | Effect::Burst { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn trail(&self) -> Option<&TrailBuffer> {
        match &self.effect {
            Effect::Trail { ring, .. } => Some(ring),
            _ => None,
        }
    }

    pub fn particle_count(&self) -> usize {
        match &self.effect {
            Effect::None => 0,
            Effect::Spiral { buffer, .. } | Effect::Burst { buffer, .. } => buffer.len(),
            Effect::Trail { ring, .. } => ring.len(),
        }
    }

    /// Interleaved vertex data of whichever particle buffer the demo owns.
    pub fn particle_vertices(&self) -> Vec<ParticleVertex> {
        match &self.effect {
            Effect::None => Vec::new(),
            Effect::Spiral { buffer, .. } | Effect::Burst { buffer, .. } => buffer.vertices(),
            Effect::Trail { ring, .. } => ring.vertices(),
        }
    }

    /// Generation of the current particle buffer; bumps on every reseed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
