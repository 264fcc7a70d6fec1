//! Sprite-sheet animation.
//!
//! An [`AnimatedSprite`] owns a [`Sprite`] and a list of named [`Animation`]
//! clips. Each clip is a contiguous range of cells in the sprite's atlas
//! texture. One clip is active at a time; [`AnimatedSprite::update`] advances
//! it against a millisecond clock and [`AnimatedSprite::draw`] samples its
//! current cell.
//!
//! # Advance policy
//!
//! [`AdvancePolicy::Step`] (the default) advances at most one frame per
//! `update` call, however much time has passed. A low call rate therefore
//! makes the animation lag behind real time. [`AdvancePolicy::CatchUp`]
//! advances `floor(elapsed / frame_duration)` frames instead.
//!
//! # Descriptor format
//!
//! Clips can be bulk-loaded from JSON:
//!
//! ```json
//! {
//!   "sprite": "knight",
//!   "animations": [
//!     { "name": "idle", "frame_width": 32, "frame_height": 32,
//!       "start_frame": 0, "frame_count": 4, "frame_duration_ms": 200 },
//!     ["walk", 32, 32, 4, 4, 120]
//!   ]
//! }
//! ```
//!
//! A clip is either an object or a positional array ordered
//! `[name, frame_width, frame_height, start_frame, frame_count, frame_duration_ms]`.
//! Numbers may also be given as strings. See [`FieldPolicy`] for how bad
//! fields are handled.

use std::path::Path;
use std::str::FromStr;

use log::{error, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::components::sprite::Sprite;
use crate::resources::atlas::{atlas_cell, cell_rect, TextureInfo};
use crate::resources::camera2d::CameraContext;
use crate::systems::render::DrawSink;

/// How many frames an `update` may advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvancePolicy {
    /// At most one frame per call.
    #[default]
    Step,
    /// As many frames as whole frame durations have elapsed.
    CatchUp,
}

/// What to do with a descriptor field that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Use 0 for the field, log a warning and keep loading.
    #[default]
    Lenient,
    /// Fail the whole load; the sprite is left unchanged.
    Strict,
}

impl FieldPolicy {
    fn resolve<T: Default>(self, result: Result<T, String>) -> Result<T, String> {
        match (self, result) {
            (_, Ok(v)) => Ok(v),
            (FieldPolicy::Strict, Err(e)) => Err(e),
            (FieldPolicy::Lenient, Err(e)) => {
                warn!("{}, using 0", e);
                Ok(T::default())
            }
        }
    }
}

/// Parse one descriptor field.
///
/// Accepts JSON numbers and numeric strings. Integral floats such as `4.0`
/// are accepted for integer fields.
pub fn parse_field<T: FromStr>(value: Option<&Value>, field: &str) -> Result<T, String> {
    let text = match value {
        None => return Err(format!("Missing field '{}'", field)),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => return Err(format!("Field '{}' is not a number: {}", field, other)),
    };
    if let Ok(v) = text.parse::<T>() {
        return Ok(v);
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.fract() == 0.0)
        .and_then(|f| (f as i64).to_string().parse::<T>().ok())
        .ok_or_else(|| format!("Invalid value '{}' for field '{}'", text, field))
}

/// A named range of atlas cells with its playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    pub start_frame: u32,
    pub frame_count: u32,
    pub frame_width: f32,
    pub frame_height: f32,
    /// Time each frame stays on screen, in milliseconds.
    pub frame_duration_ms: u64,
    pub playing: bool,
    current_frame: u32,
    last_advance_ms: u64,
}

impl Animation {
    pub fn new(
        name: impl Into<String>,
        frame_width: f32,
        frame_height: f32,
        start_frame: u32,
        frame_count: u32,
        frame_duration_ms: u64,
    ) -> Self {
        Animation {
            name: name.into(),
            start_frame,
            frame_count,
            frame_width,
            frame_height,
            frame_duration_ms,
            playing: true,
            current_frame: start_frame,
            last_advance_ms: 0,
        }
    }

    /// Absolute atlas index of the frame on screen.
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Clock value of the last frame change.
    pub fn last_advance_ms(&self) -> u64 {
        self.last_advance_ms
    }

    /// Whether `frame` lies in `[start_frame, start_frame + frame_count)`.
    pub fn contains_frame(&self, frame: u32) -> bool {
        frame >= self.start_frame && (frame - self.start_frame) < self.frame_count
    }

    /// Advance against `now_ms`. Returns the number of frames stepped.
    pub fn advance(&mut self, now_ms: u64, policy: AdvancePolicy) -> u64 {
        if !self.playing || self.frame_count == 0 {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.last_advance_ms);
        if elapsed < self.frame_duration_ms {
            return 0;
        }

        let steps = match policy {
            AdvancePolicy::Step => 1,
            AdvancePolicy::CatchUp if self.frame_duration_ms == 0 => 1,
            AdvancePolicy::CatchUp => elapsed / self.frame_duration_ms,
        };
        self.last_advance_ms = match policy {
            AdvancePolicy::CatchUp if self.frame_duration_ms > 0 => {
                self.last_advance_ms + steps * self.frame_duration_ms
            }
            _ => now_ms,
        };

        let offset = u64::from(self.current_frame.saturating_sub(self.start_frame));
        let offset = (offset + steps) % u64::from(self.frame_count);
        self.current_frame = self.start_frame + offset as u32;
        steps
    }
}

/// One parsed descriptor entry.
#[derive(Debug, Clone, PartialEq)]
struct AnimationSpec {
    name: String,
    frame_width: f32,
    frame_height: f32,
    start_frame: u32,
    frame_count: u32,
    frame_duration_ms: u64,
}

const FIELD_NAMES: [&str; 6] = [
    "name",
    "frame_width",
    "frame_height",
    "start_frame",
    "frame_count",
    "frame_duration_ms",
];

fn field_at(node: &Value, i: usize) -> Option<&Value> {
    match node {
        Value::Object(map) => map.get(FIELD_NAMES[i]),
        Value::Array(items) => items.get(i),
        _ => None,
    }
}

impl AnimationSpec {
    /// `Ok(None)` means the entry was skipped.
    fn from_value(index: usize, node: &Value, policy: FieldPolicy) -> Result<Option<Self>, String> {
        let field = |i: usize| field_at(node, i);

        if !matches!(node, Value::Object(_) | Value::Array(_)) {
            let msg = format!("Animation entry {} is neither an object nor an array", index);
            return match policy {
                FieldPolicy::Strict => Err(msg),
                FieldPolicy::Lenient => {
                    warn!("{}, skipping", msg);
                    Ok(None)
                }
            };
        }

        let name = match field(0) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => {
                let msg = format!("Animation entry {} has no name", index);
                return match policy {
                    FieldPolicy::Strict => Err(msg),
                    FieldPolicy::Lenient => {
                        warn!("{}, skipping", msg);
                        Ok(None)
                    }
                };
            }
        };

        let with_name = |e: String| format!("Animation '{}': {}", name, e);
        Ok(Some(AnimationSpec {
            frame_width: policy.resolve(parse_field(field(1), FIELD_NAMES[1]).map_err(with_name))?,
            frame_height: policy.resolve(parse_field(field(2), FIELD_NAMES[2]).map_err(with_name))?,
            start_frame: policy.resolve(parse_field(field(3), FIELD_NAMES[3]).map_err(with_name))?,
            frame_count: policy.resolve(parse_field(field(4), FIELD_NAMES[4]).map_err(with_name))?,
            frame_duration_ms: policy
                .resolve(parse_field(field(5), FIELD_NAMES[5]).map_err(with_name))?,
            name,
        }))
    }
}

/// Top level of a descriptor file. Clip entries stay untyped so each one can
/// be validated on its own.
#[derive(Debug, Deserialize)]
struct Descriptor {
    animations: Vec<Value>,
}

fn parse_descriptor(text: &str, policy: FieldPolicy) -> Result<Vec<AnimationSpec>, String> {
    let descriptor: Descriptor =
        serde_json::from_str(text).map_err(|e| format!("Invalid animation descriptor: {}", e))?;

    let mut specs = Vec::with_capacity(descriptor.animations.len());
    for (index, node) in descriptor.animations.iter().enumerate() {
        if let Some(spec) = AnimationSpec::from_value(index, node, policy)? {
            specs.push(spec);
        }
    }
    Ok(specs)
}

/// A sprite with named animation clips.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    sprite: Sprite,
    animations: Vec<Animation>,
    active: Option<usize>,
    policy: AdvancePolicy,
}

impl AnimatedSprite {
    /// Sprite at `(x, y)` with no animations.
    pub fn new(texture: TextureInfo, x: f32, y: f32) -> Self {
        AnimatedSprite {
            sprite: Sprite::new(texture, x, y),
            animations: Vec::new(),
            active: None,
            policy: AdvancePolicy::default(),
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.policy = policy;
    }

    /// Append a clip. Names need not be unique, but lookups return the
    /// first clip with a given name.
    pub fn add_animation(
        &mut self,
        name: impl Into<String>,
        frame_width: f32,
        frame_height: f32,
        start_frame: u32,
        frame_count: u32,
        frame_duration_ms: u64,
    ) {
        self.animations.push(Animation::new(
            name,
            frame_width,
            frame_height,
            start_frame,
            frame_count,
            frame_duration_ms,
        ));
    }

    /// Load clips from a JSON descriptor file, degrading bad fields to 0.
    pub fn load_animations_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, String> {
        self.load_animations_from_file_with(path, FieldPolicy::Lenient)
    }

    /// Load clips from a JSON descriptor file.
    ///
    /// Returns the number of clips added. On error nothing is added.
    pub fn load_animations_from_file_with(
        &mut self,
        path: impl AsRef<Path>,
        policy: FieldPolicy,
    ) -> Result<usize, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            let msg = format!("Failed to read animation descriptor {:?}: {}", path, e);
            error!("{}", msg);
            msg
        })?;
        let added = self.load_animations_from_str_with(&text, policy)?;
        info!("Loaded {} animations from {:?}", added, path);
        Ok(added)
    }

    pub fn load_animations_from_str(&mut self, text: &str) -> Result<usize, String> {
        self.load_animations_from_str_with(text, FieldPolicy::Lenient)
    }

    pub fn load_animations_from_str_with(
        &mut self,
        text: &str,
        policy: FieldPolicy,
    ) -> Result<usize, String> {
        let specs = parse_descriptor(text, policy).inspect_err(|e| error!("{}", e))?;
        let added = specs.len();
        for spec in specs {
            self.add_animation(
                spec.name,
                spec.frame_width,
                spec.frame_height,
                spec.start_frame,
                spec.frame_count,
                spec.frame_duration_ms,
            );
        }
        Ok(added)
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.animations.iter().position(|a| a.name == name)
    }

    /// First clip named `name`.
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.find(name).map(|i| &self.animations[i])
    }

    /// Make the first clip named `name` active. Unknown names are ignored.
    pub fn set_active_animation(&mut self, name: &str) {
        if let Some(index) = self.find(name) {
            self.active = Some(index);
        }
    }

    pub fn active_animation(&self) -> Option<&Animation> {
        self.active.map(|i| &self.animations[i])
    }

    pub fn active_animation_name(&self) -> Option<&str> {
        self.active_animation().map(|a| a.name.as_str())
    }

    /// Set the current frame of clip `name`.
    ///
    /// Returns false, leaving the clip untouched, when the clip is unknown or
    /// `frame` is outside its range.
    pub fn set_frame(&mut self, name: &str, frame: u32) -> bool {
        let Some(anim) = self.find(name).map(|i| &mut self.animations[i]) else {
            return false;
        };
        if !anim.contains_frame(frame) {
            warn!(
                "Frame {} is outside animation '{}' ({}..{})",
                frame,
                name,
                anim.start_frame,
                anim.start_frame + anim.frame_count
            );
            return false;
        }
        anim.current_frame = frame;
        true
    }

    /// Set the frame duration of clip `name`. Returns false if unknown.
    pub fn set_speed(&mut self, name: &str, frame_duration_ms: u64) -> bool {
        match self.find(name) {
            Some(i) => {
                self.animations[i].frame_duration_ms = frame_duration_ms;
                true
            }
            None => false,
        }
    }

    /// Pause or resume the active clip.
    pub fn set_playing(&mut self, playing: bool) {
        if let Some(i) = self.active {
            self.animations[i].playing = playing;
        }
    }

    /// Uniform scale of the drawn sprite.
    pub fn set_scale(&mut self, factor: f32) {
        self.sprite.set_scale(factor, factor);
    }

    /// Advance the active clip against the clock. No-op without an active clip.
    pub fn update(&mut self, now_ms: u64) {
        let policy = self.policy;
        if let Some(i) = self.active {
            self.animations[i].advance(now_ms, policy);
        }
    }

    /// Draw the active clip's current frame.
    ///
    /// Nothing is drawn without an active clip, for a hidden sprite, or when
    /// the frame is wider than the texture.
    pub fn draw(&self, ctx: &CameraContext, sink: &mut dyn DrawSink) {
        let Some(anim) = self.active_animation() else {
            return;
        };
        if !self.sprite.visible {
            return;
        }
        let columns = self.sprite.texture.columns(anim.frame_width);
        if columns == 0 {
            return;
        }
        let source = cell_rect(
            atlas_cell(anim.current_frame, columns),
            anim.frame_width,
            anim.frame_height,
        );
        self.sprite.draw_region(source, ctx, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::camera2d::Camera;
    use crate::systems::render::RecordingSink;

    fn sheet() -> AnimatedSprite {
        AnimatedSprite::new(TextureInfo::new("knight", 128.0, 64.0), 0.0, 0.0)
    }

    fn walking() -> AnimatedSprite {
        let mut s = sheet();
        s.add_animation("walk", 32.0, 32.0, 0, 4, 300);
        s.set_active_animation("walk");
        s
    }

    #[test]
    fn test_new_has_no_animations() {
        let s = sheet();
        assert!(s.animations().is_empty());
        assert!(s.active_animation().is_none());
    }

    #[test]
    fn test_wraparound_after_four_durations() {
        let mut s = walking();
        s.update(300);
        assert_eq!(s.active_animation().unwrap().current_frame(), 1);
        s.update(600);
        s.update(900);
        assert_eq!(s.active_animation().unwrap().current_frame(), 3);
        s.update(1200);
        assert_eq!(s.active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_no_advance_before_duration() {
        let mut s = walking();
        s.update(100);
        s.update(299);
        assert_eq!(s.active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_step_policy_advances_once_per_call() {
        // Two calls, each after two full durations: one frame per call.
        let mut s = walking();
        s.update(600);
        s.update(1200);
        let anim = s.active_animation().unwrap();
        assert_eq!(anim.current_frame(), 2);
        assert_eq!(anim.last_advance_ms(), 1200);
    }

    #[test]
    fn test_step_policy_at_100ms_cadence() {
        let mut s = walking();
        let mut advances = 0;
        for tick in 1..=12u64 {
            let before = s.active_animation().unwrap().current_frame();
            s.update(tick * 100);
            if s.active_animation().unwrap().current_frame() != before {
                advances += 1;
            }
        }
        assert_eq!(advances, 4);
        assert_eq!(s.active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_catch_up_policy_advances_all_elapsed_frames() {
        let mut s = walking();
        s.set_advance_policy(AdvancePolicy::CatchUp);
        s.update(700);
        let anim = s.active_animation().unwrap();
        assert_eq!(anim.current_frame(), 2);
        // Leftover 100ms is kept for the next frame.
        assert_eq!(anim.last_advance_ms(), 600);
        s.update(900);
        assert_eq!(s.active_animation().unwrap().current_frame(), 3);
    }

    #[test]
    fn test_offset_range_wraps_to_start_frame() {
        let mut s = sheet();
        s.add_animation("attack", 32.0, 32.0, 4, 3, 100);
        s.set_active_animation("attack");
        assert_eq!(s.active_animation().unwrap().current_frame(), 4);
        for (t, expected) in [(100, 5), (200, 6), (300, 4), (400, 5)] {
            s.update(t);
            assert_eq!(s.active_animation().unwrap().current_frame(), expected);
        }
    }

    #[test]
    fn test_paused_animation_does_not_advance() {
        let mut s = walking();
        s.set_playing(false);
        s.update(5000);
        assert_eq!(s.active_animation().unwrap().current_frame(), 0);
        s.set_playing(true);
        s.update(5000);
        assert_eq!(s.active_animation().unwrap().current_frame(), 1);
    }

    #[test]
    fn test_zero_frame_count_never_advances() {
        let mut s = sheet();
        s.add_animation("empty", 32.0, 32.0, 0, 0, 0);
        s.set_active_animation("empty");
        s.update(1000);
        assert_eq!(s.active_animation().unwrap().current_frame(), 0);
    }

    #[test]
    fn test_update_and_draw_without_active_are_noops() {
        let mut s = sheet();
        s.add_animation("walk", 32.0, 32.0, 0, 4, 300);
        s.update(10_000);
        let mut sink = RecordingSink::default();
        s.draw(&CameraContext::new(), &mut sink);
        assert!(sink.calls.is_empty());
        assert_eq!(s.animation("walk").unwrap().current_frame(), 0);
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let mut s = sheet();
        s.add_animation("idle", 32.0, 32.0, 0, 2, 100);
        s.add_animation("idle", 32.0, 32.0, 4, 2, 100);
        s.set_active_animation("idle");
        assert_eq!(s.active_animation().unwrap().start_frame, 0);
        assert!(s.set_speed("idle", 50));
        assert_eq!(s.animations()[0].frame_duration_ms, 50);
        assert_eq!(s.animations()[1].frame_duration_ms, 100);
    }

    #[test]
    fn test_set_active_unknown_keeps_current() {
        let mut s = walking();
        s.set_active_animation("fly");
        assert_eq!(s.active_animation_name(), Some("walk"));
    }

    #[test]
    fn test_set_frame_respects_range() {
        let mut s = sheet();
        s.add_animation("run", 32.0, 32.0, 2, 3, 100);
        assert!(s.set_frame("run", 4));
        assert_eq!(s.animation("run").unwrap().current_frame(), 4);
        assert!(!s.set_frame("run", 5));
        assert!(!s.set_frame("run", 1));
        assert!(!s.set_frame("missing", 0));
        assert_eq!(s.animation("run").unwrap().current_frame(), 4);
    }

    #[test]
    fn test_draw_samples_current_cell() {
        let mut s = walking();
        s.set_frame("walk", 3);
        s.set_scale(2.0);
        s.sprite_mut().set_position(10.0, 20.0);

        let cam = Camera::new(10.0, 20.0, 200.0, 100.0, 0.0, 1.5);
        let mut sink = RecordingSink::default();
        s.draw(&CameraContext::with_camera(cam), &mut sink);

        assert_eq!(sink.calls.len(), 1);
        let call = &sink.calls[0];
        assert_eq!(&*call.texture, "knight");
        assert_eq!((call.source.x, call.source.y), (96.0, 0.0));
        assert_eq!((call.source.width, call.source.height), (32.0, 32.0));
        assert_eq!((call.dest.x, call.dest.y), (100.0, 50.0));
        assert_eq!((call.dest.width, call.dest.height), (96.0, 96.0));
    }

    #[test]
    fn test_draw_second_row() {
        let mut s = sheet();
        s.add_animation("jump", 32.0, 32.0, 4, 4, 100);
        s.set_active_animation("jump");
        s.set_frame("jump", 5);
        let mut sink = RecordingSink::default();
        s.draw(&CameraContext::new(), &mut sink);
        assert_eq!((sink.calls[0].source.x, sink.calls[0].source.y), (32.0, 32.0));
    }

    #[test]
    fn test_draw_degenerate_frame_is_skipped() {
        let mut s = sheet();
        s.add_animation("broken", 0.0, 0.0, 0, 4, 100);
        s.set_active_animation("broken");
        let mut sink = RecordingSink::default();
        s.draw(&CameraContext::new(), &mut sink);
        assert!(sink.calls.is_empty());
    }

    const DESCRIPTOR: &str = r#"{
        "sprite": "knight",
        "animations": [
            { "name": "idle", "frame_width": 32, "frame_height": 32,
              "start_frame": 0, "frame_count": 4, "frame_duration_ms": 200 },
            ["walk", 32, 32.0, "4", 4, 120]
        ]
    }"#;

    #[test]
    fn test_load_descriptor_objects_and_arrays() {
        let mut s = sheet();
        assert_eq!(s.load_animations_from_str(DESCRIPTOR), Ok(2));

        let idle = s.animation("idle").unwrap();
        assert_eq!((idle.start_frame, idle.frame_count, idle.frame_duration_ms), (0, 4, 200));
        assert_eq!((idle.frame_width, idle.frame_height), (32.0, 32.0));

        let walk = s.animation("walk").unwrap();
        assert_eq!((walk.start_frame, walk.frame_count, walk.frame_duration_ms), (4, 4, 120));
        assert_eq!(walk.current_frame(), 4);
    }

    const BAD_FIELDS: &str = r#"{
        "animations": [
            { "name": "idle", "frame_width": "wide", "frame_height": 32,
              "start_frame": -1, "frame_count": 4, "frame_duration_ms": 200 },
            { "frame_width": 32 },
            { "name": "run", "frame_width": 32, "frame_height": 32,
              "start_frame": 8, "frame_count": 2, "frame_duration_ms": 90 }
        ]
    }"#;

    #[test]
    fn test_lenient_load_degrades_fields_to_zero() {
        let mut s = sheet();
        assert_eq!(s.load_animations_from_str(BAD_FIELDS), Ok(2));
        let idle = s.animation("idle").unwrap();
        assert_eq!(idle.frame_width, 0.0);
        assert_eq!(idle.start_frame, 0);
        assert_eq!(idle.frame_height, 32.0);
        assert_eq!(s.animation("run").unwrap().frame_duration_ms, 90);
    }

    #[test]
    fn test_strict_load_fails_and_leaves_sprite_unchanged() {
        let mut s = sheet();
        s.add_animation("existing", 32.0, 32.0, 0, 1, 100);
        let result = s.load_animations_from_str_with(BAD_FIELDS, FieldPolicy::Strict);
        assert!(result.is_err());
        assert_eq!(s.animations().len(), 1);
    }

    #[test]
    fn test_load_rejects_malformed_documents() {
        let mut s = sheet();
        assert!(s.load_animations_from_str("not json").is_err());
        assert!(s.load_animations_from_str(r#"{"sprite": "x"}"#).is_err());
        assert!(s.animations().is_empty());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let mut s = sheet();
        let path = std::env::temp_dir().join("tilescene-missing-animations.json");
        assert!(s.load_animations_from_file(path).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "tilescene-{}-animations.json",
            std::process::id()
        ));
        std::fs::write(&path, DESCRIPTOR).unwrap();
        let mut s = sheet();
        assert_eq!(s.load_animations_from_file(&path), Ok(2));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_field_variants() {
        let n = serde_json::json!(12);
        let f = serde_json::json!(4.0);
        let s = serde_json::json!(" 7 ");
        let bad = serde_json::json!(true);
        assert_eq!(parse_field::<u32>(Some(&n), "a"), Ok(12));
        assert_eq!(parse_field::<u32>(Some(&f), "a"), Ok(4));
        assert_eq!(parse_field::<f32>(Some(&f), "a"), Ok(4.0));
        assert_eq!(parse_field::<u64>(Some(&s), "a"), Ok(7));
        assert!(parse_field::<u32>(Some(&bad), "a").is_err());
        assert!(parse_field::<u32>(None, "a").is_err());
        assert!(parse_field::<u32>(Some(&serde_json::json!(2.5)), "a").is_err());
    }
}
