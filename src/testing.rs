//! Test doubles: scripted randomness, a recording canvas and a fake audio engine.

use crate::audio::{AudioEngine, GainRamp, VoiceId, VoiceRequest};
use crate::canvas::{Canvas, CompositeOp, LineCap, Rgba};
use crate::random::RandomSource;

/// Replays a fixed list of draws, cycling when exhausted
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
    pub draws: usize,
}

impl SequenceRandom {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self {
            values: values.to_vec(),
            cursor: 0,
            draws: 0,
        }
    }

    pub fn repeating(value: f64) -> Self {
        Self::new(&[value])
    }
}

impl RandomSource for SequenceRandom {
    fn next(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        v
    }
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    SetFill(Rgba),
    SetStroke(Rgba),
    SetLineWidth(f32),
    SetLineCap(LineCap),
    SetComposite(CompositeOp),
    SetFontPx(f32),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ArcTo(f32, f32, f32, f32, f32),
    Stroke,
    Fill,
    FillRect(f32, f32, f32, f32),
    FillText(String, f32, f32),
    StrokeText(String, f32, f32),
}

/// Canvas that only records what it was asked to do
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pub ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn count(&self, matches: impl Fn(&CanvasOp) -> bool) -> usize {
        self.ops.iter().filter(|op| matches(op)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(CanvasOp::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.ops.push(CanvasOp::Rotate(radians));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ops.push(CanvasOp::SetFill(color));
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ops.push(CanvasOp::SetStroke(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(CanvasOp::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(CanvasOp::SetLineCap(cap));
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.ops.push(CanvasOp::SetComposite(op));
    }

    fn set_font_px(&mut self, px: f32) {
        self.ops.push(CanvasOp::SetFontPx(px));
    }

    fn begin_path(&mut self) {
        self.ops.push(CanvasOp::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(CanvasOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(CanvasOp::LineTo(x, y));
    }

    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.ops.push(CanvasOp::ArcTo(x1, y1, x2, y2, radius));
    }

    fn stroke(&mut self) {
        self.ops.push(CanvasOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(CanvasOp::Fill);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(CanvasOp::FillRect(x, y, w, h));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(CanvasOp::FillText(text.to_string(), x, y));
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(CanvasOp::StrokeText(text.to_string(), x, y));
    }
}

/// Audio engine with a hand-driven clock and fixed sample durations
pub struct FakeAudio {
    pub now: f64,
    pub durations: Vec<f64>,
    pub started: Vec<(VoiceId, VoiceRequest)>,
    pub ramps: Vec<(VoiceId, GainRamp)>,
    next_id: u64,
}

impl FakeAudio {
    pub fn new(durations: &[f64]) -> Self {
        Self {
            now: 0.0,
            durations: durations.to_vec(),
            started: Vec::new(),
            ramps: Vec::new(),
            next_id: 0,
        }
    }
}

impl AudioEngine for FakeAudio {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn sample_count(&self) -> usize {
        self.durations.len()
    }

    fn sample_duration(&self, index: usize) -> f64 {
        self.durations[index]
    }

    fn start_voice(&mut self, request: VoiceRequest) -> VoiceId {
        let id = VoiceId(self.next_id);
        self.next_id += 1;
        self.started.push((id, request));
        id
    }

    fn ramp_gain(&mut self, voice: VoiceId, ramp: GainRamp) {
        self.ramps.push((voice, ramp));
    }
}
