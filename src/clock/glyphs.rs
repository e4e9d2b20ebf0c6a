//! Hour labels around the dial, with occasional glitched cardinal hours.

use std::f32::consts::TAU;

use super::blink::{BlinkStates, HOUR_SLOTS};
use super::field::RandomWalkField;
use crate::canvas::{Canvas, CompositeOp};
use crate::params::GlyphParams;
use crate::random::RandomSource;

/// Hour shown in a slot; slot 0 sits at angle 0 (3 o'clock)
pub fn hour_for_slot(slot: usize) -> u32 {
    ((slot + 2) % HOUR_SLOTS + 1) as u32
}

/// Glitched spelling of a cardinal hour, `None` for hours that never glitch
pub fn glitch_label(hour: u32) -> Option<&'static str> {
    match hour {
        3 => Some(
            "T\u{0334}\u{033C}\u{035A}\u{033F}H\u{0337}\u{033A}\u{0305}\u{030E}\
             R\u{0335}\u{0321}\u{0321}\u{0333}\u{0360}\
             E\u{0334}\u{033A}\u{0348}\u{0317}\u{032F}\u{030D}\u{0313}\u{0309}\u{0301}\u{0345}\
             E\u{0338}\u{032C}\u{0313}\u{0308}\u{0313}\u{0300}",
        ),
        6 => Some(
            "S\u{0337}\u{031F}\u{0325}\u{0350}I\u{0334}\u{0332}\u{0329}\u{033D}\u{035D}\
             X\u{0336}\u{032D}\u{0320}\u{0311}\u{0304}",
        ),
        9 => Some(
            "N\u{0336}\u{033B}\u{0319}\u{0330}\u{0323}\u{0325}\u{0313}\u{030B}\u{035C}\u{035D}\u{035D}\
             I\u{0338}\u{0322}\u{0328}\u{0348}\u{0330}\u{032C}\u{0348}\u{0350}\
             N\u{0334}\u{031C}\u{034E}\u{0319}\u{0320}\u{0349}\u{0347}\u{0314}\u{033E}\u{0310}\u{030E}\
             E\u{0336}\u{0328}\u{0308}\u{034B}",
        ),
        12 => Some(
            "T\u{0334}\u{0321}\u{0319}\u{033E}\u{0308}W\u{0334}\u{031C}\u{0333}\u{033D}\
             E\u{0338}\u{032D}\u{0300}\u{0357}L\u{0336}\u{0321}\u{0329}\u{0309}\u{033F}\
             V\u{0337}\u{0349}\u{0352}\u{035D}E\u{0335}\u{032D}\u{035A}\u{030C}",
        ),
        _ => None,
    }
}

/// Radial jitter of a slot's label, before any glitch boost
pub fn slot_jitter(field: &RandomWalkField, slot: usize) -> f32 {
    let stride = field.len() / HOUR_SLOTS;
    field.value_at(stride * slot) * 0.5 * (1.0 + (slot as f32).sin()) * 0.25
}

/// Draw all twelve labels. Returns which slots rendered glitched.
///
/// Consumes exactly one blink draw per slot, in slot order.
pub fn render_glyphs(
    canvas: &mut impl Canvas,
    field: &RandomWalkField,
    blinks: &mut BlinkStates,
    params: &GlyphParams,
    radius: f32,
    elapsed_ms: f64,
    rng: &mut impl RandomSource,
) -> [bool; HOUR_SLOTS] {
    let mut glitched = [false; HOUR_SLOTS];

    for slot in 0..HOUR_SLOTS {
        let mut jitter = slot_jitter(field, slot);

        canvas.save();
        canvas.set_composite(CompositeOp::Screen);
        canvas.set_fill(params.fill);
        canvas.set_stroke(params.stroke);
        let halo_phase = elapsed_ms as f32 * params.halo_rate_per_ms + ((slot * 3) % 12) as f32;
        canvas.set_line_width(2.0 + 3.0 * (1.0 + halo_phase.sin()));
        canvas.set_font_px(params.font_px);

        let hour = hour_for_slot(slot);
        let number = hour.to_string();
        let mut label = number.as_str();

        let draw = rng.next();
        let glitch = glitch_label(hour);
        if blinks.step(slot, draw, glitch.is_some()) {
            if let Some(text) = glitch {
                label = text;
            }
            jitter *= params.glitch_jitter_scale;
            canvas.set_composite(CompositeOp::Exclusion);
            canvas.set_font_px(params.font_px * params.glitch_font_scale);
            canvas.set_fill(params.glitch_fill);
            canvas.set_stroke(params.glitch_stroke);
            canvas.set_line_width(params.glitch_line_width);
            glitched[slot] = true;
        }

        // Offsets scale with the unglitched font size
        let angle = TAU * slot as f32 / HOUR_SLOTS as f32;
        let spread = jitter * params.font_px / 18.0;
        let fill_r = radius + jitter + params.fill_offset + spread;
        canvas.fill_text(label, fill_r * angle.cos(), fill_r * angle.sin());
        let stroke_r = radius + jitter + params.stroke_offset + spread;
        canvas.stroke_text(label, stroke_r * angle.cos(), stroke_r * angle.sin());

        canvas.restore();
    }

    glitched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FieldParams;
    use crate::testing::{CanvasOp, RecordingCanvas, SequenceRandom};

    fn zero_field() -> RandomWalkField {
        RandomWalkField::new(&FieldParams::default(), &mut SequenceRandom::repeating(0.5))
    }

    fn labels(canvas: &RecordingCanvas) -> Vec<String> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::FillText(text, _, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_slot_hours_run_clockwise_from_three() {
        let hours: Vec<u32> = (0..12).map(hour_for_slot).collect();
        assert_eq!(hours, vec![3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2]);
    }

    #[test]
    fn test_only_cardinal_hours_have_glitch_labels() {
        for hour in 1..=12 {
            assert_eq!(glitch_label(hour).is_some(), hour % 3 == 0);
        }
        // Glitched labels keep their base letters
        let base: String = glitch_label(6)
            .unwrap()
            .chars()
            .filter(|c| c.is_ascii())
            .collect();
        assert_eq!(base, "SIX");
    }

    #[test]
    fn test_quiet_frame_draws_plain_numbers() {
        let field = zero_field();
        let mut blinks = BlinkStates::new(&GlyphParams::default().blink);
        let mut canvas = RecordingCanvas::new(500.0, 500.0);
        let mut rng = SequenceRandom::repeating(0.1);

        let glitched = render_glyphs(
            &mut canvas,
            &field,
            &mut blinks,
            &GlyphParams::default(),
            200.0,
            0.0,
            &mut rng,
        );

        assert_eq!(glitched, [false; 12]);
        assert_eq!(rng.draws, 12);
        assert_eq!(
            labels(&canvas),
            vec!["3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "1", "2"]
        );

        // Zero jitter: slot 0 label sits at radius + 15 on the +X axis
        assert!(canvas
            .ops
            .contains(&CanvasOp::FillText("3".to_string(), 215.0, 0.0)));
        assert_eq!(canvas.count(|op| *op == CanvasOp::Save), 12);
        assert_eq!(canvas.count(|op| *op == CanvasOp::Restore), 12);
    }

    #[test]
    fn test_high_draw_glitches_only_eligible_slots() {
        let field = zero_field();
        let params = GlyphParams::default();
        let mut blinks = BlinkStates::new(&params.blink);
        let mut canvas = RecordingCanvas::new(500.0, 500.0);
        let mut rng = SequenceRandom::repeating(0.999);

        let glitched = render_glyphs(&mut canvas, &field, &mut blinks, &params, 200.0, 0.0, &mut rng);

        let expected: Vec<bool> = (0..12).map(|s| hour_for_slot(s) % 3 == 0).collect();
        assert_eq!(glitched.to_vec(), expected);

        let texts = labels(&canvas);
        assert_eq!(texts[0], glitch_label(3).unwrap());
        assert_eq!(texts[1], "4");
        assert!(canvas
            .ops
            .contains(&CanvasOp::SetComposite(CompositeOp::Exclusion)));
        assert!(canvas.ops.contains(&CanvasOp::SetFontPx(54.0)));
    }

    #[test]
    fn test_glitch_boosts_label_jitter() {
        // Every field value 0.8: slot 0 jitter = 0.8 * 0.5 * (1 + sin 0) * 0.25
        let field = RandomWalkField::new(&FieldParams::default(), &mut SequenceRandom::repeating(0.9));
        let params = GlyphParams::default();
        let base = slot_jitter(&field, 0);
        assert!((base - 0.1).abs() < 1e-6);

        let fill_x = |draw: f64| {
            let mut blinks = BlinkStates::new(&params.blink);
            let mut canvas = RecordingCanvas::new(500.0, 500.0);
            let mut rng = SequenceRandom::repeating(draw);
            render_glyphs(&mut canvas, &field, &mut blinks, &params, 200.0, 0.0, &mut rng);
            canvas
                .ops
                .iter()
                .find_map(|op| match op {
                    CanvasOp::FillText(_, x, y) => {
                        assert!(y.abs() < 1e-4);
                        Some(*x)
                    }
                    _ => None,
                })
                .unwrap()
        };

        let plain = fill_x(0.1);
        assert!((plain - (200.0 + base + 15.0 + base * 48.0 / 18.0)).abs() < 1e-3);

        // Boost applies before the spread term, which keeps the 48px scale
        let boosted = base * 1.74;
        let glitched = fill_x(0.999);
        assert!((glitched - (200.0 + boosted + 15.0 + boosted * 48.0 / 18.0)).abs() < 1e-3);
        assert!(glitched > plain);
    }

    #[test]
    fn test_glitch_persists_for_window() {
        let field = zero_field();
        let params = GlyphParams::default();
        let mut blinks = BlinkStates::new(&params.blink);
        let mut rng = SequenceRandom::repeating(0.999);
        render_glyphs(
            &mut RecordingCanvas::new(500.0, 500.0),
            &field,
            &mut blinks,
            &params,
            200.0,
            0.0,
            &mut rng,
        );

        let mut quiet = SequenceRandom::repeating(0.0);
        for _ in 1..params.blink.num_frames {
            let glitched = render_glyphs(
                &mut RecordingCanvas::new(500.0, 500.0),
                &field,
                &mut blinks,
                &params,
                200.0,
                16.0,
                &mut quiet,
            );
            assert!(glitched[0]);
        }
        let glitched = render_glyphs(
            &mut RecordingCanvas::new(500.0, 500.0),
            &field,
            &mut blinks,
            &params,
            200.0,
            32.0,
            &mut quiet,
        );
        assert_eq!(glitched, [false; 12]);
    }
}
