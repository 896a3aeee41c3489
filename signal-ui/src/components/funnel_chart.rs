//! Funnel Chart Component
//!
//! Static product funnel drawn on an HTML5 canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use signal_noise::render::{share_of_top, FunnelStage, FUNNEL_STAGES};

const CANVAS_WIDTH: u32 = 600;
const CANVAS_HEIGHT: u32 = 240;
const LABEL_WIDTH: f64 = 150.0;
const MARGIN: f64 = 20.0;

const STAGE_COLORS: [&str; 4] = [
    "#FF9800", // Orange (primary)
    "#FFA726",
    "#FFB74D",
    "#FFCC80",
];

/// Funnel chart component
#[component]
pub fn FunnelChart() -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Draw once the canvas is mounted
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_funnel(&canvas);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width=CANVAS_WIDTH.to_string()
            height=CANVAS_HEIGHT.to_string()
            class="w-full h-60 rounded-lg"
        />
    }
}

/// Trapezoid for one stage, in canvas pixels. The top edge is the stage's
/// own share, the bottom edge the next stage's, both centered on `center_x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelSegment {
    pub stage: FunnelStage,
    pub center_x: f64,
    pub top_y: f64,
    pub height: f64,
    pub top_width: f64,
    pub bottom_width: f64,
}

/// Segment layout for the funnel stages inside a `width` x `height` canvas
pub fn funnel_geometry(width: f64, height: f64) -> Vec<FunnelSegment> {
    let rows = FUNNEL_STAGES.len() as f64;
    let row_height = (height - 2.0 * MARGIN) / rows;
    let max_width = (width - LABEL_WIDTH - 2.0 * MARGIN).max(0.0);
    let center_x = LABEL_WIDTH + MARGIN + max_width / 2.0;

    FUNNEL_STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            // Last stage keeps its own width at the bottom
            let next = FUNNEL_STAGES.get(i + 1).unwrap_or(stage);
            FunnelSegment {
                stage: *stage,
                center_x,
                top_y: MARGIN + i as f64 * row_height,
                height: row_height - 4.0,
                top_width: max_width * share_of_top(stage),
                bottom_width: max_width * share_of_top(next),
            }
        })
        .collect()
}

/// "Signup 1000 (100%)"
fn stage_label(stage: &FunnelStage) -> String {
    format!(
        "{} {} ({:.0}%)",
        stage.name,
        stage.value,
        share_of_top(stage) * 100.0
    )
}

fn draw_funnel(canvas: &HtmlCanvasElement) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_font("12px sans-serif");
    for (idx, segment) in funnel_geometry(width, height).iter().enumerate() {
        let bottom_y = segment.top_y + segment.height;

        ctx.set_fill_style(&STAGE_COLORS[idx % STAGE_COLORS.len()].into());
        ctx.begin_path();
        ctx.move_to(segment.center_x - segment.top_width / 2.0, segment.top_y);
        ctx.line_to(segment.center_x + segment.top_width / 2.0, segment.top_y);
        ctx.line_to(segment.center_x + segment.bottom_width / 2.0, bottom_y);
        ctx.line_to(segment.center_x - segment.bottom_width / 2.0, bottom_y);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(
            &stage_label(&segment.stage),
            5.0,
            segment.top_y + segment.height / 2.0 + 4.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_follow_stage_order() {
        let segments = funnel_geometry(600.0, 240.0);
        let names: Vec<_> = segments.iter().map(|s| s.stage.name).collect();
        assert_eq!(names, ["Signup", "Onboarded", "Activated", "Retained"]);
        assert!(segments.windows(2).all(|w| w[0].top_y < w[1].top_y));
    }

    #[test]
    fn test_segments_narrow_towards_next_stage() {
        let segments = funnel_geometry(600.0, 240.0);
        let full = 600.0 - LABEL_WIDTH - 2.0 * MARGIN;

        assert_eq!(segments[0].top_width, full);
        assert_eq!(segments[0].bottom_width, segments[1].top_width);
        assert!((segments[3].top_width - full * 0.26).abs() < 1e-9);
        assert_eq!(segments[3].bottom_width, segments[3].top_width);
        assert!(segments.iter().all(|s| s.center_x == segments[0].center_x));
    }

    #[test]
    fn test_narrow_canvas_has_no_negative_widths() {
        let segments = funnel_geometry(50.0, 240.0);
        assert!(segments.iter().all(|s| s.top_width == 0.0 && s.bottom_width == 0.0));
    }

    #[test]
    fn test_stage_label_shows_share() {
        assert_eq!(stage_label(&FUNNEL_STAGES[0]), "Signup 1000 (100%)");
        assert_eq!(stage_label(&FUNNEL_STAGES[2]), "Activated 420 (42%)");
    }
}
