use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::color::HOVER_COLOR;
use super::state::GraphView;

const EDGE_COLOR: &str = "rgba(153, 153, 153, 0.6)";
const EDGE_HOVER_COLOR: &str = "rgba(153, 153, 153, 1)";
const NODE_STROKE: &str = "rgba(255, 255, 255, 0.2)";
const LABEL_COLOR: &str = "#f8fafc";
const ARROW_SIZE: f64 = 8.0;

pub fn render(view: &GraphView, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, view.width(), view.height());
	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);
	draw_edges(view, ctx);
	draw_nodes(view, ctx);
	ctx.restore();
}

fn draw_edges(view: &GraphView, ctx: &CanvasRenderingContext2d) {
	let scene = view.scene();
	let hover = view.hover.as_deref();

	for edge in view.graph().edges() {
		let (Some(sprite), Some(target)) = (scene.edge(&edge.id), scene.node(&edge.target)) else {
			continue;
		};
		let (dx, dy) = (sprite.x2 - sprite.x1, sprite.y2 - sprite.y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let lit = hover.is_some_and(|h| h == sprite.source || h == sprite.target);
		let (color, width) = if lit {
			(EDGE_HOVER_COLOR, sprite.width.max(3.0))
		} else {
			(EDGE_COLOR, sprite.width)
		};

		// the arrow tip sits on the target circle's rim
		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (sprite.x2 - ux * target.radius, sprite.y2 - uy * target.radius);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(sprite.x1, sprite.y1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(view: &GraphView, ctx: &CanvasRenderingContext2d) {
	let scene = view.scene();
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("12px sans-serif");

	for node in view.graph().nodes() {
		let Some(sprite) = scene.node(&node.id) else {
			continue;
		};
		let hovered = view.hover.as_deref() == Some(node.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(sprite.x, sprite.y, sprite.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if hovered { HOVER_COLOR } else { sprite.color });
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(if hovered { 3.0 } else { 2.0 });
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&sprite.label, sprite.x, sprite.y);
	}
}
