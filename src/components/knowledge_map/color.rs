//! Tag colours shared by the knowledge map and the tag badges.

const PALETTE: &[&str] = &[
	"#6366f1", "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#06b6d4", "#ec4899",
	"#14b8a6", "#f97316", "#8b5cf6", "#84cc16",
];

/// Ring colour of the hovered node.
pub const HOVER_COLOR: &str = "#8b5cf6";

/// Picks a palette colour for a tag.
///
/// The hash runs over UTF-16 code units with the same 32-bit shift semantics
/// as the web front-end, so a tag keeps its colour everywhere it is shown.
pub fn color_for(label: &str) -> &'static str {
	let mut hash: i64 = 0;
	for unit in label.encode_utf16() {
		let shifted = (hash as i32).wrapping_shl(5) as i64;
		hash = (unit as i64).wrapping_add(shifted.wrapping_sub(hash));
	}
	PALETTE[(hash.unsigned_abs() % PALETTE.len() as u64) as usize]
}
