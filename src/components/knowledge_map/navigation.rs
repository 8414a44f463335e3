use log::warn;

pub const NOTE_GALLERY_PATH: &str = "/note_gallery";

/// Note gallery filtered on `tag`.
pub fn note_gallery_url(tag: &str) -> String {
	format!("{}?tag={}", NOTE_GALLERY_PATH, urlencoding::encode(tag))
}

/// Sends the browser to `url`.
pub fn navigate(url: &str) {
	let Some(window) = web_sys::window() else {
		warn!("no window to navigate to {}", url);
		return;
	};
	if let Err(e) = window.location().set_href(url) {
		warn!("navigation to {} failed: {:?}", url, e);
	}
}
