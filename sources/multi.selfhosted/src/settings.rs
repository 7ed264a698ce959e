use aidoku::{alloc::String, imports::defaults::defaults_get, prelude::*};

// settings keys
const URL_KEY: &str = "url";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4567";

/// Reads the server url preference. Called at the start of every operation so
/// that a changed setting applies to the next request.
pub fn get_base_url() -> String {
	let value = defaults_get::<String>(URL_KEY).unwrap_or_default();
	if value.trim().is_empty() {
		println!("server url is not set, using {DEFAULT_BASE_URL}");
	}
	normalize_base_url(&value)
}

pub fn normalize_base_url(value: &str) -> String {
	let trimmed = value.trim().trim_end_matches('/');
	if trimmed.is_empty() {
		String::from(DEFAULT_BASE_URL)
	} else {
		String::from(trimmed)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use aidoku_test::aidoku_test;

	#[aidoku_test]
	fn strips_trailing_slashes() {
		assert_eq!(normalize_base_url("http://nas:4567/"), "http://nas:4567");
		assert_eq!(normalize_base_url("http://nas:4567///"), "http://nas:4567");
		assert_eq!(normalize_base_url(" http://nas:4567 "), "http://nas:4567");
	}

	#[aidoku_test]
	fn blank_url_falls_back_to_default() {
		assert_eq!(normalize_base_url(""), DEFAULT_BASE_URL);
		assert_eq!(normalize_base_url("  /"), DEFAULT_BASE_URL);
	}
}
