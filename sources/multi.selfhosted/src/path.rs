//! Manga and chapter keys.
//!
//! The host only keeps a single opaque key per manga and chapter, so the
//! server ids are packed into path-like strings:
//! `/manga/{mangaId}` and `/manga/{mangaId}/chapter/{chapterIndex}`.
//! Ids are not escaped; an id containing `/` will not decode.
use aidoku::{
	alloc::String,
	imports::error::AidokuError,
	prelude::*,
	DeepLinkResult, Result,
};

const MANGA_PREFIX: &str = "/manga/";
const CHAPTER_SEGMENT: &str = "/chapter/";

pub fn manga_path(manga_id: &str) -> String {
	format!("{MANGA_PREFIX}{manga_id}")
}

pub fn chapter_path(manga_id: &str, index: f64) -> String {
	format!(
		"{MANGA_PREFIX}{manga_id}{CHAPTER_SEGMENT}{}",
		format_index(index)
	)
}

/// `3.0` formats as `3`, `2.5` as `2.5`.
pub fn format_index(index: f64) -> String {
	format!("{index}")
}

pub fn manga_id(path: &str) -> Result<&str> {
	let rest = path
		.strip_prefix(MANGA_PREFIX)
		.ok_or(AidokuError::message("Invalid manga key"))?;
	let id = match rest.find(CHAPTER_SEGMENT) {
		Some(end) => &rest[..end],
		None => rest,
	};
	if id.is_empty() || id.contains('/') {
		return Err(AidokuError::message("Invalid manga key"));
	}
	Ok(id)
}

/// Returns `(manga id, chapter index)` as they appear in the key.
pub fn chapter_ids(path: &str) -> Result<(&str, &str)> {
	let manga_id = manga_id(path)?;
	let index = path[MANGA_PREFIX.len() + manga_id.len()..]
		.strip_prefix(CHAPTER_SEGMENT)
		.filter(|index| !index.is_empty() && !index.contains('/'))
		.ok_or(AidokuError::message("Invalid chapter key"))?;
	Ok((manga_id, index))
}

/// Maps a web link on the configured server to a manga or chapter key.
pub fn deep_link(base_url: &str, url: &str) -> Option<DeepLinkResult> {
	let path = url
		.strip_prefix(base_url)?
		.split(|c: char| c == '?' || c == '#')
		.next()
		.unwrap_or_default()
		.trim_end_matches('/');

	if let Ok((manga_id, index)) = chapter_ids(path) {
		// ex: http://127.0.0.1:4567/manga/7/chapter/3.0
		let index = index.parse::<f64>().ok()?;
		Some(DeepLinkResult::Chapter {
			manga_key: manga_path(manga_id),
			key: chapter_path(manga_id, index),
		})
	} else {
		manga_id(path).ok().map(|id| DeepLinkResult::Manga {
			key: manga_path(id),
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use aidoku_test::aidoku_test;

	#[aidoku_test]
	fn manga_path_round_trip() {
		for id in ["7", "abc-123", "9f1c2b7e-0d7e-4d4f-a0b1-2c3d4e5f6a7b"] {
			let path = manga_path(id);
			assert_eq!(manga_id(&path).ok(), Some(id));
		}
		assert_eq!(manga_path("7"), "/manga/7");
	}

	#[aidoku_test]
	fn chapter_path_round_trip() {
		let path = chapter_path("42", 12.0);
		assert_eq!(path, "/manga/42/chapter/12");
		assert_eq!(chapter_ids(&path).ok(), Some(("42", "12")));

		let path = chapter_path("42", 12.5);
		assert_eq!(path, "/manga/42/chapter/12.5");
		assert_eq!(chapter_ids(&path).ok(), Some(("42", "12.5")));
		assert_eq!(manga_id(&path).ok(), Some("42"));
	}

	#[aidoku_test]
	fn rejects_foreign_keys() {
		assert!(manga_id("/series/7").is_err());
		assert!(manga_id("/manga/").is_err());
		assert!(chapter_ids("/manga/7").is_err());
		assert!(chapter_ids("/manga/7/chapter/").is_err());
		assert!(chapter_ids("/manga/a/b/chapter/1").is_err());
	}

	#[aidoku_test]
	fn deep_links() {
		const BASE_URL: &str = "http://nas:4567";
		match deep_link(BASE_URL, "http://nas:4567/manga/7/") {
			Some(DeepLinkResult::Manga { key }) => assert_eq!(key, "/manga/7"),
			_ => panic!("expected manga link"),
		}
		match deep_link(BASE_URL, "http://nas:4567/manga/7/chapter/3.0?page=2") {
			Some(DeepLinkResult::Chapter { manga_key, key }) => {
				assert_eq!(manga_key, "/manga/7");
				assert_eq!(key, "/manga/7/chapter/3");
			}
			_ => panic!("expected chapter link"),
		}
		assert!(deep_link(BASE_URL, "https://example.com/manga/7").is_none());
		assert!(deep_link(BASE_URL, "http://nas:4567/library").is_none());
		assert!(deep_link(BASE_URL, "http://nas:4567/manga/7/chapter/latest").is_none());
	}

	#[aidoku_test]
	fn index_formatting() {
		assert_eq!(format_index(3.0), "3");
		assert_eq!(format_index(2.5), "2.5");
		assert_eq!(format_index(0.0), "0");
	}
}
