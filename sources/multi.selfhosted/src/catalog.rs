use crate::{graphql, models, path, settings, SelfHosted};
use aidoku::{
	alloc::{String, Vec},
	imports::{error::AidokuError, net::Request},
	prelude::*,
	Chapter, Manga, MangaPageResult, Page, Result,
};

/// Operations the source offers to the host. Every call reads the server url
/// once, up front.
pub trait Catalog {
	fn list_popular(&self, page: i32) -> Result<MangaPageResult>;

	fn list_latest(&self, page: i32) -> Result<MangaPageResult>;

	fn search(&self, term: &str, page: i32) -> Result<MangaPageResult>;

	fn get_details(&self, manga_key: &str) -> Result<Manga>;

	fn list_chapters(&self, manga_key: &str) -> Result<Vec<Chapter>>;

	fn list_pages(&self, chapter_key: &str) -> Result<Vec<Page>>;

	/// Images are only ever reached through `Page` values.
	fn resolve_image_url(&self, _page: &Page) -> Result<String> {
		Err(AidokuError::Unimplemented)
	}
}

pub fn page_list_url(base_url: &str, chapter_key: &str) -> Result<String> {
	let (manga_id, index) = path::chapter_ids(chapter_key)?;
	Ok(format!("{base_url}/api/v1/manga/{manga_id}/chapter/{index}"))
}

impl Catalog for SelfHosted {
	fn list_popular(&self, page: i32) -> Result<MangaPageResult> {
		let base_url = settings::get_base_url();
		let body = self
			.client
			.fetch(graphql::popular(&base_url, page)?.into_request()?)?;
		models::parse_listing(&base_url, &body)
	}

	fn list_latest(&self, page: i32) -> Result<MangaPageResult> {
		let base_url = settings::get_base_url();
		let body = self
			.client
			.fetch(graphql::latest(&base_url, page)?.into_request()?)?;
		models::parse_listing(&base_url, &body)
	}

	fn search(&self, term: &str, page: i32) -> Result<MangaPageResult> {
		let base_url = settings::get_base_url();
		let body = self
			.client
			.fetch(graphql::search(&base_url, page, term)?.into_request()?)?;
		models::parse_listing(&base_url, &body)
	}

	fn get_details(&self, manga_key: &str) -> Result<Manga> {
		let base_url = settings::get_base_url();
		let manga_id = path::manga_id(manga_key)?;
		let body = self
			.client
			.fetch(graphql::details(&base_url, manga_id)?.into_request()?)?;
		models::parse_details(&base_url, &body)
	}

	fn list_chapters(&self, manga_key: &str) -> Result<Vec<Chapter>> {
		let base_url = settings::get_base_url();
		let manga_id = path::manga_id(manga_key)?;
		let body = self
			.client
			.fetch(graphql::chapters(&base_url, manga_id)?.into_request()?)?;
		models::parse_chapters(&base_url, &body)
	}

	fn list_pages(&self, chapter_key: &str) -> Result<Vec<Page>> {
		let base_url = settings::get_base_url();
		let url = page_list_url(&base_url, chapter_key)?;
		let body = self.client.fetch(Request::get(&url)?)?;
		models::parse_pages(&base_url, chapter_key, &body)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::client::ClientConfig;
	use aidoku_test::aidoku_test;

	#[aidoku_test]
	fn page_list_url_from_chapter_key() {
		assert_eq!(
			page_list_url("http://nas:4567", "/manga/7/chapter/12.5").ok(),
			Some(String::from("http://nas:4567/api/v1/manga/7/chapter/12.5"))
		);
		assert!(page_list_url("http://nas:4567", "/manga/7").is_err());
	}

	#[aidoku_test]
	fn image_urls_are_not_resolved() {
		let source = SelfHosted {
			client: ClientConfig::shared().without_rate_limit(),
		};
		assert!(matches!(
			source.resolve_image_url(&Page::default()),
			Err(AidokuError::Unimplemented)
		));
	}
}
