#![no_std]
use aidoku::{
	alloc::{String, Vec},
	imports::{error::AidokuError, net::Request, std::send_partial_result},
	prelude::*,
	Chapter, DeepLinkHandler, DeepLinkResult, FilterValue, ImageRequestProvider, Listing,
	ListingProvider, Manga, MangaPageResult, Page, PageContext, Result, Source,
};

mod catalog;
mod client;
mod graphql;
mod models;
mod path;
mod settings;

use catalog::Catalog;
use client::ClientConfig;

struct SelfHosted {
	client: ClientConfig,
}

impl Source for SelfHosted {
	fn new() -> Self {
		let client = ClientConfig::shared().without_rate_limit();
		client.install();
		Self { client }
	}

	fn get_search_manga_list(
		&self,
		query: Option<String>,
		page: i32,
		_filters: Vec<FilterValue>,
	) -> Result<MangaPageResult> {
		match query.as_deref().map(str::trim) {
			Some(term) if !term.is_empty() => self.search(term, page),
			_ => self.list_popular(page),
		}
	}

	fn get_manga_update(
		&self,
		mut manga: Manga,
		needs_details: bool,
		needs_chapters: bool,
	) -> Result<Manga> {
		if needs_details {
			manga.copy_from(self.get_details(&manga.key)?);
			if needs_chapters {
				send_partial_result(&manga);
			}
		}

		if needs_chapters {
			manga.chapters = Some(self.list_chapters(&manga.key)?);
		}

		Ok(manga)
	}

	fn get_page_list(&self, _manga: Manga, chapter: Chapter) -> Result<Vec<Page>> {
		self.list_pages(&chapter.key)
	}
}

impl ListingProvider for SelfHosted {
	fn get_manga_list(&self, listing: Listing, page: i32) -> Result<MangaPageResult> {
		match listing.id.as_str() {
			"popular" => self.list_popular(page),
			"latest" => self.list_latest(page),
			_ => Err(AidokuError::message("Invalid listing")),
		}
	}
}

impl ImageRequestProvider for SelfHosted {
	fn get_image_request(&self, url: String, _context: Option<PageContext>) -> Result<Request> {
		Ok(self.client.apply(Request::get(&url)?))
	}
}

impl DeepLinkHandler for SelfHosted {
	fn handle_deep_link(&self, url: String) -> Result<Option<DeepLinkResult>> {
		let base_url = settings::get_base_url();
		Ok(path::deep_link(&base_url, &url))
	}
}

register_source!(SelfHosted, ListingProvider, ImageRequestProvider, DeepLinkHandler);
