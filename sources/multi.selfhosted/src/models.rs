use crate::{graphql, path};
use aidoku::{
	alloc::{String, Vec},
	imports::error::AidokuError,
	prelude::*,
	Chapter, Manga, MangaPageResult, MangaStatus, Page, PageContent, Result,
};
use chrono::DateTime;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SearchData {
	pub search: Vec<CatalogEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MangaData<T> {
	pub manga: T,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CatalogEntry {
	pub id: String,
	pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MangaDetail {
	pub id: String,
	pub title: String,
	pub authors: Option<Vec<String>>,
	pub artists: Option<Vec<String>>,
	pub description: Option<String>,
	pub genres: Option<Vec<String>>,
	pub status: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChapterList {
	pub chapters: Vec<ChapterEntry>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChapterEntry {
	pub manga_id: String,
	pub index: f64,
	pub title: Option<String>,
	pub last_modified: Option<String>,
	pub scanlators: Option<Vec<String>>,
}

// response of /api/v1/manga/{id}/chapter/{index}
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPages {
	pub page_count: u32,
}

pub fn thumbnail_url(base_url: &str, manga_id: &str) -> String {
	format!("{base_url}/api/v1/manga/{manga_id}/thumbnail")
}

impl CatalogEntry {
	pub fn into_manga(self, base_url: &str) -> Manga {
		let key = path::manga_path(&self.id);
		Manga {
			cover: Some(thumbnail_url(base_url, &self.id)),
			url: Some(format!("{base_url}{key}")),
			key,
			title: self.title,
			..Default::default()
		}
	}
}

impl MangaDetail {
	pub fn status(&self) -> MangaStatus {
		match self.status.as_deref() {
			Some("ONGOING") => MangaStatus::Ongoing,
			Some("COMPLETED") => MangaStatus::Completed,
			Some("HIATUS") => MangaStatus::Hiatus,
			_ => MangaStatus::Unknown,
		}
	}

	pub fn into_manga(self, base_url: &str) -> Manga {
		let status = self.status();
		let key = path::manga_path(&self.id);
		Manga {
			cover: Some(thumbnail_url(base_url, &self.id)),
			url: Some(format!("{base_url}{key}")),
			key,
			title: self.title,
			authors: Some(self.authors.unwrap_or_default()),
			artists: Some(self.artists.unwrap_or_default()),
			description: self.description,
			tags: Some(self.genres.unwrap_or_default()),
			status,
			..Default::default()
		}
	}
}

impl ChapterEntry {
	pub fn display_title(&self) -> String {
		self.title
			.clone()
			.unwrap_or_else(|| format!("Chapter {}", path::format_index(self.index)))
	}

	pub fn into_chapter(self, base_url: &str) -> Result<Chapter> {
		let date_uploaded = self
			.last_modified
			.as_deref()
			.map(|value| {
				DateTime::parse_from_rfc3339(value)
					.map(|date| date.timestamp())
					.map_err(|_| AidokuError::message("Invalid chapter date"))
			})
			.transpose()?;
		let key = path::chapter_path(&self.manga_id, self.index);
		Ok(Chapter {
			title: Some(self.display_title()),
			chapter_number: Some(self.index as f32),
			date_uploaded,
			scanlators: Some(self.scanlators.unwrap_or_default()),
			url: Some(format!("{base_url}{key}")),
			key,
			..Default::default()
		})
	}
}

pub fn parse_listing(base_url: &str, body: &[u8]) -> Result<MangaPageResult> {
	let entries = graphql::decode::<SearchData>(body)?
		.search
		.into_iter()
		.map(|entry| entry.into_manga(base_url))
		.collect::<Vec<Manga>>();
	// the api has no total, so an empty page is the only end marker
	let has_next_page = !entries.is_empty();
	Ok(MangaPageResult {
		entries,
		has_next_page,
	})
}

pub fn parse_details(base_url: &str, body: &[u8]) -> Result<Manga> {
	Ok(graphql::decode::<MangaData<MangaDetail>>(body)?
		.manga
		.into_manga(base_url))
}

/// Chapters come back in ascending order; the host wants newest first.
pub fn parse_chapters(base_url: &str, body: &[u8]) -> Result<Vec<Chapter>> {
	graphql::decode::<MangaData<ChapterList>>(body)?
		.manga
		.chapters
		.into_iter()
		.rev()
		.map(|entry| entry.into_chapter(base_url))
		.collect()
}

pub fn page_urls(base_url: &str, chapter_path: &str, body: &[u8]) -> Result<Vec<String>> {
	let (manga_id, index) = path::chapter_ids(chapter_path)?;
	let pages = serde_json::from_slice::<ChapterPages>(body)
		.map_err(|_| AidokuError::JsonParseError)?;
	Ok((0..pages.page_count)
		.map(|page| format!("{base_url}/api/v1/manga/{manga_id}/chapter/{index}/page/{page}"))
		.collect())
}

pub fn parse_pages(base_url: &str, chapter_path: &str, body: &[u8]) -> Result<Vec<Page>> {
	Ok(page_urls(base_url, chapter_path, body)?
		.into_iter()
		.map(|url| Page {
			content: PageContent::url(url),
			..Default::default()
		})
		.collect())
}
