use aidoku::{
	alloc::{String, Vec},
	imports::{error::AidokuError, net::Request},
	prelude::*,
	Result,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const ENDPOINT: &str = "/api/graphql";

const POPULAR_QUERY: &str = "query Popular($page: Int!, $includeAdult: Boolean!) {
	search(page: $page, includeAdult: $includeAdult, sort: POPULARITY) {
		id
		title
	}
}";

const LATEST_QUERY: &str = "query Latest($page: Int!, $includeAdult: Boolean!) {
	search(page: $page, includeAdult: $includeAdult, sort: LATEST_UPDATE) {
		id
		title
	}
}";

const SEARCH_QUERY: &str = "query Search($term: String!, $page: Int!, $includeAdult: Boolean!) {
	search(term: $term, page: $page, includeAdult: $includeAdult) {
		id
		title
	}
}";

const DETAILS_QUERY: &str = "query Details($id: ID!) {
	manga(id: $id) {
		id
		title
		authors
		artists
		description
		genres
		status
	}
}";

const CHAPTERS_QUERY: &str = "query Chapters($id: ID!) {
	manga(id: $id) {
		chapters {
			mangaId
			index
			title
			lastModified
			scanlators
		}
	}
}";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PageVariables<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	term: Option<&'a str>,
	page: i32,
	include_adult: bool,
}

#[derive(Serialize, Debug)]
struct IdVariables<'a> {
	id: &'a str,
}

#[derive(Serialize, Debug)]
struct Payload<'a, V> {
	query: &'a str,
	variables: V,
}

/// A GraphQL POST, ready to hand to the host.
#[derive(Debug, Clone)]
pub struct GraphQlRequest {
	pub url: String,
	pub body: Vec<u8>,
}

impl GraphQlRequest {
	fn new<V: Serialize>(base_url: &str, query: &str, variables: V) -> Result<Self> {
		let body = serde_json::to_vec(&Payload { query, variables })
			.map_err(|_| AidokuError::message("Unable to encode request"))?;
		Ok(Self {
			url: format!("{base_url}{ENDPOINT}"),
			body,
		})
	}

	pub fn into_request(self) -> Result<Request> {
		Ok(Request::post(&self.url)?
			.header("Content-Type", "application/json")
			.body(self.body))
	}
}

pub fn popular(base_url: &str, page: i32) -> Result<GraphQlRequest> {
	GraphQlRequest::new(
		base_url,
		POPULAR_QUERY,
		PageVariables {
			term: None,
			page,
			include_adult: true,
		},
	)
}

pub fn latest(base_url: &str, page: i32) -> Result<GraphQlRequest> {
	GraphQlRequest::new(
		base_url,
		LATEST_QUERY,
		PageVariables {
			term: None,
			page,
			include_adult: true,
		},
	)
}

pub fn search(base_url: &str, page: i32, term: &str) -> Result<GraphQlRequest> {
	GraphQlRequest::new(
		base_url,
		SEARCH_QUERY,
		PageVariables {
			term: Some(term),
			page,
			include_adult: true,
		},
	)
}

pub fn details(base_url: &str, manga_id: &str) -> Result<GraphQlRequest> {
	GraphQlRequest::new(base_url, DETAILS_QUERY, IdVariables { id: manga_id })
}

pub fn chapters(base_url: &str, manga_id: &str) -> Result<GraphQlRequest> {
	GraphQlRequest::new(base_url, CHAPTERS_QUERY, IdVariables { id: manga_id })
}

#[derive(Deserialize, Debug)]
struct Envelope<T> {
	data: Option<T>,
	#[serde(default)]
	errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQlError {
	message: String,
}

/// Decodes the `data` member of a GraphQL response. A non-empty `errors`
/// member is reported with the server's first message.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
	let envelope = serde_json::from_slice::<Envelope<T>>(body)
		.map_err(|_| AidokuError::JsonParseError)?;
	if let Some(error) = envelope.errors.and_then(|errors| errors.into_iter().next()) {
		println!("graphql error: {}", error.message);
		return Err(AidokuError::Message(error.message));
	}
	envelope.data.ok_or(AidokuError::JsonParseError)
}
