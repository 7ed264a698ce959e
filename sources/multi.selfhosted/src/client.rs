use aidoku::{
	alloc::{vec, Vec},
	imports::{
		error::AidokuError,
		net::{set_rate_limit, Request, TimeUnit},
	},
	prelude::*,
	Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Middleware {
	/// At most `permits` requests every `seconds`.
	RateLimit { permits: i32, seconds: i32 },
	Header {
		name: &'static str,
		value: &'static str,
	},
}

/// Network settings for the source, described as data and applied once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
	pub middleware: Vec<Middleware>,
}

impl ClientConfig {
	/// The configuration shared by the hosted sources.
	pub fn shared() -> Self {
		Self {
			middleware: vec![
				Middleware::RateLimit {
					permits: 5,
					seconds: 1,
				},
				Middleware::Header {
					name: "Accept",
					value: "application/json, image/*;q=0.9, */*;q=0.8",
				},
			],
		}
	}

	/// Drops every rate limit, keeping the rest of the configuration.
	pub fn without_rate_limit(mut self) -> Self {
		self.middleware
			.retain(|middleware| !matches!(middleware, Middleware::RateLimit { .. }));
		self
	}

	/// Registers host-wide middleware. Call once, from `Source::new`.
	pub fn install(&self) {
		for middleware in &self.middleware {
			if let Middleware::RateLimit { permits, seconds } = middleware {
				set_rate_limit(*permits, *seconds, TimeUnit::Seconds);
			}
		}
	}

	/// Adds per-request middleware.
	pub fn apply(&self, mut request: Request) -> Request {
		for middleware in &self.middleware {
			if let Middleware::Header { name, value } = middleware {
				request = request.header(name, value);
			}
		}
		request
	}

	/// Sends `request` and returns the body of a successful response.
	/// Failures are returned as is, never retried.
	pub fn fetch(&self, request: Request) -> Result<Vec<u8>> {
		let response = self.apply(request).send()?;
		let status = response.status_code();
		if !(200..300).contains(&status) {
			return Err(AidokuError::Message(format!("Server returned HTTP {status}")));
		}
		Ok(response.get_data()?)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use aidoku_test::aidoku_test;

	#[aidoku_test]
	fn shared_config_is_rate_limited() {
		assert!(ClientConfig::shared()
			.middleware
			.iter()
			.any(|middleware| matches!(middleware, Middleware::RateLimit { .. })));
	}

	#[aidoku_test]
	fn rate_limit_is_excluded() {
		let shared = ClientConfig::shared();
		let config = shared.clone().without_rate_limit();
		assert!(!config
			.middleware
			.iter()
			.any(|middleware| matches!(middleware, Middleware::RateLimit { .. })));
		let headers = shared
			.middleware
			.into_iter()
			.filter(|middleware| matches!(middleware, Middleware::Header { .. }))
			.collect::<Vec<_>>();
		assert_eq!(config.middleware, headers);
	}

	#[aidoku_test]
	fn excluding_twice_changes_nothing() {
		let once = ClientConfig::shared().without_rate_limit();
		assert_eq!(once.clone().without_rate_limit(), once);
	}
}
