use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use super::types::{Dependency, Squad};
use crate::config::AppConfig;

/// The two collections the dependency graph needs from the directory.
#[async_trait(?Send)]
pub trait DataService {
	async fn fetch_dependencies(&self) -> Result<Vec<Dependency>>;
	async fn fetch_squads(&self) -> Result<Vec<Squad>>;
}

/// REST client for the directory API.
#[derive(Clone, Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	config: AppConfig,
	token: Option<String>,
}

impl ApiClient {
	pub fn new(config: AppConfig) -> Self {
		let token = stored_token(&config.token_storage_key);
		Self {
			http: reqwest::Client::new(),
			config,
			token,
		}
	}

	async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = absolute(self.config.endpoint(path));
		let mut request = self.http.get(&url);
		if let Some(token) = &self.token {
			request = request.bearer_auth(token);
		}

		let response = request.send().await.map_err(|source| ApiError::Request {
			url: url.clone(),
			source,
		})?;
		let status = response.status();
		if !status.is_success() {
			return Err(ApiError::Status {
				url,
				status: status.as_u16(),
			});
		}

		let body = response.text().await.map_err(|source| ApiError::Request {
			url: url.clone(),
			source,
		})?;
		serde_json::from_str(&body).map_err(|err| ApiError::Decode {
			url,
			message: err.to_string(),
		})
	}
}

#[async_trait(?Send)]
impl DataService for ApiClient {
	async fn fetch_dependencies(&self) -> Result<Vec<Dependency>> {
		self.get_json("dependencies").await
	}

	async fn fetch_squads(&self) -> Result<Vec<Squad>> {
		self.get_json("squads").await
	}
}

/// Bearer token left in local storage by the sign-in flow, if any.
fn stored_token(key: &str) -> Option<String> {
	let storage = web_sys::window()?.local_storage().ok()??;
	storage.get_item(key).ok().flatten()
}

/// reqwest only accepts absolute URLs; resolve a root-relative endpoint
/// against the page origin.
fn absolute(url: String) -> String {
	if !url.starts_with('/') {
		return url;
	}
	match web_sys::window().and_then(|window| window.location().origin().ok()) {
		Some(origin) => format!("{origin}{url}"),
		None => url,
	}
}
