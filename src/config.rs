//! Runtime configuration shared through the Leptos context.

/// Where the directory API lives and how requests are authenticated.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Base URL of the directory REST API, without trailing slash.
	pub api_base_url: String,
	/// `localStorage` key holding the bearer token issued at sign-in.
	pub token_storage_key: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: option_env!("SQUAD_DIRECTORY_API_URL")
				.unwrap_or("/api")
				.to_string(),
			token_storage_key: "token".to_string(),
		}
	}
}

impl AppConfig {
	/// Join `path` onto the API base, tolerating stray slashes on either side.
	pub fn endpoint(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.api_base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

/// Route of the squad detail page that node clicks navigate to.
pub fn squad_route(id: i64) -> String {
	format!("/squads/{id}")
}
