use thiserror::Error;

/// Failures talking to the directory service.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request to {url} failed: {source}")]
	Request {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("{url} responded with status {status}")]
	Status { url: String, status: u16 },

	#[error("could not decode response from {url}: {message}")]
	Decode { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
