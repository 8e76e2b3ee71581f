//! Browser `fetch` wrapper for the graph server endpoints.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, Response};

use super::error::{ApiError, describe_js};
use super::reply::{self, Ack, ImpactReply, SnapshotReply};
use super::types::{NewEdge, NewNode};

/// Server routes used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	GetGraph,
	AddNode,
	AddEdge,
	UploadData,
	QueryImpacts,
	LoadSampleData,
}

impl Endpoint {
	pub fn path(self) -> &'static str {
		match self {
			Endpoint::GetGraph => "/api/get_graph",
			Endpoint::AddNode => "/api/add_node",
			Endpoint::AddEdge => "/api/add_edge",
			Endpoint::UploadData => "/api/upload_data",
			Endpoint::QueryImpacts => "/api/query_impacts",
			Endpoint::LoadSampleData => "/api/load_sample_data",
		}
	}
}

/// Thin HTTP client; every call resolves to the raw body decoded by [`reply`].
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
	base: String,
}

impl ApiClient {
	pub fn new(base: impl Into<String>) -> Self {
		let base: String = base.into();
		Self {
			base: base.trim_end_matches('/').to_string(),
		}
	}

	pub fn url(&self, endpoint: Endpoint) -> String {
		format!("{}{}", self.base, endpoint.path())
	}

	pub async fn get_graph(&self) -> Result<SnapshotReply, ApiError> {
		let body = self.send("GET", &self.url(Endpoint::GetGraph), None).await?;
		reply::decode_snapshot(&body)
	}

	pub async fn add_node(&self, node: &NewNode) -> Result<Ack, ApiError> {
		self.post_json(Endpoint::AddNode, node).await
	}

	pub async fn add_edge(&self, edge: &NewEdge) -> Result<Ack, ApiError> {
		self.post_json(Endpoint::AddEdge, edge).await
	}

	pub async fn upload_data(&self, file: &File) -> Result<Ack, ApiError> {
		let form = FormData::new().map_err(|e| ApiError::Request(describe_js(&e)))?;
		form.append_with_blob_and_filename("file", file, &file.name())
			.map_err(|e| ApiError::Request(describe_js(&e)))?;
		let body = self
			.send("POST", &self.url(Endpoint::UploadData), Some(form.into()))
			.await?;
		reply::decode_ack(&body)
	}

	pub async fn query_impacts(&self, source: &str) -> Result<ImpactReply, ApiError> {
		let url = format!(
			"{}?source={}",
			self.url(Endpoint::QueryImpacts),
			String::from(js_sys::encode_uri_component(source))
		);
		let body = self.send("GET", &url, None).await?;
		reply::decode_impacts(&body)
	}

	pub async fn load_sample_data(&self) -> Result<Ack, ApiError> {
		let body = self
			.send("POST", &self.url(Endpoint::LoadSampleData), None)
			.await?;
		reply::decode_ack(&body)
	}

	async fn post_json<T: Serialize>(&self, endpoint: Endpoint, payload: &T) -> Result<Ack, ApiError> {
		let json = serde_json::to_string(payload)?;
		let body = self
			.send("POST", &self.url(endpoint), Some(JsValue::from_str(&json)))
			.await?;
		reply::decode_ack(&body)
	}

	/// Issues the request and returns the response text. The status code is
	/// not inspected; error replies carry a JSON body.
	async fn send(&self, method: &str, url: &str, body: Option<JsValue>) -> Result<String, ApiError> {
		let window = web_sys::window().ok_or(ApiError::NoWindow)?;

		let init = RequestInit::new();
		init.set_method(method);
		if let Some(body) = body {
			// Multipart bodies set their own content type with the boundary.
			if body.is_string() {
				let headers = Headers::new().map_err(|e| ApiError::Request(describe_js(&e)))?;
				headers
					.set("Content-Type", "application/json")
					.map_err(|e| ApiError::Request(describe_js(&e)))?;
				init.set_headers(&headers);
			}
			init.set_body(&body);
		}

		let request = Request::new_with_str_and_init(url, &init)
			.map_err(|e| ApiError::Request(describe_js(&e)))?;
		let response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| ApiError::Transport(describe_js(&e)))?;
		let response: Response = response
			.dyn_into()
			.map_err(|e| ApiError::Transport(describe_js(&e)))?;
		log::debug!(
			"impact-graph: {} {} -> {}",
			method,
			url,
			response.status()
		);

		let text = response.text().map_err(|e| ApiError::Body(describe_js(&e)))?;
		let text = JsFuture::from(text)
			.await
			.map_err(|e| ApiError::Body(describe_js(&e)))?;
		text.as_string()
			.ok_or_else(|| ApiError::Body("body is not text".into()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn urls_join_base_and_route() {
		let client = ApiClient::new("http://localhost:5000/");
		assert_eq!(
			client.url(Endpoint::GetGraph),
			"http://localhost:5000/api/get_graph"
		);
		assert_eq!(
			ApiClient::default().url(Endpoint::LoadSampleData),
			"/api/load_sample_data"
		);
	}
}
