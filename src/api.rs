//! Typed client for Dex's gRPC `api.Dex` service.
//!
//! [`DexClient`] is the handle the bootstrapper returns once the channel is ready. It is cheap
//! to clone: every clone shares the same underlying channel, and tonic multiplexes concurrent
//! calls over it.

pub mod types;

pub use types::*;

// crates.io
use tonic::{
	GrpcMethod, IntoRequest, Response, Status,
	client::{Grpc, GrpcService},
	codegen::{Body, Bytes, StdError, http::uri::PathAndQuery},
};
use tonic_prost::ProstCodec;

const SERVICE: &str = "api.Dex";

/// Client for the `api.Dex` service.
#[derive(Clone, Debug)]
pub struct DexClient<T> {
	inner: Grpc<T>,
}
impl<T> DexClient<T>
where
	T: GrpcService<tonic::body::Body>,
	T::Error: Into<StdError>,
	T::ResponseBody: 'static + Body<Data = Bytes> + Send,
	<T::ResponseBody as Body>::Error: Into<StdError> + Send,
{
	/// Wraps an established transport.
	pub fn new(inner: T) -> Self {
		Self { inner: Grpc::new(inner) }
	}

	/// Returns the Dex server and API versions.
	pub async fn get_version(
		&mut self,
		request: impl IntoRequest<VersionReq>,
	) -> Result<Response<VersionResp>, Status> {
		self.unary(request, "GetVersion", "/api.Dex/GetVersion").await
	}

	/// Returns the OIDC discovery document.
	pub async fn get_discovery(
		&mut self,
		request: impl IntoRequest<DiscoveryReq>,
	) -> Result<Response<DiscoveryResp>, Status> {
		self.unary(request, "GetDiscovery", "/api.Dex/GetDiscovery").await
	}

	/// Fetches a client by identifier.
	pub async fn get_client(
		&mut self,
		request: impl IntoRequest<GetClientReq>,
	) -> Result<Response<GetClientResp>, Status> {
		self.unary(request, "GetClient", "/api.Dex/GetClient").await
	}

	/// Creates a client.
	pub async fn create_client(
		&mut self,
		request: impl IntoRequest<CreateClientReq>,
	) -> Result<Response<CreateClientResp>, Status> {
		self.unary(request, "CreateClient", "/api.Dex/CreateClient").await
	}

	/// Updates an existing client.
	pub async fn update_client(
		&mut self,
		request: impl IntoRequest<UpdateClientReq>,
	) -> Result<Response<UpdateClientResp>, Status> {
		self.unary(request, "UpdateClient", "/api.Dex/UpdateClient").await
	}

	/// Deletes a client.
	pub async fn delete_client(
		&mut self,
		request: impl IntoRequest<DeleteClientReq>,
	) -> Result<Response<DeleteClientResp>, Status> {
		self.unary(request, "DeleteClient", "/api.Dex/DeleteClient").await
	}

	/// Lists configured connectors.
	pub async fn list_connectors(
		&mut self,
		request: impl IntoRequest<ListConnectorReq>,
	) -> Result<Response<ListConnectorResp>, Status> {
		self.unary(request, "ListConnectors", "/api.Dex/ListConnectors").await
	}

	/// Creates a connector.
	pub async fn create_connector(
		&mut self,
		request: impl IntoRequest<CreateConnectorReq>,
	) -> Result<Response<CreateConnectorResp>, Status> {
		self.unary(request, "CreateConnector", "/api.Dex/CreateConnector").await
	}

	/// Updates an existing connector.
	pub async fn update_connector(
		&mut self,
		request: impl IntoRequest<UpdateConnectorReq>,
	) -> Result<Response<UpdateConnectorResp>, Status> {
		self.unary(request, "UpdateConnector", "/api.Dex/UpdateConnector").await
	}

	/// Deletes a connector.
	pub async fn delete_connector(
		&mut self,
		request: impl IntoRequest<DeleteConnectorReq>,
	) -> Result<Response<DeleteConnectorResp>, Status> {
		self.unary(request, "DeleteConnector", "/api.Dex/DeleteConnector").await
	}

	async fn unary<Req, Resp>(
		&mut self,
		request: impl IntoRequest<Req>,
		method: &'static str,
		path: &'static str,
	) -> Result<Response<Resp>, Status>
	where
		Req: 'static + prost::Message + Send + Sync,
		Resp: 'static + prost::Message + Default + Send + Sync,
	{
		self.inner
			.ready()
			.await
			.map_err(|e| Status::unknown(format!("Service was not ready: {}", e.into())))?;

		let mut request = request.into_request();

		request.extensions_mut().insert(GrpcMethod::new(SERVICE, method));

		self.inner
			.unary(request, PathAndQuery::from_static(path), ProstCodec::<Req, Resp>::default())
			.await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use prost::Message;
	use tonic::transport::Endpoint;
	// self
	use super::*;

	#[test]
	fn messages_use_dex_field_numbers() {
		let client = Client { id: "web".into(), public: true, ..Default::default() };
		let bytes = CreateClientReq { client: Some(client.clone()) }.encode_to_vec();
		// Field 1, length-delimited, wrapping field 1 (string) and field 5 (varint).
		let expected = [0x0a, 0x07, 0x0a, 0x03, b'w', b'e', b'b', 0x28, 0x01];

		assert_eq!(bytes, expected);
		assert_eq!(
			CreateClientReq::decode(bytes.as_slice()).expect("Round trip should decode."),
			CreateClientReq { client: Some(client) },
		);
	}

	#[tokio::test]
	async fn calls_over_an_unreachable_channel_fail_with_status() {
		let channel = Endpoint::from_static("http://127.0.0.1:1").connect_lazy();
		let mut client = DexClient::new(channel);
		let status = client
			.get_version(VersionReq {})
			.await
			.expect_err("Nothing listens on port 1.");

		assert!(matches!(status.code(), tonic::Code::Unavailable | tonic::Code::Unknown));
	}
}
