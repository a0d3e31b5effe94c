//! Protobuf messages of Dex's `api` package (`api/v2/api.proto`).

/// OAuth2 client registered with Dex.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Client {
	/// Client identifier.
	#[prost(string, tag = "1")]
	pub id: String,
	/// Client secret.
	#[prost(string, tag = "2")]
	pub secret: String,
	/// Allowed redirect URIs.
	#[prost(string, repeated, tag = "3")]
	pub redirect_uris: Vec<String>,
	/// Clients allowed to issue tokens on behalf of this one.
	#[prost(string, repeated, tag = "4")]
	pub trusted_peers: Vec<String>,
	/// Whether the client is public (no secret).
	#[prost(bool, tag = "5")]
	pub public: bool,
	/// Display name.
	#[prost(string, tag = "6")]
	pub name: String,
	/// Logo shown on the approval screen.
	#[prost(string, tag = "7")]
	pub logo_url: String,
}

/// `GetClient` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct GetClientReq {
	/// Client identifier.
	#[prost(string, tag = "1")]
	pub id: String,
}

/// `GetClient` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct GetClientResp {
	/// Stored client.
	#[prost(message, optional, tag = "1")]
	pub client: Option<Client>,
}

/// `CreateClient` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CreateClientReq {
	/// Client to create.
	#[prost(message, optional, tag = "1")]
	pub client: Option<Client>,
}

/// `CreateClient` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CreateClientResp {
	/// Set when a client with the same identifier already exists.
	#[prost(bool, tag = "1")]
	pub already_exists: bool,
	/// Created client, including a generated secret when none was supplied.
	#[prost(message, optional, tag = "2")]
	pub client: Option<Client>,
}

/// `UpdateClient` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct UpdateClientReq {
	/// Client identifier.
	#[prost(string, tag = "1")]
	pub id: String,
	/// Replacement redirect URIs.
	#[prost(string, repeated, tag = "2")]
	pub redirect_uris: Vec<String>,
	/// Replacement trusted peers.
	#[prost(string, repeated, tag = "3")]
	pub trusted_peers: Vec<String>,
	/// Replacement display name.
	#[prost(string, tag = "4")]
	pub name: String,
	/// Replacement logo URL.
	#[prost(string, tag = "5")]
	pub logo_url: String,
}

/// `UpdateClient` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct UpdateClientResp {
	/// Set when no client matched.
	#[prost(bool, tag = "1")]
	pub not_found: bool,
}

/// `DeleteClient` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DeleteClientReq {
	/// Client identifier.
	#[prost(string, tag = "1")]
	pub id: String,
}

/// `DeleteClient` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DeleteClientResp {
	/// Set when no client matched.
	#[prost(bool, tag = "1")]
	pub not_found: bool,
}

/// Upstream identity connector.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Connector {
	/// Connector identifier.
	#[prost(string, tag = "1")]
	pub id: String,
	/// Connector type, e.g. `oidc`, `ldap`, `github`.
	#[prost(string, tag = "2")]
	pub r#type: String,
	/// Display name.
	#[prost(string, tag = "3")]
	pub name: String,
	/// JSON-encoded connector configuration.
	#[prost(bytes = "vec", tag = "4")]
	pub config: Vec<u8>,
}

/// `CreateConnector` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CreateConnectorReq {
	/// Connector to create.
	#[prost(message, optional, tag = "1")]
	pub connector: Option<Connector>,
}

/// `CreateConnector` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CreateConnectorResp {
	/// Set when a connector with the same identifier already exists.
	#[prost(bool, tag = "1")]
	pub already_exists: bool,
}

/// `UpdateConnector` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct UpdateConnectorReq {
	/// Connector identifier.
	#[prost(string, tag = "1")]
	pub id: String,
	/// Replacement type; empty keeps the current one.
	#[prost(string, tag = "2")]
	pub new_type: String,
	/// Replacement name; empty keeps the current one.
	#[prost(string, tag = "3")]
	pub new_name: String,
	/// Replacement configuration; empty keeps the current one.
	#[prost(bytes = "vec", tag = "4")]
	pub new_config: Vec<u8>,
}

/// `UpdateConnector` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct UpdateConnectorResp {
	/// Set when no connector matched.
	#[prost(bool, tag = "1")]
	pub not_found: bool,
}

/// `DeleteConnector` request.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DeleteConnectorReq {
	/// Connector identifier.
	#[prost(string, tag = "1")]
	pub id: String,
}

/// `DeleteConnector` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DeleteConnectorResp {
	/// Set when no connector matched.
	#[prost(bool, tag = "1")]
	pub not_found: bool,
}

/// `ListConnectors` request.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct ListConnectorReq {}

/// `ListConnectors` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ListConnectorResp {
	/// Configured connectors.
	#[prost(message, repeated, tag = "1")]
	pub connectors: Vec<Connector>,
}

/// `GetVersion` request.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct VersionReq {}

/// `GetVersion` response.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct VersionResp {
	/// Semantic version of the Dex server.
	#[prost(string, tag = "1")]
	pub server: String,
	/// API version; bumped on breaking changes.
	#[prost(int32, tag = "2")]
	pub api: i32,
}

/// `GetDiscovery` request.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct DiscoveryReq {}

/// `GetDiscovery` response, mirroring the OIDC discovery document.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DiscoveryResp {
	/// Issuer URL.
	#[prost(string, tag = "1")]
	pub issuer: String,
	/// Authorization endpoint.
	#[prost(string, tag = "2")]
	pub authorization_endpoint: String,
	/// Token endpoint.
	#[prost(string, tag = "3")]
	pub token_endpoint: String,
	/// JWKS URI.
	#[prost(string, tag = "4")]
	pub jwks_uri: String,
	/// Userinfo endpoint.
	#[prost(string, tag = "5")]
	pub userinfo_endpoint: String,
	/// Device authorization endpoint.
	#[prost(string, tag = "6")]
	pub device_authorization_endpoint: String,
	/// Token introspection endpoint.
	#[prost(string, tag = "7")]
	pub introspection_endpoint: String,
	/// Supported grant types.
	#[prost(string, repeated, tag = "8")]
	pub grant_types_supported: Vec<String>,
	/// Supported response types.
	#[prost(string, repeated, tag = "9")]
	pub response_types_supported: Vec<String>,
	/// Supported subject types.
	#[prost(string, repeated, tag = "10")]
	pub subject_types_supported: Vec<String>,
	/// Supported ID token signing algorithms.
	#[prost(string, repeated, tag = "11")]
	pub id_token_signing_alg_values_supported: Vec<String>,
	/// Supported PKCE challenge methods.
	#[prost(string, repeated, tag = "12")]
	pub code_challenge_methods_supported: Vec<String>,
	/// Supported scopes.
	#[prost(string, repeated, tag = "13")]
	pub scopes_supported: Vec<String>,
	/// Supported token endpoint auth methods.
	#[prost(string, repeated, tag = "14")]
	pub token_endpoint_auth_methods_supported: Vec<String>,
	/// Supported claims.
	#[prost(string, repeated, tag = "15")]
	pub claims_supported: Vec<String>,
}
