//! # plugscope-gateway
//!
//! Resource gateway for the Flex Plugin Service.
//! Exposes the paginated REST collections (configurations, configured plugins,
//! plugins, plugin versions, releases) behind one async trait.
//!
//! ## Features
//! - HTTP backend with basic auth and per-request timeout
//! - Automatic retry with exponential backoff for transient failures
//! - In-memory backend with configurable page size and injected failures

pub mod error;
pub mod gateways;
pub mod resource;
pub mod retry;
pub mod r#trait;

// Core trait and types
pub use r#trait::ResourceGateway;
pub use resource::{
    ConfigurationResource, ConfiguredPluginResource, Page, PluginResource,
    PluginVersionResource, ReleaseResource,
};

// Error and retry
pub use error::GatewayError;
pub use retry::RetryConfig;

// Gateway implementations
pub use gateways::http::HttpGateway;
pub use gateways::memory::InMemoryGateway;
