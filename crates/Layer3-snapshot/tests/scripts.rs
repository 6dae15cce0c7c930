//! Describe and listing scripts against the in-memory gateway

mod common;

use common::{unique_name, Fixture};
use plugscope_foundation::Error;
use plugscope_gateway::GatewayError;
use plugscope_snapshot::{DiffOptions, Toolkit};

#[tokio::test]
async fn test_describe_flags_active_configuration() {
    let (_, gateway) = Fixture::new(50)
        .configuration("FJA", Some("first"), &[("P1", "1.0", 1)])
        .configuration("FJB", Some("second"), &[("P1", "1.1", 1), ("P2", "2.0", 2)])
        .active("FJB")
        .build();
    let toolkit = Toolkit::new(gateway);

    let active = toolkit.describe("FJB").await.unwrap();
    assert!(active.is_active);
    assert_eq!(active.snapshot.plugins.len(), 2);
    assert_eq!(active.snapshot.plugins[1].unique_name, unique_name("P2"));
    assert_eq!(active.snapshot.plugins[1].plugin_version_sid, "FV-P2-2.0");

    let inactive = toolkit.describe("FJA").await.unwrap();
    assert!(!inactive.is_active);
    assert_eq!(inactive.snapshot.description.as_deref(), Some("first"));

    let by_sentinel = toolkit.describe("active").await.unwrap();
    assert_eq!(by_sentinel, active);
}

#[tokio::test]
async fn test_describe_active_reads_release_once() {
    let (gw, gateway) = Fixture::new(50)
        .configuration("FJA", None, &[("P1", "1.0", 1)])
        .active("FJA")
        .build();

    let described = Toolkit::new(gateway).describe("active").await.unwrap();
    assert!(described.is_active);
    assert_eq!(described.snapshot.sid, "FJA");
    assert_eq!(gw.call_count("active_release").await, 1);
}

#[tokio::test]
async fn test_describe_without_release() {
    let (_, gateway) = Fixture::new(50)
        .configuration("FJA", None, &[("P1", "1.0", 1)])
        .build();
    let toolkit = Toolkit::new(gateway);

    let described = toolkit.describe("FJA").await.unwrap();
    assert!(!described.is_active);

    let err = toolkit.describe("active").await.unwrap_err();
    assert!(matches!(err, Error::NoActiveRelease));
}

#[tokio::test]
async fn test_described_configuration_json_shape() {
    let (_, gateway) = Fixture::new(50)
        .configuration("FJA", None, &[("P1", "1.0", 3)])
        .active("FJA")
        .build();

    let described = Toolkit::new(gateway).describe("FJA").await.unwrap();
    let value = serde_json::to_value(&described).unwrap();

    assert_eq!(value["sid"], "FJA");
    assert_eq!(value["isActive"], true);
    assert_eq!(value["dateCreated"], "2020-09-01T00:00:00Z");
    assert_eq!(value["plugins"][0]["uniqueName"], "plugin-p1");
    assert_eq!(value["plugins"][0]["phase"], 3);
    assert_eq!(value["plugins"][0]["isPrivate"], false);
}

#[tokio::test]
async fn test_list_plugins_flags_installed() {
    let (_, gateway) = Fixture::new(2)
        .configuration("FJA", None, &[("P1", "1.0", 1), ("P3", "1.0", 1), ("P4", "1.0", 2)])
        .plugin("P2")
        .active("FJA")
        .build();
    let toolkit = Toolkit::new(gateway);

    let first = toolkit.list_plugins(None).await.unwrap();
    let flags: Vec<_> = first
        .plugins
        .iter()
        .map(|p| (p.sid.as_str(), p.is_active))
        .collect();
    assert_eq!(flags, vec![("P1", true), ("P3", true)]);
    assert_eq!(first.next_page_token.as_deref(), Some("page-1"));

    let second = toolkit
        .list_plugins(first.next_page_token.as_deref())
        .await
        .unwrap();
    let flags: Vec<_> = second
        .plugins
        .iter()
        .map(|p| (p.sid.as_str(), p.is_active))
        .collect();
    assert_eq!(flags, vec![("P4", true), ("P2", false)]);
    assert!(second.next_page_token.is_none());
}

#[tokio::test]
async fn test_list_plugins_without_release_skips_installs() {
    let (gw, gateway) = Fixture::new(50)
        .configuration("FJA", None, &[("P1", "1.0", 1)])
        .build();

    let listing = Toolkit::new(gateway).list_plugins(None).await.unwrap();
    assert_eq!(listing.plugins.len(), 1);
    assert!(!listing.plugins[0].is_active);
    assert_eq!(listing.plugins[0].name, "plugin-p1");
    assert_eq!(listing.plugins[0].friendly_name, "Plugin P1");
    assert_eq!(gw.call_count("configured_plugins:FJA:0").await, 0);
}

#[tokio::test]
async fn test_list_plugins_propagates_release_failure() {
    let (_, gateway) = Fixture::new(50)
        .configuration("FJA", None, &[("P1", "1.0", 1)])
        .with(|g| g.with_failure("active_release", GatewayError::ServerError("unavailable".into())))
        .build();

    let err = Toolkit::new(gateway).list_plugins(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_list_configurations_without_release() {
    let (gw, gateway) = Fixture::new(50)
        .configuration("FJA", Some("first"), &[])
        .configuration("FJB", None, &[])
        .build();

    let listing = Toolkit::new(gateway).list_configurations(None).await.unwrap();
    let flags: Vec<_> = listing
        .configurations
        .iter()
        .map(|c| (c.sid.as_str(), c.is_active))
        .collect();
    assert_eq!(flags, vec![("FJA", false), ("FJB", false)]);
    assert!(listing.next_page_token.is_none());
    assert_eq!(gw.call_count("configurations:0").await, 1);
    assert_eq!(gw.call_count("active_release").await, 1);
}

#[tokio::test]
async fn test_list_configurations_release_on_another_configuration() {
    let (gw, gateway) = Fixture::new(1)
        .configuration("FJA", Some("first"), &[])
        .configuration("FJB", None, &[])
        .active("FJB")
        .build();

    let listing = Toolkit::new(gateway).list_configurations(None).await.unwrap();
    assert_eq!(listing.configurations.len(), 1);
    assert_eq!(listing.configurations[0].sid, "FJA");
    assert!(!listing.configurations[0].is_active);
    assert_eq!(listing.next_page_token.as_deref(), Some("page-1"));
    assert_eq!(gw.call_count("configurations:0").await, 1);
    assert_eq!(gw.call_count("active_release").await, 1);
}

#[tokio::test]
async fn test_list_configurations_release_on_this_configuration() {
    let (gw, gateway) = Fixture::new(50)
        .configuration("FJA", Some("first"), &[("P1", "1.0", 1)])
        .active("FJA")
        .build();

    let listing = Toolkit::new(gateway).list_configurations(None).await.unwrap();
    let value = serde_json::to_value(&listing).unwrap();
    let first = &value["configurations"][0];

    assert_eq!(first["sid"], "FJA");
    assert_eq!(first["version"], "1.0.0");
    assert_eq!(first["description"], "first");
    assert_eq!(first["isActive"], true);
    assert_eq!(first["dateCreated"], "2020-09-01T00:00:00Z");
    assert_eq!(gw.call_count("configurations:0").await, 1);
    assert_eq!(gw.call_count("active_release").await, 1);
    assert_eq!(gw.call_count("configured_plugins:FJA:0").await, 0);
}

#[tokio::test]
async fn test_toolkit_diff_and_snapshot() {
    let (_, gateway) = Fixture::new(1)
        .configuration("FJA", None, &[("P1", "1.0", 1), ("P2", "1.0", 1)])
        .configuration("FJB", None, &[("P2", "1.0", 2)])
        .build();
    let toolkit = Toolkit::new(gateway);

    let diff = toolkit
        .diff(DiffOptions::configurations("FJA", "FJB"))
        .await
        .unwrap();
    let removed: Vec<_> = diff.plugins.removed.iter().map(|p| p.sid.as_str()).collect();
    assert_eq!(removed, vec!["P1"]);
    assert_eq!(diff.plugins.changed[0].sid, "P2");

    let snapshot = toolkit.snapshot("FJB").await.unwrap();
    assert_eq!(snapshot.plugins[0].phase, 2);
}
