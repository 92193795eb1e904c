use serde_json::json;
use tm_client_updater::cli::{parse_config, UpdaterConfig};
use tracing::Level;

/// Build a minimal valid updater JSON configuration containing a single
/// pair so that we can tweak it in each test.
fn base_updater_json() -> serde_json::Value {
    json!({
        "observability": {
            "level": "debug"
        },
        "pairs": [
            {
                "name": "hub-osmo",
                "src_chain": {
                    "chain_id": "cosmoshub-4",
                    "client_id": "07-tendermint-1",
                    "rpc_url": "http://localhost:26657",
                    "signer_address": "cosmos1abc"
                },
                "dst_chain": {
                    "chain_id": "osmosis-1",
                    "client_id": "07-tendermint-0",
                    "rpc_url": "http://localhost:36657",
                    "signer_address": "osmo1abc"
                },
                "enabled": true
            }
        ]
    })
}

fn parse(json_val: &serde_json::Value) -> anyhow::Result<UpdaterConfig> {
    parse_config(&json_val.to_string())
}

// ----------------- Top-level UpdaterConfig deserialization -----------------

#[test]
fn full_config_parses_successfully() -> anyhow::Result<()> {
    let config = parse(&base_updater_json())?;
    assert_eq!(config.pairs.len(), 1);
    assert_eq!(config.observability.level(), Level::DEBUG);

    let pair = &config.pairs[0];
    assert_eq!(pair.name, "hub-osmo");
    assert_eq!(pair.src_chain.chain_id, "cosmoshub-4");
    assert_eq!(pair.dst_chain.client_id, "07-tendermint-0");
    assert!(pair.enabled);
    Ok(())
}

#[test]
fn top_level_missing_pairs_field_fails() {
    let mut json_val = base_updater_json();
    json_val.as_object_mut().unwrap().remove("pairs");
    let err = parse(&json_val).unwrap_err();
    assert!(err.to_string().contains("pairs"));
}

#[test]
fn top_level_pairs_wrong_type_fails() {
    let mut json_val = base_updater_json();
    json_val["pairs"] = json!("not_an_array");
    let err = parse(&json_val).unwrap_err();
    assert!(err.to_string().contains("invalid type"));
}

#[test]
fn missing_observability_defaults_to_info() -> anyhow::Result<()> {
    let mut json_val = base_updater_json();
    json_val.as_object_mut().unwrap().remove("observability");
    let config = parse(&json_val)?;
    assert_eq!(config.observability.level(), Level::INFO);
    Ok(())
}

// ----------------- Pair level -----------------

#[test]
fn pair_level_missing_name_field_fails() {
    let mut json_val = base_updater_json();
    json_val["pairs"][0].as_object_mut().unwrap().remove("name");
    let err = parse(&json_val).unwrap_err();
    assert!(err.to_string().contains("name"));
}

#[test]
fn pair_level_missing_dst_chain_field_fails() {
    let mut json_val = base_updater_json();
    json_val["pairs"][0]
        .as_object_mut()
        .unwrap()
        .remove("dst_chain");
    let err = parse(&json_val).unwrap_err();
    assert!(err.to_string().contains("dst_chain"));
}

#[test]
fn pair_level_enabled_defaults_to_true() -> anyhow::Result<()> {
    let mut json_val = base_updater_json();
    json_val["pairs"][0]
        .as_object_mut()
        .unwrap()
        .remove("enabled");
    let config = parse(&json_val)?;
    assert!(config.pairs[0].enabled);
    Ok(())
}

// ----------------- Chain level -----------------

#[test]
fn chain_level_missing_rpc_url_yields_path_error() {
    let mut json_val = base_updater_json();
    json_val["pairs"][0]["dst_chain"]
        .as_object_mut()
        .unwrap()
        .remove("rpc_url");
    let err = parse(&json_val).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("config error at pairs[0].dst_chain"));
    assert!(msg.contains("rpc_url"));
}

#[test]
fn chain_level_client_id_wrong_type_yields_path_error() {
    let mut json_val = base_updater_json();
    json_val["pairs"][0]["src_chain"]["client_id"] = json!(7);
    let err = parse(&json_val).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("pairs[0].src_chain.client_id"));
    assert!(msg.contains("invalid type"));
}

#[test]
fn disabled_pairs_are_skipped() -> anyhow::Result<()> {
    let mut json_val = base_updater_json();
    json_val["pairs"][0]["enabled"] = json!(false);
    let config = parse(&json_val)?;
    assert!(config.selected_pairs(None)?.is_empty());
    assert_eq!(config.selected_pairs(Some("hub-osmo"))?.len(), 1);
    Ok(())
}
