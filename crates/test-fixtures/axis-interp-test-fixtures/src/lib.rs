use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Result<Manifest, String>> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).map_err(|err| format!("fixtures manifest should parse: {err}"))
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenarios: HashMap<String, String>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

fn manifest() -> Result<&'static Manifest> {
    Lazy::force(&MANIFEST).as_ref().map_err(|err| anyhow!("{err}"))
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Interpolation scenarios: endpoints, strategy, length and expected samples.
pub mod scenarios {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        let mut keys: Vec<String> = manifest()?.scenarios.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&manifest()?.scenarios, "scenario", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&manifest()?.scenarios, "scenario", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&manifest()?.scenarios, "scenario", name)?;
        Ok(resolve_path(rel))
    }
}

/// Driver configurations as JSON text.
pub mod configs {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        let mut keys: Vec<String> = manifest()?.configs.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&manifest()?.configs, "config", name)?;
        read_to_string(rel)
    }
}
