// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::LlmConfig;

/// Ordered list of config file locations searched from lowest to highest
/// priority.  Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide default
    paths.push(PathBuf::from("/etc/freja/config.yaml"));

    // 2. XDG / home
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/freja/config.yaml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("freja/config.yaml"));
    }

    // 3. Workspace-local
    paths.push(PathBuf::from(".freja/config.yaml"));
    paths.push(PathBuf::from("freja.yaml"));

    // 4. FREJA_CONFIG env var (shell-expanded)
    if let Ok(p) = std::env::var("FREJA_CONFIG") {
        paths.push(PathBuf::from(shellexpand::tilde(&p).into_owned()));
    }

    paths
}

/// Load the configuration by deep-merging all discovered YAML files.
///
/// The `extra` argument may provide an explicit path (e.g. `--config` CLI
/// flag); unlike the search paths, an explicit path that does not exist is
/// an error.  The merged result is validated before being returned —
/// a missing `default` task or a dangling model reference is fatal here,
/// not at first use.
pub fn load(extra: Option<&Path>) -> anyhow::Result<LlmConfig> {
    let mut merged = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
    let mut found_any = false;

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let layer: serde_yaml::Value = serde_yaml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            merge_yaml(&mut merged, layer);
            found_any = true;
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        let text = std::fs::read_to_string(p)
            .with_context(|| format!("reading {}", p.display()))?;
        let layer: serde_yaml::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing {}", p.display()))?;
        merge_yaml(&mut merged, layer);
        found_any = true;
    }

    let config = if found_any {
        serde_yaml::from_value(merged).context("decoding merged configuration")?
    } else {
        LlmConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// Deep-merge `src` into `dst`; src wins on scalar conflicts.
fn merge_yaml(dst: &mut serde_yaml::Value, src: serde_yaml::Value) {
    match (dst, src) {
        (serde_yaml::Value::Mapping(d), serde_yaml::Value::Mapping(s)) => {
            for (k, v) in s {
                let entry = d
                    .entry(k)
                    .or_insert(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
                merge_yaml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
