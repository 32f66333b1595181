// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! End-to-end wiring tests using the mock model provider: config file →
//! resolver → factory → invocation, and the assembled agent.
use std::io::Write;
use std::sync::Arc;

use freja::{AgentBuilder, TASK_AGENT_CORE};
use freja_config::LlmConfig;
use freja_model::{ChatRequest, Message, TaskOverrides};
use freja_tools::ToolCall;
use serde_json::json;

const CONFIG_YAML: &str = r#"
max_retries: 2
tasks:
  default:
    model_name: cheap
  agent-core:
    model_name: smart
available_models:
  cheap:
    provider: mock
    temperature: 0.2
  smart:
    provider: mock
    reasoning_effort: high
"#;

fn config() -> Arc<LlmConfig> {
    Arc::new(serde_yaml::from_str(CONFIG_YAML).unwrap())
}

#[tokio::test]
async fn config_file_resolves_and_invokes_end_to_end() {
    let mut f = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    f.write_all(CONFIG_YAML.as_bytes()).unwrap();

    let cfg = freja_config::load(Some(f.path())).unwrap();

    // Known task uses its own entry; unknown task falls back to default.
    let resolved = freja_model::resolve(&cfg, TASK_AGENT_CORE, &TaskOverrides::default()).unwrap();
    assert_eq!(resolved.model_name, "smart");
    assert_eq!(resolved.reasoning_effort.as_deref(), Some("high"));
    assert_eq!(resolved.max_retries, 2);

    let fallback = freja_model::resolve(&cfg, "no-such-task", &TaskOverrides::default()).unwrap();
    assert_eq!(fallback.model_name, "cheap");

    let model = freja_model::build(&resolved).unwrap();
    let resp = model
        .invoke(ChatRequest::new(vec![Message::user("ping")]))
        .await
        .unwrap();
    assert_eq!(resp.text, "MOCK: ping");
}

#[tokio::test]
async fn overrides_take_precedence_over_task_entry() {
    let cfg = config();
    let overrides = TaskOverrides::default().model_name("cheap").temperature(0.9);
    let resolved = freja_model::resolve(&cfg, TASK_AGENT_CORE, &overrides).unwrap();
    assert_eq!(resolved.model_name, "cheap");
    assert_eq!(resolved.temperature, Some(0.9));
}

#[tokio::test]
async fn agent_wires_model_and_all_builtin_tools() {
    let agent = AgentBuilder::new(config()).build().unwrap();

    assert_eq!(agent.model().provider(), "mock");
    let names: Vec<String> = agent.tool_schemas().iter().map(|s| s.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "analyze_image",
            "analyze_pdf",
            "internet_search",
            "read_webpage",
            "safe_calculate",
            "text_summary",
        ]
    );

    let reply = agent.ask("what is the plan?").await.unwrap();
    assert_eq!(reply, "MOCK: what is the plan?");
}

#[tokio::test]
async fn agent_executes_tool_calls_without_panicking_on_unknown() {
    let agent = AgentBuilder::new(config()).build().unwrap();

    let calc = ToolCall {
        id: "1".into(),
        name: "safe_calculate".into(),
        args: json!({"expression": "2**3**2"}),
    };
    let out = agent.execute(&calc).await;
    assert!(!out.is_error);
    assert_eq!(out.content, "512");

    let unknown = ToolCall { id: "2".into(), name: "not_a_tool".into(), args: json!({}) };
    let out = agent.execute(&unknown).await;
    assert!(out.is_error);
    assert!(out.content.contains("unknown tool"));
}

#[tokio::test]
async fn llm_backed_tool_routes_through_its_task_model() {
    let agent = AgentBuilder::new(config()).build().unwrap();

    let call = ToolCall {
        id: "3".into(),
        name: "text_summary".into(),
        args: json!({"text": "a very long report", "instruction": "one sentence"}),
    };
    let out = agent.execute(&call).await;
    assert!(!out.is_error);
    assert!(out.content.starts_with("MOCK:"));
    assert!(out.content.contains("a very long report"));
}
