// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::calc;
use crate::tool::{Tool, ToolCall, ToolOutput};

/// Evaluate an arithmetic expression without any model involvement.
pub struct SafeCalculateTool;

#[async_trait]
impl Tool for SafeCalculateTool {
    fn name(&self) -> &str {
        "safe_calculate"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression. Supports numbers, + - * / **, \
         parentheses and unary minus. No variables or functions."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate, e.g. '(2 + 3) * 4'"
                }
            },
            "required": ["expression"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let expression = match call.args.get("expression").and_then(|v| v.as_str()) {
            Some(e) => e,
            None => return ToolOutput::err(&call.id, "missing 'expression'"),
        };

        debug!(expression, "safe_calculate tool");

        match calc::evaluate(expression) {
            Ok(value) => ToolOutput::ok(&call.id, calc::format_number(value)),
            Err(e) => ToolOutput::err(&call.id, e.to_string()),
        }
    }
}
