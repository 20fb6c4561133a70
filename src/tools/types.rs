//! Tool parameter declarations.

use serde::{Deserialize, Serialize};

/// Semantic type of a tool parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterKind {
    String,
}

/// One declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameter {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
    pub required: bool,
}

/// Ordered parameter list for a tool, rendered to JSON Schema on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentToolParameters {
    params: Vec<ToolParameter>,
}

impl AgentToolParameters {
    /// A tool that takes no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            params: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolParameter> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// JSON Schema object as expected by function-calling APIs.
    pub fn schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.kind.as_ref(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(param.name.clone());
            }
        }
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Builder for constructing tool parameter lists.
pub struct ParameterBuilder {
    params: Vec<ToolParameter>,
}

impl ParameterBuilder {
    fn push(
        mut self,
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.params.push(ToolParameter {
            name: name.into(),
            kind,
            description: description.into(),
            required,
        });
        self
    }

    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, ParameterKind::String, description, required)
    }

    pub fn build(self) -> AgentToolParameters {
        AgentToolParameters { params: self.params }
    }
}
