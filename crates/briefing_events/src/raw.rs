use serde::Deserialize;
use serde_json::Value;

/// One frame as emitted by the upstream agent runtime.
///
/// Every field is optional: heartbeats, partial fragments and tool-only
/// frames all share this shape. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAgentEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub invocation_id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub partial: Option<bool>,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub actions: Option<RawActions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawActions {
    #[serde(default)]
    pub tool_call: Option<ToolCall>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl RawAgentEvent {
    /// Concatenated text of every content part, in order.
    pub fn text(&self) -> String {
        let Some(content) = &self.content else {
            return String::new();
        };
        content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    pub fn tool_call(&self) -> Option<&ToolCall> {
        self.actions.as_ref().and_then(|a| a.tool_call.as_ref())
    }

    pub fn is_partial(&self) -> bool {
        self.partial.unwrap_or(false)
    }

    /// `id`, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    pub fn invocation_id(&self) -> Option<&str> {
        non_empty(self.invocation_id.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    // Builders used by hosts that synthesize events and by tests.

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_invocation(mut self, invocation_id: impl Into<String>) -> Self {
        self.invocation_id = Some(invocation_id.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = Some(partial);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content
            .get_or_insert_with(RawContent::default)
            .parts
            .push(RawPart {
                text: Some(text.into()),
            });
        self
    }

    pub fn with_tool_call(mut self, name: impl Into<String>, args: Value) -> Self {
        self.actions = Some(RawActions {
            tool_call: Some(ToolCall {
                name: name.into(),
                args,
            }),
        });
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
