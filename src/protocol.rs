//! JSON form of the composition function request and response messages.

use crate::constants::DEFAULT_TTL_SECONDS;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Request metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

/// Readiness of a desired resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ready {
    #[default]
    #[serde(rename = "READY_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "READY_TRUE")]
    True,
    #[serde(rename = "READY_FALSE")]
    False,
}

impl Ready {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Ready::Unspecified)
    }
}

/// A single resource together with its connection details and readiness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub resource: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub connection_details: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Ready::is_unspecified")]
    pub ready: Ready,
}

impl Resource {
    pub fn new(resource: Map<String, Value>) -> Self {
        Self { resource, ..Default::default() }
    }
}

/// A list of resources matched by one extra resources selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub items: Vec<Resource>,
}

/// Observed or desired state of a composite and its composed resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<Resource>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resources: IndexMap<String, Resource>,
}

/// Request sent to the function by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFunctionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RequestMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_resources: Option<IndexMap<String, Resources>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_resources: Option<IndexMap<String, Resources>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Map<String, Value>>,
    /// Fields this crate does not model, kept so templates can still read them.
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl RunFunctionRequest {
    pub fn tag(&self) -> &str {
        self.meta.as_ref().map(|m| m.tag.as_str()).unwrap_or_default()
    }

    /// Returns the observed composite resource body, if any.
    pub fn observed_composite(&self) -> Option<&Map<String, Value>> {
        self.observed.as_ref()?.composite.as_ref().map(|c| &c.resource)
    }
}

/// Severity of a result reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "SEVERITY_FATAL")]
    Fatal,
    #[serde(rename = "SEVERITY_WARNING")]
    Warning,
    #[serde(rename = "SEVERITY_NORMAL")]
    Normal,
}

/// A message reported back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResult {
    pub severity: Severity,
    pub message: String,
}

/// Response metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(with = "duration_seconds")]
    pub ttl: Duration,
}

/// Response returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFunctionResponse {
    pub meta: ResponseMeta,
    #[serde(default)]
    pub desired: State,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<FunctionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl RunFunctionResponse {
    /// Seeds a response from a request: the tag, desired state and context are
    /// carried over so the function only adds to what earlier steps produced.
    pub fn to(req: &RunFunctionRequest, ttl: Duration) -> Self {
        Self {
            meta: ResponseMeta { tag: req.tag().to_string(), ttl },
            desired: req.desired.clone().unwrap_or_default(),
            results: Vec::new(),
            context: req.context.clone(),
        }
    }

    /// Seeds a response with the default time-to-live.
    pub fn with_default_ttl(req: &RunFunctionRequest) -> Self {
        Self::to(req, Duration::from_secs(DEFAULT_TTL_SECONDS))
    }

    /// Records a fatal result.
    pub fn fatal(&mut self, message: impl Into<String>) {
        self.results.push(FunctionResult { severity: Severity::Fatal, message: message.into() });
    }

    pub fn is_fatal(&self) -> bool {
        self.results.iter().any(|r| r.severity == Severity::Fatal)
    }
}

/// Protobuf JSON encoding of a duration, e.g. `"60s"` or `"1.5s"`.
mod duration_seconds {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if ttl.subsec_nanos() == 0 {
            serializer.serialize_str(&format!("{}s", ttl.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}s", ttl.as_secs_f64()))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let number = raw
            .strip_suffix('s')
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{raw}'")))?;
        let secs: f64 = number
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid duration '{raw}': {e}")))?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid duration '{raw}': {e}")))
    }
}
