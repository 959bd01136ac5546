use serde::{Deserialize, Serialize};

/// Identifier of a serving node, usually its `host:port` address.
///
/// `NodeId` is a lightweight wrapper around `String`, designed to:
/// - Keep node addresses apart from block identifiers in signatures
/// - Serve as a `HashMap`/`BTreeMap` key (including JSON object keys)
/// - Provide readable formatting in logs and error messages
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    /// Example:
    /// ```rust
    /// use strata_common::NodeId;
    /// let id: NodeId = "store-gateway-1:9095".into();
    /// assert_eq!(id.as_str(), "store-gateway-1:9095");
    /// ```
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}
