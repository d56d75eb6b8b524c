use serde::{Deserialize, Serialize};

/// Hard per-request payload ceiling fixed by the CCU v3 service contract.
pub const MAX_BODY_SIZE: usize = 50_000;

/// Byte cost of the JSON wrapper around an empty object list.
pub const JSON_OVERHEAD: usize = r#"{"objects":[]}"#.len();

/// Byte cost added per entry by the quotes and the separating comma.
pub const LINE_OVERHEAD: usize = r#""","#.len();

/// Wire schema of a single purge request: `{"objects": [...]}`.
///
/// Built once by a chunker and then owned exclusively by one delivery
/// task; the serialized bytes are resent verbatim on every retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    pub objects: Vec<String>,
}

impl RequestBody {
    pub fn new(objects: Vec<String>) -> Self {
        Self { objects }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize to the exact bytes sent on the wire.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
