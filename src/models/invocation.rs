//! Configuration record handed to an external script runner

use serde::{Deserialize, Serialize};

/// Interpreter flag that keeps the client script's stdout unbuffered.
pub const UNBUFFERED_FLAG: &str = "-u";

/// Interpreter flags plus positional arguments for a client script run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationConfig {
    pub flags: Vec<String>,
    pub args: Vec<String>,
}
