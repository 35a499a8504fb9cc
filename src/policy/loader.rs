//! Policy file loading.

use std::fs;
use std::path::Path;

use super::directive::PolicyFile;
use crate::error::{MdguardError, Result};

/// Read and parse a policy file.
pub fn load_policy(path: &Path) -> Result<PolicyFile> {
    if !path.exists() {
        return Err(MdguardError::PolicyNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let policy = PolicyFile::parse(&text)?;
    tracing::debug!(
        "Loaded policy {} ({} overrides)",
        path.display(),
        policy.overrides.len()
    );
    Ok(policy)
}
