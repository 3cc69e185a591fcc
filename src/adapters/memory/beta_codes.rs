//! Static beta code directory.
//!
//! A fixed code-to-expiry mapping, typically built from configuration at
//! startup.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;
use crate::ports::{BetaCodeDirectory, BetaGrant, StorageError};

/// Beta code directory backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticBetaCodeDirectory {
    codes: HashMap<String, Timestamp>,
}

impl StaticBetaCodeDirectory {
    /// Builds a directory from `(code, expiry)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Timestamp)>) -> Self {
        Self {
            codes: pairs.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait]
impl BetaCodeDirectory for StaticBetaCodeDirectory {
    async fn lookup(&self, code: &str) -> Result<Option<BetaGrant>, StorageError> {
        Ok(self.codes.get(code).map(|expires_at| BetaGrant {
            code: code.to_string(),
            expires_at: *expires_at,
        }))
    }
}
