// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Trail catalog lookup.

use std::fs;
use std::path::Path;

use crate::models::TrailInfo;

/// Source of trail descriptions used to prefill journal entries.
pub trait TrailCatalog: Send + Sync {
    /// Look up a trail by its catalog id.
    fn get(&self, id: &str) -> Option<TrailInfo>;

    /// Case-insensitive substring search over trail and location names.
    fn search(&self, term: &str) -> Vec<TrailInfo>;

    fn all(&self) -> Vec<TrailInfo>;
}

/// In-memory catalog, loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticTrailCatalog {
    trails: Vec<TrailInfo>,
}

impl StaticTrailCatalog {
    pub fn from_trails(trails: Vec<TrailInfo>) -> Self {
        Self { trails }
    }

    /// Load trails from a JSON file (an array of trails).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let trails: Vec<TrailInfo> = serde_json::from_str(json_data)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        if let Some(dup) = trails
            .iter()
            .enumerate()
            .find(|(i, t)| trails[..*i].iter().any(|o| o.id == t.id))
            .map(|(_, t)| t.id.clone())
        {
            return Err(CatalogError::DuplicateId(dup));
        }

        tracing::info!(count = trails.len(), "Loaded trail catalog");
        Ok(Self { trails })
    }
}

impl TrailCatalog for StaticTrailCatalog {
    fn get(&self, id: &str) -> Option<TrailInfo> {
        self.trails.iter().find(|t| t.id == id).cloned()
    }

    fn search(&self, term: &str) -> Vec<TrailInfo> {
        let term = term.trim().to_lowercase();
        self.trails
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&term)
                    || t.location.name.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<TrailInfo> {
        self.trails.clone()
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse trail catalog: {0}")]
    ParseError(String),

    #[error("Duplicate trail id: {0}")]
    DuplicateId(String),
}
