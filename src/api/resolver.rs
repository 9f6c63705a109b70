//
//  testrail-cli
//  api/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Name Resolver
//!
//! Most people know their projects by name; the API only accepts ids. A
//! [`ProjectResolver`] fetches the project list once and answers name → id
//! lookups from that snapshot for the rest of its life. It is never
//! refreshed: projects created or renamed afterwards are invisible until a
//! new resolver is loaded.
//!
//! If two projects share a name the one listed last by the server wins.

use std::collections::HashMap;

use super::projects::Project;
use super::{ApiError, TestRailClient};

#[derive(Debug, Clone, Default)]
pub struct ProjectResolver {
    ids: HashMap<String, u64>,
}

impl ProjectResolver {
    /// Fetches `get_projects` once and builds the name map.
    pub async fn load(client: &TestRailClient) -> Result<Self, ApiError> {
        let projects = client.get_projects().await?;
        let resolver = Self::from_projects(&projects);
        tracing::debug!("Cached {} project names", resolver.len());
        Ok(resolver)
    }

    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        let ids = projects
            .into_iter()
            .map(|p| (p.name.clone(), p.id))
            .collect();
        Self { ids }
    }

    /// Looks up a project id by exact name.
    pub fn project_id(&self, name: &str) -> Result<u64, ApiError> {
        tracing::trace!("project_id '{}'", name);
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| ApiError::UnknownProject(name.to_string()))
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projects() -> Vec<Project> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Datahub"},
            {"id": 2, "name": "Website"},
            {"id": 3, "name": "Website"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let resolver = ProjectResolver::from_projects(&projects());
        assert_eq!(resolver.project_id("Datahub").unwrap(), 1);
        assert_eq!(resolver.project_id("Datahub").unwrap(), 1);
        assert_eq!(resolver.names(), vec!["Datahub", "Website"]);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let resolver = ProjectResolver::from_projects(&projects());
        assert_eq!(resolver.project_id("Website").unwrap(), 3);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_unknown_name() {
        let resolver = ProjectResolver::from_projects(&projects());
        let err = resolver.project_id("datahub").unwrap_err();
        assert!(matches!(err, ApiError::UnknownProject(ref name) if name == "datahub"));
        assert!(ProjectResolver::default().is_empty());
    }
}
