//
//  testrail-cli
//  api/sections.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Section API
//!
//! Sections form a tree inside a suite: root sections have no `parent_id`,
//! children point at their parent and carry `depth = parent.depth + 1`.
//!
//! ```text
//! GET  get_section/{section_id}
//! GET  get_sections/{project_id}&suite_id={suite_id}
//! POST add_section/{project_id}
//! POST update_section/{section_id}
//! POST delete_section/{section_id}
//! ```

use serde::{Deserialize, Serialize};

use super::{ApiError, TestRailClient};

/// A section (folder) inside a suite.
///
/// Sections nest: `parent_id` points at the enclosing section and `depth`
/// counts the levels from the suite root (0 for top-level sections).
///
/// # Fields
///
/// * `id` - Unique section id
/// * `name` - Display name
/// * `description` - Optional description
/// * `depth` - Nesting level, 0 at the root
/// * `display_order` - Position among its siblings
/// * `parent_id` - Enclosing section, `None` at the root
/// * `suite_id` - Suite the section belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Levels below the suite root.
    #[serde(default)]
    pub depth: u32,

    /// Sort key among sections sharing a parent.
    #[serde(default)]
    pub display_order: u32,

    /// `None` for top-level sections.
    #[serde(default)]
    pub parent_id: Option<u64>,

    #[serde(default)]
    pub suite_id: Option<u64>,
}

/// Body for `add_section`.
///
/// # Example
///
/// ```rust
/// use testrail_cli::api::sections::AddSection;
///
/// let section = AddSection {
///     name: "Checkout".into(),
///     suite_id: Some(4),
///     parent_id: Some(12),
///     ..Default::default()
/// };
/// let body = serde_json::to_value(&section).unwrap();
/// assert_eq!(body["parent_id"], 12);
/// assert!(body.get("description").is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddSection {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required unless the project runs in single-suite mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,

    /// Creates the section below this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

/// Body for `update_section`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Orders sections depth-first, children directly after their parent.
///
/// Sections whose parent is missing from the slice are treated as roots.
pub fn tree_order(sections: &[Section]) -> Vec<&Section> {
    let known = |id: u64| sections.iter().any(|s| s.id == id);
    let mut roots: Vec<&Section> = sections
        .iter()
        .filter(|s| s.parent_id.map_or(true, |p| !known(p)))
        .collect();
    roots.sort_by_key(|s| s.display_order);

    let mut ordered = Vec::with_capacity(sections.len());
    let mut stack: Vec<&Section> = roots.into_iter().rev().collect();
    while let Some(section) = stack.pop() {
        ordered.push(section);
        let mut children: Vec<&Section> = sections
            .iter()
            .filter(|s| s.parent_id == Some(section.id))
            .collect();
        children.sort_by_key(|s| s.display_order);
        stack.extend(children.into_iter().rev());
    }
    ordered
}

impl TestRailClient {
    /// Fetches one section by id.
    pub async fn get_section(&self, section_id: u64) -> Result<Section, ApiError> {
        self.send_get(&format!("get_section/{}", section_id)).await
    }

    /// Lists every section of a suite, flat, in server order.
    ///
    /// Use [`tree_order`] to arrange them depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when the project or suite id
    /// is unknown.
    pub async fn get_sections(
        &self,
        project_id: u64,
        suite_id: u64,
    ) -> Result<Vec<Section>, ApiError> {
        self.get_list(
            &format!("get_sections/{}&suite_id={}", project_id, suite_id),
            "sections",
        )
        .await
    }

    /// Creates a section in the given project.
    pub async fn add_section(
        &self,
        project_id: u64,
        section: &AddSection,
    ) -> Result<Section, ApiError> {
        self.send_post(&format!("add_section/{}", project_id), section)
            .await
    }

    /// Changes the name or description of a section.
    pub async fn update_section(
        &self,
        section_id: u64,
        changes: &UpdateSection,
    ) -> Result<Section, ApiError> {
        self.send_post(&format!("update_section/{}", section_id), changes)
            .await
    }

    /// Deletes a section.
    ///
    /// Subsections and the cases inside them are deleted too.
    pub async fn delete_section(&self, section_id: u64) -> Result<(), ApiError> {
        self.send_action(&format!("delete_section/{}", section_id))
            .await
    }
}
