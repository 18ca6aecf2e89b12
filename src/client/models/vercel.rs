//! Vercel project models

use serde::{Deserialize, Serialize};

/// Vercel project (`GET /v9/projects`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VercelProject {
    /// Project name, matched against repository names
    #[serde(default)]
    pub name: String,

    /// Framework preset (nextjs, astro, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_version: Option<String>,

    /// Connected git repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<VercelLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Git link of a Vercel project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VercelLink {
    /// github, gitlab, bitbucket
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_branch: Option<String>,
}

/// Envelope of the project list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VercelProjectList {
    #[serde(default)]
    pub projects: Vec<VercelProject>,
}
