//! package.json model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The parts of a repository's `package.json` that folio reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Merge `dependencies` and `devDependencies`, dev entries winning
    pub fn all_dependencies(&self) -> BTreeMap<&str, &str> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .map(|(name, version)| (name.as_str(), version.as_str()))
            .collect()
    }

    /// Whether the dev script runs Next.js with Turbopack
    pub fn uses_turbopack(&self) -> bool {
        self.scripts
            .get("dev")
            .is_some_and(|script| script.contains("--turbo"))
    }
}
