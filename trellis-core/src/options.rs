//! Host configuration consumed once at graph construction.

use crate::{AscendancyId, ClassId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one configured ascendancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AscendancyInfo {
    /// Must match the display name of the ascendancy's start node exactly;
    /// the host keeps this table in sync with the data source.
    pub name: String,
}

/// The ascendancies available to one character class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AscendancyRoot {
    #[serde(default)]
    pub classes: BTreeMap<AscendancyId, AscendancyInfo>,
}

/// Viewer configuration: the starting class and the class/ascendancy table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeOptions {
    /// Class whose start node comes up Active.
    #[serde(rename = "startClass", default)]
    pub start_class: ClassId,

    /// Ascendancy table keyed by character class.
    #[serde(rename = "ascClasses", default)]
    pub ascendancy_classes: BTreeMap<ClassId, AscendancyRoot>,
}

impl TreeOptions {
    /// Finds the configured ascendancy index whose name equals `name`.
    ///
    /// Matching is exact string equality on the display name, so a table
    /// that drifts out of sync with the data source simply stops matching.
    pub fn ascendancy_id_by_name(&self, name: &str) -> Option<AscendancyId> {
        self.ascendancy_classes
            .values()
            .flat_map(|root| root.classes.iter())
            .find(|(_, info)| info.name == name)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> TreeOptions {
        let mut root = AscendancyRoot::default();
        root.classes.insert(
            1,
            AscendancyInfo {
                name: "Juggernaut".to_string(),
            },
        );
        root.classes.insert(
            2,
            AscendancyInfo {
                name: "Berserker".to_string(),
            },
        );

        let mut opts = TreeOptions {
            start_class: 1,
            ..Default::default()
        };
        opts.ascendancy_classes.insert(1, root);
        opts
    }

    #[test]
    fn test_lookup_by_exact_name() {
        let opts = options();
        assert_eq!(opts.ascendancy_id_by_name("Berserker"), Some(2));
        assert_eq!(opts.ascendancy_id_by_name("Juggernaut"), Some(1));
    }

    #[test]
    fn test_lookup_misses_on_case_difference() {
        let opts = options();
        assert_eq!(opts.ascendancy_id_by_name("berserker"), None);
        assert_eq!(opts.ascendancy_id_by_name("Ascendant"), None);
    }

    #[test]
    fn test_parse_host_config_shape() {
        let json = r#"{
            "startClass": 3,
            "ascClasses": {
                "3": {"classes": {"1": {"name": "Necromancer"}}}
            }
        }"#;

        let opts: TreeOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.start_class, 3);
        assert_eq!(opts.ascendancy_id_by_name("Necromancer"), Some(1));
    }
}
