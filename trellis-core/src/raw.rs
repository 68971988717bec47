//! Raw tree payload as supplied by the data source.
//!
//! The feed uses terse field names (`dn`, `m`, `spc`, `g`, `o`, `oidx`) and
//! declares adjacency one-directionally: a node lists the nodes it points
//! at, and no `in` list exists. Sections the model never interprets
//! (groups, sprites, assets, character data) are carried as opaque JSON for
//! the rendering layer.

use crate::error::TreeError;
use crate::{ClassId, GroupId, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One node record from the feed.
///
/// `out` is possibly incomplete: the source only guarantees that each edge
/// is declared by at least one of its endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    pub id: NodeId,

    /// Display name. Also the key used to match ascendancy identity
    /// against host configuration.
    #[serde(rename = "dn", default)]
    pub name: String,

    #[serde(default)]
    pub icon: String,

    /// Mastery/skippable marker. Such nodes keep their declared edges
    /// verbatim and are exempt from bidirectional back-fill.
    #[serde(rename = "m", default)]
    pub is_mastery: bool,

    /// Character classes that start at this node, in feed order.
    /// Empty for ordinary nodes.
    #[serde(rename = "spc", default)]
    pub class_start: Vec<ClassId>,

    /// Ascendancy family tag. Empty means the node is not part of any
    /// ascendancy sub-tree.
    #[serde(rename = "ascendancyName", default)]
    pub ascendancy_name: String,

    /// True only for the entry node of an ascendancy family.
    #[serde(rename = "isAscendancyStart", default)]
    pub is_ascendancy_start: bool,

    /// Spatial group this node belongs to. Opaque to the model.
    #[serde(rename = "g", default)]
    pub group: Option<GroupId>,

    /// Orbit placement, forwarded untouched to the geometry layer.
    #[serde(rename = "o", default)]
    pub orbit: u32,

    #[serde(rename = "oidx", default)]
    pub orbit_index: u32,

    /// Declared neighbors. May reference ids missing from the payload;
    /// those edges are dropped during normalization.
    #[serde(default)]
    pub out: Vec<NodeId>,
}

/// Orbit layout constants, consumed opaquely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeConstants {
    #[serde(default)]
    pub orbit_radii: Vec<u32>,

    #[serde(default)]
    pub skills_per_orbit: Vec<u32>,
}

/// The complete raw payload.
///
/// Field names follow the feed, which mixes naming styles (`characterData`
/// next to `min_x`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreePayload {
    #[serde(default)]
    pub nodes: Vec<RawNode>,

    /// The root pseudo-node, forwarded untouched.
    #[serde(default)]
    pub root: Value,

    #[serde(default)]
    pub groups: BTreeMap<String, Value>,

    #[serde(rename = "characterData", default)]
    pub character_data: BTreeMap<String, Value>,

    #[serde(rename = "extraImages", default)]
    pub extra_images: BTreeMap<String, Value>,

    #[serde(default)]
    pub min_x: i32,

    #[serde(default)]
    pub min_y: i32,

    #[serde(default)]
    pub max_x: i32,

    #[serde(default)]
    pub max_y: i32,

    #[serde(default)]
    pub assets: BTreeMap<String, Value>,

    #[serde(rename = "imageRoot", default)]
    pub image_root: String,

    #[serde(rename = "imageZoomLevels", default)]
    pub image_zoom_levels: Vec<f32>,

    #[serde(rename = "skillSprites", default)]
    pub skill_sprites: BTreeMap<String, Value>,

    #[serde(default)]
    pub constants: TreeConstants,
}

impl TreePayload {
    /// Parses a payload from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }
}
