use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw decoration file: a flat list of entries under the legacy `weapons`
/// key. Template entries (`donotrender`) name a skill family; the rest are
/// real decorations.
#[derive(Debug, Deserialize)]
pub struct DecorationFile {
    #[serde(default)]
    weapons: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    donotrender: bool,
    #[serde(default)]
    improve_to: Vec<String>,
    #[serde(default)]
    skills: Vec<Value>,
    #[serde(default)]
    slots: Option<Value>,
    #[serde(default)]
    rarity: Option<Value>,
    #[serde(default)]
    create_cost: Option<Value>,
    #[serde(default)]
    create_mats: Vec<RawMaterial>,
    #[serde(default)]
    alternative_create_mats: Vec<RawMaterial>,
}

#[derive(Debug, Deserialize)]
struct RawMaterial {
    name: String,
    amount: Value,
}

#[derive(Debug, Serialize)]
pub struct CleanedFile {
    pub decorations: Vec<Decoration>,
}

#[derive(Debug, Serialize)]
pub struct Decoration {
    pub name: String,
    pub skill_group: Option<String>,
    pub skills: Vec<Value>,
    pub slots: Option<Value>,
    pub rarity: Option<Value>,
    pub cost: Option<Value>,
    pub materials: Vec<Material>,
    pub alt_materials: Vec<Material>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Material {
    pub item: String,
    pub qty: i64,
}

/// Attach skill groups and normalize material lists.
///
/// Pass 1 maps each `improve_to` child of a template entry to the template's
/// name; a child named by two templates keeps the later one. Pass 2 emits one
/// cleaned record per non-template entry, so the output count always equals
/// the non-template input count.
pub fn resolve(file: DecorationFile) -> Result<CleanedFile> {
    let mut skill_map: HashMap<String, String> = HashMap::new();
    for entry in &file.weapons {
        if entry.donotrender {
            for child in &entry.improve_to {
                skill_map.insert(child.clone(), entry.name.clone());
            }
        }
    }

    let mut decorations = Vec::new();
    for entry in file.weapons {
        if entry.donotrender {
            continue;
        }
        let materials = convert_materials(entry.create_mats)?;
        let alt_materials = convert_materials(entry.alternative_create_mats)?;
        decorations.push(Decoration {
            skill_group: skill_map.get(&entry.name).cloned(),
            skills: entry.skills,
            slots: entry.slots,
            rarity: entry.rarity,
            cost: entry.create_cost,
            materials,
            alt_materials,
            name: entry.name,
        });
    }

    Ok(CleanedFile { decorations })
}

/// Convert `{name, amount}` pairs to `{item, qty}`. A quantity that is not
/// an integer is fatal for the whole run.
fn convert_materials(mats: Vec<RawMaterial>) -> Result<Vec<Material>> {
    mats.into_iter()
        .map(|m| {
            let qty = match &m.amount {
                // The hand-maintained file carries both 2 and 2.0 for whole
                // quantities; only a fractional value is rejected.
                Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                    (Some(q), _) => q,
                    (None, Some(f)) if f.fract() == 0.0 => f as i64,
                    _ => bail!("Non-integer quantity {} for {:?}", n, m.name),
                },
                Value::String(s) => s
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid quantity {:?} for {:?}", s, m.name))?,
                other => bail!("Invalid quantity {} for {:?}", other, m.name),
            };
            Ok(Material { item: m.name, qty })
        })
        .collect()
}

// ── Tests ──
