//! Turns the model's raw reply into a well-formed [`ConceptSet`].
//!
//! Two stages:
//!
//! 1. **Shape check** ([`validate_shape`]) — parse, unwrap a single-key
//!    object wrapper, and require 3 concepts with 4 scenes each.  Any failure
//!    is a [`ShapeError`] and the candidate is replaced wholesale by
//!    [`build_fallback`].
//! 2. **Field repair** ([`repair_concepts`]) — always runs, over the loose
//!    `serde_json::Value` tree, filling every missing or empty field with its
//!    default and converting to the strict model types.
//!
//! [`normalize_response`] never fails.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::script::fallback::build_fallback;
use crate::script::model::{AssetType, Concept, ConceptSet, Scene, CONCEPT_COUNT, SCENE_COUNT};

// ---------------------------------------------------------------------------
// ShapeError
// ---------------------------------------------------------------------------

/// Why a reply was rejected by the shape check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("reply is not valid JSON: {0}")]
    NotJson(String),

    #[error("expected an array of concepts, found {0}")]
    NotArray(&'static str),

    #[error("expected 3 concepts, found {0}")]
    ConceptCount(usize),

    #[error("concept {0} is not an object")]
    ConceptNotObject(usize),

    #[error("concept {0} has no scenes array")]
    MissingScenes(usize),

    #[error("concept {index} has {count} scenes, expected 4")]
    SceneCount { index: usize, count: usize },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Normalize the raw reply text.  Falls back to placeholder content built
/// from `topic` when the reply fails the shape check.
pub fn normalize_response(raw: &str, topic: &str) -> ConceptSet {
    let candidate = match validate_shape(raw) {
        Ok(concepts) => concepts,
        Err(e) => {
            log::warn!("Model reply rejected ({e}); using fallback content");
            build_fallback(topic, "").into_iter().map(to_loose).collect()
        }
    };
    ConceptSet::new(repair_concepts(&candidate))
}

/// Parse `raw` and check the 3 × 4 shape, returning the candidate concepts.
///
/// An object reply is unwrapped by taking the value of its first key, so
/// `{"scripts": [...]}` is treated the same as `[...]`.
pub fn validate_shape(raw: &str) -> Result<Vec<Value>, ShapeError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| ShapeError::NotJson(e.to_string()))?;

    let candidate = match parsed {
        Value::Object(map) => map
            .into_iter()
            .next()
            .map(|(_, v)| v)
            .unwrap_or(Value::Array(Vec::new())),
        other => other,
    };

    let concepts = match candidate {
        Value::Array(items) => items,
        other => return Err(ShapeError::NotArray(kind(&other))),
    };

    if concepts.len() != CONCEPT_COUNT {
        return Err(ShapeError::ConceptCount(concepts.len()));
    }

    for (index, concept) in concepts.iter().enumerate() {
        let obj = concept
            .as_object()
            .ok_or(ShapeError::ConceptNotObject(index))?;
        let scenes = obj
            .get("scenes")
            .and_then(Value::as_array)
            .ok_or(ShapeError::MissingScenes(index))?;
        if scenes.len() != SCENE_COUNT {
            return Err(ShapeError::SceneCount {
                index,
                count: scenes.len(),
            });
        }
    }

    Ok(concepts)
}

/// Field-repair pass.  Every concept gets every field; scenes beyond the
/// fourth are dropped.
pub fn repair_concepts(values: &[Value]) -> Vec<Concept> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| repair_concept(idx, value))
        .collect()
}

// ---------------------------------------------------------------------------
// Repair helpers
// ---------------------------------------------------------------------------

fn repair_concept(idx: usize, value: &Value) -> Concept {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let scenes = obj
        .get("scenes")
        .and_then(Value::as_array)
        .map(|scenes| scenes.iter().take(SCENE_COUNT).map(repair_scene).collect())
        .unwrap_or_default();

    Concept {
        concept_name: text(obj.get("concept_name"))
            .unwrap_or_else(|| format!("ไอเดียที่ {}", idx + 1)),
        insight: text(obj.get("insight")).unwrap_or_default(),
        hook: text(obj.get("hook")).unwrap_or_default(),
        hashtags: hashtags(obj.get("hashtags")),
        scenes,
    }
}

fn repair_scene(value: &Value) -> Scene {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let legacy = || text(obj.get("visual_prompt"));

    Scene {
        asset_type: text(obj.get("asset_type"))
            .map(|t| AssetType::from_wire(&t))
            .unwrap_or_default(),
        asset_index: asset_index(obj.get("asset_index")),
        visual_prompt_th: text(obj.get("visual_prompt_th"))
            .or_else(legacy)
            .unwrap_or_default(),
        visual_prompt_en: text(obj.get("visual_prompt_en"))
            .or_else(legacy)
            .unwrap_or_default(),
        voiceover: text(obj.get("voiceover")).unwrap_or_default(),
    }
}

/// A text field counts as present when it is a non-empty string, a non-zero
/// number or `true`.  Null, empty strings, containers and zero are missing.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}

fn hashtags(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// Coerce to a non-negative index.  Anything that is not a number, a numeric
/// string or a bool (or is negative / out of range) is `0`.
fn asset_index(value: Option<&Value>) -> u32 {
    let index = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(Value::Bool(b)) => Some(u64::from(*b)),
        _ => None,
    };
    index.and_then(|i| u32::try_from(i).ok()).unwrap_or(0)
}

fn to_loose(concept: Concept) -> Value {
    let scenes: Vec<Value> = concept
        .scenes
        .into_iter()
        .map(|s| {
            json!({
                "asset_type": s.asset_type.as_str(),
                "asset_index": s.asset_index,
                "visual_prompt_th": s.visual_prompt_th,
                "visual_prompt_en": s.visual_prompt_en,
                "voiceover": s.voiceover,
            })
        })
        .collect();

    json!({
        "concept_name": concept.concept_name,
        "insight": concept.insight,
        "hook": concept.hook,
        "hashtags": concept.hashtags,
        "scenes": scenes,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(n: usize) -> Value {
        json!({
            "asset_type": "generated",
            "asset_index": 0,
            "visual_prompt_th": format!("ภาพ {n}"),
            "visual_prompt_en": format!("picture {n}"),
            "voiceover": format!("พากย์ {n}"),
        })
    }

    fn concept(name: &str, scene_count: usize) -> Value {
        json!({
            "concept_name": name,
            "insight": "insight",
            "hook": "hook",
            "hashtags": ["#a", "#b"],
            "scenes": (1..=scene_count).map(scene).collect::<Vec<_>>(),
        })
    }

    fn reply(concepts: Vec<Value>) -> String {
        Value::Array(concepts).to_string()
    }

    fn assert_full_shape(set: &ConceptSet) {
        assert_eq!(set.concepts().len(), 3);
        for c in set.concepts() {
            assert_eq!(c.scenes.len(), 4);
        }
    }

    fn is_fallback(set: &ConceptSet, topic: &str) -> bool {
        set.concepts()[0].concept_name == format!("ไอเดียที่ 1 – {topic}")
    }

    // -----------------------------------------------------------------------
    // Shape check
    // -----------------------------------------------------------------------

    #[test]
    fn valid_reply_passes_through() {
        let raw = reply(vec![concept("A", 4), concept("B", 4), concept("C", 4)]);
        let set = normalize_response(&raw, "topic");

        assert_full_shape(&set);
        let names: Vec<_> = set
            .concepts()
            .iter()
            .map(|c| c.concept_name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(set.concepts()[1].scenes[2].visual_prompt_en, "picture 3");
        assert_eq!(set.concepts()[0].hashtags, ["#a", "#b"]);
    }

    #[test]
    fn not_json_falls_back_with_topic() {
        let set = normalize_response("not json", "กาแฟเย็น");

        assert_full_shape(&set);
        assert!(is_fallback(&set, "กาแฟเย็น"));
        assert_eq!(
            set.concepts()[0].scenes[0].visual_prompt_en,
            "Scene 1 visual for กาแฟเย็น"
        );
        assert_eq!(
            validate_shape("not json"),
            Err(ShapeError::NotJson(
                serde_json::from_str::<Value>("not json").unwrap_err().to_string()
            ))
        );
    }

    #[test]
    fn two_concepts_fall_back() {
        let raw = reply(vec![concept("A", 4), concept("B", 4)]);

        assert_eq!(validate_shape(&raw), Err(ShapeError::ConceptCount(2)));
        let set = normalize_response(&raw, "t");
        assert_full_shape(&set);
        assert!(is_fallback(&set, "t"));
    }

    #[test]
    fn five_scenes_fall_back_before_truncation() {
        let raw = reply(vec![concept("A", 4), concept("B", 5), concept("C", 4)]);

        assert_eq!(
            validate_shape(&raw),
            Err(ShapeError::SceneCount { index: 1, count: 5 })
        );
        let set = normalize_response(&raw, "t");
        assert_full_shape(&set);
        assert!(is_fallback(&set, "t"));
    }

    #[test]
    fn three_scenes_fall_back() {
        let raw = reply(vec![concept("A", 3), concept("B", 4), concept("C", 4)]);
        assert!(is_fallback(&normalize_response(&raw, "t"), "t"));
    }

    #[test]
    fn wrapped_reply_is_unwrapped() {
        let concepts = vec![concept("A", 4), concept("B", 4), concept("C", 4)];
        let wrapped = json!({ "result": concepts.clone() }).to_string();

        assert_eq!(
            normalize_response(&wrapped, "t"),
            normalize_response(&reply(concepts), "t")
        );
    }

    #[test]
    fn wrapper_uses_first_key_in_document_order() {
        let good = reply(vec![concept("A", 4), concept("B", 4), concept("C", 4)]);
        let raw = format!(r#"{{"zeta": {good}, "alpha": []}}"#);

        let set = normalize_response(&raw, "t");
        assert_eq!(set.concepts()[0].concept_name, "A");
    }

    #[test]
    fn empty_object_falls_back() {
        assert_eq!(validate_shape("{}"), Err(ShapeError::ConceptCount(0)));
        assert!(is_fallback(&normalize_response("{}", "t"), "t"));
    }

    #[test]
    fn non_array_values_fall_back() {
        assert_eq!(validate_shape("42"), Err(ShapeError::NotArray("a number")));
        assert_eq!(
            validate_shape(r#"{"scripts": "three ideas"}"#),
            Err(ShapeError::NotArray("a string"))
        );
        assert!(is_fallback(&normalize_response("null", "t"), "t"));
    }

    #[test]
    fn concept_without_scenes_or_not_object_falls_back() {
        let raw = reply(vec![
            concept("A", 4),
            json!({"concept_name": "B"}),
            concept("C", 4),
        ]);
        assert_eq!(validate_shape(&raw), Err(ShapeError::MissingScenes(1)));

        let raw = reply(vec![json!("A"), concept("B", 4), concept("C", 4)]);
        assert_eq!(validate_shape(&raw), Err(ShapeError::ConceptNotObject(0)));
    }

    // -----------------------------------------------------------------------
    // Field repair
    // -----------------------------------------------------------------------

    #[test]
    fn missing_fields_get_defaults() {
        let bare = json!({ "scenes": [{}, {}, {}, {}] });
        let raw = reply(vec![bare.clone(), bare.clone(), bare]);

        let set = normalize_response(&raw, "t");

        assert_full_shape(&set);
        let c = &set.concepts()[2];
        assert_eq!(c.concept_name, "ไอเดียที่ 3");
        assert_eq!(c.insight, "");
        assert_eq!(c.hook, "");
        assert!(c.hashtags.is_empty());
        assert_eq!(c.scenes[0], Scene::default());
    }

    #[test]
    fn empty_strings_and_nulls_count_as_missing() {
        let concept = json!({
            "concept_name": "",
            "insight": null,
            "hook": "",
            "hashtags": [],
            "scenes": [{
                "asset_type": "",
                "asset_index": null,
                "visual_prompt_th": "",
                "visual_prompt_en": null,
                "voiceover": ""
            }]
        });

        let repaired = &repair_concepts(&[concept])[0];

        assert_eq!(repaired.concept_name, "ไอเดียที่ 1");
        assert_eq!(repaired.insight, "");
        assert_eq!(repaired.scenes[0], Scene::default());
    }

    #[test]
    fn legacy_visual_prompt_fills_both_languages() {
        let concept = json!({ "scenes": [{ "visual_prompt": "sunset over Bangkok" }] });

        let scene = &repair_concepts(&[concept])[0].scenes[0];

        assert_eq!(scene.visual_prompt_th, "sunset over Bangkok");
        assert_eq!(scene.visual_prompt_en, "sunset over Bangkok");
    }

    #[test]
    fn specific_prompt_wins_over_legacy_alias() {
        let concept = json!({ "scenes": [{
            "visual_prompt": "alias",
            "visual_prompt_th": "ไทย",
        }] });

        let scene = &repair_concepts(&[concept])[0].scenes[0];

        assert_eq!(scene.visual_prompt_th, "ไทย");
        assert_eq!(scene.visual_prompt_en, "alias");
    }

    #[test]
    fn scenes_beyond_four_are_truncated() {
        let c = concept("A", 6);

        let repaired = &repair_concepts(&[c])[0];

        assert_eq!(repaired.scenes.len(), 4);
        assert_eq!(repaired.scenes[3].voiceover, "พากย์ 4");
    }

    #[test]
    fn asset_index_coercion() {
        let cases = [
            (json!(2), 2),
            (json!(3.9), 3),
            (json!("4"), 4),
            (json!(" 5 "), 5),
            (json!(true), 1),
            (json!(-1), 0),
            (json!("two"), 0),
            (json!("2.5"), 0),
            (json!([1]), 0),
            (json!(null), 0),
            (json!(u64::MAX), 0),
        ];
        for (input, expected) in cases {
            let c = json!({ "scenes": [{ "asset_index": input }] });
            assert_eq!(
                repair_concepts(&[c])[0].scenes[0].asset_index,
                expected,
                "asset_index {input}"
            );
        }
    }

    #[test]
    fn non_numeric_asset_index_does_not_trigger_fallback() {
        let mut c = concept("A", 4);
        c["scenes"][0]["asset_index"] = json!("first");
        let raw = reply(vec![c, concept("B", 4), concept("C", 4)]);

        let set = normalize_response(&raw, "t");

        assert_eq!(set.concepts()[0].concept_name, "A");
        assert_eq!(set.concepts()[0].scenes[0].asset_index, 0);
    }

    #[test]
    fn user_image_asset_type_is_kept() {
        let c = json!({ "scenes": [
            { "asset_type": "user_image", "asset_index": 1 },
            { "asset_type": "video" },
        ] });

        let scenes = &repair_concepts(&[c])[0].scenes;

        assert_eq!(scenes[0].asset_type, AssetType::UserImage);
        assert_eq!(scenes[0].asset_index, 1);
        assert_eq!(scenes[1].asset_type, AssetType::Generated);
    }

    #[test]
    fn non_string_values_are_rendered_or_dropped() {
        let c = json!({
            "concept_name": 7,
            "hook": { "text": "nested" },
            "hashtags": ["#ok", 2024, null, ["#nested"]],
            "scenes": ["not an object"],
        });

        let repaired = &repair_concepts(&[c])[0];

        assert_eq!(repaired.concept_name, "7");
        assert_eq!(repaired.hook, "");
        assert_eq!(repaired.hashtags, ["#ok", "2024"]);
        assert_eq!(repaired.scenes, vec![Scene::default()]);
    }

    #[test]
    fn fallback_survives_repair_unchanged() {
        let set = normalize_response("", "ชาไทย");
        assert_eq!(set.into_inner(), build_fallback("ชาไทย", ""));
    }
}
