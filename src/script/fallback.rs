//! Deterministic placeholder content used when the model's reply cannot be
//! trusted.
//!
//! The output always has the full 3 × 4 shape with every field filled, so it
//! doubles as the reference shape for the normalizer tests.

use crate::script::model::{AssetType, Concept, Scene, CONCEPT_COUNT, SCENE_COUNT};

/// Build the fallback concept list for `topic`.
///
/// `style` is accepted for future per-style templates and currently has no
/// effect on the output.
pub fn build_fallback(topic: &str, _style: &str) -> Vec<Concept> {
    (1..=CONCEPT_COUNT)
        .map(|i| Concept {
            concept_name: format!("ไอเดียที่ {i} – {topic}"),
            insight: format!("Insight สำหรับ {topic}"),
            hook: format!("Hook แรง ๆ ของไอเดียที่ {i}"),
            hashtags: vec!["แฮชแท็ก1".into(), "แฮชแท็ก2".into(), "แฮชแท็ก3".into()],
            scenes: (1..=SCENE_COUNT).map(|j| fallback_scene(topic, j)).collect(),
        })
        .collect()
}

fn fallback_scene(topic: &str, j: usize) -> Scene {
    Scene {
        asset_type: AssetType::Generated,
        asset_index: 0,
        visual_prompt_th: format!("ภาพที่ {j} สำหรับหัวข้อ {topic}"),
        visual_prompt_en: format!("Scene {j} visual for {topic}"),
        voiceover: format!("เสียงพากย์ฉากที่ {j} – ตัวอย่างบทพูดสั้น ๆ"),
    }
}
