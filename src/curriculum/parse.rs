use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawCurriculum {
    #[serde(default)]
    pub(super) grades: Vec<RawGrade>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawGrade {
    pub(super) level: u32,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) topics: Vec<RawTopic>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawTopic {
    pub(super) id: String,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) concepts: Vec<RawConcept>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawConcept {
    pub(super) id: String,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default, rename = "priorKnowledgeIds")]
    pub(super) prior_knowledge_ids: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawFlatConcept {
    pub(super) id: String,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(rename = "gradeLevel")]
    pub(super) grade_level: u32,
    #[serde(rename = "topicId")]
    pub(super) topic_id: String,
    #[serde(default, rename = "priorKnowledgeIds")]
    pub(super) prior_knowledge_ids: Vec<String>,
}

pub(super) enum RawDataset {
    Nested(RawCurriculum),
    Flat(Vec<RawFlatConcept>),
}

pub(super) fn parse_dataset(raw: &str) -> Result<RawDataset> {
    let parsed: Value = serde_json::from_str(raw).context("invalid curriculum JSON")?;

    if parsed.is_array() {
        let concepts = Vec::<RawFlatConcept>::deserialize(parsed)
            .context("invalid concept list in JSON")?;
        return Ok(RawDataset::Flat(concepts));
    }

    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("unexpected JSON type for curriculum data"))?;

    if object.contains_key("grades") {
        let curriculum =
            RawCurriculum::deserialize(parsed).context("invalid grade tree in JSON")?;
        return Ok(RawDataset::Nested(curriculum));
    }

    if let Some(concepts) = object.get("concepts") {
        let concepts = Vec::<RawFlatConcept>::deserialize(concepts)
            .context("invalid concept list in JSON")?;
        return Ok(RawDataset::Flat(concepts));
    }

    Err(anyhow!(
        "could not parse curriculum JSON; expected a `grades` tree or a concept list"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_nested_and_flat_shapes() {
        let nested = r#"{"grades":[{"level":6,"title":"VI","topics":[]}]}"#;
        assert!(matches!(parse_dataset(nested), Ok(RawDataset::Nested(_))));

        let flat = r#"[{"id":"a","title":"A","gradeLevel":7,"topicId":"t"}]"#;
        assert!(matches!(parse_dataset(flat), Ok(RawDataset::Flat(list)) if list.len() == 1));

        let wrapped = r#"{"concepts":[]}"#;
        assert!(matches!(parse_dataset(wrapped), Ok(RawDataset::Flat(list)) if list.is_empty()));
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert!(parse_dataset("42").is_err());
        assert!(parse_dataset(r#"{"version":1}"#).is_err());
        assert!(parse_dataset("{not json").is_err());
    }
}
