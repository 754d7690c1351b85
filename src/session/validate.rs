//! Input validation for step submissions.
//!
//! Fields arrive as raw JSON so a value of the wrong type is reported as
//! `Invalid <field>` instead of failing the whole request at the transport.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Number, Value};

use super::error::SessionError;
use super::types::ThoughtRecord;

/// Raw step submission, also the parameter schema of the `sequentialthinking` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtInput {
    #[schemars(with = "Option<String>", description = "Your current thinking step (required)")]
    pub thought: Option<Value>,

    #[schemars(
        with = "Option<u32>",
        description = "Current thought number, starting at 1 (required)"
    )]
    pub thought_number: Option<Value>,

    #[schemars(
        with = "Option<u32>",
        description = "Estimated total thoughts needed, at least 1 (required)"
    )]
    pub total_thoughts: Option<Value>,

    #[schemars(
        with = "Option<bool>",
        description = "Whether another thought step is needed (required)"
    )]
    pub next_thought_needed: Option<Value>,

    #[schemars(
        with = "Option<String>",
        description = "Current track (main or branch name). Defaults to current track."
    )]
    pub track: Option<Value>,

    #[schemars(with = "Option<bool>", description = "Whether this revises previous thinking")]
    pub is_revision: Option<Value>,

    #[schemars(with = "Option<u32>", description = "Which thought is being reconsidered")]
    pub revises_thought: Option<Value>,

    #[schemars(with = "Option<u32>", description = "Branching point thought number")]
    pub branch_from_thought: Option<Value>,

    #[schemars(with = "Option<String>", description = "Branch identifier")]
    pub branch_id: Option<Value>,

    #[schemars(with = "Option<bool>", description = "If more thoughts are needed")]
    pub needs_more_thoughts: Option<Value>,
}

impl ThoughtInput {
    /// A well-typed submission with the four required fields set.
    pub fn new(thought: &str, thought_number: u32, total_thoughts: u32, next_thought_needed: bool) -> Self {
        Self {
            thought: Some(thought.into()),
            thought_number: Some(thought_number.into()),
            total_thoughts: Some(total_thoughts.into()),
            next_thought_needed: Some(next_thought_needed.into()),
            ..Default::default()
        }
    }

    pub fn on_track(mut self, track: &str) -> Self {
        self.track = Some(track.into());
        self
    }
}

/// Check a submission and turn it into a [`ThoughtRecord`].
///
/// An omitted or empty `track` resolves to `current_track`. Step numbers and
/// totals must be whole numbers of at least 1; integral floats such as `3.0`
/// are accepted. Metadata passes through once its type checks out.
pub fn validate(input: ThoughtInput, current_track: &str) -> Result<ThoughtRecord, SessionError> {
    let thought = text(input.thought, "thought")?
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SessionError::invalid("thought", "must be a non-empty string"))?;

    let thought_number = number(input.thought_number, "thoughtNumber")?
        .ok_or_else(|| SessionError::invalid("thoughtNumber", "must be a number"))?;
    let thought_number = positive(thought_number, "thoughtNumber")?;

    let total_thoughts = number(input.total_thoughts, "totalThoughts")?
        .ok_or_else(|| SessionError::invalid("totalThoughts", "must be a number"))?;
    let total_thoughts = positive(total_thoughts, "totalThoughts")?;

    let next_thought_needed = flag(input.next_thought_needed, "nextThoughtNeeded")?
        .ok_or_else(|| SessionError::invalid("nextThoughtNeeded", "must be a boolean"))?;

    let track = text(input.track, "track")?
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| current_track.to_string());

    Ok(ThoughtRecord {
        thought,
        thought_number,
        total_thoughts,
        next_thought_needed,
        track,
        is_revision: flag(input.is_revision, "isRevision")?,
        revises_thought: number(input.revises_thought, "revisesThought")?,
        branch_from_thought: number(input.branch_from_thought, "branchFromThought")?,
        branch_id: text(input.branch_id, "branchId")?,
        needs_more_thoughts: flag(input.needs_more_thoughts, "needsMoreThoughts")?,
    })
}

// `null` counts as absent for every field.

fn text(value: Option<Value>, field: &'static str) -> Result<Option<String>, SessionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(SessionError::invalid(field, "must be a string")),
    }
}

fn number(value: Option<Value>, field: &'static str) -> Result<Option<u32>, SessionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => whole(&n)
            .map(Some)
            .ok_or_else(|| SessionError::invalid(field, "must be a whole number no greater than 4294967295")),
        Some(_) => Err(SessionError::invalid(field, "must be a number")),
    }
}

fn flag(value: Option<Value>, field: &'static str) -> Result<Option<bool>, SessionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(_) => Err(SessionError::invalid(field, "must be a boolean")),
    }
}

fn positive(n: u32, field: &'static str) -> Result<u32, SessionError> {
    if n == 0 {
        return Err(SessionError::invalid(field, "must be a positive number"));
    }
    Ok(n)
}

fn whole(n: &Number) -> Option<u32> {
    if let Some(v) = n.as_u64() {
        return u32::try_from(v).ok();
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f)).then(|| f as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(thought: &str, number: u32, total: u32, next: bool) -> ThoughtInput {
        ThoughtInput::new(thought, number, total, next)
    }

    fn field_of(err: SessionError) -> &'static str {
        match err {
            SessionError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn track_defaults_to_current() {
        let record = validate(input("a", 1, 2, true), "probe").unwrap();
        assert_eq!(record.track, "probe");

        let mut with_empty = input("a", 1, 2, true);
        with_empty.track = Some("".into());
        assert_eq!(validate(with_empty, "main").unwrap().track, "main");
    }

    #[test]
    fn explicit_track_wins() {
        let raw = input("a", 1, 2, true).on_track("other");
        assert_eq!(validate(raw, "main").unwrap().track, "other");
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let mut raw = input("a", 1, 1, true);
        raw.thought = None;
        assert_eq!(field_of(validate(raw, "main").unwrap_err()), "thought");

        let mut raw = input("a", 1, 1, true);
        raw.thought_number = None;
        assert_eq!(field_of(validate(raw, "main").unwrap_err()), "thoughtNumber");

        let mut raw = input("a", 1, 1, true);
        raw.total_thoughts = None;
        assert_eq!(field_of(validate(raw, "main").unwrap_err()), "totalThoughts");

        let mut raw = input("a", 1, 1, true);
        raw.next_thought_needed = None;
        assert_eq!(field_of(validate(raw, "main").unwrap_err()), "nextThoughtNeeded");
    }

    #[test]
    fn zero_and_empty_values_are_rejected() {
        assert_eq!(field_of(validate(input("", 1, 1, true), "main").unwrap_err()), "thought");
        assert_eq!(field_of(validate(input("a", 0, 1, true), "main").unwrap_err()), "thoughtNumber");
        assert_eq!(field_of(validate(input("a", 1, 0, true), "main").unwrap_err()), "totalThoughts");
    }

    #[test]
    fn metadata_passes_through() {
        let mut raw = input("rethink", 4, 6, true);
        raw.is_revision = Some(true.into());
        raw.revises_thought = Some(2.into());
        raw.branch_id = Some("b1".into());
        let record = validate(raw, "main").unwrap();
        assert_eq!(record.is_revision, Some(true));
        assert_eq!(record.revises_thought, Some(2));
        assert_eq!(record.branch_id.as_deref(), Some("b1"));
        assert_eq!(record.branch_from_thought, None);
        assert_eq!(record.needs_more_thoughts, None);
    }

    #[test]
    fn total_is_not_normalized_here() {
        let record = validate(input("a", 5, 3, false), "main").unwrap();
        assert_eq!(record.total_thoughts, 3);
    }

    #[test]
    fn wrong_types_name_the_field() {
        let cases = [
            ("thought", serde_json::json!(5)),
            ("thoughtNumber", serde_json::json!("1")),
            ("totalThoughts", serde_json::json!([3])),
            ("nextThoughtNeeded", serde_json::json!("yes")),
            ("track", serde_json::json!(7)),
            ("isRevision", serde_json::json!("no")),
            ("revisesThought", serde_json::json!(true)),
        ];
        for (field, bad) in cases {
            let mut raw = serde_json::json!({
                "thought": "a",
                "thoughtNumber": 1,
                "totalThoughts": 1,
                "nextThoughtNeeded": true,
            });
            raw[field] = bad;
            let input: ThoughtInput = serde_json::from_value(raw).unwrap();
            assert_eq!(field_of(validate(input, "main").unwrap_err()), field);
        }
    }

    #[test]
    fn integral_floats_are_numbers() {
        let input: ThoughtInput = serde_json::from_value(serde_json::json!({
            "thought": "a",
            "thoughtNumber": 2.0,
            "totalThoughts": 5.0,
            "nextThoughtNeeded": false,
        }))
        .unwrap();
        let record = validate(input, "main").unwrap();
        assert_eq!((record.thought_number, record.total_thoughts), (2, 5));
    }

    #[test]
    fn fractional_negative_and_oversized_numbers_are_rejected() {
        for bad in [serde_json::json!(1.5), serde_json::json!(-1), serde_json::json!(4294967296u64)] {
            let mut raw = input("a", 1, 1, true);
            raw.thought_number = Some(bad);
            assert_eq!(field_of(validate(raw, "main").unwrap_err()), "thoughtNumber");
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut raw = input("a", 1, 1, true);
        raw.thought = Some(Value::Null);
        let err = validate(raw, "main").unwrap_err();
        assert_eq!(err.to_string(), "Invalid thought: must be a non-empty string");

        let mut raw = input("a", 1, 1, true);
        raw.track = Some(Value::Null);
        assert_eq!(validate(raw, "cur").unwrap().track, "cur");
    }

    #[test]
    fn largest_step_number_is_accepted() {
        let record = validate(input("a", u32::MAX, 1, true), "main").unwrap();
        assert_eq!(record.thought_number, u32::MAX);
    }
}
