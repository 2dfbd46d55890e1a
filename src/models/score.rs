use serde::{Deserialize, Serialize};

/// One allowed rating value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreChoice {
    pub value: f64,
    pub title: String,
}

impl ScoreChoice {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            title: value.to_string(),
        }
    }

    /// Value as it is posted back by the form.
    pub fn form_value(&self) -> String {
        self.value.to_string()
    }
}

pub fn default_score_choices() -> Vec<ScoreChoice> {
    [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().map(ScoreChoice::new).collect()
}

/// Parses a comma separated list such as `"1,2,3,4,5"` or `"0.5, 1, 1.5"`.
pub fn parse_score_choices(raw: &str) -> Result<Vec<ScoreChoice>, String> {
    let mut choices = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let value: f64 = part
            .parse()
            .map_err(|e| format!("invalid score choice '{}': {}", part, e))?;
        if !value.is_finite() {
            return Err(format!("invalid score choice '{}'", part));
        }
        if choices.iter().any(|c: &ScoreChoice| c.value == value) {
            return Err(format!("duplicate score choice '{}'", part));
        }
        choices.push(ScoreChoice::new(value));
    }
    if choices.is_empty() {
        return Err("at least one score choice is required".into());
    }
    Ok(choices)
}

/// Looks up a posted score among the allowed choices.
pub fn match_score(choices: &[ScoreChoice], posted: &str) -> Option<f64> {
    let value: f64 = posted.trim().parse().ok()?;
    choices.iter().find(|c| c.value == value).map(|c| c.value)
}

/// A score choice prepared for the star widget. `z_index` and `width` only
/// drive the layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreOption {
    pub title: String,
    pub value: String,
    pub current: bool,
    pub z_index: i32,
    pub width: i32,
}

pub fn score_options(choices: &[ScoreChoice], current: Option<&str>) -> Vec<ScoreOption> {
    let current = current.and_then(|posted| match_score(choices, posted));
    choices
        .iter()
        .enumerate()
        .map(|(i, choice)| ScoreOption {
            title: choice.title.clone(),
            value: choice.form_value(),
            current: current == Some(choice.value),
            z_index: 10 - i as i32,
            width: (i as i32 + 1) * 25,
        })
        .collect()
}
