//! Declarative JSON form of [`ChartConfig`].
//!
//! The wire shape is the one full-featured charting libraries accept
//! (`type`, `data.datasets`, `options.plugins`), so configuration producers
//! can feed either renderer unchanged. Parsing is lenient the way number
//! coercion is lenient: malformed values degrade instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::CutoutSpec;
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, ChartKind, ChartOptions, SeriesConfig, TitleOptions, TooltipOptions};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJson {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ChartDataJson,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: ChartOptionsJson,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasets: Vec<DatasetJson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugins: PluginsJson,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleJson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabelsJson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendLabelsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

/// Explicit `null` reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: ChartConfigJson = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        Ok(payload.into())
    }

    pub fn from_json_value(value: Value) -> ChartResult<Self> {
        let payload: ChartConfigJson = serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        Ok(payload.into())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&ChartConfigJson::from(self)).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

/// Number coercion for dataset values: numbers pass through, numeric strings
/// are parsed, booleans count as 1/0, everything else (and any non-finite
/// result) is 0.
#[must_use]
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if number.is_finite() { number } else { 0.0 }
}

fn coerce_values(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(entries)) => entries.iter().map(coerce_number).collect(),
        _ => Vec::new(),
    }
}

fn coerce_colors(value: Option<&Value>) -> Vec<String> {
    // A single color string is not spread over slices.
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| entry.as_str().unwrap_or_default().to_owned())
        .collect()
}

/// Scalar color field: a string, or the first string of a per-slice array.
fn coerce_color(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Array(entries) => entries.iter().find_map(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

fn coerce_cutout(value: Option<&Value>) -> Option<CutoutSpec> {
    match value? {
        Value::Number(number) => number.as_f64().map(CutoutSpec::Number),
        Value::String(text) => Some(CutoutSpec::Text(text.clone())),
        _ => None,
    }
}

fn coerce_width(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|width| width.is_finite())
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Title text: a string, or an array of lines joined with newlines.
fn title_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(lines)) => lines
            .iter()
            .map(label_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => label_text(other),
        None => String::new(),
    }
}

impl From<ChartConfigJson> for ChartConfig {
    fn from(payload: ChartConfigJson) -> Self {
        let kind = ChartKind::parse(
            payload
                .kind
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default(),
        );
        let series = payload
            .data
            .datasets
            .into_iter()
            .map(|dataset| SeriesConfig {
                label: dataset.label.as_ref().map(label_text),
                values: coerce_values(dataset.data.as_ref()),
                colors: coerce_colors(dataset.background_color.as_ref()),
                border_width: coerce_width(dataset.border_width.as_ref()).into(),
                border_color: coerce_color(dataset.border_color.as_ref()).into(),
            })
            .collect();

        let options = payload.options;
        let plugins = options.plugins;
        let tooltip = plugins.tooltip.unwrap_or_default();
        Self {
            kind,
            labels: match &payload.data.labels {
                Some(Value::Array(labels)) => labels.iter().map(label_text).collect(),
                _ => Vec::new(),
            },
            series,
            options: ChartOptions {
                responsive: !matches!(options.responsive, Some(Value::Bool(false))),
                cutout: coerce_cutout(options.cutout.as_ref()),
                color: coerce_color(options.color.as_ref()).into(),
                tooltip: TooltipOptions {
                    background_color: coerce_color(tooltip.background_color.as_ref()).into(),
                    title_color: coerce_color(tooltip.title_color.as_ref()).into(),
                    body_color: coerce_color(tooltip.body_color.as_ref()).into(),
                    border_color: coerce_color(tooltip.border_color.as_ref()).into(),
                    border_width: coerce_width(tooltip.border_width.as_ref()).into(),
                },
                legend_label_color: plugins
                    .legend
                    .and_then(|legend| legend.labels)
                    .and_then(|labels| coerce_color(labels.color.as_ref()))
                    .into(),
                title: plugins.title.map(|title| TitleOptions {
                    text: title_text(title.text.as_ref()),
                    color: coerce_color(title.color.as_ref()).into(),
                }),
            },
        }
    }
}

impl From<&ChartConfig> for ChartConfigJson {
    fn from(config: &ChartConfig) -> Self {
        let datasets = config
            .series
            .iter()
            .map(|series| DatasetJson {
                label: series.label.clone().map(Value::from),
                data: Some(Value::Array(
                    series.values.iter().map(|value| Value::from(*value)).collect(),
                )),
                background_color: (!series.colors.is_empty()).then(|| {
                    Value::Array(series.colors.iter().cloned().map(Value::from).collect())
                }),
                border_width: series.border_width.to_option().map(Value::from),
                border_color: series.border_color.to_option().map(Value::from),
            })
            .collect();

        let options = &config.options;
        let tooltip = &options.tooltip;
        let tooltip = (tooltip != &TooltipOptions::default()).then(|| TooltipJson {
            background_color: tooltip.background_color.to_option().map(Value::from),
            title_color: tooltip.title_color.to_option().map(Value::from),
            body_color: tooltip.body_color.to_option().map(Value::from),
            border_color: tooltip.border_color.to_option().map(Value::from),
            border_width: tooltip.border_width.to_option().map(Value::from),
        });
        let legend = options
            .legend_label_color
            .to_option()
            .map(|color| LegendJson {
                labels: Some(LegendLabelsJson {
                    color: Some(Value::from(color)),
                }),
            });

        Self {
            kind: Some(Value::from(config.kind.as_str())),
            data: ChartDataJson {
                labels: (!config.labels.is_empty()).then(|| {
                    Value::Array(config.labels.iter().cloned().map(Value::from).collect())
                }),
                datasets,
            },
            options: ChartOptionsJson {
                responsive: Some(Value::Bool(options.responsive)),
                cutout: options.cutout.as_ref().map(|cutout| match cutout {
                    CutoutSpec::Number(number) => Value::from(*number),
                    CutoutSpec::Text(text) => Value::from(text.clone()),
                }),
                color: options.color.to_option().map(Value::from),
                plugins: PluginsJson {
                    tooltip,
                    legend,
                    title: options.title.as_ref().map(|title| TitleJson {
                        text: Some(Value::from(title.text.clone())),
                        color: title.color.to_option().map(Value::from),
                    }),
                },
            },
        }
    }
}

