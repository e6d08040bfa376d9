use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{ColorRamp, InvalidHexColor, Palette, Rgb};

/// The `$schema` written at the root of a design token document.
pub const DESIGN_TOKENS_SCHEMA: &str = "https://design-tokens.github.io/community-group/format/";

#[derive(Debug, Error, PartialEq)]
pub enum SerializationError {
    #[error(
        "color {name:?} has {actual} entries but the palette schedule has {expected} steps"
    )]
    EntryCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("color {name:?} step {step_label} has a malformed hex value")]
    InvalidHex {
        name: String,
        step_label: u32,
        #[source]
        source: InvalidHexColor,
    },
    #[error("failed to encode {format} document: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },
}

impl SerializationError {
    pub fn color_name(&self) -> Option<&str> {
        match self {
            Self::EntryCountMismatch { name, .. } | Self::InvalidHex { name, .. } => Some(name),
            Self::Encode { .. } => None,
        }
    }
}

/// A document format a [`Palette`] can be exported to.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Display, EnumIter, EnumString)]
pub enum ExportFormat {
    #[strum(to_string = "json")]
    Json,
    #[strum(to_string = "csv")]
    Csv,
    /// Design Tokens Community Group format.
    #[strum(to_string = "tokens", serialize = "design_tokens", serialize = "dtcg")]
    DesignTokens,
    #[strum(to_string = "figma")]
    FigmaStyles,
}

impl ExportFormat {
    pub fn suggested_filename(&self) -> &'static str {
        match self {
            Self::Json => "color_palette.json",
            Self::Csv => "color_palette.csv",
            Self::DesignTokens => "design_tokens.json",
            Self::FigmaStyles => "figma_color_styles.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json | Self::DesignTokens | Self::FigmaStyles => "application/json",
        }
    }
}

/// A serialized palette, ready to be handed to a [`crate::Delivery`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExportDocument {
    format: ExportFormat,
    payload: String,
}

impl ExportDocument {
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn suggested_filename(&self) -> &'static str {
        self.format.suggested_filename()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

/// Exports `palette` in the given format.
pub fn export(
    palette: &Palette,
    format: ExportFormat,
) -> Result<ExportDocument, SerializationError> {
    match format {
        ExportFormat::Json => to_json(palette),
        ExportFormat::Csv => to_csv(palette),
        ExportFormat::DesignTokens => to_design_tokens(palette),
        ExportFormat::FigmaStyles => to_figma_styles(palette),
    }
}

/// Every ramp must have exactly one entry per step of the palette schedule.
fn checked_ramps(palette: &Palette) -> Result<&[ColorRamp], SerializationError> {
    let expected = palette.schedule().len();
    for ramp in palette.ramps() {
        if ramp.entries.len() != expected {
            return Err(SerializationError::EntryCountMismatch {
                name: ramp.name.clone(),
                expected,
                actual: ramp.entries.len(),
            });
        }
    }
    Ok(palette.ramps())
}

/// Writes integral values without a fractional part (`10` rather than `10.0`).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.;

    if value.fract() == 0. && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn to_pretty_json(
    format: ExportFormat,
    value: &impl Serialize,
) -> Result<ExportDocument, SerializationError> {
    let payload =
        serde_json::to_string_pretty(value).map_err(|error| SerializationError::Encode {
            format,
            message: error.to_string(),
        })?;
    Ok(ExportDocument { format, payload })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RampContent<'a> {
    name: &'a str,
    #[serde(serialize_with = "serialize_number")]
    hue: f64,
    #[serde(serialize_with = "serialize_number")]
    saturation: f64,
    color_ramp: Vec<RampEntryContent<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RampEntryContent<'a> {
    step_label: u32,
    hex: &'a str,
    rgb: String,
    descriptor: &'a str,
}

/// A pretty-printed array of ramps, in palette order.
pub fn to_json(palette: &Palette) -> Result<ExportDocument, SerializationError> {
    let content = checked_ramps(palette)?
        .iter()
        .map(|ramp| RampContent {
            name: &ramp.name,
            hue: ramp.hue,
            saturation: ramp.saturation,
            color_ramp: ramp
                .entries
                .iter()
                .map(|entry| RampEntryContent {
                    step_label: entry.step_label(),
                    hex: entry.hex(),
                    rgb: entry.rgb().to_string(),
                    descriptor: entry.descriptor(),
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    to_pretty_json(ExportFormat::Json, &content)
}

fn push_csv_field(line: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        line.push('"');
        line.push_str(&field.replace('"', "\"\""));
        line.push('"');
    } else {
        line.push_str(field);
    }
}

/// One header row of step labels, then one row of hex values per ramp.
pub fn to_csv(palette: &Palette) -> Result<ExportDocument, SerializationError> {
    let ramps = checked_ramps(palette)?;

    let mut csv = String::from("Color Name");
    for label in palette.schedule().iter() {
        csv.push(',');
        csv.push_str(&label.to_string());
    }
    csv.push('\n');

    for ramp in ramps {
        push_csv_field(&mut csv, &ramp.name);
        for entry in &ramp.entries {
            csv.push(',');
            csv.push_str(entry.hex());
        }
        csv.push('\n');
    }

    Ok(ExportDocument {
        format: ExportFormat::Csv,
        payload: csv,
    })
}

#[derive(Serialize)]
struct DesignTokensContent<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    color: IndexMap<String, IndexMap<String, DesignTokenContent<'a>>>,
}

#[derive(Serialize)]
struct DesignTokenContent<'a> {
    value: &'a str,
}

/// A DTCG token tree keyed by lowercase color name, then step label.
///
/// Tokens are not namespaced by appearance: exporting two ramps with the same
/// name keeps only the last one.
pub fn to_design_tokens(palette: &Palette) -> Result<ExportDocument, SerializationError> {
    let mut color: IndexMap<String, IndexMap<String, DesignTokenContent>> = IndexMap::new();
    for ramp in checked_ramps(palette)? {
        let tokens = ramp
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.step_label().to_string(),
                    DesignTokenContent { value: entry.hex() },
                )
            })
            .collect();
        color.insert(ramp.name.to_lowercase(), tokens);
    }

    to_pretty_json(
        ExportFormat::DesignTokens,
        &DesignTokensContent {
            schema: DESIGN_TOKENS_SCHEMA,
            color,
        },
    )
}

#[derive(Serialize)]
struct FigmaStyleContent {
    name: String,
    description: String,
    paints: Vec<FigmaPaintContent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FigmaPaintContent {
    #[serde(rename = "type")]
    kind: &'static str,
    visible: bool,
    #[serde(serialize_with = "serialize_number")]
    opacity: f64,
    blend_mode: &'static str,
    color: FigmaColorContent,
}

#[derive(Serialize)]
struct FigmaColorContent {
    #[serde(serialize_with = "serialize_number")]
    r: f64,
    #[serde(serialize_with = "serialize_number")]
    g: f64,
    #[serde(serialize_with = "serialize_number")]
    b: f64,
}

/// Figma color styles keyed `color/<lowercase name>/<step>`, each a single
/// opaque solid paint with channels as fractions of 255.
pub fn to_figma_styles(palette: &Palette) -> Result<ExportDocument, SerializationError> {
    let mut styles = IndexMap::new();
    for ramp in checked_ramps(palette)? {
        let slug = ramp.name.to_lowercase();
        for entry in &ramp.entries {
            let rgb = Rgb::try_from(entry.hex()).map_err(|source| SerializationError::InvalidHex {
                name: ramp.name.clone(),
                step_label: entry.step_label(),
                source,
            })?;
            let [r, g, b] = rgb.to_unit_channels();

            let key = format!("color/{slug}/{}", entry.step_label());
            let style = FigmaStyleContent {
                name: key.clone(),
                description: format!("{} {}", ramp.name, entry.step_label()),
                paints: vec![FigmaPaintContent {
                    kind: "SOLID",
                    visible: true,
                    opacity: 1.,
                    blend_mode: "NORMAL",
                    color: FigmaColorContent { r, g, b },
                }],
            };
            styles.insert(key, style);
        }
    }

    to_pretty_json(ExportFormat::FigmaStyles, &styles)
}
