//! Embedded artifact templates
//!
//! Each template is Rust source with `{{name}}` placeholders. A template
//! declares the placeholders it needs; every declared placeholder must
//! occur exactly once and no undeclared one may occur at all. This is
//! checked when the crate is compiled and again on every render.

use std::path::Path;

use crate::io::error::{GeneratorError, Result};
use crate::runtime::TileParams;
use crate::sink::SinkKind;

/// Named substitution points in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Frame width literal
    Width,
    /// Frame height literal
    Height,
    /// Tile edge literal
    Tile,
    /// Variance cutoff literal
    VarThreshold,
    /// Seed literal
    Seed,
    /// Mean cutoff literal
    BrightnessThreshold,
    /// Quoted output path of the JSON sink
    JsonPath,
}

impl Placeholder {
    /// Every placeholder the generator knows how to fill
    pub const ALL: [Self; 7] = [
        Self::Width,
        Self::Height,
        Self::Tile,
        Self::VarThreshold,
        Self::Seed,
        Self::BrightnessThreshold,
        Self::JsonPath,
    ];

    /// Literal token searched for in the template source
    pub const fn token(self) -> &'static str {
        match self {
            Self::Width => "{{width}}",
            Self::Height => "{{height}}",
            Self::Tile => "{{tile}}",
            Self::VarThreshold => "{{var_threshold}}",
            Self::Seed => "{{seed}}",
            Self::BrightnessThreshold => "{{brightness_threshold}}",
            Self::JsonPath => "{{json_path}}",
        }
    }
}

const PARAMETER_PLACEHOLDERS: [Placeholder; 6] = [
    Placeholder::Width,
    Placeholder::Height,
    Placeholder::Tile,
    Placeholder::VarThreshold,
    Placeholder::Seed,
    Placeholder::BrightnessThreshold,
];

const JSON_PLACEHOLDERS: [Placeholder; 7] = Placeholder::ALL;

/// Artifact source with the placeholders it declares
#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    source: &'static str,
    placeholders: &'static [Placeholder],
}

/// Artifact that prints the console summary
pub const CONSOLE_TEMPLATE: Template = Template {
    name: "console",
    source: include_str!("../../templates/console.rs.tmpl"),
    placeholders: &PARAMETER_PLACEHOLDERS,
};

/// Artifact that writes the JSON document
pub const JSON_TEMPLATE: Template = Template {
    name: "json",
    source: include_str!("../../templates/json.rs.tmpl"),
    placeholders: &JSON_PLACEHOLDERS,
};

const _: () = assert!(
    CONSOLE_TEMPLATE.is_well_formed(),
    "console template placeholders must each occur exactly once"
);
const _: () = assert!(
    JSON_TEMPLATE.is_well_formed(),
    "json template placeholders must each occur exactly once"
);

impl Template {
    /// Template for the artifact built around `kind`
    pub const fn for_sink(kind: SinkKind) -> Self {
        match kind {
            SinkKind::Console => CONSOLE_TEMPLATE,
            SinkKind::Json => JSON_TEMPLATE,
        }
    }

    /// Template variant name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Unrendered source
    pub const fn source(&self) -> &'static str {
        self.source
    }

    /// Placeholders this template declares
    pub const fn placeholders(&self) -> &'static [Placeholder] {
        self.placeholders
    }

    /// Whether `placeholder` is declared by this template
    pub const fn declares(&self, placeholder: Placeholder) -> bool {
        let mut index = 0;
        while index < self.placeholders.len() {
            if self.placeholders[index] as u8 == placeholder as u8 {
                return true;
            }
            index += 1;
        }
        false
    }

    /// Occurrences `placeholder` needs: one if declared, none otherwise
    pub const fn expected_occurrences(&self, placeholder: Placeholder) -> usize {
        if self.declares(placeholder) { 1 } else { 0 }
    }

    /// How often `placeholder` occurs in the source
    pub const fn occurrences(&self, placeholder: Placeholder) -> usize {
        count_occurrences(self.source.as_bytes(), placeholder.token().as_bytes())
    }

    /// Whether every known placeholder occurs exactly as often as expected
    pub const fn is_well_formed(&self) -> bool {
        let mut index = 0;
        while index < Placeholder::ALL.len() {
            let placeholder = Placeholder::ALL[index];
            if self.occurrences(placeholder) != self.expected_occurrences(placeholder) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Substitute every declared placeholder
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Template`] if any placeholder occurs a
    /// different number of times than the template declares
    pub fn render(&self, bindings: &Bindings) -> Result<String> {
        for placeholder in Placeholder::ALL {
            let occurrences = self.occurrences(placeholder);
            if occurrences != self.expected_occurrences(placeholder) {
                return Err(GeneratorError::Template {
                    template: self.name,
                    placeholder: placeholder.token(),
                    occurrences,
                });
            }
        }

        let mut rendered = self.source.to_owned();
        for &placeholder in self.placeholders {
            rendered = rendered.replacen(placeholder.token(), &bindings.value(placeholder), 1);
        }
        Ok(rendered)
    }
}

// Loop conditions keep every index in bounds
#[allow(clippy::indexing_slicing)]
const fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        let mut offset = 0;
        while offset < needle.len() && haystack[start + offset] == needle[offset] {
            offset += 1;
        }
        if offset == needle.len() {
            count += 1;
            start += needle.len();
        } else {
            start += 1;
        }
    }
    count
}

/// Rust literals substituted for each placeholder
#[derive(Debug, Clone)]
pub struct Bindings {
    params: TileParams,
    json_path: String,
}

impl Bindings {
    /// Bind validated parameters and the JSON sink's output path
    pub fn new(params: TileParams, json_path: &Path) -> Self {
        Self {
            params,
            json_path: json_path.to_string_lossy().into_owned(),
        }
    }

    /// Literal for `placeholder`
    pub fn value(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Width => self.params.width.to_string(),
            Placeholder::Height => self.params.height.to_string(),
            Placeholder::Tile => self.params.tile.to_string(),
            Placeholder::Seed => self.params.seed.to_string(),
            Placeholder::VarThreshold => float_literal(self.params.var_threshold),
            Placeholder::BrightnessThreshold => float_literal(self.params.brightness_threshold),
            Placeholder::JsonPath => format!("{:?}", self.json_path),
        }
    }
}

// Debug output always carries a `.` or an exponent, so it stays a float literal
fn float_literal(value: f32) -> String {
    format!("{value:?}")
}
