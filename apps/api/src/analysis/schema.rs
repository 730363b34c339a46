//! Output schema for résumé analysis, declared as data.
//!
//! The declaration is the source of truth; `to_response_schema` renders it into
//! the OpenAPI-subset document the model service accepts.

use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Number { min: f64, max: f64 },
    Text,
    TextList,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    /// Position in the model's output; lower comes first.
    pub order: u8,
}

#[derive(Debug, PartialEq)]
pub struct AnalysisSchema {
    pub fields: &'static [FieldSpec],
}

/// The schema every analysis request uses.
pub static ATS_ANALYSIS_SCHEMA: AnalysisSchema = AnalysisSchema {
    fields: &[
        FieldSpec {
            name: "ats_score",
            kind: FieldKind::Number { min: 0.0, max: 100.0 },
            description: "ATS compatibility score from 0 to 100",
            order: 0,
        },
        FieldSpec {
            name: "structure",
            kind: FieldKind::Text,
            description: "Feedback on section organization and overall structure",
            order: 1,
        },
        FieldSpec {
            name: "format",
            kind: FieldKind::Text,
            description: "Feedback on formatting and ATS readability",
            order: 2,
        },
        FieldSpec {
            name: "keywords",
            kind: FieldKind::TextList,
            description: "Relevant keywords and skills found in the resume",
            order: 3,
        },
        FieldSpec {
            name: "suggestions",
            kind: FieldKind::TextList,
            description: "Concrete, actionable improvements",
            order: 4,
        },
    ],
};

impl AnalysisSchema {
    /// Field names sorted by their declared order.
    pub fn ordered_names(&self) -> Vec<&'static str> {
        let mut fields: Vec<&FieldSpec> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields.into_iter().map(|f| f.name).collect()
    }

    /// Checks the declaration is usable: non-empty, unique names and orders,
    /// and sane numeric ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("schema declares no fields".to_string());
        }
        for (i, field) in self.fields.iter().enumerate() {
            for other in &self.fields[i + 1..] {
                if field.name == other.name {
                    return Err(format!("duplicate field name '{}'", field.name));
                }
                if field.order == other.order {
                    return Err(format!(
                        "fields '{}' and '{}' share order {}",
                        field.name, other.name, field.order
                    ));
                }
            }
            if let FieldKind::Number { min, max } = field.kind {
                if min > max {
                    return Err(format!("field '{}' has min > max", field.name));
                }
            }
        }
        Ok(())
    }

    /// Renders the response-schema document sent with every request.
    /// All fields are required; `propertyOrdering` fixes output order.
    pub fn to_response_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), render_field(f)))
            .collect();
        let ordered = self.ordered_names();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": ordered,
            "propertyOrdering": ordered,
        })
    }
}

fn render_field(field: &FieldSpec) -> Value {
    match field.kind {
        FieldKind::Number { min, max } => json!({
            "type": "NUMBER",
            "description": field.description,
            "minimum": min,
            "maximum": max,
        }),
        FieldKind::Text => json!({
            "type": "STRING",
            "description": field.description,
        }),
        FieldKind::TextList => json!({
            "type": "ARRAY",
            "description": field.description,
            "items": { "type": "STRING" },
        }),
    }
}
