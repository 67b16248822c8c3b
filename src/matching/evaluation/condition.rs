use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attributes::{AttributeError, AttributeMap, AttributeValue, ProfileView};

/// Declared value type of a condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Number,
    Boolean,
    Date,
    #[serde(rename = "STRING")]
    Text,
}

impl DataType {
    pub const fn label(self) -> &'static str {
        match self {
            DataType::Number => "NUMBER",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Text => "STRING",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operator tokens accepted in condition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl ComparisonOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOperator::Eq => ordering == Ordering::Equal,
            ComparisonOperator::Ne => ordering != Ordering::Equal,
            ComparisonOperator::Ge => ordering != Ordering::Less,
            ComparisonOperator::Le => ordering != Ordering::Greater,
            ComparisonOperator::Gt => ordering == Ordering::Greater,
            ComparisonOperator::Lt => ordering == Ordering::Less,
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = ConditionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "=" | "==" => Ok(ComparisonOperator::Eq),
            "!=" | "<>" => Ok(ComparisonOperator::Ne),
            ">=" => Ok(ComparisonOperator::Ge),
            "<=" => Ok(ComparisonOperator::Le),
            ">" => Ok(ComparisonOperator::Gt),
            "<" => Ok(ComparisonOperator::Lt),
            other => Err(ConditionError::UnknownOperator {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The operator subset legal for BOOLEAN and STRING conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOperator {
    Eq,
    Ne,
}

impl EqualityOperator {
    fn holds(self, equal: bool) -> bool {
        match self {
            EqualityOperator::Eq => equal,
            EqualityOperator::Ne => !equal,
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            EqualityOperator::Eq => "=",
            EqualityOperator::Ne => "!=",
        }
    }
}

impl TryFrom<ComparisonOperator> for EqualityOperator {
    type Error = ComparisonOperator;

    fn try_from(operator: ComparisonOperator) -> Result<Self, Self::Error> {
        match operator {
            ComparisonOperator::Eq => Ok(EqualityOperator::Eq),
            ComparisonOperator::Ne => Ok(EqualityOperator::Ne),
            other => Err(other),
        }
    }
}

/// Canonical or overriding value carried by a condition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionValue {
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    #[serde(rename = "STRING")]
    Text(String),
}

impl ConditionValue {
    pub const fn data_type(&self) -> DataType {
        match self {
            ConditionValue::Number(_) => DataType::Number,
            ConditionValue::Boolean(_) => DataType::Boolean,
            ConditionValue::Date(_) => DataType::Date,
            ConditionValue::Text(_) => DataType::Text,
        }
    }
}

/// Whether a condition gates eligibility or only adds weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionClass {
    #[default]
    Required,
    Preferred,
    Bonus,
}

/// Reusable rule definition keyed by its category code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTemplate {
    pub code: String,
    pub name: String,
    pub category_code: String,
    pub data_type: DataType,
    pub value: Option<ConditionValue>,
    #[serde(default = "default_operator")]
    pub operator: String,
}

fn default_operator() -> String {
    "=".to_string()
}

/// Supply-type specific use of a template, optionally overriding its value or operator.
///
/// Decoding resolves the record once and rejects it when the operator, data type and
/// value do not form a legal predicate. Records built in code are checked again on
/// every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionRecord")]
pub struct SupplyTypeCondition {
    pub template: ConditionTemplate,
    pub override_value: Option<ConditionValue>,
    pub override_operator: Option<String>,
    pub class: ConditionClass,
    pub score_points: i32,
}

/// Wire shape of [`SupplyTypeCondition`] before validation.
#[derive(Deserialize)]
struct ConditionRecord {
    template: ConditionTemplate,
    #[serde(default)]
    override_value: Option<ConditionValue>,
    #[serde(default)]
    override_operator: Option<String>,
    #[serde(default)]
    class: ConditionClass,
    #[serde(default)]
    score_points: i32,
}

impl TryFrom<ConditionRecord> for SupplyTypeCondition {
    type Error = InvalidCondition;

    fn try_from(record: ConditionRecord) -> Result<Self, Self::Error> {
        let condition = SupplyTypeCondition {
            template: record.template,
            override_value: record.override_value,
            override_operator: record.override_operator,
            class: record.class,
            score_points: record.score_points,
        };

        match condition.resolve() {
            Ok(_) => Ok(condition),
            Err(source) => Err(InvalidCondition {
                code: condition.template.code,
                source,
            }),
        }
    }
}

/// A condition record rejected while decoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("condition {code} is invalid: {source}")]
pub struct InvalidCondition {
    pub code: String,
    #[source]
    pub source: ConditionError,
}

impl SupplyTypeCondition {
    /// Collapse override-or-default into one immutable, type-checked condition.
    pub fn resolve(&self) -> Result<EffectiveCondition, ConditionError> {
        let template = &self.template;
        let token = self
            .override_operator
            .as_deref()
            .unwrap_or(template.operator.as_str());
        let operator = token.parse::<ComparisonOperator>()?;
        let value = self
            .override_value
            .as_ref()
            .or(template.value.as_ref())
            .ok_or(ConditionError::MissingValue)?;

        Ok(EffectiveCondition {
            code: template.code.clone(),
            name: template.name.clone(),
            category_code: template.category_code.clone(),
            class: self.class,
            score_points: self.score_points,
            predicate: Predicate::build(template.data_type, operator, value)?,
        })
    }
}

/// Typed comparison, one variant per data type with only its legal operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Number {
        operator: ComparisonOperator,
        expected: f64,
    },
    Date {
        operator: ComparisonOperator,
        expected: NaiveDate,
    },
    Boolean {
        operator: EqualityOperator,
        expected: bool,
    },
    Text {
        operator: EqualityOperator,
        expected: String,
    },
}

impl Predicate {
    fn build(
        data_type: DataType,
        operator: ComparisonOperator,
        value: &ConditionValue,
    ) -> Result<Self, ConditionError> {
        let equality = || {
            EqualityOperator::try_from(operator)
                .map_err(|operator| ConditionError::IllegalOperator { data_type, operator })
        };

        match (data_type, value) {
            (DataType::Number, ConditionValue::Number(expected)) => Ok(Predicate::Number {
                operator,
                expected: *expected,
            }),
            (DataType::Date, ConditionValue::Date(expected)) => Ok(Predicate::Date {
                operator,
                expected: *expected,
            }),
            (DataType::Boolean, ConditionValue::Boolean(expected)) => Ok(Predicate::Boolean {
                operator: equality()?,
                expected: *expected,
            }),
            (DataType::Text, ConditionValue::Text(expected)) => Ok(Predicate::Text {
                operator: equality()?,
                expected: expected.clone(),
            }),
            (data_type, value) => Err(ConditionError::ValueTypeMismatch {
                data_type,
                found: value.data_type(),
            }),
        }
    }

    pub const fn data_type(&self) -> DataType {
        match self {
            Predicate::Number { .. } => DataType::Number,
            Predicate::Date { .. } => DataType::Date,
            Predicate::Boolean { .. } => DataType::Boolean,
            Predicate::Text { .. } => DataType::Text,
        }
    }

    pub fn test(&self, actual: &AttributeValue) -> Result<bool, AttributeError> {
        match (self, actual) {
            (Predicate::Number { operator, expected }, AttributeValue::Number(value)) => {
                Ok(operator.holds(value.total_cmp(expected)))
            }
            (Predicate::Date { operator, expected }, AttributeValue::Date(value)) => {
                Ok(operator.holds(value.cmp(expected)))
            }
            (Predicate::Boolean { operator, expected }, AttributeValue::Boolean(value)) => {
                Ok(operator.holds(value == expected))
            }
            (Predicate::Text { operator, expected }, AttributeValue::Text(value)) => {
                Ok(operator.holds(value == expected))
            }
            (predicate, value) => Err(AttributeError::KindMismatch {
                expected: predicate.data_type(),
                found: value.data_type(),
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Predicate::Number { operator, expected } => format!("{operator} {expected}"),
            Predicate::Date { operator, expected } => format!("{operator} {expected}"),
            Predicate::Boolean { operator, expected } => {
                format!("{} {expected}", operator.symbol())
            }
            Predicate::Text { operator, expected } => {
                format!("{} \"{expected}\"", operator.symbol())
            }
        }
    }
}

/// A condition after override resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveCondition {
    pub code: String,
    pub name: String,
    pub category_code: String,
    pub class: ConditionClass,
    pub score_points: i32,
    pub predicate: Predicate,
}

/// Configuration faults detected while resolving a condition record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    #[error("unknown operator token '{token}'")]
    UnknownOperator { token: String },
    #[error("operator '{operator}' is not allowed for {data_type} conditions")]
    IllegalOperator {
        data_type: DataType,
        operator: ComparisonOperator,
    },
    #[error("{data_type} condition carries a {found} value")]
    ValueTypeMismatch { data_type: DataType, found: DataType },
    #[error("condition has neither an override nor a template value")]
    MissingValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionStatus {
    Satisfied,
    Unsatisfied,
    Unevaluable,
}

/// Result of testing one condition against one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionOutcome {
    pub code: String,
    pub class: ConditionClass,
    pub score_points: i32,
    pub status: ConditionStatus,
    pub reason: String,
}

impl ConditionOutcome {
    pub fn is_satisfied(&self) -> bool {
        self.status == ConditionStatus::Satisfied
    }
}

/// Evaluate a condition record, failing closed on configuration or input faults.
pub fn evaluate_condition(
    condition: &SupplyTypeCondition,
    view: &ProfileView<'_>,
    attributes: &AttributeMap,
) -> ConditionOutcome {
    let template = &condition.template;
    let label = format!("{} [{}]", template.name, template.code);
    let unevaluable = |detail: String| ConditionOutcome {
        code: template.code.clone(),
        class: condition.class,
        score_points: condition.score_points,
        status: ConditionStatus::Unevaluable,
        reason: format!("{label}: not evaluable ({detail})"),
    };

    let effective = match condition.resolve() {
        Ok(effective) => effective,
        Err(error) => {
            tracing::warn!(condition = %template.code, %error, "condition misconfigured");
            return unevaluable(format!("configuration error: {error}"));
        }
    };

    let actual = match attributes
        .resolve(&effective.category_code)
        .ok_or_else(|| AttributeError::UnknownCategory {
            code: effective.category_code.clone(),
        })
        .and_then(|attribute| attribute.read(view))
    {
        Ok(actual) => actual,
        Err(error) => {
            tracing::warn!(condition = %template.code, %error, "condition input unavailable");
            return unevaluable(error.to_string());
        }
    };

    match effective.predicate.test(&actual) {
        Ok(passed) => {
            let expected = effective.predicate.describe();
            let (status, reason) = if passed {
                (
                    ConditionStatus::Satisfied,
                    format!("{label}: {actual} satisfies {expected}"),
                )
            } else {
                (
                    ConditionStatus::Unsatisfied,
                    format!("{label}: {actual} does not satisfy {expected}"),
                )
            };

            ConditionOutcome {
                code: effective.code,
                class: effective.class,
                score_points: effective.score_points,
                status,
                reason,
            }
        }
        Err(error) => {
            tracing::warn!(condition = %template.code, %error, "condition type mismatch");
            unevaluable(error.to_string())
        }
    }
}
