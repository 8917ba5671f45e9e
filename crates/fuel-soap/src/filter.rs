//! Retrieve filters.
//!
//! Filters arrive loosely typed (a JSON map) and leave as a tagged wire
//! structure. [`Filter`] is a typed way to build the loose form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{is_data_extension_like, COMPLEX_FILTER_PART, SIMPLE_FILTER_PART, XSI_TYPE};

const LOGICAL_OPERATOR: &str = "LogicalOperator";
const LEFT_OPERAND: &str = "LeftOperand";
const RIGHT_OPERAND: &str = "RightOperand";

/// Normalize a filter for `object_type` into its wire form.
///
/// Returns `None` when there is no filter to send: the input is absent or
/// not a map. A map with a `LogicalOperator` key is a complex filter and
/// must carry both operands.
pub fn normalize_filter(filter: Option<&Value>, object_type: &str) -> Result<Option<Value>> {
    let Some(Value::Object(filter)) = filter else {
        return Ok(None);
    };

    let mut filter = filter.clone();

    if is_data_extension_like(object_type)
        && filter.get("Property").and_then(Value::as_str) == Some("CustomerKey")
    {
        filter.insert(
            "Property".to_string(),
            Value::String("DataExtension.CustomerKey".to_string()),
        );
    }

    if filter.contains_key(LOGICAL_OPERATOR) {
        complex_filter_part(filter).map(Some)
    } else {
        Ok(Some(tagged(SIMPLE_FILTER_PART, filter)))
    }
}

fn complex_filter_part(mut filter: Map<String, Value>) -> Result<Value> {
    let left = take_operand(&mut filter, LEFT_OPERAND)?;
    let right = take_operand(&mut filter, RIGHT_OPERAND)?;
    let operator = filter.remove(LOGICAL_OPERATOR).unwrap_or(Value::Null);

    let mut part = Map::new();
    part.insert(LEFT_OPERAND.to_string(), tagged(SIMPLE_FILTER_PART, left));
    part.insert(LOGICAL_OPERATOR.to_string(), operator);
    part.insert(RIGHT_OPERAND.to_string(), tagged(SIMPLE_FILTER_PART, right));
    part.extend(filter);

    Ok(tagged(COMPLEX_FILTER_PART, part))
}

fn take_operand(filter: &mut Map<String, Value>, key: &str) -> Result<Map<String, Value>> {
    match filter.remove(key) {
        Some(Value::Object(operand)) => Ok(operand),
        Some(_) => Err(Error::malformed(format!(
            "{} of a complex filter must be a simple filter",
            key
        ))),
        None => Err(Error::malformed(format!(
            "Complex filter is missing its {}",
            key
        ))),
    }
}

/// Prepend the schema type discriminator to a map.
pub(crate) fn tagged(xsi_type: &str, map: Map<String, Value>) -> Value {
    let mut out = Map::with_capacity(map.len() + 1);
    out.insert(XSI_TYPE.to_string(), Value::String(xsi_type.to_string()));
    out.extend(map.into_iter().filter(|(k, _)| k != XSI_TYPE));
    Value::Object(out)
}

/// Comparison used by a simple filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    IsNull,
    IsNotNull,
    Between,
    #[serde(rename = "IN")]
    In,
    Like,
}

impl SimpleOperator {
    /// Wire spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::Between => "between",
            Self::In => "IN",
            Self::Like => "like",
        }
    }
}

/// Boolean combinator of a complex filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Wire spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// `{Property, SimpleOperator, Value}` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFilter {
    pub property: String,
    pub operator: SimpleOperator,
    pub values: Vec<String>,
}

impl SimpleFilter {
    fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Property".to_string(), Value::String(self.property));
        map.insert(
            "SimpleOperator".to_string(),
            Value::String(self.operator.as_str().to_string()),
        );
        let mut values: Vec<Value> = self.values.into_iter().map(Value::String).collect();
        match values.len() {
            0 => {}
            1 => {
                map.insert("Value".to_string(), values.remove(0));
            }
            _ => {
                map.insert("Value".to_string(), Value::Array(values));
            }
        }
        map
    }
}

/// A typed retrieve filter.
///
/// ```rust
/// use fuel_sdk_soap::Filter;
///
/// let filter = Filter::equals("EmailAddress", "dev@example.com")
///     .or(Filter::equals("SubscriberKey", "dev"));
/// let loose: serde_json::Value = filter.into();
/// assert_eq!(loose["LogicalOperator"], "OR");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Simple(SimpleFilter),
    Complex {
        left: SimpleFilter,
        operator: LogicalOperator,
        right: SimpleFilter,
    },
}

impl Filter {
    /// A simple comparison with one value.
    pub fn simple(
        property: impl Into<String>,
        operator: SimpleOperator,
        value: impl Into<String>,
    ) -> Self {
        Self::Simple(SimpleFilter {
            property: property.into(),
            operator,
            values: vec![value.into()],
        })
    }

    /// `property equals value`.
    pub fn equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::simple(property, SimpleOperator::Equals, value)
    }

    /// `property IN values`.
    pub fn is_in<I, S>(property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Simple(SimpleFilter {
            property: property.into(),
            operator: SimpleOperator::In,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// `property` is null.
    pub fn is_null(property: impl Into<String>) -> Self {
        Self::Simple(SimpleFilter {
            property: property.into(),
            operator: SimpleOperator::IsNull,
            values: Vec::new(),
        })
    }

    /// Combine two simple filters with AND.
    ///
    /// Complex filters only nest one level; a complex operand is replaced by
    /// its left side.
    pub fn and(self, other: Filter) -> Self {
        self.combine(LogicalOperator::And, other)
    }

    /// Combine two simple filters with OR.
    pub fn or(self, other: Filter) -> Self {
        self.combine(LogicalOperator::Or, other)
    }

    fn combine(self, operator: LogicalOperator, other: Filter) -> Self {
        Self::Complex {
            left: self.into_simple(),
            operator,
            right: other.into_simple(),
        }
    }

    fn into_simple(self) -> SimpleFilter {
        match self {
            Self::Simple(simple) => simple,
            Self::Complex { left, .. } => left,
        }
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Simple(simple) => Value::Object(simple.into_map()),
            Filter::Complex {
                left,
                operator,
                right,
            } => {
                let mut map = Map::new();
                map.insert(LEFT_OPERAND.to_string(), Value::Object(left.into_map()));
                map.insert(
                    LOGICAL_OPERATOR.to_string(),
                    Value::String(operator.as_str().to_string()),
                );
                map.insert(RIGHT_OPERAND.to_string(), Value::Object(right.into_map()));
                Value::Object(map)
            }
        }
    }
}
