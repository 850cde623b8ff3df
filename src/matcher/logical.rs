use super::Matcher;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Logical operator of a [`LogicalMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Not => "not",
        }
    }
}

/// Combines other matchers under `and`, `or` or `not`.
///
/// `not` always holds exactly one operand and serializes it as a single value
/// (`{"not": {...}}`); `and`/`or` serialize as a list.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalMatcher {
    operator: LogicalOperator,
    operands: Vec<Matcher>,
}

impl LogicalMatcher {
    pub(crate) fn and(operands: Vec<Matcher>) -> Self {
        Self {
            operator: LogicalOperator::And,
            operands,
        }
    }

    pub(crate) fn or(operands: Vec<Matcher>) -> Self {
        Self {
            operator: LogicalOperator::Or,
            operands,
        }
    }

    pub(crate) fn not(operand: Matcher) -> Self {
        Self {
            operator: LogicalOperator::Not,
            operands: vec![operand],
        }
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn operands(&self) -> &[Matcher] {
        &self.operands
    }

    /// Appends `other` when this node already uses `operator`, otherwise wraps
    /// this node together with `other` in a new one.
    pub(crate) fn combine(mut self, operator: LogicalOperator, other: Matcher) -> Self {
        if operator != LogicalOperator::Not && self.operator == operator {
            self.operands.push(other);
            return self;
        }
        Self {
            operator,
            operands: vec![Matcher::Logical(self), other],
        }
    }

    pub(crate) fn map_operands(mut self, f: impl Fn(Matcher) -> Matcher) -> Self {
        self.operands = self.operands.into_iter().map(f).collect();
        self
    }
}

impl Serialize for LogicalMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match (self.operator, self.operands.as_slice()) {
            (LogicalOperator::Not, [operand]) => {
                map.serialize_entry(self.operator.as_str(), operand)?
            }
            (operator, operands) => map.serialize_entry(operator.as_str(), operands)?,
        }
        map.end()
    }
}
