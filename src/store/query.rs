use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Equality filters plus an optional ordering clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, Order)> {
        self.order.as_ref().map(|(column, order)| (column.as_str(), *order))
    }

    /// Renders the clauses as PostgREST query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self.filters.iter().map(|(column, value)| (column.clone(), format!("eq.{}", value))).collect();
        if let Some((column, order)) = &self.order {
            params.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }
        params
    }

    /// Whether `row` satisfies every equality filter.
    ///
    /// Non-string columns compare by their JSON text, null never matches.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|(column, expected)| match row.get(column) {
            Some(Value::String(actual)) => actual == expected,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == *expected,
        })
    }
}
