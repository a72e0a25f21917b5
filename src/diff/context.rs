use crate::spec::Method;
use serde::Serialize;

/// Immutable description of where in the document tree a difference occurred.
///
/// Every `append_*`/`with_*` call returns a new context; the receiver is
/// never mutated, so sibling branches of the comparison can never alias each
/// other's location state. Two contexts are equal iff all fields are equal,
/// which tests use to assert where a diff was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffContext {
    pub route: String,
    pub method: Option<Method>,
    pub request: Option<String>,
    pub response: Option<String>,
    pub schema: Option<String>,
}

impl DiffContext {
    /// Root a context at a route, with no narrower location yet.
    pub fn from_route(route: impl Into<String>) -> Self {
        DiffContext {
            route: route.into(),
            method: None,
            request: None,
            response: None,
            schema: None,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Replace the request path wholesale (request bodies pin it to `<Body>`).
    pub fn with_request(mut self, segment: impl Into<String>) -> Self {
        self.request = Some(segment.into());
        self
    }

    pub fn append_request(&self, segment: &str) -> Self {
        let mut next = self.clone();
        next.request = Some(join(self.request.as_deref(), segment));
        next
    }

    pub fn append_response(&self, segment: &str) -> Self {
        let mut next = self.clone();
        next.response = Some(join(self.response.as_deref(), segment));
        next
    }

    pub fn append_schema(&self, segment: &str) -> Self {
        let mut next = self.clone();
        next.schema = Some(join(self.schema.as_deref(), segment));
        next
    }
}

fn join(existing: Option<&str>, segment: &str) -> String {
    match existing {
        Some(base) => format!("{base}.{segment}"),
        None => segment.to_string(),
    }
}

impl std::fmt::Display for DiffContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.route)?;
        if let Some(method) = self.method {
            write!(f, " {}", method)?;
        }
        if let Some(request) = &self.request {
            write!(f, " req:{}", request)?;
        }
        if let Some(response) = &self.response {
            write!(f, " resp:{}", response)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, " schema:{}", schema)?;
        }
        Ok(())
    }
}
