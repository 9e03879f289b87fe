//! Custom template filters.

use minijinja::{Environment, Error, ErrorKind, Value};

/// Register every custom filter on `env`.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("json", json);
}

/// `{{ value|json }}`: compact JSON, non-ASCII characters kept as-is.
pub fn json(value: Value) -> Result<String, Error> {
    serde_json::to_string(&value).map_err(|err| {
        Error::new(
            ErrorKind::InvalidOperation,
            "value cannot be serialized to JSON",
        )
        .with_source(err)
    })
}
