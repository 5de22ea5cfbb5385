// Quill - Structured logging with message templates
// Copyright (C) 2025 Quill Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Property map construction

use serde::Serialize;
use serde_json::Value;

/// Build a [`Properties`](crate::Properties) map from `key = value` pairs
///
/// Values can be anything `Serialize`; a value that fails to serialize
/// becomes `null`.
///
/// ```rust
/// use quill_core::properties;
///
/// let props = properties! { user = "ann", attempts = 3 };
/// assert_eq!(props["user"], "ann");
/// assert_eq!(props["attempts"], 3);
/// assert!(properties! {}.is_empty());
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::Properties::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut map = $crate::Properties::new();
        $(
            map.insert(
                ::std::string::String::from(stringify!($key)),
                $crate::macros::to_property_value(&$value),
            );
        )+
        map
    }};
}

/// Serialize `value` into a property value, `null` on failure
pub fn to_property_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_properties_macro() {
        let props = properties! { name = "World", count = 2, tags = vec!["a", "b"], };
        assert_eq!(props.get("name"), Some(&json!("World")));
        assert_eq!(props.get("count"), Some(&json!(2)));
        assert_eq!(props.get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_to_property_value() {
        assert_eq!(to_property_value("x"), json!("x"));
        assert_eq!(to_property_value(&Option::<u8>::None), Value::Null);
    }
}
