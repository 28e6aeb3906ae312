/// Builds an [`MsonValue`](crate::MsonValue) from JSON-like syntax.
///
/// Object keys become slot names; slot order in the literal is the order the
/// value enumerates, which is what positional encoding pairs against the
/// schema.
///
/// # Examples
///
/// ```rust
/// use mson::mson;
///
/// let value = mson!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["admin", "ops"]
/// });
///
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! mson {
    // Handle null
    (null) => {
        $crate::MsonValue::Null
    };

    // Handle true
    (true) => {
        $crate::MsonValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::MsonValue::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::MsonValue::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::MsonValue::Array(vec![$($crate::mson!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::MsonValue::Object($crate::MsonMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::MsonMap::new();
        $(
            object.insert($key.to_string(), $crate::mson!($value));
        )*
        $crate::MsonValue::Object(object)
    }};

    // Fallback for any expression with a From conversion
    ($other:expr) => {
        $crate::MsonValue::from($other)
    };
}
