#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        field: $field:expr,
        pattern: $pat:literal
        $(, signals: $signals:expr)?
        , prod: |$caps:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            field: $field,
            pattern: $crate::regex!($pat),
            production: |$caps: &regex::Captures<'_>| -> Option<$crate::FieldValue> { $body },
            signals: { $crate::engine::Signals::empty() $(| $signals)? },
        }
    }};
}
