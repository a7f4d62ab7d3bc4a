/// Identifies entities that expose a stable unique identifier.
///
/// Identifiers are opaque strings rather than UUIDs because the built-in
/// default projects ship with short literal ids.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
