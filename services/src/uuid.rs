use uuid::Uuid;

/// Fresh random identifier for generated records (UUID v4, hyphenated).
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// `true` if `id` is absent or whitespace only, i.e. must be replaced by [`fresh_id`].
pub fn is_blank_id(id: Option<&str>) -> bool {
    id.is_none_or(|s| s.trim().is_empty())
}
