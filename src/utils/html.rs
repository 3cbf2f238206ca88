/// Clean user-supplied text with the ammonia whitelist sanitizer.
///
/// Chat messages and teacher profiles are rendered into HTML fragments by the
/// frontend, so stored text must not carry `<script>` or event handler attributes.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

pub fn clean_optional(input: Option<&str>) -> Option<String> {
    input.map(clean_html)
}
