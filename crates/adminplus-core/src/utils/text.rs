//! String utility functions.

/// Makes a class name safe for use as a URL segment or session key.
///
/// Namespace separators (`\` and `::`) become a hyphen.
///
/// # Examples
///
/// ```
/// use adminplus_core::utils::text::sanitise_class_name;
///
/// assert_eq!(sanitise_class_name("app::models::Contact"), "app-models-Contact");
/// assert_eq!(sanitise_class_name("App\\Model\\Contact"), "App-Model-Contact");
/// assert_eq!(sanitise_class_name("Contact"), "Contact");
/// ```
pub fn sanitise_class_name(class_name: &str) -> String {
    class_name.replace("::", "-").replace('\\', "-")
}

/// Turns a field name into a human-readable label.
///
/// Splits `CamelCase` and `snake_case` into words and capitalises the first
/// letter: `"FirstName"` and `"first_name"` both become `"First name"`.
///
/// # Examples
///
/// ```
/// use adminplus_core::utils::text::name_to_label;
///
/// assert_eq!(name_to_label("FirstName"), "First name");
/// assert_eq!(name_to_label("created_at"), "Created at");
/// assert_eq!(name_to_label("ID"), "ID");
/// ```
pub fn name_to_label(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let prev_lower = i > 0 && chars[i - 1].is_lowercase();
        let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
        let prev_upper = i > 0 && chars[i - 1].is_uppercase();
        if c.is_uppercase() && !current.is_empty() && (prev_lower || (prev_upper && next_lower)) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let joined = words
        .iter()
        .enumerate()
        .map(|(i, w)| {
            // Acronyms keep their case
            if i > 0 && !w.chars().all(char::is_uppercase) {
                w.to_lowercase()
            } else {
                w.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    capfirst(&joined)
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use adminplus_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitise_rust_path() {
        assert_eq!(
            sanitise_class_name("adminplus_admin::plus::ModelAdminPlus"),
            "adminplus_admin-plus-ModelAdminPlus"
        );
    }

    #[test]
    fn test_sanitise_backslash_namespace() {
        assert_eq!(
            sanitise_class_name("Vendor\\Module\\Tests\\Contact"),
            "Vendor-Module-Tests-Contact"
        );
    }

    #[test]
    fn test_sanitise_plain_name_untouched() {
        assert_eq!(sanitise_class_name("Contact"), "Contact");
        assert_eq!(sanitise_class_name(""), "");
    }

    #[test]
    fn test_name_to_label_camel_case() {
        assert_eq!(name_to_label("FirstName"), "First name");
        assert_eq!(name_to_label("DateOfBirth"), "Date of birth");
    }

    #[test]
    fn test_name_to_label_snake_case() {
        assert_eq!(name_to_label("last_name"), "Last name");
    }

    #[test]
    fn test_name_to_label_acronyms() {
        assert_eq!(name_to_label("ID"), "ID");
        assert_eq!(name_to_label("ContactURL"), "Contact URL");
        assert_eq!(name_to_label("HTMLBody"), "HTML body");
    }

    #[test]
    fn test_capfirst() {
        assert_eq!(capfirst("hello"), "Hello");
        assert_eq!(capfirst("Hello"), "Hello");
        assert_eq!(capfirst("h"), "H");
        assert_eq!(capfirst(""), "");
    }
}
