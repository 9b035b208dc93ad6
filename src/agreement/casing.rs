/// Title case: every cased char that follows an uncased one is upper case,
/// every other cased char lower case, and there is at least one cased char.
pub fn is_title(text: &str) -> bool {
    let mut previous_cased = false;
    let mut seen_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }
    seen_cased
}

/// All cased chars upper case, with at least one cased char
pub fn is_upper(text: &str) -> bool {
    let mut seen_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            seen_cased = true;
        }
    }
    seen_cased
}

/// Upper-case the first letter of every run of letters
pub fn to_title(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            result.push(c);
            previous_cased = false;
        }
    }
    result
}

/// Give `replacement` the case pattern of `original`
pub fn match_case(original: &str, replacement: &str) -> String {
    if is_title(original) {
        to_title(replacement)
    } else if is_upper(original) {
        replacement.to_uppercase()
    } else {
        replacement.to_lowercase()
    }
}
