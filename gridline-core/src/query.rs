use crate::models::FilterTerm;

/// Render active terms as a URL query string.
///
/// Each term contributes `dotted.field=value1,value2`, both sides
/// percent-encoded. Terms without values and keys listed in `ignored_keys`
/// are left out; a later term with the same field replaces an earlier one.
pub fn to_query_string(terms: &[FilterTerm], ignored_keys: &[String]) -> String {
    let mut params: Vec<(String, String)> = Vec::new();

    for term in terms {
        let key = term.fields.dotted();
        let value = term.values.join(",");

        match params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => params.push((key, value)),
        }
    }

    params
        .iter()
        .filter(|(key, value)| !value.is_empty() && !ignored_keys.iter().any(|k| k == key))
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
