use crate::document::ApiDocument;
use crate::document::operation::HttpMethod;

/// Build the operationId a route handler conventionally gets: handler name
/// plus path with every non-word character replaced by `_`, suffixed with
/// the lowercase method.
pub fn raw_operation_id(handler: &str, path: &str, method: HttpMethod) -> String {
    let joined: String = format!("{handler}{path}")
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();
    format!("{joined}_{method}")
}

/// Strip every trailing `_<method>` from `operation_id`.
///
/// Repeated suffixes are all removed so that applying this twice gives the
/// same result as applying it once. A route whose own name ends in the
/// method therefore loses that part too: `/foo_post` yields `request_foo`,
/// where a single strip would give `request_foo_post`. Documents published
/// with single-strip ids are rewritten once on the first run.
pub fn strip_method_suffix(operation_id: &str, method: HttpMethod) -> &str {
    let suffix = format!("_{method}");
    let mut id = operation_id;
    while let Some(stripped) = id.strip_suffix(suffix.as_str()) {
        if stripped.is_empty() {
            break;
        }
        id = stripped;
    }
    id
}

/// Remove the method suffix from every operationId in the document.
pub fn normalize_operation_ids(document: &mut ApiDocument) {
    for item in document.paths.values_mut() {
        item.for_each_operation_mut(|method, op| {
            if let Some(id) = op.operation_id.as_mut() {
                let stripped = strip_method_suffix(id, method).to_string();
                *id = stripped;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_id_replaces_separators() {
        assert_eq!(
            raw_operation_id("request", "/orders/create", HttpMethod::Post),
            "request_orders_create_post"
        );
    }

    #[test]
    fn raw_id_replaces_dashes_and_dots() {
        assert_eq!(
            raw_operation_id("request", "/v1.2/weather-forecast", HttpMethod::Post),
            "request_v1_2_weather_forecast_post"
        );
    }

    #[test]
    fn strips_matching_suffix_only() {
        assert_eq!(
            strip_method_suffix("request_orders_create_post", HttpMethod::Post),
            "request_orders_create"
        );
        assert_eq!(
            strip_method_suffix("request_orders_get", HttpMethod::Post),
            "request_orders_get"
        );
    }

    #[test]
    fn stripping_is_idempotent() {
        for id in ["request_a_post", "request_a_post_post", "request_a", "_post"] {
            let once = strip_method_suffix(id, HttpMethod::Post);
            let twice = strip_method_suffix(once, HttpMethod::Post);
            assert_eq!(once, twice, "{id}");
        }
    }

    #[test]
    fn route_ending_in_method_loses_it() {
        let raw = raw_operation_id("request", "/foo_post", HttpMethod::Post);
        assert_eq!(raw, "request_foo_post_post");
        assert_eq!(strip_method_suffix(&raw, HttpMethod::Post), "request_foo");
    }

    #[test]
    fn never_strips_to_empty() {
        assert_eq!(strip_method_suffix("_post", HttpMethod::Post), "_post");
    }
}
