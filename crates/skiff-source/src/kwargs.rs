use std::collections::HashMap;

use serde_json::Value;

/// Keyword arguments forwarded to a backend load function.
///
/// Values are JSON so that untyped hints (row counts, row-group lists,
/// credential maps) survive the trip through the dispatch core unchanged.
pub type Kwargs = HashMap<String, Value>;

/// Merge multiple keyword-argument layers into a single mapping.
/// Later layers override earlier ones.
pub fn merge_kwargs(layers: Vec<Kwargs>) -> Kwargs {
    let mut merged = Kwargs::new();
    for layer in layers {
        merged.extend(layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge_kwargs_empty() {
        assert_eq!(merge_kwargs(vec![]), Kwargs::new());
    }

    #[test]
    fn test_merge_kwargs_override() {
        let layers = vec![
            Kwargs::from([
                ("x".to_string(), json!(0)),
                ("y".to_string(), json!(2)),
            ]),
            Kwargs::from([("x".to_string(), json!(1))]),
        ];
        let merged = merge_kwargs(layers);
        assert_eq!(merged.get("x"), Some(&json!(1)));
        assert_eq!(merged.get("y"), Some(&json!(2)));
    }

    #[test]
    fn test_merge_kwargs_multiple_layers() {
        let layers = vec![
            Kwargs::from([("a".to_string(), json!("first"))]),
            Kwargs::from([("b".to_string(), json!(true))]),
            Kwargs::from([("a".to_string(), json!("last"))]),
        ];
        let merged = merge_kwargs(layers);
        assert_eq!(merged.get("a"), Some(&json!("last")));
        assert_eq!(merged.get("b"), Some(&json!(true)));
    }
}
