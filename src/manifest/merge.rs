use serde_json::Value;

/// Deep-merge `patch` into `target`.
///
/// Objects merge key by key, recursively. Any other patch value (scalar,
/// array, null) replaces what was there. Keys absent from the patch are left
/// untouched, so applying the same patch twice is the same as applying it once.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                let nested = patch_value.is_object()
                    && target_map.get(key).is_some_and(Value::is_object);
                if !nested {
                    target_map.insert(key.clone(), patch_value.clone());
                } else if let Some(existing) = target_map.get_mut(key) {
                    deep_merge(existing, patch_value);
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
