use serde_json::Value;

/// Resolve a field path against a record.
///
/// The whole path is first tried as a literal top-level key, which covers
/// keys that contain dots (`{"id.orig_h": ...}`). Only when that key is
/// absent is the path split on `.` and walked through nested objects; any
/// missing segment or non-object along the way yields `None`.
///
/// Schema sampling, filtering, sorting and cell display all resolve through
/// this function.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let object = record.as_object()?;
    if let Some(value) = object.get(path) {
        return Some(value);
    }

    let mut segments = path.split('.');
    let mut current = object.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
