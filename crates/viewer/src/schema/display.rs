/// Human-facing column name: each dotted segment gets an upper-case first
/// letter and segments are joined with `" > "` (`id.orig_h` becomes
/// `Id > Orig_h`).
pub fn display_name(path: &str) -> String {
    path.split('.')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" > ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("ts"), "Ts");
        assert_eq!(display_name("id.orig_h"), "Id > Orig_h");
        assert_eq!(display_name("@timestamp"), "@timestamp");
        assert_eq!(display_name("a.b.c"), "A > B > C");
        assert_eq!(display_name("already.Upper"), "Already > Upper");
    }

    #[test]
    fn test_display_name_empty_segments() {
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("a..b"), "A >  > B");
    }
}
